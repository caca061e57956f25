mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use plantonista_client::ClientError;
use stdout_io::write_stdout_text;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PLANTONISTA_LOG";

const ROOT_HELP: &str = "Plantonista - finance tracker for shift-working physicians

Usage:
  plantonista <command>

Start here:
  plantonista shift add --help
  plantonista dash
  plantonista plan show
";

const TOP_LEVEL_HELP: &str = "Plantonista - finance tracker for shift-working physicians

USAGE: plantonista <command>

Record income:
  plantonista shift add --hospital H --amount A --date D       Record a shift (add --repeat for a series)
  plantonista receivable add --description T --amount A --date D
  plantonista shift confirm <id> --received-on D               Mark a shift as paid

Record expenses:
  plantonista expense add --category C --description T --amount A --due D
  plantonista expense pay <id> --paid-on D

Review:
  plantonista shift list --status overdue                      Shifts whose payment is late
  plantonista shift list --month YYYY-MM                       Shifts worked in one month
  plantonista expense list --month YYYY-MM
  plantonista statement --month YYYY-MM                        Opening balance, movements, running balance
  plantonista dash                                             Month summary and overdue hospitals

Settings:
  plantonista hospital add <name>                              Hospitals offered for shifts
  plantonista category add <name>                              Expense categories
  plantonista profile set --name N --specialty S --crm C

Export and plan:
  plantonista export <path> --month YYYY-MM                    Statement as CSV (paid plans)
  plantonista plan show                                        Trial days left and what is unlocked

Every list and show command accepts --json.
Run `plantonista <command> --help` for command usage.
";

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

/// Logs go to stderr so stdout stays parseable in `--json` mode.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let text = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&text).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    let dispatched = dispatch::dispatch(&cli);
    match dispatched {
        Ok(success) => {
            debug!(command = %success.command, "command succeeded");
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing boilerplate (Usage line, "For more information" hint)
/// so the "What to do next" section is the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// Builds the subcommand path from raw CLI args for use in help hints, for
/// example "shift add" or "expense pay".
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let non_flags: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();

    let hint = match non_flags.as_slice() {
        [
            group @ ("shift" | "receivable" | "expense" | "plan" | "hospital" | "category"
            | "profile"),
            action,
            ..,
        ] if is_known_action(group, action) => format!("{group} {action}"),
        [
            group @ ("shift" | "receivable" | "expense" | "plan" | "hospital" | "category"
            | "profile"),
            ..,
        ] => (*group).to_string(),
        [command @ ("statement" | "export" | "dash"), ..] => (*command).to_string(),
        _ => return None,
    };
    Some(hint)
}

fn is_known_action(group: &str, action: &str) -> bool {
    match group {
        "shift" | "receivable" => {
            matches!(action, "add" | "list" | "confirm" | "edit" | "delete")
        }
        "expense" => matches!(action, "add" | "list" | "pay" | "edit" | "delete"),
        "plan" | "profile" => matches!(action, "show" | "set"),
        "hospital" | "category" => matches!(action, "add" | "list" | "delete"),
        _ => false,
    }
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.is_internal() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

#[cfg(test)]
mod tests {
    use super::{command_path_from_args, strip_clap_boilerplate};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn command_hint_follows_known_paths() {
        assert_eq!(
            command_path_from_args(&args(&["plantonista", "shift", "add", "--amount", "x"])),
            Some("shift add".to_string())
        );
        assert_eq!(
            command_path_from_args(&args(&["plantonista", "expense", "bogus"])),
            Some("expense".to_string())
        );
        assert_eq!(
            command_path_from_args(&args(&["plantonista", "export", "out.csv"])),
            Some("export".to_string())
        );
        assert_eq!(
            command_path_from_args(&args(&["plantonista", "hospital", "list", "--json"])),
            Some("hospital list".to_string())
        );
        assert_eq!(
            command_path_from_args(&args(&["plantonista", "category", "rename"])),
            Some("category".to_string())
        );
        assert_eq!(command_path_from_args(&args(&["plantonista", "payroll"])), None);
    }

    #[test]
    fn clap_usage_tail_is_removed() {
        let message = "error: unexpected argument '--tag' found\n\nUsage: plantonista receivable add";
        assert_eq!(
            strip_clap_boilerplate(message),
            "error: unexpected argument '--tag' found"
        );
    }
}

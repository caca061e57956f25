use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoDate(pub NaiveDate);

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(IsoDate)
        .map_err(|_| "date must use valid calendar values".to_string())
}

/// Extended help shown after `plantonista shift add --help`.
pub const SHIFT_ADD_AFTER_HELP: &str = "\
How shifts are tracked:
  A shift is recorded on the day you worked it (`--date`). The hospital pays
  later, on the expected date (`--expected`, default 30 days after the shift).
  Once the expected date has passed without payment the shift shows as
  overdue. Overdue is never stored, so it clears as soon as you confirm it.

Repeating shifts:
  `--repeat weekly|biweekly|monthly|yearly` creates one entry per occurrence
  up to `--until` (default: one year after the first date, at most 100).
  Every occurrence keeps the same gap between shift and expected payment and
  starts out pending. Each one can be edited, confirmed or deleted on its own.

Examples:
  plantonista shift add --hospital \"Hospital Norte\" --amount 1500 --date 2026-03-02
  plantonista shift add --hospital \"Hospital Sul\" --amount 1800 --date 2026-03-06 \\
    --expected 2026-04-10 --tag UTI --repeat weekly --until 2026-06-30
";

#[derive(Debug, Parser)]
#[command(
    name = "plantonista",
    version,
    about = "finance tracker for shift-working physicians",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Pin the reference day used for overdue and plan checks (YYYY-MM-DD)
    #[arg(long, global = true, hide = true, value_parser = parse_iso_date)]
    pub today: Option<IsoDate>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record and settle shift income
    #[command(arg_required_else_help = true)]
    Shift {
        #[command(subcommand)]
        command: ShiftCommand,
    },
    /// Record and settle other receivables
    #[command(arg_required_else_help = true)]
    Receivable {
        #[command(subcommand)]
        command: ReceivableCommand,
    },
    /// Record and pay expenses
    #[command(arg_required_else_help = true)]
    Expense {
        #[command(subcommand)]
        command: ExpenseCommand,
    },
    /// Show the monthly statement with opening and running balances
    Statement {
        /// Statement month (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<String>,
        /// Ignore expenses due after this day (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Write the monthly statement to a CSV file
    Export {
        /// Destination file
        path: String,
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        as_of: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Month summary, cash flow and overdue hospitals
    Dash {
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show or record the subscription plan
    #[command(arg_required_else_help = true)]
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },
    /// Keep the list of hospitals offered for shifts
    #[command(arg_required_else_help = true)]
    Hospital {
        #[command(subcommand)]
        command: RegistryCommand,
    },
    /// Keep the list of expense categories
    #[command(arg_required_else_help = true)]
    Category {
        #[command(subcommand)]
        command: RegistryCommand,
    },
    /// Show or update your name, specialty and CRM
    #[command(arg_required_else_help = true)]
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ShiftCommand {
    #[command(after_long_help = SHIFT_ADD_AFTER_HELP)]
    Add(ShiftAddArgs),
    List(IncomeListArgs),
    Confirm(ConfirmArgs),
    Edit(ShiftEditArgs),
    Delete(EntryArgs),
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReceivableCommand {
    Add(ReceivableAddArgs),
    List(IncomeListArgs),
    Confirm(ConfirmArgs),
    Edit(ReceivableEditArgs),
    Delete(EntryArgs),
}

#[derive(Debug, Clone, Subcommand)]
pub enum ExpenseCommand {
    Add(ExpenseAddArgs),
    List {
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    Pay {
        entry_id: String,
        #[arg(long)]
        paid_on: String,
        #[arg(long)]
        json: bool,
    },
    Edit(ExpenseEditArgs),
    Delete(EntryArgs),
}

#[derive(Debug, Clone, Subcommand)]
pub enum PlanCommand {
    Show {
        #[arg(long)]
        json: bool,
    },
    Set {
        /// trialing, active, past_due, canceled or incomplete
        #[arg(long)]
        status: String,
        #[arg(long)]
        trial_end: Option<String>,
        #[arg(long)]
        period_end: Option<String>,
        /// true or false
        #[arg(long)]
        admin: Option<bool>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum RegistryCommand {
    Add {
        name: String,
        #[arg(long)]
        json: bool,
    },
    List {
        #[arg(long)]
        json: bool,
    },
    Delete(EntryArgs),
}

#[derive(Debug, Clone, Subcommand)]
pub enum ProfileCommand {
    Show {
        #[arg(long)]
        json: bool,
    },
    /// An empty value clears the field
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
        #[arg(long)]
        crm: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

/// Flags shared by shift and receivable `add`.
#[derive(Debug, Clone, Args)]
pub struct IncomeAddCommon {
    #[arg(long)]
    pub amount: String,
    /// Day the work was done (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,
    /// Day payment is expected (YYYY-MM-DD)
    #[arg(long)]
    pub expected: Option<String>,
    /// Day payment arrived (YYYY-MM-DD); implies `--status received`
    #[arg(long)]
    pub received: Option<String>,
    /// pending, received or canceled
    #[arg(long)]
    pub status: Option<String>,
    /// weekly, biweekly, monthly or yearly
    #[arg(long)]
    pub repeat: Option<String>,
    /// Last day a repeating entry may fall on (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<String>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ShiftAddArgs {
    #[arg(long)]
    pub hospital: String,
    #[arg(long)]
    pub tag: Option<String>,
    #[command(flatten)]
    pub common: IncomeAddCommon,
}

#[derive(Debug, Clone, Args)]
pub struct ReceivableAddArgs {
    #[arg(long)]
    pub description: String,
    #[command(flatten)]
    pub common: IncomeAddCommon,
}

#[derive(Debug, Clone, Args)]
pub struct IncomeListArgs {
    /// Month of the work date (YYYY-MM)
    #[arg(long)]
    pub month: Option<String>,
    /// pending, overdue, received or canceled
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ConfirmArgs {
    pub entry_id: String,
    #[arg(long)]
    pub received_on: String,
    #[arg(long)]
    pub json: bool,
}

/// Flags shared by shift and receivable `edit`.
#[derive(Debug, Clone, Args)]
pub struct IncomeEditCommon {
    pub entry_id: String,
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub expected: Option<String>,
    #[arg(long)]
    pub received: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ShiftEditArgs {
    #[arg(long)]
    pub hospital: Option<String>,
    #[arg(long)]
    pub tag: Option<String>,
    #[command(flatten)]
    pub common: IncomeEditCommon,
}

#[derive(Debug, Clone, Args)]
pub struct ReceivableEditArgs {
    #[arg(long)]
    pub description: Option<String>,
    #[command(flatten)]
    pub common: IncomeEditCommon,
}

#[derive(Debug, Clone, Args)]
pub struct ExpenseAddArgs {
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub amount: String,
    /// Due day (YYYY-MM-DD)
    #[arg(long)]
    pub due: String,
    /// paid or unpaid
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub paid_on: Option<String>,
    #[arg(long)]
    pub repeat: Option<String>,
    #[arg(long)]
    pub until: Option<String>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ExpenseEditArgs {
    pub entry_id: String,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long)]
    pub due: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub paid_on: Option<String>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct EntryArgs {
    pub entry_id: String,
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use clap::error::ErrorKind;

    use super::{
        Commands, ExpenseCommand, PlanCommand, ProfileCommand, RegistryCommand, ShiftCommand,
        parse_from,
    };

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 27] = [
            vec![
                "plantonista",
                "shift",
                "add",
                "--hospital",
                "Hospital Norte",
                "--amount",
                "1500",
                "--date",
                "2026-03-02",
            ],
            vec![
                "plantonista",
                "shift",
                "add",
                "--hospital",
                "Hospital Sul",
                "--amount",
                "1800",
                "--date",
                "2026-03-06",
                "--tag",
                "UTI",
                "--repeat",
                "weekly",
                "--until",
                "2026-06-30",
                "--json",
            ],
            vec!["plantonista", "shift", "list"],
            vec!["plantonista", "shift", "list", "--status", "overdue", "--json"],
            vec!["plantonista", "shift", "confirm", "shf_1", "--received-on", "2026-04-01"],
            vec!["plantonista", "shift", "edit", "shf_1", "--amount", "1600"],
            vec!["plantonista", "shift", "delete", "shf_1", "--json"],
            vec![
                "plantonista",
                "receivable",
                "add",
                "--description",
                "Consulting",
                "--amount",
                "900",
                "--date",
                "2026-03-02",
            ],
            vec!["plantonista", "receivable", "list", "--search", "consult"],
            vec![
                "plantonista",
                "expense",
                "add",
                "--category",
                "Rent",
                "--description",
                "Office",
                "--amount",
                "900",
                "--due",
                "2026-03-05",
            ],
            vec!["plantonista", "expense", "list", "--month", "2026-03"],
            vec!["plantonista", "expense", "pay", "exp_1", "--paid-on", "2026-03-04"],
            vec!["plantonista", "expense", "edit", "exp_1", "--due", "2026-03-06"],
            vec!["plantonista", "expense", "delete", "exp_1"],
            vec!["plantonista", "statement", "--month", "2026-03", "--as-of", "2026-03-15"],
            vec!["plantonista", "export", "march.csv", "--month", "2026-03"],
            vec!["plantonista", "dash", "--json"],
            vec!["plantonista", "plan", "show"],
            vec!["plantonista", "plan", "set", "--status", "active", "--admin", "true"],
            vec!["plantonista", "dash", "--today", "2026-03-15"],
            vec!["plantonista", "shift", "list", "--month", "2026-03"],
            vec!["plantonista", "hospital", "add", "Hospital São Lucas"],
            vec!["plantonista", "hospital", "list", "--json"],
            vec!["plantonista", "hospital", "delete", "hsp_1"],
            vec!["plantonista", "category", "add", "Aluguel", "--json"],
            vec!["plantonista", "profile", "show"],
            vec!["plantonista", "profile", "set", "--name", "Ana Souza", "--crm", "CRM-SP 123456"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
        }
    }

    #[test]
    fn shift_add_flags_land_in_args() {
        let parsed = parse_from([
            "plantonista",
            "shift",
            "add",
            "--hospital",
            "Hospital Norte",
            "--amount",
            "1500",
            "--date",
            "2026-03-02",
            "--received",
            "2026-03-20",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            match cli.command {
                Commands::Shift {
                    command: ShiftCommand::Add(args),
                } => {
                    assert_eq!(args.hospital, "Hospital Norte");
                    assert_eq!(args.common.received.as_deref(), Some("2026-03-20"));
                    assert!(!args.common.json);
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }
    }

    #[test]
    fn receivable_add_has_no_tag() {
        let parsed = parse_from([
            "plantonista",
            "receivable",
            "add",
            "--description",
            "Consulting",
            "--amount",
            "900",
            "--date",
            "2026-03-02",
            "--tag",
            "UTI",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn today_is_global_and_validated() {
        let parsed = parse_from(["plantonista", "expense", "list", "--today", "2026-03-15"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(
                cli.today.map(|value| value.0),
                NaiveDate::from_ymd_opt(2026, 3, 15)
            );
            assert!(matches!(
                cli.command,
                Commands::Expense {
                    command: ExpenseCommand::List { .. }
                }
            ));
        }

        let invalid = parse_from(["plantonista", "dash", "--today", "2026-02-30"]);
        assert!(invalid.is_err());
    }

    #[test]
    fn plan_set_parses_admin_flag() {
        let parsed = parse_from([
            "plantonista",
            "plan",
            "set",
            "--status",
            "past_due",
            "--admin",
            "false",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Plan {
                    command: PlanCommand::Set {
                        admin: Some(false),
                        ..
                    }
                }
            ));
        }
    }

    #[test]
    fn registry_and_profile_flags_land_in_args() {
        let parsed = parse_from(["plantonista", "category", "add", "Contador", "--json"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            match cli.command {
                Commands::Category {
                    command: RegistryCommand::Add { name, json },
                } => {
                    assert_eq!(name, "Contador");
                    assert!(json);
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }

        let parsed = parse_from(["plantonista", "profile", "set", "--specialty", ""]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Profile {
                    command: ProfileCommand::Set {
                        name: None,
                        specialty: Some(ref value),
                        ..
                    }
                } if value.is_empty()
            ));
        }
    }

    #[test]
    fn bare_group_shows_help() {
        let parsed = parse_from(["plantonista", "expense"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(
                err.kind(),
                ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            );
        }
    }

    #[test]
    fn confirm_requires_received_on() {
        let parsed = parse_from(["plantonista", "shift", "confirm", "shf_1"]);
        assert!(parsed.is_err());
    }
}

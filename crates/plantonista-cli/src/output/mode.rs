use crate::cli::{
    Commands, ExpenseCommand, PlanCommand, ProfileCommand, ReceivableCommand, RegistryCommand,
    ShiftCommand,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Shift { command } => match command {
            ShiftCommand::Add(args) => args.common.json,
            ShiftCommand::List(args) => args.json,
            ShiftCommand::Confirm(args) => args.json,
            ShiftCommand::Edit(args) => args.common.json,
            ShiftCommand::Delete(args) => args.json,
        },
        Commands::Receivable { command } => match command {
            ReceivableCommand::Add(args) => args.common.json,
            ReceivableCommand::List(args) => args.json,
            ReceivableCommand::Confirm(args) => args.json,
            ReceivableCommand::Edit(args) => args.common.json,
            ReceivableCommand::Delete(args) => args.json,
        },
        Commands::Expense { command } => match command {
            ExpenseCommand::Add(args) => args.json,
            ExpenseCommand::Edit(args) => args.json,
            ExpenseCommand::Delete(args) => args.json,
            ExpenseCommand::List { json, .. } | ExpenseCommand::Pay { json, .. } => *json,
        },
        Commands::Plan { command } => match command {
            PlanCommand::Show { json } | PlanCommand::Set { json, .. } => *json,
        },
        Commands::Hospital { command } | Commands::Category { command } => match command {
            RegistryCommand::Add { json, .. } | RegistryCommand::List { json } => *json,
            RegistryCommand::Delete(args) => args.json,
        },
        Commands::Profile { command } => match command {
            ProfileCommand::Show { json } | ProfileCommand::Set { json, .. } => *json,
        },
        Commands::Statement { json, .. }
        | Commands::Export { json, .. }
        | Commands::Dash { json, .. } => *json,
    };
    OutputMode::from_flag(json)
}

#[cfg(test)]
mod tests {
    use super::{OutputMode, mode_for_command};
    use crate::cli::parse_from;

    #[test]
    fn mode_uses_json_for_shift_add_with_json_flag() {
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
            "--json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
        }
    }

    #[test]
    fn mode_uses_json_for_receivable_edit_with_json_flag() {
        let parsed = parse_from([
            "plantonista",
            "receivable",
            "edit",
            "rcv_1",
            "--amount",
            "10",
            "--json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
        }
    }

    #[test]
    fn mode_uses_json_for_expense_pay_with_json_flag() {
        let parsed = parse_from([
            "plantonista",
            "expense",
            "pay",
            "exp_1",
            "--paid-on",
            "2026-03-04",
            "--json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
        }
    }

    #[test]
    fn mode_uses_json_for_plan_show_with_json_flag() {
        let parsed = parse_from(["plantonista", "plan", "show", "--json"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
        }
    }

    #[test]
    fn mode_uses_text_for_commands_without_json_flag() {
        let cases: [Vec<&str>; 4] = [
            vec!["plantonista", "statement"],
            vec!["plantonista", "dash"],
            vec!["plantonista", "shift", "list"],
            vec!["plantonista", "export", "out.csv"],
        ];
        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_command(&cli.command), OutputMode::Text);
            }
        }
    }
}

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use plantonista_client::commands::expense::{
    ExpenseAddOptions, ExpenseChanges, ExpenseDeleteOptions, ExpenseEditOptions,
    ExpenseListOptions, ExpensePayOptions,
};
use plantonista_client::commands::income::{
    IncomeAddOptions, IncomeChanges, IncomeConfirmOptions, IncomeDeleteOptions,
    IncomeEditOptions, IncomeListOptions,
};
use plantonista_client::commands::registry::{
    RegistryAddOptions, RegistryDeleteOptions, RegistryListOptions,
};
use plantonista_client::commands::{self, dash, plan, profile, statement};
use plantonista_client::ledger::profile::ProfileChanges;
use plantonista_client::ledger::registry::RegistryKind;
use plantonista_client::ledger::types::IncomeKind;
use plantonista_client::{ClientResult, SuccessEnvelope};

use crate::cli::{
    Cli, Commands, ConfirmArgs, EntryArgs, ExpenseCommand, IncomeAddCommon, IncomeEditCommon,
    IncomeListArgs, PlanCommand, ProfileCommand, ReceivableCommand, RegistryCommand,
    ShiftCommand,
};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    let today = resolve_today(cli);

    match &cli.command {
        Commands::Shift { command } => match command {
            ShiftCommand::Add(args) => commands::income::add(income_add_options(
                IncomeKind::Shift,
                &args.hospital,
                args.tag.clone(),
                &args.common,
                today,
            )),
            ShiftCommand::List(args) => income_list(IncomeKind::Shift, args, today),
            ShiftCommand::Confirm(args) => income_confirm(IncomeKind::Shift, args, today),
            ShiftCommand::Edit(args) => income_edit(
                IncomeKind::Shift,
                args.hospital.clone(),
                args.tag.clone(),
                &args.common,
                today,
            ),
            ShiftCommand::Delete(args) => income_delete(IncomeKind::Shift, args),
        },
        Commands::Receivable { command } => match command {
            ReceivableCommand::Add(args) => commands::income::add(income_add_options(
                IncomeKind::Receivable,
                &args.description,
                None,
                &args.common,
                today,
            )),
            ReceivableCommand::List(args) => income_list(IncomeKind::Receivable, args, today),
            ReceivableCommand::Confirm(args) => {
                income_confirm(IncomeKind::Receivable, args, today)
            }
            ReceivableCommand::Edit(args) => income_edit(
                IncomeKind::Receivable,
                args.description.clone(),
                None,
                &args.common,
                today,
            ),
            ReceivableCommand::Delete(args) => income_delete(IncomeKind::Receivable, args),
        },
        Commands::Expense { command } => match command {
            ExpenseCommand::Add(args) => commands::expense::add(ExpenseAddOptions {
                category: args.category.clone(),
                description: args.description.clone(),
                amount: args.amount.clone(),
                due: args.due.clone(),
                status: args.status.clone(),
                paid_on: args.paid_on.clone(),
                repeat: args.repeat.clone(),
                until: args.until.clone(),
                today,
                home_override: None,
            }),
            ExpenseCommand::List {
                month,
                category,
                search,
                ..
            } => commands::expense::list(ExpenseListOptions {
                month: month.clone(),
                category: category.clone(),
                search: search.clone(),
                home_override: None,
            }),
            ExpenseCommand::Pay {
                entry_id, paid_on, ..
            } => commands::expense::pay(ExpensePayOptions {
                entry_id: entry_id.clone(),
                paid_on: paid_on.clone(),
                home_override: None,
            }),
            ExpenseCommand::Edit(args) => commands::expense::edit(ExpenseEditOptions {
                entry_id: args.entry_id.clone(),
                changes: ExpenseChanges {
                    category: args.category.clone(),
                    description: args.description.clone(),
                    amount: args.amount.clone(),
                    due: args.due.clone(),
                    status: args.status.clone(),
                    paid_on: args.paid_on.clone(),
                },
                home_override: None,
            }),
            ExpenseCommand::Delete(args) => commands::expense::delete(ExpenseDeleteOptions {
                entry_id: args.entry_id.clone(),
                home_override: None,
            }),
        },
        Commands::Statement { month, as_of, .. } => {
            statement::run(statement::StatementRunOptions {
                month: month.clone(),
                as_of: as_of.clone(),
                today,
                home_override: None,
            })
        }
        Commands::Export {
            path,
            month,
            as_of,
            ..
        } => statement::export(statement::ExportRunOptions {
            path: PathBuf::from(path),
            month: month.clone(),
            as_of: as_of.clone(),
            today,
            home_override: None,
        }),
        Commands::Dash { month, .. } => dash::run(dash::DashRunOptions {
            month: month.clone(),
            today,
            home_override: None,
        }),
        Commands::Plan { command } => match command {
            PlanCommand::Show { .. } => plan::show(plan::PlanShowOptions {
                today,
                home_override: None,
            }),
            PlanCommand::Set {
                status,
                trial_end,
                period_end,
                admin,
                ..
            } => plan::set(plan::PlanSetOptions {
                status: status.clone(),
                trial_end: trial_end.clone(),
                period_end: period_end.clone(),
                is_admin: *admin,
                today,
                home_override: None,
            }),
        },
        Commands::Hospital { command } => registry(RegistryKind::Hospital, command),
        Commands::Category { command } => registry(RegistryKind::Category, command),
        Commands::Profile { command } => match command {
            ProfileCommand::Show { .. } => profile::show(profile::ProfileShowOptions {
                home_override: None,
            }),
            ProfileCommand::Set {
                name,
                specialty,
                crm,
                ..
            } => profile::set(profile::ProfileSetOptions {
                changes: ProfileChanges {
                    full_name: name.clone(),
                    specialty: specialty.clone(),
                    crm: crm.clone(),
                },
                home_override: None,
            }),
        },
    }
}

/// The pinned `--today`, else the local calendar day.
fn resolve_today(cli: &Cli) -> NaiveDate {
    cli.today
        .map(|value| value.0)
        .unwrap_or_else(|| Local::now().date_naive())
}

fn income_add_options(
    kind: IncomeKind,
    counterparty: &str,
    tag: Option<String>,
    common: &IncomeAddCommon,
    today: NaiveDate,
) -> IncomeAddOptions<'static> {
    IncomeAddOptions {
        kind,
        counterparty: counterparty.to_string(),
        amount: common.amount.clone(),
        date: common.date.clone(),
        expected: common.expected.clone(),
        received: common.received.clone(),
        status: common.status.clone(),
        tag,
        repeat: common.repeat.clone(),
        until: common.until.clone(),
        today,
        home_override: None,
    }
}

fn income_list(
    kind: IncomeKind,
    args: &IncomeListArgs,
    today: NaiveDate,
) -> ClientResult<SuccessEnvelope> {
    commands::income::list(IncomeListOptions {
        kind,
        month: args.month.clone(),
        status: args.status.clone(),
        search: args.search.clone(),
        today,
        home_override: None,
    })
}

fn income_confirm(
    kind: IncomeKind,
    args: &ConfirmArgs,
    today: NaiveDate,
) -> ClientResult<SuccessEnvelope> {
    commands::income::confirm(IncomeConfirmOptions {
        kind,
        entry_id: args.entry_id.clone(),
        received_on: args.received_on.clone(),
        today,
        home_override: None,
    })
}

fn income_edit(
    kind: IncomeKind,
    counterparty: Option<String>,
    tag: Option<String>,
    common: &IncomeEditCommon,
    today: NaiveDate,
) -> ClientResult<SuccessEnvelope> {
    commands::income::edit(IncomeEditOptions {
        kind,
        entry_id: common.entry_id.clone(),
        changes: IncomeChanges {
            counterparty,
            amount: common.amount.clone(),
            date: common.date.clone(),
            expected: common.expected.clone(),
            received: common.received.clone(),
            status: common.status.clone(),
            tag,
        },
        today,
        home_override: None,
    })
}

fn income_delete(kind: IncomeKind, args: &EntryArgs) -> ClientResult<SuccessEnvelope> {
    commands::income::delete(IncomeDeleteOptions {
        kind,
        entry_id: args.entry_id.clone(),
        home_override: None,
    })
}

fn registry(kind: RegistryKind, command: &RegistryCommand) -> ClientResult<SuccessEnvelope> {
    match command {
        RegistryCommand::Add { name, .. } => commands::registry::add(RegistryAddOptions {
            kind,
            name: name.clone(),
            home_override: None,
        }),
        RegistryCommand::List { .. } => commands::registry::list(RegistryListOptions {
            kind,
            home_override: None,
        }),
        RegistryCommand::Delete(args) => commands::registry::delete(RegistryDeleteOptions {
            kind,
            item_id: args.entry_id.clone(),
            home_override: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::resolve_today;
    use crate::cli::parse_from;

    #[test]
    fn pinned_today_wins_over_clock() {
        let parsed = parse_from(["plantonista", "plan", "show", "--today", "2026-03-15"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(
                Some(resolve_today(&cli)),
                NaiveDate::from_ymd_opt(2026, 3, 15)
            );
        }
    }

    #[test]
    fn unknown_command_is_not_dispatchable() {
        let parsed = parse_from(["plantonista", "payroll"]);
        assert!(parsed.is_err());
    }
}

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::ClientResult;
use crate::commands::common::LedgerSession;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ExportData, StatementData, StatementLineRow};
use crate::export::{export_statement_csv, format_money};
use crate::ledger::date::{
    YearMonth, format_iso_date, parse_iso_date_strict, parse_year_month_strict,
};
use crate::ledger::statement::{Statement, reconstruct_statement};
use crate::store::expense::load_expenses;
use crate::store::income::load_income;

#[derive(Debug, Clone)]
pub struct StatementRunOptions<'a> {
    pub month: Option<String>,
    pub as_of: Option<String>,
    pub today: NaiveDate,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub struct ExportRunOptions<'a> {
    pub path: PathBuf,
    pub month: Option<String>,
    pub as_of: Option<String>,
    pub today: NaiveDate,
    pub home_override: Option<&'a Path>,
}

/// Rebuilds the monthly statement from every stored entry.
pub fn run(options: StatementRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "statement";
    let (month, as_of) = resolve_period(
        options.month.as_deref(),
        options.as_of.as_deref(),
        options.today,
        command,
    )?;

    let session = LedgerSession::open(options.home_override)?;
    let statement = load_statement(&session, month, as_of)?;
    success(command, statement_data(&statement))
}

/// Writes the statement as CSV. Requires a plan that allows export.
pub fn export(options: ExportRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "export";
    let (month, as_of) = resolve_period(
        options.month.as_deref(),
        options.as_of.as_deref(),
        options.today,
        command,
    )?;

    let session = LedgerSession::open(options.home_override)?;
    session.require_export(options.today)?;
    let statement = load_statement(&session, month, as_of)?;
    let lines_written = export_statement_csv(&statement, &options.path)?;

    let data = ExportData {
        path: options.path.display().to_string(),
        format: "csv".to_string(),
        month: month.to_string(),
        as_of: format_iso_date(&as_of),
        lines_written: lines_written as i64,
        closing_balance: format_money(statement.closing_balance),
    };
    success(command, data)
}

fn resolve_period(
    month: Option<&str>,
    as_of: Option<&str>,
    today: NaiveDate,
    command: &str,
) -> ClientResult<(YearMonth, NaiveDate)> {
    let month = match month {
        Some(raw) => parse_year_month_strict(raw.trim(), command)?,
        None => YearMonth::of(today),
    };
    let as_of = match as_of {
        Some(raw) => parse_iso_date_strict(raw.trim(), "as-of", command)?,
        None => today,
    };
    Ok((month, as_of))
}

fn load_statement(
    session: &LedgerSession,
    month: YearMonth,
    as_of: NaiveDate,
) -> ClientResult<Statement> {
    let income = load_income(&session.connection, session.db_path())?;
    let expenses = load_expenses(&session.connection, session.db_path())?;
    Ok(reconstruct_statement(&income, &expenses, month, as_of))
}

fn statement_data(statement: &Statement) -> StatementData {
    StatementData {
        month: statement.month.to_string(),
        as_of: format_iso_date(&statement.as_of),
        opening_balance: format_money(statement.opening_balance),
        total_credits: format_money(statement.total_credits),
        total_debits: format_money(statement.total_debits),
        closing_balance: format_money(statement.closing_balance),
        lines: statement
            .lines
            .iter()
            .map(|line| StatementLineRow {
                source_id: line.source_id.clone(),
                date: format_iso_date(&line.date),
                label: line.label.clone(),
                category: line.category.clone(),
                direction: line.direction.as_str().to_string(),
                amount: format_money(line.amount),
                signed_amount: format_money(line.signed_amount()),
                running_balance: format_money(line.running_balance_after),
            })
            .collect(),
    }
}

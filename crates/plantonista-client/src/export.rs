use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::ledger::date::format_iso_date;
use crate::ledger::statement::Statement;
use crate::{ClientError, ClientResult};

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    date: String,
    label: &'a str,
    category: &'a str,
    amount: String,
    running_balance: String,
}

pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Writes statement lines followed by the four summary rows. Summary rows
/// carry their name in `label` and their value in `amount`.
pub fn write_statement_csv<W>(statement: &Statement, writer: W) -> csv::Result<usize>
where
    W: Write,
{
    let mut csv_writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    for line in &statement.lines {
        csv_writer.serialize(ExportRow {
            date: format_iso_date(&line.date),
            label: &line.label,
            category: &line.category,
            amount: format_money(line.signed_amount()),
            running_balance: format_money(line.running_balance_after),
        })?;
    }

    let totals = [
        ("opening_balance", statement.opening_balance),
        ("total_credits", statement.total_credits),
        ("total_debits", statement.total_debits),
        ("closing_balance", statement.closing_balance),
    ];
    for (name, value) in totals {
        csv_writer.serialize(ExportRow {
            date: String::new(),
            label: name,
            category: "",
            amount: format_money(value),
            running_balance: String::new(),
        })?;
    }

    csv_writer.flush()?;
    Ok(statement.lines.len())
}

pub fn export_statement_csv(statement: &Statement, path: &Path) -> ClientResult<usize> {
    let file =
        File::create(path).map_err(|error| ClientError::export_failed(path, &error.to_string()))?;
    let written = write_statement_csv(statement, file)
        .map_err(|error| ClientError::export_failed(path, &error.to_string()))?;
    info!(path = %path.display(), lines = written, "exported statement");
    Ok(written)
}

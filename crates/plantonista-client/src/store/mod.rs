//! SQLite persistence for everything the local ledger keeps.
//!
//! Amounts are stored as decimal TEXT and dates as `YYYY-MM-DD` TEXT. Every
//! read is scoped to the local owner.

pub mod expense;
pub mod income;
pub mod profile;
pub mod registry;
pub mod subscription;

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::Transaction;
use ulid::Ulid;

use crate::ledger::date::{format_iso_date, parse_entry_date};
use crate::ledger::types::{Frequency, SeriesInfo};
use crate::ledger::validate::is_storable_amount;
use crate::state::map_sqlite_error;
use crate::{ClientError, ClientResult};

pub(crate) fn new_entry_id(prefix: &str) -> String {
    format!("{prefix}_{}", Ulid::new())
}

pub(crate) fn encode_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

pub(crate) fn encode_date(date: NaiveDate) -> String {
    format_iso_date(&date)
}

pub(crate) fn encode_optional_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(encode_date)
}

/// Stored amounts outside the accepted range are treated as corruption.
pub(crate) fn decode_amount(raw: &str, db_path: &Path) -> ClientResult<Decimal> {
    let amount = Decimal::from_str(raw).map_err(|_| ClientError::ledger_corrupt(db_path))?;
    if !is_storable_amount(amount) {
        return Err(ClientError::ledger_corrupt(db_path));
    }
    Ok(amount)
}

pub(crate) fn decode_date(raw: &str, db_path: &Path) -> ClientResult<NaiveDate> {
    parse_entry_date(raw).ok_or_else(|| ClientError::ledger_corrupt(db_path))
}

pub(crate) fn decode_optional_date(
    raw: Option<&str>,
    db_path: &Path,
) -> ClientResult<Option<NaiveDate>> {
    raw.map(|value| decode_date(value, db_path)).transpose()
}

/// Series columns as stored: recurring flag, frequency label, end date.
pub(crate) struct SeriesColumns {
    pub(crate) is_recurring: bool,
    pub(crate) frequency: Option<String>,
    pub(crate) series_end_date: Option<String>,
}

impl SeriesColumns {
    pub(crate) fn encode(series: &SeriesInfo) -> Self {
        Self {
            is_recurring: series.is_recurring,
            frequency: series.frequency.map(|value| value.as_str().to_string()),
            series_end_date: encode_optional_date(series.series_end_date),
        }
    }

    pub(crate) fn decode(&self, db_path: &Path) -> ClientResult<SeriesInfo> {
        let frequency = match self.frequency.as_deref() {
            Some(raw) => {
                Some(Frequency::parse(raw).ok_or_else(|| ClientError::ledger_corrupt(db_path))?)
            }
            None => None,
        };
        Ok(SeriesInfo {
            is_recurring: self.is_recurring,
            frequency,
            series_end_date: decode_optional_date(self.series_end_date.as_deref(), db_path)?,
        })
    }
}

/// Next insertion position for `table`, used to keep same-day ordering stable.
pub(crate) fn next_source_order(
    transaction: &Transaction<'_>,
    table: StoreTable,
    db_path: &Path,
) -> ClientResult<i64> {
    let sql = format!(
        "SELECT COALESCE(MAX(source_order), 0) + 1 FROM {}",
        table.name()
    );
    transaction
        .query_row(&sql, [], |row| row.get::<_, i64>(0))
        .map_err(|error| map_sqlite_error(db_path, &error))
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum StoreTable {
    Income,
    Expenses,
}

impl StoreTable {
    const fn name(self) -> &'static str {
        match self {
            Self::Income => "internal_income",
            Self::Expenses => "internal_expenses",
        }
    }
}

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use tracing::{debug, info};

use crate::ledger::types::{IncomeEntry, IncomeKind, IncomeStatus, LOCAL_OWNER};
use crate::state::map_sqlite_error;
use crate::store::{
    SeriesColumns, StoreTable, decode_amount, decode_date, decode_optional_date, encode_amount,
    encode_date, encode_optional_date, next_source_order,
};
use crate::{ClientError, ClientResult};

const SELECT_INCOME: &str = "SELECT
        entry_id,
        owner_ref,
        kind,
        counterparty_label,
        amount,
        occurred_on,
        expected_on,
        received_on,
        status,
        tag,
        is_recurring,
        frequency,
        series_end_date
     FROM internal_income";

struct StoredIncome {
    entry_id: String,
    owner_ref: String,
    kind: String,
    counterparty_label: String,
    amount: String,
    occurred_on: String,
    expected_on: String,
    received_on: Option<String>,
    status: String,
    tag: Option<String>,
    series: SeriesColumns,
}

impl StoredIncome {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            entry_id: row.get(0)?,
            owner_ref: row.get(1)?,
            kind: row.get(2)?,
            counterparty_label: row.get(3)?,
            amount: row.get(4)?,
            occurred_on: row.get(5)?,
            expected_on: row.get(6)?,
            received_on: row.get(7)?,
            status: row.get(8)?,
            tag: row.get(9)?,
            series: SeriesColumns {
                is_recurring: row.get::<_, i64>(10)? != 0,
                frequency: row.get(11)?,
                series_end_date: row.get(12)?,
            },
        })
    }

    fn decode(self, db_path: &Path) -> ClientResult<IncomeEntry> {
        let kind =
            IncomeKind::parse(&self.kind).ok_or_else(|| ClientError::ledger_corrupt(db_path))?;
        let status =
            IncomeStatus::parse(&self.status).ok_or_else(|| ClientError::ledger_corrupt(db_path))?;
        Ok(IncomeEntry {
            id: self.entry_id,
            owner_ref: self.owner_ref,
            kind,
            counterparty_label: self.counterparty_label,
            amount: decode_amount(&self.amount, db_path)?,
            occurred_on: decode_date(&self.occurred_on, db_path)?,
            expected_on: decode_date(&self.expected_on, db_path)?,
            received_on: decode_optional_date(self.received_on.as_deref(), db_path)?,
            status,
            tag: self.tag,
            series: self.series.decode(db_path)?,
        })
    }
}

/// Persists every member of one submission in a single transaction.
pub fn insert_income_batch(
    connection: &mut Connection,
    db_path: &Path,
    entries: &[IncomeEntry],
) -> ClientResult<()> {
    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut source_order = next_source_order(&transaction, StoreTable::Income, db_path)?;
    for entry in entries {
        let series = SeriesColumns::encode(&entry.series);
        transaction
            .execute(
                "INSERT INTO internal_income (
                    entry_id,
                    owner_ref,
                    kind,
                    counterparty_label,
                    amount,
                    occurred_on,
                    expected_on,
                    received_on,
                    status,
                    tag,
                    is_recurring,
                    frequency,
                    series_end_date,
                    source_order
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    &entry.id,
                    &entry.owner_ref,
                    entry.kind.as_str(),
                    &entry.counterparty_label,
                    encode_amount(entry.amount),
                    encode_date(entry.occurred_on),
                    encode_date(entry.expected_on),
                    encode_optional_date(entry.received_on),
                    entry.status.as_str(),
                    &entry.tag,
                    series.is_recurring,
                    series.frequency,
                    series.series_end_date,
                    source_order,
                ],
            )
            .map_err(|error| map_sqlite_error(db_path, &error))?;
        source_order += 1;
    }

    transaction
        .commit()
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    info!(count = entries.len(), "inserted income entries");
    Ok(())
}

/// Loads all local income, shifts before receivables, each in insertion order.
pub fn load_income(connection: &Connection, db_path: &Path) -> ClientResult<Vec<IncomeEntry>> {
    let sql = format!(
        "{SELECT_INCOME}
         WHERE owner_ref = ?1
         ORDER BY CASE kind WHEN 'shift' THEN 0 ELSE 1 END ASC, source_order ASC"
    );
    let mut statement = connection
        .prepare(&sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    let rows_iter = statement
        .query_map([LOCAL_OWNER], StoredIncome::from_row)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut entries = Vec::new();
    for row in rows_iter {
        let stored = row.map_err(|error| map_sqlite_error(db_path, &error))?;
        entries.push(stored.decode(db_path)?);
    }
    debug!(count = entries.len(), "loaded income entries");
    Ok(entries)
}

pub fn load_income_entry(
    connection: &Connection,
    db_path: &Path,
    entry_id: &str,
) -> ClientResult<Option<IncomeEntry>> {
    let sql = format!("{SELECT_INCOME} WHERE owner_ref = ?1 AND entry_id = ?2 LIMIT 1");
    let stored = connection
        .query_row(&sql, params![LOCAL_OWNER, entry_id], StoredIncome::from_row)
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    stored.map(|value| value.decode(db_path)).transpose()
}

pub fn update_income(
    connection: &Connection,
    db_path: &Path,
    entry: &IncomeEntry,
) -> ClientResult<bool> {
    let updated = connection
        .execute(
            "UPDATE internal_income SET
                counterparty_label = ?3,
                amount = ?4,
                occurred_on = ?5,
                expected_on = ?6,
                received_on = ?7,
                status = ?8,
                tag = ?9
             WHERE owner_ref = ?1 AND entry_id = ?2",
            params![
                LOCAL_OWNER,
                &entry.id,
                &entry.counterparty_label,
                encode_amount(entry.amount),
                encode_date(entry.occurred_on),
                encode_date(entry.expected_on),
                encode_optional_date(entry.received_on),
                entry.status.as_str(),
                &entry.tag,
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    info!(entry_id = %entry.id, status = entry.status.as_str(), "updated income entry");
    Ok(updated > 0)
}

/// Removes one entry; siblings from the same series are untouched.
pub fn delete_income(
    connection: &Connection,
    db_path: &Path,
    entry_id: &str,
) -> ClientResult<bool> {
    let deleted = connection
        .execute(
            "DELETE FROM internal_income WHERE owner_ref = ?1 AND entry_id = ?2",
            params![LOCAL_OWNER, entry_id],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    info!(entry_id, deleted, "deleted income entry");
    Ok(deleted > 0)
}

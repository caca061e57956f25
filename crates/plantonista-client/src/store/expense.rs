use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use tracing::{debug, info};

use crate::ledger::types::{ExpenseEntry, ExpenseStatus, LOCAL_OWNER};
use crate::state::map_sqlite_error;
use crate::store::{
    SeriesColumns, StoreTable, decode_amount, decode_date, decode_optional_date, encode_amount,
    encode_date, encode_optional_date, next_source_order,
};
use crate::{ClientError, ClientResult};

const SELECT_EXPENSES: &str = "SELECT
        entry_id,
        owner_ref,
        category_label,
        description,
        amount,
        due_on,
        status,
        paid_on,
        is_recurring,
        frequency,
        series_end_date
     FROM internal_expenses";

struct StoredExpense {
    entry_id: String,
    owner_ref: String,
    category_label: String,
    description: String,
    amount: String,
    due_on: String,
    status: String,
    paid_on: Option<String>,
    series: SeriesColumns,
}

impl StoredExpense {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            entry_id: row.get(0)?,
            owner_ref: row.get(1)?,
            category_label: row.get(2)?,
            description: row.get(3)?,
            amount: row.get(4)?,
            due_on: row.get(5)?,
            status: row.get(6)?,
            paid_on: row.get(7)?,
            series: SeriesColumns {
                is_recurring: row.get::<_, i64>(8)? != 0,
                frequency: row.get(9)?,
                series_end_date: row.get(10)?,
            },
        })
    }

    fn decode(self, db_path: &Path) -> ClientResult<ExpenseEntry> {
        let status =
            ExpenseStatus::parse(&self.status).ok_or_else(|| ClientError::ledger_corrupt(db_path))?;
        Ok(ExpenseEntry {
            id: self.entry_id,
            owner_ref: self.owner_ref,
            category_label: self.category_label,
            description: self.description,
            amount: decode_amount(&self.amount, db_path)?,
            due_on: decode_date(&self.due_on, db_path)?,
            status,
            paid_on: decode_optional_date(self.paid_on.as_deref(), db_path)?,
            series: self.series.decode(db_path)?,
        })
    }
}

pub fn insert_expense_batch(
    connection: &mut Connection,
    db_path: &Path,
    entries: &[ExpenseEntry],
) -> ClientResult<()> {
    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut source_order = next_source_order(&transaction, StoreTable::Expenses, db_path)?;
    for entry in entries {
        let series = SeriesColumns::encode(&entry.series);
        transaction
            .execute(
                "INSERT INTO internal_expenses (
                    entry_id,
                    owner_ref,
                    category_label,
                    description,
                    amount,
                    due_on,
                    status,
                    paid_on,
                    is_recurring,
                    frequency,
                    series_end_date,
                    source_order
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    &entry.id,
                    &entry.owner_ref,
                    &entry.category_label,
                    &entry.description,
                    encode_amount(entry.amount),
                    encode_date(entry.due_on),
                    entry.status.as_str(),
                    encode_optional_date(entry.paid_on),
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
    info!(count = entries.len(), "inserted expense entries");
    Ok(())
}

pub fn load_expenses(connection: &Connection, db_path: &Path) -> ClientResult<Vec<ExpenseEntry>> {
    let sql = format!("{SELECT_EXPENSES} WHERE owner_ref = ?1 ORDER BY source_order ASC");
    let mut statement = connection
        .prepare(&sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    let rows_iter = statement
        .query_map([LOCAL_OWNER], StoredExpense::from_row)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut entries = Vec::new();
    for row in rows_iter {
        let stored = row.map_err(|error| map_sqlite_error(db_path, &error))?;
        entries.push(stored.decode(db_path)?);
    }
    debug!(count = entries.len(), "loaded expense entries");
    Ok(entries)
}

pub fn load_expense_entry(
    connection: &Connection,
    db_path: &Path,
    entry_id: &str,
) -> ClientResult<Option<ExpenseEntry>> {
    let sql = format!("{SELECT_EXPENSES} WHERE owner_ref = ?1 AND entry_id = ?2 LIMIT 1");
    let stored = connection
        .query_row(&sql, params![LOCAL_OWNER, entry_id], StoredExpense::from_row)
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    stored.map(|value| value.decode(db_path)).transpose()
}

pub fn update_expense(
    connection: &Connection,
    db_path: &Path,
    entry: &ExpenseEntry,
) -> ClientResult<bool> {
    let updated = connection
        .execute(
            "UPDATE internal_expenses SET
                category_label = ?3,
                description = ?4,
                amount = ?5,
                due_on = ?6,
                status = ?7,
                paid_on = ?8
             WHERE owner_ref = ?1 AND entry_id = ?2",
            params![
                LOCAL_OWNER,
                &entry.id,
                &entry.category_label,
                &entry.description,
                encode_amount(entry.amount),
                encode_date(entry.due_on),
                entry.status.as_str(),
                encode_optional_date(entry.paid_on),
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    info!(entry_id = %entry.id, status = entry.status.as_str(), "updated expense entry");
    Ok(updated > 0)
}

pub fn delete_expense(
    connection: &Connection,
    db_path: &Path,
    entry_id: &str,
) -> ClientResult<bool> {
    let deleted = connection
        .execute(
            "DELETE FROM internal_expenses WHERE owner_ref = ?1 AND entry_id = ?2",
            params![LOCAL_OWNER, entry_id],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    info!(entry_id, deleted, "deleted expense entry");
    Ok(deleted > 0)
}

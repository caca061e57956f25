use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::commands::common::{
    LedgerSession, expense_row, matches_search, optional_trimmed, recurrence_policy,
};
use crate::commands::registry::canonical_label;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    DeleteData, ExpenseAddData, ExpenseEntryData, ExpenseListData, ExpenseListSummary, ExpenseRow,
};
use crate::export::format_money;
use crate::ledger::date::{format_iso_date, parse_iso_date_strict, parse_year_month_strict};
use crate::ledger::recurrence::expand_recurrence;
use crate::ledger::registry::RegistryKind;
use crate::ledger::types::{ExpenseDraft, ExpenseEntry, ExpenseStatus, SeriesInfo};
use crate::ledger::validate::{
    check_expense_settlement, expense_entry_from_draft, parse_amount, parse_expense_status,
    require_label,
};
use crate::store::expense::{
    delete_expense, insert_expense_batch, load_expense_entry, load_expenses, update_expense,
};
use crate::store::new_entry_id;
use crate::{ClientError, ClientResult};

const EXPENSE_ID_PREFIX: &str = "exp";
const LIST_COMMAND: &str = "expense list";

#[derive(Debug, Clone)]
pub struct ExpenseAddOptions<'a> {
    pub category: String,
    pub description: String,
    pub amount: String,
    pub due: String,
    pub status: Option<String>,
    pub paid_on: Option<String>,
    pub repeat: Option<String>,
    pub until: Option<String>,
    pub today: NaiveDate,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseListOptions<'a> {
    pub month: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub struct ExpensePayOptions<'a> {
    pub entry_id: String,
    pub paid_on: String,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseChanges {
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<String>,
    pub due: Option<String>,
    pub status: Option<String>,
    pub paid_on: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ExpenseEditOptions<'a> {
    pub entry_id: String,
    pub changes: ExpenseChanges,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub struct ExpenseDeleteOptions<'a> {
    pub entry_id: String,
    pub home_override: Option<&'a Path>,
}

pub fn add(options: ExpenseAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "expense add";
    let mut draft = build_draft(&options, command)?;
    let policy = recurrence_policy(
        options.repeat.as_deref(),
        options.until.as_deref(),
        &draft.due_on,
        command,
    )?;

    let mut session = LedgerSession::open(options.home_override)?;
    session.require_write(options.today)?;
    draft.category_label =
        canonical_label(&session, RegistryKind::Category, &draft.category_label)?;

    let mut entries: Vec<ExpenseEntry> = Vec::new();
    for member in expand_recurrence(&draft, &policy) {
        let id = new_entry_id(EXPENSE_ID_PREFIX);
        entries.push(expense_entry_from_draft(&member, id, command)?);
    }

    let db_path = session.db_path().to_path_buf();
    insert_expense_batch(&mut session.connection, &db_path, &entries)?;
    info!(
        created = entries.len(),
        recurring = policy.enabled,
        "added expenses"
    );

    let total = entries.iter().map(|entry| entry.amount).sum::<Decimal>();
    let rows = entries.iter().map(expense_row).collect::<Vec<ExpenseRow>>();
    let data = ExpenseAddData {
        created: rows.len() as i64,
        total_amount: format_money(total),
        rows,
    };
    success(command, data)
}

/// Lists expenses in due-date order, optionally narrowed to one month.
pub fn list(options: ExpenseListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let month = options
        .month
        .as_deref()
        .map(|raw| parse_year_month_strict(raw.trim(), LIST_COMMAND))
        .transpose()?;
    let category = optional_trimmed(options.category.as_deref());
    let search = optional_trimmed(options.search.as_deref());

    let session = LedgerSession::open(options.home_override)?;
    let mut rows = load_expenses(&session.connection, session.db_path())?
        .into_iter()
        .filter(|entry| month.is_none_or(|value| value.contains(entry.due_on)))
        .filter(|entry| {
            category
                .as_deref()
                .is_none_or(|value| entry.category_label.eq_ignore_ascii_case(value))
        })
        .filter(|entry| {
            matches_search(
                &[entry.description.as_str(), entry.category_label.as_str()],
                search.as_deref(),
            )
        })
        .collect::<Vec<ExpenseEntry>>();
    rows.sort_by_key(|entry| entry.due_on);

    let data = ExpenseListData {
        month: month.map(|value| value.to_string()),
        category_filter: category,
        search,
        summary: list_summary(&rows),
        rows: rows.iter().map(expense_row).collect(),
    };
    success(LIST_COMMAND, data)
}

pub fn pay(options: ExpensePayOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "expense pay";
    let paid_on = parse_iso_date_strict(&options.paid_on, "paid-on", command)?;

    let session = LedgerSession::open(options.home_override)?;
    let mut entry = load_entry(&session, &options.entry_id)?;
    if entry.status.is_terminal() {
        return Err(ClientError::entry_status_terminal(
            &entry.id,
            entry.status.as_str(),
        ));
    }

    entry.status = ExpenseStatus::Paid;
    entry.paid_on = Some(paid_on);
    update_expense(&session.connection, session.db_path(), &entry)?;

    let data = ExpenseEntryData {
        action: "paid".to_string(),
        entry: expense_row(&entry),
    };
    success(command, data)
}

pub fn edit(options: ExpenseEditOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "expense edit";
    let session = LedgerSession::open(options.home_override)?;
    let current = load_entry(&session, &options.entry_id)?;
    let mut updated = apply_changes(current, &options.changes, command)?;
    if options.changes.category.is_some() {
        updated.category_label =
            canonical_label(&session, RegistryKind::Category, &updated.category_label)?;
    }
    update_expense(&session.connection, session.db_path(), &updated)?;

    let data = ExpenseEntryData {
        action: "updated".to_string(),
        entry: expense_row(&updated),
    };
    success(command, data)
}

pub fn delete(options: ExpenseDeleteOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let session = LedgerSession::open(options.home_override)?;
    let entry = load_entry(&session, &options.entry_id)?;
    let deleted = delete_expense(&session.connection, session.db_path(), &entry.id)?;

    let data = DeleteData {
        entry_id: entry.id,
        deleted,
    };
    success("expense delete", data)
}

fn build_draft(options: &ExpenseAddOptions<'_>, command: &str) -> ClientResult<ExpenseDraft> {
    let category_label = require_label(&options.category, "category", command)?;
    let description = require_label(&options.description, "description", command)?;
    let amount = parse_amount(&options.amount, command)?;
    let due_on = parse_iso_date_strict(&options.due, "due", command)?;
    let paid_on = options
        .paid_on
        .as_deref()
        .map(|raw| parse_iso_date_strict(raw, "paid-on", command))
        .transpose()?;

    let status = match options.status.as_deref() {
        Some(raw) => parse_expense_status(raw, command)?,
        None if paid_on.is_some() => ExpenseStatus::Paid,
        None => ExpenseStatus::Unpaid,
    };
    check_expense_settlement(status, paid_on, command)?;

    Ok(ExpenseDraft {
        category_label,
        description,
        amount,
        due_on: format_iso_date(&due_on),
        status,
        paid_on: paid_on.as_ref().map(format_iso_date),
        series: SeriesInfo::single(),
    })
}

fn apply_changes(
    mut entry: ExpenseEntry,
    changes: &ExpenseChanges,
    command: &str,
) -> ClientResult<ExpenseEntry> {
    if let Some(category) = changes.category.as_deref() {
        entry.category_label = require_label(category, "category", command)?;
    }
    if let Some(description) = changes.description.as_deref() {
        entry.description = require_label(description, "description", command)?;
    }
    if let Some(amount) = changes.amount.as_deref() {
        entry.amount = parse_amount(amount, command)?;
    }
    if let Some(due) = changes.due.as_deref() {
        entry.due_on = parse_iso_date_strict(due, "due", command)?;
    }

    let paid_on = changes
        .paid_on
        .as_deref()
        .map(|raw| parse_iso_date_strict(raw, "paid-on", command))
        .transpose()?;

    if let Some(raw_status) = changes.status.as_deref() {
        let next_status = parse_expense_status(raw_status, command)?;
        if entry.status.is_terminal() && next_status != entry.status {
            return Err(ClientError::entry_status_terminal(
                &entry.id,
                entry.status.as_str(),
            ));
        }
        entry.status = next_status;
    } else if paid_on.is_some() && entry.status != ExpenseStatus::Paid {
        entry.status = ExpenseStatus::Paid;
    }

    if paid_on.is_some() {
        entry.paid_on = paid_on;
    }
    check_expense_settlement(entry.status, entry.paid_on, command)?;

    Ok(entry)
}

fn load_entry(session: &LedgerSession, entry_id: &str) -> ClientResult<ExpenseEntry> {
    let entry_id = entry_id.trim();
    load_expense_entry(&session.connection, session.db_path(), entry_id)?
        .ok_or_else(|| ClientError::entry_not_found(entry_id, LIST_COMMAND))
}

fn list_summary(rows: &[ExpenseEntry]) -> ExpenseListSummary {
    let sum_with = |status: ExpenseStatus| {
        rows.iter()
            .filter(|entry| entry.status == status)
            .map(|entry| entry.amount)
            .sum::<Decimal>()
    };
    let total = rows.iter().map(|entry| entry.amount).sum::<Decimal>();

    ExpenseListSummary {
        count: rows.len() as i64,
        paid_amount: format_money(sum_with(ExpenseStatus::Paid)),
        unpaid_amount: format_money(sum_with(ExpenseStatus::Unpaid)),
        total_amount: format_money(total),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{ExpenseChanges, apply_changes};
    use crate::ledger::types::{ExpenseEntry, ExpenseStatus, LOCAL_OWNER, SeriesInfo};

    fn entry(status: ExpenseStatus) -> ExpenseEntry {
        ExpenseEntry {
            id: "exp_1".to_string(),
            owner_ref: LOCAL_OWNER.to_string(),
            category_label: "Rent".to_string(),
            description: "Office".to_string(),
            amount: Decimal::new(900, 0),
            due_on: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap_or(NaiveDate::MIN),
            status,
            paid_on: if status == ExpenseStatus::Paid {
                NaiveDate::from_ymd_opt(2026, 3, 4)
            } else {
                None
            },
            series: SeriesInfo::single(),
        }
    }

    #[test]
    fn paid_expense_cannot_return_to_unpaid() {
        let changes = ExpenseChanges {
            status: Some("unpaid".to_string()),
            ..ExpenseChanges::default()
        };
        let result = apply_changes(entry(ExpenseStatus::Paid), &changes, "expense edit");
        assert!(result.is_err_and(|error| error.code == "entry_status_terminal"));
    }

    #[test]
    fn unpaid_expense_moves_to_paid_with_date() {
        let changes = ExpenseChanges {
            status: Some("paid".to_string()),
            paid_on: Some("2026-03-06".to_string()),
            description: Some("Office rent".to_string()),
            ..ExpenseChanges::default()
        };
        let result = apply_changes(entry(ExpenseStatus::Unpaid), &changes, "expense edit");
        assert!(result.is_ok_and(|updated| updated.status == ExpenseStatus::Paid
            && updated.description == "Office rent"
            && updated.paid_on == NaiveDate::from_ymd_opt(2026, 3, 6)));
    }

    #[test]
    fn payment_date_alone_marks_expense_paid() {
        let changes = ExpenseChanges {
            paid_on: Some("2026-03-06".to_string()),
            ..ExpenseChanges::default()
        };
        let result = apply_changes(entry(ExpenseStatus::Unpaid), &changes, "expense edit");
        assert!(result.is_ok_and(|updated| updated.status == ExpenseStatus::Paid
            && updated.paid_on == NaiveDate::from_ymd_opt(2026, 3, 6)));
    }

    #[test]
    fn payment_date_with_unpaid_status_is_rejected() {
        let changes = ExpenseChanges {
            status: Some("unpaid".to_string()),
            paid_on: Some("2026-03-06".to_string()),
            ..ExpenseChanges::default()
        };
        let result = apply_changes(entry(ExpenseStatus::Unpaid), &changes, "expense edit");
        assert!(result.is_err_and(|error| error.code == "invalid_argument"));
    }
}

use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::commands::common::{
    LedgerSession, income_row, matches_search, optional_trimmed, recurrence_policy,
};
use crate::commands::registry::canonical_label;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    DeleteData, IncomeAddData, IncomeEntryData, IncomeListData, IncomeListSummary, IncomeRow,
};
use crate::export::format_money;
use crate::ledger::date::{format_iso_date, parse_iso_date_strict, parse_year_month_strict};
use crate::ledger::recurrence::expand_recurrence;
use crate::ledger::registry::RegistryKind;
use crate::ledger::status::{AnnotatedIncome, annotate_income};
use crate::ledger::types::{
    EffectiveStatus, IncomeDraft, IncomeEntry, IncomeKind, IncomeStatus, SeriesInfo,
};
use crate::ledger::validate::{
    check_income_settlement, income_entry_from_draft, parse_amount, parse_income_status,
    require_label,
};
use crate::store::income::{
    delete_income, insert_income_batch, load_income, load_income_entry, update_income,
};
use crate::store::new_entry_id;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct IncomeAddOptions<'a> {
    pub kind: IncomeKind,
    pub counterparty: String,
    pub amount: String,
    pub date: String,
    pub expected: Option<String>,
    pub received: Option<String>,
    pub status: Option<String>,
    pub tag: Option<String>,
    pub repeat: Option<String>,
    pub until: Option<String>,
    pub today: NaiveDate,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub struct IncomeListOptions<'a> {
    pub kind: IncomeKind,
    pub month: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub today: NaiveDate,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub struct IncomeConfirmOptions<'a> {
    pub kind: IncomeKind,
    pub entry_id: String,
    pub received_on: String,
    pub today: NaiveDate,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone, Default)]
pub struct IncomeChanges {
    pub counterparty: Option<String>,
    pub amount: Option<String>,
    pub date: Option<String>,
    pub expected: Option<String>,
    pub received: Option<String>,
    pub status: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IncomeEditOptions<'a> {
    pub kind: IncomeKind,
    pub entry_id: String,
    pub changes: IncomeChanges,
    pub today: NaiveDate,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub struct IncomeDeleteOptions<'a> {
    pub kind: IncomeKind,
    pub entry_id: String,
    pub home_override: Option<&'a Path>,
}

/// Records one income entry, or a whole series when `repeat` is set.
pub fn add(options: IncomeAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = format!("{} add", options.kind.as_str());
    let mut draft = build_draft(&options, &command)?;
    let policy = recurrence_policy(
        options.repeat.as_deref(),
        options.until.as_deref(),
        &draft.occurred_on,
        &command,
    )?;

    let mut session = LedgerSession::open(options.home_override)?;
    session.require_write(options.today)?;
    if options.kind == IncomeKind::Shift {
        draft.counterparty_label =
            canonical_label(&session, RegistryKind::Hospital, &draft.counterparty_label)?;
    }

    let mut entries: Vec<IncomeEntry> = Vec::new();
    for member in expand_recurrence(&draft, &policy) {
        let id = new_entry_id(options.kind.id_prefix());
        entries.push(income_entry_from_draft(&member, id, &command)?);
    }

    let db_path = session.db_path().to_path_buf();
    insert_income_batch(&mut session.connection, &db_path, &entries)?;
    info!(
        kind = options.kind.as_str(),
        created = entries.len(),
        recurring = policy.enabled,
        "added income"
    );

    let total = entries.iter().map(|entry| entry.amount).sum::<Decimal>();
    let rows = annotate_income(&entries, options.today)
        .iter()
        .map(income_row)
        .collect::<Vec<IncomeRow>>();
    let data = IncomeAddData {
        kind: options.kind.as_str().to_string(),
        created: rows.len() as i64,
        total_amount: format_money(total),
        rows,
    };
    success(&command, data)
}

/// Lists one income kind, optionally narrowed to the month of the work date.
pub fn list(options: IncomeListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = format!("{} list", options.kind.as_str());
    let month = options
        .month
        .as_deref()
        .map(|raw| parse_year_month_strict(raw.trim(), &command))
        .transpose()?;
    let status_filter = options
        .status
        .as_deref()
        .map(|raw| {
            EffectiveStatus::parse(raw.trim()).ok_or_else(|| {
                ClientError::invalid_argument_for_command(
                    &format!(
                        "`status` filter must be one of pending, overdue, received or canceled; got `{}`.",
                        raw.trim()
                    ),
                    Some(&command),
                )
            })
        })
        .transpose()?;
    let search = optional_trimmed(options.search.as_deref());

    let session = LedgerSession::open(options.home_override)?;
    let entries = load_income(&session.connection, session.db_path())?
        .into_iter()
        .filter(|entry| entry.kind == options.kind)
        .filter(|entry| month.is_none_or(|value| value.contains(entry.occurred_on)))
        .collect::<Vec<IncomeEntry>>();

    let annotated = annotate_income(&entries, options.today)
        .into_iter()
        .filter(|row| status_filter.is_none_or(|status| row.effective_status == status))
        .filter(|row| {
            matches_search(
                &[
                    row.entry.counterparty_label.as_str(),
                    row.entry.tag.as_deref().unwrap_or(""),
                ],
                search.as_deref(),
            )
        })
        .collect::<Vec<AnnotatedIncome>>();

    let data = IncomeListData {
        kind: options.kind.as_str().to_string(),
        today: format_iso_date(&options.today),
        month: month.map(|value| value.to_string()),
        status_filter: status_filter.map(|status| status.as_str().to_string()),
        search,
        summary: list_summary(&annotated),
        rows: annotated.iter().map(income_row).collect(),
    };
    success(&command, data)
}

/// Marks a pending entry as received on the given date.
pub fn confirm(options: IncomeConfirmOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = format!("{} confirm", options.kind.as_str());
    let received_on = parse_iso_date_strict(&options.received_on, "received-on", &command)?;

    let session = LedgerSession::open(options.home_override)?;
    let mut entry = load_kind_entry(&session, options.kind, &options.entry_id)?;
    if entry.status.is_terminal() {
        return Err(ClientError::entry_status_terminal(
            &entry.id,
            entry.status.as_str(),
        ));
    }

    entry.status = IncomeStatus::Received;
    entry.received_on = Some(received_on);
    update_income(&session.connection, session.db_path(), &entry)?;

    entry_envelope(&command, "confirmed", entry, options.today)
}

pub fn edit(options: IncomeEditOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = format!("{} edit", options.kind.as_str());
    let session = LedgerSession::open(options.home_override)?;
    let current = load_kind_entry(&session, options.kind, &options.entry_id)?;
    let mut updated = apply_changes(current, &options.changes, &command)?;
    if options.kind == IncomeKind::Shift && options.changes.counterparty.is_some() {
        updated.counterparty_label =
            canonical_label(&session, RegistryKind::Hospital, &updated.counterparty_label)?;
    }
    update_income(&session.connection, session.db_path(), &updated)?;

    entry_envelope(&command, "updated", updated, options.today)
}

pub fn delete(options: IncomeDeleteOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = format!("{} delete", options.kind.as_str());
    let session = LedgerSession::open(options.home_override)?;
    let entry = load_kind_entry(&session, options.kind, &options.entry_id)?;
    let deleted = delete_income(&session.connection, session.db_path(), &entry.id)?;

    let data = DeleteData {
        entry_id: entry.id,
        deleted,
    };
    success(&command, data)
}

fn build_draft(options: &IncomeAddOptions<'_>, command: &str) -> ClientResult<IncomeDraft> {
    let kind = options.kind;
    let counterparty_label =
        require_label(&options.counterparty, kind.counterparty_field(), command)?;
    let amount = parse_amount(&options.amount, command)?;
    let occurred_on = parse_iso_date_strict(&options.date, "date", command)?;
    let expected_on = options
        .expected
        .as_deref()
        .map(|raw| parse_iso_date_strict(raw, "expected", command))
        .transpose()?;
    let received_on = options
        .received
        .as_deref()
        .map(|raw| parse_iso_date_strict(raw, "received", command))
        .transpose()?;

    let status = match options.status.as_deref() {
        Some(raw) => parse_income_status(raw, command)?,
        None if received_on.is_some() => IncomeStatus::Received,
        None => IncomeStatus::Pending,
    };
    check_income_settlement(status, received_on, command)?;

    let tag = optional_trimmed(options.tag.as_deref());
    if tag.is_some() && kind != IncomeKind::Shift {
        return Err(ClientError::invalid_argument_for_command(
            "Only shifts can carry a tag.",
            Some(command),
        ));
    }

    Ok(IncomeDraft {
        kind,
        counterparty_label,
        amount,
        occurred_on: format_iso_date(&occurred_on),
        expected_on: expected_on.as_ref().map(format_iso_date),
        received_on: received_on.as_ref().map(format_iso_date),
        status,
        tag,
        series: SeriesInfo::single(),
    })
}

fn apply_changes(
    mut entry: IncomeEntry,
    changes: &IncomeChanges,
    command: &str,
) -> ClientResult<IncomeEntry> {
    if let Some(label) = changes.counterparty.as_deref() {
        entry.counterparty_label = require_label(label, entry.kind.counterparty_field(), command)?;
    }
    if let Some(amount) = changes.amount.as_deref() {
        entry.amount = parse_amount(amount, command)?;
    }
    if let Some(date) = changes.date.as_deref() {
        entry.occurred_on = parse_iso_date_strict(date, "date", command)?;
    }
    if let Some(expected) = changes.expected.as_deref() {
        entry.expected_on = parse_iso_date_strict(expected, "expected", command)?;
    }
    if let Some(tag) = changes.tag.as_deref() {
        if entry.kind != IncomeKind::Shift {
            return Err(ClientError::invalid_argument_for_command(
                "Only shifts can carry a tag.",
                Some(command),
            ));
        }
        entry.tag = optional_trimmed(Some(tag));
    }

    let received_on = changes
        .received
        .as_deref()
        .map(|raw| parse_iso_date_strict(raw, "received", command))
        .transpose()?;

    if let Some(raw_status) = changes.status.as_deref() {
        let next_status = parse_income_status(raw_status, command)?;
        if entry.status.is_terminal() && next_status != entry.status {
            return Err(ClientError::entry_status_terminal(
                &entry.id,
                entry.status.as_str(),
            ));
        }
        entry.status = next_status;
    } else if received_on.is_some() && entry.status != IncomeStatus::Received {
        if entry.status.is_terminal() {
            return Err(ClientError::entry_status_terminal(
                &entry.id,
                entry.status.as_str(),
            ));
        }
        entry.status = IncomeStatus::Received;
    }

    if received_on.is_some() {
        entry.received_on = received_on;
    }
    if entry.status != IncomeStatus::Received && received_on.is_none() {
        entry.received_on = None;
    }
    check_income_settlement(entry.status, entry.received_on, command)?;

    Ok(entry)
}

fn load_kind_entry(
    session: &LedgerSession,
    kind: IncomeKind,
    entry_id: &str,
) -> ClientResult<IncomeEntry> {
    let list_command = format!("{} list", kind.as_str());
    match load_income_entry(&session.connection, session.db_path(), entry_id.trim())? {
        Some(entry) if entry.kind == kind => Ok(entry),
        _ => Err(ClientError::entry_not_found(entry_id.trim(), &list_command)),
    }
}

fn entry_envelope(
    command: &str,
    action: &str,
    entry: IncomeEntry,
    today: NaiveDate,
) -> ClientResult<SuccessEnvelope> {
    let annotated = AnnotatedIncome {
        effective_status: entry.effective_status(today),
        entry,
    };
    let data = IncomeEntryData {
        action: action.to_string(),
        entry: income_row(&annotated),
    };
    success(command, data)
}

fn list_summary(rows: &[AnnotatedIncome]) -> IncomeListSummary {
    let count_with = |status: EffectiveStatus| {
        rows.iter()
            .filter(|row| row.effective_status == status)
            .count() as i64
    };
    let open_amount = rows
        .iter()
        .filter(|row| row.effective_status.is_open())
        .map(|row| row.entry.amount)
        .sum::<Decimal>();
    let received_amount = rows
        .iter()
        .filter(|row| row.effective_status == EffectiveStatus::Received)
        .map(|row| row.entry.amount)
        .sum::<Decimal>();

    IncomeListSummary {
        count: rows.len() as i64,
        pending_count: count_with(EffectiveStatus::Pending),
        overdue_count: count_with(EffectiveStatus::Overdue),
        open_amount: format_money(open_amount),
        received_amount: format_money(received_amount),
    }
}

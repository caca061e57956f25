use std::path::Path;

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::contracts::types::{ExpenseRow, IncomeRow, SeriesRow};
use crate::export::format_money;
use crate::ledger::capability::Capabilities;
use crate::ledger::date::{format_iso_date, parse_entry_date, parse_iso_date_strict};
use crate::ledger::status::AnnotatedIncome;
use crate::ledger::types::{ExpenseEntry, Frequency, RecurrencePolicy, SeriesInfo};
use crate::ledger::validate::check_series_bounds;
use crate::setup::{SetupContext, ensure_initialized_with_home_override};
use crate::state::open_connection;
use crate::store::subscription::load_or_seed_subscription;
use crate::{ClientError, ClientResult};

/// An initialized ledger and an open connection to it.
pub(crate) struct LedgerSession {
    pub(crate) setup: SetupContext,
    pub(crate) connection: Connection,
}

impl LedgerSession {
    pub(crate) fn open(home_override: Option<&Path>) -> ClientResult<Self> {
        let setup = ensure_initialized_with_home_override(home_override)?;
        let connection = open_connection(&setup.db_path)?;
        Ok(Self { setup, connection })
    }

    pub(crate) fn db_path(&self) -> &Path {
        &self.setup.db_path
    }

    pub(crate) fn capabilities(&self, today: NaiveDate) -> ClientResult<(String, Capabilities)> {
        let snapshot = load_or_seed_subscription(&self.connection, self.db_path(), today)?;
        Ok((
            snapshot.status.as_str().to_string(),
            snapshot.capabilities(today),
        ))
    }

    pub(crate) fn require_write(&self, today: NaiveDate) -> ClientResult<()> {
        let (plan_status, capabilities) = self.capabilities(today)?;
        if !capabilities.may_write {
            return Err(ClientError::write_not_allowed(&plan_status));
        }
        Ok(())
    }

    pub(crate) fn require_export(&self, today: NaiveDate) -> ClientResult<()> {
        let (plan_status, capabilities) = self.capabilities(today)?;
        if !capabilities.may_export {
            return Err(ClientError::export_not_allowed(&plan_status));
        }
        Ok(())
    }
}

pub(crate) fn series_row(series: &SeriesInfo) -> SeriesRow {
    SeriesRow {
        is_recurring: series.is_recurring,
        frequency: series.frequency.map(|value| value.as_str().to_string()),
        series_end_date: series.series_end_date.as_ref().map(format_iso_date),
    }
}

pub(crate) fn income_row(row: &AnnotatedIncome) -> IncomeRow {
    let entry = &row.entry;
    IncomeRow {
        id: entry.id.clone(),
        kind: entry.kind.as_str().to_string(),
        counterparty: entry.counterparty_label.clone(),
        amount: format_money(entry.amount),
        occurred_on: format_iso_date(&entry.occurred_on),
        expected_on: format_iso_date(&entry.expected_on),
        received_on: entry.received_on.as_ref().map(format_iso_date),
        status: entry.status.as_str().to_string(),
        effective_status: row.effective_status.as_str().to_string(),
        tag: entry.tag.clone(),
        series: series_row(&entry.series),
    }
}

pub(crate) fn expense_row(entry: &ExpenseEntry) -> ExpenseRow {
    ExpenseRow {
        id: entry.id.clone(),
        category: entry.category_label.clone(),
        description: entry.description.clone(),
        amount: format_money(entry.amount),
        due_on: format_iso_date(&entry.due_on),
        status: entry.status.as_str().to_string(),
        paid_on: entry.paid_on.as_ref().map(format_iso_date),
        series: series_row(&entry.series),
    }
}

/// Builds the recurrence policy for an add command. `until` without
/// `repeat` is rejected, as is a series ending before `start`.
pub(crate) fn recurrence_policy(
    repeat: Option<&str>,
    until: Option<&str>,
    start: &str,
    command: &str,
) -> ClientResult<RecurrencePolicy> {
    let Some(raw_frequency) = repeat.map(str::trim) else {
        if until.is_some() {
            return Err(ClientError::invalid_argument_for_command(
                "`until` only applies together with `repeat`.",
                Some(command),
            ));
        }
        return Ok(RecurrencePolicy::disabled());
    };

    let frequency = Frequency::parse(raw_frequency).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!(
                "`repeat` must be one of weekly, biweekly, monthly or yearly; got `{raw_frequency}`."
            ),
            Some(command),
        )
    })?;
    let end_date = until
        .map(|raw| parse_iso_date_strict(raw, "until", command))
        .transpose()?;
    if let (Some(first), Some(last)) = (parse_entry_date(start), end_date) {
        check_series_bounds(first, last, command)?;
    }

    Ok(RecurrencePolicy::repeating(frequency, end_date))
}

/// Case-insensitive substring match used by list filters.
pub(crate) fn matches_search(haystacks: &[&str], needle: Option<&str>) -> bool {
    let Some(needle) = needle.map(str::trim).filter(|value| !value.is_empty()) else {
        return true;
    };
    let needle = needle.to_lowercase();
    haystacks
        .iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

pub(crate) fn optional_trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{matches_search, optional_trimmed, recurrence_policy};
    use crate::ledger::types::Frequency;

    #[test]
    fn search_is_case_insensitive_and_optional() {
        assert!(matches_search(&["Hospital Norte"], Some("norte")));
        assert!(matches_search(&["Hospital Norte"], None));
        assert!(matches_search(&["Hospital Norte"], Some("  ")));
        assert!(!matches_search(&["Hospital Norte", "UTI"], Some("sul")));
    }

    #[test]
    fn recurrence_policy_validates_flags() {
        let disabled = recurrence_policy(None, None, "2026-03-01", "shift add");
        assert!(disabled.is_ok_and(|policy| !policy.enabled));

        let monthly = recurrence_policy(
            Some("monthly"),
            Some("2026-06-01"),
            "2026-03-01",
            "shift add",
        );
        assert!(monthly.is_ok_and(|policy| policy.enabled && policy.frequency == Frequency::Monthly));

        let orphan_until = recurrence_policy(None, Some("2026-06-01"), "2026-03-01", "shift add");
        assert!(orphan_until.is_err_and(|error| error.code == "invalid_argument"));

        let daily = recurrence_policy(Some("daily"), None, "2026-03-01", "shift add");
        assert!(daily.is_err_and(|error| error.code == "invalid_argument"));

        let backwards = recurrence_policy(
            Some("weekly"),
            Some("2026-02-01"),
            "2026-03-01",
            "shift add",
        );
        assert!(backwards.is_err_and(|error| error.code == "invalid_date"));
    }

    #[test]
    fn blank_options_collapse_to_none() {
        assert_eq!(optional_trimmed(Some("  ")), None);
        assert_eq!(optional_trimmed(Some(" UTI ")), Some("UTI".to_string()));
    }
}

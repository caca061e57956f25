use chrono::NaiveDate;

use crate::ledger::date::parse_entry_date;
use crate::ledger::types::{EffectiveStatus, IncomeEntry, IncomeStatus};

/// Effective status of a stored record as of `today`.
///
/// Pending records whose expected date falls strictly before `today` read as
/// overdue. Comparison is by calendar day; stored state is never touched.
pub fn effective_status(
    status: IncomeStatus,
    expected_on: Option<NaiveDate>,
    today: NaiveDate,
) -> EffectiveStatus {
    match (status, expected_on) {
        (IncomeStatus::Pending, Some(expected)) if expected < today => EffectiveStatus::Overdue,
        _ => EffectiveStatus::from(status),
    }
}

/// Same as [`effective_status`] for a raw expected date; an unparseable
/// date never makes a record overdue.
pub fn effective_status_raw(
    status: IncomeStatus,
    expected_on: &str,
    today: NaiveDate,
) -> EffectiveStatus {
    effective_status(status, parse_entry_date(expected_on), today)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedIncome {
    pub entry: IncomeEntry,
    pub effective_status: EffectiveStatus,
}

impl AnnotatedIncome {
    pub fn is_overdue(&self) -> bool {
        self.effective_status == EffectiveStatus::Overdue
    }
}

impl IncomeEntry {
    pub fn effective_status(&self, today: NaiveDate) -> EffectiveStatus {
        effective_status(self.status, Some(self.expected_on), today)
    }
}

/// Annotates every entry with its effective status and orders the list by
/// work date, oldest first. Ties keep their input order.
pub fn annotate_income(entries: &[IncomeEntry], today: NaiveDate) -> Vec<AnnotatedIncome> {
    let mut annotated = entries
        .iter()
        .map(|entry| AnnotatedIncome {
            effective_status: entry.effective_status(today),
            entry: entry.clone(),
        })
        .collect::<Vec<AnnotatedIncome>>();
    annotated.sort_by(|left, right| left.entry.occurred_on.cmp(&right.entry.occurred_on));
    annotated
}

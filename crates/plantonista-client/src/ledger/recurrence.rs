use chrono::NaiveDate;

use crate::ledger::date::{add_days, add_months_clamped, format_iso_date, parse_entry_date};
use crate::ledger::types::{
    ExpenseDraft, ExpenseStatus, IncomeDraft, IncomeStatus, RecurrencePolicy, SeriesInfo,
};

/// Hard ceiling on members generated from one template.
pub const MAX_SERIES_MEMBERS: usize = 100;

/// Gap applied when a template carries an expected date that does not parse.
pub const FALLBACK_EXPECTED_GAP_DAYS: i64 = 30;

const DEFAULT_SERIES_SPAN_MONTHS: i32 = 12;

/// A form record that can be stamped out into a dated series.
pub trait RecurrenceTemplate: Clone {
    /// Raw anchor date the series starts from.
    fn anchor_date(&self) -> &str;

    /// Raw secondary date whose distance to the anchor is preserved, if any.
    fn lead_date(&self) -> Option<&str>;

    fn set_dates(&mut self, anchor: NaiveDate, lead: Option<NaiveDate>);

    /// Moves a settled or canceled record back to its open status.
    fn reset_settlement(&mut self);

    fn set_series(&mut self, series: SeriesInfo);
}

impl RecurrenceTemplate for IncomeDraft {
    fn anchor_date(&self) -> &str {
        &self.occurred_on
    }

    fn lead_date(&self) -> Option<&str> {
        self.expected_on.as_deref()
    }

    fn set_dates(&mut self, anchor: NaiveDate, lead: Option<NaiveDate>) {
        self.occurred_on = format_iso_date(&anchor);
        if let Some(expected) = lead {
            self.expected_on = Some(format_iso_date(&expected));
        }
    }

    fn reset_settlement(&mut self) {
        if self.status.is_terminal() {
            self.status = IncomeStatus::Pending;
            self.received_on = None;
        }
    }

    fn set_series(&mut self, series: SeriesInfo) {
        self.series = series;
    }
}

impl RecurrenceTemplate for ExpenseDraft {
    fn anchor_date(&self) -> &str {
        &self.due_on
    }

    fn lead_date(&self) -> Option<&str> {
        None
    }

    fn set_dates(&mut self, anchor: NaiveDate, _lead: Option<NaiveDate>) {
        self.due_on = format_iso_date(&anchor);
    }

    fn reset_settlement(&mut self) {
        if self.status.is_terminal() {
            self.status = ExpenseStatus::Unpaid;
            self.paid_on = None;
        }
    }

    fn set_series(&mut self, series: SeriesInfo) {
        self.series = series;
    }
}

/// Resolves the inclusive last date a series may reach.
pub fn series_end_date(start: NaiveDate, policy: &RecurrencePolicy) -> NaiveDate {
    policy
        .end_date
        .unwrap_or_else(|| add_months_clamped(start, DEFAULT_SERIES_SPAN_MONTHS))
}

/// Expands one template into the records to persist for a submission.
///
/// A disabled policy yields the template alone with series fields cleared.
/// An unparseable anchor yields the untouched template. Otherwise members are
/// emitted from the anchor, stepping by the policy frequency, while the
/// candidate is on or before the series end, up to [`MAX_SERIES_MEMBERS`].
/// An end date before the anchor yields no members.
pub fn expand_recurrence<T>(template: &T, policy: &RecurrencePolicy) -> Vec<T>
where
    T: RecurrenceTemplate,
{
    if !policy.enabled {
        let mut single = template.clone();
        single.set_series(SeriesInfo::single());
        return vec![single];
    }

    let Some(start) = parse_entry_date(template.anchor_date()) else {
        return vec![template.clone()];
    };

    let lead_gap = template.lead_date().map(|raw| match parse_entry_date(raw) {
        Some(lead) => (lead - start).num_days(),
        None => FALLBACK_EXPECTED_GAP_DAYS,
    });

    let end = series_end_date(start, policy);
    let series = SeriesInfo {
        is_recurring: true,
        frequency: Some(policy.frequency),
        series_end_date: Some(end),
    };

    let mut members: Vec<T> = Vec::new();
    let mut current = start;
    while current <= end && members.len() < MAX_SERIES_MEMBERS {
        let mut member = template.clone();
        member.set_dates(current, lead_gap.map(|gap| add_days(current, gap)));
        member.reset_settlement();
        member.set_series(series);
        members.push(member);

        let next = policy.frequency.advance(current);
        if next <= current {
            break;
        }
        current = next;
    }

    members
}

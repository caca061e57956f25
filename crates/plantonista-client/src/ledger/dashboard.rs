use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ledger::date::YearMonth;
use crate::ledger::status::AnnotatedIncome;
use crate::ledger::types::{EffectiveStatus, ExpenseEntry, IncomeKind, IncomeStatus};

pub const OVERDUE_ALERT_LIMIT: usize = 5;
pub const CASH_FLOW_MONTHS_BEFORE: i32 = 2;
pub const CASH_FLOW_MONTHS_AFTER: i32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: YearMonth,
    pub to_receive: Decimal,
    pub received: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowPoint {
    pub month: YearMonth,
    pub received: Decimal,
    pub projected: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverdueAlert {
    pub entry_id: String,
    pub kind: IncomeKind,
    pub label: String,
    pub amount: Decimal,
    pub expected_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterpartyTotal {
    pub counterparty: String,
    pub total: Decimal,
    pub count: i64,
}

pub fn month_summary(
    income: &[AnnotatedIncome],
    expenses: &[ExpenseEntry],
    month: YearMonth,
) -> MonthSummary {
    let to_receive = income
        .iter()
        .filter(|row| row.effective_status.is_open() && month.contains(row.entry.occurred_on))
        .map(|row| row.entry.amount)
        .sum::<Decimal>();
    let received = income
        .iter()
        .filter_map(|row| received_in(row, month))
        .sum::<Decimal>();
    let expense_total = expenses
        .iter()
        .filter(|expense| month.contains(expense.due_on))
        .map(|expense| expense.amount)
        .sum::<Decimal>();

    MonthSummary {
        month,
        to_receive,
        received,
        expenses: expense_total,
        balance: received - expense_total,
    }
}

/// Received versus projected income per month around `center`.
///
/// Projection counts every entry by expected date regardless of status.
pub fn cash_flow_series(income: &[AnnotatedIncome], center: YearMonth) -> Vec<CashFlowPoint> {
    (-CASH_FLOW_MONTHS_BEFORE..=CASH_FLOW_MONTHS_AFTER)
        .map(|offset| {
            let month = center.offset(offset);
            let received = income
                .iter()
                .filter_map(|row| received_in(row, month))
                .sum::<Decimal>();
            let projected = income
                .iter()
                .filter(|row| month.contains(row.entry.expected_on))
                .map(|row| row.entry.amount)
                .sum::<Decimal>();
            CashFlowPoint {
                month,
                received,
                projected,
            }
        })
        .collect()
}

pub fn overdue_alerts(income: &[AnnotatedIncome]) -> Vec<OverdueAlert> {
    let mut alerts = income
        .iter()
        .filter(|row| row.is_overdue())
        .map(|row| OverdueAlert {
            entry_id: row.entry.id.clone(),
            kind: row.entry.kind,
            label: row.entry.counterparty_label.clone(),
            amount: row.entry.amount,
            expected_on: row.entry.expected_on,
        })
        .collect::<Vec<OverdueAlert>>();
    alerts.sort_by_key(|alert| alert.expected_on);
    alerts.truncate(OVERDUE_ALERT_LIMIT);
    alerts
}

/// Open shift income grouped by hospital, largest total first.
pub fn pending_by_counterparty(income: &[AnnotatedIncome]) -> Vec<CounterpartyTotal> {
    let mut grouped = group_shifts(income, |status| status.is_open());
    grouped.sort_by(|left, right| {
        right
            .total
            .cmp(&left.total)
            .then_with(|| left.counterparty.cmp(&right.counterparty))
    });
    grouped
}

/// Overdue shift income grouped by hospital, most late payments first.
pub fn overdue_ranking(income: &[AnnotatedIncome]) -> Vec<CounterpartyTotal> {
    let mut grouped = group_shifts(income, |status| status == EffectiveStatus::Overdue);
    grouped.sort_by(compare_by_count);
    grouped
}

fn compare_by_count(left: &CounterpartyTotal, right: &CounterpartyTotal) -> Ordering {
    right
        .count
        .cmp(&left.count)
        .then_with(|| right.total.cmp(&left.total))
        .then_with(|| left.counterparty.cmp(&right.counterparty))
}

fn group_shifts<F>(income: &[AnnotatedIncome], include: F) -> Vec<CounterpartyTotal>
where
    F: Fn(EffectiveStatus) -> bool,
{
    let mut grouped: Vec<CounterpartyTotal> = Vec::new();
    for row in income {
        if row.entry.kind != IncomeKind::Shift || !include(row.effective_status) {
            continue;
        }
        let label = row.entry.counterparty_label.as_str();
        match grouped.iter_mut().find(|group| group.counterparty == label) {
            Some(group) => {
                group.total += row.entry.amount;
                group.count += 1;
            }
            None => grouped.push(CounterpartyTotal {
                counterparty: label.to_string(),
                total: row.entry.amount,
                count: 1,
            }),
        }
    }
    grouped
}

fn received_in(row: &AnnotatedIncome, month: YearMonth) -> Option<Decimal> {
    if row.entry.status != IncomeStatus::Received {
        return None;
    }
    let received_on = row.entry.received_on?;
    month.contains(received_on).then_some(row.entry.amount)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{
        cash_flow_series, month_summary, overdue_alerts, overdue_ranking, pending_by_counterparty,
    };
    use crate::ledger::date::YearMonth;
    use crate::ledger::status::annotate_income;
    use crate::ledger::types::{
        ExpenseEntry, ExpenseStatus, IncomeEntry, IncomeKind, IncomeStatus, LOCAL_OWNER,
        SeriesInfo,
    };

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
    }

    fn income(
        id: &str,
        label: &str,
        amount: i64,
        occurred_on: NaiveDate,
        expected_on: NaiveDate,
        received_on: Option<NaiveDate>,
    ) -> IncomeEntry {
        IncomeEntry {
            id: id.to_string(),
            owner_ref: LOCAL_OWNER.to_string(),
            kind: IncomeKind::Shift,
            counterparty_label: label.to_string(),
            amount: Decimal::new(amount, 0),
            occurred_on,
            expected_on,
            received_on,
            status: if received_on.is_some() {
                IncomeStatus::Received
            } else {
                IncomeStatus::Pending
            },
            tag: None,
            series: SeriesInfo::single(),
        }
    }

    fn fixture() -> Vec<IncomeEntry> {
        vec![
            income("a", "Norte", 100, day(2026, 3, 1), day(2026, 3, 31), None),
            income("b", "Norte", 200, day(2026, 2, 1), day(2026, 2, 20), None),
            income("c", "Sul", 300, day(2026, 1, 1), day(2026, 1, 20), None),
            income("d", "Sul", 400, day(2026, 1, 1), day(2026, 2, 1), Some(day(2026, 3, 2))),
        ]
    }

    #[test]
    fn month_summary_splits_open_received_and_expenses() {
        let today = day(2026, 3, 10);
        let annotated = annotate_income(&fixture(), today);
        let expenses = vec![ExpenseEntry {
            id: "e".to_string(),
            owner_ref: LOCAL_OWNER.to_string(),
            category_label: "Rent".to_string(),
            description: "Office".to_string(),
            amount: Decimal::new(150, 0),
            due_on: day(2026, 3, 5),
            status: ExpenseStatus::Unpaid,
            paid_on: None,
            series: SeriesInfo::single(),
        }];
        let summary = month_summary(&annotated, &expenses, YearMonth::of(today));
        assert_eq!(summary.to_receive, Decimal::new(100, 0));
        assert_eq!(summary.received, Decimal::new(400, 0));
        assert_eq!(summary.expenses, Decimal::new(150, 0));
        assert_eq!(summary.balance, Decimal::new(250, 0));
    }

    #[test]
    fn cash_flow_series_spans_six_months() {
        let today = day(2026, 3, 10);
        let annotated = annotate_income(&fixture(), today);
        let series = cash_flow_series(&annotated, YearMonth::of(today));
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].month.to_string(), "2026-01");
        assert_eq!(series[5].month.to_string(), "2026-06");
        assert_eq!(series[0].projected, Decimal::new(300, 0));
        assert_eq!(series[1].projected, Decimal::new(600, 0));
        assert_eq!(series[2].received, Decimal::new(400, 0));
        assert_eq!(series[2].projected, Decimal::new(100, 0));
    }

    #[test]
    fn overdue_views_group_by_hospital() {
        let today = day(2026, 3, 10);
        let annotated = annotate_income(&fixture(), today);

        let alerts = overdue_alerts(&annotated);
        let ids = alerts
            .iter()
            .map(|alert| alert.entry_id.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(ids, vec!["c", "b"]);

        let pending = pending_by_counterparty(&annotated);
        assert_eq!(pending[0].counterparty, "Sul");
        assert_eq!(pending[0].total, Decimal::new(300, 0));
        assert_eq!(pending[1].counterparty, "Norte");
        assert_eq!(pending[1].count, 2);

        let ranking = overdue_ranking(&annotated);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].counterparty, "Sul");
        assert_eq!(ranking[0].count, 1);
    }
}

use std::path::Path;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::commands::common::LedgerSession;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    CashFlowRow, CounterpartyRow, DashData, MonthSummaryRow, OverdueAlertRow,
};
use crate::export::format_money;
use crate::ledger::dashboard::{
    CounterpartyTotal, cash_flow_series, month_summary, overdue_alerts, overdue_ranking,
    pending_by_counterparty,
};
use crate::ledger::date::{YearMonth, format_iso_date, parse_year_month_strict};
use crate::ledger::status::annotate_income;
use crate::store::expense::load_expenses;
use crate::store::income::load_income;

#[derive(Debug, Clone)]
pub struct DashRunOptions<'a> {
    pub month: Option<String>,
    pub today: NaiveDate,
    pub home_override: Option<&'a Path>,
}

pub fn run(options: DashRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let month = match options.month.as_deref() {
        Some(raw) => parse_year_month_strict(raw.trim(), "dash")?,
        None => YearMonth::of(options.today),
    };

    let session = LedgerSession::open(options.home_override)?;
    let income = load_income(&session.connection, session.db_path())?;
    let expenses = load_expenses(&session.connection, session.db_path())?;
    let annotated = annotate_income(&income, options.today);

    let summary = month_summary(&annotated, &expenses, month);
    let data = DashData {
        today: format_iso_date(&options.today),
        summary: MonthSummaryRow {
            month: summary.month.to_string(),
            to_receive: format_money(summary.to_receive),
            received: format_money(summary.received),
            expenses: format_money(summary.expenses),
            balance: format_money(summary.balance),
        },
        cash_flow: cash_flow_series(&annotated, month)
            .into_iter()
            .map(|point| CashFlowRow {
                month: point.month.to_string(),
                received: format_money(point.received),
                projected: format_money(point.projected),
            })
            .collect(),
        overdue_alerts: overdue_alerts(&annotated)
            .into_iter()
            .map(|alert| OverdueAlertRow {
                entry_id: alert.entry_id,
                kind: alert.kind.as_str().to_string(),
                counterparty: alert.label,
                amount: format_money(alert.amount),
                expected_on: format_iso_date(&alert.expected_on),
            })
            .collect(),
        pending_by_hospital: counterparty_rows(pending_by_counterparty(&annotated)),
        overdue_ranking: counterparty_rows(overdue_ranking(&annotated)),
    };

    success("dash", data)
}

fn counterparty_rows(groups: Vec<CounterpartyTotal>) -> Vec<CounterpartyRow> {
    groups
        .into_iter()
        .map(|group| CounterpartyRow {
            counterparty: group.counterparty,
            total: format_money(group.total),
            count: group.count,
        })
        .collect()
}

//! Monthly ledger reconstruction.
//!
//! Income is recognised on a cash basis: only entries stored as received, by
//! their received date. Expenses are recognised on an accrual basis: by due
//! date, paid or not, as long as the due date is not after the as-of day.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ledger::date::YearMonth;
use crate::ledger::types::{ExpenseEntry, IncomeEntry, IncomeKind, IncomeStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementLine {
    pub source_id: String,
    pub date: NaiveDate,
    pub label: String,
    pub category: String,
    pub amount: Decimal,
    pub direction: Direction,
    pub running_balance_after: Decimal,
}

impl StatementLine {
    /// Credits positive, debits negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub month: YearMonth,
    pub as_of: NaiveDate,
    pub opening_balance: Decimal,
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    pub closing_balance: Decimal,
    pub lines: Vec<StatementLine>,
}

/// Rebuilds the statement for `month` from the full record set.
///
/// `income` is expected in source order (shifts before receivables); that
/// order, followed by expenses, breaks same-day ties.
pub fn reconstruct_statement(
    income: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    month: YearMonth,
    as_of: NaiveDate,
) -> Statement {
    let month_start = month.first_day();

    let mut opening_balance = Decimal::ZERO;
    let mut lines: Vec<StatementLine> = Vec::new();

    for entry in income {
        let Some(received_on) = received_date(entry) else {
            continue;
        };
        if received_on < month_start {
            opening_balance += entry.amount;
        } else if month.contains(received_on) {
            lines.push(StatementLine {
                source_id: entry.id.clone(),
                date: received_on,
                label: entry.counterparty_label.clone(),
                category: income_category(entry),
                amount: entry.amount,
                direction: Direction::Credit,
                running_balance_after: Decimal::ZERO,
            });
        }
    }

    for expense in expenses {
        if expense.due_on > as_of {
            continue;
        }
        if expense.due_on < month_start {
            opening_balance -= expense.amount;
        } else if month.contains(expense.due_on) {
            lines.push(StatementLine {
                source_id: expense.id.clone(),
                date: expense.due_on,
                label: expense.description.clone(),
                category: expense.category_label.clone(),
                amount: expense.amount,
                direction: Direction::Debit,
                running_balance_after: Decimal::ZERO,
            });
        }
    }

    // Stable sort: same-day lines keep source order.
    lines.sort_by_key(|line| line.date);

    let mut running = opening_balance;
    let mut total_credits = Decimal::ZERO;
    let mut total_debits = Decimal::ZERO;
    for line in &mut lines {
        match line.direction {
            Direction::Credit => total_credits += line.amount,
            Direction::Debit => total_debits += line.amount,
        }
        running += line.signed_amount();
        line.running_balance_after = running;
    }

    Statement {
        month,
        as_of,
        opening_balance,
        total_credits,
        total_debits,
        closing_balance: opening_balance + total_credits - total_debits,
        lines,
    }
}

fn received_date(entry: &IncomeEntry) -> Option<NaiveDate> {
    if entry.status != IncomeStatus::Received {
        return None;
    }
    entry.received_on
}

fn income_category(entry: &IncomeEntry) -> String {
    match (entry.kind, entry.tag.as_deref()) {
        (IncomeKind::Shift, Some(tag)) if !tag.trim().is_empty() => {
            format!("{} ({})", IncomeKind::Shift.label(), tag.trim())
        }
        (kind, _) => kind.label().to_string(),
    }
}

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ledger::date::{add_days, add_months_clamped, add_years_clamped};

/// Owner reference stamped on every local record. Identity is resolved
/// upstream; the local ledger serves exactly one user.
pub const LOCAL_OWNER: &str = "local";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncomeKind {
    Shift,
    Receivable,
}

impl IncomeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shift => "shift",
            Self::Receivable => "receivable",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Shift => "Shift",
            Self::Receivable => "Receivable",
        }
    }

    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Shift => "shf",
            Self::Receivable => "rcv",
        }
    }

    /// Name of the counterparty field in user-facing messages.
    pub const fn counterparty_field(self) -> &'static str {
        match self {
            Self::Shift => "hospital",
            Self::Receivable => "description",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "shift" => Some(Self::Shift),
            "receivable" => Some(Self::Receivable),
            _ => None,
        }
    }
}

/// Stored income status. `Overdue` is deliberately absent: it only exists as
/// an [`EffectiveStatus`] computed at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeStatus {
    Pending,
    Received,
    Canceled,
}

impl IncomeStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Received => "received",
            Self::Canceled => "canceled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Received | Self::Canceled)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "received" => Some(Self::Received),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseStatus {
    Unpaid,
    Paid,
}

impl ExpenseStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Paid)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unpaid" => Some(Self::Unpaid),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }
}

/// Display status of an income entry as of a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveStatus {
    Pending,
    Received,
    Overdue,
    Canceled,
}

impl EffectiveStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Received => "received",
            Self::Overdue => "overdue",
            Self::Canceled => "canceled",
        }
    }

    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Overdue)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "received" => Some(Self::Received),
            "overdue" => Some(Self::Overdue),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }
}

impl From<IncomeStatus> for EffectiveStatus {
    fn from(status: IncomeStatus) -> Self {
        match status {
            IncomeStatus::Pending => Self::Pending,
            IncomeStatus::Received => Self::Received,
            IncomeStatus::Canceled => Self::Canceled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "weekly" => Some(Self::Weekly),
            "biweekly" => Some(Self::Biweekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Biweekly is a fifteen-day step ("quinzenal"), not fourteen.
    pub fn advance(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Weekly => add_days(date, 7),
            Self::Biweekly => add_days(date, 15),
            Self::Monthly => add_months_clamped(date, 1),
            Self::Yearly => add_years_clamped(date, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrencePolicy {
    pub enabled: bool,
    pub frequency: Frequency,
    pub end_date: Option<NaiveDate>,
}

impl RecurrencePolicy {
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            frequency: Frequency::Monthly,
            end_date: None,
        }
    }

    pub const fn repeating(frequency: Frequency, end_date: Option<NaiveDate>) -> Self {
        Self {
            enabled: true,
            frequency,
            end_date,
        }
    }
}

/// Recurrence metadata flattened onto each member of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeriesInfo {
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    pub series_end_date: Option<NaiveDate>,
}

impl SeriesInfo {
    pub const fn single() -> Self {
        Self {
            is_recurring: false,
            frequency: None,
            series_end_date: None,
        }
    }
}

/// Income as entered on a form, before validation and identity assignment.
/// Dates are kept raw so recurrence expansion can degrade gracefully.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeDraft {
    pub kind: IncomeKind,
    pub counterparty_label: String,
    pub amount: Decimal,
    pub occurred_on: String,
    pub expected_on: Option<String>,
    pub received_on: Option<String>,
    pub status: IncomeStatus,
    pub tag: Option<String>,
    pub series: SeriesInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub category_label: String,
    pub description: String,
    pub amount: Decimal,
    pub due_on: String,
    pub status: ExpenseStatus,
    pub paid_on: Option<String>,
    pub series: SeriesInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeEntry {
    pub id: String,
    pub owner_ref: String,
    pub kind: IncomeKind,
    pub counterparty_label: String,
    pub amount: Decimal,
    pub occurred_on: NaiveDate,
    pub expected_on: NaiveDate,
    pub received_on: Option<NaiveDate>,
    pub status: IncomeStatus,
    pub tag: Option<String>,
    pub series: SeriesInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseEntry {
    pub id: String,
    pub owner_ref: String,
    pub category_label: String,
    pub description: String,
    pub amount: Decimal,
    pub due_on: NaiveDate,
    pub status: ExpenseStatus,
    pub paid_on: Option<NaiveDate>,
    pub series: SeriesInfo,
}

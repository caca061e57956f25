use chrono::NaiveDate;

use crate::ledger::date::add_days;

/// Trial length granted when no trial end has been recorded yet.
pub const DEFAULT_TRIAL_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Trialing,
    Active,
    PastDue,
    Canceled,
    Incomplete,
}

impl SubscriptionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trialing => "trialing",
            Self::Active => "active",
            Self::PastDue => "past_due",
            Self::Canceled => "canceled",
            Self::Incomplete => "incomplete",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "trialing" => Some(Self::Trialing),
            "active" => Some(Self::Active),
            "past_due" => Some(Self::PastDue),
            "canceled" => Some(Self::Canceled),
            "incomplete" => Some(Self::Incomplete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionSnapshot {
    pub status: SubscriptionStatus,
    pub is_admin: bool,
    pub trial_end: Option<NaiveDate>,
    pub current_period_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub is_pro: bool,
    pub is_trialing: bool,
    pub days_remaining: i64,
    pub may_write: bool,
    pub may_export: bool,
}

impl SubscriptionSnapshot {
    /// Snapshot for a ledger that has never recorded a plan.
    pub fn fresh_trial(today: NaiveDate) -> Self {
        Self {
            status: SubscriptionStatus::Trialing,
            is_admin: false,
            trial_end: Some(add_days(today, DEFAULT_TRIAL_DAYS)),
            current_period_end: None,
        }
    }

    pub fn capabilities(&self, today: NaiveDate) -> Capabilities {
        let is_pro = self.status == SubscriptionStatus::Active;
        let is_trialing = self.status == SubscriptionStatus::Trialing;

        let days_remaining = match self.status {
            SubscriptionStatus::Trialing => {
                let trial_end = self
                    .trial_end
                    .unwrap_or_else(|| add_days(today, DEFAULT_TRIAL_DAYS));
                (trial_end - today).num_days()
            }
            SubscriptionStatus::Active => self
                .current_period_end
                .map(|end| (end - today).num_days())
                .unwrap_or(0),
            _ => 0,
        };

        let may_write = self.is_admin
            || is_pro
            || (is_trialing && days_remaining >= 0)
            || self.status == SubscriptionStatus::PastDue;
        let may_export = self.is_admin || is_pro;

        Capabilities {
            is_pro,
            is_trialing,
            days_remaining,
            may_write,
            may_export,
        }
    }
}

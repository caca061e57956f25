use std::path::Path;

use chrono::NaiveDate;

use crate::commands::common::LedgerSession;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CapabilitiesRow, PlanData};
use crate::ledger::capability::{SubscriptionSnapshot, SubscriptionStatus};
use crate::ledger::date::{format_iso_date, parse_iso_date_strict};
use crate::store::subscription::{load_or_seed_subscription, save_subscription};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct PlanShowOptions<'a> {
    pub today: NaiveDate,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub struct PlanSetOptions<'a> {
    pub status: String,
    pub trial_end: Option<String>,
    pub period_end: Option<String>,
    pub is_admin: Option<bool>,
    pub today: NaiveDate,
    pub home_override: Option<&'a Path>,
}

pub fn show(options: PlanShowOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let session = LedgerSession::open(options.home_override)?;
    let snapshot =
        load_or_seed_subscription(&session.connection, session.db_path(), options.today)?;
    success("plan show", plan_data(&snapshot, options.today))
}

/// Records the plan state normally pushed by the billing provider.
pub fn set(options: PlanSetOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "plan set";
    let status = SubscriptionStatus::parse(options.status.trim()).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!(
                "`status` must be one of trialing, active, past_due, canceled or incomplete; got `{}`.",
                options.status.trim()
            ),
            Some(command),
        )
    })?;
    let trial_end = options
        .trial_end
        .as_deref()
        .map(|raw| parse_iso_date_strict(raw.trim(), "trial-end", command))
        .transpose()?;
    let period_end = options
        .period_end
        .as_deref()
        .map(|raw| parse_iso_date_strict(raw.trim(), "period-end", command))
        .transpose()?;

    let session = LedgerSession::open(options.home_override)?;
    let current =
        load_or_seed_subscription(&session.connection, session.db_path(), options.today)?;
    let snapshot = SubscriptionSnapshot {
        status,
        is_admin: options.is_admin.unwrap_or(current.is_admin),
        trial_end: trial_end.or(current.trial_end),
        current_period_end: period_end.or(current.current_period_end),
    };
    save_subscription(&session.connection, session.db_path(), &snapshot)?;

    success(command, plan_data(&snapshot, options.today))
}

fn plan_data(snapshot: &SubscriptionSnapshot, today: NaiveDate) -> PlanData {
    let capabilities = snapshot.capabilities(today);
    PlanData {
        today: format_iso_date(&today),
        status: snapshot.status.as_str().to_string(),
        is_admin: snapshot.is_admin,
        trial_end: snapshot.trial_end.as_ref().map(format_iso_date),
        current_period_end: snapshot.current_period_end.as_ref().map(format_iso_date),
        capabilities: CapabilitiesRow {
            is_pro: capabilities.is_pro,
            is_trialing: capabilities.is_trialing,
            days_remaining: capabilities.days_remaining,
            may_write: capabilities.may_write,
            may_export: capabilities.may_export,
        },
    }
}

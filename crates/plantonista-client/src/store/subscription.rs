use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;

use crate::ledger::capability::{SubscriptionSnapshot, SubscriptionStatus};
use crate::ledger::types::LOCAL_OWNER;
use crate::state::map_sqlite_error;
use crate::store::{decode_optional_date, encode_optional_date};
use crate::{ClientError, ClientResult};

/// Reads the local plan, seeding a fresh trial on first use.
pub fn load_or_seed_subscription(
    connection: &Connection,
    db_path: &Path,
    today: NaiveDate,
) -> ClientResult<SubscriptionSnapshot> {
    if let Some(snapshot) = load_subscription(connection, db_path)? {
        return Ok(snapshot);
    }

    let snapshot = SubscriptionSnapshot::fresh_trial(today);
    save_subscription(connection, db_path, &snapshot)?;
    info!("seeded trial plan");
    Ok(snapshot)
}

pub fn load_subscription(
    connection: &Connection,
    db_path: &Path,
) -> ClientResult<Option<SubscriptionSnapshot>> {
    let row = connection
        .query_row(
            "SELECT status, is_admin, trial_end, current_period_end
             FROM internal_subscription
             WHERE owner_ref = ?1
             LIMIT 1",
            [LOCAL_OWNER],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            },
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let Some((status, is_admin, trial_end, current_period_end)) = row else {
        return Ok(None);
    };
    let status =
        SubscriptionStatus::parse(&status).ok_or_else(|| ClientError::ledger_corrupt(db_path))?;

    Ok(Some(SubscriptionSnapshot {
        status,
        is_admin: is_admin != 0,
        trial_end: decode_optional_date(trial_end.as_deref(), db_path)?,
        current_period_end: decode_optional_date(current_period_end.as_deref(), db_path)?,
    }))
}

pub fn save_subscription(
    connection: &Connection,
    db_path: &Path,
    snapshot: &SubscriptionSnapshot,
) -> ClientResult<()> {
    connection
        .execute(
            "INSERT INTO internal_subscription (
                owner_ref,
                status,
                is_admin,
                trial_end,
                current_period_end
             ) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(owner_ref) DO UPDATE SET
                status = excluded.status,
                is_admin = excluded.is_admin,
                trial_end = excluded.trial_end,
                current_period_end = excluded.current_period_end,
                updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')",
            params![
                LOCAL_OWNER,
                snapshot.status.as_str(),
                snapshot.is_admin,
                encode_optional_date(snapshot.trial_end),
                encode_optional_date(snapshot.current_period_end),
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    info!(status = snapshot.status.as_str(), "saved plan");
    Ok(())
}

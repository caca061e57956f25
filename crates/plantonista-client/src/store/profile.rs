use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;

use crate::ClientResult;
use crate::ledger::profile::Profile;
use crate::ledger::types::LOCAL_OWNER;
use crate::state::map_sqlite_error;

pub fn load_profile(connection: &Connection, db_path: &Path) -> ClientResult<Option<Profile>> {
    connection
        .query_row(
            "SELECT full_name, specialty, crm
             FROM internal_profile
             WHERE owner_ref = ?1
             LIMIT 1",
            [LOCAL_OWNER],
            |row| {
                Ok(Profile {
                    full_name: row.get(0)?,
                    specialty: row.get(1)?,
                    crm: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))
}

pub fn save_profile(connection: &Connection, db_path: &Path, profile: &Profile) -> ClientResult<()> {
    connection
        .execute(
            "INSERT INTO internal_profile (owner_ref, full_name, specialty, crm)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(owner_ref) DO UPDATE SET
                full_name = excluded.full_name,
                specialty = excluded.specialty,
                crm = excluded.crm,
                updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')",
            params![LOCAL_OWNER, &profile.full_name, &profile.specialty, &profile.crm],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    info!(complete = profile.is_complete(), "saved profile");
    Ok(())
}

use std::path::Path;

use rusqlite::{Connection, params};
use tracing::{debug, info};

use crate::ledger::registry::{RegistryItem, RegistryKind};
use crate::ledger::types::LOCAL_OWNER;
use crate::state::map_sqlite_error;
use crate::{ClientError, ClientResult};

pub fn insert_registry_item(
    connection: &Connection,
    db_path: &Path,
    item: &RegistryItem,
) -> ClientResult<()> {
    connection
        .execute(
            "INSERT INTO internal_registry (item_id, owner_ref, kind, name)
             VALUES (?1, ?2, ?3, ?4)",
            params![&item.id, LOCAL_OWNER, item.kind.as_str(), &item.name],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    info!(item_id = %item.id, kind = item.kind.as_str(), "registered name");
    Ok(())
}

/// Loads one list ordered by name.
pub fn load_registry(
    connection: &Connection,
    db_path: &Path,
    kind: RegistryKind,
) -> ClientResult<Vec<RegistryItem>> {
    let mut statement = connection
        .prepare(
            "SELECT item_id, kind, name
             FROM internal_registry
             WHERE owner_ref = ?1 AND kind = ?2
             ORDER BY name COLLATE NOCASE ASC, item_id ASC",
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    let rows_iter = statement
        .query_map(params![LOCAL_OWNER, kind.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut items = Vec::new();
    for row in rows_iter {
        let (id, stored_kind, name) = row.map_err(|error| map_sqlite_error(db_path, &error))?;
        let stored_kind =
            RegistryKind::parse(&stored_kind).ok_or_else(|| ClientError::ledger_corrupt(db_path))?;
        items.push(RegistryItem {
            id,
            kind: stored_kind,
            name,
        });
    }
    debug!(kind = kind.as_str(), count = items.len(), "loaded registry");
    Ok(items)
}

pub fn delete_registry_item(
    connection: &Connection,
    db_path: &Path,
    kind: RegistryKind,
    item_id: &str,
) -> ClientResult<bool> {
    let deleted = connection
        .execute(
            "DELETE FROM internal_registry WHERE owner_ref = ?1 AND kind = ?2 AND item_id = ?3",
            params![LOCAL_OWNER, kind.as_str(), item_id],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    info!(item_id, deleted, "deleted registry item");
    Ok(deleted > 0)
}

use std::path::Path;

use crate::commands::common::LedgerSession;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{DeleteData, RegistryItemData, RegistryListData, RegistryRow};
use crate::ledger::registry::{RegistryItem, RegistryKind, registered_spelling, same_name};
use crate::ledger::types::IncomeKind;
use crate::ledger::validate::require_label;
use crate::store::expense::load_expenses;
use crate::store::income::load_income;
use crate::store::new_entry_id;
use crate::store::registry::{delete_registry_item, insert_registry_item, load_registry};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct RegistryAddOptions<'a> {
    pub kind: RegistryKind,
    pub name: String,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub struct RegistryListOptions<'a> {
    pub kind: RegistryKind,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub struct RegistryDeleteOptions<'a> {
    pub kind: RegistryKind,
    pub item_id: String,
    pub home_override: Option<&'a Path>,
}

/// Registers a hospital or category name. Names are unique per list,
/// ignoring case.
pub fn add(options: RegistryAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = format!("{} add", options.kind.as_str());
    let name = require_label(&options.name, "name", &command)?;

    let session = LedgerSession::open(options.home_override)?;
    let existing = load_registry(&session.connection, session.db_path(), options.kind)?;
    if let Some(registered) = registered_spelling(&existing, &name) {
        return Err(ClientError::registry_name_taken(
            options.kind.as_str(),
            registered,
        ));
    }

    let item = RegistryItem {
        id: new_entry_id(options.kind.id_prefix()),
        kind: options.kind,
        name,
    };
    insert_registry_item(&session.connection, session.db_path(), &item)?;

    let data = RegistryItemData {
        action: "added".to_string(),
        item: registry_row(&item, 0),
    };
    success(&command, data)
}

/// Lists one registry with how many entries use each name.
pub fn list(options: RegistryListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = format!("{} list", options.kind.as_str());
    let session = LedgerSession::open(options.home_override)?;
    let items = load_registry(&session.connection, session.db_path(), options.kind)?;

    let labels = match options.kind {
        RegistryKind::Hospital => load_income(&session.connection, session.db_path())?
            .into_iter()
            .filter(|entry| entry.kind == IncomeKind::Shift)
            .map(|entry| entry.counterparty_label)
            .collect::<Vec<String>>(),
        RegistryKind::Category => load_expenses(&session.connection, session.db_path())?
            .into_iter()
            .map(|entry| entry.category_label)
            .collect::<Vec<String>>(),
    };

    let rows = items
        .iter()
        .map(|item| {
            let count = labels
                .iter()
                .filter(|label| same_name(label, &item.name))
                .count();
            registry_row(item, count as i64)
        })
        .collect::<Vec<RegistryRow>>();

    let data = RegistryListData {
        kind: options.kind.as_str().to_string(),
        rows,
    };
    success(&command, data)
}

/// Removes a name from the list. Entries already using it keep their label.
pub fn delete(options: RegistryDeleteOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let kind = options.kind.as_str();
    let item_id = options.item_id.trim();
    let session = LedgerSession::open(options.home_override)?;
    let deleted =
        delete_registry_item(&session.connection, session.db_path(), options.kind, item_id)?;
    if !deleted {
        return Err(ClientError::entry_not_found(item_id, &format!("{kind} list")));
    }

    let data = DeleteData {
        entry_id: item_id.to_string(),
        deleted,
    };
    success(&format!("{kind} delete"), data)
}

/// Replaces `label` with its registered spelling when the list carries it.
pub(crate) fn canonical_label(
    session: &LedgerSession,
    kind: RegistryKind,
    label: &str,
) -> ClientResult<String> {
    let items = load_registry(&session.connection, session.db_path(), kind)?;
    Ok(registered_spelling(&items, label)
        .unwrap_or(label)
        .to_string())
}

fn registry_row(item: &RegistryItem, entry_count: i64) -> RegistryRow {
    RegistryRow {
        id: item.id.clone(),
        kind: item.kind.as_str().to_string(),
        name: item.name.clone(),
        entry_count,
    }
}

use std::collections::HashMap;

use rusqlite::Connection;
use rusqlite_migration::{M, Migrations};

const BOOTSTRAP_SQL: &str = include_str!("migrations/0001_bootstrap.sql");
const ADD_SUBSCRIPTION_SQL: &str = include_str!("migrations/0002_subscription.sql");
const ADD_REGISTRY_PROFILE_SQL: &str = include_str!("migrations/0003_registry_profile.sql");

pub const EXPECTED_USER_VERSION: i64 = 3;

pub const REQUIRED_VIEW_NAMES: [&str; 2] = ["v1_income", "v1_expenses"];

pub const REQUIRED_INDEX_NAMES: [&str; 2] = [
    "idx_internal_income_owner_occurred_on",
    "idx_internal_expenses_owner_due_on",
];

pub const REQUIRED_META_KEYS: [(&str, &str); 2] =
    [("schema_version", "v1"), ("public_views_version", "v1")];

pub fn run_pending(conn: &mut Connection) -> rusqlite_migration::Result<()> {
    let migrations = Migrations::new(vec![
        M::up(BOOTSTRAP_SQL),
        M::up(ADD_SUBSCRIPTION_SQL),
        M::up(ADD_REGISTRY_PROFILE_SQL),
    ]);
    migrations.to_latest(conn)
}

pub fn safe_repair_statement(statement_name: &str) -> Option<String> {
    parse_safe_repair_statements().remove(statement_name)
}

fn parse_safe_repair_statements() -> HashMap<String, String> {
    let mut blocks: HashMap<String, String> = HashMap::new();
    let mut active_name: Option<String> = None;
    let mut active_sql = String::new();

    for line in BOOTSTRAP_SQL.lines() {
        let trimmed = line.trim();

        if let Some(name) = trimmed.strip_prefix("-- plantonista:safe_repair:start:") {
            active_name = Some(name.to_string());
            active_sql.clear();
            continue;
        }

        if let Some(name) = trimmed.strip_prefix("-- plantonista:safe_repair:end:") {
            if let Some(active) = &active_name
                && active == name
            {
                blocks.insert(name.to_string(), active_sql.trim().to_string());
            }
            active_name = None;
            active_sql.clear();
            continue;
        }

        if active_name.is_some() {
            active_sql.push_str(line);
            active_sql.push('\n');
        }
    }

    blocks
}

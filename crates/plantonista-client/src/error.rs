use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        Self::with_help_hint("invalid_argument", message, command)
    }

    pub fn invalid_amount(message: &str, command: &str) -> Self {
        Self::with_help_hint("invalid_amount", message, Some(command))
    }

    pub fn invalid_date_for_command(message: &str, command: &str) -> Self {
        Self::with_help_hint("invalid_date", message, Some(command))
    }

    fn with_help_hint(code: &str, message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `plantonista {cmd} --help` for usage."),
            None => "Run `plantonista --help` for usage.".to_string(),
        };
        let error = Self::new(code, message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn entry_not_found(entry_id: &str, list_command: &str) -> Self {
        Self::new(
            "entry_not_found",
            &format!("Entry id `{entry_id}` was not found."),
            vec![
                format!("Run `plantonista {list_command}` to find a valid id."),
                "Retry with the id shown in the list output.".to_string(),
            ],
        )
        .with_data(json!({
            "entry_id": entry_id,
        }))
    }

    pub fn entry_status_terminal(entry_id: &str, status: &str) -> Self {
        Self::new(
            "entry_status_terminal",
            &format!("Entry `{entry_id}` is already {status} and cannot change status."),
            vec![
                "Settled and canceled entries keep their status.".to_string(),
                "Delete the entry and add a new one if the record is wrong.".to_string(),
            ],
        )
        .with_data(json!({
            "entry_id": entry_id,
            "status": status,
        }))
    }

    pub fn registry_name_taken(kind: &str, name: &str) -> Self {
        Self::new(
            "registry_name_taken",
            &format!("A {kind} named `{name}` is already registered."),
            vec![format!(
                "Run `plantonista {kind} list` to see the registered names."
            )],
        )
        .with_data(json!({
            "kind": kind,
            "name": name,
        }))
    }

    pub fn write_not_allowed(plan_status: &str) -> Self {
        Self::new(
            "write_not_allowed",
            &format!("Your plan (`{plan_status}`) does not allow adding new entries."),
            vec![
                "Run `plantonista plan show` to review your plan.".to_string(),
                "Existing entries can still be confirmed, edited and deleted.".to_string(),
            ],
        )
        .with_data(json!({
            "plan_status": plan_status,
        }))
    }

    pub fn export_not_allowed(plan_status: &str) -> Self {
        Self::new(
            "export_not_allowed",
            &format!("Statement export requires an active plan; current plan is `{plan_status}`."),
            vec![
                "Run `plantonista plan show` to review your plan.".to_string(),
                "Use `plantonista statement` to view the statement without exporting.".to_string(),
            ],
        )
        .with_data(json!({
            "plan_status": plan_status,
        }))
    }

    pub fn export_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "export_failed",
            &format!("Could not write the statement to `{location}`: {detail}"),
            vec![format!(
                "Check that the parent directory of `{location}` exists and is writable."
            )],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn ledger_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_permission_denied",
            &format!("Cannot initialize ledger at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `PLANTONISTA_HOME` to a writable directory."
            )],
        )
    }

    pub fn ledger_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_locked",
            &format!("Ledger database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn ledger_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_corrupt",
            &format!("Ledger database appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid SQLite ledger file or restore from backup."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Ledger migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn ledger_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_failed",
            &format!("Ledger initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("ledger_")
            || self.code == "migration_failed"
            || self.code == "internal_serialization_error"
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::ClientError;

    #[test]
    fn command_scoped_errors_carry_help_hint() {
        let error = ClientError::invalid_amount("`amount` must be greater than zero.", "shift add");
        assert_eq!(error.code, "invalid_amount");
        assert_eq!(
            error.recovery_steps,
            vec!["Run `plantonista shift add --help` for usage.".to_string()]
        );
        let hint = error
            .data
            .as_ref()
            .and_then(|data| data.get("command_hint"))
            .and_then(|value| value.as_str());
        assert_eq!(hint, Some("shift add"));
    }

    #[test]
    fn ledger_errors_are_internal() {
        assert!(ClientError::ledger_locked(Path::new("/tmp/ledger.db")).is_internal());
        assert!(!ClientError::invalid_argument("bad").is_internal());
        assert!(!ClientError::write_not_allowed("canceled").is_internal());
    }
}

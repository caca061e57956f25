use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use plantonista_client::commands::expense::{self, ExpenseAddOptions};
use plantonista_client::commands::income::{self, IncomeAddOptions};
use plantonista_client::commands::plan::{self, PlanSetOptions};
use plantonista_client::ledger::types::IncomeKind;
use plantonista_client::{ClientResult, SuccessEnvelope};
use serde_json::Value;
use tempfile::{Builder, TempDir};

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("ledger-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn day(value: &str) -> NaiveDate {
    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d");
    assert!(parsed.is_ok(), "bad fixture date {value}");
    parsed.unwrap_or(NaiveDate::MIN)
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok(), "command failed: {:?}", result.as_ref().err());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(json) = value {
            return json;
        }
    }
    Value::Null
}

pub fn rows(value: &Value) -> Vec<Value> {
    value["data"]["rows"].as_array().cloned().unwrap_or_default()
}

pub fn shift_options<'a>(
    home: &'a Path,
    hospital: &str,
    amount: &str,
    date: &str,
    today: &str,
) -> IncomeAddOptions<'a> {
    IncomeAddOptions {
        kind: IncomeKind::Shift,
        counterparty: hospital.to_string(),
        amount: amount.to_string(),
        date: date.to_string(),
        expected: None,
        received: None,
        status: None,
        tag: None,
        repeat: None,
        until: None,
        today: day(today),
        home_override: Some(home),
    }
}

pub fn expense_options<'a>(
    home: &'a Path,
    category: &str,
    description: &str,
    amount: &str,
    due: &str,
    today: &str,
) -> ExpenseAddOptions<'a> {
    ExpenseAddOptions {
        category: category.to_string(),
        description: description.to_string(),
        amount: amount.to_string(),
        due: due.to_string(),
        status: None,
        paid_on: None,
        repeat: None,
        until: None,
        today: day(today),
        home_override: Some(home),
    }
}

pub fn add_income(options: IncomeAddOptions<'_>) -> Vec<Value> {
    rows(&payload(income::add(options)))
}

pub fn add_expense(options: ExpenseAddOptions<'_>) -> Vec<Value> {
    rows(&payload(expense::add(options)))
}

pub fn set_plan(home: &Path, status: &str, today: &str) {
    let result = plan::set(PlanSetOptions {
        status: status.to_string(),
        trial_end: None,
        period_end: None,
        is_admin: None,
        today: day(today),
        home_override: Some(home),
    });
    assert!(result.is_ok());
}

pub fn first_id(rows: &[Value]) -> String {
    rows.first()
        .and_then(|row| row.get("id"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub fn str_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}

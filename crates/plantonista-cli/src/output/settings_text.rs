use std::io;

use serde_json::Value;

use super::format::{self, field, left, right, rows_at};

pub fn render_registry_add(data: &Value) -> io::Result<String> {
    let item = data
        .get("item")
        .ok_or_else(|| io::Error::other("registry output requires an item"))?;
    Ok(format!(
        "Added {} \"{}\" ({}).",
        field(item, "kind"),
        field(item, "name"),
        field(item, "id")
    ))
}

pub fn render_registry_list(data: &Value) -> io::Result<String> {
    let kind = field(data, "kind");
    let rows = rows_at(data, "rows");
    let plural = if kind == "category" {
        "categories"
    } else {
        "hospitals"
    };
    if rows.is_empty() {
        return Ok([
            format!("No {plural} registered."),
            String::new(),
            format!("Add one with `plantonista {kind} add <name>`."),
        ]
        .join("\n"));
    }

    let used_by = if kind == "category" { "Expenses" } else { "Shifts" };
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                field(row, "id"),
                field(row, "name"),
                row.get("entry_count")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("Registered {plural}"), String::new()];
    lines.extend(format::render_table(
        &[left("Id"), left("Name"), right(used_by)],
        &table_rows,
        format::terminal_width(),
        "Item",
    ));
    Ok(lines.join("\n"))
}

pub fn render_profile(data: &Value) -> io::Result<String> {
    let value_or_unset = |key: &str| match data.get(key).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => "(not set)".to_string(),
    };

    let mut lines = vec!["Profile".to_string(), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Name:", value_or_unset("full_name")),
            ("Specialty:", value_or_unset("specialty")),
            ("CRM:", value_or_unset("crm")),
        ],
        2,
    ));
    if data.get("is_complete").and_then(Value::as_bool) != Some(true) {
        lines.push(String::new());
        lines.push("Complete it with `plantonista profile set --help`.".to_string());
    }
    Ok(lines.join("\n"))
}

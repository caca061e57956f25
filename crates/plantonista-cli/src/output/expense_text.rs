use std::io;

use serde_json::Value;

use super::format::{self, field, left, right};

pub fn render_expense_add(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("expense add output requires rows"))?;

    let created = data.get("created").and_then(Value::as_i64).unwrap_or(0);
    let noun = if created == 1 { "expense" } else { "expenses" };
    let mut lines = vec![
        format!(
            "Recorded {created} {noun} totalling {}.",
            field(data, "total_amount")
        ),
        String::new(),
    ];
    lines.extend(expense_table(rows));
    Ok(lines.join("\n"))
}

pub fn render_expense_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("expense list output requires rows"))?;

    if rows.is_empty() {
        return Ok([
            "No expenses match.",
            "",
            "Record one with `plantonista expense add --help`.",
        ]
        .join("\n"));
    }

    let mut heading = match data.get("month").and_then(Value::as_str) {
        Some(month) => format!("Expenses due in {month}"),
        None => "All expenses".to_string(),
    };
    if let Some(category) = data.get("category_filter").and_then(Value::as_str) {
        heading.push_str(&format!(", category {category}"));
    }
    if let Some(search) = data.get("search").and_then(Value::as_str) {
        heading.push_str(&format!(", matching \"{search}\""));
    }

    let mut lines = vec![heading, String::new()];
    lines.extend(expense_table(rows));

    let summary = data.get("summary").cloned().unwrap_or(Value::Null);
    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.extend(format::key_value_rows(
        &[
            ("Paid:", field(&summary, "paid_amount")),
            ("Unpaid:", field(&summary, "unpaid_amount")),
            ("Total:", field(&summary, "total_amount")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_expense_entry(data: &Value) -> io::Result<String> {
    let entry = data
        .get("entry")
        .ok_or_else(|| io::Error::other("expense entry output requires entry"))?;

    let mut lines = vec![
        format!("Expense {} {}.", field(entry, "id"), field(data, "action")),
        String::new(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Category", field(entry, "category")),
            ("Description", field(entry, "description")),
            ("Amount", field(entry, "amount")),
            ("Due", field(entry, "due_on")),
            ("Status", field(entry, "status")),
            ("Paid on", field(entry, "paid_on")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

fn expense_table(rows: &[Value]) -> Vec<String> {
    let columns = [
        left("Id"),
        left("Due"),
        left("Category"),
        left("Description"),
        right("Amount"),
        left("Status"),
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            let status = match row.get("paid_on").and_then(Value::as_str) {
                Some(paid_on) => format!("paid {paid_on}"),
                None => field(row, "status"),
            };
            vec![
                field(row, "id"),
                field(row, "due_on"),
                field(row, "category"),
                field(row, "description"),
                field(row, "amount"),
                status,
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(&columns, &table_rows, format::terminal_width(), "Expense")
}

use std::io;

use serde_json::Value;

use super::format::{self, field, left, right, rows_at};

struct KindWords {
    singular: &'static str,
    plural: &'static str,
    counterparty: &'static str,
}

fn kind_words(kind: &str) -> KindWords {
    match kind {
        "receivable" => KindWords {
            singular: "Receivable",
            plural: "receivables",
            counterparty: "Description",
        },
        _ => KindWords {
            singular: "Shift",
            plural: "shifts",
            counterparty: "Hospital",
        },
    }
}

pub fn render_income_add(data: &Value) -> io::Result<String> {
    let words = kind_words(data.get("kind").and_then(Value::as_str).unwrap_or("shift"));
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("income add output requires rows"))?;

    let created = data.get("created").and_then(Value::as_i64).unwrap_or(0);
    let noun = if created == 1 {
        words.singular.to_lowercase()
    } else {
        words.plural.to_string()
    };
    let mut lines = vec![
        format!(
            "Recorded {created} {noun} totalling {}.",
            field(data, "total_amount")
        ),
        String::new(),
    ];
    let series = rows
        .first()
        .and_then(|row| row.get("series"))
        .filter(|series| series.get("is_recurring").and_then(Value::as_bool) == Some(true));
    if let Some(series) = series {
        lines.push(format!(
            "  Repeats {} until {}.",
            field(series, "frequency"),
            field(series, "series_end_date")
        ));
        lines.push(String::new());
    }

    lines.extend(income_table(rows, &words));
    Ok(lines.join("\n"))
}

pub fn render_income_list(data: &Value) -> io::Result<String> {
    let words = kind_words(data.get("kind").and_then(Value::as_str).unwrap_or("shift"));
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("income list output requires rows"))?;

    if rows.is_empty() {
        return Ok([
            format!("No {} match.", words.plural),
            String::new(),
            format!(
                "Record one with `plantonista {} add --help`.",
                words.singular.to_lowercase()
            ),
        ]
        .join("\n"));
    }

    let mut heading = format!(
        "{} as of {}",
        capitalized(words.plural),
        field(data, "today")
    );
    if let Some(month) = data.get("month").and_then(Value::as_str) {
        heading.push_str(&format!(", worked in {month}"));
    }
    if let Some(status) = data.get("status_filter").and_then(Value::as_str) {
        heading.push_str(&format!(", status {status}"));
    }
    if let Some(search) = data.get("search").and_then(Value::as_str) {
        heading.push_str(&format!(", matching \"{search}\""));
    }

    let mut lines = vec![heading, String::new()];
    lines.extend(income_table(rows, &words));

    let summary = data.get("summary").cloned().unwrap_or(Value::Null);
    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.extend(format::key_value_rows(
        &[
            ("Entries:", count_field(&summary, "count")),
            ("Pending:", count_field(&summary, "pending_count")),
            ("Overdue:", count_field(&summary, "overdue_count")),
            ("Still open:", field(&summary, "open_amount")),
            ("Received:", field(&summary, "received_amount")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_income_entry(data: &Value) -> io::Result<String> {
    let entry = data
        .get("entry")
        .ok_or_else(|| io::Error::other("income entry output requires entry"))?;
    let words = kind_words(entry.get("kind").and_then(Value::as_str).unwrap_or("shift"));

    let mut lines = vec![
        format!(
            "{} {} {}.",
            words.singular,
            field(entry, "id"),
            field(data, "action")
        ),
        String::new(),
    ];
    let mut details = vec![
        (words.counterparty, field(entry, "counterparty")),
        ("Amount", field(entry, "amount")),
        ("Date", field(entry, "occurred_on")),
        ("Expected", field(entry, "expected_on")),
        ("Received", field(entry, "received_on")),
        ("Status", field(entry, "effective_status")),
    ];
    if entry.get("tag").is_some() {
        details.push(("Tag", field(entry, "tag")));
    }
    lines.extend(format::key_value_rows(&details, 2));
    Ok(lines.join("\n"))
}

pub fn render_delete(data: &Value) -> io::Result<String> {
    let entry_id = field(data, "entry_id");
    if data.get("deleted").and_then(Value::as_bool) == Some(true) {
        Ok(format!("Deleted entry {entry_id}."))
    } else {
        Ok(format!("Entry {entry_id} was already gone."))
    }
}

fn income_table(rows: &[Value], words: &KindWords) -> Vec<String> {
    let show_tag = rows.iter().any(|row| row.get("tag").is_some());
    let mut columns = vec![
        left("Id"),
        left("Date"),
        left("Expected"),
        left(words.counterparty),
        right("Amount"),
        left("Status"),
    ];
    if show_tag {
        columns.push(left("Tag"));
    }

    let table_rows = rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                field(row, "id"),
                field(row, "occurred_on"),
                field(row, "expected_on"),
                field(row, "counterparty"),
                field(row, "amount"),
                status_cell(row),
            ];
            if show_tag {
                cells.push(field(row, "tag"));
            }
            cells
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(&columns, &table_rows, format::terminal_width(), "Entry")
}

fn status_cell(row: &Value) -> String {
    let status = field(row, "effective_status");
    match row.get("received_on").and_then(Value::as_str) {
        Some(received_on) if status == "received" => format!("received {received_on}"),
        _ => status,
    }
}

fn count_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_i64)
        .unwrap_or(0)
        .to_string()
}

fn capitalized(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

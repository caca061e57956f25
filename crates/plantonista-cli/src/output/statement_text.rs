use std::io;

use serde_json::Value;

use super::format::{self, field, left, right};

pub fn render_statement(data: &Value) -> io::Result<String> {
    let lines_data = data
        .get("lines")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("statement output requires lines"))?;

    let mut lines = vec![
        format!(
            "Statement for {} (as of {})",
            field(data, "month"),
            field(data, "as_of")
        ),
        String::new(),
        format!("  Opening balance  {}", field(data, "opening_balance")),
        String::new(),
    ];

    if lines_data.is_empty() {
        lines.push("  No movements this month.".to_string());
    } else {
        let columns = [
            left("Date"),
            left("Label"),
            left("Category"),
            right("Amount"),
            right("Balance"),
        ];
        let table_rows = lines_data
            .iter()
            .map(|line| {
                vec![
                    field(line, "date"),
                    field(line, "label"),
                    field(line, "category"),
                    field(line, "signed_amount"),
                    field(line, "running_balance"),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table(
            &columns,
            &table_rows,
            format::terminal_width(),
            "Line",
        ));
    }

    lines.push(String::new());
    lines.push("Totals:".to_string());
    lines.extend(format::key_value_rows(
        &[
            ("Credits:", field(data, "total_credits")),
            ("Debits:", field(data, "total_debits")),
            ("Closing balance:", field(data, "closing_balance")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_export(data: &Value) -> io::Result<String> {
    let path = data
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("export output requires path"))?;
    let written = data
        .get("lines_written")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    Ok([
        format!(
            "Exported the {} statement to {path}",
            field(data, "month")
        ),
        String::new(),
        format!("  Lines:            {written}"),
        format!("  As of:            {}", field(data, "as_of")),
        format!("  Closing balance:  {}", field(data, "closing_balance")),
    ]
    .join("\n"))
}

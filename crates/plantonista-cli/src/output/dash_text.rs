use std::io;

use serde_json::Value;

use super::format::{self, field, left, right, rows_at};

pub fn render_dash(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("dash output requires summary"))?;

    let mut lines = vec![
        format!(
            "Dashboard for {} (today {})",
            field(summary, "month"),
            field(data, "today")
        ),
        String::new(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("To receive:", field(summary, "to_receive")),
            ("Received:", field(summary, "received")),
            ("Expenses:", field(summary, "expenses")),
            ("Balance:", field(summary, "balance")),
        ],
        2,
    ));

    let cash_flow = rows_at(data, "cash_flow");
    if !cash_flow.is_empty() {
        lines.push(String::new());
        lines.push("Cash flow:".to_string());
        let table_rows = cash_flow
            .iter()
            .map(|point| {
                vec![
                    field(point, "month"),
                    field(point, "received"),
                    field(point, "projected"),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table(
            &[left("Month"), right("Received"), right("Projected")],
            &table_rows,
            format::terminal_width(),
            "Month",
        ));
    }

    let alerts = rows_at(data, "overdue_alerts");
    lines.push(String::new());
    if alerts.is_empty() {
        lines.push("Nothing overdue.".to_string());
    } else {
        lines.push("Overdue payments:".to_string());
        let table_rows = alerts
            .iter()
            .map(|alert| {
                vec![
                    field(alert, "entry_id"),
                    field(alert, "counterparty"),
                    field(alert, "amount"),
                    field(alert, "expected_on"),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table(
            &[
                left("Id"),
                left("From"),
                right("Amount"),
                left("Expected"),
            ],
            &table_rows,
            format::terminal_width(),
            "Alert",
        ));
    }

    push_counterparty_section(
        &mut lines,
        "Pending by hospital:",
        rows_at(data, "pending_by_hospital"),
    );
    push_counterparty_section(
        &mut lines,
        "Late payers:",
        rows_at(data, "overdue_ranking"),
    );

    Ok(lines.join("\n"))
}

fn push_counterparty_section(lines: &mut Vec<String>, title: &str, groups: &[Value]) {
    if groups.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(title.to_string());
    let table_rows = groups
        .iter()
        .map(|group| {
            vec![
                field(group, "counterparty"),
                group
                    .get("count")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
                field(group, "total"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table(
        &[left("Hospital"), right("Shifts"), right("Total")],
        &table_rows,
        format::terminal_width(),
        "Hospital",
    ));
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_dash;

    #[test]
    fn dash_renders_every_section() {
        let data = json!({
            "today": "2026-04-15",
            "summary": {"month": "2026-04", "to_receive": "500.00", "received": "0.00",
                        "expenses": "0.00", "balance": "0.00"},
            "cash_flow": [{"month": "2026-02", "received": "100.00", "projected": "0.00"}],
            "overdue_alerts": [{"entry_id": "shf_1", "kind": "shift", "counterparty": "Hospital Leste",
                                "amount": "500.00", "expected_on": "2026-04-01"}],
            "pending_by_hospital": [{"counterparty": "Hospital Leste", "total": "500.00", "count": 1}],
            "overdue_ranking": [{"counterparty": "Hospital Leste", "total": "500.00", "count": 1}]
        });
        let rendered = render_dash(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Dashboard for 2026-04 (today 2026-04-15)"));
            assert!(text.contains("To receive:  500.00"));
            assert!(text.contains("Cash flow:"));
            assert!(text.contains("Overdue payments:"));
            assert!(text.contains("Pending by hospital:"));
            assert!(text.contains("Late payers:"));
        }
    }

    #[test]
    fn quiet_month_has_nothing_overdue() {
        let data = json!({
            "today": "2026-04-15",
            "summary": {"month": "2026-04"},
            "cash_flow": [],
            "overdue_alerts": [],
            "pending_by_hospital": [],
            "overdue_ranking": []
        });
        let rendered = render_dash(&data);
        assert!(rendered.is_ok_and(|text| text.contains("Nothing overdue.") && !text.contains("Late payers:")));
    }
}

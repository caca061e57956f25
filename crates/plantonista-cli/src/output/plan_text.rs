use std::io;

use serde_json::Value;

use super::format::{self, field};

pub fn render_plan(data: &Value) -> io::Result<String> {
    let capabilities = data
        .get("capabilities")
        .ok_or_else(|| io::Error::other("plan output requires capabilities"))?;
    let flag = |key: &str| capabilities.get(key).and_then(Value::as_bool) == Some(true);

    let status = field(data, "status");
    let days_remaining = capabilities
        .get("days_remaining")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let headline = if flag("is_trialing") && days_remaining >= 0 {
        format!("Trial: {days_remaining} day(s) left (ends {}).", field(data, "trial_end"))
    } else if flag("is_trialing") {
        format!("Trial ended on {}.", field(data, "trial_end"))
    } else {
        format!("Plan status: {status}.")
    };

    let mut lines = vec![headline, String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Status:", status),
            ("Pro:", yes_no(flag("is_pro"))),
            ("Admin:", yes_no(data.get("is_admin").and_then(Value::as_bool) == Some(true))),
            ("Period ends:", field(data, "current_period_end")),
            ("Can add entries:", yes_no(flag("may_write"))),
            ("Can export:", yes_no(flag("may_export"))),
        ],
        2,
    ));
    if !flag("may_write") {
        lines.push(String::new());
        lines.push("Existing entries can still be confirmed, edited and deleted.".to_string());
    }
    Ok(lines.join("\n"))
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

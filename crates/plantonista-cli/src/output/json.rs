use std::io;

use plantonista_client::{ClientError, SuccessEnvelope};
use serde::Serialize;
use serde_json::{Value, json};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        "shift list" | "receivable list" | "expense list" | "hospital list" | "category list" => {
            render_list_json(success)
        }
        "shift add" | "receivable add" | "expense add" | "shift confirm" | "receivable confirm"
        | "shift edit" | "receivable edit" | "shift delete" | "receivable delete"
        | "expense pay" | "expense edit" | "expense delete" | "statement" | "export" | "dash"
        | "plan show" | "plan set" | "hospital add" | "hospital delete" | "category add"
        | "category delete" | "profile show" | "profile set" => render_envelope_json(success),
        _ => {
            return Err(io::Error::other(format!(
                "JSON output is not supported for command `{}`",
                success.command
            )));
        }
    };

    serialize_json_pretty(&value)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let mut payload = json!({
        "error": {
            "code": error.code,
            "message": error.message,
            "recovery_steps": error.recovery_steps,
        }
    });
    if let Some(data) = &error.data {
        payload["error"]["data"] = data.clone();
    }
    serialize_json_pretty(&payload)
}

fn render_envelope_json(success: &SuccessEnvelope) -> Value {
    json!({
        "ok": true,
        "version": JSON_VERSION,
        "command": success.command,
        "data": success.data.clone(),
    })
}

/// List output keeps filters and summary beside the rows, with an explicit
/// row count for consumers that only page through `rows`.
fn render_list_json(success: &SuccessEnvelope) -> Value {
    let mut value = render_envelope_json(success);
    let count = success
        .data
        .get("rows")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    value["row_count"] = Value::from(count);
    value
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

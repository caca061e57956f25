use plantonista_client::ClientError;
use serde_json::Value;

pub fn render_error(error: &ClientError) -> String {
    let heading = if error.is_internal() {
        "The ledger could not be opened or updated."
    } else {
        "Something went wrong, but it's easy to fix."
    };

    let mut lines = vec![
        heading.to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];
    if let Some(command) = data_field(error, "command_hint") {
        lines.push(format!("  Command:  plantonista {command}"));
    }
    if let Some(entry_id) = data_field(error, "entry_id") {
        lines.push(format!("  Entry:    {entry_id}"));
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

fn data_field<'a>(error: &'a ClientError, key: &str) -> Option<&'a str> {
    error
        .data
        .as_ref()
        .and_then(|data| data.get(key))
        .and_then(Value::as_str)
}

mod dash_text;
mod error_text;
mod expense_text;
mod format;
mod income_text;
mod json;
mod mode;
mod plan_text;
mod settings_text;
mod statement_text;

use std::io;

use plantonista_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "shift add" | "receivable add" => income_text::render_income_add(&success.data),
        "shift list" | "receivable list" => income_text::render_income_list(&success.data),
        "shift confirm" | "receivable confirm" | "shift edit" | "receivable edit" => {
            income_text::render_income_entry(&success.data)
        }
        "shift delete" | "receivable delete" | "expense delete" | "hospital delete"
        | "category delete" => {
            income_text::render_delete(&success.data)
        }
        "expense add" => expense_text::render_expense_add(&success.data),
        "expense list" => expense_text::render_expense_list(&success.data),
        "expense pay" | "expense edit" => expense_text::render_expense_entry(&success.data),
        "statement" => statement_text::render_statement(&success.data),
        "export" => statement_text::render_export(&success.data),
        "dash" => dash_text::render_dash(&success.data),
        "plan show" | "plan set" => plan_text::render_plan(&success.data),
        "hospital add" | "category add" => settings_text::render_registry_add(&success.data),
        "hospital list" | "category list" => settings_text::render_registry_list(&success.data),
        "profile show" | "profile set" => settings_text::render_profile(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ledger::date::{add_days, format_iso_date, parse_entry_date};
use crate::ledger::recurrence::FALLBACK_EXPECTED_GAP_DAYS;
use crate::ledger::types::{
    ExpenseDraft, ExpenseEntry, ExpenseStatus, IncomeDraft, IncomeEntry, IncomeKind,
    IncomeStatus, LOCAL_OWNER,
};
use crate::{ClientError, ClientResult};

const MAX_AMOUNT_SCALE: u32 = 2;

/// Largest amount a single entry may carry: 999 999 999 999.99.
///
/// Statement, dashboard and list totals add amounts with plain `+` and rely on
/// this ceiling to stay inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Parses a user-entered amount: a positive decimal with at most two places.
pub fn parse_amount(raw: &str, command: &str) -> ClientResult<Decimal> {
    let trimmed = raw.trim();
    let amount = Decimal::from_str(trimmed).map_err(|_| {
        ClientError::invalid_amount(
            &format!("`amount` must be a decimal number like 1500 or 1500.50; got `{trimmed}`."),
            command,
        )
    })?;
    ensure_positive_amount(amount, command)?;
    Ok(amount.normalize())
}

pub fn ensure_positive_amount(amount: Decimal, command: &str) -> ClientResult<()> {
    if amount <= Decimal::ZERO {
        return Err(ClientError::invalid_amount(
            "`amount` must be greater than zero.",
            command,
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(ClientError::invalid_amount(
            "`amount` must not exceed 999999999999.99.",
            command,
        ));
    }
    if amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(ClientError::invalid_amount(
            "`amount` may have at most two decimal places.",
            command,
        ));
    }
    Ok(())
}

/// True when a stored amount lies inside the range the validator accepts.
pub fn is_storable_amount(amount: Decimal) -> bool {
    amount > Decimal::ZERO && amount <= MAX_AMOUNT
}

pub fn require_label(value: &str, field_name: &str, command: &str) -> ClientResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must not be empty."),
            Some(command),
        ));
    }
    Ok(trimmed.to_string())
}

pub fn parse_income_status(value: &str, command: &str) -> ClientResult<IncomeStatus> {
    IncomeStatus::parse(value.trim()).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!(
                "`status` must be one of pending, received or canceled; got `{}`. Overdue is derived from the expected date and cannot be set.",
                value.trim()
            ),
            Some(command),
        )
    })
}

pub fn parse_expense_status(value: &str, command: &str) -> ClientResult<ExpenseStatus> {
    ExpenseStatus::parse(value.trim()).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!("`status` must be paid or unpaid; got `{}`.", value.trim()),
            Some(command),
        )
    })
}

/// Checks that a received date accompanies exactly the received status.
pub fn check_income_settlement(
    status: IncomeStatus,
    received_on: Option<NaiveDate>,
    command: &str,
) -> ClientResult<()> {
    match (status, received_on) {
        (IncomeStatus::Received, None) => Err(ClientError::invalid_argument_for_command(
            "A received entry needs a received date (`--received`).",
            Some(command),
        )),
        (IncomeStatus::Pending | IncomeStatus::Canceled, Some(_)) => {
            Err(ClientError::invalid_argument_for_command(
                "A received date is only allowed when the status is received.",
                Some(command),
            ))
        }
        _ => Ok(()),
    }
}

pub fn check_expense_settlement(
    status: ExpenseStatus,
    paid_on: Option<NaiveDate>,
    command: &str,
) -> ClientResult<()> {
    match (status, paid_on) {
        (ExpenseStatus::Paid, None) => Err(ClientError::invalid_argument_for_command(
            "A paid expense needs a payment date (`--paid-on`).",
            Some(command),
        )),
        (ExpenseStatus::Unpaid, Some(_)) => Err(ClientError::invalid_argument_for_command(
            "A payment date is only allowed when the status is paid.",
            Some(command),
        )),
        _ => Ok(()),
    }
}

/// Rejects a series whose last date falls before its first.
pub fn check_series_bounds(start: NaiveDate, until: NaiveDate, command: &str) -> ClientResult<()> {
    if until < start {
        return Err(ClientError::invalid_date_for_command(
            &format!(
                "`until` ({}) must be on or after the first date ({}).",
                format_iso_date(&until),
                format_iso_date(&start)
            ),
            command,
        ));
    }
    Ok(())
}

/// Freezes an income draft into a storable entry.
pub fn income_entry_from_draft(
    draft: &IncomeDraft,
    id: String,
    command: &str,
) -> ClientResult<IncomeEntry> {
    let label = require_label(
        &draft.counterparty_label,
        draft.kind.counterparty_field(),
        command,
    )?;
    ensure_positive_amount(draft.amount, command)?;

    let occurred_on = parse_draft_date(&draft.occurred_on, "date", command)?;
    let expected_on = match draft.expected_on.as_deref() {
        Some(raw) => parse_entry_date(raw)
            .unwrap_or_else(|| add_days(occurred_on, FALLBACK_EXPECTED_GAP_DAYS)),
        None => add_days(occurred_on, FALLBACK_EXPECTED_GAP_DAYS),
    };
    let received_on = draft
        .received_on
        .as_deref()
        .map(|raw| parse_draft_date(raw, "received", command))
        .transpose()?;
    check_income_settlement(draft.status, received_on, command)?;

    let tag = match draft.kind {
        IncomeKind::Shift => draft
            .tag
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string),
        IncomeKind::Receivable => None,
    };

    Ok(IncomeEntry {
        id,
        owner_ref: LOCAL_OWNER.to_string(),
        kind: draft.kind,
        counterparty_label: label,
        amount: draft.amount,
        occurred_on,
        expected_on,
        received_on,
        status: draft.status,
        tag,
        series: draft.series,
    })
}

pub fn expense_entry_from_draft(
    draft: &ExpenseDraft,
    id: String,
    command: &str,
) -> ClientResult<ExpenseEntry> {
    let category_label = require_label(&draft.category_label, "category", command)?;
    let description = require_label(&draft.description, "description", command)?;
    ensure_positive_amount(draft.amount, command)?;

    let due_on = parse_draft_date(&draft.due_on, "due", command)?;
    let paid_on = draft
        .paid_on
        .as_deref()
        .map(|raw| parse_draft_date(raw, "paid-on", command))
        .transpose()?;
    check_expense_settlement(draft.status, paid_on, command)?;

    Ok(ExpenseEntry {
        id,
        owner_ref: LOCAL_OWNER.to_string(),
        category_label,
        description,
        amount: draft.amount,
        due_on,
        status: draft.status,
        paid_on,
        series: draft.series,
    })
}

fn parse_draft_date(raw: &str, field_name: &str, command: &str) -> ClientResult<NaiveDate> {
    parse_entry_date(raw).ok_or_else(|| {
        ClientError::invalid_date_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            command,
        )
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{
        MAX_AMOUNT, check_series_bounds, expense_entry_from_draft, income_entry_from_draft,
        is_storable_amount, parse_amount, parse_income_status,
    };
    use crate::ledger::types::{
        ExpenseDraft, ExpenseStatus, IncomeDraft, IncomeKind, IncomeStatus, SeriesInfo,
    };

    fn draft() -> IncomeDraft {
        IncomeDraft {
            kind: IncomeKind::Shift,
            counterparty_label: "  Hospital Norte ".to_string(),
            amount: Decimal::new(120_050, 2),
            occurred_on: "2026-03-01".to_string(),
            expected_on: None,
            received_on: None,
            status: IncomeStatus::Pending,
            tag: Some(" UTI ".to_string()),
            series: SeriesInfo::single(),
        }
    }

    #[test]
    fn amounts_must_be_positive_with_two_places() {
        assert_eq!(
            parse_amount("1500.50", "shift add").ok(),
            Some(Decimal::new(150_050, 2))
        );
        assert_eq!(
            parse_amount("1500.00", "shift add").ok(),
            Some(Decimal::new(1500, 0))
        );
        for raw in ["0", "-10", "10.005", "abc", ""] {
            let result = parse_amount(raw, "shift add");
            assert!(result.is_err(), "{raw} should be rejected");
            if let Err(error) = result {
                assert_eq!(error.code, "invalid_amount");
            }
        }
    }

    #[test]
    fn amounts_above_the_ceiling_are_rejected() {
        assert_eq!(MAX_AMOUNT, Decimal::new(99_999_999_999_999, 2));
        assert_eq!(
            parse_amount("999999999999.99", "shift add").ok(),
            Some(MAX_AMOUNT)
        );
        for raw in ["1000000000000", "79228162514264337593543950335"] {
            let result = parse_amount(raw, "shift add");
            assert!(
                result.is_err_and(|error| error.code == "invalid_amount"
                    && error.message.contains("must not exceed")),
                "{raw} should be rejected"
            );
        }
        assert!(is_storable_amount(MAX_AMOUNT));
        assert!(!is_storable_amount(Decimal::MAX));
        assert!(!is_storable_amount(Decimal::ZERO));
    }

    #[test]
    fn overdue_cannot_be_entered_as_status() {
        let result = parse_income_status("overdue", "shift add");
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("Overdue is derived"));
        }
    }

    #[test]
    fn missing_expected_date_defaults_to_thirty_days_after_work() {
        let entry = income_entry_from_draft(&draft(), "shf_1".to_string(), "shift add");
        assert!(entry.is_ok());
        if let Ok(entry) = entry {
            assert_eq!(entry.counterparty_label, "Hospital Norte");
            assert_eq!(entry.expected_on, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap_or(NaiveDate::MIN));
            assert_eq!(entry.tag.as_deref(), Some("UTI"));
            assert_eq!(entry.owner_ref, "local");
        }
    }

    #[test]
    fn received_status_requires_received_date() {
        let mut received = draft();
        received.status = IncomeStatus::Received;
        assert!(income_entry_from_draft(&received, "shf_1".to_string(), "shift add").is_err());

        let mut stray = draft();
        stray.received_on = Some("2026-03-05".to_string());
        assert!(income_entry_from_draft(&stray, "shf_1".to_string(), "shift add").is_err());
    }

    #[test]
    fn receivables_drop_tags_and_require_description() {
        let mut receivable = draft();
        receivable.kind = IncomeKind::Receivable;
        let entry = income_entry_from_draft(&receivable, "rcv_1".to_string(), "receivable add");
        assert!(entry.is_ok_and(|value| value.tag.is_none()));

        receivable.counterparty_label = "   ".to_string();
        let result = income_entry_from_draft(&receivable, "rcv_1".to_string(), "receivable add");
        assert!(result.is_err_and(|error| error.message.contains("`description`")));
    }

    #[test]
    fn paid_expense_requires_payment_date() {
        let expense = ExpenseDraft {
            category_label: "Rent".to_string(),
            description: "Office".to_string(),
            amount: Decimal::new(900, 0),
            due_on: "2026-03-05".to_string(),
            status: ExpenseStatus::Paid,
            paid_on: None,
            series: SeriesInfo::single(),
        };
        assert!(expense_entry_from_draft(&expense, "exp_1".to_string(), "expense add").is_err());
    }

    #[test]
    fn series_end_must_not_precede_start() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap_or(NaiveDate::MIN);
        let before = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap_or(NaiveDate::MIN);
        assert!(check_series_bounds(start, start, "shift add").is_ok());
        let result = check_series_bounds(start, before, "shift add");
        assert!(result.is_err_and(|error| error.code == "invalid_date"));
    }
}

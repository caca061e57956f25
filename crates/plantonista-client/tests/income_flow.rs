mod support;

use plantonista_client::commands::income::{
    self, IncomeChanges, IncomeConfirmOptions, IncomeDeleteOptions, IncomeEditOptions,
    IncomeListOptions,
};
use plantonista_client::ledger::types::IncomeKind;
use serde_json::Value;
use support::ledger_testkit::{
    add_income, day, first_id, payload, rows, set_plan, shift_options, str_field,
    temp_home_in_tmp,
};

fn list_shifts(home: &std::path::Path, status: Option<&str>, today: &str) -> Vec<Value> {
    rows(&payload(income::list(IncomeListOptions {
        kind: IncomeKind::Shift,
        month: None,
        status: status.map(std::string::ToString::to_string),
        search: None,
        today: day(today),
        home_override: Some(home),
    })))
}

#[test]
fn weekly_series_persists_every_member_in_one_submission() {
    let temp = temp_home_in_tmp("plantonista-income-weekly");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let mut options = shift_options(
            &home,
            "Hospital Central",
            "1500",
            "2024-01-01",
            "2024-01-01",
        );
        options.repeat = Some("weekly".to_string());
        let created = add_income(options);
        assert_eq!(created.len(), 53);
        assert_eq!(str_field(&created[1], "occurred_on"), Some("2024-01-08"));

        let listed = list_shifts(&home, None, "2024-01-01");
        assert_eq!(listed.len(), 53);
        for row in &listed {
            assert_eq!(str_field(row, "status"), Some("pending"));
            assert_eq!(row["series"]["is_recurring"], Value::Bool(true));
            assert_eq!(row["series"]["frequency"], Value::from("weekly"));
            assert_eq!(row["series"]["series_end_date"], Value::from("2025-01-01"));
        }
    }
}

#[test]
fn deleting_one_member_leaves_siblings_untouched() {
    let temp = temp_home_in_tmp("plantonista-income-delete");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let mut options = shift_options(
            &home,
            "Hospital Central",
            "900",
            "2026-01-10",
            "2026-01-10",
        );
        options.repeat = Some("monthly".to_string());
        options.until = Some("2026-04-10".to_string());
        let created = add_income(options);
        assert_eq!(created.len(), 4);

        let deleted = payload(income::delete(IncomeDeleteOptions {
            kind: IncomeKind::Shift,
            entry_id: first_id(&created[1..]),
            home_override: Some(&home),
        }));
        assert_eq!(deleted["data"]["deleted"], Value::Bool(true));

        let remaining = list_shifts(&home, None, "2026-01-10");
        assert_eq!(remaining.len(), 3);
        let dates = remaining
            .iter()
            .filter_map(|row| str_field(row, "occurred_on"))
            .collect::<Vec<&str>>();
        assert_eq!(dates, vec!["2026-01-10", "2026-03-10", "2026-04-10"]);
    }
}

#[test]
fn overdue_is_derived_at_read_time_and_filterable() {
    let temp = temp_home_in_tmp("plantonista-income-overdue");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let mut late = shift_options(&home, "Hospital Norte", "1200", "2026-02-01", "2026-02-01");
        late.expected = Some("2026-03-09".to_string());
        add_income(late);

        let mut due_today = shift_options(&home, "Hospital Sul", "800", "2026-02-10", "2026-02-10");
        due_today.expected = Some("2026-03-10".to_string());
        add_income(due_today);

        let all = list_shifts(&home, None, "2026-03-10");
        assert_eq!(all.len(), 2);
        assert_eq!(str_field(&all[0], "status"), Some("pending"));
        assert_eq!(str_field(&all[0], "effective_status"), Some("overdue"));
        assert_eq!(str_field(&all[1], "effective_status"), Some("pending"));

        let overdue = list_shifts(&home, Some("overdue"), "2026-03-10");
        assert_eq!(overdue.len(), 1);
        assert_eq!(str_field(&overdue[0], "counterparty"), Some("Hospital Norte"));
    }
}

#[test]
fn confirmed_shift_cannot_be_confirmed_or_reopened_again() {
    let temp = temp_home_in_tmp("plantonista-income-confirm");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let created = add_income(shift_options(
            &home,
            "Hospital Norte",
            "1000",
            "2026-03-01",
            "2026-03-01",
        ));
        let entry_id = first_id(&created);

        let confirmed = payload(income::confirm(IncomeConfirmOptions {
            kind: IncomeKind::Shift,
            entry_id: entry_id.clone(),
            received_on: "2026-03-28".to_string(),
            today: day("2026-03-28"),
            home_override: Some(&home),
        }));
        assert_eq!(
            str_field(&confirmed["data"]["entry"], "received_on"),
            Some("2026-03-28")
        );

        let again = income::confirm(IncomeConfirmOptions {
            kind: IncomeKind::Shift,
            entry_id: entry_id.clone(),
            received_on: "2026-03-29".to_string(),
            today: day("2026-03-29"),
            home_override: Some(&home),
        });
        assert!(again.is_err_and(|error| error.code == "entry_status_terminal"));

        let reopen = income::edit(IncomeEditOptions {
            kind: IncomeKind::Shift,
            entry_id,
            changes: IncomeChanges {
                status: Some("pending".to_string()),
                ..IncomeChanges::default()
            },
            today: day("2026-03-29"),
            home_override: Some(&home),
        });
        assert!(reopen.is_err_and(|error| error.code == "entry_status_terminal"));
    }
}

#[test]
fn shift_ids_are_not_found_under_receivables() {
    let temp = temp_home_in_tmp("plantonista-income-kind");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let created = add_income(shift_options(
            &home,
            "Hospital Norte",
            "1000",
            "2026-03-01",
            "2026-03-01",
        ));
        let entry_id = first_id(&created);
        assert!(entry_id.starts_with("shf_"));

        let result = income::delete(IncomeDeleteOptions {
            kind: IncomeKind::Receivable,
            entry_id,
            home_override: Some(&home),
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "entry_not_found");
            assert!(error.recovery_steps[0].contains("receivable list"));
        }
    }
}

#[test]
fn invalid_input_persists_nothing() {
    let temp = temp_home_in_tmp("plantonista-income-invalid");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let zero = income::add(shift_options(&home, "Hospital", "0", "2026-03-01", "2026-03-01"));
        assert!(zero.is_err_and(|error| error.code == "invalid_amount"));

        let mut huge = shift_options(
            &home,
            "Hospital",
            "79228162514264337593543950335",
            "2026-03-01",
            "2026-03-01",
        );
        huge.repeat = Some("weekly".to_string());
        assert!(income::add(huge).is_err_and(|error| error.code == "invalid_amount"));

        let bad_date = income::add(shift_options(&home, "Hospital", "10", "2026-02-30", "2026-03-01"));
        assert!(bad_date.is_err_and(|error| error.code == "invalid_date"));

        let mut overdue = shift_options(&home, "Hospital", "10", "2026-03-01", "2026-03-01");
        overdue.status = Some("overdue".to_string());
        assert!(income::add(overdue).is_err_and(|error| error.code == "invalid_argument"));

        let mut backwards = shift_options(&home, "Hospital", "10", "2026-03-01", "2026-03-01");
        backwards.repeat = Some("monthly".to_string());
        backwards.until = Some("2026-02-01".to_string());
        assert!(income::add(backwards).is_err_and(|error| error.code == "invalid_date"));

        assert!(list_shifts(&home, None, "2026-03-01").is_empty());
    }
}

#[test]
fn received_template_expands_into_pending_members() {
    let temp = temp_home_in_tmp("plantonista-income-received-series");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let mut options = shift_options(
            &home,
            "Hospital Central",
            "700",
            "2026-01-05",
            "2026-01-05",
        );
        options.expected = Some("2026-01-20".to_string());
        options.received = Some("2026-01-20".to_string());
        options.repeat = Some("biweekly".to_string());
        options.until = Some("2026-02-04".to_string());
        let created = add_income(options);

        assert_eq!(created.len(), 3);
        for row in &created {
            assert_eq!(str_field(row, "status"), Some("pending"));
            assert_eq!(row["received_on"], Value::Null);
        }
        assert_eq!(str_field(&created[1], "occurred_on"), Some("2026-01-20"));
        assert_eq!(str_field(&created[1], "expected_on"), Some("2026-02-04"));
    }
}

#[test]
fn canceled_plan_blocks_new_entries_but_not_confirmation() {
    let temp = temp_home_in_tmp("plantonista-income-plan");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let created = add_income(shift_options(
            &home,
            "Hospital Norte",
            "1000",
            "2026-03-01",
            "2026-03-01",
        ));
        set_plan(&home, "canceled", "2026-03-02");

        let blocked = income::add(shift_options(
            &home,
            "Hospital Norte",
            "1000",
            "2026-03-02",
            "2026-03-02",
        ));
        assert!(blocked.is_err_and(|error| error.code == "write_not_allowed"));

        let confirmed = income::confirm(IncomeConfirmOptions {
            kind: IncomeKind::Shift,
            entry_id: first_id(&created),
            received_on: "2026-03-02".to_string(),
            today: day("2026-03-02"),
            home_override: Some(&home),
        });
        assert!(confirmed.is_ok());
    }
}

#[test]
fn month_filter_narrows_by_work_date() {
    let temp = temp_home_in_tmp("plantonista-income-month");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let mut options = shift_options(&home, "Hospital Norte", "600", "2026-02-20", "2026-02-20");
        options.repeat = Some("weekly".to_string());
        options.until = Some("2026-03-13".to_string());
        assert_eq!(add_income(options).len(), 4);

        let march = payload(income::list(IncomeListOptions {
            kind: IncomeKind::Shift,
            month: Some("2026-03".to_string()),
            status: None,
            search: None,
            today: day("2026-03-01"),
            home_override: Some(&home),
        }));
        assert_eq!(march["data"]["month"], Value::from("2026-03"));
        let dates = rows(&march)
            .iter()
            .filter_map(|row| str_field(row, "occurred_on").map(str::to_string))
            .collect::<Vec<String>>();
        assert_eq!(dates, vec!["2026-03-06", "2026-03-13"]);

        let bad_month = income::list(IncomeListOptions {
            kind: IncomeKind::Shift,
            month: Some("2026-13".to_string()),
            status: None,
            search: None,
            today: day("2026-03-01"),
            home_override: Some(&home),
        });
        assert!(bad_month.is_err_and(|error| error.code == "invalid_date"));
    }
}

#[test]
fn edit_with_received_date_settles_the_shift() {
    let temp = temp_home_in_tmp("plantonista-income-edit-received");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let created = add_income(shift_options(
            &home,
            "Hospital Sul",
            "750",
            "2026-03-01",
            "2026-03-01",
        ));
        let edited = payload(income::edit(IncomeEditOptions {
            kind: IncomeKind::Shift,
            entry_id: first_id(&created),
            changes: IncomeChanges {
                received: Some("2026-03-20".to_string()),
                ..IncomeChanges::default()
            },
            today: day("2026-03-20"),
            home_override: Some(&home),
        }));
        assert_eq!(str_field(&edited["data"]["entry"], "status"), Some("received"));
        assert_eq!(
            str_field(&edited["data"]["entry"], "received_on"),
            Some("2026-03-20")
        );
    }
}

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::{ClientError, ClientResult};

/// A calendar month, the unit statements and dashboards are computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        let day = days_in_month(self.year, self.month);
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn offset(self, months: i32) -> Self {
        Self::of(add_months_clamped(self.first_day(), months))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Lenient parse used on stored and template values.
///
/// Accepts `YYYY-MM-DD` optionally followed by a time part (`T...` or
/// ` ...`), which is ignored.
pub fn parse_entry_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = match trimmed.get(10..) {
        Some("") => trimmed,
        Some(rest) if rest.starts_with('T') || rest.starts_with(' ') => trimmed.get(..10)?,
        _ => return None,
    };
    if !looks_like_iso_date(date_part) {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn parse_iso_date_strict(value: &str, field_name: &str, command: &str) -> ClientResult<NaiveDate> {
    if !looks_like_iso_date(value) {
        return Err(ClientError::invalid_date_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            command,
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ClientError::invalid_date_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with valid calendar values."),
            command,
        )
    })
}

pub fn parse_year_month_strict(value: &str, command: &str) -> ClientResult<YearMonth> {
    let invalid = || {
        ClientError::invalid_date_for_command(
            "`month` must use YYYY-MM format with a real calendar month.",
            command,
        )
    };
    let bytes = value.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return Err(invalid());
    }
    for index in [0usize, 1, 2, 3, 5, 6] {
        if !bytes[index].is_ascii_digit() {
            return Err(invalid());
        }
    }
    let year = value[..4].parse::<i32>().map_err(|_| invalid())?;
    let month = value[5..].parse::<u32>().map_err(|_| invalid())?;
    YearMonth::new(year, month).ok_or_else(invalid)
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(chrono::Duration::days(days))
        .unwrap_or(date)
}

pub fn add_months_clamped(date: NaiveDate, months: i32) -> NaiveDate {
    let current_month = i32::try_from(date.month()).unwrap_or(1);
    let mut raw_month = current_month + months;
    let mut year = date.year();

    while raw_month > 12 {
        raw_month -= 12;
        year += 1;
    }
    while raw_month < 1 {
        raw_month += 12;
        year -= 1;
    }

    let month_u32 = u32::try_from(raw_month).unwrap_or(1);
    let day = date.day().min(days_in_month(year, month_u32));
    if let Some(result) = NaiveDate::from_ymd_opt(year, month_u32, day) {
        return result;
    }
    date
}

pub fn add_years_clamped(date: NaiveDate, years: i32) -> NaiveDate {
    add_months_clamped(date, years.saturating_mul(12))
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{
        YearMonth, add_months_clamped, add_years_clamped, format_iso_date, parse_entry_date,
        parse_iso_date_strict, parse_year_month_strict,
    };

    #[test]
    fn month_clamping_handles_end_of_month_transitions() {
        let jan_31 = NaiveDate::from_ymd_opt(2026, 1, 31);
        assert!(jan_31.is_some());
        if let Some(value) = jan_31 {
            let feb = add_months_clamped(value, 1);
            assert_eq!(format_iso_date(&feb), "2026-02-28");
            let mar = add_months_clamped(feb, 1);
            assert_eq!(format_iso_date(&mar), "2026-03-28");
        }
    }

    #[test]
    fn year_advance_clamps_leap_day() {
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29);
        assert!(leap.is_some());
        if let Some(value) = leap {
            assert_eq!(format_iso_date(&add_years_clamped(value, 1)), "2025-02-28");
        }
    }

    #[test]
    fn entry_dates_ignore_time_of_day() {
        assert_eq!(
            parse_entry_date("2026-03-04T23:59:00Z"),
            NaiveDate::from_ymd_opt(2026, 3, 4)
        );
        assert_eq!(
            parse_entry_date("2026-03-04"),
            NaiveDate::from_ymd_opt(2026, 3, 4)
        );
        assert!(parse_entry_date("2026-02-30").is_none());
        assert!(parse_entry_date("04/03/2026").is_none());
        assert!(parse_entry_date("").is_none());
    }

    #[test]
    fn strict_parse_rejects_impossible_calendar_dates() {
        let result = parse_iso_date_strict("2026-02-31", "date", "shift add");
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_date");
            assert!(error.message.contains("calendar"));
        }
    }

    #[test]
    fn year_month_parses_and_walks_across_years() {
        let parsed = parse_year_month_strict("2025-11", "statement");
        assert!(parsed.is_ok());
        if let Ok(month) = parsed {
            assert_eq!(month.offset(2).to_string(), "2026-01");
            assert_eq!(month.offset(-11).to_string(), "2024-12");
            assert_eq!(format_iso_date(&month.last_day()), "2025-11-30");
        }
        assert!(parse_year_month_strict("2025-13", "statement").is_err());
        assert!(parse_year_month_strict("2025-1", "statement").is_err());
        assert_eq!(YearMonth::new(2025, 0), None);
    }
}

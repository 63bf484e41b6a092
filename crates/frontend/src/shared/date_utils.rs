//! Utilities for date handling
//!
//! `<input type="date">` принимает только `YYYY-MM-DD`, а backend отдаёт даты
//! в разных видах: чистой датой, ISO datetime или RFC 2822
//! (`"Thu, 15 Mar 1990 00:00:00 GMT"` у стандартного JSON-энкодера Flask).

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Приводит дату к формату поля ввода `YYYY-MM-DD`.
/// Нераспознанное значение превращается в пустую строку.
pub fn normalize_date_input(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, INPUT_DATE_FORMAT) {
        return date.format(INPUT_DATE_FORMAT).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.date_naive().format(INPUT_DATE_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return dt.date().format(INPUT_DATE_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return dt.date().format(INPUT_DATE_FORMAT).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return dt.date_naive().format(INPUT_DATE_FORMAT).to_string();
    }

    log::warn!("Unrecognized date value: '{}'", value);
    String::new()
}

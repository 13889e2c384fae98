//! Validation Utilities
//!
//! Bridges `validator` derive output into [`ValidationReport`] and hosts the
//! custom field checks shared by the forms.

use std::borrow::Cow;

use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use super::error::ValidationReport;

/// `YYYY-MM-DD`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `HH:MM`
pub const TIME_FORMAT: &str = "%H:%M";

pub static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("valid username regex"));

pub static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ]{6,20}$").expect("valid phone regex"));

pub static ZIP_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("valid zip code regex"));

pub static CLASS_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 -]+$").expect("valid class name regex"));

pub static TAG_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{2,30}$").expect("valid tag name regex"));

/// Earliest first year accepted in an academic year.
pub const FIRST_ACADEMIC_YEAR: i32 = 1900;

/// How many years ahead of the current one an academic year may start.
pub const ACADEMIC_YEARS_AHEAD: i32 = 10;

/// Run derive-based validation and flatten the result into a report.
pub fn validate_form<T: Validate>(form: &T) -> Result<(), ValidationReport> {
    form.validate().map_err(report_from)
}

/// Convert `validator` errors to a report, ordered by field name so the
/// output is stable.
pub fn report_from(errors: ValidationErrors) -> ValidationReport {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut report = ValidationReport::new();
    for (field, errs) in fields {
        for e in errs.iter() {
            let message = e
                .message
                .clone()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            report.add(field.to_string(), message);
        }
    }
    report
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Rejects empty and whitespace-only strings.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(failure("blank", "Field cannot be empty"));
    }
    Ok(())
}

/// Rejects text made only of punctuation and whitespace.
pub fn meaningful_text(value: &str) -> Result<(), ValidationError> {
    let has_content = value
        .chars()
        .any(|c| !c.is_whitespace() && !c.is_ascii_punctuation());
    if !has_content {
        return Err(failure("punctuation_only", "Text must contain words"));
    }
    Ok(())
}

pub fn iso_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value)
        .map(|_| ())
        .ok_or_else(|| failure("date_format", "Date must be in YYYY-MM-DD format"))
}

pub fn clock_time(value: &str) -> Result<(), ValidationError> {
    parse_time(value)
        .map(|_| ())
        .ok_or_else(|| failure("time_format", "Time must be in HH:MM format"))
}

/// `YYYY-YYYY` with consecutive years, starting no earlier than 1900 and no
/// later than ten years from now.
pub fn academic_year(value: &str) -> Result<(), ValidationError> {
    let Some((start, end)) = value.trim().split_once('-') else {
        return Err(failure(
            "academic_year_format",
            "Academic year must be in YYYY-YYYY format",
        ));
    };
    let parse = |part: &str| {
        (part.len() == 4 && part.chars().all(|c| c.is_ascii_digit()))
            .then(|| part.parse::<i32>().ok())
            .flatten()
    };
    let (Some(start), Some(end)) = (parse(start), parse(end)) else {
        return Err(failure(
            "academic_year_format",
            "Academic year must be in YYYY-YYYY format",
        ));
    };
    if end != start + 1 {
        return Err(failure(
            "academic_year_consecutive",
            "Academic year must span two consecutive years",
        ));
    }
    let latest = Utc::now().year() + ACADEMIC_YEARS_AHEAD;
    if !(FIRST_ACADEMIC_YEAR..=latest).contains(&start) {
        return Err(failure(
            "academic_year_range",
            "Academic year is out of the accepted range",
        ));
    }
    Ok(())
}

/// At least 8 characters with upper, lower, digit and special character.
pub fn strong_password(value: &str) -> Result<(), ValidationError> {
    let long_enough = value.chars().count() >= 8;
    let upper = value.chars().any(|c| c.is_ascii_uppercase());
    let lower = value.chars().any(|c| c.is_ascii_lowercase());
    let digit = value.chars().any(|c| c.is_ascii_digit());
    let special = value.chars().any(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace());
    let no_spaces = !value.chars().any(char::is_whitespace);

    if long_enough && upper && lower && digit && special && no_spaces {
        Ok(())
    } else {
        Err(failure(
            "weak_password",
            "Password must be at least 8 characters with upper, lower, digit and special character",
        ))
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).ok()
}

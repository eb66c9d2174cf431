use std::sync::LazyLock;

use axum::{Json, http::StatusCode};
use chrono::{NaiveDate, Utc};
use regex::Regex;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::utils::response::ErrorResponse;

/// The eight supported blood groups.
pub const BLOOD_GROUPS: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{11}$").expect("phone pattern must compile"));

static FACEBOOK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?(facebook|fb)\.com/[\w.-]+$")
        .expect("facebook pattern must compile")
});

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Required text field: must contain at least one non-whitespace character.
pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with_message("required", "Name is required"));
    }
    Ok(())
}

pub fn validate_location(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with_message("required", "Location is required"));
    }
    Ok(())
}

/// Email must be syntactically valid and a Gmail address.
pub fn validate_gmail(value: &str) -> Result<(), ValidationError> {
    let email = value.trim();
    if email.is_empty() {
        return Err(error_with_message("required", "Email is required"));
    }
    if !email.validate_email() || !email.to_lowercase().ends_with("@gmail.com") {
        return Err(error_with_message(
            "gmail",
            "Please enter a valid Gmail address",
        ));
    }
    Ok(())
}

pub fn validate_blood_group(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with_message("required", "Blood group is required"));
    }
    if !BLOOD_GROUPS.contains(&value) {
        return Err(error_with_message(
            "blood_group",
            "Blood group must be one of A+, A-, B+, B-, AB+, AB-, O+, O-",
        ));
    }
    Ok(())
}

/// Optional phone number: when given, must be exactly 11 decimal digits.
/// An empty string is treated as absent (the form submits empty fields).
pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    if !PHONE_RE.is_match(value) {
        return Err(error_with_message(
            "phone_number",
            "Phone number is not valid: must be exactly 11 digits",
        ));
    }
    Ok(())
}

/// Optional Facebook profile URL: when given, must point at a
/// facebook.com/fb.com profile handle.
pub fn validate_facebook_url(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    if !FACEBOOK_RE.is_match(value) {
        return Err(error_with_message(
            "facebook_profile_url",
            "Please enter a valid Facebook profile URL",
        ));
    }
    Ok(())
}

/// Optional last-donated date: when given, must parse as `YYYY-MM-DD` (or a
/// full RFC 3339 timestamp) and must not be later than today (UTC).
pub fn validate_donation_date(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    let Some(date) = parse_donation_date(value) else {
        return Err(error_with_message(
            "last_donated_date",
            "Last donated date is not a valid date",
        ));
    };
    if date > Utc::now().date_naive() {
        return Err(error_with_message(
            "last_donated_date",
            "Last donated date cannot be in the future",
        ));
    }
    Ok(())
}

/// Parse a donation date from a plain `YYYY-MM-DD` string or an RFC 3339
/// timestamp. Returns `None` for empty or unparseable input.
pub fn parse_donation_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Validate a payload implementing `validator::Validate` and return an
/// axum-compatible error tuple on validation failure so handlers can `?` it.
/// All violated rules are aggregated into a single human-readable message.
pub fn validate_payload<T: Validate>(
    payload: &T,
) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    if let Err(errors) = payload.validate() {
        let mut messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| {
                errs.iter().map(|e| {
                    e.message
                        .clone()
                        .unwrap_or_else(|| "Invalid input".into())
                        .to_string()
                })
            })
            .collect();
        messages.sort();
        messages.dedup();
        let response = ErrorResponse::new(messages.join(", "));
        return Err((StatusCode::BAD_REQUEST, Json(response)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn gmail_address_accepted() {
        assert!(validate_gmail("a@gmail.com").is_ok());
        assert!(validate_gmail("john.doe42@gmail.com").is_ok());
    }

    #[test]
    fn non_gmail_address_rejected() {
        assert!(validate_gmail("a@yahoo.com").is_err());
        assert!(validate_gmail("not-an-email").is_err());
        assert!(validate_gmail("").is_err());
    }

    #[test]
    fn phone_number_must_be_eleven_digits() {
        assert!(validate_phone_number("01712345678").is_ok());
        assert!(validate_phone_number("123").is_err());
        assert!(validate_phone_number("0171234567x").is_err());
        assert!(validate_phone_number("017123456789").is_err());
        // empty means absent, not invalid
        assert!(validate_phone_number("").is_ok());
    }

    #[test]
    fn facebook_url_pattern() {
        assert!(validate_facebook_url("https://www.facebook.com/john.doe").is_ok());
        assert!(validate_facebook_url("http://fb.com/jane_doe").is_ok());
        assert!(validate_facebook_url("not-a-url").is_err());
        assert!(validate_facebook_url("https://twitter.com/john").is_err());
        assert!(validate_facebook_url("https://facebook.com/").is_err());
        assert!(validate_facebook_url("").is_ok());
    }

    #[test]
    fn blood_group_must_be_enumerated() {
        for group in BLOOD_GROUPS {
            assert!(validate_blood_group(group).is_ok());
        }
        assert!(validate_blood_group("C+").is_err());
        assert!(validate_blood_group("").is_err());
    }

    #[test]
    fn donation_date_must_not_be_in_future() {
        let yesterday = (Utc::now().date_naive() - Duration::days(1)).to_string();
        let tomorrow = (Utc::now().date_naive() + Duration::days(1)).to_string();
        assert!(validate_donation_date(&yesterday).is_ok());
        assert!(validate_donation_date(&tomorrow).is_err());
        assert!(validate_donation_date("nonsense").is_err());
        assert!(validate_donation_date("").is_ok());
    }

    #[test]
    fn donation_date_parses_plain_and_rfc3339() {
        assert_eq!(
            parse_donation_date("2024-05-01"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(
            parse_donation_date("2024-05-01T10:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(parse_donation_date(""), None);
    }

    #[test]
    fn required_text_fields() {
        assert!(validate_name("Jane").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_location("Dhaka").is_ok());
        assert!(validate_location("").is_err());
    }
}

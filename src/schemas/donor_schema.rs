use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::utils::validation::parse_donation_date;

/// Request schema for donor registration. Every field defaults so that a
/// missing field surfaces as a validation error rather than a deserialization
/// failure. Optional fields treat an empty string as absent, matching what a
/// browser form submits.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(
    function = validate_contact_presence,
    skip_on_field_errors = false
))]
pub struct DonorStoreRequestSchema {
    #[serde(default)]
    #[validate(custom(function = crate::utils::validation::validate_name))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = crate::utils::validation::validate_location))]
    pub location: String,

    #[serde(default)]
    #[validate(custom(function = crate::utils::validation::validate_gmail))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = crate::utils::validation::validate_blood_group))]
    pub blood_group: String,

    #[serde(default)]
    #[validate(custom(function = crate::utils::validation::validate_phone_number))]
    pub phone_number: Option<String>,

    #[serde(default)]
    #[validate(custom(function = crate::utils::validation::validate_facebook_url))]
    pub facebook_profile_url: Option<String>,

    #[serde(default)]
    #[validate(custom(function = crate::utils::validation::validate_donation_date))]
    pub last_donated_date: Option<String>,
}

impl DonorStoreRequestSchema {
    /// Name with surrounding whitespace removed, as stored.
    pub fn name(&self) -> &str {
        self.name.trim()
    }

    pub fn location(&self) -> &str {
        self.location.trim()
    }

    /// Email normalized for duplicate checks and storage.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    /// Phone number, with an empty submission treated as absent.
    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    pub fn facebook_profile_url(&self) -> Option<&str> {
        self.facebook_profile_url
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Parsed donation date; `None` when absent. Call only after validation,
    /// which guarantees any present value parses.
    pub fn last_donated_date(&self) -> Option<NaiveDate> {
        self.last_donated_date
            .as_deref()
            .and_then(parse_donation_date)
    }
}

/// A donor must be reachable somehow: phone number and Facebook profile URL
/// cannot both be absent.
fn validate_contact_presence(
    schema: &DonorStoreRequestSchema,
) -> Result<(), ValidationError> {
    if schema.phone_number().is_none() && schema.facebook_profile_url().is_none() {
        let mut err = ValidationError::new("contact_required");
        err.message =
            Some("At least one of phone number or Facebook profile URL is required".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_schema() -> DonorStoreRequestSchema {
        DonorStoreRequestSchema {
            name: "Jane Doe".into(),
            location: "Dhaka".into(),
            email: "jane.doe@gmail.com".into(),
            blood_group: "O+".into(),
            phone_number: Some("01712345678".into()),
            facebook_profile_url: None,
            last_donated_date: Some("2024-05-01".into()),
        }
    }

    #[test]
    fn valid_record_passes() {
        assert!(valid_schema().validate().is_ok());
    }

    #[test]
    fn missing_required_fields_collects_every_violation() {
        let schema = DonorStoreRequestSchema {
            name: String::new(),
            location: String::new(),
            email: String::new(),
            blood_group: String::new(),
            phone_number: None,
            facebook_profile_url: None,
            last_donated_date: None,
        };
        let errors = schema.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("location"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("blood_group"));
        // cross-field contact rule is reported even alongside field errors
        assert!(fields.contains_key("__all__"));
    }

    #[test]
    fn both_contacts_absent_fails() {
        let mut schema = valid_schema();
        schema.phone_number = None;
        schema.facebook_profile_url = None;
        assert!(schema.validate().is_err());

        // empty strings count as absent too
        schema.phone_number = Some(String::new());
        schema.facebook_profile_url = Some("  ".into());
        assert!(schema.validate().is_err());
    }

    #[test]
    fn facebook_url_alone_satisfies_contact_rule() {
        let mut schema = valid_schema();
        schema.phone_number = None;
        schema.facebook_profile_url = Some("https://www.facebook.com/jane.doe".into());
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn email_is_normalized() {
        let mut schema = valid_schema();
        schema.email = "  Jane.Doe@Gmail.Com ".into();
        assert_eq!(schema.normalized_email(), "jane.doe@gmail.com");
    }

    #[test]
    fn empty_optional_fields_read_as_absent() {
        let mut schema = valid_schema();
        schema.phone_number = Some(String::new());
        assert_eq!(schema.phone_number(), None);
        schema.last_donated_date = Some(String::new());
        assert_eq!(schema.last_donated_date(), None);
    }
}

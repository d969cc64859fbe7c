use lazy_static::lazy_static;
use regex::Regex;

use crate::accounts::dto::ProfileFields;
use crate::errors::ApiError;

const NAME_MAX: usize = 100;
const BIO_MAX: usize = 500;
pub(crate) const AGE_MIN: i32 = 0;
pub(crate) const AGE_MAX: i32 = 150;

fn invalid(message: &str) -> ApiError {
    ApiError::Validation(message.to_string())
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn is_valid_phone(phone: &str) -> bool {
    lazy_static! {
        static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9\s()\-]{10,}$").unwrap();
    }
    PHONE_RE.is_match(phone)
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if !is_valid_email(email) {
        return Err(invalid("invalid email format"));
    }
    Ok(())
}

/// At least 8 characters, one ASCII letter and one digit.
pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < 8 {
        return Err(invalid("password must be at least 8 characters"));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic())
        || !password.chars().any(|c| c.is_ascii_digit())
    {
        return Err(invalid("password must contain at least one letter and one digit"));
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), ApiError> {
    if !(AGE_MIN..=AGE_MAX).contains(&age) {
        return Err(invalid("age must be between 0 and 150"));
    }
    Ok(())
}

/// Checks the optional profile fields in declaration order and reports the
/// first violated rule only.
pub fn validate_profile(fields: &ProfileFields) -> Result<(), ApiError> {
    if let Some(name) = &fields.name {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.chars().count() > NAME_MAX {
            return Err(invalid("name must be a non-empty string of at most 100 characters"));
        }
    }
    if let Some(bio) = &fields.bio {
        if bio.chars().count() > BIO_MAX {
            return Err(invalid("bio must be at most 500 characters"));
        }
    }
    if let Some(age) = fields.age {
        validate_age(age)?;
    }
    if let Some(phone) = &fields.phone {
        if !is_valid_phone(phone) {
            return Err(invalid("invalid phone number format"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ProfileFields {
        ProfileFields::default()
    }

    #[test]
    fn email_accepts_simple_addresses() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("first.last@sub.domain.org").is_ok());
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@domain.com").is_err());
        assert!(validate_email("white space@domain.com").is_err());
    }

    #[test]
    fn password_requires_length_letter_and_digit() {
        assert!(validate_password("abc12345").is_ok());
        assert!(validate_password("short1").is_err());
        assert!(validate_password("alllettersnodigit").is_err());
        assert!(validate_password("12345678").is_err());
    }

    #[test]
    fn password_reports_the_first_violated_rule() {
        let err = validate_password("a1").unwrap_err();
        match err {
            ApiError::Validation(msg) => assert!(msg.contains("8 characters")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn name_must_be_non_empty_and_bounded() {
        let mut fields = profile();
        fields.name = Some("Ada Lovelace".to_string());
        assert!(validate_profile(&fields).is_ok());

        fields.name = Some("   ".to_string());
        assert!(validate_profile(&fields).is_err());

        fields.name = Some("x".repeat(101));
        assert!(validate_profile(&fields).is_err());
    }

    #[test]
    fn bio_is_bounded_at_500() {
        let mut fields = profile();
        fields.bio = Some("y".repeat(500));
        assert!(validate_profile(&fields).is_ok());
        fields.bio = Some("y".repeat(501));
        assert!(validate_profile(&fields).is_err());
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert!(validate_age(0).is_ok());
        assert!(validate_age(150).is_ok());
        assert!(validate_age(-1).is_err());
        assert!(validate_age(151).is_err());
    }

    #[test]
    fn phone_allows_loose_formats() {
        let mut fields = profile();
        for ok in ["+1 (555) 123-4567", "5551234567", "020 7946 0958"] {
            fields.phone = Some(ok.to_string());
            assert!(validate_profile(&fields).is_ok(), "expected {ok:?} to pass");
        }
        for bad in ["12345", "555-CALL-NOW", "+12ab34cd56"] {
            fields.phone = Some(bad.to_string());
            assert!(validate_profile(&fields).is_err(), "expected {bad:?} to fail");
        }
    }

    #[test]
    fn absent_optional_fields_pass() {
        assert!(validate_profile(&profile()).is_ok());
    }
}

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::{domain::region::RegionCode, ports::services::PhoneNumberValidator};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\s]+$").expect("name pattern is a valid regex"));

/// Client-side validation failures. Each kind renders to the message shown
/// under the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FieldErrorKind {
    #[error("Email is invalid")]
    InvalidEmail,
    #[error("Email is required.")]
    EmailRequired,
    #[error("Must consist of letters only")]
    InvalidNameChars,
    #[error("Please enter a valid phone number.")]
    InvalidPhone,
    #[error("Please enter a valid date of birth.")]
    InvalidDateOfBirth,
    #[error("Password does not meet all requirements.")]
    WeakPassword,
    #[error("Passwords do not match.")]
    PasswordMismatch,
}

pub type FieldResult = Result<(), FieldErrorKind>;

/// Empty input passes; the field is optional at this layer.
pub fn validate_email(email: &str) -> FieldResult {
    if email.is_empty() || EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(FieldErrorKind::InvalidEmail)
    }
}

/// Letters from any script plus whitespace. Empty input passes.
pub fn validate_name(name: &str) -> FieldResult {
    if name.is_empty() || NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(FieldErrorKind::InvalidNameChars)
    }
}

/// Phone is optional: empty input passes, anything else must be a valid
/// number for `region` according to `checker`.
pub fn validate_phone<P>(phone: &str, region: &RegionCode, checker: &P) -> FieldResult
where
    P: PhoneNumberValidator + ?Sized,
{
    if phone.trim().is_empty() || checker.is_valid(phone, region) {
        Ok(())
    } else {
        Err(FieldErrorKind::InvalidPhone)
    }
}

/// Accepts an ISO `YYYY-MM-DD` date no later than `today`. Empty input passes.
pub fn validate_date_of_birth(dob: &str, today: NaiveDate) -> FieldResult {
    if dob.is_empty() {
        return Ok(());
    }

    match NaiveDate::parse_from_str(dob, "%Y-%m-%d") {
        Ok(date) if date <= today => Ok(()),
        _ => Err(FieldErrorKind::InvalidDateOfBirth),
    }
}

/// Confirmation must be non-empty and identical to the password.
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> FieldResult {
    if confirmation.is_empty() || password != confirmation {
        Err(FieldErrorKind::PasswordMismatch)
    } else {
        Ok(())
    }
}

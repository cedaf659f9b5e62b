//! Field validation and normalization.
//!
//! Everything in here is pure. The predicates answer "would this input be
//! accepted?", the normalizers produce the canonical stored form.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::Age;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("this must never fail")
});

/// Country code a 12 or 13 digit phone number must start with.
pub const COUNTRY_CODE: &str = "55";

/// Reasons a field value is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The email does not look like `local@domain.tld`.
    #[error("invalid email '{0}', expected something like name@domain.com")]
    Email(String),

    /// The phone number has the wrong number of digits or country code.
    #[error("invalid phone '{0}', expected 10 or 11 digits, or 12-13 digits starting with +55")]
    Phone(String),

    /// The age is not a positive whole number.
    #[error("invalid age '{0}', expected a positive whole number")]
    Age(String),
}

/// Returns the key used for every name comparison.
///
/// Two names belong to the same person iff their normalized keys are equal.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Checks an email address against the conventional `local@domain.tld` shape.
///
/// No DNS or mailbox checks are made.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Keeps only ASCII digits and `+` characters, discarding everything else.
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Checks a phone number by counting the digits of its normalized form.
///
/// - 10 or 11 digits: a local number, with or without the mobile prefix.
/// - 12 or 13 digits: must start with the country code.
/// - anything else is rejected.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = normalize_phone(phone)
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    match digits.len() {
        10 | 11 => true,
        12 | 13 => digits.starts_with(COUNTRY_CODE),
        _ => false,
    }
}

/// Checks that an age parses as a base-10 integer greater than zero.
///
/// This is exactly the rule [`Age`]'s `FromStr` applies.
#[must_use]
pub fn is_valid_age(age: &str) -> bool {
    age.parse::<Age>().is_ok()
}

/// Validates an email address, returning it unchanged.
///
/// # Errors
///
/// Returns [`ValidationError::Email`] if [`is_valid_email`] rejects it.
pub fn email(input: &str) -> Result<String, ValidationError> {
    if is_valid_email(input) {
        Ok(input.to_string())
    } else {
        Err(ValidationError::Email(input.to_string()))
    }
}

/// Validates a phone number, returning its normalized form.
///
/// # Errors
///
/// Returns [`ValidationError::Phone`] if [`is_valid_phone`] rejects it.
pub fn phone(input: &str) -> Result<String, ValidationError> {
    if is_valid_phone(input) {
        Ok(normalize_phone(input))
    } else {
        Err(ValidationError::Phone(input.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_name_trims_and_lowercases() {
        assert_eq!(normalize_name("  Ana Paula \t"), "ana paula");
        assert_eq!(normalize_name("JOÃO"), "joão");
    }

    #[test]
    fn normalize_name_is_idempotent() {
        for input in ["", "  ", "Ana", " BRUNO ", "Ana\tPaula\n", "ÉLISE"] {
            let once = normalize_name(input);
            assert_eq!(normalize_name(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn email_examples() {
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("a@b"));
        assert!(is_valid_email("a.b+c@sub.domain.co"));
        assert!(is_valid_email("UPPER@CASE.ORG"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn normalize_phone_discards_punctuation() {
        assert_eq!(normalize_phone("+55 (11) 98765-4321"), "+5511987654321");
        assert_eq!(normalize_phone("abc"), "");
    }

    #[test]
    fn phone_digit_count_boundaries() {
        assert!(!is_valid_phone("123456789"));
        assert!(is_valid_phone("1234567890"));
        assert!(is_valid_phone("12345678901"));
        assert!(is_valid_phone("551234567890"));
        assert!(!is_valid_phone("441234567890"));
        assert!(is_valid_phone("5512345678901"));
        assert!(!is_valid_phone("4412345678901"));
        assert!(!is_valid_phone("55123456789012"));
    }

    #[test]
    fn phone_plus_and_formatting_are_ignored_when_counting() {
        assert!(is_valid_phone("+55 (11) 98765-4321"));
        assert!(is_valid_phone("(11) 8765-4321"));
        assert!(!is_valid_phone("+1 555 0100"));
    }

    #[test]
    fn age_must_be_positive_integer() {
        assert!(is_valid_age("1"));
        assert!(is_valid_age("42"));
        assert!(!is_valid_age("0"));
        assert!(!is_valid_age("-3"));
        assert!(!is_valid_age("4.5"));
        assert!(!is_valid_age("forty"));
        assert!(!is_valid_age(""));
    }

    #[test]
    fn age_predicate_agrees_with_age_parsing() {
        for input in [
            "1",
            "+7",
            "007",
            "0",
            "-1",
            " 5",
            "9223372036854775807",
            "18446744073709551615",
            "x",
        ] {
            assert_eq!(
                is_valid_age(input),
                input.parse::<Age>().is_ok(),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn field_parsers_report_the_offending_value() {
        assert_eq!(
            email("nope"),
            Err(ValidationError::Email("nope".to_string()))
        );
        assert_eq!(phone("(11) 98765-4321").unwrap(), "11987654321");
        assert_eq!(phone("123"), Err(ValidationError::Phone("123".to_string())));
    }
}

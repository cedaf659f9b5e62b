use std::{fmt, num::NonZeroU64, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::validate::{self, ValidationError};

/// A person's age in whole years.
///
/// Always positive. Displayed and stored in canonical decimal form, so an
/// entry of `"007"` is kept as `"7"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(NonZeroU64);

impl Age {
    /// Returns the age as a number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl FromStr for Age {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .ok()
            .and_then(|n| u64::try_from(n).ok())
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or_else(|| ValidationError::Age(s.to_string()))
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The details recorded for one person.
///
/// The person's name is not part of the record; it is the key the record is
/// stored under in the [`Directory`](crate::Directory).
///
/// On disk a record is a three element array `[email, phone, age]`, every
/// element a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Wire", into = "Wire")]
pub struct Person {
    email: String,
    phone: String,
    age: Age,
}

impl Person {
    /// Validates and normalizes raw field values into a record.
    ///
    /// The phone number is stored in normalized form.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered, checking email,
    /// phone and age in that order.
    pub fn parse(email: &str, phone: &str, age: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            email: validate::email(email)?,
            phone: validate::phone(phone)?,
            age: age.parse()?,
        })
    }

    /// Builds a record from values that have already been validated.
    #[must_use]
    pub const fn new(email: String, phone: String, age: Age) -> Self {
        Self { email, phone, age }
    }

    /// The person's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The person's phone number, normalized to digits and `+`.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// The person's age.
    #[must_use]
    pub const fn age(&self) -> Age {
        self.age
    }

    /// Replaces the email address.
    pub fn set_email(&mut self, email: String) {
        self.email = email;
    }

    /// Replaces the phone number.
    pub fn set_phone(&mut self, phone: String) {
        self.phone = phone;
    }

    /// Replaces the age.
    pub const fn set_age(&mut self, age: Age) {
        self.age = age;
    }
}

/// The serialized form of a [`Person`].
#[derive(Debug, Serialize, Deserialize)]
struct Wire(String, String, String);

impl TryFrom<Wire> for Person {
    type Error = ValidationError;

    fn try_from(Wire(email, phone, age): Wire) -> Result<Self, Self::Error> {
        Ok(Self {
            email,
            phone,
            age: age.parse()?,
        })
    }
}

impl From<Person> for Wire {
    fn from(person: Person) -> Self {
        Self(person.email, person.phone, person.age.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_is_canonicalised() {
        let age: Age = "007".parse().unwrap();
        assert_eq!(age.get(), 7);
        assert_eq!(age.to_string(), "7");
    }

    #[test]
    fn age_rejects_zero_and_negatives() {
        assert!("0".parse::<Age>().is_err());
        assert!("-1".parse::<Age>().is_err());
        assert!("ten".parse::<Age>().is_err());
    }

    #[test]
    fn parse_normalizes_phone() {
        let person = Person::parse("ana@example.com", "(11) 98765-4321", "30").unwrap();
        assert_eq!(person.email(), "ana@example.com");
        assert_eq!(person.phone(), "11987654321");
        assert_eq!(person.age().get(), 30);
    }

    #[test]
    fn parse_reports_first_invalid_field() {
        let error = Person::parse("bad", "123", "0").unwrap_err();
        assert_eq!(error, ValidationError::Email("bad".to_string()));

        let error = Person::parse("ana@example.com", "123", "0").unwrap_err();
        assert_eq!(error, ValidationError::Phone("123".to_string()));
    }

    #[test]
    fn serializes_as_string_array() {
        let person = Person::parse("ana@example.com", "+5511987654321", "30").unwrap();
        let json = serde_json::to_string(&person).unwrap();
        assert_eq!(json, r#"["ana@example.com","+5511987654321","30"]"#);
    }

    #[test]
    fn deserializes_from_string_array() {
        let person: Person =
            serde_json::from_str(r#"["ana@example.com","11987654321","30"]"#).unwrap();
        assert_eq!(person.phone(), "11987654321");
        assert_eq!(person.age().get(), 30);
    }

    #[test]
    fn deserializing_a_bad_age_fails() {
        let result: Result<Person, _> =
            serde_json::from_str(r#"["ana@example.com","11987654321","old"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn deserializing_the_wrong_arity_fails() {
        let result: Result<Person, _> = serde_json::from_str(r#"["ana@example.com","1"]"#);
        assert!(result.is_err());
    }
}

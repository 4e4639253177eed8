//! Declarative validation of caller-supplied form and contact data.
//!
//! Validation failures are data, not control flow: every violation is
//! accumulated into a field -> message map so callers can render
//! per-field errors and resubmit.

use crate::contact::{normalize_phone, ContactData};
use intake_catalog::FieldDefinitions;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Accumulated validation failures, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    /// Record a violation for a field, replacing any earlier message.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Whether any violations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The message recorded for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Iterate over field / message pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate caller form data against a request type's field definitions.
///
/// Checks that every required field is present and that enumerated fields
/// carry an allowed value. All violations accumulate; success only when
/// none were recorded.
pub fn validate_form_data(
    data: &BTreeMap<String, String>,
    definitions: &FieldDefinitions,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for (field, definition) in definitions {
        if definition.required && !data.contains_key(field) {
            errors.insert(field.as_str(), format!("{field} is a required field."));
        }

        if let (Some(options), Some(value)) = (&definition.options, data.get(field)) {
            if !options.contains(value) {
                errors.insert(
                    field.as_str(),
                    format!("{field} must be one of: {}", options.join(" | ")),
                );
            }
        }
    }

    errors.into_result()
}

/// Validate caller contact data.
///
/// The email address is required and must look like `local@domain.tld`.
/// Each phone number present must normalize to ten digits.
pub fn validate_contact_data(contact: &ContactData) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    match contact.email_address.as_deref() {
        None | Some("") => {
            errors.insert("emailAddress", "Email Address (emailAddress) is required");
        }
        Some(address) if !is_email(address) => {
            errors.insert(
                "emailAddress",
                "That email address does not appear to be valid",
            );
        }
        Some(_) => {}
    }

    let phones = [
        ("phone1", &contact.phone1),
        ("phone2", &contact.phone2),
        ("phone3", &contact.phone3),
    ];

    for (field, phone) in phones {
        if let Some(number) = phone {
            if !number.is_empty() && normalize_phone(number).is_none() {
                errors.insert(
                    field,
                    format!("{field} does not appear to be a valid phone number"),
                );
            }
        }
    }

    errors.into_result()
}

// Mostly a sanity check; the portal does its own verification.
fn is_email(address: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex =
        EMAIL_REGEX.get_or_init(|| Regex::new(r"^(.+)@(.+)\.(.+)$").expect("valid regex"));
    regex.is_match(address)
}

//! Shared types used across the civic-intake workspace.
//!
//! This module defines common newtypes that provide type safety and clear
//! domain modeling for the intake workflow.

use crate::error::CoreError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for service request type codes with validation.
///
/// Request type codes identify the category of service request in the
/// portal's catalog (e.g. `AAE` for standing water, `PHF` for potholes).
/// Codes are normalized to uppercase at construction, so lookups against
/// the catalog are case-insensitive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestType(String);

impl RequestType {
    /// Create a new `RequestType` from a code string.
    ///
    /// The input is uppercased before validation.
    ///
    /// # Errors
    /// Returns error if the code is not 2-10 ASCII alphanumeric characters
    /// starting with a letter.
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into().to_uppercase();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Get the inner code string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate request type code format: uppercase alphanumeric, 2-10 chars.
    fn validate(code: &str) -> Result<(), CoreError> {
        static CODE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = CODE_REGEX
            .get_or_init(|| Regex::new(r"^[A-Z][A-Z0-9]{1,9}$").expect("valid regex"));

        if regex.is_match(code) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "invalid request type code: must be 2-10 alphanumeric characters, got '{code}'"
            )))
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Street address of the incident being reported.
///
/// The portal validates the location as the first workflow step, so the
/// address travels with the session from the start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street number (e.g. "4955")
    pub street_number: String,

    /// Street direction prefix (e.g. "N")
    pub street_direction: String,

    /// Street name (e.g. "Damen")
    pub street_name: String,

    /// Street suffix (e.g. "Ave")
    pub street_suffix: String,

    /// Street suffix direction, where the suffix itself carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_suffix_dir: Option<String>,
}

impl Address {
    /// Portal field name / value pairs for the set-location step.
    #[must_use]
    pub fn portal_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("invStreetNumber", self.street_number.clone()),
            ("invStreetPrefix", self.street_direction.clone()),
            ("invStreetName", self.street_name.clone()),
            ("invStreetSuffix", self.street_suffix.clone()),
        ];

        if let Some(suffix_dir) = &self.street_suffix_dir {
            fields.push(("invStreetSuffixDir", suffix_dir.clone()));
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_type_uppercases() {
        let rt = RequestType::new("aae").expect("valid request type");
        assert_eq!(rt.as_str(), "AAE");
        assert_eq!(rt.to_string(), "AAE");
    }

    #[test]
    fn test_request_type_valid() {
        for code in ["AAE", "PHF", "GRAF", "SWSNOREM", "sdp"] {
            assert!(RequestType::new(code).is_ok(), "Failed for: {code}");
        }
    }

    #[test]
    fn test_request_type_invalid() {
        for code in ["", "A", "1AE", "A-E", "AVERYLONGCODE", "A E"] {
            assert!(RequestType::new(code).is_err(), "Should fail for: {code}");
        }
    }

    #[test]
    fn test_request_type_equality_after_normalization() {
        let a = RequestType::new("aae").expect("valid request type");
        let b = RequestType::new("AAE").expect("valid request type");
        assert_eq!(a, b);
    }

    #[test]
    fn test_address_portal_fields() {
        let address = Address {
            street_number: "4955".to_string(),
            street_direction: "N".to_string(),
            street_name: "Damen".to_string(),
            street_suffix: "Ave".to_string(),
            street_suffix_dir: None,
        };

        let fields = address.portal_fields();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], ("invStreetNumber", "4955".to_string()));
        assert_eq!(fields[1], ("invStreetPrefix", "N".to_string()));
    }

    #[test]
    fn test_address_portal_fields_with_suffix_dir() {
        let address = Address {
            street_number: "100".to_string(),
            street_direction: "W".to_string(),
            street_name: "Wacker".to_string(),
            street_suffix: "Dr".to_string(),
            street_suffix_dir: Some("N".to_string()),
        };

        let fields = address.portal_fields();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[4], ("invStreetSuffixDir", "N".to_string()));
    }

    #[test]
    fn test_address_deserializes_camel_case() {
        let json = r#"{
            "streetNumber": "4955",
            "streetDirection": "N",
            "streetName": "Damen",
            "streetSuffix": "Ave"
        }"#;

        let address: Address = serde_json::from_str(json).expect("deserialize address");
        assert_eq!(address.street_name, "Damen");
        assert_eq!(address.street_suffix_dir, None);
    }
}

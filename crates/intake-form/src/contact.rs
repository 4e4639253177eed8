//! Caller contact data and its translation to the portal vocabulary.

use intake_core::RequestType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Caller-supplied contact information.
///
/// `email_address` is the only required field; everything else is
/// optional. External names are camelCase (`emailAddress`, `phone1Type`,
/// `textUpdates`) for callers feeding JSON in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactData {
    /// Email address for the confirmation notice (required)
    pub email_address: Option<String>,
    /// Caller first name
    pub first_name: Option<String>,
    /// Caller last name
    pub last_name: Option<String>,
    /// Caller street number
    pub street_number: Option<String>,
    /// Caller street direction prefix
    pub street_direction: Option<String>,
    /// Caller street name
    pub street_name: Option<String>,
    /// Caller street suffix
    pub street_suffix: Option<String>,
    /// Caller street suffix direction
    pub street_suffix_dir: Option<String>,
    /// Caller city
    pub city: Option<String>,
    /// Caller state code
    pub state: Option<String>,
    /// Caller ZIP code
    pub zip: Option<String>,
    /// Primary phone number
    pub phone1: Option<String>,
    /// Primary phone type (e.g. "Cellular")
    pub phone1_type: Option<String>,
    /// Primary phone extension
    pub phone1_ext: Option<String>,
    /// Second phone number
    pub phone2: Option<String>,
    /// Second phone type
    pub phone2_type: Option<String>,
    /// Second phone extension
    pub phone2_ext: Option<String>,
    /// Third phone number
    pub phone3: Option<String>,
    /// Third phone type
    pub phone3_type: Option<String>,
    /// Third phone extension
    pub phone3_ext: Option<String>,
    /// Opt in to SMS status updates on phone1
    pub text_updates: bool,
}

/// Normalize a US phone number to a bare ten-digit string.
///
/// Strips every non-digit character and one leading `1`, then requires
/// exactly ten digits to remain. Returns `None` for anything else; no
/// locale awareness.
#[must_use]
pub fn normalize_phone(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.strip_prefix('1').unwrap_or(&digits);

    if digits.len() == 10 {
        Some(digits.to_string())
    } else {
        None
    }
}

/// Translate contact data into the portal's participant field vocabulary.
///
/// Only fields actually present on the input are emitted; absent fields
/// never appear in the output, even as empty strings. When `phone1` is
/// present and `text_updates` is set, the type-specific SMS opt-in field
/// `fn_<TYPE>_A511OPTN` is added with phone1's raw value.
#[must_use]
pub fn convert_contact_data(
    contact: &ContactData,
    request_type: &RequestType,
) -> BTreeMap<String, String> {
    // The portal's type/number column names are transposed for the phone
    // trio; the mapping follows the live form, not the obvious reading.
    let mappings: [(&Option<String>, &str); 19] = [
        (&contact.email_address, "invParticipantEmailAddress_CALLER"),
        (&contact.first_name, "invParticipantFirstName_CALLER"),
        (&contact.last_name, "invParticipantLastName_CALLER"),
        (&contact.street_number, "invParticipantStreetNumber_CALLER"),
        (&contact.street_direction, "invParticipantStreetPrefix_CALLER"),
        (&contact.street_name, "invParticipantStreetName_CALLER"),
        (&contact.street_suffix, "invParticipantStreetSuffix_CALLER"),
        (&contact.city, "invParticipantCity_CALLER"),
        (&contact.state, "invParticipantStateCode_CALLER"),
        (&contact.zip, "invParticipantZipCode_CALLER"),
        (&contact.phone1, "invParticipantContactPhoneType_CALLER_1"),
        (&contact.phone1_type, "invParticipantContactPhoneNumber_CALLER_1"),
        (&contact.phone1_ext, "invParticipantContactPhoneDetails_CALLER_1"),
        (&contact.phone2, "invParticipantContactPhoneType_CALLER_2"),
        (&contact.phone2_type, "invParticipantContactPhoneNumber_CALLER_2"),
        (&contact.phone2_ext, "invParticipantContactPhoneDetails_CALLER_2"),
        (&contact.phone3, "invParticipantContactPhoneType_CALLER_3"),
        (&contact.phone3_type, "invParticipantContactPhoneNumber_CALLER_3"),
        (&contact.phone3_ext, "invParticipantContactPhoneDetails_CALLER_3"),
    ];

    let mut converted = BTreeMap::new();

    for (value, portal_name) in mappings {
        if let Some(value) = value {
            converted.insert(portal_name.to_string(), value.clone());
        }
    }

    if let Some(phone1) = &contact.phone1 {
        if contact.text_updates {
            converted.insert(
                format!("fn_{}_A511OPTN", request_type.as_str()),
                phone1.clone(),
            );
        }
    }

    converted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_type(code: &str) -> RequestType {
        RequestType::new(code).expect("valid request type")
    }

    #[test]
    fn test_normalize_phone_strips_formatting() {
        assert_eq!(
            normalize_phone("(312) 555-1212").as_deref(),
            Some("3125551212")
        );
    }

    #[test]
    fn test_normalize_phone_strips_leading_one() {
        assert_eq!(
            normalize_phone("13125551212").as_deref(),
            Some("3125551212")
        );
    }

    #[test]
    fn test_normalize_phone_rejects_short_numbers() {
        assert_eq!(normalize_phone("555-1212"), None);
        assert_eq!(normalize_phone(""), None);
        assert_eq!(normalize_phone("not a number"), None);
    }

    #[test]
    fn test_normalize_phone_rejects_long_numbers() {
        assert_eq!(normalize_phone("312555121234"), None);
    }

    #[test]
    fn test_normalize_phone_idempotent() {
        let once = normalize_phone("1 (312) 555-1212").expect("normalizes");
        let twice = normalize_phone(&once).expect("normalizes again");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_convert_emits_only_present_fields() {
        let contact = ContactData {
            email_address: Some("a@b.com".to_string()),
            ..ContactData::default()
        };

        let converted = convert_contact_data(&contact, &request_type("AAE"));

        // Absent fields must not be injected, not even as empty strings.
        assert_eq!(converted.len(), 1);
        assert_eq!(converted["invParticipantEmailAddress_CALLER"], "a@b.com");
    }

    #[test]
    fn test_convert_maps_name_and_address_fields() {
        let contact = ContactData {
            email_address: Some("test@test.com".to_string()),
            first_name: Some("Test".to_string()),
            last_name: Some("Caller".to_string()),
            city: Some("Chicago".to_string()),
            state: Some("IL".to_string()),
            zip: Some("60640".to_string()),
            ..ContactData::default()
        };

        let converted = convert_contact_data(&contact, &request_type("AAE"));
        assert_eq!(converted.len(), 6);
        assert_eq!(converted["invParticipantFirstName_CALLER"], "Test");
        assert_eq!(converted["invParticipantLastName_CALLER"], "Caller");
        assert_eq!(converted["invParticipantCity_CALLER"], "Chicago");
        assert_eq!(converted["invParticipantStateCode_CALLER"], "IL");
        assert_eq!(converted["invParticipantZipCode_CALLER"], "60640");
    }

    #[test]
    fn test_convert_text_updates_opt_in() {
        let contact = ContactData {
            email_address: Some("a@b.com".to_string()),
            phone1: Some("3125551212".to_string()),
            text_updates: true,
            ..ContactData::default()
        };

        let converted = convert_contact_data(&contact, &request_type("AAE"));
        assert_eq!(converted["fn_AAE_A511OPTN"], "3125551212");
    }

    #[test]
    fn test_convert_no_opt_in_without_phone1() {
        let contact = ContactData {
            email_address: Some("a@b.com".to_string()),
            text_updates: true,
            ..ContactData::default()
        };

        let converted = convert_contact_data(&contact, &request_type("AAE"));
        assert!(!converted.keys().any(|k| k.ends_with("_A511OPTN")));
    }

    #[test]
    fn test_contact_data_deserializes_camel_case() {
        let json = r#"{
            "emailAddress": "test@test.com",
            "phone1": "312-555-1212",
            "phone1Type": "Cellular",
            "textUpdates": true
        }"#;

        let contact: ContactData = serde_json::from_str(json).expect("deserialize contact data");
        assert_eq!(contact.email_address.as_deref(), Some("test@test.com"));
        assert_eq!(contact.phone1_type.as_deref(), Some("Cellular"));
        assert!(contact.text_updates);
        assert_eq!(contact.first_name, None);
    }
}

//! Intake Form - Form-data plumbing for the civic-intake workflow.
//!
//! This crate holds the pure pieces of the intake engine: scraping
//! ambient form state out of portal HTML, validating caller input
//! against a request type's field definitions, and translating caller
//! contact data into the portal's participant vocabulary.
//!
//! # Architecture
//!
//! - **Scraping** ([`scrape`]): HTML -> field/value map, no stored parser state
//! - **Validation** ([`validate`]): accumulated per-field errors as data
//! - **Contact** ([`contact`]): caller contact shape, phone normalization,
//!   portal field-name translation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod contact;
pub mod scrape;
pub mod validate;

pub use contact::{convert_contact_data, normalize_phone, ContactData};
pub use scrape::extract_fields;
pub use validate::{validate_contact_data, validate_form_data, ValidationErrors};

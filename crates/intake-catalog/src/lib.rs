//! Intake Catalog - Request-type catalog for the civic-intake workspace.
//!
//! This crate loads and serves the static schema data behind the intake
//! workflow: the table of request type codes with their portal
//! descriptions, and the per-type field definition documents the session
//! engine validates caller input against.
//!
//! # Architecture
//!
//! - **Definition Types** ([`definition`]): `FieldDefinition` constraints
//! - **Catalog** ([`catalog`]): TOML loading from `request-types/` and lookup
//! - **Errors** ([`error`]): catalog-specific error types
//!
//! # Example
//!
//! ```rust,no_run
//! use intake_catalog::RequestCatalog;
//! use intake_core::RequestType;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = RequestCatalog::with_default_dir()?;
//!
//! let request_type = RequestType::new("AAE")?;
//! let description = catalog.lookup(&request_type)?;
//! let fields = catalog.field_definitions(&request_type)?;
//!
//! println!("{description}: {} fields", fields.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod catalog;
pub mod definition;
pub mod error;

pub use catalog::RequestCatalog;
pub use definition::{FieldDefinition, FieldDefinitions};
pub use error::{CatalogError, Result};

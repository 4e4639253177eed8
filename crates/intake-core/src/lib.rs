//! Intake Core - Shared types for the civic-intake workspace.
//!
//! This crate defines the newtypes and small value types used across the
//! catalog, form, and session crates.
//!
//! # Architecture
//!
//! - **Types** ([`types`]): `RequestType` and `Address` newtypes
//! - **Errors** ([`error`]): core error type for newtype validation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{Address, RequestType};

//! Field definition types for request-type schemas.
//!
//! Each request type ships a TOML document mapping portal field names to
//! their constraints. The documents are static configuration consumed by
//! the session engine; they are never generated at runtime.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Constraints for a single caller-facing portal field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Whether the caller must supply this field
    #[serde(default)]
    pub required: bool,

    /// Allowed values, for enumerated fields; order is the portal's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Field definitions for one request type, keyed by portal field name.
pub type FieldDefinitions = BTreeMap<String, FieldDefinition>;

//! Error types for the catalog subsystem.

use thiserror::Error;

/// Errors that can occur in catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Request type code is absent from the catalog
    #[error("unknown request type: {code}")]
    UnknownRequestType {
        /// The request type code that was not found
        code: String,
    },

    /// Request type is listed in the catalog but has no field definitions
    #[error("request type '{code}' has not been implemented yet: no field definition document")]
    NotImplemented {
        /// The request type code lacking a definition document
        code: String,
    },

    /// Catalog directory not found
    #[error("request-type catalog directory not found at {path}")]
    DirectoryNotFound {
        /// Expected directory path
        path: String,
    },

    /// Failed to read a catalog or definition file
    #[error("failed to load {path}: {source}")]
    LoadError {
        /// Path to the file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse catalog or definition TOML
    #[error("failed to parse TOML in {path}: {source}")]
    ParseError {
        /// Path to the file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// I/O error while accessing the catalog
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

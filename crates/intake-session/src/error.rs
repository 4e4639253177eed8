//! Error types for the session engine.

use intake_form::ValidationErrors;
use thiserror::Error;

/// Errors from the HTTP capability injected into a session.
///
/// Transport failures are fatal to the current workflow step and are
/// never retried; the session that observed one cannot be reused.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The endpoint URL could not be parsed
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Parse failure detail
        reason: String,
    },

    /// The request failed (connection, TLS, protocol)
    #[error("request to {url} failed: {source}")]
    RequestFailed {
        /// Target URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The request exceeded the per-call time budget
    #[error("request to {url} timed out")]
    Timeout {
        /// Target URL
        url: String,
    },

    /// The response body could not be read
    #[error("failed to read response body from {url}: {source}")]
    BodyError {
        /// Target URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    ClientError(#[source] reqwest::Error),
}

/// Errors that can occur in workflow session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// An operation was called before `initialize` completed
    #[error("session is not initialized: call initialize before {operation}")]
    NotInitialized {
        /// The operation that was attempted
        operation: &'static str,
    },

    /// `initialize` was called on an already-initialized session
    #[error("session is already initialized; sessions are single-use")]
    AlreadyInitialized,

    /// A prior exchange failed; the session is unusable
    #[error("session failed during an earlier exchange and cannot be reused")]
    SessionFailed,

    /// `verify` was called while form data is missing or invalid
    #[error("form data is invalid or has not been set")]
    FormDataInvalid,

    /// `verify` was called while contact data is missing or invalid
    #[error("contact data is invalid or has not been set")]
    ContactDataInvalid,

    /// `submit` was called without a successful prior `verify`
    #[error("request has not been verified; call verify before submit")]
    NotVerified,

    /// `submit` was called twice
    #[error("request was already submitted")]
    AlreadySubmitted,

    /// The portal returned an empty body where content was expected
    #[error("the portal returned an empty response")]
    UnknownServerError,

    /// Caller-supplied data failed validation (correctable, per-field)
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Catalog lookup or schema loading failed
    #[error(transparent)]
    Catalog(#[from] intake_catalog::CatalogError),

    /// The underlying HTTP exchange failed
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SessionError {
    /// The per-field error map, when this is a validation failure.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

//! HTTP capability injected into workflow sessions.
//!
//! The session engine does not know how HTTP works; it drives an
//! implementation of [`PortalTransport`]. The production implementation
//! wraps `reqwest` with a per-instance cookie store, because every portal
//! exchange in one workflow must share one cookie context and no two
//! sessions may share it.

use crate::error::TransportError;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Fixed per-call time budget. A timeout aborts the current step; the
/// workflow performs no retries.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Async HTTP capability used to drive the portal.
#[async_trait::async_trait]
pub trait PortalTransport: Send + Sync {
    /// Fetch a URL and return the response body.
    async fn get(&self, url: &str) -> Result<String, TransportError>;

    /// POST a form-encoded body and return the response body.
    async fn post_form(
        &self,
        url: &str,
        form: &BTreeMap<String, String>,
    ) -> Result<String, TransportError>;
}

/// `reqwest`-backed transport with an owned cookie store.
///
/// Each instance carries its own cookie jar; constructing one per
/// [`WorkflowSession`](crate::WorkflowSession) gives the session exclusive
/// session-affinity state with nothing process-wide.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with a fresh cookie store and the fixed timeout.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TransportError::ClientError)?;

        Ok(Self { client })
    }

    fn parse_url(url: &str) -> Result<url::Url, TransportError> {
        url::Url::parse(url).map_err(|e| TransportError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    fn classify(url: &str, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
            }
        } else {
            TransportError::RequestFailed {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

#[async_trait::async_trait]
impl PortalTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let target = Self::parse_url(url)?;
        debug!(url, "GET");

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| Self::classify(url, e))?;

        response.text().await.map_err(|e| TransportError::BodyError {
            url: url.to_string(),
            source: e,
        })
    }

    async fn post_form(
        &self,
        url: &str,
        form: &BTreeMap<String, String>,
    ) -> Result<String, TransportError> {
        let target = Self::parse_url(url)?;
        debug!(url, fields = form.len(), "POST");

        let response = self
            .client
            .post(target)
            .form(form)
            .send()
            .await
            .map_err(|e| Self::classify(url, e))?;

        response.text().await.map_err(|e| TransportError::BodyError {
            url: url.to_string(),
            source: e,
        })
    }
}

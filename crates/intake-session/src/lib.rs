//! Intake Session - Stateful multi-step form-session engine.
//!
//! This crate drives a service request through the legacy web-intake
//! portal's HTML form workflow: reset session, set location, select
//! service, fill fields, verify, submit. The portal threads hidden state
//! through every response, so the engine scrapes each page and echoes the
//! ambient fields back on the next POST, accumulating state as it goes.
//!
//! # Architecture
//!
//! - **Session** ([`session`]): the `WorkflowSession` state machine
//! - **Transport** ([`transport`]): injected HTTP capability with
//!   per-instance cookie affinity
//! - **URLs** ([`urls`]): endpoint derivation from a configurable base
//! - **Errors** ([`error`]): session and transport error types
//!
//! # Example
//!
//! ```rust,no_run
//! use intake_catalog::RequestCatalog;
//! use intake_core::{Address, RequestType};
//! use intake_form::ContactData;
//! use intake_session::{HttpTransport, WorkflowSession};
//! use std::collections::BTreeMap;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = RequestCatalog::with_default_dir()?;
//! let transport = HttpTransport::new()?;
//! let mut session =
//!     WorkflowSession::new(transport, catalog, RequestType::new("AAE")?);
//!
//! session
//!     .initialize(&Address {
//!         street_number: "4955".into(),
//!         street_direction: "N".into(),
//!         street_name: "Damen".into(),
//!         street_suffix: "Ave".into(),
//!         street_suffix_dir: None,
//!     })
//!     .await?;
//!
//! let mut data = BTreeMap::new();
//! data.insert("fn_AAE_ISTHEPOO".to_string(), "Rainwater".to_string());
//! session.set_form_data(data)?;
//!
//! session.set_contact_data(ContactData {
//!     email_address: Some("caller@example.com".to_string()),
//!     ..ContactData::default()
//! })?;
//!
//! session.verify().await?;
//! session.submit().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod session;
pub mod transport;
pub mod urls;

pub use error::{Result, SessionError, TransportError};
pub use session::{SessionPhase, WorkflowSession};
pub use transport::{HttpTransport, PortalTransport};
pub use urls::{PortalUrls, DEFAULT_BASE_URL};

//! The workflow session state machine.
//!
//! One [`WorkflowSession`] drives one service request through the
//! portal's multi-step form: reset session, validate location, select
//! service, fill fields, verify, submit. Each HTTP exchange seeds hidden
//! state the next exchange must echo back, so the steps run strictly in
//! order with one outstanding request at a time.

use crate::error::{Result, SessionError};
use crate::transport::PortalTransport;
use crate::urls::{PortalUrls, DEFAULT_BASE_URL};
use intake_catalog::{FieldDefinitions, RequestCatalog};
use intake_core::{Address, RequestType};
use intake_form::{
    convert_contact_data, extract_fields, validate_contact_data, validate_form_data, ContactData,
};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Where a session is in its lifecycle.
///
/// Sessions are single-use: there is no path backwards from `Submitted`
/// or `Failed`, and no re-initialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Constructed, no portal contact yet
    Created,
    /// The three-step bootstrap completed; form state is accumulated
    Initialized,
    /// The review POST succeeded
    Verified,
    /// The final submission was posted
    Submitted,
    /// A portal exchange failed; the session is unusable
    Failed,
}

/// Stateful engine for one service request against the portal.
///
/// Owns every piece of per-request mutable state: the accumulated form
/// data, contact data, validity flags, derived URLs, and the transport
/// (and with it the cookie context). Nothing is shared across sessions.
pub struct WorkflowSession<T: PortalTransport> {
    transport: T,
    catalog: RequestCatalog,
    request_type: RequestType,
    base_url: String,
    phase: SessionPhase,
    urls: Option<PortalUrls>,
    field_definitions: FieldDefinitions,
    request_form_data: BTreeMap<String, String>,
    contact_data: ContactData,
    form_data_is_valid: bool,
    contact_data_is_valid: bool,
}

impl<T: PortalTransport> WorkflowSession<T> {
    /// Create a session for one request type.
    ///
    /// The transport must be exclusive to this session; sharing one across
    /// sessions leaks cookie state between workflows.
    #[must_use]
    pub fn new(transport: T, catalog: RequestCatalog, request_type: RequestType) -> Self {
        Self {
            transport,
            catalog,
            request_type,
            base_url: DEFAULT_BASE_URL.to_string(),
            phase: SessionPhase::Created,
            urls: None,
            field_definitions: FieldDefinitions::new(),
            request_form_data: BTreeMap::new(),
            contact_data: ContactData::default(),
            form_data_is_valid: false,
            contact_data_is_valid: false,
        }
    }

    /// Override the portal base URL (e.g. for a test double).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The session's request type.
    #[must_use]
    pub fn request_type(&self) -> &RequestType {
        &self.request_type
    }

    /// The session's current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The catalog backing this session.
    #[must_use]
    pub fn catalog(&self) -> &RequestCatalog {
        &self.catalog
    }

    /// Bootstrap the session against the portal with the request address.
    ///
    /// Resolves the catalog description and field definitions, then runs
    /// the ordered exchange: GET reset, POST location (scraped ambient
    /// fields plus the address), GET select-service. Each response is
    /// scraped and merged into the accumulated form state, fresh values
    /// winning. Any transport failure aborts the sequence, leaves the
    /// session failed, and surfaces the underlying error.
    pub async fn initialize(&mut self, address: &Address) -> Result<()> {
        match self.phase {
            SessionPhase::Created => {}
            SessionPhase::Failed => return Err(SessionError::SessionFailed),
            _ => return Err(SessionError::AlreadyInitialized),
        }

        let description = self.catalog.lookup(&self.request_type)?.to_string();
        let definitions = self.catalog.field_definitions(&self.request_type)?;
        let urls = PortalUrls::for_request(&self.base_url, &self.request_type, &description);

        debug!(request_type = %self.request_type, "resetting portal session");
        let reset_page = self.exchange_get(urls.reset.clone()).await?;
        let mut location_form = extract_fields(&reset_page);

        for (name, value) in address.portal_fields() {
            location_form.insert(name.to_string(), value);
        }

        debug!(fields = location_form.len(), "validating request location");
        let location_page = self
            .exchange_post(urls.set_location.clone(), &location_form)
            .await?;
        self.request_form_data.extend(extract_fields(&location_page));

        debug!("selecting service request type");
        let service_page = self.exchange_get(urls.select_service.clone()).await?;
        self.request_form_data.extend(extract_fields(&service_page));

        self.field_definitions = definitions;
        self.urls = Some(urls);
        self.phase = SessionPhase::Initialized;

        info!(
            request_type = %self.request_type,
            fields = self.request_form_data.len(),
            "workflow session initialized"
        );

        Ok(())
    }

    /// Validate and merge caller form data into the accumulated state.
    ///
    /// Validity is recomputed from scratch on every call: a failed call
    /// leaves the form data invalid and returns the per-field error map,
    /// and the caller must resubmit corrected data before `verify` can
    /// succeed. Successful merges are right-biased (new values win,
    /// previously accumulated keys survive).
    pub fn set_form_data(&mut self, data: BTreeMap<String, String>) -> Result<()> {
        self.ensure_active("set_form_data")?;
        self.unverify();

        self.form_data_is_valid = false;
        if let Err(errors) = validate_form_data(&data, &self.field_definitions) {
            warn!(violations = errors.len(), "form data rejected");
            return Err(SessionError::Validation(errors));
        }

        self.request_form_data.extend(data);
        self.form_data_is_valid = true;
        Ok(())
    }

    /// Validate and store caller contact data.
    pub fn set_contact_data(&mut self, contact: ContactData) -> Result<()> {
        self.ensure_active("set_contact_data")?;
        self.unverify();

        self.contact_data_is_valid = false;
        if let Err(errors) = validate_contact_data(&contact) {
            warn!(violations = errors.len(), "contact data rejected");
            return Err(SessionError::Validation(errors));
        }

        self.contact_data = contact;
        self.contact_data_is_valid = true;
        Ok(())
    }

    /// The field definitions loaded for this request type.
    pub fn form(&self) -> Result<&FieldDefinitions> {
        self.ensure_initialized("form")?;
        Ok(&self.field_definitions)
    }

    /// The full accumulated form state, ambient fields included.
    pub fn form_data(&self) -> Result<&BTreeMap<String, String>> {
        self.ensure_initialized("form_data")?;
        Ok(&self.request_form_data)
    }

    /// The accumulated form state restricted to schema-defined fields.
    ///
    /// Ambient hidden fields (view state, tokens) are filtered out; only
    /// keys present in the field definitions appear.
    pub fn user_input(&self) -> Result<BTreeMap<String, String>> {
        self.ensure_initialized("user_input")?;

        Ok(self
            .request_form_data
            .iter()
            .filter(|(key, _)| self.field_definitions.contains_key(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    /// The accumulated value for one schema-defined field.
    ///
    /// Returns `None` for unknown fields and for known fields with no
    /// accumulated value.
    pub fn user_input_for(&self, field: &str) -> Result<Option<&str>> {
        self.ensure_initialized("user_input_for")?;

        if !self.field_definitions.contains_key(field) {
            return Ok(None);
        }

        Ok(self.request_form_data.get(field).map(String::as_str))
    }

    /// POST the composite request to the review endpoint.
    ///
    /// Fails fast, without touching the network, unless both form data
    /// and contact data are currently valid. The composite is the
    /// accumulated form state with the translated contact fields merged
    /// over it; the accumulated state itself is not mutated.
    pub async fn verify(&mut self) -> Result<String> {
        self.ensure_active("verify")?;

        if !self.form_data_is_valid {
            return Err(SessionError::FormDataInvalid);
        }
        if !self.contact_data_is_valid {
            return Err(SessionError::ContactDataInvalid);
        }

        let review_url = self.urls_ref("verify")?.review.clone();

        let mut composite = self.request_form_data.clone();
        composite.extend(convert_contact_data(&self.contact_data, &self.request_type));

        debug!(fields = composite.len(), "posting review request");
        let body = self.exchange_post(review_url, &composite).await?;

        if body.is_empty() {
            self.phase = SessionPhase::Failed;
            return Err(SessionError::UnknownServerError);
        }

        self.phase = SessionPhase::Verified;
        info!(request_type = %self.request_type, "service request verified");
        Ok(body)
    }

    /// Finalize the request.
    ///
    /// Only valid after a successful `verify`; the portal holds the
    /// composite server-side, so the POST body is empty and rides on the
    /// session cookie alone.
    pub async fn submit(&mut self) -> Result<String> {
        match self.phase {
            SessionPhase::Verified => {}
            SessionPhase::Submitted => return Err(SessionError::AlreadySubmitted),
            SessionPhase::Failed => return Err(SessionError::SessionFailed),
            SessionPhase::Created | SessionPhase::Initialized => {
                return Err(SessionError::NotVerified)
            }
        }

        let submit_url = self.urls_ref("submit")?.submit.clone();
        let body = self.exchange_post(submit_url, &BTreeMap::new()).await?;

        self.phase = SessionPhase::Submitted;
        info!(request_type = %self.request_type, "service request submitted");
        Ok(body)
    }

    /// Changing inputs after a successful verify forces a re-verify.
    fn unverify(&mut self) {
        if self.phase == SessionPhase::Verified {
            self.phase = SessionPhase::Initialized;
        }
    }

    fn ensure_initialized(&self, operation: &'static str) -> Result<()> {
        match self.phase {
            SessionPhase::Created => Err(SessionError::NotInitialized { operation }),
            SessionPhase::Failed => Err(SessionError::SessionFailed),
            _ => Ok(()),
        }
    }

    fn ensure_active(&self, operation: &'static str) -> Result<()> {
        match self.phase {
            SessionPhase::Created => Err(SessionError::NotInitialized { operation }),
            SessionPhase::Failed => Err(SessionError::SessionFailed),
            SessionPhase::Submitted => Err(SessionError::AlreadySubmitted),
            SessionPhase::Initialized | SessionPhase::Verified => Ok(()),
        }
    }

    fn urls_ref(&self, operation: &'static str) -> Result<&PortalUrls> {
        self.urls
            .as_ref()
            .ok_or(SessionError::NotInitialized { operation })
    }

    async fn exchange_get(&mut self, url: String) -> Result<String> {
        match self.transport.get(&url).await {
            Ok(body) => Ok(body),
            Err(e) => {
                warn!(%url, error = %e, "portal exchange failed");
                self.phase = SessionPhase::Failed;
                Err(SessionError::Transport(e))
            }
        }
    }

    async fn exchange_post(
        &mut self,
        url: String,
        form: &BTreeMap<String, String>,
    ) -> Result<String> {
        match self.transport.post_form(&url, form).await {
            Ok(body) => Ok(body),
            Err(e) => {
                warn!(%url, error = %e, "portal exchange failed");
                self.phase = SessionPhase::Failed;
                Err(SessionError::Transport(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use std::collections::BTreeMap;

    /// Transport double that panics on any exchange. Used to prove that
    /// precondition failures never reach the network.
    struct NoNetwork;

    #[async_trait::async_trait]
    impl PortalTransport for NoNetwork {
        async fn get(&self, url: &str) -> std::result::Result<String, TransportError> {
            panic!("unexpected GET {url}");
        }

        async fn post_form(
            &self,
            url: &str,
            _form: &BTreeMap<String, String>,
        ) -> std::result::Result<String, TransportError> {
            panic!("unexpected POST {url}");
        }
    }

    fn catalog() -> RequestCatalog {
        let mut types = BTreeMap::new();
        types.insert("AAE".to_string(), "Water On Street".to_string());
        RequestCatalog::from_parts(types, "/nonexistent")
    }

    fn session() -> WorkflowSession<NoNetwork> {
        WorkflowSession::new(
            NoNetwork,
            catalog(),
            RequestType::new("AAE").expect("valid request type"),
        )
    }

    #[test]
    fn test_new_session_phase() {
        assert_eq!(session().phase(), SessionPhase::Created);
    }

    #[test]
    fn test_operations_require_initialize() {
        let mut session = session();

        let err = session.set_form_data(BTreeMap::new()).unwrap_err();
        assert!(matches!(err, SessionError::NotInitialized { .. }));

        let err = session.set_contact_data(ContactData::default()).unwrap_err();
        assert!(matches!(err, SessionError::NotInitialized { .. }));

        assert!(matches!(
            session.form().unwrap_err(),
            SessionError::NotInitialized { .. }
        ));
        assert!(matches!(
            session.form_data().unwrap_err(),
            SessionError::NotInitialized { .. }
        ));
        assert!(matches!(
            session.user_input().unwrap_err(),
            SessionError::NotInitialized { .. }
        ));
        assert!(matches!(
            session.user_input_for("fn_AAE_ISTHEPOO").unwrap_err(),
            SessionError::NotInitialized { .. }
        ));
    }

    #[tokio::test]
    async fn test_verify_before_initialize_makes_no_network_call() {
        let mut session = session();
        let err = session.verify().await.unwrap_err();
        assert!(matches!(err, SessionError::NotInitialized { .. }));
    }

    #[tokio::test]
    async fn test_submit_before_verify_makes_no_network_call() {
        let mut session = session();
        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, SessionError::NotVerified));
    }

    #[tokio::test]
    async fn test_initialize_unknown_type_fails_before_network() {
        let mut session = WorkflowSession::new(
            NoNetwork,
            catalog(),
            RequestType::new("ZZZ").expect("valid request type"),
        );

        let address = Address {
            street_number: "1".to_string(),
            street_direction: "N".to_string(),
            street_name: "State".to_string(),
            street_suffix: "Street".to_string(),
            street_suffix_dir: None,
        };

        let err = session.initialize(&address).await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Catalog(intake_catalog::CatalogError::UnknownRequestType { .. })
        ));
        assert_eq!(session.phase(), SessionPhase::Created);
    }
}

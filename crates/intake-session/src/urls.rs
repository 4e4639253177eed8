//! Portal endpoint derivation.
//!
//! The portal is a single controller distinguished by an `op` query
//! parameter. The location and service-selection operations additionally
//! require the request type code and its URL-encoded catalog description
//! on the query string.

use intake_core::RequestType;

/// Base URL of the City of Chicago legacy web-intake controller.
pub const DEFAULT_BASE_URL: &str =
    "https://servicerequest.cityofchicago.org/web_intake_chic/Controller";

/// The five endpoint URLs driving one workflow, fixed after derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalUrls {
    /// Session bootstrap / reset (`op=locform`)
    pub reset: String,
    /// Location validation (`op=locvalidate`)
    pub set_location: String,
    /// Service selection, source of the per-session form schema (`op=csrform`)
    pub select_service: String,
    /// Review / verification preview (`op=review`)
    pub review: String,
    /// Final submission (`op=csrupdate`)
    pub submit: String,
}

impl PortalUrls {
    /// Derive the endpoint set for one request type.
    ///
    /// `description` is the catalog description for the type; it is
    /// percent-encoded (spaces as `%20`, matching the portal's own links).
    #[must_use]
    pub fn for_request(base_url: &str, request_type: &RequestType, description: &str) -> Self {
        let type_query = format!(
            "&invSRType={}&invSRDesc={}",
            request_type.as_str(),
            urlencoding::encode(description)
        );

        Self {
            reset: format!("{base_url}?op=locform{type_query}&locreq=Y&stnumreqd=Y"),
            set_location: format!("{base_url}?op=locvalidate{type_query}"),
            select_service: format!("{base_url}?op=csrform{type_query}"),
            review: format!("{base_url}?op=review"),
            submit: format!("{base_url}?op=csrupdate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> PortalUrls {
        let request_type = RequestType::new("AAE").expect("valid request type");
        PortalUrls::for_request(DEFAULT_BASE_URL, &request_type, "Water On Street")
    }

    #[test]
    fn test_reset_url() {
        assert_eq!(
            urls().reset,
            "https://servicerequest.cityofchicago.org/web_intake_chic/Controller\
             ?op=locform&invSRType=AAE&invSRDesc=Water%20On%20Street&locreq=Y&stnumreqd=Y"
        );
    }

    #[test]
    fn test_select_service_url_embeds_type_and_description() {
        assert_eq!(
            urls().select_service,
            "https://servicerequest.cityofchicago.org/web_intake_chic/Controller\
             ?op=csrform&invSRType=AAE&invSRDesc=Water%20On%20Street"
        );
    }

    #[test]
    fn test_review_and_submit_urls_carry_no_type() {
        let urls = urls();
        assert!(urls.review.ends_with("?op=review"));
        assert!(urls.submit.ends_with("?op=csrupdate"));
    }

    #[test]
    fn test_custom_base_url() {
        let request_type = RequestType::new("PHF").expect("valid request type");
        let urls = PortalUrls::for_request(
            "http://localhost:8080/intake",
            &request_type,
            "Pot Hole in Street",
        );
        assert_eq!(
            urls.set_location,
            "http://localhost:8080/intake?op=locvalidate&invSRType=PHF&invSRDesc=Pot%20Hole%20in%20Street"
        );
    }
}

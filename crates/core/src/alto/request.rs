//! Outbound header rules for the Alto API
//!
//! Sandbox calls carry only the bearer token. Production calls additionally
//! carry the agency's `X-AgencyRef`, and a production call without one is a
//! configuration error raised before anything is sent.

use altolink_domain::constants::{ADMIN_AGENCIES_PATH, AGENCY_REF_HEADER};
use altolink_domain::{normalize_agency_ref, AltoEnvironment, AltoLinkError, Result};

/// Headers attached to one Alto API call
#[derive(Clone, PartialEq, Eq)]
pub struct AltoRequestHeaders {
    bearer_token: String,
    agency_ref: Option<String>,
}

impl AltoRequestHeaders {
    /// `agency_ref` must already have been resolved for the environment with
    /// [`resolve_agency_ref`].
    pub fn new(bearer_token: impl Into<String>, agency_ref: Option<String>) -> Self {
        Self { bearer_token: bearer_token.into(), agency_ref }
    }

    pub fn agency_ref(&self) -> Option<&str> {
        self.agency_ref.as_deref()
    }

    /// Header name/value pairs in the order they should be applied.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("Authorization", format!("Bearer {}", self.bearer_token)),
            ("Accept", "application/json".to_string()),
            ("Content-Type", "application/json".to_string()),
        ];
        if let Some(agency_ref) = &self.agency_ref {
            pairs.push((AGENCY_REF_HEADER, agency_ref.clone()));
        }
        pairs
    }
}

impl std::fmt::Debug for AltoRequestHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AltoRequestHeaders")
            .field("bearer_token", &"<redacted>")
            .field("agency_ref", &self.agency_ref)
            .finish()
    }
}

/// Decide which agency reference, if any, a call in `environment` carries.
///
/// Sandbox always resolves to `None`, whatever is stored. Production requires
/// a non-blank reference.
///
/// # Errors
/// `AltoLinkError::Config` for a production call without a reference.
pub fn resolve_agency_ref(
    environment: AltoEnvironment,
    agency_ref: Option<&str>,
) -> Result<Option<String>> {
    match environment {
        AltoEnvironment::Sandbox => Ok(None),
        AltoEnvironment::Production => match agency_ref.and_then(normalize_agency_ref) {
            Some(agency_ref) => Ok(Some(agency_ref)),
            None => Err(AltoLinkError::Config(format!(
                "AgencyRef is required for Alto production calls; set it at {ADMIN_AGENCIES_PATH}"
            ))),
        },
    }
}

/// Build the headers for one call.
///
/// # Errors
/// Same as [`resolve_agency_ref`].
pub fn build_headers(
    environment: AltoEnvironment,
    agency_ref: Option<&str>,
    bearer_token: &str,
) -> Result<AltoRequestHeaders> {
    let agency_ref = resolve_agency_ref(environment, agency_ref)?;
    Ok(AltoRequestHeaders::new(bearer_token, agency_ref))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(pairs: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        pairs.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_sandbox_never_sends_agency_ref() {
        let headers = build_headers(AltoEnvironment::Sandbox, Some("ABC123"), "tok").unwrap();
        let pairs = headers.to_pairs();

        assert_eq!(header(&pairs, "Authorization"), Some("Bearer tok"));
        assert_eq!(header(&pairs, AGENCY_REF_HEADER), None);
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_production_sends_agency_ref() {
        let headers = build_headers(AltoEnvironment::Production, Some("ABC123"), "tok").unwrap();
        let pairs = headers.to_pairs();

        assert_eq!(header(&pairs, "X-AgencyRef"), Some("ABC123"));
        assert_eq!(header(&pairs, "Accept"), Some("application/json"));
    }

    #[test]
    fn test_production_trims_agency_ref() {
        let resolved = resolve_agency_ref(AltoEnvironment::Production, Some("  ABC123\n")).unwrap();
        assert_eq!(resolved.as_deref(), Some("ABC123"));
    }

    #[test]
    fn test_production_without_agency_ref_is_config_error() {
        for missing in [None, Some(""), Some("   ")] {
            let err = build_headers(AltoEnvironment::Production, missing, "tok").unwrap_err();
            match err {
                AltoLinkError::Config(message) => {
                    assert!(message.contains("/admin/alto-agencies"));
                }
                other => panic!("expected Config error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_debug_redacts_bearer_token() {
        let headers = AltoRequestHeaders::new("secret-token", None);
        assert!(!format!("{headers:?}").contains("secret-token"));
    }
}

//! Client-credentials token exchange
//!
//! Shapes the `grant_type=client_credentials` form body and interprets the
//! token endpoint's answer. Sending the request is left to the caller so the
//! caller's retry and timeout policy applies.

use std::fmt;

use reqwest::{Response, StatusCode};

use super::types::{OAuthError, TokenResponse, TokenSet};

/// Error type for token exchange operations
#[derive(Debug)]
pub enum OAuthClientError {
    /// HTTP request failed before a response arrived
    RequestFailed(reqwest::Error),

    /// Authorization server rejected the request
    OAuthError { status: StatusCode, error: OAuthError },

    /// Non-success status without a parsable OAuth error body
    UnexpectedStatus { status: StatusCode, body: String },

    /// Failed to parse a success response
    ParseError(String),

    /// Invalid configuration
    ConfigError(String),
}

impl fmt::Display for OAuthClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestFailed(e) => write!(f, "HTTP request failed: {e}"),
            Self::OAuthError { status, error } => write!(f, "OAuth error ({status}): {error}"),
            Self::UnexpectedStatus { status, body } => {
                write!(f, "Token endpoint returned {status}: {body}")
            }
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for OAuthClientError {}

impl From<reqwest::Error> for OAuthClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::RequestFailed(err)
    }
}

/// Client credentials for one token endpoint
#[derive(Clone)]
pub struct ClientCredentials {
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: Option<String>,
}

impl ClientCredentials {
    #[must_use]
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: Option<String>,
    ) -> Self {
        Self {
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: scope.filter(|s| !s.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Reject blank identifiers before any request is made.
    pub fn validate(&self) -> Result<(), OAuthClientError> {
        if self.token_url.trim().is_empty() {
            return Err(OAuthClientError::ConfigError("token URL is empty".to_string()));
        }
        if self.client_id.trim().is_empty() || self.client_secret.trim().is_empty() {
            return Err(OAuthClientError::ConfigError(
                "client id and client secret are required".to_string(),
            ));
        }
        Ok(())
    }

    /// Form body for the `client_credentials` grant.
    #[must_use]
    pub fn form_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("grant_type", "client_credentials".to_string()),
            ("client_id", self.client_id.clone()),
            ("client_secret", self.client_secret.clone()),
        ];
        if let Some(scope) = &self.scope {
            params.push(("scope", scope.clone()));
        }
        params
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

/// Interpret a token endpoint response.
///
/// `default_lifetime_secs` applies when the server does not state
/// `expires_in`.
pub async fn parse_token_response(
    response: Response,
    default_lifetime_secs: i64,
) -> Result<TokenSet, OAuthClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(match serde_json::from_str::<OAuthError>(&body) {
            Ok(error) => OAuthClientError::OAuthError { status, error },
            Err(_) => OAuthClientError::UnexpectedStatus { status, body },
        });
    }

    let token_response: TokenResponse =
        serde_json::from_str(&body).map_err(|e| OAuthClientError::ParseError(e.to_string()))?;

    if token_response.access_token.trim().is_empty() {
        return Err(OAuthClientError::ParseError("empty access_token".to_string()));
    }

    Ok(token_response.into_token_set(default_lifetime_secs))
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn credentials(server: &MockServer) -> ClientCredentials {
        ClientCredentials::new(
            format!("{}/oauth/token", server.uri()),
            "client",
            "secret",
            Some("api".to_string()),
        )
    }

    async fn exchange(creds: &ClientCredentials) -> Result<TokenSet, OAuthClientError> {
        let response =
            reqwest::Client::new().post(creds.token_url()).form(&creds.form_params()).send().await?;
        parse_token_response(response, 3600).await
    }

    #[test]
    fn test_form_params_include_grant_and_scope() {
        let creds = ClientCredentials::new("https://auth", "id", "secret", Some("api".into()));
        let params = creds.form_params();

        assert!(params.contains(&("grant_type", "client_credentials".to_string())));
        assert!(params.contains(&("scope", "api".to_string())));
    }

    #[test]
    fn test_blank_scope_is_omitted() {
        let creds = ClientCredentials::new("https://auth", "id", "secret", Some("  ".into()));
        assert!(creds.form_params().iter().all(|(k, _)| *k != "scope"));
    }

    #[test]
    fn test_validate_rejects_missing_secret() {
        let creds = ClientCredentials::new("https://auth", "id", "", None);
        assert!(matches!(creds.validate(), Err(OAuthClientError::ConfigError(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = ClientCredentials::new("https://auth", "id", "hunter2", None);
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[tokio::test]
    async fn test_successful_exchange() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=client"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-1",
                "token_type": "Bearer",
                "expires_in": 1800
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = exchange(&credentials(&server)).await.unwrap();
        assert_eq!(tokens.access_token, "tok-1");
        assert_eq!(tokens.expires_in, 1800);
    }

    #[tokio::test]
    async fn test_rejected_credentials_surface_oauth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": "invalid_client"
            })))
            .mount(&server)
            .await;

        match exchange(&credentials(&server)).await {
            Err(OAuthClientError::OAuthError { status, error }) => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(error.error, "invalid_client");
            }
            other => panic!("expected OAuthError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = exchange(&credentials(&server)).await.unwrap_err();
        assert!(matches!(err, OAuthClientError::UnexpectedStatus { .. }));
        assert!(err.to_string().contains("maintenance"));
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = exchange(&credentials(&server)).await.unwrap_err();
        assert!(matches!(err, OAuthClientError::ParseError(_)));
    }
}

//! Alto OAuth2 client-credentials token provider
//!
//! Wraps the shared `altolink_common::auth` plumbing with Alto's endpoints.
//! The exchange is attempted once; any failure is an auth error for the
//! caller. Tokens are cached per environment and reused until they come
//! within a minute of expiry.

use std::time::Duration;

use altolink_common::auth::{parse_token_response, ClientCredentials, TokenManager, TokenSet};
use altolink_core::TokenProvider;
use altolink_domain::constants::{DEFAULT_TOKEN_LIFETIME_SECS, TOKEN_REFRESH_MARGIN_SECS};
use altolink_domain::{AltoConfig, AltoEnvironment, AltoLinkError, Result};
use async_trait::async_trait;
use reqwest::Method;
use tracing::{info, warn};

use crate::http::{HttpClient, RetryPolicy};

/// Token provider for the Alto API
pub struct AltoTokenProvider {
    config: AltoConfig,
    http: HttpClient,
    tokens: TokenManager<AltoEnvironment>,
}

impl AltoTokenProvider {
    /// Create a provider with an HTTP client honouring `config.timeout_secs`.
    pub fn new(config: AltoConfig) -> Result<Self> {
        let http = HttpClient::new(Duration::from_secs(config.timeout_secs.max(1)))?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a provider around an existing HTTP client.
    pub fn with_http_client(config: AltoConfig, http: HttpClient) -> Self {
        Self { config, http, tokens: TokenManager::new(TOKEN_REFRESH_MARGIN_SECS) }
    }

    fn credentials(&self, environment: AltoEnvironment) -> ClientCredentials {
        ClientCredentials::new(
            self.config.auth_url(environment),
            self.config.client_id.trim(),
            self.config.client_secret.trim(),
            Some(self.config.scope.clone()),
        )
    }

    async fn exchange(
        &self,
        environment: AltoEnvironment,
        credentials: &ClientCredentials,
    ) -> Result<TokenSet> {
        info!(
            environment = %environment,
            token_url = %credentials.token_url(),
            "requesting alto access token"
        );

        let builder = self
            .http
            .request(Method::POST, credentials.token_url())
            .form(&credentials.form_params());

        let response = self.http.send(builder, RetryPolicy::once()).await.map_err(|e| {
            warn!(environment = %environment, error = %e, "alto token endpoint unreachable");
            AltoLinkError::Auth(format!("token endpoint unreachable: {e}"))
        })?;

        parse_token_response(response, DEFAULT_TOKEN_LIFETIME_SECS).await.map_err(|e| {
            warn!(environment = %environment, error = %e, "alto token request failed");
            AltoLinkError::Auth(format!("token request failed: {e}"))
        })
    }
}

#[async_trait]
impl TokenProvider for AltoTokenProvider {
    async fn access_token(&self, environment: AltoEnvironment) -> Result<String> {
        let credentials = self.credentials(environment);
        credentials.validate().map_err(|e| AltoLinkError::Config(e.to_string()))?;

        self.tokens.get_or_refresh(&environment, || self.exchange(environment, &credentials)).await
    }

    async fn invalidate(&self, environment: AltoEnvironment) {
        self.tokens.invalidate(&environment).await;
    }
}

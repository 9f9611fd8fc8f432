//! Alto listings API client
//!
//! Every call resolves the agency reference for the configured environment
//! before a token is fetched, so a production call without an `AgencyRef`
//! never reaches the network.

use std::sync::Arc;
use std::time::Duration;

use altolink_core::{resolve_agency_ref, AltoApi, AltoRequestHeaders, TokenProvider};
use altolink_domain::constants::ADMIN_AGENCIES_PATH;
use altolink_domain::{
    AltoConfig, AltoEnvironment, AltoLinkError, AltoProperty, PropertyFilter,
    PropertyListResponse, Result,
};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::http::{HttpClient, RetryPolicy};

const MAX_BODY_SNIPPET: usize = 200;

/// HTTP client for the Alto listings API
pub struct AltoApiClient {
    http: HttpClient,
    environment: AltoEnvironment,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
    retry: RetryPolicy,
}

impl AltoApiClient {
    /// Client for the environment selected in `config`.
    pub fn new(config: &AltoConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let http = HttpClient::new(Duration::from_secs(config.timeout_secs.max(1)))?;
        let environment = config.environment;
        Ok(Self::with_http_client(environment, config.api_base_url(environment), http, tokens))
    }

    pub fn with_http_client(
        environment: AltoEnvironment,
        base_url: impl Into<String>,
        http: HttpClient,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, environment, base_url, tokens, retry: RetryPolicy::partner_reads() }
    }

    /// Replace the retry policy used for listing reads.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url` with `segments` appended, each percent-encoded as a single
    /// path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            AltoLinkError::Config(format!("invalid Alto API base URL {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                AltoLinkError::Config(format!("Alto API base URL {} has no path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        agency_ref: Option<&str>,
    ) -> Result<T> {
        let agency_ref = resolve_agency_ref(self.environment, agency_ref)?;
        let url = self.endpoint(segments)?;
        let path = url.path().to_owned();
        let token = self.tokens.access_token(self.environment).await?;
        let headers = AltoRequestHeaders::new(token, agency_ref);

        let mut builder = self.http.request(Method::GET, url.clone()).query(query);
        for (name, value) in headers.to_pairs() {
            builder = builder.header(name, value);
        }

        debug!(
            environment = %self.environment,
            %url,
            agency_ref = ?headers.agency_ref(),
            "calling alto api"
        );

        let response = self.http.send(builder, self.retry).await?;
        let status = response.status();

        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                AltoLinkError::Network(format!("invalid response body from {path}: {e}"))
            });
        }

        let body = response.text().await.unwrap_or_default();
        Err(self.map_failure(status, &path, &body, headers.agency_ref()).await)
    }

    async fn map_failure(
        &self,
        status: StatusCode,
        path: &str,
        body: &str,
        agency_ref: Option<&str>,
    ) -> AltoLinkError {
        let snippet = snippet(body);

        match status {
            StatusCode::UNAUTHORIZED => {
                self.tokens.invalidate(self.environment).await;
                warn!(environment = %self.environment, path, "alto rejected the access token");
                AltoLinkError::Auth(format!("Alto rejected the access token for {path}: {snippet}"))
            }
            StatusCode::NOT_FOUND => AltoLinkError::NotFound(format!("Alto resource {path}")),
            StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN
                if self.environment.is_production() =>
            {
                warn!(
                    environment = %self.environment,
                    path,
                    %status,
                    agency_ref = ?agency_ref,
                    "alto rejected production call"
                );
                AltoLinkError::PartnerRejected(format!(
                    "Alto returned {status} for {path}: {snippet}. Check the agency's AgencyRef \
                     and production toggle at {ADMIN_AGENCIES_PATH}"
                ))
            }
            StatusCode::BAD_REQUEST => {
                AltoLinkError::InvalidInput(format!("Alto returned {status} for {path}: {snippet}"))
            }
            StatusCode::FORBIDDEN => {
                AltoLinkError::Auth(format!("Alto returned {status} for {path}: {snippet}"))
            }
            _ => AltoLinkError::Network(format!("Alto returned {status} for {path}: {snippet}")),
        }
    }
}

#[async_trait]
impl AltoApi for AltoApiClient {
    fn environment(&self) -> AltoEnvironment {
        self.environment
    }

    async fn list_properties(
        &self,
        agency_ref: Option<&str>,
        filter: &PropertyFilter,
    ) -> Result<PropertyListResponse> {
        let mut query = vec![
            ("pageNumber", filter.page.to_string()),
            ("pageSize", filter.page_size.to_string()),
        ];
        if let Some(branch_id) = &filter.branch_id {
            query.push(("branchId", branch_id.clone()));
        }
        if let Some(status) = &filter.status {
            query.push(("status", status.clone()));
        }

        self.get_json(&["properties"], &query, agency_ref).await
    }

    async fn get_property(
        &self,
        property_id: &str,
        agency_ref: Option<&str>,
    ) -> Result<AltoProperty> {
        let property_id = property_id.trim();
        if matches!(property_id, "" | "." | "..") || property_id.contains('/') {
            return Err(AltoLinkError::InvalidInput(format!(
                "invalid property id '{property_id}'"
            )));
        }

        self.get_json(&["properties", property_id], &[], agency_ref).await
    }
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_BODY_SNIPPET) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

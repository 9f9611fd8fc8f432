use std::time::Duration;

use altolink_domain::AltoLinkError;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// Longest `Retry-After` the client will honour before giving up on a retry.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(10);

/// How often a call may be attempted.
///
/// The policy is chosen per call: the token exchange runs once so a broken
/// credential surfaces as an auth error immediately, while partner reads are
/// idempotent and may be retried on transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_backoff: Duration,
}

impl RetryPolicy {
    /// A single attempt, no retries.
    pub const fn once() -> Self {
        Self { max_attempts: 1, base_backoff: Duration::ZERO }
    }

    /// Retries for idempotent GETs against the listings API.
    pub const fn partner_reads() -> Self {
        Self { max_attempts: 3, base_backoff: Duration::from_millis(200) }
    }

    /// Delay before retry number `retry` (1-based), doubling each time.
    fn backoff(&self, retry: usize) -> Duration {
        let shift = u32::try_from(retry.saturating_sub(1).min(8)).unwrap_or(8);
        self.base_backoff.saturating_mul(1u32 << shift)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::once()
    }
}

/// Outbound HTTP for the Alto adapters.
///
/// Wraps one pooled reqwest client; retry behaviour comes from the
/// [`RetryPolicy`] passed to [`HttpClient::send`].
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, AltoLinkError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .user_agent(concat!("altolink/", env!("CARGO_PKG_VERSION")))
            .no_proxy()
            .build()
            .map_err(|err| AltoLinkError::from(InfraError::from(err)))?;
        Ok(Self { client })
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send `builder`, retrying under `policy`.
    ///
    /// Retried: timeouts, connection failures, 429 and 502/503/504. Every
    /// other response, including 500, goes back to the caller unchanged.
    pub async fn send(
        &self,
        builder: RequestBuilder,
        policy: RetryPolicy,
    ) -> Result<Response, AltoLinkError> {
        let attempts = policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| AltoLinkError::Internal("streaming request body cannot be retried".into()))?
                .build()
                .map_err(|err| AltoLinkError::from(InfraError::from(err)))?;
            let method = request.method().clone();
            let url = request.url().clone();
            let last_attempt = attempt >= attempts;

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt, %method, %url, %status, "alto http response");

                    if last_attempt || !is_transient(status) {
                        return Ok(response);
                    }

                    let delay = retry_after(&response).unwrap_or_else(|| policy.backoff(attempt));
                    warn!(attempt, %method, %url, %status, ?delay, "transient response; retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    debug!(attempt, %method, %url, error = %err, "alto http request failed");

                    if last_attempt || !(err.is_timeout() || err.is_connect()) {
                        return Err(AltoLinkError::from(InfraError::from(err)));
                    }
                    tokio::time::sleep(policy.backoff(attempt)).await;
                }
            }

            attempt += 1;
        }
    }
}

fn is_transient(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

/// `Retry-After` given in seconds, capped at [`MAX_RETRY_AFTER`].
fn retry_after(response: &Response) -> Option<Duration> {
    let seconds = response.headers().get(RETRY_AFTER)?.to_str().ok()?.trim().parse::<u64>().ok()?;
    Some(Duration::from_secs(seconds).min(MAX_RETRY_AFTER))
}

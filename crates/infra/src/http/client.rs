use std::time::Duration;

use dancefloor_domain::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use dancefloor_domain::{DanceFloorError, Result};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::InfraError;

const USER_AGENT: &str = concat!("dancefloor/", env!("CARGO_PKG_VERSION"));

/// How often a call is tried, and the pause before the first retry.
/// Later pauses double.
#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    attempts: usize,
    first_delay: Duration,
}

impl RetryPolicy {
    /// Pause after the `attempt`-th failed try (1-based).
    fn delay_after(self, attempt: usize) -> Duration {
        let doublings = attempt.saturating_sub(1).min(8) as u32;
        self.first_delay.saturating_mul(1 << doublings)
    }
}

fn transport(err: reqwest::Error) -> DanceFloorError {
    InfraError::from(err).into()
}

/// HTTP client shared by the auth and REST gateways.
///
/// Only 5xx responses and connect/timeout failures are retried. The default
/// is a single attempt, so POSTs are never replayed unless asked for.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    policy: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Single attempt, default timeout.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub const fn max_attempts(&self) -> usize {
        self.policy.attempts
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        for attempt in 1..=self.policy.attempts {
            let request = builder
                .try_clone()
                .ok_or_else(|| {
                    DanceFloorError::Internal("streaming request bodies cannot be retried".into())
                })?
                .build()
                .map_err(transport)?;
            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt, %method, %url, "HTTP request");

            let can_retry = attempt < self.policy.attempts;
            match self.client.execute(request).await {
                Ok(response) if can_retry && response.status().is_server_error() => {
                    let status = response.status();
                    warn!(attempt, %method, %url, %status, "retrying after server error");
                }
                Ok(response) => {
                    debug!(attempt, %method, %url, status = %response.status(), "HTTP response");
                    return Ok(response);
                }
                Err(err) if can_retry && (err.is_timeout() || err.is_connect()) => {
                    warn!(attempt, %method, %url, error = %err, "retrying after transport failure");
                }
                Err(err) => return Err(transport(err)),
            }

            let delay = self.policy.delay_after(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        Err(DanceFloorError::Internal("HTTP retries exhausted".into()))
    }

    /// Send and read the body as JSON, keeping non-JSON text as a JSON
    /// string. An empty body is `null`.
    pub async fn send_for_body(&self, builder: RequestBuilder) -> Result<(u16, Value)> {
        let response = self.send(builder).await?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport)?;
        debug!(status, bytes = text.len(), "read HTTP response body");
        Ok((status, parse_body(&text)))
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    policy: RetryPolicy,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            policy: RetryPolicy { attempts: 1, first_delay: Duration::from_millis(200) },
        }
    }
}

impl HttpClientBuilder {
    /// Per-call limit covering connect, request and response body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total tries per call, including the first. Clamped to at least one.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.policy.attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.policy.first_delay = backoff;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .no_proxy()
            .build()
            .map_err(transport)?;
        Ok(HttpClient { client, policy: self.policy })
    }
}

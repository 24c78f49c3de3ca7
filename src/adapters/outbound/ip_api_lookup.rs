//! ip-api.com Lookup Service
//!
//! Implements LookupService using the ip-api.com batch endpoint.
//! One POST per batch; the body is a JSON array of `{"query": "<ip>"}` items.
//!
//! See: https://ip-api.com/docs/api:batch

use crate::domain::entities::{LookupRequestItem, LookupResult};
use crate::domain::errors::LookupError;
use crate::domain::ports::LookupService;
use async_trait::async_trait;
use std::time::Duration;

/// Public ip-api.com endpoint.
pub const DEFAULT_ENDPOINT_URL: &str = "http://ip-api.com";

/// Fields requested from the service.
pub const DEFAULT_FIELDS: &str = "query,status,country,city,org,isp";

/// Bytes of an error response body kept in `LookupError::Status`.
const MAX_ERROR_BODY: usize = 256;

/// Configuration for the ip-api.com connection.
#[derive(Debug, Clone)]
pub struct IpApiConfig {
    /// Base URL of the service (e.g., "http://ip-api.com")
    pub endpoint_url: String,
    /// Comma-separated field selection passed as `?fields=`
    pub fields: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for IpApiConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            fields: DEFAULT_FIELDS.to_string(),
            timeout: None,
        }
    }
}

/// ip-api.com backed lookup service.
pub struct IpApiLookupService {
    config: IpApiConfig,
    client: reqwest::Client,
}

impl IpApiLookupService {
    /// Create a lookup service with its own HTTP client.
    pub fn new(config: IpApiConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    /// Create a lookup service sharing an existing HTTP client.
    pub fn with_client(config: IpApiConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// URL of the batch endpoint, without the field selection.
    pub fn batch_url(&self) -> String {
        format!("{}/batch", self.config.endpoint_url.trim_end_matches('/'))
    }
}

/// Read at most `MAX_ERROR_BODY` bytes of an error response.
async fn error_body(mut response: reqwest::Response) -> String {
    let mut buf = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                buf.extend_from_slice(&chunk);
                if buf.len() > MAX_ERROR_BODY {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!("failed to read error response body: {}", e);
                break;
            }
        }
    }

    let truncated = buf.len() > MAX_ERROR_BODY;
    buf.truncate(MAX_ERROR_BODY);
    let mut body = String::from_utf8_lossy(&buf).into_owned();
    if truncated {
        body.push_str("...");
    }
    body
}

#[async_trait]
impl LookupService for IpApiLookupService {
    async fn query(&self, batch: &[LookupRequestItem]) -> Result<Vec<LookupResult>, LookupError> {
        let body = serde_json::to_vec(batch).map_err(|e| LookupError::Encode(e.to_string()))?;

        let mut request = self.client.post(self.batch_url());
        if !self.config.fields.is_empty() {
            request = request.query(&[("fields", self.config.fields.as_str())]);
        }

        let response = request
            .header("content-type", "application/json; charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = error_body(response).await;
            return Err(LookupError::Status { status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        let results: Vec<LookupResult> = serde_json::from_slice(&bytes)?;

        Ok(results)
    }
}

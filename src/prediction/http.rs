//! HTTP transport for the prediction service

use super::{PredictRequest, PredictResponse, PredictionTransport, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_PREDICT_URL: &str = "http://127.0.0.1:8000/predict";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the prediction client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PREDICT_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl PredictionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let url = lookup("MEDIBOT_PREDICT_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PREDICT_URL.to_string());

        let timeout_secs = lookup("MEDIBOT_PREDICT_TIMEOUT_SECS")
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// reqwest-backed prediction client
///
/// No credentials are attached to requests.
pub struct HttpPredictionClient {
    client: Client,
    url: String,
}

impl HttpPredictionClient {
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be built (TLS backend
    /// initialization).
    pub fn new(config: &PredictionConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    fn classify_send_error(e: &reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::timeout(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            TransportError::network(format!("Connection failed: {e}"))
        } else {
            TransportError::unknown(format!("Request failed: {e}"))
        }
    }
}

#[async_trait]
impl PredictionTransport for HttpPredictionClient {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, TransportError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| Self::classify_send_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::timeout(format!("Timed out reading response: {e}"))
            } else {
                TransportError::network(format!("Failed to read response: {e}"))
            }
        })?;

        // 4xx and 5xx are not told apart beyond the recorded status code
        if !status.is_success() {
            return Err(TransportError::status(
                status.as_u16(),
                format!("HTTP {status}: {body}"),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            TransportError::decode(format!("Failed to parse response: {e} - body: {body}"))
        })
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

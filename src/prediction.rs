//! Prediction service client
//!
//! The remote model is a black box reached over HTTP. Everything above this
//! module talks to it through [`PredictionTransport`], so sessions can be
//! driven by a mock in tests.

mod error;
mod http;
mod types;

pub use error::{TransportError, TransportErrorKind};
pub use http::{HttpPredictionClient, PredictionConfig};
pub use types::{PredictRequest, PredictResponse, Prediction};

use async_trait::async_trait;
use std::sync::Arc;

/// Single request/response boundary to the prediction service
#[async_trait]
pub trait PredictionTransport: Send + Sync {
    /// Send normalized symptoms and wait for the service to answer.
    ///
    /// A decoded body is returned as-is, including server-reported errors.
    /// Only network, status and decode failures come back as `Err`.
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, TransportError>;

    /// Where requests are sent (for logging)
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: PredictionTransport + ?Sized> PredictionTransport for Arc<T> {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, TransportError> {
        (**self).predict(request).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for prediction transports
pub struct LoggingTransport {
    inner: Arc<dyn PredictionTransport>,
    endpoint: String,
}

impl LoggingTransport {
    pub fn new(inner: Arc<dyn PredictionTransport>) -> Self {
        let endpoint = inner.endpoint().to_string();
        Self { inner, endpoint }
    }
}

#[async_trait]
impl PredictionTransport for LoggingTransport {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, TransportError> {
        let start = std::time::Instant::now();
        let result = self.inner.predict(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    endpoint = %self.endpoint,
                    duration_ms = %duration.as_millis(),
                    symptoms = request.symptoms.len(),
                    predictions = response.predictions.as_ref().map_or(0, Vec::len),
                    server_error = response.error.is_some(),
                    "Prediction request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.endpoint,
                    duration_ms = %duration.as_millis(),
                    kind = %e.kind,
                    error = %e.message,
                    "Prediction request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

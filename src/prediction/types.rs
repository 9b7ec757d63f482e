//! Wire types for the prediction service

use serde::{Deserialize, Serialize};

/// One candidate diagnosis
///
/// `confidence` is expected in `[0, 1]` but is passed through unchecked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub disease: String,
    pub confidence: f64,
}

impl Prediction {
    pub fn new(disease: impl Into<String>, confidence: f64) -> Self {
        Self {
            disease: disease.into(),
            confidence,
        }
    }

    /// Confidence as a percentage with one decimal place, e.g. `82.0%`
    #[must_use]
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

/// Body of a prediction request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictRequest {
    pub symptoms: Vec<String>,
}

impl PredictRequest {
    pub fn new(symptoms: Vec<String>) -> Self {
        Self { symptoms }
    }
}

/// Decoded response body
///
/// The service answers either `{ "predictions": [...] }` or
/// `{ "error": "..." }`. Both fields are optional here so that a body
/// carrying both, or neither, still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Vec<Prediction>>,
}

impl PredictResponse {
    pub fn with_predictions(predictions: Vec<Prediction>) -> Self {
        Self {
            error: None,
            predictions: Some(predictions),
        }
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            predictions: None,
        }
    }
}

//! Conversation messages and their display form

use crate::prediction::Prediction;
use serde::Serialize;

pub const GREETING: &str =
    "Welcome! Please describe your symptoms in simple terms (e.g., fever, headache, sore throat).";

pub const ANALYSIS_SUMMARY: &str = "Based on your symptoms, here's my analysis:";

pub const RETRY_PROMPT: &str = "I couldn't determine a diagnosis based on those details. \
     Please write correct symptoms and send again.";

pub const CONNECTIVITY_APOLOGY: &str = "I apologize, but I'm having trouble connecting to the \
     diagnosis service. Please try again later or consult a healthcare professional.";

/// How many predictions after the primary one are shown
const OTHER_POSSIBILITIES: usize = 2;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One turn in the conversation
///
/// Fields are private so that only assistant turns can carry predictions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    role: Role,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    predictions: Option<Vec<Prediction>>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            predictions: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            predictions: None,
        }
    }

    pub fn assistant_with_predictions(
        content: impl Into<String>,
        predictions: Vec<Prediction>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            predictions: Some(predictions),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn predictions(&self) -> Option<&[Prediction]> {
        self.predictions.as_deref()
    }

    /// Split predictions into what the chat shows.
    ///
    /// Returns `None` when there is nothing to show. Entries past the third
    /// stay stored on the message but are not part of the view.
    pub fn prediction_view(&self) -> Option<PredictionView<'_>> {
        let (primary, rest) = self.predictions.as_deref()?.split_first()?;
        let others = &rest[..rest.len().min(OTHER_POSSIBILITIES)];
        Some(PredictionView { primary, others })
    }

    /// Serializable form for the chat UI
    pub fn to_view(&self) -> MessageView {
        let view = self.prediction_view();
        MessageView {
            role: self.role,
            content: self.content.clone(),
            primary: view.map(|v| RankedPrediction::from(v.primary)),
            others: view
                .map(|v| v.others.iter().map(RankedPrediction::from).collect())
                .unwrap_or_default(),
        }
    }
}

/// Borrowed split of a message's predictions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionView<'a> {
    pub primary: &'a Prediction,
    pub others: &'a [Prediction],
}

/// A prediction with its confidence formatted for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPrediction {
    pub disease: String,
    pub confidence: f64,
    pub confidence_percent: String,
}

impl From<&Prediction> for RankedPrediction {
    fn from(p: &Prediction) -> Self {
        Self {
            disease: p.disease.clone(),
            confidence: p.confidence,
            confidence_percent: p.confidence_percent(),
        }
    }
}

/// A message as rendered in the chat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageView {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<RankedPrediction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub others: Vec<RankedPrediction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_predictions() -> Vec<Prediction> {
        vec![
            Prediction::new("Flu", 0.82),
            Prediction::new("Cold", 0.51),
            Prediction::new("Allergy", 0.30),
            Prediction::new("X", 0.10),
        ]
    }

    #[test]
    fn test_user_message_has_no_predictions() {
        let msg = Message::user("fever");
        assert_eq!(msg.role(), Role::User);
        assert!(msg.predictions().is_none());
        assert!(msg.prediction_view().is_none());
    }

    #[test]
    fn test_view_shows_primary_and_next_two() {
        let msg = Message::assistant_with_predictions(ANALYSIS_SUMMARY, four_predictions());
        let view = msg.prediction_view().unwrap();
        assert_eq!(view.primary.disease, "Flu");
        let others: Vec<&str> = view.others.iter().map(|p| p.disease.as_str()).collect();
        assert_eq!(others, vec!["Cold", "Allergy"]);

        // The hidden fourth entry is still stored
        assert_eq!(msg.predictions().unwrap().len(), 4);
    }

    #[test]
    fn test_view_with_fewer_predictions() {
        let msg = Message::assistant_with_predictions("", vec![Prediction::new("Flu", 0.9)]);
        let view = msg.prediction_view().unwrap();
        assert_eq!(view.primary.disease, "Flu");
        assert!(view.others.is_empty());

        let msg = Message::assistant_with_predictions("", vec![]);
        assert!(msg.prediction_view().is_none());
    }

    #[test]
    fn test_rendered_view_json() {
        let msg = Message::assistant_with_predictions(ANALYSIS_SUMMARY, four_predictions());
        let json = serde_json::to_value(msg.to_view()).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["primary"]["disease"], "Flu");
        assert_eq!(json["primary"]["confidence_percent"], "82.0%");
        assert_eq!(json["others"].as_array().unwrap().len(), 2);
        assert_eq!(json["others"][1]["disease"], "Allergy");

        let json = serde_json::to_value(Message::user("cough").to_view()).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "user", "content": "cough" }));
    }
}

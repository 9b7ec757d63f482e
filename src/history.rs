//! Diagnosis history
//!
//! One record per successful prediction, kept in memory for the lifetime of
//! the process. Stored oldest first; reports are shown newest first.

use crate::prediction::Prediction;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

/// A completed exchange: the symptoms sent and what came back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub symptoms: Vec<String>,
    pub predictions: Vec<Prediction>,
}

impl DiagnosisEntry {
    /// New entry with a fresh id, stamped now
    pub fn new(symptoms: Vec<String>, predictions: Vec<Prediction>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            symptoms,
            predictions,
        }
    }
}

/// Append-only store of diagnosis entries
pub trait HistorySink: Send + Sync {
    fn append(&self, entry: DiagnosisEntry);

    /// All entries, oldest first
    fn list(&self) -> Vec<DiagnosisEntry>;
}

/// Process-local history
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    entries: RwLock<Vec<DiagnosisEntry>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HistorySink for InMemoryHistory {
    fn append(&self, entry: DiagnosisEntry) {
        tracing::debug!(id = %entry.id, predictions = entry.predictions.len(), "History entry appended");
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    fn list(&self) -> Vec<DiagnosisEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

// ============================================================================
// Reports
// ============================================================================

/// One history entry as shown on the reports page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub id: String,
    pub date: DateTime<Utc>,
    /// e.g. "October 19, 2026, 02:30 PM" in the server's local time
    pub date_display: String,
    pub symptoms: Vec<String>,
    pub analysis: Vec<ReportLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub disease: String,
    pub confidence: String,
}

impl Report {
    /// Render `entry` with its display date in `zone`
    pub fn in_zone<Tz>(entry: &DiagnosisEntry, zone: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            id: entry.id.clone(),
            date: entry.date,
            date_display: entry
                .date
                .with_timezone(zone)
                .format("%B %-d, %Y, %I:%M %p")
                .to_string(),
            symptoms: entry.symptoms.clone(),
            // Reports list every prediction, not just the top three
            analysis: entry
                .predictions
                .iter()
                .map(|p| ReportLine {
                    disease: p.disease.clone(),
                    confidence: p.confidence_percent(),
                })
                .collect(),
        }
    }
}

impl From<&DiagnosisEntry> for Report {
    fn from(entry: &DiagnosisEntry) -> Self {
        Self::in_zone(entry, &Local)
    }
}

/// Render entries newest first, dates in local time
pub fn reports(entries: &[DiagnosisEntry]) -> Vec<Report> {
    entries.iter().rev().map(Report::from).collect()
}

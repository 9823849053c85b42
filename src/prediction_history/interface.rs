use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One ledger entry. Serializes to the persisted column set
/// `Timestamp,Filename,Prediction,Confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(rename = "Timestamp", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Filename")]
    pub filename: String,
    #[serde(rename = "Prediction")]
    pub label: String,
    /// Fraction in [0, 1], rounded to 4 decimal places at append time.
    #[serde(rename = "Confidence")]
    pub confidence: f32,
}

/// The persisted ledger could not be written.
#[derive(Debug, Error)]
#[error("failed to persist prediction history to {path}: {source}")]
pub struct PersistError {
    pub path: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// The persisted ledger could not be parsed. Never surfaced to callers:
/// `load` recovers it to an empty ledger.
#[derive(Debug, Error)]
#[error("prediction history at {path} is corrupt, starting empty: {reason}")]
pub struct HistoryCorruptError {
    pub path: String,
    pub reason: String,
}

/// Append-only, capped, persisted log of past predictions.
///
/// The persisted medium is read-modify-written on every append with no
/// locking, so concurrent appends from separate writers can race and one can
/// be lost. The intended deployment has a single writer; the application loop
/// runs one upload at a time.
pub trait PredictionHistory: Send + Sync {
    /// Reads the persisted ledger. Missing or unparsable state degrades to an
    /// empty ledger, never to an error.
    fn load(&self) -> Vec<PredictionRecord>;

    /// Stamps the current time, appends one record, evicts the oldest records
    /// beyond the cap, persists synchronously, and returns the updated
    /// sequence.
    fn append(
        &self,
        filename: &str,
        label: &str,
        confidence: f32,
    ) -> Result<Vec<PredictionRecord>, PersistError>;

    /// The last `k` records, most recent first. `k` larger than the ledger
    /// returns the whole ledger. Does not mutate.
    fn recent(&self, k: usize) -> Vec<PredictionRecord>;
}

pub fn round_confidence(confidence: f32) -> f32 {
    (confidence * 10_000.0).round() / 10_000.0
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

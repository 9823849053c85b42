use crate::library::logger::interface::Logger;
use crate::prediction_history::interface::{
    round_confidence, PersistError, PredictionHistory, PredictionRecord,
};
use chrono::{Timelike, Utc};
use std::sync::{Arc, Mutex};

/// In-memory ledger with the same cap semantics as the CSV implementation.
#[allow(dead_code)]
pub struct PredictionHistoryFake {
    records: Mutex<Vec<PredictionRecord>>,
    cap: usize,
    timezone: chrono::FixedOffset,
    fail_appends: bool,
    logger: Arc<dyn Logger>,
}

#[allow(dead_code)]
impl PredictionHistoryFake {
    pub fn new(cap: usize, timezone: chrono::FixedOffset, logger: Arc<dyn Logger>) -> Self {
        Self {
            records: Mutex::new(vec![]),
            cap,
            timezone,
            fail_appends: false,
            logger: logger
                .with_namespace("prediction_history")
                .with_namespace("fake"),
        }
    }

    /// Every append fails with a `PersistError`. Used by tests exercising the
    /// persistence-warning path.
    pub fn failing(cap: usize, timezone: chrono::FixedOffset, logger: Arc<dyn Logger>) -> Self {
        Self {
            fail_appends: true,
            ..Self::new(cap, timezone, logger)
        }
    }
}

impl PredictionHistory for PredictionHistoryFake {
    fn load(&self) -> Vec<PredictionRecord> {
        self.records.lock().unwrap().clone()
    }

    fn append(
        &self,
        filename: &str,
        label: &str,
        confidence: f32,
    ) -> Result<Vec<PredictionRecord>, PersistError> {
        if self.fail_appends {
            return Err(PersistError {
                path: "fake".to_string(),
                source: "simulated write failure".into(),
            });
        }

        let mut records = self.records.lock().unwrap();

        let now = Utc::now().with_timezone(&self.timezone).naive_local();
        records.push(PredictionRecord {
            timestamp: now.with_nanosecond(0).unwrap_or(now),
            filename: filename.to_string(),
            label: label.to_string(),
            confidence: round_confidence(confidence),
        });

        if records.len() > self.cap {
            let excess = records.len() - self.cap;
            records.drain(..excess);
        }

        let _ = self
            .logger
            .info(&format!("Recorded {} as {}", filename, label));

        Ok(records.clone())
    }

    fn recent(&self, k: usize) -> Vec<PredictionRecord> {
        self.load().iter().rev().take(k).cloned().collect()
    }
}

use crate::library::logger::interface::Logger;
use crate::prediction_history::interface::{
    round_confidence, HistoryCorruptError, PersistError, PredictionHistory, PredictionRecord,
};
use chrono::{Timelike, Utc};
use std::path::Path;
use std::sync::Arc;

pub const HISTORY_HEADERS: [&str; 4] = ["Timestamp", "Filename", "Prediction", "Confidence"];

pub struct PredictionHistoryCsv {
    path: String,
    cap: usize,
    timezone: chrono::FixedOffset,
    logger: Arc<dyn Logger>,
}

impl PredictionHistoryCsv {
    pub fn new(
        path: String,
        cap: usize,
        timezone: chrono::FixedOffset,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            path,
            cap,
            timezone,
            logger: logger
                .with_namespace("prediction_history")
                .with_namespace("csv"),
        }
    }

    fn load_strict(&self) -> Result<Vec<PredictionRecord>, HistoryCorruptError> {
        if !Path::new(&self.path).exists() {
            return Ok(vec![]);
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| self.corrupt(e.to_string()))?;

        let headers = reader.headers().map_err(|e| self.corrupt(e.to_string()))?;
        if headers.iter().ne(HISTORY_HEADERS) {
            return Err(self.corrupt(format!("unexpected header {:?}", headers)));
        }

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: PredictionRecord = row.map_err(|e| self.corrupt(e.to_string()))?;
            records.push(record);
        }
        Ok(records)
    }

    fn persist(&self, records: &[PredictionRecord]) -> Result<(), PersistError> {
        let mut writer =
            csv::Writer::from_path(&self.path).map_err(|e| self.persist_error(e))?;
        for record in records {
            writer.serialize(record).map_err(|e| self.persist_error(e))?;
        }
        writer.flush().map_err(|e| self.persist_error(e))?;
        Ok(())
    }

    fn corrupt(&self, reason: String) -> HistoryCorruptError {
        HistoryCorruptError {
            path: self.path.clone(),
            reason,
        }
    }

    fn persist_error<E>(&self, source: E) -> PersistError
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        PersistError {
            path: self.path.clone(),
            source: source.into(),
        }
    }
}

impl PredictionHistory for PredictionHistoryCsv {
    fn load(&self) -> Vec<PredictionRecord> {
        match self.load_strict() {
            Ok(records) => records,
            Err(error) => {
                let _ = self.logger.warn(&error.to_string());
                vec![]
            }
        }
    }

    fn append(
        &self,
        filename: &str,
        label: &str,
        confidence: f32,
    ) -> Result<Vec<PredictionRecord>, PersistError> {
        let mut records = self.load();

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

        self.persist(&records)?;

        let _ = self
            .logger
            .info(&format!("Recorded {} as {}", filename, label));

        Ok(records)
    }

    fn recent(&self, k: usize) -> Vec<PredictionRecord> {
        self.load().iter().rev().take(k).cloned().collect()
    }
}

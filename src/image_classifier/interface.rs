use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    /// Fraction in [0, 1]. Converted to a percent string only at the display
    /// boundary.
    pub confidence: f32,
}

/// The model artifact could not be loaded. Returned at construction time so
/// the process halts before accepting any upload.
#[derive(Debug, Error)]
#[error("failed to load model from {path}: {source}")]
pub struct ModelLoadError {
    pub path: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("invalid image input: {0}")]
    InvalidInput(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

pub trait ImageClassifier: Send + Sync {
    /// Classifies the raw bytes of an uploaded JPEG/PNG image. The input is
    /// never mutated; the model is loaded once and reused across calls.
    fn classify(&self, image_bytes: &[u8]) -> Result<Classification, ClassifyError>;
}

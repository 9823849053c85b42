use crate::image_classifier::interface::{Classification, ClassifyError, ImageClassifier};
use crate::library::logger::interface::Logger;
use rand::Rng;
use std::sync::Arc;

#[allow(dead_code)]
pub struct ImageClassifierFake {
    class_names: Vec<String>,
    fixed: Option<Classification>,
    logger: Arc<dyn Logger>,
}

#[allow(dead_code)]
impl ImageClassifierFake {
    pub fn new(class_names: Vec<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            class_names,
            fixed: None,
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
        }
    }

    /// Always returns the given classification. Used by tests that need a
    /// known outcome.
    pub fn with_result(classification: Classification, logger: Arc<dyn Logger>) -> Self {
        Self {
            class_names: vec![],
            fixed: Some(classification),
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, _image_bytes: &[u8]) -> Result<Classification, ClassifyError> {
        let _ = self.logger.info("Classifying image with fake classifier...");

        if let Some(fixed) = &self.fixed {
            return Ok(fixed.clone());
        }

        if self.class_names.is_empty() {
            return Err(ClassifyError::Inference("no labels configured".to_string()));
        }

        let mut rng = rand::rng();
        let index = rng.random_range(0..self.class_names.len());
        let confidence = rng.random_range(0.0..1.0);

        Ok(Classification {
            label: self.class_names[index].clone(),
            confidence,
        })
    }
}

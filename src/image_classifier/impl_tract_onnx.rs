use crate::image_classifier::interface::{
    Classification, ClassifyError, ImageClassifier, ModelLoadError,
};
use crate::image_classifier::model_config::ModelConfig;
use crate::image_classifier::postprocess::{argmax, softmax};
use crate::image_classifier::preprocess::{decode_image, image_to_input_tensor};
use crate::library::logger::interface::Logger;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    config: ModelConfig,
    class_names: Vec<String>,
    logger: Arc<dyn Logger>,
}

impl ImageClassifierTractOnnx {
    /// Loads and optimizes the model once; the plan is reused for every
    /// classify call for the process lifetime.
    pub fn new(
        config: ModelConfig,
        class_names: Vec<String>,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, ModelLoadError> {
        let logger = logger.with_namespace("image_classifier").with_namespace("tract_onnx");

        let _ = logger.info(&format!("Loading model from {}...", config.model_path));

        let model = tract_onnx::onnx()
            .model_for_path(&config.model_path)
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|source| ModelLoadError {
                path: config.model_path.clone(),
                source: source.into(),
            })?;

        let _ = logger.info("Model loaded");

        Ok(Self {
            model,
            config,
            class_names,
            logger,
        })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(&self, image_bytes: &[u8]) -> Result<Classification, ClassifyError> {
        let image = decode_image(image_bytes)?;
        let input = image_to_input_tensor(&image, &self.config);

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;
        let output = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;

        let logits: Vec<f32> = output.iter().copied().collect();
        if logits.len() != self.class_names.len() {
            return Err(ClassifyError::Inference(format!(
                "model produced {} outputs for {} labels",
                logits.len(),
                self.class_names.len()
            )));
        }

        let probabilities = softmax(&logits);
        let index = argmax(&probabilities)
            .ok_or_else(|| ClassifyError::Inference("model produced no outputs".to_string()))?;

        let classification = Classification {
            label: self.class_names[index].clone(),
            confidence: probabilities[index],
        };

        let _ = self.logger.info(&format!(
            "Classified as {} ({:.4})",
            classification.label, classification.confidence
        ));

        Ok(classification)
    }
}

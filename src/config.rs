use crate::image_classifier::model_config::ModelConfig;

#[derive(Debug, Clone)]
pub struct CategoryConfig {
    pub label: String,
    pub description: String,
}

impl CategoryConfig {
    fn new(label: &str, description: &str) -> Self {
        Self {
            label: label.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Waste categories in model output order. The label set is configuration,
    /// not part of the model artifact.
    pub categories: Vec<CategoryConfig>,
    pub model: ModelConfig,
    pub history_path: String,
    pub history_cap: usize,
    pub recent_display_count: usize,
    pub logger_timezone: chrono::FixedOffset,
}

impl Config {
    pub fn class_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.label.clone()).collect()
    }

    pub fn description_for(&self, label: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.description.as_str())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: vec![
                CategoryConfig::new("Plastic", "Plastic bottles, bags, packaging."),
                CategoryConfig::new("Glass", "Bottles and jars."),
                CategoryConfig::new("Metal", "Cans, tins, foils."),
                CategoryConfig::new("Paper", "Newspapers, cardboard, journals."),
                CategoryConfig::new("Organic", "Food scraps and leaves."),
            ],
            model: ModelConfig {
                model_path: "waste_sorter_model.onnx".to_string(),
                input_size: (224, 224),
                normalization: None,
            },
            history_path: "prediction_history.csv".to_string(),
            history_cap: 100,
            recent_display_count: 10,
            logger_timezone: mountain_standard_time(),
        }
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap()
}

use crate::config::Config;
use crate::device_ui::impl_fake::DeviceUiFake;
use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::image_classifier::interface::Classification;
use crate::library::logger::impl_console::LoggerConsole;
use crate::library::logger::interface::Logger;
use crate::prediction_history::impl_fake::PredictionHistoryFake;
use crate::waste_sorter::main::WasteSorter;
use std::sync::Arc;

#[allow(dead_code)]
pub struct Fixture {
    pub config: Config,
    pub device_ui: Arc<DeviceUiFake>,
    pub waste_sorter: WasteSorter,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_classification(Classification {
            label: "Plastic".to_string(),
            confidence: 0.8734,
        })
    }

    pub fn with_classification(classification: Classification) -> Self {
        Self::build(classification, false)
    }

    /// Every append fails, for exercising the save-failed warning path.
    pub fn with_failing_history() -> Self {
        Self::build(
            Classification {
                label: "Plastic".to_string(),
                confidence: 0.8734,
            },
            true,
        )
    }

    fn build(classification: Classification, failing_history: bool) -> Self {
        let config = Config::default();
        let logger: Arc<dyn Logger> = Arc::new(LoggerConsole::new(config.logger_timezone));
        let device_ui = Arc::new(DeviceUiFake::new(logger.clone()));
        let image_classifier = Arc::new(ImageClassifierFake::with_result(
            classification,
            logger.clone(),
        ));
        let prediction_history = Arc::new(if failing_history {
            PredictionHistoryFake::failing(config.history_cap, config.logger_timezone, logger.clone())
        } else {
            PredictionHistoryFake::new(config.history_cap, config.logger_timezone, logger.clone())
        });
        let waste_sorter = WasteSorter::new(
            config.clone(),
            logger,
            device_ui.clone(),
            image_classifier,
            prediction_history,
        );

        Self {
            config,
            device_ui,
            waste_sorter,
        }
    }
}

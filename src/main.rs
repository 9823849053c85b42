use config::Config;
use device_ui::impl_gui::DeviceUiGui;
use image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use prediction_history::impl_csv::PredictionHistoryCsv;
use std::sync::Arc;
use waste_sorter::main::WasteSorter;

mod config;
mod device_ui;
mod image_classifier;
mod library;
mod prediction_history;
mod waste_sorter;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger: Arc<dyn Logger> = Arc::new(LoggerConsole::new(config.logger_timezone));

    // A missing or corrupt model artifact halts the process here, before any
    // upload is accepted
    let image_classifier = Arc::new(ImageClassifierTractOnnx::new(
        config.model.clone(),
        config.class_names(),
        logger.clone(),
    )?);

    let prediction_history = Arc::new(PredictionHistoryCsv::new(
        config.history_path.clone(),
        config.history_cap,
        config.logger_timezone,
        logger.clone(),
    ));

    let device_ui = Arc::new(DeviceUiGui::new(logger.clone()));

    let waste_sorter = WasteSorter::new(
        config,
        logger,
        device_ui,
        image_classifier,
        prediction_history,
    );

    waste_sorter.run()?;

    Ok(())
}

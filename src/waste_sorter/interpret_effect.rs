use crate::waste_sorter::core::{Effect, Event};
use crate::waste_sorter::main::WasteSorter;

impl WasteSorter {
    pub fn interpret_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::SubscribeUi => {
                let events = self.device_ui.events();
                loop {
                    match events.recv() {
                        Ok(event) => {
                            if self.event_sender.send(Event::UiEvent(event)).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
            }
            Effect::LoadHistory => {
                let records = self.prediction_history.load();
                let _ = self.event_sender.send(Event::HistoryLoadDone(records));
            }
            Effect::Classify { upload } => {
                let result = self.image_classifier.classify(&upload.bytes);
                let _ = self.event_sender.send(Event::ClassifyDone(result));
            }
            Effect::Append {
                filename,
                classification,
            } => {
                let result = self.prediction_history.append(
                    &filename,
                    &classification.label,
                    classification.confidence,
                );
                if let Err(error) = &result {
                    let _ = self.logger.warn(&error.to_string());
                }
                let _ = self.event_sender.send(Event::AppendDone(result));
            }
        }
    }
}

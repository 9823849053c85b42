use crate::config::Config;
use crate::device_ui::interface::DeviceUi;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::prediction_history::interface::PredictionHistory;
use crate::waste_sorter::core::{init, transition, Effect, Event, State};
use crate::waste_sorter::render::view;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct WasteSorter {
    pub config: Config,
    pub logger: Arc<dyn Logger>,
    pub device_ui: Arc<dyn DeviceUi>,
    pub image_classifier: Arc<dyn ImageClassifier>,
    pub prediction_history: Arc<dyn PredictionHistory>,
    pub event_sender: Sender<Event>,
    pub event_receiver: Arc<Mutex<Receiver<Event>>>,
}

impl WasteSorter {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger>,
        device_ui: Arc<dyn DeviceUi>,
        image_classifier: Arc<dyn ImageClassifier>,
        prediction_history: Arc<dyn PredictionHistory>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        Self {
            config,
            logger: logger.with_namespace("waste_sorter"),
            device_ui,
            image_classifier,
            prediction_history,
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
        }
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.interpret_effect(effect));
        }
    }

    fn render(&self, state: &State) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let frame = view(&self.config, state);
        self.device_ui.render(&frame)
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.device_ui.start()?;

        let (mut current_state, effects) = init();
        self.render(&current_state)?;
        self.spawn_effects(effects);

        loop {
            match self.event_receiver.lock().unwrap().recv() {
                Ok(event) => {
                    let _ = self
                        .logger
                        .info(&format!("Processing event: {}", event.to_display_string()));

                    let (new_state, new_effects) = transition(current_state, event);
                    current_state = new_state;
                    self.render(&current_state)?;
                    self.spawn_effects(new_effects);
                }
                Err(e) => {
                    return Err(Box::new(e));
                }
            }
        }
    }
}

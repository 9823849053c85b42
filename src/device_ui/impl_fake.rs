use crate::device_ui::interface::{DeviceUi, DeviceUiEvent, ViewFrame};
use crate::library::logger::interface::Logger;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Scripted surface for tests: events are injected through `send_event` and
/// every rendered frame is captured for assertions.
#[allow(dead_code)]
pub struct DeviceUiFake {
    event_sender: Sender<DeviceUiEvent>,
    event_receiver: Mutex<Option<Receiver<DeviceUiEvent>>>,
    rendered: Mutex<Vec<ViewFrame>>,
    logger: Arc<dyn Logger>,
}

#[allow(dead_code)]
impl DeviceUiFake {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        let (event_sender, event_receiver) = channel();
        Self {
            event_sender,
            event_receiver: Mutex::new(Some(event_receiver)),
            rendered: Mutex::new(vec![]),
            logger: logger.with_namespace("device_ui").with_namespace("fake"),
        }
    }

    pub fn send_event(&self, event: DeviceUiEvent) {
        let _ = self.event_sender.send(event);
    }

    pub fn rendered_frames(&self) -> Vec<ViewFrame> {
        self.rendered.lock().unwrap().clone()
    }
}

impl DeviceUi for DeviceUiFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let _ = self.logger.info("Starting fake surface...");
        Ok(())
    }

    fn events(&self) -> Receiver<DeviceUiEvent> {
        self.event_receiver
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| channel().1)
    }

    fn render(&self, frame: &ViewFrame) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.rendered.lock().unwrap().push(frame.clone());
        Ok(())
    }
}

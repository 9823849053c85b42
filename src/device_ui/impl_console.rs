use crate::device_ui::interface::{DeviceUi, DeviceUiEvent, ViewFrame};
use std::sync::mpsc::{channel, Receiver};

/// Render-only stdout surface. Produces no events; useful for running the
/// loop headless.
#[allow(dead_code)]
pub struct DeviceUiConsole {}

#[allow(dead_code)]
impl DeviceUiConsole {
    pub fn new() -> Self {
        Self {}
    }
}

impl DeviceUi for DeviceUiConsole {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }

    fn events(&self) -> Receiver<DeviceUiEvent> {
        channel().1
    }

    fn render(&self, frame: &ViewFrame) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        println!("┌──────── Waste Sorter ────────┐");
        println!("│ {}", frame.status);
        if let Some(result) = &frame.result {
            println!("│ Prediction: {}", result.label);
            println!("│ Confidence: {}", result.confidence);
            println!("│ {}", result.description);
        }
        if let Some(notice) = &frame.notice {
            println!("│ ! {}", notice.text);
        }
        println!("├──────── History ─────────────┤");
        for row in &frame.history {
            println!(
                "│ {}  {}  {}  {}",
                row.timestamp, row.filename, row.label, row.confidence
            );
        }
        println!("└──────────────────────────────┘");
        Ok(())
    }
}

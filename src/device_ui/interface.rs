use std::sync::mpsc::Receiver;

#[derive(Debug, Clone)]
pub enum DeviceUiEvent {
    /// A JPEG/PNG image was dropped onto the surface.
    ImageSelected { filename: String, bytes: Vec<u8> },
    /// The "Clear Image" action. Resets only the pending upload, never the
    /// ledger.
    ClearPressed,
}

/// Everything the surface shows, already formatted for display. Confidence
/// values arrive here as percent strings; the rest of the app works in
/// fractions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewFrame {
    pub status: String,
    pub result: Option<ResultFrame>,
    pub notice: Option<NoticeFrame>,
    pub history: Vec<HistoryRowFrame>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultFrame {
    pub label: String,
    pub confidence: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeFrame {
    pub severity: NoticeSeverity,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeSeverity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRowFrame {
    pub timestamp: String,
    pub filename: String,
    pub label: String,
    pub confidence: String,
}

pub trait DeviceUi: Send + Sync {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn events(&self) -> Receiver<DeviceUiEvent>;
    fn render(&self, frame: &ViewFrame) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

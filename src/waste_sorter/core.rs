use crate::device_ui::interface::DeviceUiEvent;
use crate::image_classifier::interface::{Classification, ClassifyError};
use crate::prediction_history::interface::{PersistError, PredictionRecord};

#[derive(Clone, Debug, PartialEq)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub filename: String,
    pub classification: Classification,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    InvalidImage(String),
    SaveFailed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum State {
    LoadingHistory,
    Ready {
        history: Vec<PredictionRecord>,
        outcome: Option<Outcome>,
        notice: Option<Notice>,
    },
    Classifying {
        history: Vec<PredictionRecord>,
        upload: Upload,
    },
    Recording {
        history: Vec<PredictionRecord>,
        upload: Upload,
        classification: Classification,
    },
}

#[derive(Debug)]
pub enum Event {
    HistoryLoadDone(Vec<PredictionRecord>),
    UiEvent(DeviceUiEvent),
    ClassifyDone(Result<Classification, ClassifyError>),
    AppendDone(Result<Vec<PredictionRecord>, PersistError>),
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::UiEvent(DeviceUiEvent::ImageSelected { filename, .. }) => {
                format!("UiEvent(ImageSelected {{ filename: {:?} }})", filename)
            }
            Event::HistoryLoadDone(records) => {
                format!("HistoryLoadDone({} records)", records.len())
            }
            Event::AppendDone(Ok(records)) => {
                format!("AppendDone(Ok({} records))", records.len())
            }
            event => format!("{:?}", event),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SubscribeUi,
    LoadHistory,
    Classify {
        upload: Upload,
    },
    Append {
        filename: String,
        classification: Classification,
    },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::Classify { upload } => {
                format!("Classify {{ filename: {:?} }}", upload.filename)
            }
            effect => format!("{:?}", effect),
        }
    }
}

pub fn init() -> (State, Vec<Effect>) {
    (
        State::LoadingHistory,
        vec![Effect::SubscribeUi, Effect::LoadHistory],
    )
}

pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match (state, event) {
        (State::LoadingHistory, Event::HistoryLoadDone(history)) => (
            State::Ready {
                history,
                outcome: None,
                notice: None,
            },
            vec![],
        ),

        (
            State::Ready { history, .. },
            Event::UiEvent(DeviceUiEvent::ImageSelected { filename, bytes }),
        ) => {
            let upload = Upload { filename, bytes };
            (
                State::Classifying {
                    history,
                    upload: upload.clone(),
                },
                vec![Effect::Classify { upload }],
            )
        }

        // Clear resets only the pending upload state, never the ledger
        (State::Ready { history, .. }, Event::UiEvent(DeviceUiEvent::ClearPressed)) => (
            State::Ready {
                history,
                outcome: None,
                notice: None,
            },
            vec![],
        ),

        (State::Classifying { history, upload }, Event::ClassifyDone(Ok(classification))) => (
            State::Recording {
                history,
                upload: upload.clone(),
                classification: classification.clone(),
            },
            vec![Effect::Append {
                filename: upload.filename,
                classification,
            }],
        ),

        // Bad input never writes a ledger entry
        (State::Classifying { history, .. }, Event::ClassifyDone(Err(error))) => (
            State::Ready {
                history,
                outcome: None,
                notice: Some(Notice::InvalidImage(error.to_string())),
            },
            vec![],
        ),

        (
            State::Recording {
                upload,
                classification,
                ..
            },
            Event::AppendDone(Ok(history)),
        ) => (
            State::Ready {
                history,
                outcome: Some(Outcome {
                    filename: upload.filename,
                    classification,
                }),
                notice: None,
            },
            vec![],
        ),

        // A failed persist must not hide a successful classification
        (
            State::Recording {
                history,
                upload,
                classification,
            },
            Event::AppendDone(Err(error)),
        ) => (
            State::Ready {
                history,
                outcome: Some(Outcome {
                    filename: upload.filename,
                    classification,
                }),
                notice: Some(Notice::SaveFailed(error.to_string())),
            },
            vec![],
        ),

        // Anything else, including uploads arriving mid-flight, is dropped
        (state, _) => (state, vec![]),
    }
}

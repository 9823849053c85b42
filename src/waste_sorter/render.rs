use crate::config::Config;
use crate::device_ui::interface::{
    HistoryRowFrame, NoticeFrame, NoticeSeverity, ResultFrame, ViewFrame,
};
use crate::image_classifier::interface::Classification;
use crate::prediction_history::interface::PredictionRecord;
use crate::waste_sorter::core::{Notice, State};

pub fn view(config: &Config, state: &State) -> ViewFrame {
    match state {
        State::LoadingHistory => ViewFrame {
            status: "Loading prediction history...".to_string(),
            ..ViewFrame::default()
        },
        State::Classifying { history, upload } => ViewFrame {
            status: format!("Classifying {}...", upload.filename),
            result: None,
            notice: None,
            history: history_rows(config, history),
        },
        State::Recording {
            history,
            upload,
            classification,
        } => ViewFrame {
            status: format!("Saving result for {}...", upload.filename),
            result: Some(result_frame(config, classification)),
            notice: None,
            history: history_rows(config, history),
        },
        State::Ready {
            history,
            outcome,
            notice,
        } => ViewFrame {
            status: match outcome {
                Some(outcome) => format!("Classified {}", outcome.filename),
                None => "Waiting for an image".to_string(),
            },
            result: outcome
                .as_ref()
                .map(|outcome| result_frame(config, &outcome.classification)),
            notice: notice.as_ref().map(notice_frame),
            history: history_rows(config, history),
        },
    }
}

fn result_frame(config: &Config, classification: &Classification) -> ResultFrame {
    ResultFrame {
        label: classification.label.clone(),
        confidence: format_percent(classification.confidence),
        description: config
            .description_for(&classification.label)
            .unwrap_or("")
            .to_string(),
    }
}

fn notice_frame(notice: &Notice) -> NoticeFrame {
    match notice {
        Notice::InvalidImage(detail) => NoticeFrame {
            severity: NoticeSeverity::Error,
            text: format!("Could not read that image: {}", detail),
        },
        Notice::SaveFailed(detail) => NoticeFrame {
            severity: NoticeSeverity::Warning,
            text: format!("Result shown but not saved to history: {}", detail),
        },
    }
}

// Most recent first, capped to the configured display count. Confidence moves
// from fraction to percent here, at the display boundary.
fn history_rows(config: &Config, history: &[PredictionRecord]) -> Vec<HistoryRowFrame> {
    history
        .iter()
        .rev()
        .take(config.recent_display_count)
        .map(|record| HistoryRowFrame {
            timestamp: record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            filename: record.filename.clone(),
            label: record.label.clone(),
            confidence: format_percent(record.confidence),
        })
        .collect()
}

fn format_percent(fraction: f32) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waste_sorter::core::Outcome;
    use chrono::NaiveDate;

    fn record(filename: &str, label: &str, confidence: f32, second: u32) -> PredictionRecord {
        PredictionRecord {
            timestamp: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, second)
                .unwrap(),
            filename: filename.to_string(),
            label: label.to_string(),
            confidence,
        }
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.8734), "87.3%");
        assert_eq!(format_percent(0.55), "55.0%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn test_history_rows_are_newest_first_and_capped() {
        let mut config = Config::default();
        config.recent_display_count = 2;
        let history = vec![
            record("a.jpg", "Plastic", 0.9, 1),
            record("b.jpg", "Glass", 0.8, 2),
            record("c.jpg", "Metal", 0.7, 3),
        ];

        let rows = history_rows(&config, &history);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].filename, "c.jpg");
        assert_eq!(rows[0].confidence, "70.0%");
        assert_eq!(rows[1].filename, "b.jpg");
    }

    #[test]
    fn test_ready_outcome_shows_result_and_description() {
        let config = Config::default();
        let state = State::Ready {
            history: vec![],
            outcome: Some(Outcome {
                filename: "cat.jpg".to_string(),
                classification: Classification {
                    label: "Plastic".to_string(),
                    confidence: 0.8734,
                },
            }),
            notice: None,
        };

        let frame = view(&config, &state);

        assert_eq!(frame.status, "Classified cat.jpg");
        let result = frame.result.unwrap();
        assert_eq!(result.label, "Plastic");
        assert_eq!(result.confidence, "87.3%");
        assert_eq!(result.description, "Plastic bottles, bags, packaging.");
        assert!(frame.notice.is_none());
    }

    #[test]
    fn test_save_failed_keeps_result_with_warning() {
        let config = Config::default();
        let state = State::Ready {
            history: vec![],
            outcome: Some(Outcome {
                filename: "cat.jpg".to_string(),
                classification: Classification {
                    label: "Glass".to_string(),
                    confidence: 0.5,
                },
            }),
            notice: Some(Notice::SaveFailed("disk full".to_string())),
        };

        let frame = view(&config, &state);

        assert!(frame.result.is_some());
        let notice = frame.notice.unwrap();
        assert_eq!(notice.severity, NoticeSeverity::Warning);
        assert!(notice.text.contains("disk full"));
    }

    #[test]
    fn test_invalid_image_notice_is_an_error() {
        let config = Config::default();
        let state = State::Ready {
            history: vec![],
            outcome: None,
            notice: Some(Notice::InvalidImage("bad header".to_string())),
        };

        let frame = view(&config, &state);

        assert!(frame.result.is_none());
        let notice = frame.notice.unwrap();
        assert_eq!(notice.severity, NoticeSeverity::Error);
    }
}

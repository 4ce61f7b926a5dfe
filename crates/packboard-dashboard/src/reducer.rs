//! Pure message reducer
//!
//! `apply_batch` folds one frame into the view state; the run loop draws
//! exactly once afterwards, never per message. Nothing here touches the
//! terminal, so every transition is testable as plain data.

use chrono::Utc;
use packboard_core::{decode_analysis, AnalysisOutcome, Frame, Message, WireError};
use packboard_format::format_build_output;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::state::{DashboardState, PanelState};

/// Apply every message of a frame in array order
pub fn apply_batch(state: &mut DashboardState, frame: &Frame) {
    for message in &frame.messages {
        apply_message(state, message);
    }
    state.last_updated = Some(Utc::now());
}

/// Apply one message to the view state
pub fn apply_message(state: &mut DashboardState, message: &Message) {
    match message {
        Message::Status { value } => state.status = value.clone(),
        Message::Progress { value } => state.progress = value.unwrap_or(0.0),
        Message::Operations { value } => state.operation = value.clone(),
        Message::Stats { value } => {
            state.suppress_logs = value.errors;
            if value.errors {
                state.status = "Failed".to_string();
            }
            // The verdict line is formatted here, not by the producer, so
            // it shows even while raw logs are suppressed.
            append_log(state, &format_build_output(value));
            if !state.minimal {
                state.sizes = PanelState::Loading;
                state.problems = PanelState::Loading;
            }
        }
        Message::Log { value } => {
            if !state.suppress_logs {
                // Braces are style-tag delimiters to some terminal renderers.
                let cleaned: String = value.chars().filter(|c| !matches!(c, '{' | '}')).collect();
                append_log(state, &cleaned);
            }
        }
        Message::Clear => state.log_lines.clear(),
        Message::Sizes { error, value } => {
            state.sizes = decode_panel(*error, value);
            state.clamp_selection();
        }
        Message::Problems { error, value } => {
            state.problems = decode_panel(*error, value);
            state.clamp_selection();
        }
    }
}

fn append_log(state: &mut DashboardState, text: &str) {
    state.log_lines.extend(text.lines().map(String::from));
}

fn decode_panel<T: DeserializeOwned>(error: bool, value: &Value) -> PanelState<Vec<T>> {
    match decode_analysis::<Vec<T>>(error, value) {
        Ok(AnalysisOutcome::Report(reports)) => PanelState::Ready(reports),
        Ok(AnalysisOutcome::Failed(err)) => PanelState::Failed(err),
        Err(err) => PanelState::Failed(WireError::from_error(&err)),
    }
}

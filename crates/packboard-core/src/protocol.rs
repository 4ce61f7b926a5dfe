//! The wire protocol between producer and consumer
//!
//! Every payload travels as `{"type": ..., "value": ..., "error"?: bool}`.
//! Messages are grouped into a `Frame` (an ordered batch applied atomically
//! before one repaint), and the consumer answers each frame with a
//! `Reply::Ack` once the whole batch has been applied. The consumer also
//! sends a single `Reply::Mode` handshake when a producer connects, before
//! any frames are relayed.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::{
    compilation::BuildSummary,
    error::{PackboardError, Result},
    report::{BundleProblems, BundleSizes},
};

/// A single protocol message
///
/// Closed set: unknown `type` strings are a deserialization error rather
/// than a silently dropped message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    /// Build status ("Compiling", "Invalidated", "Failed", "Success", ...)
    Status { value: String },
    /// Compile progress in [0, 1]; `None` renders the same as 0
    Progress { value: Option<f64> },
    /// Current build step, optionally suffixed with elapsed time
    Operations { value: String },
    /// Error/warning flags plus a minimal build summary
    Stats { value: StatsPayload },
    /// Per-bundle size analysis, or a serialized error when `error` is set
    Sizes {
        #[serde(default, skip_serializing_if = "is_false")]
        error: bool,
        value: Value,
    },
    /// Per-bundle duplicate/version analysis, or a serialized error
    Problems {
        #[serde(default, skip_serializing_if = "is_false")]
        error: bool,
        value: Value,
    },
    /// Raw text appended to the scrolling log
    Log { value: String },
    /// Clears the log pane
    Clear,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl Message {
    pub fn status(value: impl Into<String>) -> Self {
        Message::Status {
            value: value.into(),
        }
    }

    pub fn progress(value: f64) -> Self {
        Message::Progress { value: Some(value) }
    }

    pub fn operations(value: impl Into<String>) -> Self {
        Message::Operations {
            value: value.into(),
        }
    }

    pub fn log(value: impl Into<String>) -> Self {
        Message::Log {
            value: value.into(),
        }
    }

    pub fn stats(errors: bool, warnings: bool, data: BuildSummary) -> Self {
        Message::Stats {
            value: StatsPayload {
                errors,
                warnings,
                data,
            },
        }
    }

    /// Build a `sizes` message from analysis reports
    pub fn sizes(reports: &[BundleSizes]) -> Result<Self> {
        Ok(Message::Sizes {
            error: false,
            value: serde_json::to_value(reports)?,
        })
    }

    /// Build a `sizes` message carrying a serialized analysis failure
    pub fn sizes_error(err: &PackboardError) -> Self {
        Message::Sizes {
            error: true,
            value: WireError::from_error(err).to_value(),
        }
    }

    /// Build a `problems` message from analysis reports
    pub fn problems(reports: &[BundleProblems]) -> Result<Self> {
        Ok(Message::Problems {
            error: false,
            value: serde_json::to_value(reports)?,
        })
    }

    /// Build a `problems` message carrying a serialized analysis failure
    pub fn problems_error(err: &PackboardError) -> Self {
        Message::Problems {
            error: true,
            value: WireError::from_error(err).to_value(),
        }
    }
}

/// Payload of a `stats` message
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsPayload {
    /// Did the build report errors?
    pub errors: bool,
    /// Did the build report warnings?
    pub warnings: bool,
    /// Minimal summary (message strings only, never full module trees)
    #[serde(default)]
    pub data: BuildSummary,
}

/// Outcome of decoding a `sizes`/`problems` payload
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome<T> {
    /// Normal analysis result
    Report(T),
    /// The producer's analysis failed; reconstructed error follows
    Failed(WireError),
}

/// Decode an analysis payload, honoring the message's `error` flag
pub fn decode_analysis<T: DeserializeOwned>(
    error: bool,
    value: &Value,
) -> Result<AnalysisOutcome<T>> {
    if error {
        let err: WireError = serde_json::from_value(value.clone())?;
        Ok(AnalysisOutcome::Failed(err))
    } else {
        Ok(AnalysisOutcome::Report(serde_json::from_value(
            value.clone(),
        )?))
    }
}

/// An ordered batch of messages, applied atomically before one repaint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Sequence number echoed back in the acknowledgment
    pub seq: u64,
    pub messages: Vec<Message>,
}

impl Frame {
    pub fn new(seq: u64, messages: Vec<Message>) -> Self {
        Self { seq, messages }
    }
}

/// Consumer-to-producer traffic: one handshake, then acknowledgments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Reply {
    /// Sent exactly once per connection, before any frame is relayed
    Mode { value: Handshake },
    /// The frame with this sequence number has been fully applied
    Ack { seq: u64 },
}

/// Mode flags the consumer tells each connecting producer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Handshake {
    pub minimal: bool,
    /// Asset names to limit analysis to (literal prefix or glob pattern)
    #[serde(default)]
    pub include_assets: Vec<String>,
}

/// An error serialized for the wire
///
/// Errors cross the process boundary as plain data; the consumer
/// reconstructs them before handing them to a panel. `message` and `stack`
/// survive a round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl WireError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Serialize a local error for transmission
    pub fn from_error(err: &PackboardError) -> Self {
        Self {
            code: None,
            message: err.to_string(),
            stack: None,
        }
    }

    fn to_value(&self) -> Value {
        // WireError serialization cannot fail: all fields are strings.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for WireError {}

impl From<WireError> for PackboardError {
    fn from(err: WireError) -> Self {
        PackboardError::Analysis(err.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_shape() {
        let msg = Message::status("Compiling");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "status");
        assert_eq!(json["value"], "Compiling");

        let clear = serde_json::to_value(&Message::Clear).unwrap();
        assert_eq!(clear["type"], "clear");
        assert!(clear.get("value").is_none());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: std::result::Result<Message, _> =
            serde_json::from_str(r#"{"type":"bogus","value":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_progress_accepts_null() {
        let msg: Message = serde_json::from_str(r#"{"type":"progress","value":null}"#).unwrap();
        assert_eq!(msg, Message::Progress { value: None });
    }

    #[test]
    fn test_stats_with_empty_data() {
        let msg: Message = serde_json::from_str(
            r#"{"type":"stats","value":{"errors":false,"warnings":false,"data":{}}}"#,
        )
        .unwrap();
        match msg {
            Message::Stats { value } => {
                assert!(!value.errors);
                assert!(value.data.errors.is_empty());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_error_flag_omitted_when_false() {
        let msg = Message::sizes(&[]).unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_wire_error_round_trip() {
        let original = WireError::new("sizes blew up").with_stack("at analyze (sizes.rs:42)");
        let wire = serde_json::to_string(&original).unwrap();
        let restored: WireError = serde_json::from_str(&wire).unwrap();
        assert_eq!(restored.message, original.message);
        assert_eq!(restored.stack, original.stack);
    }

    #[test]
    fn test_decode_analysis_failure() {
        let err = PackboardError::Analysis("no manifest".into());
        let msg = Message::problems_error(&err);
        match msg {
            Message::Problems { error, value } => {
                let outcome: AnalysisOutcome<Vec<BundleProblems>> =
                    decode_analysis(error, &value).unwrap();
                match outcome {
                    AnalysisOutcome::Failed(wire) => {
                        assert!(wire.message.contains("no manifest"));
                    }
                    AnalysisOutcome::Report(_) => panic!("expected failure"),
                }
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_reply_handshake_shape() {
        let reply = Reply::Mode {
            value: Handshake {
                minimal: true,
                include_assets: vec!["main".into()],
            },
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["type"], "mode");
        assert_eq!(json["value"]["minimal"], true);
    }
}

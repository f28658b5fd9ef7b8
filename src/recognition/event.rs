use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single update from the recognition source
///
/// `transcript` is the recognizer's current best hypothesis for the latest
/// utterance; it may replace, not extend, the previous hypothesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentEvent {
    pub transcript: String,

    /// Monotonic milliseconds at which the event was received
    pub timestamp_ms: u64,
}

impl FragmentEvent {
    pub fn new(transcript: impl Into<String>, timestamp_ms: u64) -> Self {
        Self {
            transcript: transcript.into(),
            timestamp_ms,
        }
    }
}

/// Errors surfaced by the recognition source
///
/// The string forms follow the codes speech recognizers commonly report.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecognitionError {
    #[error("microphone permission denied")]
    NotAllowed,
    #[error("no speech detected")]
    NoSpeech,
    #[error("audio capture failed")]
    AudioCapture,
    #[error("network error")]
    Network,
    #[error("recognition aborted")]
    Aborted,
    #[error("speech recognition not supported")]
    NotSupported,
    #[error("{0}")]
    Other(String),
}

impl RecognitionError {
    /// Parse a recognizer error code such as `"no-speech"`
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-allowed" | "service-not-allowed" => Self::NotAllowed,
            "no-speech" => Self::NoSpeech,
            "audio-capture" => Self::AudioCapture,
            "network" => Self::Network,
            "aborted" => Self::Aborted,
            "not-supported" => Self::NotSupported,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Everything the recognition source can deliver on its channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecognitionEvent {
    /// New or revised hypothesis
    Fragment(FragmentEvent),

    /// Recognizer failure; does not end the session by itself
    Error { error: RecognitionError },

    /// Explicit termination, distinct from a mid-speech pause
    End,
}

impl From<FragmentEvent> for RecognitionEvent {
    fn from(event: FragmentEvent) -> Self {
        RecognitionEvent::Fragment(event)
    }
}

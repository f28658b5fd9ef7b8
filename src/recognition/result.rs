use super::event::FragmentEvent;
use serde::{Deserialize, Serialize};

/// One ranked hypothesis for a recognition result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub transcript: String,

    /// Confidence score (0.0 to 1.0), if available
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// A recognizer result: ranked alternatives, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub alternatives: Vec<Alternative>,

    /// Whether the recognizer considers this result final
    #[serde(default)]
    pub is_final: bool,
}

impl RecognitionResult {
    pub fn best(&self) -> Option<&Alternative> {
        self.alternatives.first()
    }
}

/// Build a fragment from a recognizer's full result list
///
/// Continuous recognizers report every result of the session so far; the
/// fragment text is the top alternative of each, concatenated without a
/// separator. Results with no alternatives contribute nothing.
pub fn fragment_from_results(results: &[RecognitionResult], timestamp_ms: u64) -> FragmentEvent {
    let transcript: String = results
        .iter()
        .filter_map(|r| r.best())
        .map(|alt| alt.transcript.as_str())
        .collect();

    FragmentEvent {
        transcript,
        timestamp_ms,
    }
}

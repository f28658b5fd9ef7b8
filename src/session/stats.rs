use crate::recognition::RecognitionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about a live session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: String,

    /// Whether the session is still consuming events
    pub is_active: bool,

    /// When the session started
    pub started_at: DateTime<Utc>,

    /// Total duration in seconds
    pub duration_secs: f64,

    /// Fragments received from the recognition source
    pub fragments_received: usize,

    /// Lines opened in the transcript
    pub lines_opened: usize,

    /// Revisions applied to open lines
    pub revisions_applied: usize,

    /// Updates dropped because a newer revision superseded them
    pub updates_discarded: usize,

    /// Errors reported by the recognition source
    pub recognition_errors: usize,

    /// Most recent recognition error, if any
    pub last_error: Option<RecognitionError>,
}

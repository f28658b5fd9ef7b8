use crate::segmentation::SegmenterConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a live translation session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "session-2f1c...")
    pub session_id: String,

    /// Pause-based segmentation settings
    pub segmenter: SegmenterConfig,

    /// How long a translation may take before the original text is used
    /// Default: 2 seconds
    pub translation_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            segmenter: SegmenterConfig::default(),
            translation_timeout: Duration::from_secs(2),
        }
    }
}

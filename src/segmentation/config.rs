use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Default pause that separates two utterances
///
/// A gap strictly greater than this starts a new line; a gap exactly equal
/// to it is still a revision of the open line.
pub const PAUSE_THRESHOLD_MS: u64 = 1000;

/// Smallest accepted configured pause
pub const MIN_PAUSE_THRESHOLD_MS: u64 = 1000;

/// Largest accepted configured pause
pub const MAX_PAUSE_THRESHOLD_MS: u64 = 1400;

/// Configuration for the segmentation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Maximum gap between fragments still considered the same utterance
    /// Default: 1000 ms
    pub pause_threshold_ms: u64,
}

impl SegmenterConfig {
    pub fn with_pause_threshold(pause_threshold_ms: u64) -> Self {
        Self { pause_threshold_ms }
    }

    /// Reject thresholds outside the tuned range
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PAUSE_THRESHOLD_MS..=MAX_PAUSE_THRESHOLD_MS).contains(&self.pause_threshold_ms) {
            bail!(
                "pause_threshold_ms must be between {} and {}, got {}",
                MIN_PAUSE_THRESHOLD_MS,
                MAX_PAUSE_THRESHOLD_MS,
                self.pause_threshold_ms
            );
        }
        Ok(())
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            pause_threshold_ms: PAUSE_THRESHOLD_MS,
        }
    }
}

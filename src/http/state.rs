use crate::buffer::Snapshot;
use crate::recognition::FragmentSender;
use crate::segmentation::SegmenterConfig;
use crate::session::LiveSession;
use crate::translate::DEFAULT_TRANSLATION_SUFFIX;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// The single session driven over HTTP and the handle that feeds it
pub struct ActiveSession {
    pub session: LiveSession,
    pub sender: FragmentSender,
}

/// Settings applied to every session started over HTTP
#[derive(Debug, Clone)]
pub struct SessionDefaults {
    pub segmenter: SegmenterConfig,
    pub translation_suffix: String,
    pub translation_timeout: Duration,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            segmenter: SegmenterConfig::default(),
            translation_suffix: DEFAULT_TRANSLATION_SUFFIX.to_string(),
            translation_timeout: Duration::from_secs(2),
        }
    }
}

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Currently running session (at most one)
    pub session: Arc<RwLock<Option<Arc<ActiveSession>>>>,

    /// Final transcript of the last stopped session
    pub last_snapshot: Arc<RwLock<Snapshot>>,

    pub defaults: SessionDefaults,
}

impl AppState {
    pub fn new(defaults: SessionDefaults) -> Self {
        Self {
            session: Arc::new(RwLock::new(None)),
            last_snapshot: Arc::new(RwLock::new(Snapshot::default())),
            defaults,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SessionDefaults::default())
    }
}

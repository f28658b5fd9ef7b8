pub mod buffer;
pub mod config;
pub mod error;
pub mod http;
pub mod recognition;
pub mod segmentation;
pub mod session;
pub mod translate;

pub use buffer::{DualBuffer, Line, LineState, Snapshot};
pub use config::Config;
pub use error::TranscriptError;
pub use http::{create_router, AppState, SessionDefaults};
pub use recognition::{
    ChannelSource, FragmentEvent, FragmentSender, RecognitionError, RecognitionEvent,
    RecognitionSource, ScriptedSource,
};
pub use segmentation::{
    BufferOp, LineUpdate, SegmentationEngine, SegmenterConfig, UpdateKind, PAUSE_THRESHOLD_MS,
};
pub use session::{LiveSession, SessionConfig, SessionStats};
pub use translate::{
    BlockingBackend, IdentityTranslator, SuffixTranslator, TranslationBackend, Translator,
};

//! Pause-based segmentation of recognizer fragments into lines
//!
//! This module provides the `SegmentationEngine`, which:
//! - Owns the per-session state (last fragment time, open line)
//! - Decides between "revise the open line" and "start a new line"
//! - Applies the resulting operations to the `DualBuffer`

mod config;
mod engine;
mod state;

pub use config::{
    SegmenterConfig, MAX_PAUSE_THRESHOLD_MS, MIN_PAUSE_THRESHOLD_MS, PAUSE_THRESHOLD_MS,
};
pub use engine::{BufferOp, EngineStats, LineUpdate, SegmentationEngine, UpdateKind};
pub use state::SessionState;

//! Live session management
//!
//! This module provides the `LiveSession` abstraction that manages:
//! - Recognition source lifecycle
//! - In-order, single-consumer processing of recognition events
//! - Asynchronous translation with ordered commits
//! - Session statistics and state management

mod config;
mod queue;
mod session;
mod stats;

pub use config::SessionConfig;
pub use queue::TranslationQueue;
pub use session::LiveSession;
pub use stats::SessionStats;

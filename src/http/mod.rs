//! HTTP API for driving a live session from a browser or bridge process
//!
//! This module provides a REST API around a single `LiveSession`:
//! - POST /session/start - Start listening
//! - POST /session/fragment - Push a recognizer hypothesis
//! - POST /session/error - Report a recognizer error
//! - POST /session/stop - Stop and return the final transcript
//! - GET /session/snapshot - Both transcript columns
//! - GET /session/status - Session statistics
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::{ActiveSession, AppState, SessionDefaults};

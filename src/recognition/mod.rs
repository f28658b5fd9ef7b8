//! Recognition source abstractions
//!
//! The speech recognizer itself is external. This module defines what it
//! delivers (fragments, errors, an end signal) and the sources that feed
//! those events into a session:
//! - `ChannelSource`: events pushed by a caller
//! - `ScriptedSource`: replay of a JSON-lines script

mod channel;
mod event;
mod result;
mod scripted;
mod source;

pub use channel::{ChannelSource, FragmentSender};
pub use event::{FragmentEvent, RecognitionError, RecognitionEvent};
pub use result::{fragment_from_results, Alternative, RecognitionResult};
pub use scripted::ScriptedSource;
pub use source::{RecognitionSource, EVENT_CHANNEL_CAPACITY};

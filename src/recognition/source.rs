use super::event::RecognitionEvent;
use anyhow::Result;
use tokio::sync::mpsc;

/// Channel capacity used by the bundled sources
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Recognition source trait
///
/// A source delivers its events in timestamp order on a single channel and
/// ends the stream with [`RecognitionEvent::End`] (or by closing the channel).
///
/// Implementations:
/// - [`super::ChannelSource`]: events pushed by a caller-held sender
/// - [`super::ScriptedSource`]: replay of a recorded JSON-lines script
#[async_trait::async_trait]
pub trait RecognitionSource: Send + Sync {
    /// Start listening
    ///
    /// Returns a channel receiver that will receive recognition events
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>>;

    /// Stop listening; the event channel closes afterwards
    async fn stop(&mut self) -> Result<()>;

    /// Check if the source is currently listening
    fn is_listening(&self) -> bool;

    /// Get source name for logging
    fn name(&self) -> &str;
}

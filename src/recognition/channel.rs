use super::event::{FragmentEvent, RecognitionError, RecognitionEvent};
use super::source::{RecognitionSource, EVENT_CHANNEL_CAPACITY};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::time::Instant;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

#[derive(Default)]
struct Shared {
    tx: Option<mpsc::Sender<RecognitionEvent>>,
    started: Option<Instant>,
}

/// Recognition source fed by an external producer
///
/// The producer (an HTTP handler, a test, a bridge to a real recognizer)
/// holds a [`FragmentSender`] and pushes events while the source listens.
pub struct ChannelSource {
    shared: Arc<Mutex<Shared>>,
    listening: bool,
}

/// Producer half of a [`ChannelSource`]
#[derive(Clone)]
pub struct FragmentSender {
    shared: Arc<Mutex<Shared>>,
}

impl ChannelSource {
    pub fn new() -> (Self, FragmentSender) {
        let shared = Arc::new(Mutex::new(Shared::default()));
        (
            Self {
                shared: Arc::clone(&shared),
                listening: false,
            },
            FragmentSender { shared },
        )
    }
}

#[async_trait::async_trait]
impl RecognitionSource for ChannelSource {
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        {
            let mut shared = self.shared.lock().await;
            shared.tx = Some(tx);
            shared.started = Some(Instant::now());
        }

        self.listening = true;
        info!("Channel source listening");
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        // Dropping the sender closes the channel once buffered events drain
        self.shared.lock().await.tx = None;
        self.listening = false;
        info!("Channel source stopped");
        Ok(())
    }

    fn is_listening(&self) -> bool {
        self.listening
    }

    fn name(&self) -> &str {
        "channel"
    }
}

impl FragmentSender {
    /// Push any recognition event
    pub async fn send(&self, event: RecognitionEvent) -> Result<()> {
        let tx = self
            .shared
            .lock()
            .await
            .tx
            .clone()
            .context("Recognition source is not listening")?;

        tx.send(event)
            .await
            .context("Recognition event channel closed")?;
        Ok(())
    }

    /// Push a fragment, stamping it with the time since `start()` when no
    /// timestamp is given
    pub async fn send_fragment(
        &self,
        transcript: impl Into<String>,
        timestamp_ms: Option<u64>,
    ) -> Result<FragmentEvent> {
        let timestamp_ms = match timestamp_ms {
            Some(ts) => ts,
            None => self.elapsed_ms().await,
        };

        let event = FragmentEvent::new(transcript, timestamp_ms);
        debug!("Pushing fragment at {}ms", event.timestamp_ms);
        self.send(RecognitionEvent::Fragment(event.clone())).await?;
        Ok(event)
    }

    pub async fn send_error(&self, error: RecognitionError) -> Result<()> {
        self.send(RecognitionEvent::Error { error }).await
    }

    /// Signal the end of recognition
    pub async fn end(&self) -> Result<()> {
        self.send(RecognitionEvent::End).await
    }

    /// Milliseconds since the source started listening (0 if not started)
    pub async fn elapsed_ms(&self) -> u64 {
        self.shared
            .lock()
            .await
            .started
            .map(|s| s.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }
}

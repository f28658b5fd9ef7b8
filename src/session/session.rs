use super::config::SessionConfig;
use super::queue::TranslationQueue;
use super::stats::SessionStats;
use crate::buffer::Snapshot;
use crate::recognition::{RecognitionError, RecognitionEvent, RecognitionSource};
use crate::segmentation::SegmentationEngine;
use crate::translate::{IdentityTranslator, TranslationBackend};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// A live session: recognition events in, paired transcript lines out
///
/// Events are consumed by a single task, one at a time and in arrival
/// order. Translations may complete out of order; their buffer updates are
/// still committed in fragment order.
pub struct LiveSession {
    /// Session configuration
    config: SessionConfig,

    /// Segmentation engine and its line buffer
    engine: Arc<Mutex<SegmentationEngine>>,

    /// Where recognition events come from
    source: Mutex<Box<dyn RecognitionSource>>,

    /// Translation backend for each line update
    translator: Arc<dyn TranslationBackend>,

    /// When the session started
    started_at: Mutex<DateTime<Utc>>,

    /// When the session finished, if it has
    stopped_at: Mutex<Option<DateTime<Utc>>>,

    /// Whether the event loop is still consuming events
    is_active: Arc<AtomicBool>,

    /// Number of recognition errors seen
    recognition_errors: Arc<AtomicUsize>,

    /// Most recent recognition error
    last_error: Arc<Mutex<Option<RecognitionError>>>,

    /// Handle for the event processing task
    event_task_handle: Mutex<Option<JoinHandle<()>>>,
}

impl LiveSession {
    /// Create a new live session
    pub fn new(
        config: SessionConfig,
        source: Box<dyn RecognitionSource>,
        translator: Arc<dyn TranslationBackend>,
    ) -> Self {
        info!(
            "Creating live session: {} (source={}, translator={})",
            config.session_id,
            source.name(),
            translator.name()
        );

        // Translation happens in the queue; the engine only segments and applies
        let engine = SegmentationEngine::new(config.segmenter, IdentityTranslator);

        Self {
            config,
            engine: Arc::new(Mutex::new(engine)),
            source: Mutex::new(source),
            translator,
            started_at: Mutex::new(Utc::now()),
            stopped_at: Mutex::new(None),
            is_active: Arc::new(AtomicBool::new(false)),
            recognition_errors: Arc::new(AtomicUsize::new(0)),
            last_error: Arc::new(Mutex::new(None)),
            event_task_handle: Mutex::new(None),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    /// Start listening and processing events
    pub async fn start(&self) -> Result<()> {
        if self.is_active.load(Ordering::SeqCst) {
            warn!("Session already started");
            return Ok(());
        }

        info!("Starting live session: {}", self.config.session_id);

        self.engine
            .lock()
            .await
            .start()
            .context("Failed to start segmentation")?;

        *self.started_at.lock().await = Utc::now();
        *self.stopped_at.lock().await = None;
        *self.last_error.lock().await = None;
        self.recognition_errors.store(0, Ordering::SeqCst);

        let started = self.source.lock().await.start().await;
        let event_rx = match started {
            Ok(rx) => rx,
            Err(e) => {
                self.engine.lock().await.stop();
                return Err(e.context("Failed to start recognition source"));
            }
        };

        self.is_active.store(true, Ordering::SeqCst);

        let queue = TranslationQueue::new(
            Arc::clone(&self.translator),
            self.config.translation_timeout,
        );
        let event_task = tokio::spawn(Self::run_events(
            event_rx,
            queue,
            Arc::clone(&self.engine),
            Arc::clone(&self.is_active),
            Arc::clone(&self.recognition_errors),
            Arc::clone(&self.last_error),
        ));

        *self.event_task_handle.lock().await = Some(event_task);

        info!("Live session started successfully");
        Ok(())
    }

    /// Stop the session
    ///
    /// Pending translations are drained before the open line is closed.
    /// Safe to call when the session is not active.
    pub async fn stop(&self) -> Result<SessionStats> {
        let handle = self.event_task_handle.lock().await.take();

        let Some(task) = handle else {
            debug!("Session not active");
            return Ok(self.stats().await);
        };

        info!("Stopping live session: {}", self.config.session_id);

        self.stop_source().await;
        self.finish(task).await
    }

    /// Wait for the recognition source to end the session on its own
    pub async fn wait(&self) -> Result<SessionStats> {
        let handle = self.event_task_handle.lock().await.take();

        match handle {
            Some(task) => self.finish(task).await,
            None => Ok(self.stats().await),
        }
    }

    async fn stop_source(&self) {
        let mut source = self.source.lock().await;
        if let Err(e) = source.stop().await {
            error!("Failed to stop recognition source: {}", e);
        }
    }

    async fn finish(&self, task: JoinHandle<()>) -> Result<SessionStats> {
        // The loop exits once the source ends or its channel closes
        if let Err(e) = task.await {
            error!("Event task panicked: {}", e);
        }

        self.stop_source().await;
        self.engine.lock().await.stop();
        self.is_active.store(false, Ordering::SeqCst);
        *self.stopped_at.lock().await = Some(Utc::now());

        info!("Live session stopped successfully");
        Ok(self.stats().await)
    }

    /// Current view of both transcript columns
    pub async fn snapshot(&self) -> Snapshot {
        self.engine.lock().await.snapshot()
    }

    /// Most recent error reported by the recognition source
    pub async fn last_error(&self) -> Option<RecognitionError> {
        self.last_error.lock().await.clone()
    }

    pub fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }

    /// Get current session statistics
    ///
    /// The duration stops growing once the session has finished.
    pub async fn stats(&self) -> SessionStats {
        let started_at = *self.started_at.lock().await;
        let ended_at = self.stopped_at.lock().await.unwrap_or_else(Utc::now);
        let duration = ended_at.signed_duration_since(started_at);
        let engine_stats = self.engine.lock().await.stats();

        SessionStats {
            session_id: self.config.session_id.clone(),
            is_active: self.is_active(),
            started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            fragments_received: engine_stats.fragments_received,
            lines_opened: engine_stats.lines_opened,
            revisions_applied: engine_stats.revisions_applied,
            updates_discarded: engine_stats.updates_discarded,
            recognition_errors: self.recognition_errors.load(Ordering::SeqCst),
            last_error: self.last_error().await,
        }
    }

    /// Single consumer of recognition events
    async fn run_events(
        mut event_rx: mpsc::Receiver<RecognitionEvent>,
        mut queue: TranslationQueue,
        engine: Arc<Mutex<SegmentationEngine>>,
        is_active: Arc<AtomicBool>,
        recognition_errors: Arc<AtomicUsize>,
        last_error: Arc<Mutex<Option<RecognitionError>>>,
    ) {
        info!("Event processing task started");
        let mut input_done = false;

        loop {
            tokio::select! {
                event = event_rx.recv(), if !input_done => match event {
                    Some(RecognitionEvent::Fragment(fragment)) => {
                        if let Some(update) = engine.lock().await.segment(fragment) {
                            queue.push(update);
                        }
                    }
                    Some(RecognitionEvent::Error { error }) => {
                        warn!("Error occurred in recognition: {}", error);
                        recognition_errors.fetch_add(1, Ordering::SeqCst);
                        *last_error.lock().await = Some(error);
                    }
                    Some(RecognitionEvent::End) | None => {
                        debug!("Recognition input finished, draining {} translations", queue.len());
                        input_done = true;
                    }
                },
                Some((update, translated)) = queue.next(), if !queue.is_empty() => {
                    let mut engine = engine.lock().await;
                    if queue.is_superseded(&update) {
                        engine.discard(&update, "superseded by newer revision");
                        continue;
                    }
                    if let Err(e) = engine.apply(update, translated) {
                        error!("Failed to apply line update: {}", e);
                    }
                }
                else => break,
            }
        }

        engine.lock().await.stop();
        is_active.store(false, Ordering::SeqCst);
        info!("Event processing task stopped");
    }
}

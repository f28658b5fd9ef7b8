use super::config::SegmenterConfig;
use super::state::SessionState;
use crate::buffer::{DualBuffer, Snapshot};
use crate::error::TranscriptError;
use crate::recognition::FragmentEvent;
use crate::translate::Translator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How a fragment affects the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    /// Close the open line (if any) and start a new one
    Open,
    /// Replace the text of the open line
    Revise,
}

/// A segmentation decision waiting for its translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineUpdate {
    pub kind: UpdateKind,

    /// Target line index
    pub line: usize,

    /// Session-wide sequence number; later updates carry larger revisions
    pub revision: u64,

    /// Session that produced the update
    pub generation: u64,

    pub source_text: String,
}

/// Operation applied to the [`DualBuffer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BufferOp {
    AppendLine {
        index: usize,
        source_text: String,
        translated_text: String,
    },
    ReplaceLastLine {
        index: usize,
        source_text: String,
        translated_text: String,
    },
}

/// Counters for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub fragments_received: usize,
    pub lines_opened: usize,
    pub revisions_applied: usize,

    /// Updates dropped because a newer revision or line superseded them
    pub updates_discarded: usize,
}

/// Turns overlapping recognizer hypotheses into a stable list of lines
///
/// Recognizers re-emit a growing hypothesis for the same utterance on every
/// tick and give no end-of-utterance marker, so the time since the previous
/// fragment is the only signal: a gap above the pause threshold starts a new
/// line, anything shorter replaces the open line's text.
pub struct SegmentationEngine {
    config: SegmenterConfig,
    translator: Arc<dyn Translator>,
    state: Option<SessionState>,
    buffer: DualBuffer,
    stats: EngineStats,
    last_applied_revision: Option<u64>,
    generation: u64,
}

impl SegmentationEngine {
    pub fn new(config: SegmenterConfig, translator: impl Translator + 'static) -> Self {
        Self::with_shared_translator(config, Arc::new(translator))
    }

    pub fn with_shared_translator(
        config: SegmenterConfig,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            config,
            translator,
            state: None,
            buffer: DualBuffer::new(),
            stats: EngineStats::default(),
            last_applied_revision: None,
            generation: 0,
        }
    }

    /// Begin a session with an empty transcript
    pub fn start(&mut self) -> Result<(), TranscriptError> {
        if self.state.is_some() {
            return Err(TranscriptError::InvalidState("session already active"));
        }

        self.buffer.clear();
        self.stats = EngineStats::default();
        self.last_applied_revision = None;
        self.generation += 1;
        self.state = Some(SessionState::new(self.generation));

        info!(
            "Segmentation session started (pause threshold {}ms)",
            self.config.pause_threshold_ms
        );
        Ok(())
    }

    /// End the session, closing the open line but keeping all text
    ///
    /// Safe to call with no active session.
    pub fn stop(&mut self) -> EngineStats {
        if self.state.take().is_some() {
            self.buffer.close_last_line();
            info!(
                "Segmentation session stopped: {} lines, {} fragments",
                self.buffer.len(),
                self.stats.fragments_received
            );
        }
        self.stats
    }

    /// Process one fragment with the synchronous translator
    ///
    /// Returns the buffer operation that was applied, or `None` when no
    /// session is active.
    pub fn on_fragment(
        &mut self,
        event: FragmentEvent,
    ) -> Result<Option<BufferOp>, TranscriptError> {
        let Some(update) = self.segment(event) else {
            return Ok(None);
        };

        let translated = self.translator.translate(&update.source_text);
        self.apply(update, translated)
    }

    /// Decide whether a fragment opens a new line or revises the open one
    ///
    /// Advances the session state only; the buffer changes when the update
    /// is passed to [`apply`](Self::apply).
    pub fn segment(&mut self, event: FragmentEvent) -> Option<LineUpdate> {
        let threshold = self.config.pause_threshold_ms;
        let Some(state) = self.state.as_mut() else {
            warn!("Fragment received with no active session, ignoring");
            return None;
        };

        self.stats.fragments_received += 1;

        let starts_line = match (state.active_line, state.last_fragment_ms) {
            (Some(_), Some(last)) => {
                if event.timestamp_ms < last {
                    debug!(
                        "Fragment timestamp {}ms precedes previous {}ms",
                        event.timestamp_ms, last
                    );
                }
                event.timestamp_ms.saturating_sub(last) > threshold
            }
            _ => true,
        };

        state.last_fragment_ms = Some(event.timestamp_ms);

        let (kind, line) = if starts_line {
            let line = state.next_line;
            state.next_line += 1;
            state.active_line = Some(line);
            (UpdateKind::Open, line)
        } else {
            // continuation always has an open line
            (UpdateKind::Revise, state.active_line.unwrap_or_default())
        };

        Some(LineUpdate {
            kind,
            line,
            revision: state.next_revision(),
            generation: state.generation,
            source_text: event.transcript,
        })
    }

    /// Commit a segmented update together with its translation
    ///
    /// Updates from a stopped or earlier session, revisions that arrive after
    /// a newer revision, and revisions whose line stopped being the last open
    /// line are discarded and return `None`.
    pub fn apply(
        &mut self,
        update: LineUpdate,
        translated_text: String,
    ) -> Result<Option<BufferOp>, TranscriptError> {
        match self.state.as_ref().map(|state| state.generation) {
            None => return Ok(self.discard(&update, "no active session")),
            Some(generation) if generation != update.generation => {
                return Ok(self.discard(&update, "from a previous session"));
            }
            Some(_) => {}
        }

        if self
            .last_applied_revision
            .is_some_and(|applied| update.revision <= applied)
        {
            return Ok(self.discard(&update, "older than applied revision"));
        }

        let op = match update.kind {
            UpdateKind::Open => {
                if update.line != self.buffer.len() {
                    return Err(TranscriptError::InvalidState("line opened out of order"));
                }

                let index = self
                    .buffer
                    .append_line(update.source_text.clone(), translated_text.clone());
                self.stats.lines_opened += 1;

                BufferOp::AppendLine {
                    index,
                    source_text: update.source_text,
                    translated_text,
                }
            }
            UpdateKind::Revise => {
                let is_current = self.buffer.last_index() == Some(update.line)
                    && self.buffer.lines().last().is_some_and(|l| l.is_open());
                if !is_current {
                    return Ok(self.discard(&update, "line no longer open"));
                }

                self.buffer
                    .replace_last_line(update.source_text.clone(), translated_text.clone())?;
                self.stats.revisions_applied += 1;

                BufferOp::ReplaceLastLine {
                    index: update.line,
                    source_text: update.source_text,
                    translated_text,
                }
            }
        };

        self.last_applied_revision = Some(update.revision);
        Ok(Some(op))
    }

    /// Count an update that will never reach the buffer
    pub fn discard(&mut self, update: &LineUpdate, reason: &str) -> Option<BufferOp> {
        debug!(
            "Discarding update for line {} (revision {}): {}",
            update.line, update.revision, reason
        );
        self.stats.updates_discarded += 1;
        None
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn buffer(&self) -> &DualBuffer {
        &self.buffer
    }

    pub fn snapshot(&self) -> Snapshot {
        self.buffer.snapshot()
    }
}

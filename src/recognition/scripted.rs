use super::event::RecognitionEvent;
use super::source::{RecognitionSource, EVENT_CHANNEL_CAPACITY};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Replays a recorded sequence of recognition events
///
/// Scripts are JSON lines, one [`RecognitionEvent`] per line:
///
/// ```text
/// {"type":"fragment","transcript":"hallo","timestamp_ms":0}
/// {"type":"error","error":"no-speech"}
/// {"type":"end"}
/// ```
///
/// Blank lines and lines starting with `#` are ignored. An `end` event is
/// appended when the script does not finish with one.
pub struct ScriptedSource {
    events: Vec<RecognitionEvent>,
    realtime: bool,
    listening: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl ScriptedSource {
    pub fn from_events(events: Vec<RecognitionEvent>) -> Self {
        Self {
            events,
            realtime: false,
            listening: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    /// Load a JSON-lines script from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening recognition script: {}", path.display());

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {:?}", path))?;

        let events = Self::parse(&contents)
            .with_context(|| format!("Failed to parse script: {:?}", path))?;

        info!("Script loaded: {} events", events.len());
        Ok(Self::from_events(events))
    }

    pub fn parse(contents: &str) -> Result<Vec<RecognitionEvent>> {
        contents
            .lines()
            .enumerate()
            .map(|(n, line)| (n + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .map(|(n, line)| {
                serde_json::from_str(line).with_context(|| format!("Invalid event on line {}", n))
            })
            .collect()
    }

    /// Pace fragments by their timestamp deltas instead of sending at once
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn events(&self) -> &[RecognitionEvent] {
        &self.events
    }
}

#[async_trait::async_trait]
impl RecognitionSource for ScriptedSource {
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let mut events = self.events.clone();
        if events.last() != Some(&RecognitionEvent::End) {
            events.push(RecognitionEvent::End);
        }

        let realtime = self.realtime;
        let listening = Arc::clone(&self.listening);
        listening.store(true, Ordering::SeqCst);

        let task = tokio::spawn(async move {
            debug!("Script replay task started ({} events)", events.len());
            let mut last_ts: Option<u64> = None;

            for event in events {
                if !listening.load(Ordering::SeqCst) {
                    break;
                }

                if realtime {
                    if let RecognitionEvent::Fragment(fragment) = &event {
                        if let Some(prev) = last_ts {
                            let wait = fragment.timestamp_ms.saturating_sub(prev);
                            tokio::time::sleep(Duration::from_millis(wait)).await;
                        }
                        last_ts = Some(fragment.timestamp_ms);
                    }
                }

                if tx.send(event).await.is_err() {
                    break;
                }
            }

            listening.store(false, Ordering::SeqCst);
            debug!("Script replay task finished");
        });

        self.task = Some(task);
        info!("Scripted source started (realtime={})", realtime);
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        self.listening.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
        info!("Scripted source stopped");
        Ok(())
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

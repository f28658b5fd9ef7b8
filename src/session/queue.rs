use crate::segmentation::{LineUpdate, UpdateKind};
use crate::translate::{translate_or_fallback, TranslationBackend};
use futures::future::BoxFuture;
use futures::stream::{FuturesOrdered, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Line updates waiting for their translation
///
/// Translations run concurrently but resolve in the order their fragments
/// were segmented, so buffer operations are committed in fragment order.
pub struct TranslationQueue {
    backend: Arc<dyn TranslationBackend>,
    timeout: Duration,
    in_flight: FuturesOrdered<BoxFuture<'static, (LineUpdate, String)>>,

    /// Newest queued revision per line
    latest: HashMap<usize, u64>,
}

impl TranslationQueue {
    pub fn new(backend: Arc<dyn TranslationBackend>, timeout: Duration) -> Self {
        Self {
            backend,
            timeout,
            in_flight: FuturesOrdered::new(),
            latest: HashMap::new(),
        }
    }

    /// Start translating an update
    pub fn push(&mut self, update: LineUpdate) {
        self.latest.insert(update.line, update.revision);

        let backend = Arc::clone(&self.backend);
        let timeout = self.timeout;
        self.in_flight.push_back(Box::pin(async move {
            let translated = translate_or_fallback(&*backend, &update.source_text, timeout).await;
            (update, translated)
        }));
    }

    /// Next resolved update, in queue order
    pub async fn next(&mut self) -> Option<(LineUpdate, String)> {
        let (update, translated) = self.in_flight.next().await?;
        if self.latest.get(&update.line) == Some(&update.revision) {
            self.latest.remove(&update.line);
        }
        Some((update, translated))
    }

    /// Whether a newer revision of the same line is already queued
    ///
    /// Opens are never superseded since they create the line.
    pub fn is_superseded(&self, update: &LineUpdate) -> bool {
        update.kind == UpdateKind::Revise
            && self
                .latest
                .get(&update.line)
                .is_some_and(|&rev| rev > update.revision)
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }

    pub fn len(&self) -> usize {
        self.in_flight.len()
    }
}

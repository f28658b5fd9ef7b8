use super::Translator;
use anyhow::Result;
use std::time::Duration;
use tracing::warn;

/// Asynchronous translation backend
///
/// Implementations may fail or be slow; callers go through
/// [`translate_or_fallback`] so segmentation never aborts on a translation
/// problem.
#[async_trait::async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate `text` into the target language
    async fn translate(&self, text: &str) -> Result<String>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Adapts a synchronous [`Translator`] to the backend interface
pub struct BlockingBackend<T> {
    translator: T,
}

impl<T: Translator> BlockingBackend<T> {
    pub fn new(translator: T) -> Self {
        Self { translator }
    }
}

#[async_trait::async_trait]
impl<T: Translator> TranslationBackend for BlockingBackend<T> {
    async fn translate(&self, text: &str) -> Result<String> {
        Ok(self.translator.translate(text))
    }

    fn name(&self) -> &str {
        "blocking"
    }
}

/// Translate with a deadline, falling back to the original text on error
pub async fn translate_or_fallback(
    backend: &dyn TranslationBackend,
    text: &str,
    timeout: Duration,
) -> String {
    match tokio::time::timeout(timeout, backend.translate(text)).await {
        Ok(Ok(translated)) => translated,
        Ok(Err(e)) => {
            warn!(
                "Translation via {} failed, keeping original text: {}",
                backend.name(),
                e
            );
            text.to_string()
        }
        Err(_) => {
            warn!(
                "Translation via {} timed out after {}ms, keeping original text",
                backend.name(),
                timeout.as_millis()
            );
            text.to_string()
        }
    }
}

//! Translation collaborators
//!
//! The engine only depends on the [`Translator`] contract: a pure, total
//! function from source text to translated text. Real backends that may fail
//! or suspend implement [`TranslationBackend`] instead and are wrapped with a
//! fallback to the untranslated text.

mod backend;
mod mock;

pub use backend::{translate_or_fallback, BlockingBackend, TranslationBackend};
pub use mock::{IdentityTranslator, SuffixTranslator, DEFAULT_TRANSLATION_SUFFIX};

/// Synchronous translation function
///
/// Implementations must be total: on failure return the original text.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn translate(&self, text: &str) -> String {
        self(text)
    }
}

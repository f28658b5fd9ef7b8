use super::Translator;

/// Marker appended by the demo translator
pub const DEFAULT_TRANSLATION_SUFFIX: &str = " (Translated to English)";

/// Returns the text unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Demo translator that tags the source text with a fixed suffix
///
/// Stands in for a real translation API. Empty text stays empty so that
/// empty lines remain empty in both columns.
#[derive(Debug, Clone)]
pub struct SuffixTranslator {
    suffix: String,
}

impl SuffixTranslator {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl Default for SuffixTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSLATION_SUFFIX)
    }
}

impl Translator for SuffixTranslator {
    fn translate(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        format!("{}{}", text, self.suffix)
    }
}

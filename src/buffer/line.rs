use serde::{Deserialize, Serialize};

/// Lifecycle of a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineState {
    /// Still receiving revisions from the recognizer
    Open,
    /// Frozen; its text never changes again
    Closed,
}

/// One row of reconstructed transcript, paired across both languages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Position in the transcript (0-indexed, stable once assigned)
    pub index: usize,

    /// Text as recognized in the source language
    pub source_text: String,

    /// Translation of `source_text`
    pub translated_text: String,

    pub state: LineState,
}

impl Line {
    pub(crate) fn open(index: usize, source_text: String, translated_text: String) -> Self {
        Self {
            index,
            source_text,
            translated_text,
            state: LineState::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == LineState::Open
    }
}

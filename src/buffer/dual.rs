use super::line::{Line, LineState};
use crate::error::TranscriptError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Source and translated lines kept in lockstep by index
///
/// Lines are stored as an indexed sequence rather than a flat string, so
/// transcripts containing line breaks never confuse "last line" mutation.
#[derive(Debug, Default)]
pub struct DualBuffer {
    lines: Vec<Line>,
}

impl DualBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty both sequences; the next appended line gets index 0
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Open a new line at the next index and return that index
    ///
    /// The previous last line, if still open, is closed first.
    pub fn append_line(&mut self, source_text: String, translated_text: String) -> usize {
        self.close_last_line();

        let index = self.lines.len();
        self.lines.push(Line::open(index, source_text, translated_text));

        debug!("Opened line {}", index);
        index
    }

    /// Overwrite the text of the highest-index line
    pub fn replace_last_line(
        &mut self,
        source_text: String,
        translated_text: String,
    ) -> Result<(), TranscriptError> {
        let line = self
            .lines
            .last_mut()
            .ok_or(TranscriptError::InvalidState("no line to replace"))?;

        if !line.is_open() {
            return Err(TranscriptError::InvalidState("last line is closed"));
        }

        line.source_text = source_text;
        line.translated_text = translated_text;
        Ok(())
    }

    /// Close the last line; no-op when it is already closed or absent
    pub fn close_last_line(&mut self) {
        if let Some(line) = self.lines.last_mut() {
            if line.is_open() {
                line.state = LineState::Closed;
                debug!("Closed line {}", line.index);
            }
        }
    }

    /// Index of the highest line, if any
    pub fn last_index(&self) -> Option<usize> {
        self.lines.len().checked_sub(1)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Immutable copy of both columns in commit order
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            source_lines: self.lines.iter().map(|l| l.source_text.clone()).collect(),
            translated_lines: self
                .lines
                .iter()
                .map(|l| l.translated_text.clone())
                .collect(),
            open_line: self.lines.last().filter(|l| l.is_open()).map(|l| l.index),
        }
    }
}

/// Read-only view of a [`DualBuffer`] for presentation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub source_lines: Vec<String>,
    pub translated_lines: Vec<String>,

    /// Index of the line still receiving revisions
    pub open_line: Option<usize>,
}

impl Snapshot {
    /// Source column joined by line breaks
    pub fn source_text(&self) -> String {
        self.source_lines.join("\n")
    }

    /// Translated column joined by line breaks
    pub fn translated_text(&self) -> String {
        self.translated_lines.join("\n")
    }

    pub fn len(&self) -> usize {
        self.source_lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_lines.is_empty()
    }
}

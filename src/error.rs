use thiserror::Error;

/// Errors raised by the line buffer and segmentation engine.
///
/// These indicate a sequencing bug in the caller and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    /// An operation required an open line (or an inactive session) and the
    /// current state did not allow it.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

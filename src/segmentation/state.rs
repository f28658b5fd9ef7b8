/// Per-session mutable state of the segmentation engine
///
/// Created by `start()` and dropped by `stop()`. Line indices are tracked
/// here rather than read back from the buffer because buffer updates may lag
/// behind segmentation while translations are in flight.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Which `start()` created this session; stamped on every line update
    pub generation: u64,

    /// Timestamp of the last fragment processed
    pub last_fragment_ms: Option<u64>,

    /// Index of the currently open line
    pub active_line: Option<usize>,

    /// Index the next opened line will receive
    pub next_line: usize,

    /// Monotonic counter stamped on every line update
    pub revision: u64,
}

impl SessionState {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            last_fragment_ms: None,
            active_line: None,
            next_line: 0,
            revision: 0,
        }
    }

    pub(crate) fn next_revision(&mut self) -> u64 {
        let revision = self.revision;
        self.revision += 1;
        revision
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(0)
    }
}

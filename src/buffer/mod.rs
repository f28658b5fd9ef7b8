//! Paired source/translated line storage

mod dual;
mod line;

pub use dual::{DualBuffer, Snapshot};
pub use line::{Line, LineState};

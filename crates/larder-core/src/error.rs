use thiserror::Error;

/// A rejected edit. Fields treat every variant as a no-op; it is surfaced only by explicitly
/// fallible calls and in trace logs.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EditError {
    #[error("caret is at the start of the line")]
    AtStart,
    #[error("caret is at the end of the line")]
    AtEnd,
    #[error("inserting {ch:?} would exceed the width budget of {budget}")]
    WidthExceeded { ch: char, budget: f32 },
    #[error("all {capacity} lines are full")]
    LinesExhausted { capacity: usize },
    #[error("index {index} is outside 0..={len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{0:?} is not an accepted character")]
    Rejected(char),
}

use thiserror::Error;

/// Errors reported by the checked operations of a [`Sequence`].
///
/// [`Sequence`]: crate::Sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The cursor references a node that has been freed, or it does not
    /// belong to this sequence.
    #[error("cursor does not reference a live node of this sequence")]
    InvalidCursor,

    /// The operation needs an element, but the cursor is at the sentinel.
    #[error("cursor is at the sentinel node")]
    Sentinel,

    #[error("cursor cannot move past the sentinel node")]
    PastEnd,

    #[error("cursor cannot move before the first element")]
    BeforeBegin,
}

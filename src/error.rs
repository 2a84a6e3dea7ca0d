use std::collections::TryReserveError;

/// Errors surfaced by building, compiling or applying a diff.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// Growing one of the internal tables failed.
    #[error("out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// A change record addressed a position outside the current model.
    #[error("{op} at index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds {
        op: &'static str,
        index: usize,
        len: usize,
    },

    /// The sequences or changes given do not belong to the snake being compiled.
    #[error("mismatched input: {0}")]
    Mismatch(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;

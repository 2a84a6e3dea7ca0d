use serde::{Deserialize, Serialize};

/// One piece of a path through the edit graph.
///
/// `old_pos`/`new_pos` is the point the segment starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// `len` consecutive elements that are the same in both sequences.
    Equal {
        old_pos: usize,
        new_pos: usize,
        len: usize,
    },
    /// The old element at `old_pos` has no counterpart.
    Delete { old_pos: usize, new_pos: usize },
    /// The new element at `new_pos` has no counterpart.
    Insert { old_pos: usize, new_pos: usize },
}

impl Segment {
    /// The point in the edit graph this segment ends at.
    pub fn end(&self) -> (usize, usize) {
        match *self {
            Segment::Equal {
                old_pos,
                new_pos,
                len,
            } => (old_pos + len, new_pos + len),
            Segment::Delete { old_pos, new_pos } => (old_pos + 1, new_pos),
            Segment::Insert { old_pos, new_pos } => (old_pos, new_pos + 1),
        }
    }
}

/// A shortest edit path between two sequences, as produced by [`build`].
///
/// The path runs from `(0, 0)` to `(old_len, new_len)` and consumes every
/// element of both sequences exactly once. A snake is immutable: it can be
/// walked or compiled any number of times, from any thread.
///
/// [`build`]: crate::myers::build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    pub(crate) old_len: usize,
    pub(crate) new_len: usize,
    pub(crate) segments: Vec<Segment>,
}

impl Snake {
    pub fn old_len(&self) -> usize {
        self.old_len
    }

    pub fn new_len(&self) -> usize {
        self.new_len
    }

    /// The path, in order from `(0, 0)`.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of deletions plus insertions on the path.
    pub fn edit_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| !matches!(s, Segment::Equal { .. }))
            .count()
    }

    /// Length of the common subsequence the path keeps.
    pub fn common_len(&self) -> usize {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Equal { len, .. } => *len,
                _ => 0,
            })
            .sum()
    }

    /// `true` if both sequences are the same and the path is all diagonal.
    pub fn is_identity(&self) -> bool {
        self.old_len == self.new_len && self.edit_count() == 0
    }
}

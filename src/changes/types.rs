use serde::{Deserialize, Serialize};

/// One operation on a live list.
///
/// `old_pos`/`new_pos` are the coordinates of the operation in the old and
/// new sequences. `index`, `from` and `to` are positions in the list as it
/// stands after every earlier record has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Change {
    /// Insert `new[new_pos..new_pos + count]` at `index`.
    Insert {
        old_pos: usize,
        new_pos: usize,
        index: usize,
        count: usize,
    },
    /// Remove `count` elements starting at `index`; they are
    /// `old[old_pos..old_pos + count]`.
    Remove {
        old_pos: usize,
        new_pos: usize,
        index: usize,
        count: usize,
    },
    /// Take the element at `from` out of the list and put it back at `to`.
    /// `to` is counted after the removal.
    Move {
        old_pos: usize,
        new_pos: usize,
        from: usize,
        to: usize,
    },
    /// No-op.
    Ignore,
}

/// Alias for a vector of Change, result of [`compile`](crate::changes::compile).
pub type ChangeList = Vec<Change>;

bitflags::bitflags! {
    /// Post-processing passes run by [`compile`](crate::changes::compile).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChangeFlags: u8 {
        /// Pair a removal with an insertion of the same element into a [`Change::Move`].
        const MOVE = 1;
        /// Merge contiguous insertions or removals into one record.
        const AGGREGATE = 2;
    }
}

impl Default for ChangeFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for ChangeFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChangeFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u8::deserialize(deserializer)?;
        Self::from_bits(bits).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid ChangeFlags bits: {bits:#x}"))
        })
    }
}

//! Diffing of ordered sequences for list reconciliation.
//!
//! The two sequences are never owned or copied: they are seen through the
//! [`Sequences`] trait, which only exposes two lengths and an index based
//! `is_same` comparison. A diff goes through up to three stages:
//!
//! - [`myers::build`] computes a [`Snake`], a shortest edit path between the
//!   two sequences,
//! - [`Snake::walk`] replays that path through a [`SnakeHook`] for callers
//!   that want to reconcile step by step,
//! - [`changes::compile`] flattens it into a [`ChangeList`] of insertions,
//!   removals and moves that can be applied in order to a live list.
//!
//! ```
//! use listdiff::{diff_slices, Change, ChangeFlags};
//!
//! let old = ["a", "b", "c", "d", "e"];
//! let new = ["c", "d", "e"];
//! let changes = diff_slices(&old, &new, ChangeFlags::AGGREGATE).unwrap();
//! assert_eq!(
//!     changes,
//!     vec![Change::Remove { old_pos: 0, new_pos: 0, index: 0, count: 2 }]
//! );
//! ```

pub mod changes;
pub mod error;
pub mod myers;
pub mod sequences;
pub mod walk;

pub use changes::{apply, compile, expand, Change, ChangeFlags, ChangeList};
pub use error::{DiffError, DiffResult};
pub use myers::{build, Segment, Snake};
pub use sequences::{from_fn, FnSequences, Sequences};
pub use walk::{NoHook, SnakeHook};

/// Computes the snake between the two sequences of `seqs`.
///
/// Same as [`myers::build`].
///
/// ```
/// use listdiff::diff;
///
/// let snake = diff(&(&[1, 2, 3][..], &[1, 3][..])).unwrap();
/// assert_eq!(snake.edit_count(), 1);
/// assert_eq!(snake.common_len(), 2);
/// ```
pub fn diff<S: Sequences + ?Sized>(seqs: &S) -> DiffResult<Snake> {
    build(seqs)
}

/// Builds the snake for `seqs` and compiles it with `flags` in one go.
///
/// ```
/// use listdiff::{changes, from_fn, Change, ChangeFlags};
///
/// let old = [(1, "a"), (2, "b"), (3, "c")];
/// let new = [(2, "b"), (1, "a"), (3, "c")];
/// let seqs = from_fn(old.len(), new.len(), |i, j| old[i].0 == new[j].0);
/// assert_eq!(
///     changes(&seqs, ChangeFlags::MOVE).unwrap(),
///     vec![Change::Move { old_pos: 0, new_pos: 1, from: 0, to: 1 }]
/// );
/// ```
pub fn changes<S: Sequences + ?Sized>(seqs: &S, flags: ChangeFlags) -> DiffResult<ChangeList> {
    let snake = build(seqs)?;
    compile(&snake, seqs, flags)
}

/// Builds the snake between two slices and compiles it with `flags`.
pub fn diff_slices<T: PartialEq>(
    old: &[T],
    new: &[T],
    flags: ChangeFlags,
) -> DiffResult<ChangeList> {
    changes(&(old, new), flags)
}

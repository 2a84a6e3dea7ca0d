/// Read-only access to the two sequences being diffed.
///
/// The engine never owns or copies the elements: it only asks for the two
/// lengths and whether the element at `old_index` in the old sequence is the
/// same as the element at `new_index` in the new one. `is_same` may be called
/// in any order and more than once for the same pair, always with
/// `old_index < old_len()` and `new_index < new_len()`.
pub trait Sequences {
    fn old_len(&self) -> usize;
    fn new_len(&self) -> usize;
    fn is_same(&self, old_index: usize, new_index: usize) -> bool;
}

impl<S: Sequences + ?Sized> Sequences for &S {
    fn old_len(&self) -> usize {
        (**self).old_len()
    }

    fn new_len(&self) -> usize {
        (**self).new_len()
    }

    fn is_same(&self, old_index: usize, new_index: usize) -> bool {
        (**self).is_same(old_index, new_index)
    }
}

impl<T: PartialEq> Sequences for (&[T], &[T]) {
    fn old_len(&self) -> usize {
        self.0.len()
    }

    fn new_len(&self) -> usize {
        self.1.len()
    }

    fn is_same(&self, old_index: usize, new_index: usize) -> bool {
        self.0[old_index] == self.1[new_index]
    }
}

/// Sequences whose identity is decided by a closure.
///
/// Returned by [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnSequences<F> {
    old_len: usize,
    new_len: usize,
    is_same: F,
}

impl<F> Sequences for FnSequences<F>
where
    F: Fn(usize, usize) -> bool,
{
    fn old_len(&self) -> usize {
        self.old_len
    }

    fn new_len(&self) -> usize {
        self.new_len
    }

    fn is_same(&self, old_index: usize, new_index: usize) -> bool {
        (self.is_same)(old_index, new_index)
    }
}

/// Builds [`Sequences`] from two lengths and an index comparison.
///
/// Useful when the elements live somewhere other than a slice, or when two
/// elements should count as "the same" by key rather than by full equality.
///
/// ```
/// use listdiff::{from_fn, Sequences};
///
/// let old = [(1, "a"), (2, "b")];
/// let new = [(2, "B"), (1, "a")];
/// let seqs = from_fn(old.len(), new.len(), |i, j| old[i].0 == new[j].0);
/// assert!(seqs.is_same(1, 0));
/// ```
pub fn from_fn<F>(old_len: usize, new_len: usize, is_same: F) -> FnSequences<F>
where
    F: Fn(usize, usize) -> bool,
{
    FnSequences {
        old_len,
        new_len,
        is_same,
    }
}

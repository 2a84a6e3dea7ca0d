use crate::myers::{Segment, Snake};
use std::convert::Infallible;

/// Callbacks fired while a [`Snake`] is replayed.
///
/// Every method defaults to a no-op, so a hook only implements the
/// notifications it cares about. Returning an error aborts the walk.
pub trait SnakeHook {
    type Error;

    /// The new element at `new_pos` is inserted before the old element at `old_pos`.
    fn insert(&mut self, old_pos: usize, new_pos: usize) -> Result<(), Self::Error> {
        let _ = (old_pos, new_pos);
        Ok(())
    }

    /// The old element at `old_pos` is removed; `new_pos` is where the
    /// removal lines up in the new sequence.
    fn remove(&mut self, old_pos: usize, new_pos: usize) -> Result<(), Self::Error> {
        let _ = (old_pos, new_pos);
        Ok(())
    }

    /// The old element at `old_pos` is kept as the new element at `new_pos`.
    fn equal(&mut self, old_pos: usize, new_pos: usize) -> Result<(), Self::Error> {
        let _ = (old_pos, new_pos);
        Ok(())
    }

    /// Called once after the last step.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<H: SnakeHook + ?Sized> SnakeHook for &mut H {
    type Error = H::Error;

    fn insert(&mut self, old_pos: usize, new_pos: usize) -> Result<(), Self::Error> {
        (**self).insert(old_pos, new_pos)
    }

    fn remove(&mut self, old_pos: usize, new_pos: usize) -> Result<(), Self::Error> {
        (**self).remove(old_pos, new_pos)
    }

    fn equal(&mut self, old_pos: usize, new_pos: usize) -> Result<(), Self::Error> {
        (**self).equal(old_pos, new_pos)
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        (**self).finish()
    }
}

/// A hook that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHook;

impl SnakeHook for NoHook {
    type Error = Infallible;
}

impl Snake {
    /// Replays the path from `(0, 0)` to `(old_len, new_len)`, firing one
    /// callback per step in path order.
    ///
    /// An equal run of length `len` fires `equal` once per matched pair.
    ///
    /// ```
    /// use listdiff::myers::build;
    /// use listdiff::walk::SnakeHook;
    ///
    /// #[derive(Default)]
    /// struct Removed(Vec<usize>);
    ///
    /// impl SnakeHook for Removed {
    ///     type Error = ();
    ///     fn remove(&mut self, old_pos: usize, _new_pos: usize) -> Result<(), ()> {
    ///         self.0.push(old_pos);
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let snake = build(&(&[1, 2, 3][..], &[1, 3][..])).unwrap();
    /// let mut removed = Removed::default();
    /// snake.walk(&mut removed).unwrap();
    /// assert_eq!(removed.0, vec![1]);
    /// ```
    pub fn walk<H: SnakeHook>(&self, mut hook: H) -> Result<(), H::Error> {
        for segment in &self.segments {
            match *segment {
                Segment::Equal {
                    old_pos,
                    new_pos,
                    len,
                } => {
                    for i in 0..len {
                        hook.equal(old_pos + i, new_pos + i)?;
                    }
                }
                Segment::Delete { old_pos, new_pos } => hook.remove(old_pos, new_pos)?,
                Segment::Insert { old_pos, new_pos } => hook.insert(old_pos, new_pos)?,
            }
        }
        hook.finish()
    }
}

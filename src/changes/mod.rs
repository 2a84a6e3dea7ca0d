mod types;
pub use types::*;

use crate::error::{DiffError, DiffResult};
use crate::myers::{Segment, Snake};
use crate::sequences::Sequences;
use crate::walk::SnakeHook;
use tracing::{debug, trace};

/// Collects one unit record per non-diagonal step.
///
/// While the walk is at `(x, y)` the list holds `new[..y]` followed by
/// `old[x..]`, so both insertions and removals happen at index `y`.
struct RawChanges {
    changes: ChangeList,
    len: usize,
}

impl SnakeHook for RawChanges {
    type Error = DiffError;

    fn insert(&mut self, old_pos: usize, new_pos: usize) -> DiffResult<()> {
        debug_assert!(new_pos <= self.len);
        self.changes.try_reserve(1)?;
        self.changes.push(Change::Insert {
            old_pos,
            new_pos,
            index: new_pos,
            count: 1,
        });
        self.len += 1;
        Ok(())
    }

    fn remove(&mut self, old_pos: usize, new_pos: usize) -> DiffResult<()> {
        debug_assert!(new_pos < self.len);
        self.changes.try_reserve(1)?;
        self.changes.push(Change::Remove {
            old_pos,
            new_pos,
            index: new_pos,
            count: 1,
        });
        self.len -= 1;
        Ok(())
    }
}

/// Turns a snake into a list of changes that, applied in order to a copy
/// of the old sequence, produce the new one.
///
/// Without flags every record is a unit [`Change::Insert`] or
/// [`Change::Remove`]. [`ChangeFlags::MOVE`] replaces each removal that has
/// a matching insertion with a single [`Change::Move`];
/// [`ChangeFlags::AGGREGATE`] then merges contiguous runs of the same kind.
///
/// ```
/// use listdiff::changes::{compile, Change, ChangeFlags};
/// use listdiff::myers::build;
///
/// let old = ["a", "b", "c"];
/// let new = ["b", "a", "c"];
/// let seqs = (&old[..], &new[..]);
/// let snake = build(&seqs).unwrap();
/// let changes = compile(&snake, &seqs, ChangeFlags::MOVE).unwrap();
/// assert_eq!(
///     changes,
///     vec![Change::Move { old_pos: 0, new_pos: 1, from: 0, to: 1 }]
/// );
/// ```
///
/// # Errors
///
/// [`DiffError::Mismatch`] if `seqs` does not have the lengths the snake was
/// built from, [`DiffError::OutOfMemory`] if the list cannot grow.
pub fn compile<S: Sequences + ?Sized>(
    snake: &Snake,
    seqs: &S,
    flags: ChangeFlags,
) -> DiffResult<ChangeList> {
    if seqs.old_len() != snake.old_len() || seqs.new_len() != snake.new_len() {
        return Err(DiffError::Mismatch(format!(
            "snake spans {}x{} but sequences are {}x{}",
            snake.old_len(),
            snake.new_len(),
            seqs.old_len(),
            seqs.new_len()
        )));
    }

    let mut raw = RawChanges {
        changes: Vec::new(),
        len: snake.old_len(),
    };
    snake.walk(&mut raw)?;
    debug_assert_eq!(raw.len, snake.new_len());

    let mut changes = raw.changes;
    if flags.contains(ChangeFlags::MOVE) {
        changes = detect_moves(snake, seqs, changes)?;
    }
    if flags.contains(ChangeFlags::AGGREGATE) {
        changes = aggregate(changes)?;
    }
    debug!(
        flags = flags.bits(),
        records = changes.len(),
        "change list compiled"
    );
    Ok(changes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pairing {
    Unpaired,
    /// A removal absorbed into a move.
    Retired,
    /// An insertion that moves the old element at this position.
    MovedFrom(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Old(usize),
    New(usize),
}

fn detect_moves<S: Sequences + ?Sized>(
    snake: &Snake,
    seqs: &S,
    raw: ChangeList,
) -> DiffResult<ChangeList> {
    let mut pairing = filled(Pairing::Unpaired, raw.len())?;
    let mut moves = 0usize;
    for (r, change) in raw.iter().enumerate() {
        let Change::Remove { old_pos, .. } = *change else {
            continue;
        };
        let found = raw.iter().enumerate().position(|(i, candidate)| {
            pairing[i] == Pairing::Unpaired
                && matches!(
                    *candidate,
                    Change::Insert { new_pos, .. } if seqs.is_same(old_pos, new_pos)
                )
        });
        if let Some(i) = found {
            trace!(remove = r, insert = i, old_pos, "paired into move");
            pairing[r] = Pairing::Retired;
            pairing[i] = Pairing::MovedFrom(old_pos);
            moves += 1;
        }
    }
    if moves == 0 {
        return Ok(raw);
    }

    // old position kept at each new position, if any
    let mut kept = filled(None, snake.new_len())?;
    for segment in snake.segments() {
        if let Segment::Equal {
            old_pos,
            new_pos,
            len,
        } = *segment
        {
            for i in 0..len {
                kept[new_pos + i] = Some(old_pos + i);
            }
        }
    }

    // Indices shift once removals are deferred, so replay the whole list
    // on the identities of the elements.
    let mut model: Vec<Slot> = Vec::new();
    model.try_reserve(snake.old_len() + snake.new_len())?;
    model.extend((0..snake.old_len()).map(Slot::Old));

    let mut changes: ChangeList = Vec::new();
    changes.try_reserve(raw.len() - moves)?;
    for (change, pairing) in raw.into_iter().zip(pairing) {
        match (change, pairing) {
            (Change::Remove { .. }, Pairing::Retired) => {}
            (
                Change::Remove {
                    old_pos,
                    new_pos,
                    count,
                    ..
                },
                _,
            ) => {
                let index = locate(&model, Slot::Old(old_pos))?;
                model.remove(index);
                changes.push(Change::Remove {
                    old_pos,
                    new_pos,
                    index,
                    count,
                });
            }
            (Change::Insert { new_pos, .. }, Pairing::MovedFrom(old_pos)) => {
                let from = locate(&model, Slot::Old(old_pos))?;
                model.remove(from);
                let to = insertion_point(&model, &kept, new_pos)?;
                model.insert(to, Slot::New(new_pos));
                changes.push(Change::Move {
                    old_pos,
                    new_pos,
                    from,
                    to,
                });
            }
            (
                Change::Insert {
                    old_pos,
                    new_pos,
                    count,
                    ..
                },
                _,
            ) => {
                let index = insertion_point(&model, &kept, new_pos)?;
                model.insert(index, Slot::New(new_pos));
                changes.push(Change::Insert {
                    old_pos,
                    new_pos,
                    index,
                    count,
                });
            }
            (other, _) => changes.push(other),
        }
    }
    debug!(moves, "moves detected");
    Ok(changes)
}

fn filled<T: Clone>(value: T, len: usize) -> DiffResult<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    v.resize(len, value);
    Ok(v)
}

fn locate(model: &[Slot], slot: Slot) -> DiffResult<usize> {
    model
        .iter()
        .position(|s| *s == slot)
        .ok_or_else(|| DiffError::Mismatch(format!("{slot:?} is no longer in the list")))
}

/// New elements go right after their predecessor in the new sequence.
fn insertion_point(model: &[Slot], kept: &[Option<usize>], new_pos: usize) -> DiffResult<usize> {
    if new_pos == 0 {
        return Ok(0);
    }
    let prev = match kept[new_pos - 1] {
        Some(old_pos) => Slot::Old(old_pos),
        None => Slot::New(new_pos - 1),
    };
    Ok(locate(model, prev)? + 1)
}

fn aggregate(changes: ChangeList) -> DiffResult<ChangeList> {
    let mut merged: ChangeList = Vec::new();
    merged.try_reserve(changes.len())?;
    for change in changes {
        if change == Change::Ignore {
            continue;
        }
        if let Some(last) = merged.last_mut() {
            if extend_run(last, &change) {
                continue;
            }
        }
        merged.push(change);
    }
    Ok(merged)
}

/// Grows `run` by `next` if `next` picks up exactly where `run` stops.
fn extend_run(run: &mut Change, next: &Change) -> bool {
    match (run, *next) {
        (
            Change::Insert {
                old_pos,
                new_pos,
                index,
                count,
            },
            Change::Insert {
                old_pos: next_old,
                new_pos: next_new,
                index: next_index,
                count: next_count,
            },
        ) if *old_pos == next_old
            && *new_pos + *count == next_new
            && *index + *count == next_index =>
        {
            *count += next_count;
            true
        }
        (
            Change::Remove {
                old_pos,
                new_pos,
                index,
                count,
            },
            Change::Remove {
                old_pos: next_old,
                new_pos: next_new,
                index: next_index,
                count: next_count,
            },
        ) if *new_pos == next_new && *old_pos + *count == next_old && *index == next_index => {
            *count += next_count;
            true
        }
        _ => false,
    }
}

/// Splits aggregated records back into unit records.
///
/// `expand` undoes the [`ChangeFlags::AGGREGATE`] pass: an insertion of
/// `count` elements becomes `count` insertions at consecutive indices, a
/// removal of `count` elements becomes `count` removals at the same index.
/// [`Change::Ignore`] records are dropped.
pub fn expand(changes: &[Change]) -> ChangeList {
    let mut units = Vec::with_capacity(changes.len());
    for change in changes {
        match *change {
            Change::Insert {
                old_pos,
                new_pos,
                index,
                count,
            } => units.extend((0..count).map(|i| Change::Insert {
                old_pos,
                new_pos: new_pos + i,
                index: index + i,
                count: 1,
            })),
            Change::Remove {
                old_pos,
                new_pos,
                index,
                count,
            } => units.extend((0..count).map(|i| Change::Remove {
                old_pos: old_pos + i,
                new_pos,
                index,
                count: 1,
            })),
            Change::Move { .. } => units.push(*change),
            Change::Ignore => {}
        }
    }
    units
}

/// Applies `changes` in order to a copy of `old`, taking inserted elements
/// from `new`.
///
/// A [`Change::Move`] is carried out as a removal followed by an insertion
/// of the same element.
///
/// # Errors
///
/// [`DiffError::IndexOutOfBounds`] if a record addresses a position outside
/// the list as it stands when the record is reached, or elements past the
/// end of `new`.
pub fn apply<T: Clone>(old: &[T], new: &[T], changes: &[Change]) -> DiffResult<Vec<T>> {
    let mut result = old.to_vec();
    for change in changes {
        match *change {
            Change::Insert {
                new_pos,
                index,
                count,
                ..
            } => {
                if index > result.len() {
                    return Err(DiffError::IndexOutOfBounds {
                        op: "insert",
                        index,
                        len: result.len(),
                    });
                }
                let items = new_pos
                    .checked_add(count)
                    .and_then(|end| new.get(new_pos..end))
                    .ok_or(DiffError::IndexOutOfBounds {
                        op: "insert",
                        index: new_pos.saturating_add(count),
                        len: new.len(),
                    })?;
                result.splice(index..index, items.iter().cloned());
            }
            Change::Remove { index, count, .. } => {
                let end = match index.checked_add(count) {
                    Some(end) if end <= result.len() => end,
                    _ => {
                        return Err(DiffError::IndexOutOfBounds {
                            op: "remove",
                            index: index.saturating_add(count),
                            len: result.len(),
                        })
                    }
                };
                result.drain(index..end);
            }
            Change::Move { from, to, .. } => {
                if from >= result.len() || to >= result.len() {
                    return Err(DiffError::IndexOutOfBounds {
                        op: "move",
                        index: from.max(to),
                        len: result.len(),
                    });
                }
                let item = result.remove(from);
                result.insert(to, item);
            }
            Change::Ignore => {}
        }
    }
    Ok(result)
}

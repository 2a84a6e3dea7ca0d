pub mod types;
pub use types::*;

use crate::error::DiffResult;
use crate::sequences::Sequences;
use std::cmp::max;
use tracing::debug;

/// Furthest reaching x per diagonal `k`, indexed from `-offset`.
struct V {
    data: Vec<usize>,
    offset: isize,
}

impl V {
    fn new(size: usize) -> DiffResult<Self> {
        let len = 2 * size + 1;
        let mut data = Vec::new();
        data.try_reserve_exact(len)?;
        data.resize(len, 0);
        Ok(V {
            data,
            offset: size as isize,
        })
    }

    fn get(&self, k: isize) -> usize {
        self.data[(k + self.offset) as usize]
    }

    fn set(&mut self, k: isize, val: usize) {
        self.data[(k + self.offset) as usize] = val;
    }

    /// Copies diagonals `-d..=d`, the only ones round `d` can reach.
    fn window(&self, d: isize) -> DiffResult<V> {
        let lo = (self.offset - d) as usize;
        let hi = (self.offset + d) as usize;
        let mut data = Vec::new();
        data.try_reserve_exact(hi - lo + 1)?;
        data.extend_from_slice(&self.data[lo..=hi]);
        Ok(V { data, offset: d })
    }
}

/// Computes a shortest edit path between the two sequences of `seqs`
/// using the Myers algorithm.
///
/// Element identity comes only from [`Sequences::is_same`]; no hashing or
/// ordering is assumed. When several shortest paths exist, deletions are
/// taken before insertions.
///
/// # Examples
///
/// ```
/// use listdiff::myers::{build, Segment};
///
/// let old = ["a", "b", "c", "d"];
/// let new = ["a", "c", "d", "e"];
/// let snake = build(&(&old[..], &new[..])).unwrap();
/// assert_eq!(
///     snake.segments(),
///     &[
///         Segment::Equal { old_pos: 0, new_pos: 0, len: 1 },
///         Segment::Delete { old_pos: 1, new_pos: 1 },
///         Segment::Equal { old_pos: 2, new_pos: 1, len: 2 },
///         Segment::Insert { old_pos: 4, new_pos: 3 },
///     ]
/// );
/// ```
///
/// # Errors
///
/// Fails only with [`DiffError::OutOfMemory`](crate::DiffError::OutOfMemory)
/// when the edit tables cannot be allocated.
pub fn build<S: Sequences + ?Sized>(seqs: &S) -> DiffResult<Snake> {
    let n = seqs.old_len();
    let m = seqs.new_len();
    let maxi = n + m;
    let mut v = V::new(maxi + 1)?;
    let mut trace: Vec<V> = Vec::new();
    'edits: for d in 0..=maxi as isize {
        for k in (-d..=d).step_by(2) {
            let mut x = if k == -d {
                v.get(k + 1)
            } else if k == d {
                v.get(k - 1) + 1
            } else {
                max(v.get(k + 1), v.get(k - 1) + 1)
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && seqs.is_same(x, y) {
                x += 1;
                y += 1;
            }
            v.set(k, x);
            // the first point past both ends is always (n, m) itself
            if x >= n && y >= m {
                trace.try_reserve(1)?;
                trace.push(v.window(d)?);
                break 'edits;
            }
        }
        trace.try_reserve(1)?;
        trace.push(v.window(d)?);
    }

    let segments = traceback(&trace, n, m)?;
    debug!(
        old_len = n,
        new_len = m,
        edits = trace.len() - 1,
        segments = segments.len(),
        "snake built"
    );
    Ok(Snake {
        old_len: n,
        new_len: m,
        segments,
    })
}

fn traceback(trace: &[V], n: usize, m: usize) -> DiffResult<Vec<Segment>> {
    let mut segments: Vec<Segment> = Vec::new();
    segments.try_reserve(2 * trace.len())?;
    let mut x = n;
    let mut y = m;
    for d in (1..trace.len()).rev() {
        let prev = &trace[d - 1];
        let d = d as isize;
        let k = x as isize - y as isize;
        let prev_k = if k == -d {
            k + 1
        } else if k == d {
            k - 1
        } else if prev.get(k - 1) < prev.get(k + 1) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = prev.get(prev_k);
        let prev_y = (prev_x as isize - prev_k) as usize;
        let (start_x, start_y, step) = if prev_k == k + 1 {
            (
                prev_x,
                prev_y + 1,
                Segment::Insert {
                    old_pos: prev_x,
                    new_pos: prev_y,
                },
            )
        } else {
            (
                prev_x + 1,
                prev_y,
                Segment::Delete {
                    old_pos: prev_x,
                    new_pos: prev_y,
                },
            )
        };
        if x > start_x {
            segments.push(Segment::Equal {
                old_pos: start_x,
                new_pos: start_y,
                len: x - start_x,
            });
        }
        segments.push(step);
        x = prev_x;
        y = prev_y;
    }
    debug_assert_eq!(x, y);
    if x > 0 {
        segments.push(Segment::Equal {
            old_pos: 0,
            new_pos: 0,
            len: x,
        });
    }

    segments.reverse();
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequences::from_fn;
    use proptest::prelude::*;

    fn snake_of<T: PartialEq>(old: &[T], new: &[T]) -> Snake {
        build(&(old, new)).unwrap()
    }

    fn lcs_len<T: PartialEq>(old: &[T], new: &[T]) -> usize {
        let mut table = vec![vec![0usize; new.len() + 1]; old.len() + 1];
        for i in 0..old.len() {
            for j in 0..new.len() {
                table[i + 1][j + 1] = if old[i] == new[j] {
                    table[i][j] + 1
                } else {
                    max(table[i][j + 1], table[i + 1][j])
                };
            }
        }
        table[old.len()][new.len()]
    }

    fn start(segment: &Segment) -> (usize, usize) {
        match *segment {
            Segment::Equal {
                old_pos, new_pos, ..
            }
            | Segment::Delete { old_pos, new_pos }
            | Segment::Insert { old_pos, new_pos } => (old_pos, new_pos),
        }
    }

    proptest! {
        #[test]
        fn test_path_is_continuous(
            old in prop::collection::vec(0u8..4, 0..24),
            new in prop::collection::vec(0u8..4, 0..24),
        ) {
            let snake = snake_of(&old, &new);
            let mut at = (0, 0);
            for segment in snake.segments() {
                prop_assert_eq!(start(segment), at);
                if let Segment::Equal { old_pos, new_pos, len } = *segment {
                    prop_assert!(len > 0);
                    for i in 0..len {
                        prop_assert_eq!(old[old_pos + i], new[new_pos + i]);
                    }
                }
                at = segment.end();
            }
            prop_assert_eq!(at, (old.len(), new.len()));
        }

        #[test]
        fn test_edit_count_is_minimal(
            old in prop::collection::vec(0u8..4, 0..24),
            new in prop::collection::vec(0u8..4, 0..24),
        ) {
            let snake = snake_of(&old, &new);
            let lcs = lcs_len(&old, &new);
            prop_assert_eq!(snake.common_len(), lcs);
            prop_assert_eq!(snake.edit_count(), old.len() + new.len() - 2 * lcs);
        }

        #[test]
        fn test_idempotency(els: Vec<u8>) {
            let snake = snake_of(&els, &els);
            prop_assert!(snake.is_identity());
            if els.is_empty() {
                prop_assert!(snake.segments().is_empty());
            } else {
                prop_assert_eq!(
                    snake.segments(),
                    &[Segment::Equal { old_pos: 0, new_pos: 0, len: els.len() }]
                );
            }
        }

        #[test]
        fn test_new_empty(els: Vec<u8>) {
            let snake = snake_of(&els, &[]);
            let expected: Vec<Segment> = (0..els.len())
                .map(|i| Segment::Delete { old_pos: i, new_pos: 0 })
                .collect();
            prop_assert_eq!(snake.segments(), expected.as_slice());
        }

        #[test]
        fn test_old_empty(els: Vec<u8>) {
            let snake = snake_of(&[], &els);
            let expected: Vec<Segment> = (0..els.len())
                .map(|i| Segment::Insert { old_pos: 0, new_pos: i })
                .collect();
            prop_assert_eq!(snake.segments(), expected.as_slice());
        }

        #[test]
        fn test_symmetry(
            old in prop::collection::vec(0u8..4, 0..24),
            new in prop::collection::vec(0u8..4, 0..24),
        ) {
            let forward = snake_of(&old, &new);
            let backward = snake_of(&new, &old);
            prop_assert_eq!(forward.edit_count(), backward.edit_count());
            prop_assert_eq!(forward.common_len(), backward.common_len());
        }

        #[test]
        fn test_is_same_stays_in_bounds(
            old_len in 0usize..16,
            new_len in 0usize..16,
            seed: u64,
        ) {
            let seqs = from_fn(old_len, new_len, |i, j| {
                assert!(i < old_len && j < new_len);
                (seed >> ((i * 7 + j * 3) % 64)) & 1 == 1
            });
            let snake = build(&seqs).unwrap();
            prop_assert_eq!(snake.old_len(), old_len);
            prop_assert_eq!(snake.new_len(), new_len);
        }
    }

    #[test]
    fn test_empty() {
        let snake = snake_of::<u8>(&[], &[]);
        assert!(snake.segments().is_empty());
        assert!(snake.is_identity());
    }

    #[test]
    fn test_replacement_deletes_first() {
        let snake = snake_of(&["a"], &["b"]);
        assert_eq!(
            snake.segments(),
            &[
                Segment::Delete {
                    old_pos: 0,
                    new_pos: 0
                },
                Segment::Insert {
                    old_pos: 1,
                    new_pos: 0
                },
            ]
        );
    }

    #[test]
    fn test_swap() {
        let snake = snake_of(&["a", "b", "c"], &["b", "a", "c"]);
        assert_eq!(
            snake.segments(),
            &[
                Segment::Delete {
                    old_pos: 0,
                    new_pos: 0
                },
                Segment::Equal {
                    old_pos: 1,
                    new_pos: 0,
                    len: 1
                },
                Segment::Insert {
                    old_pos: 2,
                    new_pos: 1
                },
                Segment::Equal {
                    old_pos: 2,
                    new_pos: 2,
                    len: 1
                },
            ]
        );
    }

    #[test]
    fn test_leading_removals() {
        let snake = snake_of(&["a", "b", "c", "d", "e"], &["c", "d", "e"]);
        assert_eq!(
            snake.segments(),
            &[
                Segment::Delete {
                    old_pos: 0,
                    new_pos: 0
                },
                Segment::Delete {
                    old_pos: 1,
                    new_pos: 0
                },
                Segment::Equal {
                    old_pos: 2,
                    new_pos: 0,
                    len: 3
                },
            ]
        );
    }

    #[test]
    fn test_insertion_in_middle() {
        let snake = snake_of(&["a", "c"], &["a", "b", "c"]);
        assert_eq!(snake.edit_count(), 1);
        assert_eq!(
            snake.segments()[1],
            Segment::Insert {
                old_pos: 1,
                new_pos: 1
            }
        );
    }
}

//! Merge sort copying sub-ranges into temporaries and writing back.

use sortscope_steps::Step;

use crate::machine::{Frame, Machine};

/// Lazy step sequence for merge sort over `input`.
pub fn steps(input: &[i64]) -> impl Iterator<Item = Step> + Send {
    let n = input.len();
    let bootstrap = if n > 0 {
        vec![Task::MarkAll { next: 0 }, Task::Sort { lo: 0, hi: n - 1 }]
    } else {
        Vec::new()
    };
    Machine::new(input, bootstrap)
}

/// An in-progress merge of `data[lo..=mid]` and `data[mid+1..]` from the
/// detached temporaries `left` and `right` back into position `k`.
struct Merge {
    lo: usize,
    mid: usize,
    left: Vec<i64>,
    right: Vec<i64>,
    i: usize,
    j: usize,
    k: usize,
}

enum Task {
    /// Split `lo..=hi` and queue the merge of its halves.
    Sort { lo: usize, hi: usize },
    /// Detach both halves into temporaries.
    Begin { lo: usize, mid: usize, hi: usize },
    /// Compare the two heads, or drain whichever side remains.
    Take(Merge),
    /// Consume the smaller head (ties favor the left temporary).
    Decide(Merge),
    /// Write one value back into the working copy.
    Write { k: usize, value: i64 },
    /// Everything is placed only once the top-level merge finishes.
    MarkAll { next: usize },
    Revert { a: usize, b: usize },
}

impl Frame for Task {
    fn run(self, data: &mut [i64], stack: &mut Vec<Self>) -> Option<Step> {
        match self {
            Task::Sort { lo, hi } => {
                if lo < hi {
                    let mid = (lo + hi) / 2;
                    stack.push(Task::Begin { lo, mid, hi });
                    stack.push(Task::Sort { lo: mid + 1, hi });
                    stack.push(Task::Sort { lo, hi: mid });
                }
                None
            }
            Task::Begin { lo, mid, hi } => {
                let merge = Merge {
                    lo,
                    mid,
                    left: data[lo..=mid].to_vec(),
                    right: data[mid + 1..=hi].to_vec(),
                    i: 0,
                    j: 0,
                    k: lo,
                };
                stack.push(Task::Take(merge));
                None
            }
            Task::Take(mut merge) => {
                if merge.i < merge.left.len() && merge.j < merge.right.len() {
                    let a = merge.lo + merge.i;
                    let b = merge.mid + 1 + merge.j;
                    stack.push(Task::Decide(merge));
                    Some(Step::Compare { a, b })
                } else if merge.i < merge.left.len() {
                    let value = merge.left[merge.i];
                    let k = merge.k;
                    merge.i += 1;
                    merge.k += 1;
                    stack.push(Task::Take(merge));
                    stack.push(Task::Revert { a: k, b: k });
                    stack.push(Task::Write { k, value });
                    None
                } else if merge.j < merge.right.len() {
                    let value = merge.right[merge.j];
                    let k = merge.k;
                    merge.j += 1;
                    merge.k += 1;
                    stack.push(Task::Take(merge));
                    stack.push(Task::Revert { a: k, b: k });
                    stack.push(Task::Write { k, value });
                    None
                } else {
                    None
                }
            }
            Task::Decide(mut merge) => {
                let a = merge.lo + merge.i;
                let b = merge.mid + 1 + merge.j;
                let value = if merge.left[merge.i] <= merge.right[merge.j] {
                    let v = merge.left[merge.i];
                    merge.i += 1;
                    v
                } else {
                    let v = merge.right[merge.j];
                    merge.j += 1;
                    v
                };
                let k = merge.k;
                merge.k += 1;
                stack.push(Task::Take(merge));
                stack.push(Task::Revert { a: k, b: k });
                stack.push(Task::Write { k, value });
                Some(Step::Revert { a, b })
            }
            Task::Write { k, value } => {
                data[k] = value;
                Some(Step::Overwrite { index: k, value })
            }
            Task::MarkAll { next } => {
                if next < data.len() {
                    stack.push(Task::MarkAll { next: next + 1 });
                    Some(Step::MarkSorted { index: next })
                } else {
                    None
                }
            }
            Task::Revert { a, b } => Some(Step::Revert { a, b }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortscope_steps::replay;

    #[test]
    fn duplicates_keep_their_relative_order() {
        let input = [5, 3, 5, 1];
        let all: Vec<_> = steps(&input).collect();

        assert_eq!(replay(&input, all.iter().copied()), vec![1, 3, 5, 5]);

        // The tie in the top-level merge compares left head (index 1,
        // value 5) against right head (index 3, value 5) and must consume
        // the left one: its placement at k=2 follows immediately, leaving
        // the right 5 for the tail drain at k=3.
        let tie_break = [
            Step::Compare { a: 1, b: 3 },
            Step::Revert { a: 1, b: 3 },
            Step::Overwrite { index: 2, value: 5 },
            Step::Revert { a: 2, b: 2 },
            Step::Overwrite { index: 3, value: 5 },
        ];
        let found = all
            .windows(tie_break.len())
            .any(|window| window == &tie_break[..]);
        assert!(found, "tie-break placement not found in {all:?}");
    }

    #[test]
    fn every_placement_reverts_its_own_highlight() {
        let input = [2, 1, 4, 3];
        let all: Vec<_> = steps(&input).collect();

        for (pos, step) in all.iter().enumerate() {
            if let Step::Overwrite { index, .. } = step {
                assert_eq!(
                    all[pos + 1],
                    Step::Revert { a: *index, b: *index },
                    "overwrite at {pos} not followed by its self-revert"
                );
            }
        }
    }

    #[test]
    fn marks_arrive_only_after_all_placements() {
        let all: Vec<_> = steps(&[3, 1, 2]).collect();
        let first_mark = all
            .iter()
            .position(|s| matches!(s, Step::MarkSorted { .. }))
            .unwrap();
        assert!(all[first_mark..]
            .iter()
            .all(|s| matches!(s, Step::MarkSorted { .. })));
    }

    #[test]
    fn empty_input_emits_nothing() {
        assert_eq!(steps(&[]).count(), 0);
    }

    #[test]
    fn singleton_is_marked_without_writes() {
        let all: Vec<_> = steps(&[4]).collect();
        assert_eq!(all, vec![Step::MarkSorted { index: 0 }]);
    }
}

//! Quick sort with Lomuto partitioning on the last element.

use sortscope_steps::Step;

use crate::machine::{Frame, Machine};

/// Lazy step sequence for quick sort over `input`.
pub fn steps(input: &[i64]) -> impl Iterator<Item = Step> + Send {
    let n = input.len();
    let bootstrap = if n > 0 {
        vec![Task::MarkAll { next: 0 }, Task::Sort { lo: 0, hi: n - 1 }]
    } else {
        Vec::new()
    };
    Machine::new(input, bootstrap)
}

enum Task {
    /// Partition `lo..=hi` (invariant: `lo <= hi`); a single-element range
    /// is final as-is.
    Sort { lo: usize, hi: usize },
    /// Compare element `j` against the pivot at `hi`; `i` is the next slot
    /// of the growing left partition.
    Scan { lo: usize, hi: usize, i: usize, j: usize },
    /// Grow the left partition when `j` belongs in it.
    Settle { lo: usize, hi: usize, i: usize, j: usize },
    Mark { index: usize },
    MarkAll { next: usize },
    Revert { a: usize, b: usize },
}

impl Frame for Task {
    fn run(self, data: &mut [i64], stack: &mut Vec<Self>) -> Option<Step> {
        match self {
            Task::Sort { lo, hi } => {
                if lo == hi {
                    Some(Step::MarkSorted { index: lo })
                } else {
                    stack.push(Task::Scan { lo, hi, i: lo, j: lo });
                    None
                }
            }
            Task::Scan { lo, hi, i, j } => {
                if j < hi {
                    stack.push(Task::Settle { lo, hi, i, j });
                    Some(Step::Compare { a: j, b: hi })
                } else {
                    // Pivot into its final slot; the swap is emitted even
                    // when the pivot is already there.
                    data.swap(i, hi);
                    if i < hi {
                        stack.push(Task::Sort { lo: i + 1, hi });
                    }
                    if i > lo {
                        stack.push(Task::Sort { lo, hi: i - 1 });
                    }
                    stack.push(Task::Mark { index: i });
                    stack.push(Task::Revert { a: i, b: hi });
                    Some(Step::Swap { a: i, b: hi })
                }
            }
            Task::Settle { lo, hi, i, j } => {
                let pivot = data[hi];
                if data[j] <= pivot {
                    if i != j {
                        data.swap(i, j);
                        stack.push(Task::Scan { lo, hi, i: i + 1, j: j + 1 });
                        stack.push(Task::Revert { a: j, b: hi });
                        stack.push(Task::Revert { a: i, b: j });
                        Some(Step::Swap { a: i, b: j })
                    } else {
                        stack.push(Task::Scan { lo, hi, i: i + 1, j: j + 1 });
                        Some(Step::Revert { a: j, b: hi })
                    }
                } else {
                    stack.push(Task::Scan { lo, hi, i, j: j + 1 });
                    Some(Step::Revert { a: j, b: hi })
                }
            }
            Task::Mark { index } => Some(Step::MarkSorted { index }),
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
    fn single_element_marks_without_comparisons() {
        let all: Vec<_> = steps(&[2]).collect();

        assert!(!all.iter().any(|s| matches!(s, Step::Compare { .. })));
        assert!(all
            .iter()
            .all(|s| matches!(s, Step::MarkSorted { index: 0 })));
        assert!(!all.is_empty());
    }

    #[test]
    fn reverse_input_sorts() {
        let input = [9, 7, 5, 3, 1];
        let all: Vec<_> = steps(&input).collect();
        assert_eq!(replay(&input, all.iter().copied()), vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn pivot_swap_is_emitted_even_in_place() {
        // [1, 2]: the pivot 2 is already in its slot, yet the partition
        // still announces the (self-)swap before marking it.
        let all: Vec<_> = steps(&[1, 2]).collect();
        assert!(all.contains(&Step::Swap { a: 1, b: 1 }));
        assert_eq!(replay(&[1, 2], all.iter().copied()), vec![1, 2]);
    }

    #[test]
    fn every_index_ends_up_marked() {
        let input = [4, 4, 2, 8, 0];
        let marked: std::collections::BTreeSet<_> = steps(&input)
            .filter_map(|s| match s {
                Step::MarkSorted { index } => Some(index),
                _ => None,
            })
            .collect();
        let expected: std::collections::BTreeSet<_> = (0..input.len()).collect();
        assert_eq!(marked, expected);
    }

    #[test]
    fn empty_input_emits_nothing() {
        assert_eq!(steps(&[]).count(), 0);
    }
}

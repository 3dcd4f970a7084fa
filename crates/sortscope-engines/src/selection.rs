//! Selection sort tracking a running minimum per slot.

use sortscope_steps::Step;

use crate::machine::{Frame, Machine};

/// Lazy step sequence for selection sort over `input`.
pub fn steps(input: &[i64]) -> impl Iterator<Item = Step> + Send {
    Machine::new(input, vec![Task::Select { i: 0 }])
}

enum Task {
    /// Begin the minimum search for slot `i`.
    Select { i: usize },
    /// Compare candidate `j` against the running minimum.
    Scan { i: usize, j: usize, min: usize },
    /// Adopt the candidate if strictly smaller, then clear highlights.
    Settle { i: usize, j: usize, min: usize },
    /// Move the minimum into slot `i` if it is elsewhere.
    Place { i: usize, min: usize },
    MarkSlot { i: usize },
    Revert { a: usize, b: usize },
}

impl Frame for Task {
    fn run(self, data: &mut [i64], stack: &mut Vec<Self>) -> Option<Step> {
        match self {
            Task::Select { i } => {
                if i < data.len() {
                    stack.push(Task::Scan { i, j: i + 1, min: i });
                }
                None
            }
            Task::Scan { i, j, min } => {
                if j < data.len() {
                    stack.push(Task::Settle { i, j, min });
                    Some(Step::Compare { a: min, b: j })
                } else {
                    stack.push(Task::Place { i, min });
                    None
                }
            }
            Task::Settle { i, j, min } => {
                // Strictly-less keeps the earliest index among equal values.
                let next = if data[j] < data[min] { j } else { min };
                stack.push(Task::Scan { i, j: j + 1, min: next });
                Some(Step::Revert { a: min, b: j })
            }
            Task::Place { i, min } => {
                if min != i {
                    data.swap(i, min);
                    stack.push(Task::MarkSlot { i });
                    stack.push(Task::Revert { a: i, b: min });
                    Some(Step::Swap { a: i, b: min })
                } else {
                    stack.push(Task::MarkSlot { i });
                    None
                }
            }
            Task::MarkSlot { i } => {
                stack.push(Task::Select { i: i + 1 });
                Some(Step::MarkSorted { index: i })
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
    fn earliest_index_wins_among_equal_minimums() {
        let input = [3, 1, 3, 2];
        let all: Vec<_> = steps(&input).collect();

        let swaps: Vec<_> = all
            .iter()
            .filter_map(|s| match s {
                Step::Swap { a, b } => Some((*a, *b)),
                _ => None,
            })
            .collect();

        // Slot 0 takes the 1 from index 1; slot 1 then takes the 2 from
        // index 3 — the tie between the two 3s never moves the later one
        // ahead of the earlier.
        assert_eq!(swaps, vec![(0, 1), (1, 3)]);
        assert_eq!(replay(&input, all.iter().copied()), vec![1, 2, 3, 3]);
    }

    #[test]
    fn in_place_minimum_emits_no_swap() {
        let all: Vec<_> = steps(&[1, 2, 3]).collect();
        assert!(!all.iter().any(|s| matches!(s, Step::Swap { .. })));

        let marked: Vec<_> = all
            .iter()
            .filter_map(|s| match s {
                Step::MarkSorted { index } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(marked, vec![0, 1, 2]);
    }

    #[test]
    fn revert_pairs_use_the_preceding_minimum() {
        // With [2, 1] the only comparison is (0, 1) and its revert must
        // cover the same pair even though the minimum moves to index 1.
        let all: Vec<_> = steps(&[2, 1]).collect();
        assert_eq!(all[0], Step::Compare { a: 0, b: 1 });
        assert_eq!(all[1], Step::Revert { a: 0, b: 1 });
    }

    #[test]
    fn empty_input_emits_nothing() {
        assert_eq!(steps(&[]).count(), 0);
    }
}

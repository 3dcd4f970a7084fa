//! Insertion sort walking each element left into the sorted prefix.

use sortscope_steps::Step;

use crate::machine::{Frame, Machine};

/// Lazy step sequence for insertion sort over `input`.
pub fn steps(input: &[i64]) -> impl Iterator<Item = Step> + Send {
    Machine::new(input, vec![Task::Outer { i: 1 }])
}

enum Task {
    /// Insert element `i`, or finish once the whole prefix is sorted.
    Outer { i: usize },
    /// Compare position `j` against its left neighbor.
    Walk { i: usize, j: usize },
    /// Exchange on inversion and keep walking, else stop this insertion.
    Settle { i: usize, j: usize },
    /// Re-mark 0..=i after the insertion; idempotent on purpose so every
    /// outer iteration reports the grown prefix the same way.
    MarkPrefix { i: usize, next: usize },
    Revert { a: usize, b: usize },
}

impl Frame for Task {
    fn run(self, data: &mut [i64], stack: &mut Vec<Self>) -> Option<Step> {
        let n = data.len();
        match self {
            Task::Outer { i } => {
                if i < n {
                    stack.push(Task::Walk { i, j: i });
                    None
                } else if n > 0 {
                    Some(Step::MarkSorted { index: n - 1 })
                } else {
                    None
                }
            }
            Task::Walk { i, j } => {
                if j > 0 {
                    stack.push(Task::Settle { i, j });
                    Some(Step::Compare { a: j - 1, b: j })
                } else {
                    stack.push(Task::MarkPrefix { i, next: 0 });
                    None
                }
            }
            Task::Settle { i, j } => {
                if data[j - 1] > data[j] {
                    data.swap(j - 1, j);
                    stack.push(Task::Walk { i, j: j - 1 });
                    stack.push(Task::Revert { a: j - 1, b: j });
                    Some(Step::Swap { a: j - 1, b: j })
                } else {
                    stack.push(Task::MarkPrefix { i, next: 0 });
                    Some(Step::Revert { a: j - 1, b: j })
                }
            }
            Task::MarkPrefix { i, next } => {
                if next <= i {
                    stack.push(Task::MarkPrefix { i, next: next + 1 });
                    Some(Step::MarkSorted { index: next })
                } else {
                    stack.push(Task::Outer { i: i + 1 });
                    None
                }
            }
            Task::Revert { a, b } => Some(Step::Revert { a, b }),
        }
    }
}

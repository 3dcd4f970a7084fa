//! Bubble sort with early exit on a swap-free pass.

use sortscope_steps::Step;

use crate::machine::{Frame, Machine};

/// Lazy step sequence for bubble sort over `input`.
pub fn steps(input: &[i64]) -> impl Iterator<Item = Step> + Send {
    Machine::new(input, vec![Task::Pass { pass: 0 }])
}

enum Task {
    /// Begin outer pass `pass`, or stop once every pass has run.
    Pass { pass: usize },
    /// Compare the pair at `j` within the unsorted prefix.
    Scan { pass: usize, j: usize, swapped: bool },
    /// Exchange the pair if inverted, then clear its highlight.
    Settle { pass: usize, j: usize, swapped: bool },
    /// After a pass: continue, or finish early when nothing moved.
    PassEnd { pass: usize, swapped: bool },
    MarkAscending { next: usize, end: usize },
    Revert { a: usize, b: usize },
}

impl Frame for Task {
    fn run(self, data: &mut [i64], stack: &mut Vec<Self>) -> Option<Step> {
        let n = data.len();
        match self {
            Task::Pass { pass } => {
                if pass < n {
                    stack.push(Task::Scan { pass, j: 0, swapped: false });
                }
                None
            }
            Task::Scan { pass, j, swapped } => {
                let limit = n - pass - 1;
                if j < limit {
                    stack.push(Task::Settle { pass, j, swapped });
                    Some(Step::Compare { a: j, b: j + 1 })
                } else {
                    stack.push(Task::PassEnd { pass, swapped });
                    Some(Step::MarkSorted { index: limit })
                }
            }
            Task::Settle { pass, j, swapped } => {
                if data[j] > data[j + 1] {
                    data.swap(j, j + 1);
                    stack.push(Task::Scan { pass, j: j + 1, swapped: true });
                    stack.push(Task::Revert { a: j, b: j + 1 });
                    Some(Step::Swap { a: j, b: j + 1 })
                } else {
                    stack.push(Task::Scan { pass, j: j + 1, swapped });
                    Some(Step::Revert { a: j, b: j + 1 })
                }
            }
            Task::PassEnd { pass, swapped } => {
                if swapped {
                    stack.push(Task::Pass { pass: pass + 1 });
                } else {
                    // Swap-free pass: everything left is already in place.
                    let limit = n - pass - 1;
                    if limit > 0 {
                        stack.push(Task::MarkAscending { next: 0, end: limit });
                    }
                }
                None
            }
            Task::MarkAscending { next, end } => {
                if next < end {
                    stack.push(Task::MarkAscending { next: next + 1, end });
                    Some(Step::MarkSorted { index: next })
                } else {
                    None
                }
            }
            Task::Revert { a, b } => Some(Step::Revert { a, b }),
        }
    }
}

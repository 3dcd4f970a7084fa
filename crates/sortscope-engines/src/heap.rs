//! Heap sort: bottom-up max-heap build, then repeated root extraction.

use sortscope_steps::Step;

use crate::machine::{Frame, Machine};

/// Lazy step sequence for heap sort over `input`.
pub fn steps(input: &[i64]) -> impl Iterator<Item = Step> + Send {
    let n = input.len();
    let mut bootstrap = Vec::new();
    if n > 0 {
        bootstrap.push(Task::Mark { index: 0 });
    }
    if n >= 2 {
        bootstrap.push(Task::Extract { end: n - 1 });
        bootstrap.push(Task::Build { index: n / 2 - 1 });
    }
    Machine::new(input, bootstrap)
}

enum Task {
    /// Heapify parent `index` during the bottom-up build, then the next
    /// parent down to the root.
    Build { index: usize },
    /// Move the heap root to `end`, retire it, and restore the shrunken
    /// heap (invariant: `end >= 1`).
    Extract { end: usize },
    /// Sift the value at `root` down within `data[..size]`.
    Sift { size: usize, root: usize },
    /// After comparing the root with its left child.
    SiftLeft { size: usize, root: usize },
    /// Compare the right child against whichever index holds the largest
    /// value so far.
    SiftRight { size: usize, root: usize, largest: usize },
    SiftSettle { size: usize, root: usize, largest: usize },
    /// Exchange with the larger child and keep sifting down that subtree.
    SiftFinish { size: usize, root: usize, largest: usize },
    Mark { index: usize },
    Revert { a: usize, b: usize },
}

impl Frame for Task {
    fn run(self, data: &mut [i64], stack: &mut Vec<Self>) -> Option<Step> {
        match self {
            Task::Build { index } => {
                if index > 0 {
                    stack.push(Task::Build { index: index - 1 });
                }
                stack.push(Task::Sift { size: data.len(), root: index });
                None
            }
            Task::Extract { end } => {
                data.swap(0, end);
                if end > 1 {
                    stack.push(Task::Extract { end: end - 1 });
                }
                stack.push(Task::Sift { size: end, root: 0 });
                stack.push(Task::Revert { a: 0, b: end });
                stack.push(Task::Mark { index: end });
                Some(Step::Swap { a: 0, b: end })
            }
            Task::Sift { size, root } => {
                let left = 2 * root + 1;
                if left < size {
                    stack.push(Task::SiftLeft { size, root });
                    Some(Step::Compare { a: root, b: left })
                } else {
                    None
                }
            }
            Task::SiftLeft { size, root } => {
                let left = 2 * root + 1;
                let largest = if data[left] > data[root] { left } else { root };
                stack.push(Task::SiftRight { size, root, largest });
                Some(Step::Revert { a: root, b: left })
            }
            Task::SiftRight { size, root, largest } => {
                let right = 2 * root + 2;
                if right < size {
                    stack.push(Task::SiftSettle { size, root, largest });
                    Some(Step::Compare { a: largest, b: right })
                } else {
                    stack.push(Task::SiftFinish { size, root, largest });
                    None
                }
            }
            Task::SiftSettle { size, root, largest } => {
                let right = 2 * root + 2;
                let next = if data[right] > data[largest] { right } else { largest };
                stack.push(Task::SiftFinish { size, root, largest: next });
                Some(Step::Revert { a: largest, b: right })
            }
            Task::SiftFinish { size, root, largest } => {
                if largest != root {
                    data.swap(root, largest);
                    stack.push(Task::Sift { size, root: largest });
                    stack.push(Task::Revert { a: root, b: largest });
                    Some(Step::Swap { a: root, b: largest })
                } else {
                    None
                }
            }
            Task::Mark { index } => Some(Step::MarkSorted { index }),
            Task::Revert { a, b } => Some(Step::Revert { a, b }),
        }
    }
}

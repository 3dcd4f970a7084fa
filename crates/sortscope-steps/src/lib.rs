//! Step events emitted by sorting engines.
//!
//! A sorting engine never talks to a renderer directly. It describes its own
//! behavior as a sequence of [`Step`] events, and observers rebuild every
//! piece of visible state by replaying that sequence in order. The event log
//! is the single source of truth: an observer that applies each mutation
//! event exactly once ends up with the same data the engine holds privately.

use serde::{Deserialize, Serialize};

/// One atomic, observable event in a sorting run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Step {
    /// The engine inspected the elements at `a` and `b`. No mutation.
    Compare { a: usize, b: usize },

    /// The elements at `a` and `b` have been exchanged in the engine's
    /// working copy; observers must mirror the exchange.
    Swap { a: usize, b: usize },

    /// The element at `index` has been set to `value` (engines that copy
    /// rather than exchange, e.g. merge).
    Overwrite { index: usize, value: i64 },

    /// Transient highlight at `a` and `b` returns to its resting
    /// appearance. Carries no data mutation. A single-index revert is
    /// expressed as `a == b`.
    Revert { a: usize, b: usize },

    /// The element at `index` is in its final position for this run.
    MarkSorted { index: usize },
}

impl Step {
    /// Whether this event changes data (as opposed to presentation only).
    pub fn is_mutation(&self) -> bool {
        matches!(self, Step::Swap { .. } | Step::Overwrite { .. })
    }

    /// Mirror this event's data mutation onto `data`. Non-mutating events
    /// leave `data` untouched.
    pub fn apply(&self, data: &mut [i64]) {
        match *self {
            Step::Swap { a, b } => data.swap(a, b),
            Step::Overwrite { index, value } => data[index] = value,
            Step::Compare { .. } | Step::Revert { .. } | Step::MarkSorted { .. } => {}
        }
    }
}

/// Rebuild the data state implied by a step sequence, starting from a copy
/// of `initial` and applying every mutation event in order.
pub fn replay<I>(initial: &[i64], steps: I) -> Vec<i64>
where
    I: IntoIterator<Item = Step>,
{
    let mut data = initial.to_vec();
    for step in steps {
        step.apply(&mut data);
    }
    data
}

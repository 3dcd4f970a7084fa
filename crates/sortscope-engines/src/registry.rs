//! Closed registry of selectable sorting engines.

use std::fmt;

use serde::{Deserialize, Serialize};
use sortscope_steps::Step;

use crate::{bubble, heap, insertion, merge, quick, selection};

/// A finite, one-shot stream of steps produced by an engine.
pub type StepSequence = Box<dyn Iterator<Item = Step> + Send>;

/// The fixed set of sorting engines a run can be started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl Algorithm {
    /// Every registered engine, in presentation order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
    ];

    /// Stable selection key.
    pub fn key(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Heap => "heap",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Heap => "Heap Sort",
        }
    }

    /// Resolve a selection key. Unknown keys are a configuration error for
    /// the caller to surface; the selector set is closed.
    pub fn from_key(key: &str) -> Option<Algorithm> {
        Algorithm::ALL.into_iter().find(|a| a.key() == key)
    }

    /// Start a fresh step sequence over `input`. Each call yields an
    /// independent sequence with its own working copy.
    pub fn steps(self, input: &[i64]) -> StepSequence {
        match self {
            Algorithm::Bubble => Box::new(bubble::steps(input)),
            Algorithm::Selection => Box::new(selection::steps(input)),
            Algorithm::Insertion => Box::new(insertion::steps(input)),
            Algorithm::Merge => Box::new(merge::steps(input)),
            Algorithm::Quick => Box::new(quick::steps(input)),
            Algorithm::Heap => Box::new(heap::steps(input)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

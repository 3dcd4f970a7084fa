//! Sorting engines that narrate themselves.
//!
//! Every engine here is a pure step producer: it takes a read-only integer
//! sequence, keeps a private working copy, and yields the step events of
//! `sortscope-steps` one at a time. Engines never touch presentation code
//! and observers never peek at the working copy — consuming the event
//! stream is the only channel between the two.
//!
//! # Suspendable by construction
//!
//! Engines are explicit frame machines rather than run-to-completion
//! functions: recursion (merge, quick, heap) becomes a stack of pending
//! sub-range frames, and loops become frames that re-push themselves. A
//! consumer can stop pulling between any two steps and resume later with
//! no cooperation from the engine.
//!
//! # Contracts
//!
//! For every engine and every finite input: replaying the emitted swap and
//! overwrite events over the input yields its sorted permutation; every
//! position is eventually marked sorted; and a compared pair is reverted
//! before either index takes part in another comparison.

mod bubble;
mod heap;
mod insertion;
mod machine;
mod merge;
mod quick;
mod registry;
mod selection;

pub use registry::{Algorithm, StepSequence};

//! Frame machine shared by all engines.
//!
//! Each engine is written as an explicit stack of frames instead of a
//! run-to-completion function: one frame executes per pull, may mutate the
//! working copy, may push follow-up frames (continuations and recursive
//! sub-ranges), and may emit a step. That makes every engine suspendable
//! between any two steps without coroutine support.

use sortscope_steps::Step;

/// One resumable unit of work in an engine.
///
/// Frames are pushed in reverse execution order (the stack is LIFO). A
/// frame that emits nothing simply advances the machine; the iterator keeps
/// popping until something is emitted or the stack runs dry.
pub(crate) trait Frame: Sized {
    fn run(self, data: &mut [i64], stack: &mut Vec<Self>) -> Option<Step>;
}

/// A private working copy plus the pending frame stack.
pub(crate) struct Machine<F> {
    data: Vec<i64>,
    stack: Vec<F>,
}

impl<F: Frame> Machine<F> {
    /// Build a machine over a fresh copy of `input` with the given
    /// bootstrap frames (bottom of stack first).
    pub(crate) fn new(input: &[i64], bootstrap: Vec<F>) -> Self {
        Self { data: input.to_vec(), stack: bootstrap }
    }
}

impl<F: Frame> Iterator for Machine<F> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        while let Some(frame) = self.stack.pop() {
            if let Some(step) = frame.run(&mut self.data, &mut self.stack) {
                return Some(step);
            }
        }
        None
    }
}

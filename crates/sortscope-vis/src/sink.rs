//! The renderer boundary: primitive draw commands issued during playback.

use serde::{Deserialize, Serialize};

/// Presentation role of a bar at some position.
///
/// Roles are abstract; mapping them to actual colors (or anything else) is
/// the renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    /// Resting appearance
    Default,
    /// Currently being inspected
    Compare,
    /// Just exchanged or written
    Swap,
    /// Final position for this run
    Sorted,
}

/// Receiver of the playback controller's draw calls.
///
/// Implementations only observe: they must not reach back into the
/// controller or the engines. Calls arrive well-formed and in order — one
/// `create_bars` per run, then color/height updates and sorted marks as
/// steps are consumed.
pub trait Renderer {
    /// A run started over `values`; (re)build the displayed bars.
    fn create_bars(&mut self, values: &[i64]);

    /// Recolor the bar at `index`.
    fn set_color(&mut self, index: usize, role: ColorRole);

    /// The displayed value at `index` changed.
    fn update_height(&mut self, index: usize, value: i64);

    /// The bar at `index` is final; its role is pinned to sorted.
    fn mark_sorted(&mut self, index: usize);
}

/// Wire form of a single renderer call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkCommand {
    CreateBars { values: Vec<i64> },
    SetColor { index: usize, role: ColorRole },
    UpdateHeight { index: usize, value: i64 },
    MarkSorted { index: usize },
}

/// A renderer that records every call, for tests and embeddings that want
/// to inspect or forward the command stream themselves.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<SinkCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received so far, in order.
    pub fn commands(&self) -> &[SinkCommand] {
        &self.commands
    }
}

impl Renderer for RecordingRenderer {
    fn create_bars(&mut self, values: &[i64]) {
        self.commands.push(SinkCommand::CreateBars { values: values.to_vec() });
    }

    fn set_color(&mut self, index: usize, role: ColorRole) {
        self.commands.push(SinkCommand::SetColor { index, role });
    }

    fn update_height(&mut self, index: usize, value: i64) {
        self.commands.push(SinkCommand::UpdateHeight { index, value });
    }

    fn mark_sorted(&mut self, index: usize) {
        self.commands.push(SinkCommand::MarkSorted { index });
    }
}

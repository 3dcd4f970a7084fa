//! Playback controller: one run at a time, one step per tick.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sortscope_engines::{Algorithm, StepSequence};
use sortscope_steps::Step;

use crate::error::{Error, Result};
use crate::sink::{ColorRole, Renderer};

/// Floor for the configurable step delay.
pub const MIN_STEP_DELAY_MS: u64 = 10;

/// Step delay used when nothing else is configured.
pub const DEFAULT_STEP_DELAY_MS: u64 = 800;

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// No run exists
    Idle,
    /// Steps are being consumed on a timer
    Running,
    /// A run exists but no steps are consumed
    Paused,
    /// The run's steps are exhausted and every index is marked
    Finished,
}

/// Configuration for a player.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Delay between consumed steps, in milliseconds
    pub step_delay_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { step_delay_ms: DEFAULT_STEP_DELAY_MS }
    }
}

/// What a tick accomplished, so the timer knows whether to re-arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One step was consumed and applied
    Advanced,
    /// The step sequence is exhausted; the run is complete
    Finished,
    /// Not running — a stale or misdirected tick, dropped
    Ignored,
}

/// One animated execution of an engine over one input.
struct Run {
    algorithm: Algorithm,
    original: Vec<i64>,
    mirror: Vec<i64>,
    sorted: BTreeSet<usize>,
    steps: StepSequence,
}

/// Drives a step sequence into a renderer, one event per tick.
///
/// The player never reads the engine's working copy: its mirror is rebuilt
/// exclusively from the delivered events, which keeps the event log the
/// single source of truth for everything the renderer was told.
pub struct Player<R> {
    renderer: R,
    run: Option<Run>,
    state: PlayerState,
    step_delay_ms: u64,
    steps_taken: u64,
}

impl<R: Renderer> Player<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_config(renderer, PlayerConfig::default())
    }

    pub fn with_config(renderer: R, config: PlayerConfig) -> Self {
        Self {
            renderer,
            run: None,
            state: PlayerState::Idle,
            step_delay_ms: config.step_delay_ms.max(MIN_STEP_DELAY_MS),
            steps_taken: 0,
        }
    }

    /// Begin a run over `values` with the selected engine.
    ///
    /// Returns `Ok(false)` without touching anything when a run is already
    /// active (re-entrant starts are ignored, not errors). An empty
    /// sequence is rejected.
    pub fn start(&mut self, values: Vec<i64>, algorithm: Algorithm) -> Result<bool> {
        if matches!(self.state, PlayerState::Running | PlayerState::Paused) {
            tracing::debug!("start ignored while a run is active");
            return Ok(false);
        }
        if values.is_empty() {
            return Err(Error::EmptySequence);
        }
        let steps = algorithm.steps(&values);
        self.begin(values, algorithm, steps);
        Ok(true)
    }

    fn begin(&mut self, values: Vec<i64>, algorithm: Algorithm, steps: StepSequence) {
        self.renderer.create_bars(&values);
        tracing::info!(%algorithm, len = values.len(), "run started");
        self.run = Some(Run {
            algorithm,
            original: values.clone(),
            mirror: values,
            sorted: BTreeSet::new(),
            steps,
        });
        self.steps_taken = 0;
        self.state = PlayerState::Running;
    }

    /// Consume exactly one step while running.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != PlayerState::Running {
            tracing::debug!(state = ?self.state, "tick ignored");
            return TickOutcome::Ignored;
        }
        match self.run.as_mut().and_then(|run| run.steps.next()) {
            Some(step) => {
                self.steps_taken += 1;
                self.apply(step);
                TickOutcome::Advanced
            }
            None => {
                self.finish();
                TickOutcome::Finished
            }
        }
    }

    fn apply(&mut self, step: Step) {
        let Some(run) = self.run.as_mut() else { return };
        match step {
            Step::Compare { a, b } => {
                self.renderer.set_color(a, ColorRole::Compare);
                self.renderer.set_color(b, ColorRole::Compare);
            }
            Step::Swap { a, b } => {
                run.mirror.swap(a, b);
                self.renderer.update_height(a, run.mirror[a]);
                self.renderer.update_height(b, run.mirror[b]);
                self.renderer.set_color(a, ColorRole::Swap);
                self.renderer.set_color(b, ColorRole::Swap);
            }
            Step::Overwrite { index, value } => {
                run.mirror[index] = value;
                self.renderer.update_height(index, value);
                self.renderer.set_color(index, ColorRole::Swap);
            }
            Step::Revert { a, b } => {
                // Sorted bars keep their pinned role; the recolor to the
                // resting appearance is suppressed for them.
                if !run.sorted.contains(&a) {
                    self.renderer.set_color(a, ColorRole::Default);
                }
                if !run.sorted.contains(&b) {
                    self.renderer.set_color(b, ColorRole::Default);
                }
            }
            Step::MarkSorted { index } => {
                if index < run.mirror.len() {
                    run.sorted.insert(index);
                    self.renderer.mark_sorted(index);
                }
            }
        }
    }

    /// The engine is done; make the terminal picture fully sorted even if
    /// the step sequence under-reported completions.
    fn finish(&mut self) {
        if let Some(run) = self.run.as_mut() {
            for index in 0..run.mirror.len() {
                if run.sorted.insert(index) {
                    self.renderer.mark_sorted(index);
                }
            }
            tracing::info!(
                algorithm = %run.algorithm,
                steps = self.steps_taken,
                "run finished"
            );
        }
        self.state = PlayerState::Finished;
    }

    /// Stop consuming steps; the pending timer callback is the driver's to
    /// cancel. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if self.state == PlayerState::Running {
            self.state = PlayerState::Paused;
            tracing::debug!("paused");
            true
        } else {
            false
        }
    }

    /// Pick the run back up exactly where it stopped.
    pub fn resume(&mut self) -> bool {
        if self.state == PlayerState::Paused {
            self.state = PlayerState::Running;
            tracing::debug!("resumed");
            true
        } else {
            false
        }
    }

    /// Discard the run and return to idle.
    pub fn reset(&mut self) {
        self.run = None;
        self.steps_taken = 0;
        self.state = PlayerState::Idle;
        tracing::debug!("reset");
    }

    /// Change the delay between steps, clamped to the floor.
    pub fn set_speed(&mut self, delay_ms: u64) {
        self.step_delay_ms = delay_ms.max(MIN_STEP_DELAY_MS);
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.run.as_ref().map(|run| run.algorithm)
    }

    /// The displayed values, rebuilt purely from applied events.
    pub fn mirror(&self) -> &[i64] {
        self.run.as_ref().map(|run| run.mirror.as_slice()).unwrap_or(&[])
    }

    /// The sequence the run was started from, untouched.
    pub fn original(&self) -> Option<&[i64]> {
        self.run.as_ref().map(|run| run.original.as_slice())
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// Playback status for reporting to frontends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub state: PlayerState,
    pub algorithm: Option<Algorithm>,
    pub values: Vec<i64>,
    pub sorted: Vec<usize>,
    pub steps_taken: u64,
    pub step_delay_ms: u64,
}

impl<R: Renderer> From<&Player<R>> for PlayerStatus {
    fn from(player: &Player<R>) -> Self {
        Self {
            state: player.state,
            algorithm: player.algorithm(),
            values: player.mirror().to_vec(),
            sorted: player
                .run
                .as_ref()
                .map(|run| run.sorted.iter().copied().collect())
                .unwrap_or_default(),
            steps_taken: player.steps_taken,
            step_delay_ms: player.step_delay_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{RecordingRenderer, SinkCommand};

    fn run_to_finish(player: &mut Player<RecordingRenderer>) {
        for _ in 0..10_000 {
            if player.tick() == TickOutcome::Finished {
                return;
            }
        }
        panic!("run did not finish");
    }

    #[test]
    fn full_run_reaches_the_sorted_picture() {
        let mut player = Player::new(RecordingRenderer::new());
        assert!(player.start(vec![8, 12, 88, 75, 106], Algorithm::Quick).unwrap());
        run_to_finish(&mut player);

        assert_eq!(player.state(), PlayerState::Finished);
        assert_eq!(player.mirror(), &[8, 12, 75, 88, 106]);
        assert_eq!(player.original(), Some(&[8, 12, 88, 75, 106][..]));

        let commands = player.renderer().commands();
        assert_eq!(
            commands[0],
            SinkCommand::CreateBars { values: vec![8, 12, 88, 75, 106] }
        );
        for index in 0..5 {
            assert!(commands.contains(&SinkCommand::MarkSorted { index }));
        }
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let mut player = Player::new(RecordingRenderer::new());
        assert_eq!(
            player.start(Vec::new(), Algorithm::Bubble),
            Err(Error::EmptySequence)
        );
        assert_eq!(player.state(), PlayerState::Idle);
        assert!(player.renderer().commands().is_empty());
    }

    #[test]
    fn start_while_active_is_ignored() {
        let mut player = Player::new(RecordingRenderer::new());
        assert!(player.start(vec![3, 1, 2], Algorithm::Bubble).unwrap());
        player.tick();

        assert!(!player.start(vec![9, 9, 9], Algorithm::Heap).unwrap());
        assert_eq!(player.algorithm(), Some(Algorithm::Bubble));
        assert_eq!(player.original(), Some(&[3, 1, 2][..]));

        player.pause();
        assert!(!player.start(vec![9, 9, 9], Algorithm::Heap).unwrap());
        assert_eq!(player.state(), PlayerState::Paused);
    }

    #[test]
    fn start_after_finish_replaces_the_run() {
        let mut player = Player::new(RecordingRenderer::new());
        player.start(vec![2, 1], Algorithm::Insertion).unwrap();
        run_to_finish(&mut player);

        assert!(player.start(vec![4, 3], Algorithm::Merge).unwrap());
        assert_eq!(player.state(), PlayerState::Running);
        assert_eq!(player.algorithm(), Some(Algorithm::Merge));
    }

    #[test]
    fn ticks_are_ignored_unless_running() {
        let mut player = Player::new(RecordingRenderer::new());
        assert_eq!(player.tick(), TickOutcome::Ignored);

        player.start(vec![2, 1, 3], Algorithm::Selection).unwrap();
        player.tick();
        player.pause();

        let before = player.steps_taken;
        assert_eq!(player.tick(), TickOutcome::Ignored);
        assert_eq!(player.steps_taken, before);
    }

    #[test]
    fn pause_resume_leaves_the_stream_identical() {
        let input = vec![5, 3, 4, 1, 2];

        let mut straight = Player::new(RecordingRenderer::new());
        straight.start(input.clone(), Algorithm::Heap).unwrap();
        run_to_finish(&mut straight);

        let mut interrupted = Player::new(RecordingRenderer::new());
        interrupted.start(input, Algorithm::Heap).unwrap();
        loop {
            interrupted.pause();
            assert_eq!(interrupted.tick(), TickOutcome::Ignored);
            interrupted.resume();
            if interrupted.tick() != TickOutcome::Advanced {
                break;
            }
        }

        assert_eq!(
            straight.renderer().commands(),
            interrupted.renderer().commands()
        );
    }

    #[test]
    fn reset_discards_the_run() {
        let mut player = Player::new(RecordingRenderer::new());
        player.start(vec![3, 2, 1], Algorithm::Bubble).unwrap();
        player.tick();
        player.reset();

        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(player.algorithm(), None);
        assert!(player.mirror().is_empty());

        let status = PlayerStatus::from(&player);
        assert_eq!(status.steps_taken, 0);
        assert!(status.sorted.is_empty());
    }

    #[test]
    fn exhausted_engine_gets_missing_marks_synthesized() {
        // A step source cut off before its own marks: finishing must still
        // leave every index in the sorted set, in index order.
        let values = vec![4, 2, 3, 1];
        let truncated: StepSequence =
            Box::new(Algorithm::Bubble.steps(&values).take(3));

        let mut player = Player::new(RecordingRenderer::new());
        player.begin(values, Algorithm::Bubble, truncated);
        run_to_finish(&mut player);

        let status = PlayerStatus::from(&player);
        assert_eq!(status.state, PlayerState::Finished);
        assert_eq!(status.sorted, vec![0, 1, 2, 3]);

        let marks: Vec<_> = player
            .renderer()
            .commands()
            .iter()
            .filter_map(|c| match c {
                SinkCommand::MarkSorted { index } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(marks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn sorted_bars_keep_their_role_through_reverts() {
        let mut player = Player::new(RecordingRenderer::new());
        player.start(vec![1, 2], Algorithm::Bubble).unwrap();
        run_to_finish(&mut player);

        // Once an index is marked, no later command recolors it away from
        // sorted.
        let commands = player.renderer().commands();
        let mut pinned = std::collections::BTreeSet::new();
        for command in commands {
            match command {
                SinkCommand::MarkSorted { index } => {
                    pinned.insert(*index);
                }
                SinkCommand::SetColor { index, .. } => {
                    assert!(!pinned.contains(index), "recolored a sorted bar");
                }
                _ => {}
            }
        }
    }

    #[test]
    fn speed_changes_clamp_to_the_floor() {
        let mut player = Player::new(RecordingRenderer::new());
        assert_eq!(player.step_delay(), Duration::from_millis(800));

        player.set_speed(250);
        assert_eq!(player.step_delay(), Duration::from_millis(250));

        player.set_speed(1);
        assert_eq!(player.step_delay(), Duration::from_millis(10));
    }
}

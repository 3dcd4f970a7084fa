//! Timer-driven playback with cooperative cancellation.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use sortscope_engines::Algorithm;

use crate::error::Result;
use crate::player::{Player, PlayerStatus, TickOutcome};
use crate::sink::Renderer;

/// Owns a player plus the single outstanding tick task.
///
/// At most one tick task exists at any time: starting and resuming arm it,
/// pausing and resetting cancel it and wait for it to stop before touching
/// player state, so a superseded run is never advanced by a stale timer.
pub struct Driver<R> {
    player: Arc<Mutex<Player<R>>>,
    pending: Option<JoinHandle<()>>,
}

impl<R: Renderer + Send + 'static> Driver<R> {
    pub fn new(player: Player<R>) -> Self {
        Self { player: Arc::new(Mutex::new(player)), pending: None }
    }

    /// Start a run and arm the timer. A start while a run is active is
    /// ignored and leaves the active run's timer untouched.
    pub async fn start(&mut self, values: Vec<i64>, algorithm: Algorithm) -> Result<()> {
        {
            let mut player = self.player.lock().await;
            if !player.start(values, algorithm)? {
                return Ok(());
            }
        }
        // Only a handle from a finished run can linger here.
        self.cancel_pending().await;
        self.arm();
        Ok(())
    }

    pub async fn pause(&mut self) {
        self.cancel_pending().await;
        self.player.lock().await.pause();
    }

    pub async fn resume(&mut self) {
        self.cancel_pending().await;
        let resumed = self.player.lock().await.resume();
        if resumed {
            self.arm();
        }
    }

    pub async fn reset(&mut self) {
        self.cancel_pending().await;
        self.player.lock().await.reset();
    }

    pub async fn set_speed(&mut self, delay_ms: u64) {
        self.player.lock().await.set_speed(delay_ms);
    }

    pub async fn status(&self) -> PlayerStatus {
        PlayerStatus::from(&*self.player.lock().await)
    }

    /// Arm the tick task: consume one step immediately, then keep stepping
    /// at the configured cadence until the run completes.
    fn arm(&mut self) {
        let player = Arc::clone(&self.player);
        self.pending = Some(tokio::spawn(async move {
            loop {
                let (outcome, delay) = {
                    let mut player = player.lock().await;
                    (player.tick(), player.step_delay())
                };
                if outcome != TickOutcome::Advanced {
                    break;
                }
                tokio::time::sleep(delay).await;
            }
        }));
    }

    /// Cancel the outstanding tick task and wait for it to stop. Aborting
    /// a task that already ran to completion is a swallowed no-op.
    async fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
            let _ = pending.await;
        }
    }
}

impl<R> Drop for Driver<R> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

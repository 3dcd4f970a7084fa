//! Sortscope playback
//!
//! Animated playback of sorting-engine step events with pause/resume.
//!
//! # Architecture
//!
//! - **Player**: consumes one step per tick, mirroring each event into its
//!   own copy of the data and forwarding primitive draw commands to a
//!   renderer
//! - **Driver**: the timer — one outstanding tick task, cancelled
//!   cooperatively on pause and reset
//! - **Renderer**: the out-of-process boundary; implementations record,
//!   broadcast, or draw, but never reach back into the engines
//! - **Server**: JSON playback controls plus a WebSocket stream of draw
//!   commands
//!
//! # Usage
//!
//! ```ignore
//! let mut player = Player::new(RecordingRenderer::new());
//! player.start(vec![8, 12, 88, 75, 106], Algorithm::Quick)?;
//! while player.tick() == TickOutcome::Advanced {}
//! ```

mod driver;
mod error;
mod player;
mod server;
mod sink;
mod source;

pub use driver::Driver;
pub use error::{Error, Result};
pub use player::{
    Player, PlayerConfig, PlayerState, PlayerStatus, TickOutcome, DEFAULT_STEP_DELAY_MS,
    MIN_STEP_DELAY_MS,
};
pub use server::{BroadcastRenderer, VisServer};
pub use sink::{ColorRole, RecordingRenderer, Renderer, SinkCommand};
pub use source::{parse_fields, FIELD_COUNT};

#[cfg(test)]
mod tests {
    use super::*;
    use sortscope_engines::Algorithm;

    #[test]
    fn validated_fields_feed_a_full_run() {
        let fields: Vec<String> = ["8", "12", "88", "75", "106"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let values = parse_fields(&fields).unwrap();

        let mut player = Player::new(RecordingRenderer::new());
        player.start(values, Algorithm::Merge).unwrap();
        while player.tick() == TickOutcome::Advanced {}

        assert_eq!(player.state(), PlayerState::Finished);
        assert_eq!(player.mirror(), &[8, 12, 75, 88, 106]);
    }

    #[test]
    fn every_registered_engine_plays_back() {
        for algorithm in Algorithm::ALL {
            let mut player = Player::new(RecordingRenderer::new());
            player.start(vec![3, 1, 4, 1, 5], algorithm).unwrap();
            while player.tick() == TickOutcome::Advanced {}

            assert_eq!(player.state(), PlayerState::Finished, "{algorithm}");
            assert_eq!(player.mirror(), &[1, 1, 3, 4, 5], "{algorithm}");
        }
    }

    #[test]
    fn unknown_selection_key_maps_to_an_error() {
        let error = Algorithm::from_key("shell")
            .ok_or_else(|| Error::UnknownAlgorithm("shell".into()))
            .unwrap_err();
        assert_eq!(error.to_string(), "unknown algorithm 'shell'");
    }
}

//! Audio playback: the `MediaEngine` seam and its `rodio` implementation.
//!
//! The playlist controller only talks to [`MediaEngine`]. The production
//! engine keeps a `rodio::Sink` on a dedicated audio thread; commands travel
//! over a channel and the engine's signals come back as [`EngineEvent`]s.

mod player;
mod sink;
mod thread;
mod types;

use std::path::Path;
use std::time::Duration;

pub use player::RodioEngine;
pub use types::{EngineEvent, PlaybackState};

/// Commands the playlist controller issues to whatever plays the audio.
///
/// Loading and playing are separate calls, but a load is always followed by
/// a play: there is no "load without playing" in the player.
pub trait MediaEngine {
    /// Replace the current source. Supersedes whatever was playing.
    fn load_source(&mut self, path: &Path);
    /// Start or resume playback of the current source from where it is.
    fn play(&mut self);
    fn pause(&mut self);
    fn set_position(&mut self, position: Duration);
    /// `volume` is a fraction in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
    fn state(&self) -> PlaybackState;
    fn position(&self) -> Duration;
}

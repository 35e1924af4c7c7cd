//! Audio-related small types and handles.
//!
//! This module defines the playback state enum, the commands sent to the
//! audio thread, the signals it sends back and the status snapshot shared
//! with the engine handle.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// The playback state of the media engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Signals emitted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    StateChanged(PlaybackState),
    /// Emitted when the position jumps (new source, seek). Regular progress
    /// is polled through [`super::MediaEngine::position`].
    PositionChanged(Duration),
    DurationChanged(Duration),
    /// The source could not be opened or decoded.
    SourceFailed { path: PathBuf, reason: String },
}

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Open a new source, paused at its start.
    Load(PathBuf),
    Play,
    Pause,
    /// Seek the current source to an absolute position.
    Seek(Duration),
    /// Volume as a fraction in `0.0..=1.0`.
    SetVolume(f32),
    /// Stop playback and end the audio thread.
    Quit,
}

#[derive(Debug, Clone, Default)]
/// Playback status shared between the audio thread and the engine handle.
pub(super) struct EngineStatus {
    pub state: PlaybackState,
    pub position: Duration,
    /// Whether a source is loaded (playing, paused or finished).
    pub has_source: bool,
}

pub(super) type StatusHandle = Arc<Mutex<EngineStatus>>;

//! The playlist controller: playlist, cursor and the commands they turn into.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use crate::audio::{EngineEvent, MediaEngine, PlaybackState};
use crate::error::PlayerError;
use crate::library::{Metadata, TagReader, Track};

use super::events::{PlaylistEvent, Subscribers};

/// Owns the ordered playlist and the playback cursor and translates
/// navigation intents into `MediaEngine` commands.
///
/// The cursor is `None` until something is selected; when it is `Some(i)`,
/// `i` is always a valid playlist position. Navigation wraps around.
pub struct PlaylistController<E, R> {
    engine: E,
    tags: R,
    tracks: Vec<Track>,
    cursor: Option<usize>,
    metadata: Option<Metadata>,
    duration: Option<Duration>,
    subscribers: Subscribers,
}

impl<E: MediaEngine, R: TagReader> PlaylistController<E, R> {
    pub fn new(engine: E, tags: R) -> Self {
        Self {
            engine,
            tags,
            tracks: Vec::new(),
            cursor: None,
            metadata: None,
            duration: None,
            subscribers: Subscribers::default(),
        }
    }

    /// Register for change notifications.
    pub fn subscribe(&mut self) -> Receiver<PlaylistEvent> {
        self.subscribers.subscribe()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Metadata of the track under the cursor, if one has been played.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Duration of the loaded source once the engine has reported it.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn state(&self) -> PlaybackState {
        self.engine.state()
    }

    pub fn position(&self) -> Duration {
        self.engine.position()
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    /// Append `tracks` in the order given. Nothing is deduplicated or validated;
    /// an unplayable entry only shows up when it is played.
    pub fn add_tracks<I: IntoIterator<Item = Track>>(&mut self, tracks: I) {
        let start = self.tracks.len();
        self.tracks.extend(tracks);
        let count = self.tracks.len() - start;
        if count > 0 {
            log::debug!("appended {count} tracks at {start}");
            self.subscribers
                .notify(PlaylistEvent::TracksAppended { start, count });
        }
    }

    /// Move the cursor to `index` and play it. An out-of-range index is
    /// rejected without touching the cursor.
    pub fn select_and_play(&mut self, index: usize) -> Result<(), PlayerError> {
        let len = self.tracks.len();
        if index >= len {
            return Err(PlayerError::InvalidIndex { index, len });
        }
        self.cursor = Some(index);
        self.play_current();
        Ok(())
    }

    /// Load and play the track under the cursor, then refresh the metadata and
    /// the now-playing highlight. Does nothing without a cursor.
    pub fn play_current(&mut self) {
        let Some(index) = self.cursor else {
            return;
        };
        let track = &self.tracks[index];
        self.engine.load_source(track.path());
        self.engine.play();
        self.duration = None;

        let metadata = self.tags.metadata(track);
        log::info!("playing #{index}: {}", metadata.title());
        self.metadata = Some(metadata.clone());
        self.subscribers
            .notify(PlaylistEvent::SelectionChanged(Some(index)));
        self.subscribers
            .notify(PlaylistEvent::MetadataChanged(metadata));
    }

    /// Pause when playing. Otherwise start the first track if nothing was ever
    /// selected, or resume the current source where it stopped.
    pub fn toggle_playback(&mut self) {
        if self.engine.state() == PlaybackState::Playing {
            self.engine.pause();
        } else if self.cursor.is_none() && !self.tracks.is_empty() {
            self.cursor = Some(0);
            self.play_current();
        } else {
            self.engine.play();
        }
    }

    /// Play the next track, wrapping to the first after the last. From an empty
    /// selection this starts at the first track.
    pub fn next(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        self.cursor = Some(self.cursor.map_or(0, |i| (i + 1) % len));
        self.play_current();
    }

    /// Play the previous track, wrapping to the last before the first. From an
    /// empty selection this starts at the last track.
    pub fn previous(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        self.cursor = Some(self.cursor.map_or(len - 1, |i| (i + len - 1) % len));
        self.play_current();
    }

    /// `percent` is expected in `0..=100`.
    pub fn set_volume(&mut self, percent: u8) {
        self.engine.set_volume(f32::from(percent) / 100.0);
    }

    pub fn seek(&mut self, position: Duration) {
        self.engine.set_position(position);
    }

    /// Mirror an engine signal to subscribers.
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        let event = match event {
            EngineEvent::StateChanged(state) => PlaylistEvent::PlaybackStateChanged(state),
            EngineEvent::PositionChanged(position) => PlaylistEvent::PositionChanged(position),
            EngineEvent::DurationChanged(duration) => {
                self.duration = Some(duration);
                PlaylistEvent::DurationChanged(duration)
            }
            EngineEvent::SourceFailed { path, reason } => {
                log::warn!("cannot play {}: {reason}", path.display());
                PlaylistEvent::SourceFailed { path, reason }
            }
        };
        self.subscribers.notify(event);
    }

    /// Periodic refresh: publish the engine position while playing.
    pub fn tick(&mut self) {
        if self.engine.state() == PlaybackState::Playing {
            let position = self.engine.position();
            self.subscribers
                .notify(PlaylistEvent::PositionChanged(position));
        }
    }
}

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::audio::PlaybackState;
use crate::library::Metadata;

/// Change notifications published by the playlist controller.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaylistEvent {
    /// `count` tracks were appended starting at playlist position `start`.
    TracksAppended { start: usize, count: usize },
    /// The now-playing position changed.
    SelectionChanged(Option<usize>),
    MetadataChanged(Metadata),
    PlaybackStateChanged(PlaybackState),
    PositionChanged(Duration),
    DurationChanged(Duration),
    /// The engine could not play `path`. Nothing else happens as a result.
    SourceFailed { path: PathBuf, reason: String },
}

/// Fan-out of notifications to any number of channel subscribers.
#[derive(Debug, Default)]
pub(super) struct Subscribers {
    senders: Vec<Sender<PlaylistEvent>>,
}

impl Subscribers {
    pub(super) fn subscribe(&mut self) -> Receiver<PlaylistEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber, dropping the ones whose
    /// receiver is gone.
    pub(super) fn notify(&mut self, event: PlaylistEvent) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

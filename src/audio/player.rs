use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::AudioError;

use super::MediaEngine;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, EngineEvent, EngineStatus, PlaybackState, StatusHandle};

/// Handle to the audio thread.
///
/// Commands are fire-and-forget. The shared status is updated optimistically
/// when a command is sent, so `state()` reflects the command right away; the
/// audio thread corrects it if the command could not be carried out.
pub struct RodioEngine {
    tx: Sender<AudioCmd>,
    status: StatusHandle,
    join: Option<JoinHandle<()>>,
}

impl RodioEngine {
    /// Open the default output device and start the audio thread at full volume.
    ///
    /// Returns the engine and the receiving end of its signals.
    pub fn new() -> Result<(Self, Receiver<EngineEvent>), AudioError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), AudioError>>(1);
        let status: StatusHandle = Arc::new(Mutex::new(EngineStatus::default()));

        let join = spawn_audio_thread(rx, event_tx, status.clone(), ready_tx);
        ready_rx.recv().map_err(|_| AudioError::Disconnected)??;

        Ok((Self::from_parts(tx, status, Some(join)), event_rx))
    }

    pub(super) fn from_parts(
        tx: Sender<AudioCmd>,
        status: StatusHandle,
        join: Option<JoinHandle<()>>,
    ) -> Self {
        Self { tx, status, join }
    }

    fn send(&self, cmd: AudioCmd) {
        if self.tx.send(cmd).is_err() {
            log::error!("{}", AudioError::Disconnected);
        }
    }

    fn update_status(&self, f: impl FnOnce(&mut EngineStatus)) {
        if let Ok(mut status) = self.status.lock() {
            f(&mut status);
        }
    }

    fn status(&self) -> EngineStatus {
        self.status
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

impl MediaEngine for RodioEngine {
    fn load_source(&mut self, path: &Path) {
        self.update_status(|s| {
            s.state = PlaybackState::Stopped;
            s.position = Duration::ZERO;
            s.has_source = true;
        });
        self.send(AudioCmd::Load(path.to_path_buf()));
    }

    fn play(&mut self) {
        self.update_status(|s| {
            if s.has_source {
                s.state = PlaybackState::Playing;
            }
        });
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.update_status(|s| {
            if s.state == PlaybackState::Playing {
                s.state = PlaybackState::Paused;
            }
        });
        self.send(AudioCmd::Pause);
    }

    fn set_position(&mut self, position: Duration) {
        self.send(AudioCmd::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(AudioCmd::SetVolume(volume));
    }

    fn state(&self) -> PlaybackState {
        self.status().state
    }

    fn position(&self) -> Duration {
        self.status().position
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCmd::Quit);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

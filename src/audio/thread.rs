use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::error::AudioError;

use super::sink::open_sink;
use super::types::{AudioCmd, EngineEvent, PlaybackState, StatusHandle};

/// How often the thread wakes up without commands to refresh the position
/// and notice the end of the source.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Spawn the audio thread. The output stream is opened on the thread itself;
/// the outcome is reported once through `ready`.
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<EngineEvent>,
    status: StatusHandle,
    ready: SyncSender<Result<(), AudioError>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready.send(Err(AudioError::from(e)));
                return;
            }
        };
        // Keep rodio's drop message off the terminal.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut audio = AudioThread {
            stream,
            sink: None,
            source: None,
            volume: 1.0,
            reported: PlaybackState::Stopped,
            events,
            status,
        };

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(AudioCmd::Quit) => {
                    audio.unload();
                    audio.set_state(PlaybackState::Stopped);
                    break;
                }
                Ok(cmd) => audio.handle(cmd),
                Err(RecvTimeoutError::Timeout) => audio.poll(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        log::debug!("audio thread finished");
    })
}

struct AudioThread {
    stream: OutputStream,
    sink: Option<Sink>,
    /// Path of the loaded source, kept to restart it once it has played out.
    source: Option<PathBuf>,
    volume: f32,
    /// Last state sent as `StateChanged`.
    reported: PlaybackState,
    events: Sender<EngineEvent>,
    status: StatusHandle,
}

impl AudioThread {
    fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Load(path) => self.load(&path),
            AudioCmd::Play => {
                if self.sink.as_ref().is_some_and(Sink::empty) {
                    // Played to the end: playing again starts over.
                    if let Some(path) = self.source.clone() {
                        self.load(&path);
                    }
                }
                match self.sink.as_ref() {
                    Some(sink) => {
                        sink.play();
                        self.set_state(PlaybackState::Playing);
                    }
                    // Nothing to resume; undo the handle's optimistic update.
                    None => self.set_state(PlaybackState::Stopped),
                }
            }
            AudioCmd::Pause => {
                if let Some(sink) = self.sink.as_ref() {
                    sink.pause();
                    self.set_state(PlaybackState::Paused);
                }
            }
            AudioCmd::Seek(position) => {
                let Some(sink) = self.sink.as_ref() else {
                    return;
                };
                if let Err(e) = sink.try_seek(position) {
                    log::warn!("seek to {position:?} failed: {e}");
                }
                let now = sink.get_pos();
                self.set_position(now);
                self.emit(EngineEvent::PositionChanged(now));
            }
            AudioCmd::SetVolume(volume) => {
                self.volume = volume;
                if let Some(sink) = self.sink.as_ref() {
                    sink.set_volume(volume);
                }
            }
            AudioCmd::Quit => {}
        }
    }

    fn load(&mut self, path: &Path) {
        self.unload();
        match open_sink(&self.stream, path, self.volume) {
            Ok((sink, duration)) => {
                log::info!("loaded {}", path.display());
                self.sink = Some(sink);
                self.source = Some(path.to_path_buf());
                if let Ok(mut status) = self.status.lock() {
                    status.has_source = true;
                }
                self.set_state(PlaybackState::Stopped);
                self.set_position(Duration::ZERO);
                self.emit(EngineEvent::PositionChanged(Duration::ZERO));
                if let Some(d) = duration {
                    self.emit(EngineEvent::DurationChanged(d));
                }
            }
            Err(e) => {
                log::warn!("{e}");
                self.set_state(PlaybackState::Stopped);
                self.emit(EngineEvent::SourceFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }

    fn unload(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.source = None;
        if let Ok(mut status) = self.status.lock() {
            status.has_source = false;
            status.position = Duration::ZERO;
        }
    }

    /// Periodic housekeeping between commands.
    fn poll(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        let position = sink.get_pos();
        let finished = self.reported == PlaybackState::Playing && sink.empty();
        self.set_position(position);
        if finished {
            // End of media: the player stops, it does not advance on its own.
            self.set_state(PlaybackState::Stopped);
        }
    }

    /// Publish `state` to the shared status and emit a signal when it differs
    /// from the last one reported.
    fn set_state(&mut self, state: PlaybackState) {
        if let Ok(mut status) = self.status.lock() {
            status.state = state;
        }
        if state != self.reported {
            self.reported = state;
            self.emit(EngineEvent::StateChanged(state));
        }
    }

    fn set_position(&self, position: Duration) {
        if let Ok(mut status) = self.status.lock() {
            status.position = position;
        }
    }

    fn emit(&self, event: EngineEvent) {
        // The receiver disappears only during shutdown.
        let _ = self.events.send(event);
    }
}

//! Presentation-side state: what the UI shows, kept in sync with the
//! controller through its notifications.

use std::time::Duration;

use crate::audio::PlaybackState;
use crate::config::ThemeSetting;
use crate::library::{self, Track};

use super::events::PlaylistEvent;

pub const NO_TRACK_TEXT: &str = "No track selected";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label of the toggle control: names the theme it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "🌙 Dark",
            Theme::Dark => "☀️ Light",
        }
    }
}

impl From<ThemeSetting> for Theme {
    fn from(s: ThemeSetting) -> Self {
        match s {
            ThemeSetting::Light => Theme::Light,
            ThemeSetting::Dark => Theme::Dark,
        }
    }
}

/// Whether keys drive the player or edit the "add path" prompt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    AddPath,
}

/// The view model rendered by `ui::draw`.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// One label per playlist entry, in playlist order.
    pub labels: Vec<String>,
    /// Row under the list cursor (what `enter` would play).
    pub highlighted: usize,
    /// Row shown in bold as the one playing.
    pub now_playing: Option<usize>,
    pub metadata_text: String,
    pub playback: PlaybackState,
    pub position: Duration,
    /// Known once the engine reports it; seeking is offered only then.
    pub duration: Option<Duration>,
    /// Volume in percent, as shown on the volume control.
    pub volume: u8,
    pub theme: Theme,
    pub input_mode: InputMode,
    pub input: String,
    /// Last problem worth telling the user about.
    pub status: Option<String>,
}

impl ViewState {
    pub fn new(theme: Theme, volume: u8) -> Self {
        Self {
            labels: Vec::new(),
            highlighted: 0,
            now_playing: None,
            metadata_text: NO_TRACK_TEXT.to_string(),
            playback: PlaybackState::Stopped,
            position: Duration::ZERO,
            duration: None,
            volume,
            theme,
            input_mode: InputMode::Normal,
            input: String::new(),
            status: None,
        }
    }

    /// Apply a controller notification. `tracks` is the controller's playlist.
    pub fn apply(&mut self, event: &PlaylistEvent, tracks: &[Track]) {
        match event {
            PlaylistEvent::TracksAppended { start, count } => {
                self.labels.truncate(*start);
                self.labels
                    .extend(tracks.iter().skip(*start).take(*count).map(library::list_label));
            }
            PlaylistEvent::SelectionChanged(selection) => {
                self.now_playing = *selection;
                if let Some(i) = selection {
                    self.highlighted = *i;
                }
                self.position = Duration::ZERO;
                self.duration = None;
                self.status = None;
            }
            PlaylistEvent::MetadataChanged(metadata) => {
                self.metadata_text = library::metadata_text(metadata);
            }
            PlaylistEvent::PlaybackStateChanged(state) => self.playback = *state,
            PlaylistEvent::PositionChanged(position) => self.position = *position,
            PlaylistEvent::DurationChanged(duration) => self.duration = Some(*duration),
            PlaylistEvent::SourceFailed { path, reason } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.status = Some(format!("Cannot play {name}: {reason}"));
            }
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.labels.is_empty()
    }

    /// Progress bar and seeking are enabled once a duration is known.
    pub fn progress_enabled(&self) -> bool {
        self.duration.is_some()
    }

    /// Fraction of the track played, for the progress bar.
    pub fn progress_ratio(&self) -> f64 {
        match self.duration {
            Some(d) if !d.is_zero() => (self.position.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Move the list cursor down, wrapping to the top.
    pub fn highlight_next(&mut self) {
        if self.has_tracks() {
            self.highlighted = (self.highlighted + 1) % self.labels.len();
        }
    }

    /// Move the list cursor up, wrapping to the bottom.
    pub fn highlight_prev(&mut self) {
        if self.has_tracks() {
            let len = self.labels.len();
            self.highlighted = (self.highlighted + len - 1) % len;
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Change the volume by `delta` points, keeping it within `0..=100`.
    /// Returns the new value.
    pub fn adjust_volume(&mut self, delta: i16) -> u8 {
        let v = (i16::from(self.volume) + delta).clamp(0, 100);
        self.volume = u8::try_from(v).unwrap_or(100);
        self.volume
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::AddPath;
        self.input.clear();
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input_char(&mut self) {
        self.input.pop();
    }

    /// Leave the prompt and hand back what was typed, trimmed.
    pub fn take_input(&mut self) -> String {
        self.input_mode = InputMode::Normal;
        let text = self.input.trim().to_string();
        self.input.clear();
        text
    }
}

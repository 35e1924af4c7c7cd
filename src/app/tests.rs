use super::*;
use crate::audio::{EngineEvent, MediaEngine, PlaybackState};
use crate::error::PlayerError;
use crate::library::{Metadata, TagReader, Tags, Track};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(PathBuf),
    Play,
    Pause,
    Seek(Duration),
    Volume(f32),
}

/// Records commands and follows the engine's state machine.
#[derive(Default)]
struct FakeEngine {
    calls: Vec<Call>,
    state: PlaybackState,
    position: Duration,
    source: Option<PathBuf>,
}

impl MediaEngine for FakeEngine {
    fn load_source(&mut self, path: &Path) {
        self.calls.push(Call::Load(path.to_path_buf()));
        self.source = Some(path.to_path_buf());
        self.state = PlaybackState::Stopped;
        self.position = Duration::ZERO;
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
        if self.source.is_some() {
            self.state = PlaybackState::Playing;
        }
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    fn set_position(&mut self, position: Duration) {
        self.calls.push(Call::Seek(position));
        self.position = position;
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(Call::Volume(volume));
    }

    fn state(&self) -> PlaybackState {
        self.state
    }

    fn position(&self) -> Duration {
        self.position
    }
}

/// Files whose name starts with "tagged" carry a title tag only.
struct FakeTags;

impl TagReader for FakeTags {
    fn read_tags(&self, path: &Path) -> Option<Tags> {
        let name = path.file_stem()?.to_str()?;
        name.starts_with("tagged").then(|| Tags {
            title: Some(name.to_uppercase()),
            ..Tags::default()
        })
    }
}

type Controller = PlaylistController<FakeEngine, FakeTags>;

fn controller_with(names: &[&str]) -> Controller {
    let mut c = PlaylistController::new(FakeEngine::default(), FakeTags);
    c.add_tracks(names.iter().map(|n| Track::new(format!("/music/{n}"))));
    c
}

fn paths(c: &Controller) -> Vec<PathBuf> {
    c.tracks().iter().map(|t| t.path.clone()).collect()
}

fn loads(c: &Controller) -> Vec<PathBuf> {
    c.engine()
        .calls
        .iter()
        .filter_map(|call| match call {
            Call::Load(p) => Some(p.clone()),
            _ => None,
        })
        .collect()
}

fn drain(rx: &Receiver<PlaylistEvent>) -> Vec<PlaylistEvent> {
    rx.try_iter().collect()
}

#[test]
fn add_tracks_appends_in_order_without_dedup() {
    let mut c = controller_with(&["a.mp3", "b.mp3"]);
    c.add_tracks([Track::new("/music/c.mp3"), Track::new("/music/a.mp3")]);
    assert_eq!(
        paths(&c),
        vec![
            PathBuf::from("/music/a.mp3"),
            PathBuf::from("/music/b.mp3"),
            PathBuf::from("/music/c.mp3"),
            PathBuf::from("/music/a.mp3"),
        ]
    );
    assert_eq!(c.cursor(), None);
    assert!(c.engine().calls.is_empty());
}

#[test]
fn add_tracks_notifies_the_appended_range() {
    let mut c = controller_with(&["a.mp3"]);
    let rx = c.subscribe();
    c.add_tracks([Track::new("/music/b.mp3"), Track::new("/music/c.mp3")]);
    c.add_tracks(Vec::new());
    assert_eq!(
        drain(&rx),
        vec![PlaylistEvent::TracksAppended { start: 1, count: 2 }]
    );
}

#[test]
fn select_and_play_loads_and_plays() {
    let mut c = controller_with(&["a.mp3", "b.mp3", "c.mp3"]);
    c.select_and_play(1).unwrap();
    assert_eq!(c.cursor(), Some(1));
    assert_eq!(
        c.engine().calls,
        vec![Call::Load(PathBuf::from("/music/b.mp3")), Call::Play]
    );
    assert_eq!(c.state(), PlaybackState::Playing);
}

#[test]
fn select_and_play_rejects_out_of_range_index() {
    let mut c = controller_with(&["a.mp3", "b.mp3"]);
    c.select_and_play(0).unwrap();
    let err = c.select_and_play(2).unwrap_err();
    assert_eq!(err, PlayerError::InvalidIndex { index: 2, len: 2 });
    assert_eq!(c.cursor(), Some(0));
    assert_eq!(loads(&c).len(), 1);
}

#[test]
fn play_current_without_cursor_is_a_no_op() {
    let mut c = controller_with(&["a.mp3"]);
    let rx = c.subscribe();
    c.play_current();
    assert!(c.engine().calls.is_empty());
    assert!(drain(&rx).is_empty());
}

#[test]
fn play_current_publishes_highlight_and_metadata() {
    let mut c = controller_with(&["plain.mp3", "tagged.mp3"]);
    let rx = c.subscribe();

    c.select_and_play(0).unwrap();
    c.select_and_play(1).unwrap();

    assert_eq!(
        drain(&rx),
        vec![
            PlaylistEvent::SelectionChanged(Some(0)),
            PlaylistEvent::MetadataChanged(Metadata::FileName("plain.mp3".into())),
            PlaylistEvent::SelectionChanged(Some(1)),
            PlaylistEvent::MetadataChanged(Metadata::Tagged {
                title: "TAGGED".into(),
                artist: "Unknown Artist".into(),
                album: "Unknown Album".into(),
            }),
        ]
    );
    assert_eq!(c.metadata().map(Metadata::title), Some("TAGGED"));
}

#[test]
fn next_wraps_around_after_length_steps() {
    let mut c = controller_with(&["a.mp3", "b.mp3", "c.mp3", "d.mp3"]);
    c.select_and_play(2).unwrap();
    for _ in 0..c.tracks().len() {
        c.next();
    }
    assert_eq!(c.cursor(), Some(2));
}

#[test]
fn navigation_wraps_at_both_ends() {
    let mut c = controller_with(&["a.mp3", "b.mp3", "c.mp3"]);
    c.select_and_play(0).unwrap();
    c.previous();
    assert_eq!(c.cursor(), Some(2));
    c.next();
    assert_eq!(c.cursor(), Some(0));
    assert_eq!(
        loads(&c),
        vec![
            PathBuf::from("/music/a.mp3"),
            PathBuf::from("/music/c.mp3"),
            PathBuf::from("/music/a.mp3"),
        ]
    );
}

#[test]
fn navigation_from_empty_selection_picks_first_or_last() {
    let mut c = controller_with(&["a.mp3", "b.mp3", "c.mp3"]);
    c.next();
    assert_eq!(c.cursor(), Some(0));

    let mut c = controller_with(&["a.mp3", "b.mp3", "c.mp3"]);
    c.previous();
    assert_eq!(c.cursor(), Some(2));
    assert_eq!(loads(&c), vec![PathBuf::from("/music/c.mp3")]);
}

#[test]
fn navigation_on_empty_playlist_does_nothing() {
    let mut c = controller_with(&[]);
    let rx = c.subscribe();
    c.next();
    c.previous();
    assert_eq!(c.cursor(), None);
    assert!(c.engine().calls.is_empty());
    assert!(drain(&rx).is_empty());
}

#[test]
fn toggle_while_playing_pauses_in_place() {
    let mut c = controller_with(&["a.mp3", "b.mp3"]);
    c.select_and_play(1).unwrap();
    c.toggle_playback();

    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(c.cursor(), Some(1));
    assert_eq!(c.engine().source, Some(PathBuf::from("/music/b.mp3")));
    assert_eq!(c.engine().calls.last(), Some(&Call::Pause));
}

#[test]
fn toggle_from_empty_selection_starts_the_first_track() {
    let mut c = controller_with(&["a.mp3", "b.mp3"]);
    c.toggle_playback();
    assert_eq!(c.cursor(), Some(0));
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(
        c.engine().calls,
        vec![Call::Load(PathBuf::from("/music/a.mp3")), Call::Play]
    );
}

#[test]
fn toggle_while_paused_resumes_without_reloading_or_seeking() {
    let mut c = controller_with(&["a.mp3"]);
    c.select_and_play(0).unwrap();
    c.seek(Duration::from_secs(42));
    c.toggle_playback();
    c.toggle_playback();

    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.position(), Duration::from_secs(42));
    assert_eq!(loads(&c).len(), 1);
    assert_eq!(c.engine().calls.last(), Some(&Call::Play));
}

#[test]
fn toggle_on_empty_playlist_just_asks_to_play() {
    let mut c = controller_with(&[]);
    c.toggle_playback();
    assert_eq!(c.cursor(), None);
    assert_eq!(c.engine().calls, vec![Call::Play]);
    assert_eq!(c.state(), PlaybackState::Stopped);
}

#[test]
fn set_volume_forwards_a_fraction() {
    let mut c = controller_with(&[]);
    c.set_volume(50);
    c.set_volume(100);
    c.set_volume(0);
    assert_eq!(
        c.engine().calls,
        vec![Call::Volume(0.5), Call::Volume(1.0), Call::Volume(0.0)]
    );
}

#[test]
fn seek_is_forwarded_unchecked() {
    let mut c = controller_with(&["a.mp3"]);
    c.seek(Duration::from_secs(3600));
    assert_eq!(c.engine().calls, vec![Call::Seek(Duration::from_secs(3600))]);
}

#[test]
fn engine_signals_are_mirrored() {
    let mut c = controller_with(&["a.mp3"]);
    let rx = c.subscribe();
    c.handle_engine_event(EngineEvent::StateChanged(PlaybackState::Playing));
    c.handle_engine_event(EngineEvent::DurationChanged(Duration::from_secs(180)));
    c.handle_engine_event(EngineEvent::PositionChanged(Duration::from_secs(3)));

    assert_eq!(c.duration(), Some(Duration::from_secs(180)));
    assert_eq!(
        drain(&rx),
        vec![
            PlaylistEvent::PlaybackStateChanged(PlaybackState::Playing),
            PlaylistEvent::DurationChanged(Duration::from_secs(180)),
            PlaylistEvent::PositionChanged(Duration::from_secs(3)),
        ]
    );
}

#[test]
fn new_source_forgets_the_old_duration() {
    let mut c = controller_with(&["a.mp3", "b.mp3"]);
    c.select_and_play(0).unwrap();
    c.handle_engine_event(EngineEvent::DurationChanged(Duration::from_secs(180)));
    c.next();
    assert_eq!(c.duration(), None);
}

#[test]
fn unplayable_source_does_not_advance() {
    let mut c = controller_with(&["broken.mp3", "b.mp3"]);
    c.select_and_play(0).unwrap();
    let rx = c.subscribe();
    c.handle_engine_event(EngineEvent::SourceFailed {
        path: PathBuf::from("/music/broken.mp3"),
        reason: "cannot decode".into(),
    });

    assert_eq!(c.cursor(), Some(0));
    assert_eq!(loads(&c).len(), 1);
    assert_eq!(
        drain(&rx),
        vec![PlaylistEvent::SourceFailed {
            path: PathBuf::from("/music/broken.mp3"),
            reason: "cannot decode".into(),
        }]
    );
}

#[test]
fn tick_reports_position_only_while_playing() {
    let mut c = controller_with(&["a.mp3"]);
    let rx = c.subscribe();
    c.tick();
    assert!(drain(&rx).is_empty());

    c.select_and_play(0).unwrap();
    c.seek(Duration::from_millis(1500));
    drain(&rx);
    c.tick();
    assert_eq!(
        drain(&rx),
        vec![PlaylistEvent::PositionChanged(Duration::from_millis(1500))]
    );

    c.toggle_playback();
    c.tick();
    assert!(drain(&rx).is_empty());
}

#[test]
fn dropped_subscribers_are_pruned() {
    let mut c = controller_with(&["a.mp3"]);
    let gone = c.subscribe();
    let kept = c.subscribe();
    drop(gone);
    c.select_and_play(0).unwrap();
    assert_eq!(drain(&kept).len(), 2);
}

fn view_with(c: &mut Controller) -> (ViewState, Receiver<PlaylistEvent>) {
    let rx = c.subscribe();
    (ViewState::new(Theme::Light, 50), rx)
}

fn pump(view: &mut ViewState, rx: &Receiver<PlaylistEvent>, c: &Controller) {
    for event in rx.try_iter() {
        view.apply(&event, c.tracks());
    }
}

#[test]
fn view_follows_appends_and_selection() {
    let mut c = controller_with(&[]);
    let (mut view, rx) = view_with(&mut c);
    assert_eq!(view.metadata_text, "No track selected");

    c.add_tracks([Track::new("/music/a.mp3"), Track::new("/music/tagged.ogg")]);
    c.add_tracks([Track::new("/music/c.wav")]);
    c.select_and_play(1).unwrap();
    pump(&mut view, &rx, &c);

    assert_eq!(view.labels, vec!["a.mp3", "tagged.ogg", "c.wav"]);
    assert_eq!(view.now_playing, Some(1));
    assert_eq!(view.highlighted, 1);
    assert_eq!(
        view.metadata_text,
        "🎵 TAGGED\n👤 Unknown Artist\n💿 Unknown Album"
    );
}

#[test]
fn view_enables_progress_once_duration_is_known() {
    let mut c = controller_with(&["a.mp3"]);
    let (mut view, rx) = view_with(&mut c);
    c.select_and_play(0).unwrap();
    pump(&mut view, &rx, &c);
    assert!(!view.progress_enabled());
    assert_eq!(view.progress_ratio(), 0.0);

    c.handle_engine_event(EngineEvent::DurationChanged(Duration::from_secs(100)));
    c.handle_engine_event(EngineEvent::PositionChanged(Duration::from_secs(25)));
    pump(&mut view, &rx, &c);
    assert!(view.progress_enabled());
    assert_eq!(view.progress_ratio(), 0.25);
}

#[test]
fn view_reports_unplayable_sources() {
    let mut c = controller_with(&["broken.mp3"]);
    let (mut view, rx) = view_with(&mut c);
    c.handle_engine_event(EngineEvent::SourceFailed {
        path: PathBuf::from("/music/broken.mp3"),
        reason: "cannot decode".into(),
    });
    pump(&mut view, &rx, &c);
    assert_eq!(
        view.status.as_deref(),
        Some("Cannot play broken.mp3: cannot decode")
    );
}

#[test]
fn view_highlight_wraps() {
    let mut view = ViewState::new(Theme::Light, 50);
    view.highlight_next();
    assert_eq!(view.highlighted, 0);

    view.labels = vec!["a".into(), "b".into(), "c".into()];
    view.highlight_prev();
    assert_eq!(view.highlighted, 2);
    view.highlight_next();
    assert_eq!(view.highlighted, 0);
}

#[test]
fn view_volume_stays_in_range() {
    let mut view = ViewState::new(Theme::Light, 50);
    assert_eq!(view.adjust_volume(45), 95);
    assert_eq!(view.adjust_volume(10), 100);
    assert_eq!(view.adjust_volume(-150), 0);
}

#[test]
fn theme_toggle_flips_theme_and_label() {
    let mut view = ViewState::new(Theme::Light, 50);
    assert_eq!(view.theme.toggle_label(), "🌙 Dark");
    view.toggle_theme();
    assert_eq!(view.theme, Theme::Dark);
    assert_eq!(view.theme.toggle_label(), "☀️ Light");
    view.toggle_theme();
    assert_eq!(view.theme, Theme::Light);
}

#[test]
fn add_prompt_hands_back_trimmed_input() {
    let mut view = ViewState::new(Theme::Light, 50);
    view.enter_add_mode();
    assert_eq!(view.input_mode, InputMode::AddPath);
    for ch in " ~/Music/x".chars() {
        view.push_input_char(ch);
    }
    view.pop_input_char();
    assert_eq!(view.take_input(), "~/Music/");
    assert_eq!(view.input_mode, InputMode::Normal);
    assert!(view.input.is_empty());
}

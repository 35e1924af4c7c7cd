use std::env;
use std::io::Stdout;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{InputMode, PlaylistController, PlaylistEvent, ViewState};
use crate::audio::{EngineEvent, MediaEngine};
use crate::config;
use crate::library::{self, TagReader};
use crate::ui;

/// Channels feeding the loop besides the keyboard.
pub struct Inbox {
    pub engine: Receiver<EngineEvent>,
    pub ticks: Receiver<()>,
    pub playlist: Receiver<PlaylistEvent>,
}

/// Main terminal event loop: forwards engine signals and ticks to the
/// controller, mirrors its notifications into `view`, draws and handles keys.
/// Returns `Ok(())` when the user quits.
pub fn run<E: MediaEngine, R: TagReader>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    controller: &mut PlaylistController<E, R>,
    view: &mut ViewState,
    inbox: &Inbox,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(event) = inbox.engine.try_recv() {
            controller.handle_engine_event(event);
        }
        while inbox.ticks.try_recv().is_ok() {
            controller.tick();
        }
        while let Ok(event) = inbox.playlist.try_recv() {
            view.apply(&event, controller.tracks());
        }

        terminal.draw(|f| ui::draw(f, view, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, controller, view) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns `true` when the key asks to quit.
pub(super) fn handle_key_event<E: MediaEngine, R: TagReader>(
    key: KeyEvent,
    settings: &config::Settings,
    controller: &mut PlaylistController<E, R>,
    view: &mut ViewState,
) -> bool {
    if view.input_mode == InputMode::AddPath {
        match key.code {
            KeyCode::Esc => view.cancel_input(),
            KeyCode::Backspace => view.pop_input_char(),
            KeyCode::Enter => {
                let input = view.take_input();
                if !input.is_empty() {
                    add_path(&input, settings, controller, view);
                }
            }
            KeyCode::Char(c) if !c.is_control() => view.push_input_char(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => view.highlight_next(),
        KeyCode::Char('k') | KeyCode::Up => view.highlight_prev(),
        KeyCode::Enter => {
            if view.has_tracks() {
                if let Err(e) = controller.select_and_play(view.highlighted) {
                    log::error!("{e}");
                    view.status = Some(e.to_string());
                }
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => controller.toggle_playback(),
        KeyCode::Char('l') => controller.next(),
        KeyCode::Char('h') => controller.previous(),
        KeyCode::Char('L') => seek_by(controller, settings.controls.scrub_seconds, true),
        KeyCode::Char('H') => seek_by(controller, settings.controls.scrub_seconds, false),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let volume = view.adjust_volume(i16::from(settings.controls.volume_step));
            controller.set_volume(volume);
        }
        KeyCode::Char('-') => {
            let volume = view.adjust_volume(-i16::from(settings.controls.volume_step));
            controller.set_volume(volume);
        }
        KeyCode::Char('t') => view.toggle_theme(),
        KeyCode::Char('a') => view.enter_add_mode(),
        _ => {}
    }

    false
}

/// Scrub by `secs` within the current source. Seeking is only offered once the
/// duration is known, and never runs past either end.
fn seek_by<E: MediaEngine, R: TagReader>(
    controller: &mut PlaylistController<E, R>,
    secs: u64,
    forward: bool,
) {
    let Some(duration) = controller.duration() else {
        return;
    };
    let step = Duration::from_secs(secs);
    let position = controller.position();
    let target = if forward {
        position.saturating_add(step).min(duration)
    } else {
        position.saturating_sub(step)
    };
    controller.seek(target);
}

fn add_path<E: MediaEngine, R: TagReader>(
    input: &str,
    settings: &config::Settings,
    controller: &mut PlaylistController<E, R>,
    view: &mut ViewState,
) {
    let path = expand_tilde(input);
    let before = controller.tracks().len();
    controller.add_tracks(library::expand_paths(&[&path], &settings.library));
    if controller.tracks().len() == before {
        view.status = Some(format!("No audio files found in {}", path.display()));
    }
}

/// Expand a leading `~` to `$HOME`.
pub(super) fn expand_tilde(input: &str) -> PathBuf {
    let home = env::var_os("HOME").map(PathBuf::from);
    match (input.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(input),
    }
}

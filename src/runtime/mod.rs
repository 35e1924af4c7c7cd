use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{PlaylistController, ViewState};
use crate::audio::RodioEngine;
use crate::library::{self, LoftyTagReader};

use ticker::Ticker;

mod event_loop;
mod logging;
mod settings;
mod ticker;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init(&settings);

    let inputs: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();

    let (engine, engine_events) = RodioEngine::new()?;
    let mut controller = PlaylistController::new(engine, LoftyTagReader);
    let playlist_events = controller.subscribe();
    let mut view = ViewState::new(settings.ui.theme.into(), settings.audio.initial_volume);

    controller.set_volume(settings.audio.initial_volume);
    controller.add_tracks(library::expand_paths(&inputs, &settings.library));
    log::info!("started with {} tracks", controller.tracks().len());

    let (tick_tx, tick_rx) = mpsc::channel();
    let mut ticker = Ticker::spawn(Duration::from_millis(settings.audio.tick_ms), tick_tx);
    let inbox = event_loop::Inbox {
        engine: engine_events,
        ticks: tick_rx,
        playlist: playlist_events,
    };

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result =
        event_loop::run(&mut terminal, &settings, &mut controller, &mut view, &inbox);

    ticker.cancel();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

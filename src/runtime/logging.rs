//! Logging goes to a file: stderr belongs to the terminal UI.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use env_logger::{Env, Target};

use crate::config::Settings;

/// Overrides `logging.level`, with the usual `env_logger` filter syntax.
const LOG_ENV: &str = "CADENCE_LOG";

/// Install the global logger. Without a usable log file logging stays off.
pub fn init(settings: &Settings) {
    let Some(path) = settings.log_path() else {
        eprintln!("cadence: no log file location, logging disabled");
        return;
    };
    let file = match open_log_file(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("cadence: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let result = env_logger::Builder::from_env(
        Env::default().filter_or(LOG_ENV, settings.logging.level.as_str()),
    )
    .format_timestamp_millis()
    .target(Target::Pipe(Box::new(file)))
    .try_init();
    if let Err(e) = result {
        eprintln!("cadence: logger already installed: {e}");
    }
}

/// Open `path` for appending, creating it and its parent directory.
pub(super) fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `CADENCE__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CADENCE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.audio.initial_volume > 100 {
            return Err("audio.initial_volume must be <= 100".to_string());
        }
        if self.audio.tick_ms == 0 {
            return Err("audio.tick_ms must be >= 1".to_string());
        }
        if self.controls.volume_step == 0 {
            return Err("controls.volume_step must be >= 1".to_string());
        }
        Ok(())
    }

    /// The log file to write to: `logging.file` if set, otherwise the XDG state default.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.logging.file.clone().or_else(default_log_path)
    }
}

/// Resolve the config path from `CADENCE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CADENCE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/cadence/config.toml`
/// or `~/.config/cadence/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_home("XDG_CONFIG_HOME", &[".config"]).map(|d| d.join("cadence").join("config.toml"))
}

/// `$XDG_STATE_HOME/cadence/cadence.log` or `~/.local/state/cadence/cadence.log`.
pub(crate) fn default_log_path() -> Option<PathBuf> {
    xdg_home("XDG_STATE_HOME", &[".local", "state"]).map(|d| d.join("cadence").join("cadence.log"))
}

fn xdg_home(var: &str, home_fallback: &[&str]) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var) {
        return Some(PathBuf::from(dir));
    }
    env::var_os("HOME").map(|home| {
        home_fallback
            .iter()
            .fold(PathBuf::from(home), |acc, part| acc.join(part))
    })
}

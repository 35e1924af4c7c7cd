use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_cadence_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CADENCE_CONFIG_PATH", "/tmp/cadence-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/cadence-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("cadence")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("cadence")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_falls_back_to_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_log_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/state/cadence/cadence.log")
    );
}

#[test]
fn explicit_log_file_wins_over_default() {
    let mut s = Settings::default();
    s.logging.file = Some(PathBuf::from("/tmp/explicit.log"));
    assert_eq!(s.log_path(), Some(PathBuf::from("/tmp/explicit.log")));
}

#[test]
fn defaults_match_the_classic_player() {
    let s = Settings::default();
    assert_eq!(s.audio.initial_volume, 50);
    assert_eq!(s.audio.tick_ms, 1000);
    assert_eq!(s.ui.theme, ThemeSetting::Light);
    assert_eq!(s.library.extensions, vec!["mp3", "wav", "ogg", "m4a"]);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.initial_volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 0;
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
initial_volume = 80
tick_ms = 250

[ui]
theme = "dark"
header_text = "hello"

[controls]
scrub_seconds = 9
volume_step = 10

[library]
extensions = ["flac"]
recursive = false
include_hidden = true
follow_links = false
max_depth = 3

[logging]
level = "debug"
file = "/tmp/cadence-test.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENCE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CADENCE__AUDIO__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 80);
    assert_eq!(s.audio.tick_ms, 250);
    assert_eq!(s.ui.theme, ThemeSetting::Dark);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.controls.volume_step, 10);
    assert_eq!(s.library.extensions, vec!["flac".to_string()]);
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(3));
    assert_eq!(s.logging.level, "debug");
    assert_eq!(s.logging.file, Some(PathBuf::from("/tmp/cadence-test.log")));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
initial_volume = 80
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENCE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CADENCE__AUDIO__INITIAL_VOLUME", "20");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 20);
}

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Turn user-supplied paths into tracks, keeping the order they were given in.
///
/// A directory contributes the audio files below it, sorted by file name.
/// Anything else is taken as a locator as is: whether it can be played is
/// only found out when it is played.
pub fn expand_paths<P: AsRef<Path>>(inputs: &[P], settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            let found = walk_dir(input, settings);
            log::debug!("{} audio files under {}", found.len(), input.display());
            tracks.extend(found.into_iter().map(Track::new));
        } else {
            tracks.push(Track::new(input));
        }
    }
    tracks
}

fn walk_dir(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_audio_file(p, settings))
        .collect()
}

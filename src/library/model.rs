use std::path::{Path, PathBuf};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// A playable audio resource. Immutable once it is in a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the locator, or the whole locator when it has none.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// What the player shows for the track under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metadata {
    /// The file carries tags; missing fields are already defaulted.
    Tagged {
        title: String,
        artist: String,
        album: String,
    },
    /// No readable tags: only the base file name is known.
    FileName(String),
}

impl Metadata {
    pub fn title(&self) -> &str {
        match self {
            Metadata::Tagged { title, .. } => title,
            Metadata::FileName(name) => name,
        }
    }
}

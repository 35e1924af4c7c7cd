use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;

use super::model::{Metadata, Track, UNKNOWN_ALBUM, UNKNOWN_ARTIST};

/// Tag fields found in a file. Empty or whitespace-only values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// Read-only metadata lookup.
pub trait TagReader {
    /// Returns `None` when the file cannot be parsed or carries no tag block.
    fn read_tags(&self, path: &Path) -> Option<Tags>;

    /// Resolve the displayed metadata for `track`, applying the fallbacks.
    fn metadata(&self, track: &Track) -> Metadata {
        match self.read_tags(track.path()) {
            Some(tags) => Metadata::Tagged {
                title: tags.title.unwrap_or_else(|| track.file_name()),
                artist: tags.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
                album: tags.album.unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
            },
            None => Metadata::FileName(track.file_name()),
        }
    }
}

/// `TagReader` backed by `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagReader;

impl TagReader for LoftyTagReader {
    fn read_tags(&self, path: &Path) -> Option<Tags> {
        let tagged = match lofty::read_from_path(path) {
            Ok(tagged) => tagged,
            Err(e) => {
                log::debug!("no tags for {}: {e}", path.display());
                return None;
            }
        };
        let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;

        Some(Tags {
            title: non_blank(tag.title().as_deref()),
            artist: non_blank(tag.artist().as_deref()),
            album: non_blank(tag.album().as_deref()),
        })
    }
}

/// Duration from the container's properties, used when the decoder cannot tell.
pub(crate) fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

fn non_blank(v: Option<&str>) -> Option<String> {
    v.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

use super::model::{Metadata, Track};

/// Label of a playlist row: the base file name.
pub fn list_label(track: &Track) -> String {
    track.file_name()
}

/// Text of the metadata panel.
///
/// Tagged files show title, artist and album on separate lines; files without
/// tags show the file name alone.
pub fn metadata_text(metadata: &Metadata) -> String {
    match metadata {
        Metadata::Tagged {
            title,
            artist,
            album,
        } => format!("🎵 {title}\n👤 {artist}\n💿 {album}"),
        Metadata::FileName(name) => format!("🎵 {name}"),
    }
}

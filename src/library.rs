//! Tracks, tag lookup and expansion of user-supplied paths into playlist entries.

mod display;
mod model;
mod scan;
mod tags;

pub use display::{list_label, metadata_text};
pub use model::{Metadata, Track, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
pub use scan::expand_paths;
pub use tags::{LoftyTagReader, TagReader, Tags};
pub(crate) use tags::probe_duration;

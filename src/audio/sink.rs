//! Creating `rodio` sinks from file paths.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the start of the source.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::AudioError;
use crate::library;

/// Create a paused `Sink` for `path` at volume `volume`.
///
/// Also returns the source's total duration when the decoder or the
/// container properties know it.
pub(super) fn open_sink(
    stream: &OutputStream,
    path: &Path,
    volume: f32,
) -> Result<(Sink, Option<Duration>), AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let byte_len = file.metadata().map(|m| m.len()).ok();

    let mut builder = Decoder::builder()
        .with_data(BufReader::new(file))
        .with_seekable(true);
    if let Some(len) = byte_len {
        builder = builder.with_byte_len(len);
    }
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        builder = builder.with_hint(ext);
    }
    let source = builder.build().map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let duration = source
        .total_duration()
        .or_else(|| library::probe_duration(path));

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok((sink, duration))
}

//! Error types shared across the player.

use std::path::PathBuf;

use thiserror::Error;

/// Contract violations raised by the playlist controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("track index {index} is out of range for a playlist of {len}")]
    InvalidIndex { index: usize, len: usize },
}

/// Failures inside the audio engine.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(#[from] rodio::StreamError),

    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("audio thread is gone")]
    Disconnected,
}

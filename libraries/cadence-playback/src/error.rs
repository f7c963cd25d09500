//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No song is currently loaded
    #[error("No song loaded")]
    NoSongLoaded,

    /// Invalid seek position
    #[error("Invalid seek position: {0:?}")]
    InvalidSeekPosition(std::time::Duration),

    /// Media player backend error
    #[error("Media player error: {0}")]
    Player(String),

    /// The player has been released
    #[error("Player released")]
    Released,

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<PlaybackError> for cadence_core::CadenceError {
    fn from(err: PlaybackError) -> Self {
        cadence_core::CadenceError::audio(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

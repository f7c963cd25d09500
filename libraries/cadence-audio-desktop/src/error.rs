//! Desktop audio errors
use cadence_playback::PlaybackError;
use thiserror::Error;

/// Result type for desktop audio operations
pub type Result<T> = std::result::Result<T, AudioError>;

/// Desktop audio errors
#[derive(Debug, Error)]
pub enum AudioError {
    /// No output device available
    #[error("Audio device not found")]
    DeviceNotFound,

    /// Failed to build or start the output stream
    #[error("Failed to build output stream: {0}")]
    StreamBuildError(String),

    /// Song download failed
    #[error("Download failed: {0}")]
    Download(String),

    /// Song could not be decoded
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Sample rate conversion failed
    #[error("Sample rate conversion error: {0}")]
    Resample(String),

    /// Invalid volume level
    #[error("Invalid volume: {0}. Must be between 0.0 and 1.0")]
    InvalidVolume(f32),

    /// Audio or loader thread has gone away
    #[error("Audio thread is not running")]
    ChannelClosed,
}

impl From<cpal::BuildStreamError> for AudioError {
    fn from(err: cpal::BuildStreamError) -> Self {
        AudioError::StreamBuildError(err.to_string())
    }
}

impl From<cpal::PlayStreamError> for AudioError {
    fn from(err: cpal::PlayStreamError) -> Self {
        AudioError::StreamBuildError(err.to_string())
    }
}

impl From<cpal::DefaultStreamConfigError> for AudioError {
    fn from(err: cpal::DefaultStreamConfigError) -> Self {
        AudioError::StreamBuildError(err.to_string())
    }
}

impl From<AudioError> for PlaybackError {
    fn from(err: AudioError) -> Self {
        PlaybackError::Player(err.to_string())
    }
}

impl From<AudioError> for cadence_core::CadenceError {
    fn from(err: AudioError) -> Self {
        cadence_core::CadenceError::audio(err.to_string())
    }
}

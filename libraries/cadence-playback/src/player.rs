//! Media player abstraction
//!
//! The platform supplies the component that actually fetches, decodes and
//! renders audio. Everything above it (repository, view model) talks to it
//! only through [`MediaPlayer`].

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::watch;

/// Lifecycle state of the loaded media item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    /// Nothing loaded, or the player was stopped
    #[default]
    Idle,

    /// Fetching or decoding the media item
    Buffering,

    /// Loaded and able to play from the current position
    Ready,

    /// Played through to the end
    Ended,
}

/// Media playback component
///
/// Implementations must be usable from several threads: the view model
/// polls progress from a background task while the UI issues commands.
///
/// `play()` after `load()` starts playback as soon as the item is ready,
/// even when the item is still buffering.
#[cfg_attr(test, mockall::automock)]
pub trait MediaPlayer: Send + Sync {
    /// Replace the current media item with the one at `url` and prepare it
    fn load(&self, url: &str) -> Result<()>;

    /// Start or resume playback
    fn play(&self);

    /// Pause playback, keeping the position
    fn pause(&self);

    /// Stop playback and unload the current item
    fn stop(&self);

    /// Seek within the current item
    fn seek(&self, position: Duration) -> Result<()>;

    /// Whether audio is currently being rendered
    fn is_playing(&self) -> bool;

    /// Lifecycle state of the current item
    fn state(&self) -> PlayerState;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Duration of the current item, if known
    fn duration(&self) -> Option<Duration>;

    /// Subscribe to is-playing changes
    fn subscribe(&self) -> watch::Receiver<bool>;

    /// Free the output device; the player is unusable afterwards
    fn release(&self);
}

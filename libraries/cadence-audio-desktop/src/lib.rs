//! Desktop media player for Cadence using CPAL
//!
//! This crate provides `DesktopPlayer`, the `MediaPlayer` implementation used
//! by the terminal front-end.
//!
//! # Features
//!
//! - Streams songs from HTTP(S) URLs
//! - Decodes every format Symphonia supports
//! - Automatic sample rate conversion to the device rate
//! - Volume control
//! - Play-when-ready while a song is still buffering
//!
//! # Example
//!
//! ```no_run
//! use cadence_audio_desktop::DesktopPlayer;
//! use cadence_playback::MediaPlayer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let player = DesktopPlayer::new()?;
//! player.set_volume(0.8)?;
//!
//! player.load("https://cdn.example.com/song.mp3")?;
//! player.play(); // starts as soon as the song is decoded
//! # Ok(())
//! # }
//! ```

pub mod decode;
mod error;
pub mod loader;
mod output;
mod player;
pub mod resample;

pub use decode::DecodedAudio;
pub use error::{AudioError, Result};
pub use player::DesktopPlayer;

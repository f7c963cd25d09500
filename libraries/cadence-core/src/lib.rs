//! Cadence Core
//!
//! Platform-agnostic domain types, traits, and error handling for Cadence.
//!
//! This crate provides the building blocks shared by the CMS client, the
//! playback layer and the front-ends.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `SongId`, `SongList`, `AccentColor`
//! - **Core Traits**: `SongCatalog`
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Song, SongList};
//!
//! let songs = vec![
//!     Song::new("1", "Colors", "William King", "https://cdn.example.com/1.mp3").with_top_track(true),
//!     Song::new("2", "Lost in the City", "Alex Mills", "https://cdn.example.com/2.mp3"),
//! ];
//!
//! let top = SongList::TopTracks.filter(&songs);
//! assert_eq!(top.len(), 1);
//! assert_eq!(top[0].name, "Colors");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod time;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CadenceError, Result};
pub use time::format_time;
pub use traits::SongCatalog;
pub use types::{AccentColor, Song, SongId, SongList, SongResponse};

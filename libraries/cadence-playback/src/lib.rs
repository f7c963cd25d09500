//! Cadence - Playback Management
//!
//! Platform-agnostic playback and player-screen state for Cadence.
//!
//! This crate provides:
//! - The `MediaPlayer` seam the platform audio backend implements
//! - `MusicRepository`, joining the song catalog and the player
//! - `MusicViewModel`, the observable screen state (tabs, current song,
//!   progress, mini/full-screen player)
//! - Next/previous navigation and the wrapping cover carousel
//! - Swipe gesture recognition with distance thresholds
//! - Periodic progress sampling
//!
//! # Architecture
//!
//! `cadence-playback` knows nothing about audio devices, HTTP or terminals:
//! - No dependency on CPAL (desktop audio)
//! - No dependency on reqwest (the catalog arrives through `SongCatalog`)
//! - No dependency on any UI toolkit
//!
//! # Example: Wiring a view model
//!
//! ```rust,no_run
//! use cadence_playback::{MediaPlayer, MusicRepository, MusicViewModel};
//! use cadence_core::SongCatalog;
//! use std::sync::Arc;
//!
//! # async fn wire(catalog: Arc<dyn SongCatalog>, player: Arc<dyn MediaPlayer>) {
//! let repository = Arc::new(MusicRepository::new(catalog, player));
//! let view_model = MusicViewModel::new(repository);
//! view_model.start();
//!
//! let mut state = view_model.subscribe();
//! while state.changed().await.is_ok() {
//!     let ui = state.borrow().clone();
//!     println!("{} songs, playing: {}", ui.songs.len(), ui.is_playing);
//! }
//! # }
//! ```
//!
//! # Example: Gestures
//!
//! ```rust
//! use cadence_playback::{DragTracker, SwipeAction};
//!
//! let mut tracker = DragTracker::default();
//! tracker.drag(-80.0, 0.0);
//! tracker.drag(-40.0, 0.0);
//! assert_eq!(tracker.end(), Some(SwipeAction::Next));
//! ```

mod error;
pub mod gesture;
pub mod navigation;
mod player;
pub mod progress;
mod repository;
mod view_model;

// Public exports
pub use error::{PlaybackError, Result};
pub use gesture::{DragTracker, HorizontalSwipe, SwipeAction, SWIPE_THRESHOLD};
pub use navigation::{Carousel, Direction};
pub use player::{MediaPlayer, PlayerState};
pub use progress::{Progress, DEFAULT_PROGRESS_INTERVAL};
pub use repository::MusicRepository;
pub use view_model::{MusicViewModel, PlayerView, UiState, LOAD_ERROR};

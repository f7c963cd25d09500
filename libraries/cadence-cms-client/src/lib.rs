//! Cadence CMS Client
//!
//! HTTP client for the content management system that serves the song
//! catalog.
//!
//! # Example
//!
//! ```ignore
//! use cadence_cms_client::{CmsClient, CmsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CmsClient::new(CmsConfig::default())?;
//!
//!     let songs = client.songs().await?;
//!     println!("Found {} songs", songs.len());
//!
//!     for song in songs.iter().filter(|s| s.top_track) {
//!         println!("{} - {} ({})", song.name, song.artist, client.asset_url(&song.cover));
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::CmsClient;
pub use error::{CmsClientError, Result};
pub use types::{CmsConfig, DEFAULT_BASE_URL};

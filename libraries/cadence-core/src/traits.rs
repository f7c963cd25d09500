/// Core traits for Cadence
use crate::error::Result;
use crate::types::Song;
use async_trait::async_trait;

/// Song catalog trait
///
/// Implementers provide the full list of songs available for playback,
/// in the order the backend returns them.
#[async_trait]
pub trait SongCatalog: Send + Sync {
    /// Fetch every song in the catalog
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be reached or its response
    /// cannot be decoded
    async fn fetch_songs(&self) -> Result<Vec<Song>>;
}

#[async_trait]
impl<T: SongCatalog + ?Sized> SongCatalog for std::sync::Arc<T> {
    async fn fetch_songs(&self) -> Result<Vec<Song>> {
        (**self).fetch_songs().await
    }
}

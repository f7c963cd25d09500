//! Music repository
//!
//! Thin layer joining the song catalog and the media player.

use crate::error::Result;
use crate::player::MediaPlayer;
use crate::progress::{progress_stream, Progress};
use cadence_core::{Song, SongCatalog};
use futures_util::Stream;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Catalog + player facade used by the view model
pub struct MusicRepository {
    catalog: Arc<dyn SongCatalog>,
    player: Arc<dyn MediaPlayer>,
}

impl MusicRepository {
    pub fn new(catalog: Arc<dyn SongCatalog>, player: Arc<dyn MediaPlayer>) -> Self {
        Self { catalog, player }
    }

    /// Fetch the catalog; failures are logged and yield an empty list
    pub async fn fetch_songs(&self) -> Vec<Song> {
        match self.catalog.fetch_songs().await {
            Ok(songs) => {
                debug!(count = songs.len(), "Catalog loaded");
                songs
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch songs");
                Vec::new()
            }
        }
    }

    /// Load `song` into the player and start it
    pub fn play_song(&self, song: &Song) -> Result<()> {
        info!(id = %song.id, name = %song.name, "Playing song");
        self.player.load(&song.url)?;
        self.player.play();
        Ok(())
    }

    /// Pause when playing, otherwise play
    pub fn toggle_play_pause(&self) {
        if self.player.is_playing() {
            self.player.pause();
        } else {
            self.player.play();
        }
    }

    pub fn seek(&self, position: Duration) -> Result<()> {
        self.player.seek(position)
    }

    pub fn stop(&self) {
        self.player.stop();
    }

    /// Release the player; call once when the UI goes away
    pub fn release(&self) {
        self.player.release();
    }

    /// Is-playing change notifications
    pub fn is_playing(&self) -> watch::Receiver<bool> {
        self.player.subscribe()
    }

    /// Current progress sample
    pub fn progress(&self) -> Progress {
        Progress::sample(self.player.as_ref())
    }

    /// Progress samples, one immediately and then one per `interval`
    pub fn progress_stream(&self, interval: Duration) -> impl Stream<Item = Progress> + Send + 'static {
        progress_stream(Arc::clone(&self.player), interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaybackError;
    use crate::player::MockMediaPlayer;
    use async_trait::async_trait;
    use cadence_core::CadenceError;
    use mockall::Sequence;

    struct FixedCatalog(Option<Vec<Song>>);

    #[async_trait]
    impl SongCatalog for FixedCatalog {
        async fn fetch_songs(&self) -> cadence_core::Result<Vec<Song>> {
            self.0
                .clone()
                .ok_or_else(|| CadenceError::network("connection refused"))
        }
    }

    fn song() -> Song {
        Song::new("1", "Colors", "William King", "https://cdn.example.com/colors.mp3")
    }

    fn repository(catalog: FixedCatalog, player: MockMediaPlayer) -> MusicRepository {
        MusicRepository::new(Arc::new(catalog), Arc::new(player))
    }

    #[tokio::test]
    async fn fetch_returns_catalog() {
        let repo = repository(FixedCatalog(Some(vec![song()])), MockMediaPlayer::new());
        assert_eq!(repo.fetch_songs().await, vec![song()]);
    }

    #[tokio::test]
    async fn fetch_failure_yields_empty_list() {
        let repo = repository(FixedCatalog(None), MockMediaPlayer::new());
        assert!(repo.fetch_songs().await.is_empty());
    }

    #[test]
    fn play_loads_then_plays() {
        let mut seq = Sequence::new();
        let mut player = MockMediaPlayer::new();
        player
            .expect_load()
            .withf(|url| url == "https://cdn.example.com/colors.mp3")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        player.expect_play().times(1).in_sequence(&mut seq).return_const(());

        let repo = repository(FixedCatalog(None), player);
        repo.play_song(&song()).unwrap();
    }

    #[test]
    fn failed_load_does_not_play() {
        let mut player = MockMediaPlayer::new();
        player
            .expect_load()
            .returning(|_| Err(PlaybackError::Player("no device".into())));
        player.expect_play().never();

        let repo = repository(FixedCatalog(None), player);
        assert!(repo.play_song(&song()).is_err());
    }

    #[test]
    fn toggle_pauses_when_playing() {
        let mut player = MockMediaPlayer::new();
        player.expect_is_playing().return_const(true);
        player.expect_pause().times(1).return_const(());
        player.expect_play().never();

        repository(FixedCatalog(None), player).toggle_play_pause();
    }

    #[test]
    fn toggle_plays_when_paused() {
        let mut player = MockMediaPlayer::new();
        player.expect_is_playing().return_const(false);
        player.expect_play().times(1).return_const(());
        player.expect_pause().never();

        repository(FixedCatalog(None), player).toggle_play_pause();
    }

    #[test]
    fn release_is_forwarded() {
        let mut player = MockMediaPlayer::new();
        player.expect_release().times(1).return_const(());

        repository(FixedCatalog(None), player).release();
    }
}

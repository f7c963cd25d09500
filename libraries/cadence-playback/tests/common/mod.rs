//! Shared test doubles for the playback integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use cadence_core::{CadenceError, Song, SongCatalog};
use cadence_playback::{MediaPlayer, PlaybackError, PlayerState, Result};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::watch;

// ===== Catalog =====

/// Catalog returning a fixed list, or failing when built with `failing()`
pub struct StaticCatalog {
    songs: Option<Vec<Song>>,
}

impl StaticCatalog {
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs: Some(songs) }
    }

    pub fn failing() -> Self {
        Self { songs: None }
    }
}

#[async_trait]
impl SongCatalog for StaticCatalog {
    async fn fetch_songs(&self) -> cadence_core::Result<Vec<Song>> {
        self.songs
            .clone()
            .ok_or_else(|| CadenceError::network("connection refused"))
    }
}

// ===== Player =====

#[derive(Debug, Default)]
struct FakeState {
    loaded: Vec<String>,
    playing: bool,
    state: PlayerState,
    position: Duration,
    duration: Option<Duration>,
    released: bool,
    fail_loads: bool,
}

/// In-memory player that records what it was asked to do
pub struct FakePlayer {
    inner: Mutex<FakeState>,
    playing_tx: watch::Sender<bool>,
}

impl FakePlayer {
    pub fn new() -> Self {
        let (playing_tx, _) = watch::channel(false);
        Self {
            inner: Mutex::new(FakeState::default()),
            playing_tx,
        }
    }

    /// Make every subsequent `load` fail
    pub fn fail_loads(&self) {
        self.inner.lock().unwrap().fail_loads = true;
    }

    /// URLs loaded so far, oldest first
    pub fn loaded(&self) -> Vec<String> {
        self.inner.lock().unwrap().loaded.clone()
    }

    pub fn released(&self) -> bool {
        self.inner.lock().unwrap().released
    }

    /// Pretend the decoder advanced
    pub fn set_progress(&self, position: Duration, duration: Duration) {
        let mut inner = self.inner.lock().unwrap();
        inner.position = position;
        inner.duration = Some(duration);
    }

    fn set_playing(&self, playing: bool) {
        self.inner.lock().unwrap().playing = playing;
        self.playing_tx.send_replace(playing);
    }
}

impl MediaPlayer for FakePlayer {
    fn load(&self, url: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_loads {
            return Err(PlaybackError::Player(format!("cannot open {url}")));
        }
        inner.loaded.push(url.to_string());
        inner.state = PlayerState::Ready;
        inner.position = Duration::ZERO;
        Ok(())
    }

    fn play(&self) {
        if self.inner.lock().unwrap().state == PlayerState::Ready {
            self.set_playing(true);
        }
    }

    fn pause(&self) {
        self.set_playing(false);
    }

    fn stop(&self) {
        self.inner.lock().unwrap().state = PlayerState::Idle;
        self.set_playing(false);
    }

    fn seek(&self, position: Duration) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        match inner.duration {
            Some(d) if position <= d => {
                inner.position = position;
                Ok(())
            }
            _ => Err(PlaybackError::InvalidSeekPosition(position)),
        }
    }

    fn is_playing(&self) -> bool {
        self.inner.lock().unwrap().playing
    }

    fn state(&self) -> PlayerState {
        self.inner.lock().unwrap().state
    }

    fn position(&self) -> Duration {
        self.inner.lock().unwrap().position
    }

    fn duration(&self) -> Option<Duration> {
        self.inner.lock().unwrap().duration
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.playing_tx.subscribe()
    }

    fn release(&self) {
        self.inner.lock().unwrap().released = true;
        self.set_playing(false);
    }
}

// ===== Songs =====

pub fn song(id: &str, top: bool) -> Song {
    Song::new(id, format!("Song {id}"), format!("Artist {id}"), format!("https://cdn.test/{id}.mp3"))
        .with_top_track(top)
        .with_accent("#102030")
}

/// Five songs; 2 and 4 are top tracks
pub fn catalog() -> Vec<Song> {
    vec![
        song("1", false),
        song("2", true),
        song("3", false),
        song("4", true),
        song("5", false),
    ]
}

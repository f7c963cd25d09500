//! Player screen state
//!
//! `MusicViewModel` owns the observable [`UiState`] that front-ends render.
//! Background tasks keep it in sync with the catalog fetch, the player's
//! is-playing notifications and the progress poller.

use crate::gesture::SwipeAction;
use crate::navigation::{self, Carousel, Direction};
use crate::progress::DEFAULT_PROGRESS_INTERVAL;
use crate::repository::MusicRepository;
use cadence_core::{Song, SongList};
use futures_util::StreamExt;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Message shown in place of the song list when the catalog comes back empty
pub const LOAD_ERROR: &str = "Failed to load songs";

/// Which player surface is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PlayerView {
    /// Compact bar above the tabs
    #[default]
    Mini,
    /// Expanded player
    FullScreen,
}

/// Everything a front-end needs to draw the player screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiState {
    pub songs: Vec<Song>,
    pub is_playing: bool,
    pub current_song: Option<Song>,
    pub is_loading: bool,
    /// Catalog error; replaces the song list when set
    pub error: Option<String>,
    /// Last playback failure, shown alongside the player
    pub playback_error: Option<String>,
    pub selected_tab: SongList,
    /// List the current song was started from
    pub source_list: SongList,
    pub position: Duration,
    pub duration: Duration,
    pub player_view: PlayerView,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            songs: Vec::new(),
            is_playing: false,
            current_song: None,
            is_loading: true,
            error: None,
            playback_error: None,
            selected_tab: SongList::ForYou,
            source_list: SongList::ForYou,
            position: Duration::ZERO,
            duration: crate::progress::MIN_DURATION,
            player_view: PlayerView::Mini,
        }
    }
}

impl UiState {
    /// Songs on the selected tab
    pub fn visible_songs(&self) -> Vec<Song> {
        self.selected_tab.filter(&self.songs)
    }

    /// Songs that next/previous move through
    pub fn active_songs(&self) -> Vec<Song> {
        self.source_list.filter(&self.songs)
    }
}

/// View model for the player screen
pub struct MusicViewModel {
    repository: Arc<MusicRepository>,
    state: Arc<watch::Sender<UiState>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    progress_interval: Duration,
}

impl MusicViewModel {
    pub fn new(repository: Arc<MusicRepository>) -> Self {
        Self::with_progress_interval(repository, DEFAULT_PROGRESS_INTERVAL)
    }

    pub fn with_progress_interval(repository: Arc<MusicRepository>, progress_interval: Duration) -> Self {
        let (state, _) = watch::channel(UiState::default());
        Self {
            repository,
            state: Arc::new(state),
            tasks: Mutex::new(Vec::new()),
            progress_interval,
        }
    }

    /// Spawn the catalog fetch, the is-playing forwarder and the progress poller
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        let fetch = {
            let repository = Arc::clone(&self.repository);
            let state = Arc::clone(&self.state);
            tokio::spawn(async move { Self::fetch_into(&repository, &state).await })
        };

        let playing = {
            let mut rx = self.repository.is_playing();
            let state = Arc::clone(&self.state);
            tokio::spawn(async move {
                loop {
                    let is_playing = *rx.borrow_and_update();
                    state.send_if_modified(|s| {
                        let changed = s.is_playing != is_playing;
                        s.is_playing = is_playing;
                        changed
                    });
                    if rx.changed().await.is_err() {
                        debug!("Player notifications closed");
                        break;
                    }
                }
            })
        };

        let progress = {
            let stream = self.repository.progress_stream(self.progress_interval);
            let state = Arc::clone(&self.state);
            tokio::spawn(async move {
                futures_util::pin_mut!(stream);
                while let Some(sample) = stream.next().await {
                    state.send_if_modified(|s| {
                        let changed = s.position != sample.position || s.duration != sample.duration;
                        s.position = sample.position;
                        s.duration = sample.duration;
                        changed
                    });
                }
            })
        };

        self.lock_tasks().extend([fetch, playing, progress]);
    }

    /// Fetch the catalog now and publish the result
    pub async fn load_songs(&self) {
        Self::fetch_into(&self.repository, &self.state).await;
    }

    async fn fetch_into(repository: &MusicRepository, state: &watch::Sender<UiState>) {
        state.send_modify(|s| s.is_loading = true);
        let songs = repository.fetch_songs().await;
        state.send_modify(|s| {
            s.error = songs.is_empty().then(|| LOAD_ERROR.to_string());
            s.songs = songs;
            s.is_loading = false;
        });
    }

    /// Play `song`, remembering which list it was picked from
    pub fn play_song(&self, song: &Song, source: SongList) {
        match self.repository.play_song(song) {
            Ok(()) => self.state.send_modify(|s| {
                s.current_song = Some(song.clone());
                s.source_list = source;
                s.playback_error = None;
            }),
            Err(e) => {
                error!(id = %song.id, error = %e, "Playback failed");
                self.state
                    .send_modify(|s| s.playback_error = Some(format!("Can't play {}: {}", song.name, e)));
            }
        }
    }

    pub fn toggle_play_pause(&self) {
        self.repository.toggle_play_pause();
    }

    /// Play the next song in the source list; stops at the end
    pub fn play_next(&self) {
        self.step_linear(Direction::Next);
    }

    /// Play the previous song in the source list; stops at the start
    pub fn play_previous(&self) {
        self.step_linear(Direction::Previous);
    }

    fn step_linear(&self, direction: Direction) {
        let (list, current, source) = self.navigation_context();
        let Some(current) = current else {
            return;
        };

        let target = match direction {
            Direction::Next => navigation::next_in(&list, &current),
            Direction::Previous => navigation::previous_in(&list, &current),
        };

        if let Some(song) = target.cloned() {
            self.play_song(&song, source);
        }
    }

    fn step_carousel(&self, direction: Direction) {
        let (list, current, source) = self.navigation_context();
        let Some(current) = current else {
            return;
        };
        if list.is_empty() {
            return;
        }

        let mut carousel = Carousel::over(&list, &current);
        let page = carousel.step(direction);
        let song = list[page].clone();
        self.play_song(&song, source);
    }

    fn navigation_context(&self) -> (Vec<Song>, Option<Song>, SongList) {
        let state = self.state.borrow();
        (state.active_songs(), state.current_song.clone(), state.source_list)
    }

    pub fn select_tab(&self, tab: SongList) {
        self.state.send_if_modified(|s| {
            let changed = s.selected_tab != tab;
            s.selected_tab = tab;
            changed
        });
    }

    /// Open the full-screen player; ignored when nothing is playing
    pub fn expand_player(&self) {
        self.state.send_if_modified(|s| {
            if s.current_song.is_some() && s.player_view == PlayerView::Mini {
                s.player_view = PlayerView::FullScreen;
                true
            } else {
                false
            }
        });
    }

    pub fn minimize_player(&self) {
        self.state.send_if_modified(|s| {
            let changed = s.player_view != PlayerView::Mini;
            s.player_view = PlayerView::Mini;
            changed
        });
    }

    /// Handle a back press; returns `false` when the front-end should exit
    pub fn back(&self) -> bool {
        let view = self.state.borrow().player_view;
        if view == PlayerView::FullScreen {
            self.minimize_player();
            true
        } else {
            false
        }
    }

    /// Apply a swipe on the full-screen player
    ///
    /// Horizontal swipes walk the cover carousel, which wraps at both ends.
    pub fn swipe_full_screen(&self, action: SwipeAction) {
        match action {
            SwipeAction::Dismiss => self.minimize_player(),
            SwipeAction::Next => self.step_carousel(Direction::Next),
            SwipeAction::Previous => self.step_carousel(Direction::Previous),
        }
    }

    /// Apply a swipe on the mini player
    pub fn swipe_mini(&self, action: SwipeAction) {
        match action {
            SwipeAction::Next => self.play_next(),
            SwipeAction::Previous => self.play_previous(),
            SwipeAction::Dismiss => {}
        }
    }

    /// Seek to a fraction of the current song; NaN is ignored
    pub fn seek_fraction(&self, fraction: f32) {
        if fraction.is_nan() {
            warn!("Ignoring NaN seek fraction");
            return;
        }
        let duration = self.state.borrow().duration;
        let target = duration.mul_f32(fraction.clamp(0.0, 1.0));
        if let Err(e) = self.repository.seek(target) {
            warn!(error = %e, ?target, "Seek failed");
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// Stop background tasks and release the player
    pub fn shutdown(&self) {
        for task in self.lock_tasks().drain(..) {
            task.abort();
        }
        self.repository.release();
    }

    fn lock_tasks(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

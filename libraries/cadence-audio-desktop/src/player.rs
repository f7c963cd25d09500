//! `MediaPlayer` backed by CPAL

use crate::error::{AudioError, Result};
use crate::loader::{self, LoaderCommand};
use crate::output::{self, lock, AudioCommand, Shared};
use cadence_playback::{MediaPlayer, PlaybackError, PlayerState};
use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, StreamConfig};
use crossbeam_channel::{bounded, unbounded, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Desktop media player
///
/// Streams a song from a URL to the default output device.
///
/// **Architecture**: a loader thread downloads and decodes, an audio thread
/// owns the CPAL stream. This handle only sends commands and reads shared
/// state, so it is `Send + Sync` on every platform.
pub struct DesktopPlayer {
    shared: Arc<Shared>,
    audio_tx: Sender<AudioCommand>,
    loader_tx: Sender<LoaderCommand>,
    released: AtomicBool,
    _audio_thread: Option<JoinHandle<()>>,
    _loader_thread: Option<JoinHandle<()>>,
}

impl DesktopPlayer {
    /// Create a player on the default output device
    ///
    /// # Errors
    /// Returns an error if no audio device is found or configuration fails
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::DeviceNotFound)?;

        let config = device.default_output_config()?;
        let sample_rate = config.sample_rate();
        let config = config.config();

        Self::with_device_and_config(device, config, sample_rate)
    }

    fn with_device_and_config(device: Device, config: StreamConfig, sample_rate: u32) -> Result<Self> {
        let shared = Arc::new(Shared::new(sample_rate));
        let (audio_tx, audio_rx) = bounded::<AudioCommand>(32);
        let (loader_tx, loader_rx) = unbounded::<LoaderCommand>();

        let audio_thread = {
            let shared = Arc::clone(&shared);
            thread::Builder::new()
                .name("cadence-audio".into())
                .spawn(move || output::run(device, config, shared, audio_rx))
                .map_err(|e| AudioError::StreamBuildError(format!("Failed to spawn audio thread: {}", e)))?
        };

        let loader_thread = {
            let shared = Arc::clone(&shared);
            let audio_tx = audio_tx.clone();
            thread::Builder::new()
                .name("cadence-loader".into())
                .spawn(move || loader::run(shared, loader_rx, audio_tx))
                .map_err(|e| AudioError::StreamBuildError(format!("Failed to spawn loader thread: {}", e)))?
        };

        debug!(sample_rate, "Desktop player ready");

        Ok(Self {
            shared,
            audio_tx,
            loader_tx,
            released: AtomicBool::new(false),
            _audio_thread: Some(audio_thread),
            _loader_thread: Some(loader_thread),
        })
    }

    /// Output device sample rate
    pub fn sample_rate(&self) -> u32 {
        self.shared.sample_rate
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&self, volume: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&volume) {
            return Err(AudioError::InvalidVolume(volume));
        }
        self.send(AudioCommand::SetVolume(volume))?;
        *lock(&self.shared.volume) = volume;
        Ok(())
    }

    pub fn volume(&self) -> f32 {
        *lock(&self.shared.volume)
    }

    /// Message of the last failed load or stream start
    pub fn last_error(&self) -> Option<String> {
        lock(&self.shared.last_error).clone()
    }

    fn send(&self, command: AudioCommand) -> Result<()> {
        self.audio_tx.send(command).map_err(|_| AudioError::ChannelClosed)
    }

    fn ensure_live(&self) -> std::result::Result<(), PlaybackError> {
        if self.released.load(Ordering::Acquire) {
            Err(PlaybackError::Released)
        } else {
            Ok(())
        }
    }
}

impl MediaPlayer for DesktopPlayer {
    fn load(&self, url: &str) -> cadence_playback::Result<()> {
        self.ensure_live()?;

        let generation = self.shared.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.shared.play_when_ready.store(false, Ordering::Release);
        self.shared.set_playing(false);
        *lock(&self.shared.duration) = None;
        *lock(&self.shared.last_error) = None;
        self.shared.set_state(PlayerState::Buffering);

        self.loader_tx
            .send(LoaderCommand::Fetch {
                url: url.to_string(),
                generation,
            })
            .map_err(|_| AudioError::ChannelClosed)?;

        debug!(url, generation, "Song queued");
        Ok(())
    }

    fn play(&self) {
        if self.ensure_live().is_err() {
            return;
        }

        match self.shared.state() {
            PlayerState::Ready => {}
            PlayerState::Ended => {
                self.shared.set_state(PlayerState::Ready);
                if self.send(AudioCommand::Seek(0)).is_err() {
                    return;
                }
            }
            PlayerState::Buffering => {
                self.shared.play_when_ready.store(true, Ordering::Release);
                // The track may have landed between the state read and the store
                if self.shared.state() != PlayerState::Ready
                    || !self.shared.play_when_ready.swap(false, Ordering::AcqRel)
                {
                    return;
                }
            }
            PlayerState::Idle => {
                debug!("Play ignored, nothing loaded");
                return;
            }
        }

        let _ = self.send(AudioCommand::Play);
    }

    fn pause(&self) {
        self.shared.play_when_ready.store(false, Ordering::Release);
        self.shared.set_playing(false);
        let _ = self.send(AudioCommand::Pause);
    }

    fn stop(&self) {
        self.shared.generation.fetch_add(1, Ordering::AcqRel);
        self.shared.play_when_ready.store(false, Ordering::Release);
        self.shared.set_playing(false);
        self.shared.clear();
        self.shared.set_state(PlayerState::Idle);
        let _ = self.send(AudioCommand::Stop);
    }

    fn seek(&self, position: Duration) -> cadence_playback::Result<()> {
        self.ensure_live()?;
        let duration = self.duration().ok_or(PlaybackError::NoSongLoaded)?;
        if position > duration {
            return Err(PlaybackError::InvalidSeekPosition(position));
        }

        let frame = (position.as_secs_f64() * f64::from(self.shared.sample_rate)) as usize;
        if self.shared.state() == PlayerState::Ended {
            self.shared.set_state(PlayerState::Ready);
        }
        self.send(AudioCommand::Seek(frame * 2))?;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.shared.playing.load(Ordering::Acquire)
    }

    fn state(&self) -> PlayerState {
        self.shared.state()
    }

    fn position(&self) -> Duration {
        let frames = self.shared.cursor.load(Ordering::Acquire) / 2;
        Duration::from_secs_f64(frames as f64 / f64::from(self.shared.sample_rate.max(1)))
    }

    fn duration(&self) -> Option<Duration> {
        *lock(&self.shared.duration)
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.shared.playing_tx.subscribe()
    }

    fn release(&self) {
        if self.released.swap(true, Ordering::AcqRel) {
            return;
        }
        self.shared.set_playing(false);
        let _ = self.loader_tx.send(LoaderCommand::Shutdown);
        let _ = self.audio_tx.send(AudioCommand::Shutdown);
        debug!("Desktop player released");
    }
}

impl Drop for DesktopPlayer {
    fn drop(&mut self) {
        self.release();
    }
}

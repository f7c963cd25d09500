//! CPAL output on a dedicated audio thread
//!
//! The thread owns the CPAL `Stream`, so the stream never crosses threads.
//! Everyone else talks to it through `AudioCommand`s and reads `Shared`.
use crate::decode::DecodedAudio;
use cadence_playback::PlayerState;
use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use crossbeam_channel::Receiver;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Commands sent to the audio thread
pub(crate) enum AudioCommand {
    /// Install a decoded track if `generation` is still current
    Load { generation: u64, audio: DecodedAudio },
    /// Start or resume the stream
    Play,
    /// Pause the stream, keeping the track
    Pause,
    /// Drop the stream
    Stop,
    /// Move the read cursor (in samples)
    Seek(usize),
    /// Set volume (0.0 - 1.0)
    SetVolume(f32),
    /// Shutdown the audio thread
    Shutdown,
}

/// Poison-tolerant lock; a panicked audio callback must not take the player down
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared between the player handle, the loader and the audio callback
pub(crate) struct Shared {
    /// Interleaved stereo samples at `sample_rate`
    pub samples: Mutex<Arc<Vec<f32>>>,
    /// Read position in samples
    pub cursor: AtomicUsize,
    pub playing: AtomicBool,
    pub volume: Mutex<f32>,
    pub state: Mutex<PlayerState>,
    pub duration: Mutex<Option<Duration>>,
    /// Bumped on every load/stop; stale loads compare against it
    pub generation: AtomicU64,
    /// `play()` arrived while buffering
    pub play_when_ready: AtomicBool,
    pub last_error: Mutex<Option<String>>,
    pub playing_tx: watch::Sender<bool>,
    /// Output device sample rate
    pub sample_rate: u32,
}

impl Shared {
    pub fn new(sample_rate: u32) -> Self {
        let (playing_tx, _) = watch::channel(false);
        Self {
            samples: Mutex::new(Arc::new(Vec::new())),
            cursor: AtomicUsize::new(0),
            playing: AtomicBool::new(false),
            volume: Mutex::new(1.0),
            state: Mutex::new(PlayerState::Idle),
            duration: Mutex::new(None),
            generation: AtomicU64::new(0),
            play_when_ready: AtomicBool::new(false),
            last_error: Mutex::new(None),
            playing_tx,
            sample_rate,
        }
    }

    pub fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::Release);
        self.playing_tx.send_if_modified(|current| {
            let changed = *current != playing;
            *current = playing;
            changed
        });
    }

    pub fn set_state(&self, state: PlayerState) {
        *lock(&self.state) = state;
    }

    pub fn state(&self) -> PlayerState {
        *lock(&self.state)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::Acquire) == generation
    }

    /// Record a failure and fall back to idle
    pub fn fail(&self, message: String) {
        self.play_when_ready.store(false, Ordering::Release);
        self.set_playing(false);
        self.set_state(PlayerState::Idle);
        *lock(&self.last_error) = Some(message);
    }

    /// Drop the current track
    pub fn clear(&self) {
        *lock(&self.samples) = Arc::new(Vec::new());
        *lock(&self.duration) = None;
        self.cursor.store(0, Ordering::Release);
    }

    /// End of track; a load or stop that raced the callback keeps its state
    fn finish(&self) {
        self.set_playing(false);
        let mut state = lock(&self.state);
        if *state == PlayerState::Ready {
            *state = PlayerState::Ended;
            debug!("Track ended");
        }
    }
}

/// Audio thread main loop
pub(crate) fn run(device: Device, config: StreamConfig, shared: Arc<Shared>, commands: Receiver<AudioCommand>) {
    let mut stream: Option<Stream> = None;

    while let Ok(command) = commands.recv() {
        match command {
            AudioCommand::Load { generation, audio } => {
                if !shared.is_current(generation) {
                    debug!(generation, "Dropping superseded track");
                    continue;
                }
                let duration = audio.duration();
                *lock(&shared.samples) = Arc::new(audio.samples);
                *lock(&shared.duration) = Some(duration);
                shared.cursor.store(0, Ordering::Release);
                shared.set_state(PlayerState::Ready);
                info!(?duration, "Track ready");

                if shared.play_when_ready.swap(false, Ordering::AcqRel) {
                    start(&mut stream, &device, &config, &shared);
                }
            }
            AudioCommand::Play => start(&mut stream, &device, &config, &shared),
            AudioCommand::Pause => {
                if let Some(s) = &stream {
                    if let Err(e) = s.pause() {
                        warn!(error = %e, "Failed to pause stream");
                    }
                }
            }
            AudioCommand::Stop => {
                stream.take();
            }
            AudioCommand::Seek(cursor) => shared.cursor.store(cursor, Ordering::Release),
            AudioCommand::SetVolume(volume) => *lock(&shared.volume) = volume,
            AudioCommand::Shutdown => {
                stream.take();
                debug!("Audio thread shutting down");
                break;
            }
        }
    }
}

fn start(stream: &mut Option<Stream>, device: &Device, config: &StreamConfig, shared: &Arc<Shared>) {
    if shared.state() != PlayerState::Ready {
        return;
    }

    if stream.is_none() {
        match build_stream(device, config, shared) {
            Ok(s) => *stream = Some(s),
            Err(e) => {
                error!(error = %e, "Failed to build output stream");
                shared.fail(e.to_string());
                return;
            }
        }
    }

    if let Some(s) = stream {
        match s.play() {
            Ok(()) => shared.set_playing(true),
            Err(e) => {
                error!(error = %e, "Failed to start output stream");
                shared.fail(e.to_string());
            }
        }
    }
}

fn build_stream(
    device: &Device,
    config: &StreamConfig,
    shared: &Arc<Shared>,
) -> std::result::Result<Stream, cpal::BuildStreamError> {
    let channels = usize::from(config.channels).max(1);
    let callback_state = Arc::clone(shared);
    device.build_output_stream(
        config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            fill(data, channels, &callback_state);
        },
        |err| error!(error = %err, "Audio stream error"),
        None,
    )
}

/// Audio callback: copy stereo frames into a device buffer of `channels` channels
pub(crate) fn fill(output: &mut [f32], channels: usize, shared: &Shared) {
    if !shared.playing.load(Ordering::Acquire) {
        output.fill(0.0);
        return;
    }

    let volume = *lock(&shared.volume);
    let samples = Arc::clone(&*lock(&shared.samples));
    if samples.is_empty() {
        output.fill(0.0);
        return;
    }

    let start = shared.cursor.load(Ordering::Acquire);
    let mut cursor = start;
    for frame in output.chunks_mut(channels) {
        if cursor + 1 >= samples.len() {
            frame.fill(0.0);
            continue;
        }
        let left = samples[cursor] * volume;
        let right = samples[cursor + 1] * volume;
        match frame {
            [mono] => *mono = (left + right) * 0.5,
            [l, r, rest @ ..] => {
                *l = left;
                *r = right;
                rest.fill(0.0);
            }
            [] => {}
        }
        cursor += 2;
    }

    // A seek during the callback wins over our progress
    let stored = shared
        .cursor
        .compare_exchange(start, cursor, Ordering::AcqRel, Ordering::Acquire)
        .is_ok();

    if stored && cursor + 1 >= samples.len() {
        shared.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(samples: Vec<f32>) -> Shared {
        let shared = Shared::new(48_000);
        *lock(&shared.samples) = Arc::new(samples);
        shared.set_state(PlayerState::Ready);
        shared.set_playing(true);
        shared
    }

    #[test]
    fn paused_output_is_silent() {
        let shared = loaded(vec![0.5; 8]);
        shared.set_playing(false);
        let mut out = [1.0f32; 4];
        fill(&mut out, 2, &shared);
        assert_eq!(out, [0.0; 4]);
        assert_eq!(shared.cursor.load(Ordering::Acquire), 0);
    }

    #[test]
    fn stereo_copy_applies_volume() {
        let shared = loaded(vec![0.2, 0.4, 0.6, 0.8, 1.0, 1.0]);
        *lock(&shared.volume) = 0.5;
        let mut out = [0.0f32; 4];
        fill(&mut out, 2, &shared);
        assert_eq!(out, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(shared.cursor.load(Ordering::Acquire), 4);
        assert!(shared.playing.load(Ordering::Acquire));
    }

    #[test]
    fn mono_device_gets_downmix() {
        let shared = loaded(vec![0.2, 0.4, 0.0, 0.0, 0.0, 0.0]);
        let mut out = [0.0f32; 1];
        fill(&mut out, 1, &shared);
        assert!((out[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn extra_device_channels_are_silent() {
        let shared = loaded(vec![0.2, 0.4, 0.0, 0.0]);
        let mut out = [9.0f32; 4];
        fill(&mut out, 4, &shared);
        assert_eq!(out, [0.2, 0.4, 0.0, 0.0]);
    }

    #[test]
    fn reaching_the_end_publishes_ended() {
        let shared = loaded(vec![0.1, 0.1, 0.2, 0.2]);
        let rx = shared.playing_tx.subscribe();
        let mut out = [0.0f32; 8];
        fill(&mut out, 2, &shared);

        assert_eq!(out, [0.1, 0.1, 0.2, 0.2, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(shared.state(), PlayerState::Ended);
        assert!(!shared.playing.load(Ordering::Acquire));
        assert!(!*rx.borrow());
    }

    #[test]
    fn end_of_old_track_keeps_new_load_buffering() {
        let shared = loaded(vec![0.1, 0.1]);
        // load() has already moved on but the callback saw playing == true
        shared.set_state(PlayerState::Buffering);
        let mut out = [0.0f32; 4];
        fill(&mut out, 2, &shared);

        assert_eq!(shared.state(), PlayerState::Buffering);
        assert!(!shared.playing.load(Ordering::Acquire));
    }

    #[test]
    fn fail_resets_to_idle() {
        let shared = loaded(vec![0.0; 4]);
        shared.play_when_ready.store(true, Ordering::Release);
        shared.fail("boom".into());

        assert_eq!(shared.state(), PlayerState::Idle);
        assert!(!shared.play_when_ready.load(Ordering::Acquire));
        assert_eq!(lock(&shared.last_error).as_deref(), Some("boom"));
    }
}

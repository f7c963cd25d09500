//! Playback progress sampling

use crate::player::{MediaPlayer, PlayerState};
use futures_util::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default polling interval for progress updates
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(1000);

/// Lower bound reported for durations so progress fractions never divide by zero
pub const MIN_DURATION: Duration = Duration::from_millis(1);

/// One progress sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Playback position
    pub position: Duration,

    /// Track duration, never below [`MIN_DURATION`]
    pub duration: Duration,
}

impl Progress {
    /// Progress while nothing is playing
    pub const IDLE: Progress = Progress {
        position: Duration::ZERO,
        duration: MIN_DURATION,
    };

    /// Sample the player
    ///
    /// A player that is playing or ready reports its real position and
    /// duration; any other state reports [`Progress::IDLE`].
    pub fn sample(player: &dyn MediaPlayer) -> Self {
        if player.is_playing() || player.state() == PlayerState::Ready {
            Self {
                position: player.position(),
                duration: player.duration().unwrap_or_default().max(MIN_DURATION),
            }
        } else {
            Self::IDLE
        }
    }

    /// Position as a fraction of the duration, clamped to `[0, 1]`
    pub fn fraction(&self) -> f32 {
        let duration = self.duration.max(MIN_DURATION).as_secs_f64();
        (self.position.as_secs_f64() / duration).clamp(0.0, 1.0) as f32
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Endless stream of progress samples
///
/// Emits one sample immediately, then one per `interval`.
pub fn progress_stream(
    player: Arc<dyn MediaPlayer>,
    interval: Duration,
) -> impl Stream<Item = Progress> + Send + 'static {
    stream::unfold((player, true), move |(player, first)| async move {
        if !first {
            tokio::time::sleep(interval).await;
        }
        let sample = Progress::sample(player.as_ref());
        Some((sample, (player, false)))
    })
}

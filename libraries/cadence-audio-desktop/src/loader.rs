//! Background song loader
//!
//! Downloads on a private tokio runtime, then decodes and resamples on the
//! loader thread so the audio thread only ever swaps in finished buffers.

use crate::decode::{decode, extension_hint, DecodedAudio};
use crate::error::{AudioError, Result};
use crate::output::{AudioCommand, Shared};
use crate::resample::resample;
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Download timeout for a single song
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Commands sent to the loader thread
pub(crate) enum LoaderCommand {
    Fetch { url: String, generation: u64 },
    Shutdown,
}

/// Fetch the raw bytes of `url`
pub async fn download(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AudioError::Download(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AudioError::Download(format!("HTTP {} for {}", status, url)));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AudioError::Download(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Decode downloaded bytes and convert them to `target_rate`
pub fn prepare(bytes: Vec<u8>, url: &str, target_rate: u32) -> Result<DecodedAudio> {
    let decoded = decode(bytes, extension_hint(url))?;
    resample(decoded, target_rate)
}

pub(crate) fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .user_agent(format!("Cadence/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AudioError::Download(e.to_string()))
}

/// Loader thread main loop
pub(crate) fn run(shared: Arc<Shared>, commands: Receiver<LoaderCommand>, audio: Sender<AudioCommand>) {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "Failed to create loader runtime");
            return;
        }
    };
    let client = match http_client() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to create HTTP client");
            return;
        }
    };

    while let Ok(command) = commands.recv() {
        let (url, generation) = match command {
            LoaderCommand::Fetch { url, generation } => (url, generation),
            LoaderCommand::Shutdown => break,
        };

        if !shared.is_current(generation) {
            debug!(%url, generation, "Skipping superseded load");
            continue;
        }

        let loaded = runtime
            .block_on(download(&client, &url))
            .and_then(|bytes| prepare(bytes, &url, shared.sample_rate));

        if !shared.is_current(generation) {
            debug!(%url, generation, "Discarding superseded load");
            continue;
        }

        match loaded {
            Ok(track) => {
                info!(%url, frames = track.frames(), "Song loaded");
                if audio.send(AudioCommand::Load { generation, audio: track }).is_err() {
                    break;
                }
            }
            Err(e) => {
                error!(%url, error = %e, "Failed to load song");
                shared.fail(e.to_string());
            }
        }
    }

    debug!("Loader thread shutting down");
}

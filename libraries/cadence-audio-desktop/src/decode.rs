//! In-memory decoding with Symphonia
//!
//! Songs are small enough to decode in one pass, so the whole file is turned
//! into interleaved stereo f32 before playback starts.

use crate::error::{AudioError, Result};
use std::io::Cursor;
use std::time::Duration;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

/// Decoded song: interleaved stereo samples at `sample_rate`
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// Number of stereo frames
    pub fn frames(&self) -> usize {
        self.samples.len() / 2
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / f64::from(self.sample_rate))
    }
}

/// File extension of a URL's path, used as a format hint
pub fn extension_hint(url: &str) -> Option<&str> {
    let path = url.split(|c: char| c == '?' || c == '#').next()?;
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}

/// Decode a complete audio file held in memory
///
/// Mono is duplicated to both channels; channels beyond the first two are
/// dropped.
pub fn decode(bytes: Vec<u8>, extension: Option<&str>) -> Result<DecodedAudio> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| AudioError::Decode(format!("Unrecognised format: {}", e)))?;
    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| AudioError::Decode("No audio tracks found".into()))?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AudioError::Decode(format!("Failed to create decoder: {}", e)))?;

    let mut samples = Vec::new();
    let mut scratch: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(AudioError::Decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                warn!(error = %e, "Skipping undecodable packet");
                continue;
            }
            Err(e) => return Err(AudioError::Decode(e.to_string())),
        };

        let spec = *decoded.spec();
        let channels = spec.channels.count();
        if channels == 0 {
            continue;
        }
        sample_rate.get_or_insert(spec.rate);

        let needed = decoded.capacity() * channels;
        if scratch.as_ref().map_or(true, |buf| buf.capacity() < needed) {
            scratch = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
        }
        let Some(buf) = scratch.as_mut() else {
            continue;
        };
        buf.copy_interleaved_ref(decoded);
        push_stereo(&mut samples, buf.samples(), channels);
    }

    let sample_rate = sample_rate.ok_or_else(|| AudioError::Decode("Unknown sample rate".into()))?;
    debug!(frames = samples.len() / 2, sample_rate, "Decoded song");

    Ok(DecodedAudio { samples, sample_rate })
}

fn push_stereo(out: &mut Vec<f32>, interleaved: &[f32], channels: usize) {
    out.reserve(interleaved.len() / channels * 2);
    for frame in interleaved.chunks_exact(channels) {
        match frame {
            [mono] => out.extend([*mono, *mono]),
            [left, right, ..] => out.extend([*left, *right]),
            [] => {}
        }
    }
}

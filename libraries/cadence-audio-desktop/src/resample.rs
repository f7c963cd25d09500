//! Whole-buffer sample rate conversion with rubato

use crate::decode::DecodedAudio;
use crate::error::{AudioError, Result};
use rubato::{Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction};

const CHANNELS: usize = 2;

/// Convert `audio` to `target_rate`; a no-op when the rates already match
pub fn resample(audio: DecodedAudio, target_rate: u32) -> Result<DecodedAudio> {
    if audio.sample_rate == target_rate || audio.samples.is_empty() {
        return Ok(DecodedAudio {
            samples: audio.samples,
            sample_rate: target_rate,
        });
    }
    if audio.sample_rate == 0 || target_rate == 0 {
        return Err(AudioError::Resample(format!(
            "cannot convert {} Hz to {} Hz",
            audio.sample_rate, target_rate
        )));
    }

    let params = SincInterpolationParameters {
        sinc_len: 128,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let frames = audio.frames();
    let mut resampler = SincFixedIn::<f32>::new(
        f64::from(target_rate) / f64::from(audio.sample_rate),
        2.0,
        params,
        frames,
        CHANNELS,
    )
    .map_err(|e| AudioError::Resample(e.to_string()))?;

    let mut planar = vec![Vec::with_capacity(frames); CHANNELS];
    for frame in audio.samples.chunks_exact(CHANNELS) {
        for (channel, sample) in planar.iter_mut().zip(frame) {
            channel.push(*sample);
        }
    }

    let converted = resampler
        .process(&planar, None)
        .map_err(|e| AudioError::Resample(e.to_string()))?;

    let out_frames = converted.first().map_or(0, Vec::len);
    let mut samples = Vec::with_capacity(out_frames * CHANNELS);
    for i in 0..out_frames {
        for channel in &converted {
            samples.push(channel[i]);
        }
    }

    Ok(DecodedAudio {
        samples,
        sample_rate: target_rate,
    })
}

//! WAV reading and writing for the renderer.
//!
//! Integer files are scaled to `[-1, 1)`; 32-bit output is written as IEEE
//! float, 16 and 24-bit output as clamped PCM. Files with more than two
//! channels keep only the first two.

use anyhow::{Context, bail};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Decoded audio, one or two channels of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioData {
    /// Left (or only) channel.
    pub left: Vec<f32>,
    /// Right channel, `None` for mono.
    pub right: Option<Vec<f32>>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioData {
    /// Silent audio with `channels` channels (1 or 2).
    pub fn silent(frames: usize, channels: u16, sample_rate: u32) -> Self {
        Self {
            left: vec![0.0; frames],
            right: (channels > 1).then(|| vec![0.0; frames]),
            sample_rate,
        }
    }

    /// Number of channels (1 or 2).
    pub fn channels(&self) -> u16 {
        if self.right.is_some() { 2 } else { 1 }
    }

    /// Frames per channel.
    pub fn frames(&self) -> usize {
        self.left.len()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate.max(1))
    }

    /// Appends `frames` of silence to every channel.
    pub fn pad(&mut self, frames: usize) {
        let len = self.left.len() + frames;
        self.left.resize(len, 0.0);
        if let Some(right) = &mut self.right {
            right.resize(len, 0.0);
        }
    }

    /// Iterator over every sample of every channel.
    pub fn samples(&self) -> impl Iterator<Item = &f32> {
        self.left.iter().chain(self.right.iter().flatten())
    }
}

/// Read a WAV file as one or two channels of `f32`.
pub fn read_wav(path: &Path) -> anyhow::Result<AudioData> {
    let reader =
        WavReader::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        bail!("'{}' has no channels", path.display());
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("failed to decode '{}'", path.display()))?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("failed to decode '{}'", path.display()))?
        }
    };

    let left = interleaved.iter().step_by(channels).copied().collect();
    let right = (channels > 1).then(|| interleaved.iter().skip(1).step_by(channels).copied().collect());

    Ok(AudioData {
        left,
        right,
        sample_rate: spec.sample_rate,
    })
}

/// Write `audio` to a WAV file at the given bit depth (16, 24 or 32).
pub fn write_wav(path: &Path, audio: &AudioData, bits_per_sample: u16) -> anyhow::Result<()> {
    let spec = hound::WavSpec {
        channels: audio.channels(),
        sample_rate: audio.sample_rate,
        bits_per_sample,
        sample_format: if bits_per_sample == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };
    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("failed to create '{}'", path.display()))?;

    let max_val = (1i64 << (bits_per_sample - 1)) as f32;
    for i in 0..audio.frames() {
        let frame = [Some(audio.left[i]), audio.right.as_ref().map(|r| r[i])];
        for sample in frame.into_iter().flatten() {
            if bits_per_sample == 32 {
                writer.write_sample(sample)?;
            } else {
                let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer
        .finalize()
        .with_context(|| format!("failed to finalize '{}'", path.display()))?;
    Ok(())
}

//! File-based reverb rendering command.

use super::common::{build_params, parse_bit_depth, parse_key_val, print_params};
use crate::wav::{AudioData, read_wav, write_wav};
use aura_core::{AudioBlock, BlockProcessor, linear_to_db};
use aura_reverb::SignalRouter;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Preset name or TOML file
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Parameter override (e.g. "decay=3.5"); repeatable
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    pub param: Vec<(String, String)>,

    /// Processing block size
    #[arg(long, default_value_t = 512)]
    pub block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value_t = 24, value_parser = parse_bit_depth)]
    pub bit_depth: u16,

    /// Seconds of silence appended so the tail can ring out
    #[arg(long, default_value_t = 2.0)]
    pub tail: f32,
}

/// Level statistics for one signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStats {
    /// RMS level in dBFS.
    pub rms_db: f32,
    /// Peak level in dBFS.
    pub peak_db: f32,
}

impl LevelStats {
    /// Measure every sample of `audio`.
    pub fn measure(audio: &AudioData) -> Self {
        let (sum, peak, count) = audio
            .samples()
            .fold((0.0f64, 0.0f32, 0usize), |(sum, peak, n), &s| {
                (sum + f64::from(s * s), peak.max(s.abs()), n + 1)
            });
        let rms = if count == 0 { 0.0 } else { (sum / count as f64).sqrt() as f32 };
        Self {
            rms_db: linear_to_db(rms),
            peak_db: linear_to_db(peak),
        }
    }
}

/// Runs `audio` through `router` in place, `block_size` frames at a time.
pub fn render(router: &mut SignalRouter, audio: &mut AudioData, block_size: usize, progress: &ProgressBar) {
    let block_size = block_size.max(1);
    let frames = audio.frames();
    let mut start = 0;
    while start < frames {
        let end = (start + block_size).min(frames);
        let left = &mut audio.left[start..end];
        let mut block = match audio.right.as_mut() {
            Some(right) => AudioBlock::stereo(left, &mut right[start..end]),
            None => AudioBlock::mono(left),
        };
        router.process(&mut block);
        start = end;
        progress.set_position(start as u64);
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("--block-size must be at least 1");
    }
    if !(args.tail.is_finite() && args.tail >= 0.0) {
        anyhow::bail!("--tail must be a non-negative number of seconds");
    }

    println!("Reading {}...", args.input.display());
    let mut audio = read_wav(&args.input)?;
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        audio.frames(),
        audio.channels(),
        audio.sample_rate,
        audio.duration_secs()
    );
    let input_stats = LevelStats::measure(&audio);

    let params = build_params(args.preset.as_deref(), &args.param)?;
    tracing::debug!(?params, "render parameters");

    let tail_frames = (args.tail * audio.sample_rate as f32).round() as usize;
    audio.pad(tail_frames);

    let mut router = SignalRouter::new();
    router.prepare(audio.sample_rate as f32, args.block_size);
    router.set_params(&params);

    println!("\nRendering with:");
    print_params(&params);
    tracing::info!(
        frames = audio.frames(),
        block_size = args.block_size,
        tail_frames,
        "rendering"
    );

    let pb = ProgressBar::new(audio.frames() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    render(&mut router, &mut audio, args.block_size, &pb);
    pb.finish_with_message("done");

    let output_stats = LevelStats::measure(&audio);
    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        input_stats.rms_db, input_stats.peak_db
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        output_stats.rms_db, output_stats.peak_db
    );
    if output_stats.peak_db > 0.0 {
        tracing::warn!(peak_db = output_stats.peak_db, "output clips; lower output_gain or mix");
    }

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &audio, args.bit_depth)?;
    tracing::info!(path = %args.output.display(), bits = args.bit_depth, "output written");
    println!("Done!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_reverb::ReverbParams;

    #[test]
    fn test_render_matches_single_pass() {
        let mut chunked = AudioData::silent(3000, 2, 44100);
        chunked.left[0] = 1.0;
        let mut whole = chunked.clone();

        let params = ReverbParams::default();
        let mut a = SignalRouter::new();
        a.prepare(44100.0, 256);
        a.set_params(&params);
        render(&mut a, &mut chunked, 256, &ProgressBar::hidden());

        let mut b = SignalRouter::new();
        b.prepare(44100.0, 256);
        b.set_params(&params);
        let right = whole.right.as_mut().unwrap();
        b.process(&mut AudioBlock::stereo(&mut whole.left, right));

        assert_eq!(chunked, whole);
    }

    #[test]
    fn test_render_mono() {
        let mut audio = AudioData::silent(4096, 1, 48000);
        audio.left[0] = 1.0;
        let mut router = SignalRouter::new();
        router.prepare(48000.0, 512);
        render(&mut router, &mut audio, 512, &ProgressBar::hidden());
        assert!(audio.left.iter().all(|s| s.is_finite()));
        assert!(audio.left[1..].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_level_stats() {
        let audio = AudioData {
            left: vec![0.5, -0.5, 0.5, -0.5],
            right: None,
            sample_rate: 48000,
        };
        let stats = LevelStats::measure(&audio);
        assert!((stats.peak_db - -6.0206).abs() < 0.01);
        assert!((stats.rms_db - -6.0206).abs() < 0.01);
    }
}

//! Impulse response rendering.

use super::common::{build_params, parse_bit_depth, parse_key_val, print_params};
use crate::wav::{AudioData, write_wav};
use aura_core::{AudioBlock, BlockProcessor, db_to_linear};
use aura_reverb::{ParamId, ReverbParams, SignalRouter};
use clap::Args;
use std::path::PathBuf;

/// Peak level of a normalized impulse response.
const NORMALIZE_PEAK_DB: f32 = -1.0;

const BLOCK_SIZE: usize = 512;

#[derive(Args)]
pub struct ImpulseArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Preset name or TOML file
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Parameter override (e.g. "size=0.8"); repeatable
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    pub param: Vec<(String, String)>,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 48000)]
    pub sample_rate: u32,

    /// Length of the response in seconds
    #[arg(long, default_value_t = 4.0)]
    pub seconds: f32,

    /// Scale the response so its peak sits at -1 dBFS
    #[arg(long)]
    pub normalize: bool,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value_t = 24, value_parser = parse_bit_depth)]
    pub bit_depth: u16,
}

/// Renders the stereo wet-only response to a unit impulse on both channels.
pub fn render_impulse(params: &ReverbParams, sample_rate: u32, frames: usize) -> AudioData {
    let mut params = *params;
    params.set(ParamId::Mix, 1.0);

    let mut router = SignalRouter::new();
    router.prepare(sample_rate as f32, BLOCK_SIZE);
    router.set_params(&params);

    let mut audio = AudioData::silent(frames, 2, sample_rate);
    if let (Some(l), Some(r)) = (audio.left.first_mut(), audio.right.as_mut().and_then(|r| r.first_mut())) {
        *l = 1.0;
        *r = 1.0;
    }

    let right = audio.right.get_or_insert_with(Vec::new);
    for (l, r) in audio.left.chunks_mut(BLOCK_SIZE).zip(right.chunks_mut(BLOCK_SIZE)) {
        router.process(&mut AudioBlock::stereo(l, r));
    }
    audio
}

/// Scales `audio` so its peak sits at `peak_db`. Returns the applied gain,
/// or `None` for silent input.
pub fn normalize(audio: &mut AudioData, peak_db: f32) -> Option<f32> {
    let peak = audio.samples().fold(0.0f32, |p, s| p.max(s.abs()));
    if peak <= 0.0 {
        return None;
    }
    let gain = db_to_linear(peak_db) / peak;
    audio.left.iter_mut().for_each(|s| *s *= gain);
    if let Some(right) = &mut audio.right {
        right.iter_mut().for_each(|s| *s *= gain);
    }
    Some(gain)
}

pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    if args.sample_rate == 0 {
        anyhow::bail!("--sample-rate must be positive");
    }
    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        anyhow::bail!("--seconds must be a positive number");
    }

    let params = build_params(args.preset.as_deref(), &args.param)?;
    let frames = (args.seconds * args.sample_rate as f32).round() as usize;

    println!("Rendering {:.2}s impulse response at {} Hz with:", args.seconds, args.sample_rate);
    print_params(&params);

    let mut audio = render_impulse(&params, args.sample_rate, frames);
    if args.normalize {
        match normalize(&mut audio, NORMALIZE_PEAK_DB) {
            Some(gain) => tracing::info!(gain, "normalized to {} dBFS", NORMALIZE_PEAK_DB),
            None => tracing::warn!("impulse response is silent; nothing to normalize"),
        }
    }

    write_wav(&args.output, &audio, args.bit_depth)?;
    println!("\nWrote {}", args.output.display());
    Ok(())
}

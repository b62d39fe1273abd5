//! Late reverb engine: pre-delay, modulated comb bank, allpass diffusion,
//! width and output tone.
//!
//! # Signal Flow
//!
//! ```text
//!            ┌──────────┐   ┌─────────────────────┐   ┌──────────────┐
//! in L/R ───→│ pre-delay│──→│ 8 ModulatedComb ∥ /8 │──→│ 4 Allpass ⟶ │──→ width ──→ LP ──→ HP ──→ out
//!            └──────────┘   └─────────────────────┘   └──────────────┘
//! ```
//!
//! Each channel has its own comb and allpass bank; the right channel runs
//! slightly longer delays (+0.5 ms combs, +0.1 ms allpasses) to decorrelate
//! the sides.
//!
//! # Decay
//!
//! Comb feedback is derived from the decay time in seconds, using an average
//! loop length of `30 ms · (0.5 + size)`:
//!
//! ```text
//! feedback = 10^(-3 · avg_loop / decay)     clamped to [0, 0.98]
//! ```
//!
//! # Size
//!
//! Comb delays are the base table scaled by `0.5 + size` (0.5x to 1.5x).
//! Buffers are sized for the largest scale so changing size never
//! reallocates or clamps.
//!
//! # Modulation
//!
//! Every comb owns a triangle LFO. Base rates and phases are spread across
//! the bank so no two combs sweep in step; `mod_rate` scales all rates and
//! `mod_depth` sets the excursion (up to ±10 samples).

use aura_core::{
    AllpassStage, AudioBlock, BUTTERWORTH_Q, Biquad, BiquadCoefficients, BlockProcessor,
    DecayEnvelope, DelayLine, Lfo, MAX_FEEDBACK, ModulatedComb, clamp_finite, ms_to_samples,
};
use libm::{floorf, powf};

/// Parallel combs per channel.
pub const COMB_COUNT: usize = 8;

/// Series allpass stages per channel.
pub const ALLPASS_COUNT: usize = 4;

/// Base comb delays in milliseconds (left channel).
pub const COMB_TIMES_MS: [f32; COMB_COUNT] = [25.3, 26.9, 28.9, 30.7, 32.7, 34.4, 36.1, 38.6];

/// Added to every right-channel comb delay.
pub const COMB_STEREO_SPREAD_MS: f32 = 0.5;

/// Base allpass delays in milliseconds (left channel).
pub const ALLPASS_TIMES_MS: [f32; ALLPASS_COUNT] = [5.0, 1.7, 0.6, 0.2];

/// Added to every right-channel allpass delay.
pub const ALLPASS_STEREO_SPREAD_MS: f32 = 0.1;

/// Pre-delay buffer length.
pub const MAX_PRE_DELAY_MS: f32 = 200.0;

/// Comb size scale at `size = 1`.
const MAX_SIZE_SCALE: f32 = 1.5;

const COMB_HEADROOM: usize = 500;
const ALLPASS_HEADROOM: usize = 50;

/// Average comb loop length at scale 1.0, in seconds.
const AVG_LOOP_SECONDS: f32 = 0.030;

/// Per-comb LFO base rates in Hz.
const LFO_BASE_RATES_HZ: [f32; COMB_COUNT] = [0.50, 0.57, 0.63, 0.71, 0.77, 0.83, 0.91, 0.97];

/// Right-channel LFO rate ratio.
const LFO_RIGHT_RATE_RATIO: f32 = 1.03;

/// Right-channel LFO phase offset in cycles.
const LFO_RIGHT_PHASE_OFFSET: f32 = 0.25;

/// Sample rate assumed before the first `prepare`.
pub const DEFAULT_SAMPLE_RATE: f32 = 44100.0;

/// Block size assumed before the first `prepare`.
pub const DEFAULT_MAX_BLOCK_SIZE: usize = 512;

fn comb_delay_ms(ch: usize, i: usize) -> f32 {
    COMB_TIMES_MS[i] + if ch == 0 { 0.0 } else { COMB_STEREO_SPREAD_MS }
}

fn allpass_delay_ms(ch: usize, i: usize) -> f32 {
    ALLPASS_TIMES_MS[i] + if ch == 0 { 0.0 } else { ALLPASS_STEREO_SPREAD_MS }
}

fn lfo_base_rate(ch: usize, i: usize) -> f32 {
    LFO_BASE_RATES_HZ[i] * if ch == 0 { 1.0 } else { LFO_RIGHT_RATE_RATIO }
}

fn lfo_phase(ch: usize, i: usize) -> f32 {
    i as f32 / COMB_COUNT as f32 + ch as f32 * LFO_RIGHT_PHASE_OFFSET
}

/// Comb feedback for a decay time (s) at a given size.
///
/// ```rust
/// use aura_reverb::engine::feedback_for;
///
/// let fb = feedback_for(0.5, 2.0);
/// assert!((fb - 0.9016).abs() < 1e-3);
/// assert_eq!(feedback_for(0.0, 10.0), 0.98);
/// ```
pub fn feedback_for(size: f32, decay: f32) -> f32 {
    let avg_loop = AVG_LOOP_SECONDS * (0.5 + size);
    let fb = powf(10.0, -3.0 * avg_loop / decay.max(f32::EPSILON));
    if fb.is_finite() {
        fb.clamp(0.0, MAX_FEEDBACK)
    } else {
        0.0
    }
}

/// Stereo Schroeder reverb tail.
///
/// Processes whatever it is given as 100% wet; dry/wet mixing, gain and
/// early reflections are the [`SignalRouter`](crate::SignalRouter)'s job.
///
/// # Example
///
/// ```rust
/// use aura_core::{AudioBlock, BlockProcessor};
/// use aura_reverb::ReverbEngine;
///
/// let mut engine = ReverbEngine::new();
/// engine.prepare(44100.0, 2048);
/// engine.set_size(0.5);
/// engine.set_decay(2.0);
///
/// let mut left = vec![0.0f32; 2048];
/// let mut right = vec![0.0f32; 2048];
/// left[0] = 1.0;
/// right[0] = 1.0;
/// engine.process(&mut AudioBlock::stereo(&mut left, &mut right));
/// assert!(left.iter().any(|s| s.abs() > 1e-6));
/// ```
#[derive(Debug, Clone)]
pub struct ReverbEngine {
    sample_rate: f32,

    pre_delay: [DelayLine; 2],
    pre_delay_samples: usize,
    combs: [[ModulatedComb; COMB_COUNT]; 2],
    allpasses: [[AllpassStage; ALLPASS_COUNT]; 2],
    high_cut_filters: [Biquad; 2],
    low_cut_filters: [Biquad; 2],
    envelope: DecayEnvelope,

    size: f32,
    decay: f32,
    damping: f32,
    pre_delay_ms: f32,
    width: f32,
    high_cut: f32,
    low_cut: f32,
    mod_depth: f32,
    mod_rate: f32,
    feedback: f32,

    low_decay_mult: f32,
    mid_decay_mult: f32,
    high_decay_mult: f32,
    crossover_low: f32,
    crossover_high: f32,
}

impl Default for ReverbEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReverbEngine {
    /// Engine with default settings, prepared for
    /// [`DEFAULT_SAMPLE_RATE`] / [`DEFAULT_MAX_BLOCK_SIZE`].
    pub fn new() -> Self {
        let mut engine = Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            pre_delay: [DelayLine::new(2), DelayLine::new(2)],
            pre_delay_samples: 0,
            combs: core::array::from_fn(|_| {
                core::array::from_fn(|_| ModulatedComb::new(16, Lfo::default()))
            }),
            allpasses: core::array::from_fn(|_| core::array::from_fn(|_| AllpassStage::new(2))),
            high_cut_filters: [Biquad::new(), Biquad::new()],
            low_cut_filters: [Biquad::new(), Biquad::new()],
            envelope: DecayEnvelope::new(),
            size: 0.5,
            decay: 2.0,
            damping: 0.5,
            pre_delay_ms: 0.0,
            width: 1.0,
            high_cut: 12000.0,
            low_cut: 80.0,
            mod_depth: 0.3,
            mod_rate: 1.0,
            feedback: 0.0,
            low_decay_mult: 1.0,
            mid_decay_mult: 1.0,
            high_decay_mult: 1.0,
            crossover_low: 200.0,
            crossover_high: 4000.0,
        };
        engine.prepare(DEFAULT_SAMPLE_RATE, DEFAULT_MAX_BLOCK_SIZE);
        engine
    }

    // -- setters --------------------------------------------------------

    /// Room size in `[0, 1]`; rescales all comb delays and the feedback.
    pub fn set_size(&mut self, size: f32) {
        self.size = clamp_finite(size, 0.0, 1.0, self.size);
        self.update_comb_delays();
        self.update_feedback();
    }

    /// Decay time in seconds, clamped to `[0.1, 10]`.
    pub fn set_decay(&mut self, seconds: f32) {
        self.decay = clamp_finite(seconds, 0.1, 10.0, self.decay);
        self.update_feedback();
    }

    /// Damping in `[0, 1]`; the comb filters run at `0.7 · damping`.
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = clamp_finite(damping, 0.0, 1.0, self.damping);
        let k = self.damping * 0.7;
        for comb in self.combs.iter_mut().flatten() {
            comb.set_damping(k);
        }
    }

    /// Pre-delay in milliseconds, clamped to `[0, 200]` and to the buffer.
    pub fn set_pre_delay_ms(&mut self, ms: f32) {
        self.pre_delay_ms = clamp_finite(ms, 0.0, MAX_PRE_DELAY_MS, self.pre_delay_ms);
        let max = self.pre_delay[0].capacity() - 1;
        self.pre_delay_samples = (ms_to_samples(self.pre_delay_ms, self.sample_rate) as usize).min(max);
    }

    /// Stereo width in `[0, 1]`; 0 collapses the tail to mono.
    pub fn set_width(&mut self, width: f32) {
        self.width = clamp_finite(width, 0.0, 1.0, self.width);
    }

    /// Output lowpass cutoff, clamped to `[1000, 20000]` Hz.
    pub fn set_high_cut(&mut self, hz: f32) {
        self.high_cut = clamp_finite(hz, 1000.0, 20000.0, self.high_cut);
        self.update_filters();
    }

    /// Output highpass cutoff, clamped to `[20, 500]` Hz.
    pub fn set_low_cut(&mut self, hz: f32) {
        self.low_cut = clamp_finite(hz, 20.0, 500.0, self.low_cut);
        self.update_filters();
    }

    /// Modulation depth in `[0, 1]`.
    pub fn set_modulation_depth(&mut self, depth: f32) {
        self.mod_depth = clamp_finite(depth, 0.0, 1.0, self.mod_depth);
        for comb in self.combs.iter_mut().flatten() {
            comb.set_modulation_depth(self.mod_depth);
        }
    }

    /// Modulation rate multiplier in `[0, 2]`.
    pub fn set_modulation_rate(&mut self, rate: f32) {
        self.mod_rate = clamp_finite(rate, 0.0, 2.0, self.mod_rate);
        for (ch, bank) in self.combs.iter_mut().enumerate() {
            for (i, comb) in bank.iter_mut().enumerate() {
                comb.lfo_mut().set_rate(lfo_base_rate(ch, i) * self.mod_rate);
            }
        }
    }

    // TODO: split comb feedback into low/mid/high bands at the crossovers and
    // scale each band's feedback by its multiplier. Until then these five
    // values are stored and reported but do not affect the output.

    /// Low-band decay multiplier in `[0.5, 2]`.
    pub fn set_low_decay_multiplier(&mut self, mult: f32) {
        self.low_decay_mult = clamp_finite(mult, 0.5, 2.0, self.low_decay_mult);
    }

    /// Mid-band decay multiplier in `[0.5, 2]`.
    pub fn set_mid_decay_multiplier(&mut self, mult: f32) {
        self.mid_decay_mult = clamp_finite(mult, 0.5, 2.0, self.mid_decay_mult);
    }

    /// High-band decay multiplier in `[0.5, 2]`.
    pub fn set_high_decay_multiplier(&mut self, mult: f32) {
        self.high_decay_mult = clamp_finite(mult, 0.5, 2.0, self.high_decay_mult);
    }

    /// Low/mid crossover in `[80, 400]` Hz.
    pub fn set_crossover_low(&mut self, hz: f32) {
        self.crossover_low = clamp_finite(hz, 80.0, 400.0, self.crossover_low);
    }

    /// Mid/high crossover in `[2000, 8000]` Hz.
    pub fn set_crossover_high(&mut self, hz: f32) {
        self.crossover_high = clamp_finite(hz, 2000.0, 8000.0, self.crossover_high);
    }

    // -- getters --------------------------------------------------------

    /// Sample rate from the last `prepare`.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Room size.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Decay in seconds.
    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// Damping amount.
    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Pre-delay in milliseconds.
    pub fn pre_delay_ms(&self) -> f32 {
        self.pre_delay_ms
    }

    /// Pre-delay in whole samples.
    pub fn pre_delay_samples(&self) -> usize {
        self.pre_delay_samples
    }

    /// Stereo width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// High cut in Hz.
    pub fn high_cut(&self) -> f32 {
        self.high_cut
    }

    /// Low cut in Hz.
    pub fn low_cut(&self) -> f32 {
        self.low_cut
    }

    /// Modulation depth.
    pub fn modulation_depth(&self) -> f32 {
        self.mod_depth
    }

    /// Modulation rate multiplier.
    pub fn modulation_rate(&self) -> f32 {
        self.mod_rate
    }

    /// Low-band decay multiplier.
    pub fn low_decay_multiplier(&self) -> f32 {
        self.low_decay_mult
    }

    /// Mid-band decay multiplier.
    pub fn mid_decay_multiplier(&self) -> f32 {
        self.mid_decay_mult
    }

    /// High-band decay multiplier.
    pub fn high_decay_multiplier(&self) -> f32 {
        self.high_decay_mult
    }

    /// Low/mid crossover.
    pub fn crossover_low(&self) -> f32 {
        self.crossover_low
    }

    /// Mid/high crossover.
    pub fn crossover_high(&self) -> f32 {
        self.crossover_high
    }

    /// Comb loop gain.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Smoothed output peak, for visualization.
    pub fn decay_envelope(&self) -> f32 {
        self.envelope.value()
    }

    /// Base comb delays in samples, `[channel][comb]`.
    pub fn comb_delays(&self) -> [[f32; COMB_COUNT]; 2] {
        self.combs.each_ref().map(|bank| bank.each_ref().map(ModulatedComb::delay))
    }

    /// Allpass delays in samples, `[channel][stage]`.
    pub fn allpass_delays(&self) -> [[usize; ALLPASS_COUNT]; 2] {
        self.allpasses.each_ref().map(|bank| bank.each_ref().map(AllpassStage::delay))
    }

    // -- internals ------------------------------------------------------

    fn update_comb_delays(&mut self) {
        let scale = 0.5 + self.size;
        let sr = self.sample_rate;
        for (ch, bank) in self.combs.iter_mut().enumerate() {
            for (i, comb) in bank.iter_mut().enumerate() {
                comb.set_delay(floorf(ms_to_samples(comb_delay_ms(ch, i) * scale, sr)));
            }
        }
    }

    fn update_feedback(&mut self) {
        self.feedback = feedback_for(self.size, self.decay);
        for comb in self.combs.iter_mut().flatten() {
            comb.set_feedback(self.feedback);
        }
    }

    fn update_filters(&mut self) {
        let lp = BiquadCoefficients::lowpass(self.high_cut, BUTTERWORTH_Q, self.sample_rate);
        let hp = BiquadCoefficients::highpass(self.low_cut, BUTTERWORTH_Q, self.sample_rate);
        for f in &mut self.high_cut_filters {
            f.set_coefficients(lp);
        }
        for f in &mut self.low_cut_filters {
            f.set_coefficients(hp);
        }
    }

    #[inline]
    fn process_frame(&mut self, in_l: f32, in_r: f32) -> (f32, f32) {
        // Pre-delay: write first so a zero delay passes straight through
        self.pre_delay[0].write(in_l);
        self.pre_delay[1].write(in_r);
        let delayed = [
            self.pre_delay[0].read(self.pre_delay_samples),
            self.pre_delay[1].read(self.pre_delay_samples),
        ];
        self.pre_delay[0].advance();
        self.pre_delay[1].advance();

        let mut out = [0.0f32; 2];
        for ch in 0..2 {
            let mut sum = 0.0;
            for comb in &mut self.combs[ch] {
                sum += comb.process(delayed[ch]);
            }
            let mut y = sum / COMB_COUNT as f32;
            for ap in &mut self.allpasses[ch] {
                y = ap.process(y);
            }
            out[ch] = y;
        }

        let mid = (out[0] + out[1]) * 0.5;
        let side = (out[0] - out[1]) * 0.5 * self.width;
        (mid + side, mid - side)
    }
}

impl BlockProcessor for ReverbEngine {
    fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        let sr = sample_rate.max(1.0);
        self.sample_rate = sr;

        let pre_len = (ms_to_samples(MAX_PRE_DELAY_MS, sr) as usize).max(2);
        self.pre_delay = [DelayLine::new(pre_len), DelayLine::new(pre_len)];

        self.combs = core::array::from_fn(|ch| {
            core::array::from_fn(|i| {
                let max_delay = ms_to_samples(comb_delay_ms(ch, i) * MAX_SIZE_SCALE, sr) as usize;
                let lfo = Lfo::new(sr, lfo_base_rate(ch, i) * self.mod_rate).with_phase(lfo_phase(ch, i));
                ModulatedComb::new(max_delay + COMB_HEADROOM, lfo)
            })
        });

        self.allpasses = core::array::from_fn(|ch| {
            core::array::from_fn(|i| {
                let delay = ms_to_samples(allpass_delay_ms(ch, i), sr) as usize;
                let mut ap = AllpassStage::new(delay + ALLPASS_HEADROOM);
                ap.set_delay(delay.max(1));
                ap
            })
        });

        for f in self.high_cut_filters.iter_mut().chain(self.low_cut_filters.iter_mut()) {
            f.clear();
        }
        self.envelope.reset();

        self.set_damping(self.damping);
        self.set_modulation_depth(self.mod_depth);
        self.set_pre_delay_ms(self.pre_delay_ms);
        self.update_comb_delays();
        self.update_feedback();
        self.update_filters();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = sr,
            max_block_size,
            pre_delay_len = pre_len,
            longest_comb = self.combs[1][COMB_COUNT - 1].capacity(),
            "reverb engine prepared"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = max_block_size;
    }

    fn reset(&mut self) {
        for line in &mut self.pre_delay {
            line.clear();
        }
        for comb in self.combs.iter_mut().flatten() {
            comb.reset();
        }
        for ap in self.allpasses.iter_mut().flatten() {
            ap.clear();
        }
        for f in self.high_cut_filters.iter_mut().chain(self.low_cut_filters.iter_mut()) {
            f.clear();
        }
        self.envelope.reset();

        #[cfg(feature = "tracing")]
        tracing::debug!("reverb engine reset");
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        for i in 0..block.len() {
            let (in_l, in_r) = block.frame(i);
            let (out_l, out_r) = self.process_frame(in_l, in_r);
            block.set_frame(i, out_l, out_r);
        }

        for ch in 0..block.num_channels() {
            if let Some(samples) = block.channel_mut(ch) {
                self.high_cut_filters[ch].process_slice(samples);
                self.low_cut_filters[ch].process_slice(samples);
            }
        }

        self.envelope.update(block.peak());
    }
}

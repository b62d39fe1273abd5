//! Top-level signal routing: trims, wet path and dry/wet mix.
//!
//! ```text
//!            input gain ramp
//! block ──────────┬───────────────────────────────────────────┐ dry
//!                 │ copy                                      │
//!                 ▼                                           ▼
//!           wet buffer ──→ EarlyReflections ──→ ReverbEngine ─→ mix ──→ output gain ramp ──→ block
//! ```
//!
//! The wet path always runs on a separate buffer allocated in `prepare`, so
//! the dry signal is never touched until the final mix. Host blocks larger
//! than the prepared maximum are processed in `max_block_size` chunks.

use aura_core::{AudioBlock, BlockProcessor, GainRamp, StereoBuffer, wet_dry_mix};

use crate::engine::{DEFAULT_MAX_BLOCK_SIZE, DEFAULT_SAMPLE_RATE};
use crate::{EarlyReflections, EnvelopeMeter, ReverbEngine, ReverbParams, SharedParams};

/// Complete reverb processor: early reflections, late tail, trims and mix.
///
/// # Example
///
/// ```rust
/// use aura_core::{AudioBlock, BlockProcessor};
/// use aura_reverb::{ParamId, ReverbParams, SignalRouter};
///
/// let mut router = SignalRouter::new();
/// router.prepare(48000.0, 256);
///
/// let mut params = ReverbParams::default();
/// params.set(ParamId::Mix, 0.5);
/// router.set_params(&params);
///
/// let mut left = vec![0.0f32; 1024];
/// let mut right = vec![0.0f32; 1024];
/// left[0] = 1.0;
/// router.process(&mut AudioBlock::stereo(&mut left, &mut right));
/// assert!((left[0] - 0.5).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct SignalRouter {
    engine: ReverbEngine,
    early: EarlyReflections,
    wet: StereoBuffer,
    input_gain: GainRamp,
    output_gain: GainRamp,
    params: ReverbParams,
    sample_rate: f32,
    max_block_size: usize,
    meter: EnvelopeMeter,
}

impl Default for SignalRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalRouter {
    /// Router with default parameters, prepared for 44.1 kHz / 512 frames.
    pub fn new() -> Self {
        let mut router = Self {
            engine: ReverbEngine::new(),
            early: EarlyReflections::new(),
            wet: StereoBuffer::new(0),
            input_gain: GainRamp::new(),
            output_gain: GainRamp::new(),
            params: ReverbParams::default(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_block_size: DEFAULT_MAX_BLOCK_SIZE,
            meter: EnvelopeMeter::new(),
        };
        router.prepare(DEFAULT_SAMPLE_RATE, DEFAULT_MAX_BLOCK_SIZE);
        router
    }

    /// Applies a full parameter set.
    ///
    /// Every field is clamped first (non-finite values fall back to their
    /// defaults). Room-type multipliers are folded into size, decay and ER
    /// size here; gains take effect as ramps over the next processed block.
    pub fn set_params(&mut self, params: &ReverbParams) {
        let params = params.sanitized();
        self.params = params;

        let e = &mut self.engine;
        e.set_size(params.effective_size());
        e.set_decay(params.effective_decay());
        e.set_damping(params.damping);
        e.set_pre_delay_ms(params.pre_delay_ms);
        e.set_width(params.width);
        e.set_high_cut(params.high_cut);
        e.set_low_cut(params.low_cut);
        e.set_modulation_depth(params.mod_depth);
        e.set_modulation_rate(params.mod_rate);
        e.set_low_decay_multiplier(params.low_decay);
        e.set_mid_decay_multiplier(params.mid_decay);
        e.set_high_decay_multiplier(params.high_decay);
        e.set_crossover_low(params.crossover_low);
        e.set_crossover_high(params.crossover_high);

        self.early.set_size(params.effective_er_size());
        self.early.set_level(params.er_level);

        self.input_gain.set_gain_db(params.input_gain_db);
        self.output_gain.set_gain_db(params.output_gain_db);
    }

    /// Parameters from the last [`set_params`](Self::set_params).
    pub fn params(&self) -> &ReverbParams {
        &self.params
    }

    /// Takes one snapshot of `shared`, applies it, and processes `block`.
    pub fn process_shared(&mut self, shared: &SharedParams, block: &mut AudioBlock<'_>) {
        let snapshot = shared.snapshot();
        self.set_params(&snapshot);
        self.process(block);
    }

    /// Smoothed wet output peak.
    pub fn decay_envelope(&self) -> f32 {
        self.engine.decay_envelope()
    }

    /// Handle that reads the decay envelope from any thread.
    pub fn envelope_meter(&self) -> EnvelopeMeter {
        self.meter.clone()
    }

    /// The late reverb engine.
    pub fn engine(&self) -> &ReverbEngine {
        &self.engine
    }

    /// The early reflection generator.
    pub fn early_reflections(&self) -> &EarlyReflections {
        &self.early
    }

    /// Sample rate from the last `prepare`.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Largest block processed in one pass.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    fn process_chunk(&mut self, block: &mut AudioBlock<'_>) {
        self.input_gain.process(block);

        self.wet.copy_from(block);
        {
            let mut wet = self.wet.block();
            self.early.process(&mut wet);
            self.engine.process(&mut wet);
        }

        let mix = self.params.mix;
        for ch in 0..block.num_channels() {
            let wet = self.wet.channel(ch);
            if let Some(dry) = block.channel_mut(ch) {
                for (d, &w) in dry.iter_mut().zip(wet) {
                    *d = wet_dry_mix(*d, w, mix);
                }
            }
        }

        self.output_gain.process(block);
        self.meter.store(self.engine.decay_envelope());
    }
}

impl BlockProcessor for SignalRouter {
    fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        self.sample_rate = sample_rate.max(1.0);
        self.max_block_size = max_block_size.max(1);

        self.engine.prepare(self.sample_rate, self.max_block_size);
        self.early.prepare(self.sample_rate, self.max_block_size);
        self.wet = StereoBuffer::new(self.max_block_size);

        let params = self.params;
        self.set_params(&params);
        self.input_gain.snap();
        self.output_gain.snap();
        self.meter.store(0.0);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = self.sample_rate,
            max_block_size = self.max_block_size,
            "signal router prepared"
        );
    }

    fn reset(&mut self) {
        self.engine.reset();
        self.early.reset();
        self.wet.clear();
        self.input_gain.snap();
        self.output_gain.snap();
        self.meter.store(0.0);

        #[cfg(feature = "tracing")]
        tracing::debug!("signal router reset");
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        let len = block.len();
        if len <= self.max_block_size {
            self.process_chunk(block);
            return;
        }
        let mut start = 0;
        while start < len {
            let mut chunk = block.sub_block(start, self.max_block_size);
            self.process_chunk(&mut chunk);
            start += self.max_block_size;
        }
    }
}

//! Block-rate gain ramps for the input and output trims.
//!
//! Gains are set in dB once per block and applied as a linear ramp from the
//! previous block's gain to the new one, so automation never steps:
//!
//! ```text
//! g[i] = start + (end - start) · i / n      for i in 0..n
//! ```
//!
//! The range is [`GAIN_MIN_DB`] to [`GAIN_MAX_DB`], clamped on set.
//!
//! # Usage
//!
//! ```rust
//! use aura_core::{AudioBlock, GainRamp};
//!
//! let mut trim = GainRamp::new();
//! trim.set_gain_db(-6.0);
//!
//! let mut samples = [1.0f32; 64];
//! trim.process(&mut AudioBlock::mono(&mut samples));
//! assert_eq!(samples[0], 1.0);
//! assert!(samples[63] < 0.55);
//! ```

use crate::{AudioBlock, clamp_finite, db_to_linear, linear_to_db};

/// Minimum trim in dB.
pub const GAIN_MIN_DB: f32 = -24.0;

/// Maximum trim in dB.
pub const GAIN_MAX_DB: f32 = 12.0;

/// Multiplies `samples` by a ramp running from `start` towards `end`.
///
/// The first sample is scaled by `start`; the ramp reaches `end` one sample
/// past the slice.
#[inline]
pub fn apply_gain_ramp(samples: &mut [f32], start: f32, end: f32) {
    if samples.is_empty() {
        return;
    }
    if start == end {
        samples.iter_mut().for_each(|s| *s *= start);
        return;
    }
    let increment = (end - start) / samples.len() as f32;
    let mut gain = start;
    for s in samples {
        *s *= gain;
        gain += increment;
    }
}

/// Linear gain that ramps between blocks.
#[derive(Debug, Clone)]
pub struct GainRamp {
    current: f32,
    target: f32,
}

impl Default for GainRamp {
    fn default() -> Self {
        Self::new()
    }
}

impl GainRamp {
    /// Unity gain, no pending ramp.
    pub fn new() -> Self {
        Self {
            current: 1.0,
            target: 1.0,
        }
    }

    /// Sets the target in dB (clamped). Takes effect over the next block.
    pub fn set_gain_db(&mut self, db: f32) {
        self.target = db_to_linear(clamp_finite(db, GAIN_MIN_DB, GAIN_MAX_DB, 0.0));
    }

    /// Target gain in dB.
    pub fn gain_db(&self) -> f32 {
        linear_to_db(self.target)
    }

    /// Target gain, linear.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Gain applied at the start of the next block, linear.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Jumps straight to the target.
    pub fn snap(&mut self) {
        self.current = self.target;
    }

    /// Ramps every channel of `block` from the current gain to the target.
    pub fn process(&mut self, block: &mut AudioBlock<'_>) {
        let (left, right) = block.split_mut();
        apply_gain_ramp(left, self.current, self.target);
        if let Some(right) = right {
            apply_gain_ramp(right, self.current, self.target);
        }
        self.current = self.target;
    }
}

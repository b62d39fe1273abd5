//! Series allpass diffuser stage.
//!
//! ```text
//! delayed = line[write_pos - delay]
//! output  = -g·input + delayed
//! line    ←  input + g·delayed
//! ```
//!
//! With the fixed `g = 0.5`. Four of these per channel smear the comb output
//! into a dense tail.

use crate::{DelayLine, flush_denormal};

/// Fixed diffusion coefficient.
pub const ALLPASS_GAIN: f32 = 0.5;

/// Single allpass stage over a fixed-capacity delay line.
///
/// # Example
///
/// ```rust
/// use aura_core::AllpassStage;
///
/// let mut ap = AllpassStage::new(64);
/// ap.set_delay(10);
/// assert_eq!(ap.process(1.0), -0.5);
/// ```
#[derive(Debug, Clone)]
pub struct AllpassStage {
    line: DelayLine,
    delay: usize,
}

impl AllpassStage {
    /// Creates a stage with `capacity` samples of storage and a 1-sample delay.
    pub fn new(capacity: usize) -> Self {
        Self {
            line: DelayLine::new(capacity.max(2)),
            delay: 1,
        }
    }

    /// Sets the delay in samples, clamped to `[1, capacity - 1]`.
    pub fn set_delay(&mut self, samples: usize) {
        self.delay = samples.clamp(1, self.line.capacity() - 1);
    }

    /// Delay in samples.
    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Processes one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.line.read(self.delay);
        let output = -ALLPASS_GAIN * input + delayed;
        self.line.write(flush_denormal(input + ALLPASS_GAIN * delayed));
        self.line.advance();
        output
    }

    /// Zeroes the delay line.
    pub fn clear(&mut self) {
        self.line.clear();
    }

    /// Buffer capacity in samples.
    pub fn capacity(&self) -> usize {
        self.line.capacity()
    }
}

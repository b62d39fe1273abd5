//! Biquad filter for the output tone stage.
//!
//! Direct Form I with RBJ cookbook lowpass / highpass coefficients. The
//! reverb runs one lowpass (high cut) and one highpass (low cut) per channel
//! at Q = [`BUTTERWORTH_Q`] over each processed block.

use core::f32::consts::PI;
use libm::{cosf, sinf};

use crate::{clamp_finite, flush_denormal};

/// Q for a maximally flat second-order response.
pub const BUTTERWORTH_Q: f32 = 0.707;

/// Cutoffs are kept below this fraction of the sample rate.
pub const MAX_CUTOFF_RATIO: f32 = 0.45;

/// Normalized biquad coefficients (`a0 = 1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feedforward x[n]
    pub b0: f32,
    /// Feedforward x[n-1]
    pub b1: f32,
    /// Feedforward x[n-2]
    pub b2: f32,
    /// Feedback y[n-1]
    pub a1: f32,
    /// Feedback y[n-2]
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Passthrough.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// RBJ lowpass at `freq` Hz.
    pub fn lowpass(freq: f32, q: f32, sample_rate: f32) -> Self {
        let (cos_w, alpha) = prewarp(freq, q, sample_rate);
        let b1 = 1.0 - cos_w;
        Self::normalized(b1 * 0.5, b1, b1 * 0.5, 1.0 + alpha, -2.0 * cos_w, 1.0 - alpha)
    }

    /// RBJ highpass at `freq` Hz.
    pub fn highpass(freq: f32, q: f32, sample_rate: f32) -> Self {
        let (cos_w, alpha) = prewarp(freq, q, sample_rate);
        let b0 = (1.0 + cos_w) * 0.5;
        Self::normalized(b0, -(1.0 + cos_w), b0, 1.0 + alpha, -2.0 * cos_w, 1.0 - alpha)
    }

    fn normalized(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        let inv = 1.0 / a0;
        Self {
            b0: b0 * inv,
            b1: b1 * inv,
            b2: b2 * inv,
            a1: a1 * inv,
            a2: a2 * inv,
        }
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Clamps `freq` into `[1, sample_rate * MAX_CUTOFF_RATIO]`. Non-finite
/// frequencies map to the upper limit.
#[inline]
pub fn clamp_cutoff(freq: f32, sample_rate: f32) -> f32 {
    let max = sample_rate * MAX_CUTOFF_RATIO;
    clamp_finite(freq, 1.0, max, max)
}

fn prewarp(freq: f32, q: f32, sample_rate: f32) -> (f32, f32) {
    let omega = 2.0 * PI * clamp_cutoff(freq, sample_rate) / sample_rate;
    (cosf(omega), sinf(omega) / (2.0 * q.max(0.01)))
}

/// Direct Form I biquad.
///
/// ```text
/// y[n] = b0·x[n] + b1·x[n-1] + b2·x[n-2] - a1·y[n-1] - a2·y[n-2]
/// ```
///
/// # Example
///
/// ```rust
/// use aura_core::{Biquad, BiquadCoefficients, BUTTERWORTH_Q};
///
/// let mut lp = Biquad::new();
/// lp.set_coefficients(BiquadCoefficients::lowpass(1000.0, BUTTERWORTH_Q, 48000.0));
/// let y = lp.process(1.0);
/// assert!(y > 0.0 && y < 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Biquad {
    coeffs: BiquadCoefficients,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Passthrough filter with cleared state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the coefficients, keeping the state.
    pub fn set_coefficients(&mut self, coeffs: BiquadCoefficients) {
        self.coeffs = coeffs;
    }

    /// Current coefficients.
    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coeffs
    }

    /// Filters one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = flush_denormal(output);

        output
    }

    /// Filters a slice in place.
    #[inline]
    pub fn process_slice(&mut self, samples: &mut [f32]) {
        for s in samples {
            *s = self.process(*s);
        }
    }

    /// Clears the filter memory.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

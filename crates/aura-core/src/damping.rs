//! One-pole damping filter for comb feedback paths.
//!
//! ```text
//! y[n] = (1 - k) * x[n] + k * y[n-1]
//! ```
//!
//! `k` is the damping coefficient, clamped to `[0, 0.99]`. At `k = 0` the
//! filter is transparent; as `k` approaches 1 high frequencies are
//! progressively absorbed, which is how the reverb tail darkens over time.
//! The DC gain is exactly 1 for every `k`, so the filter never adds energy
//! to a feedback loop.

use crate::{clamp_finite, flush_denormal};

/// Upper bound for the damping coefficient.
pub const MAX_DAMPING: f32 = 0.99;

/// One-pole lowpass with a directly-set coefficient.
///
/// # Example
///
/// ```rust
/// use aura_core::DampingFilter;
///
/// let mut damp = DampingFilter::new();
/// damp.set_damping(0.5);
/// assert_eq!(damp.process(1.0), 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DampingFilter {
    state: f32,
    coeff: f32,
}

impl DampingFilter {
    /// Transparent filter (`k = 0`) with cleared state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the coefficient, clamped to `[0, 0.99]`.
    #[inline]
    pub fn set_damping(&mut self, k: f32) {
        self.coeff = clamp_finite(k, 0.0, MAX_DAMPING, self.coeff);
    }

    /// Current coefficient.
    #[inline]
    pub fn damping(&self) -> f32 {
        self.coeff
    }

    /// Filters one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(input * (1.0 - self.coeff) + self.state * self.coeff);
        self.state
    }

    /// Clears the filter memory.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_at_zero() {
        let mut f = DampingFilter::new();
        for x in [0.3, -0.8, 1.0, 0.0] {
            assert_eq!(f.process(x), x);
        }
    }

    #[test]
    fn test_coefficient_clamped() {
        let mut f = DampingFilter::new();
        f.set_damping(1.5);
        assert_eq!(f.damping(), MAX_DAMPING);
        f.set_damping(-0.2);
        assert_eq!(f.damping(), 0.0);
    }

    #[test]
    fn test_non_finite_coefficient_ignored() {
        let mut f = DampingFilter::new();
        f.set_damping(0.4);
        f.set_damping(f32::NAN);
        f.set_damping(f32::INFINITY);
        assert_eq!(f.damping(), 0.4);
        assert!(f.process(1.0).is_finite());
    }

    #[test]
    fn test_unity_dc_gain() {
        let mut f = DampingFilter::new();
        f.set_damping(0.9);
        let mut y = 0.0;
        for _ in 0..2000 {
            y = f.process(1.0);
        }
        assert!((y - 1.0).abs() < 1e-4, "DC should pass at unity, got {}", y);
    }

    #[test]
    fn test_extreme_damping_is_bounded() {
        let mut f = DampingFilter::new();
        f.set_damping(0.99);
        let mut peak = 0.0f32;
        for block in 0..10_000 {
            for i in 0..100 {
                let x = if i == 0 { 1.0 } else { 0.0 };
                let y = f.process(x);
                peak = peak.max(y.abs());
                assert!(y.is_finite(), "Non-finite output in block {}", block);
            }
        }
        assert!(peak <= 1.0, "Peak {} exceeds input peak", peak);
    }

    #[test]
    fn test_reset() {
        let mut f = DampingFilter::new();
        f.set_damping(0.9);
        f.process(1.0);
        f.reset();
        assert_eq!(f.process(0.0), 0.0);
    }
}

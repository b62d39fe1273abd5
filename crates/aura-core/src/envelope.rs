//! Smoothed block-peak follower for decay visualization.

use crate::flush_denormal;

/// Weight of the previous value per update.
pub const ENVELOPE_SMOOTHING: f32 = 0.95;

/// One-pole smoother over block peaks: `env = env·0.95 + peak·0.05`.
///
/// Diagnostic only; nothing in the signal path reads it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecayEnvelope {
    value: f32,
}

impl DecayEnvelope {
    /// Starts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one block peak into the envelope.
    #[inline]
    pub fn update(&mut self, peak: f32) -> f32 {
        let peak = if peak.is_finite() { peak.abs() } else { 0.0 };
        self.value =
            flush_denormal(self.value * ENVELOPE_SMOOTHING + peak * (1.0 - ENVELOPE_SMOOTHING));
        self.value
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Back to zero.
    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_update() {
        let mut env = DecayEnvelope::new();
        assert!((env.update(1.0) - 0.05).abs() < 1e-6);
        assert!((env.update(1.0) - 0.0975).abs() < 1e-6);
    }

    #[test]
    fn test_converges_to_constant_peak() {
        let mut env = DecayEnvelope::new();
        for _ in 0..500 {
            env.update(0.8);
        }
        assert!((env.value() - 0.8).abs() < 1e-3);
    }

    #[test]
    fn test_decays_on_silence_and_resets() {
        let mut env = DecayEnvelope::new();
        for _ in 0..100 {
            env.update(1.0);
        }
        let held = env.value();
        env.update(0.0);
        assert!(env.value() < held);
        env.reset();
        assert_eq!(env.value(), 0.0);
    }
}

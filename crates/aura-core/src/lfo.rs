//! Triangle low-frequency oscillator for delay-time modulation.
//!
//! Each comb in the reverb owns one [`Lfo`]. Running the sixteen oscillators
//! at slightly different rates and phases smears the comb resonances and
//! breaks up metallic ringing in the tail.

use crate::clamp_finite;

/// Triangle LFO producing values in `[-1, 1]`.
///
/// The waveform is `2 * |2 * phase - 1| - 1`, so phase 0 yields +1 and
/// phase 0.5 yields -1. Phase advances by `rate / sample_rate` per call and
/// wraps by subtraction.
///
/// # Example
///
/// ```rust
/// use aura_core::Lfo;
///
/// let mut lfo = Lfo::new(48000.0, 0.5);
/// let v = lfo.next();
/// assert!((-1.0..=1.0).contains(&v));
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    phase: f32,
    initial_phase: f32,
    rate: f32,
    sample_rate: f32,
    phase_inc: f32,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(48000.0, 1.0)
    }
}

impl Lfo {
    /// Creates an oscillator at phase 0.
    pub fn new(sample_rate: f32, rate_hz: f32) -> Self {
        let mut lfo = Self {
            phase: 0.0,
            initial_phase: 0.0,
            rate: 0.0,
            sample_rate: sample_rate.max(1.0),
            phase_inc: 0.0,
        };
        lfo.set_rate(rate_hz);
        lfo
    }

    /// Builder: sets both the current and the reset phase.
    pub fn with_phase(mut self, phase: f32) -> Self {
        self.set_phase(phase);
        self.initial_phase = self.phase;
        self
    }

    /// Sets the rate in Hz, clamped to `[0, sample_rate / 2]`.
    pub fn set_rate(&mut self, rate_hz: f32) {
        self.rate = clamp_finite(rate_hz, 0.0, self.sample_rate * 0.5, 0.0);
        self.phase_inc = self.rate / self.sample_rate;
    }

    /// Current rate in Hz.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Changes the sample rate, keeping the rate in Hz.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
        self.set_rate(self.rate);
    }

    /// Jumps to `phase`, wrapped into `[0, 1)`.
    pub fn set_phase(&mut self, phase: f32) {
        if !phase.is_finite() {
            return;
        }
        self.phase = phase - libm::floorf(phase);
        if self.phase >= 1.0 {
            self.phase = 0.0;
        }
    }

    /// Current phase in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Returns the current value and advances one sample.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f32 {
        let value = 2.0 * (2.0 * self.phase - 1.0).abs() - 1.0;
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        value
    }

    /// Returns to the phase given at construction.
    pub fn reset(&mut self) {
        self.phase = self.initial_phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_shape() {
        let mut lfo = Lfo::new(4.0, 1.0);
        // Phase steps 0, 0.25, 0.5, 0.75
        let values: [f32; 4] = core::array::from_fn(|_| lfo.next());
        assert!((values[0] - 1.0).abs() < 1e-6);
        assert!(values[1].abs() < 1e-6);
        assert!((values[2] + 1.0).abs() < 1e-6);
        assert!(values[3].abs() < 1e-6);
        // Wrapped back to the start
        assert!((lfo.next() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_output_range() {
        let mut lfo = Lfo::new(48000.0, 3.7).with_phase(0.31);
        for _ in 0..100_000 {
            let v = lfo.next();
            assert!((-1.0..=1.0).contains(&v), "LFO out of range: {}", v);
        }
    }

    #[test]
    fn test_rate_clamped_to_nyquist() {
        let mut lfo = Lfo::new(1000.0, 0.5);
        lfo.set_rate(10_000.0);
        assert_eq!(lfo.rate(), 500.0);
        lfo.set_rate(-1.0);
        assert_eq!(lfo.rate(), 0.0);
        lfo.set_rate(f32::NAN);
        assert_eq!(lfo.rate(), 0.0);
    }

    #[test]
    fn test_reset_restores_initial_phase() {
        let mut lfo = Lfo::new(48000.0, 1.0).with_phase(0.25);
        for _ in 0..1234 {
            lfo.next();
        }
        lfo.reset();
        assert!((lfo.phase() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_set_phase_wraps() {
        let mut lfo = Lfo::default();
        lfo.set_phase(1.25);
        assert!((lfo.phase() - 0.25).abs() < 1e-6);
        lfo.set_phase(-0.25);
        assert!((lfo.phase() - 0.75).abs() < 1e-6);
        lfo.set_phase(f32::NAN);
        assert!((lfo.phase() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_zero_rate_holds() {
        let mut lfo = Lfo::new(48000.0, 0.0).with_phase(0.5);
        for _ in 0..10 {
            assert!((lfo.next() + 1.0).abs() < 1e-6);
        }
    }
}

//! Modulated feedback comb with damping, the late-reverb resonator.
//!
//! ```text
//! input ─→ (+) ─→ [delay line] ──┬──→ output (raw tap)
//!           ↑        ↑ read = delay + lfo·depth·10
//!           │                    │
//!           └── feedback × [DampingFilter] ←┘
//! ```
//!
//! The read position swings by at most [`MAX_MOD_EXCURSION`] samples around
//! the base delay. The output is the interpolated tap *before* damping; the
//! damped copy only recirculates.

use crate::{DampingFilter, DelayLine, Lfo, clamp_finite, flush_denormal};

/// Peak modulation excursion in samples at depth 1.0.
pub const MAX_MOD_EXCURSION: f32 = 10.0;

/// Upper bound for comb feedback.
pub const MAX_FEEDBACK: f32 = 0.98;

/// Feedback comb with LFO-modulated read position and one-pole damping.
///
/// # Example
///
/// ```rust
/// use aura_core::{Lfo, ModulatedComb};
///
/// let mut comb = ModulatedComb::new(256, Lfo::new(48000.0, 0.5));
/// comb.set_delay(100.0);
/// comb.set_feedback(0.7);
///
/// let first = comb.process(1.0);
/// assert_eq!(first, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ModulatedComb {
    line: DelayLine,
    delay: f32,
    feedback: f32,
    mod_depth: f32,
    damping: DampingFilter,
    lfo: Lfo,
}

impl ModulatedComb {
    /// Creates a comb over a buffer of `capacity` samples.
    ///
    /// The capacity must leave room for the modulation excursion; the base
    /// delay is clamped to `capacity - MAX_MOD_EXCURSION - 2`.
    pub fn new(capacity: usize, lfo: Lfo) -> Self {
        let capacity = capacity.max(MAX_MOD_EXCURSION as usize + 4);
        Self {
            line: DelayLine::new(capacity),
            delay: 1.0,
            feedback: 0.0,
            mod_depth: 0.0,
            damping: DampingFilter::new(),
            lfo,
        }
    }

    /// Largest base delay that keeps the modulated read inside the buffer.
    #[inline]
    pub fn max_delay(&self) -> f32 {
        (self.line.capacity() - 2) as f32 - MAX_MOD_EXCURSION
    }

    /// Sets the base delay in samples, clamped to `[1, max_delay()]`.
    pub fn set_delay(&mut self, samples: f32) {
        self.delay = clamp_finite(samples, 1.0, self.max_delay(), self.delay);
    }

    /// Base delay in samples.
    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Sets the loop gain, clamped to `[0, 0.98]`.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = clamp_finite(feedback, 0.0, MAX_FEEDBACK, self.feedback);
    }

    /// Loop gain.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Sets the damping filter coefficient (see [`DampingFilter::set_damping`]).
    pub fn set_damping(&mut self, k: f32) {
        self.damping.set_damping(k);
    }

    /// Damping filter coefficient.
    pub fn damping(&self) -> f32 {
        self.damping.damping()
    }

    /// Sets the modulation depth in `[0, 1]` (1.0 = ±10 samples).
    pub fn set_modulation_depth(&mut self, depth: f32) {
        self.mod_depth = clamp_finite(depth, 0.0, 1.0, self.mod_depth);
    }

    /// Modulation depth in `[0, 1]`.
    pub fn modulation_depth(&self) -> f32 {
        self.mod_depth
    }

    /// The comb's oscillator.
    pub fn lfo(&self) -> &Lfo {
        &self.lfo
    }

    /// Mutable access to the oscillator (rate changes).
    pub fn lfo_mut(&mut self) -> &mut Lfo {
        &mut self.lfo
    }

    /// Processes one sample and returns the raw interpolated tap.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let offset = self.delay + self.lfo.next() * self.mod_depth * MAX_MOD_EXCURSION;
        let tap = self.line.read_linear(offset);

        let damped = self.damping.process(tap);
        self.line.write(flush_denormal(input + damped * self.feedback));
        self.line.advance();

        tap
    }

    /// Clears the buffer and filter and rewinds the oscillator.
    pub fn reset(&mut self) {
        self.line.clear();
        self.damping.reset();
        self.lfo.reset();
    }

    /// Buffer capacity in samples.
    pub fn capacity(&self) -> usize {
        self.line.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_comb(capacity: usize, delay: f32) -> ModulatedComb {
        let mut comb = ModulatedComb::new(capacity, Lfo::new(48000.0, 0.0));
        comb.set_delay(delay);
        comb
    }

    #[test]
    fn test_echo_arrives_after_delay() {
        let mut comb = still_comb(128, 50.0);
        comb.set_feedback(0.5);

        assert_eq!(comb.process(1.0), 0.0);
        for i in 1..50 {
            let out = comb.process(0.0);
            assert_eq!(out, 0.0, "Early output at sample {}", i);
        }
        let echo = comb.process(0.0);
        assert!((echo - 1.0).abs() < 1e-6, "Expected echo of 1.0, got {}", echo);
    }

    #[test]
    fn test_feedback_decays() {
        let mut comb = still_comb(64, 20.0);
        comb.set_feedback(0.8);
        comb.process(1.0);

        let mut peaks = [0.0f32; 5];
        for (period, peak) in peaks.iter_mut().enumerate() {
            for _ in 0..20 {
                *peak = peak.max(comb.process(0.0).abs());
            }
            assert!(peak.is_finite(), "Non-finite at period {}", period);
        }
        for w in peaks.windows(2).skip(1) {
            assert!(w[1] < w[0], "Echoes should decay: {:?}", peaks);
        }
    }

    #[test]
    fn test_feedback_clamped() {
        let mut comb = still_comb(64, 20.0);
        comb.set_feedback(1.5);
        assert_eq!(comb.feedback(), MAX_FEEDBACK);
        comb.set_feedback(-1.0);
        assert_eq!(comb.feedback(), 0.0);
    }

    #[test]
    fn test_delay_clamped_to_buffer() {
        let mut comb = still_comb(100, 20.0);
        comb.set_delay(10_000.0);
        assert_eq!(comb.delay(), comb.max_delay());
        comb.set_delay(0.0);
        assert_eq!(comb.delay(), 1.0);
    }

    #[test]
    fn test_non_finite_settings_ignored() {
        let mut comb = still_comb(100, 20.0);
        comb.set_feedback(0.5);
        comb.set_modulation_depth(0.3);

        comb.set_delay(f32::NAN);
        comb.set_feedback(f32::INFINITY);
        comb.set_modulation_depth(f32::NEG_INFINITY);
        comb.set_damping(f32::NAN);

        assert_eq!(comb.delay(), 20.0);
        assert_eq!(comb.feedback(), 0.5);
        assert_eq!(comb.modulation_depth(), 0.3);
        for i in 0..200 {
            let x = if i == 0 { 1.0 } else { 0.0 };
            assert!(comb.process(x).is_finite());
        }
    }

    #[test]
    fn test_damping_reduces_energy() {
        let mut bright = still_comb(64, 20.0);
        bright.set_feedback(0.9);
        let mut dark = still_comb(64, 20.0);
        dark.set_feedback(0.9);
        dark.set_damping(0.7);

        bright.process(1.0);
        dark.process(1.0);
        let mut bright_sum = 0.0f32;
        let mut dark_sum = 0.0f32;
        for _ in 0..400 {
            bright_sum += bright.process(0.0).abs();
            dark_sum += dark.process(0.0).abs();
        }
        assert!(dark_sum < bright_sum, "Damped comb should lose energy faster");
    }

    #[test]
    fn test_modulated_output_stays_finite() {
        let mut comb = ModulatedComb::new(256, Lfo::new(48000.0, 5.0));
        comb.set_delay(200.0);
        comb.set_feedback(MAX_FEEDBACK);
        comb.set_modulation_depth(1.0);
        for i in 0..50_000 {
            let x = if i % 1000 == 0 { 1.0 } else { 0.0 };
            assert!(comb.process(x).is_finite());
        }
    }

    #[test]
    fn test_reset_silences() {
        let mut comb = still_comb(64, 20.0);
        comb.set_feedback(0.9);
        for _ in 0..100 {
            comb.process(1.0);
        }
        comb.reset();
        for _ in 0..100 {
            assert!(comb.process(0.0).abs() < 1e-10, "Should be silent after reset");
        }
    }

    #[test]
    fn test_no_denormals_after_silence() {
        let mut comb = still_comb(128, 50.0);
        comb.set_feedback(0.9);
        comb.set_damping(0.3);
        for _ in 0..1000 {
            comb.process(0.5);
        }
        for i in 0..100_000 {
            let out = comb.process(0.0);
            assert!(
                out == 0.0 || out.abs() > f32::MIN_POSITIVE,
                "Denormal at sample {}: {:.2e}",
                i,
                out
            );
        }
    }
}

//! Property-based tests for aura-core DSP primitives.
//!
//! Tests filter stability, comb boundedness and delay line integrity using
//! proptest for randomized input generation.

use proptest::prelude::*;
use aura_core::{
    AllpassStage, AudioBlock, BUTTERWORTH_Q, Biquad, BiquadCoefficients, DampingFilter, DelayLine,
    GainRamp, Lfo, MAX_FEEDBACK, ModulatedComb, wrap_back,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Lowpass and highpass biquads produce finite output for any cutoff,
    /// including cutoffs above Nyquist for low sample rates.
    #[test]
    fn biquad_stability(
        freq in 1.0f32..30000.0f32,
        sample_rate in prop::sample::select(vec![8000.0f32, 22050.0, 44100.0, 48000.0, 96000.0]),
        highpass in any::<bool>(),
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let coeffs = if highpass {
            BiquadCoefficients::highpass(freq, BUTTERWORTH_Q, sample_rate)
        } else {
            BiquadCoefficients::lowpass(freq, BUTTERWORTH_Q, sample_rate)
        };
        let mut biquad = Biquad::new();
        biquad.set_coefficients(coeffs);

        for _ in 0..32 {
            for &sample in &input {
                let out = biquad.process(sample);
                prop_assert!(
                    out.is_finite(),
                    "Biquad (hp={}, freq={}, sr={}) produced {} for input {}",
                    highpass, freq, sample_rate, out, sample
                );
            }
        }
    }

    /// The damping filter never exceeds the peak of its input.
    #[test]
    fn damping_filter_bounded(
        k in -1.0f32..2.0f32,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut filter = DampingFilter::new();
        filter.set_damping(k);
        let peak_in = input.iter().fold(0.0f32, |a, x| a.max(x.abs()));
        for _ in 0..16 {
            for &x in &input {
                let y = filter.process(x);
                prop_assert!(y.abs() <= peak_in + 1e-6, "Output {} exceeds input peak {}", y, peak_in);
            }
        }
    }

    /// A comb at maximum feedback with any damping and modulation stays
    /// finite and bounded under random input.
    #[test]
    fn comb_bounded(
        delay in 20.0f32..500.0f32,
        damping in 0.0f32..1.0f32,
        depth in 0.0f32..1.0f32,
        rate in 0.0f32..5.0f32,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut comb = ModulatedComb::new(600, Lfo::new(48000.0, rate));
        comb.set_delay(delay);
        comb.set_feedback(MAX_FEEDBACK);
        comb.set_damping(damping);
        comb.set_modulation_depth(depth);

        for _ in 0..64 {
            for &x in &input {
                let y = comb.process(x);
                prop_assert!(y.is_finite());
                // Loop gain <= 0.98 bounds the stored signal at 1 / (1 - 0.98)
                prop_assert!(y.abs() <= 50.0 + 1e-3, "Comb output {} out of bounds", y);
            }
        }
    }

    /// Allpass output is finite for any delay.
    #[test]
    fn allpass_finite(
        delay in 1usize..200,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut ap = AllpassStage::new(256);
        ap.set_delay(delay);
        for _ in 0..64 {
            for &x in &input {
                prop_assert!(ap.process(x).is_finite());
            }
        }
    }

    /// Anything pushed into a delay line is read back exactly `d` pushes later.
    #[test]
    fn delay_line_integrity(
        capacity in 2usize..512,
        values in prop::collection::vec(-1.0f32..=1.0f32, 1..64),
    ) {
        let mut line = DelayLine::new(capacity);
        for &v in &values {
            line.push(v);
        }
        let readable = values.len().min(capacity);
        for d in 1..=readable {
            prop_assert_eq!(line.read(d), values[values.len() - d]);
        }
    }

    /// `wrap_back` always lands inside the buffer.
    #[test]
    fn wrap_back_in_range(len in 1usize..10_000, pos in 0usize..10_000, offset in 0usize..10_000) {
        let pos = pos % len;
        let offset = offset % (len + 1);
        let idx = wrap_back(pos, offset, len);
        prop_assert!(idx < len);
        prop_assert_eq!((idx + offset) % len, pos);
    }

    /// The LFO stays in [-1, 1] for any rate and starting phase.
    #[test]
    fn lfo_range(rate in 0.0f32..50.0f32, phase in -2.0f32..2.0f32) {
        let mut lfo = Lfo::new(44100.0, rate).with_phase(phase);
        for _ in 0..2048 {
            let v = lfo.next();
            prop_assert!((-1.0..=1.0).contains(&v), "LFO produced {}", v);
        }
    }

    /// Gain ramps never overshoot the interval between start and target.
    #[test]
    fn gain_ramp_monotonic(db in -30.0f32..20.0f32, len in 1usize..512) {
        let mut ramp = GainRamp::new();
        ramp.set_gain_db(db);
        let target = ramp.target();
        let mut samples = vec![1.0f32; len];
        ramp.process(&mut AudioBlock::mono(&mut samples));
        let (lo, hi) = if target < 1.0 { (target, 1.0) } else { (1.0, target) };
        for s in samples {
            prop_assert!(s >= lo - 1e-5 && s <= hi + 1e-5, "Ramp value {} outside [{}, {}]", s, lo, hi);
        }
    }
}

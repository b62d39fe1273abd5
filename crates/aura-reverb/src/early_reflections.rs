//! Multi-tap early reflections.
//!
//! Twelve taps off a 200 ms delay line per channel model the first discrete
//! echoes from the room's surfaces. Tap times scale with the ER size
//! (`0.3x` to `1.7x`) and gains fall off with distance:
//!
//! | Tap | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 | 10 | 11 |
//! |-----|---|---|---|---|---|---|---|---|---|---|----|----|
//! | ms | 5 | 8 | 12 | 17 | 23 | 31 | 41 | 53 | 67 | 83 | 101 | 121 |
//! | gain | .8 | .7 | .6 | .55 | .5 | .45 | .4 | .35 | .3 | .25 | .2 | .15 |
//!
//! In stereo, tap `t` of output channel `ch` reads from source channel
//! `(t + ch) % 2`, alternating sides for spread. The reflections are added
//! on top of the incoming signal: `out = in + sum · level`.

use aura_core::{AudioBlock, BlockProcessor, DelayLine, clamp_finite, ms_to_samples};

/// Number of reflection taps.
pub const ER_TAP_COUNT: usize = 12;

/// Base tap times in milliseconds.
pub const ER_TAP_TIMES_MS: [f32; ER_TAP_COUNT] = [
    5.0, 8.0, 12.0, 17.0, 23.0, 31.0, 41.0, 53.0, 67.0, 83.0, 101.0, 121.0,
];

/// Tap gains.
pub const ER_TAP_GAINS: [f32; ER_TAP_COUNT] = [
    0.8, 0.7, 0.6, 0.55, 0.5, 0.45, 0.4, 0.35, 0.3, 0.25, 0.2, 0.15,
];

/// Delay buffer length per channel.
pub const ER_BUFFER_MS: f32 = 200.0;

/// Below this level the processor leaves the block untouched.
pub const ER_SILENCE_THRESHOLD: f32 = 0.001;

/// Early reflection generator.
///
/// # Example
///
/// ```rust
/// use aura_core::{AudioBlock, BlockProcessor};
/// use aura_reverb::EarlyReflections;
///
/// let mut er = EarlyReflections::new();
/// er.prepare(48000.0, 512);
/// er.set_size(0.5);
/// er.set_level(0.5);
///
/// let mut left = [0.0f32; 512];
/// let mut right = [0.0f32; 512];
/// left[0] = 1.0;
/// er.process(&mut AudioBlock::stereo(&mut left, &mut right));
/// assert!(left[1..].iter().any(|s| s.abs() > 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct EarlyReflections {
    lines: [DelayLine; 2],
    tap_delays: [usize; ER_TAP_COUNT],
    size: f32,
    level: f32,
    sample_rate: f32,
}

impl Default for EarlyReflections {
    fn default() -> Self {
        Self::new()
    }
}

impl EarlyReflections {
    /// Unprepared generator at size 0.5, level 0.5. Call
    /// [`prepare`](BlockProcessor::prepare) before processing.
    pub fn new() -> Self {
        Self {
            lines: [DelayLine::new(2), DelayLine::new(2)],
            tap_delays: [1; ER_TAP_COUNT],
            size: 0.5,
            level: 0.5,
            sample_rate: 0.0,
        }
    }

    /// Sets the spacing, clamped to `[0, 1]`, and recomputes tap delays.
    pub fn set_size(&mut self, size: f32) {
        self.size = clamp_finite(size, 0.0, 1.0, self.size);
        self.update_taps();
    }

    /// Spacing in `[0, 1]`.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Sets the output level, clamped to `[0, 1]`.
    pub fn set_level(&mut self, level: f32) {
        self.level = clamp_finite(level, 0.0, 1.0, self.level);
    }

    /// Output level in `[0, 1]`.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Current tap delays in samples.
    pub fn tap_delays(&self) -> &[usize; ER_TAP_COUNT] {
        &self.tap_delays
    }

    /// Delay buffer length in samples (per channel).
    pub fn buffer_len(&self) -> usize {
        self.lines[0].capacity()
    }

    fn update_taps(&mut self) {
        if self.sample_rate <= 0.0 {
            return;
        }
        let scale = 0.3 + 1.4 * self.size;
        let max = self.buffer_len().saturating_sub(1).max(1);
        for (delay, &ms) in self.tap_delays.iter_mut().zip(&ER_TAP_TIMES_MS) {
            let samples = ms_to_samples(ms * scale, self.sample_rate) as usize;
            *delay = samples.clamp(1, max);
        }
    }
}

impl BlockProcessor for EarlyReflections {
    fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        self.sample_rate = sample_rate.max(1.0);
        let len = (ms_to_samples(ER_BUFFER_MS, self.sample_rate) as usize).max(2);
        self.lines = [DelayLine::new(len), DelayLine::new(len)];
        self.update_taps();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            max_block_size,
            buffer_len = len,
            "early reflections prepared"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = max_block_size;
    }

    fn reset(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        if self.level < ER_SILENCE_THRESHOLD {
            return;
        }

        let channels = block.num_channels();
        for i in 0..block.len() {
            let (in_l, in_r) = block.frame(i);
            let input = [in_l, in_r];
            // Mono frames duplicate left, so both lines share one cursor.
            for (line, &x) in self.lines.iter_mut().zip(&input) {
                line.write(x);
            }

            let mut out = input;
            for ch in 0..channels {
                let mut sum = 0.0;
                for (tap, (&delay, &gain)) in self.tap_delays.iter().zip(&ER_TAP_GAINS).enumerate() {
                    let source = (tap + ch) % channels;
                    sum += self.lines[source].read(delay) * gain;
                }
                out[ch] = input[ch] + sum * self.level;
            }
            block.set_frame(i, out[0], out[1]);

            for line in &mut self.lines {
                line.advance();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48000.0;

    fn prepared() -> EarlyReflections {
        let mut er = EarlyReflections::new();
        er.prepare(SR, 512);
        er
    }

    #[test]
    fn test_tap_delays_scale_with_size() {
        let mut er = prepared();
        er.set_size(0.5);
        // scale = 1.0 → 5 ms = 240 samples at 48k
        assert_eq!(er.tap_delays()[0], 240);

        er.set_size(0.0);
        // scale = 0.3 → 1.5 ms = 72 samples
        assert_eq!(er.tap_delays()[0], 72);

        er.set_size(1.0);
        // 121 ms · 1.7 exceeds the buffer and is clamped
        assert_eq!(er.tap_delays()[11], er.buffer_len() - 1);
        for w in er.tap_delays().windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn test_silent_level_is_noop() {
        let mut er = prepared();
        er.set_level(0.0005);
        let mut left = [0.3f32; 64];
        let mut right = [-0.2f32; 64];
        er.process(&mut AudioBlock::stereo(&mut left, &mut right));
        assert!(left.iter().all(|&s| s == 0.3));
        assert!(right.iter().all(|&s| s == -0.2));
    }

    #[test]
    fn test_first_reflection_arrives_on_time() {
        let mut er = prepared();
        er.set_size(0.5);
        er.set_level(1.0);

        let mut left = vec![0.0f32; 512];
        let mut right = vec![0.0f32; 512];
        left[0] = 1.0;
        er.process(&mut AudioBlock::stereo(&mut left, &mut right));

        // Dry impulse is preserved
        assert_eq!(left[0], 1.0);
        // Left tap 0 reads from left, tap 1 from right; right tap 0 reads from right
        assert!((left[240] - 0.8).abs() < 1e-6, "Expected 0.8, got {}", left[240]);
        assert_eq!(right[240], 0.0);
        // 8 ms tap on the right reads the left channel
        assert!((right[384] - 0.7).abs() < 1e-6);
        assert!(left[1..240].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_mono_reads_single_channel() {
        let mut er = prepared();
        er.set_level(1.0);
        let mut mono = vec![0.0f32; 512];
        mono[0] = 1.0;
        er.process(&mut AudioBlock::mono(&mut mono));
        assert!((mono[240] - 0.8).abs() < 1e-6);
        assert!((mono[384] - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_mono_blocks_keep_channels_aligned() {
        let mut er = prepared();
        er.set_level(1.0);

        let mut left = vec![0.0f32; 100];
        let mut right = vec![0.0f32; 100];
        right[0] = 1.0;
        er.process(&mut AudioBlock::stereo(&mut left, &mut right));

        let mut mono = vec![0.0f32; 200];
        er.process(&mut AudioBlock::mono(&mut mono));

        // The 8 ms left tap reads the right line: 384 samples after the
        // impulse, 300 of which have already passed.
        let mut left = vec![0.0f32; 512];
        let mut right = vec![0.0f32; 512];
        er.process(&mut AudioBlock::stereo(&mut left, &mut right));
        assert!((left[84] - 0.7).abs() < 1e-6, "Expected 0.7, got {}", left[84]);
        assert_eq!(left.iter().filter(|&&s| s != 0.0).count(), 1);
    }

    #[test]
    fn test_non_finite_settings_ignored() {
        let mut er = prepared();
        er.set_size(0.25);
        er.set_level(0.6);
        let taps = *er.tap_delays();

        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            er.set_size(bad);
            er.set_level(bad);
        }
        assert_eq!(er.size(), 0.25);
        assert_eq!(er.level(), 0.6);
        assert_eq!(er.tap_delays(), &taps);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut er = prepared();
        er.set_level(1.0);
        let mut left = [1.0f32; 512];
        let mut right = [1.0f32; 512];
        er.process(&mut AudioBlock::stereo(&mut left, &mut right));
        er.reset();

        let mut left = [0.0f32; 512];
        let mut right = [0.0f32; 512];
        er.process(&mut AudioBlock::stereo(&mut left, &mut right));
        assert!(left.iter().chain(right.iter()).all(|&s| s == 0.0));
    }

    #[test]
    fn test_setters_clamp() {
        let mut er = prepared();
        er.set_size(4.0);
        er.set_level(-1.0);
        assert_eq!(er.size(), 1.0);
        assert_eq!(er.level(), 0.0);
    }

    #[test]
    fn test_buffer_is_200ms() {
        let er = prepared();
        assert_eq!(er.buffer_len(), 9600);
    }
}

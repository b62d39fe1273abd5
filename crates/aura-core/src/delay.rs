//! Circular delay line with integer and linearly-interpolated reads.
//!
//! Every delay-based structure in the reverb (pre-delay, early reflections,
//! combs, allpasses) sits on top of [`DelayLine`]. The buffer is allocated
//! once at construction and never resized; [`DelayLine::clear`] zeroes it in
//! place.
//!
//! # Cursor model
//!
//! Writing and advancing are separate steps so a caller can read relative to
//! the slot about to be written (comb, allpass) or relative to the slot just
//! written (pre-delay):
//!
//! ```text
//!            read(d) = buffer[write_pos - d]
//!                 │
//!  ┌──┬──┬──┬──┬──┼──┬──┬──┐
//!  │  │  │  │  │  ▼  │  │  │   ← write_pos advances by one per sample
//!  └──┴──┴──┴──┴──┴──┴──┴──┘
//! ```

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::math::wrap_back;

/// Fixed-capacity circular buffer with a write cursor.
///
/// # Example
///
/// ```rust
/// use aura_core::DelayLine;
///
/// let mut line = DelayLine::new(8);
/// line.push(1.0);
/// // One push later, the impulse sits one slot behind the cursor.
/// assert_eq!(line.read(1), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    /// Creates a zero-filled delay line holding `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Delay capacity must be > 0");
        #[cfg(feature = "tracing")]
        tracing::trace!(capacity, "delay line allocated");
        Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
        }
    }

    /// Creates a delay line long enough for `max_seconds` at `sample_rate`.
    pub fn from_time(sample_rate: f32, max_seconds: f32) -> Self {
        let samples = (sample_rate * max_seconds.max(0.0)) as usize + 1;
        Self::new(samples)
    }

    /// Capacity in samples.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Current write cursor.
    #[inline]
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Reads the sample `delay` positions behind the write cursor.
    ///
    /// `delay` must not exceed the capacity; larger values are clamped in
    /// release builds.
    #[inline]
    pub fn read(&self, delay: usize) -> f32 {
        let len = self.buffer.len();
        debug_assert!(delay <= len, "delay {delay} exceeds capacity {len}");
        self.buffer[wrap_back(self.write_pos, delay.min(len), len)]
    }

    /// Reads a fractional delay with linear interpolation between
    /// `read(floor(delay))` and `read(floor(delay) + 1)`.
    ///
    /// The delay is clamped to `[0, capacity - 2]` so both taps stay inside
    /// the buffer.
    #[inline]
    pub fn read_linear(&self, delay: f32) -> f32 {
        let len = self.buffer.len();
        let max = len.saturating_sub(2) as f32;
        let delay = delay.clamp(0.0, max);

        let d_int = delay as usize;
        let frac = delay - d_int as f32;

        let a = self.buffer[wrap_back(self.write_pos, d_int, len)];
        let b = self.buffer[wrap_back(self.write_pos, d_int + 1, len)];
        a + (b - a) * frac
    }

    /// Writes `sample` at the cursor without advancing it.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
    }

    /// Advances the cursor by one slot.
    #[inline]
    pub fn advance(&mut self) {
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Writes `sample` and advances.
    #[inline]
    pub fn push(&mut self, sample: f32) {
        self.write(sample);
        self.advance();
    }

    /// Zeroes the buffer and rewinds the cursor.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_read() {
        let mut line = DelayLine::new(16);
        for i in 0..5 {
            line.push(i as f32);
        }
        // Last pushed value (4.0) is one slot behind the cursor.
        assert_eq!(line.read(1), 4.0);
        assert_eq!(line.read(5), 0.0);
    }

    #[test]
    fn test_read_at_zero_sees_current_write() {
        let mut line = DelayLine::new(4);
        line.write(0.7);
        assert_eq!(line.read(0), 0.7);
    }

    #[test]
    fn test_wraparound() {
        let mut line = DelayLine::new(4);
        for i in 0..10 {
            line.push(i as f32);
        }
        assert_eq!(line.read(1), 9.0);
        assert_eq!(line.read(4), 6.0);
    }

    #[test]
    fn test_linear_interpolation() {
        let mut line = DelayLine::new(8);
        line.push(1.0);
        line.push(0.0);
        // read(1) = 0.0, read(2) = 1.0
        let mid = line.read_linear(1.5);
        assert!((mid - 0.5).abs() < 1e-6, "Expected 0.5, got {}", mid);
        let quarter = line.read_linear(1.25);
        assert!((quarter - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_linear_read_clamps() {
        let mut line = DelayLine::new(4);
        for _ in 0..4 {
            line.push(1.0);
        }
        assert!(line.read_linear(100.0).is_finite());
        assert!(line.read_linear(-3.0).is_finite());
    }

    #[test]
    fn test_clear() {
        let mut line = DelayLine::new(8);
        for _ in 0..8 {
            line.push(1.0);
        }
        line.clear();
        assert_eq!(line.write_pos(), 0);
        for d in 0..8 {
            assert_eq!(line.read(d), 0.0);
        }
    }

    #[test]
    fn test_from_time() {
        let line = DelayLine::from_time(48000.0, 0.2);
        assert_eq!(line.capacity(), 9601);
    }

    #[test]
    #[should_panic(expected = "Delay capacity must be > 0")]
    fn test_zero_capacity_panics() {
        let _ = DelayLine::new(0);
    }
}

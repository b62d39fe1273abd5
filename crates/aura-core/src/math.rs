//! Mathematical utility functions for reverb DSP.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Utilities
//!
//! - [`ms_to_samples`] - Time conversion
//! - [`wrap_back`] - Circular-buffer index arithmetic without signed overflow
//! - [`flush_denormal`] - Subnormal guard for feedback paths
//! - [`wet_dry_mix`] - Linear crossfade
//! - [`clamp_finite`] - Range clamp that rejects NaN and infinities

use libm::{expf, logf};

/// Convert decibels to linear gain.
///
/// # Arguments
/// * `db` - Value in decibels
///
/// # Example
/// ```rust
/// use aura_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below zero are floored to -200 dB.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Convert milliseconds to (fractional) samples.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// Index `offset` positions behind `pos` in a circular buffer of length `len`.
///
/// Computed as `(pos + len - offset) % len`, which never underflows as long
/// as `offset <= len`. Larger offsets are a caller bug.
///
/// # Example
/// ```rust
/// use aura_core::wrap_back;
///
/// assert_eq!(wrap_back(2, 5, 10), 7);
/// assert_eq!(wrap_back(7, 0, 10), 7);
/// ```
#[inline]
pub fn wrap_back(pos: usize, offset: usize, len: usize) -> usize {
    debug_assert!(len > 0, "circular buffer length must be > 0");
    debug_assert!(offset <= len, "offset {offset} exceeds buffer length {len}");
    let offset = offset.min(len);
    (pos + len - offset) % len
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Replaces values below 1e-20 with zero, well before the IEEE 754 subnormal
/// range. Use in any recirculating state (comb feedback, filter memories).
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Crossfade between dry and wet signals: `dry * (1 - mix) + wet * mix`.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Clamp `value` into `[min, max]`, returning `fallback` when `value` is NaN
/// or infinite.
///
/// Setters pass their current value as `fallback`, so a non-finite write
/// leaves the configuration unchanged.
///
/// # Example
/// ```rust
/// use aura_core::clamp_finite;
///
/// assert_eq!(clamp_finite(1.5, 0.0, 1.0, 0.5), 1.0);
/// assert_eq!(clamp_finite(f32::NAN, 0.0, 1.0, 0.5), 0.5);
/// assert_eq!(clamp_finite(f32::INFINITY, 0.0, 1.0, 0.5), 0.5);
/// ```
#[inline]
pub fn clamp_finite(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() { value.clamp(min, max) } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_linear_roundtrip() {
        let original = 0.25;
        let back = db_to_linear(linear_to_db(original));
        assert!(
            (original - back).abs() < 1e-5,
            "Roundtrip failed: {} -> {}",
            original,
            back
        );
    }

    #[test]
    fn test_db_known_values() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(-24.0) - 0.063_095_73).abs() < 1e-4);
        assert!((db_to_linear(12.0) - 3.981_071_7).abs() < 1e-3);
    }

    #[test]
    fn test_linear_to_db_floor() {
        assert!(linear_to_db(0.0) <= -199.0);
        assert!(linear_to_db(-1.0).is_finite());
    }

    #[test]
    fn test_ms_to_samples() {
        assert!((ms_to_samples(10.0, 48000.0) - 480.0).abs() < 1e-3);
        assert!((ms_to_samples(25.3, 44100.0) - 1115.73).abs() < 0.01);
    }

    #[test]
    fn test_wrap_back() {
        assert_eq!(wrap_back(0, 1, 8), 7);
        assert_eq!(wrap_back(3, 3, 8), 0);
        assert_eq!(wrap_back(3, 8, 8), 3);
        assert_eq!(wrap_back(5, 2, 8), 3);
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1e-25), 0.0);
        assert_eq!(flush_denormal(-1e-25), 0.0);
        assert_eq!(flush_denormal(0.5), 0.5);
    }

    #[test]
    fn test_wet_dry_mix() {
        assert_eq!(wet_dry_mix(1.0, 0.0, 0.0), 1.0);
        assert_eq!(wet_dry_mix(1.0, 0.0, 1.0), 0.0);
        assert!((wet_dry_mix(1.0, 0.5, 0.3) - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_finite() {
        assert_eq!(clamp_finite(0.25, 0.0, 1.0, 0.5), 0.25);
        assert_eq!(clamp_finite(-3.0, 0.0, 1.0, 0.5), 0.0);
        assert_eq!(clamp_finite(f32::NAN, 0.0, 1.0, 0.7), 0.7);
        assert_eq!(clamp_finite(f32::NEG_INFINITY, 0.0, 1.0, 0.7), 0.7);
    }
}

//! Aura Core - DSP primitives for an algorithmic reverb
//!
//! The building blocks of a Schroeder-style reverberator, designed for
//! real-time use with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Blocks and Lifecycle
//!
//! - [`AudioBlock`] - Borrowed mono/stereo view over host buffers
//! - [`StereoBuffer`] - Owned scratch storage that lends `AudioBlock`s
//! - [`BlockProcessor`] - `prepare` / `reset` / `process` lifecycle
//!
//! ## Delay-Based Structures
//!
//! - [`DelayLine`] - Fixed-capacity circular buffer, integer and linear reads
//! - [`ModulatedComb`] - Feedback comb with LFO-swept read and damping
//! - [`AllpassStage`] - Fixed-gain diffuser
//!
//! ## Filters and Modulation
//!
//! - [`DampingFilter`] - One-pole lowpass with a direct coefficient
//! - [`Biquad`] / [`BiquadCoefficients`] - RBJ lowpass / highpass
//! - [`Lfo`] - Triangle oscillator
//!
//! ## Levels
//!
//! - [`GainRamp`] - Per-block linear gain ramps in dB
//! - [`DecayEnvelope`] - Smoothed block-peak follower
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`flush_denormal`], etc.
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for embedded targets:
//!
//! ```toml
//! [dependencies]
//! aura-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Tracing
//!
//! With the `tracing` feature, buffer allocations are logged at `trace`
//! level. Allocation only happens at construction and prepare time, never
//! from the per-sample path.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod biquad;
pub mod block;
pub mod comb;
pub mod damping;
pub mod delay;
pub mod envelope;
pub mod gain;
pub mod lfo;
pub mod math;
pub mod processor;

pub use allpass::{ALLPASS_GAIN, AllpassStage};
pub use biquad::{BUTTERWORTH_Q, Biquad, BiquadCoefficients, MAX_CUTOFF_RATIO, clamp_cutoff};
pub use block::{AudioBlock, StereoBuffer};
pub use comb::{MAX_FEEDBACK, MAX_MOD_EXCURSION, ModulatedComb};
pub use damping::{DampingFilter, MAX_DAMPING};
pub use delay::DelayLine;
pub use envelope::DecayEnvelope;
pub use gain::{GAIN_MAX_DB, GAIN_MIN_DB, GainRamp, apply_gain_ramp};
pub use lfo::Lfo;
pub use math::{clamp_finite, db_to_linear, flush_denormal, linear_to_db, ms_to_samples, wet_dry_mix, wrap_back};
pub use processor::BlockProcessor;


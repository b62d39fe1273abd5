//! Aura Reverb - Stereo algorithmic reverb
//!
//! A Schroeder-style reverberator built on aura-core:
//!
//! - [`SignalRouter`] - Complete processor: trims, early reflections, late
//!   tail and dry/wet mix
//! - [`ReverbEngine`] - Pre-delay, 8 modulated combs and 4 allpasses per
//!   channel, width and output tone
//! - [`EarlyReflections`] - 12-tap multi-tap reflections
//! - [`ReverbParams`] / [`ParamId`] / [`RoomType`] - Parameter model
//! - [`SharedParams`] / [`EnvelopeMeter`] - Lock-free cross-thread state
//!
//! ## Example
//!
//! ```rust
//! use aura_core::{AudioBlock, BlockProcessor};
//! use aura_reverb::{ParamId, SharedParams, SignalRouter};
//!
//! let shared = SharedParams::new();
//! shared.set(ParamId::Decay, 4.0);
//!
//! let mut router = SignalRouter::new();
//! router.prepare(48000.0, 512);
//!
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! left[0] = 1.0;
//! router.process_shared(&shared, &mut AudioBlock::stereo(&mut left, &mut right));
//! assert!(left.iter().all(|s| s.is_finite()));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod early_reflections;
pub mod engine;
pub mod params;
pub mod router;
pub mod shared;

// Re-export main types at crate root
pub use early_reflections::{
    ER_BUFFER_MS, ER_SILENCE_THRESHOLD, ER_TAP_COUNT, ER_TAP_GAINS, ER_TAP_TIMES_MS,
    EarlyReflections,
};
pub use engine::{
    ALLPASS_COUNT, ALLPASS_TIMES_MS, COMB_COUNT, COMB_TIMES_MS, MAX_PRE_DELAY_MS, ReverbEngine,
};
pub use params::{ParamDescriptor, ParamId, ParamUnit, ReverbParams, RoomType};
pub use router::SignalRouter;
pub use shared::{EnvelopeMeter, SharedParams};

//! Lock-free parameter store and envelope meter shared across threads.
//!
//! [`SharedParams`] holds every parameter as an `AtomicU32` carrying `f32`
//! bits, indexed by [`ParamId`]. Control threads call
//! [`set`](SharedParams::set); the audio thread calls
//! [`snapshot`](SharedParams::snapshot) once at the top of each block and
//! works only on that copy, so all parameters seen within a block come from
//! the same read pass.
//!
//! Ordering is `Relaxed` throughout: each parameter is an independent scalar
//! and a value one block stale is harmless.
//!
//! [`EnvelopeMeter`] is the reverse direction: the router stores the decay
//! envelope after each block and any thread may read it.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::{ParamId, ReverbParams};

/// Atomic parameter store, one slot per [`ParamId`].
///
/// # Example
///
/// ```rust
/// use aura_reverb::{ParamId, SharedParams};
///
/// let shared = SharedParams::new();
/// shared.set(ParamId::Mix, 0.8);
/// let snapshot = shared.snapshot();
/// assert_eq!(snapshot.mix, 0.8);
/// ```
#[derive(Debug)]
pub struct SharedParams {
    values: [AtomicU32; ParamId::COUNT],
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedParams {
    /// Store initialised to every parameter's default.
    pub fn new() -> Self {
        Self {
            values: core::array::from_fn(|i| {
                AtomicU32::new(ParamId::ALL[i].default_value().to_bits())
            }),
        }
    }

    /// Store initialised from `params`.
    pub fn from_params(params: &ReverbParams) -> Self {
        let shared = Self::new();
        shared.store_all(params);
        shared
    }

    /// Clamps and stores `value`.
    #[inline]
    pub fn set(&self, id: ParamId, value: f32) {
        self.values[id.index()].store(id.clamp(value).to_bits(), Ordering::Relaxed);
    }

    /// Current value of `id`.
    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        f32::from_bits(self.values[id.index()].load(Ordering::Relaxed))
    }

    /// Stores every field of `params`.
    pub fn store_all(&self, params: &ReverbParams) {
        for (id, value) in params.values() {
            self.set(id, value);
        }
    }

    /// Resets every slot to its default.
    pub fn reset_to_defaults(&self) {
        for id in ParamId::ALL {
            self.set(id, id.default_value());
        }
    }

    /// Reads every slot once into a plain snapshot.
    pub fn snapshot(&self) -> ReverbParams {
        let mut params = ReverbParams::default();
        for id in ParamId::ALL {
            params.set(id, self.get(id));
        }
        params
    }
}

/// Clonable handle to the most recent decay envelope value.
///
/// ```rust
/// use aura_reverb::EnvelopeMeter;
///
/// let meter = EnvelopeMeter::new();
/// let reader = meter.clone();
/// meter.store(0.25);
/// assert_eq!(reader.load(), 0.25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvelopeMeter {
    value: Arc<AtomicU32>,
}

impl EnvelopeMeter {
    /// Meter reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a new value.
    #[inline]
    pub fn store(&self, value: f32) {
        self.value.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Latest published value.
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.value.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoomType;

    #[test]
    fn test_defaults_match_params() {
        let shared = SharedParams::new();
        assert_eq!(shared.snapshot(), ReverbParams::default());
    }

    #[test]
    fn test_set_clamps() {
        let shared = SharedParams::new();
        shared.set(ParamId::Decay, 100.0);
        assert_eq!(shared.get(ParamId::Decay), 10.0);
        shared.set(ParamId::Width, f32::INFINITY);
        assert_eq!(shared.get(ParamId::Width), 1.0);
        shared.set(ParamId::PreDelay, -5.0);
        assert_eq!(shared.get(ParamId::PreDelay), 0.0);
    }

    #[test]
    fn test_from_params_round_trip() {
        let mut params = ReverbParams::default();
        params.room_type = RoomType::Cathedral;
        params.size = 0.9;
        params.high_cut = 8000.0;
        let shared = SharedParams::from_params(&params);
        assert_eq!(shared.snapshot(), params);

        shared.reset_to_defaults();
        assert_eq!(shared.snapshot(), ReverbParams::default());
    }

    #[test]
    fn test_cross_thread_updates() {
        let shared = Arc::new(SharedParams::new());
        let meter = EnvelopeMeter::new();

        let writer = {
            let shared = Arc::clone(&shared);
            let meter = meter.clone();
            std::thread::spawn(move || {
                for i in 0..1000 {
                    shared.set(ParamId::Size, i as f32 / 1000.0);
                    meter.store(0.5);
                }
            })
        };
        for _ in 0..1000 {
            let snap = shared.snapshot();
            assert!((0.0..=1.0).contains(&snap.size));
        }
        writer.join().unwrap();

        assert!((shared.get(ParamId::Size) - 0.999).abs() < 1e-6);
        assert_eq!(meter.load(), 0.5);
    }
}

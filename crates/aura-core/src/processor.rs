//! Block processor lifecycle trait.
//!
//! Every stage of the reverb (early reflections, late engine, router) follows
//! the same three-call lifecycle:
//!
//! 1. [`prepare`](BlockProcessor::prepare) allocates and zero-fills all
//!    buffers for a sample rate and maximum block size.
//! 2. [`process`](BlockProcessor::process) transforms a block in place.
//!    No allocation, no locking, no I/O.
//! 3. [`reset`](BlockProcessor::reset) zeroes all signal state without
//!    touching parameters.
//!
//! `prepare` takes `&mut self`, so it can never overlap `process`.

use crate::AudioBlock;

/// In-place block processing with an explicit prepare/reset lifecycle.
///
/// # Example
///
/// ```rust
/// use aura_core::{AudioBlock, BlockProcessor};
///
/// struct Invert;
///
/// impl BlockProcessor for Invert {
///     fn prepare(&mut self, _sample_rate: f32, _max_block_size: usize) {}
///     fn reset(&mut self) {}
///     fn process(&mut self, block: &mut AudioBlock<'_>) {
///         block.apply_gain(-1.0);
///     }
/// }
///
/// let mut samples = [0.5f32; 4];
/// Invert.process(&mut AudioBlock::mono(&mut samples));
/// assert_eq!(samples, [-0.5; 4]);
/// ```
pub trait BlockProcessor {
    /// Allocates buffers for `sample_rate` and blocks of up to
    /// `max_block_size` frames. Clears all state.
    fn prepare(&mut self, sample_rate: f32, max_block_size: usize);

    /// Clears delay lines, filter memories and envelopes. Parameters are kept.
    fn reset(&mut self);

    /// Processes `block` in place.
    fn process(&mut self, block: &mut AudioBlock<'_>);
}

//! Borrowed and owned audio block types.
//!
//! [`AudioBlock`] is the unit every processor works on: one or two mutable
//! channel slices of equal length, borrowed from the host. [`StereoBuffer`]
//! is owned scratch storage, allocated at prepare time, that can lend an
//! `AudioBlock` of any length up to its capacity.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Mutable view over a mono or stereo block of samples.
///
/// # Example
///
/// ```rust
/// use aura_core::AudioBlock;
///
/// let mut left = [0.5f32; 4];
/// let mut right = [-0.25f32; 4];
/// let block = AudioBlock::stereo(&mut left, &mut right);
/// assert_eq!(block.num_channels(), 2);
/// assert_eq!(block.peak(), 0.5);
/// ```
#[derive(Debug)]
pub struct AudioBlock<'a> {
    left: &'a mut [f32],
    right: Option<&'a mut [f32]>,
}

impl<'a> AudioBlock<'a> {
    /// Single-channel block.
    pub fn mono(samples: &'a mut [f32]) -> Self {
        Self {
            left: samples,
            right: None,
        }
    }

    /// Two-channel block. The longer slice is truncated to the shorter.
    pub fn stereo(left: &'a mut [f32], right: &'a mut [f32]) -> Self {
        let n = left.len().min(right.len());
        let (left, _) = left.split_at_mut(n);
        let (right, _) = right.split_at_mut(n);
        Self {
            left,
            right: Some(right),
        }
    }

    /// 1 or 2.
    #[inline]
    pub fn num_channels(&self) -> usize {
        if self.right.is_some() { 2 } else { 1 }
    }

    /// Frames in the block.
    #[inline]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// True for a zero-length block.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// True when the block has a single channel.
    #[inline]
    pub fn is_mono(&self) -> bool {
        self.right.is_none()
    }

    /// Left (or only) channel.
    #[inline]
    pub fn left(&self) -> &[f32] {
        &*self.left
    }

    /// Left (or only) channel, mutable.
    #[inline]
    pub fn left_mut(&mut self) -> &mut [f32] {
        &mut *self.left
    }

    /// Right channel, if present.
    #[inline]
    pub fn right(&self) -> Option<&[f32]> {
        self.right.as_deref()
    }

    /// Right channel, mutable, if present.
    #[inline]
    pub fn right_mut(&mut self) -> Option<&mut [f32]> {
        self.right.as_deref_mut()
    }

    /// Channel `ch` (0 = left). Channel 1 of a mono block is `None`.
    #[inline]
    pub fn channel(&self, ch: usize) -> Option<&[f32]> {
        match ch {
            0 => Some(&*self.left),
            1 => self.right(),
            _ => None,
        }
    }

    /// Channel `ch`, mutable.
    #[inline]
    pub fn channel_mut(&mut self, ch: usize) -> Option<&mut [f32]> {
        match ch {
            0 => Some(&mut *self.left),
            1 => self.right_mut(),
            _ => None,
        }
    }

    /// Both channels mutably at once; a mono block yields `None` on the right.
    #[inline]
    pub fn split_mut(&mut self) -> (&mut [f32], Option<&mut [f32]>) {
        (&mut *self.left, self.right.as_deref_mut())
    }

    /// Frame `i` as `(left, right)`. Mono blocks duplicate the left sample.
    #[inline]
    pub fn frame(&self, i: usize) -> (f32, f32) {
        let l = self.left[i];
        let r = self.right.as_ref().map_or(l, |r| r[i]);
        (l, r)
    }

    /// Writes frame `i`. Mono blocks keep only `left`.
    #[inline]
    pub fn set_frame(&mut self, i: usize, left: f32, right: f32) {
        self.left[i] = left;
        if let Some(r) = self.right.as_deref_mut() {
            r[i] = right;
        }
    }

    /// Largest absolute sample across all channels.
    pub fn peak(&self) -> f32 {
        let peak_of = |s: &[f32]| s.iter().fold(0.0f32, |acc, x| acc.max(x.abs()));
        let left = peak_of(&*self.left);
        self.right().map_or(left, |r| left.max(peak_of(r)))
    }

    /// Multiplies every sample by `gain`.
    pub fn apply_gain(&mut self, gain: f32) {
        self.left.iter_mut().for_each(|s| *s *= gain);
        if let Some(r) = self.right.as_deref_mut() {
            r.iter_mut().for_each(|s| *s *= gain);
        }
    }

    /// Zeroes every channel.
    pub fn clear(&mut self) {
        self.left.fill(0.0);
        if let Some(r) = self.right.as_deref_mut() {
            r.fill(0.0);
        }
    }

    /// Shorter-lived view over the same samples.
    pub fn reborrow(&mut self) -> AudioBlock<'_> {
        AudioBlock {
            left: &mut *self.left,
            right: self.right.as_deref_mut(),
        }
    }

    /// View over frames `start..start + len`, clamped to the block.
    pub fn sub_block(&mut self, start: usize, len: usize) -> AudioBlock<'_> {
        let start = start.min(self.len());
        let end = start.saturating_add(len).min(self.len());
        AudioBlock {
            left: &mut self.left[start..end],
            right: self.right.as_deref_mut().map(|r| &mut r[start..end]),
        }
    }
}

/// Owned two-channel scratch buffer.
#[derive(Debug, Clone, Default)]
pub struct StereoBuffer {
    left: Vec<f32>,
    right: Vec<f32>,
    len: usize,
    channels: usize,
}

impl StereoBuffer {
    /// Zeroed buffer holding `capacity` frames per channel.
    pub fn new(capacity: usize) -> Self {
        #[cfg(feature = "tracing")]
        tracing::trace!(capacity, "stereo buffer allocated");
        Self {
            left: vec![0.0; capacity],
            right: vec![0.0; capacity],
            len: 0,
            channels: 2,
        }
    }

    /// Frames per channel.
    pub fn capacity(&self) -> usize {
        self.left.len()
    }

    /// Frames written by the last [`copy_from`](Self::copy_from).
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing has been copied in.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Zeroes both channels.
    pub fn clear(&mut self) {
        self.left.fill(0.0);
        self.right.fill(0.0);
        self.len = 0;
    }

    /// Copies `block` into the buffer, truncated to capacity.
    ///
    /// A mono block is copied into both channels.
    pub fn copy_from(&mut self, block: &AudioBlock<'_>) {
        let n = block.len().min(self.capacity());
        self.left[..n].copy_from_slice(&block.left()[..n]);
        let right = block.right().unwrap_or(block.left());
        self.right[..n].copy_from_slice(&right[..n]);
        self.len = n;
        self.channels = block.num_channels();
    }

    /// Channel `ch` over the frames last copied in.
    pub fn channel(&self, ch: usize) -> &[f32] {
        if ch == 0 {
            &self.left[..self.len]
        } else {
            &self.right[..self.len]
        }
    }

    /// Lends the copied frames with the channel count of the source block.
    pub fn block(&mut self) -> AudioBlock<'_> {
        let n = self.len;
        if self.channels == 1 {
            AudioBlock::mono(&mut self.left[..n])
        } else {
            AudioBlock::stereo(&mut self.left[..n], &mut self.right[..n])
        }
    }
}

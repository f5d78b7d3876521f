//! Circular delay line for the modulated chorus voice.
//!
//! A [`DelayLine`] owns one channel's sample history and its write cursor.
//! Storage is sized by [`DelayLine::configure`] when the processing session
//! is established and never reallocates afterwards; `write` and `read` are
//! O(1), allocation-free and total (they never panic, even on an empty line).
//!
//! # Reading
//!
//! Reads return the four raw neighbours around a fractional position
//! (`[y0, y1, y2, y3]` at `idx-1 .. idx+2`) plus the fractional remainder,
//! ready for one of the kernels in [`crate::interpolate`]:
//!
//! ```text
//! buffer: ... | y0 | y1 | y2 | y3 | ...      (indices wrap modulo capacity)
//!                     ^ position = idx1 + frac
//! ```
//!
//! Slots that have never been written read as `0.0`, guaranteed by the clear
//! in [`configure`](DelayLine::configure).

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;
use libm::fmodf;

use crate::interpolate::Interpolation;

/// Minimum capacity for a four-point interpolated read.
pub const MIN_INTERPOLATION_CAPACITY: usize = 4;

/// Fixed-capacity circular sample buffer with a single write cursor.
///
/// # Invariants
///
/// - `write_pos < capacity()` whenever `capacity() > 0`
/// - exactly one slot is written per [`write`](Self::write) call
///
/// # Example
///
/// ```rust
/// use koruz_core::{DelayLine, catmull_rom};
///
/// let mut delay = DelayLine::with_capacity(16);
/// for i in 0..8 {
///     delay.write(i as f32);
/// }
///
/// // Position 3.0 holds the fourth sample written.
/// let (taps, frac) = delay.taps_at(3.0);
/// assert_eq!(catmull_rom(taps, frac), 3.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    /// Creates an unconfigured delay line with zero capacity.
    ///
    /// Writes and reads on an unconfigured line are silent no-ops.
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            write_pos: 0,
        }
    }

    /// Creates a delay line already configured to `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut line = Self::new();
        line.configure(capacity);
        line
    }

    /// Reallocates to `capacity` samples, zeroes them and resets the cursor.
    ///
    /// Allocates: call only while no audio is being processed.
    pub fn configure(&mut self, capacity: usize) {
        self.buffer = vec![0.0; capacity];
        self.write_pos = 0;

        #[cfg(feature = "tracing")]
        tracing::trace!(capacity, "delay_line: configured");
    }

    /// Frees the sample storage. Capacity becomes 0.
    pub fn release(&mut self) {
        self.buffer = Vec::new();
        self.write_pos = 0;
    }

    /// Zeroes every sample and resets the cursor without reallocating.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Capacity in samples.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the line has no storage.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Index the next [`write`](Self::write) will store to.
    #[inline]
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Stores `sample` at the cursor and advances the cursor by one.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        let len = self.buffer.len();
        if len == 0 {
            return;
        }
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % len;
    }

    /// Wraps a (possibly negative) fractional position into `[0, capacity)`.
    #[inline]
    pub fn wrap_position(&self, position: f32) -> f32 {
        let len = self.buffer.len() as f32;
        if len == 0.0 || !position.is_finite() {
            return 0.0;
        }
        let mut pos = position;
        if !(0.0..len).contains(&pos) {
            pos = fmodf(pos, len);
        }
        if pos < 0.0 {
            pos += len;
        }
        // pos + len can round up to exactly len for tiny negative inputs
        if pos >= len {
            pos -= len;
        }
        pos
    }

    /// Fetches the four neighbours around an absolute fractional position.
    ///
    /// `position` is wrapped into `[0, capacity)` first. Returns
    /// `([y0, y1, y2, y3], frac)` where `y1 = buf[floor(position)]`.
    #[inline]
    pub fn taps_at(&self, position: f32) -> ([f32; 4], f32) {
        let len = self.buffer.len();
        if len == 0 {
            return ([0.0; 4], 0.0);
        }

        let pos = self.wrap_position(position);
        let idx1 = (pos as usize) % len;
        let frac = pos - idx1 as f32;

        let idx0 = (idx1 + len - 1) % len;
        let idx2 = (idx1 + 1) % len;
        let idx3 = (idx2 + 1) % len;

        (
            [
                self.buffer[idx0],
                self.buffer[idx1],
                self.buffer[idx2],
                self.buffer[idx3],
            ],
            frac,
        )
    }

    /// Fetches the four neighbours `offset` samples behind the write cursor.
    ///
    /// The read position is `write_pos - offset`, wrapped. An offset of `1.0`
    /// lands exactly on the most recently written sample.
    #[inline]
    pub fn read(&self, offset: f32) -> ([f32; 4], f32) {
        self.taps_at(self.write_pos as f32 - offset)
    }

    /// Reads `offset` samples behind the cursor through the given kernel.
    #[inline]
    pub fn read_interpolated(&self, offset: f32, interpolation: Interpolation) -> f32 {
        let (taps, frac) = self.read(offset);
        interpolation.apply(taps, frac)
    }

    /// Raw stored sample at `index` (wrapped), for inspection and tests.
    pub fn get(&self, index: usize) -> f32 {
        let len = self.buffer.len();
        if len == 0 {
            0.0
        } else {
            self.buffer[index % len]
        }
    }
}

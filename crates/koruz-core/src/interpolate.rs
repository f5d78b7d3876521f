//! Fractional-position interpolation kernels.
//!
//! A modulated delay reads the buffer at a position that moves continuously
//! between integer sample indices. The kernels here reconstruct the value at
//! that position from the four neighbouring samples returned by
//! [`DelayLine::read`](crate::DelayLine::read):
//!
//! ```text
//!   y0        y1   x    y2        y3
//! [idx-1]   [idx]  ^  [idx+1]   [idx+2]
//!                frac
//! ```
//!
//! | Kernel | Taps used | Continuity | Character under modulation |
//! |--------|-----------|------------|----------------------------|
//! | [`linear`] | y1, y2 | C0 | Audible HF loss and zipper noise |
//! | [`catmull_rom`] | y0..y3 | C1 | Smooth, the chorus default |

/// Interpolation method for fractional reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Linear interpolation between the two inner taps
    Linear,
    /// Catmull-Rom cubic spline through all four taps
    #[default]
    Cubic,
}

impl Interpolation {
    /// Applies the selected kernel to four taps at fractional offset `frac`.
    #[inline]
    pub fn apply(self, taps: [f32; 4], frac: f32) -> f32 {
        match self {
            Interpolation::Linear => linear(taps, frac),
            Interpolation::Cubic => catmull_rom(taps, frac),
        }
    }
}

/// Catmull-Rom cubic interpolation.
///
/// `taps` are `[y0, y1, y2, y3]` at indices `idx-1 .. idx+2`; `frac` in
/// \[0, 1) is the position between `y1` and `y2`. Passes exactly through
/// `y1` at `frac = 0` and approaches `y2` as `frac → 1`.
///
/// # Example
///
/// ```rust
/// use koruz_core::catmull_rom;
///
/// // A straight line is reproduced exactly.
/// let v = catmull_rom([0.0, 1.0, 2.0, 3.0], 0.5);
/// assert!((v - 1.5).abs() < 1e-6);
/// ```
#[inline]
pub fn catmull_rom(taps: [f32; 4], frac: f32) -> f32 {
    let [y0, y1, y2, y3] = taps;

    let c0 = y1;
    let c1 = 0.5 * (y2 - y0);
    let c2 = y0 - 2.5 * y1 + 2.0 * y2 - 0.5 * y3;
    let c3 = 0.5 * (y3 - y0) + 1.5 * (y1 - y2);

    c0 + c1 * frac + c2 * frac * frac + c3 * frac * frac * frac
}

/// Linear interpolation between the inner taps `y1` and `y2`.
#[inline]
pub fn linear(taps: [f32; 4], frac: f32) -> f32 {
    taps[1] + (taps[2] - taps[1]) * frac
}

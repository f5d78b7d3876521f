//! Mathematical utility functions for the chorus signal path.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! - [`soft_knee_clip`] - Ceiling limiter that compresses the excess above a threshold
//! - [`wet_dry_gains`] - Dry and wet gains for a mix control with a wet ceiling
//! - [`ms_to_samples`] - Delay time conversion
//! - [`flush_denormal`] - Subnormal protection

/// Soft-knee ceiling: compresses the part of `x` beyond `±threshold` by `ratio`.
///
/// Below the threshold the signal is untouched. Above it the excess is scaled:
///
/// ```text
/// y = sign(x)·threshold + (x - sign(x)·threshold)·ratio
/// ```
///
/// With `threshold = 0.99` and `ratio = 0.3`, any input in \[-1.0233, 1.0233\]
/// stays within ±1.0.
///
/// # Example
/// ```rust
/// use koruz_core::soft_knee_clip;
///
/// assert_eq!(soft_knee_clip(0.5, 0.99, 0.3), 0.5);
/// assert!((soft_knee_clip(1.09, 0.99, 0.3) - 1.02).abs() < 1e-6);
/// ```
#[inline]
pub fn soft_knee_clip(x: f32, threshold: f32, ratio: f32) -> f32 {
    if x > threshold {
        threshold + (x - threshold) * ratio
    } else if x < -threshold {
        -threshold + (x + threshold) * ratio
    } else {
        x
    }
}

/// Dry and wet gains for a mix control in \[0, 1\].
///
/// Returns `(dry, wet)` = `(1 - mix, mix · wet_ceiling)`. Unlike an
/// equal-sum crossfade the wet path never reaches unity, keeping a fully wet
/// setting below the perceived loudness of the input.
#[inline]
pub fn wet_dry_gains(mix: f32, wet_ceiling: f32) -> (f32, f32) {
    (1.0 - mix, mix * wet_ceiling)
}

/// Convert milliseconds to samples.
///
/// # Arguments
/// * `ms` - Time in milliseconds
/// * `sample_rate` - Sample rate in Hz
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Values below 1e-20 are replaced with zero, leaving margin before the
/// IEEE 754 subnormal range where most CPUs slow down dramatically.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

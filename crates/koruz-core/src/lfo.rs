//! Smoothed low frequency oscillator for delay-time modulation.
//!
//! The chorus LFO is a unipolar sine (`0.5 + 0.5·sin(2π·phase)`) followed by a
//! heavy one-pole lowpass:
//!
//! ```text
//! smoothed[n] = 0.9995 · smoothed[n-1] + 0.0005 · lfo[n]
//! ```
//!
//! The pole gives a time constant of roughly 2000 samples, which removes
//! stepping from rate automation and from the phase wrap. The coefficients
//! define the sonic character of the effect and are kept as literals.

use core::f32::consts::PI;
use libm::sinf;

/// Pole of the one-pole smoother applied to the raw LFO.
pub const SMOOTHING_POLE: f32 = 0.9995;

/// Input gain of the smoother (`1 - SMOOTHING_POLE`).
pub const SMOOTHING_GAIN: f32 = 0.0005;

/// Phase-accumulating unipolar sine with one-pole output smoothing.
///
/// Shared by every channel of a chorus session so all channels see the same
/// modulation. Advance it exactly once per sample frame.
///
/// # Example
///
/// ```rust
/// use koruz_core::ModulationOscillator;
///
/// let mut lfo = ModulationOscillator::new();
/// let value = lfo.advance(0.8, 48000.0);
/// assert!((0.0..=1.0).contains(&value));
/// ```
#[derive(Debug, Clone)]
pub struct ModulationOscillator {
    /// Current phase position [0.0, 1.0)
    phase: f32,
    /// Smoothed unipolar output [0.0, 1.0]
    smoothed: f32,
}

impl Default for ModulationOscillator {
    fn default() -> Self {
        Self::new()
    }
}

impl ModulationOscillator {
    /// Creates an oscillator at phase 0 with the smoother centred at 0.5.
    pub const fn new() -> Self {
        Self {
            phase: 0.0,
            smoothed: 0.5,
        }
    }

    /// Returns to phase 0 with the smoother centred at 0.5.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.smoothed = 0.5;
    }

    /// Current phase (0.0 - 1.0).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Last smoothed output without advancing.
    pub fn smoothed(&self) -> f32 {
        self.smoothed
    }

    /// Advances one sample at `rate_hz` and returns the smoothed value.
    ///
    /// The increment `rate_hz / sample_rate` must be below 1.0; the phase is
    /// wrapped by a single subtraction so the fractional remainder carries
    /// into the next cycle. Callers clamp `rate_hz` to its documented range.
    #[inline]
    pub fn advance(&mut self, rate_hz: f32, sample_rate: f64) -> f32 {
        self.phase += (f64::from(rate_hz) / sample_rate) as f32;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        let lfo = 0.5 + 0.5 * sinf(2.0 * PI * self.phase);
        self.smoothed = SMOOTHING_POLE * self.smoothed + SMOOTHING_GAIN * lfo;
        self.smoothed
    }
}

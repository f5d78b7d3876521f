//! Parameter metadata for discoverable control values.
//!
//! A [`ParamDescriptor`] carries everything a host adapter, preset loader or
//! command-line front end needs to present and validate a control value:
//! display names, unit, range, default and step. The DSP core itself only
//! consumes plain floats; descriptors live alongside so every surface agrees
//! on the same ranges.
//!
//! # Example
//!
//! ```rust
//! use koruz_core::{ParamDescriptor, ParamId, ParamUnit};
//!
//! let rate = ParamDescriptor::rate_hz(0.1, 2.0, 0.8).with_id(ParamId(1), "rate");
//! assert_eq!(rate.clamp(5.0), 2.0);
//! assert_eq!(rate.unit.suffix(), " Hz");
//! ```
//!
//! # no_std Support
//!
//! This module is fully `no_std` compatible with no heap allocations required.

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter: preset
/// files and host automation lanes refer to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Describes a single parameter's metadata for display and validation.
///
/// # Short Name
///
/// The `short_name` field should be 8 characters or less for compatibility
/// with hardware displays.
///
/// # Step Size
///
/// `step` is the recommended increment for encoder-based control and the
/// quantization grid exposed to plugin hosts (0.01 for every
/// chorus control).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Rate").
    pub name: &'static str,

    /// Short name for hardware displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value for this parameter.
    pub min: f32,

    /// Maximum allowed value for this parameter.
    pub max: f32,

    /// Default value when the effect is initialized.
    pub default: f32,

    /// Recommended step increment.
    pub step: f32,

    /// Stable numeric ID for host automation and preset persistence.
    pub id: ParamId,

    /// Human-readable stable ID used as the preset/CLI key (e.g., `"depth"`).
    pub string_id: &'static str,
}

impl ParamDescriptor {
    /// LFO rate parameter in Hz.
    pub fn rate_hz(min: f32, max: f32, default: f32) -> Self {
        Self {
            name: "Rate",
            short_name: "Rate",
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Normalized \[0, 1\] parameter displayed as a percentage.
    pub fn normalized(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Percent,
            min: 0.0,
            max: 1.0,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Assigns the stable numeric and string IDs.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps `value` to `[min, max]`. Non-finite values map to the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.default
        }
    }

    /// Maps a plain value to \[0, 1\].
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        ((self.clamp(value) - self.min) / range).clamp(0.0, 1.0)
    }

    /// Maps a \[0, 1\] value back to the plain range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.clamp(self.min + normalized * (self.max - self.min))
    }

    /// Value expressed in display units (percent parameters are scaled by 100).
    #[inline]
    pub fn to_display(&self, value: f32) -> f32 {
        match self.unit {
            ParamUnit::Percent => value * 100.0,
            ParamUnit::Hertz => value,
        }
    }
}

/// Unit of a parameter, used for formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// Hertz (Hz) - LFO rate.
    Hertz,

    /// Percentage (%) - depth and mix, stored normalized \[0, 1\].
    Percent,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use koruz_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::Percent.suffix(), "%");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::Percent => "%",
        }
    }
}

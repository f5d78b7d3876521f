//! Chorus control values and their metadata.

use koruz_core::{ParamDescriptor, ParamId};

const RATE: usize = 0;
const DEPTH: usize = 1;
const MIX: usize = 2;

/// Fastest LFO rate in Hz.
pub const MAX_RATE_HZ: f32 = 2.0;

/// Snapshot of the three chorus controls, read once per processed block.
///
/// ## Parameter Indices
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Rate | 0.1–2.0 Hz | 0.8 |
/// | 1 | Depth | 0–1 | 0.4 |
/// | 2 | Mix | 0–1 | 0.5 |
///
/// Values outside the range are clamped by the engine before use; non-finite
/// values fall back to the default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChorusParameters {
    /// LFO frequency in Hz.
    pub rate: f32,
    /// Modulation depth, normalized.
    pub depth: f32,
    /// Dry/wet balance, 0 = fully dry.
    pub mix: f32,
}

impl Default for ChorusParameters {
    fn default() -> Self {
        let [rate, depth, mix] = Self::descriptors().map(|d| d.default);
        Self { rate, depth, mix }
    }
}

impl ChorusParameters {
    /// Creates a snapshot from plain values (not clamped).
    pub const fn new(rate: f32, depth: f32, mix: f32) -> Self {
        Self { rate, depth, mix }
    }

    /// Descriptors for rate, depth and mix, in index order.
    pub fn descriptors() -> [ParamDescriptor; 3] {
        [
            ParamDescriptor::rate_hz(0.1, MAX_RATE_HZ, 0.8).with_id(ParamId(1), "rate"),
            ParamDescriptor::normalized("Depth", "Depth", 0.4).with_id(ParamId(2), "depth"),
            ParamDescriptor::normalized("Mix", "Mix", 0.5).with_id(ParamId(3), "mix"),
        ]
    }

    /// Copy with every value clamped to its documented range.
    pub fn sanitized(&self) -> Self {
        let [rate, depth, mix] = Self::descriptors();
        Self {
            rate: rate.clamp(self.rate),
            depth: depth.clamp(self.depth),
            mix: mix.clamp(self.mix),
        }
    }

    /// Number of parameters.
    pub const fn param_count(&self) -> usize {
        3
    }

    /// Descriptor at `index`, or `None` if out of range.
    pub fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        Self::descriptors().get(index).copied()
    }

    /// Value at `index`; `0.0` if out of range.
    pub fn get_param(&self, index: usize) -> f32 {
        match index {
            RATE => self.rate,
            DEPTH => self.depth,
            MIX => self.mix,
            _ => 0.0,
        }
    }

    /// Sets the value at `index`, clamped to its range. Out-of-range indices
    /// are ignored.
    pub fn set_param(&mut self, index: usize, value: f32) {
        let Some(desc) = self.param_info(index) else {
            return;
        };
        let value = desc.clamp(value);
        match index {
            RATE => self.rate = value,
            DEPTH => self.depth = value,
            MIX => self.mix = value,
            _ => {}
        }
    }

    /// Finds a parameter index by string ID or name (case-insensitive).
    pub fn find_param_by_name(&self, name: &str) -> Option<usize> {
        Self::descriptors().iter().position(|d| {
            d.string_id.eq_ignore_ascii_case(name)
                || d.name.eq_ignore_ascii_case(name)
                || d.short_name.eq_ignore_ascii_case(name)
        })
    }
}

//! Preset file format and operations.

use koruz_effects::ChorusParameters;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::factory_presets::get_factory_preset;

/// Named set of chorus control values.
///
/// Presets hold parameter values only. Missing values take the parameter
/// defaults, so a file with just a name is a valid preset.
///
/// # TOML Format
///
/// ```toml
/// name = "Wide"
/// description = "Faster, deeper sweep"
/// rate = 1.2
/// depth = 0.7
/// mix = 0.5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChorusPreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// LFO rate in Hz.
    #[serde(default = "default_rate")]
    pub rate: f32,

    /// Modulation depth, 0–1.
    #[serde(default = "default_depth")]
    pub depth: f32,

    /// Dry/wet balance, 0–1.
    #[serde(default = "default_mix")]
    pub mix: f32,
}

fn default_rate() -> f32 {
    ChorusParameters::default().rate
}

fn default_depth() -> f32 {
    ChorusParameters::default().depth
}

fn default_mix() -> f32 {
    ChorusParameters::default().mix
}

impl ChorusPreset {
    /// Create a preset with default values.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_parameters(name, &ChorusParameters::default())
    }

    /// Create a preset holding `params`.
    pub fn from_parameters(name: impl Into<String>, params: &ChorusParameters) -> Self {
        Self {
            name: name.into(),
            description: None,
            rate: params.rate,
            depth: params.depth,
            mix: params.mix,
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace all three values.
    pub fn with_parameters(mut self, params: &ChorusParameters) -> Self {
        self.rate = params.rate;
        self.depth = params.depth;
        self.mix = params.mix;
        self
    }

    /// Engine parameter snapshot for this preset.
    pub fn to_parameters(&self) -> ChorusParameters {
        ChorusParameters::new(self.rate, self.depth, self.mix)
    }

    /// Sets one value by parameter name (string ID, name or short name).
    ///
    /// The value is stored as given; use [`validate_preset`](crate::validate_preset)
    /// to check ranges.
    pub fn set_param(&mut self, name: &str, value: f32) -> Result<(), ConfigError> {
        let params = ChorusParameters::default();
        let string_id = params
            .find_param_by_name(name)
            .and_then(|i| params.param_info(i))
            .map(|desc| desc.string_id);

        let slot = match string_id {
            Some("rate") => &mut self.rate,
            Some("depth") => &mut self.depth,
            Some("mix") => &mut self.mix,
            _ => {
                return Err(ConfigError::InvalidParameter {
                    preset: self.name.clone(),
                    param: name.to_string(),
                });
            }
        };
        *slot = value;
        Ok(())
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_preset(path, e))?;
        let preset: ChorusPreset = toml::from_str(&content)?;
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_preset_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_preset(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Looks up a factory preset by name, falling back to a TOML file path.
    pub fn resolve(name_or_path: &str) -> Result<Self, ConfigError> {
        if let Some(preset) = get_factory_preset(name_or_path) {
            return Ok(preset);
        }
        let path = Path::new(name_or_path);
        if path.is_file() {
            return Self::load(path);
        }
        Err(ConfigError::PresetNotFound(name_or_path.to_string()))
    }
}

impl Default for ChorusPreset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

//! Preset files and parameter validation for the koruz chorus.
//!
//! # Features
//!
//! - **Presets**: [`ChorusPreset`] loads and saves the three chorus controls as TOML
//! - **Validation**: [`validate_preset`] checks values against the parameter ranges
//! - **Factory Presets**: built-in starting points, always available
//!
//! # Example
//!
//! ```rust,no_run
//! use koruz_config::{ChorusPreset, get_factory_preset};
//!
//! let preset = ChorusPreset::load("my_chorus.toml").unwrap();
//! let params = preset.to_parameters();
//!
//! let wide = get_factory_preset("wide").unwrap();
//! wide.save("wide_copy.toml").unwrap();
//! ```

mod error;
mod preset;

/// Parameter range validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use preset::ChorusPreset;
pub use validation::{ValidationError, ValidationResult, validate_param, validate_preset};

//! Parameter range validation.
//!
//! Ranges come from [`ChorusParameters::descriptors`], so a preset is valid
//! exactly when the engine would use its values unclamped.
//!
//! # Example
//!
//! ```rust
//! use koruz_config::{ChorusPreset, validate_param, validate_preset};
//!
//! validate_param("rate", 1.5).expect("1.5 Hz is in range");
//! assert!(validate_param("depth", 1.5).is_err());
//!
//! let preset = ChorusPreset::new("mine");
//! validate_preset(&preset).expect("defaults are valid");
//! ```

use koruz_effects::ChorusParameters;
use thiserror::Error;

use crate::ChorusPreset;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter name.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// NaN or infinite value.
    #[error("parameter '{param}' is not a finite number")]
    NotFinite {
        /// Name of the parameter.
        param: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks a single value by parameter name (string ID, name or short name).
pub fn validate_param(name: &str, value: f32) -> ValidationResult<()> {
    let params = ChorusParameters::default();
    let desc = params
        .find_param_by_name(name)
        .and_then(|i| params.param_info(i))
        .ok_or_else(|| ValidationError::UnknownParameter(name.to_string()))?;

    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            param: desc.string_id.to_string(),
        });
    }
    if !desc.contains(value) {
        return Err(ValidationError::OutOfRange {
            param: desc.string_id.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        });
    }
    Ok(())
}

/// Checks every value in a preset, reporting all failures together.
pub fn validate_preset(preset: &ChorusPreset) -> ValidationResult<()> {
    let mut errors: Vec<ValidationError> = [
        ("rate", preset.rate),
        ("depth", preset.depth),
        ("mix", preset.mix),
    ]
    .into_iter()
    .filter_map(|(name, value)| validate_param(name, value).err())
    .collect();

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

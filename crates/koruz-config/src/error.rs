//! Preset error type.

use crate::validation::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure loading, saving or editing a [`ChorusPreset`](crate::ChorusPreset).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Preset file could not be read.
    #[error("cannot read preset file '{path}': {source}")]
    ReadPreset {
        /// File that was being read.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Preset file could not be written.
    #[error("cannot write preset file '{path}': {source}")]
    WritePreset {
        /// File that was being written.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Parent directory for a saved preset could not be created.
    #[error("cannot create preset directory '{path}': {source}")]
    CreatePresetDir {
        /// Directory that was being created.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Preset text is not valid TOML or has wrongly typed fields.
    #[error("malformed preset: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Preset could not be encoded as TOML.
    #[error("cannot encode preset: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Name matched no factory preset and no file.
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Edit addressed a parameter the chorus does not have.
    #[error("preset '{preset}' has no parameter '{param}'")]
    InvalidParameter {
        /// Preset being edited.
        preset: String,
        /// Name that was looked up.
        param: String,
    },

    /// One or more values outside their ranges.
    #[error("preset values rejected: {0}")]
    Validation(#[from] ValidationError),
}

impl ConfigError {
    pub(crate) fn read_preset(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadPreset {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write_preset(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WritePreset {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn create_preset_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreatePresetDir {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for failures of the underlying filesystem.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::ReadPreset { .. } | Self::WritePreset { .. } | Self::CreatePresetDir { .. }
        )
    }
}

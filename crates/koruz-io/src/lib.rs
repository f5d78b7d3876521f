//! File I/O and offline rendering for the koruz chorus.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for planar multichannel audio
//! - **Offline rendering**: [`OfflineRenderer`] drives a [`ChorusEngine`] over a
//!   whole file in fixed-size blocks, the way a host would
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use koruz_effects::ChorusParameters;
//! use koruz_io::{OfflineRenderer, read_wav, write_wav};
//!
//! let (samples, spec) = read_wav("input.wav")?;
//!
//! let mut renderer = OfflineRenderer::new(ChorusParameters::default()).with_tail(true);
//! let processed = renderer.render(&samples, spec.sample_rate)?;
//!
//! write_wav("output.wav", &processed, spec)?;
//! ```
//!
//! [`ChorusEngine`]: koruz_effects::ChorusEngine

mod engine;
mod wav;

pub use engine::{DEFAULT_BLOCK_SIZE, OfflineRenderer};
pub use wav::{
    PlanarSamples, WavFormat, WavInfo, WavSpec, deinterleave, interleave, read_wav, read_wav_info,
    write_wav,
};

/// Error types for file I/O and rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio with no channels was given where at least one is required.
    #[error("Audio has no channels")]
    EmptyInput,

    /// More channels than a WAV header can describe.
    #[error("Audio has {0} channels; WAV supports at most 65535")]
    TooManyChannels(usize),

    /// The chorus engine rejected the stream's format.
    #[error("Engine configuration failed: {0}")]
    Configure(#[from] koruz_effects::ConfigureError),
}

/// Convenience result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

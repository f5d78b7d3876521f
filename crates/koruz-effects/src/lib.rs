//! Koruz Effects - the chorus engine
//!
//! A single-voice chorus: a 15–22 ms delay line swept by a smoothed sine LFO,
//! read back with Catmull-Rom interpolation, blended with the dry signal and
//! soft-clipped below full scale.
//!
//! The engine is a plain session object with four calls, callable from any
//! host adapter:
//!
//! | Call | Thread | Allocates |
//! |------|--------|-----------|
//! | [`ChorusEngine::configure`] | control | yes |
//! | [`ChorusEngine::process`] (and variants) | audio | no |
//! | [`ChorusEngine::release`] | control | frees |
//!
//! # Example
//!
//! ```rust
//! use koruz_effects::{ChorusEngine, ChorusParameters};
//!
//! let mut engine = ChorusEngine::new();
//! engine.configure(44100.0, 2).unwrap();
//!
//! let params = ChorusParameters::default();
//! let mut left = vec![0.25f32; 512];
//! let mut right = vec![0.25f32; 512];
//! engine.process_stereo(&params, &mut left, &mut right);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod chorus;
pub mod params;

pub use chorus::{
    BASE_DELAY_MS, BUFFER_SECONDS, CLIP_RATIO, CLIP_THRESHOLD, ChorusEngine, ConfigureError,
    DEFAULT_CHANNELS, DEPTH_RANGE_MS, EDGE_MARGIN, EngineConfiguration, MAX_CAPACITY,
    MAX_SAMPLE_RATE, MIN_CAPACITY, MIN_SAMPLE_RATE, WET_CEILING, WRITE_ATTENUATION,
    adaptive_wet_gain, delay_time_samples,
};
pub use params::{ChorusParameters, MAX_RATE_HZ};

//! Koruz Core - DSP primitives for the koruz chorus
//!
//! This crate provides the building blocks of the chorus voice, designed for
//! real-time audio processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Delay Lines
//!
//! - [`DelayLine`] - Fixed-capacity circular buffer, reconfigured off the audio thread
//!
//! ## Interpolation
//!
//! - [`catmull_rom`] - 4-point cubic (C1-continuous) fractional read
//! - [`Interpolation`] - Selector between linear and cubic reads
//!
//! ## Modulation
//!
//! - [`ModulationOscillator`] - Smoothed unipolar sine LFO
//!
//! ## Utilities
//!
//! - Math functions: [`soft_knee_clip`], [`ms_to_samples`], [`flush_denormal`]
//! - Parameter metadata: [`ParamDescriptor`], [`ParamUnit`], [`ParamId`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! koruz-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use koruz_core::{DelayLine, ModulationOscillator, catmull_rom};
//!
//! let mut delay = DelayLine::new();
//! delay.configure(1024);
//! let mut lfo = ModulationOscillator::new();
//!
//! let smoothed = lfo.advance(0.8, 44100.0);
//! delay.write(0.5);
//! let (taps, frac) = delay.read(10.0 + smoothed);
//! let sample = catmull_rom(taps, frac);
//! assert!(sample.is_finite());
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Never fails in the audio path**: reads and writes are total functions

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod delay;
pub mod interpolate;
pub mod lfo;
pub mod math;
pub mod param_info;

// Re-export main types at crate root
pub use delay::DelayLine;
pub use interpolate::{Interpolation, catmull_rom, linear};
pub use lfo::ModulationOscillator;
pub use math::{flush_denormal, ms_to_samples, soft_knee_clip, wet_dry_gains};
pub use param_info::{ParamDescriptor, ParamId, ParamUnit};

//! Single-voice modulated-delay chorus engine.
//!
//! # Signal Flow
//!
//! ```text
//!            ┌──────────── dry · (1 - mix) ─────────────┐
//!            │                                          ▼
//! input ─────┼─ ×0.999 ─► DelayLine ─► Catmull-Rom ─► adaptive ─► (+) ─► soft knee ─► output
//!                            ▲            read          gain     wet·0.95·mix
//!                            │
//!            LFO ─► smoother ─► depth² ─► 15 + 7·m ms
//! ```
//!
//! # Per-sample algorithm
//!
//! 1. Advance the shared oscillator once per frame
//! 2. `delay_ms = 15 + 7 · depth² · smoothed`, converted to samples and
//!    limited to `[10, capacity - 10]`
//! 3. Write `input · 0.999` at the channel's cursor
//! 4. Read at `cursor - delay`, Catmull-Rom interpolated
//! 5. Above depth 0.3 the wet signal is attenuated by up to 20%
//! 6. `out = input · (1 - mix) + delayed · mix · 0.95`
//! 7. Excess beyond ±0.99 is compressed by 0.3, then held within ±1.0
//!
//! # Lifecycle
//!
//! The engine starts disabled. [`ChorusEngine::configure`] allocates one
//! [`DelayLine`] per channel and resets the oscillator; [`ChorusEngine::release`]
//! frees them. Every process call on a disabled engine leaves the buffers
//! untouched.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use koruz_core::delay::MIN_INTERPOLATION_CAPACITY;
use koruz_core::{
    DelayLine, ModulationOscillator, catmull_rom, flush_denormal, ms_to_samples, soft_knee_clip,
    wet_dry_gains,
};

use crate::params::{ChorusParameters, MAX_RATE_HZ};

/// Delay at zero modulation, in milliseconds.
pub const BASE_DELAY_MS: f32 = 15.0;

/// Additional delay at full modulation, in milliseconds.
pub const DEPTH_RANGE_MS: f32 = 7.0;

/// Delay buffer length target in seconds.
pub const BUFFER_SECONDS: f64 = 0.035;

/// Smallest delay buffer allocated regardless of sample rate.
pub const MIN_CAPACITY: usize = 1024;

/// Largest delay buffer a configuration may request, in samples per channel.
pub const MAX_CAPACITY: usize = 1 << 20;

/// Lowest accepted sample rate. The oscillator advances by at most one cycle
/// per sample at the fastest rate.
pub const MIN_SAMPLE_RATE: f64 = MAX_RATE_HZ as f64;

/// Highest accepted sample rate.
pub const MAX_SAMPLE_RATE: f64 = 768_000.0;

/// Distance in samples kept between the read position and either end of the buffer.
pub const EDGE_MARGIN: f32 = 10.0;

/// Gain applied to samples as they enter the delay line.
pub const WRITE_ATTENUATION: f32 = 0.999;

/// Wet gain at `mix = 1`.
pub const WET_CEILING: f32 = 0.95;

/// Output level where the soft knee starts.
pub const CLIP_THRESHOLD: f32 = 0.99;

/// Gain applied to the part of the output beyond the knee.
pub const CLIP_RATIO: f32 = 0.3;

/// Channel count used when a host reports zero channels.
pub const DEFAULT_CHANNELS: usize = 2;

/// Depth above which the wet path is attenuated.
const ADAPTIVE_DEPTH_KNEE: f32 = 0.3;

/// Maximum wet attenuation at depth 1.0.
const ADAPTIVE_MAX_CUT: f32 = 0.2;

/// Processing configuration established once per session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfiguration {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Number of channels to process.
    pub channel_count: usize,
    /// Delay buffer length per channel, in samples.
    pub capacity: usize,
}

impl EngineConfiguration {
    /// Configuration with the capacity derived from the sample rate.
    ///
    /// `capacity = max(floor(sample_rate · 0.035), 1024)`. A zero channel
    /// count becomes [`DEFAULT_CHANNELS`].
    pub fn new(sample_rate: f64, channel_count: usize) -> Self {
        Self {
            sample_rate,
            channel_count: if channel_count == 0 {
                DEFAULT_CHANNELS
            } else {
                channel_count
            },
            capacity: Self::capacity_for(sample_rate),
        }
    }

    /// Overrides the derived capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Delay buffer length for `sample_rate`, with the 1024-sample floor.
    pub fn capacity_for(sample_rate: f64) -> usize {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return MIN_CAPACITY;
        }
        ((sample_rate * BUFFER_SECONDS) as usize).max(MIN_CAPACITY)
    }

    /// Checks the configuration against the engine's requirements.
    ///
    /// The sample rate must lie in `[MIN_SAMPLE_RATE, MAX_SAMPLE_RATE]` and the
    /// capacity in `[4, MAX_CAPACITY]`.
    pub fn validate(&self) -> Result<(), ConfigureError> {
        if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&self.sample_rate) {
            return Err(ConfigureError::InvalidSampleRate(self.sample_rate));
        }
        if self.capacity < MIN_INTERPOLATION_CAPACITY {
            return Err(ConfigureError::CapacityTooSmall {
                capacity: self.capacity,
            });
        }
        if self.capacity > MAX_CAPACITY {
            return Err(ConfigureError::CapacityTooLarge {
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

/// Reasons a configuration leaves the engine disabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigureError {
    /// Sample rate outside `[MIN_SAMPLE_RATE, MAX_SAMPLE_RATE]` or not finite.
    InvalidSampleRate(f64),
    /// Delay buffer too short for a four-point interpolated read.
    CapacityTooSmall {
        /// Requested capacity in samples.
        capacity: usize,
    },
    /// Delay buffer longer than [`MAX_CAPACITY`].
    CapacityTooLarge {
        /// Requested capacity in samples.
        capacity: usize,
    },
}

#[cfg(feature = "std")]
impl std::fmt::Display for ConfigureError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidSampleRate(sr) => write!(f, "invalid sample rate: {sr}"),
            Self::CapacityTooSmall { capacity } => write!(
                f,
                "delay capacity {capacity} is below the interpolation minimum of {MIN_INTERPOLATION_CAPACITY}"
            ),
            Self::CapacityTooLarge { capacity } => {
                write!(f, "delay capacity {capacity} exceeds the maximum of {MAX_CAPACITY}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigureError {}

/// Modulated delay in samples for a given depth and smoothed LFO value.
///
/// `depth` is squared before scaling the LFO, so small depths give
/// proportionally smaller sweeps. The result is limited to
/// `[EDGE_MARGIN, capacity - EDGE_MARGIN]`, with the lower bound winning
/// when the buffer is too short for both.
#[inline]
pub fn delay_time_samples(depth: f32, smoothed: f32, sample_rate: f64, capacity: usize) -> f32 {
    let depth_curve = depth * depth;
    let modulated_depth = depth_curve * smoothed;
    let delay_ms = BASE_DELAY_MS + DEPTH_RANGE_MS * modulated_depth;
    let delay_samples = ms_to_samples(delay_ms, sample_rate as f32);

    let upper = capacity as f32 - EDGE_MARGIN;
    if delay_samples < EDGE_MARGIN {
        EDGE_MARGIN
    } else if upper < delay_samples {
        upper
    } else {
        delay_samples
    }
}

/// Wet-path gain compensating for the louder sweep at high depth.
///
/// 1.0 up to depth 0.3, falling linearly to 0.8 at depth 1.0.
#[inline]
pub fn adaptive_wet_gain(depth: f32) -> f32 {
    if depth > ADAPTIVE_DEPTH_KNEE {
        let depth_factor = (depth - ADAPTIVE_DEPTH_KNEE) / (1.0 - ADAPTIVE_DEPTH_KNEE);
        1.0 - depth_factor * ADAPTIVE_MAX_CUT
    } else {
        1.0
    }
}

/// Per-block gains derived from a sanitized parameter snapshot.
#[derive(Debug, Clone, Copy)]
struct BlockGains {
    adaptive: f32,
    dry: f32,
    wet: f32,
}

impl BlockGains {
    fn new(params: &ChorusParameters) -> Self {
        let (dry, wet) = wet_dry_gains(params.mix, WET_CEILING);
        Self {
            adaptive: adaptive_wet_gain(params.depth),
            dry,
            wet,
        }
    }
}

/// Runs one sample through a channel's delay line.
#[inline]
fn process_sample(line: &mut DelayLine, input: f32, delay_samples: f32, gains: BlockGains) -> f32 {
    let cursor = line.write_pos();
    line.write(flush_denormal(input * WRITE_ATTENUATION));

    let (taps, frac) = line.taps_at(cursor as f32 - delay_samples);
    let delayed = catmull_rom(taps, frac) * gains.adaptive;

    let output = input * gains.dry + delayed * gains.wet;
    soft_knee_clip(output, CLIP_THRESHOLD, CLIP_RATIO).clamp(-1.0, 1.0)
}

/// Chorus processing session.
///
/// Owns one delay line per channel and the oscillator shared between them.
/// See the [module documentation](self) for the signal flow.
///
/// # Example
///
/// ```rust
/// use koruz_effects::{ChorusEngine, ChorusParameters};
///
/// let mut engine = ChorusEngine::new();
/// let params = ChorusParameters::new(0.8, 0.4, 0.5);
///
/// // Unconfigured: audio passes through untouched.
/// let mut mono = vec![0.5f32; 64];
/// engine.process(&params, &mut [&mut mono[..]], 64);
/// assert!(mono.iter().all(|&s| s == 0.5));
///
/// engine.configure(48000.0, 1).unwrap();
/// engine.process(&params, &mut [&mut mono[..]], 64);
/// assert!(engine.is_active());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChorusEngine {
    config: Option<EngineConfiguration>,
    lines: Vec<DelayLine>,
    lfo: ModulationOscillator,
}

impl ChorusEngine {
    /// Creates a disabled engine. Call [`configure`](Self::configure) before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Establishes a processing session.
    ///
    /// Allocates and zeroes one delay line per channel and resets the
    /// oscillator. Calling again with the same arguments re-clears all state.
    /// On error the engine is left disabled and processing passes through.
    ///
    /// Allocates: never call concurrently with a process call.
    pub fn configure(&mut self, sample_rate: f64, channel_count: usize) -> Result<(), ConfigureError> {
        self.configure_with(EngineConfiguration::new(sample_rate, channel_count))
    }

    /// Establishes a processing session from an explicit configuration.
    pub fn configure_with(&mut self, config: EngineConfiguration) -> Result<(), ConfigureError> {
        self.disable();
        self.lfo.reset();

        if let Err(err) = config.validate() {
            #[cfg(feature = "tracing")]
            tracing::warn!(?config, %err, "chorus disabled");
            return Err(err);
        }

        self.lines = (0..config.channel_count)
            .map(|_| DelayLine::with_capacity(config.capacity))
            .collect();
        self.config = Some(config);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = config.sample_rate,
            channels = config.channel_count,
            capacity = config.capacity,
            "chorus configured"
        );

        Ok(())
    }

    /// Frees delay storage. Safe to call repeatedly; later process calls pass
    /// audio through until the next successful [`configure`](Self::configure).
    pub fn release(&mut self) {
        if self.config.is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!("chorus released");
        }
        self.disable();
    }

    fn disable(&mut self) {
        self.config = None;
        self.lines = Vec::new();
    }

    /// Returns `true` when a valid session is established.
    pub fn is_active(&self) -> bool {
        self.config.is_some() && !self.lines.is_empty()
    }

    /// Active configuration, if any.
    pub fn config(&self) -> Option<&EngineConfiguration> {
        self.config.as_ref()
    }

    /// Sample rate of the active session.
    pub fn sample_rate(&self) -> Option<f64> {
        self.config.map(|c| c.sample_rate)
    }

    /// Number of channels processed; 0 when disabled.
    pub fn channel_count(&self) -> usize {
        self.lines.len()
    }

    /// Delay buffer length per channel; 0 when disabled.
    pub fn capacity(&self) -> usize {
        self.config.map_or(0, |c| c.capacity)
    }

    /// Length of the output that continues after the input stops, in seconds.
    pub fn tail_seconds(&self) -> f64 {
        BUFFER_SECONDS
    }

    /// Oscillator shared by every channel.
    pub fn oscillator(&self) -> &ModulationOscillator {
        &self.lfo
    }

    /// Processes planar audio in place.
    ///
    /// `channels[i]` is channel `i`. At most `num_samples` samples are
    /// processed, fewer if any processed slice is shorter. Channels beyond the
    /// configured count are left untouched. The oscillator advances once per
    /// sample frame, shared by all channels.
    pub fn process(&mut self, params: &ChorusParameters, channels: &mut [&mut [f32]], num_samples: usize) {
        let Some(config) = self.config else {
            return;
        };

        let active = channels.len().min(self.lines.len());
        if active == 0 {
            return;
        }
        let frames = channels[..active]
            .iter()
            .map(|ch| ch.len())
            .min()
            .unwrap_or(0)
            .min(num_samples);
        if frames == 0 {
            return;
        }

        let params = params.sanitized();
        let gains = BlockGains::new(&params);
        let block_start = self.lfo.clone();

        for (channel, line) in channels[..active].iter_mut().zip(self.lines.iter_mut()) {
            // Every channel replays the same oscillator trajectory.
            let mut lfo = block_start.clone();
            for sample in channel[..frames].iter_mut() {
                let smoothed = lfo.advance(params.rate, config.sample_rate);
                let delay =
                    delay_time_samples(params.depth, smoothed, config.sample_rate, config.capacity);
                *sample = process_sample(line, *sample, delay, gains);
            }
            self.lfo = lfo;
        }
    }

    /// Processes interleaved audio in place.
    ///
    /// `buffer` holds frames of `channels` samples each. A trailing partial
    /// frame is left untouched, as are channels beyond the configured count.
    pub fn process_interleaved(&mut self, params: &ChorusParameters, buffer: &mut [f32], channels: usize) {
        let Some(config) = self.config else {
            return;
        };
        if channels == 0 || self.lines.is_empty() {
            return;
        }

        let params = params.sanitized();
        let gains = BlockGains::new(&params);

        for frame in buffer.chunks_exact_mut(channels) {
            let smoothed = self.lfo.advance(params.rate, config.sample_rate);
            let delay =
                delay_time_samples(params.depth, smoothed, config.sample_rate, config.capacity);
            for (sample, line) in frame.iter_mut().zip(self.lines.iter_mut()) {
                *sample = process_sample(line, *sample, delay, gains);
            }
        }
    }

    /// Processes a stereo pair in place.
    pub fn process_stereo(&mut self, params: &ChorusParameters, left: &mut [f32], right: &mut [f32]) {
        let frames = left.len().min(right.len());
        self.process(params, &mut [left, right], frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse(len: usize) -> Vec<f32> {
        let mut v = vec![0.0; len];
        v[0] = 1.0;
        v
    }

    #[test]
    fn test_capacity_derivation() {
        assert_eq!(EngineConfiguration::capacity_for(44100.0), 1543);
        assert_eq!(EngineConfiguration::capacity_for(48000.0), 1680);
        assert_eq!(EngineConfiguration::capacity_for(96000.0), 3360);
        assert_eq!(EngineConfiguration::capacity_for(8000.0), MIN_CAPACITY);
        assert_eq!(EngineConfiguration::capacity_for(-1.0), MIN_CAPACITY);
    }

    #[test]
    fn test_zero_channels_defaults_to_stereo() {
        let config = EngineConfiguration::new(48000.0, 0);
        assert_eq!(config.channel_count, DEFAULT_CHANNELS);
    }

    #[test]
    fn test_configure_rejects_bad_sample_rate() {
        let mut engine = ChorusEngine::new();
        for sr in [0.0, -44100.0, f64::NAN, f64::INFINITY] {
            let err = engine.configure(sr, 2).unwrap_err();
            assert!(matches!(err, ConfigureError::InvalidSampleRate(_)));
            assert!(!engine.is_active());
        }
    }

    #[test]
    fn test_configure_rejects_huge_sample_rate() {
        let mut engine = ChorusEngine::new();
        for sr in [f64::MAX, 1e12, MAX_SAMPLE_RATE * 2.0] {
            assert_eq!(engine.configure(sr, 1), Err(ConfigureError::InvalidSampleRate(sr)));
            assert!(!engine.is_active());
        }
        engine.configure(MAX_SAMPLE_RATE, 1).unwrap();
        assert_eq!(engine.capacity(), 26880);
    }

    #[test]
    fn test_configure_rejects_huge_capacity() {
        let mut engine = ChorusEngine::new();
        for capacity in [MAX_CAPACITY + 1, usize::MAX] {
            let config = EngineConfiguration::new(48000.0, 1).with_capacity(capacity);
            assert_eq!(
                engine.configure_with(config),
                Err(ConfigureError::CapacityTooLarge { capacity })
            );
            assert!(!engine.is_active());
        }
    }

    #[test]
    fn test_configure_rejects_sample_rate_below_lfo_rate() {
        let mut engine = ChorusEngine::new();
        for sr in [1.0, 1.999, f64::MIN_POSITIVE] {
            assert_eq!(engine.configure(sr, 1), Err(ConfigureError::InvalidSampleRate(sr)));
        }
    }

    #[test]
    fn test_phase_stays_wrapped_at_lowest_sample_rate() {
        let mut engine = ChorusEngine::new();
        engine.configure(MIN_SAMPLE_RATE, 1).unwrap();
        let params = ChorusParameters::new(MAX_RATE_HZ, 1.0, 1.0);
        let mut buf = vec![0.25f32; 100];
        engine.process(&params, &mut [&mut buf[..]], 100);
        let phase = engine.oscillator().phase();
        assert!((0.0..1.0).contains(&phase), "phase {phase}");
        assert!(buf.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_configure_rejects_tiny_capacity() {
        let mut engine = ChorusEngine::new();
        let config = EngineConfiguration::new(48000.0, 1).with_capacity(3);
        assert_eq!(
            engine.configure_with(config),
            Err(ConfigureError::CapacityTooSmall { capacity: 3 })
        );
        assert!(!engine.is_active());

        let mut buf = vec![0.3f32; 32];
        engine.process(&ChorusParameters::default(), &mut [&mut buf[..]], 32);
        assert!(buf.iter().all(|&s| s == 0.3));
    }

    #[test]
    fn test_failed_configure_disables_previous_session() {
        let mut engine = ChorusEngine::new();
        engine.configure(48000.0, 2).unwrap();
        assert!(engine.is_active());
        assert!(engine.configure(0.0, 2).is_err());
        assert!(!engine.is_active());
        assert_eq!(engine.channel_count(), 0);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut engine = ChorusEngine::new();
        engine.configure(44100.0, 2).unwrap();
        engine.release();
        engine.release();
        assert!(!engine.is_active());
        assert_eq!(engine.capacity(), 0);
        assert_eq!(engine.sample_rate(), None);
    }

    #[test]
    fn test_configure_resets_oscillator() {
        let mut engine = ChorusEngine::new();
        engine.configure(44100.0, 1).unwrap();
        let mut buf = vec![0.1f32; 4096];
        engine.process(&ChorusParameters::default(), &mut [&mut buf[..]], 4096);
        assert!(engine.oscillator().phase() > 0.0);

        engine.configure(44100.0, 1).unwrap();
        assert_eq!(engine.oscillator().phase(), 0.0);
        assert_eq!(engine.oscillator().smoothed(), 0.5);
    }

    #[test]
    fn test_delay_time_range() {
        // depth 0 -> exactly the base delay
        let d = delay_time_samples(0.0, 0.9, 44100.0, 1543);
        assert!((d - 661.5).abs() < 1e-3);

        // full depth, full LFO -> 22 ms
        let d = delay_time_samples(1.0, 1.0, 44100.0, 1543);
        assert!((d - 970.2).abs() < 1e-2);
    }

    #[test]
    fn test_delay_time_limits() {
        // Upper limit: capacity - 10
        let d = delay_time_samples(1.0, 1.0, 192000.0, 1024);
        assert_eq!(d, 1014.0);
        // Lower limit wins for undersized buffers
        let d = delay_time_samples(0.0, 0.5, 100.0, 12);
        assert_eq!(d, EDGE_MARGIN);
    }

    #[test]
    fn test_subnormal_input_flushed_on_write() {
        let mut engine = ChorusEngine::new();
        engine.configure(44100.0, 1).unwrap();
        let params = ChorusParameters::new(0.8, 0.0, 1.0);
        let mut buf = vec![1e-30f32; 2000];
        engine.process(&params, &mut [&mut buf[..]], 2000);
        assert!(buf.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_adaptive_wet_gain() {
        assert_eq!(adaptive_wet_gain(0.0), 1.0);
        assert_eq!(adaptive_wet_gain(0.3), 1.0);
        assert!((adaptive_wet_gain(1.0) - 0.8).abs() < 1e-6);
        assert!((adaptive_wet_gain(0.65) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_impulse_wet_arrival() {
        let mut engine = ChorusEngine::new();
        engine.configure(44100.0, 1).unwrap();
        let params = ChorusParameters::new(0.8, 0.4, 0.5);

        let mut buf = impulse(2001);
        engine.process(&params, &mut [&mut buf[..]], 2001);

        // Only the dry path at the impulse itself.
        assert_eq!(buf[0], 0.5);
        let first_wet = buf[1..].iter().position(|&s| s != 0.0).map(|i| i + 1);
        let first_wet = first_wet.expect("wet response missing");
        assert!(
            (662..=970).contains(&first_wet),
            "first wet sample at {first_wet}"
        );
    }

    #[test]
    fn test_short_slices_limit_block() {
        let mut engine = ChorusEngine::new();
        engine.configure(48000.0, 2).unwrap();
        let mut a = vec![0.2f32; 100];
        let mut b = vec![0.2f32; 40];
        engine.process(&ChorusParameters::default(), &mut [&mut a[..], &mut b[..]], 100);
        // Only the first 40 frames are processed on either channel.
        assert!(a[40..].iter().all(|&s| s == 0.2));
        assert_ne!(a[0], 0.2);
    }

    #[test]
    fn test_extra_channels_pass_through() {
        let mut engine = ChorusEngine::new();
        engine.configure(48000.0, 1).unwrap();
        let mut a = vec![0.2f32; 64];
        let mut b = vec![0.2f32; 64];
        engine.process(&ChorusParameters::default(), &mut [&mut a[..], &mut b[..]], 64);
        assert!(b.iter().all(|&s| s == 0.2));
        assert!(a.iter().any(|&s| s != 0.2));
    }

    #[test]
    fn test_configure_error_display() {
        let msg = ConfigureError::CapacityTooSmall { capacity: 2 }.to_string();
        assert!(msg.contains("capacity 2"), "got: {msg}");
        let msg = ConfigureError::InvalidSampleRate(-1.0).to_string();
        assert_eq!(msg, "invalid sample rate: -1");
        let msg = ConfigureError::CapacityTooLarge { capacity: 1 << 21 }.to_string();
        assert!(msg.contains("exceeds the maximum"), "got: {msg}");
    }
}

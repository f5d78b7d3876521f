//! WAV file reading and writing.
//!
//! Audio is held planar ([`PlanarSamples`], one `Vec<f32>` per channel), the
//! layout the chorus engine processes. Integer PCM is scaled to `[-1, 1)` on
//! read and clamped on write; 32-bit files are IEEE float.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    // hound reports samples across all channels
    let total_samples = u64::from(reader.len());
    let num_frames = total_samples / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24 or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Multichannel audio stored one buffer per channel.
///
/// All channels have the same length; constructors truncate to the shortest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanarSamples {
    channels: Vec<Vec<f32>>,
}

impl PlanarSamples {
    /// Builds from per-channel buffers, truncating to the shortest.
    pub fn new(mut channels: Vec<Vec<f32>>) -> Self {
        let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
        for ch in &mut channels {
            ch.truncate(frames);
        }
        Self { channels }
    }

    /// Single-channel audio.
    pub fn from_mono(samples: Vec<f32>) -> Self {
        Self {
            channels: vec![samples],
        }
    }

    /// `channel_count` channels of `frames` zeros.
    pub fn silence(channel_count: usize, frames: usize) -> Self {
        Self {
            channels: vec![vec![0.0; frames]; channel_count],
        }
    }

    /// Splits interleaved frames. A trailing partial frame is dropped.
    pub fn from_interleaved(samples: &[f32], channel_count: usize) -> Self {
        Self {
            channels: deinterleave(samples, channel_count),
        }
    }

    /// Interleaves into frames of `channel_count()` samples.
    pub fn to_interleaved(&self) -> Vec<f32> {
        interleave(&self.channels)
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Returns `true` if there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Channel `index`, if present.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// All channels.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// All channels, mutable. Lengths must be kept equal.
    pub fn channels_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.channels
    }

    /// Mutable slices of frames `start..end` on every channel.
    pub fn block_mut(&mut self, start: usize, end: usize) -> Vec<&mut [f32]> {
        let end = end.min(self.frames());
        let start = start.min(end);
        self.channels
            .iter_mut()
            .map(|ch| &mut ch[start..end])
            .collect()
    }

    /// Appends `frames` zeros to every channel.
    pub fn extend_silence(&mut self, frames: usize) {
        for ch in &mut self.channels {
            ch.resize(ch.len() + frames, 0.0);
        }
    }

    /// Largest absolute sample value across all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }
}

/// Interleaves equal-length channel buffers into frames.
///
/// Channels are truncated to the shortest.
pub fn interleave(channels: &[Vec<f32>]) -> Vec<f32> {
    let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
    let mut out = Vec::with_capacity(frames * channels.len());
    for i in 0..frames {
        out.extend(channels.iter().map(|ch| ch[i]));
    }
    out
}

/// Splits interleaved frames into per-channel buffers.
///
/// A trailing partial frame is dropped. Zero channels yields no buffers.
pub fn deinterleave(samples: &[f32], channel_count: usize) -> Vec<Vec<f32>> {
    if channel_count == 0 {
        return Vec::new();
    }
    let frames = samples.len() / channel_count;
    let mut channels = vec![Vec::with_capacity(frames); channel_count];
    for frame in samples.chunks_exact(channel_count) {
        for (ch, &s) in channels.iter_mut().zip(frame) {
            ch.push(s);
        }
    }
    channels
}

/// Read a WAV file into planar f32 samples along with its spec.
///
/// # Example
/// ```ignore
/// let (samples, spec) = read_wav("input.wav")?;
/// println!("{} channels, {} frames", samples.channel_count(), samples.frames());
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(PlanarSamples, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    if spec.channels == 0 {
        return Err(Error::EmptyInput);
    }

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = int_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let samples = PlanarSamples::from_interleaved(&interleaved, usize::from(spec.channels));
    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        frames = samples.frames(),
        "read wav"
    );
    Ok((samples, spec))
}

/// Write planar samples to a WAV file.
///
/// The channel count is taken from `samples`; `spec` supplies the sample
/// rate and bit depth. Integer formats clamp to full scale.
///
/// # Example
/// ```ignore
/// let samples = PlanarSamples::silence(2, 48000); // 1 second of stereo silence
/// write_wav("output.wav", &samples, WavSpec::default())?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &PlanarSamples, spec: WavSpec) -> Result<()> {
    let path = path.as_ref();
    let channel_count = samples.channel_count();
    let channels =
        u16::try_from(channel_count).map_err(|_| Error::TooManyChannels(channel_count))?;
    if channels == 0 {
        return Err(Error::EmptyInput);
    }

    let spec = WavSpec { channels, ..spec };
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;
    let interleaved = samples.to_interleaved();

    if spec.bits_per_sample == 32 {
        for &sample in &interleaved {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = int_scale(spec.bits_per_sample);
        for &sample in &interleaved {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    tracing::debug!(
        path = %path.display(),
        channels,
        bits = spec.bits_per_sample,
        frames = samples.frames(),
        "wrote wav"
    );
    Ok(())
}

fn int_scale(bits: u16) -> f32 {
    (1i64 << (bits.clamp(1, 32) - 1)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn ramp(len: usize, scale: f32) -> Vec<f32> {
        (0..len).map(|i| (i as f32 / len as f32) * scale).collect()
    }

    #[test]
    fn test_roundtrip_f32_stereo() {
        let samples = PlanarSamples::new(vec![ramp(1000, 0.9), ramp(1000, -0.5)]);
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec, spec);
        assert_eq!(loaded, samples);
    }

    #[test]
    fn test_roundtrip_i16() {
        let samples = PlanarSamples::from_mono(
            (0..1000).map(|i| (i as f32 / 1000.0).sin() * 0.9).collect(),
        );
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let (loaded, _) = read_wav(file.path()).unwrap();
        assert_eq!(loaded.frames(), 1000);

        // 16-bit has less precision
        for (a, b) in samples.channels()[0].iter().zip(loaded.channels()[0].iter()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_write_takes_channels_from_samples() {
        let samples = PlanarSamples::silence(3, 10);
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, WavSpec::default()).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 3);
        assert_eq!(info.num_frames, 10);
        assert_eq!(info.format, WavFormat::IeeeFloat);
    }

    #[test]
    fn test_write_rejects_no_channels() {
        let file = NamedTempFile::new().unwrap();
        let err = write_wav(file.path(), &PlanarSamples::default(), WavSpec::default());
        assert!(matches!(err, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_write_rejects_channel_count_beyond_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.wav");
        let samples = PlanarSamples::silence(usize::from(u16::MAX) + 1, 0);

        let err = write_wav(&path, &samples, WavSpec::default()).unwrap_err();
        assert!(matches!(err, Error::TooManyChannels(65536)));
        assert!(err.to_string().contains("65536 channels"));
        assert!(!path.exists());
    }

    #[test]
    fn test_int_write_clamps() {
        let samples = PlanarSamples::from_mono(vec![1.5, -1.5]);
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let (loaded, _) = read_wav(file.path()).unwrap();
        let ch = loaded.channel(0).unwrap();
        assert!((ch[0] - 32767.0 / 32768.0).abs() < 1e-6);
        assert_eq!(ch[1], -1.0);
    }

    #[test]
    fn test_interleave_deinterleave() {
        let channels = vec![vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]];
        let inter = interleave(&channels);
        assert_eq!(inter, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(deinterleave(&inter, 2), channels);

        // Partial trailing frame is dropped
        assert_eq!(deinterleave(&[1.0, 2.0, 3.0], 2), vec![vec![1.0], vec![2.0]]);
        assert!(deinterleave(&[1.0], 0).is_empty());
    }

    #[test]
    fn test_planar_new_truncates() {
        let samples = PlanarSamples::new(vec![vec![0.1; 5], vec![0.2; 3]]);
        assert_eq!(samples.frames(), 3);
        assert_eq!(samples.channel(0).unwrap().len(), 3);
        assert!(samples.channel(2).is_none());
    }

    #[test]
    fn test_extend_silence_and_peak() {
        let mut samples = PlanarSamples::new(vec![vec![0.25, -0.75], vec![0.5, 0.0]]);
        samples.extend_silence(4);
        assert_eq!(samples.frames(), 6);
        assert_eq!(samples.channel(1).unwrap()[5], 0.0);
        assert_eq!(samples.peak(), 0.75);
    }

    #[test]
    fn test_block_mut_bounds() {
        let mut samples = PlanarSamples::silence(2, 10);
        let block = samples.block_mut(8, 20);
        assert_eq!(block.len(), 2);
        assert_eq!(block[0].len(), 2);
        assert!(samples.block_mut(12, 20)[0].is_empty());
    }
}

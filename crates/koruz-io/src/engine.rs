//! Offline rendering: runs a chorus session over a whole file.

use crate::{Error, PlanarSamples, Result};
use koruz_effects::{ChorusEngine, ChorusParameters};

/// Block size used when none is given.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Drives a [`ChorusEngine`] over in-memory audio the way a host does:
/// configure once, process fixed-size blocks, release.
///
/// With the tail enabled, the output is extended by the engine's tail length
/// so the last delayed signal is not cut off.
#[derive(Debug, Clone)]
pub struct OfflineRenderer {
    engine: ChorusEngine,
    params: ChorusParameters,
    block_size: usize,
    tail: bool,
}

impl OfflineRenderer {
    /// Creates a renderer with the given controls, default block size and no tail.
    pub fn new(params: ChorusParameters) -> Self {
        Self {
            engine: ChorusEngine::new(),
            params,
            block_size: DEFAULT_BLOCK_SIZE,
            tail: false,
        }
    }

    /// Sets the processing block size. Zero selects [`DEFAULT_BLOCK_SIZE`].
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = if block_size == 0 {
            DEFAULT_BLOCK_SIZE
        } else {
            block_size
        };
        self
    }

    /// Enables or disables the appended effect tail.
    pub fn with_tail(mut self, tail: bool) -> Self {
        self.tail = tail;
        self
    }

    /// Current controls.
    pub fn params(&self) -> &ChorusParameters {
        &self.params
    }

    /// Replaces the controls used by subsequent renders.
    pub fn set_params(&mut self, params: ChorusParameters) {
        self.params = params;
    }

    /// Block size in frames.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Frames appended after the input when the tail is enabled.
    pub fn tail_frames(&self, sample_rate: u32) -> usize {
        if self.tail {
            (self.engine.tail_seconds() * f64::from(sample_rate)).round() as usize
        } else {
            0
        }
    }

    /// Renders `input` at `sample_rate` and returns the processed audio.
    pub fn render(&mut self, input: &PlanarSamples, sample_rate: u32) -> Result<PlanarSamples> {
        self.render_with_progress(input, sample_rate, |_, _| {})
    }

    /// Like [`render`](Self::render), calling `progress(done, total)` in
    /// frames after every block.
    pub fn render_with_progress<F>(
        &mut self,
        input: &PlanarSamples,
        sample_rate: u32,
        mut progress: F,
    ) -> Result<PlanarSamples>
    where
        F: FnMut(usize, usize),
    {
        let channel_count = input.channel_count();
        if channel_count == 0 {
            return Err(Error::EmptyInput);
        }

        self.engine
            .configure(f64::from(sample_rate), channel_count)?;

        let mut output = input.clone();
        output.extend_silence(self.tail_frames(sample_rate));
        let total = output.frames();

        tracing::info!(
            sample_rate,
            channels = channel_count,
            frames = total,
            block_size = self.block_size,
            rate = self.params.rate,
            depth = self.params.depth,
            mix = self.params.mix,
            "rendering"
        );

        let mut start = 0;
        while start < total {
            let end = (start + self.block_size).min(total);
            let mut block = output.block_mut(start, end);
            self.engine.process(&self.params, &mut block, end - start);
            progress(end, total);
            start = end;
        }

        self.engine.release();
        Ok(output)
    }
}

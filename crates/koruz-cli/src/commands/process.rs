//! File-based chorus processing command.

use crate::commands::common::{linear_to_db, load_preset, rms};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use koruz_config::{ChorusPreset, validate_preset};
use koruz_io::{OfflineRenderer, PlanarSamples, WavSpec, read_wav, write_wav};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or TOML file; explicit parameter flags override it
    #[arg(short, long)]
    preset: Option<String>,

    /// LFO rate in Hz (0.1 - 2.0)
    #[arg(short, long)]
    rate: Option<f32>,

    /// Modulation depth (0 - 1)
    #[arg(short, long)]
    depth: Option<f32>,

    /// Dry/wet mix (0 - 1)
    #[arg(short, long)]
    mix: Option<f32>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,

    /// Append the effect tail after the input ends
    #[arg(long)]
    tail: bool,
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("unsupported bit depth '{s}' (expected 16, 24, or 32)")),
    }
}

impl ProcessArgs {
    /// Preset values with explicit flags applied on top.
    fn settings(&self) -> anyhow::Result<ChorusPreset> {
        let mut preset = match &self.preset {
            Some(name) => load_preset(name)?,
            None => ChorusPreset::new("command line"),
        };
        if let Some(rate) = self.rate {
            preset.rate = rate;
        }
        if let Some(depth) = self.depth {
            preset.depth = depth;
        }
        if let Some(mix) = self.mix {
            preset.mix = mix;
        }
        validate_preset(&preset)?;
        Ok(preset)
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let settings = args.settings()?;

    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav(&args.input)?;
    println!(
        "  {} channel(s), {} frames, {} Hz, {:.2}s",
        samples.channel_count(),
        samples.frames(),
        spec.sample_rate,
        samples.frames() as f64 / f64::from(spec.sample_rate)
    );

    if args.preset.is_some() {
        println!("Using preset: {}", settings.name);
    }
    println!(
        "Chorus: rate {:.2} Hz, depth {:.0}%, mix {:.0}%",
        settings.rate,
        settings.depth * 100.0,
        settings.mix * 100.0
    );

    let mut renderer = OfflineRenderer::new(settings.to_parameters())
        .with_block_size(args.block_size)
        .with_tail(args.tail);

    let total = samples.frames() + renderer.tail_frames(spec.sample_rate);
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let output = renderer.render_with_progress(&samples, spec.sample_rate, |done, _| {
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("done");

    print_stats(&samples, &output);

    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)?;
    tracing::info!(output = %args.output.display(), frames = output.frames(), "done");
    println!("Done!");

    Ok(())
}

fn print_stats(input: &PlanarSamples, output: &PlanarSamples) {
    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(input.channels().iter().flatten())),
        linear_to_db(input.peak())
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(output.channels().iter().flatten())),
        linear_to_db(output.peak())
    );
}

//! WAV metadata and the chorus geometry it implies.

use crate::commands::common::{linear_to_db, rms};
use clap::Args;
use koruz_effects::chorus::{BUFFER_SECONDS, EngineConfiguration, delay_time_samples};
use koruz_io::{WavFormat, WavInfo, read_wav, read_wav_info};
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// WAV file to inspect
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Also decode the audio and print per-channel levels
    #[arg(long)]
    levels: bool,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;
    let size = std::fs::metadata(&args.file)?.len();

    println!("File:        {}", args.file.display());
    println!("Format:      {}", describe_format(&info));
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );
    println!("Size:        {}", human_size(size));

    print_chorus_geometry(info.sample_rate);

    if args.levels {
        let (samples, _) = read_wav(&args.file)?;
        println!();
        println!("Levels:");
        for (index, channel) in samples.channels().iter().enumerate() {
            let peak = channel.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
            println!(
                "  ch{index}: RMS {:.1} dB, Peak {:.1} dB",
                linear_to_db(rms(channel)),
                linear_to_db(peak)
            );
        }
    }

    Ok(())
}

fn describe_format(info: &WavInfo) -> String {
    let kind = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };
    format!("{kind} {}-bit", info.bits_per_sample)
}

/// Delay buffer and sweep the engine would use at `sample_rate`.
fn print_chorus_geometry(sample_rate: u32) {
    let sr = f64::from(sample_rate);
    let capacity = EngineConfiguration::capacity_for(sr);
    let shortest = delay_time_samples(0.0, 0.0, sr, capacity);
    let longest = delay_time_samples(1.0, 1.0, sr, capacity);
    let tail = (BUFFER_SECONDS * sr).round() as usize;

    println!();
    println!("Chorus at this rate:");
    println!("  Buffer:    {capacity} samples per channel");
    println!("  Delay:     {shortest:.1} - {longest:.1} samples");
    println!("  Tail:      {tail} frames");
}

fn human_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} B")
    } else if b < KIB * KIB {
        format!("{:.1} KB", b / KIB)
    } else {
        format!("{:.1} MB", b / (KIB * KIB))
    }
}

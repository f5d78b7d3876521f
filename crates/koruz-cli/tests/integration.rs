//! Integration tests for koruz-cli.
//!
//! Invokes the built `koruz` binary end to end.

use koruz_io::{PlanarSamples, WavSpec, read_wav, write_wav};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the `koruz` binary built by cargo.
fn koruz_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_koruz"))
}

fn write_sine(path: &Path, sample_rate: u32, channels: usize, frames: usize) -> PlanarSamples {
    let tone: Vec<f32> = (0..frames)
        .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate as f32).sin())
        .collect();
    let samples = PlanarSamples::new(vec![tone; channels]);
    let spec = WavSpec {
        channels: channels as u16,
        sample_rate,
        bits_per_sample: 32,
    };
    write_wav(path, &samples, spec).unwrap();
    samples
}

// ---------------------------------------------------------------------------
// General
// ---------------------------------------------------------------------------

#[test]
fn cli_help_works() {
    let output = koruz_bin().arg("--help").output().expect("failed to run koruz --help");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Koruz chorus CLI"));
    for cmd in ["process", "info", "presets", "params"] {
        assert!(stdout.contains(cmd), "help should list '{cmd}'");
    }
}

#[test]
fn cli_version_works() {
    let output = koruz_bin().arg("--version").output().expect("failed to run koruz --version");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("koruz"));
}

// ---------------------------------------------------------------------------
// `koruz process`
// ---------------------------------------------------------------------------

#[test]
fn cli_process_stereo_file() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    let input = write_sine(&input_path, 48000, 2, 24000);

    let output = koruz_bin()
        .args([
            "process",
            input_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--rate",
            "1.5",
            "--depth",
            "0.8",
            "--mix",
            "0.6",
        ])
        .output()
        .expect("failed to run koruz process");

    assert!(
        output.status.success(),
        "koruz process failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (loaded, spec) = read_wav(&output_path).unwrap();
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(spec.channels, 2);
    assert_eq!(loaded.frames(), 24000);
    assert_ne!(loaded, input);
    assert!(loaded.peak() <= 1.0);
}

#[test]
fn cli_process_tail_and_bit_depth() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    write_sine(&input_path, 44100, 1, 4410);

    let output = koruz_bin()
        .args([
            "process",
            input_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--preset",
            "lush",
            "--tail",
            "--bit-depth",
            "16",
            "--block-size",
            "100",
        ])
        .output()
        .expect("failed to run koruz process");

    assert!(
        output.status.success(),
        "koruz process failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (loaded, spec) = read_wav(&output_path).unwrap();
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(loaded.frames(), 4410 + 1544);
}

#[test]
fn cli_process_dry_preset_is_transparent() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    let input = write_sine(&input_path, 48000, 1, 2000);

    let status = koruz_bin()
        .args([
            "process",
            input_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--preset",
            "dry",
        ])
        .output()
        .expect("failed to run koruz process")
        .status;
    assert!(status.success());

    let (loaded, _) = read_wav(&output_path).unwrap();
    assert_eq!(loaded, input);
}

#[test]
fn cli_process_rejects_out_of_range() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.wav");
    write_sine(&input_path, 48000, 1, 100);

    let output = koruz_bin()
        .args([
            "process",
            input_path.to_str().unwrap(),
            dir.path().join("out.wav").to_str().unwrap(),
            "--depth",
            "3",
        ])
        .output()
        .expect("failed to run koruz");

    assert!(!output.status.success(), "depth 3 should be rejected");
    assert!(String::from_utf8_lossy(&output.stderr).contains("depth"));
}

#[test]
fn cli_process_rejects_bad_bit_depth() {
    let output = koruz_bin()
        .args(["process", "in.wav", "out.wav", "--bit-depth", "12"])
        .output()
        .expect("failed to run koruz");
    assert!(!output.status.success());
}

#[test]
fn cli_process_nonexistent_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = koruz_bin()
        .args([
            "process",
            dir.path().join("missing.wav").to_str().unwrap(),
            dir.path().join("out.wav").to_str().unwrap(),
        ])
        .output()
        .expect("failed to run koruz");

    assert!(!output.status.success(), "process with nonexistent input should fail");
}

// ---------------------------------------------------------------------------
// `koruz info`, `koruz presets`, `koruz params`
// ---------------------------------------------------------------------------

#[test]
fn cli_info_shows_wav_metadata() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tone.wav");
    write_sine(&path, 44100, 2, 44100);

    let output = koruz_bin()
        .args(["info", path.to_str().unwrap()])
        .output()
        .expect("failed to run koruz info");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("44100"), "should show sample rate, got: {stdout}");
    assert!(stdout.contains("Channels:    2"), "got: {stdout}");
    assert!(stdout.contains("1.000s"), "got: {stdout}");
    assert!(stdout.contains("Buffer:    1543 samples"), "got: {stdout}");
}

#[test]
fn cli_info_levels_per_channel() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tone.wav");
    write_sine(&path, 48000, 2, 4800);

    let output = koruz_bin()
        .args(["info", path.to_str().unwrap(), "--levels"])
        .output()
        .expect("failed to run koruz info --levels");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ch0:"), "got: {stdout}");
    assert!(stdout.contains("ch1:"), "got: {stdout}");
    assert!(stdout.contains("Tail:      1680 frames"), "got: {stdout}");
}

#[test]
fn cli_presets_lists_factory_presets() {
    let output = koruz_bin().arg("presets").output().expect("failed to run koruz presets");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["default", "subtle", "wide", "dry", "lush"] {
        assert!(stdout.contains(name), "listing should contain '{name}'");
    }
}

#[test]
fn cli_presets_save_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved").join("wide.toml");

    let output = koruz_bin()
        .args(["presets", "wide", "--save", path.to_str().unwrap()])
        .output()
        .expect("failed to run koruz presets --save");
    assert!(
        output.status.success(),
        "presets --save failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(path.exists());

    // The saved file is itself a usable preset.
    let output = koruz_bin()
        .args(["presets", path.to_str().unwrap()])
        .output()
        .expect("failed to run koruz presets");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Wide"));
}

#[test]
fn cli_presets_unknown_fails() {
    let output = koruz_bin()
        .args(["presets", "shimmer"])
        .output()
        .expect("failed to run koruz presets");
    assert!(!output.status.success());
}

#[test]
fn cli_params_lists_ranges() {
    let output = koruz_bin().arg("params").output().expect("failed to run koruz params");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--rate"));
    assert!(stdout.contains("--depth"));
    assert!(stdout.contains("--mix"));
    assert!(stdout.contains("0.1 Hz - 2 Hz"), "got: {stdout}");
}

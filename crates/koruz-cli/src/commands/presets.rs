//! Preset listing and export.
//!
//! Without a name, lists the factory presets. With a name (factory preset or
//! TOML path), shows its values and optionally writes it to a file.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use crate::commands::common::load_preset;
use clap::Args;
use koruz_config::{ChorusPreset, factory_presets};
use std::path::PathBuf;

#[derive(Args)]
pub struct PresetsArgs {
    /// Preset to show (factory name or TOML file)
    #[arg(value_name = "NAME")]
    name: Option<String>,

    /// Write the preset to this TOML file
    #[arg(long, value_name = "PATH", requires = "name")]
    save: Option<PathBuf>,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    let Some(name) = &args.name else {
        list();
        return Ok(());
    };

    let preset = load_preset(name)?;
    show(&preset);

    if let Some(path) = &args.save {
        preset.save(path)?;
        tracing::info!(path = %path.display(), preset = %preset.name, "preset saved");
        println!();
        println!("Saved to {}", path.display());
    }

    Ok(())
}

fn list() {
    println!("Factory Presets");
    println!("===============");
    println!();
    println!(
        "  {:10}  {:>8}  {:>6}  {:>6}  {}",
        "Name", "Rate", "Depth", "Mix", "Description"
    );
    println!(
        "  {:10}  {:>8}  {:>6}  {:>6}  {}",
        "----", "----", "-----", "---", "-----------"
    );
    for preset in factory_presets() {
        println!(
            "  {:10}  {:>5.2} Hz  {:>5.0}%  {:>5.0}%  {}",
            preset.name.to_lowercase(),
            preset.rate,
            preset.depth * 100.0,
            preset.mix * 100.0,
            preset.description.as_deref().unwrap_or("")
        );
    }
    println!();
    println!("Use with: koruz process input.wav output.wav --preset <name>");
}

fn show(preset: &ChorusPreset) {
    println!("{}", preset.name);
    println!("{}", "=".repeat(preset.name.len()));
    if let Some(description) = &preset.description {
        println!();
        println!("{description}");
    }
    println!();
    println!("  rate   {:.2} Hz", preset.rate);
    println!("  depth  {:.0}%", preset.depth * 100.0);
    println!("  mix    {:.0}%", preset.mix * 100.0);
}

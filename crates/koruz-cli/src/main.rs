//! Koruz CLI - render audio files through the koruz chorus.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "koruz")]
#[command(author, version, about = "Koruz chorus CLI", long_about = None)]
struct Cli {
    /// Log engine and file activity at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process an audio file through the chorus
    Process(commands::process::ProcessArgs),

    /// Show WAV file information
    Info(commands::info::InfoArgs),

    /// List, show and export presets
    Presets(commands::presets::PresetsArgs),

    /// List the chorus parameters and their ranges
    Params(commands::params::ParamsArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Params(args) => commands::params::run(args),
    }
}

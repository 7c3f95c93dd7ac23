//! Resona CLI - analyze passive RC and RLC filters from the command line.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resona")]
#[command(author, version, about = "Passive filter analysis", long_about = None)]
struct Cli {
    /// Log engine events (bracket widening, cache misses, diagnostics)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Characteristic frequencies, Q and bandwidth
    Analyze(commands::analyze::AnalyzeArgs),

    /// Frequency response over a log-spaced sweep
    Sweep(commands::sweep::SweepArgs),

    /// Step or impulse response
    Step(commands::step::StepArgs),

    /// Simulate the filter on a multi-tone or recorded input
    Simulate(commands::simulate::SimulateArgs),

    /// Analyze every design in a batch file
    Batch(commands::batch::BatchArgs),

    /// List and show factory presets
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Sweep(args) => commands::sweep::run(args),
        Commands::Step(args) => commands::step::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}

mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scrollsnap", about = "Scrolling screenshot alignment tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find where the second still continues the first
    Overlap(commands::overlap::OverlapArgs),
    /// Estimate the vertical scroll between two consecutive frames
    Shift(commands::shift::ShiftArgs),
    /// Replay a frame sequence through a capture session
    Scan(commands::scan::ScanArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Overlap(args) => commands::overlap::run(args),
        Commands::Shift(args) => commands::shift::run(args),
        Commands::Scan(args) => commands::scan::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}

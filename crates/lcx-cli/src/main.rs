//! # lcx CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// LCX Stack CLI — level crossing toolchain.
///
/// Validates crossing configurations and replays scripted operation
/// sequences against a deterministic clock.
#[derive(Parser, Debug)]
#[command(name = "lcx", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Structural checks on a crossing configuration file.
    Validate(lcx_cli::validate::ValidateArgs),
    /// Replay a YAML operation script over a deterministic clock.
    Replay(lcx_cli::replay::ReplayArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => lcx_cli::validate::run(args),
        Commands::Replay(args) => lcx_cli::replay::run(args),
    }
}

//! Datetime Synthesis CLI
//!
//! Command-line driver for the datetime example generator.
//!
//! # Commands
//!
//! - `generate <output> <count>`: emit labeled datetime examples
//! - `day-task <task> <count>`: emit day-arithmetic task examples
//!
//! Examples stream to stdout as JSON lines by default; `--inputs`,
//! `--targets` and `--csv <path>` select compact forms.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// Datetime Synthesis CLI - labeled date/time training data
#[derive(Parser)]
#[command(name = "datetime-synth")]
#[command(version = "0.1.0")]
#[command(about = "Generates labeled date/time training examples")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate labeled datetime examples
    Generate(commands::GenerateArgs),
    /// Generate day-arithmetic task examples
    DayTask(commands::DayTaskArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate(args) => commands::handle_generate(args),
        Commands::DayTask(args) => commands::handle_day_task(args),
    }
}

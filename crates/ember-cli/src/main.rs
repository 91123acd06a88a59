//! Ember CLI - Command-line interface for the Ember particle engine

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, play};

#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "Headless single-emitter particle renderer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the emitter and save the last frame as PNG
    Play {
        /// Minimum delay between ticks in milliseconds
        #[arg(long)]
        interval: Option<u64>,

        /// Path to a play config (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Number of ticks to run. 0 runs until interrupted, and an interrupted run saves no frame
        #[arg(long)]
        ticks: Option<u64>,

        /// Surface width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Surface height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Output image path
        #[arg(short, long, default_value = "frame.png")]
        output: String,
    },

    /// Parse a play config and print the resolved settings
    Check {
        /// Path to a play config (TOML)
        config: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            interval,
            config,
            ticks,
            width,
            height,
            seed,
            output,
        } => play::run(play::PlayArgs {
            interval,
            config,
            ticks,
            width,
            height,
            seed,
            output,
        }),
        Commands::Check { config } => check::run(&config),
    }
}

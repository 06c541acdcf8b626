//! WaveLab CLI - Additive Waveform Synthesis
//!
//! Command-line shell for the WaveLab synthesis engine.

use clap::Parser;
use env_logger::Env;
use log::info;

use wavelab::cli::{commands, Cli, Commands};
use wavelab::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("WaveLab v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("WaveLab v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Render {
            waves,
            rate,
            bit_depth,
            out_dir,
            plot_all,
            json,
        } => commands::render(&waves, rate, bit_depth, out_dir, plot_all, json),
        Commands::Spectrum {
            waves,
            rate,
            top,
            json,
        } => commands::spectrum(&waves, rate, top, json),
        Commands::Shapes => commands::shapes(),
        Commands::Clear => commands::clear(),
    }
}

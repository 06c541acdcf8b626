//! CLI Module
//!
//! Command-line shell for the WaveLab synthesis engine.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// WaveLab - additive waveform synthesis and spectral analysis
#[derive(Parser, Debug)]
#[command(name = "wavelab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize components and emit the aggregate as a WAV file
    #[command(name = "render")]
    Render {
        /// Wave spec `shape:freq:duration[:amplitude]`, repeatable
        /// (e.g. `sine:440:1` or `square:220:2:0.5`)
        #[arg(short, long = "wave", required = true)]
        waves: Vec<String>,

        /// Sample rate in Hz
        #[arg(long, default_value_t = 44100)]
        rate: u32,

        /// Output bit depth: 16, 24, or 32
        #[arg(long, default_value_t = 24)]
        bit_depth: u16,

        /// Output directory (default: the per-user data directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Include per-component buffers in the summary
        #[arg(long)]
        plot_all: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the magnitude spectrum of the mixed signal
    #[command(name = "spectrum")]
    Spectrum {
        /// Wave spec `shape:freq:duration[:amplitude]`, repeatable
        #[arg(short, long = "wave", required = true)]
        waves: Vec<String>,

        /// Sample rate in Hz
        #[arg(long, default_value_t = 44100)]
        rate: u32,

        /// Number of strongest bins to print
        #[arg(long, default_value_t = 5)]
        top: usize,

        /// Print the bins as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported waveform shapes
    #[command(name = "shapes")]
    Shapes,

    /// Delete emitted wave files from the data directory
    #[command(name = "clear")]
    Clear,
}

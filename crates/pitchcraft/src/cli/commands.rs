//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Pitchcraft - Turn a product description into a marketing pitch
#[derive(Parser, Debug)]
#[command(name = "pitchcraft")]
#[command(about = "Turn a product description into a marketing narrative, collage, video, and social posts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Print OpenTelemetry spans to stdout
    #[arg(long, global = true)]
    pub export_spans: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a narrative and, optionally, the assets built from it
    Generate(GenerateArgs),

    /// Print the effective provider configuration
    Config {
        /// Load bundled defaults plus this file instead of the usual sources
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// Arguments for `pitchcraft generate`.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Product or idea description
    pub description: String,

    /// Generate the five-panel collage
    #[arg(long)]
    pub image: bool,

    /// Generate the marketing video
    #[arg(long)]
    pub video: bool,

    /// Generate social media posts (implies --image)
    #[arg(long)]
    pub social: bool,

    /// Write the collage to this file
    #[arg(long, num_args = 0..=1, default_missing_value = pitchcraft::IMAGE_EXPORT_FILENAME)]
    pub image_out: Option<PathBuf>,

    /// Write the video to this file
    #[arg(long)]
    pub video_out: Option<PathBuf>,

    /// Give up on the video after this many seconds (default 600 unless configured)
    #[arg(long)]
    pub max_wait: Option<u64>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

/// Output format for results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON snapshot of the session
    Json,
}

//! Pitchcraft CLI binary.
//!
//! This binary provides command-line access to Pitchcraft:
//! - Generate a narrative, collage, video, and social posts from a description
//! - Show the effective provider configuration

use clap::Parser;
use pitchcraft::{TelemetryConfig, init_telemetry, shutdown_telemetry};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_generate, show_config};

    // Load .env if present
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "info" };
    init_telemetry(
        TelemetryConfig::new("pitchcraft")
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs)
            .with_span_export(cli.export_spans),
    )?;

    // Execute the requested command
    let result = match cli.command {
        Commands::Generate(args) => run_generate(args).await,
        Commands::Config { file } => show_config(file.as_deref()).map(|()| true),
    };

    shutdown_telemetry();

    if !result? {
        std::process::exit(2);
    }
    Ok(())
}

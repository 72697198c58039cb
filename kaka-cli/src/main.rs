//! ## kaka-cli
//! **Command line front end for the cookie engine**
//!
//! Parses, filters and renders `Cookie` headers given on the command line,
//! or replays a file of headers through one request slot the way a worker
//! thread would serve them.

use clap::Parser;
use kaka_config::KakaConfig;
use kaka_telemetry::{EventLogger, MetricsRecorder};

mod commands;
mod error;

use commands::Cli;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => KakaConfig::load_from_path(path)?,
        None => KakaConfig::load()?,
    };
    EventLogger::init(&config.telemetry.log_level)?;

    let metrics = if config.telemetry.metrics || cli.wants_metrics() {
        Some(MetricsRecorder::new()?)
    } else {
        None
    };

    let stdout = std::io::stdout();
    commands::run_command(cli.command, &config, metrics.as_ref(), &mut stdout.lock())?;
    Ok(())
}

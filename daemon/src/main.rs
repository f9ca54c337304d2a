//! Pulse daemon: entry point for replaying election action scripts.

use anyhow::Context;
use clap::Parser;
use pulse_daemon::{replay, DaemonConfig};
use pulse_election::SharedElection;
use pulse_types::SystemClock;
use pulse_utils::LogFormat;
use std::io::{BufReader, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pulse-daemon", about = "Pulse engagement-gated voting daemon")]
struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, env = "PULSE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "PULSE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "PULSE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a JSON-lines action script ("-" reads stdin).
    Replay {
        script: PathBuf,
    },
    /// Print the effective configuration as TOML.
    Params,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => DaemonConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DaemonConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format.as_deref() {
        config.log_format = LogFormat::parse(format);
    }

    pulse_utils::init_tracing(&config.log_level, config.log_format);
    if let Some(ref path) = cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Replay { script } => {
            let election = SharedElection::in_memory(config.params.clone())
                .context("invalid election parameters")?;
            let stdout = std::io::stdout();
            let summary = if script.as_os_str() == "-" {
                let stdin = std::io::stdin();
                replay(&election, &SystemClock, stdin.lock(), stdout.lock())?
            } else {
                let file = std::fs::File::open(&script)
                    .with_context(|| format!("opening script {}", script.display()))?;
                replay(&election, &SystemClock, BufReader::new(file), stdout.lock())?
            };

            let mut out = stdout.lock();
            writeln!(out, "{}", serde_json::to_string(&summary)?)?;
            tracing::info!(
                "Replay complete: {} applied, {} rejected",
                summary.applied,
                summary.rejected
            );
        }
        Command::Params => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

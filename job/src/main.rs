//! Signup Metrics Job Binary
//!
//! Entry point for the signup counting job.
//!
//! # Usage
//!
//! ```bash
//! signup-metrics            # one counting pass
//! signup-metrics run        # same as above
//! signup-metrics watch --interval-secs 3600
//! ```

#![deny(unsafe_code)]

use clap::{Parser, Subcommand};
use std::time::Duration;

/// Signup metrics job - counts signups and pushes time-series points
#[derive(Parser)]
#[command(name = "signup-metrics")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Perform one counting pass and exit
    Run,
    /// Keep counting at a fixed interval
    Watch {
        /// Seconds between counting passes
        #[arg(long, env = "SIGNUP_METRICS_INTERVAL_SECS", default_value_t = 3600)]
        interval_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Watch { interval_secs }) => {
            signup_metrics::run_scheduled(Duration::from_secs(interval_secs)).await
        }
        Some(Commands::Run) | None => {
            signup_metrics::run_once().await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        // Verify CLI can parse without arguments
        let cli = Cli::try_parse_from(["signup-metrics"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_run_command() {
        let cli = Cli::try_parse_from(["signup-metrics", "run"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert!(matches!(cli.command, Some(Commands::Run)));
    }

    #[test]
    fn test_cli_watch_interval() {
        let cli = Cli::try_parse_from(["signup-metrics", "watch", "--interval-secs", "60"])
            .expect("Failed to parse watch command");

        match cli.command {
            Some(Commands::Watch { interval_secs }) => assert_eq!(interval_secs, 60),
            _ => panic!("Expected watch command"),
        }
    }
}

// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # pistat
//!
//! Prints RAM size, CPU frequency, CPU temperature and throttle status
//! of a Raspberry Pi.
//!
//! ## Usage
//! ```bash
//! # Report all metrics
//! pistat
//!
//! # Use alternative probe commands, with debug logging on stderr
//! pistat --config ./pistat.toml -vv
//! ```
//!
//! The exit status is always 0: metrics that cannot be read are simply
//! left out of the report.

use clap::Parser;
use pi_status::{MonitorConfig, StatusReporter, SystemRunner};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pistat",
    about = "Report RAM size, CPU frequency, CPU temperature and throttle status",
    version,
    author
)]
struct Cli {
    /// Path to a TOML file overriding the probe commands.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging on stderr (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());
    let reporter = StatusReporter::new(SystemRunner, config);

    let stdout = std::io::stdout();
    if let Err(e) = reporter.write_report(&mut stdout.lock()) {
        tracing::warn!("failed to write report: {e}");
    }

    Ok(())
}

/// Installs a stderr `fmt` subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the probe configuration, falling back to defaults on any error.
fn load_config(path: Option<&Path>) -> MonitorConfig {
    let Some(path) = path else {
        return MonitorConfig::default();
    };

    match MonitorConfig::from_file(path) {
        Ok(config) => {
            tracing::info!("loaded probe config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("{e}; using default probes");
            MonitorConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["pistat"]).unwrap();
        assert!(cli.config.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_flags() {
        let cli =
            Cli::try_parse_from(["pistat", "-vv", "--config", "/etc/pistat.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/pistat.toml")));
    }

    #[test]
    fn test_load_config_fallback() {
        assert_eq!(load_config(None), MonitorConfig::default());
        assert_eq!(
            load_config(Some(Path::new("/nonexistent/pistat.toml"))),
            MonitorConfig::default()
        );
    }
}

// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orrery - a command-line client for the exoplanet catalogue API.
//!
//! This is the binary entry point. It loads configuration, installs the
//! tracing subscriber, and dispatches to the command modules.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod activity;
mod output;
mod planets;
mod stats;
mod status;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use orrery_activity::ActivityReconciler;
use orrery_client::CatalogueClient;
use orrery_config::model::OrreryConfig;
use orrery_core::summary::MethodSort;
use orrery_core::types::DiscoveryChart;
use orrery_core::{OrreryError, TimelineQuery};

use crate::output::Output;
use crate::planets::PlanetsCommand;

/// Orrery - a command-line client for the exoplanet catalogue API.
#[derive(Parser, Debug)]
#[command(name = "orrery", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colors.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show recently created, updated, and deleted planets.
    Activity {
        /// Number of entries to show.
        #[arg(long, conflicts_with = "all")]
        limit: Option<usize>,
        /// Show as many entries as allowed.
        #[arg(long)]
        all: bool,
        /// Refresh on an interval until Ctrl-C.
        #[arg(long)]
        watch: bool,
        /// Seconds between refreshes in watch mode.
        #[arg(long, requires = "watch")]
        interval: Option<u64>,
    },
    /// Check API liveness and readiness.
    Status,
    /// Browse and edit planets.
    #[command(subcommand)]
    Planets(PlanetsCommand),
    /// List soft-deleted planets (admin).
    Deleted {
        #[arg(long, default_value_t = 50)]
        limit: usize,
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Show catalogue statistics, overall or for one discovery method.
    Stats {
        #[arg(long)]
        method: Option<String>,
    },
    /// Planet counts per discovery method.
    Methods {
        /// Case-insensitive substring of the method name.
        #[arg(long, default_value = "")]
        filter: String,
        /// count or name.
        #[arg(long, default_value_t = MethodSort::Count)]
        sort: MethodSort,
    },
    /// Discoveries per year.
    Timeline {
        #[arg(long)]
        start_year: Option<i32>,
        #[arg(long)]
        end_year: Option<i32>,
        #[arg(long)]
        include_deleted: bool,
    },
    /// Raw change-log rows, newest first.
    ChangeLog {
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Discovery chart data, or the URL of the rendered chart.
    Discovery {
        /// hist, year, or method.
        #[arg(long, default_value_t = DiscoveryChart::Hist)]
        chart: DiscoveryChart,
        /// Histogram bin count.
        #[arg(long)]
        bins: Option<u32>,
        /// Histogram band width in standard deviations.
        #[arg(long)]
        sigma: Option<f64>,
        /// Print the chart image URL instead of fetching data.
        #[arg(long)]
        url: bool,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => orrery_config::load_and_validate_path(path),
        None => orrery_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            orrery_config::render_errors(errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let out = Output::new(cli.json, cli.plain);
    if let Err(err) = run(cli.command, &config, out).await {
        report_error(&err, out);
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &OrreryConfig, out: Output) -> Result<(), OrreryError> {
    if let Commands::Config = command {
        return print_config(config, out);
    }

    let client = CatalogueClient::from_config(&config.api)?;

    match command {
        Commands::Activity {
            limit,
            all,
            watch,
            interval,
        } => {
            let limit = if all {
                config.activity.max_limit
            } else {
                limit.unwrap_or(config.activity.default_limit)
            };
            let reconciler = ActivityReconciler::from_config(Arc::new(client), config);
            if watch {
                let secs = interval.unwrap_or(config.activity.watch_interval_secs).max(1);
                activity::watch_activity(&reconciler, limit, Duration::from_secs(secs), out).await
            } else {
                activity::run_activity(&reconciler, limit, out).await
            }
        }
        Commands::Status => status::run_status(&client, out).await,
        Commands::Planets(cmd) => planets::run_planets(&client, cmd, out).await,
        Commands::Deleted { limit, offset } => {
            planets::run_deleted(&client, limit, offset, out).await
        }
        Commands::Stats { method } => stats::run_stats(&client, method.as_deref(), out).await,
        Commands::Methods { filter, sort } => stats::run_methods(&client, &filter, sort, out).await,
        Commands::Timeline {
            start_year,
            end_year,
            include_deleted,
        } => {
            let query = TimelineQuery {
                start_year,
                end_year,
                include_deleted: include_deleted.then_some(true),
            };
            stats::run_timeline(&client, &query, out).await
        }
        Commands::ChangeLog { limit, offset } => {
            planets::run_change_log(&client, limit, offset, out).await
        }
        Commands::Discovery {
            chart,
            bins,
            sigma,
            url,
        } => {
            let query = stats::discovery_query(chart, bins, sigma);
            stats::run_discovery(&client, &query, url, out).await
        }
        Commands::Config => print_config(config, out),
    }
}

/// A copy of the configuration safe to print: any admin key is replaced.
fn masked_config(config: &OrreryConfig) -> OrreryConfig {
    let mut shown = config.clone();
    if shown.api.admin_key.is_some() {
        shown.api.admin_key = Some("********".to_string());
    }
    shown
}

fn print_config(config: &OrreryConfig, out: Output) -> Result<(), OrreryError> {
    let shown = masked_config(config);
    if out.json {
        return out.print_json(&shown);
    }
    let rendered = toml::to_string_pretty(&shown)
        .map_err(|e| OrreryError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

fn report_error(err: &OrreryError, out: Output) {
    let text = orrery_client::describe_error(err);
    if out.color {
        use colored::Colorize;
        eprintln!("{} {}", "error:".red().bold(), text);
    } else {
        eprintln!("error: {text}");
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let level = log_level.trim().to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("orrery={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn activity_flags_parse() {
        let cli = Cli::try_parse_from(["orrery", "activity", "--watch", "--interval", "5", "--json"])
            .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Activity {
                watch, interval, ..
            } => {
                assert!(watch);
                assert_eq!(interval, Some(5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn limit_and_all_conflict() {
        assert!(Cli::try_parse_from(["orrery", "activity", "--limit", "3", "--all"]).is_err());
    }

    #[test]
    fn interval_requires_watch() {
        assert!(Cli::try_parse_from(["orrery", "activity", "--interval", "3"]).is_err());
    }

    #[test]
    fn methods_sort_parses() {
        let cli = Cli::try_parse_from(["orrery", "methods", "--sort", "name", "--filter", "tra"])
            .unwrap();
        match cli.command {
            Commands::Methods { filter, sort } => {
                assert_eq!(filter, "tra");
                assert_eq!(sort, MethodSort::Name);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn planets_hard_delete_parses() {
        let cli = Cli::try_parse_from(["orrery", "planets", "hard-delete", "7", "--confirm"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Planets(PlanetsCommand::HardDelete { id: 7, confirm: true })
        ));
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = orrery_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.activity.default_limit, 6);
    }

    #[test]
    fn printed_config_masks_key() {
        let mut config = OrreryConfig::default();
        config.api.admin_key = Some("secret".into());

        let shown = masked_config(&config);
        assert_eq!(shown.api.admin_key.as_deref(), Some("********"));
        assert_eq!(shown.api.base_url, config.api.base_url);
        assert_eq!(config.api.admin_key.as_deref(), Some("secret"));

        let rendered = toml::to_string_pretty(&shown).unwrap();
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn config_without_key_stays_unset() {
        let shown = masked_config(&OrreryConfig::default());
        assert!(shown.api.admin_key.is_none());
    }
}

#![forbid(unsafe_code)]

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use socnet_core::{Connection, MonthKey, NetworkStore, load_config};
use socnet_metrics::{Centrality, CentralityEngine};
use socnet_sim::{SimulationConfig, Simulator};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "socnet-sim: generate monthly activity and score a user",
    long_about = None
)]
struct Cli {
    /// RNG seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of months to simulate, counting back from now.
    #[arg(long, default_value_t = 3)]
    months: u32,

    /// Active users generated per month.
    #[arg(long, default_value_t = 20)]
    users_per_month: usize,

    /// Percent chance that a follow or mention targets an existing name.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    reuse_percent: u8,

    /// Path to a TOML config file.
    #[arg(long, default_value = "socnet.toml")]
    config: PathBuf,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Compact,
    Json,
}

#[derive(Serialize)]
struct Report {
    username: String,
    month: MonthKey,
    centrality: Centrality,
    connections: Vec<Connection>,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_env("SOCNET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "socnet_core=debug,socnet_metrics=debug,socnet_sim=debug,info"
        } else {
            "socnet_sim=info,warn"
        })
    });

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Compact => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = load_config(&cli.config)?;
    let store = NetworkStore::with_config(&config);
    let engine = CentralityEngine::new(config.centrality);

    let sim = SimulationConfig {
        seed: cli.seed,
        months: cli.months,
        users_per_month: cli.users_per_month,
        reuse_percent: cli.reuse_percent,
        start: Utc::now(),
    };
    let month = sim.latest_month();
    let usernames = Simulator::new(sim).run(&store)?;

    let Some(username) = usernames.into_iter().next() else {
        info!("nothing simulated");
        return Ok(());
    };

    let report = Report {
        centrality: engine.get_centrality(&store, &username, month),
        connections: store
            .get_all_connections(&username, month)
            .into_iter()
            .collect(),
        username,
        month,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vp_planner::calculate::{
    aggregate_history, aggregate_teams, evaluate_required_performance_with_margin, solve_scenario,
};
use vp_planner::config::AppConfig;
use vp_planner::convert::skirmish_results_from_match;
use vp_planner::models::{
    AverageVpTable, RawMatch, Region, ScenarioInput, SkirmishResult, TeamColor, TeamMap,
};
use vp_planner::storage::{list_matches, read_match_history, write_match_history, StorageConfig};

#[derive(Parser)]
#[command(name = "vp-planner")]
#[command(about = "Victory-point outcome planning for three-team skirmish matches")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a raw match record and store its skirmish results
    Convert {
        /// Raw match JSON file
        #[arg(long)]
        input: PathBuf,

        /// Region (inferred from the match id when omitted)
        #[arg(long)]
        region: Option<Region>,
    },

    /// List matches with stored history
    Matches,

    /// Aggregate stored history for one team
    History {
        /// Match to read; colours are only comparable within one match
        #[arg(long)]
        match_id: String,

        /// Team colour
        #[arg(long)]
        team: TeamColor,

        /// Display name (defaults to the colour)
        #[arg(long)]
        name: Option<String>,

        /// Region used for time windows
        #[arg(long)]
        region: Option<Region>,
    },

    /// Find the minimum-effort plan for a desired outcome
    Solve {
        /// Scenario JSON file
        #[arg(long)]
        input: PathBuf,

        /// Override the scenario's minimum margin
        #[arg(long)]
        min_margin: Option<u32>,
    },

    /// Plan a desired outcome and compare each team's requirement to its history
    Evaluate {
        /// Scenario JSON file
        #[arg(long)]
        input: PathBuf,

        /// Match to read history from
        #[arg(long)]
        match_id: String,

        /// Region used for time windows
        #[arg(long)]
        region: Option<Region>,

        #[arg(long)]
        red_name: Option<String>,

        #[arg(long)]
        blue_name: Option<String>,

        #[arg(long)]
        green_name: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting vp-planner v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Convert { input, region } => {
            let raw: RawMatch = read_json(&input)?;
            let region = match region.or_else(|| Region::from_match_id(&raw.id)) {
                Some(region) => region,
                None => bail!(
                    "Cannot infer region from match id '{}'; pass --region",
                    raw.id
                ),
            };

            let mut results = skirmish_results_from_match(&raw, region);
            let written = write_match_history(&storage, &raw.id, &mut results)
                .with_context(|| format!("Failed to store history for match {}", raw.id))?;

            tracing::info!(
                "Stored {} skirmishes for match {} ({})",
                written,
                raw.id,
                region
            );
        }

        Commands::Matches => {
            let matches = list_matches(&storage).context("Failed to list stored matches")?;
            print_json(&matches)?;
        }

        Commands::History {
            match_id,
            team,
            name,
            region,
        } => {
            let history = load_history(&storage, &match_id)?;
            let region = region.unwrap_or(config.planner.region);
            let name = name.unwrap_or_else(|| team.to_string());

            let stats = aggregate_history(&history, team, &name, region);
            print_json(&stats)?;
        }

        Commands::Solve { input, min_margin } => {
            let mut scenario: ScenarioInput = read_json(&input)?;
            if let Some(margin) = min_margin {
                scenario.min_margin = Some(margin);
            }
            config.planner.apply_defaults(&mut scenario);

            let result = solve_scenario(&scenario)?;
            if !result.is_possible {
                tracing::info!(
                    "No plan for {}: {}",
                    scenario.desired_outcome,
                    result.reason.as_deref().unwrap_or("unknown reason")
                );
            }
            print_json(&result)?;
        }

        Commands::Evaluate {
            input,
            match_id,
            region,
            red_name,
            blue_name,
            green_name,
        } => {
            let mut scenario: ScenarioInput = read_json(&input)?;
            config.planner.apply_defaults(&mut scenario);
            let history = load_history(&storage, &match_id)?;
            let region = region.unwrap_or(config.planner.region);

            let names = TeamMap::new(red_name, blue_name, green_name)
                .map(|team, name| name.clone().unwrap_or_else(|| team.to_string()));
            let stats: BTreeMap<TeamColor, _> = aggregate_teams(&history, &names, region)
                .iter()
                .map(|(team, stats)| (team, stats.clone()))
                .collect();

            let average_vp = AverageVpTable::from_tables(
                scenario.remaining_skirmishes.iter().map(|s| &s.vp_awards),
            );

            let plan = solve_scenario(&scenario)?;
            let performance = evaluate_required_performance_with_margin(
                &scenario.current_vp,
                scenario.remaining_skirmishes.len(),
                &average_vp,
                &scenario.desired_outcome,
                &stats,
                scenario.effective_margin(),
            )?;

            print_json(&serde_json::json!({
                "plan": plan,
                "performance": performance,
            }))?;
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {:?}", path))
}

fn load_history(storage: &StorageConfig, match_id: &str) -> Result<Vec<SkirmishResult>> {
    let history = read_match_history(storage, match_id)
        .with_context(|| format!("Failed to read history for match {}", match_id))?;

    if history.is_empty() {
        tracing::warn!("No stored history found; falling back to the default prior");
    }
    Ok(history)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

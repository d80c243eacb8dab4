//! Wiring between arguments, engine and reporters

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::Input;
use ipd_engine::{
    run_tournament, JsonReport, Reporter, StrategyRegistry, SummaryTable, TextReport, TournamentConfig,
    TournamentState,
};
use log::{info, warn};

use crate::args::Args;

/// Config file (if any) with command-line overrides applied
pub fn load_config(args: &Args) -> Result<TournamentConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            TournamentConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => TournamentConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate().context("invalid tournament config")?;
    Ok(config)
}

/// Ask how many teams to enter
pub fn prompt_players(available: usize) -> Result<usize> {
    Input::<usize>::new()
        .with_prompt(format!("How many teams do you want to run in this tournament? Max: {}", available))
        .interact_text()
        .context("reading number of teams")
}

/// Requests beyond the registry are capped at its size
pub fn clamp_players(requested: usize, available: usize) -> usize {
    if requested > available {
        warn!("{} teams requested but only {} registered, running {}", requested, available, available);
        available
    } else {
        requested
    }
}

/// Play the tournament and write every report
pub fn execute(
    config: &TournamentConfig,
    players: usize,
    output: &Path,
    json: Option<&Path>,
) -> Result<TournamentState> {
    let registry = StrategyRegistry::from_specs(&config.roster);
    let ids = registry.first(players);
    let state = run_tournament(&registry, &ids, config).context("running tournament")?;

    let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    TextReport::new(BufWriter::new(file))
        .report(&state)
        .with_context(|| format!("writing {}", output.display()))?;
    info!("Wrote round-by-round results to {}", output.display());

    if let Some(path) = json {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        JsonReport::new(BufWriter::new(file))
            .report(&state)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Wrote JSON results to {}", path.display());
    }

    SummaryTable::new(io::stdout().lock())
        .report(&state)
        .context("printing summary")?;
    Ok(state)
}

//! Arena Binary
//!
//! Runs one round-robin tournament of the Iterated Prisoner's Dilemma.
//!
//! Options: --players, --seed, --config, --output, --json

mod args;
mod run;

use anyhow::{Context, Result};
use clap::Parser;

use args::Args;

/// Terminal logger without location, target or thread noise
fn log(level: log::LevelFilter) -> Result<()> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .context("initializing logger")
}

fn main() -> Result<()> {
    let args = Args::parse();
    log(args.log_level())?;

    let config = run::load_config(&args)?;
    let available = config.roster.len();
    let requested = match args.players {
        Some(n) => n,
        None => run::prompt_players(available)?,
    };
    let players = run::clamp_players(requested, available);

    run::execute(&config, players, &args.output, args.json.as_deref())?;
    Ok(())
}

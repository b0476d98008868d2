//! Host console for pickleball round-robin events.
//!
//! Events are stored as JSON documents in the data directory. The device
//! that creates an event keeps its host token and is the only one allowed
//! to change it.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Error;
use log::debug;
use pico_args::Arguments;
use pickleball::JsonFileStore;

use crate::commands::{parse_command, run};
use crate::config::CliConfig;

const HELP: &str = "\
Run and score pickleball round-robin events

USAGE:
  pb_cli [OPTIONS] <COMMAND> [ARGS]

COMMANDS:
  create NAME --teams N [--courts C] [--points P] [--no-win-by-2]
         [--scoring traditional|points_for|win_diff] [--names A,B,..]
  preview --teams N --courts C     Show rounds, waves and byes for a setup
  list                             List stored events
  show EVENT                       Print the schedule and scores
  start|pause|reset|submit EVENT ROUND
  score EVENT ROUND MATCH A B      Set both scores, '-' clears one
  winner EVENT ROUND MATCH TEAM    Pick the winner of a match
  standings EVENT [--playoffs|--all] [--final]
  playoffs EVENT                   Seed semifinals, then schedule finals
  rename EVENT TEAM NAME           Rename a team before play starts
  players EVENT TEAM P1 P2         Set a team's two players before play starts
  link EVENT                       Print the spectator link
  export EVENT                     Print the event snapshot as JSON
  claim LINK TOKEN                 Become host of an event on this device
  delete EVENT

  ROUND is a round number, 'sf', 'finals' or a round id.
  MATCH is a position within the round or a match id.
  TEAM is a team id or name.

OPTIONS:
  --data-dir   DIR       Event storage directory  [default: env PB_DATA_DIR or ./pickleball-data]
  --base-url   URL       Share link base URL      [default: env PB_BASE_URL or http://localhost:8080/]

FLAGS:
  -h, --help             Print help information

ENVIRONMENT:
  PB_DATA_DIR            Event storage directory
  PB_BASE_URL            Share link base URL
  PB_DEFAULT_COURTS      Courts used by create when --courts is absent [default: 3]
  PB_DEFAULT_POINTS      Points per game when --points is absent [default: 11]
  RUST_LOG               Log filter (e.g., debug)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    env_logger::builder().format_target(false).init();

    let data_dir: Option<PathBuf> = pargs.opt_value_from_str("--data-dir")?;
    let base_url: Option<String> = pargs.opt_value_from_str("--base-url")?;

    let config = CliConfig::from_env(data_dir, base_url)?;
    config.validate()?;
    debug!("Using data directory {}", config.data_dir.display());

    let command = parse_command(pargs)?;
    let store = JsonFileStore::new(&config.data_dir);

    let output = run(command, &store, &config).await?;
    print!("{output}");

    Ok(())
}

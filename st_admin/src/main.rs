//! Command-line administration for a Swiss-system tournament.
//!
//! Provisions the PostgreSQL schema, registers players, records match
//! results and prints standings and next-round pairings.

mod commands;
mod config;
mod logging;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Error};
use log::{error, info};
use pico_args::Arguments;
use swiss_tournament::{
    TournamentManager,
    db::{Database, schema},
};

use commands::{Command, Outcome, SchemaCommand, execute, parse_command};
use config::AdminConfig;

const HELP: &str = "\
Administer a Swiss-system tournament

USAGE:
  st_admin [OPTIONS] <COMMAND>

COMMANDS:
  init                     Create the players/matches tables and the score view
  teardown                 Drop the tournament schema
  register <NAME>          Register a player and print its ID
  report <WINNER> <LOSER>  Record a match result by player ID
  count                    Print the number of registered players
  standings                Print players ranked by wins
  pairings                 Print pairings for the next round
  reset [--players]        Delete all matches (and all players with --players)

OPTIONS:
  --db-url     URL         Database connection string  [default: env DATABASE_URL]
  --json                   Print results as JSON

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  DATABASE_URL             PostgreSQL connection string
  DB_MAX_CONNECTIONS       Pool size upper bound
  DB_QUERY_TIMEOUT_MS      Per-statement timeout in milliseconds
  RUST_LOG                 Log filter (logs are written to stderr)
  (A .env file in the working directory is loaded first)
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

    let database_url: Option<String> = pargs.opt_value_from_str("--db-url")?;
    let json = pargs.contains("--json");
    let command = parse_command(pargs)?;

    logging::init();

    let config = AdminConfig::from_env(database_url, json)?;
    config.validate()?;

    let db = Database::new(&config.database)
        .await
        .context("Failed to connect to database")?;
    db.health_check()
        .await
        .context("Database health check failed")?;
    info!("Connected to tournament database");

    let started = Instant::now();
    let name = command.name();
    let result = run(command, &db).await;
    logging::log_command(name, started.elapsed().as_millis() as u64);
    db.close().await;

    let outcome = result?;
    println!("{}", outcome.render(config.output)?);

    Ok(())
}

async fn run(command: Command, db: &Database) -> Result<Outcome, Error> {
    match command {
        Command::Schema(SchemaCommand::Init) => {
            schema::provision(db.pool())
                .await
                .context("Failed to provision schema")?;
            Ok(Outcome::Done("Schema ready"))
        }
        Command::Schema(SchemaCommand::Teardown) => {
            schema::drop_all(db.pool())
                .await
                .context("Failed to drop schema")?;
            Ok(Outcome::Done("Schema dropped"))
        }
        Command::Tournament(cmd) => {
            let manager = TournamentManager::new(Arc::new(db.repository()));
            execute(cmd, &manager).await.map_err(|e| {
                error!("Command failed: {}", e);
                anyhow::anyhow!(e.client_message())
            })
        }
    }
}

use pico_args::Arguments;
use serde_json::json;
use std::fmt;
use swiss_tournament::{
    Pairing, PlayerId, StandingRow, TournamentManager, TournamentResult,
    display::{render_pairings, render_standings},
};

use crate::config::OutputFormat;

/// Schema commands run directly against the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaCommand {
    /// Create the tournament schema.
    Init,
    /// Drop the tournament schema.
    Teardown,
}

/// Commands run through the tournament manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TournamentCommand {
    /// Register a player.
    Register { name: String },
    /// Record a match result.
    Report { winner: PlayerId, loser: PlayerId },
    /// Print the number of registered players.
    Count,
    /// Print the standings table.
    Standings,
    /// Print next-round pairings.
    Pairings,
    /// Delete all matches, and all players too when `players` is set.
    Reset { players: bool },
}

/// Admin subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Schema(SchemaCommand),
    Tournament(TournamentCommand),
}

impl Command {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Schema(SchemaCommand::Init) => "init",
            Self::Schema(SchemaCommand::Teardown) => "teardown",
            Self::Tournament(cmd) => match cmd {
                TournamentCommand::Register { .. } => "register",
                TournamentCommand::Report { .. } => "report",
                TournamentCommand::Count => "count",
                TournamentCommand::Standings => "standings",
                TournamentCommand::Pairings => "pairings",
                TournamentCommand::Reset { .. } => "reset",
            },
        }
    }
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No subcommand given.
    MissingCommand,
    /// Unrecognized subcommand.
    UnrecognizedCommand(String),
    /// Required positional argument missing.
    MissingArgument(&'static str),
    /// Player ID is not an integer.
    InvalidPlayerId(String),
    /// Extra arguments after a complete command.
    UnexpectedArguments(Vec<String>),
    /// Argument parser failure.
    Arguments(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCommand => write!(f, "No command given. Run with --help for usage"),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Run with --help for usage",
                cmd
            ),
            Self::MissingArgument(what) => write!(f, "Missing required argument <{}>", what),
            Self::InvalidPlayerId(value) => write!(
                f,
                "Invalid player ID '{}'. Must be an integer (e.g., 'report 3 7')",
                value
            ),
            Self::UnexpectedArguments(args) => {
                write!(f, "Unexpected arguments: {}", args.join(" "))
            }
            Self::Arguments(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse the subcommand and its arguments.
///
/// Global flags (`--db-url`, `--json`) must already have been consumed.
///
/// # Examples
///
/// ```ignore
/// let pargs = Arguments::from_vec(vec!["report".into(), "3".into(), "7".into()]);
/// assert_eq!(
///     parse_command(pargs),
///     Ok(Command::Tournament(TournamentCommand::Report { winner: 3, loser: 7 }))
/// );
/// ```
pub fn parse_command(mut pargs: Arguments) -> Result<Command, ParseError> {
    let subcommand = pargs
        .subcommand()
        .map_err(|e| ParseError::Arguments(e.to_string()))?;

    let command = match subcommand.as_deref() {
        None => return Err(ParseError::MissingCommand),
        Some("init") => Command::Schema(SchemaCommand::Init),
        Some("teardown") => Command::Schema(SchemaCommand::Teardown),
        Some("register") => {
            // Names may contain spaces, so take every remaining word
            let words = remaining(pargs);
            if words.is_empty() {
                return Err(ParseError::MissingArgument("NAME"));
            }
            return Ok(Command::Tournament(TournamentCommand::Register {
                name: words.join(" "),
            }));
        }
        Some("report") => {
            let winner = parse_player_id(&mut pargs, "WINNER")?;
            let loser = parse_player_id(&mut pargs, "LOSER")?;
            Command::Tournament(TournamentCommand::Report { winner, loser })
        }
        Some("count") => Command::Tournament(TournamentCommand::Count),
        Some("standings") => Command::Tournament(TournamentCommand::Standings),
        Some("pairings") => Command::Tournament(TournamentCommand::Pairings),
        Some("reset") => Command::Tournament(TournamentCommand::Reset {
            players: pargs.contains("--players"),
        }),
        Some(other) => return Err(ParseError::UnrecognizedCommand(other.to_string())),
    };

    let extra = remaining(pargs);
    if !extra.is_empty() {
        return Err(ParseError::UnexpectedArguments(extra));
    }

    Ok(command)
}

fn parse_player_id(pargs: &mut Arguments, what: &'static str) -> Result<PlayerId, ParseError> {
    let raw: String = pargs
        .opt_free_from_str()
        .map_err(|e| ParseError::Arguments(e.to_string()))?
        .ok_or(ParseError::MissingArgument(what))?;
    raw.parse().map_err(|_| ParseError::InvalidPlayerId(raw))
}

fn remaining(pargs: Arguments) -> Vec<String> {
    pargs
        .finish()
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

/// Result of a command, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Schema change finished.
    Done(&'static str),
    /// Player registered with this ID.
    Registered(PlayerId),
    /// Registered player count.
    Count(i64),
    /// Current standings.
    Standings(Vec<StandingRow>),
    /// Next-round pairings.
    Pairings(Vec<Pairing>),
    /// Rows removed by a reset.
    Reset { matches: u64, players: Option<u64> },
}

impl Outcome {
    /// Render for stdout in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => self.render_json(),
        }
    }

    fn render_text(&self) -> String {
        match self {
            Self::Done(message) => message.to_string(),
            Self::Registered(id) => format!("Registered player {}", id),
            Self::Count(count) => count.to_string(),
            Self::Standings(rows) => render_standings(rows).trim_end().to_string(),
            Self::Pairings(pairings) if pairings.is_empty() => {
                "No pairings: no players registered".to_string()
            }
            Self::Pairings(pairings) => render_pairings(pairings).trim_end().to_string(),
            Self::Reset { matches, players } => match players {
                Some(players) => format!("Deleted {} match(es) and {} player(s)", matches, players),
                None => format!("Deleted {} match(es)", matches),
            },
        }
    }

    fn render_json(&self) -> Result<String, serde_json::Error> {
        let value = match self {
            Self::Done(message) => json!({ "status": message }),
            Self::Registered(id) => json!({ "id": id }),
            Self::Count(count) => json!({ "players": count }),
            Self::Standings(rows) => serde_json::to_value(rows)?,
            Self::Pairings(pairings) => serde_json::to_value(pairings)?,
            Self::Reset { matches, players } => json!({
                "matches_deleted": matches,
                "players_deleted": players,
            }),
        };
        serde_json::to_string_pretty(&value)
    }
}

/// Run a tournament command against the manager.
pub async fn execute(
    command: TournamentCommand,
    manager: &TournamentManager,
) -> TournamentResult<Outcome> {
    let outcome = match command {
        TournamentCommand::Register { name } => {
            let id = manager.register_player(&name).await?;
            Outcome::Registered(id)
        }
        TournamentCommand::Report { winner, loser } => {
            manager.report_match(winner, loser).await?;
            Outcome::Done("Match recorded")
        }
        TournamentCommand::Count => Outcome::Count(manager.count_players().await?),
        TournamentCommand::Standings => Outcome::Standings(manager.player_standings().await?),
        TournamentCommand::Pairings => Outcome::Pairings(manager.swiss_pairings().await?),
        TournamentCommand::Reset { players } => {
            let matches = manager.delete_matches().await?;
            let players = if players {
                Some(manager.delete_players().await?)
            } else {
                None
            };
            Outcome::Reset { matches, players }
        }
    };
    Ok(outcome)
}

//! Tournament, its sport, and the engine's error type.

use crate::models::team::TeamId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Identifier of a sport (owned by the sport catalogue, not by this crate).
pub type SportId = u64;

/// Identifier of the user who created a tournament or team.
pub type UserId = u64;

/// Coarse classification of a [`FixtureError`], used to pick a response status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    EmptyRoster,
    DataIntegrity,
}

/// Errors that can occur during fixture operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FixtureError {
    #[error("Tournament not found with id: {0}")]
    TournamentNotFound(TournamentId),
    #[error("Round not found with id: {0}")]
    RoundNotFound(u64),
    #[error("Match not found with id: {0}")]
    MatchNotFound(u64),
    #[error("Team not found with id: {0}")]
    TeamNotFound(TeamId),
    /// No teams registered when a fixture was requested.
    #[error("No teams registered for tournament: {0}")]
    EmptyRoster(TournamentId),
    #[error("Round with value {0} already exists for this tournament")]
    RoundValueExists(u32),
    #[error("Invalid round value: {0} (must be at least 1)")]
    InvalidRoundValue(u32),
    /// The round feeding the requested one still has unfinished matches.
    #[error("Round '{0}' is not complete")]
    IncompleteRound(String),
    #[error("Next round not found: '{0}' is the final round")]
    NoNextRound(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("Invalid match result: {0}")]
    InvalidResult(String),
    /// A round reported complete but produced no winners.
    #[error("No winners found in round '{0}'")]
    NoWinners(String),
    #[error("Roster import failed: {0}")]
    Roster(String),
}

impl FixtureError {
    pub fn kind(&self) -> ErrorKind {
        use FixtureError::*;
        match self {
            TournamentNotFound(_) | RoundNotFound(_) | MatchNotFound(_) | TeamNotFound(_) => {
                ErrorKind::NotFound
            }
            EmptyRoster(_) => ErrorKind::EmptyRoster,
            NoWinners(_) => ErrorKind::DataIntegrity,
            RoundValueExists(_) | InvalidRoundValue(_) | IncompleteRound(_) | NoNextRound(_)
            | InvalidState(_) | InvalidResult(_) | Roster(_) => ErrorKind::InvalidState,
        }
    }
}

/// The sport a tournament is played in.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Sport {
    pub id: SportId,
    pub name: String,
}

/// Input for registering a tournament.
#[derive(Clone, Debug, Deserialize)]
pub struct NewTournament {
    pub name: String,
    pub sport: Sport,
    pub created_by: UserId,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// A tournament as the fixture engine sees it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub sport: Sport,
    pub created_by: UserId,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Winner of the final, set once the final round is complete.
    pub champion: Option<TeamId>,
    /// Second-ranked team of the final.
    pub runner_up: Option<TeamId>,
    /// True once a fixture has been generated for this tournament.
    pub fixture_generated: bool,
}

impl Tournament {
    /// Validate the input and build a tournament with no fixture.
    pub fn new(input: NewTournament) -> Result<Self, FixtureError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(FixtureError::InvalidState(
                "Tournament name must not be empty".to_string(),
            ));
        }
        if let (Some(start), Some(end)) = (input.start_date, input.end_date) {
            if end < start {
                return Err(FixtureError::InvalidState(format!(
                    "Tournament ends ({end}) before it starts ({start})"
                )));
            }
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            sport: input.sport,
            created_by: input.created_by,
            start_date: input.start_date,
            end_date: input.end_date,
            champion: None,
            runner_up: None,
            fixture_generated: false,
        })
    }

    /// Clear champion and runner-up.
    pub fn clear_podium(&mut self) {
        self.champion = None;
        self.runner_up = None;
    }
}

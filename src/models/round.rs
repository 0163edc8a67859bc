//! Round of a fixture and the pairing type chosen for it.

use crate::logic::naming::{expected_team_count, round_name};
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a round, allocated by the store.
pub type RoundId = u64;

/// How a round's matches are paired.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundType {
    Knockout,
    RoundRobin,
}

impl RoundType {
    pub const ALL: [RoundType; 2] = [RoundType::Knockout, RoundType::RoundRobin];
}

/// A round not yet persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewRound {
    pub tournament_id: TournamentId,
    pub round_value: u32,
    pub round_type: Option<RoundType>,
}

/// One round of a tournament. `round_value` 1 is the final, 2 the semi-final, and so on.
///
/// The name is derived from the value and recomputed on every change to it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub tournament_id: TournamentId,
    round_value: u32,
    round_name: String,
    /// `None` until a type is selected.
    #[serde(rename = "type")]
    pub round_type: Option<RoundType>,
}

impl Round {
    pub fn new(id: RoundId, new: NewRound) -> Self {
        Self {
            id,
            tournament_id: new.tournament_id,
            round_value: new.round_value,
            round_name: round_name(new.round_value),
            round_type: new.round_type,
        }
    }

    pub fn round_value(&self) -> u32 {
        self.round_value
    }

    pub fn round_name(&self) -> &str {
        &self.round_name
    }

    pub fn set_round_value(&mut self, round_value: u32) {
        self.round_value = round_value;
        self.round_name = round_name(round_value);
    }

    /// Teams a full bracket would field in this round (`2^round_value`).
    pub fn expected_team_count(&self) -> Option<u64> {
        expected_team_count(self.round_value)
    }

    pub fn is_final(&self) -> bool {
        self.round_value == 1
    }
}

//! Match between two teams (or a bye), its status, and proposed pairings.

use crate::models::round::RoundId;
use crate::models::team::TeamId;
use crate::models::tournament::{SportId, TournamentId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Unique identifier for a match, allocated by the store in creation order.
pub type MatchId = u64;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

/// A pairing produced by a generator, not yet persisted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchProposal {
    pub team_1: TeamId,
    /// `None` is a bye.
    pub team_2: Option<TeamId>,
    pub status: MatchStatus,
    pub winner: Option<TeamId>,
}

impl MatchProposal {
    pub fn scheduled(team_1: TeamId, team_2: TeamId) -> Self {
        Self {
            team_1,
            team_2: Some(team_2),
            status: MatchStatus::Scheduled,
            winner: None,
        }
    }

    /// A walkover: already completed with `team` as winner.
    pub fn bye(team: TeamId) -> Self {
        Self {
            team_1: team,
            team_2: None,
            status: MatchStatus::Completed,
            winner: Some(team),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.team_2.is_none()
    }
}

/// A persisted match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub sport_id: SportId,
    pub round_id: RoundId,
    pub team_1: TeamId,
    pub team_2: Option<TeamId>,
    pub status: MatchStatus,
    pub winner: Option<TeamId>,
    pub team_1_score: Option<u32>,
    pub team_2_score: Option<u32>,
    pub venue: Option<String>,
    pub scheduled_time: Option<NaiveDateTime>,
}

impl GameMatch {
    pub fn from_proposal(
        id: MatchId,
        tournament_id: TournamentId,
        sport_id: SportId,
        round_id: RoundId,
        proposal: MatchProposal,
    ) -> Self {
        Self {
            id,
            tournament_id,
            sport_id,
            round_id,
            team_1: proposal.team_1,
            team_2: proposal.team_2,
            status: proposal.status,
            winner: proposal.winner,
            team_1_score: None,
            team_2_score: None,
            venue: None,
            scheduled_time: None,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.team_2.is_none()
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.team_1 == team || self.team_2 == Some(team)
    }

    /// Completed and carrying a winner.
    pub fn is_decided(&self) -> bool {
        self.status == MatchStatus::Completed && self.winner.is_some()
    }

    /// Both teams, skipping the empty bye slot.
    pub fn teams(&self) -> impl Iterator<Item = TeamId> {
        std::iter::once(self.team_1).chain(self.team_2)
    }
}

/// Changes reported for a match. Absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MatchUpdate {
    #[serde(default)]
    pub status: Option<MatchStatus>,
    #[serde(default)]
    pub winner: Option<TeamId>,
    #[serde(default)]
    pub team_1_score: Option<u32>,
    #[serde(default)]
    pub team_2_score: Option<u32>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub scheduled_time: Option<NaiveDateTime>,
}

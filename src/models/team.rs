//! Team and the registered/placeholder distinction.

use crate::models::tournament::{SportId, TournamentId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Whether a team is a real registrant or a bracket placeholder.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TeamKind {
    #[default]
    Registered,
    /// Synthetic opponent created to fill the round with this value.
    Dummy { round_value: u32 },
}

/// A team taking part in (or registered for) a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub sport_id: SportId,
    pub created_by: UserId,
    pub tournament_id: Option<TournamentId>,
    #[serde(flatten)]
    pub kind: TeamKind,
}

impl Team {
    /// A registered team entered into `tournament_id`.
    pub fn registered(
        name: impl Into<String>,
        sport_id: SportId,
        created_by: UserId,
        tournament_id: TournamentId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sport_id,
            created_by,
            tournament_id: Some(tournament_id),
            kind: TeamKind::Registered,
        }
    }

    /// A placeholder team owned by round `round_value` of `tournament_id`.
    pub fn dummy(
        name: impl Into<String>,
        sport_id: SportId,
        created_by: UserId,
        tournament_id: TournamentId,
        round_value: u32,
    ) -> Self {
        Self {
            kind: TeamKind::Dummy { round_value },
            ..Self::registered(name, sport_id, created_by, tournament_id)
        }
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self.kind, TeamKind::Dummy { .. })
    }

    /// The round a placeholder was created for; `None` for registered teams.
    pub fn dummy_round(&self) -> Option<u32> {
        match self.kind {
            TeamKind::Dummy { round_value } => Some(round_value),
            TeamKind::Registered => None,
        }
    }
}

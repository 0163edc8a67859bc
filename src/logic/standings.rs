//! Per-team records inside one round, and the ranking used to pick who advances.

use crate::models::{GameMatch, MatchStatus, TeamId};
use serde::Serialize;

/// A team's record across the matches of one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
}

impl Standing {
    fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            played: 0,
            wins: 0,
            losses: 0,
            points_for: 0,
            points_against: 0,
        }
    }

    pub fn score_difference(&self) -> i64 {
        i64::from(self.points_for) - i64::from(self.points_against)
    }
}

/// Rank every team appearing in `matches`.
///
/// Only completed matches with a winner count. Order: wins, then score difference,
/// then points scored, then first appearance in the match list.
pub fn compute_standings(matches: &[GameMatch]) -> Vec<Standing> {
    let mut table: Vec<Standing> = Vec::new();
    for m in matches {
        for team in m.teams() {
            if !table.iter().any(|s| s.team_id == team) {
                table.push(Standing::new(team));
            }
        }
    }

    for m in matches {
        if m.status != MatchStatus::Completed {
            continue;
        }
        let Some(winner) = m.winner else {
            continue;
        };
        let sides = [
            (Some(m.team_1), m.team_1_score, m.team_2_score),
            (m.team_2, m.team_2_score, m.team_1_score),
        ];
        for (team, own, other) in sides {
            let Some(team) = team else {
                continue;
            };
            if let Some(s) = table.iter_mut().find(|s| s.team_id == team) {
                s.played += 1;
                if team == winner {
                    s.wins += 1;
                } else {
                    s.losses += 1;
                }
                s.points_for += own.unwrap_or(0);
                s.points_against += other.unwrap_or(0);
            }
        }
    }

    // Stable sort keeps first appearance as the last tie-break.
    table.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(b.score_difference().cmp(&a.score_difference()))
            .then(b.points_for.cmp(&a.points_for))
    });
    table
}

/// The best `count` teams of a round, in rank order. Teams without a win never advance.
pub fn top_teams(matches: &[GameMatch], count: usize) -> Vec<TeamId> {
    compute_standings(matches)
        .into_iter()
        .filter(|s| s.wins > 0)
        .take(count)
        .map(|s| s.team_id)
        .collect()
}

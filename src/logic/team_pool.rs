//! Which teams play a round: the roster for the first round, the previous round's
//! winners for every later one.

use crate::logic::naming::{expected_team_count, upscale_to_power_of_two};
use crate::logic::standings::top_teams;
use crate::models::{FixtureError, GameMatch, MatchStatus, Round, RoundType, Team, TeamId};
use crate::store::{FixtureStore, RosterProvider};
use serde::Serialize;

/// Where a pool came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolSource {
    Roster,
    Winners { round_value: u32 },
}

/// The teams taking part in one round and the bracket they are padded to.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TeamPool {
    pub teams: Vec<TeamId>,
    /// Next power of two at or above the team count.
    pub bracket_size: usize,
    pub source: PoolSource,
}

impl TeamPool {
    fn new(teams: Vec<TeamId>, source: PoolSource) -> Self {
        Self {
            bracket_size: upscale_to_power_of_two(teams.len()),
            teams,
            source,
        }
    }

    /// Empty slots in the bracket; the generator realises these as byes, not as extra teams.
    pub fn shortfall(&self) -> usize {
        self.bracket_size - self.teams.len()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Pool for the first (highest-value) round.
///
/// Registered teams, plus placeholders created for exactly this round. The final
/// (round value 1) never takes placeholders.
pub fn first_round_pool(roster: &[Team], round_value: u32) -> TeamPool {
    let teams = roster
        .iter()
        .filter(|t| match t.dummy_round() {
            None => true,
            Some(v) => round_value != 1 && v == round_value,
        })
        .map(|t| t.id)
        .collect();
    TeamPool::new(teams, PoolSource::Roster)
}

/// Teams that advance out of `previous` into the round with value `next_round_value`.
///
/// Knockout: every completed match's winner, in match order. Round robin: the top
/// `2^next_round_value` teams of the standings. Fails if nothing qualifies.
pub fn extract_winners(
    previous: &Round,
    matches: &[GameMatch],
    next_round_value: u32,
) -> Result<Vec<TeamId>, FixtureError> {
    let winners: Vec<TeamId> = match previous.round_type {
        Some(RoundType::RoundRobin) => {
            let slots = expected_team_count(next_round_value)
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(usize::MAX);
            top_teams(matches, slots)
        }
        Some(RoundType::Knockout) | None => {
            let mut winners = Vec::new();
            for w in matches.iter().filter(|m| m.is_decided()).filter_map(|m| m.winner) {
                if !winners.contains(&w) {
                    winners.push(w);
                }
            }
            winners
        }
    };
    if winners.is_empty() {
        log::warn!("Round {} ({}) produced no winners", previous.id, previous.round_name());
        return Err(FixtureError::NoWinners(previous.round_name().to_string()));
    }
    Ok(winners)
}

/// Pool fed by the winners of a finished round.
///
/// Every match of `previous` must be completed with a winner (or cancelled, when
/// cancellations are terminal).
pub fn winners_pool(
    previous: &Round,
    matches: &[GameMatch],
    next_round_value: u32,
    cancelled_terminal: bool,
) -> Result<TeamPool, FixtureError> {
    let decided = matches.iter().all(|m| {
        m.is_decided() || (cancelled_terminal && m.status == MatchStatus::Cancelled)
    });
    if matches.is_empty() || !decided {
        return Err(FixtureError::IncompleteRound(previous.round_name().to_string()));
    }
    let winners = extract_winners(previous, matches, next_round_value)?;
    Ok(TeamPool::new(
        winners,
        PoolSource::Winners { round_value: previous.round_value() },
    ))
}

/// Resolve the pool for `round` from what is stored.
///
/// The highest-value round of the tournament draws on the roster; any other round
/// needs the round directly above it (`round_value + 1`) to be complete.
pub fn resolve_pool<S>(store: &S, round: &Round, cancelled_terminal: bool) -> Result<TeamPool, FixtureError>
where
    S: FixtureStore + RosterProvider,
{
    let max_value = store
        .rounds_for_tournament(round.tournament_id)
        .iter()
        .map(Round::round_value)
        .max()
        .unwrap_or(round.round_value());

    if round.round_value() >= max_value {
        let roster = store.teams_for_tournament(round.tournament_id);
        let pool = first_round_pool(&roster, round.round_value());
        log::debug!(
            "Round {} draws {} teams from the roster (bracket {}, {} byes)",
            round.id,
            pool.len(),
            pool.bracket_size,
            pool.shortfall()
        );
        return Ok(pool);
    }

    let previous = store
        .round_by_value(round.tournament_id, round.round_value() + 1)
        .ok_or_else(|| {
            FixtureError::InvalidState(format!(
                "Previous round (value {}) not found",
                round.round_value() + 1
            ))
        })?;
    let matches = store.matches_for_round(previous.id);
    winners_pool(&previous, &matches, round.round_value(), cancelled_terminal)
}

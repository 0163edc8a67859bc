//! Round lifecycle: create, select a type and generate matches, check completion, advance.
//!
//! A round moves from no matches and no type, to a type with persisted matches, to
//! complete once every match is terminal. Generating a round always replaces its
//! matches wholesale.

use crate::config::EngineConfig;
use crate::logic::results::refresh_podium;
use crate::logic::team_pool::{extract_winners, resolve_pool};
use crate::models::{
    FixtureError, GameMatch, MatchStatus, NewRound, Round, RoundId, RoundType, TeamId,
    TournamentId,
};
use crate::store::{FixtureStore, RosterProvider};
use rand::RngCore;

/// True when the round has matches and all of them are finished.
///
/// Cancelled matches only count as finished when `cancelled_terminal` is set.
pub fn is_round_complete(matches: &[GameMatch], cancelled_terminal: bool) -> bool {
    !matches.is_empty()
        && matches.iter().all(|m| match m.status {
            MatchStatus::Completed => true,
            MatchStatus::Cancelled => cancelled_terminal,
            MatchStatus::Scheduled | MatchStatus::Ongoing => false,
        })
}

pub(crate) fn load_round<S: FixtureStore>(store: &S, round_id: RoundId) -> Result<Round, FixtureError> {
    store.round(round_id).ok_or(FixtureError::RoundNotFound(round_id))
}

/// Create round `round_value` for a tournament; with a type, its matches are generated too.
pub(crate) fn create_round<S>(
    store: &mut S,
    rng: &mut dyn RngCore,
    config: &EngineConfig,
    tournament_id: TournamentId,
    round_value: u32,
    round_type: Option<RoundType>,
) -> Result<(Round, Vec<GameMatch>), FixtureError>
where
    S: FixtureStore + RosterProvider,
{
    if store.tournament(tournament_id).is_none() {
        return Err(FixtureError::TournamentNotFound(tournament_id));
    }
    if round_value < 1 {
        return Err(FixtureError::InvalidRoundValue(round_value));
    }
    if store.round_by_value(tournament_id, round_value).is_some() {
        return Err(FixtureError::RoundValueExists(round_value));
    }

    let round = store.insert_round(NewRound {
        tournament_id,
        round_value,
        round_type: None,
    });
    log::info!("Created round {} ({}) for tournament {}", round.id, round.round_name(), tournament_id);

    match round_type {
        Some(ty) => {
            let matches = select_type_and_generate(store, rng, config, round.id, ty)?;
            Ok((load_round(store, round.id)?, matches))
        }
        None => Ok((round, Vec::new())),
    }
}

/// Set the round's type and (re)generate its matches from the resolved team pool.
///
/// Existing matches of the round are deleted first, so calling this again reshuffles.
pub(crate) fn select_type_and_generate<S>(
    store: &mut S,
    rng: &mut dyn RngCore,
    config: &EngineConfig,
    round_id: RoundId,
    round_type: RoundType,
) -> Result<Vec<GameMatch>, FixtureError>
where
    S: FixtureStore + RosterProvider,
{
    let round = load_round(store, round_id)?;
    let pool = resolve_pool(store, &round, config.cancelled_counts_as_complete)?;
    regenerate(store, rng, config, round, round_type, &pool.teams)
}

/// Advance from a complete round into the round below it, seeded with its winners.
///
/// Returns the next round and its freshly generated matches.
pub(crate) fn advance<S>(
    store: &mut S,
    rng: &mut dyn RngCore,
    config: &EngineConfig,
    current_round_id: RoundId,
    next_type: RoundType,
) -> Result<(Round, Vec<GameMatch>), FixtureError>
where
    S: FixtureStore,
{
    let current = load_round(store, current_round_id)?;
    let matches = store.matches_for_round(current.id);
    if !is_round_complete(&matches, config.cancelled_counts_as_complete) {
        log::warn!("Refusing to advance from incomplete round {}", current.id);
        return Err(FixtureError::IncompleteRound(current.round_name().to_string()));
    }

    let next = current
        .round_value()
        .checked_sub(1)
        .filter(|v| *v >= 1)
        .and_then(|v| store.round_by_value(current.tournament_id, v))
        .ok_or_else(|| FixtureError::NoNextRound(current.round_name().to_string()))?;

    let winners = extract_winners(&current, &matches, next.round_value())?;
    log::info!(
        "Advancing {} winners from round {} into round {} ({})",
        winners.len(),
        current.id,
        next.id,
        next.round_name()
    );
    let next_id = next.id;
    let generated = regenerate(store, rng, config, next, next_type, &winners)?;
    Ok((load_round(store, next_id)?, generated))
}

/// Replace the round's matches with a fresh pairing of `teams`.
///
/// A regenerated final also recomputes the podium: a lone bye crowns its team,
/// anything still to play clears it.
fn regenerate<S: FixtureStore>(
    store: &mut S,
    rng: &mut dyn RngCore,
    config: &EngineConfig,
    mut round: Round,
    round_type: RoundType,
    teams: &[TeamId],
) -> Result<Vec<GameMatch>, FixtureError> {
    let tournament = store
        .tournament(round.tournament_id)
        .ok_or(FixtureError::TournamentNotFound(round.tournament_id))?;

    if let Some(later) = round
        .round_value()
        .checked_sub(1)
        .and_then(|v| store.round_by_value(round.tournament_id, v))
    {
        if !store.matches_for_round(later.id).is_empty() {
            return Err(FixtureError::InvalidState(format!(
                "Cannot regenerate {}: {} already has matches",
                round.round_name(),
                later.round_name()
            )));
        }
    }
    if teams.is_empty() {
        return Err(FixtureError::InvalidState(format!(
            "No teams available for {}",
            round.round_name()
        )));
    }

    let removed = store.delete_matches_for_round(round.id);
    if removed > 0 {
        log::debug!("Deleted {} existing matches for round {}", removed, round.id);
    }

    round.round_type = Some(round_type);
    store.save_round(&round);

    let proposals = round_type.generate(teams, rng);
    let matches = store.insert_matches(&round, tournament.sport.id, proposals);
    log::info!(
        "Generated {} {:?} matches for round {} ({}) from {} teams",
        matches.len(),
        round_type,
        round.id,
        round.round_name(),
        teams.len()
    );
    if round.is_final() {
        refresh_podium(store, round.tournament_id, round.id, config.cancelled_counts_as_complete)?;
    }
    Ok(matches)
}

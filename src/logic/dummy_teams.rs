//! Placeholder teams: creating them to pad a round, and removing them together with
//! the matches that reference them.
//!
//! Each placeholder is tagged with the round value it was created for, so cleanup
//! never depends on team names. Matches are always deleted before the teams they
//! reference.

use crate::logic::naming::round_name;
use crate::logic::progression::load_round;
use crate::logic::team_pool::first_round_pool;
use crate::models::{FixtureError, Round, RoundId, Team, TeamId, TournamentId};
use crate::store::{FixtureStore, RosterProvider};

/// Create one placeholder for round `round_value` of the tournament.
pub(crate) fn create_dummy_team<S: FixtureStore>(
    store: &mut S,
    tournament_id: TournamentId,
    round_value: u32,
    name: Option<String>,
) -> Result<Team, FixtureError> {
    let tournament = store
        .tournament(tournament_id)
        .ok_or(FixtureError::TournamentNotFound(tournament_id))?;
    if round_value < 1 {
        return Err(FixtureError::InvalidRoundValue(round_value));
    }
    let name = match name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
        Some(n) => n,
        None => {
            let existing = store.dummy_teams_for_round(tournament_id, round_value).len();
            format!("Dummy {} ({})", existing + 1, round_name(round_value))
        }
    };
    let team = Team::dummy(
        name,
        tournament.sport.id,
        tournament.created_by,
        tournament_id,
        round_value,
    );
    store.save_team(&team);
    log::info!("Created dummy team {} for round {} of tournament {}", team.id, round_value, tournament_id);
    Ok(team)
}

/// Top the round's pool up to the next power of two with placeholders.
///
/// Only valid before the round has matches; the final never takes placeholders.
pub(crate) fn pad_with_dummy_teams<S>(
    store: &mut S,
    tournament_id: TournamentId,
    round_value: u32,
) -> Result<Vec<Team>, FixtureError>
where
    S: FixtureStore + RosterProvider,
{
    if round_value == 1 {
        return Err(FixtureError::InvalidState(
            "The final cannot be padded with dummy teams".to_string(),
        ));
    }
    if let Some(round) = store.round_by_value(tournament_id, round_value) {
        if !store.matches_for_round(round.id).is_empty() {
            return Err(FixtureError::InvalidState(format!(
                "{} already has matches",
                round.round_name()
            )));
        }
    }
    let roster = store.teams_for_tournament(tournament_id);
    let pool = first_round_pool(&roster, round_value);
    let mut created = Vec::with_capacity(pool.shortfall());
    for _ in 0..pool.shortfall() {
        created.push(create_dummy_team(store, tournament_id, round_value, None)?);
    }
    Ok(created)
}

/// Delete the round's matches, then the placeholders it used or was created for.
///
/// Placeholders still referenced by another round's matches are kept. Returns the
/// number of teams removed.
pub(crate) fn delete_dummy_teams_for_round<S: FixtureStore>(
    store: &mut S,
    round_id: RoundId,
) -> Result<usize, FixtureError> {
    let round = load_round(store, round_id)?;
    Ok(purge_round(store, &round))
}

/// Same as [`delete_dummy_teams_for_round`], addressed by tournament and round value.
///
/// Works even when no round row exists for the value, in which case only the
/// tagged placeholders are removed.
pub(crate) fn delete_dummy_teams_for_round_value<S: FixtureStore>(
    store: &mut S,
    tournament_id: TournamentId,
    round_value: u32,
) -> Result<usize, FixtureError> {
    if store.tournament(tournament_id).is_none() {
        return Err(FixtureError::TournamentNotFound(tournament_id));
    }
    match store.round_by_value(tournament_id, round_value) {
        Some(round) => Ok(purge_round(store, &round)),
        None => {
            let ids: Vec<TeamId> = store
                .dummy_teams_for_round(tournament_id, round_value)
                .into_iter()
                .map(|t| t.id)
                .collect();
            let ids = unreferenced(store, tournament_id, None, ids);
            store.delete_teams(&ids);
            Ok(ids.len())
        }
    }
}

/// Remove a round: its matches, its placeholders, then the round itself.
pub(crate) fn delete_round<S: FixtureStore>(store: &mut S, round_id: RoundId) -> Result<(), FixtureError> {
    let round = load_round(store, round_id)?;
    if let Some(later) = round
        .round_value()
        .checked_sub(1)
        .and_then(|v| store.round_by_value(round.tournament_id, v))
    {
        if !store.matches_for_round(later.id).is_empty() {
            return Err(FixtureError::InvalidState(format!(
                "Cannot delete {}: {} already has matches",
                round.round_name(),
                later.round_name()
            )));
        }
    }
    let removed = purge_round(store, &round);
    store.delete_round(round.id);
    if round.is_final() {
        if let Some(mut tournament) = store.tournament(round.tournament_id) {
            tournament.clear_podium();
            store.save_tournament(&tournament);
        }
    }
    log::info!("Deleted round {} ({}) and {} dummy teams", round.id, round.round_name(), removed);
    Ok(())
}

/// Remove every round, match and placeholder of a tournament and clear its fixture flag.
pub(crate) fn reset_fixture<S>(store: &mut S, tournament_id: TournamentId) -> Result<(), FixtureError>
where
    S: FixtureStore + RosterProvider,
{
    let mut tournament = store
        .tournament(tournament_id)
        .ok_or(FixtureError::TournamentNotFound(tournament_id))?;
    let rounds = store.rounds_for_tournament(tournament_id);
    for round in &rounds {
        store.delete_matches_for_round(round.id);
    }
    let dummies: Vec<TeamId> = store
        .teams_for_tournament(tournament_id)
        .into_iter()
        .filter(Team::is_dummy)
        .map(|t| t.id)
        .collect();
    store.delete_teams(&dummies);
    for round in &rounds {
        store.delete_round(round.id);
    }
    tournament.fixture_generated = false;
    tournament.clear_podium();
    store.save_tournament(&tournament);
    log::info!(
        "Reset fixture of tournament {}: {} rounds, {} dummy teams removed",
        tournament_id,
        rounds.len(),
        dummies.len()
    );
    Ok(())
}

fn purge_round<S: FixtureStore>(store: &mut S, round: &Round) -> usize {
    let matches = store.matches_for_round(round.id);
    let mut candidates: Vec<TeamId> = store
        .dummy_teams_for_round(round.tournament_id, round.round_value())
        .into_iter()
        .map(|t| t.id)
        .collect();
    for team in matches.iter().flat_map(|m| m.teams()) {
        if !candidates.contains(&team) && store.team(team).is_some_and(|t| t.is_dummy()) {
            candidates.push(team);
        }
    }

    store.delete_matches_for_round(round.id);
    let ids = unreferenced(store, round.tournament_id, Some(round.id), candidates);
    store.delete_teams(&ids);
    ids.len()
}

/// Drop candidates that still appear in matches of rounds other than `except`.
fn unreferenced<S: FixtureStore>(
    store: &S,
    tournament_id: TournamentId,
    except: Option<RoundId>,
    candidates: Vec<TeamId>,
) -> Vec<TeamId> {
    let others: Vec<_> = store
        .rounds_for_tournament(tournament_id)
        .into_iter()
        .filter(|r| Some(r.id) != except)
        .flat_map(|r| store.matches_for_round(r.id))
        .collect();
    candidates
        .into_iter()
        .filter(|id| !others.iter().any(|m| m.involves(*id) || m.winner == Some(*id)))
        .collect()
}

//! Reporting match results, and crowning champion and runner-up when the final completes.

use crate::logic::progression::{is_round_complete, load_round};
use crate::logic::standings::compute_standings;
use crate::models::{
    FixtureError, GameMatch, MatchId, MatchStatus, MatchUpdate, RoundId, TournamentId,
};
use crate::store::FixtureStore;

/// Apply `update` to a match after validating it.
///
/// The winner must be one of the two teams, a completed match needs a winner
/// (draws are not modelled), and byes cannot be edited.
pub(crate) fn record_result<S: FixtureStore>(
    store: &mut S,
    cancelled_terminal: bool,
    match_id: MatchId,
    update: MatchUpdate,
) -> Result<GameMatch, FixtureError> {
    let mut game = store
        .match_by_id(match_id)
        .ok_or(FixtureError::MatchNotFound(match_id))?;
    if game.is_bye() {
        return Err(FixtureError::InvalidResult(
            "A bye is decided when it is created".to_string(),
        ));
    }

    if let Some(winner) = update.winner {
        if !game.involves(winner) {
            return Err(FixtureError::InvalidResult(format!(
                "Team {winner} does not play in match {match_id}"
            )));
        }
        game.winner = Some(winner);
    }
    if let Some(status) = update.status {
        game.status = status;
    }
    match game.status {
        MatchStatus::Completed if game.winner.is_none() => {
            return Err(FixtureError::InvalidResult(
                "A completed match needs a winner".to_string(),
            ));
        }
        MatchStatus::Scheduled | MatchStatus::Ongoing | MatchStatus::Cancelled => {
            game.winner = None;
        }
        MatchStatus::Completed => {}
    }
    if update.team_1_score.is_some() {
        game.team_1_score = update.team_1_score;
    }
    if update.team_2_score.is_some() {
        game.team_2_score = update.team_2_score;
    }
    if update.venue.is_some() {
        game.venue = update.venue;
    }
    if update.scheduled_time.is_some() {
        game.scheduled_time = update.scheduled_time;
    }

    store.save_match(&game);
    log::info!("Match {} is now {:?} (winner: {:?})", game.id, game.status, game.winner);

    let round = load_round(store, game.round_id)?;
    if round.is_final() {
        refresh_podium(store, game.tournament_id, round.id, cancelled_terminal)?;
    }
    Ok(game)
}

/// Set or clear champion and runner-up from the final's standings.
pub(crate) fn refresh_podium<S: FixtureStore>(
    store: &mut S,
    tournament_id: TournamentId,
    final_round_id: RoundId,
    cancelled_terminal: bool,
) -> Result<(), FixtureError> {
    let mut tournament = store
        .tournament(tournament_id)
        .ok_or(FixtureError::TournamentNotFound(tournament_id))?;
    let matches = store.matches_for_round(final_round_id);

    tournament.clear_podium();
    if is_round_complete(&matches, cancelled_terminal) {
        let standings = compute_standings(&matches);
        let mut ranked = standings.iter().filter(|s| s.wins > 0 || s.played > 0);
        tournament.champion = ranked.next().filter(|s| s.wins > 0).map(|s| s.team_id);
        if tournament.champion.is_some() {
            tournament.runner_up = ranked.next().map(|s| s.team_id);
        }
        log::info!(
            "Tournament {} final decided: champion {:?}, runner-up {:?}",
            tournament.id,
            tournament.champion,
            tournament.runner_up
        );
    }
    store.save_tournament(&tournament);
    Ok(())
}

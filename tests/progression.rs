//! Round lifecycle: completion, type selection and advancing winners.

mod common;

use common::{complete_round, engine, participants, round, tournament_with_teams, win};
use fixture_engine::{
    EngineConfig, ErrorKind, FixtureEngine, FixtureError, FixtureStore, GameMatch, InMemoryStore,
    MatchStatus, MatchUpdate, RoundConfig, RoundType, TeamId,
};
use std::collections::BTreeSet;

#[test]
fn round_without_matches_is_not_complete() {
    let mut engine = engine();
    let (id, _) = tournament_with_teams(&mut engine, 4);
    engine.generate_fixture(id).unwrap();

    let semi = round(&engine, id, 2);
    assert!(!engine.is_complete(semi.id).unwrap());
}

#[test]
fn round_completes_only_when_every_match_is_completed() {
    let mut engine = engine();
    let (id, _) = tournament_with_teams(&mut engine, 4);
    engine.generate_fixture(id).unwrap();
    let semi = round(&engine, id, 2);
    let matches = engine.select_type_and_generate(semi.id, RoundType::Knockout).unwrap();
    assert_eq!(matches.len(), 2);
    assert!(!engine.is_complete(semi.id).unwrap());

    engine.record_result(matches[0].id, win(matches[0].team_1)).unwrap();
    let ongoing = MatchUpdate { status: Some(MatchStatus::Ongoing), ..Default::default() };
    engine.record_result(matches[1].id, ongoing).unwrap();
    assert!(!engine.is_complete(semi.id).unwrap());

    engine.record_result(matches[1].id, win(matches[1].team_2.unwrap())).unwrap();
    assert!(engine.is_complete(semi.id).unwrap());
}

#[test]
fn advance_seeds_next_round_with_exactly_the_winners() {
    let mut engine = engine();
    let (id, _) = tournament_with_teams(&mut engine, 4);
    engine.generate_fixture(id).unwrap();
    let semi = round(&engine, id, 2);
    let matches = engine.select_type_and_generate(semi.id, RoundType::Knockout).unwrap();
    let mut winners = complete_round(&mut engine, &matches);
    winners.sort();

    let (next, final_matches) = engine.advance(semi.id, RoundType::Knockout).unwrap();
    assert_eq!(next.round_value(), 1);
    assert_eq!(next.round_type, Some(RoundType::Knockout));
    assert_eq!(final_matches.len(), 1);
    assert_eq!(participants(&final_matches), winners);
    assert_eq!(engine.round_matches(next.id).unwrap(), final_matches);
}

#[test]
fn advance_refuses_incomplete_round() {
    let mut engine = engine();
    let (id, _) = tournament_with_teams(&mut engine, 4);
    engine.generate_fixture(id).unwrap();
    let semi = round(&engine, id, 2);
    engine.select_type_and_generate(semi.id, RoundType::Knockout).unwrap();

    let err = engine.advance(semi.id, RoundType::Knockout).unwrap_err();
    assert!(matches!(err, FixtureError::IncompleteRound(_)));
    assert!(engine.round_matches(round(&engine, id, 1).id).unwrap().is_empty());
}

#[test]
fn advance_from_final_has_nowhere_to_go() {
    let mut engine = engine();
    let (id, _) = tournament_with_teams(&mut engine, 2);
    engine.generate_fixture(id).unwrap();
    let last = round(&engine, id, 1);
    let matches = engine.select_type_and_generate(last.id, RoundType::Knockout).unwrap();
    complete_round(&mut engine, &matches);

    let err = engine.advance(last.id, RoundType::Knockout).unwrap_err();
    assert!(matches!(err, FixtureError::NoNextRound(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

fn pairing(matches: &[GameMatch]) -> BTreeSet<(TeamId, TeamId)> {
    matches
        .iter()
        .map(|m| {
            let (a, b) = (m.team_1, m.team_2.unwrap());
            if a < b {
                (a, b)
            } else {
                (b, a)
            }
        })
        .collect()
}

#[test]
fn regenerating_reshuffles_without_leftovers() {
    let mut engine = engine();
    let (id, _) = tournament_with_teams(&mut engine, 8);
    engine.generate_fixture(id).unwrap();
    let quarter = round(&engine, id, 3);

    let first = engine.select_type_and_generate(quarter.id, RoundType::Knockout).unwrap();
    let mut reshuffled = false;
    for _ in 0..20 {
        let again = engine.select_type_and_generate(quarter.id, RoundType::Knockout).unwrap();
        assert_eq!(again.len(), first.len());
        assert_eq!(participants(&again), participants(&first));
        assert_eq!(engine.round_matches(quarter.id).unwrap(), again);
        if pairing(&again) != pairing(&first) {
            reshuffled = true;
            break;
        }
    }
    assert!(reshuffled, "pairing never changed");
}

#[test]
fn regenerating_is_rejected_once_next_round_has_matches() {
    let mut engine = engine();
    let (id, _) = tournament_with_teams(&mut engine, 4);
    engine.generate_fixture(id).unwrap();
    let semi = round(&engine, id, 2);
    let matches = engine.select_type_and_generate(semi.id, RoundType::Knockout).unwrap();
    complete_round(&mut engine, &matches);
    engine.advance(semi.id, RoundType::Knockout).unwrap();

    let err = engine.select_type_and_generate(semi.id, RoundType::RoundRobin).unwrap_err();
    assert!(matches!(err, FixtureError::InvalidState(_)));
    assert_eq!(engine.round_matches(semi.id).unwrap().len(), 2);
}

#[test]
fn later_round_needs_its_feeder_complete() {
    let mut engine = engine();
    let (id, _) = tournament_with_teams(&mut engine, 4);
    engine.generate_fixture(id).unwrap();

    let err = engine
        .select_type_and_generate(round(&engine, id, 1).id, RoundType::Knockout)
        .unwrap_err();
    assert!(matches!(err, FixtureError::IncompleteRound(_)));
}

#[test]
fn completed_round_without_winners_is_a_data_integrity_error() {
    let mut engine = engine();
    let (id, _) = tournament_with_teams(&mut engine, 4);
    engine.generate_fixture(id).unwrap();
    let semi = round(&engine, id, 2);
    let matches = engine.select_type_and_generate(semi.id, RoundType::Knockout).unwrap();
    for mut m in matches {
        m.status = MatchStatus::Completed;
        m.winner = None;
        engine.store_mut().save_match(&m);
    }
    assert!(engine.is_complete(semi.id).unwrap());

    let err = engine.advance(semi.id, RoundType::Knockout).unwrap_err();
    assert!(matches!(err, FixtureError::NoWinners(_)));
    assert_eq!(err.kind(), ErrorKind::DataIntegrity);
}

#[test]
fn cancelled_matches_block_completion_by_default() {
    let mut engine = engine();
    let (id, _) = tournament_with_teams(&mut engine, 4);
    engine.generate_fixture(id).unwrap();
    let semi = round(&engine, id, 2);
    let matches = engine.select_type_and_generate(semi.id, RoundType::Knockout).unwrap();
    engine.record_result(matches[0].id, win(matches[0].team_1)).unwrap();
    let cancel = MatchUpdate { status: Some(MatchStatus::Cancelled), ..Default::default() };
    engine.record_result(matches[1].id, cancel).unwrap();

    assert!(!engine.is_complete(semi.id).unwrap());
}

#[test]
fn cancelled_matches_can_count_as_finished() {
    let config = EngineConfig { cancelled_counts_as_complete: true, ..EngineConfig::seeded(11) };
    let mut engine = FixtureEngine::new(InMemoryStore::new(), config);
    assert!(engine.config().cancelled_counts_as_complete);
    let (id, _) = tournament_with_teams(&mut engine, 4);
    engine.generate_fixture(id).unwrap();
    let semi = round(&engine, id, 2);
    let matches = engine.select_type_and_generate(semi.id, RoundType::Knockout).unwrap();
    engine.record_result(matches[0].id, win(matches[0].team_1)).unwrap();
    let cancel = MatchUpdate { status: Some(MatchStatus::Cancelled), ..Default::default() };
    engine.record_result(matches[1].id, cancel).unwrap();
    assert!(engine.is_complete(semi.id).unwrap());

    let (_, final_matches) = engine.advance(semi.id, RoundType::Knockout).unwrap();
    assert_eq!(final_matches.len(), 1);
    assert!(final_matches[0].is_bye());
    assert_eq!(final_matches[0].winner, Some(matches[0].team_1));
    assert_eq!(engine.tournament(id).unwrap().champion, Some(matches[0].team_1));
}

#[test]
fn round_robin_advances_the_best_records() {
    let mut engine = engine();
    let (id, _) = tournament_with_teams(&mut engine, 4);
    let configs = [
        RoundConfig { round_value: 2, round_type: RoundType::RoundRobin },
        RoundConfig { round_value: 1, round_type: RoundType::Knockout },
    ];
    engine.generate_fixture_with_round_types(id, &configs).unwrap();
    let group = round(&engine, id, 2);
    let matches = engine.select_type_and_generate(group.id, RoundType::RoundRobin).unwrap();
    assert_eq!(matches.len(), 6);

    // Earlier teams in pool order beat later ones: 3, 2, 1 and 0 wins.
    let order: Vec<TeamId> = {
        let mut seen = Vec::new();
        for t in matches.iter().flat_map(|m| m.teams()) {
            if !seen.contains(&t) {
                seen.push(t);
            }
        }
        seen
    };
    let rank = |t: TeamId| order.iter().position(|o| *o == t).unwrap();
    for m in &matches {
        let (a, b) = (m.team_1, m.team_2.unwrap());
        let winner = if rank(a) < rank(b) { a } else { b };
        engine.record_result(m.id, win(winner)).unwrap();
    }

    let standings = engine.round_standings(group.id).unwrap();
    let wins: Vec<u32> = standings.iter().map(|s| s.wins).collect();
    assert_eq!(wins, vec![3, 2, 1, 0]);

    let (last, final_matches) = engine.advance(group.id, RoundType::Knockout).unwrap();
    assert!(last.is_final());
    let mut expected = vec![order[0], order[1]];
    expected.sort();
    assert_eq!(participants(&final_matches), expected);
}

#[test]
fn create_round_validates_value() {
    let mut engine = engine();
    let (id, _) = tournament_with_teams(&mut engine, 4);

    let err = engine.create_round(id, 0, None).unwrap_err();
    assert_eq!(err, FixtureError::InvalidRoundValue(0));

    let (created, matches) = engine.create_round(id, 2, Some(RoundType::Knockout)).unwrap();
    assert_eq!(created.round_name(), "Semi-final");
    assert_eq!(matches.len(), 2);

    let err = engine.create_round(id, 2, None).unwrap_err();
    assert_eq!(err, FixtureError::RoundValueExists(2));
}

#[test]
fn unknown_round_is_not_found() {
    let mut engine = engine();
    let err = engine.select_type_and_generate(99, RoundType::Knockout).unwrap_err();
    assert_eq!(err, FixtureError::RoundNotFound(99));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

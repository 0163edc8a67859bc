//! Shared setup for the integration tests.
#![allow(dead_code)]

use fixture_engine::{
    EngineConfig, FixtureEngine, FixtureStore, GameMatch, InMemoryStore, MatchStatus, MatchUpdate,
    NewTournament, Round, Sport, Team, TeamId, TournamentId,
};

pub type Engine = FixtureEngine<InMemoryStore>;

pub fn engine() -> Engine {
    FixtureEngine::new(InMemoryStore::new(), EngineConfig::seeded(7))
}

pub fn tournament(engine: &mut Engine) -> TournamentId {
    engine
        .create_tournament(NewTournament {
            name: "Spring Cup".to_string(),
            sport: Sport { id: 3, name: "Football".to_string() },
            created_by: 1,
            start_date: None,
            end_date: None,
        })
        .unwrap()
        .id
}

/// Tournament with `n` teams named T0, T1, ...
pub fn tournament_with_teams(engine: &mut Engine, n: usize) -> (TournamentId, Vec<Team>) {
    let id = tournament(engine);
    let teams = (0..n)
        .map(|i| engine.register_team(id, &format!("T{i}"), 1).unwrap())
        .collect();
    (id, teams)
}

pub fn round(engine: &Engine, tournament_id: TournamentId, value: u32) -> Round {
    engine.store().round_by_value(tournament_id, value).unwrap()
}

pub fn win(winner: TeamId) -> MatchUpdate {
    MatchUpdate {
        status: Some(MatchStatus::Completed),
        winner: Some(winner),
        ..Default::default()
    }
}

/// Complete every open match with `team_1` as the winner. Returns the winners, byes included.
pub fn complete_round(engine: &mut Engine, matches: &[GameMatch]) -> Vec<TeamId> {
    matches
        .iter()
        .map(|m| {
            if !m.is_bye() {
                engine.record_result(m.id, win(m.team_1)).unwrap();
            }
            m.team_1
        })
        .collect()
}

pub fn participants(matches: &[GameMatch]) -> Vec<TeamId> {
    let mut ids: Vec<TeamId> = matches.iter().flat_map(|m| m.teams()).collect();
    ids.sort();
    ids
}

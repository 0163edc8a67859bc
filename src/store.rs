//! Persistence seams for the fixture engine, plus an in-memory implementation
//! used by the web binary and the tests.

use crate::models::{
    GameMatch, MatchId, MatchProposal, NewRound, Round, RoundId, SportId, Team, TeamId, TeamKind,
    Tournament, TournamentId,
};
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Source of the teams registered for a tournament.
pub trait RosterProvider {
    /// All teams associated with the tournament, placeholders included.
    fn teams_for_tournament(&self, tournament_id: TournamentId) -> Vec<Team>;
}

/// Storage for tournaments, teams, rounds and matches.
pub trait FixtureStore {
    fn tournament(&self, id: TournamentId) -> Option<Tournament>;
    fn save_tournament(&mut self, tournament: &Tournament);

    fn team(&self, id: TeamId) -> Option<Team>;
    fn save_team(&mut self, team: &Team);
    fn delete_teams(&mut self, ids: &[TeamId]);
    /// Placeholders created for round `round_value` of the tournament.
    fn dummy_teams_for_round(&self, tournament_id: TournamentId, round_value: u32) -> Vec<Team>;

    fn insert_round(&mut self, round: NewRound) -> Round;
    fn round(&self, id: RoundId) -> Option<Round>;
    fn save_round(&mut self, round: &Round);
    fn rounds_for_tournament(&self, tournament_id: TournamentId) -> Vec<Round>;
    fn round_by_value(&self, tournament_id: TournamentId, round_value: u32) -> Option<Round>;
    fn delete_round(&mut self, id: RoundId);

    /// Persist proposals as matches of `round`, in order.
    fn insert_matches(&mut self, round: &Round, sport_id: SportId, proposals: Vec<MatchProposal>)
        -> Vec<GameMatch>;
    fn match_by_id(&self, id: MatchId) -> Option<GameMatch>;
    fn save_match(&mut self, game: &GameMatch);
    /// Matches of a round, ordered by id.
    fn matches_for_round(&self, round_id: RoundId) -> Vec<GameMatch>;
    /// Returns how many matches were removed.
    fn delete_matches_for_round(&mut self, round_id: RoundId) -> usize;
}

/// A store that can run a group of writes as one unit.
pub trait Transactional {
    /// Run `f`; if it returns `Err`, every write it made is discarded.
    fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>;
}

/// Simple in-memory implementation for tests and local runs.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    tournaments: HashMap<TournamentId, Tournament>,
    teams: HashMap<TeamId, Team>,
    rounds: BTreeMap<RoundId, Round>,
    matches: BTreeMap<MatchId, GameMatch>,
    next_round_id: RoundId,
    next_match_id: MatchId,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every tournament in the store.
    pub fn tournaments(&self) -> impl Iterator<Item = &Tournament> {
        self.tournaments.values()
    }
}

impl RosterProvider for InMemoryStore {
    fn teams_for_tournament(&self, tournament_id: TournamentId) -> Vec<Team> {
        let mut teams: Vec<Team> = self
            .teams
            .values()
            .filter(|t| t.tournament_id == Some(tournament_id))
            .cloned()
            .collect();
        // HashMap order is arbitrary; callers see a stable roster.
        teams.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        teams
    }
}

impl FixtureStore for InMemoryStore {
    fn tournament(&self, id: TournamentId) -> Option<Tournament> {
        self.tournaments.get(&id).cloned()
    }

    fn save_tournament(&mut self, tournament: &Tournament) {
        self.tournaments.insert(tournament.id, tournament.clone());
    }

    fn team(&self, id: TeamId) -> Option<Team> {
        self.teams.get(&id).cloned()
    }

    fn save_team(&mut self, team: &Team) {
        self.teams.insert(team.id, team.clone());
    }

    fn delete_teams(&mut self, ids: &[TeamId]) {
        for id in ids {
            self.teams.remove(id);
        }
    }

    fn dummy_teams_for_round(&self, tournament_id: TournamentId, round_value: u32) -> Vec<Team> {
        let mut teams: Vec<Team> = self
            .teams
            .values()
            .filter(|t| {
                t.tournament_id == Some(tournament_id)
                    && t.kind == TeamKind::Dummy { round_value }
            })
            .cloned()
            .collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        teams
    }

    fn insert_round(&mut self, round: NewRound) -> Round {
        self.next_round_id += 1;
        let round = Round::new(self.next_round_id, round);
        self.rounds.insert(round.id, round.clone());
        round
    }

    fn round(&self, id: RoundId) -> Option<Round> {
        self.rounds.get(&id).cloned()
    }

    fn save_round(&mut self, round: &Round) {
        self.rounds.insert(round.id, round.clone());
    }

    fn rounds_for_tournament(&self, tournament_id: TournamentId) -> Vec<Round> {
        self.rounds
            .values()
            .filter(|r| r.tournament_id == tournament_id)
            .cloned()
            .collect()
    }

    fn round_by_value(&self, tournament_id: TournamentId, round_value: u32) -> Option<Round> {
        self.rounds
            .values()
            .find(|r| r.tournament_id == tournament_id && r.round_value() == round_value)
            .cloned()
    }

    fn delete_round(&mut self, id: RoundId) {
        self.rounds.remove(&id);
    }

    fn insert_matches(
        &mut self,
        round: &Round,
        sport_id: SportId,
        proposals: Vec<MatchProposal>,
    ) -> Vec<GameMatch> {
        proposals
            .into_iter()
            .map(|proposal| {
                self.next_match_id += 1;
                let game = GameMatch::from_proposal(
                    self.next_match_id,
                    round.tournament_id,
                    sport_id,
                    round.id,
                    proposal,
                );
                self.matches.insert(game.id, game.clone());
                game
            })
            .collect()
    }

    fn match_by_id(&self, id: MatchId) -> Option<GameMatch> {
        self.matches.get(&id).cloned()
    }

    fn save_match(&mut self, game: &GameMatch) {
        self.matches.insert(game.id, game.clone());
    }

    fn matches_for_round(&self, round_id: RoundId) -> Vec<GameMatch> {
        self.matches
            .values()
            .filter(|m| m.round_id == round_id)
            .cloned()
            .collect()
    }

    fn delete_matches_for_round(&mut self, round_id: RoundId) -> usize {
        let before = self.matches.len();
        self.matches.retain(|_, m| m.round_id != round_id);
        before - self.matches.len()
    }
}

impl Transactional for InMemoryStore {
    fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        let snapshot = self.clone();
        let result = f(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }
}

//! `FixtureEngine`: the entry point callers use. Owns the store, the pairing RNG and
//! the configuration, and runs every mutation inside one store transaction.
//!
//! The engine takes `&mut self` for mutations, so callers holding it behind a lock get
//! the one-mutation-at-a-time guarantee per tournament for free.

use crate::config::EngineConfig;
use crate::logic::{dummy_teams, fixture, progression, results, standings};
use crate::logic::{Fixture, RoundConfig, Standing};
use crate::models::{
    FixtureError, GameMatch, MatchId, MatchUpdate, NewTournament, Round, RoundId, RoundType,
    Team, Tournament, TournamentId, UserId,
};
use crate::roster::parse_team_names;
use crate::store::{FixtureStore, RosterProvider, Transactional};
use rand::rngs::StdRng;
use std::io::Read;

pub struct FixtureEngine<S> {
    store: S,
    rng: StdRng,
    config: EngineConfig,
}

impl<S> FixtureEngine<S>
where
    S: FixtureStore + RosterProvider + Transactional,
{
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self {
            rng: config.rng(),
            store,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct store access, bypassing validation.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Round types a caller may pick from.
    pub fn available_round_types() -> Vec<RoundType> {
        RoundType::ALL.to_vec()
    }

    pub fn create_tournament(&mut self, input: NewTournament) -> Result<Tournament, FixtureError> {
        let tournament = Tournament::new(input)?;
        self.store.save_tournament(&tournament);
        log::info!("Created tournament {} ({})", tournament.id, tournament.name);
        Ok(tournament)
    }

    pub fn tournament(&self, id: TournamentId) -> Result<Tournament, FixtureError> {
        self.store
            .tournament(id)
            .ok_or(FixtureError::TournamentNotFound(id))
    }

    /// Register a team. Names are unique per tournament (case-insensitive) and the
    /// roster is frozen once a fixture exists.
    pub fn register_team(
        &mut self,
        tournament_id: TournamentId,
        name: &str,
        created_by: UserId,
    ) -> Result<Team, FixtureError> {
        self.store
            .transaction(|store| register(store, tournament_id, name, created_by))
    }

    /// Register every team listed in a CSV roster, or none of them.
    pub fn import_roster<R: Read>(
        &mut self,
        tournament_id: TournamentId,
        reader: R,
        created_by: UserId,
    ) -> Result<Vec<Team>, FixtureError> {
        let names = parse_team_names(reader)?;
        self.store.transaction(|store| {
            names
                .iter()
                .map(|name| register(store, tournament_id, name, created_by))
                .collect::<Result<Vec<_>, _>>()
        })
    }

    pub fn create_dummy_team(
        &mut self,
        tournament_id: TournamentId,
        round_value: u32,
        name: Option<String>,
    ) -> Result<Team, FixtureError> {
        self.store.transaction(|store| {
            dummy_teams::create_dummy_team(store, tournament_id, round_value, name)
        })
    }

    /// Fill round `round_value` up to the next power of two with placeholders.
    pub fn pad_with_dummy_teams(
        &mut self,
        tournament_id: TournamentId,
        round_value: u32,
    ) -> Result<Vec<Team>, FixtureError> {
        self.store.transaction(|store| {
            dummy_teams::pad_with_dummy_teams(store, tournament_id, round_value)
        })
    }

    pub fn delete_dummy_teams_for_round(&mut self, round_id: RoundId) -> Result<usize, FixtureError> {
        self.store
            .transaction(|store| dummy_teams::delete_dummy_teams_for_round(store, round_id))
    }

    pub fn delete_dummy_teams_for_round_value(
        &mut self,
        tournament_id: TournamentId,
        round_value: u32,
    ) -> Result<usize, FixtureError> {
        self.store.transaction(|store| {
            dummy_teams::delete_dummy_teams_for_round_value(store, tournament_id, round_value)
        })
    }

    pub fn generate_fixture(&mut self, tournament_id: TournamentId) -> Result<Fixture, FixtureError> {
        let rng = &mut self.rng;
        self.store
            .transaction(|store| fixture::generate_fixture(store, rng, tournament_id))
    }

    pub fn generate_fixture_with_round_types(
        &mut self,
        tournament_id: TournamentId,
        configs: &[RoundConfig],
    ) -> Result<Fixture, FixtureError> {
        let rng = &mut self.rng;
        self.store.transaction(|store| {
            fixture::generate_fixture_with_round_types(store, rng, tournament_id, configs)
        })
    }

    pub fn existing_fixture(&self, tournament_id: TournamentId) -> Result<Fixture, FixtureError> {
        fixture::existing_fixture(&self.store, tournament_id)
    }

    pub fn reset_fixture(&mut self, tournament_id: TournamentId) -> Result<(), FixtureError> {
        self.store
            .transaction(|store| dummy_teams::reset_fixture(store, tournament_id))
    }

    pub fn create_round(
        &mut self,
        tournament_id: TournamentId,
        round_value: u32,
        round_type: Option<RoundType>,
    ) -> Result<(Round, Vec<GameMatch>), FixtureError> {
        let (rng, config) = (&mut self.rng, &self.config);
        self.store.transaction(|store| {
            progression::create_round(store, rng, config, tournament_id, round_value, round_type)
        })
    }

    pub fn round(&self, round_id: RoundId) -> Result<Round, FixtureError> {
        progression::load_round(&self.store, round_id)
    }

    /// Matches of a round, by id.
    pub fn round_matches(&self, round_id: RoundId) -> Result<Vec<GameMatch>, FixtureError> {
        let round = self.round(round_id)?;
        Ok(self.store.matches_for_round(round.id))
    }

    pub fn select_type_and_generate(
        &mut self,
        round_id: RoundId,
        round_type: RoundType,
    ) -> Result<Vec<GameMatch>, FixtureError> {
        let (rng, config) = (&mut self.rng, &self.config);
        self.store.transaction(|store| {
            progression::select_type_and_generate(store, rng, config, round_id, round_type)
        })
    }

    pub fn is_complete(&self, round_id: RoundId) -> Result<bool, FixtureError> {
        let matches = self.round_matches(round_id)?;
        Ok(progression::is_round_complete(
            &matches,
            self.config.cancelled_counts_as_complete,
        ))
    }

    pub fn advance(
        &mut self,
        current_round_id: RoundId,
        next_type: RoundType,
    ) -> Result<(Round, Vec<GameMatch>), FixtureError> {
        let (rng, config) = (&mut self.rng, &self.config);
        self.store.transaction(|store| {
            progression::advance(store, rng, config, current_round_id, next_type)
        })
    }

    pub fn record_result(
        &mut self,
        match_id: MatchId,
        update: MatchUpdate,
    ) -> Result<GameMatch, FixtureError> {
        let cancelled_terminal = self.config.cancelled_counts_as_complete;
        self.store.transaction(|store| {
            results::record_result(store, cancelled_terminal, match_id, update)
        })
    }

    pub fn round_standings(&self, round_id: RoundId) -> Result<Vec<Standing>, FixtureError> {
        let matches = self.round_matches(round_id)?;
        Ok(standings::compute_standings(&matches))
    }

    pub fn delete_round(&mut self, round_id: RoundId) -> Result<(), FixtureError> {
        self.store
            .transaction(|store| dummy_teams::delete_round(store, round_id))
    }
}

fn register<S>(
    store: &mut S,
    tournament_id: TournamentId,
    name: &str,
    created_by: UserId,
) -> Result<Team, FixtureError>
where
    S: FixtureStore + RosterProvider,
{
    let tournament = store
        .tournament(tournament_id)
        .ok_or(FixtureError::TournamentNotFound(tournament_id))?;
    if tournament.fixture_generated {
        return Err(FixtureError::InvalidState(
            "Teams cannot join after the fixture is generated".to_string(),
        ));
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(FixtureError::InvalidState("Team name must not be empty".to_string()));
    }
    let duplicate = store
        .teams_for_tournament(tournament_id)
        .iter()
        .any(|t| t.name.eq_ignore_ascii_case(name));
    if duplicate {
        return Err(FixtureError::InvalidState(format!(
            "A team named '{name}' is already registered"
        )));
    }
    let team = Team::registered(name, tournament.sport.id, created_by, tournament_id);
    store.save_team(&team);
    log::debug!("Registered team {} ({}) in tournament {}", team.id, team.name, tournament_id);
    Ok(team)
}

//! Fixture views: speculative previews when a bracket is generated, and the persisted
//! bracket read back from the store.

use crate::logic::naming::{number_of_rounds, round_name, upscale_to_power_of_two};
use crate::logic::team_pool::first_round_pool;
use crate::models::{
    FixtureError, GameMatch, MatchId, MatchProposal, MatchStatus, NewRound, Round, RoundId,
    RoundType, Team, TeamId, Tournament, TournamentId,
};
use crate::store::{FixtureStore, RosterProvider};
use chrono::NaiveDateTime;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Shown in place of the missing opponent of a bye.
pub const BYE: &str = "BYE";

/// One `(round_value, type)` entry of a custom-typed fixture request.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub round_value: u32,
    #[serde(rename = "type")]
    pub round_type: RoundType,
}

/// A match as shown in a fixture. Preview matches have no id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FixtureMatch {
    pub match_id: Option<MatchId>,
    pub round_value: u32,
    pub round_name: String,
    pub team_1_id: TeamId,
    pub team_1_name: String,
    pub team_2_id: Option<TeamId>,
    pub team_2_name: String,
    pub status: MatchStatus,
    pub winner_id: Option<TeamId>,
    pub winner_name: Option<String>,
    pub team_1_score: Option<u32>,
    pub team_2_score: Option<u32>,
    pub venue: Option<String>,
    pub scheduled_time: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoundFixture {
    pub round_id: RoundId,
    pub round_value: u32,
    pub round_name: String,
    #[serde(rename = "type")]
    pub round_type: Option<RoundType>,
    pub matches: Vec<FixtureMatch>,
}

/// A tournament's bracket: every round, highest value first unless requested otherwise.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Fixture {
    pub tournament_id: TournamentId,
    pub tournament_name: String,
    pub sport_name: String,
    /// Registered (non-placeholder) teams.
    pub team_count: usize,
    /// `team_count` upscaled to a power of two.
    pub bracket_size: usize,
    pub rounds: Vec<RoundFixture>,
}

/// Team names by id, falling back to the store for teams outside the roster.
struct TeamNames<'a, S> {
    store: &'a S,
    known: HashMap<TeamId, String>,
}

impl<'a, S: FixtureStore> TeamNames<'a, S> {
    fn new(store: &'a S, roster: &[Team]) -> Self {
        Self {
            store,
            known: roster.iter().map(|t| (t.id, t.name.clone())).collect(),
        }
    }

    fn name(&self, id: TeamId) -> String {
        self.known
            .get(&id)
            .cloned()
            .or_else(|| self.store.team(id).map(|t| t.name))
            .unwrap_or_else(|| format!("Unknown team {id}"))
    }

    fn preview(&self, round_value: u32, p: &MatchProposal) -> FixtureMatch {
        FixtureMatch {
            match_id: None,
            round_value,
            round_name: round_name(round_value),
            team_1_id: p.team_1,
            team_1_name: self.name(p.team_1),
            team_2_id: p.team_2,
            team_2_name: p.team_2.map_or_else(|| BYE.to_string(), |id| self.name(id)),
            status: p.status,
            winner_id: p.winner,
            winner_name: p.winner.map(|id| self.name(id)),
            team_1_score: None,
            team_2_score: None,
            venue: None,
            scheduled_time: None,
        }
    }

    fn persisted(&self, round: &Round, m: &GameMatch) -> FixtureMatch {
        FixtureMatch {
            match_id: Some(m.id),
            round_value: round.round_value(),
            round_name: round.round_name().to_string(),
            team_1_id: m.team_1,
            team_1_name: self.name(m.team_1),
            team_2_id: m.team_2,
            team_2_name: m.team_2.map_or_else(|| BYE.to_string(), |id| self.name(id)),
            status: m.status,
            winner_id: m.winner,
            winner_name: m.winner.map(|id| self.name(id)),
            team_1_score: m.team_1_score,
            team_2_score: m.team_2_score,
            venue: m.venue.clone(),
            scheduled_time: m.scheduled_time,
        }
    }
}

fn load_tournament<S: FixtureStore>(store: &S, id: TournamentId) -> Result<Tournament, FixtureError> {
    store.tournament(id).ok_or(FixtureError::TournamentNotFound(id))
}

fn registered_count(roster: &[Team]) -> usize {
    roster.iter().filter(|t| !t.is_dummy()).count()
}

fn empty_fixture(tournament: &Tournament, roster: &[Team]) -> Fixture {
    let team_count = registered_count(roster);
    Fixture {
        tournament_id: tournament.id,
        tournament_name: tournament.name.clone(),
        sport_name: tournament.sport.name.clone(),
        team_count,
        bracket_size: upscale_to_power_of_two(team_count),
        rounds: Vec::new(),
    }
}

/// Roster for a new fixture; fails when nobody is registered or rounds already exist.
fn roster_for_new_fixture<S>(store: &S, tournament: &Tournament) -> Result<Vec<Team>, FixtureError>
where
    S: FixtureStore + RosterProvider,
{
    let roster = store.teams_for_tournament(tournament.id);
    if registered_count(&roster) == 0 {
        log::warn!("Fixture requested for tournament {} with no teams", tournament.id);
        return Err(FixtureError::EmptyRoster(tournament.id));
    }
    if !store.rounds_for_tournament(tournament.id).is_empty() {
        return Err(FixtureError::InvalidState(format!(
            "Tournament {} already has a fixture; reset it first",
            tournament.id
        )));
    }
    Ok(roster)
}

/// Create every round of the bracket (type pending) and preview knockout pairings
/// for the first round.
///
/// Only the round rows are persisted; later rounds start with no matches.
pub(crate) fn generate_fixture<S>(
    store: &mut S,
    rng: &mut dyn RngCore,
    tournament_id: TournamentId,
) -> Result<Fixture, FixtureError>
where
    S: FixtureStore + RosterProvider,
{
    let mut tournament = load_tournament(store, tournament_id)?;
    let roster = roster_for_new_fixture(store, &tournament)?;
    let total = number_of_rounds(registered_count(&roster));

    let mut rounds = Vec::with_capacity(total as usize);
    for value in (1..=total).rev() {
        rounds.push(store.insert_round(NewRound {
            tournament_id,
            round_value: value,
            round_type: None,
        }));
    }

    let pool = first_round_pool(&roster, total);
    let preview = RoundType::Knockout.generate(&pool.teams, rng);

    tournament.fixture_generated = true;
    store.save_tournament(&tournament);
    log::info!(
        "Generated fixture for tournament {}: {} teams, {} rounds",
        tournament_id,
        pool.len(),
        total
    );

    let names = TeamNames::new(&*store, &roster);
    let mut fixture = empty_fixture(&tournament, &roster);
    fixture.rounds = rounds
        .iter()
        .map(|round| RoundFixture {
            round_id: round.id,
            round_value: round.round_value(),
            round_name: round.round_name().to_string(),
            round_type: None,
            matches: if round.round_value() == total {
                preview.iter().map(|p| names.preview(total, p)).collect()
            } else {
                Vec::new()
            },
        })
        .collect();
    Ok(fixture)
}

/// Create the requested rounds with their types. The highest-value round of the
/// tournament gets a preview in its type; the others stay empty until advanced into.
pub(crate) fn generate_fixture_with_round_types<S>(
    store: &mut S,
    rng: &mut dyn RngCore,
    tournament_id: TournamentId,
    configs: &[RoundConfig],
) -> Result<Fixture, FixtureError>
where
    S: FixtureStore + RosterProvider,
{
    let mut tournament = load_tournament(store, tournament_id)?;
    let roster = roster_for_new_fixture(store, &tournament)?;
    if configs.is_empty() {
        return Err(FixtureError::InvalidState("No rounds requested".to_string()));
    }
    let mut seen = HashSet::new();
    for config in configs {
        if config.round_value < 1 {
            return Err(FixtureError::InvalidRoundValue(config.round_value));
        }
        if !seen.insert(config.round_value) {
            return Err(FixtureError::RoundValueExists(config.round_value));
        }
    }
    // Unique values >= 1 form a max..=1 chain exactly when max equals the count.
    let max_value = seen.iter().copied().max().unwrap_or(0);
    if max_value as usize != configs.len() {
        return Err(FixtureError::InvalidState(format!(
            "Rounds must run from {max_value} down to the final without gaps"
        )));
    }

    let rounds: Vec<Round> = configs
        .iter()
        .map(|config| {
            store.insert_round(NewRound {
                tournament_id,
                round_value: config.round_value,
                round_type: Some(config.round_type),
            })
        })
        .collect();

    let first_value = store
        .rounds_for_tournament(tournament_id)
        .iter()
        .map(Round::round_value)
        .max()
        .unwrap_or(1);

    let names = TeamNames::new(&*store, &roster);
    let mut fixture_rounds = Vec::with_capacity(rounds.len());
    for round in &rounds {
        let matches = match round.round_type {
            Some(ty) if round.round_value() == first_value => {
                let pool = first_round_pool(&roster, first_value);
                ty.generate(&pool.teams, rng)
                    .iter()
                    .map(|p| names.preview(first_value, p))
                    .collect()
            }
            _ => Vec::new(),
        };
        fixture_rounds.push(RoundFixture {
            round_id: round.id,
            round_value: round.round_value(),
            round_name: round.round_name().to_string(),
            round_type: round.round_type,
            matches,
        });
    }

    let mut fixture = empty_fixture(&tournament, &roster);
    fixture.rounds = fixture_rounds;

    tournament.fixture_generated = true;
    store.save_tournament(&tournament);
    log::info!(
        "Generated custom fixture for tournament {} with {} rounds",
        tournament_id,
        configs.len()
    );
    Ok(fixture)
}

/// Read the persisted bracket: rounds by value descending, matches by id ascending.
pub(crate) fn existing_fixture<S>(store: &S, tournament_id: TournamentId) -> Result<Fixture, FixtureError>
where
    S: FixtureStore + RosterProvider,
{
    let tournament = load_tournament(store, tournament_id)?;
    let roster = store.teams_for_tournament(tournament_id);
    let names = TeamNames::new(store, &roster);

    let mut rounds = store.rounds_for_tournament(tournament_id);
    rounds.sort_by(|a, b| b.round_value().cmp(&a.round_value()));

    let mut fixture = empty_fixture(&tournament, &roster);
    fixture.rounds = rounds
        .iter()
        .map(|round| {
            let mut matches = store.matches_for_round(round.id);
            matches.sort_by_key(|m| m.id);
            RoundFixture {
                round_id: round.id,
                round_value: round.round_value(),
                round_name: round.round_name().to_string(),
                round_type: round.round_type,
                matches: matches.iter().map(|m| names.persisted(round, m)).collect(),
            }
        })
        .collect();
    Ok(fixture)
}

//! Tournament fixture engine: turns a roster into a bracket of rounds, pairs each
//! round (knockout or round robin), and advances winners round by round.

pub mod config;
pub mod engine;
pub mod logic;
pub mod models;
pub mod roster;
pub mod store;

pub use config::{EngineConfig, ServerConfig};
pub use engine::FixtureEngine;
pub use logic::{
    compute_standings, expected_team_count, is_round_complete, number_of_rounds, round_name,
    upscale_to_power_of_two, Fixture, FixtureMatch, Knockout, MatchGenerator, RoundConfig,
    RoundFixture, RoundRobin, Standing, TeamPool, BYE, INVALID_ROUND,
};
pub use models::{
    ErrorKind, FixtureError, GameMatch, MatchId, MatchProposal, MatchStatus, MatchUpdate,
    NewRound, NewTournament, Round, RoundId, RoundType, Sport, SportId, Team, TeamId, TeamKind,
    Tournament, TournamentId, UserId,
};
pub use store::{FixtureStore, InMemoryStore, RosterProvider, Transactional};

//! Fixture business logic: naming, team pools, pairing, round progression, views, cleanup.

pub(crate) mod dummy_teams;
pub(crate) mod fixture;
pub mod naming;
pub mod pairing;
pub(crate) mod progression;
pub(crate) mod results;
pub mod standings;
pub mod team_pool;

pub use fixture::{Fixture, FixtureMatch, RoundConfig, RoundFixture, BYE};
pub use naming::{expected_team_count, number_of_rounds, round_name, upscale_to_power_of_two, INVALID_ROUND};
pub use pairing::{Knockout, MatchGenerator, RoundRobin};
pub use progression::is_round_complete;
pub use standings::{compute_standings, Standing};
pub use team_pool::{extract_winners, first_round_pool, PoolSource, TeamPool};

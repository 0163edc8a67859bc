//! Data structures for fixtures: tournaments, teams, rounds, matches.

mod game;
mod round;
mod team;
mod tournament;

pub use game::{GameMatch, MatchId, MatchProposal, MatchStatus, MatchUpdate};
pub use round::{NewRound, Round, RoundId, RoundType};
pub use team::{Team, TeamId, TeamKind};
pub use tournament::{
    ErrorKind, FixtureError, NewTournament, Sport, SportId, Tournament, TournamentId, UserId,
};

//! Match generation: knockout (random pairs, bye for the odd team) and round robin (all pairs).
//!
//! Generators only propose matches; persisting them is the caller's decision.

use crate::models::{MatchProposal, RoundType, TeamId};
use rand::seq::SliceRandom;
use rand::RngCore;

/// Produces the matches of one round from its team pool.
pub trait MatchGenerator {
    fn generate(&self, teams: &[TeamId], rng: &mut dyn RngCore) -> Vec<MatchProposal>;
}

/// Random single-elimination pairing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Knockout;

/// Every team against every other team once.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoundRobin;

impl MatchGenerator for Knockout {
    /// Shuffle, then pair neighbours. An odd leftover gets a completed bye.
    fn generate(&self, teams: &[TeamId], rng: &mut dyn RngCore) -> Vec<MatchProposal> {
        let mut shuffled = teams.to_vec();
        shuffled.shuffle(rng);

        let pairs = shuffled.chunks_exact(2);
        let leftover = pairs.remainder().first().copied();
        let mut matches: Vec<MatchProposal> = pairs
            .map(|pair| MatchProposal::scheduled(pair[0], pair[1]))
            .collect();
        if let Some(team) = leftover {
            matches.push(MatchProposal::bye(team));
        }
        matches
    }
}

impl MatchGenerator for RoundRobin {
    /// Pairs `(i, j)` with `i < j` in list order; `n(n-1)/2` matches.
    fn generate(&self, teams: &[TeamId], _rng: &mut dyn RngCore) -> Vec<MatchProposal> {
        let n = teams.len();
        let mut matches = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for (i, &home) in teams.iter().enumerate() {
            for &away in &teams[i + 1..] {
                matches.push(MatchProposal::scheduled(home, away));
            }
        }
        matches
    }
}

impl RoundType {
    /// The generator that implements this round type.
    pub fn generator(self) -> &'static dyn MatchGenerator {
        match self {
            RoundType::Knockout => &Knockout,
            RoundType::RoundRobin => &RoundRobin,
        }
    }

    /// Shorthand for `self.generator().generate(..)`.
    pub fn generate(self, teams: &[TeamId], rng: &mut dyn RngCore) -> Vec<MatchProposal> {
        self.generator().generate(teams, rng)
    }
}

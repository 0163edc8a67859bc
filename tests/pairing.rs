//! Knockout and round-robin match generation.

use fixture_engine::{Knockout, MatchGenerator, MatchStatus, RoundRobin, RoundType, TeamId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use uuid::Uuid;

fn teams(n: usize) -> Vec<TeamId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

#[test]
fn knockout_pairs_everyone_once_with_a_bye_for_odd_counts() {
    let mut rng = StdRng::seed_from_u64(1);
    for n in 0..=9 {
        let ids = teams(n);
        let matches = Knockout.generate(&ids, &mut rng);

        assert_eq!(matches.len(), (n + 1) / 2, "n = {n}");
        let scheduled = matches.iter().filter(|m| m.status == MatchStatus::Scheduled).count();
        assert_eq!(scheduled, n / 2);

        let byes: Vec<_> = matches.iter().filter(|m| m.is_bye()).collect();
        assert_eq!(byes.len(), n % 2);
        for bye in byes {
            assert_eq!(bye.status, MatchStatus::Completed);
            assert_eq!(bye.winner, Some(bye.team_1));
        }

        let seen: Vec<TeamId> = matches
            .iter()
            .flat_map(|m| std::iter::once(m.team_1).chain(m.team_2))
            .collect();
        assert_eq!(seen.len(), n);
        assert_eq!(seen.iter().collect::<HashSet<_>>(), ids.iter().collect::<HashSet<_>>());
    }
}

#[test]
fn round_robin_plays_every_pair_once() {
    let mut rng = StdRng::seed_from_u64(1);
    for n in 0..=7 {
        let ids = teams(n);
        let matches = RoundRobin.generate(&ids, &mut rng);
        assert_eq!(matches.len(), n * n.saturating_sub(1) / 2);

        let mut pairs = HashSet::new();
        for m in &matches {
            assert_eq!(m.status, MatchStatus::Scheduled);
            assert_eq!(m.winner, None);
            let away = m.team_2.unwrap();
            assert_ne!(m.team_1, away);
            let key = if m.team_1 < away { (m.team_1, away) } else { (away, m.team_1) };
            assert!(pairs.insert(key), "pair repeated");
        }
    }
}

#[test]
fn same_seed_gives_same_knockout_draw() {
    let ids = teams(8);
    let a = Knockout.generate(&ids, &mut StdRng::seed_from_u64(42));
    let b = Knockout.generate(&ids, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn round_type_picks_its_generator() {
    let ids = teams(4);
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(RoundType::Knockout.generate(&ids, &mut rng).len(), 2);
    assert_eq!(RoundType::RoundRobin.generate(&ids, &mut rng).len(), 6);
}

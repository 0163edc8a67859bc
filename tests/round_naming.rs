//! Round names and bracket arithmetic.

use fixture_engine::{
    expected_team_count, number_of_rounds, round_name, upscale_to_power_of_two, NewRound, Round,
    INVALID_ROUND,
};
use uuid::Uuid;

#[test]
fn names_follow_the_bracket_table() {
    let names: Vec<String> = (1u32..=8).map(round_name).collect();
    assert_eq!(
        names,
        vec![
            "Final",
            "Semi-final",
            "Quarter-final",
            "Round of 16",
            "Round of 32",
            "Round of 64",
            "Round of 128",
            "Round of 256",
        ]
    );
}

#[test]
fn zero_and_missing_values_are_invalid() {
    assert_eq!(round_name(0u32), INVALID_ROUND);
    assert_eq!(round_name(None::<u32>), INVALID_ROUND);
    assert_eq!(round_name(Some(2u32)), "Semi-final");
}

#[test]
fn huge_values_still_get_a_name() {
    assert_eq!(expected_team_count(64), None);
    assert_eq!(round_name(64u32), "Round of 2^64");
    assert_eq!(round_name(63u32), format!("Round of {}", 1u64 << 63));
}

#[test]
fn upscale_rounds_up_to_a_power_of_two() {
    assert_eq!(upscale_to_power_of_two(1), 1);
    assert_eq!(upscale_to_power_of_two(5), 8);
    assert_eq!(upscale_to_power_of_two(36), 64);
    assert_eq!(upscale_to_power_of_two(64), 64);
    assert_eq!(upscale_to_power_of_two(0), 1);
}

#[test]
fn round_count_is_log2_of_bracket() {
    assert_eq!(number_of_rounds(0), 1);
    assert_eq!(number_of_rounds(1), 1);
    assert_eq!(number_of_rounds(2), 1);
    assert_eq!(number_of_rounds(5), 3);
    assert_eq!(number_of_rounds(8), 3);
    assert_eq!(number_of_rounds(9), 4);
}

#[test]
fn round_name_tracks_its_value() {
    let mut round = Round::new(
        1,
        NewRound { tournament_id: Uuid::new_v4(), round_value: 3, round_type: None },
    );
    assert_eq!(round.round_name(), "Quarter-final");
    assert_eq!(round.expected_team_count(), Some(8));
    assert!(!round.is_final());

    round.set_round_value(1);
    assert_eq!(round.round_name(), "Final");
    assert!(round.is_final());
}

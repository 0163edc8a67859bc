//! Round names and bracket sizes derived from a round's value.

/// Returned for round values below 1 (or missing).
pub const INVALID_ROUND: &str = "Invalid Round";

/// Human name of the round with this value: 1 is the final, 2 the semi-final, and so on.
///
/// Values below 1 (and `None`) yield [`INVALID_ROUND`] rather than an error.
pub fn round_name<V: Into<Option<u32>>>(round_value: V) -> String {
    let value = match round_value.into() {
        Some(v) if v >= 1 => v,
        _ => return INVALID_ROUND.to_string(),
    };
    match value {
        1 => "Final".to_string(),
        2 => "Semi-final".to_string(),
        3 => "Quarter-final".to_string(),
        _ => match expected_team_count(value) {
            Some(teams) => format!("Round of {teams}"),
            None => format!("Round of 2^{value}"),
        },
    }
}

/// `2^round_value`, or `None` when it does not fit in a u64.
pub fn expected_team_count(round_value: u32) -> Option<u64> {
    1u64.checked_shl(round_value)
}

/// Smallest power of two that is at least `n`. Zero upscales to 1.
pub fn upscale_to_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Rounds needed for a roster of `team_count` teams.
///
/// Always at least one, so a lone team still gets a final.
pub fn number_of_rounds(team_count: usize) -> u32 {
    upscale_to_power_of_two(team_count).trailing_zeros().max(1)
}

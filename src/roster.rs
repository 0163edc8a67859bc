//! Team roster import from CSV.

use crate::models::FixtureError;
use std::io::Read;

/// Read team names from CSV, one per row in the first column.
///
/// A first row reading `name` (any case) is treated as a header. Blank names are
/// skipped, and duplicates (case-insensitive) are rejected.
pub fn parse_team_names<R: Read>(reader: R) -> Result<Vec<String>, FixtureError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut names: Vec<String> = Vec::new();
    for (row, record) in csv.records().enumerate() {
        let record = record.map_err(|e| FixtureError::Roster(e.to_string()))?;
        let Some(name) = record.get(0).filter(|n| !n.is_empty()) else {
            continue;
        };
        if row == 0 && name.eq_ignore_ascii_case("name") {
            continue;
        }
        if names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            return Err(FixtureError::Roster(format!("Duplicate team name: {name}")));
        }
        names.push(name.to_string());
    }
    Ok(names)
}

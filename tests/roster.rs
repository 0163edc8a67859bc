//! Team registration and CSV roster import.

mod common;

use common::{engine, tournament};
use fixture_engine::roster::parse_team_names;
use fixture_engine::{FixtureError, NewTournament, RosterProvider, Sport};

#[test]
fn csv_names_are_trimmed_and_header_skipped() {
    let csv = "name\nAlpha\n  Bravo  \n\n,\nCharlie,extra\n";
    let names = parse_team_names(csv.as_bytes()).unwrap();
    assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
}

#[test]
fn csv_duplicates_are_rejected() {
    let err = parse_team_names("Alpha\nalpha\n".as_bytes()).unwrap_err();
    assert!(matches!(err, FixtureError::Roster(_)));
}

#[test]
fn import_registers_every_team() {
    let mut engine = engine();
    let id = tournament(&mut engine);

    let teams = engine.import_roster(id, "Lions\nTigers\nBears\n".as_bytes(), 9).unwrap();
    assert_eq!(teams.len(), 3);
    assert!(teams.iter().all(|t| t.created_by == 9 && t.sport_id == 3));
    assert_eq!(engine.store().teams_for_tournament(id).len(), 3);
}

#[test]
fn import_is_all_or_nothing() {
    let mut engine = engine();
    let id = tournament(&mut engine);
    engine.register_team(id, "Tigers", 1).unwrap();

    let err = engine.import_roster(id, "Lions\nTIGERS\n".as_bytes(), 1).unwrap_err();
    assert!(matches!(err, FixtureError::InvalidState(_)));
    assert_eq!(engine.store().teams_for_tournament(id).len(), 1);
}

#[test]
fn blank_team_names_are_rejected() {
    let mut engine = engine();
    let id = tournament(&mut engine);
    assert!(matches!(
        engine.register_team(id, "   ", 1),
        Err(FixtureError::InvalidState(_))
    ));
}

#[test]
fn tournament_dates_must_be_ordered() {
    let mut engine = engine();
    let day = |d| chrono::NaiveDate::from_ymd_opt(2026, 6, d);
    let input = NewTournament {
        name: "Summer League".to_string(),
        sport: Sport { id: 1, name: "Volleyball".to_string() },
        created_by: 1,
        start_date: day(20),
        end_date: day(10),
    };
    assert!(matches!(
        engine.create_tournament(input),
        Err(FixtureError::InvalidState(_))
    ));
}

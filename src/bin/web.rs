//! Fixture API server: tournaments, rosters, fixture generation and round progression over REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Pairing randomness and completion rules come from FIXTURE_SEED and FIXTURE_CANCELLED_IS_TERMINAL.

use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use fixture_engine::{
    EngineConfig, ErrorKind, FixtureEngine, FixtureError, InMemoryStore, MatchId, MatchUpdate,
    NewTournament, RoundConfig, RoundId, RoundType, ServerConfig, Tournament, TournamentId, UserId,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// One engine over one store. The write lock serialises every fixture mutation.
type AppState = Data<RwLock<FixtureEngine<InMemoryStore>>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RegisterTeamBody {
    name: String,
    #[serde(default)]
    created_by: UserId,
}

#[derive(Deserialize)]
struct CreatedByQuery {
    #[serde(default)]
    created_by: UserId,
}

#[derive(Deserialize)]
struct DummyTeamBody {
    round_value: u32,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct PadBody {
    round_value: u32,
}

#[derive(Deserialize)]
struct CreateRoundBody {
    round_value: u32,
    #[serde(default, rename = "type")]
    round_type: Option<RoundType>,
}

#[derive(Deserialize)]
struct RoundTypeBody {
    #[serde(rename = "type")]
    round_type: RoundType,
}

#[derive(Serialize)]
struct RoundWithMatches<T: Serialize, M: Serialize> {
    round: T,
    matches: M,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentRoundPath {
    id: TournamentId,
    round_value: u32,
}

#[derive(Deserialize)]
struct RoundPath {
    id: RoundId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn error_response(e: FixtureError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::InvalidState | ErrorKind::EmptyRoster => HttpResponse::BadRequest().json(body),
        ErrorKind::DataIntegrity => {
            log::error!("Data integrity failure: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn respond<T: Serialize>(result: Result<T, FixtureError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "fixture-engine",
    })
}

/// Create a tournament (returns it with id).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<NewTournament>) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(engine.create_tournament(body.into_inner()))
}

/// All tournaments, by start date then name.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let engine = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let mut tournaments: Vec<&Tournament> = engine.store().tournaments().collect();
    tournaments.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.name.cmp(&b.name)));
    HttpResponse::Ok().json(tournaments)
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let engine = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(engine.tournament(path.id))
}

/// Register one team (before the fixture is generated).
#[post("/api/tournaments/{id}/teams")]
async fn api_register_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterTeamBody>,
) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(engine.register_team(path.id, &body.name, body.created_by))
}

/// Register teams from a CSV body (one name per row, optional `name` header).
#[post("/api/tournaments/{id}/teams/import")]
async fn api_import_roster(
    state: AppState,
    path: Path<TournamentPath>,
    query: Query<CreatedByQuery>,
    body: Bytes,
) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(engine.import_roster(path.id, body.as_ref(), query.created_by))
}

#[post("/api/tournaments/{id}/dummy-teams")]
async fn api_create_dummy_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<DummyTeamBody>,
) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let body = body.into_inner();
    respond(engine.create_dummy_team(path.id, body.round_value, body.name))
}

/// Fill a round up to the next power of two with dummy teams.
#[post("/api/tournaments/{id}/dummy-teams/pad")]
async fn api_pad_dummy_teams(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<PadBody>,
) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(engine.pad_with_dummy_teams(path.id, body.round_value))
}

/// Delete a round's matches and the dummy teams created for it.
#[delete("/api/tournaments/{id}/rounds/{round_value}/dummy-teams")]
async fn api_delete_dummy_teams(state: AppState, path: Path<TournamentRoundPath>) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(
        engine
            .delete_dummy_teams_for_round_value(path.id, path.round_value)
            .map(|deleted| serde_json::json!({ "deleted": deleted })),
    )
}

/// Generate the bracket with a knockout preview of the first round.
#[get("/api/tournaments/{id}/fixture")]
async fn api_generate_fixture(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(engine.generate_fixture(path.id))
}

/// Generate the bracket with an explicit type per round.
#[post("/api/tournaments/{id}/fixture")]
async fn api_generate_fixture_with_types(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<Vec<RoundConfig>>,
) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(engine.generate_fixture_with_round_types(path.id, &body))
}

/// Persisted bracket with real match ids, statuses and winners.
#[get("/api/tournaments/{id}/fixture/existing")]
async fn api_existing_fixture(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let engine = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(engine.existing_fixture(path.id))
}

/// Remove every round, match and dummy team of the tournament.
#[delete("/api/tournaments/{id}/fixture")]
async fn api_reset_fixture(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match engine.reset_fixture(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

#[post("/api/tournaments/{id}/rounds")]
async fn api_create_round(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<CreateRoundBody>,
) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(
        engine
            .create_round(path.id, body.round_value, body.round_type)
            .map(|(round, matches)| RoundWithMatches { round, matches }),
    )
}

/// Must be registered before `/api/rounds/{id}` routes so the literal segment wins.
#[get("/api/rounds/available-types")]
async fn api_available_types() -> HttpResponse {
    HttpResponse::Ok().json(FixtureEngine::<InMemoryStore>::available_round_types())
}

/// Commit a type for the round and (re)generate its matches.
#[post("/api/rounds/{id}/select-type")]
async fn api_select_type(state: AppState, path: Path<RoundPath>, body: Json<RoundTypeBody>) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(engine.select_type_and_generate(path.id, body.round_type))
}

#[get("/api/rounds/{id}/is-complete")]
async fn api_is_complete(state: AppState, path: Path<RoundPath>) -> HttpResponse {
    let engine = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(engine.is_complete(path.id))
}

/// Advance winners into the next round; the body carries the next round's type.
#[post("/api/rounds/{id}/advance")]
async fn api_advance(state: AppState, path: Path<RoundPath>, body: Json<RoundTypeBody>) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(
        engine
            .advance(path.id, body.round_type)
            .map(|(round, matches)| RoundWithMatches { round, matches }),
    )
}

#[get("/api/rounds/{id}/standings")]
async fn api_round_standings(state: AppState, path: Path<RoundPath>) -> HttpResponse {
    let engine = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(engine.round_standings(path.id))
}

#[delete("/api/rounds/{id}")]
async fn api_delete_round(state: AppState, path: Path<RoundPath>) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match engine.delete_round(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

/// Report status, winner, scores, venue or time for a match.
#[put("/api/matches/{id}")]
async fn api_update_match(state: AppState, path: Path<MatchPath>, body: Json<MatchUpdate>) -> HttpResponse {
    let mut engine = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    respond(engine.record_result(path.id, body.into_inner()))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server = ServerConfig::from_env();
    let engine = FixtureEngine::new(InMemoryStore::new(), EngineConfig::from_env());
    log::info!(
        "Starting fixture server at http://{}:{} (seeded: {}, cancelled terminal: {})",
        server.host,
        server.port,
        engine.config().seed.is_some(),
        engine.config().cancelled_counts_as_complete
    );
    let state = Data::new(RwLock::new(engine));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_register_team)
            .service(api_import_roster)
            .service(api_create_dummy_team)
            .service(api_pad_dummy_teams)
            .service(api_delete_dummy_teams)
            .service(api_generate_fixture)
            .service(api_generate_fixture_with_types)
            .service(api_existing_fixture)
            .service(api_reset_fixture)
            .service(api_create_round)
            .service(api_available_types)
            .service(api_select_type)
            .service(api_is_complete)
            .service(api_advance)
            .service(api_round_standings)
            .service(api_delete_round)
            .service(api_update_match)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}

//! Single binary web server: JSON API over one in-memory tournament.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT. Set DATA_FILE
//! to persist the tournament as a JSON snapshot and SEED_CSV to seed session 1.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use padel_americano::config::Config;
use padel_americano::{
    apply_game_score, assign_session, complete_session, import_roster_csv, parse_score,
    reassign_court, replace_lineups, reset_all_scores, reset_session_scores, snapshot,
    swap_players, CourtId, ErrorKind, Game, GameSlot, LineupEdit, PlayerId, Roster, RosterId,
    Session, SessionId, Tournament, TournamentError,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;
use uuid::Uuid;

/// The tournament plus where it is persisted.
struct AppEntry {
    tournament: Tournament,
    data_file: Option<PathBuf>,
}

/// One lock serializes every operation on the tournament.
type AppState = Data<RwLock<AppEntry>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct CourtAssignment {
    court_id: CourtId,
    player_ids: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct AssignBody {
    assignments: Vec<CourtAssignment>,
}

#[derive(Deserialize)]
struct ReassignCourtBody {
    player_ids: Vec<PlayerId>,
}

/// Scores arrive untyped so negative values can be reported by name.
#[derive(Deserialize)]
struct ScoreBody {
    team_1_score: i64,
    team_2_score: i64,
}

#[derive(Deserialize)]
struct SwapBody {
    a: GameSlot,
    b: GameSlot,
}

#[derive(Deserialize)]
struct LineupsBody {
    games: Vec<LineupEdit>,
}

#[derive(Serialize)]
struct ResetResponse {
    games_reset: usize,
}

#[derive(Serialize)]
struct RosterView<'a> {
    #[serde(flatten)]
    roster: &'a Roster,
    court_name: String,
    games: Vec<&'a Game>,
}

#[derive(Serialize)]
struct SessionView<'a> {
    #[serde(flatten)]
    session: &'a Session,
    rosters: Vec<RosterView<'a>>,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segments: session id and court id (e.g. /api/sessions/{id}/courts/{court_id})
#[derive(Deserialize)]
struct SessionCourtPath {
    id: SessionId,
    court_id: CourtId,
}

#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

/// Human-readable lines naming the players, games or courts an error is about.
fn error_details(e: &TournamentError, t: &Tournament) -> Vec<String> {
    let court_name = |id: CourtId| {
        t.court(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|_| id.to_string())
    };
    let game_label = |id: Uuid| match t.game(id) {
        Ok(g) => {
            let court = t
                .roster(g.roster_id)
                .map(|r| court_name(r.court_id))
                .unwrap_or_default();
            format!("{} game {}", court, g.number)
        }
        Err(_) => id.to_string(),
    };
    match e {
        TournamentError::DistributionMismatch(list) => list
            .iter()
            .map(|m| format!("{}: {} games (must be 2)", t.player_name(m.player_id), m.games))
            .collect(),
        TournamentError::GamesPending(ids) => ids.iter().map(|&id| game_label(id)).collect(),
        TournamentError::GameAlreadyCompleted(id) => vec![game_label(*id)],
        TournamentError::CourtRosterSize { court, size } => {
            vec![format!("{}: {} players (must be 8, 10 or 12)", court_name(*court), size)]
        }
        TournamentError::CourtTooSmall { court, size, required } => {
            vec![format!("{}: {} players (needs {})", court_name(*court), size, required)]
        }
        TournamentError::CourtAssignedTwice { court } => vec![court_name(*court)],
        TournamentError::UnpairedCourts(courts) => {
            courts.iter().map(|&id| format!("{}: no games", court_name(id))).collect()
        }
        TournamentError::PlayerAssignedTwice { player }
        | TournamentError::PlayerNotOnRoster { player } => vec![t.player_name(*player)],
        TournamentError::DuplicatePlayerInGame { game, player } => {
            vec![format!("{} in game {}", t.player_name(*player), game)]
        }
        _ => Vec::new(),
    }
}

fn error_response(e: &TournamentError, t: &Tournament) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string(), "details": error_details(e, t) });
    match e.kind() {
        ErrorKind::Validation | ErrorKind::InvalidState => HttpResponse::BadRequest().json(body),
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::Consistency | ErrorKind::Storage => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Run a mutation as one transaction: apply it to a copy, persist the copy, then swap
/// it in. On any error the stored tournament is unchanged.
fn transact<T, F>(state: &AppState, op: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce(&mut Tournament) -> Result<T, TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut draft = g.tournament.clone();
    let value = match op(&mut draft) {
        Ok(v) => v,
        Err(e) => return error_response(&e, &draft),
    };
    if let Some(path) = &g.data_file {
        if let Err(e) = snapshot::save(&draft, path) {
            return error_response(&e, &g.tournament);
        }
    }
    g.tournament = draft;
    HttpResponse::Ok().json(value)
}

/// Run a read against the current tournament.
fn read<T, F>(state: &AppState, op: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce(&Tournament) -> Result<T, TournamentError>,
{
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match op(&g.tournament) {
        Ok(v) => HttpResponse::Ok().json(v),
        Err(e) => error_response(&e, &g.tournament),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-americano",
    })
}

/// Whole tournament state.
#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    read(&state, |t| Ok(t.clone()))
}

/// All players ranked by net points.
#[get("/api/standings")]
async fn api_standings(state: AppState) -> HttpResponse {
    read(&state, |t| Ok(t.standings()))
}

#[get("/api/courts")]
async fn api_courts(state: AppState) -> HttpResponse {
    read(&state, |t| {
        let mut courts = t.courts.clone();
        courts.sort_by_key(|c| c.rank);
        Ok(courts)
    })
}

/// Sessions in order, each with its rosters and games (history view).
#[get("/api/sessions")]
async fn api_sessions(state: AppState) -> HttpResponse {
    read(&state, |t| {
        let mut sessions: Vec<&Session> = t.sessions.iter().collect();
        sessions.sort_by_key(|s| s.number);
        let views: Vec<SessionView> = sessions
            .into_iter()
            .map(|session| SessionView {
                session,
                rosters: t
                    .session_rosters(session.id)
                    .into_iter()
                    .map(|roster| RosterView {
                        roster,
                        court_name: t
                            .court(roster.court_id)
                            .map(|c| c.name.clone())
                            .unwrap_or_default(),
                        games: t.roster_games(roster.id),
                    })
                    .collect(),
            })
            .collect();
        Ok(serde_json::to_value(views)?)
    })
}

/// Per-court ranked tables for one session.
#[get("/api/sessions/{id}/standings")]
async fn api_session_standings(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    read(&state, |t| t.court_standings(path.id))
}

/// Players not assigned to any court in the session.
#[get("/api/sessions/{id}/bench")]
async fn api_session_bench(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    read(&state, |t| {
        Ok(t.bench(path.id)?.into_iter().cloned().collect::<Vec<_>>())
    })
}

/// Add a player. Names are unique (case-insensitive).
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    transact(&state, |t| {
        let id = t.add_player(body.name.trim())?;
        Ok(t.player(id)?.clone())
    })
}

/// Append a pending session after the last one.
#[post("/api/sessions")]
async fn api_create_session(state: AppState) -> HttpResponse {
    transact(&state, |t| {
        let id = t.create_session();
        Ok(t.session(id)?.clone())
    })
}

/// Assign players to courts, generate games and activate the session.
#[post("/api/sessions/{id}/assign")]
async fn api_assign_session(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<AssignBody>,
) -> HttpResponse {
    let assignments: Vec<(CourtId, Vec<PlayerId>)> = body
        .into_inner()
        .assignments
        .into_iter()
        .map(|a| (a.court_id, a.player_ids))
        .collect();
    transact(&state, |t| {
        assign_session(t, path.id, &assignments)?;
        Ok(t.clone())
    })
}

/// Replace one court's roster in the active session and regenerate its games.
#[put("/api/sessions/{id}/courts/{court_id}")]
async fn api_reassign_court(
    state: AppState,
    path: Path<SessionCourtPath>,
    body: Json<ReassignCourtBody>,
) -> HttpResponse {
    let player_ids = body.into_inner().player_ids;
    transact(&state, |t| {
        let roster_id = reassign_court(t, path.id, path.court_id, player_ids)?;
        Ok(t.roster(roster_id)?.clone())
    })
}

/// Complete the session: promote/relegate into the next session and activate it.
#[post("/api/sessions/{id}/complete")]
async fn api_complete_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    transact(&state, |t| complete_session(t, path.id))
}

/// Reverse every recorded score in the session.
#[post("/api/sessions/{id}/reset")]
async fn api_reset_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    transact(&state, |t| {
        let games_reset = reset_session_scores(t, path.id)?;
        Ok(ResetResponse { games_reset })
    })
}

/// Submit a game's final score.
#[post("/api/games/{id}/score")]
async fn api_score_game(
    state: AppState,
    path: Path<IdPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    transact(&state, |t| {
        let team_1 = parse_score(body.team_1_score)?;
        let team_2 = parse_score(body.team_2_score)?;
        apply_game_score(t, path.id, team_1, team_2)?;
        Ok(t.game(path.id)?.clone())
    })
}

/// Swap the players at two seats of a roster's schedule.
#[post("/api/rosters/{id}/swap")]
async fn api_swap_players(
    state: AppState,
    path: Path<IdPath>,
    body: Json<SwapBody>,
) -> HttpResponse {
    let roster_id: RosterId = path.id;
    transact(&state, |t| {
        swap_players(t, roster_id, body.a, body.b)?;
        Ok(t.roster_games(roster_id).into_iter().cloned().collect::<Vec<_>>())
    })
}

/// Replace lineups of a roster's pending games.
#[put("/api/rosters/{id}/games")]
async fn api_replace_lineups(
    state: AppState,
    path: Path<IdPath>,
    body: Json<LineupsBody>,
) -> HttpResponse {
    let roster_id: RosterId = path.id;
    transact(&state, |t| {
        replace_lineups(t, roster_id, &body.games)?;
        Ok(t.roster_games(roster_id).into_iter().cloned().collect::<Vec<_>>())
    })
}

/// Zero every player's counters and every game's score.
#[post("/api/admin/reset-scores")]
async fn api_reset_all_scores(state: AppState) -> HttpResponse {
    transact(&state, |t| {
        reset_all_scores(t);
        Ok(t.standings())
    })
}

/// Load the snapshot if there is one; otherwise build a fresh tournament from config,
/// seeding session 1 from the CSV when configured.
fn load_initial(config: &Config) -> Result<Tournament, TournamentError> {
    if let Some(path) = &config.data_file {
        if let Some(t) = snapshot::load_if_exists(path)? {
            log::info!("Loaded tournament from {}", path.display());
            return Ok(t);
        }
    }
    let mut t = Tournament::with_sessions(&config.courts, config.sessions);
    if let Some(csv_path) = &config.seed_csv {
        let file = std::fs::File::open(csv_path)?;
        let assignments = import_roster_csv(&mut t, file)?;
        if let Some(first) = t.session_by_number(1).map(|s| s.id) {
            assign_session(&mut t, first, &assignments)?;
        }
    }
    if let Some(path) = &config.data_file {
        snapshot::save(&t, path)?;
    }
    Ok(t)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let tournament = load_initial(&config).map_err(std::io::Error::other)?;
    log::info!(
        "Tournament ready: {} court(s), {} session(s), {} player(s)",
        tournament.courts.len(),
        tournament.sessions.len(),
        tournament.players.len()
    );

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(AppEntry {
        tournament,
        data_file: config.data_file.clone(),
    }));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_get_tournament)
            .service(api_standings)
            .service(api_courts)
            .service(api_sessions)
            .service(api_session_standings)
            .service(api_session_bench)
            .service(api_add_player)
            .service(api_create_session)
            .service(api_assign_session)
            .service(api_reassign_court)
            .service(api_complete_session)
            .service(api_reset_session)
            .service(api_score_game)
            .service(api_swap_players)
            .service(api_replace_lineups)
            .service(api_reset_all_scores)
    })
    .bind(bind)?
    .run()
    .await
}

//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use padel_club_web::{
    apply_slot_updates, extract_pairs, finalize_rankings, generate_bracket, recompute_cumulative,
    settle_overall_scores, Category, CumulativeRanking, PairingEntry, Player, PlayerId,
    PointValue, Tournament, TournamentError, TournamentId, TournamentState,
};
use serde::Deserialize;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory club state: roster, tournaments and the cumulative leaderboard.
/// All tournament mutation happens under the write lock, so the
/// read-compute-write span of a result submission is serialized.
struct ClubState {
    players: Vec<Player>,
    tournaments: Vec<Tournament>,
    cumulative: Vec<CumulativeRanking>,
}

impl ClubState {
    fn new() -> Self {
        Self {
            players: Vec::new(),
            tournaments: Vec::new(),
            cumulative: Vec::new(),
        }
    }

    fn tournament_mut(&mut self, id: TournamentId) -> Option<&mut Tournament> {
        self.tournaments.iter_mut().find(|t| t.id == id)
    }

    /// Rebuild the cumulative leaderboard from every tournament's rankings.
    fn refresh_cumulative(&mut self) {
        self.cumulative = recompute_cumulative(&self.players, &self.tournaments, &self.cumulative);
    }
}

type AppState = Data<RwLock<ClubState>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    skill_level: Option<u8>,
}

#[derive(Deserialize)]
struct SetSkillBody {
    skill_level: Option<u8>,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    category: Option<Category>,
}

#[derive(Deserialize)]
struct SetCategoryBody {
    category: Option<Category>,
}

#[derive(Deserialize)]
struct ExtractPairsBody {
    player_ids: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct ResultBody {
    score_1: u32,
    score_2: u32,
}

#[derive(Deserialize)]
struct OverridePointsBody {
    points: u32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: Uuid,
}

/// Path segments: tournament id and pair id.
#[derive(Deserialize)]
struct TournamentPairPath {
    id: TournamentId,
    pair_id: Uuid,
}

/// Path segment: player id.
#[derive(Deserialize)]
struct PlayerPath {
    player_id: PlayerId,
}

fn error_body(e: impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": e.to_string() })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-club-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Register a player (names are unique, case-insensitive).
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(error_body("Player name must not be empty"));
    }
    if g.players.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
        return HttpResponse::BadRequest().json(error_body(TournamentError::DuplicatePlayerName));
    }
    let mut player = Player::new(name);
    player.skill_level = body.skill_level;
    g.players.push(player);
    HttpResponse::Ok().json(g.players.last())
}

/// Full roster.
#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(&g.players)
}

/// Set or clear a player's skill tier (1-5).
#[put("/api/players/{player_id}/skill")]
async fn api_set_skill(state: AppState, path: Path<PlayerPath>, body: Json<SetSkillBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if let Some(level) = body.skill_level {
        if !(1..=5).contains(&level) {
            return HttpResponse::BadRequest().json(error_body("Skill level must be 1-5"));
        }
    }
    match g.players.iter_mut().find(|p| p.id == path.player_id) {
        Some(p) => {
            p.skill_level = body.skill_level;
            HttpResponse::Ok().json(p)
        }
        None => HttpResponse::NotFound()
            .json(error_body(TournamentError::PlayerNotFound(path.player_id))),
    }
}

/// Award an MVP title (admin action; carried through leaderboard recomputes).
#[post("/api/players/{player_id}/mvp")]
async fn api_award_mvp(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if !g.players.iter().any(|p| p.id == path.player_id) {
        return HttpResponse::NotFound()
            .json(error_body(TournamentError::PlayerNotFound(path.player_id)));
    }
    match g.cumulative.iter_mut().find(|r| r.player_id == path.player_id) {
        Some(row) => row.mvp_titles += 1,
        None => {
            let mut row = CumulativeRanking::empty(path.player_id);
            row.mvp_titles = 1;
            g.cumulative.push(row);
        }
    }
    HttpResponse::Ok().json(&g.cumulative)
}

/// Create a new tournament (Setup state; category optional).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let tournament = Tournament::new(body.name.trim(), body.category);
    g.tournaments.push(tournament);
    HttpResponse::Ok().json(g.tournaments.last())
}

/// All tournaments, newest first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut tournaments: Vec<&Tournament> = g.tournaments.iter().collect();
    tournaments.sort_by_key(|t| std::cmp::Reverse(t.created_at));
    HttpResponse::Ok().json(&tournaments)
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournaments.iter().find(|t| t.id == path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => HttpResponse::NotFound().json(error_body("No tournament")),
    }
}

/// Change the tournament category. Re-derives ranking points under the new
/// table when standings already exist.
#[put("/api/tournaments/{id}/category")]
async fn api_set_category(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetCategoryBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let Some(t) = g.tournament_mut(path.id) else {
        return HttpResponse::NotFound().json(error_body("No tournament"));
    };
    t.category = body.category;
    if !t.rankings.is_empty() {
        finalize_rankings(t);
    }
    g.refresh_cumulative();
    match g.tournaments.iter().find(|t| t.id == path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => HttpResponse::NotFound().json(error_body("No tournament")),
    }
}

/// Extract pairs from 16 selected players. Replaces prior pairs and discards
/// the tournament's matches and rankings.
#[post("/api/tournaments/{id}/pairs")]
async fn api_extract_pairs(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ExtractPairsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut entries = Vec::with_capacity(body.player_ids.len());
    for &player_id in &body.player_ids {
        let Some(player) = g.players.iter().find(|p| p.id == player_id) else {
            return HttpResponse::BadRequest()
                .json(error_body(TournamentError::PlayerNotFound(player_id)));
        };
        let ranking_points = g
            .cumulative
            .iter()
            .find(|r| r.player_id == player_id)
            .map(|r| r.points.value())
            .unwrap_or(0);
        entries.push(PairingEntry {
            player: player.id,
            skill_level: player.skill_level,
            ranking_points,
        });
    }
    let Some(t) = g.tournament_mut(path.id) else {
        return HttpResponse::NotFound().json(error_body("No tournament"));
    };
    if let Err(e) = extract_pairs(t, &entries) {
        return HttpResponse::BadRequest().json(error_body(e));
    }
    log::info!("Tournament {}: extracted {} pairs", t.id, t.pairs.len());
    // The old ranking rows are gone; the leaderboard must not keep them.
    g.refresh_cumulative();
    match g.tournaments.iter().find(|t| t.id == path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => HttpResponse::NotFound().json(error_body("No tournament")),
    }
}

/// (Re)generate the bracket from extracted pairs. Destructive: existing
/// results and rankings are discarded.
#[post("/api/tournaments/{id}/bracket")]
async fn api_generate_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let Some(t) = g.tournament_mut(path.id) else {
        return HttpResponse::NotFound().json(error_body("No tournament"));
    };
    if let Err(e) = generate_bracket(t) {
        return HttpResponse::BadRequest().json(error_body(e));
    }
    log::info!("Tournament {}: bracket generated ({} matches)", t.id, t.matches.len());
    g.refresh_cumulative();
    match g.tournaments.iter().find(|t| t.id == path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => HttpResponse::NotFound().json(error_body("No tournament")),
    }
}

/// Record a match result, propagate the bracket and, once every match is
/// decided, finalize rankings, settle overall scores and refresh the
/// leaderboard.
#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let club = &mut *g;
    let Some(t) = club.tournaments.iter_mut().find(|t| t.id == path.id) else {
        return HttpResponse::NotFound().json(error_body("No tournament"));
    };
    if let Err(e) = t.record_result(path.match_id, body.score_1, body.score_2) {
        return HttpResponse::BadRequest().json(error_body(e));
    }
    let (_, skipped) = apply_slot_updates(t);
    for update in &skipped {
        log::warn!(
            "Tournament {}: match {} kept a stale result; clear it before its slots can change",
            t.id,
            update.match_id
        );
    }
    if t.is_complete() {
        finalize_rankings(t);
        if settle_overall_scores(t, &mut club.players) {
            log::info!("Tournament {}: completed, overall scores settled", t.id);
        }
        t.state = TournamentState::Completed;
        g.refresh_cumulative();
        return match g.tournaments.iter().find(|t| t.id == path.id) {
            Some(t) => HttpResponse::Ok().json(t),
            None => HttpResponse::NotFound().json(error_body("No tournament")),
        };
    }
    HttpResponse::Ok().json(&*t)
}

/// Retract a match result and re-derive downstream slots. Downstream results
/// recorded from the stale slots are reported, not auto-cleared.
#[delete("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_clear_result(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let Some(t) = g.tournament_mut(path.id) else {
        return HttpResponse::NotFound().json(error_body("No tournament"));
    };
    if let Err(e) = t.clear_result(path.match_id) {
        return HttpResponse::BadRequest().json(error_body(e));
    }
    let (_, skipped) = apply_slot_updates(t);
    for update in &skipped {
        log::warn!(
            "Tournament {}: match {} still holds a result derived from retracted inputs",
            t.id,
            update.match_id
        );
    }
    finalize_rankings(t);
    g.refresh_cumulative();
    match g.tournaments.iter().find(|t| t.id == path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => HttpResponse::NotFound().json(error_body("No tournament")),
    }
}

/// Current standings for one tournament (partial until completion).
#[get("/api/tournaments/{id}/rankings")]
async fn api_tournament_rankings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournaments.iter().find(|t| t.id == path.id) {
        Some(t) => HttpResponse::Ok().json(&t.rankings),
        None => HttpResponse::NotFound().json(error_body("No tournament")),
    }
}

/// Pin a pair's tournament points to an admin value (survives recomputes).
#[put("/api/tournaments/{id}/rankings/{pair_id}/points")]
async fn api_override_pair_points(
    state: AppState,
    path: Path<TournamentPairPath>,
    body: Json<OverridePointsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let Some(t) = g.tournament_mut(path.id) else {
        return HttpResponse::NotFound().json(error_body("No tournament"));
    };
    if let Err(e) = t.override_pair_points(path.pair_id, body.points) {
        return HttpResponse::BadRequest().json(error_body(e));
    }
    g.refresh_cumulative();
    match g.tournaments.iter().find(|t| t.id == path.id) {
        Some(t) => HttpResponse::Ok().json(&t.rankings),
        None => HttpResponse::NotFound().json(error_body("No tournament")),
    }
}

/// Cumulative leaderboard, highest points first.
#[get("/api/rankings")]
async fn api_cumulative_rankings(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut rows: Vec<&CumulativeRanking> = g.cumulative.iter().collect();
    rows.sort_by_key(|r| std::cmp::Reverse(r.points.value()));
    HttpResponse::Ok().json(&rows)
}

/// Pin a player's cumulative points; the row is preserved verbatim by
/// subsequent recomputes.
#[put("/api/rankings/{player_id}/points")]
async fn api_override_cumulative_points(
    state: AppState,
    path: Path<PlayerPath>,
    body: Json<OverridePointsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if !g.players.iter().any(|p| p.id == path.player_id) {
        return HttpResponse::NotFound()
            .json(error_body(TournamentError::PlayerNotFound(path.player_id)));
    }
    match g.cumulative.iter_mut().find(|r| r.player_id == path.player_id) {
        Some(row) => row.points = PointValue::Overridden(body.points),
        None => {
            let mut row = CumulativeRanking::empty(path.player_id);
            row.points = PointValue::Overridden(body.points);
            g.cumulative.push(row);
        }
    }
    HttpResponse::Ok().json(&g.cumulative)
}

/// Admin: rebuild every tournament's rankings and the leaderboard from match
/// outcomes alone (overridden rows stay pinned).
#[post("/api/rankings/recalculate")]
async fn api_recalculate_all(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    for t in &mut g.tournaments {
        if !t.matches.is_empty() {
            finalize_rankings(t);
        }
    }
    g.refresh_cumulative();
    log::info!("Recalculated rankings for {} tournament(s)", g.tournaments.len());
    HttpResponse::Ok().json(&g.cumulative)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(ClubState::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_add_player)
            .service(api_list_players)
            .service(api_set_skill)
            .service(api_award_mvp)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_set_category)
            .service(api_extract_pairs)
            .service(api_generate_bracket)
            .service(api_record_result)
            .service(api_clear_result)
            .service(api_tournament_rankings)
            .service(api_override_pair_points)
            .service(api_cumulative_rankings)
            .service(api_override_cumulative_points)
            .service(api_recalculate_all)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

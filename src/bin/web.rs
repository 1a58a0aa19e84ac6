//! Single binary web server: REST API over in-memory event draw sessions.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use court_draw_web::{
    eligible_players, run_auto_draw, select_layout, CourtMatch, DrawError, EligibilityCriteria,
    EligiblePlayer, EventDraw, EventId, Member, TeamSide,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// One event's draw session: roster, criteria, match type, and match state.
#[derive(Clone, Debug, Serialize)]
struct EventSession {
    event_id: EventId,
    created_at: DateTime<Utc>,
    match_type: Option<String>,
    roster: Vec<Member>,
    criteria: EligibilityCriteria,
    draw: EventDraw,
}

impl EventSession {
    fn new(match_type: Option<String>) -> Self {
        let event_id = Uuid::new_v4();
        Self {
            event_id,
            created_at: Utc::now(),
            match_type,
            roster: Vec::new(),
            criteria: EligibilityCriteria::default(),
            draw: EventDraw::new(event_id),
        }
    }

    /// Candidate pool for the current roster + criteria (reserves included;
    /// they are excluded at auto-draw time, not here).
    fn eligible(&self) -> Vec<EligiblePlayer> {
        eligible_players(&self.roster, &self.criteria)
    }
}

/// Per-event entry: session data + last activity time (for auto-cleanup).
struct EventEntry {
    session: EventSession,
    last_activity: Instant,
}

/// In-memory state: many events by ID. Entries are removed after inactivity.
type AppState = Data<RwLock<HashMap<EventId, EventEntry>>>;

/// Inactivity threshold: events not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateEventBody {
    #[serde(default)]
    match_type: Option<String>,
}

#[derive(Deserialize)]
struct MatchTypeBody {
    match_type: Option<String>,
}

#[derive(Deserialize)]
struct RosterBody {
    members: Vec<Member>,
}

#[derive(Deserialize)]
struct ResourcesBody {
    #[serde(default)]
    court_ids: Vec<Uuid>,
    #[serde(default)]
    field_ids: Vec<Uuid>,
}

#[derive(Deserialize)]
struct AssignPlayerBody {
    member_id: Uuid,
    team_side: TeamSide,
    position_slot: String,
}

/// Picker query: when the edited slot is given, its current occupant is not
/// treated as already assigned (so the user can re-confirm the same player).
#[derive(Deserialize)]
struct EligibleQuery {
    match_id: Option<Uuid>,
    side: Option<TeamSide>,
    slot: Option<String>,
}

/// Path segment: event id (e.g. /api/events/{id})
#[derive(Deserialize)]
struct EventPath {
    id: EventId,
}

/// Path segments: event id and match id.
#[derive(Deserialize)]
struct EventMatchPath {
    id: EventId,
    match_id: Uuid,
}

/// Path segments: event id, match id, and member id.
#[derive(Deserialize)]
struct EventMatchMemberPath {
    id: EventId,
    match_id: Uuid,
    member_id: Uuid,
}

/// Match plus per-side formatted skill averages for display.
#[derive(Serialize)]
struct MatchView {
    #[serde(flatten)]
    game: CourtMatch,
    team_a_skill_average: Option<String>,
    team_b_skill_average: Option<String>,
}

impl MatchView {
    fn from_match(m: &CourtMatch) -> Self {
        Self {
            team_a_skill_average: m
                .skill_average(TeamSide::A)
                .map(court_draw_web::format_skill_average),
            team_b_skill_average: m
                .skill_average(TeamSide::B)
                .map(court_draw_web::format_skill_average),
            game: m.clone(),
        }
    }
}

/// Eligible player plus assignment flag for the slot-picker.
#[derive(Serialize)]
struct EligibleView {
    #[serde(flatten)]
    player: EligiblePlayer,
    is_assigned: bool,
}

fn error_status(e: &DrawError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        DrawError::MatchNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "court-draw-web",
    })
}

/// Create a new event session (returns it with id; client stores id for
/// subsequent requests).
#[post("/api/events")]
async fn api_create_event(state: AppState, body: Option<Json<CreateEventBody>>) -> HttpResponse {
    let match_type = body.and_then(|b| b.into_inner().match_type);
    let session = EventSession::new(match_type);
    let id = session.event_id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        EventEntry {
            session,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(&g.get(&id).unwrap().session)
}

/// Get an event session by id (404 if not found). Touching it refreshes
/// last_activity.
#[get("/api/events/{id}")]
async fn api_get_event(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.session)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    }
}

/// Set or clear the event's match type (drives layout selection).
#[put("/api/events/{id}/match-type")]
async fn api_set_match_type(
    state: AppState,
    path: Path<EventPath>,
    body: Json<MatchTypeBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    entry.session.match_type = body.into_inner().match_type;
    HttpResponse::Ok().json(&entry.session)
}

/// Install the event's roster members (replaces the previous roster).
#[put("/api/events/{id}/roster")]
async fn api_set_roster(
    state: AppState,
    path: Path<EventPath>,
    body: Json<RosterBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    entry.session.roster = body.into_inner().members;
    log::info!(
        "Event {}: roster set ({} members)",
        path.id,
        entry.session.roster.len()
    );
    HttpResponse::Ok().json(&entry.session)
}

/// Install the event's eligibility criteria.
#[put("/api/events/{id}/criteria")]
async fn api_set_criteria(
    state: AppState,
    path: Path<EventPath>,
    body: Json<EligibilityCriteria>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    entry.session.criteria = body.into_inner();
    HttpResponse::Ok().json(&entry.session)
}

/// Sync matches to the selected courts and fields (one match per resource;
/// existing assignments for still-selected resources survive).
#[put("/api/events/{id}/resources")]
async fn api_set_resources(
    state: AppState,
    path: Path<EventPath>,
    body: Json<ResourcesBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    let b = body.into_inner();
    entry
        .session
        .draw
        .sync_matches_to_resources(&b.court_ids, &b.field_ids);
    HttpResponse::Ok().json(&entry.session)
}

/// Eligible players for the picker, flagged with assignment state. With
/// match_id/side/slot given, the edited slot's occupant stays unflagged.
#[get("/api/events/{id}/eligible")]
async fn api_get_eligible(
    state: AppState,
    path: Path<EventPath>,
    query: Query<EligibleQuery>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    let session = &entry.session;
    let assigned = match (query.match_id, query.side, &query.slot) {
        (Some(match_id), Some(side), Some(slot)) => session
            .draw
            .assigned_player_ids_excluding_slot(match_id, side, slot),
        _ => session.draw.assigned_player_ids(),
    };
    let players: Vec<EligibleView> = session
        .eligible()
        .into_iter()
        .map(|p| EligibleView {
            is_assigned: assigned.contains(&p.member_id),
            player: p,
        })
        .collect();
    HttpResponse::Ok().json(players)
}

/// Auto-Draw: re-generate all match assignments from the eligible pool.
#[post("/api/events/{id}/auto-draw")]
async fn api_auto_draw(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    let layout = select_layout(entry.session.match_type.as_deref());
    let pool = entry.session.eligible();
    match run_auto_draw(
        &mut entry.session.draw,
        &pool,
        &layout,
        &mut rand::thread_rng(),
    ) {
        Ok(()) => {
            log::info!(
                "Event {}: auto-draw over {} matches",
                path.id,
                entry.session.draw.matches.len()
            );
            HttpResponse::Ok().json(&entry.session)
        }
        Err(e) => {
            log::warn!("Event {}: auto-draw failed: {}", path.id, e);
            error_status(&e)
        }
    }
}

/// Manually assign a player to one slot (overwrites any occupant).
#[post("/api/events/{id}/matches/{match_id}/assign")]
async fn api_assign_player(
    state: AppState,
    path: Path<EventMatchPath>,
    body: Json<AssignPlayerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    let b = body.into_inner();
    let player = match entry
        .session
        .eligible()
        .into_iter()
        .find(|p| p.member_id == b.member_id)
    {
        Some(p) => p,
        None => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "Member is not eligible for this event" }))
        }
    };
    let layout = select_layout(entry.session.match_type.as_deref());
    match entry.session.draw.assign_player(
        path.match_id,
        &player,
        b.team_side,
        &b.position_slot,
        &layout,
    ) {
        Ok(()) => HttpResponse::Ok().json(&entry.session),
        Err(e) => error_status(&e),
    }
}

/// Remove a member from a match (both sides).
#[delete("/api/events/{id}/matches/{match_id}/players/{member_id}")]
async fn api_remove_player(state: AppState, path: Path<EventMatchMemberPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    match entry.session.draw.remove_player(path.match_id, path.member_id) {
        Ok(()) => HttpResponse::Ok().json(&entry.session),
        Err(e) => error_status(&e),
    }
}

/// Current matches with per-side skill averages.
#[get("/api/events/{id}/matches")]
async fn api_get_matches(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    let views: Vec<MatchView> = entry
        .session
        .draw
        .matches
        .iter()
        .map(MatchView::from_match)
        .collect();
    HttpResponse::Ok().json(views)
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

    let state = Data::new(RwLock::new(HashMap::<EventId, EventEntry>::new()));

    // Background task: every 30 minutes, remove events inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive event(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_event)
            .service(api_get_event)
            .service(api_set_match_type)
            .service(api_set_roster)
            .service(api_set_criteria)
            .service(api_set_resources)
            .service(api_get_eligible)
            .service(api_auto_draw)
            .service(api_assign_player)
            .service(api_remove_player)
            .service(api_get_matches)
    })
    .bind(bind)?
    .run()
    .await
}

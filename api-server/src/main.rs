use actix_cors::Cors;
use actix_rt::task::JoinHandle;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use maze_session::{
    ClockToken, Difficulty, Direction, MazeSession, MazeSnapshot, MoveOutcome, ScoreLedger,
};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

mod config;
mod error;

use config::ServerConfig;
use error::ApiError;

/// Upper bound on a submitted move list
const MAX_MOVES: usize = 10_000;

/// The single in-memory game served to the front-end
///
/// The session and its ticker live behind one mutex, so input requests and
/// clock ticks are applied one at a time.
struct Game {
    session: MazeSession<ScoreLedger>,
    ticker: Option<JoinHandle<()>>,
}

struct AppState {
    game: Mutex<Game>,
}

impl AppState {
    fn new(difficulty: Difficulty, seed: u32) -> Self {
        Self {
            game: Mutex::new(Game {
                session: MazeSession::new(difficulty, seed, ScoreLedger::new()),
                ticker: None,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Game>, ApiError> {
        self.game
            .lock()
            .map_err(|_| ApiError::Internal("Game state lock poisoned".to_string()))
    }
}

impl Game {
    /// Replace the ticker with one bound to `token`
    ///
    /// The old interval is aborted; even if one of its ticks is already
    /// queued, the session rejects it because its token is stale.
    fn restart_ticker(&mut self, state: web::Data<AppState>, token: ClockToken) {
        self.stop_ticker();
        self.ticker = Some(spawn_ticker(state, token));
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

fn spawn_ticker(state: web::Data<AppState>, token: ClockToken) -> JoinHandle<()> {
    actix_rt::spawn(async move {
        let mut interval = actix_rt::time::interval(Duration::from_secs(1));
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            let counted = match state.game.lock() {
                Ok(mut game) => game.session.tick(token),
                Err(_) => false,
            };
            if !counted {
                break;
            }
        }
    })
}

// Request/Response types

#[derive(Debug, Deserialize)]
struct NewSessionRequest {
    difficulty: String,
}

#[derive(Debug, Deserialize)]
struct MoveRequest {
    /// `up`, `right`, `down` or `left`
    direction: Option<String>,
    /// Keyboard key name; only the arrow keys move
    key: Option<String>,
}

#[derive(Debug, Serialize)]
struct MoveResponse {
    result: MoveOutcome,
    snapshot: MazeSnapshot,
}

#[derive(Debug, Deserialize)]
struct VerifyPathRequest {
    moves: Vec<u8>,
}

#[derive(Debug, Serialize)]
struct VerifyPathResponse {
    valid: bool,
    move_count: usize,
}

// API Handlers

/// GET /api/session
/// Current snapshot
async fn get_session(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let game = state.lock()?;
    Ok(HttpResponse::Ok().json(game.session.snapshot()))
}

/// POST /api/session
/// Start a new maze with the requested difficulty
async fn new_session(
    state: web::Data<AppState>,
    req: web::Json<NewSessionRequest>,
) -> Result<HttpResponse, ApiError> {
    let difficulty: Difficulty = req.difficulty.parse().map_err(ApiError::BadRequest)?;
    tracing::info!("Received new-session request ({})", difficulty);

    let mut game = state.lock()?;
    let token = game.session.new_session(difficulty);
    game.restart_ticker(state.clone(), token);
    Ok(HttpResponse::Ok().json(game.session.snapshot()))
}

/// POST /api/reset
/// New maze with the current difficulty
async fn reset(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    tracing::info!("Received reset request");

    let mut game = state.lock()?;
    let token = game.session.reset();
    game.restart_ticker(state.clone(), token);
    Ok(HttpResponse::Ok().json(game.session.snapshot()))
}

/// POST /api/move
/// Move the player by direction name or keyboard key
async fn move_player(
    state: web::Data<AppState>,
    req: web::Json<MoveRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut game = state.lock()?;

    let result = match (&req.direction, &req.key) {
        (Some(direction), _) => {
            let direction: Direction = direction.parse().map_err(ApiError::BadRequest)?;
            game.session.move_player(direction)
        }
        (None, Some(key)) => game.session.handle_key(key),
        (None, None) => {
            return Err(ApiError::BadRequest(
                "Expected a 'direction' or a 'key'".to_string(),
            ))
        }
    };

    if let MoveOutcome::Won { points, .. } = result {
        tracing::info!("Maze solved, {} points awarded", points);
        game.stop_ticker();
    }

    Ok(HttpResponse::Ok().json(MoveResponse {
        result,
        snapshot: game.session.snapshot(),
    }))
}

/// POST /api/verify-path
/// Check a move list (0=up, 1=right, 2=down, 3=left) against the current maze
async fn verify_path(
    state: web::Data<AppState>,
    req: web::Json<VerifyPathRequest>,
) -> Result<HttpResponse, ApiError> {
    if req.moves.len() > MAX_MOVES {
        return Err(ApiError::BadRequest(format!(
            "Too many moves: {} (max {})",
            req.moves.len(),
            MAX_MOVES
        )));
    }

    let moves = req
        .moves
        .iter()
        .map(|&code| {
            Direction::from_code(code)
                .ok_or_else(|| ApiError::BadRequest(format!("Invalid move code: {}", code)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let game = state.lock()?;
    let valid = game.session.verify_path(&moves);
    tracing::info!("Verified {} moves: valid={}", moves.len(), valid);

    Ok(HttpResponse::Ok().json(VerifyPathResponse {
        valid,
        move_count: moves.len(),
    }))
}

/// GET /api/score
/// Points awarded so far
async fn score(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let game = state.lock()?;
    Ok(HttpResponse::Ok().json(game.session.scores()))
}

/// GET /health
/// Health check endpoint
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "maze-api"
    }))
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/session", web::get().to(get_session))
        .route("/api/session", web::post().to(new_session))
        .route("/api/reset", web::post().to(reset))
        .route("/api/move", web::post().to(move_player))
        .route("/api/verify-path", web::post().to(verify_path))
        .route("/api/score", web::get().to(score));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting Maze API Server");

    let state = web::Data::new(AppState::new(config.difficulty, config.seed));
    {
        let mut game = state
            .lock()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        if let Some(token) = game.session.clock_token() {
            game.restart_ticker(state.clone(), token);
        }
    }

    tracing::info!("Binding to {}", config.bind_address);

    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().limit(json_limit))
            .configure(routes)
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await
}

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::debug;

use crate::engine::game::Game;
use crate::engine::types::{Color, Move, Position};
use crate::engine::wire::Snapshot;

use super::errors::ApiError;
use super::models::*;
use super::state::SharedState;

// =========================================================================
// Health
// =========================================================================

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    let games = state.games.read().await.len();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: "rust-checkers".to_string(),
        uptime,
        games,
        max_games: state.config.max_games,
    })
}

// =========================================================================
// Create Game
// =========================================================================

/// POST /api/games
pub async fn create_game(
    State(state): State<SharedState>,
    Json(input): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameResponse>), ApiError> {
    let mut game = match input.snapshot {
        Some(ref snapshot) => Game::from_snapshot(snapshot)?,
        None => Game::new(),
    };

    game.white_player = input.white_player.unwrap_or_else(|| "White".into());
    game.black_player = input.black_player.unwrap_or_else(|| "Black".into());

    let response = game_to_response(&game);

    let mut games = state.games.write().await;
    if games.len() >= state.config.max_games {
        return Err(ApiError::TooManyGames(state.config.max_games));
    }
    games.insert(game.id.clone(), game);

    Ok((StatusCode::CREATED, Json(response)))
}

// =========================================================================
// List Games
// =========================================================================

/// GET /api/games
pub async fn list_games(
    State(state): State<SharedState>,
    Query(query): Query<ListGamesQuery>,
) -> Json<ListGamesResponse> {
    let games = state.games.read().await;

    let limit = query.limit.unwrap_or(10).min(100);
    let offset = query.offset.unwrap_or(0);

    let mut filtered: Vec<&Game> = games.values().collect();

    if let Some(ref status_filter) = query.status {
        let sf = status_filter.to_lowercase();
        filtered.retain(|g| lifecycle_name(g) == sf);
    }

    let total = filtered.len();

    // Newest first.
    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let page: Vec<GameResponse> = filtered
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(game_to_response)
        .collect();

    Json(ListGamesResponse {
        games: page,
        total,
        limit,
        offset,
    })
}

// =========================================================================
// Get Game
// =========================================================================

/// GET /api/games/:id
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let games = state.games.read().await;
    let game = games
        .get(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;
    Ok(Json(game_to_response(game)))
}

// =========================================================================
// Delete Game
// =========================================================================

/// DELETE /api/games/:id
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let mut games = state.games.write().await;
    games
        .remove(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;
    Ok(Json(DeleteResponse {
        success: true,
        message: "Game deleted".to_string(),
    }))
}

// =========================================================================
// Make Move
// =========================================================================

/// POST /api/games/:id/moves
pub async fn make_move(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(input): Json<MoveRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let mut games = state.games.write().await;
    let game = games
        .get_mut(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;

    if !game.is_active() {
        return Err(ApiError::GameOver(game.status().as_str().to_string()));
    }
    if !game.make_move(input.from, input.to) {
        return Err(ApiError::IllegalMove {
            from: input.from,
            to: input.to,
        });
    }

    Ok(Json(game_to_response(game)))
}

// =========================================================================
// Legal Moves
// =========================================================================

/// GET /api/games/:id/legal-moves
pub async fn legal_moves(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<LegalMovesQuery>,
) -> Result<Json<LegalMovesResponse>, ApiError> {
    let games = state.games.read().await;
    let game = games
        .get(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;

    let moves: Vec<Move> = match (query.row, query.col) {
        (Some(row), Some(col)) => {
            let from = Position::new(row, col);
            if !from.in_bounds() {
                return Err(ApiError::InvalidRequest(format!("square off the board: {from}")));
            }
            game.legal_moves_from(from)
        }
        (None, None) => game.legal_moves(),
        _ => {
            return Err(ApiError::InvalidRequest(
                "row and col must be given together".to_string(),
            ));
        }
    };

    Ok(Json(LegalMovesResponse {
        count: moves.len(),
        moves,
    }))
}

// =========================================================================
// Forfeit
// =========================================================================

/// POST /api/games/:id/forfeit
pub async fn forfeit(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(input): Json<ForfeitRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let color = Color::from_str_loose(&input.color)
        .ok_or_else(|| ApiError::InvalidRequest(format!("invalid color: {}", input.color)))?;

    let mut games = state.games.write().await;
    let game = games
        .get_mut(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;

    if !game.forfeit(color) {
        return Err(ApiError::GameOver(game.status().as_str().to_string()));
    }
    Ok(Json(game_to_response(game)))
}

// =========================================================================
// Snapshot
// =========================================================================

/// GET /api/games/:id/snapshot
pub async fn get_snapshot(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Snapshot>, ApiError> {
    let games = state.games.read().await;
    let game = games
        .get(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;
    Ok(Json(game.snapshot()))
}

/// PUT /api/games/:id/snapshot
pub async fn put_snapshot(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(snapshot): Json<Snapshot>,
) -> Result<Json<GameResponse>, ApiError> {
    let mut games = state.games.write().await;
    let game = games
        .get_mut(&id)
        .ok_or_else(|| ApiError::GameNotFound(id.clone()))?;

    if let Err(err) = game.apply_snapshot(&snapshot) {
        debug!(game_id = %id, error = %err, "snapshot rejected");
        return Err(err.into());
    }
    Ok(Json(game_to_response(game)))
}

// =========================================================================
// Tests
// =========================================================================

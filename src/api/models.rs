use serde::{Deserialize, Serialize};

use crate::engine::game::{Game, MoveRecord};
use crate::engine::types::{BOARD_SIZE, Color, Move, Piece, Position};
use crate::engine::wire::{Snapshot, encode_grid};

// ---------------------------------------------------------------------------
// Request models
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub white_player: Option<String>,
    pub black_player: Option<String>,
    /// Start from a peer's state instead of the opening layout.
    pub snapshot: Option<Snapshot>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub from: Position,
    pub to: Position,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForfeitRequest {
    pub color: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGamesQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalMovesQuery {
    pub row: Option<i8>,
    pub col: Option<i8>,
}

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub engine: String,
    pub uptime: u64,
    pub games: usize,
    pub max_games: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub id: String,
    /// `board[row][col]`, row 0 first.
    pub board: Vec<Vec<Option<PieceInfo>>>,
    /// The 64-character wire encoding of `board`.
    pub board_string: String,
    /// "active" or "finished".
    pub status: String,
    /// "WHITE", "BLACK", "DRAW" or "NONE".
    pub winner: String,
    pub current_player: Color,
    pub last_move: Position,
    pub moves_since_progress: u32,
    /// The piece that must continue a chain capture, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_piece: Option<Position>,
    pub piece_counts: PieceCounts,
    pub move_history: Vec<MoveHistoryEntry>,
    pub players: Players,
    pub created_at: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PieceInfo {
    pub color: Color,
    pub king: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceCounts {
    pub white: usize,
    pub black: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveHistoryEntry {
    pub player: Color,
    pub from: Position,
    pub to: Position,
    pub captured: Option<Position>,
    pub promoted: bool,
    pub chain_continues: bool,
    pub result: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Players {
    pub white: String,
    pub black: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGamesResponse {
    pub games: Vec<GameResponse>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalMovesResponse {
    pub moves: Vec<Move>,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Lifecycle label used in responses and the list filter.
pub fn lifecycle_name(game: &Game) -> &'static str {
    if game.is_active() {
        "active"
    } else {
        "finished"
    }
}

fn piece_info(piece: Piece) -> PieceInfo {
    PieceInfo {
        color: piece.color(),
        king: piece.is_king(),
    }
}

/// Build the 8×8 board array for the API response.
pub fn board_to_api(game: &Game) -> Vec<Vec<Option<PieceInfo>>> {
    let mut rows = Vec::with_capacity(BOARD_SIZE);
    for cells in game.board().grid() {
        rows.push(cells.iter().map(|cell| cell.map(piece_info)).collect());
    }
    rows
}

fn history_entry(rec: &MoveRecord) -> MoveHistoryEntry {
    MoveHistoryEntry {
        player: rec.player,
        from: rec.mv.from,
        to: rec.mv.to,
        captured: rec.captured,
        promoted: rec.promoted,
        chain_continues: rec.chain_continues,
        result: rec.status_after.as_str().to_string(),
    }
}

/// Convert internal Game to full API GameResponse.
pub fn game_to_response(game: &Game) -> GameResponse {
    let board = game.board();
    GameResponse {
        id: game.id.clone(),
        board: board_to_api(game),
        board_string: encode_grid(board.grid()),
        status: lifecycle_name(game).to_string(),
        winner: game.status().as_str().to_string(),
        current_player: game.side_to_move(),
        last_move: board.last_move(),
        moves_since_progress: board.moves_since_progress(),
        forced_piece: board.forced_actor(),
        piece_counts: PieceCounts {
            white: board.piece_count(Color::White),
            black: board.piece_count(Color::Black),
        },
        move_history: game.move_history().iter().map(history_entry).collect(),
        players: Players {
            white: game.white_player.clone(),
            black: game.black_player.clone(),
        },
        created_at: game.created_at.to_rfc3339(),
    }
}

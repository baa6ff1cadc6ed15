//! Stateful game session wrapping `Board`.
//!
//! `Game` owns the board for the life of one match, records the moves played,
//! and enforces the active/inactive lifecycle: once a result is reached (or a
//! side forfeits) no further moves are accepted. It is the primary type the
//! API layer interacts with.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::engine::board::Board;
use crate::engine::turn::Turn;
use crate::engine::types::{CheckersError, Color, GameStatus, Move, Position};
use crate::engine::wire::Snapshot;

// =========================================================================
// MoveRecord
// =========================================================================

/// A recorded move in the game history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub player: Color,
    pub mv: Move,
    /// Square of the captured piece, if any.
    pub captured: Option<Position>,
    pub promoted: bool,
    /// Whether the same side had to move again afterwards.
    pub chain_continues: bool,
    /// What game status resulted from this move.
    pub status_after: GameStatus,
}

// =========================================================================
// Game
// =========================================================================

/// A checkers match with history and lifecycle tracking.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    is_active: bool,
    forfeited_by: Option<Color>,
    move_history: Vec<MoveRecord>,

    // Metadata
    pub id: String,
    pub white_player: String,
    pub black_player: String,
    pub created_at: DateTime<Utc>,
}

impl Game {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// Create a new game from the standard opening layout.
    pub fn new() -> Self {
        Self::with_board(Board::starting(), true)
    }

    /// Create a game from a peer's snapshot.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, CheckersError> {
        let board = snapshot.to_board()?;
        Ok(Self::with_board(board, snapshot.is_active))
    }

    fn with_board(board: Board, is_active: bool) -> Self {
        Self {
            board,
            is_active,
            forfeited_by: None,
            move_history: Vec::new(),
            id: Uuid::new_v4().to_string(),
            white_player: "White".into(),
            black_player: "Black".into(),
            created_at: Utc::now(),
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whether moves are still accepted.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Side to move.
    pub fn side_to_move(&self) -> Color {
        self.board.turn()
    }

    /// Moves played in this session (not including state restored from a
    /// snapshot).
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    pub fn forfeited_by(&self) -> Option<Color> {
        self.forfeited_by
    }

    /// Current status. A forfeit overrides whatever the board says.
    pub fn status(&self) -> GameStatus {
        match self.forfeited_by {
            Some(loser) => GameStatus::Won(!loser),
            None => self.board.game_status(),
        }
    }

    /// All legal moves in the current position; empty once the game ended.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_active {
            self.board.legal_moves()
        } else {
            Vec::new()
        }
    }

    /// Legal moves of the piece on `from`.
    pub fn legal_moves_from(&self, from: Position) -> Vec<Move> {
        if self.is_active {
            self.board.legal_moves_from(from)
        } else {
            Vec::new()
        }
    }

    // -----------------------------------------------------------------
    // Make move
    // -----------------------------------------------------------------

    /// Play a move. Returns `false` with no state change if the session is
    /// over or the move is illegal.
    pub fn make_move(&mut self, from: Position, to: Position) -> bool {
        if !self.is_active {
            debug!(game_id = %self.id, %from, %to, "move rejected: game is over");
            return false;
        }

        let Some(outcome) = self.board.play(Move::new(from, to)) else {
            debug!(game_id = %self.id, %from, %to, "move rejected: illegal");
            return false;
        };

        let status = self.board.game_status();
        self.move_history.push(MoveRecord {
            player: outcome.player,
            mv: outcome.mv,
            captured: outcome.captured,
            promoted: outcome.promoted,
            chain_continues: outcome.next == Turn::Retain,
            status_after: status,
        });

        if status.is_game_over() {
            self.is_active = false;
            info!(game_id = %self.id, result = status.as_str(), "game over");
        }
        true
    }

    // -----------------------------------------------------------------
    // Forfeit
    // -----------------------------------------------------------------

    /// `color` concedes. Returns `false` if the session had already ended.
    ///
    /// The wire record has no forfeit field. A peer that applies this
    /// session's snapshot becomes inactive but reports `GameStatus::Ongoing`
    /// (`"NONE"`) unless its own board is decided, so an inactive session with
    /// no winner means the game was abandoned, not that it is still running.
    pub fn forfeit(&mut self, color: Color) -> bool {
        if !self.is_active {
            return false;
        }
        self.forfeited_by = Some(color);
        self.is_active = false;
        info!(game_id = %self.id, loser = %color, "game forfeited");
        true
    }

    // -----------------------------------------------------------------
    // Synchronization
    // -----------------------------------------------------------------

    /// The wire record for this session.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.board, self.is_active)
    }

    /// Replace the board and lifecycle flag with a peer's snapshot. The move
    /// history restarts, and a local forfeit is kept only while the snapshot
    /// says the game is over. On error the session is left untouched.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), CheckersError> {
        let board = snapshot.to_board()?;
        self.board = board;
        self.is_active = snapshot.is_active;
        self.move_history.clear();
        if self.is_active {
            self.forfeited_by = None;
        }
        debug!(
            game_id = %self.id,
            turn = %self.board.turn(),
            active = self.is_active,
            "snapshot applied"
        );
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================

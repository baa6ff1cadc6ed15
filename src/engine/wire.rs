//! The synchronization wire format.
//!
//! A board travels as a 64-character string, one character per square in
//! row-major order: `_` empty, `p`/`k` White piece/king, `P`/`K` Black
//! piece/king. The scalar state travels beside it in [`Snapshot`]. Both peers
//! parse the same bytes, so anything unexpected is treated as corruption and
//! refused outright.

use serde::{Deserialize, Serialize};

use crate::engine::board::{Board, Grid};
use crate::engine::types::{BOARD_SIZE, CheckersError, Color, Piece, Position};

const EMPTY_SQUARE: char = '_';
const SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Encode the grid as the 64-character wire string.
pub fn encode_grid(grid: &Grid) -> String {
    grid.iter()
        .flatten()
        .map(|cell| cell.map_or(EMPTY_SQUARE, Piece::to_char))
        .collect()
}

/// Decode a 64-character wire string into a grid.
pub fn decode_grid(s: &str) -> Result<Grid, CheckersError> {
    let actual = s.chars().count();
    if actual != SQUARES {
        return Err(CheckersError::BoardLength {
            expected: SQUARES,
            actual,
        });
    }

    let mut grid: Grid = [[None; BOARD_SIZE]; BOARD_SIZE];
    for (index, ch) in s.chars().enumerate() {
        let cell = match ch {
            EMPTY_SQUARE => None,
            other => Some(
                Piece::from_char(other).ok_or(CheckersError::BoardCharacter { ch, index })?,
            ),
        };
        grid[index / BOARD_SIZE][index % BOARD_SIZE] = cell;
    }
    Ok(grid)
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything a peer needs to reproduce a session's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: String,
    pub current_turn: Color,
    pub last_move_row: i32,
    pub last_move_col: i32,
    pub moves_since_progress: u32,
    pub is_active: bool,
}

impl Snapshot {
    /// Capture the full state of `board`.
    pub fn capture(board: &Board, is_active: bool) -> Self {
        let last = board.last_move();
        Snapshot {
            board: encode_grid(board.grid()),
            current_turn: board.turn(),
            last_move_row: last.row.into(),
            last_move_col: last.col.into(),
            moves_since_progress: board.moves_since_progress(),
            is_active,
        }
    }

    /// Rebuild a board. Any malformed field is a hard failure.
    pub fn to_board(&self) -> Result<Board, CheckersError> {
        let grid = decode_grid(&self.board)?;
        let last_move = self.last_move()?;

        let mut board = Board::from_grid(grid, self.current_turn)?;
        board.set_moves_since_progress(self.moves_since_progress);
        board.set_last_move(last_move)?;
        Ok(board)
    }

    fn last_move(&self) -> Result<Position, CheckersError> {
        let out_of_range = || CheckersError::LastMoveOutOfRange {
            row: self.last_move_row,
            col: self.last_move_col,
        };
        let row = i8::try_from(self.last_move_row).map_err(|_| out_of_range())?;
        let col = i8::try_from(self.last_move_col).map_err(|_| out_of_range())?;
        let pos = Position::new(row, col);
        if pos.in_bounds() {
            Ok(pos)
        } else {
            Err(out_of_range())
        }
    }
}

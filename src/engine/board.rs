//! Mailbox board representation for checkers.
//!
//! `Board` stores an 8×8 grid of optional pieces, the side to move, the
//! destination of the most recent move, the non-progress counter used for the
//! draw rule, and the turn phase that tracks pending chain captures.
//!
//! Row 0 is White's home row and row 7 is Black's; White moves toward higher
//! rows.

use std::fmt;

use crate::engine::turn::{MoveOutcome, Turn, TurnPhase};
use crate::engine::types::{BOARD_SIZE, CheckersError, Color, Move, Piece, Position};

/// Cell storage: `grid[row][col]`.
pub type Grid = [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE];

/// Initial value of `last_move`: a dark square on an interior row, empty in
/// the opening layout.
pub const LAST_MOVE_SENTINEL: Position = Position::new(4, 7);

/// Number of rows each side fills at the start.
const HOME_ROWS: usize = 3;

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A complete checkers position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    turn: Color,
    last_move: Position,
    moves_since_progress: u32,
    phase: TurnPhase,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Board {
    /// A board with no pieces, White to move.
    pub fn empty() -> Self {
        Board {
            grid: [[None; BOARD_SIZE]; BOARD_SIZE],
            turn: Color::White,
            last_move: LAST_MOVE_SENTINEL,
            moves_since_progress: 0,
            phase: TurnPhase::AwaitingMove,
        }
    }

    /// Standard opening layout: White on rows 0-2, Black on rows 5-7, dark
    /// squares only.
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if (row + col) % 2 == 0 {
                    continue;
                }
                if row < HOME_ROWS {
                    board.grid[row][col] = Some(Piece::new(Color::White));
                } else if row >= BOARD_SIZE - HOME_ROWS {
                    board.grid[row][col] = Some(Piece::new(Color::Black));
                }
            }
        }
        board
    }

    /// Build a board from a decoded grid. Fails if any piece sits on a light
    /// square. No move has been recorded yet; call [`Board::set_last_move`]
    /// to restore one.
    pub fn from_grid(grid: Grid, turn: Color) -> Result<Self, CheckersError> {
        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let pos = Position::new(row as i8, col as i8);
                if cell.is_some() && !pos.is_dark() {
                    return Err(CheckersError::PieceOnLightSquare(pos));
                }
            }
        }
        Ok(Board {
            grid,
            turn,
            ..Self::empty()
        })
    }

    // -----------------------------------------------------------------------
    // Piece manipulation (low-level)
    // -----------------------------------------------------------------------

    /// Place a piece. The caller guarantees `pos` is an on-board dark square.
    #[inline]
    pub fn put_piece(&mut self, pos: Position, piece: Piece) {
        debug_assert!(pos.in_bounds() && pos.is_dark(), "bad square {pos}");
        if let Some((r, c)) = pos.index() {
            self.grid[r][c] = Some(piece);
        }
    }

    /// Remove and return whatever sits on `pos`.
    #[inline]
    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        let (r, c) = pos.index()?;
        self.grid[r][c].take()
    }

    /// Mutable access to a piece, for promotion.
    #[inline]
    pub(crate) fn piece_mut(&mut self, pos: Position) -> Option<&mut Piece> {
        let (r, c) = pos.index()?;
        self.grid[r][c].as_mut()
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// What piece (if any) is on a given square? Off-board squares are empty.
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        let (r, c) = pos.index()?;
        self.grid[r][c]
    }

    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }

    /// The raw grid, for rendering and serialization.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Whose move is legal next.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Destination of the most recent successful move.
    #[inline]
    pub fn last_move(&self) -> Position {
        self.last_move
    }

    /// Consecutive moves without a capture or promotion.
    #[inline]
    pub fn moves_since_progress(&self) -> u32 {
        self.moves_since_progress
    }

    #[inline]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The piece that must move next because it is in the middle of a chain
    /// capture.
    #[inline]
    pub fn forced_actor(&self) -> Option<Position> {
        match self.phase {
            TurnPhase::CaptureJustResolved { at } => Some(at),
            _ => None,
        }
    }

    /// All pieces of `color` with their squares, in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.grid.iter().enumerate().flat_map(move |(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| match cell {
                Some(piece) if piece.color() == color => {
                    Some((Position::new(row as i8, col as i8), *piece))
                }
                _ => None,
            })
        })
    }

    pub fn piece_count(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    // -----------------------------------------------------------------------
    // Mutators used when restoring remote state
    // -----------------------------------------------------------------------

    /// Hand the move to `turn`. Any pending chain capture is abandoned.
    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
        if self.forced_actor().is_some() {
            self.phase = TurnPhase::MoveResolved;
        }
    }

    /// Restore the most recent destination, as carried by the wire format,
    /// and infer the turn phase from it.
    pub fn set_last_move(&mut self, pos: Position) -> Result<(), CheckersError> {
        if !pos.in_bounds() {
            return Err(CheckersError::LastMoveOutOfRange {
                row: pos.row.into(),
                col: pos.col.into(),
            });
        }
        self.last_move = pos;
        self.infer_phase();
        Ok(())
    }

    pub fn set_moves_since_progress(&mut self, moves: u32) {
        self.moves_since_progress = moves;
    }

    /// Recover the turn phase from `last_move` and `turn` alone, as carried
    /// by the wire format. A piece of the side to move standing on
    /// `last_move` can only mean that piece is mid-chain.
    fn infer_phase(&mut self) {
        self.phase = match self.piece_at(self.last_move) {
            Some(piece) if piece.color() == self.turn => TurnPhase::CaptureJustResolved {
                at: self.last_move,
            },
            _ if self.last_move == LAST_MOVE_SENTINEL && self.moves_since_progress == 0 => {
                TurnPhase::AwaitingMove
            }
            _ => TurnPhase::MoveResolved,
        };
    }

    // -----------------------------------------------------------------------
    // Make move
    // -----------------------------------------------------------------------

    /// Attempt a move. Returns `false` and leaves the board untouched if the
    /// move is illegal.
    pub fn make_move(&mut self, from: Position, to: Position) -> bool {
        self.play(Move::new(from, to)).is_some()
    }

    /// Attempt a move, reporting what happened on success.
    pub fn play(&mut self, mv: Move) -> Option<MoveOutcome> {
        if !self.is_valid_move(mv.from, mv.to) {
            return None;
        }

        let piece = self.remove_piece(mv.from)?;
        self.put_piece(mv.to, piece);

        let captured = if piece.is_king() {
            self.king_capture(mv.from, mv.to)
        } else if mv.distance() == 2 {
            self.simple_capture(mv.from, mv.to)
        } else {
            None
        };

        Some(self.resolve_turn(mv, captured))
    }

    /// Commit the bookkeeping of a resolved move.
    pub(crate) fn finish_move(&mut self, to: Position, player: Color, progress: u32, next: Turn) {
        self.moves_since_progress = progress;
        self.last_move = to;
        match next {
            Turn::Retain => self.phase = TurnPhase::CaptureJustResolved { at: to },
            Turn::Advance => {
                self.turn = !player;
                self.phase = TurnPhase::MoveResolved;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Board display (8×8 text grid)
    // -----------------------------------------------------------------------

    /// Render the board as text, row 7 at the top. Empty dark squares are
    /// `.`, light squares are blank.
    pub fn board_string(&self) -> String {
        let mut s = String::with_capacity(200);
        for row in (0..BOARD_SIZE).rev() {
            s.push((b'0' + row as u8) as char);
            s.push(' ');
            for col in 0..BOARD_SIZE {
                let ch = match self.grid[row][col] {
                    Some(piece) => piece.to_char(),
                    None if (row + col) % 2 != 0 => '.',
                    None => ' ',
                };
                s.push(ch);
                if col < BOARD_SIZE - 1 {
                    s.push(' ');
                }
            }
            s.push('\n');
        }
        s.push_str("  0 1 2 3 4 5 6 7");
        s
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.board_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn starting_layout() {
        let board = Board::starting();
        assert_eq!(board.piece_count(Color::White), 12);
        assert_eq!(board.piece_count(Color::Black), 12);
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.moves_since_progress(), 0);
        assert_eq!(board.phase(), TurnPhase::AwaitingMove);

        for (p, _) in board.pieces(Color::White) {
            assert!(p.row <= 2 && p.is_dark());
        }
        for (p, _) in board.pieces(Color::Black) {
            assert!(p.row >= 5 && p.is_dark());
        }
        for row in 3..5 {
            for col in 0..8 {
                assert!(board.is_empty(pos(row, col)));
            }
        }
    }

    #[test]
    fn sentinel_is_empty_dark_square() {
        let board = Board::starting();
        assert!(LAST_MOVE_SENTINEL.is_dark());
        assert!(board.is_empty(LAST_MOVE_SENTINEL));
        assert_eq!(board.last_move(), LAST_MOVE_SENTINEL);
        assert_eq!(board.forced_actor(), None);
    }

    #[test]
    fn piece_at_off_board_is_none() {
        let board = Board::starting();
        assert_eq!(board.piece_at(pos(-1, 0)), None);
        assert_eq!(board.piece_at(pos(8, 8)), None);
    }

    #[test]
    fn put_and_remove() {
        let mut board = Board::empty();
        board.put_piece(pos(3, 2), Piece::king(Color::Black));
        assert_eq!(board.piece_at(pos(3, 2)), Some(Piece::king(Color::Black)));
        assert_eq!(board.remove_piece(pos(3, 2)), Some(Piece::king(Color::Black)));
        assert!(board.is_empty(pos(3, 2)));
        assert_eq!(board.remove_piece(pos(3, 2)), None);
    }

    #[test]
    fn simple_step_passes_turn() {
        let mut board = Board::starting();
        assert!(board.make_move(pos(2, 1), pos(3, 0)));
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.last_move(), pos(3, 0));
        assert_eq!(board.moves_since_progress(), 1);
        assert_eq!(board.phase(), TurnPhase::MoveResolved);
        assert!(board.is_empty(pos(2, 1)));
        assert_eq!(board.piece_at(pos(3, 0)), Some(Piece::new(Color::White)));
    }

    #[test]
    fn rejected_move_changes_nothing() {
        let mut board = Board::starting();
        let before = board.clone();
        assert!(!board.make_move(pos(2, 1), pos(4, 3)));
        assert!(!board.make_move(pos(5, 0), pos(4, 1)));
        assert_eq!(board, before);
    }

    #[test]
    fn from_grid_rejects_light_square() {
        let mut grid: Grid = [[None; BOARD_SIZE]; BOARD_SIZE];
        grid[0][0] = Some(Piece::new(Color::White));
        assert_eq!(
            Board::from_grid(grid, Color::White),
            Err(CheckersError::PieceOnLightSquare(pos(0, 0)))
        );
    }

    #[test]
    fn set_last_move_rejects_off_board() {
        let mut board = Board::starting();
        assert_eq!(
            board.set_last_move(pos(8, 1)),
            Err(CheckersError::LastMoveOutOfRange { row: 8, col: 1 })
        );
        assert_eq!(board.last_move(), LAST_MOVE_SENTINEL);
    }

    #[test]
    fn restoring_last_move_infers_chain() {
        let mut board = Board::empty();
        board.put_piece(pos(4, 3), Piece::new(Color::White));
        board.put_piece(pos(5, 4), Piece::new(Color::Black));
        board.set_last_move(pos(4, 3)).unwrap();
        assert_eq!(board.forced_actor(), Some(pos(4, 3)));

        board.set_turn(Color::Black);
        assert_eq!(board.forced_actor(), None);
        assert_eq!(board.phase(), TurnPhase::MoveResolved);
    }

    #[test]
    fn composed_board_has_no_forced_actor() {
        let mut board = Board::empty();
        board.put_piece(LAST_MOVE_SENTINEL, Piece::new(Color::White));
        board.set_turn(Color::White);
        assert_eq!(board.forced_actor(), None);
        assert_eq!(board.phase(), TurnPhase::AwaitingMove);
        assert!(board.make_move(LAST_MOVE_SENTINEL, pos(5, 6)));
    }

    #[test]
    fn board_string_shape() {
        let s = Board::starting().board_string();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "7 P   P   P   P  ");
        assert_eq!(lines[7], "0   p   p   p   p");
    }
}

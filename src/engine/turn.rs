//! Turn arbitration after a successful move: promotion, the non-progress
//! counter, and whether the same piece must keep capturing.

use crate::engine::board::Board;
use crate::engine::types::{Color, Move, Position};

/// What happens to the turn once a move has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// The mover keeps the turn to continue a chain capture.
    Retain,
    /// The turn passes to the opponent.
    Advance,
}

/// A piece that has just captured and can capture again keeps the turn.
#[inline]
pub fn decide_next_turn(moved_piece_has_more_captures: bool) -> Turn {
    if moved_piece_has_more_captures {
        Turn::Retain
    } else {
        Turn::Advance
    }
}

/// Where the board stands between moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// No move has been played yet.
    AwaitingMove,
    /// The piece on `at` captured and must capture again.
    CaptureJustResolved { at: Position },
    /// The last move completed and the turn passed.
    MoveResolved,
}

/// Summary of an applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub player: Color,
    /// Square of the piece removed, if the move was a capture.
    pub captured: Option<Position>,
    /// Whether the moving piece was crowned by this move.
    pub promoted: bool,
    pub next: Turn,
}

impl MoveOutcome {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl Board {
    /// Finish a move whose piece already stands on `mv.to` and whose capture
    /// (if any) has been removed.
    pub(crate) fn resolve_turn(&mut self, mv: Move, captured: Option<Position>) -> MoveOutcome {
        let player = self.turn();
        let mut progress = self.moves_since_progress().saturating_add(1);
        let mut more_captures = false;

        if captured.is_some() {
            progress = 0;
            more_captures = self.has_mandatory_capture(mv.to);
        }

        let promoted = self.promote_if_due(mv.to);
        if promoted {
            progress = 0;
            // A freshly crowned king that can capture again keeps going.
            if captured.is_some() && !more_captures {
                more_captures = self.has_mandatory_capture_king(mv.to);
            }
        }

        let next = decide_next_turn(more_captures);
        self.finish_move(mv.to, player, progress, next);

        MoveOutcome {
            mv,
            player,
            captured,
            promoted,
            next,
        }
    }

    /// Crown the piece on `pos` if it has reached its far row.
    fn promote_if_due(&mut self, pos: Position) -> bool {
        match self.piece_mut(pos) {
            Some(piece) if pos.row == piece.color().promotion_row() => piece.crown(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Piece;

    fn pos(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    fn board_with(turn: Color, pieces: &[(i8, i8, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(r, c, piece) in pieces {
            board.put_piece(pos(r, c), piece);
        }
        board.set_turn(turn);
        board
    }

    const W: Piece = Piece::new(Color::White);
    const B: Piece = Piece::new(Color::Black);
    const WK: Piece = Piece::king(Color::White);

    #[test]
    fn decide_next_turn_maps_flag() {
        assert_eq!(decide_next_turn(true), Turn::Retain);
        assert_eq!(decide_next_turn(false), Turn::Advance);
    }

    #[test]
    fn single_capture_advances() {
        let mut board = board_with(Color::White, &[(2, 1, W), (3, 2, B), (7, 6, B)]);
        board.set_moves_since_progress(7);
        let out = board.play(Move::new(pos(2, 1), pos(4, 3))).unwrap();
        assert_eq!(out.captured, Some(pos(3, 2)));
        assert_eq!(out.next, Turn::Advance);
        assert!(!out.promoted);
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.moves_since_progress(), 0);
        assert_eq!(board.phase(), TurnPhase::MoveResolved);
    }

    #[test]
    fn chain_capture_retains_turn() {
        let mut board = board_with(Color::White, &[(2, 1, W), (3, 2, B), (5, 4, B)]);
        let out = board.play(Move::new(pos(2, 1), pos(4, 3))).unwrap();
        assert_eq!(out.next, Turn::Retain);
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.forced_actor(), Some(pos(4, 3)));

        let out = board.play(Move::new(pos(4, 3), pos(6, 5))).unwrap();
        assert_eq!(out.captured, Some(pos(5, 4)));
        assert_eq!(out.next, Turn::Advance);
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.forced_actor(), None);
    }

    #[test]
    fn quiet_move_increments_counter() {
        let mut board = board_with(Color::White, &[(2, 1, W), (7, 0, B)]);
        board.set_moves_since_progress(3);
        let out = board.play(Move::new(pos(2, 1), pos(3, 2))).unwrap();
        assert!(!out.is_capture());
        assert_eq!(board.moves_since_progress(), 4);
        assert_eq!(board.last_move(), pos(3, 2));
    }

    #[test]
    fn promotion_resets_counter() {
        let mut board = board_with(Color::White, &[(6, 1, W), (0, 7, B)]);
        board.set_moves_since_progress(10);
        let out = board.play(Move::new(pos(6, 1), pos(7, 2))).unwrap();
        assert!(out.promoted);
        assert_eq!(board.piece_at(pos(7, 2)), Some(WK));
        assert_eq!(board.moves_since_progress(), 0);
        assert_eq!(board.turn(), Color::Black);
    }

    #[test]
    fn black_promotes_on_row_zero() {
        let mut board = board_with(Color::Black, &[(1, 2, B), (7, 0, W)]);
        let out = board.play(Move::new(pos(1, 2), pos(0, 1))).unwrap();
        assert!(out.promoted);
        assert_eq!(board.piece_at(pos(0, 1)), Some(Piece::king(Color::Black)));
    }

    #[test]
    fn king_moving_on_far_row_is_not_promoted_again() {
        let mut board = board_with(Color::White, &[(7, 0, WK), (0, 1, B)]);
        board.set_moves_since_progress(5);
        let out = board.play(Move::new(pos(7, 0), pos(6, 1))).unwrap();
        assert!(!out.promoted);
        assert_eq!(board.moves_since_progress(), 6);
    }

    #[test]
    fn crowned_by_capture_keeps_turn_when_king_can_capture() {
        // White jumps (6,3) landing on (7,4); as a king it can then take (5,6)
        // from a distance, which an uncrowned piece could not.
        let mut board = board_with(Color::White, &[(5, 2, W), (6, 3, B), (5, 6, B)]);
        let out = board.play(Move::new(pos(5, 2), pos(7, 4))).unwrap();
        assert!(out.promoted);
        assert_eq!(out.next, Turn::Retain);
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.forced_actor(), Some(pos(7, 4)));
        assert_eq!(board.moves_since_progress(), 0);
    }

    #[test]
    fn crowned_by_quiet_move_passes_turn_even_with_capture() {
        let mut board = board_with(Color::White, &[(6, 3, W), (6, 5, B), (0, 1, B)]);
        let out = board.play(Move::new(pos(6, 3), pos(7, 4))).unwrap();
        assert!(out.promoted);
        assert_eq!(out.next, Turn::Advance);
        assert_eq!(board.turn(), Color::Black);
    }
}

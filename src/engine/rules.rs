//! Move legality.
//!
//! `Board::is_valid_move` is the single legality predicate: the board's
//! `play`, the status evaluator and the legal-move listing all go through it.
//! Checks run in a fixed order and stop at the first failure.

use crate::engine::board::Board;
use crate::engine::types::Position;

/// Squares strictly between `from` and `to` along their shared diagonal.
/// Yields nothing unless the two squares are on one diagonal.
pub fn diagonal_between(from: Position, to: Position) -> impl Iterator<Item = Position> {
    let dr = to.row - from.row;
    let dc = to.col - from.col;
    let steps = if dr.abs() == dc.abs() { dr.abs() } else { 0 };
    let (sr, sc) = (dr.signum(), dc.signum());
    (1..steps).map(move |i| from.offset(sr, sc, i))
}

impl Board {
    /// Is moving the piece on `from` to `to` legal for the side to move?
    pub fn is_valid_move(&self, from: Position, to: Position) -> bool {
        if !to.in_bounds() {
            return false;
        }
        if !to.is_dark() || !self.is_empty(to) {
            return false;
        }

        let Some(piece) = self.piece_at(from) else {
            return false;
        };
        if piece.color() != self.turn() {
            return false;
        }

        // Mid-chain, only the capturing piece may move.
        if let Some(actor) = self.forced_actor() {
            if actor != from {
                return false;
            }
        }

        let dr = to.row - from.row;
        let dc = to.col - from.col;

        if piece.is_king() {
            if dr.abs() != dc.abs() {
                return false;
            }
            if self.is_path_clear(from, to) {
                !self.any_mandatory_capture(piece.color())
            } else {
                self.has_single_opponent_between(from, to)
            }
        } else {
            match (dr.abs(), dc.abs()) {
                (1, 1) => {
                    dr == piece.color().forward() && !self.any_mandatory_capture(piece.color())
                }
                (2, 2) => {
                    let mid = Position::new(from.row + dr / 2, from.col + dc / 2);
                    self.is_opponent(mid, piece.color())
                }
                _ => false,
            }
        }
    }

    /// No piece strictly between `from` and `to`.
    pub fn is_path_clear(&self, from: Position, to: Position) -> bool {
        diagonal_between(from, to).all(|p| self.is_empty(p))
    }

    /// Exactly one piece strictly between `from` and `to`, and it belongs to
    /// the opponent of the piece on `from`.
    fn has_single_opponent_between(&self, from: Position, to: Position) -> bool {
        let Some(mover) = self.piece_at(from) else {
            return false;
        };
        let mut occupied = diagonal_between(from, to).filter(|&p| !self.is_empty(p));
        match (occupied.next(), occupied.next()) {
            (Some(only), None) => self.is_opponent(only, mover.color()),
            _ => false,
        }
    }
}

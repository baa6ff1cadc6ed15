//! Capture execution and mandatory-capture detection.

use crate::engine::board::Board;
use crate::engine::rules::diagonal_between;
use crate::engine::types::{BOARD_SIZE, Color, DIAGONALS, Position};

impl Board {
    /// Remove the piece jumped by a two-square move. Returns the square it
    /// was taken from, or `None` if the midpoint was already empty.
    pub fn simple_capture(&mut self, from: Position, to: Position) -> Option<Position> {
        let mid = Position::new((from.row + to.row) / 2, (from.col + to.col) / 2);
        self.remove_piece(mid).map(|_| mid)
    }

    /// Walk the diagonal from `from` toward `to` and remove the first piece
    /// found on the way. Validation guarantees it is the single opponent on
    /// that path. A clear path removes nothing.
    pub fn king_capture(&mut self, from: Position, to: Position) -> Option<Position> {
        let target = diagonal_between(from, to).find(|&p| !self.is_empty(p))?;
        self.remove_piece(target);
        Some(target)
    }

    /// Can the uncrowned piece on `pos` jump an adjacent opponent in any of
    /// the four diagonal directions?
    pub fn has_mandatory_capture_simple(&self, pos: Position) -> bool {
        let Some(piece) = self.piece_at(pos) else {
            return false;
        };
        let color = piece.color();

        DIAGONALS.iter().any(|&(dr, dc)| {
            let landing = pos.offset(dr, dc, 2);
            landing.in_bounds()
                && self.is_empty(landing)
                && self.is_opponent(pos.offset(dr, dc, 1), color)
        })
    }

    /// Can the king on `pos` capture along any diagonal? In each direction
    /// the first occupied square must hold an opponent and the square right
    /// after it must be empty.
    pub fn has_mandatory_capture_king(&self, pos: Position) -> bool {
        let Some(piece) = self.piece_at(pos) else {
            return false;
        };
        let color = piece.color();

        DIAGONALS.iter().any(|&(dr, dc)| {
            let mut found_opponent = false;
            for step in 1..BOARD_SIZE as i8 {
                let cur = pos.offset(dr, dc, step);
                if !cur.in_bounds() {
                    return false;
                }
                match self.piece_at(cur) {
                    None if found_opponent => return true,
                    None => {}
                    Some(_) if found_opponent => return false,
                    Some(other) if other.color() == color => return false,
                    Some(_) => found_opponent = true,
                }
            }
            false
        })
    }

    /// Dispatch to the test that applies to the piece on `pos`.
    pub fn has_mandatory_capture(&self, pos: Position) -> bool {
        match self.piece_at(pos) {
            Some(piece) if piece.is_king() => self.has_mandatory_capture_king(pos),
            Some(_) => self.has_mandatory_capture_simple(pos),
            None => false,
        }
    }

    /// Does any piece of `color` have a capture available?
    pub fn any_mandatory_capture(&self, color: Color) -> bool {
        self.pieces(color)
            .any(|(pos, _)| self.has_mandatory_capture(pos))
    }

    #[inline]
    pub(crate) fn is_opponent(&self, pos: Position, color: Color) -> bool {
        matches!(self.piece_at(pos), Some(p) if p.color() != color)
    }
}

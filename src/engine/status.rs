//! Game termination: wins by elimination or immobilization, and the
//! non-progress draw.

use crate::engine::board::Board;
use crate::engine::types::{BOARD_SIZE, Color, DIAGONALS, GameStatus, Move, Position};

/// Moves without a capture or promotion after which the game is drawn.
pub const DRAW_MOVE_LIMIT: u32 = 80;

impl Board {
    /// Candidate destinations for the piece on `from`: single steps, two-step
    /// jumps and, for kings, every longer square on each diagonal.
    fn candidate_destinations(&self, from: Position) -> impl Iterator<Item = Position> + '_ {
        let reach = match self.piece_at(from) {
            Some(piece) if piece.is_king() => BOARD_SIZE as i8 - 1,
            Some(_) => 2,
            None => 0,
        };
        DIAGONALS
            .iter()
            .flat_map(move |&(dr, dc)| (1..=reach).map(move |step| from.offset(dr, dc, step)))
            .filter(|to| to.in_bounds())
    }

    /// Does the piece on `from` have at least one legal move?
    pub fn can_move(&self, from: Position) -> bool {
        self.candidate_destinations(from)
            .any(|to| self.is_valid_move(from, to))
    }

    /// Legal moves of the piece on `from`.
    pub fn legal_moves_from(&self, from: Position) -> Vec<Move> {
        self.candidate_destinations(from)
            .filter(|&to| self.is_valid_move(from, to))
            .map(|to| Move::new(from, to))
            .collect()
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.pieces(self.turn())
            .flat_map(|(from, _)| self.legal_moves_from(from))
            .collect()
    }

    /// Whether `color` can move right now. Only the side to move has moves.
    pub fn has_any_legal_move(&self, color: Color) -> bool {
        color == self.turn() && self.pieces(color).any(|(from, _)| self.can_move(from))
    }

    /// Win determination, ignoring the draw rule. A side with no pieces, or
    /// with pieces but no move on its own turn, has lost.
    pub fn winner(&self) -> GameStatus {
        if self.has_lost(Color::White) {
            return GameStatus::Won(Color::Black);
        }
        if self.has_lost(Color::Black) {
            return GameStatus::Won(Color::White);
        }
        GameStatus::Ongoing
    }

    /// Full status: the winner if decided, else a draw once the
    /// non-progress counter reaches [`DRAW_MOVE_LIMIT`].
    pub fn game_status(&self) -> GameStatus {
        match self.winner() {
            GameStatus::Ongoing if self.moves_since_progress() >= DRAW_MOVE_LIMIT => {
                GameStatus::Draw
            }
            status => status,
        }
    }

    fn has_lost(&self, color: Color) -> bool {
        if self.piece_count(color) == 0 {
            return true;
        }
        color == self.turn() && !self.has_any_legal_move(color)
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
    fn opening_has_seven_moves() {
        let board = Board::starting();
        assert_eq!(board.legal_moves().len(), 7);
        assert_eq!(board.game_status(), GameStatus::Ongoing);
    }

    #[test]
    fn legal_moves_from_single_piece() {
        let board = Board::starting();
        let moves = board.legal_moves_from(pos(2, 1));
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&Move::new(pos(2, 1), pos(3, 0))));
        assert!(moves.contains(&Move::new(pos(2, 1), pos(3, 2))));
        assert!(board.legal_moves_from(pos(0, 1)).is_empty());
    }

    #[test]
    fn legal_moves_only_captures_when_forced() {
        let board = board_with(Color::White, &[(2, 1, W), (3, 2, B), (0, 5, W)]);
        assert_eq!(
            board.legal_moves(),
            vec![Move::new(pos(2, 1), pos(4, 3))]
        );
    }

    #[test]
    fn king_legal_moves_cover_diagonals() {
        let board = board_with(Color::White, &[(3, 4, WK), (7, 6, B)]);
        // From (3,4): 3 up-right, 4 up-left, 3 down-right, 3 down-left.
        assert_eq!(board.legal_moves_from(pos(3, 4)).len(), 13);
    }

    #[test]
    fn no_pieces_loses_regardless_of_turn() {
        let board = board_with(Color::White, &[(2, 1, W)]);
        assert_eq!(board.winner(), GameStatus::Won(Color::White));

        let board = board_with(Color::White, &[(5, 2, B)]);
        assert_eq!(board.winner(), GameStatus::Won(Color::Black));
    }

    #[test]
    fn immobilized_side_to_move_loses() {
        // White piece on (6,1) is blocked by Black on (7,0) and (7,2), which
        // cannot be jumped off the board.
        let board = board_with(Color::White, &[(6, 1, W), (7, 0, B), (7, 2, B)]);
        assert!(!board.has_any_legal_move(Color::White));
        assert_eq!(board.winner(), GameStatus::Won(Color::Black));
    }

    #[test]
    fn immobile_side_not_to_move_does_not_lose() {
        let board = board_with(Color::Black, &[(6, 1, W), (7, 0, B), (7, 2, B), (0, 7, B)]);
        assert_eq!(board.winner(), GameStatus::Ongoing);
    }

    #[test]
    fn draw_at_eighty_non_progress_moves() {
        let mut board = Board::starting();
        board.set_moves_since_progress(DRAW_MOVE_LIMIT - 1);
        assert_eq!(board.game_status(), GameStatus::Ongoing);
        board.set_moves_since_progress(DRAW_MOVE_LIMIT);
        assert_eq!(board.game_status(), GameStatus::Draw);
    }

    #[test]
    fn win_takes_precedence_over_draw() {
        let mut board = board_with(Color::White, &[(2, 1, W)]);
        board.set_moves_since_progress(DRAW_MOVE_LIMIT + 5);
        assert_eq!(board.game_status(), GameStatus::Won(Color::White));
    }
}

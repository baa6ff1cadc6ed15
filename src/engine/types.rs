use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const BOARD_SIZE: usize = 8;

/// The four diagonal unit directions as (row, col) deltas.
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The two sides in a checkers game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Row delta of a forward step. White moves toward row 7, Black toward row 0.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The farthest row for this color, where its pieces are crowned.
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        match self {
            Color::White => BOARD_SIZE as i8 - 1,
            Color::Black => 0,
        }
    }

    /// Wire spelling: "WHITE" / "BLACK".
    pub fn as_str(self) -> &'static str {
        match self {
            Color::White => "WHITE",
            Color::Black => "BLACK",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "white" => Some(Color::White),
            "black" => Some(Color::Black),
            _ => None,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// A checkers piece. The color is fixed; the king flag only ever goes from
/// `false` to `true`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    is_king: bool,
}

impl Piece {
    /// A fresh, uncrowned piece.
    pub const fn new(color: Color) -> Self {
        Piece {
            color,
            is_king: false,
        }
    }

    /// An already crowned piece.
    pub const fn king(color: Color) -> Self {
        Piece {
            color,
            is_king: true,
        }
    }

    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        self.is_king
    }

    /// Promote to king. Returns `true` if the piece was not a king before.
    pub fn crown(&mut self) -> bool {
        let promoted = !self.is_king;
        self.is_king = true;
        promoted
    }

    /// Wire character: `p`/`k` for White, `P`/`K` for Black.
    pub fn to_char(self) -> char {
        match (self.color, self.is_king) {
            (Color::White, false) => 'p',
            (Color::White, true) => 'k',
            (Color::Black, false) => 'P',
            (Color::Black, true) => 'K',
        }
    }

    /// Inverse of [`Piece::to_char`].
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'p' => Some(Piece::new(Color::White)),
            'k' => Some(Piece::king(Color::White)),
            'P' => Some(Piece::new(Color::Black)),
            'K' => Some(Piece::king(Color::Black)),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_king { "king" } else { "piece" };
        write!(f, "{} {kind}", self.color)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A (row, col) coordinate. Signed so that off-board destinations can be
/// represented and rejected rather than wrapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Position { row, col }
    }

    /// Whether both coordinates lie in `[0, 8)`.
    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE as i8 && self.col >= 0 && self.col < BOARD_SIZE as i8
    }

    /// Dark squares are where `row + col` is odd; pieces live only there.
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.row as i16 + self.col as i16).rem_euclid(2) != 0
    }

    /// The position shifted by `steps` unit moves along `(dr, dc)`.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8, steps: i8) -> Self {
        Position {
            row: self.row.saturating_add(dr.saturating_mul(steps)),
            col: self.col.saturating_add(dc.saturating_mul(steps)),
        }
    }

    /// Grid indices, if on the board.
    #[inline]
    pub fn index(self) -> Option<(usize, usize)> {
        if self.in_bounds() {
            Some((self.row as usize, self.col as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// A source/destination pair. Captures are not flagged; the board infers them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub const fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }

    /// Number of diagonal steps covered (the larger of the two deltas).
    pub fn distance(self) -> i8 {
        let dr = (self.to.row - self.from.row).abs();
        let dc = (self.to.col - self.from.col).abs();
        dr.max(dc)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

// ---------------------------------------------------------------------------
// GameStatus
// ---------------------------------------------------------------------------

/// Outcome of a game, or `Ongoing` while it is undecided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Won(Color),
    Draw,
    Ongoing,
}

impl GameStatus {
    /// Wire spelling: "WHITE", "BLACK", "DRAW" or "NONE".
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Won(color) => color.as_str(),
            GameStatus::Draw => "DRAW",
            GameStatus::Ongoing => "NONE",
        }
    }

    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::Won(color) => Some(*color),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CheckersError
// ---------------------------------------------------------------------------

/// Corrupt state handed to the engine. Illegal moves are not errors; they are
/// reported as `false`.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CheckersError {
    #[error("board string must hold {expected} squares, got {actual}")]
    BoardLength { expected: usize, actual: usize },

    #[error("unexpected character {ch:?} at index {index} of board string")]
    BoardCharacter { ch: char, index: usize },

    #[error("piece on light square {0}")]
    PieceOnLightSquare(Position),

    #[error("last move coordinates out of range: ({row}, {col})")]
    LastMoveOutOfRange { row: i32, col: i32 },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

pub mod board;
pub mod capture;
pub mod game;
pub mod rules;
pub mod status;
pub mod turn;
pub mod types;
pub mod wire;

pub use board::{Board, Grid, LAST_MOVE_SENTINEL};
pub use game::{Game, MoveRecord};
pub use rules::diagonal_between;
pub use status::DRAW_MOVE_LIMIT;
pub use turn::{MoveOutcome, Turn, TurnPhase, decide_next_turn};
pub use types::*;
pub use wire::{Snapshot, decode_grid, encode_grid};

//! Engine module: 4x4 2048 board, pure move/merge ops, and tile spawning.
//! Public API stays small and ergonomic.
//!
//! - `Board` is the flattened 4x4 state with useful methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - Line collapsing and reorientation live in `ops`.

mod ops;
pub mod state;

pub use state::{Board, MAX_TILE, Move, MoveResult};

pub use ops::{
    WIN_TILE, collapse_line, count_empty, from_canonical, has_winning_tile, is_game_over, shift,
    to_canonical,
};

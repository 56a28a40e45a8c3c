use rand::Rng;

use super::state::{Board, Move, MoveResult, Score, Tile};

/// Tile value that wins the game.
pub const WIN_TILE: Tile = 2048;

/// Slide/merge tiles in the given direction. No randomness, input untouched.
///
/// Every direction is reduced to a left move: reorient with [`to_canonical`],
/// collapse each row, then undo with [`from_canonical`].
pub fn shift(board: Board, direction: Move) -> MoveResult {
    let mut canonical = to_canonical(board, direction);
    let mut score = 0;
    for r in 0..4 {
        let (row, gained) = collapse_line(canonical.row(r));
        canonical.set_row(r, row);
        score += gained;
    }
    let next = from_canonical(canonical, direction);
    MoveResult {
        board: next,
        moved: next != board,
        score,
    }
}

/// Reorient `board` so that moving in `direction` becomes a left move.
pub fn to_canonical(board: Board, direction: Move) -> Board {
    match direction {
        Move::Left => board,
        Move::Right => board.reverse_rows(),
        Move::Up => board.transpose(),
        Move::Down => board.transpose().reverse_rows(),
    }
}

/// Inverse of [`to_canonical`].
pub fn from_canonical(board: Board, direction: Move) -> Board {
    match direction {
        Move::Left => board,
        Move::Right => board.reverse_rows(),
        Move::Up => board.transpose(),
        Move::Down => board.reverse_rows().transpose(),
    }
}

/// Compact one line to the left, merging equal neighbours once.
///
/// Returns the new line and the sum of merged tile values. A tile produced by
/// a merge never merges again in the same pass, so `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]`.
pub fn collapse_line(line: [Tile; 4]) -> ([Tile; 4], Score) {
    let mut out = [0; 4];
    let mut len = 0;
    let mut score = 0;
    let mut pending: Option<Tile> = None;
    for val in line.into_iter().filter(|&v| v != 0) {
        match pending {
            Some(acc) if acc == val => {
                out[len] = acc * 2;
                score += Score::from(acc * 2);
                len += 1;
                pending = None;
            }
            Some(acc) => {
                out[len] = acc;
                len += 1;
                pending = Some(val);
            }
            None => pending = Some(val),
        }
    }
    if let Some(acc) = pending {
        out[len] = acc;
    }
    (out, score)
}

/// True if the board is full and no two adjacent cells are equal.
///
/// Each cell is checked against its right and down neighbour only, which
/// covers every adjacent pair once.
pub fn is_game_over(board: Board) -> bool {
    for r in 0..4 {
        for c in 0..4 {
            let val = board.get(r, c);
            if val == 0 {
                return false;
            }
            if c < 3 && val == board.get(r, c + 1) {
                return false;
            }
            if r < 3 && val == board.get(r + 1, c) {
                return false;
            }
        }
    }
    true
}

/// True if any tile is at least `target`.
pub fn has_winning_tile(board: Board, target: Tile) -> bool {
    board.tiles().any(|v| v >= target)
}

/// Count the number of zero tiles.
pub fn count_empty(board: Board) -> usize {
    board.tiles().filter(|&v| v == 0).count()
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}

pub(crate) fn format_val(val: &Tile) -> String {
    match val {
        0 => String::from("       "),
        x => format!("{x:^7}"),
    }
}

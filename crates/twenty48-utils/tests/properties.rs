//! Property-based tests for board mechanics.

use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

use twenty48_utils::engine::{Board, Move, WIN_TILE, collapse_line, from_canonical, to_canonical};

/// Strategy: a valid tile value (0 or 2..=4096).
fn tile_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => Just(0u32),
        5 => (1u32..=12).prop_map(|exp| 1u32 << exp),
    ]
}

fn board_strategy() -> impl Strategy<Value = Board> {
    prop::array::uniform16(tile_strategy()).prop_map(Board::from_cells)
}

fn move_strategy() -> impl Strategy<Value = Move> {
    prop::sample::select(Move::ALL.to_vec())
}

fn tile_sum(b: Board) -> u64 {
    b.tiles().map(u64::from).sum()
}

proptest! {
    // 1. A move that reports no change returns the input cell-for-cell
    #[test]
    fn unmoved_board_is_identical(b in board_strategy(), dir in move_strategy()) {
        let res = b.shift(dir);
        if !res.moved {
            prop_assert_eq!(res.board, b);
            prop_assert_eq!(res.score, 0);
        } else {
            prop_assert_ne!(res.board, b);
        }
    }

    // 2. Moving conserves the tile sum
    #[test]
    fn move_conserves_mass(b in board_strategy(), dir in move_strategy()) {
        prop_assert_eq!(tile_sum(b.shift(dir).board), tile_sum(b));
    }

    // 3. Moving never splits tiles, so the empty count never shrinks
    #[test]
    fn move_never_reduces_empty_cells(b in board_strategy(), dir in move_strategy()) {
        prop_assert!(b.shift(dir).board.count_empty() >= b.count_empty());
    }

    // 4. Reorientation round-trips
    #[test]
    fn canonical_round_trip(b in board_strategy(), dir in move_strategy()) {
        prop_assert_eq!(from_canonical(to_canonical(b, dir), dir), b);
    }

    // 5. Collapsed lines are dense prefixes of powers of two
    #[test]
    fn collapse_is_dense(line in prop::array::uniform4(tile_strategy())) {
        let (out, score) = collapse_line(line);
        let first_zero = out.iter().position(|&v| v == 0).unwrap_or(4);
        prop_assert!(out[first_zero..].iter().all(|&v| v == 0));
        prop_assert!(out.iter().all(|&v| v == 0 || v.is_power_of_two()));
        prop_assert_eq!(score % 4, 0);
    }

    // 6. Game over means a full board that no direction can move
    #[test]
    fn game_over_matches_shift(b in board_strategy()) {
        let stuck = Move::ALL.iter().all(|&dir| !b.shift(dir).moved);
        prop_assert_eq!(b.is_game_over(), stuck && b.count_empty() == 0);
    }

    // 7. Winning tile check is inclusive at 2048
    #[test]
    fn winning_tile_matches_max(b in board_strategy()) {
        prop_assert_eq!(b.has_winning_tile(WIN_TILE), b.highest_tile() >= 2048);
    }

    // 8. A fresh game always has exactly two tiles, each 2 or 4
    #[test]
    fn new_game_has_two_small_tiles(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let b = Board::new_game(&mut rng);
        let filled: Vec<u32> = b.tiles().filter(|&v| v != 0).collect();
        prop_assert_eq!(filled.len(), 2);
        prop_assert!(filled.iter().all(|&v| v == 2 || v == 4));
    }
}

#[test]
fn collapse_examples() {
    assert_eq!(collapse_line([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
    assert_eq!(collapse_line([2, 0, 2, 4]), ([4, 4, 0, 0], 4));
}

#[test]
fn empty_board_never_moves() {
    for dir in Move::ALL {
        let res = Board::EMPTY.shift(dir);
        assert!(!res.moved);
        assert_eq!(res.score, 0);
        assert_eq!(res.board, Board::EMPTY);
    }
}

#[test]
fn opposite_direction_pairs() {
    // left then right
    let b = Board::from_rows([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
    let left = b.shift(Move::Left);
    assert_eq!(left.board.rows()[0], [4, 4, 0, 0]);
    let right = left.board.shift(Move::Right);
    assert_eq!(right.board.rows()[0], [0, 0, 0, 8]);
    assert_eq!(left.score + right.score, 12);

    // up then down
    let b = Board::from_rows([[2, 0, 0, 0], [2, 0, 0, 0], [8, 0, 0, 0], [0; 4]]);
    let up = b.shift(Move::Up);
    assert_eq!(up.board.rows(), [[4, 0, 0, 0], [8, 0, 0, 0], [0; 4], [0; 4]]);
    let down = up.board.shift(Move::Down);
    assert_eq!(down.board.rows(), [[0; 4], [0; 4], [4, 0, 0, 0], [8, 0, 0, 0]]);
    assert_eq!(down.score, 0);

    // right then left on a symmetric row
    let b = Board::from_rows([[0; 4], [4, 2, 2, 4], [0; 4], [0; 4]]);
    let right = b.shift(Move::Right);
    assert_eq!(right.board.rows()[1], [0, 4, 4, 4]);
    let left = right.board.shift(Move::Left);
    assert_eq!(left.board.rows()[1], [8, 4, 0, 0]);
    assert_eq!(right.score + left.score, 12);

    // down then up
    let b = Board::from_rows([[0, 0, 0, 16], [0, 0, 0, 16], [0, 0, 0, 16], [0, 0, 0, 0]]);
    let down = b.shift(Move::Down);
    assert_eq!(down.board.rows(), [[0; 4], [0; 4], [0, 0, 0, 16], [0, 0, 0, 32]]);
    let up = down.board.shift(Move::Up);
    assert_eq!(up.board.rows(), [[0, 0, 0, 16], [0, 0, 0, 32], [0; 4], [0; 4]]);
}

#[test]
fn checkerboard_is_terminal_and_gap_is_not() {
    let full = Board::from_rows([[2, 4, 8, 16], [4, 8, 16, 32], [8, 16, 32, 64], [16, 32, 64, 128]]);
    // Diagonals repeat but no two orthogonal neighbours match.
    assert!(full.is_game_over());
    for idx in 0..16 {
        let mut cells: [u32; 16] = std::array::from_fn(|i| full.tile_value(i));
        cells[idx] = 0;
        assert!(!Board::from_cells(cells).is_game_over(), "gap at {idx}");
    }
}

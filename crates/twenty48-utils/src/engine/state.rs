use rand::Rng;
use std::fmt;

use super::ops;
use serde::{Deserialize, Serialize};

pub(crate) type Tile = u32;
pub(crate) type Score = u64;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

/// Outcome of sliding a board in one direction, before any tile is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    /// True iff any cell differs from the board the move was applied to.
    pub moved: bool,
    /// Sum of all tiles produced by merges during this move.
    pub score: Score,
}

/// 4x4 2048 board stored as 16 tile values in row-major order.
///
/// Each cell is either `0` (empty) or a power of two >= 2. Index `i` maps to
/// row `i / 4`, column `i % 4`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "[Tile; 16]")]
pub struct Board(pub(crate) [Tile; 16]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([0; 16]);

    /// Build a board from 4 rows of tile values.
    ///
    /// Panics if any cell is neither 0 nor a power of two in `2..=MAX_TILE`.
    pub fn from_rows(rows: [[Tile; 4]; 4]) -> Self {
        let mut cells = [0; 16];
        for (r, row) in rows.iter().enumerate() {
            for (c, &val) in row.iter().enumerate() {
                assert!(is_valid_tile(val), "invalid tile value {val} at ({r}, {c})");
                cells[r * 4 + c] = val;
            }
        }
        Board(cells)
    }

    /// Build a board from 16 tile values in row-major order.
    ///
    /// Panics on invalid tile values, like [`Board::from_rows`].
    pub fn from_cells(cells: [Tile; 16]) -> Self {
        for (idx, &val) in cells.iter().enumerate() {
            assert!(is_valid_tile(val), "invalid tile value {val} at index {idx}");
        }
        Board(cells)
    }

    /// Fresh game board: empty grid with two random tiles.
    ///
    /// ```
    /// use twenty48_utils::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let b = Board::new_game(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    pub fn new_game<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Board::EMPTY.with_random_tile(rng).with_random_tile(rng)
    }

    /// Copy out the 4 rows.
    #[inline]
    pub fn rows(&self) -> [[Tile; 4]; 4] {
        std::array::from_fn(|r| self.row(r))
    }

    #[inline]
    pub(crate) fn row(&self, r: usize) -> [Tile; 4] {
        [
            self.0[r * 4],
            self.0[r * 4 + 1],
            self.0[r * 4 + 2],
            self.0[r * 4 + 3],
        ]
    }

    #[inline]
    pub(crate) fn set_row(&mut self, r: usize, row: [Tile; 4]) {
        self.0[r * 4..r * 4 + 4].copy_from_slice(&row);
    }

    /// Value at (row, col); 0 if empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.0[row * 4 + col]
    }

    /// Return the move result of sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use twenty48_utils::engine::{Board, Move};
    /// let b = Board::from_rows([[2, 0, 2, 4], [0; 4], [0; 4], [0; 4]]);
    /// let res = b.shift(Move::Left);
    /// assert_eq!(res.board.rows()[0], [4, 4, 0, 0]);
    /// assert_eq!(res.score, 4);
    /// assert!(res.moved);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> MoveResult {
        ops::shift(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a uniformly chosen empty
    /// slot, using the provided RNG. A full board is returned unchanged.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use twenty48_utils::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let empty: Vec<usize> = (0..16).filter(|&idx| self.0[idx] == 0).collect();
        if empty.is_empty() {
            return self;
        }
        let slot = empty[rng.gen_range(0..empty.len())];
        let mut next = self;
        next.0[slot] = ops::generate_random_tile(rng);
        next
    }

    /// Return true if no legal moves remain.
    ///
    /// ```
    /// use twenty48_utils::engine::Board;
    /// // An empty board always has room for another tile.
    /// assert!(!Board::EMPTY.is_game_over());
    /// ```
    #[inline]
    pub fn is_game_over(self) -> bool {
        ops::is_game_over(self)
    }

    /// True if any tile reaches `target` (inclusive).
    #[inline]
    pub fn has_winning_tile(self, target: Tile) -> bool {
        ops::has_winning_tile(self, target)
    }

    /// Return the highest tile value (e.g., 2048) present on the board, 0 if empty.
    #[inline]
    pub fn highest_tile(self) -> Tile {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> usize {
        ops::count_empty(self)
    }

    /// Get the value at index. Index runs 0..16 row-major.
    #[inline]
    pub fn tile_value(self, idx: usize) -> Tile {
        self.0[idx]
    }

    /// Iterate over tile values in row-major order.
    #[inline]
    pub fn tiles(self) -> TilesIter {
        TilesIter {
            cells: self.0,
            idx: 0,
        }
    }

    pub(crate) fn transpose(self) -> Self {
        Board(std::array::from_fn(|idx| self.0[(idx % 4) * 4 + idx / 4]))
    }

    pub(crate) fn reverse_rows(self) -> Self {
        Board(std::array::from_fn(|idx| self.0[(idx / 4) * 4 + (3 - idx % 4)]))
    }
}

/// Largest tile a 4x4 game can produce (2^17).
pub const MAX_TILE: Tile = 1 << 17;

fn is_valid_tile(val: Tile) -> bool {
    val == 0 || ((2..=MAX_TILE).contains(&val) && val.is_power_of_two())
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.rows())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            if r > 0 {
                writeln!(f, "-------------------------------")?;
            }
            let cells: Vec<String> = self.row(r).iter().map(ops::format_val).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl TryFrom<[Tile; 16]> for Board {
    type Error = String;

    fn try_from(cells: [Tile; 16]) -> Result<Self, Self::Error> {
        match cells.iter().position(|&val| !is_valid_tile(val)) {
            Some(idx) => Err(format!("invalid tile value {} at index {idx}", cells[idx])),
            None => Ok(Board(cells)),
        }
    }
}

impl From<[[Tile; 4]; 4]> for Board {
    fn from(rows: [[Tile; 4]; 4]) -> Self {
        Board::from_rows(rows)
    }
}

/// Iterator over board tile values in row-major order.
pub struct TilesIter {
    cells: [Tile; 16],
    idx: usize,
}

impl Iterator for TilesIter {
    type Item = Tile;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let val = *self.cells.get(self.idx)?;
        self.idx += 1;
        Some(val)
    }
}

impl IntoIterator for Board {
    type Item = Tile;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

impl IntoIterator for &Board {
    type Item = Tile;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

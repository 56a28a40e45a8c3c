//! Session controller: owns one game's mutable state across moves and keeps
//! the persisted high score up to date.

use rand::Rng;
use serde::Serialize;

use crate::engine::{Board, Move, WIN_TILE};
use crate::identity::{AuthView, IdentityProvider};
use crate::store::KeyValueStore;

/// Storage key for the persisted high score.
pub const HIGH_SCORE_KEY: &str = "fa2048.highscore";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    Won,
    GameOver,
}

/// What happened to a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game already ended; the move was dropped.
    Ignored,
    /// The move would not change the board.
    Unchanged,
    Moved { gained: u64, status: GameStatus },
}

pub struct GameSession<S, R> {
    board: Board,
    score: u64,
    high_score: u64,
    moves: u64,
    game_over: bool,
    won: bool,
    store: S,
    identity: Box<dyn IdentityProvider>,
    rng: R,
}

impl<S: KeyValueStore, R: Rng> GameSession<S, R> {
    /// Start a session, loading the high score from `store`.
    ///
    /// This is the only read from the store; a missing or unparsable value
    /// counts as no high score.
    pub fn new(store: S, identity: Box<dyn IdentityProvider>, mut rng: R) -> Self {
        let high_score = load_high_score(&store);
        let board = Board::new_game(&mut rng);
        log::debug!("session bootstrapped, high score {high_score}");
        Self {
            board,
            score: 0,
            high_score,
            moves: 0,
            game_over: false,
            won: false,
            store,
            identity,
            rng,
        }
    }

    /// Apply a player move.
    ///
    /// Ignored once the game is won or lost. A move that changes nothing
    /// leaves the state untouched; otherwise a tile is spawned, the score
    /// grows, and terminal flags are re-evaluated (win first).
    pub fn apply_move(&mut self, direction: Move) -> MoveOutcome {
        if self.game_over || self.won {
            return MoveOutcome::Ignored;
        }
        let res = self.board.shift(direction);
        if !res.moved {
            return MoveOutcome::Unchanged;
        }
        self.board = res.board.with_random_tile(&mut self.rng);
        self.score += res.score;
        self.moves += 1;
        if self.board.has_winning_tile(WIN_TILE) {
            self.won = true;
            log::info!("reached {WIN_TILE} with score {}", self.score);
        } else if self.board.is_game_over() {
            self.game_over = true;
            log::info!("game over with score {}", self.score);
        }
        if self.score > self.high_score {
            self.high_score = self.score;
            self.persist_high_score();
        }
        MoveOutcome::Moved {
            gained: res.score,
            status: self.status(),
        }
    }

    /// Start a new game. The high score is kept.
    pub fn reset(&mut self) {
        self.board = Board::new_game(&mut self.rng);
        self.score = 0;
        self.moves = 0;
        self.game_over = false;
        self.won = false;
    }

    /// One synchronous upsert per improvement. The in-memory value stays
    /// authoritative when the write fails.
    fn persist_high_score(&mut self) {
        let value = self.high_score.to_string();
        if let Err(err) = self.store.set(HIGH_SCORE_KEY, &value) {
            log::warn!("failed to persist high score {value}: {err:#}");
        }
    }

    pub fn status(&self) -> GameStatus {
        if self.won {
            GameStatus::Won
        } else if self.game_over {
            GameStatus::GameOver
        } else {
            GameStatus::Playing
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn auth_view(&self) -> AuthView {
        AuthView::from_provider(&*self.identity)
    }

    pub fn login(&mut self) {
        self.identity.login();
    }

    /// Give the store back, e.g. to bootstrap another session from it.
    pub fn into_store(self) -> S {
        self.store
    }

    #[cfg(test)]
    pub(crate) fn set_board(&mut self, board: Board) {
        self.board = board;
    }
}

fn load_high_score<S: KeyValueStore>(store: &S) -> u64 {
    match store.get(HIGH_SCORE_KEY) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring unparsable stored high score {raw:?}");
            0
        }),
        None => 0,
    }
}

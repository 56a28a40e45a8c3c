//! twenty48-utils: 2048 game engine and session plumbing for the Farcaster
//! mini-app.
//!
//! This crate provides:
//! - A 4x4 `Board` with pure move/merge ops and seeded tile spawning (`engine`)
//! - `GameSession`, which tracks score, win/loss and the persisted high score (`session`)
//! - Injected capabilities for storage (`store`) and sign-in display (`identity`)
//! - Keyboard/swipe decoding (`input`) and share links (`share`)
//!
//! Quick start:
//! ```
//! use twenty48_utils::engine::Move;
//! use twenty48_utils::identity::Anonymous;
//! use twenty48_utils::session::GameSession;
//! use twenty48_utils::store::MemoryStore;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut game = GameSession::new(MemoryStore::new(), Box::new(Anonymous), StdRng::seed_from_u64(42));
//! for dir in [Move::Left, Move::Up, Move::Right, Move::Down] {
//!     game.apply_move(dir);
//! }
//! assert!(game.high_score() >= game.score());
//! ```
pub mod engine;
pub mod identity;
pub mod input;
pub mod session;
pub mod share;
pub mod store;

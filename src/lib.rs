//! Tengen: a small Go-variant rules engine.
//!
//! This crate implements the board-game core of a Go variant: board and
//! chain bookkeeping, move validation (suicide and repeated positions),
//! capture resolution, territory scoring, and a set of built-in opponents
//! that pick their moves after an artificial "thinking" delay.
//!
//! ## Modules
//!
//! - [`constants`] - Board sizes, komi, and engine tunables
//! - [`board`] - The grid of points and its compact serialization
//! - [`chains`] - Chain/liberty analysis and capture resolution
//! - [`rules`] - Move and turn validation
//! - [`game`] - Mutable game session (moves, passes, history, reset)
//! - [`score`] - Territory and final score calculation
//! - [`opponent`] - Opponent identities and asynchronous move selection
//! - [`cheat`] - Bounded cheat mechanic with diminishing success odds
//! - [`console`] - Text command front-end for scripts and interactive use
//!
//! ## Example
//!
//! ```
//! use tengen::board::Color;
//! use tengen::game::{Game, GameConfig};
//!
//! let mut game = Game::new(GameConfig::default()).unwrap();
//!
//! // Black opens, White answers.
//! assert!(game.make_move(4, 4, Color::Black));
//! assert!(game.make_move(2, 2, Color::White));
//! ```

pub mod board;
pub mod chains;
pub mod cheat;
pub mod console;
pub mod constants;
pub mod game;
pub mod opponent;
pub mod rules;
pub mod score;

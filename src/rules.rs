//! Move and turn validation.
//!
//! The validator checks a proposed move in a fixed order: bounds, target
//! emptiness, simulated suicide, and positional repetition. Repetition
//! compares the compact serialization of the would-be board against every
//! prior snapshot in the game history (a simple positional-superko rule;
//! deliberately broader than a textbook ko check).
//!
//! Turn order and game-over checks live in [`evaluate_turn`] and are
//! consulted separately by player-facing entry points. Only Black, the
//! player side, is turn-gated; the opponent side is driven internally.

use std::fmt;

use crate::board::{Board, Color};
use crate::chains;

/// Outcome of validating a proposed move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Validity {
    Valid,
    /// Coordinates outside `[0, size)`.
    OutOfBounds,
    /// Target holds a stone or is offline.
    PointNotEmpty,
    /// Move would leave its own chain with zero liberties without capturing.
    NoSuicide,
    /// Resulting position matches a prior board snapshot.
    BoardRepeated,
    /// It is the other player's turn.
    NotYourTurn,
    /// The game has ended; no moves are accepted until reset.
    GameOver,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validity::Valid => write!(f, "valid move"),
            Validity::OutOfBounds => write!(f, "coordinate is outside the board"),
            Validity::PointNotEmpty => write!(f, "point is not empty"),
            Validity::NoSuicide => {
                write!(f, "move would leave its own chain without liberties")
            }
            Validity::BoardRepeated => {
                write!(f, "move would repeat an earlier board position")
            }
            Validity::NotYourTurn => write!(f, "it is not your turn"),
            Validity::GameOver => write!(f, "the game is over"),
        }
    }
}

/// Simulate placing a stone and resolving captures on a copy of the board.
///
/// Returns the resulting board, or `None` when the move is suicide (the
/// placed chain ends with zero liberties and nothing opposing fell).
pub fn simulate(board: &Board, x: usize, y: usize, color: Color) -> Option<Board> {
    let mut next = board.clone();
    next.place(x, y, color).ok()?;
    chains::resolve_captures(&mut next, (x, y), color);
    if next.stone(x, y).is_none() {
        return None;
    }
    Some(next)
}

/// Validate a proposed move against the board and snapshot history.
pub fn evaluate(
    board: &Board,
    history: &[String],
    x: usize,
    y: usize,
    color: Color,
) -> Validity {
    if !board.in_bounds(x, y) {
        return Validity::OutOfBounds;
    }
    if !board.is_empty_point(x, y) {
        return Validity::PointNotEmpty;
    }
    let Some(next) = simulate(board, x, y, color) else {
        return Validity::NoSuicide;
    };
    let snapshot = next.serialize();
    if history.iter().any(|prior| *prior == snapshot) {
        return Validity::BoardRepeated;
    }
    Validity::Valid
}

/// Validate turn order for a player-facing action.
///
/// `previous_player` is who moved last: `None` means the game is over,
/// `Some(Color::Black)` means it is White's turn next, and vice versa.
pub fn evaluate_turn(previous_player: Option<Color>, color: Color) -> Validity {
    match previous_player {
        None => Validity::GameOver,
        Some(prev) if color == Color::Black && prev == Color::Black => Validity::NotYourTurn,
        _ => Validity::Valid,
    }
}

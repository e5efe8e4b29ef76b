//! Opponent identities and move selection.
//!
//! Each opponent identity maps to a selection strategy, from always-pass
//! up to a heuristic that weighs captures, rescues, ataris, and chain
//! extension (weights in [`crate::constants`]). Whatever the strategy, the
//! selector only ever produces a move the validator accepts, a pass, or
//! `GameOver` when the game already ended.
//!
//! Selection runs asynchronously behind an artificial "thinking" delay on
//! a background thread. The returned [`PendingMove`] remembers the game
//! generation it was started for; a result that arrives after a reset is
//! discarded by [`crate::game::Game::resolve_opponent`] instead of being
//! misapplied to the fresh board.

use std::fmt;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::Duration;

use crate::board::{Board, Color, Coord};
use crate::chains;
use crate::constants::{
    PASS_THRESHOLD, THINK_MAX_MS, THINK_MIN_MS, WEIGHT_ATARI, WEIGHT_CAPTURE_MANY,
    WEIGHT_CAPTURE_ONE, WEIGHT_EXTEND, WEIGHT_JITTER, WEIGHT_LIBERTY, WEIGHT_RESCUE,
};
use crate::game::{Game, Play};
use crate::rules;

/// Opponent identity. `None` is the manual two-player sentinel; it never
/// selects a move of its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Opponent {
    None,
    /// Always passes.
    Passive,
    /// Plays a uniformly random legal move.
    Erratic,
    /// Weighs captures, rescues, ataris, and extensions.
    Tactician,
}

impl Opponent {
    pub const ALL: [Opponent; 4] = [
        Opponent::None,
        Opponent::Passive,
        Opponent::Erratic,
        Opponent::Tactician,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Opponent::None => "none",
            Opponent::Passive => "passive",
            Opponent::Erratic => "erratic",
            Opponent::Tactician => "tactician",
        }
    }

    /// Look an opponent up by name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::ALL.into_iter().find(|o| o.name() == lower)
    }
}

impl fmt::Display for Opponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Pick White's move for the given opponent identity.
///
/// Returns `GameOver` only when the game already ended; otherwise a move
/// the validator accepts, or a pass.
pub fn select_move(
    opponent: Opponent,
    board: &Board,
    history: &[String],
    previous_player: Option<Color>,
) -> Play {
    if previous_player.is_none() {
        return Play::GameOver;
    }
    match opponent {
        Opponent::None | Opponent::Passive => Play::Pass,
        Opponent::Erratic => random_move(board, history),
        Opponent::Tactician => heuristic_move(board, history),
    }
}

fn legal_moves(board: &Board, history: &[String]) -> Vec<Coord> {
    let size = board.size();
    let mut moves = Vec::new();
    for y in 0..size {
        for x in 0..size {
            if rules::evaluate(board, history, x, y, Color::White).is_valid() {
                moves.push((x, y));
            }
        }
    }
    moves
}

fn random_move(board: &Board, history: &[String]) -> Play {
    let candidates = legal_moves(board, history);
    if candidates.is_empty() {
        return Play::Pass;
    }
    let (x, y) = candidates[fastrand::usize(..candidates.len())];
    Play::Move(x, y)
}

/// A single-point eye of `color`: every online neighbor is a stone of that
/// color. Filling one is never useful, so the heuristic skips them.
fn is_own_eye(board: &Board, x: usize, y: usize, color: Color) -> bool {
    let mut friendly = 0;
    for (nx, ny) in board.neighbors(x, y) {
        if board.is_offline(nx, ny) {
            continue;
        }
        if board.color_at(nx, ny) == Some(color) {
            friendly += 1;
        } else {
            return false;
        }
    }
    friendly > 0
}

fn candidate_score(board: &Board, x: usize, y: usize) -> f64 {
    let mut next = board.clone();
    if next.place(x, y, Color::White).is_err() {
        return f64::MIN;
    }
    let captures = chains::resolve_captures(&mut next, (x, y), Color::White);

    let mut score = 0.0;
    match captures.by_white {
        0 => {}
        1 => score += WEIGHT_CAPTURE_ONE,
        _ => score += WEIGHT_CAPTURE_MANY,
    }

    let own_libs = next
        .stone(x, y)
        .and_then(|p| p.liberties.as_ref())
        .map_or(0, |l| l.len());
    score += own_libs as f64 * WEIGHT_LIBERTY;

    for (nx, ny) in board.neighbors(x, y) {
        let Some(before) = board.stone(nx, ny) else {
            continue;
        };
        let libs_before = before.liberties.as_ref().map_or(0, |l| l.len());
        let libs_after = next
            .stone(nx, ny)
            .and_then(|p| p.liberties.as_ref())
            .map_or(0, |l| l.len());
        match before.color {
            Color::White => {
                score += WEIGHT_EXTEND;
                if libs_before == 1 && libs_after > 1 {
                    score += WEIGHT_RESCUE;
                }
            }
            Color::Black => {
                if libs_before > 1 && libs_after == 1 {
                    score += WEIGHT_ATARI;
                }
            }
        }
    }

    score + fastrand::f64() * WEIGHT_JITTER
}

fn heuristic_move(board: &Board, history: &[String]) -> Play {
    // Work from fresh chain data; stored liberties feed the scoring.
    let mut base = board.clone();
    chains::rebuild(&mut base);

    let mut best: Option<(Coord, f64)> = None;
    for (x, y) in legal_moves(&base, history) {
        if is_own_eye(&base, x, y, Color::White) {
            continue;
        }
        let score = candidate_score(&base, x, y);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some(((x, y), score));
        }
    }

    match best {
        Some(((x, y), score)) if score >= PASS_THRESHOLD => Play::Move(x, y),
        // Nothing worth playing: passing is always legal.
        _ => Play::Pass,
    }
}

/// An opponent deliberation in flight. Non-cancelable; always resolves.
pub struct PendingMove {
    generation: u64,
    receiver: Receiver<Play>,
}

impl PendingMove {
    /// The game generation this deliberation was started against.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Block until the deliberation resolves. A lost worker counts as a
    /// pass, which is always legal.
    pub fn wait(self) -> Play {
        self.receiver.recv().unwrap_or(Play::Pass)
    }
}

/// Start an opponent deliberation with the standard jittered delay.
pub fn think(game: &Game) -> PendingMove {
    let delay = Duration::from_millis(fastrand::u64(THINK_MIN_MS..=THINK_MAX_MS));
    think_with_delay(game, delay)
}

/// Start an opponent deliberation with an explicit delay.
///
/// Snapshots the board and history, so the pending turn never holds the
/// game in an ambiguous state; the board only changes when the result is
/// applied through [`Game::resolve_opponent`].
pub fn think_with_delay(game: &Game, delay: Duration) -> PendingMove {
    let (sender, receiver) = channel();
    let board = game.board().clone();
    let history = game.history().to_vec();
    let opponent = game.opponent();
    let previous = game.previous_player();
    let generation = game.generation();

    thread::spawn(move || {
        thread::sleep(delay);
        let play = select_move(opponent, &board, &history, previous);
        // The receiver is gone when the game was reset and the caller
        // dropped the pending move; the stale result just evaporates.
        sender.send(play).ok();
    });

    PendingMove {
        generation,
        receiver,
    }
}

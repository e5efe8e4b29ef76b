//! The mutable game session.
//!
//! A [`Game`] owns the board, the turn/pass bookkeeping, the snapshot
//! history used for repetition checks, and a generation counter that
//! invalidates asynchronous opponent results produced before a reset.
//! Every state-mutating operation emits a [`Change`] notification
//! synchronously after the mutation completes; presentation layers
//! subscribe and re-read the game rather than holding copies.
//!
//! Opponent win/loss records outlive individual games and live in a
//! separate [`StatsLedger`], updated only at game end.

use std::collections::HashMap;
use std::fmt;

use crate::board::{Board, BoardError, Color, Coord};
use crate::chains::{self, Captures};
use crate::constants::{DEFAULT_SIZE, KOMI, PASSES_TO_END};
use crate::opponent::{Opponent, PendingMove};
use crate::rules::{self, Validity};

/// Tagged outcome of a move-resolving action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Play {
    Move(usize, usize),
    Pass,
    GameOver,
}

/// What kind of mutation a change notification reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Change {
    Move,
    Pass,
    Reset,
    Cheat,
}

/// Configuration problems reported at game creation or reset time.
/// The running game is left untouched when reset fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    Board(BoardError),
    UnknownOpponent(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Board(err) => write!(f, "invalid configuration: {err}"),
            ConfigError::UnknownOpponent(name) => write!(f, "unknown opponent '{name}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<BoardError> for ConfigError {
    fn from(err: BoardError) -> Self {
        ConfigError::Board(err)
    }
}

/// Parameters for a fresh game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub size: usize,
    pub opponent: Opponent,
    pub offline: Vec<Coord>,
    pub komi: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            opponent: Opponent::None,
            offline: Vec::new(),
            komi: KOMI,
        }
    }
}

type Listener = Box<dyn Fn(Change)>;

/// One game session. Created fresh on start or reset, mutated in place by
/// every action, replaced wholesale on reset.
pub struct Game {
    pub(crate) board: Board,
    pub(crate) previous_player: Option<Color>,
    pub(crate) passes: u32,
    pub(crate) history: Vec<String>,
    pub(crate) opponent: Opponent,
    pub(crate) cheats_used: u32,
    pub(crate) bonus_turns: u32,
    pub(crate) captures: Captures,
    pub(crate) komi: f32,
    pub(crate) generation: u64,
    listeners: Vec<Listener>,
}

impl Game {
    /// Start a new game. Fails without side effects on an unsupported size.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let board = Board::with_offline(config.size, &config.offline)?;
        Ok(Self {
            board,
            // White "moved last" so that Black opens.
            previous_player: Some(Color::White),
            passes: 0,
            history: Vec::new(),
            opponent: config.opponent,
            cheats_used: 0,
            bonus_turns: 0,
            captures: Captures::default(),
            komi: config.komi,
            generation: 0,
            listeners: Vec::new(),
        })
    }

    /// Replace the session wholesale. Subscribers survive, the generation
    /// counter advances, and a pending opponent result from the old game
    /// becomes stale. On error the old game persists unchanged.
    pub fn reset(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        let board = Board::with_offline(config.size, &config.offline)?;
        self.board = board;
        self.previous_player = Some(Color::White);
        self.passes = 0;
        self.history.clear();
        self.opponent = config.opponent;
        self.cheats_used = 0;
        self.bonus_turns = 0;
        self.captures = Captures::default();
        self.komi = config.komi;
        self.generation += 1;
        self.notify(Change::Reset);
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Who moved last; `None` means the game is over.
    pub fn previous_player(&self) -> Option<Color> {
        self.previous_player
    }

    pub fn is_over(&self) -> bool {
        self.previous_player.is_none()
    }

    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn opponent(&self) -> Opponent {
        self.opponent
    }

    pub fn captures(&self) -> Captures {
        self.captures
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    pub fn cheats_used(&self) -> u32 {
        self.cheats_used
    }

    pub fn bonus_turns(&self) -> u32 {
        self.bonus_turns
    }

    /// Generation of this session; bumped on every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Subscribe to change notifications. Listeners are called synchronously
    /// after each mutation completes.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub(crate) fn notify(&self, change: Change) {
        for listener in &self.listeners {
            listener(change);
        }
    }

    /// Validate and apply a move for `color`, without turn gating.
    ///
    /// Returns `false` with no side effects when the move is illegal;
    /// otherwise records the pre-move snapshot, places the stone, resolves
    /// captures, resets the pass counter, and notifies.
    pub fn make_move(&mut self, x: usize, y: usize, color: Color) -> bool {
        if !rules::evaluate(&self.board, &self.history, x, y, color).is_valid() {
            return false;
        }
        self.apply_move(x, y, color);
        true
    }

    fn apply_move(&mut self, x: usize, y: usize, color: Color) {
        let snapshot = self.board.serialize();
        if self.board.place(x, y, color).is_err() {
            return;
        }
        let captures = chains::resolve_captures(&mut self.board, (x, y), color);
        self.captures.by_black += captures.by_black;
        self.captures.by_white += captures.by_white;
        self.history.push(snapshot);
        self.passes = 0;
        self.previous_player = Some(color);
        self.notify(Change::Move);
    }

    /// Record a pass for `color`. The second consecutive pass ends the game.
    pub fn pass_turn(&mut self, color: Color) {
        self.passes += 1;
        if self.passes >= PASSES_TO_END {
            self.previous_player = None;
        } else {
            self.previous_player = Some(color);
        }
        self.notify(Change::Pass);
    }

    /// Player-facing move entry: turn gate first, then move validation.
    pub fn play(&mut self, x: usize, y: usize) -> Validity {
        let turn = rules::evaluate_turn(self.previous_player, Color::Black);
        if !turn.is_valid() {
            return turn;
        }
        let validity = rules::evaluate(&self.board, &self.history, x, y, Color::Black);
        if validity.is_valid() {
            self.apply_move(x, y, Color::Black);
        }
        validity
    }

    /// Player-facing pass entry.
    pub fn pass(&mut self) -> Validity {
        let turn = rules::evaluate_turn(self.previous_player, Color::Black);
        if !turn.is_valid() {
            return turn;
        }
        self.pass_turn(Color::Black);
        Validity::Valid
    }

    /// Bank bonus turns earned outside the game.
    pub fn grant_bonus_turns(&mut self, count: u32) {
        self.bonus_turns += count;
    }

    /// Consume one banked bonus turn, if any. A consumed bonus turn hands
    /// the move back to Black without an opponent response. Finished games
    /// reject the take and keep the bank intact.
    pub fn take_bonus_turn(&mut self) -> bool {
        if self.bonus_turns == 0 || self.is_over() {
            return false;
        }
        self.bonus_turns -= 1;
        self.previous_player = Some(Color::White);
        true
    }

    /// Apply a resolved opponent deliberation.
    ///
    /// Returns `None` and leaves the board untouched when the pending move
    /// targets an earlier generation (the game was reset while the opponent
    /// was thinking). A selector result the validator rejects falls back to
    /// a pass, since passing is always legal.
    pub fn resolve_opponent(&mut self, pending: PendingMove) -> Option<Play> {
        if pending.generation() != self.generation {
            return None;
        }
        let play = pending.wait();
        match play {
            Play::Move(x, y) => {
                if !self.make_move(x, y, Color::White) {
                    self.pass_turn(Color::White);
                    return Some(Play::Pass);
                }
            }
            Play::Pass => self.pass_turn(Color::White),
            Play::GameOver => {}
        }
        Some(play)
    }
}

/// Per-opponent aggregate from the player's point of view. The favor
/// accumulator grows with every win against that opponent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OpponentStats {
    pub wins: u32,
    pub losses: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub favor: u32,
}

/// Win/loss records per opponent identity, persisting across games.
#[derive(Debug, Default)]
pub struct StatsLedger {
    entries: HashMap<Opponent, OpponentStats>,
}

impl StatsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record against one opponent (zeroed when never played).
    pub fn stats(&self, opponent: Opponent) -> OpponentStats {
        self.entries.get(&opponent).copied().unwrap_or_default()
    }

    pub fn record_win(&mut self, opponent: Opponent) {
        let entry = self.entries.entry(opponent).or_default();
        entry.wins += 1;
        entry.streak += 1;
        entry.best_streak = entry.best_streak.max(entry.streak);
        entry.favor += 1;
    }

    pub fn record_loss(&mut self, opponent: Opponent) {
        let entry = self.entries.entry(opponent).or_default();
        entry.losses += 1;
        entry.streak = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Opponent, OpponentStats)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

//! Constants for board sizes, scoring, opponents, and the cheat mechanic.
//!
//! This module contains all the configuration constants for the engine.
//! Board sizes are chosen at reset time from a small enumerated set rather
//! than at compile time, so a single binary supports every size.

// =============================================================================
// Board Geometry
// =============================================================================

/// The regular board sizes a game may be reset to.
pub const ALLOWED_SIZES: [usize; 5] = [5, 7, 9, 11, 13];

/// The special oversized board.
pub const SPECIAL_SIZE: usize = 19;

/// Board size used when no configuration is given.
pub const DEFAULT_SIZE: usize = 9;

/// Check whether `size` is a supported board side length.
pub fn size_allowed(size: usize) -> bool {
    size == SPECIAL_SIZE || ALLOWED_SIZES.contains(&size)
}

// =============================================================================
// Compact Serialization Symbols
// =============================================================================

/// Black stone in the compact board form.
pub const BLACK_CHAR: char = 'X';

/// White stone in the compact board form.
pub const WHITE_CHAR: char = 'O';

/// Empty point in the compact board form.
pub const EMPTY_CHAR: char = '.';

/// Permanently disabled (offline) point in the compact board form.
pub const OFFLINE_CHAR: char = '#';

// =============================================================================
// Scoring
// =============================================================================

/// Compensation points granted to White, the second player.
pub const KOMI: f32 = 6.5;

/// Consecutive passes that end the game.
pub const PASSES_TO_END: u32 = 2;

// =============================================================================
// Opponent Thinking Delay
// =============================================================================

/// Shortest artificial deliberation pause, in milliseconds.
pub const THINK_MIN_MS: u64 = 400;

/// Longest artificial deliberation pause, in milliseconds.
pub const THINK_MAX_MS: u64 = 1200;

// =============================================================================
// Heuristic Move Weights (Tactician opponent)
// =============================================================================

/// Bonus for capturing a single stone.
pub const WEIGHT_CAPTURE_ONE: f64 = 15.0;

/// Bonus for capturing two or more stones.
pub const WEIGHT_CAPTURE_MANY: f64 = 30.0;

/// Bonus for rescuing an own chain that stood in atari.
pub const WEIGHT_RESCUE: f64 = 25.0;

/// Bonus for putting an enemy chain in atari.
pub const WEIGHT_ATARI: f64 = 15.0;

/// Bonus per adjacent friendly stone (chain extension).
pub const WEIGHT_EXTEND: f64 = 1.5;

/// Bonus per liberty of the resulting chain.
pub const WEIGHT_LIBERTY: f64 = 0.5;

/// Random tie-breaking jitter added to every candidate score.
pub const WEIGHT_JITTER: f64 = 0.5;

/// Candidates scoring below this make the opponent pass instead.
pub const PASS_THRESHOLD: f64 = 1.0;

// =============================================================================
// Cheat Mechanic
// =============================================================================

/// Multiplicative decay of the cheat success chance per prior attempt.
pub const CHEAT_DECAY: f64 = 0.65;

/// Chance that a failed cheat (after at least one prior attempt) ends the
/// game as an immediate loss.
pub const CHEAT_BUST_CHANCE: f64 = 0.10;

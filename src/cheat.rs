//! Bounded cheat mechanic.
//!
//! Each attempt succeeds with a probability that decays with every prior
//! attempt this game, scaled by an external skill modifier and clamped to
//! `[0, 1]`. A success mutates the board directly (no move validation)
//! and re-runs the analyzer so chains and liberties stay consistent; the
//! opponent then responds normally. A failure after any earlier attempt
//! carries a fixed 10% chance of ending the game as an immediate loss;
//! otherwise the turn is simply forfeited without advancing the
//! game-ending pass counter. Every attempt counts against the decay.

use crate::board::{Color, Coord};
use crate::chains;
use crate::constants::{CHEAT_BUST_CHANCE, CHEAT_DECAY};
use crate::game::{Change, Game};

/// The board mutation a successful cheat applies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CheatKind {
    /// Sneak an extra Black stone onto an empty point.
    PlaceExtra(Coord),
    /// Make a White stone disappear.
    Vanish(Coord),
}

/// How a cheat attempt resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CheatOutcome {
    /// The mutation was applied; the opponent responds normally.
    Success,
    /// The attempt failed (or targeted an unusable point); turn forfeited.
    Fumble,
    /// The attempt failed and the game ended as an immediate loss.
    Bust,
    /// The game was already over; nothing was rolled or counted.
    Rejected,
}

/// Chance that the next cheat succeeds, given how many were attempted
/// before this game and the player's skill modifier.
///
/// Monotonically non-increasing in `attempts` for fixed skill, and always
/// clamped into `[0, 1]`.
pub fn success_chance(attempts: u32, skill: f64) -> f64 {
    (skill * CHEAT_DECAY.powi(attempts as i32)).clamp(0.0, 1.0)
}

impl Game {
    /// Roll and resolve one cheat attempt.
    ///
    /// Counts against the decay whatever the outcome. A finished game
    /// rejects the attempt outright before any roll, so nothing is
    /// counted and the board stays untouched.
    pub fn attempt_cheat(&mut self, kind: CheatKind, skill: f64) -> CheatOutcome {
        if self.is_over() {
            return CheatOutcome::Rejected;
        }

        let prior = self.cheats_used;
        self.cheats_used += 1;

        if fastrand::f64() < success_chance(prior, skill) {
            if self.apply_cheat(kind) {
                // A cheat acts in place of a move, so the consecutive-pass
                // run is broken.
                self.passes = 0;
                self.previous_player = Some(Color::Black);
                self.notify(Change::Cheat);
                return CheatOutcome::Success;
            }
            // Unusable target: the attempt is spent anyway.
        } else if prior > 0 && fastrand::f64() < CHEAT_BUST_CHANCE {
            self.previous_player = None;
            self.notify(Change::Cheat);
            return CheatOutcome::Bust;
        }

        self.previous_player = Some(Color::Black);
        self.notify(Change::Cheat);
        CheatOutcome::Fumble
    }

    fn apply_cheat(&mut self, kind: CheatKind) -> bool {
        match kind {
            CheatKind::PlaceExtra((x, y)) => {
                if !self.board.is_empty_point(x, y) {
                    return false;
                }
                if self.board.place(x, y, Color::Black).is_err() {
                    return false;
                }
                let captures = chains::resolve_captures(&mut self.board, (x, y), Color::Black);
                self.captures.by_black += captures.by_black;
                self.captures.by_white += captures.by_white;
                true
            }
            CheatKind::Vanish((x, y)) => {
                if self.board.color_at(x, y) != Some(Color::White) {
                    return false;
                }
                if self.board.remove(x, y).is_err() {
                    return false;
                }
                chains::rebuild(&mut self.board);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    fn fresh_game() -> Game {
        Game::new(GameConfig {
            size: 5,
            ..GameConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_chance_is_monotonic_and_clamped() {
        let mut last = f64::INFINITY;
        for attempts in 0..12 {
            let chance = success_chance(attempts, 0.9);
            assert!((0.0..=1.0).contains(&chance));
            assert!(chance <= last);
            last = chance;
        }
        assert_eq!(success_chance(0, 5.0), 1.0);
        assert_eq!(success_chance(3, 0.0), 0.0);
        assert_eq!(success_chance(0, -1.0), 0.0);
    }

    #[test]
    fn test_guaranteed_success_places_stone() {
        let mut game = fresh_game();
        let outcome = game.attempt_cheat(CheatKind::PlaceExtra((2, 2)), 5.0);
        assert_eq!(outcome, CheatOutcome::Success);
        assert_eq!(game.board().color_at(2, 2), Some(Color::Black));
        assert_eq!(game.cheats_used(), 1);
        assert_eq!(game.previous_player(), Some(Color::Black));
    }

    #[test]
    fn test_success_breaks_pass_run() {
        let mut game = fresh_game();
        game.pass_turn(Color::Black);
        assert_eq!(game.passes(), 1);
        game.attempt_cheat(CheatKind::PlaceExtra((1, 1)), 5.0);
        assert_eq!(game.passes(), 0);
    }

    #[test]
    fn test_first_failure_never_busts() {
        for seed in 0..50 {
            fastrand::seed(seed);
            let mut game = fresh_game();
            let outcome = game.attempt_cheat(CheatKind::PlaceExtra((0, 0)), 0.0);
            assert_eq!(outcome, CheatOutcome::Fumble);
            assert!(!game.is_over());
            assert_eq!(game.cheats_used(), 1);
        }
    }

    #[test]
    fn test_repeated_failures_can_bust() {
        let mut busted = false;
        for seed in 0..200 {
            fastrand::seed(seed);
            let mut game = fresh_game();
            assert_eq!(
                game.attempt_cheat(CheatKind::PlaceExtra((0, 0)), 0.0),
                CheatOutcome::Fumble
            );
            match game.attempt_cheat(CheatKind::PlaceExtra((0, 0)), 0.0) {
                CheatOutcome::Bust => {
                    assert!(game.is_over());
                    busted = true;
                }
                CheatOutcome::Fumble => assert!(!game.is_over()),
                other => panic!("zero skill on a live game gave {other:?}"),
            }
            assert_eq!(game.cheats_used(), 2);
        }
        assert!(busted, "10% bust chance never hit across 200 seeds");
    }

    #[test]
    fn test_unusable_target_is_a_fumble() {
        let mut game = fresh_game();
        game.make_move(2, 2, Color::Black);
        // Occupied point and a vanish aimed at no White stone.
        assert_eq!(
            game.attempt_cheat(CheatKind::PlaceExtra((2, 2)), 5.0),
            CheatOutcome::Fumble
        );
        assert_eq!(
            game.attempt_cheat(CheatKind::Vanish((2, 2)), 5.0),
            CheatOutcome::Fumble
        );
        assert_eq!(game.cheats_used(), 2);
    }

    #[test]
    fn test_vanish_removes_white_and_rebuilds() {
        let mut game = fresh_game();
        game.make_move(2, 2, Color::Black);
        game.make_move(2, 3, Color::White);
        let outcome = game.attempt_cheat(CheatKind::Vanish((2, 3)), 5.0);
        assert_eq!(outcome, CheatOutcome::Success);
        assert!(game.board().is_empty_point(2, 3));
        // The freed point shows up again as a Black liberty.
        let libs = game
            .board()
            .stone(2, 2)
            .unwrap()
            .liberties
            .clone()
            .unwrap();
        assert!(libs.contains(&(2, 3)));
    }

    #[test]
    fn test_fumble_leaves_pass_run_untouched() {
        let mut game = fresh_game();
        game.pass_turn(Color::Black);
        assert_eq!(game.passes(), 1);
        // Zero skill and no prior attempt: always a plain fumble.
        assert_eq!(
            game.attempt_cheat(CheatKind::PlaceExtra((0, 0)), 0.0),
            CheatOutcome::Fumble
        );
        assert_eq!(game.passes(), 1);
        assert!(!game.is_over());
    }

    #[test]
    fn test_finished_game_rejects_cheats() {
        let mut game = fresh_game();
        game.pass_turn(Color::Black);
        game.pass_turn(Color::White);
        let before = game.board().serialize();
        assert_eq!(
            game.attempt_cheat(CheatKind::PlaceExtra((0, 0)), 5.0),
            CheatOutcome::Rejected
        );
        assert_eq!(game.cheats_used(), 0);
        assert_eq!(game.board().serialize(), before);
    }
}

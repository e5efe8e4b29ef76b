//! Integration tests for the tengen engine.
//!
//! These exercise whole-game flows across modules: capture propagation,
//! the repetition rule, game end by passing, scoring, the asynchronous
//! opponent with its generation guard, and the chain/liberty invariants
//! that must hold on every settled board.

use std::collections::BTreeSet;
use std::time::Duration;

use tengen::board::{Board, Color};
use tengen::chains;
use tengen::cheat::{CheatKind, CheatOutcome};
use tengen::game::{Game, GameConfig, Play};
use tengen::opponent::{self, Opponent};
use tengen::rules::{self, Validity};
use tengen::score;

// =============================================================================
// Helper functions
// =============================================================================

fn game_of(size: usize, opponent: Opponent) -> Game {
    Game::new(GameConfig {
        size,
        opponent,
        ..GameConfig::default()
    })
    .unwrap()
}

/// Place stones through the normal move path (no turn gating).
fn setpos(game: &mut Game, black: &[(usize, usize)], white: &[(usize, usize)]) {
    for &(x, y) in black {
        assert!(game.make_move(x, y, Color::Black), "setpos black ({x},{y})");
    }
    for &(x, y) in white {
        assert!(game.make_move(x, y, Color::White), "setpos white ({x},{y})");
    }
}

/// First legal move for `color` in scan order, if any.
fn first_legal(game: &Game, color: Color) -> Option<(usize, usize)> {
    let size = game.board().size();
    for y in 0..size {
        for x in 0..size {
            if rules::evaluate(game.board(), game.history(), x, y, color).is_valid() {
                return Some((x, y));
            }
        }
    }
    None
}

/// Check the structural invariants of a settled board: every stone has a
/// chain id shared by exactly its flood-filled group, and every chain's
/// stored liberties equal the union of its empty neighbors (never empty,
/// since dead chains are removed immediately).
fn assert_chain_invariants(board: &Board) {
    for ((x, y), point) in board.stones() {
        let id = point.chain.expect("stone without chain id");
        let members = chains::chain_members(board, (x, y));
        let mut expected: BTreeSet<(usize, usize)> = BTreeSet::new();
        for &(mx, my) in &members {
            assert_eq!(
                board.stone(mx, my).and_then(|p| p.chain),
                Some(id),
                "chain id not shared at ({mx},{my})"
            );
            for (nx, ny) in board.neighbors(mx, my) {
                if board.is_empty_point(nx, ny) {
                    expected.insert((nx, ny));
                }
            }
        }
        let libs: BTreeSet<_> = point
            .liberties
            .clone()
            .expect("stone without liberties")
            .into_iter()
            .collect();
        assert_eq!(libs, expected, "liberty set mismatch at ({x},{y})");
        assert!(!libs.is_empty(), "zero-liberty chain survived at ({x},{y})");
    }
}

// =============================================================================
// Captures and suicide
// =============================================================================

#[test]
fn test_surrounding_a_stone_captures_it() {
    let mut game = game_of(5, Opponent::None);
    setpos(&mut game, &[(1, 2), (3, 2), (2, 1)], &[(2, 2), (4, 4)]);
    assert!(game.make_move(2, 3, Color::Black));

    assert!(game.board().is_empty_point(2, 2));
    assert_eq!(game.captures().by_black, 1);
    // The freed point is a liberty of the adjacent chains again.
    let libs = game.board().stone(1, 2).unwrap().liberties.clone().unwrap();
    assert!(libs.contains(&(2, 2)));
    assert_chain_invariants(game.board());
}

#[test]
fn test_suicide_is_rejected_through_the_player_path() {
    let mut game = game_of(5, Opponent::None);
    setpos(&mut game, &[], &[(1, 0), (0, 1)]);
    // White moved last, so it is Black's turn; the corner is suicide.
    assert_eq!(game.play(0, 0), Validity::NoSuicide);
    assert!(game.board().is_empty_point(0, 0));
}

#[test]
fn test_capturing_beats_suicide() {
    let mut game = game_of(5, Opponent::None);
    setpos(&mut game, &[(1, 1), (2, 0)], &[(1, 0), (0, 1)]);
    // (0,0) has no liberties of its own but takes (1,0) first.
    assert!(game.make_move(0, 0, Color::Black));
    assert!(game.board().is_empty_point(1, 0));
    assert_eq!(game.captures().by_black, 1);
    assert_chain_invariants(game.board());
}

// =============================================================================
// Repetition (positional superko)
// =============================================================================

#[test]
fn test_ko_recapture_is_board_repeated() {
    let mut game = game_of(5, Opponent::None);
    // Classic ko shape around (1,1)/(2,1).
    setpos(
        &mut game,
        &[(1, 0), (0, 1), (1, 2)],
        &[(2, 0), (3, 1), (2, 2), (1, 1)],
    );
    // Black takes the ko.
    assert!(game.make_move(2, 1, Color::Black));
    assert!(game.board().is_empty_point(1, 1));

    // The immediate recapture would restore the previous position.
    assert_eq!(
        rules::evaluate(game.board(), game.history(), 1, 1, Color::White),
        Validity::BoardRepeated
    );
    assert!(!game.make_move(1, 1, Color::White));

    // After a ko threat elsewhere, the recapture becomes legal.
    assert!(game.make_move(4, 4, Color::White));
    assert!(game.make_move(4, 0, Color::Black));
    assert!(game.make_move(1, 1, Color::White));
}

// =============================================================================
// Passing and game end
// =============================================================================

#[test]
fn test_two_passes_finish_the_game() {
    let mut game = game_of(5, Opponent::None);
    assert_eq!(game.pass(), Validity::Valid);
    game.pass_turn(Color::White);
    assert!(game.is_over());
    assert_eq!(game.play(2, 2), Validity::GameOver);
    // The selector reports the terminal state rather than moving.
    let play = opponent::select_move(
        Opponent::Tactician,
        game.board(),
        game.history(),
        game.previous_player(),
    );
    assert_eq!(play, Play::GameOver);
}

#[test]
fn test_move_after_single_pass_keeps_game_alive() {
    let mut game = game_of(5, Opponent::None);
    assert_eq!(game.pass(), Validity::Valid);
    assert!(game.make_move(2, 2, Color::White));
    assert_eq!(game.passes(), 0);
    assert!(!game.is_over());
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_fresh_board_differs_only_by_komi() {
    let game = game_of(5, Opponent::None);
    let sheet = score::score(&game);
    assert_eq!(sheet.black.territory, 0);
    assert_eq!(sheet.white.territory, 0);
    assert_eq!(sheet.black.total(), 0.0);
    assert_eq!(sheet.white.total(), game.komi());
    assert_eq!(sheet.winner(), Some(Color::White));
}

#[test]
fn test_walled_off_territory_wins_the_game() {
    let mut game = game_of(5, Opponent::None);
    // Black wall on column 3 claims the right side; White holds one stone.
    setpos(
        &mut game,
        &[(3, 0), (3, 1), (3, 2), (3, 3), (3, 4)],
        &[(0, 0)],
    );
    let sheet = score::score(&game);
    assert_eq!(sheet.black.territory, 5);
    assert_eq!(sheet.black.stones, 5);
    // Left region touches both colors: neutral.
    assert_eq!(sheet.white.territory, 0);
    assert_eq!(sheet.winner(), Some(Color::Black));
}

// =============================================================================
// Asynchronous opponent and the generation guard
// =============================================================================

#[test]
fn test_stale_opponent_result_is_discarded_after_reset() {
    let mut game = game_of(5, Opponent::Erratic);
    assert!(game.make_move(2, 2, Color::Black));

    let pending = opponent::think_with_delay(&game, Duration::from_millis(30));
    game.reset(GameConfig {
        size: 5,
        opponent: Opponent::Erratic,
        ..GameConfig::default()
    })
    .unwrap();

    let fresh = game.board().serialize();
    assert_eq!(game.resolve_opponent(pending), None);
    assert_eq!(game.board().serialize(), fresh);
    assert!(game.history().is_empty());
}

#[test]
fn test_current_opponent_result_applies() {
    fastrand::seed(5);
    let mut game = game_of(5, Opponent::Erratic);
    assert!(game.make_move(2, 2, Color::Black));
    let pending = opponent::think_with_delay(&game, Duration::from_millis(1));
    match game.resolve_opponent(pending) {
        Some(Play::Move(x, y)) => {
            assert_eq!(game.board().color_at(x, y), Some(Color::White));
            assert_eq!(game.previous_player(), Some(Color::White));
        }
        other => panic!("expected a white move, got {other:?}"),
    }
    assert_chain_invariants(game.board());
}

// =============================================================================
// Chain invariants over a long random game
// =============================================================================

#[test]
fn test_invariants_hold_across_a_scrappy_game() {
    fastrand::seed(99);
    let mut game = game_of(7, Opponent::Erratic);

    for _ in 0..120 {
        if game.is_over() {
            break;
        }
        // Black plays the first legal point, or passes.
        match first_legal(&game, Color::Black) {
            Some((x, y)) => assert!(game.make_move(x, y, Color::Black)),
            None => game.pass_turn(Color::Black),
        }
        assert_chain_invariants(game.board());
        if game.is_over() {
            break;
        }
        // White is driven by the erratic selector.
        let pending = opponent::think_with_delay(&game, Duration::from_millis(0));
        assert!(game.resolve_opponent(pending).is_some());
        assert_chain_invariants(game.board());
    }
}

// =============================================================================
// Cheats inside a running game
// =============================================================================

#[test]
fn test_cheat_mutation_keeps_chains_consistent() {
    let mut game = game_of(5, Opponent::Passive);
    setpos(&mut game, &[(1, 2), (3, 2), (2, 1)], &[(2, 2)]);
    // A guaranteed cheat drops the capturing stone without validation.
    let outcome = game.attempt_cheat(CheatKind::PlaceExtra((2, 3)), 5.0);
    assert_eq!(outcome, CheatOutcome::Success);
    assert!(game.board().is_empty_point(2, 2));
    assert_eq!(game.captures().by_black, 1);
    assert_chain_invariants(game.board());

    // The opponent still gets to answer through the normal path.
    let pending = opponent::think_with_delay(&game, Duration::from_millis(0));
    assert_eq!(game.resolve_opponent(pending), Some(Play::Pass));
}

// =============================================================================
// The special oversized board
// =============================================================================

#[test]
fn test_special_board_plays_like_the_small_ones() {
    let mut game = game_of(19, Opponent::None);
    assert!(game.make_move(9, 9, Color::Black));
    assert!(game.make_move(3, 15, Color::White));
    assert_eq!(game.board().serialize().len(), 19 * 19);
    assert_chain_invariants(game.board());
}

//! Territory and final score calculation.
//!
//! Scoring flood-fills maximal regions of empty (and offline) points. A
//! region bordered exclusively by one color belongs to that color; a
//! region both colors touch, or that no stone touches, is neutral. The
//! final score per color is stones + territory + captures, plus komi for
//! White as the second player.

use std::collections::BTreeSet;

use crate::board::{Board, Cell, Color};
use crate::chains::Captures;
use crate::game::Game;

/// One color's scoring breakdown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreLine {
    pub stones: u32,
    pub territory: u32,
    pub captures: u32,
    pub komi: f32,
}

impl ScoreLine {
    pub fn total(&self) -> f32 {
        (self.stones + self.territory + self.captures) as f32 + self.komi
    }
}

/// Final score for both colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreSheet {
    pub black: ScoreLine,
    pub white: ScoreLine,
}

impl ScoreSheet {
    /// The leading color, or `None` on an exact tie.
    pub fn winner(&self) -> Option<Color> {
        let black = self.black.total();
        let white = self.white.total();
        if black > white {
            Some(Color::Black)
        } else if white > black {
            Some(Color::White)
        } else {
            None
        }
    }
}

/// Count territory for both colors as `(black, white)`.
///
/// Offline points are carried along inside regions and count toward the
/// controlling color's territory like the empty points around them.
pub fn territory(board: &Board) -> (u32, u32) {
    let size = board.size();
    let mut visited = vec![false; size * size];
    let mut black = 0u32;
    let mut white = 0u32;

    for y in 0..size {
        for x in 0..size {
            if visited[y * size + x] {
                continue;
            }
            if !matches!(board.cell(x, y), Ok(Cell::Empty) | Ok(Cell::Offline)) {
                continue;
            }

            let mut region = 0u32;
            let mut borders: BTreeSet<Color> = BTreeSet::new();
            let mut stack = vec![(x, y)];
            while let Some((cx, cy)) = stack.pop() {
                if visited[cy * size + cx] {
                    continue;
                }
                visited[cy * size + cx] = true;
                region += 1;
                for (nx, ny) in board.neighbors(cx, cy) {
                    match board.cell(nx, ny) {
                        Ok(Cell::Stone(point)) => {
                            borders.insert(point.color);
                        }
                        Ok(_) if !visited[ny * size + nx] => stack.push((nx, ny)),
                        _ => {}
                    }
                }
            }

            if borders.len() == 1 {
                match borders.first() {
                    Some(Color::Black) => black += region,
                    Some(Color::White) => white += region,
                    None => {}
                }
            }
        }
    }

    (black, white)
}

/// Score a board directly, given capture tallies and komi.
pub fn score_board(board: &Board, captures: Captures, komi: f32) -> ScoreSheet {
    let (terr_black, terr_white) = territory(board);
    let mut stones_black = 0u32;
    let mut stones_white = 0u32;
    for (_, point) in board.stones() {
        match point.color {
            Color::Black => stones_black += 1,
            Color::White => stones_white += 1,
        }
    }
    ScoreSheet {
        black: ScoreLine {
            stones: stones_black,
            territory: terr_black,
            captures: captures.by_black,
            komi: 0.0,
        },
        white: ScoreLine {
            stones: stones_white,
            territory: terr_white,
            captures: captures.by_white,
            komi,
        },
    }
}

/// Score the current game state.
pub fn score(game: &Game) -> ScoreSheet {
    score_board(game.board(), game.captures(), game.komi())
}

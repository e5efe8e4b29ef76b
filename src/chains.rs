//! Chain and liberty analysis.
//!
//! After any board mutation the analyzer recomputes connected groups of
//! same-colored stones (chains) and their liberties, and resolves captures.
//! Capture resolution checks the opposing neighbor chains of the placed
//! stone before the placing player's own chain: self-capture is only
//! possible when no opposing chain fell first, mirroring standard Go
//! capture precedence.

use std::collections::BTreeSet;

use crate::board::{Board, ChainId, Color, Coord};

/// Stones removed during one capture resolution, credited to the capturer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Captures {
    pub by_black: u32,
    pub by_white: u32,
}

impl Captures {
    /// Stones captured by the given color.
    pub fn by(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.by_black,
            Color::White => self.by_white,
        }
    }

    fn credit(&mut self, color: Color, stones: u32) {
        match color {
            Color::Black => self.by_black += stones,
            Color::White => self.by_white += stones,
        }
    }
}

/// Recompute chain ids and liberty lists for every stone on the board.
///
/// Flood-fills 4-connected same-color groups, assigns each group a fresh
/// id, and stores the union of adjacent empty points on every member.
/// Offline cells are neither liberties nor connections.
pub fn rebuild(board: &mut Board) {
    let size = board.size();
    let mut visited = vec![false; size * size];
    let mut next_id: ChainId = 0;

    for y in 0..size {
        for x in 0..size {
            if visited[y * size + x] {
                continue;
            }
            let Some(color) = board.color_at(x, y) else {
                continue;
            };

            let mut members = Vec::new();
            let mut liberties = BTreeSet::new();
            let mut stack = vec![(x, y)];
            while let Some((cx, cy)) = stack.pop() {
                if visited[cy * size + cx] {
                    continue;
                }
                visited[cy * size + cx] = true;
                members.push((cx, cy));
                for (nx, ny) in board.neighbors(cx, cy) {
                    if board.is_empty_point(nx, ny) {
                        liberties.insert((nx, ny));
                    } else if board.color_at(nx, ny) == Some(color) && !visited[ny * size + nx] {
                        stack.push((nx, ny));
                    }
                }
            }

            let libs: Vec<Coord> = liberties.into_iter().collect();
            for &(mx, my) in &members {
                if let Some(point) = board.stone_mut(mx, my) {
                    point.chain = Some(next_id);
                    point.liberties = Some(libs.clone());
                }
            }
            next_id += 1;
        }
    }
}

/// Collect the coordinates of every stone in the chain containing `start`.
///
/// Returns an empty list when `start` holds no stone.
pub fn chain_members(board: &Board, start: Coord) -> Vec<Coord> {
    let Some(color) = board.color_at(start.0, start.1) else {
        return Vec::new();
    };
    let size = board.size();
    let mut visited = vec![false; size * size];
    let mut members = Vec::new();
    let mut stack = vec![start];

    while let Some((cx, cy)) = stack.pop() {
        if visited[cy * size + cx] {
            continue;
        }
        visited[cy * size + cx] = true;
        members.push((cx, cy));
        for (nx, ny) in board.neighbors(cx, cy) {
            if board.color_at(nx, ny) == Some(color) && !visited[ny * size + nx] {
                stack.push((nx, ny));
            }
        }
    }
    members
}

fn liberties_at(board: &Board, coord: Coord) -> usize {
    board
        .stone(coord.0, coord.1)
        .and_then(|p| p.liberties.as_ref())
        .map(|l| l.len())
        .unwrap_or(0)
}

/// Resolve captures after a stone was placed at `placed` by `placer`.
///
/// Rebuilds chain data, removes opposing chains left without liberties,
/// then (only if nothing opposing fell) removes the placing chain itself
/// when it has no liberties. The board ends fully rebuilt.
pub fn resolve_captures(board: &mut Board, placed: Coord, placer: Color) -> Captures {
    rebuild(board);
    let mut captures = Captures::default();
    let opponent = placer.opposite();
    let (px, py) = placed;

    // Opposing neighbor chains first.
    let mut dead_chains: BTreeSet<ChainId> = BTreeSet::new();
    let mut dead_stones: Vec<Coord> = Vec::new();
    for (nx, ny) in board.neighbors(px, py) {
        if let Some(point) = board.stone(nx, ny) {
            if point.color == opponent && liberties_at(board, (nx, ny)) == 0 {
                if let Some(id) = point.chain {
                    if dead_chains.insert(id) {
                        dead_stones.extend(chain_members(board, (nx, ny)));
                    }
                }
            }
        }
    }
    for &(dx, dy) in &dead_stones {
        board.remove(dx, dy).ok();
    }
    if !dead_stones.is_empty() {
        captures.credit(placer, dead_stones.len() as u32);
        rebuild(board);
        return captures;
    }

    // No opposing capture freed a liberty: the placing chain may now die.
    if liberties_at(board, placed) == 0 && board.stone(px, py).is_some() {
        let own = chain_members(board, placed);
        for &(dx, dy) in &own {
            board.remove(dx, dy).ok();
        }
        captures.credit(opponent, own.len() as u32);
        rebuild(board);
    }

    captures
}

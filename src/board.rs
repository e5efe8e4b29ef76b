//! Board model: the square grid of points.
//!
//! A board is a square matrix of cells. Each cell is empty, holds a stone,
//! or is permanently offline (disabled for the life of the board instance).
//! Offline cells never change and are invisible to move and liberty logic.
//!
//! Stones carry the chain membership and liberty data maintained by the
//! [`crate::chains`] analyzer. The compact serialization (one character per
//! cell, row-major) is the canonical form for repetition checks.

use std::fmt;

use crate::constants::{size_allowed, BLACK_CHAR, EMPTY_CHAR, OFFLINE_CHAR, WHITE_CHAR};

/// A coordinate pair `(x, y)`, `x` running left to right, `y` top to bottom.
pub type Coord = (usize, usize);

/// Opaque identifier shared by all stones of one chain.
pub type ChainId = u32;

/// Stone color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other color.
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Per-stone state: color plus the analyzer's chain bookkeeping.
///
/// `chain` and `liberties` are `None` until the analyzer has run; after a
/// rebuild every stone of a chain shares the same id and liberty list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointState {
    pub color: Color,
    pub chain: Option<ChainId>,
    pub liberties: Option<Vec<Coord>>,
}

impl PointState {
    fn new(color: Color) -> Self {
        Self {
            color,
            chain: None,
            liberties: None,
        }
    }
}

/// One cell of the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Offline,
    Stone(PointState),
}

/// Errors raised by board construction and point access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate outside the board, or targeting an offline point.
    InvalidCoordinate { x: usize, y: usize },
    /// Side length outside the allowed set.
    UnsupportedSize(usize),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidCoordinate { x, y } => {
                write!(f, "invalid coordinate ({x}, {y})")
            }
            BoardError::UnsupportedSize(size) => {
                write!(f, "unsupported board size {size}")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// The square grid of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. `size` must come from the allowed set
    /// (see [`crate::constants::ALLOWED_SIZES`] and
    /// [`crate::constants::SPECIAL_SIZE`]).
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !size_allowed(size) {
            return Err(BoardError::UnsupportedSize(size));
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Create a board with the given points permanently offline.
    pub fn with_offline(size: usize, offline: &[Coord]) -> Result<Self, BoardError> {
        let mut board = Self::new(size)?;
        for &(x, y) in offline {
            if !board.in_bounds(x, y) {
                return Err(BoardError::InvalidCoordinate { x, y });
            }
            let idx = board.idx(x, y);
            board.cells[idx] = Cell::Offline;
        }
        Ok(board)
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// Read a cell, failing on out-of-bounds coordinates.
    pub fn cell(&self, x: usize, y: usize) -> Result<&Cell, BoardError> {
        if !self.in_bounds(x, y) {
            return Err(BoardError::InvalidCoordinate { x, y });
        }
        Ok(&self.cells[self.idx(x, y)])
    }

    /// The stone at a point, if any. Out-of-bounds reads as no stone.
    pub fn stone(&self, x: usize, y: usize) -> Option<&PointState> {
        if !self.in_bounds(x, y) {
            return None;
        }
        match &self.cells[self.idx(x, y)] {
            Cell::Stone(point) => Some(point),
            _ => None,
        }
    }

    pub(crate) fn stone_mut(&mut self, x: usize, y: usize) -> Option<&mut PointState> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let idx = self.idx(x, y);
        match &mut self.cells[idx] {
            Cell::Stone(point) => Some(point),
            _ => None,
        }
    }

    /// The color at a point, if a stone sits there.
    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        self.stone(x, y).map(|p| p.color)
    }

    /// Whether the point is in bounds, online, and empty.
    pub fn is_empty_point(&self, x: usize, y: usize) -> bool {
        matches!(self.cell(x, y), Ok(Cell::Empty))
    }

    /// Whether the point is in bounds and permanently offline.
    pub fn is_offline(&self, x: usize, y: usize) -> bool {
        matches!(self.cell(x, y), Ok(Cell::Offline))
    }

    /// Put a stone on a point. Offline points reject the write the same way
    /// out-of-bounds coordinates do; an existing stone is overwritten.
    pub fn place(&mut self, x: usize, y: usize, color: Color) -> Result<(), BoardError> {
        if !self.in_bounds(x, y) || self.is_offline(x, y) {
            return Err(BoardError::InvalidCoordinate { x, y });
        }
        let idx = self.idx(x, y);
        self.cells[idx] = Cell::Stone(PointState::new(color));
        Ok(())
    }

    /// Clear a point back to empty.
    pub fn remove(&mut self, x: usize, y: usize) -> Result<(), BoardError> {
        if !self.in_bounds(x, y) || self.is_offline(x, y) {
            return Err(BoardError::InvalidCoordinate { x, y });
        }
        let idx = self.idx(x, y);
        self.cells[idx] = Cell::Empty;
        Ok(())
    }

    /// The 4-connected in-bounds neighbors of a point. Offline neighbors are
    /// included; callers distinguish them by cell kind.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = Coord> + '_ {
        let s = self.size;
        let mut v = Vec::new();
        if x > 0 {
            v.push((x - 1, y));
        }
        if x + 1 < s {
            v.push((x + 1, y));
        }
        if y > 0 {
            v.push((x, y - 1));
        }
        if y + 1 < s {
            v.push((x, y + 1));
        }
        v.into_iter()
    }

    /// Iterate over all stones with their coordinates, row-major.
    pub fn stones(&self) -> impl Iterator<Item = (Coord, &PointState)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            let coord = (i % self.size, i / self.size);
            match cell {
                Cell::Stone(point) => Some((coord, point)),
                _ => None,
            }
        })
    }

    /// Compact row-major serialization, one character per cell.
    ///
    /// Deterministic for identical content; this string is what the
    /// repetition history stores and compares.
    pub fn serialize(&self) -> String {
        self.cells
            .iter()
            .map(|cell| match cell {
                Cell::Empty => EMPTY_CHAR,
                Cell::Offline => OFFLINE_CHAR,
                Cell::Stone(p) if p.color == Color::Black => BLACK_CHAR,
                Cell::Stone(_) => WHITE_CHAR,
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let ch = match &self.cells[self.idx(x, y)] {
                    Cell::Empty => EMPTY_CHAR,
                    Cell::Offline => OFFLINE_CHAR,
                    Cell::Stone(p) if p.color == Color::Black => BLACK_CHAR,
                    Cell::Stone(_) => WHITE_CHAR,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! Pieces module - the fixed shape catalog and quarter-turn rotation
//!
//! Every piece is drawn on a 3x3 pattern whose centre cell is the placement
//! anchor. Patterns are stored row-major with `y` growing downwards, the same
//! orientation the board uses.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::types::{PieceKind, Rotation, PIECE_GRID};

/// Occupancy pattern of a piece, indexed `[y][x]`
pub type Pattern = [[bool; PIECE_GRID]; PIECE_GRID];

/// Offset of a single occupied cell relative to the pattern's top-left
pub type CellOffset = (i8, i8);

/// Offsets of all occupied cells of a piece (at most 9)
pub type PieceCells = ArrayVec<CellOffset, { PIECE_GRID * PIECE_GRID }>;

/// Pattern index of the centre cell, aligned with the anchor coordinate
pub const CENTER: i8 = 1;

const O: bool = false;
const X: bool = true;

/// Catalog patterns in id order, North orientation
const CATALOG: [Pattern; 15] = [
    // 0 Line
    [[O, X, O], [O, X, O], [O, X, O]],
    // 1 C
    [[O, X, X], [O, X, O], [O, X, X]],
    // 2 Plus
    [[O, X, O], [X, X, X], [O, X, O]],
    // 3 Dot
    [[O, O, O], [O, X, O], [O, O, O]],
    // 4 Square
    [[X, X, O], [X, X, O], [O, O, O]],
    // 5 L
    [[O, X, O], [O, X, O], [O, X, X]],
    // 6 J
    [[O, X, O], [O, X, O], [X, X, O]],
    // 7 S
    [[O, O, X], [O, X, X], [O, X, O]],
    // 8 Z
    [[X, O, O], [X, X, O], [O, X, O]],
    // 9 T
    [[X, X, X], [O, X, O], [O, O, O]],
    // 10 X
    [[X, O, X], [O, X, O], [X, O, X]],
    // 11 Corner
    [[O, X, X], [O, X, O], [O, O, O]],
    // 12 Inverse corner
    [[X, X, O], [O, X, O], [O, O, O]],
    // 13 Diagonal
    [[X, O, O], [O, X, O], [O, O, X]],
    // 14 Double
    [[O, O, O], [X, X, O], [O, O, O]],
];

/// Catalog pattern of a kind in its North orientation
pub fn base_pattern(kind: PieceKind) -> Pattern {
    CATALOG[kind.id() as usize]
}

/// Rotate a pattern one quarter turn clockwise
pub fn rotate_pattern_cw(pattern: &Pattern) -> Pattern {
    let n = PIECE_GRID;
    let mut out = [[false; PIECE_GRID]; PIECE_GRID];
    for (y, row) in out.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = pattern[n - 1 - x][y];
        }
    }
    out
}

/// A piece value: a catalog shape in one of four orientations
///
/// Pieces are plain values. Rotating returns a new piece and never touches
/// the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
}

impl Piece {
    /// Create a piece in its catalog orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
        }
    }

    /// Value written into board cells when placed
    pub fn value(&self) -> u8 {
        self.kind.value()
    }

    /// Return this piece advanced by `steps` clockwise quarter turns.
    /// `rotate(3)` and `rotate(-1)` are both one counter-clockwise turn.
    pub fn rotate(self, steps: i32) -> Self {
        Self {
            rotation: self.rotation.rotate_by(steps),
            ..self
        }
    }

    /// Occupancy pattern for the current orientation
    pub fn pattern(&self) -> Pattern {
        let mut pattern = base_pattern(self.kind);
        for _ in 0..self.rotation.index() {
            pattern = rotate_pattern_cw(&pattern);
        }
        pattern
    }

    /// Offsets of occupied cells, row-major
    pub fn cells(&self) -> PieceCells {
        let pattern = self.pattern();
        let mut cells = PieceCells::new();
        for (y, row) in pattern.iter().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                if filled {
                    cells.push((x as i8, y as i8));
                }
            }
        }
        cells
    }

    pub fn block_count(&self) -> usize {
        self.cells().len()
    }
}

/// Create the catalog piece with the given id (0-14) in North orientation
pub fn create(id: u8) -> Result<Piece> {
    PieceKind::from_id(id)
        .map(Piece::new)
        .ok_or(GameError::UnknownPiece(id))
}

/// Rotate a piece by `steps` clockwise quarter turns
pub fn rotate(piece: Piece, steps: i32) -> Piece {
    piece.rotate(steps)
}

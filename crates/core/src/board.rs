//! Board module - manages the game grid
//!
//! The board is a `cols x rows` grid of cell values, `0` meaning empty.
//! Uses a flat vector in row-major order; dimensions are fixed at construction.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//!
//! Pieces are anchored by their pattern centre: placing at (x, y) puts the
//! pattern's top-left at (x - 1, y - 1).

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{GameError, Result};
use crate::pieces::{Piece, CENTER};
use crate::types::{Cell, Coord, DEFAULT_COLS, DEFAULT_ROWS, EMPTY_CELL, MAX_BOARD_DIM};

/// Result of scanning the board for full rows and columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineScan {
    /// Union of all cells in full rows and full columns
    pub cells: BTreeSet<Coord>,
    /// Indices of full rows, top to bottom
    pub rows: Vec<u8>,
    /// Indices of full columns, left to right
    pub cols: Vec<u8>,
}

impl LineScan {
    /// Number of full rows plus full columns
    pub fn line_count(&self) -> u32 {
        (self.rows.len() + self.cols.len()) as u32
    }

    /// Number of distinct cells to clear
    pub fn block_count(&self) -> u32 {
        self.cells.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: u8,
    rows: u8,
    /// Flat cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(cols: u8, rows: u8) -> Result<Self> {
        if cols == 0 || rows == 0 || cols > MAX_BOARD_DIM || rows > MAX_BOARD_DIM {
            return Err(GameError::InvalidBoardSize { cols, rows });
        }
        Ok(Self {
            cols,
            rows,
            cells: vec![EMPTY_CELL; cols as usize * rows as usize],
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || y < 0 || x as u8 >= self.cols || y as u8 >= self.rows {
            return None;
        }
        Some(y as usize * self.cols as usize + x as usize)
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Get cell at position (x, y)
    pub fn get(&self, x: i8, y: i8) -> Result<Cell> {
        self.index(x, y)
            .map(|idx| self.cells[idx])
            .ok_or(GameError::OutOfBounds { x, y })
    }

    /// Set cell at position (x, y)
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> Result<()> {
        let idx = self.index(x, y).ok_or(GameError::OutOfBounds { x, y })?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Ok(EMPTY_CELL))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        self.index(x, y).is_none()
    }

    /// Board cells a piece would cover when anchored at (x, y).
    ///
    /// Yields `None` for cells whose coordinate does not fit in `i8`.
    fn target_cells(piece: &Piece, x: i8, y: i8) -> impl Iterator<Item = Option<(i8, i8)>> {
        piece.cells().into_iter().map(move |(dx, dy)| {
            let tx = x.checked_sub(CENTER)?.checked_add(dx)?;
            let ty = y.checked_sub(CENTER)?.checked_add(dy)?;
            Some((tx, ty))
        })
    }

    /// Check whether every occupied cell of the piece lands on an in-bounds,
    /// empty board cell when anchored at (x, y)
    pub fn can_place(&self, piece: &Piece, x: i8, y: i8) -> bool {
        Self::target_cells(piece, x, y)
            .all(|target| matches!(target, Some((tx, ty)) if self.is_empty_at(tx, ty)))
    }

    /// Write the piece's value into every target cell.
    ///
    /// All-or-nothing: if any target is out of bounds or occupied the board is
    /// left untouched.
    pub fn place(&mut self, piece: &Piece, x: i8, y: i8) -> Result<()> {
        if !self.can_place(piece, x, y) {
            return Err(GameError::PlacementRejected { x, y });
        }

        let value = piece.value();
        for (tx, ty) in Self::target_cells(piece, x, y).flatten() {
            self.set(tx, ty, value)?;
        }
        debug!(kind = piece.kind.as_str(), x, y, "piece placed");
        Ok(())
    }

    /// Check if a row is completely filled.
    ///
    /// Counts consecutive filled cells from column 0; the row is full only if
    /// the run reaches the board width.
    pub fn is_row_full(&self, y: u8) -> bool {
        if y >= self.rows {
            return false;
        }
        let start = y as usize * self.cols as usize;
        let run = self.cells[start..start + self.cols as usize]
            .iter()
            .take_while(|&&cell| cell != EMPTY_CELL)
            .count();
        run == self.cols as usize
    }

    /// Check if a column is completely filled, scanning top to bottom
    pub fn is_col_full(&self, x: u8) -> bool {
        if x >= self.cols {
            return false;
        }
        let run = (0..self.rows as usize)
            .map(|y| self.cells[y * self.cols as usize + x as usize])
            .take_while(|&cell| cell != EMPTY_CELL)
            .count();
        run == self.rows as usize
    }

    /// Find every full row and column without modifying the board
    pub fn scan_full_lines(&self) -> LineScan {
        let mut scan = LineScan::default();

        for y in 0..self.rows {
            if self.is_row_full(y) {
                scan.rows.push(y);
                scan.cells
                    .extend((0..self.cols).map(|x| Coord::new(x as i8, y as i8)));
            }
        }

        for x in 0..self.cols {
            if self.is_col_full(x) {
                scan.cols.push(x);
                scan.cells
                    .extend((0..self.rows).map(|y| Coord::new(x as i8, y as i8)));
            }
        }

        if !scan.is_empty() {
            debug!(
                rows = ?scan.rows,
                cols = ?scan.cols,
                blocks = scan.cells.len(),
                "full lines found"
            );
        }
        scan
    }

    /// Reset the given cells to empty
    pub fn clear_cells<'a>(&mut self, coords: impl IntoIterator<Item = &'a Coord>) -> Result<()> {
        for coord in coords {
            self.set(coord.x, coord.y, EMPTY_CELL)?;
        }
        Ok(())
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY_CELL).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    /// Copy out as one vector per row
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.cols as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Create from rows for testing
    #[cfg(test)]
    pub fn from_rows(rows: &[&[Cell]]) -> Self {
        let cols = rows[0].len();
        assert!(rows.iter().all(|r| r.len() == cols));
        Self {
            cols: cols as u8,
            rows: rows.len() as u8,
            cells: rows.iter().flat_map(|r| r.iter().copied()).collect(),
        }
    }
}

impl Default for Board {
    /// Empty board of the default size
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            cells: vec![EMPTY_CELL; DEFAULT_COLS as usize * DEFAULT_ROWS as usize],
        }
    }
}

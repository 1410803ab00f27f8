//! Board: the 10x20 playfield.
//!
//! Cells live in a flat row-major array for cheap cloning; the search engine
//! clones the whole board per candidate placement. Coordinates are (x, y)
//! with x in 0..10 left to right and y in 0..20 top to bottom.

use arrayvec::ArrayVec;

use crate::core::pieces::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The playfield grid. `Clone` produces an independent snapshot with no
/// back-reference; simulation branches never alias the live board.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (x, y); `None` when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Write a cell. Returns false when out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a single position is inside the field and empty.
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Whether every filled cell of the piece maps to an open position.
    pub fn is_valid(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(dx, dy)| self.is_open(piece.x + dx, piece.y + dy))
    }

    /// Write the piece's filled cells into the grid at its current position.
    /// The caller must have checked `is_valid` first; out-of-bounds cells are
    /// silently skipped.
    pub fn lock(&mut self, piece: &Piece) {
        let id = piece.id();
        for (dx, dy) in piece.cells() {
            self.set(piece.x + dx, piece.y + dy, Some(id));
        }
    }

    fn is_row_full(&self, y: usize) -> bool {
        let start = y * BOARD_WIDTH as usize;
        self.cells[start..start + BOARD_WIDTH as usize]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Remove every full row, shifting the rows above each one down and
    /// zeroing the top. Returns the removed row indices (bottom to top) so
    /// the caller can raise a lines-cleared event; simultaneous clears of up
    /// to four rows resolve in one call.
    pub fn clear_lines(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared = ArrayVec::new();
        let width = BOARD_WIDTH as usize;

        for y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(y) && !cleared.is_full() {
                cleared.push(y);
            }
        }

        // Remove topmost first; shifting only moves rows above the removed
        // one, so lower full rows keep their indices.
        for &y in cleared.iter().rev() {
            for row in (1..=y).rev() {
                let src = (row - 1) * width;
                let dst = row * width;
                self.cells.copy_within(src..src + width, dst);
            }
            for cell in &mut self.cells[0..width] {
                *cell = None;
            }
        }

        cleared
    }

    /// Number of full rows without removing them (search feature input).
    pub fn count_full_rows(&self) -> u32 {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .count() as u32
    }

    /// Empty the entire grid.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Export the grid as encoded bytes: 0 empty, 1..=7 standard kinds,
    /// 8+ custom tags.
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                out[y][x] = match self.cells[y * BOARD_WIDTH as usize + x] {
                    Some(id) => id.cell_value(),
                    None => 0,
                };
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

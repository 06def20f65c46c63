//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or locked with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Row indices cleared by one [`Board::clear_full_rows`] call, bottom to top
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Exported board grid: 0 = empty, 1..=7 = piece color index
pub type BoardGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from an exported grid. Values outside 1..=7 load as empty.
    pub fn from_grid(grid: &BoardGrid) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                board.cells[y * BOARD_WIDTH as usize + x] = PieceKind::from_color_index(v);
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
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

    /// Get cell at position (x, y); `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) is within bounds and locked
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a piece cell at (x, y) would collide.
    ///
    /// Walls and the floor block; so does any locked cell. Rows above the top
    /// edge (y < 0) are open.
    pub fn is_blocked(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        y >= 0 && self.is_occupied(x, y)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Check if a row has no locked cells
    pub fn is_row_empty(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_none())
    }

    /// Clear all full rows and return the row indices that were cleared (bottom to top).
    ///
    /// Surviving rows keep their relative order and slide down; the freed rows at
    /// the top are emptied. Two-pointer compaction, no allocation. Every full row
    /// is cleared, however many there are.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Merge a piece into the board at its current position.
    ///
    /// Only empty in-bounds cells are written; callers lock a piece only at a
    /// non-colliding position, so nothing locked is ever overwritten.
    pub fn lock_piece(&mut self, piece: &Piece) {
        for (x, y, _) in piece.cells() {
            if let Some(idx) = Self::index(x, y) {
                if self.cells[idx].is_none() {
                    self.cells[idx] = Some(piece.kind);
                }
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Export as a color-index grid
    pub fn write_u8_grid(&self, out: &mut BoardGrid) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * BOARD_WIDTH as usize;
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[start + x].map_or(0, |k| k.color_index());
            }
        }
    }

    pub fn to_grid(&self) -> BoardGrid {
        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.write_u8_grid(&mut grid);
        grid
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;

    fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(kind));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_is_blocked_bounds() {
        let board = Board::new();
        assert!(board.is_blocked(-1, 5));
        assert!(board.is_blocked(10, 5));
        assert!(board.is_blocked(3, 20));
        // Above the top edge is open.
        assert!(!board.is_blocked(3, -2));
        assert!(!board.is_blocked(0, 0));
    }

    #[test]
    fn test_clear_full_rows_keeps_order() {
        let mut board = Board::new();
        fill_row(&mut board, 19, PieceKind::I);
        board.set(0, 18, Some(PieceKind::T));
        fill_row(&mut board, 17, PieceKind::O);
        board.set(4, 16, Some(PieceKind::L));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);

        assert_eq!(board.get(0, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.get(4, 18), Some(Some(PieceKind::L)));
        assert!(board.is_row_empty(0));
        assert!(board.is_row_empty(17));
    }

    #[test]
    fn test_clear_more_than_four_rows() {
        let mut board = Board::new();
        for y in 14..BOARD_HEIGHT as i8 {
            fill_row(&mut board, y, PieceKind::Z);
        }
        board.set(3, 13, Some(PieceKind::T));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 18, 17, 16, 15, 14]);
        assert_eq!(board.get(3, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
        for y in 0..BOARD_HEIGHT as usize - 1 {
            assert!(board.is_row_empty(y));
        }
    }

    #[test]
    fn test_clear_includes_top_row() {
        let mut board = Board::new();
        fill_row(&mut board, 0, PieceKind::J);
        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[0]);
        assert!(board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_lock_piece_writes_kind() {
        let mut board = Board::new();
        let piece = Piece::spawn(PieceKind::O).translated(0, 18);
        board.lock_piece(&piece);
        assert_eq!(board.get(4, 18), Some(Some(PieceKind::O)));
        assert_eq!(board.get(5, 19), Some(Some(PieceKind::O)));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 4);
    }

    #[test]
    fn test_grid_roundtrip() {
        let mut grid = [[0u8; 10]; 20];
        grid[5][3] = 2;
        grid[19][9] = 7;
        let board = Board::from_grid(&grid);
        assert_eq!(board.get(3, 5), Some(Some(PieceKind::O)));
        assert_eq!(board.to_grid(), grid);
    }
}

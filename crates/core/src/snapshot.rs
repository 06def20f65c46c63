//! Read-only draw data handed to rendering surfaces once per frame.

use crate::board::BoardGrid;
use crate::pieces::{Piece, ShapeMatrix};
use crate::types::{GameStatus, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawFrame {
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    /// Landing position of the active piece, advisory only
    pub ghost: Option<(i8, i8)>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub status: GameStatus,
}

impl DrawFrame {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.status.is_running()
    }

    /// Board grid with the active piece overlaid (ghost not included)
    pub fn composed_board(&self) -> BoardGrid {
        let mut grid = self.board;
        if let Some(active) = self.active {
            for (dx, dy, v) in active.matrix.filled() {
                let x = active.x + dx;
                let y = active.y + dy;
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    grid[y as usize][x as usize] = v;
                }
            }
        }
        grid
    }
}

impl Default for DrawFrame {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            next: None,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            max_combo: 0,
            status: GameStatus::NotStarted,
        }
    }
}

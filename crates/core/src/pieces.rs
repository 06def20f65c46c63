//! Pieces module - shape catalog, matrix rotation and wall kicks
//!
//! Every piece kind is an explicit small integer grid. Rotation is an index
//! transform over that grid (no per-orientation tables), followed by a purely
//! horizontal kick search.

use crate::types::{PieceKind, RotationDirection, BOARD_WIDTH, WALL_KICK_OFFSETS};

/// Largest side of any catalog shape
pub const MAX_SHAPE_DIM: usize = 4;

/// A shape grid of up to 4x4 cells.
///
/// Cells outside `rows x cols` are always zero, so two matrices compare equal
/// exactly when they describe the same grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    cells: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl ShapeMatrix {
    /// Build a matrix from row slices. Rows and columns beyond 4 are ignored.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let height = rows.len().min(MAX_SHAPE_DIM);
        let width = rows
            .iter()
            .take(height)
            .map(|r| r.len())
            .max()
            .unwrap_or(0)
            .min(MAX_SHAPE_DIM);

        for (r, row) in rows.iter().take(height).enumerate() {
            for (c, &v) in row.iter().take(width).enumerate() {
                cells[r][c] = v;
            }
        }

        Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Cell value at (row, col); 0 outside the grid
    pub fn get(&self, row: usize, col: usize) -> u8 {
        if row >= self.rows as usize || col >= self.cols as usize {
            return 0;
        }
        self.cells[row][col]
    }

    /// Non-zero cells as `(dx, dy, value)` relative to the matrix origin
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8, u8)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize).filter_map(move |c| {
                let v = self.cells[r][c];
                (v != 0).then_some((c as i8, r as i8, v))
            })
        })
    }

    /// Quarter-turn transform.
    ///
    /// For an n x m matrix, clockwise maps (r, c) to (c, n-1-r) and
    /// counter-clockwise maps (r, c) to (m-1-c, r); the result is m x n.
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        let n = self.rows as usize;
        let m = self.cols as usize;
        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

        for r in 0..n {
            for c in 0..m {
                let (nr, nc) = match direction {
                    RotationDirection::Cw => (c, n - 1 - r),
                    RotationDirection::Ccw => (m - 1 - c, r),
                };
                cells[nr][nc] = self.cells[r][c];
            }
        }

        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

/// Spawn-orientation matrix for a piece kind
pub fn get_shape(kind: PieceKind) -> ShapeMatrix {
    let v = kind.color_index();
    match kind {
        PieceKind::I => ShapeMatrix::from_rows(&[&[v, v, v, v]]),
        PieceKind::O => ShapeMatrix::from_rows(&[&[v, v], &[v, v]]),
        PieceKind::T => ShapeMatrix::from_rows(&[&[0, v, 0], &[v, v, v]]),
        PieceKind::S => ShapeMatrix::from_rows(&[&[0, v, v], &[v, v, 0]]),
        PieceKind::Z => ShapeMatrix::from_rows(&[&[v, v, 0], &[0, v, v]]),
        PieceKind::J => ShapeMatrix::from_rows(&[&[v, 0, 0], &[v, v, v]]),
        PieceKind::L => ShapeMatrix::from_rows(&[&[0, 0, v], &[v, v, v]]),
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece in spawn orientation, horizontally centered on row 0
    pub fn spawn(kind: PieceKind) -> Self {
        let matrix = get_shape(kind);
        Self {
            kind,
            matrix,
            x: spawn_column(&matrix),
            y: 0,
        }
    }

    /// Copy of this piece moved by (dx, dy)
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Absolute board coordinates and values of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, u8)> + '_ {
        self.matrix
            .filled()
            .map(move |(dx, dy, v)| (self.x + dx, self.y + dy, v))
    }
}

/// Spawn column for a matrix: board center minus half the matrix width
pub fn spawn_column(matrix: &ShapeMatrix) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (matrix.cols() / 2) as i8
}

/// Try to rotate a piece with horizontal wall kicks.
///
/// `collides` is probed with each candidate placement; offsets are tried in
/// [`WALL_KICK_OFFSETS`] order at the original row. Returns the accepted piece
/// and the kick offset used, or `None` when every placement collides.
pub fn try_rotate(
    piece: &Piece,
    direction: RotationDirection,
    collides: impl Fn(&Piece) -> bool,
) -> Option<(Piece, i8)> {
    let rotated = Piece {
        matrix: piece.matrix.rotated(direction),
        ..*piece
    };

    WALL_KICK_OFFSETS.iter().find_map(|&dx| {
        let candidate = rotated.translated(dx, 0);
        (!collides(&candidate)).then_some((candidate, dx))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_cells_carry_color_index() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            let cells: Vec<_> = shape.filled().collect();
            assert_eq!(cells.len(), 4, "{:?} should have 4 cells", kind);
            assert!(cells.iter().all(|&(_, _, v)| v == kind.color_index()));
        }
    }

    #[test]
    fn test_cw_rotation_of_t() {
        // .T.      T.
        // TTT  ->  TT
        //          T.
        let t = get_shape(PieceKind::T);
        let cw = t.rotated(RotationDirection::Cw);
        assert_eq!((cw.rows(), cw.cols()), (3, 2));
        assert_eq!(cw, ShapeMatrix::from_rows(&[&[3, 0], &[3, 3], &[3, 0]]));
    }

    #[test]
    fn test_ccw_rotation_of_t() {
        let t = get_shape(PieceKind::T);
        let ccw = t.rotated(RotationDirection::Ccw);
        assert_eq!(ccw, ShapeMatrix::from_rows(&[&[0, 3], &[3, 3], &[0, 3]]));
    }

    #[test]
    fn test_i_rotation_swaps_dimensions() {
        let i = get_shape(PieceKind::I);
        let v = i.rotated(RotationDirection::Cw);
        assert_eq!((v.rows(), v.cols()), (4, 1));
        assert_eq!(v.filled().count(), 4);
    }

    #[test]
    fn test_four_turns_is_identity() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            let mut m = shape;
            for _ in 0..4 {
                m = m.rotated(RotationDirection::Cw);
            }
            assert_eq!(m, shape);
        }
    }

    #[test]
    fn test_spawn_is_centered() {
        assert_eq!(Piece::spawn(PieceKind::I).x, 3);
        assert_eq!(Piece::spawn(PieceKind::O).x, 4);
        assert_eq!(Piece::spawn(PieceKind::T).x, 4);
        assert!(PieceKind::ALL.iter().all(|&k| Piece::spawn(k).y == 0));
    }

    #[test]
    fn test_try_rotate_takes_first_free_offset() {
        let piece = Piece::spawn(PieceKind::T);
        // Reject the unkicked placement only.
        let (rotated, dx) =
            try_rotate(&piece, RotationDirection::Cw, |p| p.x == piece.x).unwrap();
        assert_eq!(dx, -1);
        assert_eq!(rotated.x, piece.x - 1);
        assert_eq!(rotated.y, piece.y);
    }

    #[test]
    fn test_try_rotate_rejects_when_all_offsets_collide() {
        let piece = Piece::spawn(PieceKind::L);
        assert!(try_rotate(&piece, RotationDirection::Ccw, |_| true).is_none());
    }
}

//! Collision queries over (board, piece): the collision predicate itself, drop
//! distance and the ghost projection. All functions are pure and safe to call
//! speculatively.

use crate::board::Board;
use crate::pieces::Piece;

/// Whether any filled cell of `piece` is outside the walls, at or below the
/// floor, or on a locked board cell.
pub fn collides(board: &Board, piece: &Piece) -> bool {
    piece.cells().any(|(x, y, _)| board.is_blocked(x, y))
}

/// Rows the piece can fall before it would collide
pub fn drop_distance(board: &Board, piece: &Piece) -> u32 {
    let mut probe = *piece;
    let mut rows = 0;
    while !collides(board, &probe.translated(0, 1)) {
        probe = probe.translated(0, 1);
        rows += 1;
        if rows > board.height() as u32 {
            // A piece that already collides never settles; stop at the board height.
            break;
        }
    }
    rows
}

/// Landing position of `piece` if it were hard-dropped now.
///
/// Works on a copy: translate down until the first collision, then step back one row.
pub fn ghost_position(board: &Board, piece: &Piece) -> (i8, i8) {
    let rows = drop_distance(board, piece);
    (piece.x, piece.y + rows as i8)
}

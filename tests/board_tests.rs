//! Board tests: grid access, lock & merge, line clearing

use blockfall::core::{Board, Piece};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(kind));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();
    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(!board.set(10, 10, Some(PieceKind::T)));
}

#[test]
fn test_blocked_cells() {
    let mut board = Board::new();
    board.set(3, 7, Some(PieceKind::L));

    assert!(board.is_blocked(-1, 5));
    assert!(board.is_blocked(BOARD_WIDTH as i8, 5));
    assert!(board.is_blocked(4, BOARD_HEIGHT as i8));
    assert!(board.is_blocked(3, 7));
    assert!(!board.is_blocked(3, 6));
    // Above the top edge is open space.
    assert!(!board.is_blocked(3, -2));
}

#[test]
fn test_lock_writes_color_index() {
    let mut board = Board::new();
    let mut piece = Piece::spawn(PieceKind::T);
    piece.y = 18;
    board.lock_piece(&piece);

    let grid = board.to_grid();
    // .T.
    // TTT at x=4..=6
    assert_eq!(grid[18][5], 3);
    assert_eq!(grid[19][4..7], [3, 3, 3]);
    assert_eq!(grid[18][4], 0);
    assert!(grid.iter().flatten().all(|&v| v <= 7));
}

#[test]
fn test_lock_skips_cells_above_top() {
    let mut board = Board::new();
    let mut piece = Piece::spawn(PieceKind::J);
    piece.y = -1;
    board.lock_piece(&piece);

    // Only the bottom row of J (y = 0) lands.
    assert_eq!(board.to_grid()[0][4..7], [6, 6, 6]);
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 3);
}

#[test]
fn test_clear_bottom_rows_shifts_down() {
    let mut board = Board::new();
    fill_row(&mut board, 19, PieceKind::I);
    fill_row(&mut board, 18, PieceKind::I);
    board.set(0, 17, Some(PieceKind::S));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19, 18]);
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::S)));
    assert!(board.is_row_empty(18));
    assert!(board.is_row_empty(17));
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 19, PieceKind::O);
    board.set(2, 18, Some(PieceKind::Z));
    fill_row(&mut board, 17, PieceKind::O);
    board.set(7, 16, Some(PieceKind::L));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), 2);
    assert_eq!(board.get(2, 19), Some(Some(PieceKind::Z)));
    assert_eq!(board.get(7, 18), Some(Some(PieceKind::L)));
    assert!(board.is_row_empty(17));
}

#[test]
fn test_clear_includes_top_row() {
    let mut board = Board::new();
    fill_row(&mut board, 0, PieceKind::I);

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[0]);
    assert!(board.is_row_empty(0));
}

#[test]
fn test_from_grid_roundtrip_of_colors() {
    let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    grid[19][0] = 1;
    grid[19][9] = 7;
    grid[10][4] = 9; // not a color index: stays empty

    let board = Board::from_grid(&grid);
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::I)));
    assert_eq!(board.get(9, 19), Some(Some(PieceKind::L)));
    assert_eq!(board.get(4, 10), Some(None));
}

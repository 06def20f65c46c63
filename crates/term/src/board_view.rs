//! BoardView: lays a [`DrawFrame`] out on a terminal framebuffer.
//!
//! Pure composition, no I/O. The well is centered in the viewport; the side
//! panel (score, level, lines, combo, next piece, controls) goes to its right
//! when there is room.

use crate::core::{get_shape, DrawFrame, ShapeMatrix};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 12;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Top-left corner of the well border inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Origin {
    x: u16,
    y: u16,
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Outer size of the bordered well
    pub fn well_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    pub fn render_into(&self, frame: &DrawFrame, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (well_w, well_h) = self.well_size();
        let origin = Origin {
            x: viewport.width.saturating_sub(well_w) / 2,
            y: viewport.height.saturating_sub(well_h) / 2,
        };

        draw_border(fb, origin, well_w, well_h, CellStyle::default());

        for (y, row) in frame.board.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                match PieceKind::from_color_index(v) {
                    Some(kind) => {
                        self.fill_cell(fb, origin, x as i8, y as i8, '█', piece_style(kind))
                    }
                    None => self.fill_cell(
                        fb,
                        origin,
                        x as i8,
                        y as i8,
                        '·',
                        CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim(),
                    ),
                }
            }
        }

        if let Some(active) = frame.active {
            if let Some((gx, gy)) = frame.ghost {
                let ghost = CellStyle::new(Rgb::new(140, 140, 140), WELL_BG).dim();
                self.draw_matrix(fb, origin, &active.matrix, gx, gy, '░', ghost);
            }
            self.draw_matrix(
                fb,
                origin,
                &active.matrix,
                active.x,
                active.y,
                '█',
                piece_style(active.kind).bold(),
            );
        }

        self.draw_side_panel(fb, frame, viewport, origin, well_w);

        match frame.status {
            GameStatus::NotStarted => {
                draw_overlay(fb, origin, well_w, well_h, &["BLOCKFALL", "R: start"])
            }
            GameStatus::Paused => draw_overlay(fb, origin, well_w, well_h, &["PAUSED", "P: resume"]),
            GameStatus::GameOver => {
                draw_overlay(fb, origin, well_w, well_h, &["GAME OVER", "R: restart"])
            }
            GameStatus::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &DrawFrame, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_matrix(
        &self,
        fb: &mut FrameBuffer,
        origin: Origin,
        matrix: &ShapeMatrix,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        for (dx, dy, _) in matrix.filled() {
            self.fill_cell(fb, origin, x + dx, y + dy, ch, style);
        }
    }

    /// Paint one board cell; cells above or beside the well are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: Origin,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if !(0..BOARD_WIDTH as i8).contains(&x) || !(0..BOARD_HEIGHT as i8).contains(&y) {
            return;
        }
        let px = origin.x + 1 + x as u16 * self.cell_w;
        let py = origin.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        frame: &DrawFrame,
        viewport: Viewport,
        origin: Origin,
        well_w: u16,
    ) {
        let panel_x = origin.x.saturating_add(well_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = origin.y;
        for (name, number) in [
            ("SCORE", frame.score),
            ("LEVEL", frame.level),
            ("LINES", frame.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y + 1, &number.to_string(), value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "COMBO", label);
        fb.put_str(
            panel_x,
            y + 1,
            &format!("{} (best {})", frame.combo, frame.max_combo),
            value,
        );
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(kind) = frame.next {
            let shape = get_shape(kind);
            for (dx, dy, _) in shape.filled() {
                let px = panel_x + dx as u16 * self.cell_w;
                fb.fill_rect(px, y + dy as u16, self.cell_w, 1, '█', piece_style(kind));
            }
            y = y.saturating_add(shape.rows() as u16);
        }
        y = y.saturating_add(1);

        let hint = CellStyle::default().dim();
        for line in ["←→ move  ↑ rotate", "z ccw  ↓ soft", "space drop  p pause", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }
}

fn piece_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle::new(fg, WELL_BG)
}

fn draw_border(fb: &mut FrameBuffer, origin: Origin, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let (x, y) = (origin.x, origin.y);

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centered lines over the middle of the well
fn draw_overlay(fb: &mut FrameBuffer, origin: Origin, w: u16, h: u16, lines: &[&str]) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    let top = origin.y + h / 2 - (lines.len() as u16 / 2);
    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let x = origin.x + w.saturating_sub(text_w) / 2;
        fb.put_str(x, top + i as u16, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActiveSnapshot, GameState, ScriptedSource};

    const VIEW: Viewport = Viewport {
        width: 60,
        height: 24,
    };

    // Well is 22x22 in a 60x24 viewport.
    const OX: u16 = 19;
    const OY: u16 = 1;

    fn ch_at(fb: &FrameBuffer, x: u16, y: u16) -> char {
        fb.get(x, y).map(|c| c.ch).unwrap_or('?')
    }

    #[test]
    fn test_border_is_centered() {
        let fb = BoardView::default().render(&DrawFrame::default(), VIEW);
        assert_eq!(ch_at(&fb, OX, OY), '┌');
        assert_eq!(ch_at(&fb, OX + 21, OY + 21), '┘');
    }

    #[test]
    fn test_locked_active_and_ghost_cells() {
        let mut frame = DrawFrame {
            status: GameStatus::Running,
            ..DrawFrame::default()
        };
        frame.board[19][0] = PieceKind::Z.color_index();
        frame.active = Some(ActiveSnapshot {
            kind: PieceKind::O,
            matrix: get_shape(PieceKind::O),
            x: 4,
            y: 0,
        });
        frame.ghost = Some((4, 18));

        let fb = BoardView::default().render(&frame, VIEW);
        assert_eq!(ch_at(&fb, OX + 1, OY + 1 + 19), '█');
        assert_eq!(ch_at(&fb, OX + 1 + 8, OY + 1), '█');
        assert_eq!(ch_at(&fb, OX + 1 + 8, OY + 1 + 18), '░');
        assert_eq!(ch_at(&fb, OX + 1 + 2, OY + 1 + 5), '·');
    }

    #[test]
    fn test_side_panel_shows_counters() {
        let mut state = GameState::with_source(Box::new(ScriptedSource::new([PieceKind::T])));
        state.start();
        state.apply_action(crate::types::GameAction::SoftDrop);

        let fb = BoardView::default().render(&state.snapshot(), VIEW);
        let panel_x = OX + 22 + 2;
        assert!(fb.row_text(OY).contains("SCORE"));
        let value: String = fb.row_text(OY + 1).chars().skip(panel_x as usize).collect();
        assert_eq!(value.trim(), "1");
        assert!(fb.row_text(OY + 3).contains("LEVEL"));
        assert!(fb.row_text(OY + 9).contains("COMBO"));
        assert!(fb.row_text(OY + 12).contains("NEXT"));
    }

    #[test]
    fn test_status_overlays() {
        let view = BoardView::default();
        let mut frame = DrawFrame::default();
        let screen = |fb: &FrameBuffer| {
            (0..fb.height())
                .map(|y| fb.row_text(y))
                .collect::<Vec<_>>()
                .join("\n")
        };

        assert!(screen(&view.render(&frame, VIEW)).contains("R: start"));
        frame.status = GameStatus::Paused;
        assert!(screen(&view.render(&frame, VIEW)).contains("PAUSED"));
        frame.status = GameStatus::GameOver;
        assert!(screen(&view.render(&frame, VIEW)).contains("GAME OVER"));
        frame.status = GameStatus::Running;
        assert!(!screen(&view.render(&frame, VIEW)).contains("GAME OVER"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let fb = BoardView::default().render(&DrawFrame::default(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}

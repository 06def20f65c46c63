//! Game state module - one play session
//!
//! This module ties together the board, pieces, piece source and scoring. It owns
//! the active piece and the session counters, and applies one command at a time.
//! Timing lives in the loop scheduler; nothing here reads a clock.

use log::{debug, info};

use crate::board::Board;
use crate::collision::{collides, drop_distance, ghost_position};
use crate::pieces::{try_rotate, Piece};
use crate::rng::{PieceSource, UniformSource};
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_score, get_drop_interval_ms, ComboTracker,
    ScoreResult,
};
use crate::snapshot::{ActiveSnapshot, DrawFrame};
use crate::types::*;

/// Outcome of one lock event, picked up by the loop scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score: ScoreResult,
    pub combo: u32,
    pub level: u32,
    pub level_changed: bool,
    /// The replacement piece could not spawn
    pub game_over: bool,
}

/// Complete session state
#[derive(Debug)]
pub struct GameState {
    board: Board,
    /// Board handed in by a loading collaborator, used by the next start
    preset_board: Option<Board>,
    active: Option<Piece>,
    next: Option<PieceKind>,
    source: Box<dyn PieceSource>,
    status: GameStatus,
    /// Monotonic session id (increments on every start after the first).
    session_id: u32,
    score: u32,
    level: u32,
    lines: u32,
    combo: ComboTracker,
    pieces_locked: u32,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a session drawing pieces uniformly from the given seed
    pub fn new(seed: u32) -> Self {
        Self::with_source(Box::new(UniformSource::new(seed)))
    }

    pub fn with_source(source: Box<dyn PieceSource>) -> Self {
        Self {
            board: Board::new(),
            preset_board: None,
            active: None,
            next: None,
            source,
            status: GameStatus::NotStarted,
            session_id: 0,
            score: 0,
            level: 1,
            lines: 0,
            combo: ComboTracker::default(),
            pieces_locked: 0,
            last_event: None,
        }
    }

    /// Use `board` instead of an empty board for the next session start.
    pub fn with_board(mut self, board: Board) -> Self {
        self.preset_board = Some(board);
        self
    }

    /// Start a session: fresh board and counters, first piece and first preview.
    ///
    /// Accepted from `NotStarted` and `GameOver`; ignored while a session is live.
    pub fn start(&mut self) -> bool {
        match self.status {
            GameStatus::Running | GameStatus::Paused => return false,
            GameStatus::GameOver => self.session_id = self.session_id.wrapping_add(1),
            GameStatus::NotStarted => {}
        }

        self.reset_counters();
        self.status = GameStatus::Running;
        self.next = Some(self.source.next_kind());
        self.spawn_next();
        info!(
            "session {} started (first piece {:?})",
            self.session_id,
            self.active.map(|p| p.kind)
        );
        true
    }

    /// Tear the session down to `NotStarted`. Repeatable.
    pub fn reset(&mut self) {
        if self.status != GameStatus::NotStarted {
            debug!("session {} reset from {:?}", self.session_id, self.status);
        }
        self.reset_counters();
        self.status = GameStatus::NotStarted;
    }

    fn reset_counters(&mut self) {
        self.board = self.preset_board.take().unwrap_or_default();
        self.active = None;
        self.next = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = ComboTracker::default();
        self.pieces_locked = 0;
        self.last_event = None;
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo.current()
    }

    pub fn max_combo(&self) -> u32 {
        self.combo.max()
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Drop interval for the current level
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }

    /// Where the active piece would land if hard-dropped now
    pub fn ghost_position(&self) -> Option<(i8, i8)> {
        self.active.map(|p| ghost_position(&self.board, &p))
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Final record of this session
    pub fn result(&self, time_elapsed_seconds: u64) -> GameResult {
        GameResult {
            score: self.score,
            level: self.level,
            lines_cleared: self.lines,
            max_combo: self.combo.max(),
            pieces_locked: self.pieces_locked,
            time_elapsed_seconds,
        }
    }

    pub fn snapshot_into(&self, out: &mut DrawFrame) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost = self.ghost_position();
        out.next = self.next;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo.current();
        out.max_combo = self.combo.max();
        out.status = self.status;
    }

    pub fn snapshot(&self) -> DrawFrame {
        let mut frame = DrawFrame::default();
        self.snapshot_into(&mut frame);
        frame
    }

    /// Active piece, but only while the session is running
    fn running_piece(&self) -> Option<Piece> {
        if self.status.is_running() {
            self.active
        } else {
            None
        }
    }

    /// Spawn the held preview kind and draw a new preview.
    ///
    /// A spawn that collides ends the session.
    fn spawn_next(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.source.next_kind(),
        };
        self.next = Some(self.source.next_kind());

        let piece = Piece::spawn(kind);
        if collides(&self.board, &piece) {
            self.active = None;
            self.status = GameStatus::GameOver;
            info!(
                "session {} over: {:?} blocked at spawn (score {}, lines {})",
                self.session_id, kind, self.score, self.lines
            );
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.running_piece() else {
            return false;
        };

        let moved = active.translated(dx, dy);
        if collides(&self.board, &moved) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Try to rotate the active piece with horizontal wall kicks
    pub fn try_rotate(&mut self, direction: RotationDirection) -> bool {
        let Some(active) = self.running_piece() else {
            return false;
        };

        match try_rotate(&active, direction, |p| collides(&self.board, p)) {
            Some((rotated, _kick)) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Manual one-row descent: +1 point when the piece moves, lock when it cannot.
    pub fn soft_drop(&mut self) -> bool {
        if self.running_piece().is_none() {
            return false;
        }
        if self.try_move(0, 1) {
            self.score = self
                .score
                .saturating_add(calculate_drop_score(1, false));
        } else {
            self.lock_active(0);
        }
        true
    }

    /// Automatic one-row descent (no points); locks when the piece cannot move.
    pub fn gravity_step(&mut self) -> bool {
        if self.running_piece().is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.lock_active(0);
        }
        true
    }

    /// Drop the active piece to its resting row and lock it immediately.
    pub fn hard_drop(&mut self) -> bool {
        let Some(active) = self.running_piece() else {
            return false;
        };

        let rows = drop_distance(&self.board, &active);
        self.active = Some(active.translated(0, rows as i8));
        self.lock_active(calculate_drop_score(rows, true));
        true
    }

    /// Lock the active piece, clear lines, settle score/combo/level, spawn the next piece.
    fn lock_active(&mut self, drop_bonus: u32) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.lock_piece(&piece);
        let cleared = self.board.clear_full_rows();
        let lines_cleared = cleared.len();

        // Points use the level in effect before these lines are counted.
        let score = calculate_score(lines_cleared, self.level, drop_bonus);
        self.score = self.score.saturating_add(score.total);
        let combo = self.combo.record_lock(lines_cleared);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let previous_level = self.level;
        if lines_cleared > 0 {
            self.lines += lines_cleared as u32;
            self.level = calculate_level(self.lines);
        }

        debug!(
            "locked {:?} at ({}, {}): rows {:?}, +{} (combo {}, level {})",
            piece.kind, piece.x, piece.y, cleared, score.total, combo, self.level
        );

        let spawned = self.spawn_next();
        self.last_event = Some(LockEvent {
            lines_cleared: lines_cleared as u32,
            score,
            combo,
            level: self.level,
            level_changed: self.level != previous_level,
            game_over: !spawned,
        });
    }

    /// Toggle between running and paused; ignored in any other status
    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            _ => return false,
        };
        debug!("session {} now {:?}", self.session_id, self.status);
        true
    }

    /// Apply a game action. Returns whether it was accepted.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.try_rotate(RotationDirection::Cw),
            GameAction::RotateCcw => self.try_rotate(RotationDirection::Ccw),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => self.start(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    fn scripted(kinds: &[PieceKind]) -> GameState {
        GameState::with_source(Box::new(ScriptedSource::new(kinds.to_vec())))
    }

    fn fill_row_except(board: &mut Board, y: i8, gap: std::ops::Range<i8>) {
        for x in 0..BOARD_WIDTH as i8 {
            if !gap.contains(&x) {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.status, GameStatus::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert!(state.active.is_none());
        assert!(state.next.is_none());
    }

    #[test]
    fn test_game_start_spawns_active_and_preview() {
        let mut state = scripted(&[PieceKind::T, PieceKind::O]);
        assert!(state.start());

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.active.unwrap().kind, PieceKind::T);
        assert_eq!(state.next, Some(PieceKind::O));
        // Second start while running is ignored.
        assert!(!state.start());
    }

    #[test]
    fn test_lock_promotes_preview() {
        let mut state = scripted(&[PieceKind::T, PieceKind::O, PieceKind::S]);
        state.start();
        state.hard_drop();

        assert_eq!(state.active.unwrap().kind, PieceKind::O);
        assert_eq!(state.next, Some(PieceKind::S));
        assert_eq!(state.pieces_locked, 1);
    }

    #[test]
    fn test_try_move_collision() {
        let mut state = scripted(&[PieceKind::I]);
        state.start();

        // I spawns at x=3 with width 4: three moves reach the wall.
        let mut moved = 0;
        for _ in 0..10 {
            if state.try_move(-1, 0) {
                moved += 1;
            }
        }
        assert_eq!(moved, 3);
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_rotate_near_wall_kicks() {
        let mut state = scripted(&[PieceKind::I]);
        state.start();
        // Vertical I against the right wall.
        assert!(state.try_rotate(RotationDirection::Cw));
        while state.try_move(1, 0) {}
        assert_eq!(state.active.unwrap().x, 9);

        // Back to horizontal: needs a -3 shift, the table only reaches -2.
        assert!(!state.try_rotate(RotationDirection::Ccw));
        assert_eq!(state.active.unwrap().matrix.cols(), 1);

        state.try_move(-1, 0);
        assert!(state.try_rotate(RotationDirection::Ccw));
        assert_eq!(state.active.unwrap().x, 6);
    }

    #[test]
    fn test_soft_drop_scores_only_when_moving() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();

        assert!(state.soft_drop());
        assert_eq!(state.score, 1);
        assert_eq!(state.active.unwrap().y, 1);

        while state.try_move(0, 1) {}
        let score = state.score;
        // Resting piece: soft drop locks, no point.
        assert!(state.soft_drop());
        assert_eq!(state.score, score);
        assert_eq!(state.pieces_locked, 1);
    }

    #[test]
    fn test_gravity_step_awards_nothing() {
        let mut state = scripted(&[PieceKind::T]);
        state.start();
        assert!(state.gravity_step());
        assert_eq!(state.active.unwrap().y, 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_hard_drop_bonus_is_twice_distance() {
        let mut state = scripted(&[PieceKind::T]);
        state.start();
        state.try_move(0, 1);
        state.try_move(0, 1);
        let y = state.active.unwrap().y;
        let ghost_y = state.ghost_position().unwrap().1;

        assert!(state.hard_drop());
        assert_eq!(state.score, 2 * (ghost_y - y) as u32);
    }

    #[test]
    fn test_single_clear_at_level_one() {
        let mut board = Board::new();
        fill_row_except(&mut board, 19, 3..7);
        let mut state = scripted(&[PieceKind::I]).with_board(board);
        state.start();

        assert!(state.hard_drop());
        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 1);
        assert_eq!(event.score.line_clear_score, 100);
        assert_eq!(event.score.drop_bonus, 38);
        assert_eq!(state.score, 138);
        assert_eq!(state.lines, 1);
        assert_eq!(state.combo(), 1);
        assert!(state.board.is_row_empty(19));
    }

    #[test]
    fn test_preset_board_clears_every_full_row() {
        let mut board = Board::new();
        for y in 15..BOARD_HEIGHT as i8 {
            fill_row_except(&mut board, y, 0..0);
        }
        let mut state = scripted(&[PieceKind::I]).with_board(board);
        state.start();

        assert!(state.hard_drop());
        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 5);
        // Points cap at the four-row rate; the I traveled 14 rows.
        assert_eq!(event.score.line_clear_score, 800);
        assert_eq!(state.score, 828);
        assert_eq!(state.lines, 5);
        assert_eq!(state.board.cells().iter().filter(|c| c.is_some()).count(), 4);
        for y in 0..BOARD_HEIGHT as usize - 1 {
            assert!(state.board.is_row_empty(y));
        }
    }

    #[test]
    fn test_line_score_uses_level_before_clear() {
        let mut state = scripted(&[PieceKind::I]);
        state.start();
        state.lines = 9;
        fill_row_except(&mut state.board, 19, 3..7);

        state.hard_drop();
        let event = state.take_last_event().unwrap();
        assert_eq!(event.score.line_clear_score, 100);
        assert!(event.level_changed);
        assert_eq!(state.level, 2);
        assert_eq!(state.drop_interval_ms(), 900);
    }

    #[test]
    fn test_combo_tracking() {
        let mut state = scripted(&[PieceKind::I]);
        state.start();

        for _ in 0..2 {
            fill_row_except(&mut state.board, 19, 3..7);
            state.hard_drop();
        }
        assert_eq!(state.combo(), 2);
        assert_eq!(state.max_combo(), 2);

        state.hard_drop();
        assert_eq!(state.combo(), 0);
        assert_eq!(state.max_combo(), 2);
    }

    #[test]
    fn test_game_over_detection() {
        let mut board = Board::new();
        for y in 2..BOARD_HEIGHT as i8 {
            board.set(4, y, Some(PieceKind::J));
        }
        let mut state = scripted(&[PieceKind::I, PieceKind::O]).with_board(board);
        state.start();

        assert!(state.hard_drop());
        assert_eq!(state.status, GameStatus::GameOver);
        assert!(state.active.is_none());
        assert!(state.take_last_event().unwrap().game_over);

        // Terminal: nothing but a new session is accepted.
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert!(!state.apply_action(GameAction::Pause));
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut board = Board::new();
        for y in 2..BOARD_HEIGHT as i8 {
            board.set(4, y, Some(PieceKind::J));
        }
        let mut state = scripted(&[PieceKind::I, PieceKind::O]).with_board(board);
        state.start();
        state.hard_drop();
        assert_eq!(state.status, GameStatus::GameOver);

        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.session_id, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.pieces_locked, 0);
        // Preset board is consumed by the first session only.
        assert!(state.board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_apply_action_pause() {
        let mut state = GameState::new(12345);
        assert!(!state.apply_action(GameAction::Pause));
        state.start();

        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.status, GameStatus::Paused);
        let before = state.active;
        assert!(!state.apply_action(GameAction::MoveRight));
        assert!(!state.apply_action(GameAction::RotateCw));
        assert!(!state.apply_action(GameAction::Restart));
        assert_eq!(state.active, before);

        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn test_not_started_ignores_piece_commands() {
        let mut state = GameState::new(3);
        assert!(!state.apply_action(GameAction::HardDrop));
        assert!(!state.gravity_step());
        assert_eq!(state.status, GameStatus::NotStarted);
    }

    #[test]
    fn test_result_record() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();
        state.hard_drop();
        let result = state.result(42);
        assert_eq!(result.score, state.score);
        assert_eq!(result.level, 1);
        assert_eq!(result.pieces_locked, 1);
        assert_eq!(result.time_elapsed_seconds, 42);
    }

    #[test]
    fn test_snapshot_carries_ghost_and_preview() {
        let mut state = scripted(&[PieceKind::O, PieceKind::L]);
        state.start();
        let frame = state.snapshot();
        assert_eq!(frame.status, GameStatus::Running);
        assert_eq!(frame.ghost, Some((4, 18)));
        assert_eq!(frame.next, Some(PieceKind::L));
        assert_eq!(frame.active.unwrap().kind, PieceKind::O);
        assert_eq!(frame.composed_board()[0][4], PieceKind::O.color_index());
    }

    #[test]
    fn test_reset_returns_to_not_started() {
        let mut state = GameState::new(9);
        state.start();
        state.reset();
        state.reset();
        assert_eq!(state.status, GameStatus::NotStarted);
        assert!(state.active.is_none());
    }
}

//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core rules, loop scheduling, rendering, reporting).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn column**: `BOARD_WIDTH / 2 - shape_width / 2`, row 0
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Default host frame interval (~60 FPS) |
//! | `KEY_REPEAT_DELAY_MS` | 200 | Held-key wait before the first re-fire |
//! | `KEY_REPEAT_MS` | 100 | Held-key re-fire period |
//! | `KEY_RELEASE_TIMEOUT_MS` | 150 | Silence after which a held key counts as released |
//!
//! # Drop Intervals by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 900ms |
//! | 3 | 800ms |
//! | 4 | 700ms |
//! | 5 | 600ms |
//! | 6 | 500ms |
//! | 7 | 400ms |
//! | 8 | 300ms |
//! | 9 | 200ms |
//! | 10+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, RotationDirection, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.color_index(), 3);
//! assert_eq!(PieceKind::from_color_index(3), Some(PieceKind::T));
//!
//! assert_eq!(RotationDirection::Cw.reverse(), RotationDirection::Ccw);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Default host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Wait before a held movement key first re-fires.
///
/// Must stay above [`KEY_RELEASE_TIMEOUT_MS`]: on terminals without release
/// events a tap is only released by the timeout.
pub const KEY_REPEAT_DELAY_MS: u32 = 200;

/// Re-fire period of a held movement key
pub const KEY_REPEAT_MS: u32 = 100;

/// Quiet time after which a held key is treated as released
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 10;

/// Drop intervals by level (milliseconds per row)
///
/// Index 0 = Level 1, Index 9 = Level 10 and beyond.
pub const SPEED_TABLE: [u32; 10] = [1000, 900, 800, 700, 600, 500, 400, 300, 200, 100];

/// Line clear base points by cleared row count, multiplied by the level.
///
/// - 0 lines: 0
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per manual one-row soft drop step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row traversed by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Horizontal offsets tried, in order, after a rotation transform
pub const WALL_KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// The seven piece kinds
///
/// Each kind carries a color index used as its board cell value:
/// - **I**: 1, horizontal bar
/// - **O**: 2, 2x2 square
/// - **T**: 3
/// - **S**: 4
/// - **Z**: 5 (mirror of S)
/// - **J**: 6
/// - **L**: 7 (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in color-index order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Board cell value for this kind (1..=7)
    pub fn color_index(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::color_index`]; `None` for 0 and anything above 7
    pub fn from_color_index(index: u8) -> Option<Self> {
        match index {
            1..=7 => Some(Self::ALL[(index - 1) as usize]),
            _ => None,
        }
    }
}

/// Direction of a quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    /// Clockwise
    Cw,
    /// Counter-clockwise
    Ccw,
}

impl RotationDirection {
    /// The opposite direction
    pub fn reverse(&self) -> Self {
        match self {
            RotationDirection::Cw => RotationDirection::Ccw,
            RotationDirection::Ccw => RotationDirection::Cw,
        }
    }
}

/// Game actions that can be applied to a session
///
/// These are the abstract commands produced by the input layer. The engine
/// does not care which device produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Instantly drop piece to its resting position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Start a brand-new session (only accepted before the first start or after game over)
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateccw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }

    /// Whether a held key re-fires this action (horizontal movement only)
    pub fn is_repeatable(&self) -> bool {
        matches!(self, GameAction::MoveLeft | GameAction::MoveRight)
    }
}

/// Session lifecycle status
///
/// `GameOver` is terminal: only a new session start leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::NotStarted => "not_started",
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "game_over",
        }
    }

    /// Whether piece commands and drop ticks are accepted
    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Final record of a finished session, handed once to the result sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameResult {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub max_combo: u32,
    pub pieces_locked: u32,
    pub time_elapsed_seconds: u64,
}

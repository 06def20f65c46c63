//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game and the per-session
//! state. It has no dependencies on timing, terminals or storage, so the same
//! piece source always replays the same game.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of locked cells, lock and line clearing
//! - [`collision`]: collision predicate, drop distance and ghost projection
//! - [`game_state`]: one play session (active piece, preview, counters, status)
//! - [`pieces`]: the seven-shape catalog, rotation and wall kicks
//! - [`rng`]: piece sources (seeded uniform draw, scripted sequence)
//! - [`scoring`]: line/drop points, combo, level and speed table
//! - [`snapshot`]: read-only draw data for renderers
//!
//! # Game Rules
//!
//! - **Rotation**: matrix rotation with horizontal kicks `0, -1, +1, -2, +2`
//! - **Lock**: a piece locks as soon as a downward step fails, no lock delay
//! - **Scoring**: `100/300/500/800 x level` per clear, +1 per soft drop row, +2 per hard drop row
//! - **Level**: `lines / 10 + 1`, capped at 10
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert_eq!(game.pieces_locked(), 1);
//! ```

pub mod board;
pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardGrid, ClearedRows};
pub use collision::{collides, drop_distance, ghost_position};
pub use game_state::{GameState, LockEvent};
pub use pieces::{get_shape, try_rotate, Piece, ShapeMatrix};
pub use rng::{PieceSource, ScriptedSource, SimpleRng, UniformSource};
pub use scoring::{
    calculate_drop_score, calculate_level, calculate_score, get_drop_interval_ms, ComboTracker,
    ScoreResult,
};
pub use snapshot::{ActiveSnapshot, DrawFrame};

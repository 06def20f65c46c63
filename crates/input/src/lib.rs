//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events to [`GameAction`](crate::types::GameAction)s and
//! tracks held keys, including for terminals without key-release events.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{InputCommand, InputHandler};
pub use map::{map_key, should_quit};

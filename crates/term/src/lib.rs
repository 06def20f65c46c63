//! Terminal rendering surface.
//!
//! Draw frames are laid out into a character framebuffer (2 columns per board
//! cell) and flushed to the terminal with `crossterm`, diffing against the
//! previous frame. The layout step is pure and unit-tested.

pub mod board_view;
pub mod fb;
pub mod surface;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;

pub use board_view::{BoardView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use surface::{encode_diff_into, encode_full_into, TerminalSurface};

//! Game loop engine
//!
//! Drives a [`GameState`](blockfall_core::GameState) in real time: drop ticks
//! from an abstract frame host, held-key repeat, pause accounting and the single
//! game-over result. Everything with a side effect sits behind a trait
//! ([`Clock`], [`FrameHost`], [`ResultSink`], [`RenderSurface`]) so tests drive
//! the loop by hand.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameLoop, ManualClock, ManualFrameHost, RecordingSink};
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, GameStatus};
//!
//! let clock = ManualClock::new(0);
//! let mut game = GameLoop::new(
//!     GameState::new(7),
//!     clock.clone(),
//!     ManualFrameHost::new(),
//!     RecordingSink::new(),
//! );
//! game.start();
//!
//! clock.advance(1001);
//! game.frame();
//! assert_eq!(game.state().active().map(|p| p.y), Some(1));
//!
//! game.submit(GameAction::Pause);
//! assert_eq!(game.status(), GameStatus::Paused);
//! ```

pub mod clock;
pub mod config;
pub mod host;
pub mod render;
pub mod repeat;
pub mod scheduler;
pub mod sink;

pub use blockfall_types as types;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::LoopConfig;
pub use host::{FrameHost, ManualFrameHost, SleepFrameHost};
pub use render::RenderSurface;
pub use repeat::{KeyRepeat, RepeatHandle};
pub use scheduler::GameLoop;
pub use sink::{NullSink, RecordingSink, ResultSink};

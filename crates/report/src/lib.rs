//! Leaderboard reporting for finished sessions.
//!
//! [`LeaderboardReporter`] implements the engine's
//! [`ResultSink`](blockfall_engine::ResultSink): every game-over result is
//! stamped with `played_at` and appended to a JSON-lines file by a background
//! tokio task. [`read_leaderboard`] reads the file back, best scores first.

pub mod config;
pub mod error;
pub mod record;
pub mod reporter;

pub use blockfall_engine as engine;
pub use blockfall_types as types;

pub use config::ReportConfig;
pub use error::ReportError;
pub use record::{append_record, read_leaderboard, ResultRecord, GAME_TYPE};
pub use reporter::LeaderboardReporter;

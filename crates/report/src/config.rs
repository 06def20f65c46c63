//! Reporter configuration from environment variables.
//!
//! - `BLOCKFALL_LEADERBOARD_PATH`: JSON-lines file (default `blockfall-scores.jsonl`)
//! - `BLOCKFALL_REPORT_DISABLED`: `1`/`true` turns reporting off

use std::env;
use std::path::PathBuf;

pub const DEFAULT_LEADERBOARD_PATH: &str = "blockfall-scores.jsonl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub path: PathBuf,
    pub disabled: bool,
}

impl ReportConfig {
    pub fn from_env() -> Self {
        let path = env::var("BLOCKFALL_LEADERBOARD_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEADERBOARD_PATH));

        let disabled = env::var("BLOCKFALL_REPORT_DISABLED")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Self { path, disabled }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            disabled: false,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::with_path(DEFAULT_LEADERBOARD_PATH)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

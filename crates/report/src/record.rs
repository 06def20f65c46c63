//! Persisted result record and leaderboard file access.
//!
//! One JSON object per line, appended in completion order.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::ReportError;
use crate::types::GameResult;

pub const GAME_TYPE: &str = "TETRIS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub game_type: String,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub max_combo: u32,
    #[serde(default)]
    pub pieces_locked: u32,
    pub time_elapsed_seconds: u64,
    pub played_at: DateTime<Utc>,
}

impl ResultRecord {
    pub fn new(result: GameResult, played_at: DateTime<Utc>) -> Self {
        Self {
            game_type: GAME_TYPE.to_string(),
            score: result.score,
            level: result.level,
            lines_cleared: result.lines_cleared,
            max_combo: result.max_combo,
            pieces_locked: result.pieces_locked,
            time_elapsed_seconds: result.time_elapsed_seconds,
            played_at,
        }
    }

    pub fn result(&self) -> GameResult {
        GameResult {
            score: self.score,
            level: self.level,
            lines_cleared: self.lines_cleared,
            max_combo: self.max_combo,
            pieces_locked: self.pieces_locked,
            time_elapsed_seconds: self.time_elapsed_seconds,
        }
    }
}

/// Append one record as a JSON line, creating the file if needed.
pub async fn append_record(path: &Path, record: &ResultRecord) -> Result<(), ReportError> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

/// Best `limit` records, highest score first (earlier games win ties).
///
/// A missing file is an empty leaderboard; malformed lines are skipped.
pub fn read_leaderboard(path: &Path, limit: usize) -> Result<Vec<ResultRecord>, ReportError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records: Vec<ResultRecord> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(n, line)| match serde_json::from_str(line) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("{}:{}: skipping malformed record: {}", path.display(), n + 1, e);
                None
            }
        })
        .collect();

    records.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.played_at.cmp(&b.played_at))
    });
    records.truncate(limit);
    Ok(records)
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("leaderboard i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("result encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reporter is shut down")]
    Closed,
}

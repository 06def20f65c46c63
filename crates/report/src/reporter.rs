//! Leaderboard reporter
//!
//! Bridges the synchronous game loop with async file I/O: the loop hands each
//! finished session to [`LeaderboardReporter::record`], which only enqueues it;
//! a task on a private tokio runtime appends it to the leaderboard file. Each
//! result is written at most once; failures are logged and dropped.

use chrono::Utc;
use log::{debug, info, warn};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::ReportConfig;
use crate::engine::ResultSink;
use crate::error::ReportError;
use crate::record::{append_record, ResultRecord};
use crate::types::GameResult;

pub struct LeaderboardReporter {
    rt: Runtime,
    tx: Option<mpsc::UnboundedSender<ResultRecord>>,
    writer: Option<JoinHandle<()>>,
    config: ReportConfig,
}

impl LeaderboardReporter {
    pub fn start(config: ReportConfig) -> Result<Self, ReportError> {
        let rt = Runtime::new()?;
        let (tx, mut rx) = mpsc::unbounded_channel::<ResultRecord>();

        let path = config.path.clone();
        let writer = rt.spawn(async move {
            while let Some(record) = rx.recv().await {
                match append_record(&path, &record).await {
                    Ok(()) => debug!("recorded score {} to {}", record.score, path.display()),
                    Err(e) => warn!("failed to record score {}: {}", record.score, e),
                }
            }
        });

        info!("leaderboard reporter writing to {}", config.path.display());
        Ok(Self {
            rt,
            tx: Some(tx),
            writer: Some(writer),
            config,
        })
    }

    /// Start from environment variables.
    ///
    /// Returns None if `BLOCKFALL_REPORT_DISABLED` is set or the runtime cannot start.
    pub fn start_from_env() -> Option<Self> {
        let config = ReportConfig::from_env();
        if config.disabled {
            return None;
        }
        match Self::start(config) {
            Ok(reporter) => Some(reporter),
            Err(e) => {
                warn!("leaderboard reporting disabled: {}", e);
                None
            }
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Queue one result for writing.
    pub fn submit(&self, result: GameResult) -> Result<(), ReportError> {
        let tx = self.tx.as_ref().ok_or(ReportError::Closed)?;
        tx.send(ResultRecord::new(result, Utc::now()))
            .map_err(|_| ReportError::Closed)
    }

    /// Stop accepting results and wait until every queued one is written.
    pub fn shutdown(&mut self) {
        // Dropping the sender ends the writer loop once the queue is empty.
        self.tx.take();
        if let Some(writer) = self.writer.take() {
            if let Err(e) = self.rt.block_on(writer) {
                warn!("leaderboard writer ended abnormally: {}", e);
            }
        }
    }
}

impl ResultSink for LeaderboardReporter {
    fn record(&mut self, result: GameResult) {
        if let Err(e) = self.submit(result) {
            warn!("dropping result with score {}: {}", result.score, e);
        }
    }
}

impl Drop for LeaderboardReporter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

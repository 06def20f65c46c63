//! Result sinks: receivers of the single game-over record of a session.

use crate::types::GameResult;

/// Called synchronously, exactly once per finished session.
pub trait ResultSink {
    fn record(&mut self, result: GameResult);
}

impl<S: ResultSink + ?Sized> ResultSink for Box<S> {
    fn record(&mut self, result: GameResult) {
        (**self).record(result)
    }
}

/// Keeps every result in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    results: Vec<GameResult>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[GameResult] {
        &self.results
    }

    pub fn last(&self) -> Option<&GameResult> {
        self.results.last()
    }
}

impl ResultSink for RecordingSink {
    fn record(&mut self, result: GameResult) {
        self.results.push(result);
    }
}

/// Discards results
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ResultSink for NullSink {
    fn record(&mut self, _result: GameResult) {}
}

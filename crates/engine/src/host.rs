//! Frame hosts: whatever delivers "run one frame now" to the loop.
//!
//! The loop asks for the next tick after every running frame and cancels
//! scheduling on pause, game over and stop. It only assumes ticks arrive
//! one at a time.

use std::time::{Duration, Instant};

pub trait FrameHost {
    /// Request one more frame callback
    fn schedule_next_tick(&mut self);
    /// Drop any pending frame callback. Idempotent.
    fn cancel(&mut self);
    fn is_scheduled(&self) -> bool;
}

/// Host driven by hand, counting every request
#[derive(Debug, Clone, Default)]
pub struct ManualFrameHost {
    scheduled: bool,
    schedule_calls: u32,
    cancel_calls: u32,
}

impl ManualFrameHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending tick, if any.
    pub fn fire(&mut self) -> bool {
        std::mem::take(&mut self.scheduled)
    }

    pub fn schedule_calls(&self) -> u32 {
        self.schedule_calls
    }

    pub fn cancel_calls(&self) -> u32 {
        self.cancel_calls
    }
}

impl FrameHost for ManualFrameHost {
    fn schedule_next_tick(&mut self) {
        self.scheduled = true;
        self.schedule_calls += 1;
    }

    fn cancel(&mut self) {
        self.scheduled = false;
        self.cancel_calls += 1;
    }

    fn is_scheduled(&self) -> bool {
        self.scheduled
    }
}

/// Fixed-interval host for a blocking event loop.
///
/// The caller waits up to [`SleepFrameHost::time_until_tick`] for input, then
/// runs a frame when [`SleepFrameHost::take_due`] reports one.
#[derive(Debug, Clone)]
pub struct SleepFrameHost {
    frame: Duration,
    deadline: Option<Instant>,
}

impl SleepFrameHost {
    pub fn new(frame_ms: u32) -> Self {
        Self {
            frame: Duration::from_millis(frame_ms.max(1) as u64),
            deadline: None,
        }
    }

    /// Time left before the pending tick; `None` when nothing is scheduled.
    pub fn time_until_tick(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Consume the pending tick once its deadline has passed.
    pub fn take_due(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl FrameHost for SleepFrameHost {
    fn schedule_next_tick(&mut self) {
        if self.deadline.is_none() {
            self.deadline = Some(Instant::now() + self.frame);
        }
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn is_scheduled(&self) -> bool {
        self.deadline.is_some()
    }
}

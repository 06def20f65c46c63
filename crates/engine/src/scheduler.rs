//! Game loop scheduler
//!
//! Owns the session and serializes everything that can change it. Two entry
//! points feed one FIFO queue, drained in arrival order:
//!
//! - [`GameLoop::frame`]: called by the frame host; accumulates running time into
//!   the drop counter, enqueues due key repeats and, once the counter exceeds the
//!   level's drop interval, one drop tick (the counter then restarts at 0).
//! - [`GameLoop::submit`] / [`GameLoop::hold`]: explicit commands from the input layer.
//!
//! Paused time is never accounted: pausing cancels the frame host and the repeat
//! policy, and resuming restarts the frame delta from "now", so the next drop
//! fires after the remaining part of the interval.

use std::collections::VecDeque;

use log::{debug, info};

use blockfall_core::{DrawFrame, GameState, LockEvent};

use crate::clock::Clock;
use crate::config::LoopConfig;
use crate::host::FrameHost;
use crate::render::RenderSurface;
use crate::repeat::{KeyRepeat, RepeatHandle};
use crate::sink::ResultSink;
use crate::types::{GameAction, GameResult, GameStatus};

/// One entry of the serialized command stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopCommand {
    Action(GameAction),
    DropTick,
}

pub struct GameLoop<C: Clock, H: FrameHost, R: ResultSink> {
    state: GameState,
    clock: C,
    host: H,
    sink: R,
    queue: VecDeque<LoopCommand>,
    repeat: KeyRepeat,
    drop_counter_ms: u32,
    /// Time of the last accounted frame; `None` while nothing is being accounted.
    last_frame_ms: Option<u64>,
    session_start_ms: u64,
    result_emitted: bool,
    last_lock: Option<LockEvent>,
    frame: DrawFrame,
}

impl<C: Clock, H: FrameHost, R: ResultSink> GameLoop<C, H, R> {
    pub fn new(state: GameState, clock: C, host: H, sink: R) -> Self {
        Self {
            state,
            clock,
            host,
            sink,
            queue: VecDeque::new(),
            repeat: KeyRepeat::default(),
            drop_counter_ms: 0,
            last_frame_ms: None,
            session_start_ms: 0,
            result_emitted: false,
            last_lock: None,
            frame: DrawFrame::default(),
        }
    }

    /// Loop with a seeded uniform piece source and the configured repeat timing
    pub fn from_config(config: &LoopConfig, clock: C, host: H, sink: R) -> Self {
        Self::new(GameState::new(config.seed), clock, host, sink)
            .with_key_repeat(config.key_repeat_delay_ms, config.key_repeat_ms)
    }

    pub fn with_key_repeat(mut self, delay_ms: u32, period_ms: u32) -> Self {
        self.repeat = KeyRepeat::new(delay_ms, period_ms);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    /// Outcome of the most recent lock in this session
    pub fn last_lock(&self) -> Option<LockEvent> {
        self.last_lock
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat.is_active()
    }

    /// Start a session. Same as submitting `Restart`.
    pub fn start(&mut self) -> bool {
        self.submit(GameAction::Restart)
    }

    /// Enqueue one command and drain the queue. Returns whether it was accepted.
    pub fn submit(&mut self, action: GameAction) -> bool {
        self.queue.push_back(LoopCommand::Action(action));
        self.drain()
    }

    /// Key pressed: submit once now and, for horizontal moves, keep repeating
    /// until released.
    pub fn hold(&mut self, action: GameAction) -> Option<RepeatHandle> {
        if !action.is_repeatable() || !self.state.status().is_running() {
            self.submit(action);
            return None;
        }

        let handle = self.repeat.press(action);
        self.submit(action);
        // The immediate move may have ended the session.
        if self.repeat.is_active() {
            Some(handle)
        } else {
            None
        }
    }

    /// Key released
    pub fn release(&mut self, handle: RepeatHandle) {
        self.repeat.cancel(handle);
    }

    /// Stop repeating whatever key is held.
    pub fn release_all(&mut self) {
        self.repeat.cancel_all();
    }

    /// One frame callback from the host.
    pub fn frame(&mut self) {
        if !self.state.status().is_running() {
            return;
        }

        let now = self.clock.now_ms();
        let delta = self
            .last_frame_ms
            .map_or(0, |last| now.saturating_sub(last))
            .min(u32::MAX as u64) as u32;
        self.last_frame_ms = Some(now);

        for action in self.repeat.advance(delta) {
            self.queue.push_back(LoopCommand::Action(action));
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(delta);
        if self.drop_counter_ms > self.state.drop_interval_ms() {
            self.queue.push_back(LoopCommand::DropTick);
            self.drop_counter_ms = 0;
        }

        self.drain();

        if self.state.status().is_running() {
            self.host.schedule_next_tick();
        }
    }

    /// Tear the session down without emitting a result. Idempotent.
    pub fn stop(&mut self) {
        self.repeat.cancel_all();
        self.host.cancel();
        self.queue.clear();
        if self.state.status() != GameStatus::NotStarted {
            info!("session {} stopped", self.state.session_id());
        }
        self.state.reset();
        self.drop_counter_ms = 0;
        self.last_frame_ms = None;
        self.result_emitted = false;
        self.last_lock = None;
    }

    /// Refresh and return the draw data for the current state
    pub fn draw_frame(&mut self) -> &DrawFrame {
        self.state.snapshot_into(&mut self.frame);
        &self.frame
    }

    pub fn render<S: RenderSurface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        self.state.snapshot_into(&mut self.frame);
        surface.render(&self.frame)
    }

    fn drain(&mut self) -> bool {
        let mut accepted = false;
        while let Some(command) = self.queue.pop_front() {
            accepted = self.process(command);
        }
        accepted
    }

    fn process(&mut self, command: LoopCommand) -> bool {
        let accepted = match command {
            LoopCommand::DropTick => self.state.gravity_step(),
            LoopCommand::Action(GameAction::Restart) => self.begin_session(),
            LoopCommand::Action(GameAction::Pause) => self.toggle_pause(),
            LoopCommand::Action(GameAction::SoftDrop) => {
                let accepted = self.state.soft_drop();
                if accepted {
                    self.drop_counter_ms = 0;
                }
                accepted
            }
            LoopCommand::Action(action) => self.state.apply_action(action),
        };

        if let Some(event) = self.state.take_last_event() {
            if event.level_changed {
                info!(
                    "level {} reached, drop interval now {}ms",
                    event.level,
                    self.state.drop_interval_ms()
                );
            }
            self.last_lock = Some(event);
        }

        if self.state.status() == GameStatus::GameOver && !self.result_emitted {
            self.finish_session();
        }
        accepted
    }

    fn begin_session(&mut self) -> bool {
        if !self.state.start() {
            return false;
        }

        self.repeat.cancel_all();
        let now = self.clock.now_ms();
        self.session_start_ms = now;
        self.last_frame_ms = Some(now);
        self.drop_counter_ms = 0;
        self.result_emitted = false;
        self.last_lock = None;
        self.host.schedule_next_tick();
        true
    }

    fn toggle_pause(&mut self) -> bool {
        if !self.state.toggle_pause() {
            return false;
        }

        if self.state.status() == GameStatus::Paused {
            self.repeat.cancel_all();
            self.host.cancel();
            self.last_frame_ms = None;
            debug!("paused with {}ms on the drop counter", self.drop_counter_ms);
        } else {
            self.last_frame_ms = Some(self.clock.now_ms());
            self.host.schedule_next_tick();
        }
        true
    }

    fn finish_session(&mut self) {
        self.repeat.cancel_all();
        self.host.cancel();
        self.queue.clear();
        self.last_frame_ms = None;

        let elapsed_ms = self.clock.now_ms().saturating_sub(self.session_start_ms);
        let result: GameResult = self.state.result(elapsed_ms / 1000);
        info!(
            "session {} result: score {} level {} lines {} in {}s",
            self.state.session_id(),
            result.score,
            result.level,
            result.lines_cleared,
            result.time_elapsed_seconds
        );
        self.result_emitted = true;
        self.sink.record(result);
    }
}

impl<C: Clock, H: FrameHost, R: ResultSink> std::fmt::Debug for GameLoop<C, H, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLoop")
            .field("status", &self.state.status())
            .field("drop_counter_ms", &self.drop_counter_ms)
            .field("queued", &self.queue.len())
            .field("repeating", &self.repeat.current())
            .finish()
    }
}

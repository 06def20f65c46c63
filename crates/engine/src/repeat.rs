//! Held-key repeat policy
//!
//! A press fires once right away (the caller submits it), re-fires after
//! `delay_ms` of running time and then every `period_ms` until cancelled. Only one key repeats at a
//! time; a new press replaces the previous one. Independent of the drop timer.

use arrayvec::ArrayVec;
use log::debug;

use crate::types::{GameAction, KEY_REPEAT_DELAY_MS, KEY_REPEAT_MS};

/// Upper bound of repeats emitted by a single `advance` call
pub const MAX_REPEATS_PER_FRAME: usize = 8;

/// Cancel handle of one press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepeatHandle(u32);

#[derive(Debug, Clone, Copy)]
struct ActiveRepeat {
    action: GameAction,
    handle: RepeatHandle,
    elapsed_ms: u32,
    /// Running time until the next re-fire: the delay first, then the period
    next_due_ms: u32,
}

#[derive(Debug, Clone)]
pub struct KeyRepeat {
    delay_ms: u32,
    period_ms: u32,
    generation: u32,
    active: Option<ActiveRepeat>,
}

impl KeyRepeat {
    pub fn new(delay_ms: u32, period_ms: u32) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            delay_ms: delay_ms.max(period_ms),
            period_ms,
            generation: 0,
            active: None,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Begin repeating `action`, replacing any current repeat
    pub fn press(&mut self, action: GameAction) -> RepeatHandle {
        self.generation = self.generation.wrapping_add(1);
        let handle = RepeatHandle(self.generation);
        self.active = Some(ActiveRepeat {
            action,
            handle,
            elapsed_ms: 0,
            next_due_ms: self.delay_ms,
        });
        handle
    }

    /// Stop the repeat started by `handle`. Stale handles are ignored.
    pub fn cancel(&mut self, handle: RepeatHandle) -> bool {
        match self.active {
            Some(active) if active.handle == handle => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel_all(&mut self) {
        if let Some(active) = self.active.take() {
            debug!("repeat of {:?} cancelled", active.action);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn current(&self) -> Option<GameAction> {
        self.active.map(|a| a.action)
    }

    /// Account `elapsed_ms` of running time and return the repeats that fell due.
    ///
    /// Long gaps emit at most [`MAX_REPEATS_PER_FRAME`] repeats; the rest is dropped.
    pub fn advance(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, MAX_REPEATS_PER_FRAME> {
        let mut due = ArrayVec::new();
        let Some(active) = self.active.as_mut() else {
            return due;
        };

        active.elapsed_ms = active.elapsed_ms.saturating_add(elapsed_ms);
        while active.elapsed_ms >= active.next_due_ms {
            active.elapsed_ms -= active.next_due_ms;
            active.next_due_ms = self.period_ms;
            if due.try_push(active.action).is_err() {
                active.elapsed_ms = 0;
                break;
            }
        }
        due
    }
}

impl Default for KeyRepeat {
    fn default() -> Self {
        Self::new(KEY_REPEAT_DELAY_MS, KEY_REPEAT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_fires_every_period() {
        let mut repeat = KeyRepeat::new(100, 100);
        repeat.press(GameAction::MoveLeft);

        assert!(repeat.advance(99).is_empty());
        assert_eq!(repeat.advance(1).as_slice(), &[GameAction::MoveLeft]);
        assert_eq!(repeat.advance(250).len(), 2);
        // 50ms carried over from the previous call.
        assert_eq!(repeat.advance(50).len(), 1);
    }

    #[test]
    fn test_first_repeat_waits_for_delay() {
        let mut repeat = KeyRepeat::new(200, 100);
        repeat.press(GameAction::MoveLeft);

        assert!(repeat.advance(150).is_empty());
        assert!(repeat.advance(49).is_empty());
        assert_eq!(repeat.advance(1).len(), 1);
        assert!(repeat.advance(99).is_empty());
        assert_eq!(repeat.advance(1).len(), 1);

        // A new press starts over with the delay.
        repeat.press(GameAction::MoveLeft);
        assert!(repeat.advance(100).is_empty());
    }

    #[test]
    fn test_delay_never_shorter_than_period() {
        let repeat = KeyRepeat::new(0, 100);
        assert_eq!(repeat.delay_ms(), 100);
        assert!(KeyRepeat::default().delay_ms() > crate::types::KEY_RELEASE_TIMEOUT_MS);
    }

    #[test]
    fn test_new_press_replaces_previous() {
        let mut repeat = KeyRepeat::new(100, 100);
        let left = repeat.press(GameAction::MoveLeft);
        repeat.advance(60);
        let right = repeat.press(GameAction::MoveRight);
        assert_ne!(left, right);

        assert!(!repeat.cancel(left));
        assert_eq!(repeat.current(), Some(GameAction::MoveRight));
        assert!(repeat.advance(60).is_empty());
        assert!(repeat.cancel(right));
        assert!(!repeat.is_active());
    }

    #[test]
    fn test_cancel_all_is_idempotent() {
        let mut repeat = KeyRepeat::default();
        repeat.press(GameAction::MoveRight);
        repeat.cancel_all();
        repeat.cancel_all();
        assert!(repeat.advance(10_000).is_empty());
    }

    #[test]
    fn test_long_gap_is_capped() {
        let mut repeat = KeyRepeat::new(10, 10);
        repeat.press(GameAction::MoveRight);
        assert_eq!(repeat.advance(10_000).len(), MAX_REPEATS_PER_FRAME);
        assert!(repeat.advance(9).is_empty());
    }
}

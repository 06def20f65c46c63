//! Press/release tracking for terminal environments.
//!
//! Turns raw key events into [`InputCommand`]s for the game loop. Horizontal
//! moves become hold/release pairs so the loop's repeat policy can re-fire them;
//! everything else is a one-shot action. Terminals that never emit release
//! events are handled by a timeout: a held key that stops producing events is
//! released automatically.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{GameAction, KEY_RELEASE_TIMEOUT_MS};

/// What the game loop should do for one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Submit once
    Action(GameAction),
    /// Key went down: submit now and start repeating
    Hold(GameAction),
    /// Held key went up
    Release(GameAction),
}

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    action: GameAction,
    last_seen: Instant,
}

#[derive(Debug, Clone)]
pub struct InputHandler {
    held: Option<HeldKey>,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held: None,
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn held(&self) -> Option<GameAction> {
        self.held.map(|h| h.action)
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<InputCommand> {
        let action = map_key(key)?;
        match key.kind {
            KeyEventKind::Press => self.press(action),
            KeyEventKind::Repeat => {
                // Terminal auto-repeat only keeps the hold alive.
                self.touch(action);
                None
            }
            KeyEventKind::Release => self.release(action),
        }
    }

    fn press(&mut self, action: GameAction) -> Option<InputCommand> {
        if !action.is_repeatable() {
            return Some(InputCommand::Action(action));
        }
        if self.held() == Some(action) {
            // Terminals without enhanced reporting send repeats as presses.
            self.touch(action);
            return None;
        }
        self.held = Some(HeldKey {
            action,
            last_seen: Instant::now(),
        });
        Some(InputCommand::Hold(action))
    }

    fn touch(&mut self, action: GameAction) {
        if let Some(held) = self.held.as_mut() {
            if held.action == action {
                held.last_seen = Instant::now();
            }
        }
    }

    fn release(&mut self, action: GameAction) -> Option<InputCommand> {
        match self.held {
            Some(held) if held.action == action => {
                self.held = None;
                Some(InputCommand::Release(action))
            }
            _ => None,
        }
    }

    /// Auto-release a held key that has gone quiet for longer than the timeout.
    pub fn update(&mut self) -> Option<InputCommand> {
        let held = self.held?;
        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        if held.last_seen.elapsed() > timeout {
            self.held = None;
            return Some(InputCommand::Release(held.action));
        }
        None
    }

    /// Forget the held key without reporting a release.
    pub fn reset(&mut self) {
        self.held = None;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

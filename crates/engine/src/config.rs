//! Loop configuration from environment variables.
//!
//! - `BLOCKFALL_SEED`: piece source seed (default: random)
//! - `BLOCKFALL_KEY_REPEAT_DELAY_MS`: wait before a held key first repeats (default 200)
//! - `BLOCKFALL_KEY_REPEAT_MS`: held-key repeat period (default 100)
//! - `BLOCKFALL_FRAME_MS`: frame host interval (default 16)

use std::env;
use std::str::FromStr;

use log::warn;

use crate::types::{FRAME_MS, KEY_REPEAT_DELAY_MS, KEY_REPEAT_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    pub seed: u32,
    pub key_repeat_delay_ms: u32,
    pub key_repeat_ms: u32,
    pub frame_ms: u32,
}

impl LoopConfig {
    pub fn from_env() -> Self {
        Self {
            seed: parse_var("BLOCKFALL_SEED").unwrap_or_else(rand::random),
            key_repeat_delay_ms: parse_var("BLOCKFALL_KEY_REPEAT_DELAY_MS")
                .unwrap_or(KEY_REPEAT_DELAY_MS),
            key_repeat_ms: parse_var("BLOCKFALL_KEY_REPEAT_MS")
                .filter(|&ms| ms > 0)
                .unwrap_or(KEY_REPEAT_MS),
            frame_ms: parse_var("BLOCKFALL_FRAME_MS")
                .filter(|&ms| ms > 0)
                .unwrap_or(FRAME_MS),
        }
    }

    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            key_repeat_delay_ms: KEY_REPEAT_DELAY_MS,
            key_repeat_ms: KEY_REPEAT_MS,
            frame_ms: FRAME_MS,
        }
    }
}

/// Read and parse one variable; unparsable values are logged and ignored.
fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {}={:?}: not a valid number", name, raw);
            None
        }
    }
}

//! Scoring module - line clear points, drop points, combo, level and speed
//!
//! Rules:
//! - Line clears pay `LINE_SCORES[n] * level` using the level before the clear is counted.
//! - Soft drop pays 1 point per manual row, hard drop 2 points per row traversed.
//! - The combo counts consecutive clearing locks; any non-clearing lock resets it.
//! - Level is `lines / 10 + 1`, capped at 10; the speed table plateaus at its last entry.

use crate::types::{
    HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL, LINE_SCORES, MAX_LEVEL, SOFT_DROP_POINTS,
    SPEED_TABLE,
};

/// Points awarded by one lock event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Line clear bonus (`LINE_SCORES[n] * level`)
    pub line_clear_score: u32,
    /// Hard drop bonus settled at lock time
    pub drop_bonus: u32,
    pub total: u32,
}

/// Line clear bonus for `lines` rows at `level`.
///
/// Four or more rows pay the four-row rate.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES[lines.min(4)].saturating_mul(level)
}

/// Combine line clear and hard drop points for one lock
pub fn calculate_score(lines: usize, level: u32, drop_bonus: u32) -> ScoreResult {
    let line_clear_score = calculate_line_score(lines, level);
    ScoreResult {
        line_clear_score,
        drop_bonus,
        total: line_clear_score.saturating_add(drop_bonus),
    }
}

/// Calculate drop score
/// soft_drop: +1 per row
/// hard_drop: +2 per row
pub fn calculate_drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        rows * HARD_DROP_POINTS_PER_ROW
    } else {
        rows * SOFT_DROP_POINTS
    }
}

/// Level for a cumulative line count (1-based, capped at 10)
pub fn calculate_level(total_lines: u32) -> u32 {
    (total_lines / LINES_PER_LEVEL + 1).min(MAX_LEVEL)
}

/// Drop interval for a level, clamped to the last speed table entry.
///
/// Level 0 is treated as level 1.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let idx = (level.max(1) as usize - 1).min(SPEED_TABLE.len() - 1);
    SPEED_TABLE[idx]
}

/// Running and best combo counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComboTracker {
    current: u32,
    max: u32,
}

impl ComboTracker {
    /// Record one lock event and return the running combo
    pub fn record_lock(&mut self, lines_cleared: usize) -> u32 {
        if lines_cleared > 0 {
            self.current += 1;
        } else {
            self.current = 0;
        }
        self.max = self.max.max(self.current);
        self.current
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

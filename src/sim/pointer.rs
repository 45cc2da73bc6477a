//! Pointer tracking
//!
//! Keeps the latest pointer sample plus the debounced "moving" and
//! window-presence flags every effect reads.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::POINTER_IDLE_MS;

/// A single raw pointer-move observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub pos: Vec2,
    pub timestamp_ms: f64,
}

/// Tracks live pointer position, movement and window presence
#[derive(Debug, Clone)]
pub struct PointerTracker {
    latest: Option<PointerSample>,
    in_window: bool,
    idle_ms: f64,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(POINTER_IDLE_MS)
    }
}

impl PointerTracker {
    pub fn new(idle_ms: f64) -> Self {
        Self {
            latest: None,
            in_window: true,
            idle_ms: idle_ms.max(0.0),
        }
    }

    /// Record a pointer-move event. Every move restarts the idle window.
    pub fn pointer_moved(&mut self, x: f32, y: f32, now: f64) {
        self.latest = Some(PointerSample {
            pos: Vec2::new(x, y),
            timestamp_ms: now,
        });
    }

    pub fn pointer_entered(&mut self) {
        self.in_window = true;
    }

    pub fn pointer_left(&mut self) {
        self.in_window = false;
    }

    pub fn latest(&self) -> Option<PointerSample> {
        self.latest
    }

    /// Last known position (origin before the first sample)
    pub fn position(&self) -> Vec2 {
        self.latest.map(|s| s.pos).unwrap_or(Vec2::ZERO)
    }

    /// True from a move until `idle_ms` passes without another one
    pub fn is_moving(&self, now: f64) -> bool {
        self.latest
            .map(|s| now - s.timestamp_ms <= self.idle_ms)
            .unwrap_or(false)
    }

    pub fn is_in_window(&self) -> bool {
        self.in_window
    }

    /// Forget everything (on unmount)
    pub fn reset(&mut self) {
        self.latest = None;
        self.in_window = true;
    }
}

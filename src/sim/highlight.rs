//! Highlight rotation
//!
//! Emphasizes one navigation button at a time: hold, dim, then move on to
//! a different button chosen at random. Phase changes are deadlines checked
//! on each tick, so there are no timers to cancel.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{HIGHLIGHT_DIM_MS, HIGHLIGHT_HOLD_MS};

#[derive(Debug, Clone)]
pub struct HighlightConfig {
    pub hold_ms: f64,
    pub dim_ms: f64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            hold_ms: HIGHLIGHT_HOLD_MS,
            dim_ms: HIGHLIGHT_DIM_MS,
        }
    }
}

/// What the renderer reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightState {
    pub highlighted: Option<String>,
    pub is_dimming: bool,
}

impl HighlightState {
    /// Full emphasis: the highlighted item while not dimming
    pub fn is_highlighted(&self, id: &str) -> bool {
        !self.is_dimming && self.highlighted.as_deref() == Some(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Index into `items`
    Highlighted(usize),
    Dimming(usize),
}

/// NaN and negative durations become 0
fn sanitize_ms(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.max(0.0) }
}

/// Timed highlight/dim state machine
#[derive(Debug, Clone)]
pub struct HighlightScheduler {
    config: HighlightConfig,
    items: Vec<String>,
    phase: Phase,
    phase_started_ms: f64,
}

impl HighlightScheduler {
    pub fn new(config: HighlightConfig, items: Vec<String>) -> Self {
        let config = HighlightConfig {
            hold_ms: sanitize_ms(config.hold_ms),
            dim_ms: sanitize_ms(config.dim_ms),
        };
        Self {
            config,
            items,
            phase: Phase::Idle,
            phase_started_ms: 0.0,
        }
    }

    /// Highlight the first item immediately
    pub fn mount(&mut self, now: f64) {
        if self.items.is_empty() {
            self.phase = Phase::Idle;
            return;
        }
        self.phase = Phase::Highlighted(0);
        self.phase_started_ms = now;
    }

    pub fn unmount(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Advance through every phase whose deadline has passed
    pub fn tick<R: Rng>(&mut self, now: f64, rng: &mut R) {
        // Zero-length phases would never let time catch up
        if self.config.hold_ms <= 0.0 && self.config.dim_ms <= 0.0 {
            if let Phase::Highlighted(i) | Phase::Dimming(i) = self.phase {
                self.phase = Phase::Highlighted(self.pick_next(i, rng));
                self.phase_started_ms = now;
            }
            return;
        }

        loop {
            match self.phase {
                Phase::Idle => return,
                Phase::Highlighted(i) => {
                    let deadline = self.phase_started_ms + self.config.hold_ms;
                    if now < deadline {
                        return;
                    }
                    self.phase = Phase::Dimming(i);
                    self.phase_started_ms = deadline;
                }
                Phase::Dimming(i) => {
                    let deadline = self.phase_started_ms + self.config.dim_ms;
                    if now < deadline {
                        return;
                    }
                    self.phase = Phase::Highlighted(self.pick_next(i, rng));
                    self.phase_started_ms = deadline;
                }
            }
        }
    }

    /// Uniform over every item except `current`
    fn pick_next<R: Rng>(&self, current: usize, rng: &mut R) -> usize {
        let n = self.items.len();
        if n < 2 {
            return current;
        }
        let draw = rng.random_range(0..n - 1);
        if draw >= current { draw + 1 } else { draw }
    }

    pub fn state(&self) -> HighlightState {
        match self.phase {
            Phase::Idle => HighlightState::default(),
            Phase::Highlighted(i) => HighlightState {
                highlighted: Some(self.items[i].clone()),
                is_dimming: false,
            },
            Phase::Dimming(i) => HighlightState {
                highlighted: Some(self.items[i].clone()),
                is_dimming: true,
            },
        }
    }

    pub fn highlighted_id(&self) -> Option<&str> {
        match self.phase {
            Phase::Idle => None,
            Phase::Highlighted(i) | Phase::Dimming(i) => Some(self.items[i].as_str()),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }
}

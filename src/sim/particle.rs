//! Particle records
//!
//! Two kinds of ephemeral effect particles. Lightning is time-based (it
//! follows a waypoint path over a fixed duration); smoke is tick-based (it
//! integrates velocity once per frame).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SMOKE_MIN_ALPHA, SMOKE_RADIUS_GROWTH};
use crate::lerp_clamped;

/// Lifecycle of a lightning particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightningPhase {
    /// Following its waypoints
    Traveling,
    /// Reached its bound target
    Absorbed,
    /// Ran out its duration
    Expired,
}

/// A zigzag spark running from the pointer outward (or toward a target)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightningParticle {
    pub waypoints: Vec<Vec2>,
    pub current_waypoint: usize,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub target_id: Option<String>,
    pub phase: LightningPhase,
    /// Interpolated position as of the last advance
    pub pos: Vec2,
    /// Overall progress [0, 1] as of the last advance
    pub progress: f32,
}

impl LightningParticle {
    pub fn new(waypoints: Vec<Vec2>, start_ms: f64, duration_ms: f64) -> Self {
        let pos = waypoints.first().copied().unwrap_or(Vec2::ZERO);
        Self {
            waypoints,
            current_waypoint: 0,
            start_ms,
            duration_ms: duration_ms.max(0.0),
            target_id: None,
            phase: LightningPhase::Traveling,
            pos,
            progress: 0.0,
        }
    }

    /// Elapsed time since spawn, never negative
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.start_ms).max(0.0)
    }

    /// Overall progress at `now`; zero durations count as complete
    pub fn progress_at(&self, now: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed(now) / self.duration_ms).min(1.0) as f32
    }

    /// Duration of one waypoint-to-waypoint segment
    fn segment_ms(&self) -> f64 {
        let segments = self.waypoints.len().saturating_sub(1).max(1);
        self.duration_ms / segments as f64
    }

    /// Advance the waypoint cursor and return the interpolated position at `now`
    pub fn advance(&mut self, now: f64) -> Vec2 {
        self.progress = self.progress_at(now);

        let len = self.waypoints.len();
        if len < 2 {
            self.pos = self.waypoints.first().copied().unwrap_or(self.pos);
            return self.pos;
        }

        let seg_ms = self.segment_ms();
        let start_ms = self.start_ms;
        let segment_fraction = |index: usize| -> f32 {
            if seg_ms <= 0.0 {
                return 1.0;
            }
            let seg_start = start_ms + index as f64 * seg_ms;
            ((now - seg_start) / seg_ms).clamp(0.0, 1.0) as f32
        };

        // Never move past the second-to-last waypoint so there is always a "next"
        while self.current_waypoint < len - 2 && segment_fraction(self.current_waypoint) >= 1.0 {
            self.current_waypoint += 1;
        }

        let from = self.waypoints[self.current_waypoint];
        let to = self.waypoints[self.current_waypoint + 1];
        self.pos = lerp_clamped(from, to, segment_fraction(self.current_waypoint));
        self.pos
    }

    pub fn is_done(&self) -> bool {
        self.phase != LightningPhase::Traveling
    }

    pub fn final_waypoint(&self) -> Option<Vec2> {
        self.waypoints.last().copied()
    }
}

/// Smoke palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmokeTint {
    Cyan,
    Blue,
}

impl SmokeTint {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            SmokeTint::Cyan => (16, 249, 241),
            SmokeTint::Blue => (31, 1, 185),
        }
    }
}

/// A soft puff drifting away from the pointer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeParticle {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
    pub alpha: f32,
    /// Lifetime in ticks
    pub lifetime: u32,
    pub current_life: u32,
    pub tint: SmokeTint,
}

impl SmokeParticle {
    /// Integrate one tick. Dead particles are left untouched.
    pub fn update(&mut self) {
        if self.is_dead() {
            return;
        }
        self.pos += self.vel;
        self.radius += SMOKE_RADIUS_GROWTH;
        // lifetime > 0 here, otherwise is_dead would have returned
        self.alpha *= 1.0 - self.current_life as f32 / self.lifetime as f32;
        self.current_life += 1;
    }

    pub fn is_dead(&self) -> bool {
        self.current_life >= self.lifetime || self.alpha <= SMOKE_MIN_ALPHA
    }
}

/// Any particle the field can own
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Particle {
    Lightning(LightningParticle),
    Smoke(SmokeParticle),
}

impl Particle {
    pub fn position(&self) -> Vec2 {
        match self {
            Particle::Lightning(p) => p.pos,
            Particle::Smoke(p) => p.pos,
        }
    }

    /// Target a live lightning particle is bound to
    pub fn bound_target(&self) -> Option<&str> {
        match self {
            Particle::Lightning(p) if !p.is_done() => p.target_id.as_deref(),
            _ => None,
        }
    }
}

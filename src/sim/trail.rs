//! Pointer trail
//!
//! A short fading polyline following the pointer while it moves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{TRAIL_MAX_AGE_MS, TRAIL_MAX_POINTS};

/// Trail point for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub timestamp_ms: f64,
}

/// One drawable piece of the trail
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
    pub width: f32,
}

#[derive(Debug, Clone)]
pub struct TrailConfig {
    pub max_points: usize,
    pub max_age_ms: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_points: TRAIL_MAX_POINTS,
            max_age_ms: TRAIL_MAX_AGE_MS,
        }
    }
}

/// Pointer history (oldest first)
#[derive(Debug, Clone, Default)]
pub struct PointerTrail {
    config: TrailConfig,
    points: Vec<TrailPoint>,
}

impl PointerTrail {
    pub fn new(config: TrailConfig) -> Self {
        Self {
            points: Vec::with_capacity(config.max_points),
            config,
        }
    }

    /// Record a pointer position
    pub fn record(&mut self, pos: Vec2, now: f64) {
        if self.config.max_points == 0 {
            return;
        }
        self.points.push(TrailPoint {
            pos,
            timestamp_ms: now,
        });
        if self.points.len() > self.config.max_points {
            self.points.remove(0);
        }
    }

    /// Drop points older than the max age
    pub fn prune(&mut self, now: f64) {
        let max_age = self.config.max_age_ms;
        self.points.retain(|p| now - p.timestamp_ms <= max_age);
    }

    pub fn points(&self) -> &[TrailPoint] {
        &self.points
    }

    /// Segments between consecutive points, faded by the age of the newer end
    pub fn segments(&self, now: f64) -> Vec<TrailSegment> {
        if self.points.len() < 2 || self.config.max_age_ms <= 0.0 {
            return Vec::new();
        }
        self.points
            .windows(2)
            .filter_map(|pair| {
                let age = now - pair[1].timestamp_ms;
                if age > self.config.max_age_ms {
                    return None;
                }
                let freshness = (1.0 - age / self.config.max_age_ms).clamp(0.0, 1.0) as f32;
                Some(TrailSegment {
                    from: pair[0].pos,
                    to: pair[1].pos,
                    opacity: freshness,
                    width: 2.0 + freshness * 2.0,
                })
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_caps_length() {
        let mut trail = PointerTrail::default();
        for i in 0..80 {
            trail.record(Vec2::new(i as f32, 0.0), i as f64);
        }
        assert_eq!(trail.points().len(), 50);
        assert_eq!(trail.points()[0].pos.x, 30.0);
    }

    #[test]
    fn test_trail_prunes_old_points() {
        let mut trail = PointerTrail::default();
        trail.record(Vec2::ZERO, 0.0);
        trail.record(Vec2::X, 400.0);
        trail.prune(600.0);
        assert_eq!(trail.points().len(), 1);
    }

    #[test]
    fn test_segment_fading() {
        let mut trail = PointerTrail::default();
        trail.record(Vec2::ZERO, 0.0);
        trail.record(Vec2::new(10.0, 0.0), 250.0);
        let segs = trail.segments(250.0);
        assert_eq!(segs.len(), 1);
        assert!((segs[0].opacity - 1.0).abs() < 1e-6);
        assert!((segs[0].width - 4.0).abs() < 1e-6);

        let segs = trail.segments(500.0);
        assert!((segs[0].opacity - 0.5).abs() < 1e-6);
        assert!((segs[0].width - 3.0).abs() < 1e-6);
    }
}

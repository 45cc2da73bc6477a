//! Lightning emitter
//!
//! Spawns short zigzag sparks from the pointer. A spark whose pointer is
//! close enough to a target bends its last waypoint onto that target and
//! is absorbed when it gets there.

use glam::Vec2;
use rand::Rng;

use super::field::{EmissionGate, ParticleField, ParticleHandle};
use super::particle::{LightningParticle, Particle};
use super::targets::{TargetRegion, find_nearest};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Lightning tuning
#[derive(Debug, Clone)]
pub struct LightningConfig {
    pub min_per_burst: u32,
    pub max_per_burst: u32,
    pub min_duration_ms: f64,
    pub max_duration_ms: f64,
    pub travel_fraction: f32,
    pub attraction_fraction: f32,
    pub min_segments: usize,
    pub max_segments: usize,
    pub min_deviation: f32,
    pub max_deviation: f32,
}

impl Default for LightningConfig {
    fn default() -> Self {
        Self {
            min_per_burst: LIGHTNING_MIN_PER_BURST,
            max_per_burst: LIGHTNING_MAX_PER_BURST,
            min_duration_ms: LIGHTNING_MIN_DURATION_MS,
            max_duration_ms: LIGHTNING_MAX_DURATION_MS,
            travel_fraction: LIGHTNING_TRAVEL_FRACTION,
            attraction_fraction: LIGHTNING_ATTRACTION_FRACTION,
            min_segments: LIGHTNING_MIN_SEGMENTS,
            max_segments: LIGHTNING_MAX_SEGMENTS,
            min_deviation: LIGHTNING_MIN_DEVIATION,
            max_deviation: LIGHTNING_MAX_DEVIATION,
        }
    }
}

/// Emits lightning particles into a [`ParticleField`]
#[derive(Debug, Clone, Default)]
pub struct LightningEmitter {
    config: LightningConfig,
    gate: EmissionGate,
}

/// Uniform draw from an inclusive range that tolerates min > max
fn range_u32<R: Rng>(rng: &mut R, min: u32, max: u32) -> u32 {
    if max <= min { min } else { rng.random_range(min..=max) }
}

fn range_usize<R: Rng>(rng: &mut R, min: usize, max: usize) -> usize {
    if max <= min { min } else { rng.random_range(min..=max) }
}

fn range_f32<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min { min } else { rng.random_range(min..max) }
}

fn range_f64<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min { min } else { rng.random_range(min..max) }
}

impl LightningEmitter {
    pub fn new(config: LightningConfig) -> Self {
        Self {
            config,
            gate: EmissionGate::default(),
        }
    }

    pub fn config(&self) -> &LightningConfig {
        &self.config
    }

    /// Emit one burst if the gate allows it. Returns the spawned handles.
    pub fn try_emit<R: Rng>(
        &mut self,
        now: f64,
        pointer: Vec2,
        viewport_width: f32,
        targets: &[TargetRegion],
        field: &mut ParticleField,
        rng: &mut R,
    ) -> Vec<ParticleHandle> {
        if !self.gate.try_open(now) {
            return Vec::new();
        }

        let count = range_u32(rng, self.config.min_per_burst, self.config.max_per_burst);
        let handles: Vec<ParticleHandle> = (0..count)
            .map(|_| {
                let particle = self.spawn(now, pointer, viewport_width, targets, rng);
                field.emit(Particle::Lightning(particle))
            })
            .collect();
        log::trace!("Lightning burst: {} particles", handles.len());
        handles
    }

    /// Build a single particle (no gate, no field)
    pub fn spawn<R: Rng>(
        &self,
        now: f64,
        pointer: Vec2,
        viewport_width: f32,
        targets: &[TargetRegion],
        rng: &mut R,
    ) -> LightningParticle {
        let cfg = &self.config;
        let viewport_width = viewport_width.max(0.0);

        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let distance = viewport_width * cfg.travel_fraction;
        let duration = range_f64(rng, cfg.min_duration_ms, cfg.max_duration_ms);
        let end = pointer + polar_to_cartesian(distance, angle);

        let segments = range_usize(rng, cfg.min_segments, cfg.max_segments).max(1);
        let mut waypoints = Vec::with_capacity(segments + 1);
        waypoints.push(pointer);
        for i in 1..segments {
            let base = pointer.lerp(end, i as f32 / segments as f32);
            let deviation = range_f32(rng, cfg.min_deviation, cfg.max_deviation);
            let deviation_angle = rng.random_range(0.0..std::f32::consts::TAU);
            waypoints.push(base + polar_to_cartesian(deviation, deviation_angle));
        }
        waypoints.push(end);

        let mut particle = LightningParticle::new(waypoints, now, duration);

        let attraction = viewport_width * cfg.attraction_fraction;
        if let Some(target) = find_nearest(targets, pointer, attraction) {
            if let Some(last) = particle.waypoints.last_mut() {
                *last = target.center;
            }
            particle.target_id = Some(target.id.clone());
        }

        particle
    }

    /// Forget the cooldown (on unmount)
    pub fn reset(&mut self) {
        self.gate.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_path_shape() {
        let emitter = LightningEmitter::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let pointer = Vec2::new(400.0, 300.0);

        for _ in 0..100 {
            let p = emitter.spawn(0.0, pointer, 1000.0, &[], &mut rng);
            assert!((4..=6).contains(&p.waypoints.len()));
            assert_eq!(p.waypoints[0], pointer);
            let end = p.final_waypoint().unwrap();
            assert!((end.distance(pointer) - 150.0).abs() < 1e-2);
            assert!((400.0..600.0).contains(&p.duration_ms));
            assert!(p.target_id.is_none());
        }
    }

    #[test]
    fn test_intermediate_waypoints_deviate_within_bounds() {
        let emitter = LightningEmitter::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let pointer = Vec2::ZERO;

        for _ in 0..50 {
            let p = emitter.spawn(0.0, pointer, 1000.0, &[], &mut rng);
            let end = p.final_waypoint().unwrap();
            let segments = p.waypoints.len() - 1;
            for (i, wp) in p.waypoints.iter().enumerate().skip(1).take(segments - 1) {
                let base = pointer.lerp(end, i as f32 / segments as f32);
                let d = wp.distance(base);
                assert!((14.99..35.01).contains(&d), "deviation {d}");
            }
        }
    }

    #[test]
    fn test_spawn_binds_to_nearby_target() {
        let emitter = LightningEmitter::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let targets = vec![
            TargetRegion::new("far", Vec2::new(900.0, 100.0), Vec2::splat(20.0)),
            TargetRegion::new("near", Vec2::new(150.0, 100.0), Vec2::splat(20.0)),
        ];
        let p = emitter.spawn(0.0, Vec2::new(100.0, 100.0), 1000.0, &targets, &mut rng);
        assert_eq!(p.target_id.as_deref(), Some("near"));
        assert_eq!(p.final_waypoint(), Some(Vec2::new(150.0, 100.0)));
    }

    #[test]
    fn test_try_emit_respects_gate_and_burst_size() {
        let mut emitter = LightningEmitter::default();
        let mut field = ParticleField::new(1000);
        let mut rng = Pcg32::seed_from_u64(1);

        let first = emitter.try_emit(0.0, Vec2::ZERO, 800.0, &[], &mut field, &mut rng);
        assert!((1..=3).contains(&first.len()));
        let blocked = emitter.try_emit(30.0, Vec2::ZERO, 800.0, &[], &mut field, &mut rng);
        assert!(blocked.is_empty());
        let second = emitter.try_emit(50.0, Vec2::ZERO, 800.0, &[], &mut field, &mut rng);
        assert!(!second.is_empty());
        assert_eq!(field.len(), first.len() + second.len());
    }

    #[test]
    fn test_zero_width_viewport_is_degenerate_not_fatal() {
        let emitter = LightningEmitter::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let targets = vec![TargetRegion::new("t", Vec2::ZERO, Vec2::splat(10.0))];
        let p = emitter.spawn(0.0, Vec2::ZERO, 0.0, &targets, &mut rng);
        assert_eq!(p.final_waypoint(), Some(Vec2::ZERO));
        assert!(p.target_id.is_none());
    }
}

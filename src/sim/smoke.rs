//! Smoke emitter
//!
//! Puffs of cyan/blue smoke shed by a moving pointer.

use glam::Vec2;
use rand::Rng;

use super::field::{EmissionGate, ParticleField, ParticleHandle};
use super::particle::{Particle, SmokeParticle, SmokeTint};
use crate::consts::{SMOKE_MAX_LIFETIME, SMOKE_MAX_PER_BURST, SMOKE_MIN_LIFETIME};
use crate::polar_to_cartesian;

/// Smoke tuning
#[derive(Debug, Clone)]
pub struct SmokeConfig {
    pub max_per_burst: u32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_lifetime: u32,
    pub max_lifetime: u32,
    pub min_alpha: f32,
    pub max_alpha: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            max_per_burst: SMOKE_MAX_PER_BURST,
            min_speed: 0.5,
            max_speed: 1.5,
            min_lifetime: SMOKE_MIN_LIFETIME,
            max_lifetime: SMOKE_MAX_LIFETIME,
            min_alpha: 0.6,
            max_alpha: 1.0,
            min_radius: 5.0,
            max_radius: 15.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SmokeEmitter {
    config: SmokeConfig,
    gate: EmissionGate,
}

impl SmokeEmitter {
    pub fn new(config: SmokeConfig) -> Self {
        Self {
            config,
            gate: EmissionGate::default(),
        }
    }

    /// Emit a burst at the pointer if the gate allows it
    pub fn try_emit<R: Rng>(
        &mut self,
        now: f64,
        pointer: Vec2,
        field: &mut ParticleField,
        rng: &mut R,
    ) -> Vec<ParticleHandle> {
        if self.config.max_per_burst == 0 || !self.gate.try_open(now) {
            return Vec::new();
        }
        let count = rng.random_range(1..=self.config.max_per_burst);
        (0..count)
            .map(|_| field.emit(Particle::Smoke(self.spawn(pointer, rng))))
            .collect()
    }

    pub fn spawn<R: Rng>(&self, pointer: Vec2, rng: &mut R) -> SmokeParticle {
        let cfg = &self.config;
        let speed = cfg.min_speed + rng.random::<f32>() * (cfg.max_speed - cfg.min_speed);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let lifetime = if cfg.max_lifetime > cfg.min_lifetime {
            rng.random_range(cfg.min_lifetime..=cfg.max_lifetime)
        } else {
            cfg.min_lifetime
        };
        let tint = if rng.random_bool(0.5) {
            SmokeTint::Cyan
        } else {
            SmokeTint::Blue
        };

        SmokeParticle {
            pos: pointer,
            vel: polar_to_cartesian(speed, angle),
            radius: cfg.min_radius + rng.random::<f32>() * (cfg.max_radius - cfg.min_radius),
            alpha: cfg.min_alpha + rng.random::<f32>() * (cfg.max_alpha - cfg.min_alpha),
            lifetime,
            current_life: 0,
            tint,
        }
    }

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
    fn test_spawn_ranges() {
        let emitter = SmokeEmitter::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let p = emitter.spawn(Vec2::new(5.0, 5.0), &mut rng);
            assert_eq!(p.pos, Vec2::new(5.0, 5.0));
            let speed = p.vel.length();
            assert!((0.49..=1.51).contains(&speed));
            assert!((40..=60).contains(&p.lifetime));
            assert!((0.6..=1.0).contains(&p.alpha));
            assert!((5.0..=15.0).contains(&p.radius));
            assert_eq!(p.current_life, 0);
        }
    }

    #[test]
    fn test_try_emit_gated() {
        let mut emitter = SmokeEmitter::default();
        let mut field = ParticleField::new(100);
        let mut rng = Pcg32::seed_from_u64(9);
        let burst = emitter.try_emit(0.0, Vec2::ZERO, &mut field, &mut rng);
        assert!((1..=3).contains(&burst.len()));
        assert!(emitter.try_emit(10.0, Vec2::ZERO, &mut field, &mut rng).is_empty());
    }

    #[test]
    fn test_smoke_dies_within_lifetime() {
        let emitter = SmokeEmitter::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut p = emitter.spawn(Vec2::ZERO, &mut rng);
        let lifetime = p.lifetime;
        for _ in 0..lifetime {
            p.update();
        }
        assert!(p.is_dead());
    }
}

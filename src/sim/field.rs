//! Particle field
//!
//! Owns every live particle, advances them once per frame and removes the
//! ones that expired or were absorbed. Iteration order is spawn order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::particle::{LightningPhase, Particle};
use super::targets::{TargetRegion, find_by_id};
use crate::consts::EMISSION_INTERVAL_MS;

/// Stable id of a particle inside its field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleHandle(pub u32);

/// Why a particle left the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Retirement {
    /// Lifetime ran out
    Expired,
    /// Lightning reached its bound target
    Absorbed { target_id: String },
}

/// A particle removed during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retired {
    pub handle: ParticleHandle,
    pub reason: Retirement,
}

/// Minimum spacing between emission bursts
#[derive(Debug, Clone)]
pub struct EmissionGate {
    interval_ms: f64,
    last_open: Option<f64>,
}

impl Default for EmissionGate {
    fn default() -> Self {
        Self::new(EMISSION_INTERVAL_MS)
    }
}

impl EmissionGate {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            last_open: None,
        }
    }

    /// Returns true (and arms the cooldown) if a burst may start at `now`
    pub fn try_open(&mut self, now: f64) -> bool {
        if let Some(last) = self.last_open {
            if now - last < self.interval_ms {
                return false;
            }
        }
        self.last_open = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last_open = None;
    }
}

/// Owner of all live effect particles
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<(ParticleHandle, Particle)>,
    max_particles: usize,
    next_id: u32,
}

impl ParticleField {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            max_particles,
            next_id: 1,
        }
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max;
        if self.particles.len() > max {
            let excess = self.particles.len() - max;
            self.particles.drain(..excess);
        }
    }

    /// Take ownership of a particle. At the cap the oldest particle is evicted.
    pub fn emit(&mut self, particle: Particle) -> ParticleHandle {
        let handle = ParticleHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        if self.max_particles == 0 {
            return handle;
        }
        while self.particles.len() >= self.max_particles {
            self.particles.remove(0);
        }
        self.particles.push((handle, particle));
        handle
    }

    /// Advance every particle one frame against the current target snapshot
    pub fn tick(&mut self, now: f64, targets: &[TargetRegion]) -> Vec<Retired> {
        let mut retired = Vec::new();

        for (handle, particle) in self.particles.iter_mut() {
            let reason = match particle {
                Particle::Lightning(p) => {
                    let pos = p.advance(now);
                    let absorbed_by = p
                        .target_id
                        .as_deref()
                        .and_then(|id| find_by_id(targets, id))
                        .filter(|t| pos.distance(t.center) < t.half_width())
                        .map(|t| t.id.clone());

                    if let Some(target_id) = absorbed_by {
                        p.phase = LightningPhase::Absorbed;
                        Some(Retirement::Absorbed { target_id })
                    } else if p.progress >= 1.0 {
                        p.phase = LightningPhase::Expired;
                        Some(Retirement::Expired)
                    } else {
                        None
                    }
                }
                Particle::Smoke(p) => {
                    p.update();
                    p.is_dead().then_some(Retirement::Expired)
                }
            };

            if let Some(reason) = reason {
                retired.push(Retired {
                    handle: *handle,
                    reason,
                });
            }
        }

        self.particles.retain(|(_, p)| match p {
            Particle::Lightning(l) => !l.is_done(),
            Particle::Smoke(s) => !s.is_dead(),
        });

        retired
    }

    /// Read-only view of the live particles, oldest first
    pub fn all(&self) -> impl Iterator<Item = (ParticleHandle, &Particle)> {
        self.particles.iter().map(|(h, p)| (*h, p))
    }

    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.particles
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, p)| p)
    }

    /// Ids of targets referenced by live lightning particles
    pub fn bound_targets(&self) -> HashSet<String> {
        self.particles
            .iter()
            .filter_map(|(_, p)| p.bound_target())
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

//! Effect simulation module
//!
//! Everything that moves on the splash screen lives here. This module must be
//! pure and deterministic:
//! - Time only arrives as a `now` argument, no timers
//! - Seeded RNG only
//! - Stable iteration order (spawn order, item order)
//! - No rendering or platform dependencies

pub mod field;
pub mod highlight;
pub mod lightning;
pub mod orbit;
pub mod particle;
pub mod pointer;
pub mod smoke;
pub mod targets;
pub mod trail;

pub use field::{EmissionGate, ParticleField, ParticleHandle, Retired, Retirement};
pub use highlight::{HighlightConfig, HighlightScheduler, HighlightState};
pub use lightning::{LightningConfig, LightningEmitter};
pub use orbit::{
    Category, OrbitConfig, OrbitItem, OrbitLayout, OrbitLayoutEngine, OrbitSpeed, OrbitTransform,
    TIER_COUNT, TierAngles, all_item_ids,
};
pub use particle::{LightningParticle, LightningPhase, Particle, SmokeParticle, SmokeTint};
pub use pointer::{PointerSample, PointerTracker};
pub use smoke::{SmokeConfig, SmokeEmitter};
pub use targets::{TargetEffects, TargetEvent, TargetRegion, find_by_id, find_nearest};
pub use trail::{PointerTrail, TrailConfig, TrailPoint, TrailSegment};

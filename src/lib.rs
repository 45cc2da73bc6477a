//! Tron Orbit - splash screen effects core
//!
//! Core modules:
//! - `effects`: Mount/tick/unmount facade a host drives once per animation frame
//! - `sim`: Frame-driven effect simulation (pointer, particles, orbit layout, highlight)
//! - `renderer`: Render lists (sprites, trail segments, CSS strings) built from sim state
//! - `settings`: User display preferences

pub mod effects;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use effects::{EffectsConfig, Frame, SplashEffects};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Effect tuning constants
pub mod consts {
    /// Pointer counts as moving for this long after the last move event (ms)
    pub const POINTER_IDLE_MS: f64 = 100.0;

    /// Minimum time between emission bursts (ms)
    pub const EMISSION_INTERVAL_MS: f64 = 50.0;

    /// Lightning particles per burst (inclusive range)
    pub const LIGHTNING_MIN_PER_BURST: u32 = 1;
    pub const LIGHTNING_MAX_PER_BURST: u32 = 3;
    /// Lightning lifetime range (ms)
    pub const LIGHTNING_MIN_DURATION_MS: f64 = 400.0;
    pub const LIGHTNING_MAX_DURATION_MS: f64 = 600.0;
    /// Travel distance as a fraction of viewport width
    pub const LIGHTNING_TRAVEL_FRACTION: f32 = 0.15;
    /// Attraction radius as a fraction of viewport width
    pub const LIGHTNING_ATTRACTION_FRACTION: f32 = 0.10;
    /// Zigzag segments per path (inclusive range)
    pub const LIGHTNING_MIN_SEGMENTS: usize = 3;
    pub const LIGHTNING_MAX_SEGMENTS: usize = 5;
    /// Lateral deviation of intermediate waypoints (px)
    pub const LIGHTNING_MIN_DEVIATION: f32 = 15.0;
    pub const LIGHTNING_MAX_DEVIATION: f32 = 35.0;
    /// Base sprite diameter (px) before progress scaling
    pub const LIGHTNING_SPRITE_SIZE: f32 = 4.0;

    /// Targets stay highlighted this long after their last hit (ms)
    pub const TARGET_HIT_DECAY_MS: f64 = 2000.0;

    /// Smoke particles per burst (upper bound)
    pub const SMOKE_MAX_PER_BURST: u32 = 3;
    /// Smoke lifetime range (ticks)
    pub const SMOKE_MIN_LIFETIME: u32 = 40;
    pub const SMOKE_MAX_LIFETIME: u32 = 60;
    /// Radius growth per tick (px)
    pub const SMOKE_RADIUS_GROWTH: f32 = 0.05;
    /// Smoke dies once alpha falls to this
    pub const SMOKE_MIN_ALPHA: f32 = 0.01;

    /// Pointer trail limits
    pub const TRAIL_MAX_POINTS: usize = 50;
    pub const TRAIL_MAX_AGE_MS: f64 = 500.0;

    /// Orbit size as a fraction of the smaller viewport dimension
    pub const ORBIT_SIZE_FRACTION: f32 = 0.4;
    /// Center button size as a fraction of orbit size
    pub const CENTER_BUTTON_FRACTION: f32 = 0.4;
    /// Per-tier button size multipliers (relative to previous tier)
    pub const TIER_SIZE_FACTORS: [f32; 4] = [0.75, 0.8, 0.9, 0.9];
    /// Per-tier orbit radii as fractions of orbit size
    pub const TIER_RADIUS_FACTORS: [f32; 4] = [0.4, 0.68, 0.85, 1.1];
    /// Per-tier full revolution period (ms), tier 1 fastest
    pub const TIER_PERIOD_MS: [f64; 4] = [20_000.0, 30_000.0, 40_000.0, 50_000.0];
    /// Window for the random angle step between consecutive tiers (degrees)
    pub const TIER_MIN_OFFSET_DEG: f32 = 40.0;
    pub const TIER_MAX_OFFSET_DEG: f32 = 100.0;

    /// Highlight rotation cadence (ms)
    pub const HIGHLIGHT_HOLD_MS: f64 = 3000.0;
    pub const HIGHLIGHT_DIM_MS: f64 = 3000.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Convert polar (r, theta in radians) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Linear interpolation between two points, `t` clamped to [0, 1]
#[inline]
pub fn lerp_clamped(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a.lerp(b, t.clamp(0.0, 1.0))
}

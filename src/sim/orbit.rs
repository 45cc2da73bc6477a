//! Orbit layout
//!
//! Navigation buttons sit on four concentric rings around a center button.
//! Each ring (tier) carries two buttons on exactly opposite sides. Tier
//! angles are rolled once when the engine is built and then kept for the
//! whole session; only sizes and radii follow the viewport.

use glam::{Affine2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::normalize_degrees;

/// Number of rings around the center
pub const TIER_COUNT: usize = 4;

/// Angular speed class of a ring (tier 1 fastest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitSpeed {
    Fast,
    Slow,
    Slower,
    Slowest,
}

impl OrbitSpeed {
    pub fn for_tier(tier: usize) -> Self {
        match tier {
            0 => OrbitSpeed::Fast,
            1 => OrbitSpeed::Slow,
            2 => OrbitSpeed::Slower,
            _ => OrbitSpeed::Slowest,
        }
    }

    /// Animation class the DOM host attaches to the orbit item
    pub fn css_class(&self) -> &'static str {
        match self {
            OrbitSpeed::Fast => "animate-orbit",
            OrbitSpeed::Slow => "animate-orbit-slow",
            OrbitSpeed::Slower => "animate-orbit-slower",
            OrbitSpeed::Slowest => "animate-orbit-slowest",
        }
    }

    /// Full revolution time
    pub fn period_ms(&self) -> f64 {
        match self {
            OrbitSpeed::Fast => TIER_PERIOD_MS[0],
            OrbitSpeed::Slow => TIER_PERIOD_MS[1],
            OrbitSpeed::Slower => TIER_PERIOD_MS[2],
            OrbitSpeed::Slowest => TIER_PERIOD_MS[3],
        }
    }

    pub fn degrees_per_ms(&self) -> f64 {
        360.0 / self.period_ms()
    }
}

/// Static navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub route: &'static str,
}

/// Center button
pub const CENTER_CATEGORY: Category = Category {
    id: "orbit-btn-about-me",
    name: "About Me",
    route: "/about",
};

/// Orbiting buttons, two per tier, innermost tier first
pub const TIER_CATEGORIES: [[Category; 2]; TIER_COUNT] = [
    [
        Category { id: "orbit-btn-apps", name: "Apps", route: "/apps" },
        Category { id: "orbit-btn-games", name: "Games", route: "/games" },
    ],
    [
        Category { id: "orbit-btn-websites", name: "Web Sites", route: "/websites" },
        Category { id: "orbit-btn-code-examples", name: "Code Examples", route: "/code" },
    ],
    [
        Category { id: "orbit-btn-3d-models", name: "3D Models", route: "/3d-models" },
        Category { id: "orbit-btn-3d-printing", name: "3D Printing", route: "/3d-printing" },
    ],
    [
        Category { id: "orbit-btn-electronics", name: "Electronics", route: "/electronics" },
        Category { id: "orbit-btn-other-projects", name: "Other Projects", route: "/other" },
    ],
];

/// All button ids, center first (highlight rotation order)
pub fn all_item_ids() -> Vec<String> {
    std::iter::once(CENTER_CATEGORY.id)
        .chain(TIER_CATEGORIES.iter().flatten().map(|c| c.id))
        .map(str::to_string)
        .collect()
}

/// Layout tuning
#[derive(Debug, Clone)]
pub struct OrbitConfig {
    pub min_offset_deg: f32,
    pub max_offset_deg: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            min_offset_deg: TIER_MIN_OFFSET_DEG,
            max_offset_deg: TIER_MAX_OFFSET_DEG,
        }
    }
}

/// Base angle of each tier in degrees; the partner sits at +180
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierAngles(pub [f32; TIER_COUNT]);

impl TierAngles {
    /// Tier 1 uniform in [0, 360); each next tier steps forward by a
    /// uniform offset in [min_offset, max_offset]
    pub fn roll<R: Rng>(config: &OrbitConfig, rng: &mut R) -> Self {
        let (lo, hi) = if config.min_offset_deg <= config.max_offset_deg {
            (config.min_offset_deg, config.max_offset_deg)
        } else {
            (config.max_offset_deg, config.min_offset_deg)
        };
        let mut angles = [0.0; TIER_COUNT];
        angles[0] = rng.random_range(0.0..360.0);
        for i in 1..TIER_COUNT {
            angles[i] = normalize_degrees(angles[i - 1] + rng.random_range(lo..=hi));
        }
        Self(angles)
    }

    /// Start angles of the two items of `tier`
    pub fn pair(&self, tier: usize) -> (f32, f32) {
        let base = self.0[tier];
        (base, normalize_degrees(base + 180.0))
    }
}

/// A positioned navigation button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitItem {
    pub id: String,
    pub name: String,
    pub route: String,
    pub button_size: f32,
    pub orbit_radius: f32,
    /// None for the center button
    pub speed: Option<OrbitSpeed>,
    pub start_angle_deg: f32,
    /// 0 for the center, 1..=4 for rings
    pub tier: u8,
}

/// Complete layout for one viewport size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitLayout {
    pub orbit_size: f32,
    pub center: OrbitItem,
    pub items: Vec<OrbitItem>,
}

impl OrbitLayout {
    /// Center button first, then ring items in tier order
    pub fn all_items(&self) -> impl Iterator<Item = &OrbitItem> {
        std::iter::once(&self.center).chain(self.items.iter())
    }

    pub fn find(&self, id: &str) -> Option<&OrbitItem> {
        self.all_items().find(|item| item.id == id)
    }
}

/// Where an item is drawn this frame, relative to the orbit center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitTransform {
    pub id: String,
    /// Current orbit angle (start angle plus animation)
    pub angle_deg: f32,
    pub orbit_radius: f32,
    pub offset: Vec2,
    /// Net rotation applied to the item's own content (stays 0)
    pub content_rotation_deg: f32,
}

/// rotate(θ) · translate(r, 0) · rotate(−θ)
pub fn orbit_affine(angle_deg: f32, radius: f32) -> Affine2 {
    let theta = angle_deg.to_radians();
    Affine2::from_angle(theta)
        * Affine2::from_translation(Vec2::new(radius, 0.0))
        * Affine2::from_angle(-theta)
}

/// Rotation carried by an affine's linear part, in degrees
pub fn net_rotation_deg(affine: &Affine2) -> f32 {
    let x_axis = affine.matrix2.x_axis;
    x_axis.y.atan2(x_axis.x).to_degrees()
}

/// Computes ring layout and per-frame transforms
#[derive(Debug, Clone)]
pub struct OrbitLayoutEngine {
    angles: TierAngles,
    layout: OrbitLayout,
}

impl OrbitLayoutEngine {
    pub fn new<R: Rng>(config: &OrbitConfig, rng: &mut R) -> Self {
        Self::with_angles(TierAngles::roll(config, rng))
    }

    pub fn with_angles(angles: TierAngles) -> Self {
        log::debug!("Orbit tier angles: {:?}", angles.0);
        Self {
            angles,
            layout: compute_layout(&angles, 0.0, 0.0),
        }
    }

    pub fn angles(&self) -> &TierAngles {
        &self.angles
    }

    pub fn layout(&self) -> &OrbitLayout {
        &self.layout
    }

    /// Recompute sizes and radii for a new viewport; angles are kept
    pub fn resize(&mut self, width: f32, height: f32) -> &OrbitLayout {
        self.layout = compute_layout(&self.angles, width, height);
        &self.layout
    }

    /// Transforms for every item `elapsed_ms` after mount
    pub fn transforms(&self, elapsed_ms: f64) -> Vec<OrbitTransform> {
        self.layout
            .all_items()
            .map(|item| item_transform(item, elapsed_ms))
            .collect()
    }
}

/// Layout for a viewport, pure in its inputs
pub fn compute_layout(angles: &TierAngles, width: f32, height: f32) -> OrbitLayout {
    // NaN and negative sizes collapse to a zero-radius orbit
    let min_dimension = width.min(height).max(0.0);
    let orbit_size = ORBIT_SIZE_FRACTION * min_dimension;
    let center_size = CENTER_BUTTON_FRACTION * orbit_size;

    let center = OrbitItem {
        id: CENTER_CATEGORY.id.to_string(),
        name: CENTER_CATEGORY.name.to_string(),
        route: CENTER_CATEGORY.route.to_string(),
        button_size: center_size,
        orbit_radius: 0.0,
        speed: None,
        start_angle_deg: 0.0,
        tier: 0,
    };

    let mut items = Vec::with_capacity(TIER_COUNT * 2);
    let mut button_size = center_size;
    for (tier, pair) in TIER_CATEGORIES.iter().enumerate() {
        button_size *= TIER_SIZE_FACTORS[tier];
        let radius = TIER_RADIUS_FACTORS[tier] * orbit_size;
        let (first, second) = angles.pair(tier);
        for (category, angle) in pair.iter().zip([first, second]) {
            items.push(OrbitItem {
                id: category.id.to_string(),
                name: category.name.to_string(),
                route: category.route.to_string(),
                button_size,
                orbit_radius: radius,
                speed: Some(OrbitSpeed::for_tier(tier)),
                start_angle_deg: angle,
                tier: (tier + 1) as u8,
            });
        }
    }

    OrbitLayout {
        orbit_size,
        center,
        items,
    }
}

/// Transform of one item at `elapsed_ms` of continuous rotation
pub fn item_transform(item: &OrbitItem, elapsed_ms: f64) -> OrbitTransform {
    let spin = item
        .speed
        .map(|s| (s.degrees_per_ms() * elapsed_ms.max(0.0)).rem_euclid(360.0) as f32)
        .unwrap_or(0.0);
    let angle_deg = normalize_degrees(item.start_angle_deg + spin);
    let affine = orbit_affine(angle_deg, item.orbit_radius);
    OrbitTransform {
        id: item.id.clone(),
        angle_deg,
        orbit_radius: item.orbit_radius,
        offset: affine.translation,
        content_rotation_deg: net_rotation_deg(&affine),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn angles_diff(a: f32, b: f32) -> f32 {
        normalize_degrees(b - a)
    }

    #[test]
    fn test_tier_pairs_are_opposed() {
        let angles = TierAngles([37.0, 100.0, 190.0, 300.0]);
        assert_eq!(angles.pair(0), (37.0, 217.0));
        let (a, b) = angles.pair(3);
        assert!((angles_diff(a, b) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_roll_offsets_within_window() {
        let config = OrbitConfig::default();
        let mut rng = Pcg32::seed_from_u64(123);
        for _ in 0..200 {
            let TierAngles(a) = TierAngles::roll(&config, &mut rng);
            assert!((0.0..360.0).contains(&a[0]));
            for i in 1..TIER_COUNT {
                let step = angles_diff(a[i - 1], a[i]);
                assert!((39.99..=100.01).contains(&step), "step {step}");
            }
        }
    }

    #[test]
    fn test_layout_sizes_and_radii() {
        let angles = TierAngles([0.0, 90.0, 180.0, 270.0]);
        let layout = compute_layout(&angles, 1600.0, 1000.0);
        assert!((layout.orbit_size - 400.0).abs() < 1e-3);
        assert!((layout.center.button_size - 160.0).abs() < 1e-3);

        let sizes: Vec<f32> = layout.items.iter().step_by(2).map(|i| i.button_size).collect();
        let expected = [120.0, 96.0, 86.4, 77.76];
        for (s, e) in sizes.iter().zip(expected) {
            assert!((s - e).abs() < 1e-2, "{s} vs {e}");
        }

        let radii: Vec<f32> = layout.items.iter().step_by(2).map(|i| i.orbit_radius).collect();
        let expected = [160.0, 272.0, 340.0, 440.0];
        for (r, e) in radii.iter().zip(expected) {
            assert!((r - e).abs() < 1e-2);
        }
        assert_eq!(layout.items.len(), 8);
        assert_eq!(layout.items[0].speed, Some(OrbitSpeed::Fast));
        assert_eq!(layout.items[7].speed, Some(OrbitSpeed::Slowest));
    }

    #[test]
    fn test_resize_keeps_angles() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut engine = OrbitLayoutEngine::new(&OrbitConfig::default(), &mut rng);
        let before: Vec<f32> = engine
            .resize(800.0, 600.0)
            .items
            .iter()
            .map(|i| i.start_angle_deg)
            .collect();
        let after: Vec<f32> = engine
            .resize(300.0, 900.0)
            .items
            .iter()
            .map(|i| i.start_angle_deg)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_degenerate_viewport() {
        let angles = TierAngles([0.0; TIER_COUNT]);
        let layout = compute_layout(&angles, 0.0, 500.0);
        assert_eq!(layout.orbit_size, 0.0);
        assert!(layout.items.iter().all(|i| i.orbit_radius == 0.0));

        let layout = compute_layout(&angles, -10.0, f32::NAN);
        assert_eq!(layout.orbit_size, 0.0);
    }

    #[test]
    fn test_transform_is_upright() {
        for deg in [0.0_f32, 37.0, 90.0, 181.5, 359.9] {
            let affine = orbit_affine(deg, 250.0);
            assert!(net_rotation_deg(&affine).abs() < 1e-3);
            let expected = crate::polar_to_cartesian(250.0, deg.to_radians());
            assert!(affine.translation.distance(expected) < 1e-2);
        }
    }

    #[test]
    fn test_transform_animates_by_tier_speed() {
        let angles = TierAngles([10.0, 10.0, 10.0, 10.0]);
        let layout = compute_layout(&angles, 1000.0, 1000.0);
        // Quarter of tier 1's period
        let t = item_transform(&layout.items[0], 5000.0);
        assert!((t.angle_deg - 100.0).abs() < 1e-3);
        // Tier 4 turns slower over the same time
        let t4 = item_transform(&layout.items[6], 5000.0);
        assert!((t4.angle_deg - 46.0).abs() < 1e-3);
        // Center never moves
        let c = item_transform(&layout.center, 5000.0);
        assert_eq!(c.offset, Vec2::ZERO);
    }

    #[test]
    fn test_all_item_ids() {
        let ids = all_item_ids();
        assert_eq!(ids.len(), 9);
        assert_eq!(ids[0], "orbit-btn-about-me");
        assert_eq!(ids[8], "orbit-btn-other-projects");
    }

    #[test]
    fn test_layout_items_cover_every_highlight_id() {
        let layout = compute_layout(&TierAngles([0.0, 60.0, 120.0, 180.0]), 1000.0, 800.0);
        let ids: Vec<String> = layout.all_items().map(|item| item.id.clone()).collect();
        assert_eq!(ids, all_item_ids());
        let center = layout.all_items().next().unwrap();
        assert_eq!(center.tier, 0);
        assert!(center.button_size > 0.0);
        assert!(layout.find("orbit-btn-about-me").is_some());
    }
}

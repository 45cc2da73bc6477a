//! Property-based invariant tests for the splash screen effects.
//!
//! 1. Lightning particles never outlive start + duration
//! 2. find_nearest returns the closest target strictly inside the radius
//! 3. Tier partners sit 180 degrees apart; tier steps stay in the offset window
//! 4. The rotating highlight never lands on the same item twice in a row
//! 5. Orbit transforms keep item content upright at distance r

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use tron_orbit::normalize_degrees;
use tron_orbit::sim::orbit::{net_rotation_deg, orbit_affine};
use tron_orbit::sim::{
    HighlightConfig, HighlightScheduler, LightningEmitter, OrbitConfig, Particle, ParticleField,
    TIER_COUNT, TargetRegion, TierAngles, find_nearest,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn arb_point() -> impl Strategy<Value = Vec2> {
    (-2000.0f32..2000.0, -2000.0f32..2000.0).prop_map(|(x, y)| Vec2::new(x, y))
}

fn arb_targets() -> impl Strategy<Value = Vec<TargetRegion>> {
    prop::collection::vec((arb_point(), 1.0f32..80.0), 0..12).prop_map(|v| {
        v.into_iter()
            .enumerate()
            .map(|(i, (c, half))| TargetRegion::new(format!("t{i}"), c, Vec2::splat(half)))
            .collect()
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Lightning expiry is bounded by its duration
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lightning_gone_by_end_of_duration(
        seed in any::<u64>(),
        width in 0.0f32..4000.0,
        pointer in arb_point(),
        steps in prop::collection::vec(1.0f64..120.0, 1..40),
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let emitter = LightningEmitter::default();
        let mut field = ParticleField::new(64);
        let mut deadlines = Vec::new();
        for k in 0..8 {
            let start = k as f64 * 25.0;
            let p = emitter.spawn(start, pointer, width, &[], &mut rng);
            deadlines.push(p.start_ms + p.duration_ms);
            field.emit(Particle::Lightning(p));
        }

        let mut now = 0.0;
        for step in steps {
            now += step;
            field.tick(now, &[]);
            let overdue = deadlines.iter().filter(|d| **d <= now).count();
            let live = field.len();
            prop_assert!(
                live <= deadlines.len() - overdue,
                "{} particles live at {} with {} past their deadline",
                live, now, overdue
            );
        }

        let last = deadlines.iter().cloned().fold(0.0, f64::max);
        field.tick(last, &[]);
        prop_assert!(field.is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. find_nearest agrees with a brute-force minimum
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn find_nearest_matches_brute_force(
        targets in arb_targets(),
        pointer in arb_point(),
        max in 0.0f32..1500.0,
    ) {
        let expected = targets
            .iter()
            .map(|t| (t, pointer.distance(t.center)))
            .filter(|(_, d)| *d < max)
            .fold(None::<(&TargetRegion, f32)>, |best, (t, d)| match best {
                Some((_, bd)) if d >= bd => best,
                _ => Some((t, d)),
            })
            .map(|(t, _)| t.id.clone());

        let got = find_nearest(&targets, pointer, max).map(|t| t.id.clone());
        prop_assert_eq!(got.clone(), expected);
        if let Some(id) = got {
            let hit = targets.iter().find(|t| t.id == id).unwrap();
            prop_assert!(pointer.distance(hit.center) < max);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Tier geometry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tier_partners_opposed(seed in any::<u64>()) {
        let config = OrbitConfig::default();
        let angles = TierAngles::roll(&config, &mut Pcg32::seed_from_u64(seed));
        for tier in 0..TIER_COUNT {
            let (a, b) = angles.pair(tier);
            prop_assert!((0.0..360.0).contains(&a));
            prop_assert!((0.0..360.0).contains(&b));
            let gap = normalize_degrees(b - a);
            prop_assert!((gap - 180.0).abs() < 1e-3, "tier {} gap {}", tier, gap);
        }
        for tier in 1..TIER_COUNT {
            let step = normalize_degrees(angles.0[tier] - angles.0[tier - 1]);
            prop_assert!(
                step >= config.min_offset_deg - 1e-3 && step <= config.max_offset_deg + 1e-3,
                "tier {} step {}",
                tier, step
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Highlight never repeats back to back
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn highlight_never_repeats(
        seed in any::<u64>(),
        item_count in 2usize..12,
        steps in prop::collection::vec(1.0f64..2999.0, 1..200),
    ) {
        let items: Vec<String> = (0..item_count).map(|i| format!("item-{i}")).collect();
        let mut scheduler = HighlightScheduler::new(HighlightConfig::default(), items);
        let mut rng = Pcg32::seed_from_u64(seed);
        scheduler.mount(0.0);

        let mut previous = scheduler.state();
        let mut now = 0.0;
        for step in steps {
            now += step;
            scheduler.tick(now, &mut rng);
            let current = scheduler.state();
            prop_assert!(current.highlighted.is_some());
            if previous.is_dimming && !current.is_dimming {
                prop_assert_ne!(&previous.highlighted, &current.highlighted);
            }
            previous = current;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Upright orbit items
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn orbit_content_stays_upright(angle in 0.0f32..360.0, radius in 0.0f32..2000.0) {
        let affine = orbit_affine(angle, radius);
        let rotation = net_rotation_deg(&affine);
        prop_assert!(rotation.abs() < 1e-3, "net rotation {} at {}deg", rotation, angle);

        let offset = affine.translation;
        let tolerance = radius * 1e-5 + 1e-3;
        prop_assert!((offset.length() - radius).abs() <= tolerance);

        let expected = Vec2::from_angle(angle.to_radians()) * radius;
        prop_assert!(offset.distance(expected) <= tolerance * 2.0);
    }
}

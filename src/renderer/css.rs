//! CSS strings for a DOM host

use super::sprite::{Glow, TRON_CYAN};
use crate::sim::orbit::OrbitTransform;

/// `rotate(θ) translateX(r) rotate(-θ)`: places an orbit item while keeping it upright
pub fn orbit_transform(t: &OrbitTransform) -> String {
    format!(
        "rotate({a:.3}deg) translateX({r:.2}px) rotate({neg:.3}deg)",
        a = t.angle_deg,
        r = t.orbit_radius,
        neg = -t.angle_deg
    )
}

/// Cyan glow as a `box-shadow` value
pub fn box_shadow(glow: &Glow) -> String {
    let (r, g, b) = TRON_CYAN;
    format!(
        "0 0 {:.1}px {:.1}px rgba({r}, {g}, {b}, {:.3})",
        glow.blur, glow.spread, glow.alpha
    )
}

/// Value for the CSS `scale` property, which composes with `transform`
pub fn scale(factor: f32) -> String {
    format!("{factor:.3}")
}

/// Glow on a button that lightning is hitting
pub const TARGET_HIT_GLOW: Glow = Glow {
    blur: 20.0,
    spread: 0.0,
    alpha: 0.5,
};
pub const TARGET_HIT_SCALE: f32 = 1.25;

/// Inline style properties for a target button; empty values clear them
pub fn target_hit_style(hit: bool) -> [(&'static str, String); 2] {
    if hit {
        [
            ("scale", scale(TARGET_HIT_SCALE)),
            ("box-shadow", box_shadow(&TARGET_HIT_GLOW)),
        ]
    } else {
        [("scale", String::new()), ("box-shadow", String::new())]
    }
}

/// Trail stroke colour for a given opacity
pub fn trail_stroke(opacity: f32) -> String {
    let (r, g, b) = TRON_CYAN;
    format!("rgba({r}, {g}, {b}, {:.3})", opacity.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_orbit_transform_css() {
        let t = OrbitTransform {
            id: "orbit-btn-apps".into(),
            angle_deg: 37.0,
            orbit_radius: 120.0,
            offset: Vec2::ZERO,
            content_rotation_deg: 0.0,
        };
        assert_eq!(
            orbit_transform(&t),
            "rotate(37.000deg) translateX(120.00px) rotate(-37.000deg)"
        );
    }

    #[test]
    fn test_box_shadow_css() {
        let glow = Glow {
            blur: 6.0,
            spread: 2.0,
            alpha: 0.6,
        };
        assert_eq!(box_shadow(&glow), "0 0 6.0px 2.0px rgba(16, 249, 241, 0.600)");
        assert_eq!(trail_stroke(2.0), "rgba(16, 249, 241, 1.000)");
        assert_eq!(scale(1.25), "1.250");
    }

    #[test]
    fn test_target_hit_style() {
        let [(scale_prop, scale_value), (shadow_prop, shadow_value)] = target_hit_style(true);
        assert_eq!((scale_prop, scale_value.as_str()), ("scale", "1.250"));
        assert_eq!(shadow_prop, "box-shadow");
        assert_eq!(shadow_value, "0 0 20.0px 0.0px rgba(16, 249, 241, 0.500)");

        for (_, value) in target_hit_style(false) {
            assert!(value.is_empty());
        }
    }
}

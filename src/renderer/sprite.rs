//! Sprite generation for particles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::LIGHTNING_SPRITE_SIZE;
use crate::sim::field::{ParticleField, ParticleHandle};
use crate::sim::particle::{LightningParticle, Particle, SmokeParticle};

/// Theme accent, rgb(16, 249, 241)
pub const TRON_CYAN: (u8, u8, u8) = (16, 249, 241);

/// Sprite fill colour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "space", rename_all = "lowercase")]
pub enum SpriteColor {
    /// Hue in degrees, saturation/lightness in percent
    Hsl { h: f32, s: f32, l: f32 },
    Rgba { r: u8, g: u8, b: u8, a: f32 },
}

impl SpriteColor {
    pub fn css(&self) -> String {
        match *self {
            SpriteColor::Hsl { h, s, l } => format!("hsl({h:.1}, {s:.0}%, {l:.0}%)"),
            SpriteColor::Rgba { r, g, b, a } => format!("rgba({r}, {g}, {b}, {a:.3})"),
        }
    }
}

/// Outer glow (box-shadow style)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    pub blur: f32,
    pub spread: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Lightning,
    Smoke,
}

/// Everything the host needs to draw one particle this frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSprite {
    pub handle: ParticleHandle,
    pub kind: SpriteKind,
    pub pos: Vec2,
    /// Unscaled diameter (px)
    pub size: f32,
    pub scale: f32,
    pub opacity: f32,
    pub color: SpriteColor,
    pub glow: Option<Glow>,
}

impl ParticleSprite {
    /// Drawn diameter
    pub fn diameter(&self) -> f32 {
        self.size * self.scale
    }
}

/// Lightning fades out, grows and shifts from cyan toward blue as it travels
pub fn lightning_sprite(handle: ParticleHandle, particle: &LightningParticle) -> ParticleSprite {
    let p = particle.progress.clamp(0.0, 1.0);
    ParticleSprite {
        handle,
        kind: SpriteKind::Lightning,
        pos: particle.pos,
        size: LIGHTNING_SPRITE_SIZE,
        scale: 1.0 + p * 0.5,
        opacity: 1.0 - p,
        color: SpriteColor::Hsl {
            h: 180.0 - p * 20.0,
            s: 95.0,
            l: 60.0,
        },
        glow: Some(Glow {
            blur: 6.0 + p * 4.0,
            spread: 2.0 + p * 2.0,
            alpha: 0.6 - p * 0.4,
        }),
    }
}

pub fn smoke_sprite(handle: ParticleHandle, particle: &SmokeParticle) -> ParticleSprite {
    let (r, g, b) = particle.tint.rgb();
    ParticleSprite {
        handle,
        kind: SpriteKind::Smoke,
        pos: particle.pos,
        size: particle.radius * 2.0,
        scale: 1.0,
        opacity: particle.alpha.clamp(0.0, 1.0),
        color: SpriteColor::Rgba { r, g, b, a: 0.6 },
        glow: None,
    }
}

/// Render list for every live particle, oldest first
pub fn build_sprites(field: &ParticleField) -> Vec<ParticleSprite> {
    field
        .all()
        .map(|(handle, particle)| match particle {
            Particle::Lightning(p) => lightning_sprite(handle, p),
            Particle::Smoke(p) => smoke_sprite(handle, p),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lightning_sprite_progress_curves() {
        let mut particle = LightningParticle::new(vec![Vec2::ZERO, Vec2::new(10.0, 0.0)], 0.0, 100.0);

        particle.advance(0.0);
        let s = lightning_sprite(ParticleHandle(1), &particle);
        assert_eq!(s.opacity, 1.0);
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.color, SpriteColor::Hsl { h: 180.0, s: 95.0, l: 60.0 });

        particle.advance(50.0);
        let s = lightning_sprite(ParticleHandle(1), &particle);
        assert!((s.opacity - 0.5).abs() < 1e-6);
        assert!((s.scale - 1.25).abs() < 1e-6);
        assert!((s.diameter() - 5.0).abs() < 1e-6);
        match s.color {
            SpriteColor::Hsl { h, .. } => assert!((h - 170.0).abs() < 1e-4),
            other => panic!("unexpected color {other:?}"),
        }
        let glow = s.glow.unwrap();
        assert!((glow.blur - 8.0).abs() < 1e-6);
        assert!((glow.alpha - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_color_css() {
        let hsl = SpriteColor::Hsl { h: 170.0, s: 95.0, l: 60.0 };
        assert_eq!(hsl.css(), "hsl(170.0, 95%, 60%)");
        let rgba = SpriteColor::Rgba { r: 16, g: 249, b: 241, a: 0.6 };
        assert_eq!(rgba.css(), "rgba(16, 249, 241, 0.600)");
    }
}

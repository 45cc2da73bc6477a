//! Render lists
//!
//! The core draws nothing itself. These helpers turn simulation state into
//! plain data (sprites, CSS strings) that a canvas or DOM host can apply.

pub mod css;
pub mod sprite;

pub use sprite::{Glow, ParticleSprite, SpriteColor, SpriteKind, build_sprites};

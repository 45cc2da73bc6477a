//! Splash screen effects facade
//!
//! The one object a host talks to. The host mounts it, pushes viewport size,
//! target geometry and pointer events, and calls [`SplashEffects::tick`] once
//! per animation frame to get everything it needs to draw.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{POINTER_IDLE_MS, TARGET_HIT_DECAY_MS};
use crate::renderer::{ParticleSprite, build_sprites};
use crate::settings::Settings;
use crate::sim::field::{ParticleField, Retired, Retirement};
use crate::sim::highlight::{HighlightConfig, HighlightScheduler, HighlightState};
use crate::sim::lightning::{LightningConfig, LightningEmitter};
use crate::sim::orbit::{OrbitConfig, OrbitLayout, OrbitLayoutEngine, OrbitTransform, all_item_ids};
use crate::sim::pointer::PointerTracker;
use crate::sim::smoke::{SmokeConfig, SmokeEmitter};
use crate::sim::targets::{TargetEffects, TargetEvent, TargetRegion};
use crate::sim::trail::{PointerTrail, TrailConfig, TrailSegment};

/// Component tuning injected at construction
#[derive(Debug, Clone)]
pub struct EffectsConfig {
    pub pointer_idle_ms: f64,
    pub target_decay_ms: f64,
    pub lightning: LightningConfig,
    pub smoke: SmokeConfig,
    pub trail: TrailConfig,
    pub orbit: OrbitConfig,
    pub highlight: HighlightConfig,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            pointer_idle_ms: POINTER_IDLE_MS,
            target_decay_ms: TARGET_HIT_DECAY_MS,
            lightning: LightningConfig::default(),
            smoke: SmokeConfig::default(),
            trail: TrailConfig::default(),
            orbit: OrbitConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

/// Output of one animation frame
#[derive(Debug, Clone, Default, Serialize)]
pub struct Frame {
    pub timestamp_ms: f64,
    pub particles: Vec<ParticleSprite>,
    pub trail: Vec<TrailSegment>,
    pub orbit: Vec<OrbitTransform>,
    pub highlight: HighlightState,
    pub events: Vec<TargetEvent>,
    /// Particles removed this frame
    pub retired: Vec<Retired>,
}

/// All splash screen effects behind one mount/tick/unmount lifecycle
#[derive(Debug, Clone)]
pub struct SplashEffects {
    settings: Settings,
    rng: Pcg32,
    viewport: Vec2,
    mounted_at: Option<f64>,
    pointer: PointerTracker,
    field: ParticleField,
    lightning: LightningEmitter,
    smoke: SmokeEmitter,
    trail: PointerTrail,
    targets: Vec<TargetRegion>,
    target_fx: TargetEffects,
    orbit: OrbitLayoutEngine,
    highlight: HighlightScheduler,
    /// Highlight was re-enabled; it restarts on the next tick
    highlight_pending: bool,
}

/// NaN and negative sizes become 0
fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

impl SplashEffects {
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self::with_config(seed, settings, EffectsConfig::default())
    }

    pub fn with_config(seed: u64, settings: Settings, config: EffectsConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        // Rolled once: the ring angles stay put for the whole session
        let orbit = OrbitLayoutEngine::new(&config.orbit, &mut rng);

        Self {
            field: ParticleField::new(settings.max_particles()),
            settings,
            rng,
            viewport: Vec2::ZERO,
            mounted_at: None,
            pointer: PointerTracker::new(config.pointer_idle_ms),
            lightning: LightningEmitter::new(config.lightning),
            smoke: SmokeEmitter::new(config.smoke),
            trail: PointerTrail::new(config.trail),
            targets: Vec::new(),
            target_fx: TargetEffects::new(config.target_decay_ms),
            orbit,
            highlight: HighlightScheduler::new(config.highlight, all_item_ids()),
            highlight_pending: false,
        }
    }

    /// Start the effects. Mounting twice is a no-op.
    pub fn mount(&mut self, now: f64) {
        if self.mounted_at.is_some() {
            log::debug!("Effects already mounted");
            return;
        }
        self.mounted_at = Some(now);
        if self.settings.highlight_rotation {
            self.highlight.mount(now);
        }
        log::info!(
            "Effects mounted ({}x{}, quality {})",
            self.viewport.x,
            self.viewport.y,
            self.settings.quality.as_str()
        );
    }

    /// Stop and release everything. Returns the unhit events the host needs
    /// to clear any target highlight it still shows.
    pub fn unmount(&mut self) -> Vec<TargetEvent> {
        if self.mounted_at.take().is_none() {
            return Vec::new();
        }
        self.field.clear();
        self.trail.clear();
        self.pointer.reset();
        self.lightning.reset();
        self.smoke.reset();
        self.highlight.unmount();
        self.highlight_pending = false;
        let events = self.target_fx.clear();
        log::info!("Effects unmounted ({} targets released)", events.len());
        events
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted_at.is_some()
    }

    /// Host pushes the viewport size on resize
    pub fn supply_viewport(&mut self, width: f32, height: f32) {
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);
        self.viewport = Vec2::new(width, height);
        let layout = self.orbit.resize(width, height);
        log::info!("Viewport {}x{} (orbit size {:.1})", width, height, layout.orbit_size);
    }

    /// Host pushes current target geometry whenever it changes
    pub fn supply_targets(&mut self, targets: Vec<TargetRegion>) {
        self.targets = targets;
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32, now: f64) {
        self.pointer.pointer_moved(x, y, now);
        if self.is_mounted() && self.settings.effective_trail() && self.pointer.is_in_window() {
            self.trail.record(Vec2::new(x, y), now);
        }
    }

    pub fn pointer_entered(&mut self) {
        self.pointer.pointer_entered();
    }

    pub fn pointer_left(&mut self) {
        self.pointer.pointer_left();
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.field.set_max_particles(settings.max_particles());
        if !settings.effective_trail() {
            self.trail.clear();
        }
        if self.is_mounted() && settings.highlight_rotation != self.settings.highlight_rotation {
            self.highlight_pending = settings.highlight_rotation;
            if !settings.highlight_rotation {
                self.highlight.unmount();
            }
        }
        self.settings = settings;
    }

    /// Advance one animation frame
    pub fn tick(&mut self, now: f64) -> Frame {
        let Some(mounted_at) = self.mounted_at else {
            return Frame {
                timestamp_ms: now,
                ..Frame::default()
            };
        };
        let mut events = Vec::new();

        // Emission: sparks whenever the pointer is over the page, smoke only while it moves
        if self.pointer.is_in_window() && self.pointer.latest().is_some() {
            let pos = self.pointer.position();
            if self.settings.lightning {
                self.lightning.try_emit(
                    now,
                    pos,
                    self.viewport.x,
                    &self.targets,
                    &mut self.field,
                    &mut self.rng,
                );
            }
            if self.settings.effective_smoke() && self.pointer.is_moving(now) {
                self.smoke.try_emit(now, pos, &mut self.field, &mut self.rng);
            }
        }

        let retired = self.field.tick(now, &self.targets);
        for r in &retired {
            if let Retirement::Absorbed { target_id } = &r.reason {
                self.target_fx.absorb(target_id, now, &mut events);
            }
        }
        let active = self.field.bound_targets();
        self.target_fx.apply(&self.targets, &active, now, &mut events);

        self.trail.prune(now);
        if self.settings.highlight_rotation {
            if std::mem::take(&mut self.highlight_pending) {
                self.highlight.mount(now);
            } else {
                self.highlight.tick(now, &mut self.rng);
            }
        }

        let elapsed = if self.settings.orbit_motion() {
            now - mounted_at
        } else {
            0.0
        };

        Frame {
            timestamp_ms: now,
            particles: build_sprites(&self.field),
            trail: if self.settings.effective_trail() {
                self.trail.segments(now)
            } else {
                Vec::new()
            },
            orbit: self.orbit.transforms(elapsed),
            highlight: self.highlight.state(),
            events,
            retired,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn layout(&self) -> &OrbitLayout {
        self.orbit.layout()
    }

    pub fn highlight(&self) -> HighlightState {
        self.highlight.state()
    }

    pub fn particles(&self) -> &ParticleField {
        &self.field
    }

    pub fn targets(&self) -> &[TargetRegion] {
        &self.targets
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn target_effects(&self) -> &TargetEffects {
        &self.target_fx
    }
}

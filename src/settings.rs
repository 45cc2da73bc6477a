//! Effect settings and preferences
//!
//! Persisted in LocalStorage on the web; defaults everywhere else.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Next preset, wrapping High back to Low
    pub fn next(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 300,
            QualityPreset::High => 600,
        }
    }
}

/// Effect settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Particle budget preset
    pub quality: QualityPreset,

    // === Cursor effects ===
    /// Target-seeking lightning sparks
    pub lightning: bool,
    /// Smoke puffs behind a moving pointer
    pub smoke: bool,
    /// Fading pointer trail
    pub trail: bool,

    // === Orbit ===
    /// Rotate the highlight between buttons
    pub highlight_rotation: bool,

    // === Accessibility ===
    /// Reduced motion (no smoke/trail, orbit rings hold still)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            lightning: true,
            smoke: true,
            trail: true,

            highlight_rotation: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the per-move effects
        if preset == QualityPreset::Low {
            self.smoke = false;
            self.trail = false;
        }
    }

    /// Effective smoke (respects reduced_motion)
    pub fn effective_smoke(&self) -> bool {
        self.smoke && !self.reduced_motion
    }

    /// Effective trail (respects reduced_motion)
    pub fn effective_trail(&self) -> bool {
        self.trail && !self.reduced_motion
    }

    /// Whether orbit rings animate
    pub fn orbit_motion(&self) -> bool {
        !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.lightning && !self.effective_smoke() {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tron_orbit_settings";

    /// Parse settings JSON; unknown or missing fields fall back to defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                None
            }
        }
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self)
            .map_err(|e| log::warn!("Failed to serialize settings: {}", e))
            .ok()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Some(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

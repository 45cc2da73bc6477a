//! Seekable targets
//!
//! Target regions are host-supplied snapshots of button geometry. The core
//! never measures anything itself; it only searches and reduces what the
//! host pushed for the current frame.

use std::collections::{BTreeMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TARGET_HIT_DECAY_MS;

/// On-screen bounding box of a target at query time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRegion {
    pub id: String,
    pub center: Vec2,
    /// Half width / half height of the bounding box
    pub half_extent: Vec2,
}

impl TargetRegion {
    pub fn new(id: impl Into<String>, center: Vec2, half_extent: Vec2) -> Self {
        Self {
            id: id.into(),
            center,
            half_extent: half_extent.max(Vec2::ZERO),
        }
    }

    /// Build from a DOM-style rect (left, top, width, height)
    pub fn from_rect(id: impl Into<String>, left: f32, top: f32, width: f32, height: f32) -> Self {
        let half = Vec2::new(width, height) * 0.5;
        Self::new(id, Vec2::new(left, top) + half, half)
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.half_extent.x
    }
}

/// Nearest target center strictly closer than `max_distance`.
///
/// Ties keep the earlier target in input order.
pub fn find_nearest<'a>(
    targets: &'a [TargetRegion],
    pointer: Vec2,
    max_distance: f32,
) -> Option<&'a TargetRegion> {
    let mut best: Option<(&TargetRegion, f32)> = None;
    for target in targets {
        let d = pointer.distance(target.center);
        if d >= max_distance {
            continue;
        }
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((target, d)),
        }
    }
    best.map(|(t, _)| t)
}

/// Look up a target in the current snapshot by id
pub fn find_by_id<'a>(targets: &'a [TargetRegion], id: &str) -> Option<&'a TargetRegion> {
    targets.iter().find(|t| t.id == id)
}

/// Highlight toggles the host applies to target elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TargetEvent {
    TargetHit { id: String, timestamp_ms: f64 },
    TargetUnhit { id: String },
}

/// Hit bookkeeping for targets.
///
/// A target is highlighted while any live particle references it, and for
/// `decay_ms` after the last reference (or absorption).
#[derive(Debug, Clone)]
pub struct TargetEffects {
    /// id -> last hit time, for every currently highlighted target
    last_hit: BTreeMap<String, f64>,
    decay_ms: f64,
}

impl Default for TargetEffects {
    fn default() -> Self {
        Self::new(TARGET_HIT_DECAY_MS)
    }
}

impl TargetEffects {
    pub fn new(decay_ms: f64) -> Self {
        Self {
            last_hit: BTreeMap::new(),
            decay_ms: decay_ms.max(0.0),
        }
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        self.last_hit.contains_key(id)
    }

    pub fn highlighted(&self) -> impl Iterator<Item = &str> {
        self.last_hit.keys().map(String::as_str)
    }

    /// Record a particle absorbed by `id`
    pub fn absorb(&mut self, id: &str, now: f64, events: &mut Vec<TargetEvent>) {
        self.mark(id, now, events);
    }

    /// Reduce one frame of particle references into hit/unhit events
    pub fn apply(
        &mut self,
        targets: &[TargetRegion],
        active_ids: &HashSet<String>,
        now: f64,
        events: &mut Vec<TargetEvent>,
    ) {
        for target in targets {
            if active_ids.contains(&target.id) {
                self.mark(&target.id, now, events);
            }
        }

        let decay_ms = self.decay_ms;
        let expired: Vec<String> = self
            .last_hit
            .iter()
            .filter(|(id, last)| !active_ids.contains(*id) && now - **last > decay_ms)
            .map(|(id, _)| id.clone())
            .collect();
        for id in expired {
            self.last_hit.remove(&id);
            log::debug!("Target unhit: {}", id);
            events.push(TargetEvent::TargetUnhit { id });
        }
    }

    /// Drop every highlight, reporting the unhits
    pub fn clear(&mut self) -> Vec<TargetEvent> {
        std::mem::take(&mut self.last_hit)
            .into_keys()
            .map(|id| TargetEvent::TargetUnhit { id })
            .collect()
    }

    fn mark(&mut self, id: &str, now: f64, events: &mut Vec<TargetEvent>) {
        if self.last_hit.insert(id.to_string(), now).is_none() {
            log::debug!("Target hit: {}", id);
            events.push(TargetEvent::TargetHit {
                id: id.to_string(),
                timestamp_ms: now,
            });
        }
    }
}

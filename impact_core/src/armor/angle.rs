//! Impact angle estimation and hit-direction memory
//!
//! Armor effectiveness depends on the angle between the incoming shot and
//! the surface normal. When a hit arrives without an authoritative incoming
//! direction, the most recent recorded ray direction for the struck
//! collider is used, then the attacker position, then a default.

use crate::types::ColliderId;
use glam::Vec3;
use std::collections::HashMap;

/// Angles are clamped here before any trigonometry; cos(90) would make the
/// effective thickness blow up.
pub const MAX_IMPACT_ANGLE_DEG: f32 = 89.0;

/// Default lifetime of a recorded hit direction
pub const DEFAULT_DIRECTION_MAX_AGE_S: f32 = 0.5;

/// Angle of incidence in degrees between a surface normal and an incoming
/// direction, clamped to `[0, 89]`. 0 means a perpendicular hit (armor at
/// full rated thickness).
pub fn impact_angle_deg(hit_normal: Vec3, incoming: Vec3) -> f32 {
    let normal = hit_normal.normalize_or_zero();
    let direction = incoming.normalize_or_zero();
    if normal == Vec3::ZERO || direction == Vec3::ZERO {
        return 0.0;
    }
    let cos = normal.dot(-direction).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees();
    if angle.is_nan() {
        return 0.0;
    }
    angle.clamp(0.0, MAX_IMPACT_ANGLE_DEG)
}

#[derive(Debug, Clone, Copy)]
struct DirectionRecord {
    direction: Vec3,
    recorded_at: f32,
}

/// Short-lived memory of the last incoming ray direction per collider.
///
/// Written by traversal on every contact, read back with lazy expiry -
/// stale entries are dropped on recall, there is no background sweep.
/// Last writer wins.
#[derive(Debug, Clone)]
pub struct HitDirectionMemory {
    max_age_s: f32,
    entries: HashMap<ColliderId, DirectionRecord>,
}

impl Default for HitDirectionMemory {
    fn default() -> Self {
        HitDirectionMemory::new(DEFAULT_DIRECTION_MAX_AGE_S)
    }
}

impl HitDirectionMemory {
    pub fn new(max_age_s: f32) -> Self {
        HitDirectionMemory {
            max_age_s: max_age_s.max(0.0),
            entries: HashMap::new(),
        }
    }

    /// Record the incoming direction of a ray contact on a collider
    pub fn record(&mut self, collider: ColliderId, direction: Vec3, now: f32) {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return;
        }
        self.entries.insert(
            collider,
            DirectionRecord {
                direction,
                recorded_at: now,
            },
        );
    }

    /// Most recent direction for a collider, if young enough. Expired
    /// entries are removed on the way out.
    pub fn recall(&mut self, collider: ColliderId, now: f32) -> Option<Vec3> {
        match self.entries.get(&collider) {
            Some(record) if now - record.recorded_at <= self.max_age_s => Some(record.direction),
            Some(_) => {
                self.entries.remove(&collider);
                None
            }
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve the best-known incoming direction for a hit.
///
/// Order: recorded ray direction for the struck collider, then the vector
/// from the attacker position to the hit point. `None` means the caller
/// should fall back to its default angle.
pub fn estimate_incoming(
    collider: Option<ColliderId>,
    attacker_position: Option<Vec3>,
    hit_point: Vec3,
    memory: &mut HitDirectionMemory,
    now: f32,
) -> Option<Vec3> {
    if let Some(collider) = collider {
        if let Some(direction) = memory.recall(collider, now) {
            return Some(direction);
        }
    }
    if let Some(position) = attacker_position {
        let direction = (hit_point - position).normalize_or_zero();
        if direction != Vec3::ZERO {
            return Some(direction);
        }
    }
    None
}

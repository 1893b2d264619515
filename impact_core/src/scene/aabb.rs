//! AabbScene - reference scene over axis-aligned box colliders

use super::{CombatScene, RayHit};
use crate::combat::DamageReceiver;
use crate::traversal::PenetrationMaterial;
use crate::types::{ColliderId, Region};
use glam::Vec3;

const SURFACE_EPSILON: f32 = 1e-4;

/// Handle to a receiver registered with the scene. One receiver can be
/// bound to several colliders (hull + turret, torso + limbs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverHandle(usize);

struct AabbBody {
    id: ColliderId,
    min: Vec3,
    max: Vec3,
    material: Option<PenetrationMaterial>,
    region: Option<Region>,
    receiver: Option<usize>,
}

impl AabbBody {
    fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x - SURFACE_EPSILON
            && point.x <= self.max.x + SURFACE_EPSILON
            && point.y >= self.min.y - SURFACE_EPSILON
            && point.y <= self.max.y + SURFACE_EPSILON
            && point.z >= self.min.z - SURFACE_EPSILON
            && point.z <= self.max.z + SURFACE_EPSILON
    }
}

/// Axis-aligned box scene with nearest-first raycasts.
#[derive(Default)]
pub struct AabbScene {
    bodies: Vec<AabbBody>,
    receivers: Vec<Box<dyn DamageReceiver>>,
    next_id: u64,
}

impl AabbScene {
    pub fn new() -> Self {
        AabbScene::default()
    }

    /// Add a box collider spanning `min..max`
    pub fn add_box(&mut self, min: Vec3, max: Vec3) -> ColliderId {
        self.next_id += 1;
        let id = ColliderId(self.next_id);
        self.bodies.push(AabbBody {
            id,
            min: min.min(max),
            max: min.max(max),
            material: None,
            region: None,
            receiver: None,
        });
        id
    }

    pub fn set_material(&mut self, collider: ColliderId, material: PenetrationMaterial) {
        if let Some(body) = self.body_mut(collider) {
            body.material = Some(material);
        }
    }

    pub fn set_region(&mut self, collider: ColliderId, region: Region) {
        if let Some(body) = self.body_mut(collider) {
            body.region = Some(region);
        }
    }

    pub fn add_receiver(&mut self, receiver: Box<dyn DamageReceiver>) -> ReceiverHandle {
        self.receivers.push(receiver);
        ReceiverHandle(self.receivers.len() - 1)
    }

    pub fn bind_receiver(&mut self, collider: ColliderId, handle: ReceiverHandle) {
        if let Some(body) = self.body_mut(collider) {
            body.receiver = Some(handle.0);
        }
    }

    fn body(&self, collider: ColliderId) -> Option<&AabbBody> {
        self.bodies.iter().find(|b| b.id == collider)
    }

    fn body_mut(&mut self, collider: ColliderId) -> Option<&mut AabbBody> {
        self.bodies.iter_mut().find(|b| b.id == collider)
    }
}

impl CombatScene for AabbScene {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        if max_distance <= 0.0 {
            return None;
        }
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let mut best: Option<RayHit> = None;
        for body in &self.bodies {
            // Rays from inside a collider do not hit it
            if body.contains(origin) {
                continue;
            }
            if let Some((t, point, normal)) =
                ray_box(origin, direction, max_distance, body.min, body.max)
            {
                match &best {
                    Some(hit) if hit.distance <= t => {}
                    _ => {
                        best = Some(RayHit {
                            point,
                            normal,
                            collider: body.id,
                            distance: t,
                        });
                    }
                }
            }
        }
        best
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<ColliderId> {
        self.bodies
            .iter()
            .filter(|body| {
                let closest = center.clamp(body.min, body.max);
                (closest - center).length() <= radius
            })
            .map(|body| body.id)
            .collect()
    }

    fn material_of(&self, collider: ColliderId) -> Option<PenetrationMaterial> {
        self.body(collider).and_then(|b| b.material)
    }

    fn region_of(&self, collider: ColliderId) -> Option<Region> {
        self.body(collider).and_then(|b| b.region)
    }

    fn receiver_mut(&mut self, collider: ColliderId) -> Option<&mut dyn DamageReceiver> {
        let index = self.body(collider)?.receiver?;
        self.receivers
            .get_mut(index)
            .map(|r| r.as_mut() as &mut dyn DamageReceiver)
    }
}

/// Slab-method ray/box intersection. Returns the entry distance, point and
/// face normal for a ray of normalized `direction`.
fn ray_box(
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    min: Vec3,
    max: Vec3,
) -> Option<(f32, Vec3, Vec3)> {
    let mut tmin = 0.0_f32;
    let mut tmax = max_distance;
    let mut entry_normal = Vec3::ZERO;

    for axis in 0..3 {
        let d = direction[axis];
        let s = origin[axis];

        if d.abs() < 1e-8 {
            if s < min[axis] || s > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (min[axis] - s) * inv;
        let mut t2 = (max[axis] - s) * inv;

        let mut normal = Vec3::ZERO;
        normal[axis] = if d > 0.0 { -1.0 } else { 1.0 };

        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
            normal = -normal;
        }

        if t1 > tmin {
            tmin = t1;
            entry_normal = normal;
        }
        tmax = tmax.min(t2);

        if tmin > tmax {
            return None;
        }
    }

    // No entry face crossed: the origin is inside the box
    if entry_normal == Vec3::ZERO {
        return None;
    }

    Some((tmin, origin + direction * tmin, entry_normal))
}

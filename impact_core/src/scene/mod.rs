//! Scene collaborator - ray queries and collider lookups
//!
//! The pipeline never talks to a physics engine directly. It goes through
//! this trait, which an engine adapter implements; [`AabbScene`] is the
//! reference implementation used by the tests and the example driver.

mod aabb;

pub use aabb::{AabbScene, ReceiverHandle};

use crate::combat::DamageReceiver;
use crate::traversal::PenetrationMaterial;
use crate::types::{ColliderId, Region};
use glam::Vec3;

/// One ray contact
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub collider: ColliderId,
    /// Distance from the ray origin, meters
    pub distance: f32,
}

/// Everything traversal needs from the world.
///
/// Contracts:
/// - `raycast` returns the nearest contact within `max_distance`, or `None`
///   for a non-positive distance. Rays starting inside a collider do not
///   hit that collider (matching engine raycast semantics).
/// - `material_of`/`region_of` are pure lookups of authored data.
/// - `receiver_mut` resolves the damage receiver bound to a collider, if
///   any; colliders without one are inert scenery.
pub trait CombatScene {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Colliders within `radius` of `center` (hitbox probes)
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<ColliderId>;

    fn material_of(&self, collider: ColliderId) -> Option<PenetrationMaterial>;

    fn region_of(&self, collider: ColliderId) -> Option<Region>;

    fn receiver_mut(&mut self, collider: ColliderId) -> Option<&mut dyn DamageReceiver>;
}

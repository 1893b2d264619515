//! Ballistic projectiles - fixed-timestep flight with a hit scan per step
//!
//! Unlike the laser path, a physical projectile stops at its first
//! qualifying contact; it never passes through multiple objects. Owner
//! colliders are still transparent. The flight model is gravity plus a
//! velocity-squared drag term.

use crate::armor::HitDirectionMemory;
use crate::config::CombatConstants;
use crate::damage::{DamagePacket, TravelFalloff};
use crate::scene::CombatScene;
use crate::traversal::laser::HitResolution;
use crate::types::{ColliderId, DamageType, EntityId, FactionId, Region, WeaponTag};
use glam::Vec3;
use tracing::trace;

/// State of a projectile after a step
#[derive(Debug, Clone)]
pub enum ProjectileStatus {
    InFlight,
    /// Terminated on its first qualifying contact
    Impacted(HitResolution),
    /// Despawned without hitting anything (slow, old or out of range)
    Expired,
}

/// One ballistic round in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub position: Vec3,
    pub velocity: Vec3,
    spawn_position: Vec3,
    spawn_time: f32,
    /// Damage before falloff and armor
    pub damage: f32,
    /// Penetration budget, millimeters
    pub penetration_mm: f32,
    pub damage_type: DamageType,
    pub weapon: WeaponTag,
    pub attacker: EntityId,
    pub attacker_faction: Option<FactionId>,
    /// Colliders belonging to the shooter; transparent to the round
    pub owners: Vec<ColliderId>,
}

impl Projectile {
    pub fn new(
        position: Vec3,
        velocity: Vec3,
        spawn_time: f32,
        damage: f32,
        penetration_mm: f32,
    ) -> Self {
        Projectile {
            position,
            velocity,
            spawn_position: position,
            spawn_time,
            damage,
            penetration_mm: penetration_mm.max(0.0),
            damage_type: DamageType::Kinetic,
            weapon: WeaponTag::Unknown,
            attacker: EntityId(0),
            attacker_faction: None,
            owners: Vec::new(),
        }
    }

    pub fn with_weapon(mut self, weapon: WeaponTag) -> Self {
        self.weapon = weapon;
        self
    }

    pub fn with_attacker(mut self, attacker: EntityId) -> Self {
        self.attacker = attacker;
        self
    }

    pub fn with_faction(mut self, faction: FactionId) -> Self {
        self.attacker_faction = Some(faction);
        self
    }

    pub fn with_owners(mut self, owners: Vec<ColliderId>) -> Self {
        self.owners = owners;
        self
    }

    /// Straight-line distance from the spawn point, meters
    pub fn distance_travelled(&self) -> f32 {
        (self.position - self.spawn_position).length()
    }

    /// Advance one physics step of `dt` seconds and scan the swept segment.
    ///
    /// `now` is the simulation time at the end of the step.
    pub fn step(
        &mut self,
        dt: f32,
        falloff: &TravelFalloff,
        scene: &mut dyn CombatScene,
        memory: &mut HitDirectionMemory,
        constants: &CombatConstants,
        now: f32,
    ) -> ProjectileStatus {
        let ballistics = &constants.ballistics;

        // Gravity, then velocity-squared drag
        let mut velocity = self.velocity;
        velocity.y += ballistics.gravity_mps2 * dt;
        let speed = velocity.length();
        if speed > 0.1 {
            let drag = ballistics.drag_coefficient * speed * speed;
            velocity -= velocity.normalize() * drag * dt;
        }
        let new_position = self.position + velocity * dt;

        // Scan the swept segment, skipping owner colliders
        let skin = constants.traversal.skin_width_m;
        let mut segment_origin = self.position;
        let mut segment_remaining = (new_position - segment_origin).length();
        let segment_direction = (new_position - segment_origin).normalize_or_zero();

        if segment_direction != Vec3::ZERO {
            while segment_remaining > 0.0 {
                let hit = match scene.raycast(segment_origin, segment_direction, segment_remaining) {
                    Some(hit) => hit,
                    None => break,
                };

                if self.owners.contains(&hit.collider) {
                    segment_origin = hit.point + segment_direction * skin;
                    segment_remaining -= hit.distance + skin;
                    continue;
                }

                let distance = (hit.point - self.spawn_position).length();
                let elapsed = (now - self.spawn_time).max(0.0);
                let factors = falloff.evaluate(distance, elapsed);

                memory.record(hit.collider, segment_direction, now);

                let region = scene.region_of(hit.collider).unwrap_or(Region::Unknown);
                let packet = DamagePacket::new(
                    self.attacker,
                    EntityId(0),
                    self.damage * factors.damage,
                    self.penetration_mm * factors.penetration,
                    self.damage_type,
                    self.weapon,
                )
                .with_impact(hit.point, hit.normal)
                .with_incoming(segment_direction)
                .with_region(region)
                .with_collider(hit.collider)
                .with_attacker_position(self.spawn_position)
                .with_time(now);
                let packet = match self.attacker_faction {
                    Some(faction) => packet.with_faction(faction),
                    None => packet,
                };

                let report = scene
                    .receiver_mut(hit.collider)
                    .map(|receiver| receiver.take_damage(&packet));

                trace!(
                    collider = hit.collider.0,
                    distance,
                    "projectile impact"
                );
                self.position = hit.point;
                self.velocity = velocity;
                // Physical rounds stop at their first qualifying contact
                return ProjectileStatus::Impacted(HitResolution {
                    collider: hit.collider,
                    point: hit.point,
                    distance,
                    report,
                });
            }
        }

        self.position = new_position;
        self.velocity = velocity;

        let lifetime = now - self.spawn_time;
        if velocity.length() < ballistics.min_speed_mps
            || lifetime > ballistics.max_lifetime_s
            || self.distance_travelled() > ballistics.max_range_m
        {
            trace!(lifetime, "projectile expired");
            return ProjectileStatus::Expired;
        }

        ProjectileStatus::InFlight
    }
}

//! Laser traversal - one continuous ray punching through materials
//!
//! A laser shot resolves in a single invocation: cast, resolve the nearest
//! contact, spend budget on its material, advance, repeat. Owner colliders
//! are transparent (range is spent, budget and damage are not). The loop is
//! bounded by a hard hit cap so degenerate geometry cannot stall the frame.
//! Contacts are processed strictly in ray-distance order.

use crate::armor::HitDirectionMemory;
use crate::combat::DamageReport;
use crate::config::CombatConstants;
use crate::damage::{DamagePacket, TravelFalloff};
use crate::scene::CombatScene;
use crate::types::{ColliderId, DamageType, EntityId, FactionId, Region, WeaponTag};
use glam::Vec3;
use rand::Rng;
use tracing::trace;

/// One laser firing event
#[derive(Debug, Clone)]
pub struct LaserShot {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Maximum travel distance, meters
    pub range: f32,
    /// Damage before falloff and armor
    pub damage: f32,
    /// Initial penetration budget, millimeters
    pub penetration_mm: f32,
    pub damage_type: DamageType,
    pub weapon: WeaponTag,
    pub attacker: EntityId,
    pub attacker_faction: Option<FactionId>,
    /// Beam propagation speed for time falloff; 0 = instantaneous
    pub beam_speed: f32,
    /// Colliders belonging to the shooter; transparent to the shot
    pub owners: Vec<ColliderId>,
}

impl LaserShot {
    pub fn new(origin: Vec3, direction: Vec3, range: f32, damage: f32, penetration_mm: f32) -> Self {
        LaserShot {
            origin,
            direction,
            range,
            damage,
            penetration_mm,
            damage_type: DamageType::Laser,
            weapon: WeaponTag::Unknown,
            attacker: EntityId(0),
            attacker_faction: None,
            beam_speed: 0.0,
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

    pub fn with_beam_speed(mut self, beam_speed: f32) -> Self {
        self.beam_speed = beam_speed;
        self
    }

    pub fn with_owners(mut self, owners: Vec<ColliderId>) -> Self {
        self.owners = owners;
        self
    }
}

/// Why a traversal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Ray left the world or ran out of range
    OutOfRange,
    /// Penetration budget fell below the epsilon
    BudgetExhausted,
    /// Struck a surface with no penetration material
    Absorbed,
    /// Hard iteration cap reached (degenerate geometry guard)
    HitCapReached,
}

/// One resolved contact of a shot
#[derive(Debug, Clone)]
pub struct HitResolution {
    pub collider: ColliderId,
    pub point: Vec3,
    /// Cumulative travel distance at this contact, meters
    pub distance: f32,
    /// Resolution report, `None` when the collider had no damage receiver
    pub report: Option<DamageReport>,
}

/// Everything a shot did
#[derive(Debug, Clone)]
pub struct TraversalOutcome {
    pub hits: Vec<HitResolution>,
    pub termination: Termination,
}

impl TraversalOutcome {
    /// Total damage actually applied across all contacts
    pub fn delivered_damage(&self) -> f32 {
        self.hits
            .iter()
            .filter_map(|h| h.report.as_ref())
            .map(|r| r.damage_out)
            .sum()
    }
}

/// Fire a laser through the scene with a thread-local RNG
pub fn fire_laser(
    shot: &LaserShot,
    falloff: &TravelFalloff,
    scene: &mut dyn CombatScene,
    memory: &mut HitDirectionMemory,
    constants: &CombatConstants,
    now: f32,
) -> TraversalOutcome {
    let mut rng = rand::thread_rng();
    fire_laser_with_rng(shot, falloff, scene, memory, constants, now, &mut rng)
}

/// Fire a laser with a provided RNG (deterministic deflection for tests)
pub fn fire_laser_with_rng(
    shot: &LaserShot,
    falloff: &TravelFalloff,
    scene: &mut dyn CombatScene,
    memory: &mut HitDirectionMemory,
    constants: &CombatConstants,
    now: f32,
    rng: &mut impl Rng,
) -> TraversalOutcome {
    let mut direction = shot.direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return TraversalOutcome {
            hits: Vec::new(),
            termination: Termination::OutOfRange,
        };
    }

    let skin = constants.traversal.skin_width_m;
    let mut origin = shot.origin;
    let mut remaining_range = shot.range;
    let mut remaining_pen = shot.penetration_mm.max(0.0);
    let mut travelled = 0.0_f32;
    let mut hits = Vec::new();
    let mut termination = Termination::HitCapReached;

    for _ in 0..constants.traversal.max_hits {
        let hit = match scene.raycast(origin, direction, remaining_range) {
            Some(hit) => hit,
            None => {
                termination = Termination::OutOfRange;
                break;
            }
        };

        if shot.owners.contains(&hit.collider) {
            // Self-hits are transparent: spend range, nothing else
            origin = hit.point + direction * skin;
            remaining_range -= hit.distance + skin;
            travelled += hit.distance + skin;
            continue;
        }

        let distance_at_hit = travelled + hit.distance;
        let elapsed = if shot.beam_speed > 0.0 {
            distance_at_hit / shot.beam_speed
        } else {
            0.0
        };
        let factors = falloff.evaluate(distance_at_hit, elapsed);

        memory.record(hit.collider, direction, now);

        let region = scene.region_of(hit.collider).unwrap_or(Region::Unknown);
        let packet = DamagePacket::new(
            shot.attacker,
            EntityId(0),
            shot.damage * factors.damage,
            remaining_pen * factors.penetration,
            shot.damage_type,
            shot.weapon,
        )
        .with_impact(hit.point, hit.normal)
        .with_incoming(direction)
        .with_region(region)
        .with_collider(hit.collider)
        .with_attacker_position(shot.origin)
        .with_time(now);
        let packet = match shot.attacker_faction {
            Some(faction) => packet.with_faction(faction),
            None => packet,
        };

        let report = scene
            .receiver_mut(hit.collider)
            .map(|receiver| receiver.take_damage(&packet));
        if report.is_none() {
            trace!(collider = hit.collider.0, "contact without receiver");
        }
        hits.push(HitResolution {
            collider: hit.collider,
            point: hit.point,
            distance: distance_at_hit,
            report,
        });

        let material = match scene.material_of(hit.collider) {
            Some(material) => material,
            None => {
                // Un-modeled surfaces fully absorb the shot
                termination = Termination::Absorbed;
                break;
            }
        };
        let pass = material.apply_loss(remaining_pen, shot.beam_speed, direction, rng);
        remaining_pen = pass.penetration_mm;
        if remaining_pen < constants.traversal.min_penetration_mm {
            termination = Termination::BudgetExhausted;
            break;
        }

        origin = hit.point + direction * skin;
        remaining_range -= hit.distance + skin;
        travelled += hit.distance + skin;
        direction = pass.direction;
    }

    trace!(
        hits = hits.len(),
        remaining_pen,
        ?termination,
        "laser traversal finished"
    );
    TraversalOutcome { hits, termination }
}

//! DamagePacket - immutable record of a single damage event

use crate::types::{ColliderId, DamageType, EntityId, FactionId, Region, WeaponTag};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One damage event, frozen at the moment of impact.
///
/// A packet is never mutated in place: every transformation goes through a
/// `with_*` method and yields a new value, so the original event stays
/// traceable through the whole resolution chain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DamagePacket {
    /// Damage amount, travel falloff already applied by the caller
    pub damage: f32,
    /// Remaining penetration capacity (mm-equivalent) at this contact
    pub penetration_mm: f32,
    pub damage_type: DamageType,
    pub weapon: WeaponTag,
    /// World-space impact point
    pub hit_point: Vec3,
    /// Surface normal at the impact point
    pub hit_normal: Vec3,
    /// Struck region, `Region::Unknown` when no hitbox resolved it
    pub region: Region,
    pub attacker: EntityId,
    pub victim: EntityId,
    /// Attacker faction, if known (consulted by the friendly-fire gate)
    pub attacker_faction: Option<FactionId>,
    /// Attacker world position, if known (angle estimation fallback)
    pub attacker_position: Option<Vec3>,
    /// Resolved incoming ray direction, if known
    pub incoming_dir: Option<Vec3>,
    /// Struck collider, if the hit came through the scene
    pub collider: Option<ColliderId>,
    /// Simulation time of the hit (seconds)
    pub time: f32,
}

impl DamagePacket {
    /// Create a packet with the mandatory fields; everything else defaults
    pub fn new(
        attacker: EntityId,
        victim: EntityId,
        damage: f32,
        penetration_mm: f32,
        damage_type: DamageType,
        weapon: WeaponTag,
    ) -> Self {
        DamagePacket {
            damage: damage.max(0.0),
            penetration_mm: penetration_mm.max(0.0),
            damage_type,
            weapon,
            hit_point: Vec3::ZERO,
            hit_normal: Vec3::ZERO,
            region: Region::Unknown,
            attacker,
            victim,
            attacker_faction: None,
            attacker_position: None,
            incoming_dir: None,
            collider: None,
            time: 0.0,
        }
    }

    /// New packet with a different damage amount (clamped >= 0)
    pub fn with_damage(self, damage: f32) -> Self {
        DamagePacket {
            damage: damage.max(0.0),
            ..self
        }
    }

    /// New packet with a different penetration budget (clamped >= 0)
    pub fn with_penetration(self, penetration_mm: f32) -> Self {
        DamagePacket {
            penetration_mm: penetration_mm.max(0.0),
            ..self
        }
    }

    /// New packet with the impact point and surface normal set
    pub fn with_impact(self, hit_point: Vec3, hit_normal: Vec3) -> Self {
        DamagePacket {
            hit_point,
            hit_normal,
            ..self
        }
    }

    /// New packet with the struck region set
    pub fn with_region(self, region: Region) -> Self {
        DamagePacket { region, ..self }
    }

    /// New packet with the victim set (receivers stamp themselves in)
    pub fn with_victim(self, victim: EntityId) -> Self {
        DamagePacket { victim, ..self }
    }

    /// New packet with the attacker faction set
    pub fn with_faction(self, faction: FactionId) -> Self {
        DamagePacket {
            attacker_faction: Some(faction),
            ..self
        }
    }

    /// New packet with the attacker world position set
    pub fn with_attacker_position(self, position: Vec3) -> Self {
        DamagePacket {
            attacker_position: Some(position),
            ..self
        }
    }

    /// New packet with the resolved incoming direction set
    pub fn with_incoming(self, direction: Vec3) -> Self {
        DamagePacket {
            incoming_dir: Some(direction),
            ..self
        }
    }

    /// New packet with the struck collider set
    pub fn with_collider(self, collider: ColliderId) -> Self {
        DamagePacket {
            collider: Some(collider),
            ..self
        }
    }

    /// New packet stamped with a simulation time
    pub fn with_time(self, time: f32) -> Self {
        DamagePacket { time, ..self }
    }

    /// Check if this packet carries any damage
    pub fn has_damage(&self) -> bool {
        self.damage > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_packet() -> DamagePacket {
        DamagePacket::new(
            EntityId(1),
            EntityId(2),
            100.0,
            120.0,
            DamageType::Kinetic,
            WeaponTag::Rifle,
        )
    }

    #[test]
    fn test_negative_inputs_clamped() {
        let packet = DamagePacket::new(
            EntityId(1),
            EntityId(2),
            -5.0,
            -10.0,
            DamageType::Kinetic,
            WeaponTag::Unknown,
        );
        assert!((packet.damage - 0.0).abs() < f32::EPSILON);
        assert!((packet.penetration_mm - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_functional_update_leaves_original_intact() {
        let packet = base_packet();
        let scaled = packet.with_damage(40.0);
        assert!((packet.damage - 100.0).abs() < f32::EPSILON);
        assert!((scaled.damage - 40.0).abs() < f32::EPSILON);
        // Unrelated fields carried over
        assert_eq!(scaled.victim, packet.victim);
        assert!((scaled.penetration_mm - 120.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_with_damage_clamps_negative() {
        let packet = base_packet().with_damage(-1.0);
        assert!((packet.damage - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_region_defaults_to_unknown() {
        let packet = base_packet();
        assert_eq!(packet.region, Region::Unknown);
    }
}

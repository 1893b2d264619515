//! ArmoredTarget - the standard damage receiver
//!
//! A receiver owns its modifier chain (built once at construction), its hit
//! point pools and its telemetry observer. `take_damage` is the single
//! entry point the rest of the pipeline delivers packets through.

use super::report::DamageReport;
use crate::armor::{
    body_region_from_height, building_section_from_normal, vehicle_section_from_direction,
};
use crate::damage::DamagePacket;
use crate::health::{HealthPool, SectionHealth};
use crate::modifier::{DamageChain, DamageModifier};
use crate::telemetry::{DamageObserver, ImpactEvent, NullObserver};
use crate::types::{EntityId, FactionId, Region};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Anything that can be dealt damage
pub trait DamageReceiver {
    fn take_damage(&mut self, packet: &DamagePacket) -> DamageReport;
}

/// Target category, selects the geometric region fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetCategory {
    Humanoid,
    Vehicle,
    Building,
}

/// World-space frame of a target, used when no hitbox resolved the region
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetFrame {
    /// Base position (feet / hull bottom)
    pub origin: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    /// Height along `up`, meters
    pub height: f32,
}

impl Default for TargetFrame {
    fn default() -> Self {
        TargetFrame {
            origin: Vec3::ZERO,
            forward: Vec3::Z,
            up: Vec3::Y,
            height: 1.8,
        }
    }
}

/// The standard receiver: identity, frame, chain, pools, observer.
pub struct ArmoredTarget {
    pub id: EntityId,
    pub faction: FactionId,
    pub category: TargetCategory,
    pub frame: TargetFrame,
    chain: DamageChain,
    pub health: HealthPool,
    pub sections: Option<SectionHealth>,
    observer: Arc<dyn DamageObserver>,
}

impl ArmoredTarget {
    pub fn new(id: EntityId, faction: FactionId, category: TargetCategory, max_health: f32) -> Self {
        ArmoredTarget {
            id,
            faction,
            category,
            frame: TargetFrame::default(),
            chain: DamageChain::new(),
            health: HealthPool::new(max_health),
            sections: None,
            observer: Arc::new(NullObserver),
        }
    }

    pub fn with_frame(mut self, frame: TargetFrame) -> Self {
        self.frame = frame;
        self
    }

    /// Append a modifier; chain order is registration order
    pub fn with_modifier(mut self, modifier: Box<dyn DamageModifier>) -> Self {
        self.chain.push(modifier);
        self
    }

    pub fn with_sections(mut self, sections: SectionHealth) -> Self {
        self.sections = Some(sections);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn DamageObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Region for this hit: the packet's region when a hitbox resolved one,
    /// otherwise a geometric guess from the target frame.
    fn resolve_region(&self, packet: &DamagePacket) -> Region {
        if packet.region != Region::Unknown {
            return packet.region;
        }
        match self.category {
            TargetCategory::Humanoid => {
                let height = self.frame.height.max(f32::EPSILON);
                let relative = (packet.hit_point - self.frame.origin).dot(self.frame.up) / height;
                Region::Body(body_region_from_height(relative))
            }
            TargetCategory::Vehicle => {
                let to_attacker = packet
                    .attacker_position
                    .map(|p| p - packet.hit_point)
                    .or_else(|| packet.incoming_dir.map(|d| -d))
                    .unwrap_or(self.frame.forward);
                Region::Vehicle(vehicle_section_from_direction(
                    to_attacker,
                    self.frame.forward,
                    self.frame.up,
                ))
            }
            TargetCategory::Building => {
                Region::Building(building_section_from_normal(packet.hit_normal, self.frame.up))
            }
        }
    }
}

impl DamageReceiver for ArmoredTarget {
    fn take_damage(&mut self, packet: &DamagePacket) -> DamageReport {
        let region = self.resolve_region(packet);
        let packet = packet.with_region(region).with_victim(self.id);

        let outcome = self.chain.apply(&packet, packet.damage);

        if let Some((chain_index, armor)) = &outcome.armor {
            self.observer.on_impact(&ImpactEvent {
                victim: self.id,
                region,
                angle_deg: armor.angle_deg,
                penetration_mm: armor.penetration_mm,
                effective_thickness_mm: armor.effective_thickness_mm,
                damage_in: packet.damage,
                damage_out: outcome.damage,
                classification: armor.classification,
                chain_index: *chain_index,
                weapon: packet.weapon,
                damage_type: packet.damage_type,
                time: packet.time,
            });
        }

        let mut section_destroyed = None;
        if let Some(sections) = self.sections.as_mut() {
            if sections.apply_damage(region, outcome.damage).destroyed {
                section_destroyed = Some(region);
            }
        }
        if let Some(region) = section_destroyed {
            self.chain.notify_section_destroyed(region);
        }

        let health_before = self.health.current();
        let applied = self.health.apply_damage(outcome.damage);

        let report = DamageReport {
            damage_in: packet.damage,
            damage_out: outcome.damage,
            region,
            steps: outcome.steps,
            armor: outcome.armor.map(|(_, resolution)| resolution),
            health_before,
            health_after: self.health.current(),
            section_destroyed,
            killing_blow: applied.killing_blow,
        };
        debug!(victim = self.id.0, "{}", report.summary());
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::armor::{ArmorEntry, ArmorModifier, ArmorProfile};
    use crate::config::PenetrationConstants;
    use crate::modifier::{SectionModifier, SectionRule};
    use crate::types::{BodyRegion, DamageType, VehicleSection, WeaponTag};

    fn kinetic_packet(damage: f32, penetration_mm: f32) -> DamagePacket {
        DamagePacket::new(
            EntityId(1),
            EntityId(2),
            damage,
            penetration_mm,
            DamageType::Kinetic,
            WeaponTag::Rifle,
        )
    }

    #[test]
    fn test_bare_target_takes_full_damage() {
        let mut target =
            ArmoredTarget::new(EntityId(2), FactionId(1), TargetCategory::Humanoid, 100.0);
        let report = target.take_damage(&kinetic_packet(30.0, 0.0));
        assert!((report.damage_out - 30.0).abs() < f32::EPSILON);
        assert!((target.health.current() - 70.0).abs() < f32::EPSILON);
        assert!(!report.killing_blow);
    }

    #[test]
    fn test_killing_blow_reported() {
        let mut target =
            ArmoredTarget::new(EntityId(2), FactionId(1), TargetCategory::Humanoid, 25.0);
        let report = target.take_damage(&kinetic_packet(30.0, 0.0));
        assert!(report.killing_blow);
        assert!(!target.health.is_alive());

        // Dead targets are inert
        let again = target.take_damage(&kinetic_packet(30.0, 0.0));
        assert!(!again.killing_blow);
        assert!((again.health_after - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_humanoid_region_fallback_by_height() {
        let mut target =
            ArmoredTarget::new(EntityId(2), FactionId(1), TargetCategory::Humanoid, 100.0)
                .with_frame(TargetFrame {
                    origin: Vec3::ZERO,
                    forward: Vec3::Z,
                    up: Vec3::Y,
                    height: 2.0,
                });
        let packet = kinetic_packet(10.0, 0.0).with_impact(Vec3::new(0.0, 1.9, 0.0), Vec3::Z);
        let report = target.take_damage(&packet);
        assert_eq!(report.region, Region::Body(BodyRegion::Head));
    }

    #[test]
    fn test_vehicle_region_fallback_by_attacker_direction() {
        let mut target =
            ArmoredTarget::new(EntityId(2), FactionId(1), TargetCategory::Vehicle, 500.0);
        let packet = kinetic_packet(10.0, 50.0)
            .with_impact(Vec3::ZERO, Vec3::Z)
            .with_attacker_position(Vec3::new(0.0, 0.0, 20.0));
        let report = target.take_damage(&packet);
        assert_eq!(report.region, Region::Vehicle(VehicleSection::Front));
    }

    #[test]
    fn test_explicit_region_wins_over_fallback() {
        let mut target =
            ArmoredTarget::new(EntityId(2), FactionId(1), TargetCategory::Vehicle, 500.0);
        let packet = kinetic_packet(10.0, 50.0)
            .with_region(Region::Vehicle(VehicleSection::Turret))
            .with_attacker_position(Vec3::new(0.0, 0.0, 20.0));
        let report = target.take_damage(&packet);
        assert_eq!(report.region, Region::Vehicle(VehicleSection::Turret));
    }

    #[test]
    fn test_armor_chain_and_report() {
        let profile = ArmorProfile::new(vec![ArmorEntry::new(
            Region::Body(BodyRegion::Torso),
            100.0,
        )]);
        let mut target =
            ArmoredTarget::new(EntityId(2), FactionId(1), TargetCategory::Humanoid, 200.0)
                .with_modifier(Box::new(ArmorModifier::new(
                    profile,
                    PenetrationConstants::default(),
                )));

        // Full pen at 0 degrees: full damage through
        let packet = kinetic_packet(100.0, 120.0)
            .with_region(Region::Body(BodyRegion::Torso))
            .with_impact(Vec3::ZERO, Vec3::Z)
            .with_incoming(-Vec3::Z);
        let report = target.take_damage(&packet);
        assert!((report.damage_out - 100.0).abs() < 1e-3);
        assert!(report.armor.is_some());
        assert_eq!(report.steps.len(), 1);
    }

    #[test]
    fn test_section_destruction_feeds_chain() {
        let tracks = Region::Vehicle(VehicleSection::Tracks);
        let mut target =
            ArmoredTarget::new(EntityId(2), FactionId(1), TargetCategory::Vehicle, 1000.0)
                .with_sections(SectionHealth::new(vec![(tracks, 50.0)]))
                .with_modifier(Box::new(
                    SectionModifier::new(vec![SectionRule {
                        region: tracks,
                        multiplier: 1.0,
                    }])
                    .with_destroyed_multiplier(0.5),
                ));

        let packet = kinetic_packet(50.0, 0.0).with_region(tracks);
        let first = target.take_damage(&packet);
        assert_eq!(first.section_destroyed, Some(tracks));

        // Follow-up hits on the destroyed section are scaled down
        let second = target.take_damage(&packet);
        assert!((second.damage_out - 25.0).abs() < 1e-3);
        assert_eq!(second.section_destroyed, None);
    }
}

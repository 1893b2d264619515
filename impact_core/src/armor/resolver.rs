//! Armor resolution - the penetration resolver as a chain modifier

use super::angle::impact_angle_deg;
use super::penetration::{
    classify, damage_multiplier, effective_thickness_mm, explosive_multiplier, PenetrationClass,
};
use super::profile::ArmorProfile;
use crate::config::PenetrationConstants;
use crate::damage::DamagePacket;
use crate::modifier::{DamageModifier, ModifierEffect};
use crate::types::{BodyRegion, BuildingSection, DamageType, Region, VehicleSection};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Detail of one armor resolution, surfaced for reports and telemetry
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArmorResolution {
    pub region: Region,
    pub angle_deg: f32,
    pub penetration_mm: f32,
    pub effective_thickness_mm: f32,
    pub classification: PenetrationClass,
    pub damage_multiplier: f32,
}

/// Penetration resolver, packaged as a damage modifier so it slots into the
/// receiver's chain (conventionally first).
///
/// Kinetic/laser hits run the thickness/angle/classification pipeline.
/// Explosive hits use the blast attenuation heuristic instead - blast is
/// area-based, not a penetrator. A region with no armor entry passes damage
/// through unmodified.
#[derive(Debug, Clone)]
pub struct ArmorModifier {
    profile: ArmorProfile,
    constants: PenetrationConstants,
    default_angle_deg: f32,
}

impl ArmorModifier {
    pub fn new(profile: ArmorProfile, constants: PenetrationConstants) -> Self {
        ArmorModifier {
            profile,
            constants,
            default_angle_deg: 0.0,
        }
    }

    /// Angle assumed when no incoming direction can be resolved
    pub fn with_default_angle(self, default_angle_deg: f32) -> Self {
        ArmorModifier {
            default_angle_deg,
            ..self
        }
    }

    pub fn profile(&self) -> &ArmorProfile {
        &self.profile
    }
}

impl DamageModifier for ArmorModifier {
    fn name(&self) -> &str {
        "armor"
    }

    fn apply(&self, packet: &DamagePacket, damage: f32) -> ModifierEffect {
        let entry = match self.profile.entry(packet.region) {
            Some(entry) => entry,
            None => {
                trace!(region = ?packet.region, "no armor entry, damage passes through");
                return ModifierEffect::passthrough(damage);
            }
        };

        let angle_deg = packet
            .incoming_dir
            .map(|dir| impact_angle_deg(packet.hit_normal, dir))
            .unwrap_or(self.default_angle_deg);

        let effective = effective_thickness_mm(
            entry.thickness_mm,
            entry.material_coefficient,
            angle_deg,
            &self.constants,
        );
        let classification = classify(packet.penetration_mm, effective, &self.constants);
        let multiplier = if packet.damage_type == DamageType::Explosive {
            explosive_multiplier(effective, &self.constants)
        } else {
            damage_multiplier(classification, packet.penetration_mm, effective, &self.constants)
        };

        let resolution = ArmorResolution {
            region: packet.region,
            angle_deg,
            penetration_mm: packet.penetration_mm,
            effective_thickness_mm: effective,
            classification,
            damage_multiplier: multiplier,
        };
        trace!(
            region = ?resolution.region,
            angle_deg = resolution.angle_deg,
            effective_mm = resolution.effective_thickness_mm,
            %classification,
            "armor resolved"
        );

        ModifierEffect {
            damage: (damage * multiplier).max(0.0),
            armor: Some(resolution),
        }
    }
}

/// Humanoid region from normalized hit height (0 at feet, 1 at head top).
/// Mid-band hits could also be arms depending on horizontal position; the
/// height-only split keeps the fallback cheap.
pub fn body_region_from_height(relative_height: f32) -> BodyRegion {
    if relative_height > 0.85 {
        BodyRegion::Head
    } else if relative_height > 0.45 {
        BodyRegion::Torso
    } else if relative_height > 0.30 {
        BodyRegion::Arm
    } else {
        BodyRegion::Leg
    }
}

/// Vehicle section guessed from the direction toward the attacker and the
/// vehicle's forward/up axes.
pub fn vehicle_section_from_direction(to_attacker: Vec3, forward: Vec3, up: Vec3) -> VehicleSection {
    let direction = to_attacker.normalize_or_zero();
    if direction == Vec3::ZERO {
        return VehicleSection::Front;
    }
    if up.normalize_or_zero().dot(direction) > 0.6 {
        return VehicleSection::Top;
    }
    let along = forward.normalize_or_zero().dot(direction);
    if along > 0.5 {
        VehicleSection::Front
    } else if along < -0.5 {
        VehicleSection::Rear
    } else {
        VehicleSection::Side
    }
}

/// Building section from the verticality of the hit normal
pub fn building_section_from_normal(hit_normal: Vec3, up: Vec3) -> BuildingSection {
    let vertical = hit_normal.normalize_or_zero().dot(up.normalize_or_zero());
    if vertical > 0.7 {
        BuildingSection::Roof
    } else if vertical < -0.7 {
        BuildingSection::Floor
    } else {
        BuildingSection::Wall
    }
}

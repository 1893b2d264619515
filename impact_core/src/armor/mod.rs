//! Armor system - profiles, penetration math, impact angles

mod angle;
mod penetration;
mod profile;
mod resolver;

pub use angle::{estimate_incoming, impact_angle_deg, HitDirectionMemory, MAX_IMPACT_ANGLE_DEG};
pub use penetration::{
    classify, damage_multiplier, effective_thickness_mm, explosive_multiplier, PenetrationClass,
};
pub use profile::{ArmorEntry, ArmorProfile};
pub use resolver::{
    body_region_from_height, building_section_from_normal, vehicle_section_from_direction,
    ArmorModifier, ArmorResolution,
};

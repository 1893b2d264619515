//! Core identifier and classification types shared across the pipeline

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Stable identifier for a damageable entity (attacker or victim)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Stable identifier for a collider/surface in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColliderId(pub u64);

/// Faction/team identifier, used by the friendly-fire gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactionId(pub u16);

/// Kind of damage carried by a single damage event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Kinetic,
    Laser,
    Explosive,
    Melee,
    Fire,
}

/// Broad weapon class, carried for telemetry and resist tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponTag {
    Rifle,
    Sniper,
    Lmg,
    Smg,
    Pistol,
    Shotgun,
    Rocket,
    Grenade,
    Melee,
    Cannon,
    Unknown,
}

impl Default for WeaponTag {
    fn default() -> Self {
        WeaponTag::Unknown
    }
}

/// Humanoid hit locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRegion {
    Head,
    Torso,
    Arm,
    Leg,
}

/// Vehicle armor sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleSection {
    Front,
    Rear,
    Side,
    Top,
    Turret,
    Tracks,
}

/// Building/structure armor sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingSection {
    Wall,
    Roof,
    Floor,
    Support,
}

/// Struck region of a target, across all target categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Body(BodyRegion),
    Vehicle(VehicleSection),
    Building(BuildingSection),
    Unknown,
}

impl Default for Region {
    fn default() -> Self {
        Region::Unknown
    }
}

/// Relationship between two factions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hostility {
    Friendly,
    Hostile,
}

/// Faction relationship table.
///
/// A faction is always friendly to itself. Distinct factions are hostile
/// unless an alliance has been declared between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactionTable {
    allied: HashSet<(u16, u16)>,
}

impl FactionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare two factions allied (symmetric)
    pub fn ally(&mut self, a: FactionId, b: FactionId) {
        self.allied.insert(Self::pair(a, b));
    }

    /// Relationship between two factions
    pub fn hostility(&self, a: FactionId, b: FactionId) -> Hostility {
        if a == b || self.allied.contains(&Self::pair(a, b)) {
            Hostility::Friendly
        } else {
            Hostility::Hostile
        }
    }

    fn pair(a: FactionId, b: FactionId) -> (u16, u16) {
        if a.0 <= b.0 {
            (a.0, b.0)
        } else {
            (b.0, a.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_faction_is_friendly() {
        let table = FactionTable::new();
        assert_eq!(
            table.hostility(FactionId(1), FactionId(1)),
            Hostility::Friendly
        );
    }

    #[test]
    fn test_distinct_factions_default_hostile() {
        let table = FactionTable::new();
        assert_eq!(
            table.hostility(FactionId(1), FactionId(2)),
            Hostility::Hostile
        );
    }

    #[test]
    fn test_alliance_is_symmetric() {
        let mut table = FactionTable::new();
        table.ally(FactionId(3), FactionId(7));
        assert_eq!(
            table.hostility(FactionId(7), FactionId(3)),
            Hostility::Friendly
        );
        assert_eq!(
            table.hostility(FactionId(3), FactionId(7)),
            Hostility::Friendly
        );
    }
}

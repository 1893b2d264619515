//! Legacy resist table - per-damage-type multipliers

use super::{DamageModifier, ModifierEffect};
use crate::damage::DamagePacket;
use crate::types::DamageType;
use serde::{Deserialize, Serialize};

/// One row of a resist table
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResistEntry {
    pub damage_type: DamageType,
    pub multiplier: f32,
}

/// Flat per-damage-type damage multipliers. Types without an entry pass
/// through at 1.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DamageTypeResist {
    pub entries: Vec<ResistEntry>,
}

impl DamageTypeResist {
    pub fn new(entries: Vec<ResistEntry>) -> Self {
        DamageTypeResist { entries }
    }

    pub fn multiplier(&self, damage_type: DamageType) -> f32 {
        self.entries
            .iter()
            .find(|e| e.damage_type == damage_type)
            .map(|e| e.multiplier)
            .unwrap_or(1.0)
    }
}

impl DamageModifier for DamageTypeResist {
    fn name(&self) -> &str {
        "resist"
    }

    fn apply(&self, packet: &DamagePacket, damage: f32) -> ModifierEffect {
        ModifierEffect::scaled(damage * self.multiplier(packet.damage_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityId, WeaponTag};

    fn packet(damage_type: DamageType) -> DamagePacket {
        DamagePacket::new(
            EntityId(1),
            EntityId(2),
            100.0,
            0.0,
            damage_type,
            WeaponTag::Unknown,
        )
    }

    #[test]
    fn test_matching_type_scaled() {
        let resist = DamageTypeResist::new(vec![ResistEntry {
            damage_type: DamageType::Fire,
            multiplier: 0.5,
        }]);
        let effect = resist.apply(&packet(DamageType::Fire), 100.0);
        assert!((effect.damage - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unlisted_type_passes() {
        let resist = DamageTypeResist::new(vec![ResistEntry {
            damage_type: DamageType::Fire,
            multiplier: 0.5,
        }]);
        let effect = resist.apply(&packet(DamageType::Kinetic), 100.0);
        assert!((effect.damage - 100.0).abs() < f32::EPSILON);
    }
}

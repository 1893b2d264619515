//! Friendly-fire gate - zeroes damage between non-hostile parties

use super::{DamageModifier, ModifierEffect};
use crate::damage::DamagePacket;
use crate::types::{FactionId, FactionTable, Hostility};

/// Zeroes damage when friendly fire is disabled and the attacker is not
/// hostile to the owning target. An unknown attacker faction always passes
/// damage through.
#[derive(Debug, Clone)]
pub struct FriendlyFireGate {
    faction: FactionId,
    relations: FactionTable,
    allow_friendly_fire: bool,
}

impl FriendlyFireGate {
    pub fn new(faction: FactionId, relations: FactionTable) -> Self {
        FriendlyFireGate {
            faction,
            relations,
            allow_friendly_fire: false,
        }
    }

    pub fn with_friendly_fire(self, allow_friendly_fire: bool) -> Self {
        FriendlyFireGate {
            allow_friendly_fire,
            ..self
        }
    }
}

impl DamageModifier for FriendlyFireGate {
    fn name(&self) -> &str {
        "friendly_fire"
    }

    fn apply(&self, packet: &DamagePacket, damage: f32) -> ModifierEffect {
        if self.allow_friendly_fire {
            return ModifierEffect::passthrough(damage);
        }
        match packet.attacker_faction {
            Some(attacker)
                if self.relations.hostility(attacker, self.faction) != Hostility::Hostile =>
            {
                ModifierEffect::scaled(0.0)
            }
            _ => ModifierEffect::passthrough(damage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DamageType, EntityId, WeaponTag};

    fn packet_from(faction: Option<FactionId>) -> DamagePacket {
        let mut packet = DamagePacket::new(
            EntityId(1),
            EntityId(2),
            50.0,
            0.0,
            DamageType::Kinetic,
            WeaponTag::Rifle,
        );
        packet.attacker_faction = faction;
        packet
    }

    #[test]
    fn test_same_faction_zeroed() {
        let gate = FriendlyFireGate::new(FactionId(1), FactionTable::new());
        let effect = gate.apply(&packet_from(Some(FactionId(1))), 50.0);
        assert!((effect.damage - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hostile_faction_passes() {
        let gate = FriendlyFireGate::new(FactionId(1), FactionTable::new());
        let effect = gate.apply(&packet_from(Some(FactionId(2))), 50.0);
        assert!((effect.damage - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_allied_faction_zeroed() {
        let mut relations = FactionTable::new();
        relations.ally(FactionId(1), FactionId(2));
        let gate = FriendlyFireGate::new(FactionId(1), relations);
        let effect = gate.apply(&packet_from(Some(FactionId(2))), 50.0);
        assert!((effect.damage - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_faction_passes() {
        let gate = FriendlyFireGate::new(FactionId(1), FactionTable::new());
        let effect = gate.apply(&packet_from(None), 50.0);
        assert!((effect.damage - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_friendly_fire_enabled_passes_everything() {
        let gate = FriendlyFireGate::new(FactionId(1), FactionTable::new())
            .with_friendly_fire(true);
        let effect = gate.apply(&packet_from(Some(FactionId(1))), 50.0);
        assert!((effect.damage - 50.0).abs() < f32::EPSILON);
    }
}

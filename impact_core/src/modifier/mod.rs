//! Damage modifier chain - ordered scalar transforms on incoming damage
//!
//! A modifier is a pure transform `(packet, damage) -> damage`. A receiver
//! holds an ordered chain of them (registration order, built once at
//! construction) and applies them sequentially, each consuming the previous
//! output. The chain clamps every intermediate result to >= 0, so a
//! modifier returning a negative value never leaks downstream.

mod friendly_fire;
mod resist;
mod section;

pub use friendly_fire::FriendlyFireGate;
pub use resist::{DamageTypeResist, ResistEntry};
pub use section::{SectionModifier, SectionRule};

use crate::armor::ArmorResolution;
use crate::damage::DamagePacket;
use crate::types::Region;
use serde::{Deserialize, Serialize};

/// Result of one modifier application
#[derive(Debug, Clone, Copy)]
pub struct ModifierEffect {
    /// Outgoing damage (the chain clamps it to >= 0)
    pub damage: f32,
    /// Armor resolution detail, set only by the armor modifier
    pub armor: Option<ArmorResolution>,
}

impl ModifierEffect {
    /// Damage unchanged, no extra detail
    pub fn passthrough(damage: f32) -> Self {
        ModifierEffect {
            damage,
            armor: None,
        }
    }

    /// Plain scaled damage, no extra detail
    pub fn scaled(damage: f32) -> Self {
        ModifierEffect {
            damage,
            armor: None,
        }
    }
}

/// One transform in a receiver's damage chain
pub trait DamageModifier: Send + Sync {
    /// Short identifier, used in reports and logs
    fn name(&self) -> &str;

    /// Transform the incoming damage for this packet
    fn apply(&self, packet: &DamagePacket, damage: f32) -> ModifierEffect;

    /// Notification that a section of the owning target was destroyed
    fn on_section_destroyed(&mut self, _region: Region) {}
}

/// Record of one chain step, kept for reports and telemetry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierStep {
    pub index: usize,
    pub name: String,
    pub damage_in: f32,
    pub damage_out: f32,
}

/// Result of running a full chain
#[derive(Debug, Clone)]
pub struct ChainOutcome {
    /// Final damage after every modifier, >= 0
    pub damage: f32,
    pub steps: Vec<ModifierStep>,
    /// Armor resolution and the chain index it occurred at, if any
    pub armor: Option<(usize, ArmorResolution)>,
}

/// Ordered list of modifiers applied to every incoming packet
#[derive(Default)]
pub struct DamageChain {
    modifiers: Vec<Box<dyn DamageModifier>>,
}

impl DamageChain {
    pub fn new() -> Self {
        DamageChain::default()
    }

    /// Append a modifier; chain order is registration order
    pub fn push(&mut self, modifier: Box<dyn DamageModifier>) {
        self.modifiers.push(modifier);
    }

    /// Builder-style `push`
    pub fn with(mut self, modifier: Box<dyn DamageModifier>) -> Self {
        self.push(modifier);
        self
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Run every modifier in order. An empty chain passes damage through
    /// unchanged. No modifier ever observes a negative input.
    pub fn apply(&self, packet: &DamagePacket, base_damage: f32) -> ChainOutcome {
        let mut damage = base_damage.max(0.0);
        let mut steps = Vec::with_capacity(self.modifiers.len());
        let mut armor = None;

        for (index, modifier) in self.modifiers.iter().enumerate() {
            let damage_in = damage;
            let effect = modifier.apply(packet, damage_in);
            damage = effect.damage.max(0.0);
            if let Some(resolution) = effect.armor {
                armor = Some((index, resolution));
            }
            steps.push(ModifierStep {
                index,
                name: modifier.name().to_string(),
                damage_in,
                damage_out: damage,
            });
        }

        ChainOutcome {
            damage,
            steps,
            armor,
        }
    }

    /// Fan a section-destroyed notification through every modifier
    pub fn notify_section_destroyed(&mut self, region: Region) {
        for modifier in &mut self.modifiers {
            modifier.on_section_destroyed(region);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DamageType, EntityId, WeaponTag};

    struct Scale(f32);

    impl DamageModifier for Scale {
        fn name(&self) -> &str {
            "scale"
        }
        fn apply(&self, _packet: &DamagePacket, damage: f32) -> ModifierEffect {
            ModifierEffect::scaled(damage * self.0)
        }
    }

    struct Subtract(f32);

    impl DamageModifier for Subtract {
        fn name(&self) -> &str {
            "subtract"
        }
        fn apply(&self, _packet: &DamagePacket, damage: f32) -> ModifierEffect {
            ModifierEffect::scaled(damage - self.0)
        }
    }

    fn packet() -> DamagePacket {
        DamagePacket::new(
            EntityId(1),
            EntityId(2),
            100.0,
            0.0,
            DamageType::Kinetic,
            WeaponTag::Rifle,
        )
    }

    #[test]
    fn test_empty_chain_passthrough() {
        let chain = DamageChain::new();
        let outcome = chain.apply(&packet(), 42.0);
        assert!((outcome.damage - 42.0).abs() < f32::EPSILON);
        assert!(outcome.steps.is_empty());
    }

    #[test]
    fn test_chain_applies_in_registration_order() {
        // (100 * 0.5) - 10 = 40, not (100 - 10) * 0.5 = 45
        let chain = DamageChain::new()
            .with(Box::new(Scale(0.5)))
            .with(Box::new(Subtract(10.0)));
        let outcome = chain.apply(&packet(), 100.0);
        assert!((outcome.damage - 40.0).abs() < 1e-4);
        assert_eq!(outcome.steps.len(), 2);
        assert_eq!(outcome.steps[0].name, "scale");
        assert_eq!(outcome.steps[1].name, "subtract");
    }

    #[test]
    fn test_negative_intermediate_clamped_before_next_modifier() {
        // Subtract drives the value negative; Scale must see 0, not -50
        let chain = DamageChain::new()
            .with(Box::new(Subtract(150.0)))
            .with(Box::new(Scale(2.0)));
        let outcome = chain.apply(&packet(), 100.0);
        assert!((outcome.damage - 0.0).abs() < f32::EPSILON);
        assert!((outcome.steps[0].damage_out - 0.0).abs() < f32::EPSILON);
        assert!((outcome.steps[1].damage_in - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_negative_base_damage_clamped() {
        let chain = DamageChain::new().with(Box::new(Scale(2.0)));
        let outcome = chain.apply(&packet(), -10.0);
        assert!((outcome.damage - 0.0).abs() < f32::EPSILON);
    }
}

//! Section multipliers - per-region scaling and destroyed-section rules

use super::{DamageModifier, ModifierEffect};
use crate::damage::DamagePacket;
use crate::types::Region;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-region damage multiplier rule
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SectionRule {
    pub region: Region,
    pub multiplier: f32,
}

/// Scales damage by struck region (headshot bonuses, track penalties) and
/// applies an extra multiplier to regions that have already been destroyed.
/// The destroyed set is fed by the receiver's section-destroyed
/// notifications.
#[derive(Debug, Clone)]
pub struct SectionModifier {
    rules: Vec<SectionRule>,
    destroyed_multiplier: f32,
    destroyed: HashSet<Region>,
}

impl SectionModifier {
    pub fn new(rules: Vec<SectionRule>) -> Self {
        SectionModifier {
            rules,
            destroyed_multiplier: 1.0,
            destroyed: HashSet::new(),
        }
    }

    /// Extra multiplier applied to hits on destroyed regions
    pub fn with_destroyed_multiplier(self, destroyed_multiplier: f32) -> Self {
        SectionModifier {
            destroyed_multiplier,
            ..self
        }
    }

    fn rule_multiplier(&self, region: Region) -> f32 {
        self.rules
            .iter()
            .find(|r| r.region == region)
            .map(|r| r.multiplier)
            .unwrap_or(1.0)
    }
}

impl DamageModifier for SectionModifier {
    fn name(&self) -> &str {
        "section"
    }

    fn apply(&self, packet: &DamagePacket, damage: f32) -> ModifierEffect {
        let mut multiplier = self.rule_multiplier(packet.region);
        if self.destroyed.contains(&packet.region) {
            multiplier *= self.destroyed_multiplier;
        }
        ModifierEffect::scaled(damage * multiplier)
    }

    fn on_section_destroyed(&mut self, region: Region) {
        self.destroyed.insert(region);
    }
}

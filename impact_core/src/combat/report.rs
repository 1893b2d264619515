//! DamageReport - outcome of resolving one packet against a target

use crate::armor::ArmorResolution;
use crate::modifier::ModifierStep;
use crate::types::Region;
use serde::{Deserialize, Serialize};

/// Result of `DamageReceiver::take_damage` for one packet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageReport {
    /// Damage carried by the packet before the chain ran
    pub damage_in: f32,
    /// Damage actually applied to the target after every modifier
    pub damage_out: f32,
    /// Region the hit resolved to (after any geometric fallback)
    pub region: Region,
    /// Every chain step, in application order
    pub steps: Vec<ModifierStep>,
    /// Armor resolution detail, if an armor modifier ran
    pub armor: Option<ArmorResolution>,
    pub health_before: f32,
    pub health_after: f32,
    /// Section destroyed by this hit, if any
    pub section_destroyed: Option<Region>,
    pub killing_blow: bool,
}

impl DamageReport {
    /// Damage removed by the chain
    pub fn mitigated(&self) -> f32 {
        (self.damage_in - self.damage_out).max(0.0)
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        parts.push(format!("{:.1} damage", self.damage_out));

        if self.mitigated() > 0.0 {
            parts.push(format!("{:.1} mitigated", self.mitigated()));
        }

        if let Some(armor) = &self.armor {
            parts.push(format!(
                "{} at {:.0}deg vs {:.0}mm",
                armor.classification, armor.angle_deg, armor.effective_thickness_mm
            ));
        }

        if let Some(region) = self.section_destroyed {
            parts.push(format!("{:?} destroyed", region));
        }

        if self.killing_blow {
            parts.push("FATAL".to_string());
        }

        parts.join(", ")
    }
}

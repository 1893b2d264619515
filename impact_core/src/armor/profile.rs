//! ArmorProfile - per-section thickness and material quality

use crate::config::ConfigError;
use crate::types::Region;
use serde::{Deserialize, Serialize};

/// Armor plate covering one section of a target
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArmorEntry {
    pub region: Region,
    /// Rated plate thickness in millimeters (> 0)
    pub thickness_mm: f32,
    /// Material quality relative to reference steel (1.0 = reference)
    #[serde(default = "default_material_coefficient")]
    pub material_coefficient: f32,
}

fn default_material_coefficient() -> f32 {
    1.0
}

impl ArmorEntry {
    pub fn new(region: Region, thickness_mm: f32) -> Self {
        ArmorEntry {
            region,
            thickness_mm,
            material_coefficient: 1.0,
        }
    }

    pub fn with_coefficient(self, material_coefficient: f32) -> Self {
        ArmorEntry {
            material_coefficient,
            ..self
        }
    }
}

/// Armor coverage of a single target, keyed by struck region.
///
/// Lookup is a linear scan over a small entry list; the first entry for a
/// region wins. Duplicate regions are an authoring mistake - `validate`
/// reports them, the runtime does not try to repair them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArmorProfile {
    pub entries: Vec<ArmorEntry>,
}

impl ArmorProfile {
    pub fn new(entries: Vec<ArmorEntry>) -> Self {
        ArmorProfile { entries }
    }

    /// Find the armor entry for a region (first match wins)
    pub fn entry(&self, region: Region) -> Option<&ArmorEntry> {
        self.entries.iter().find(|e| e.region == region)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Authoring-time validation: positive magnitudes, no duplicate regions
    pub fn validate(&self) -> Result<(), ConfigError> {
        for entry in &self.entries {
            if entry.thickness_mm <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "armor entry for {:?} has non-positive thickness {}",
                    entry.region, entry.thickness_mm
                )));
            }
            if entry.material_coefficient <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "armor entry for {:?} has non-positive material coefficient {}",
                    entry.region, entry.material_coefficient
                )));
            }
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|e| e.region == entry.region) {
                return Err(ConfigError::Validation(format!(
                    "duplicate armor entry for {:?}",
                    entry.region
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BodyRegion, VehicleSection};

    #[test]
    fn test_lookup_first_match_wins() {
        let profile = ArmorProfile::new(vec![
            ArmorEntry::new(Region::Body(BodyRegion::Torso), 20.0),
            ArmorEntry::new(Region::Body(BodyRegion::Torso), 99.0),
        ]);
        let entry = profile.entry(Region::Body(BodyRegion::Torso)).unwrap();
        assert!((entry.thickness_mm - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_region_is_none() {
        let profile = ArmorProfile::new(vec![ArmorEntry::new(
            Region::Vehicle(VehicleSection::Front),
            120.0,
        )]);
        assert!(profile.entry(Region::Vehicle(VehicleSection::Rear)).is_none());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let profile = ArmorProfile::new(vec![
            ArmorEntry::new(Region::Body(BodyRegion::Head), 10.0),
            ArmorEntry::new(Region::Body(BodyRegion::Head), 10.0),
        ]);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_thickness() {
        let profile = ArmorProfile::new(vec![ArmorEntry::new(
            Region::Body(BodyRegion::Leg),
            0.0,
        )]);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_parse_from_toml() {
        let toml = r#"
[[entries]]
region = { vehicle = "front" }
thickness_mm = 120.0
material_coefficient = 1.2

[[entries]]
region = { vehicle = "side" }
thickness_mm = 60.0
"#;
        let profile: ArmorProfile = toml::from_str(toml).unwrap();
        assert!(profile.validate().is_ok());
        let side = profile.entry(Region::Vehicle(VehicleSection::Side)).unwrap();
        // Coefficient defaults to reference steel
        assert!((side.material_coefficient - 1.0).abs() < f32::EPSILON);
    }
}

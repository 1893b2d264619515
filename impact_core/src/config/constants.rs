//! Tunable combat constants

use serde::{Deserialize, Serialize};

/// Tunable constants for the whole damage pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    #[serde(default)]
    pub penetration: PenetrationConstants,
    #[serde(default)]
    pub traversal: TraversalConstants,
    #[serde(default)]
    pub ballistics: BallisticsConstants,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            penetration: PenetrationConstants::default(),
            traversal: TraversalConstants::default(),
            ballistics: BallisticsConstants::default(),
        }
    }
}

/// Armor penetration band constants.
///
/// A hit is classified against effective thickness:
/// - NoPen if `penetration <= no_pen_band * effective`
/// - Full  if `penetration >= full_pen_band * effective`
/// - Partial in between, damage multiplier lerped across the band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenetrationConstants {
    /// Lower classification band (fraction of effective thickness)
    #[serde(default = "default_no_pen_band")]
    pub no_pen_band: f32,
    /// Upper classification band (fraction of effective thickness)
    #[serde(default = "default_full_pen_band")]
    pub full_pen_band: f32,
    /// Damage multiplier for a non-penetrating hit
    #[serde(default = "default_no_pen_damage_factor")]
    pub no_pen_damage_factor: f32,
    /// Damage multiplier for a fully penetrating hit
    #[serde(default = "default_full_pen_damage_factor")]
    pub full_pen_damage_factor: f32,
    /// Bias applied to the lerped partial-penetration multiplier
    #[serde(default = "default_partial_pen_blend")]
    pub partial_pen_blend: f32,
    /// Impact angles are clamped here before any trigonometry
    #[serde(default = "default_max_impact_angle_deg")]
    pub max_impact_angle_deg: f32,
    /// Floor for authored material coefficients
    #[serde(default = "default_min_material_coefficient")]
    pub min_material_coefficient: f32,
    /// Effective thickness (mm) at which blast damage is fully stopped
    #[serde(default = "default_explosive_reference_mm")]
    pub explosive_reference_mm: f32,
}

impl Default for PenetrationConstants {
    fn default() -> Self {
        PenetrationConstants {
            no_pen_band: 0.90,
            full_pen_band: 1.05,
            no_pen_damage_factor: 0.05,
            full_pen_damage_factor: 1.0,
            partial_pen_blend: 1.0,
            max_impact_angle_deg: 89.0,
            min_material_coefficient: 0.1,
            explosive_reference_mm: 800.0,
        }
    }
}

fn default_no_pen_band() -> f32 {
    0.90
}
fn default_full_pen_band() -> f32 {
    1.05
}
fn default_no_pen_damage_factor() -> f32 {
    0.05
}
fn default_full_pen_damage_factor() -> f32 {
    1.0
}
fn default_partial_pen_blend() -> f32 {
    1.0
}
fn default_max_impact_angle_deg() -> f32 {
    89.0
}
fn default_min_material_coefficient() -> f32 {
    0.1
}
fn default_explosive_reference_mm() -> f32 {
    800.0
}

/// Multi-hit traversal guards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalConstants {
    /// Hard cap on contacts resolved per shot (degenerate geometry guard)
    #[serde(default = "default_max_hits")]
    pub max_hits: u32,
    /// Distance (m) the ray origin is advanced past each contact
    #[serde(default = "default_skin_width_m")]
    pub skin_width_m: f32,
    /// Remaining penetration (mm) below which a shot is considered spent
    #[serde(default = "default_min_penetration_mm")]
    pub min_penetration_mm: f32,
}

impl Default for TraversalConstants {
    fn default() -> Self {
        TraversalConstants {
            max_hits: 16,
            skin_width_m: 0.01,
            min_penetration_mm: 0.05,
        }
    }
}

fn default_max_hits() -> u32 {
    16
}
fn default_skin_width_m() -> f32 {
    0.01
}
fn default_min_penetration_mm() -> f32 {
    0.05
}

/// Ballistic projectile flight model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallisticsConstants {
    /// Gravity acceleration (m/s^2, negative = down)
    #[serde(default = "default_gravity_mps2")]
    pub gravity_mps2: f32,
    /// Velocity-squared drag coefficient
    #[serde(default = "default_drag_coefficient")]
    pub drag_coefficient: f32,
    /// Projectiles slower than this (m/s) expire
    #[serde(default = "default_min_speed_mps")]
    pub min_speed_mps: f32,
    /// Projectiles older than this (s) expire
    #[serde(default = "default_max_lifetime_s")]
    pub max_lifetime_s: f32,
    /// Projectiles farther than this (m) from their spawn point expire
    #[serde(default = "default_max_range_m")]
    pub max_range_m: f32,
}

impl Default for BallisticsConstants {
    fn default() -> Self {
        BallisticsConstants {
            gravity_mps2: -9.81,
            drag_coefficient: 0.00008,
            min_speed_mps: 50.0,
            max_lifetime_s: 8.0,
            max_range_m: 1500.0,
        }
    }
}

fn default_gravity_mps2() -> f32 {
    -9.81
}
fn default_drag_coefficient() -> f32 {
    0.00008
}
fn default_min_speed_mps() -> f32 {
    50.0
}
fn default_max_lifetime_s() -> f32 {
    8.0
}
fn default_max_range_m() -> f32 {
    1500.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = CombatConstants::default();
        assert!((constants.penetration.no_pen_band - 0.90).abs() < f32::EPSILON);
        assert!((constants.penetration.full_pen_band - 1.05).abs() < f32::EPSILON);
        assert_eq!(constants.traversal.max_hits, 16);
        assert!((constants.ballistics.gravity_mps2 + 9.81).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_partial_constants() {
        // Unspecified fields fall back to defaults
        let toml = r#"
[penetration]
no_pen_damage_factor = 0.1

[traversal]
max_hits = 8
"#;

        let constants: CombatConstants = toml::from_str(toml).unwrap();
        assert!((constants.penetration.no_pen_damage_factor - 0.1).abs() < f32::EPSILON);
        assert!((constants.penetration.full_pen_band - 1.05).abs() < f32::EPSILON);
        assert_eq!(constants.traversal.max_hits, 8);
        assert!((constants.ballistics.max_range_m - 1500.0).abs() < f32::EPSILON);
    }
}

//! Penetration math - effective thickness and hit classification
//!
//! Effective thickness grows with material quality and with impact angle:
//! `effective = thickness * coefficient / cos(angle)`. The angle is clamped
//! to [0, 89] degrees before the cosine so the result stays finite.
//!
//! Classification against effective thickness:
//! - NoPen   if `penetration <= 0.90 * effective`
//! - Full    if `penetration >= 1.05 * effective`
//! - Partial otherwise, damage multiplier lerped across the band

use crate::config::PenetrationConstants;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-way outcome of penetration vs. effective thickness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenetrationClass {
    NoPen,
    Partial,
    Full,
}

impl fmt::Display for PenetrationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PenetrationClass::NoPen => write!(f, "no-pen"),
            PenetrationClass::Partial => write!(f, "partial"),
            PenetrationClass::Full => write!(f, "full"),
        }
    }
}

/// Armor thickness adjusted for material quality and impact angle.
///
/// Non-decreasing in `angle_deg` over [0, 89] and finite everywhere in that
/// range. Out-of-domain magnitudes are clamped, never rejected.
pub fn effective_thickness_mm(
    thickness_mm: f32,
    material_coefficient: f32,
    angle_deg: f32,
    constants: &PenetrationConstants,
) -> f32 {
    let thickness = thickness_mm.max(0.0);
    let coefficient = material_coefficient.max(constants.min_material_coefficient);
    let angle = angle_deg.clamp(0.0, constants.max_impact_angle_deg);
    thickness * coefficient / angle.to_radians().cos()
}

/// Classify a penetration value against an effective thickness
pub fn classify(
    penetration_mm: f32,
    effective_mm: f32,
    constants: &PenetrationConstants,
) -> PenetrationClass {
    let penetration = penetration_mm.max(0.0);
    if penetration <= effective_mm * constants.no_pen_band {
        PenetrationClass::NoPen
    } else if penetration >= effective_mm * constants.full_pen_band {
        PenetrationClass::Full
    } else {
        PenetrationClass::Partial
    }
}

/// Damage multiplier for a classified kinetic/laser hit
pub fn damage_multiplier(
    class: PenetrationClass,
    penetration_mm: f32,
    effective_mm: f32,
    constants: &PenetrationConstants,
) -> f32 {
    match class {
        PenetrationClass::NoPen => constants.no_pen_damage_factor,
        PenetrationClass::Full => constants.full_pen_damage_factor,
        PenetrationClass::Partial => {
            let ratio = penetration_mm / effective_mm.max(f32::EPSILON);
            let band = constants.full_pen_band - constants.no_pen_band;
            let t = if band <= f32::EPSILON {
                1.0
            } else {
                ((ratio - constants.no_pen_band) / band).clamp(0.0, 1.0)
            };
            let lerped = constants.no_pen_damage_factor
                + (constants.full_pen_damage_factor - constants.no_pen_damage_factor) * t;
            (lerped * constants.partial_pen_blend).max(0.0)
        }
    }
}

/// Blast attenuation for explosive hits: armor defeats blast linearly,
/// independent of any penetration budget.
pub fn explosive_multiplier(effective_mm: f32, constants: &PenetrationConstants) -> f32 {
    (1.0 - effective_mm / constants.explosive_reference_mm.max(f32::EPSILON)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constants() -> PenetrationConstants {
        PenetrationConstants::default()
    }

    #[test]
    fn test_effective_thickness_at_zero_angle() {
        // Perpendicular hit: full rated thickness
        let eff = effective_thickness_mm(100.0, 1.0, 0.0, &constants());
        assert!((eff - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_effective_thickness_at_sixty_degrees() {
        // 100mm / cos(60) = 200mm
        let eff = effective_thickness_mm(100.0, 1.0, 60.0, &constants());
        assert!((eff - 200.0).abs() < 1e-2);
    }

    #[test]
    fn test_angle_clamped_and_finite_at_grazing() {
        let eff = effective_thickness_mm(100.0, 1.0, 89.0, &constants());
        assert!(eff.is_finite());
        // Beyond 89 degrees is clamped, not amplified further
        let over = effective_thickness_mm(100.0, 1.0, 135.0, &constants());
        assert!((over - eff).abs() < 1e-2);
    }

    #[test]
    fn test_material_coefficient_floor() {
        // Coefficient 0.01 clamps up to 0.1
        let eff = effective_thickness_mm(100.0, 0.01, 0.0, &constants());
        assert!((eff - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_classification_bands() {
        let c = constants();
        // effective = 100mm
        assert_eq!(classify(89.0, 100.0, &c), PenetrationClass::NoPen);
        assert_eq!(classify(95.0, 100.0, &c), PenetrationClass::Partial);
        assert_eq!(classify(106.0, 100.0, &c), PenetrationClass::Full);
    }

    #[test]
    fn test_classification_band_edges() {
        let c = constants();
        // Exactly on the lower edge stays NoPen, exactly on the upper is Full
        assert_eq!(classify(90.0, 100.0, &c), PenetrationClass::NoPen);
        assert_eq!(classify(105.0, 100.0, &c), PenetrationClass::Full);
        assert_eq!(classify(90.001, 100.0, &c), PenetrationClass::Partial);
        assert_eq!(classify(104.999, 100.0, &c), PenetrationClass::Partial);
    }

    #[test]
    fn test_partial_multiplier_interpolates() {
        let c = constants();
        // Midpoint of the band: ratio 0.975
        let mid = damage_multiplier(PenetrationClass::Partial, 97.5, 100.0, &c);
        let expected = c.no_pen_damage_factor
            + (c.full_pen_damage_factor - c.no_pen_damage_factor) * 0.5;
        assert!((mid - expected).abs() < 1e-3);

        // Near the band edges the multiplier approaches the edge factors
        let low = damage_multiplier(PenetrationClass::Partial, 90.5, 100.0, &c);
        let high = damage_multiplier(PenetrationClass::Partial, 104.5, 100.0, &c);
        assert!(low < mid && mid < high);
    }

    #[test]
    fn test_partial_blend_scales_multiplier() {
        let mut c = constants();
        c.partial_pen_blend = 0.5;
        let full_blend = damage_multiplier(PenetrationClass::Partial, 97.5, 100.0, &constants());
        let half_blend = damage_multiplier(PenetrationClass::Partial, 97.5, 100.0, &c);
        assert!((half_blend - full_blend * 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_explosive_multiplier() {
        let c = constants();
        // 200mm effective vs 800mm reference: 1 - 0.25 = 0.75
        assert!((explosive_multiplier(200.0, &c) - 0.75).abs() < 1e-4);
        // Thick enough armor stops blast entirely
        assert!((explosive_multiplier(1000.0, &c) - 0.0).abs() < 1e-4);
        // No armor: full blast
        assert!((explosive_multiplier(0.0, &c) - 1.0).abs() < 1e-4);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn effective_thickness_non_decreasing_in_angle(
                a in 0.0f32..=89.0,
                b in 0.0f32..=89.0,
                thickness in 1.0f32..500.0,
                coefficient in 0.1f32..3.0,
            ) {
                let c = PenetrationConstants::default();
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let at_lo = effective_thickness_mm(thickness, coefficient, lo, &c);
                let at_hi = effective_thickness_mm(thickness, coefficient, hi, &c);
                prop_assert!(at_lo.is_finite() && at_hi.is_finite());
                prop_assert!(at_hi >= at_lo - 1e-3);
            }

            #[test]
            fn damage_multiplier_never_negative(
                penetration in 0.0f32..1000.0,
                effective in 1.0f32..1000.0,
            ) {
                let c = PenetrationConstants::default();
                let class = classify(penetration, effective, &c);
                let mult = damage_multiplier(class, penetration, effective, &c);
                prop_assert!(mult >= 0.0);
            }
        }
    }
}

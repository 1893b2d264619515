//! PenetrationMaterial - per-surface traversal properties

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a surface resists being shot through.
///
/// Authored per collider. A surface without one of these absorbs shots
/// entirely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PenetrationMaterial {
    /// Thickness-equivalent of the surface in millimeters
    pub thickness_equivalent_mm: f32,
    /// Penetration budget lost per millimeter traversed
    #[serde(default = "default_loss_per_mm")]
    pub penetration_loss_per_mm: f32,
    /// Fraction of projectile speed lost crossing the surface, [0, 1]
    #[serde(default)]
    pub speed_loss_factor: f32,
    /// Maximum random deflection of the exit direction, degrees
    #[serde(default)]
    pub max_deflection_deg: f32,
}

fn default_loss_per_mm() -> f32 {
    1.0
}

/// State of a shot after crossing a material
#[derive(Debug, Clone, Copy)]
pub struct MaterialPass {
    pub penetration_mm: f32,
    pub speed: f32,
    pub direction: Vec3,
}

impl PenetrationMaterial {
    /// A plain plate: budget loss equals thickness, no speed loss, no
    /// deflection.
    pub fn plate(thickness_equivalent_mm: f32) -> Self {
        PenetrationMaterial {
            thickness_equivalent_mm,
            penetration_loss_per_mm: 1.0,
            speed_loss_factor: 0.0,
            max_deflection_deg: 0.0,
        }
    }

    pub fn with_loss_per_mm(self, penetration_loss_per_mm: f32) -> Self {
        PenetrationMaterial {
            penetration_loss_per_mm,
            ..self
        }
    }

    pub fn with_speed_loss(self, speed_loss_factor: f32) -> Self {
        PenetrationMaterial {
            speed_loss_factor,
            ..self
        }
    }

    pub fn with_deflection(self, max_deflection_deg: f32) -> Self {
        PenetrationMaterial {
            max_deflection_deg,
            ..self
        }
    }

    /// Penetration budget consumed by crossing this surface
    pub fn penetration_loss_mm(&self) -> f32 {
        (self.thickness_equivalent_mm * self.penetration_loss_per_mm).max(0.0)
    }

    /// Apply this material's losses to a shot passing through it
    pub fn apply_loss(
        &self,
        penetration_mm: f32,
        speed: f32,
        direction: Vec3,
        rng: &mut impl Rng,
    ) -> MaterialPass {
        let penetration_mm = (penetration_mm - self.penetration_loss_mm()).max(0.0);
        let speed = speed * (1.0 - self.speed_loss_factor.clamp(0.0, 1.0));
        let direction = deflect(direction, self.max_deflection_deg, rng);
        MaterialPass {
            penetration_mm,
            speed,
            direction,
        }
    }
}

/// Rotate `direction` by a random angle within `max_deflection_deg` around
/// a random perpendicular axis.
fn deflect(direction: Vec3, max_deflection_deg: f32, rng: &mut impl Rng) -> Vec3 {
    let direction = direction.normalize_or_zero();
    if max_deflection_deg <= 0.0 || direction == Vec3::ZERO {
        return direction;
    }

    // Perpendicular basis for the deflection plane
    let reference = if direction.y.abs() < 0.9 { Vec3::Y } else { Vec3::X };
    let right = direction.cross(reference).normalize();
    let up = right.cross(direction).normalize();

    let spin = rng.gen::<f32>() * std::f32::consts::TAU;
    let angle = rng.gen::<f32>() * max_deflection_deg.to_radians();
    let offset = (right * spin.cos() + up * spin.sin()) * angle.tan();

    (direction + offset).normalize()
}

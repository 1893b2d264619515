//! Shot traversal - laser multi-hit rays and ballistic projectiles

mod laser;
mod material;
mod projectile;

pub use laser::{
    fire_laser, fire_laser_with_rng, HitResolution, LaserShot, Termination, TraversalOutcome,
};
pub use material::{MaterialPass, PenetrationMaterial};
pub use projectile::{Projectile, ProjectileStatus};

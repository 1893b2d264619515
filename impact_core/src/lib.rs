//! impact_core - Damage, armor penetration and projectile travel simulation
//!
//! This library provides:
//! - DamagePacket: immutable record of a single damage event
//! - DamageChain: ordered modifier pipeline (armor, resists, friendly fire)
//! - Armor resolution: effective thickness, impact angle, penetration class
//! - TravelFalloff: distance/time attenuation curves
//! - Multi-hit laser traversal and ballistic projectile stepping
//! - HealthPool / SectionHealth damage sinks
//!
//! Everything is engine-free: plain data and synchronous functions, driven
//! by an external simulation loop through the [`scene::CombatScene`]
//! collaborator trait.

pub mod armor;
pub mod combat;
pub mod config;
pub mod damage;
pub mod health;
pub mod modifier;
pub mod prelude;
pub mod scene;
pub mod telemetry;
pub mod traversal;
pub mod types;

// Re-export core types for convenience
pub use armor::{
    ArmorEntry, ArmorModifier, ArmorProfile, ArmorResolution, HitDirectionMemory,
    PenetrationClass,
};
pub use combat::{ArmoredTarget, DamageReceiver, DamageReport, TargetCategory, TargetFrame};
pub use config::{
    BallisticsConstants, CombatConstants, ConfigError, PenetrationConstants, TraversalConstants,
};
pub use damage::{DamagePacket, FalloffDomain, FalloffFactors, ResponseCurve, TravelFalloff};
pub use health::{DamageApplied, HealthPool, SectionHealth};
pub use modifier::{
    DamageChain, DamageModifier, DamageTypeResist, FriendlyFireGate, ModifierEffect, ModifierStep,
    ResistEntry, SectionModifier, SectionRule,
};
pub use scene::{AabbScene, CombatScene, RayHit, ReceiverHandle};
pub use telemetry::{DamageObserver, ImpactEvent, NullObserver, TracingObserver};
pub use traversal::{
    fire_laser, fire_laser_with_rng, HitResolution, LaserShot, PenetrationMaterial, Projectile,
    ProjectileStatus, Termination, TraversalOutcome,
};
pub use types::{
    BodyRegion, BuildingSection, ColliderId, DamageType, EntityId, FactionId, FactionTable,
    Hostility, Region, VehicleSection, WeaponTag,
};

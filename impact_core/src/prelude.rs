//! Prelude module for convenient imports
//!
//! ```rust
//! use impact_core::prelude::*;
//! ```

// Core types
pub use crate::types::{
    BodyRegion, BuildingSection, ColliderId, DamageType, EntityId, FactionId, FactionTable,
    Region, VehicleSection, WeaponTag,
};

// Damage events and falloff
pub use crate::damage::{DamagePacket, TravelFalloff};

// Armor resolution
pub use crate::armor::{ArmorModifier, ArmorProfile, HitDirectionMemory, PenetrationClass};

// Modifier chain
pub use crate::modifier::{DamageChain, DamageModifier, FriendlyFireGate, SectionModifier};

// Receivers and sinks
pub use crate::combat::{ArmoredTarget, DamageReceiver, DamageReport, TargetCategory, TargetFrame};
pub use crate::health::{HealthPool, SectionHealth};

// Traversal
pub use crate::traversal::{fire_laser, LaserShot, PenetrationMaterial, Projectile};

// Scene collaborator
pub use crate::scene::{AabbScene, CombatScene, RayHit};

// Telemetry
pub use crate::telemetry::{DamageObserver, ImpactEvent, NullObserver};

// Config
pub use crate::config::CombatConstants;

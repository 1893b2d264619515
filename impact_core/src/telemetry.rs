//! Structured debug events for tooling
//!
//! Observability only - nothing here feeds back into resolution. Observers
//! are injected into receivers at construction; there is no process-wide
//! event hook.

use crate::armor::PenetrationClass;
use crate::types::{DamageType, EntityId, Region, WeaponTag};
use serde::Serialize;
use tracing::debug;

/// One armor resolution, as seen by tooling
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImpactEvent {
    pub victim: EntityId,
    pub region: Region,
    pub angle_deg: f32,
    pub penetration_mm: f32,
    pub effective_thickness_mm: f32,
    pub damage_in: f32,
    pub damage_out: f32,
    pub classification: PenetrationClass,
    /// Index of the armor step in the receiver's modifier chain
    pub chain_index: usize,
    pub weapon: WeaponTag,
    pub damage_type: DamageType,
    /// Simulation time of the hit (seconds)
    pub time: f32,
}

/// Fire-and-forget sink for impact events.
///
/// Implementations must not panic or block; the pipeline calls them inline.
pub trait DamageObserver: Send + Sync {
    fn on_impact(&self, _event: &ImpactEvent) {}
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl DamageObserver for NullObserver {}

/// Forwards events to `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DamageObserver for TracingObserver {
    fn on_impact(&self, event: &ImpactEvent) {
        debug!(
            victim = event.victim.0,
            region = ?event.region,
            angle_deg = event.angle_deg,
            penetration_mm = event.penetration_mm,
            effective_thickness_mm = event.effective_thickness_mm,
            damage_in = event.damage_in,
            damage_out = event.damage_out,
            classification = %event.classification,
            weapon = ?event.weapon,
            damage_type = ?event.damage_type,
            time = event.time,
            "impact"
        );
    }
}

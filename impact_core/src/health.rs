//! Damage sinks - hit point pools for whole targets and their sections

use crate::types::Region;
use serde::{Deserialize, Serialize};

/// Outcome of applying damage to a pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageApplied {
    /// Amount actually removed from the pool
    pub applied: f32,
    /// True exactly once, on the transition from alive to dead
    pub killing_blow: bool,
}

impl DamageApplied {
    pub const NONE: DamageApplied = DamageApplied {
        applied: 0.0,
        killing_blow: false,
    };
}

/// A clamped hit point pool.
///
/// Dead pools are inert: further damage and healing are no-ops, and the
/// killing blow is reported exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthPool {
    max: f32,
    current: f32,
}

impl HealthPool {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        HealthPool { max, current: max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    /// Remove up to `amount` hit points (negative amounts are treated as 0)
    pub fn apply_damage(&mut self, amount: f32) -> DamageApplied {
        let amount = amount.max(0.0);
        if !self.is_alive() {
            return DamageApplied::NONE;
        }
        let applied = amount.min(self.current);
        self.current -= applied;
        DamageApplied {
            applied,
            killing_blow: self.current <= 0.0,
        }
    }

    /// Restore up to `amount` hit points, clamped at max. No-op when dead.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.is_alive() {
            return 0.0;
        }
        let healed = amount.max(0.0).min(self.max - self.current);
        self.current += healed;
        healed
    }
}

/// Outcome of applying damage to a section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionDamage {
    pub applied: f32,
    /// True exactly once, when the section's pool empties
    pub destroyed: bool,
}

impl SectionDamage {
    pub const NONE: SectionDamage = SectionDamage {
        applied: 0.0,
        destroyed: false,
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SectionPool {
    region: Region,
    pool: HealthPool,
}

/// Per-region hit point pools for sectioned targets (vehicles, buildings).
///
/// Regions without a pool absorb nothing and never report destruction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionHealth {
    sections: Vec<SectionPool>,
}

impl SectionHealth {
    pub fn new(sections: Vec<(Region, f32)>) -> Self {
        SectionHealth {
            sections: sections
                .into_iter()
                .map(|(region, max)| SectionPool {
                    region,
                    pool: HealthPool::new(max),
                })
                .collect(),
        }
    }

    pub fn apply_damage(&mut self, region: Region, amount: f32) -> SectionDamage {
        match self.sections.iter_mut().find(|s| s.region == region) {
            Some(section) => {
                let result = section.pool.apply_damage(amount);
                SectionDamage {
                    applied: result.applied,
                    destroyed: result.killing_blow,
                }
            }
            None => SectionDamage::NONE,
        }
    }

    pub fn is_destroyed(&self, region: Region) -> bool {
        self.sections
            .iter()
            .find(|s| s.region == region)
            .map(|s| !s.pool.is_alive())
            .unwrap_or(false)
    }

    pub fn current(&self, region: Region) -> Option<f32> {
        self.sections
            .iter()
            .find(|s| s.region == region)
            .map(|s| s.pool.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VehicleSection;

    #[test]
    fn test_damage_clamped_at_zero() {
        let mut pool = HealthPool::new(100.0);
        let result = pool.apply_damage(250.0);
        assert!((result.applied - 100.0).abs() < f32::EPSILON);
        assert!(result.killing_blow);
        assert!((pool.current() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_killing_blow_fires_once() {
        let mut pool = HealthPool::new(50.0);
        assert!(pool.apply_damage(50.0).killing_blow);
        // Dead pool is inert
        let again = pool.apply_damage(10.0);
        assert!(!again.killing_blow);
        assert!((again.applied - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_negative_damage_ignored() {
        let mut pool = HealthPool::new(100.0);
        let result = pool.apply_damage(-20.0);
        assert!((result.applied - 0.0).abs() < f32::EPSILON);
        assert!((pool.current() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_heal_clamped_at_max() {
        let mut pool = HealthPool::new(100.0);
        pool.apply_damage(30.0);
        let healed = pool.heal(50.0);
        assert!((healed - 30.0).abs() < f32::EPSILON);
        assert!((pool.current() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_dead_pool_cannot_heal() {
        let mut pool = HealthPool::new(100.0);
        pool.apply_damage(100.0);
        assert!((pool.heal(50.0) - 0.0).abs() < f32::EPSILON);
        assert!(!pool.is_alive());
    }

    #[test]
    fn test_section_destroyed_once() {
        let region = Region::Vehicle(VehicleSection::Tracks);
        let mut sections = SectionHealth::new(vec![(region, 40.0)]);

        let first = sections.apply_damage(region, 40.0);
        assert!(first.destroyed);
        assert!(sections.is_destroyed(region));

        let second = sections.apply_damage(region, 10.0);
        assert!(!second.destroyed);
    }

    #[test]
    fn test_untracked_region_absorbs_nothing() {
        let mut sections =
            SectionHealth::new(vec![(Region::Vehicle(VehicleSection::Front), 100.0)]);
        let result = sections.apply_damage(Region::Vehicle(VehicleSection::Rear), 50.0);
        assert_eq!(result, SectionDamage::NONE);
        assert!(!sections.is_destroyed(Region::Vehicle(VehicleSection::Rear)));
    }
}

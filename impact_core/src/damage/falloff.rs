//! Travel falloff - damage/penetration attenuation over distance and flight time
//!
//! Both domains map their input to a normalized progress `t` in `[0, 1]`
//! between configured `start`/`end` bounds, sample a response curve for
//! damage and penetration separately, and multiply together. Each domain is
//! clamped into its floor before combination and the product is clamped
//! again, so the evaluated multipliers never fall below the floors.
//!
//! Evaluation is a pure function of `(distance, time)` - no hidden state.

use serde::{Deserialize, Serialize};

/// One key of a piecewise-linear response curve
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurveKey {
    /// Normalized progress in [0, 1]
    pub t: f32,
    /// Multiplier at that progress
    pub value: f32,
}

/// Piecewise-linear curve sampled on normalized progress `[0, 1]`.
///
/// An empty key list behaves as the default linear `1 - t` ramp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseCurve {
    keys: Vec<CurveKey>,
}

impl ResponseCurve {
    /// Build a curve from keys; keys are sorted by progress
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));
        ResponseCurve { keys }
    }

    /// The default linear ramp from 1 at progress 0 to 0 at progress 1
    pub fn linear_ramp() -> Self {
        ResponseCurve::new(vec![
            CurveKey { t: 0.0, value: 1.0 },
            CurveKey { t: 1.0, value: 0.0 },
        ])
    }

    /// A flat curve returning the same multiplier everywhere
    pub fn constant(value: f32) -> Self {
        ResponseCurve::new(vec![CurveKey { t: 0.0, value }])
    }

    /// Sample the curve at normalized progress `t` (clamped into [0, 1])
    pub fn sample(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if self.keys.is_empty() {
            return 1.0 - t;
        }
        if t <= self.keys[0].t {
            return self.keys[0].value;
        }
        for window in self.keys.windows(2) {
            let (a, b) = (window[0], window[1]);
            if t <= b.t {
                let span = b.t - a.t;
                if span <= f32::EPSILON {
                    return b.value;
                }
                let local = (t - a.t) / span;
                return a.value + (b.value - a.value) * local;
            }
        }
        self.keys[self.keys.len() - 1].value
    }
}

/// Attenuation bounds and curves for one input domain (distance or time)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FalloffDomain {
    /// Input value at which attenuation begins
    pub start: f32,
    /// Input value at which attenuation is complete
    pub end: f32,
    /// Damage response over normalized progress; linear `1 - t` if absent
    #[serde(default)]
    pub damage_curve: Option<ResponseCurve>,
    /// Penetration response over normalized progress; linear `1 - t` if absent
    #[serde(default)]
    pub penetration_curve: Option<ResponseCurve>,
}

impl FalloffDomain {
    pub fn new(start: f32, end: f32) -> Self {
        FalloffDomain {
            start,
            end,
            damage_curve: None,
            penetration_curve: None,
        }
    }

    /// Normalized progress of `input` through [start, end]
    fn progress(&self, input: f32) -> f32 {
        if self.end <= self.start {
            // Degenerate bounds: step function at the end value
            return if input >= self.end { 1.0 } else { 0.0 };
        }
        ((input - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    /// Raw (unfloored) damage and penetration multipliers for `input`
    fn factors(&self, input: f32) -> (f32, f32) {
        let t = self.progress(input);
        let damage = match &self.damage_curve {
            Some(curve) => curve.sample(t),
            None => 1.0 - t,
        };
        let penetration = match &self.penetration_curve {
            Some(curve) => curve.sample(t),
            None => 1.0 - t,
        };
        (damage, penetration)
    }
}

/// Evaluated falloff multipliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FalloffFactors {
    pub damage: f32,
    pub penetration: f32,
}

impl FalloffFactors {
    pub const IDENTITY: FalloffFactors = FalloffFactors {
        damage: 1.0,
        penetration: 1.0,
    };
}

/// Distance- and time-of-flight-based attenuation configuration.
///
/// Authored once as static data, evaluated per hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelFalloff {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Attenuation over travel distance (meters)
    #[serde(default)]
    pub distance: Option<FalloffDomain>,
    /// Attenuation over flight time (seconds)
    #[serde(default)]
    pub time: Option<FalloffDomain>,
    /// Damage multiplier never drops below this
    #[serde(default)]
    pub min_damage_multiplier: f32,
    /// Penetration multiplier never drops below this
    #[serde(default)]
    pub min_penetration_multiplier: f32,
}

fn default_enabled() -> bool {
    true
}

impl Default for TravelFalloff {
    fn default() -> Self {
        TravelFalloff {
            enabled: true,
            distance: None,
            time: None,
            min_damage_multiplier: 0.0,
            min_penetration_multiplier: 0.0,
        }
    }
}

impl TravelFalloff {
    /// A falloff that never attenuates anything
    pub fn disabled() -> Self {
        TravelFalloff {
            enabled: false,
            ..Default::default()
        }
    }

    /// Evaluate the multipliers for a hit at `distance_m` meters and
    /// `time_s` seconds of flight. Both results lie in `[floor, 1]`.
    pub fn evaluate(&self, distance_m: f32, time_s: f32) -> FalloffFactors {
        if !self.enabled {
            return FalloffFactors::IDENTITY;
        }

        let damage_floor = self.min_damage_multiplier.clamp(0.0, 1.0);
        let penetration_floor = self.min_penetration_multiplier.clamp(0.0, 1.0);

        let mut damage = 1.0_f32;
        let mut penetration = 1.0_f32;

        let domains = [
            (self.distance.as_ref(), distance_m),
            (self.time.as_ref(), time_s),
        ];
        for (domain, input) in domains {
            if let Some(domain) = domain {
                let (d, p) = domain.factors(input);
                damage *= d.clamp(damage_floor, 1.0);
                penetration *= p.clamp(penetration_floor, 1.0);
            }
        }

        FalloffFactors {
            damage: damage.clamp(damage_floor, 1.0),
            penetration: penetration.clamp(penetration_floor, 1.0),
        }
    }
}

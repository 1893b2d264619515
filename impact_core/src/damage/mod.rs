//! Damage event data and travel attenuation

mod falloff;
mod packet;

pub use falloff::{CurveKey, FalloffDomain, FalloffFactors, ResponseCurve, TravelFalloff};
pub use packet::DamagePacket;

//! Example firing range - drives the impact_core pipeline end to end
//!
//! Builds a small scene (a steel door, an armored trooper, a light vehicle),
//! then fires through it:
//! - a rifle laser that punches through the door and hits the trooper
//! - a grenade whose armor angle comes from the hit-direction memory
//! - ballistic rounds that chew through the vehicle's front section
//!
//! Resolution reports are logged through `tracing`; armor impact events are
//! also emitted as JSON lines by a custom observer.

use glam::Vec3;
use impact_core::armor::estimate_incoming;
use impact_core::config::{self, CombatConstants};
use impact_core::prelude::*;
use impact_core::{
    fire_laser_with_rng, ArmorEntry, ArmorProfile, DamagePacket, DamageTypeResist,
    ProjectileStatus, ResistEntry,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Rifle falloff: full power to 25m, fading to a 20% floor at 400m
const RIFLE_FALLOFF: &str = r#"
enabled = true
min_damage_multiplier = 0.2
min_penetration_multiplier = 0.2

[distance]
start = 25.0
end = 400.0
"#;

/// Light vehicle armor layout
const VEHICLE_ARMOR: &str = r#"
[[entries]]
region = { vehicle = "front" }
thickness_mm = 30.0
material_coefficient = 1.1

[[entries]]
region = { vehicle = "side" }
thickness_mm = 12.0

[[entries]]
region = { vehicle = "rear" }
thickness_mm = 8.0
"#;

/// Observer that prints every armor impact event as a JSON line
struct JsonLineObserver;

impl DamageObserver for JsonLineObserver {
    fn on_impact(&self, event: &ImpactEvent) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(err) => warn!("failed to serialize impact event: {err}"),
        }
    }
}

fn trooper(observer: Arc<dyn DamageObserver>) -> ArmoredTarget {
    let profile = ArmorProfile::new(vec![
        ArmorEntry::new(Region::Body(BodyRegion::Head), 2.0),
        ArmorEntry::new(Region::Body(BodyRegion::Torso), 6.0),
    ]);
    if let Err(err) = profile.validate() {
        warn!("trooper armor profile rejected: {err}");
    }
    // Chain order: armor first, then the team gate, then the suit's
    // energy-dissipating weave
    ArmoredTarget::new(EntityId(10), FactionId(2), TargetCategory::Humanoid, 100.0)
        .with_modifier(Box::new(ArmorModifier::new(
            profile,
            CombatConstants::default().penetration,
        )))
        .with_modifier(Box::new(FriendlyFireGate::new(
            FactionId(2),
            FactionTable::new(),
        )))
        .with_modifier(Box::new(DamageTypeResist::new(vec![ResistEntry {
            damage_type: DamageType::Laser,
            multiplier: 0.9,
        }])))
        .with_observer(observer)
}

fn vehicle(observer: Arc<dyn DamageObserver>) -> ArmoredTarget {
    let profile: ArmorProfile = config::parse_toml(VEHICLE_ARMOR).expect("vehicle armor parses");
    profile.validate().expect("vehicle armor is well-formed");

    let front = Region::Vehicle(VehicleSection::Front);
    ArmoredTarget::new(EntityId(20), FactionId(2), TargetCategory::Vehicle, 400.0)
        .with_frame(TargetFrame {
            origin: Vec3::new(0.0, 0.0, 40.0),
            forward: -Vec3::Z,
            up: Vec3::Y,
            height: 2.0,
        })
        .with_modifier(Box::new(ArmorModifier::new(
            profile,
            CombatConstants::default().penetration,
        )))
        .with_sections(SectionHealth::new(vec![(front, 120.0)]))
        .with_observer(observer)
}

/// Flat-damage blast: every collider in the radius takes an explosive
/// packet. The incoming direction (for armor angle) comes from the
/// hit-direction memory when a recent ray touched the collider.
fn detonate(
    scene: &mut AabbScene,
    memory: &mut HitDirectionMemory,
    center: Vec3,
    radius: f32,
    damage: f32,
    now: f32,
) {
    for collider in scene.overlap_sphere(center, radius) {
        let incoming = estimate_incoming(Some(collider), None, center, memory, now);
        let mut packet = DamagePacket::new(
            EntityId(1),
            EntityId(0),
            damage,
            0.0,
            DamageType::Explosive,
            WeaponTag::Grenade,
        )
        .with_impact(center, incoming.map(|d| -d).unwrap_or(Vec3::Y))
        .with_collider(collider)
        .with_faction(FactionId(1))
        .with_time(now);
        if let Some(direction) = incoming {
            packet = packet.with_incoming(direction);
        }

        if let Some(receiver) = scene.receiver_mut(collider) {
            let report = receiver.take_damage(&packet);
            info!("blast: {}", report.summary());
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let constants = CombatConstants::default();
    let falloff: TravelFalloff = config::parse_toml(RIFLE_FALLOFF).expect("falloff parses");
    let observer: Arc<dyn DamageObserver> = Arc::new(JsonLineObserver);
    let mut memory = HitDirectionMemory::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    // --- Scene: a steel door at 10m, the trooper behind it, a vehicle at 40m
    let mut scene = AabbScene::new();

    let door = scene.add_box(Vec3::new(-1.0, 0.0, 10.0), Vec3::new(1.0, 2.5, 10.1));
    scene.set_material(door, PenetrationMaterial::plate(8.0).with_deflection(2.0));

    let trooper_box = scene.add_box(Vec3::new(-0.4, 0.0, 20.0), Vec3::new(0.4, 1.8, 20.5));
    scene.set_region(trooper_box, Region::Body(BodyRegion::Torso));
    let trooper_handle = scene.add_receiver(Box::new(trooper(observer.clone())));
    scene.bind_receiver(trooper_box, trooper_handle);

    let vehicle_box = scene.add_box(Vec3::new(-2.0, 0.0, 40.0), Vec3::new(2.0, 2.0, 43.0));
    scene.set_material(vehicle_box, PenetrationMaterial::plate(30.0).with_speed_loss(0.6));
    let vehicle_handle = scene.add_receiver(Box::new(vehicle(observer.clone())));
    scene.bind_receiver(vehicle_box, vehicle_handle);

    // --- Shot 1: rifle laser through the door into the trooper
    info!("firing laser through the door");
    let shot = LaserShot::new(Vec3::new(0.0, 1.2, 0.0), Vec3::Z, 300.0, 45.0, 16.0)
        .with_weapon(WeaponTag::Rifle)
        .with_attacker(EntityId(1))
        .with_faction(FactionId(1));
    let outcome = fire_laser_with_rng(
        &shot, &falloff, &mut scene, &mut memory, &constants, 0.0, &mut rng,
    );
    for hit in &outcome.hits {
        match &hit.report {
            Some(report) => info!(
                distance = hit.distance,
                "contact: {}",
                report.summary()
            ),
            None => info!(distance = hit.distance, "contact: scenery"),
        }
    }
    info!(
        termination = ?outcome.termination,
        delivered = outcome.delivered_damage(),
        "laser resolved"
    );

    // --- Shot 2: grenade blast next to the trooper. No ray here, so the
    //     incoming direction falls back to the hit-direction memory the
    //     laser just populated.
    info!("grenade detonating by the trooper");
    detonate(
        &mut scene,
        &mut memory,
        Vec3::new(0.0, 1.0, 19.5),
        3.0,
        35.0,
        0.3,
    );

    // --- Shot 3: ballistic rounds into the vehicle front until the section
    //     gives out
    info!("engaging vehicle with ballistic rounds");
    let dt = 1.0 / 60.0;
    let mut now = 1.0;
    for round_index in 0..4 {
        // Fired from a lane clear of the door and the trooper
        let mut round = Projectile::new(
            Vec3::new(1.5, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 850.0),
            now,
            70.0,
            40.0,
        )
        .with_weapon(WeaponTag::Cannon)
        .with_attacker(EntityId(1))
        .with_faction(FactionId(1));

        loop {
            now += dt;
            match round.step(dt, &falloff, &mut scene, &mut memory, &constants, now) {
                ProjectileStatus::InFlight => continue,
                ProjectileStatus::Impacted(resolution) => {
                    if let Some(report) = &resolution.report {
                        info!(
                            round = round_index,
                            distance = resolution.distance,
                            "impact: {}",
                            report.summary()
                        );
                    }
                    break;
                }
                ProjectileStatus::Expired => {
                    info!(round = round_index, "round expired without contact");
                    break;
                }
            }
        }
    }

    info!("range session complete");
}

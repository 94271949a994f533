use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::collisions::{CollisionDetector, DirectDetector};
use crate::color::Color;
use crate::error::SandboxError;
use crate::forces::DEFAULT_G;
use crate::presets::{Preset, load_preset};
use crate::state::SystemState;

fn center() -> Point2<f64> {
    Point2::new(400.0, 300.0)
}

#[test]
fn test_preset_body_counts() {
    let mut rng = ChaChaRng::seed_from_u64(1);

    assert_eq!(Preset::SolarSystem.bodies(DEFAULT_G, &mut rng).len(), 4);
    assert_eq!(Preset::BinaryStars.bodies(DEFAULT_G, &mut rng).len(), 3);
    assert_eq!(Preset::ChaoticThreeBody.bodies(DEFAULT_G, &mut rng).len(), 3);
    assert_eq!(Preset::GalaxyFormation.bodies(DEFAULT_G, &mut rng).len(), 21);
}

#[test]
fn test_solar_system_layout() {
    let mut system = SystemState::new();
    load_preset(&mut system, Preset::SolarSystem, center(), DEFAULT_G, 0).unwrap();

    let sun = &system.bodies[0];
    assert_eq!(sun.position, center());
    assert_eq!(sun.mass, 2000.0);
    assert_eq!(sun.velocity, Vector2::zeros());
    assert_eq!(sun.color, Color::new(0xff, 0xff, 0x00));

    let inner = &system.bodies[1];
    assert_eq!(inner.position, Point2::new(550.0, 300.0));
    assert_eq!(inner.velocity, Vector2::new(0.0, 3.0));
    assert_eq!(inner.previous_position, Point2::new(550.0, 297.0));
}

#[test]
fn test_presets_start_without_overlaps() {
    for preset in Preset::ALL {
        let mut system = SystemState::new();
        load_preset(&mut system, preset, center(), DEFAULT_G, 42).unwrap();

        assert!(
            DirectDetector.first_overlap(&system.bodies).is_none(),
            "{preset} starts with overlapping bodies"
        );
    }
}

#[test]
fn test_load_preset_replaces_bodies() {
    let mut system = SystemState::new();
    system
        .add_body(1.0, Point2::origin(), Vector2::zeros(), Color::WHITE)
        .unwrap();
    system.time = 10.0;

    load_preset(&mut system, Preset::ChaoticThreeBody, center(), DEFAULT_G, 0).unwrap();

    assert_eq!(system.body_count(), 3);
    assert_eq!(system.time, 0.0);
    assert_relative_eq!(system.total_mass(), 1500.0);
}

#[test]
fn test_galaxy_is_reproducible_for_a_seed() {
    let mut a = SystemState::new();
    let mut b = SystemState::new();
    load_preset(&mut a, Preset::GalaxyFormation, center(), DEFAULT_G, 9).unwrap();
    load_preset(&mut b, Preset::GalaxyFormation, center(), DEFAULT_G, 9).unwrap();

    assert_eq!(a.bodies, b.bodies);

    let mut c = SystemState::new();
    load_preset(&mut c, Preset::GalaxyFormation, center(), DEFAULT_G, 10).unwrap();
    assert_ne!(a.bodies, c.bodies);
}

#[test]
fn test_galaxy_arm_parameters() {
    let mut rng = ChaChaRng::seed_from_u64(3);
    let bodies = Preset::GalaxyFormation.bodies(DEFAULT_G, &mut rng);

    assert_eq!(bodies[0].mass, 3000.0);

    for (i, arm) in bodies[1..].iter().enumerate() {
        let radius = 100.0 + i as f64 * 15.0;
        assert_relative_eq!(arm.position.coords.magnitude(), radius, epsilon = 1e-9);

        // Sub-circular: 80% of sqrt(G M / r), tangent to the radius
        let speed = (DEFAULT_G * 3000.0 / radius).sqrt() * 0.8;
        assert_relative_eq!(arm.velocity.magnitude(), speed, epsilon = 1e-9);
        assert!(arm.position.coords.dot(&arm.velocity).abs() < 1e-9);

        assert!((20.0..50.0).contains(&arm.mass));
        assert!(arm.color.b >= arm.color.r);
    }
}

#[test]
fn test_galaxy_speed_follows_gravity() {
    let mut rng = ChaChaRng::seed_from_u64(3);
    let weak = Preset::GalaxyFormation.bodies(0.1, &mut rng);
    let mut rng = ChaChaRng::seed_from_u64(3);
    let strong = Preset::GalaxyFormation.bodies(0.4, &mut rng);

    assert_relative_eq!(
        strong[1].velocity.magnitude(),
        weak[1].velocity.magnitude() * 2.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_preset_cycle_and_names() {
    assert_eq!(Preset::SolarSystem.next(), Preset::BinaryStars);
    assert_eq!(Preset::GalaxyFormation.next(), Preset::SolarSystem);

    for preset in Preset::ALL {
        assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
    }
    assert_eq!("binary-stars".parse::<Preset>().unwrap(), Preset::BinaryStars);
    assert_eq!("chaotic_three_body".parse::<Preset>().unwrap(), Preset::ChaoticThreeBody);
    assert!(matches!(
        "asteroid belt".parse::<Preset>(),
        Err(SandboxError::UnknownPreset(_))
    ));
}

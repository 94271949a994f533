use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId};
use crate::color::Color;
use crate::forces::gravity::{DirectGravity, softened_force};
use crate::forces::{ForceModel, SOFTENING, accumulate_accelerations};

const G: f64 = 0.1;

fn body(id: u32, mass: f64, x: f64, y: f64) -> Body {
    Body::new(
        BodyId(id),
        mass,
        Point2::new(x, y),
        Vector2::zeros(),
        Color::WHITE,
    )
    .unwrap()
}

#[test]
fn test_acceleration_toward_other_body() {
    let bodies = vec![body(0, 10.0, 0.0, 0.0), body(1, 1000.0, 100.0, 0.0)];

    let gravity = DirectGravity::new();
    let accel = gravity.acceleration(0, &bodies, G);

    // Should point toward the heavy body (positive x)
    assert!(accel.x > 0.0);
    assert!(accel.y.abs() < 1e-12);
}

#[test]
fn test_acceleration_magnitude() {
    let bodies = vec![body(0, 10.0, 0.0, 0.0), body(1, 1000.0, 0.0, 30.0)];

    let gravity = DirectGravity::new();
    let accel = gravity.acceleration(0, &bodies, G);

    // a = G * M / (r² + softening) = 0.1 * 1000 / (900 + 25)
    let expected = G * 1000.0 / (900.0 + SOFTENING);
    assert_relative_eq!(accel.magnitude(), expected, max_relative = 1e-12);
    assert_relative_eq!(accel.y, expected, max_relative = 1e-12);
}

#[test]
fn test_receiver_mass_cancels() {
    let light = vec![body(0, 1.0, 0.0, 0.0), body(1, 500.0, 40.0, 0.0)];
    let heavy = vec![body(0, 250.0, 0.0, 0.0), body(1, 500.0, 40.0, 0.0)];

    let gravity = DirectGravity::new();
    assert_relative_eq!(
        gravity.acceleration(0, &light, G).x,
        gravity.acceleration(0, &heavy, G).x,
        max_relative = 1e-12
    );
}

#[test]
fn test_softened_force_symmetry() {
    let gravity = DirectGravity::new();

    for separation in [0.0, 1e-9, 0.5, 5.0, 50.0, 5000.0] {
        let a = body(0, 30.0, 10.0, -4.0);
        let b = body(1, 700.0, 10.0 + separation, -4.0);

        let f_ab = softened_force(G, a.mass, b.mass, a.distance_to(&b), SOFTENING);
        let f_ba = softened_force(G, b.mass, a.mass, b.distance_to(&a), SOFTENING);
        assert_relative_eq!(f_ab, f_ba, max_relative = 1e-15);

        // Momentum exchange is equal and opposite: m_a a_a = -m_b a_b
        let bodies = vec![a, b];
        let p_a = gravity.acceleration(0, &bodies, G) * a.mass;
        let p_b = gravity.acceleration(1, &bodies, G) * b.mass;
        assert_relative_eq!(p_a.x, -p_b.x, max_relative = 1e-12);
        assert_relative_eq!(p_a.y, -p_b.y, epsilon = 1e-15);
    }
}

#[test]
fn test_softening_bounds_force() {
    let at_zero = softened_force(G, 100.0, 100.0, 0.0, SOFTENING);
    assert_relative_eq!(at_zero, G * 100.0 * 100.0 / SOFTENING);

    for separation in [1e-12, 1e-3, 1.0, 3.0] {
        assert!(softened_force(G, 100.0, 100.0, separation, SOFTENING) <= at_zero);
    }
}

#[test]
fn test_softening_reduces_force() {
    let bodies = vec![body(0, 10.0, 0.0, 0.0), body(1, 10.0, 3.0, 0.0)];

    let sharp = DirectGravity::with_softening(0.0);
    let soft = DirectGravity::new();

    assert!(soft.acceleration(0, &bodies, G).x < sharp.acceleration(0, &bodies, G).x);
}

#[test]
fn test_coincident_bodies_are_finite() {
    let bodies = vec![
        body(0, 100.0, 5.0, 5.0),
        body(1, 200.0, 5.0, 5.0),
        body(2, 300.0, 5.0, 5.0),
    ];

    let gravity = DirectGravity::new();
    for idx in 0..bodies.len() {
        let accel = gravity.acceleration(idx, &bodies, G);
        assert!(accel.x.is_finite() && accel.y.is_finite());
    }
}

#[test]
fn test_zero_gravity_gives_zero_acceleration() {
    let bodies = vec![body(0, 10.0, 0.0, 0.0), body(1, 10.0, 30.0, 0.0)];
    let accel = DirectGravity::new().acceleration(0, &bodies, 0.0);
    assert_eq!(accel, Vector2::zeros());
}

#[test]
fn test_acceleration_excluding_skips_by_id() {
    let bodies = vec![body(7, 10.0, 0.0, 0.0), body(8, 1000.0, 100.0, 0.0)];
    let gravity = DirectGravity::new();

    let with_self_excluded = gravity.acceleration_excluding(
        &bodies[0].position,
        bodies[0].mass,
        &bodies,
        Some(BodyId(7)),
        G,
    );
    assert_relative_eq!(
        with_self_excluded.x,
        gravity.acceleration(0, &bodies, G).x,
        max_relative = 1e-12
    );

    let nothing_excluded =
        gravity.acceleration_excluding(&Point2::new(50.0, 0.0), 1.0, &bodies, None, G);
    // Heavy body on the right dominates
    assert!(nothing_excluded.x > 0.0);
}

#[test]
fn test_accumulate_uses_pre_update_positions() {
    let mut bodies = vec![
        body(0, 100.0, 0.0, 0.0),
        body(1, 100.0, 20.0, 0.0),
        body(2, 100.0, 0.0, 20.0),
    ];
    let gravity = DirectGravity::new();

    let expected: Vec<Vector2<f64>> = (0..bodies.len())
        .map(|i| gravity.acceleration(i, &bodies, G))
        .collect();

    accumulate_accelerations(&gravity, &mut bodies, G);

    for (body, accel) in bodies.iter().zip(expected) {
        assert_eq!(body.acceleration, accel);
    }
    // Positions are untouched by the force pass
    assert_eq!(bodies[1].position, Point2::new(20.0, 0.0));
}

#[test]
fn test_potential_energy_is_negative_and_decreases_with_distance() {
    let gravity = DirectGravity::new();

    let near = vec![body(0, 100.0, 0.0, 0.0), body(1, 100.0, 10.0, 0.0)];
    let far = vec![body(0, 100.0, 0.0, 0.0), body(1, 100.0, 1000.0, 0.0)];

    let u_near = gravity.potential_energy(&near, G);
    let u_far = gravity.potential_energy(&far, G);

    assert!(u_near < u_far);
    assert!(u_far < 0.0);
}

#[test]
fn test_potential_energy_matches_force() {
    // dU/dr should equal the softened force magnitude
    let gravity = DirectGravity::new();
    let r = 12.0;
    let h = 1e-5;

    let u = |d: f64| {
        let pair = [body(0, 40.0, 0.0, 0.0), body(1, 60.0, d, 0.0)];
        gravity.potential_energy(&pair, G)
    };
    let derivative = (u(r + h) - u(r - h)) / (2.0 * h);

    assert_relative_eq!(
        derivative,
        softened_force(G, 40.0, 60.0, r, SOFTENING),
        max_relative = 1e-6
    );
}

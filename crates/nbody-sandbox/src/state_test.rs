use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::BodyId;
use crate::color::Color;
use crate::error::SandboxError;
use crate::state::SystemState;

#[test]
fn test_new_system() {
    let system = SystemState::new();

    assert_eq!(system.time, 0.0);
    assert_eq!(system.body_count(), 0);
    assert_eq!(system.total_mass(), 0.0);
    assert_eq!(system.average_speed(), 0.0);
    assert!(system.barycenter().is_none());
}

#[test]
fn test_add_body() {
    let mut system = SystemState::new();

    let id1 = system
        .add_body(20.0, Point2::new(150.0, 0.0), Vector2::new(0.0, 3.0), Color::WHITE)
        .unwrap();
    let id2 = system
        .add_body(30.0, Point2::new(250.0, 0.0), Vector2::new(0.0, 2.5), Color::WHITE)
        .unwrap();

    assert_eq!(system.body_count(), 2);
    assert_eq!(id1.0, 0);
    assert_eq!(id2.0, 1);
}

#[test]
fn test_add_invalid_body_leaves_system_untouched() {
    let mut system = SystemState::new();
    system
        .add_body(20.0, Point2::origin(), Vector2::zeros(), Color::WHITE)
        .unwrap();

    let result = system.add_body(0.0, Point2::new(10.0, 0.0), Vector2::zeros(), Color::WHITE);

    assert!(matches!(result, Err(SandboxError::InvalidMass(_))));
    assert_eq!(system.body_count(), 1);

    // The failed insert did not burn an ID
    let next = system
        .add_body(5.0, Point2::new(10.0, 0.0), Vector2::zeros(), Color::WHITE)
        .unwrap();
    assert_eq!(next, BodyId(1));
}

#[test]
fn test_remove_body() {
    let mut system = SystemState::new();

    let id = system
        .add_body(20.0, Point2::new(150.0, 0.0), Vector2::zeros(), Color::WHITE)
        .unwrap();
    assert_eq!(system.body_count(), 1);

    let removed = system.remove_body(id);
    assert!(removed.is_some());
    assert_eq!(removed.unwrap().id, id);
    assert_eq!(system.body_count(), 0);

    assert!(system.remove_body(id).is_none());
}

#[test]
fn test_ids_are_never_reused() {
    let mut system = SystemState::new();

    let first = system
        .add_body(1.0, Point2::origin(), Vector2::zeros(), Color::WHITE)
        .unwrap();
    system.remove_body(first);

    let reserved = system.allocate_id();
    let second = system
        .add_body(1.0, Point2::origin(), Vector2::zeros(), Color::WHITE)
        .unwrap();

    assert_ne!(first, reserved);
    assert_ne!(reserved, second);
    assert_ne!(first, second);
}

#[test]
fn test_get_body() {
    let mut system = SystemState::new();
    let id = system
        .add_body(1.0, Point2::origin(), Vector2::zeros(), Color::new(1, 2, 3))
        .unwrap();

    assert_eq!(system.get_body(id).unwrap().color, Color::new(1, 2, 3));
    assert!(system.get_body(BodyId(99)).is_none());
}

#[test]
fn test_restore_body_keeps_previous_position() {
    let mut system = SystemState::new();

    let id = system
        .restore_body(
            10.0,
            Point2::new(5.0, 5.0),
            Vector2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
            Color::WHITE,
        )
        .unwrap();

    let body = system.get_body(id).unwrap();
    assert_eq!(body.previous_position, Point2::new(0.0, 0.0));
    assert_eq!(body.velocity, Vector2::new(1.0, 0.0));
}

#[test]
fn test_total_mass_and_momentum() {
    let mut system = SystemState::new();
    system
        .add_body(2.0, Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Color::WHITE)
        .unwrap();
    system
        .add_body(3.0, Point2::new(10.0, 0.0), Vector2::new(0.0, -2.0), Color::WHITE)
        .unwrap();

    assert_eq!(system.total_mass(), 5.0);
    assert_eq!(system.total_momentum(), Vector2::new(2.0, -6.0));
}

#[test]
fn test_kinetic_energy_and_average_speed() {
    let mut system = SystemState::new();
    system
        .add_body(2.0, Point2::new(0.0, 0.0), Vector2::new(3.0, 4.0), Color::WHITE)
        .unwrap();
    system
        .add_body(4.0, Point2::new(10.0, 0.0), Vector2::new(1.0, 0.0), Color::WHITE)
        .unwrap();

    // 0.5 * 2 * 25 + 0.5 * 4 * 1
    assert_relative_eq!(system.kinetic_energy(), 27.0);
    assert_relative_eq!(system.average_speed(), 3.0);
}

#[test]
fn test_barycenter() {
    let mut system = SystemState::new();
    system
        .add_body(1.0, Point2::new(0.0, 0.0), Vector2::zeros(), Color::WHITE)
        .unwrap();
    system
        .add_body(3.0, Point2::new(8.0, 4.0), Vector2::zeros(), Color::WHITE)
        .unwrap();

    let center = system.barycenter().unwrap();
    assert_relative_eq!(center.x, 6.0);
    assert_relative_eq!(center.y, 3.0);
}

#[test]
fn test_clear_resets_time() {
    let mut system = SystemState::new();
    system
        .add_body(1.0, Point2::origin(), Vector2::zeros(), Color::WHITE)
        .unwrap();
    system.time = 42.0;

    system.clear();

    assert_eq!(system.body_count(), 0);
    assert_eq!(system.time, 0.0);
}

//! Force models for N-body simulations
//!
//! This module provides the `ForceModel` trait, the softened direct-sum
//! gravity that implements it, and the two-pass accumulation used by a tick.

use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId};

pub mod gravity;

#[cfg(test)]
mod gravity_test;

pub use gravity::DirectGravity;

/// Default gravitational constant in sandbox units
pub const DEFAULT_G: f64 = 0.1;

/// Default softening term added to the squared separation
pub const SOFTENING: f64 = 25.0;

/// A pairwise source of acceleration
///
/// Implementors provide the pair law; the provided methods sum it over a
/// body set. Sums are not symmetrized: each receiver independently adds the
/// contribution of every other body, so every pair is evaluated twice.
///
/// # Examples
///
/// ```
/// use nbody_sandbox::forces::{DirectGravity, ForceModel};
/// use nbody_sandbox::body::{Body, BodyId};
/// use nbody_sandbox::color::Color;
/// use nalgebra::{Point2, Vector2};
///
/// let bodies = vec![
///     Body::new(BodyId(0), 100.0, Point2::new(0.0, 0.0), Vector2::zeros(), Color::WHITE).unwrap(),
///     Body::new(BodyId(1), 100.0, Point2::new(50.0, 0.0), Vector2::zeros(), Color::WHITE).unwrap(),
/// ];
///
/// let gravity = DirectGravity::new();
/// let accel = gravity.acceleration(0, &bodies, 0.1);
///
/// // Pulled toward the other body
/// assert!(accel.x > 0.0);
/// ```
pub trait ForceModel: Send + Sync {
    /// Acceleration felt by a receiver at `position` with `mass` due to `source`
    fn pair_acceleration(
        &self,
        position: &Point2<f64>,
        mass: f64,
        source: &Body,
        g: f64,
    ) -> Vector2<f64>;

    /// Net acceleration on `bodies[idx]` from every other entry of `bodies`
    fn acceleration(&self, idx: usize, bodies: &[Body], g: f64) -> Vector2<f64> {
        let body = &bodies[idx];
        bodies
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != idx)
            .map(|(_, other)| self.pair_acceleration(&body.position, body.mass, other, g))
            .fold(Vector2::zeros(), |acc, a| acc + a)
    }

    /// Net acceleration on a free receiver, skipping the body with id `exclude`
    ///
    /// Used by the forecaster, where the receiver is a scratch copy that may or
    /// may not correspond to a live body.
    fn acceleration_excluding(
        &self,
        position: &Point2<f64>,
        mass: f64,
        bodies: &[Body],
        exclude: Option<BodyId>,
        g: f64,
    ) -> Vector2<f64> {
        bodies
            .iter()
            .filter(|other| Some(other.id) != exclude)
            .map(|other| self.pair_acceleration(position, mass, other, g))
            .fold(Vector2::zeros(), |acc, a| acc + a)
    }

    /// Potential energy of the whole set (optional)
    ///
    /// Default implementation returns 0.0.
    fn potential_energy(&self, _bodies: &[Body], _g: f64) -> f64 {
        0.0
    }
}

/// Recompute every body's acceleration from the current positions
///
/// All accelerations are computed against an immutable view first and only
/// then written back, so no body sees a partially updated set.
pub fn accumulate_accelerations(force: &dyn ForceModel, bodies: &mut [Body], g: f64) {
    let accelerations: Vec<Vector2<f64>> = (0..bodies.len())
        .map(|i| force.acceleration(i, bodies, g))
        .collect();

    bodies
        .iter_mut()
        .zip(accelerations)
        .for_each(|(body, accel)| body.acceleration = accel);
}

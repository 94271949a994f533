//! Overlap detection between body discs

use crate::body::Body;

/// Upper bound on the energy scalar handed to the effects layer
pub const MAX_COLLISION_ENERGY: f64 = 5.0;

/// Scale from relative speed × total mass to effect energy
const ENERGY_SCALE: f64 = 0.001;

/// Visual intensity of a collision
///
/// `min(5, |v_a - v_b| * (m_a + m_b) * 0.001)`, computed from the parents'
/// display velocities just before they merge.
///
/// # Examples
///
/// ```
/// use nbody_sandbox::body::{Body, BodyId};
/// use nbody_sandbox::collisions::collision_energy;
/// use nbody_sandbox::color::Color;
/// use nalgebra::{Point2, Vector2};
///
/// let a = Body::new(BodyId(0), 500.0, Point2::origin(), Vector2::new(1.0, 0.0), Color::WHITE).unwrap();
/// let b = Body::new(BodyId(1), 500.0, Point2::origin(), Vector2::new(-1.0, 0.0), Color::WHITE).unwrap();
///
/// // 2.0 * 1000.0 * 0.001
/// assert!((collision_energy(&a, &b) - 2.0).abs() < 1e-12);
/// ```
pub fn collision_energy(a: &Body, b: &Body) -> f64 {
    let relative_speed = (a.velocity - b.velocity).magnitude();
    let total_mass = a.mass + b.mass;
    (relative_speed * total_mass * ENERGY_SCALE).min(MAX_COLLISION_ENERGY)
}

/// Collision detector trait
pub trait CollisionDetector: Send + Sync {
    /// First overlapping pair `(i, j)` with `i < j` in scan order, if any
    fn first_overlap(&self, bodies: &[Body]) -> Option<(usize, usize)>;
}

/// Direct O(N²) detector
///
/// Scans unordered pairs `i < j` in collection order, so the first pair it
/// reports is deterministic for a given body ordering.
///
/// # Examples
///
/// ```
/// use nbody_sandbox::body::{Body, BodyId};
/// use nbody_sandbox::collisions::{CollisionDetector, DirectDetector};
/// use nbody_sandbox::color::Color;
/// use nalgebra::{Point2, Vector2};
///
/// // radius of a mass-8 body is 4
/// let bodies = vec![
///     Body::new(BodyId(0), 8.0, Point2::new(0.0, 0.0), Vector2::zeros(), Color::WHITE).unwrap(),
///     Body::new(BodyId(1), 8.0, Point2::new(100.0, 0.0), Vector2::zeros(), Color::WHITE).unwrap(),
///     Body::new(BodyId(2), 8.0, Point2::new(5.0, 0.0), Vector2::zeros(), Color::WHITE).unwrap(),
/// ];
///
/// assert_eq!(DirectDetector.first_overlap(&bodies), Some((0, 2)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectDetector;

impl CollisionDetector for DirectDetector {
    fn first_overlap(&self, bodies: &[Body]) -> Option<(usize, usize)> {
        let n = bodies.len();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .find(|&(i, j)| bodies[i].overlaps(&bodies[j]))
    }
}

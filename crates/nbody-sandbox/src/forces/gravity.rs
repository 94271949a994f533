//! Direct N-body gravity (O(N²) implementation) with a softened force law

use nalgebra::{Point2, Vector2};

use crate::body::Body;
use crate::forces::{ForceModel, SOFTENING};

/// Magnitude of the softened attraction between two masses
///
/// `G * m_a * m_b / (distance² + softening)`. With a positive softening the
/// denominator never drops below `softening`, even at zero separation.
///
/// # Examples
///
/// ```
/// use nbody_sandbox::forces::gravity::softened_force;
///
/// // 0.1 * 10 * 10 / (0 + 25)
/// assert!((softened_force(0.1, 10.0, 10.0, 0.0, 25.0) - 0.4).abs() < 1e-12);
/// ```
pub fn softened_force(g: f64, mass_a: f64, mass_b: f64, distance: f64, softening: f64) -> f64 {
    g * mass_a * mass_b / (distance * distance + softening)
}

/// Direct O(N²) gravitational force computation
///
/// Sums the softened attraction of every other body. Simple and exact,
/// which is all the sandbox needs at interactive body counts.
///
/// # Examples
///
/// ```
/// use nbody_sandbox::forces::{DirectGravity, ForceModel};
/// use nbody_sandbox::body::{Body, BodyId};
/// use nbody_sandbox::color::Color;
/// use nalgebra::{Point2, Vector2};
///
/// let sun = Body::new(BodyId(0), 1000.0, Point2::origin(), Vector2::zeros(), Color::WHITE).unwrap();
///
/// let gravity = DirectGravity::new();
/// let accel = gravity.pair_acceleration(&Point2::new(100.0, 0.0), 1.0, &sun, 0.1);
///
/// // Should point toward the sun (negative x direction)
/// assert!(accel.x < 0.0);
/// assert_eq!(accel.y, 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DirectGravity {
    /// Added to the squared separation to bound the force at close range
    pub softening: f64,
}

impl DirectGravity {
    /// Creates a new direct gravity force with the default softening of 25
    pub fn new() -> Self {
        Self {
            softening: SOFTENING,
        }
    }

    /// Creates a new direct gravity force with a specific softening term
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody_sandbox::forces::DirectGravity;
    ///
    /// let sharp = DirectGravity::with_softening(1.0);
    /// assert_eq!(sharp.softening, 1.0);
    /// ```
    pub fn with_softening(softening: f64) -> Self {
        Self { softening }
    }
}

impl Default for DirectGravity {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for DirectGravity {
    fn pair_acceleration(
        &self,
        position: &Point2<f64>,
        mass: f64,
        source: &Body,
        g: f64,
    ) -> Vector2<f64> {
        let dr = source.position - position;
        let distance = dr.magnitude();

        // Coincident bodies have no direction to pull along
        if distance == 0.0 {
            return Vector2::zeros();
        }

        let force = softened_force(g, mass, source.mass, distance, self.softening);
        dr * (force / distance / mass)
    }

    /// Potential consistent with the softened law
    ///
    /// For `eps = sqrt(softening)`, `U(r) = G m M / eps * (atan(r / eps) - π/2)`,
    /// whose derivative is exactly the softened force and which vanishes at
    /// infinity. Falls back to `-G m M / r` when softening is zero.
    fn potential_energy(&self, bodies: &[Body], g: f64) -> f64 {
        let eps = self.softening.max(0.0).sqrt();

        bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                bodies[i + 1..].iter().map(move |b| {
                    let r = a.distance_to(b);
                    let gmm = g * a.mass * b.mass;
                    if eps > 0.0 {
                        gmm / eps * ((r / eps).atan() - std::f64::consts::FRAC_PI_2)
                    } else if r > 0.0 {
                        -gmm / r
                    } else {
                        0.0
                    }
                })
            })
            .sum()
    }
}

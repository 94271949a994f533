use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Result, SandboxError, ensure_finite};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Radius of a body as a function of its mass: `cbrt(mass) * 2`
pub fn radius_for_mass(mass: f64) -> f64 {
    mass.cbrt() * 2.0
}

/// Position-based kinematic state shared by both stepping strategies
///
/// Verlet treats (`position`, `previous_position`) as ground truth and derives
/// `velocity`; semi-implicit Euler does the opposite. Keeping the three fields
/// together lets both integrators sit behind the same `advance` contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub position: Point2<f64>,
    pub previous_position: Point2<f64>,
    pub velocity: Vector2<f64>,
}

impl Kinematics {
    /// Cold-start state: the previous sample sits one unit-step behind along `velocity`
    pub fn from_velocity(position: Point2<f64>, velocity: Vector2<f64>) -> Self {
        Self {
            position,
            previous_position: position - velocity,
            velocity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub mass: f64,
    /// Derived from mass, see [`radius_for_mass`]
    pub radius: f64,
    pub position: Point2<f64>,
    /// Position at the previous tick, required by Verlet
    pub previous_position: Point2<f64>,
    /// Display velocity, re-derived from position samples every tick
    pub velocity: Vector2<f64>,
    /// Transient, recomputed at the start of every tick
    pub acceleration: Vector2<f64>,
    pub color: Color,
}

impl Body {
    /// Creates a body with its previous position one step behind along `velocity`
    ///
    /// Mass must be positive; every coordinate must be finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody_sandbox::body::{Body, BodyId};
    /// use nbody_sandbox::color::Color;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let body = Body::new(
    ///     BodyId(0),
    ///     8.0,
    ///     Point2::new(10.0, 0.0),
    ///     Vector2::new(0.0, 2.0),
    ///     Color::WHITE,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(body.radius, 4.0);
    /// assert_eq!(body.previous_position, Point2::new(10.0, -2.0));
    ///
    /// assert!(Body::new(BodyId(1), 0.0, Point2::origin(), Vector2::zeros(), Color::WHITE).is_err());
    /// ```
    pub fn new(
        id: BodyId,
        mass: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        color: Color,
    ) -> Result<Self> {
        Self::restore(id, mass, position, velocity, position - velocity, color)
    }

    /// Rebuilds a body from a full kinematic record, e.g. a save file
    pub fn restore(
        id: BodyId,
        mass: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        previous_position: Point2<f64>,
        color: Color,
    ) -> Result<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SandboxError::InvalidMass(mass));
        }
        ensure_finite("x", position.x)?;
        ensure_finite("y", position.y)?;
        ensure_finite("vx", velocity.x)?;
        ensure_finite("vy", velocity.y)?;
        ensure_finite("oldX", previous_position.x)?;
        ensure_finite("oldY", previous_position.y)?;

        Ok(Body {
            id,
            mass,
            radius: radius_for_mass(mass),
            position,
            previous_position,
            velocity,
            acceleration: Vector2::zeros(),
            color,
        })
    }

    pub fn kinematics(&self) -> Kinematics {
        Kinematics {
            position: self.position,
            previous_position: self.previous_position,
            velocity: self.velocity,
        }
    }

    pub fn set_kinematics(&mut self, kinematics: Kinematics) {
        self.position = kinematics.position;
        self.previous_position = kinematics.previous_position;
        self.velocity = kinematics.velocity;
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// True when the two discs intersect (strictly closer than the sum of radii)
    pub fn overlaps(&self, other: &Body) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }
}

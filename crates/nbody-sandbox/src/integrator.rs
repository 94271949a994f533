//! Time integration for the sandbox
//!
//! Two stepping strategies share one contract: advance a single kinematic
//! state by `dt` given its acceleration.
//!
//! - [`Verlet`] drives live ticks. Position and previous position are the
//!   ground truth; velocity is re-derived for display.
//! - [`SemiImplicitEuler`] drives forecasts. It is cheaper and only has to
//!   look plausible over a short, disposable horizon.

use nalgebra::Vector2;

use crate::body::Kinematics;
use crate::forces::{ForceModel, accumulate_accelerations};
use crate::state::SystemState;

/// A single-step integrator
pub trait Integrator: Send + Sync {
    /// Advance one kinematic state by one step
    ///
    /// # Arguments
    ///
    /// * `state` - Kinematic state (modified in place)
    /// * `acceleration` - Acceleration at the current position
    /// * `dt` - Step length; may be zero or negative
    fn advance(&self, state: &mut Kinematics, acceleration: Vector2<f64>, dt: f64);

    /// Advance every body of the system by one step
    ///
    /// Accelerations are fully recomputed from the pre-step positions before
    /// any body moves. Does not touch `state.time`.
    fn step(&self, state: &mut SystemState, dt: f64, g: f64, force: &dyn ForceModel) {
        accumulate_accelerations(force, &mut state.bodies, g);

        state.bodies.iter_mut().for_each(|body| {
            let mut kinematics = body.kinematics();
            self.advance(&mut kinematics, body.acceleration, dt);
            body.set_kinematics(kinematics);
        });
    }
}

/// Position Verlet with a central-difference display velocity
///
/// 1. x(t + dt) = 2 x(t) - x(t - dt) + a(t) dt²
/// 2. previous position ← x(t)
/// 3. v = (x(t + dt) - x(t)) / (2 dt), skipped when dt = 0
///
/// The velocity is taken after the previous-position swap so it reflects the
/// step just taken rather than the one before it.
///
/// # Examples
///
/// ```
/// use nbody_sandbox::body::Kinematics;
/// use nbody_sandbox::integrator::{Integrator, Verlet};
/// use nalgebra::{Point2, Vector2};
///
/// let mut k = Kinematics::from_velocity(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0));
/// Verlet.advance(&mut k, Vector2::zeros(), 1.0);
///
/// assert_eq!(k.position, Point2::new(1.0, 0.0));
/// assert_eq!(k.previous_position, Point2::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Verlet;

impl Integrator for Verlet {
    fn advance(&self, state: &mut Kinematics, acceleration: Vector2<f64>, dt: f64) {
        let current = state.position;
        let next =
            current.coords * 2.0 - state.previous_position.coords + acceleration * (dt * dt);

        state.position = next.into();
        state.previous_position = current;

        if dt != 0.0 {
            state.velocity = (state.position - state.previous_position) / (2.0 * dt);
        }
    }
}

/// Semi-implicit (symplectic) Euler
///
/// v ← v + a dt, then x ← x + v dt using the updated velocity. The previous
/// position is kept in step so the state stays consistent if it is ever
/// handed to a Verlet step.
///
/// # Examples
///
/// ```
/// use nbody_sandbox::body::Kinematics;
/// use nbody_sandbox::integrator::{Integrator, SemiImplicitEuler};
/// use nalgebra::{Point2, Vector2};
///
/// let mut k = Kinematics::from_velocity(Point2::origin(), Vector2::zeros());
/// SemiImplicitEuler.advance(&mut k, Vector2::new(2.0, 0.0), 1.0);
///
/// // Velocity is updated first, then used for the position update
/// assert_eq!(k.velocity, Vector2::new(2.0, 0.0));
/// assert_eq!(k.position.x, 2.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn advance(&self, state: &mut Kinematics, acceleration: Vector2<f64>, dt: f64) {
        state.velocity += acceleration * dt;
        state.previous_position = state.position;
        state.position += state.velocity * dt;
    }
}

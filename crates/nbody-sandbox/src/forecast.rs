//! Trajectory forecasts for previews
//!
//! A forecast advances a scratch copy of one body through the field of the
//! live bodies, which are held fixed at their current positions. Nothing in
//! the live set is read mutably, nothing merges, and each call starts over.

use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId, Kinematics};
use crate::color::Color;
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::forces::ForceModel;
use crate::integrator::{Integrator, SemiImplicitEuler};

/// Horizon used when the caller does not pick one
pub const DEFAULT_FORECAST_STEPS: usize = 100;

/// The only state a forecast carries: position, velocity and mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastProbe {
    pub kinematics: Kinematics,
    pub mass: f64,
    /// Live body this probe was copied from; excluded from the field
    pub source: Option<BodyId>,
}

impl ForecastProbe {
    /// Snapshot a live body
    pub fn from_body(body: &Body) -> Self {
        Self {
            kinematics: Kinematics::from_velocity(body.position, body.velocity),
            mass: body.mass,
            source: Some(body.id),
        }
    }

    /// A body that does not exist yet, e.g. one being dragged out by the user
    ///
    /// Validated like a real body: mass must be positive, coordinates finite.
    pub fn hypothetical(
        position: Point2<f64>,
        velocity: Vector2<f64>,
        mass: f64,
    ) -> Result<Self> {
        let body = Body::new(BodyId(u32::MAX), mass, position, velocity, Color::WHITE)?;
        Ok(Self {
            kinematics: body.kinematics(),
            mass: body.mass,
            source: None,
        })
    }
}

/// Predicts future positions with semi-implicit Euler
///
/// # Examples
///
/// ```
/// use nbody_sandbox::config::SimulationConfig;
/// use nbody_sandbox::forces::DirectGravity;
/// use nbody_sandbox::forecast::{ForecastProbe, Forecaster};
/// use nbody_sandbox::state::SystemState;
/// use nbody_sandbox::color::Color;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new();
/// system.add_body(1000.0, Point2::origin(), Vector2::zeros(), Color::WHITE).unwrap();
///
/// let config = SimulationConfig::default().with_forecast_steps(50);
/// let probe =
///     ForecastProbe::hypothetical(Point2::new(200.0, 0.0), Vector2::new(0.0, 1.0), 10.0).unwrap();
///
/// let path = Forecaster::new().predict(&probe, &system.bodies, &DirectGravity::new(), &config);
/// assert_eq!(path.len(), 50);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Forecaster {
    integrator: SemiImplicitEuler,
}

impl Forecaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `config.forecast_steps` steps of length `config.time_rate`
    ///
    /// # Returns
    ///
    /// The probe position after each step, in order
    pub fn predict(
        &self,
        probe: &ForecastProbe,
        field: &[Body],
        force: &dyn ForceModel,
        config: &SimulationConfig,
    ) -> Vec<Point2<f64>> {
        let dt = config.time_rate;
        let g = config.gravitational_constant;
        let mut scratch = probe.kinematics;

        (0..config.forecast_steps)
            .map(|_| {
                let accel = force.acceleration_excluding(
                    &scratch.position,
                    probe.mass,
                    field,
                    probe.source,
                    g,
                );
                self.integrator.advance(&mut scratch, accel, dt);
                scratch.position
            })
            .collect()
    }

    /// Forecast an existing body against the rest of the live set
    pub fn predict_body(
        &self,
        body: &Body,
        field: &[Body],
        force: &dyn ForceModel,
        config: &SimulationConfig,
    ) -> Vec<Point2<f64>> {
        self.predict(&ForecastProbe::from_body(body), field, force, config)
    }
}

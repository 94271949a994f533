//! Tick driver tying the engine pieces together
//!
//! One tick is: accelerations for every body from the pre-tick positions,
//! a Verlet step per body, then merging until no discs overlap. The host
//! calls [`Simulation::tick`] once per display frame and reads the body list
//! between ticks.

use nalgebra::{Point2, Vector2};
use serde::Serialize;

use crate::body::{Body, BodyId};
use crate::collisions::{CollisionEvent, DirectDetector, resolve_collisions};
use crate::color::Color;
use crate::config::{FRAME_TIME, SimulationConfig};
use crate::error::Result;
use crate::forces::{DirectGravity, ForceModel};
use crate::forecast::{ForecastProbe, Forecaster};
use crate::integrator::{Integrator, Verlet};
use crate::presets::{Preset, load_preset};
use crate::state::SystemState;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    /// False when the tick was skipped because the simulation is paused
    pub advanced: bool,
    /// One event per merge, in order
    pub collisions: Vec<CollisionEvent>,
}

/// Scalar aggregates for status displays
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStats {
    pub time: f64,
    pub body_count: usize,
    pub total_mass: f64,
    pub average_speed: f64,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    pub barycenter: Option<Point2<f64>>,
}

#[derive(Debug, Clone, Default)]
pub struct Simulation {
    pub state: SystemState,
    pub config: SimulationConfig,
    integrator: Verlet,
    detector: DirectDetector,
    forecaster: Forecaster,
}

impl Simulation {
    /// Creates an empty simulation
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody_sandbox::simulation::Simulation;
    /// use nbody_sandbox::config::SimulationConfig;
    /// use nbody_sandbox::color::Color;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let mut sim = Simulation::new(SimulationConfig::default());
    /// sim.add_body(1000.0, Point2::new(0.0, 0.0), Vector2::zeros(), Color::WHITE).unwrap();
    /// sim.add_body(10.0, Point2::new(200.0, 0.0), Vector2::new(0.0, 1.0), Color::WHITE).unwrap();
    ///
    /// let report = sim.tick();
    /// assert!(report.advanced);
    /// assert!(report.collisions.is_empty());
    /// assert!((sim.state.time - 0.016).abs() < 1e-12);
    /// ```
    pub fn new(config: SimulationConfig) -> Self {
        Self::from_state(SystemState::new(), config)
    }

    pub fn from_state(state: SystemState, config: SimulationConfig) -> Self {
        Self {
            state,
            config,
            integrator: Verlet,
            detector: DirectDetector,
            forecaster: Forecaster::new(),
        }
    }

    /// Force model matching the current softening setting
    pub fn force(&self) -> DirectGravity {
        DirectGravity::with_softening(self.config.softening)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.state.bodies
    }

    pub fn add_body(
        &mut self,
        mass: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        color: Color,
    ) -> Result<BodyId> {
        self.state.add_body(mass, position, velocity, color)
    }

    /// Advance by one frame
    ///
    /// A paused simulation returns immediately with `advanced == false`,
    /// leaving positions, previous positions and velocities as they were.
    pub fn tick(&mut self) -> TickReport {
        if self.config.paused {
            return TickReport::default();
        }

        let dt = self.config.time_rate;
        let force = self.force();
        self.integrator
            .step(&mut self.state, dt, self.config.gravitational_constant, &force);

        let collisions = resolve_collisions(&mut self.state, &self.detector);
        self.state.time += FRAME_TIME * dt;

        TickReport {
            advanced: true,
            collisions,
        }
    }

    /// Predicted path of a live body, None if the id is unknown
    pub fn forecast(&self, id: BodyId) -> Option<Vec<Point2<f64>>> {
        let body = self.state.get_body(id)?;
        Some(
            self.forecaster
                .predict_body(body, &self.state.bodies, &self.force(), &self.config),
        )
    }

    /// Predicted path of a body that has not been added yet
    pub fn forecast_preview(
        &self,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        mass: f64,
    ) -> Result<Vec<Point2<f64>>> {
        let probe = ForecastProbe::hypothetical(position, velocity, mass)?;
        Ok(self
            .forecaster
            .predict(&probe, &self.state.bodies, &self.force(), &self.config))
    }

    /// Swap in new parameters, leaving the current ones in place if invalid
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        self.config = config.validate()?;
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.config.paused = paused;
    }

    pub fn clear(&mut self) {
        self.state.clear();
        log::info!("simulation cleared");
    }

    /// Replace all bodies with a preset centered on `center`
    pub fn load_preset(&mut self, preset: Preset, center: Point2<f64>, seed: u64) -> Result<()> {
        load_preset(
            &mut self.state,
            preset,
            center,
            self.config.gravitational_constant,
            seed,
        )
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            time: self.state.time,
            body_count: self.state.body_count(),
            total_mass: self.state.total_mass(),
            average_speed: self.state.average_speed(),
            kinetic_energy: self.state.kinetic_energy(),
            potential_energy: self
                .force()
                .potential_energy(&self.state.bodies, self.config.gravitational_constant),
            barycenter: self.state.barycenter(),
        }
    }
}

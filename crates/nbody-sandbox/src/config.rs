//! Simulation parameters threaded into every tick and forecast.
//!
//! The host application owns these values (slider positions, pause button);
//! the engine only reads them. A JSON form of the config looks like:
//!
//! ```json
//! {
//!   "gravitationalConstant": 0.1,
//!   "timeRate": 1.0,
//!   "paused": false,
//!   "softening": 25.0,
//!   "forecastSteps": 100
//! }
//! ```
//!
//! Every field is optional on input and falls back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SandboxError, ensure_finite};
use crate::forces::{DEFAULT_G, SOFTENING};
use crate::forecast::DEFAULT_FORECAST_STEPS;

/// Simulated seconds that elapse per tick at `time_rate == 1`
pub const FRAME_TIME: f64 = 0.016;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Gravitational constant G (>= 0)
    pub gravitational_constant: f64,
    /// Step length used by the integrators; 0 freezes motion, negative runs backwards
    pub time_rate: f64,
    /// When set, ticks are skipped entirely and Verlet state is left untouched
    pub paused: bool,
    /// Additive term in the squared-distance denominator of the force law
    pub softening: f64,
    /// Number of predicted points produced by a forecast
    pub forecast_steps: usize,
}

impl SimulationConfig {
    pub fn with_gravity(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    pub fn with_time_rate(mut self, time_rate: f64) -> Self {
        self.time_rate = time_rate;
        self
    }

    pub fn with_forecast_steps(mut self, steps: usize) -> Self {
        self.forecast_steps = steps;
        self
    }

    /// Check the values before they reach the force loop
    ///
    /// Rejects non-finite numbers, a negative G and a softening that is not
    /// strictly positive. `time_rate` may be any finite value.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody_sandbox::config::SimulationConfig;
    ///
    /// assert!(SimulationConfig::default().with_gravity(0.5).validate().is_ok());
    /// assert!(SimulationConfig::default().with_time_rate(f64::NAN).validate().is_err());
    /// ```
    pub fn validate(self) -> Result<Self> {
        let g = ensure_finite("gravitationalConstant", self.gravitational_constant)?;
        if g < 0.0 {
            return Err(SandboxError::InvalidConfig {
                field: "gravitationalConstant",
                value: g,
            });
        }

        ensure_finite("timeRate", self.time_rate)?;

        let softening = ensure_finite("softening", self.softening)?;
        if softening <= 0.0 {
            return Err(SandboxError::InvalidConfig {
                field: "softening",
                value: softening,
            });
        }

        Ok(self)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: DEFAULT_G,
            time_rate: 1.0,
            paused: false,
            softening: SOFTENING,
            forecast_steps: DEFAULT_FORECAST_STEPS,
        }
    }
}

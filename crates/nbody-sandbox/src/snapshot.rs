//! Save-file shape shared with the persistence layer
//!
//! The JSON looks like:
//!
//! ```json
//! {
//!   "bodies": [
//!     { "x": 400.0, "y": 300.0, "vx": 0.0, "vy": 0.0, "mass": 1000.0,
//!       "color": "#ffff00", "oldX": 400.0, "oldY": 300.0 }
//!   ],
//!   "simTime": 12.5,
//!   "G": 0.1,
//!   "timeRate": 1.0,
//!   "zoomLevel": 1.0,
//!   "panX": 0.0,
//!   "panY": 0.0,
//!   "timestamp": 1700000000000
//! }
//! ```
//!
//! Only `x`, `y` and `mass` are required per body. Absent `oldX`/`oldY` fall
//! back to `position - velocity`; absent scalars fall back to the values
//! documented on [`SavedSimulation::restore`]. Any non-finite number,
//! non-positive mass or negative `G` rejects the entire file.

use std::fs;
use std::path::Path;

use log::{info, warn};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::SimulationConfig;
use crate::error::{Result, ensure_finite};
use crate::forces::DEFAULT_G;
use crate::simulation::Simulation;
use crate::state::SystemState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedBody {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub vx: Option<f64>,
    #[serde(default)]
    pub vy: Option<f64>,
    pub mass: f64,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub old_x: Option<f64>,
    #[serde(default)]
    pub old_y: Option<f64>,
}

/// Camera state owned by the renderer, carried through untouched
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub zoom_level: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom_level: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSimulation {
    pub bodies: Vec<SavedBody>,
    #[serde(default)]
    pub sim_time: Option<f64>,
    #[serde(rename = "G", default)]
    pub g: Option<f64>,
    #[serde(default)]
    pub time_rate: Option<f64>,
    #[serde(default)]
    pub zoom_level: Option<f64>,
    #[serde(default)]
    pub pan_x: Option<f64>,
    #[serde(default)]
    pub pan_y: Option<f64>,
    /// Milliseconds since the Unix epoch, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

/// Everything a save file restores
#[derive(Debug, Clone)]
pub struct RestoredSimulation {
    pub simulation: Simulation,
    pub view: ViewState,
}

impl SavedSimulation {
    /// Record the live bodies, parameters and view
    pub fn capture(simulation: &Simulation, view: ViewState, timestamp: Option<u64>) -> Self {
        let bodies = simulation
            .state
            .bodies
            .iter()
            .map(|b| SavedBody {
                x: b.position.x,
                y: b.position.y,
                vx: Some(b.velocity.x),
                vy: Some(b.velocity.y),
                mass: b.mass,
                color: Some(b.color),
                old_x: Some(b.previous_position.x),
                old_y: Some(b.previous_position.y),
            })
            .collect();

        Self {
            bodies,
            sim_time: Some(simulation.state.time),
            g: Some(simulation.config.gravitational_constant),
            time_rate: Some(simulation.config.time_rate),
            zoom_level: Some(view.zoom_level),
            pan_x: Some(view.pan_x),
            pan_y: Some(view.pan_y),
            timestamp,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Build a fresh simulation from the saved record
    ///
    /// Defaults: `vx`/`vy` 0, color white, `oldX`/`oldY` position minus
    /// velocity, `simTime` 0, `G` 0.1, `timeRate` 1, view at zoom 1 with no
    /// pan. Settings the file does not carry (softening, forecast horizon,
    /// pause) come from `base`.
    ///
    /// # Errors
    ///
    /// Non-finite numbers, non-positive masses, a negative `G` and a base
    /// config with invalid softening fail the whole restore.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody_sandbox::config::SimulationConfig;
    /// use nbody_sandbox::snapshot::SavedSimulation;
    /// use nalgebra::Point2;
    ///
    /// let saved = SavedSimulation::from_json(r#"{ "bodies": [ { "x": 10, "y": 0, "vx": 1, "mass": 5 } ] }"#).unwrap();
    /// let restored = saved.restore(&SimulationConfig::default()).unwrap();
    ///
    /// let body = &restored.simulation.state.bodies[0];
    /// assert_eq!(body.previous_position, Point2::new(9.0, 0.0));
    /// assert_eq!(restored.simulation.config.gravitational_constant, 0.1);
    /// ```
    pub fn restore(&self, base: &SimulationConfig) -> Result<RestoredSimulation> {
        let mut state = SystemState::new();

        for saved in &self.bodies {
            let position = Point2::new(saved.x, saved.y);
            let velocity = Vector2::new(saved.vx.unwrap_or(0.0), saved.vy.unwrap_or(0.0));
            let previous_position = Point2::new(
                saved.old_x.unwrap_or(position.x - velocity.x),
                saved.old_y.unwrap_or(position.y - velocity.y),
            );
            state.restore_body(
                saved.mass,
                position,
                velocity,
                previous_position,
                saved.color.unwrap_or_default(),
            )?;
        }
        state.time = ensure_finite("simTime", self.sim_time.unwrap_or(0.0))?;

        let config = SimulationConfig {
            gravitational_constant: ensure_finite("G", self.g.unwrap_or(DEFAULT_G))?,
            time_rate: ensure_finite("timeRate", self.time_rate.unwrap_or(1.0))?,
            ..*base
        }
        .validate()?;

        let defaults = ViewState::default();
        let view = ViewState {
            zoom_level: ensure_finite("zoomLevel", self.zoom_level.unwrap_or(defaults.zoom_level))?,
            pan_x: ensure_finite("panX", self.pan_x.unwrap_or(defaults.pan_x))?,
            pan_y: ensure_finite("panY", self.pan_y.unwrap_or(defaults.pan_y))?,
        };

        Ok(RestoredSimulation {
            simulation: Simulation::from_state(state, config),
            view,
        })
    }
}

/// Parse and restore in one go, logging rejected files
pub fn load_json(json: &str, base: &SimulationConfig) -> Result<RestoredSimulation> {
    let restored = SavedSimulation::from_json(json).and_then(|saved| saved.restore(base));

    match &restored {
        Ok(r) => info!(
            "restored {} bodies at t={:.1}",
            r.simulation.state.body_count(),
            r.simulation.state.time
        ),
        Err(e) => warn!("rejected save file: {e}"),
    }

    restored
}

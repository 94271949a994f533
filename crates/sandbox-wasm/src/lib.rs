//! WASM bindings for the gravity sandbox.
//!
//! This crate exposes the nbody-sandbox engine to a browser front end that
//! owns the canvas, the mouse gestures and local storage.
//!
//! # Architecture
//!
//! Simulations live in thread-local storage (WASM is single-threaded).
//! Functions take an opaque simulation ID and return serializable snapshots
//! for reading state.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! const simId = simulation_create({ gravitationalConstant: 0.1 });
//! simulation_load_preset(simId, "Solar System", 400, 300, 0);
//!
//! function frame() {
//!   const report = simulation_tick(simId);
//!   for (const c of report.collisions) spawnParticles(c.position, c.color, c.energy);
//!   draw(simulation_get_bodies(simId));
//!   requestAnimationFrame(frame);
//! }
//!
//! // Dragging out a new body
//! const path = simulation_forecast_preview(simId, x, y, dx * 0.1, dy * 0.1, 20);
//!
//! localStorage.setItem("save", simulation_save(simId, zoom, panX, panY, Date.now()));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use log::info;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use nbody_sandbox::body::{Body, BodyId};
use nbody_sandbox::color::Color;
use nbody_sandbox::config::SimulationConfig;
use nbody_sandbox::presets::Preset;
use nbody_sandbox::simulation::Simulation;
use nbody_sandbox::snapshot::{SavedSimulation, ViewState, load_json};

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

// =============================================================================
// Thread-local storage for simulation state
// =============================================================================

thread_local! {
    static SIMULATIONS: RefCell<HashMap<u32, Simulation>> = RefCell::new(HashMap::new());
    static NEXT_SIM_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn not_found(sim_id: u32) -> JsError {
    JsError::new(&format!("Simulation {} not found", sim_id))
}

fn with_sim<T>(
    sim_id: u32,
    f: impl FnOnce(&Simulation) -> Result<T, JsError>,
) -> Result<T, JsError> {
    SIMULATIONS.with(|sims| {
        let sims = sims.borrow();
        let sim = sims.get(&sim_id).ok_or_else(|| not_found(sim_id))?;
        f(sim)
    })
}

fn with_sim_mut<T>(
    sim_id: u32,
    f: impl FnOnce(&mut Simulation) -> Result<T, JsError>,
) -> Result<T, JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims.get_mut(&sim_id).ok_or_else(|| not_found(sim_id))?;
        f(sim)
    })
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// Body data for adding new bodies
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyInput {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub vx: f64,
    #[serde(default)]
    pub vy: f64,
    pub mass: f64,
    /// Hex string such as "#ff6b35"; white when absent
    #[serde(default)]
    pub color: Option<Color>,
}

/// Body state snapshot for drawing
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySnapshot {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub mass: f64,
    /// Display radius, cbrt(mass) * 2
    pub radius: f64,
    pub color: Color,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id.0,
            x: body.position.x,
            y: body.position.y,
            vx: body.velocity.x,
            vy: body.velocity.y,
            mass: body.mass,
            radius: body.radius,
            color: body.color,
        }
    }
}

fn path_to_pairs(path: Vec<nalgebra::Point2<f64>>) -> Vec<[f64; 2]> {
    path.into_iter().map(|p| [p.x, p.y]).collect()
}

// =============================================================================
// Module setup
// =============================================================================

#[wasm_bindgen(start)]
pub fn start() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    let (Ok(_) | Err(_)) = console_log::init_with_level(log::Level::Info);
}

// =============================================================================
// Simulation management functions
// =============================================================================

/// Create a new sandbox simulation.
///
/// # Arguments
/// * `config` - Optional config object (gravitationalConstant, timeRate,
///   paused, softening, forecastSteps); missing fields take defaults
///
/// # Returns
/// A simulation ID for use with other functions
#[wasm_bindgen]
pub fn simulation_create(config: JsValue) -> Result<u32, JsError> {
    let config: SimulationConfig = if config.is_undefined() || config.is_null() {
        SimulationConfig::default()
    } else {
        from_js(config)?
    };
    let config = config.validate()?;

    let id = NEXT_SIM_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    SIMULATIONS.with(|sims| {
        sims.borrow_mut().insert(id, Simulation::new(config));
    });

    info!("created simulation {id}");
    Ok(id)
}

/// Delete a simulation to free memory.
#[wasm_bindgen]
pub fn simulation_delete(sim_id: u32) {
    SIMULATIONS.with(|sims| {
        sims.borrow_mut().remove(&sim_id);
    });
}

// =============================================================================
// Body management
// =============================================================================

/// Add a body to the simulation.
///
/// # Arguments
/// * `sim_id` - Simulation ID
/// * `body` - Body parameters (x, y, vx, vy, mass, color)
///
/// # Returns
/// The new body's ID; fails for non-positive mass
#[wasm_bindgen]
pub fn simulation_add_body(sim_id: u32, body: JsValue) -> Result<u32, JsError> {
    let body: BodyInput = from_js(body)?;

    with_sim_mut(sim_id, |sim| {
        let id = sim.add_body(
            body.mass,
            nalgebra::Point2::new(body.x, body.y),
            nalgebra::Vector2::new(body.vx, body.vy),
            body.color.unwrap_or_default(),
        )?;
        Ok(id.0)
    })
}

/// Remove a body from the simulation.
///
/// # Returns
/// true if the body was found and removed
#[wasm_bindgen]
pub fn simulation_remove_body(sim_id: u32, body_id: u32) -> Result<bool, JsError> {
    with_sim_mut(sim_id, |sim| {
        Ok(sim.state.remove_body(BodyId(body_id)).is_some())
    })
}

/// Remove every body and reset the clock.
#[wasm_bindgen]
pub fn simulation_clear(sim_id: u32) -> Result<(), JsError> {
    with_sim_mut(sim_id, |sim| {
        sim.clear();
        Ok(())
    })
}

/// Replace all bodies with a named preset.
///
/// # Arguments
/// * `name` - "Solar System", "Binary Stars", "Chaotic Three-Body" or
///   "Galaxy Formation" (case and separators are ignored)
/// * `center_x`, `center_y` - Where the preset's origin lands
/// * `seed` - Seed for the randomized galaxy arms
#[wasm_bindgen]
pub fn simulation_load_preset(
    sim_id: u32,
    name: &str,
    center_x: f64,
    center_y: f64,
    seed: u32,
) -> Result<usize, JsError> {
    let preset: Preset = name.parse()?;

    with_sim_mut(sim_id, |sim| {
        sim.load_preset(
            preset,
            nalgebra::Point2::new(center_x, center_y),
            u64::from(seed),
        )?;
        Ok(sim.state.body_count())
    })
}

/// Names of the built-in presets, in cycling order.
#[wasm_bindgen]
pub fn preset_names() -> Result<JsValue, JsError> {
    let names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
    to_js(&names)
}

// =============================================================================
// Simulation stepping
// =============================================================================

/// Advance the simulation by one frame.
///
/// # Returns
/// `{ advanced, collisions: [{ position, color, energy, consumed, merged }] }`
#[wasm_bindgen]
pub fn simulation_tick(sim_id: u32) -> Result<JsValue, JsError> {
    with_sim_mut(sim_id, |sim| to_js(&sim.tick()))
}

/// Set the gravitational constant.
#[wasm_bindgen]
pub fn simulation_set_gravity(sim_id: u32, g: f64) -> Result<(), JsError> {
    with_sim_mut(sim_id, |sim| {
        sim.set_config(sim.config.with_gravity(g))?;
        Ok(())
    })
}

/// Set the step length used by ticks and forecasts.
#[wasm_bindgen]
pub fn simulation_set_time_rate(sim_id: u32, time_rate: f64) -> Result<(), JsError> {
    with_sim_mut(sim_id, |sim| {
        sim.set_config(sim.config.with_time_rate(time_rate))?;
        Ok(())
    })
}

/// Pause or resume ticking.
#[wasm_bindgen]
pub fn simulation_set_paused(sim_id: u32, paused: bool) -> Result<(), JsError> {
    with_sim_mut(sim_id, |sim| {
        sim.set_paused(paused);
        Ok(())
    })
}

/// Get the current configuration object.
#[wasm_bindgen]
pub fn simulation_get_config(sim_id: u32) -> Result<JsValue, JsError> {
    with_sim(sim_id, |sim| to_js(&sim.config))
}

// =============================================================================
// State queries
// =============================================================================

/// Get all bodies for rendering.
#[wasm_bindgen]
pub fn simulation_get_bodies(sim_id: u32) -> Result<JsValue, JsError> {
    with_sim(sim_id, |sim| {
        let bodies: Vec<BodySnapshot> = sim.bodies().iter().map(BodySnapshot::from).collect();
        to_js(&bodies)
    })
}

/// Get time, body count, total mass, average speed and energies.
#[wasm_bindgen]
pub fn simulation_get_stats(sim_id: u32) -> Result<JsValue, JsError> {
    with_sim(sim_id, |sim| to_js(&sim.stats()))
}

/// Get current simulation time.
#[wasm_bindgen]
pub fn simulation_get_time(sim_id: u32) -> Result<f64, JsError> {
    with_sim(sim_id, |sim| Ok(sim.state.time))
}

/// Get body count.
#[wasm_bindgen]
pub fn simulation_body_count(sim_id: u32) -> Result<usize, JsError> {
    with_sim(sim_id, |sim| Ok(sim.state.body_count()))
}

// =============================================================================
// Forecasts
// =============================================================================

/// Predicted path of an existing body as `[[x, y], ...]`.
///
/// Returns an empty array when the body no longer exists, e.g. after a merge.
#[wasm_bindgen]
pub fn simulation_forecast(sim_id: u32, body_id: u32) -> Result<JsValue, JsError> {
    with_sim(sim_id, |sim| {
        let path = sim.forecast(BodyId(body_id)).unwrap_or_default();
        to_js(&path_to_pairs(path))
    })
}

/// Predicted path of a body that is still being placed.
#[wasm_bindgen]
pub fn simulation_forecast_preview(
    sim_id: u32,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    mass: f64,
) -> Result<JsValue, JsError> {
    with_sim(sim_id, |sim| {
        let path = sim.forecast_preview(
            nalgebra::Point2::new(x, y),
            nalgebra::Vector2::new(vx, vy),
            mass,
        )?;
        to_js(&path_to_pairs(path))
    })
}

// =============================================================================
// Persistence
// =============================================================================

/// Serialize bodies, parameters and view to a JSON save string.
///
/// # Arguments
/// * `zoom_level`, `pan_x`, `pan_y` - Renderer view, stored alongside the bodies
/// * `timestamp` - Milliseconds since the epoch (`Date.now()`)
#[wasm_bindgen]
pub fn simulation_save(
    sim_id: u32,
    zoom_level: f64,
    pan_x: f64,
    pan_y: f64,
    timestamp: f64,
) -> Result<String, JsError> {
    with_sim(sim_id, |sim| {
        let view = ViewState {
            zoom_level,
            pan_x,
            pan_y,
        };
        let timestamp = (timestamp.is_finite() && timestamp >= 0.0).then_some(timestamp as u64);
        Ok(SavedSimulation::capture(sim, view, timestamp).to_json()?)
    })
}

/// Replace a simulation's contents with a JSON save string.
///
/// A rejected save leaves the simulation untouched.
///
/// # Returns
/// The saved view `{ zoomLevel, panX, panY }`
#[wasm_bindgen]
pub fn simulation_load(sim_id: u32, json: &str) -> Result<JsValue, JsError> {
    with_sim_mut(sim_id, |sim| {
        let restored = load_json(json, &sim.config)?;
        *sim = restored.simulation;
        to_js(&restored.view)
    })
}

#[cfg(test)]
mod tests {
    use nalgebra::{Point2, Vector2};

    use super::*;

    #[test]
    fn test_body_snapshot_from_body() {
        let body = Body::new(
            BodyId(4),
            8.0,
            Point2::new(1.0, 2.0),
            Vector2::new(0.5, -0.5),
            Color::new(0x4a, 0x90, 0xe2),
        )
        .unwrap();

        let snapshot = BodySnapshot::from(&body);

        assert_eq!(snapshot.id, 4);
        assert_eq!((snapshot.x, snapshot.y), (1.0, 2.0));
        assert_eq!((snapshot.vx, snapshot.vy), (0.5, -0.5));
        assert!((snapshot.radius - 4.0).abs() < 1e-12);
        assert_eq!(snapshot.color.to_hex(), "#4a90e2");
    }

    #[test]
    fn test_path_to_pairs() {
        let pairs = path_to_pairs(vec![Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)]);
        assert_eq!(pairs, vec![[1.0, 2.0], [3.0, 4.0]]);
    }
}

//! Save a running simulation to disk and pick it back up
//!
//! Run with: cargo run --package nbody-sandbox --example save_restore

use nalgebra::Point2;
use nbody_sandbox::config::SimulationConfig;
use nbody_sandbox::presets::Preset;
use nbody_sandbox::simulation::Simulation;
use nbody_sandbox::snapshot::{SavedSimulation, ViewState, load_json};

fn main() -> nbody_sandbox::Result<()> {
    env_logger::init();

    let mut sim = Simulation::new(SimulationConfig::default());
    sim.load_preset(Preset::ChaoticThreeBody, Point2::new(400.0, 300.0), 0)?;
    for _ in 0..200 {
        sim.tick();
    }

    let path = std::env::temp_dir().join("nbody-sandbox-save.json");
    SavedSimulation::capture(&sim, ViewState::default(), None).write_to(&path)?;
    println!(
        "Saved {} bodies at t={:.2} to {}",
        sim.state.body_count(),
        sim.state.time,
        path.display()
    );

    let json = std::fs::read_to_string(&path)?;
    let mut restored = load_json(&json, &SimulationConfig::default())?.simulation;

    for _ in 0..200 {
        sim.tick();
        restored.tick();
    }

    let drift = sim
        .bodies()
        .iter()
        .zip(restored.bodies())
        .map(|(a, b)| (a.position - b.position).magnitude())
        .fold(0.0, f64::max);
    println!("After 200 more frames the two runs differ by at most {drift:.3e}");

    Ok(())
}

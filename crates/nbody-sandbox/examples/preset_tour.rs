//! Runs every built-in preset for a few hundred frames
//!
//! Prints body counts, merges and energy so the presets can be compared
//! without a renderer.
//!
//! Run with: RUST_LOG=debug cargo run --package nbody-sandbox --example preset_tour

use nalgebra::Point2;
use nbody_sandbox::config::SimulationConfig;
use nbody_sandbox::presets::Preset;
use nbody_sandbox::simulation::Simulation;

const FRAMES: usize = 600;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Gravity Sandbox: Preset Tour\n");
    println!("{}", "=".repeat(60));

    let mut preset = Preset::SolarSystem;
    for _ in 0..Preset::ALL.len() {
        let mut sim = Simulation::new(SimulationConfig::default());
        if let Err(e) = sim.load_preset(preset, Point2::new(400.0, 300.0), 42) {
            eprintln!("failed to load {preset}: {e}");
            preset = preset.next();
            continue;
        }

        let start = sim.stats();
        println!("\n{preset}");
        println!(
            "  start: {} bodies, mass {:.1}, KE {:.1}, PE {:.1}",
            start.body_count, start.total_mass, start.kinetic_energy, start.potential_energy
        );

        let mut merges = 0;
        for _ in 0..FRAMES {
            let report = sim.tick();
            for event in &report.collisions {
                merges += 1;
                println!(
                    "  t={:6.2}: merge at ({:.1}, {:.1}), energy {:.2}",
                    sim.state.time, event.position.x, event.position.y, event.energy
                );
            }
        }

        let end = sim.stats();
        println!(
            "  end:   {} bodies after {} merges, mass {:.1}, avg speed {:.2}",
            end.body_count, merges, end.total_mass, end.average_speed
        );

        if let Some(first) = sim.bodies().first() {
            let path = sim.forecast(first.id).unwrap_or_default();
            if let Some(last) = path.last() {
                println!(
                    "  body {:?} heads from ({:.1}, {:.1}) toward ({:.1}, {:.1})",
                    first.id, first.position.x, first.position.y, last.x, last.y
                );
            }
        }

        preset = preset.next();
    }
}

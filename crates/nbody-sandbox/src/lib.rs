//! Interactive 2D gravity sandbox engine.
//!
//! Point masses attract each other through a softened inverse-square law,
//! advance with position Verlet, and merge when their discs overlap. A
//! side-effect-free forecaster predicts where a body is heading.

pub mod body;
pub mod collisions;
pub mod color;
pub mod config;
pub mod error;
pub mod forces;
pub mod forecast;
pub mod integrator;
pub mod presets;
pub mod simulation;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod presets_test;
#[cfg(test)]
mod state_test;

pub use error::{Result, SandboxError};

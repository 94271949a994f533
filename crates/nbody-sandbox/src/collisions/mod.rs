//! Collision detection and resolution for the sandbox
//!
//! Bodies whose discs overlap are merged into a single body that conserves
//! mass and momentum. Resolution repeats until no pair overlaps.

pub mod detection;
pub mod resolution;


pub use detection::{CollisionDetector, DirectDetector, collision_energy};
pub use resolution::{CollisionEvent, merge_bodies, resolve_collisions};

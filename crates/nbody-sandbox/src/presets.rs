//! Built-in starting scenarios
//!
//! Positions are relative to a caller-chosen center; velocities and masses are
//! in sandbox units tuned for the default G of 0.1.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use log::info;
use nalgebra::{Point2, Vector2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::color::Color;
use crate::error::{Result, SandboxError};
use crate::state::SystemState;

/// Initial conditions of one preset body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub mass: f64,
    pub color: Color,
}

impl BodySpec {
    fn new(x: f64, y: f64, vx: f64, vy: f64, mass: f64, color: Color) -> Self {
        Self {
            position: Point2::new(x, y),
            velocity: Vector2::new(vx, vy),
            mass,
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    SolarSystem,
    BinaryStars,
    ChaoticThreeBody,
    GalaxyFormation,
}

const GALAXY_CENTER_MASS: f64 = 3000.0;
const GALAXY_ARM_BODIES: usize = 20;

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::SolarSystem,
        Preset::BinaryStars,
        Preset::ChaoticThreeBody,
        Preset::GalaxyFormation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::SolarSystem => "Solar System",
            Preset::BinaryStars => "Binary Stars",
            Preset::ChaoticThreeBody => "Chaotic Three-Body",
            Preset::GalaxyFormation => "Galaxy Formation",
        }
    }

    /// The preset after this one, wrapping around
    pub fn next(&self) -> Preset {
        let idx = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Initial conditions relative to the origin
    ///
    /// Only the galaxy preset depends on `g` (orbital speeds) and on `rng`
    /// (masses and colors).
    pub fn bodies(&self, g: f64, rng: &mut ChaChaRng) -> Vec<BodySpec> {
        match self {
            Preset::SolarSystem => vec![
                BodySpec::new(0.0, 0.0, 0.0, 0.0, 2000.0, Color::new(0xff, 0xff, 0x00)),
                BodySpec::new(150.0, 0.0, 0.0, 3.0, 20.0, Color::new(0xff, 0x6b, 0x35)),
                BodySpec::new(250.0, 0.0, 0.0, 2.5, 30.0, Color::new(0x4a, 0x90, 0xe2)),
                BodySpec::new(350.0, 0.0, 0.0, 2.0, 25.0, Color::new(0x7e, 0xd3, 0x21)),
            ],
            Preset::BinaryStars => vec![
                BodySpec::new(-100.0, 0.0, 0.0, 2.0, 800.0, Color::new(0xff, 0x33, 0x33)),
                BodySpec::new(100.0, 0.0, 0.0, -2.0, 800.0, Color::new(0x33, 0x33, 0xff)),
                BodySpec::new(0.0, 200.0, 1.5, 0.0, 15.0, Color::WHITE),
            ],
            Preset::ChaoticThreeBody => vec![
                BodySpec::new(-50.0, -50.0, 0.5, 0.5, 500.0, Color::new(0xff, 0x6b, 0x35)),
                BodySpec::new(50.0, -50.0, -0.5, 0.5, 500.0, Color::new(0x4a, 0x90, 0xe2)),
                BodySpec::new(0.0, 50.0, 0.0, -1.0, 500.0, Color::new(0x7e, 0xd3, 0x21)),
            ],
            Preset::GalaxyFormation => galaxy(g, rng),
        }
    }
}

/// Central mass with two spiral arms on slightly sub-circular orbits
fn galaxy(g: f64, rng: &mut ChaChaRng) -> Vec<BodySpec> {
    let center = BodySpec::new(
        0.0,
        0.0,
        0.0,
        0.0,
        GALAXY_CENTER_MASS,
        Color::new(0xff, 0xff, 0x00),
    );

    let arms = (0..GALAXY_ARM_BODIES).map(|i| {
        let angle = (i as f64 / GALAXY_ARM_BODIES as f64) * 4.0 * PI;
        let radius = 100.0 + i as f64 * 15.0;
        let speed = (g * GALAXY_CENTER_MASS / radius).sqrt() * 0.8;

        let hue = 200.0 + rng.gen_range(0.0..60.0);
        let lightness = 0.5 + rng.gen_range(0.0..0.3);

        BodySpec {
            position: Point2::new(angle.cos() * radius, angle.sin() * radius),
            velocity: Vector2::new(-angle.sin() * speed, angle.cos() * speed),
            mass: 20.0 + rng.gen_range(0.0..30.0),
            color: Color::from_hsl(hue, 0.7, lightness),
        }
    });

    std::iter::once(center).chain(arms).collect()
}

/// Replace the contents of `state` with `preset`, centered on `center`
///
/// # Examples
///
/// ```
/// use nbody_sandbox::presets::{Preset, load_preset};
/// use nbody_sandbox::state::SystemState;
/// use nalgebra::Point2;
///
/// let mut system = SystemState::new();
/// load_preset(&mut system, Preset::BinaryStars, Point2::new(400.0, 300.0), 0.1, 7).unwrap();
///
/// assert_eq!(system.body_count(), 3);
/// assert_eq!(system.bodies[0].position, Point2::new(300.0, 300.0));
/// ```
pub fn load_preset(
    state: &mut SystemState,
    preset: Preset,
    center: Point2<f64>,
    g: f64,
    seed: u64,
) -> Result<()> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let specs = preset.bodies(g, &mut rng);

    // Build aside so an invalid body leaves the caller's state untouched
    let mut next = SystemState::new();
    for spec in specs {
        next.add_body(
            spec.mass,
            center + spec.position.coords,
            spec.velocity,
            spec.color,
        )?;
    }
    *state = next;

    info!("loaded preset '{}' with {} bodies", preset, state.body_count());
    Ok(())
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = SandboxError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        Self::ALL
            .into_iter()
            .find(|p| p.name().to_ascii_lowercase().replace(['-', ' '], "") == wanted)
            .ok_or_else(|| SandboxError::UnknownPreset(s.to_string()))
    }
}

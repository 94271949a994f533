//! Collision resolution through momentum-conserving mergers
//!
//! When two bodies overlap they are replaced by a single body with:
//! - Total mass: m_new = m_a + m_b
//! - Momentum-weighted velocity: v_new = (m_a v_a + m_b v_b) / m_new
//! - Position at the plain midpoint of the parents (not the center of mass)
//! - Color blended toward `b` by `b`'s share of the new mass

use log::debug;
use nalgebra::Point2;
use serde::Serialize;

use crate::body::{Body, BodyId, Kinematics, radius_for_mass};
use crate::collisions::detection::{CollisionDetector, collision_energy};
use crate::color::Color;
use crate::state::SystemState;

/// Emitted once per merge for the visual-effects layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionEvent {
    /// Where the merge happened (midpoint of the parents)
    pub position: Point2<f64>,
    /// Color of the merged body
    pub color: Color,
    /// Effect intensity in [0, 5], see [`collision_energy`]
    pub energy: f64,
    /// The two bodies consumed by the merge
    pub consumed: [BodyId; 2],
    /// The body that replaced them
    pub merged: BodyId,
}

/// Merge two bodies, conserving mass and momentum
///
/// The parent order matters for the color blend only. The merged body's
/// previous position is placed one velocity-length behind it, so the next
/// Verlet step starts from a consistent cold state.
///
/// # Examples
///
/// ```
/// use nbody_sandbox::collisions::merge_bodies;
/// use nbody_sandbox::body::{Body, BodyId};
/// use nbody_sandbox::color::Color;
/// use nalgebra::{Point2, Vector2};
///
/// let a = Body::new(BodyId(0), 1.0, Point2::new(1.0, 0.0), Vector2::new(0.0, 5.0), Color::WHITE).unwrap();
/// let b = Body::new(BodyId(1), 1.0, Point2::new(2.0, 0.0), Vector2::new(0.0, 3.0), Color::WHITE).unwrap();
///
/// let merged = merge_bodies(&a, &b, BodyId(2));
///
/// // Mass is conserved
/// assert_eq!(merged.mass, 2.0);
///
/// // Momentum is conserved
/// let p_initial = a.momentum() + b.momentum();
/// let p_final = merged.momentum();
/// assert!((p_final - p_initial).magnitude() < 1e-10);
///
/// // Midpoint position
/// assert_eq!(merged.position, Point2::new(1.5, 0.0));
/// ```
pub fn merge_bodies(a: &Body, b: &Body, new_id: BodyId) -> Body {
    let total_mass = a.mass + b.mass;

    let velocity = (a.momentum() + b.momentum()) / total_mass;
    let position = Point2::from((a.position.coords + b.position.coords) / 2.0);
    let color = a.color.lerp(b.color, b.mass / total_mass);
    let kinematics = Kinematics::from_velocity(position, velocity);

    Body {
        id: new_id,
        mass: total_mass,
        radius: radius_for_mass(total_mass),
        position: kinematics.position,
        previous_position: kinematics.previous_position,
        velocity: kinematics.velocity,
        acceleration: nalgebra::Vector2::zeros(),
        color,
    }
}

/// Merge overlapping bodies until no pair overlaps
///
/// Each round asks the detector for the first overlapping pair of the
/// current collection, then builds the next collection from the survivors
/// (in their existing order) followed by the merged body. A merged body may
/// overlap a third body, so chains collapse over successive rounds. The loop
/// terminates because every round removes one body.
///
/// # Returns
///
/// One event per merge, in the order the merges happened
///
/// # Examples
///
/// ```
/// use nbody_sandbox::collisions::{DirectDetector, resolve_collisions};
/// use nbody_sandbox::state::SystemState;
/// use nbody_sandbox::color::Color;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new();
/// system.add_body(8.0, Point2::new(0.0, 0.0), Vector2::zeros(), Color::WHITE).unwrap();
/// system.add_body(8.0, Point2::new(3.0, 0.0), Vector2::zeros(), Color::WHITE).unwrap();
///
/// let events = resolve_collisions(&mut system, &DirectDetector);
///
/// // Should have one merged body
/// assert_eq!(events.len(), 1);
/// assert_eq!(system.body_count(), 1);
/// assert_eq!(system.total_mass(), 16.0);
/// ```
pub fn resolve_collisions(
    state: &mut SystemState,
    detector: &dyn CollisionDetector,
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    while let Some((i, j)) = detector.first_overlap(&state.bodies) {
        let (a, b) = (state.bodies[i], state.bodies[j]);
        let energy = collision_energy(&a, &b);
        let merged = merge_bodies(&a, &b, state.allocate_id());

        debug!(
            "merged {:?} (m={}) and {:?} (m={}) into {:?} at ({:.2}, {:.2})",
            a.id, a.mass, b.id, b.mass, merged.id, merged.position.x, merged.position.y
        );

        events.push(CollisionEvent {
            position: merged.position,
            color: merged.color,
            energy,
            consumed: [a.id, b.id],
            merged: merged.id,
        });

        state.bodies = state
            .bodies
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != i && k != j)
            .map(|(_, body)| *body)
            .chain(std::iter::once(merged))
            .collect();
    }

    events
}

use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId};
use crate::color::Color;
use crate::error::Result;

/// Complete state of the sandbox at a given time
#[derive(Debug, Clone, Default)]
pub struct SystemState {
    /// Simulated time in seconds
    pub time: f64,
    /// Live bodies; order carries no physical meaning
    pub bodies: Vec<Body>,
    /// Next available body ID
    next_id: u32,
}

impl SystemState {
    /// Creates an empty system at time zero
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody_sandbox::state::SystemState;
    ///
    /// let system = SystemState::new();
    ///
    /// assert_eq!(system.body_count(), 0);
    /// assert_eq!(system.time, 0.0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new body to the system and returns its ID
    ///
    /// # Arguments
    ///
    /// * `mass` - Body mass, must be positive
    /// * `position` - Initial position
    /// * `velocity` - Initial velocity; also seeds the previous position
    /// * `color` - Display color
    ///
    /// # Errors
    ///
    /// Fails for non-positive mass or non-finite coordinates. Nothing is
    /// added in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody_sandbox::state::SystemState;
    /// use nbody_sandbox::color::Color;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let mut system = SystemState::new();
    ///
    /// let id = system
    ///     .add_body(20.0, Point2::new(150.0, 0.0), Vector2::new(0.0, 3.0), Color::WHITE)
    ///     .unwrap();
    ///
    /// assert_eq!(system.body_count(), 1);
    /// assert!(system.get_body(id).is_some());
    /// assert!(system.add_body(-1.0, Point2::origin(), Vector2::zeros(), Color::WHITE).is_err());
    /// ```
    pub fn add_body(
        &mut self,
        mass: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        color: Color,
    ) -> Result<BodyId> {
        let body = Body::new(self.peek_id(), mass, position, velocity, color)?;
        Ok(self.insert(body))
    }

    /// Adds a body with an explicit previous position (used when restoring saves)
    pub fn restore_body(
        &mut self,
        mass: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        previous_position: Point2<f64>,
        color: Color,
    ) -> Result<BodyId> {
        let body = Body::restore(
            self.peek_id(),
            mass,
            position,
            velocity,
            previous_position,
            color,
        )?;
        Ok(self.insert(body))
    }

    /// Reserve a fresh identity for a body built outside `add_body`
    pub fn allocate_id(&mut self) -> BodyId {
        let id = self.peek_id();
        self.next_id += 1;
        id
    }

    fn peek_id(&self) -> BodyId {
        BodyId(self.next_id)
    }

    fn insert(&mut self, body: Body) -> BodyId {
        let id = body.id;
        self.next_id = self.next_id.max(id.0 + 1);
        self.bodies.push(body);
        id
    }

    /// Removes a body from the system
    ///
    /// # Returns
    ///
    /// The removed Body if found, None otherwise
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .map(|idx| self.bodies.remove(idx))
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Returns the number of bodies in the system
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Drops every body and rewinds the clock
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.time = 0.0;
    }

    /// Returns the total mass of all bodies
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody_sandbox::state::SystemState;
    /// use nbody_sandbox::color::Color;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let mut system = SystemState::new();
    /// system.add_body(20.0, Point2::new(150.0, 0.0), Vector2::zeros(), Color::WHITE).unwrap();
    /// system.add_body(30.0, Point2::new(250.0, 0.0), Vector2::zeros(), Color::WHITE).unwrap();
    ///
    /// assert_eq!(system.total_mass(), 50.0);
    /// ```
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Returns the total momentum of all bodies
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector2::zeros(), |acc, p| acc + p)
    }

    /// Total kinetic energy computed from the display velocities
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    /// Mean speed over all bodies, 0 for an empty system
    pub fn average_speed(&self) -> f64 {
        if self.bodies.is_empty() {
            return 0.0;
        }
        self.bodies.iter().map(|b| b.speed()).sum::<f64>() / self.bodies.len() as f64
    }

    /// Mass-weighted mean position, None for an empty system
    ///
    /// Consumed by renderers for view centering.
    pub fn barycenter(&self) -> Option<Point2<f64>> {
        let total_mass = self.total_mass();
        if self.bodies.is_empty() || total_mass <= 0.0 {
            return None;
        }
        let weighted = self
            .bodies
            .iter()
            .map(|b| b.position.coords * b.mass)
            .fold(Vector2::zeros(), |acc, p| acc + p);
        Some(Point2::from(weighted / total_mass))
    }
}

//! Core state types for the 2D demos.
//!
//! - `NVec2` is the 2D vector (nalgebra `Vector2<f64>`)
//! - `Transform` holds position and rotation
//! - `RigidBody` holds mass, velocity and acceleration and is advanced with
//!   explicit Euler against the transform of the object that owns it
//! - `CirclePhysicalObject` owns one transform, one body and one collider

use nalgebra::Vector2;

use crate::error::{ensure_non_negative, ensure_positive, SimError};

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: NVec2, // origin at the center of the world
    rotation: f64,   // radians, positive = counter-clockwise
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: NVec2::zeros(),
            rotation: 0.0,
        }
    }
}

impl Transform {
    pub fn new(position: NVec2, rotation: f64) -> Self {
        Self { position, rotation }
    }

    pub fn position(&self) -> NVec2 {
        self.position
    }

    pub fn set_position(&mut self, position: NVec2) {
        self.position = position;
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }
}

/// Point mass moved by explicit Euler steps.
///
/// The body does not own its transform: the enclosing `CirclePhysicalObject`
/// does, and hands it to [`RigidBody::integrate`] each tick. Not `Clone` on
/// purpose, a body belongs to exactly one object.
#[derive(Debug, PartialEq)]
pub struct RigidBody {
    mass: f64,
    velocity: NVec2,
    acceleration: NVec2,
}

impl RigidBody {
    /// Create a body at rest. `mass` must be finite and `> 0`
    pub fn new(mass: f64) -> Result<Self, SimError> {
        Ok(Self {
            mass: ensure_positive("mass", mass)?,
            velocity: NVec2::zeros(),
            acceleration: NVec2::zeros(),
        })
    }

    /// Set `acceleration = force / mass`.
    ///
    /// Overwrites the previous acceleration, so the caller must sum every
    /// contribution into one net force before calling this once per tick.
    pub fn apply_force(&mut self, force: NVec2) {
        self.acceleration = force / self.mass;
    }

    /// One explicit Euler step:
    /// v += a * dt, x += v * dt, then a = 0
    ///
    /// `dt == 0` leaves velocity and position untouched.
    pub fn integrate(&mut self, transform: &mut Transform, dt: f64) -> Result<(), SimError> {
        let dt = ensure_non_negative("delta_time", dt)?;

        self.velocity += self.acceleration * dt;
        transform.set_position(transform.position() + self.velocity * dt);
        self.acceleration = NVec2::zeros();
        Ok(())
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f64) -> Result<(), SimError> {
        self.mass = ensure_positive("mass", mass)?;
        Ok(())
    }

    pub fn velocity(&self) -> NVec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: NVec2) {
        self.velocity = velocity;
    }

    pub fn acceleration(&self) -> NVec2 {
        self.acceleration
    }

    pub fn momentum(&self) -> NVec2 {
        self.velocity * self.mass
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleCollider {
    radius: f64,
}

impl CircleCollider {
    pub fn new(radius: f64) -> Result<Self, SimError> {
        Ok(Self {
            radius: ensure_positive("radius", radius)?,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// A circle in the world: owner of its transform, rigid body and collider
#[derive(Debug)]
pub struct CirclePhysicalObject {
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: CircleCollider,
}

impl CirclePhysicalObject {
    /// Unit-mass circle at the origin
    pub fn new(radius: f64) -> Result<Self, SimError> {
        Ok(Self {
            transform: Transform::default(),
            rigid_body: RigidBody::new(1.0)?,
            collider: CircleCollider::new(radius)?,
        })
    }

    pub fn with_position(mut self, position: NVec2) -> Self {
        self.transform.set_position(position);
        self
    }

    pub fn with_velocity(mut self, velocity: NVec2) -> Self {
        self.rigid_body.set_velocity(velocity);
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Result<Self, SimError> {
        self.rigid_body.set_mass(mass)?;
        Ok(self)
    }

    pub fn position(&self) -> NVec2 {
        self.transform.position()
    }

    pub fn mass(&self) -> f64 {
        self.rigid_body.mass()
    }

    pub fn radius(&self) -> f64 {
        self.collider.radius()
    }

    /// Split borrow used by the integrator
    pub fn body_and_transform(&mut self) -> (&mut RigidBody, &mut Transform) {
        (&mut self.rigid_body, &mut self.transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_mass_is_rejected() {
        assert!(RigidBody::new(0.0).is_err());
        assert!(RigidBody::new(-3.0).is_err());
        assert!(RigidBody::new(f64::NAN).is_err());

        let mut body = RigidBody::new(2.0).unwrap();
        assert!(body.set_mass(0.0).is_err());
        assert_eq!(body.mass(), 2.0);
    }

    #[test]
    fn apply_force_overwrites() {
        let mut body = RigidBody::new(2.0).unwrap();
        body.apply_force(NVec2::new(4.0, 0.0));
        body.apply_force(NVec2::new(0.0, 2.0));
        assert_eq!(body.acceleration(), NVec2::new(0.0, 1.0));
    }

    #[test]
    fn euler_updates_velocity_before_position() {
        let mut body = RigidBody::new(1.0).unwrap();
        let mut transform = Transform::default();
        body.apply_force(NVec2::new(2.0, 0.0));
        body.integrate(&mut transform, 0.5).unwrap();

        assert_eq!(body.velocity(), NVec2::new(1.0, 0.0));
        assert_eq!(transform.position(), NVec2::new(0.5, 0.0));
        assert_eq!(body.acceleration(), NVec2::zeros());
    }

    #[test]
    fn negative_step_is_rejected() {
        let mut body = RigidBody::new(1.0).unwrap();
        let mut transform = Transform::default();
        assert!(body.integrate(&mut transform, -0.1).is_err());
    }
}

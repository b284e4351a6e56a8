//! Projectile ("bouncy ball") kinematics
//!
//! Closed form motion under a constant field:
//!   x(t) = x0 + v0 t + g t^2 / 2
//! plus a ball stepped with explicit Euler that bounces off a floor with a
//! coefficient of restitution.

use super::states::NVec2;
use crate::error::{ensure_non_negative, ensure_positive, SimError};

/// Launch speed that lands a projectile `range` away on flat ground.
///
/// `range = v^2 sin(2a) / |g|`, so `v = sqrt(range |g| / sin(2a))`.
pub fn launch_speed_for_range(range: f64, gravity: f64, angle: f64) -> Result<f64, SimError> {
    ensure_positive("range", range)?;
    let g = ensure_positive("gravity", gravity.abs())?;
    let s = (2.0 * angle).sin();
    if !(s > 0.0) {
        return Err(SimError::invalid("angle", angle, "must lie strictly between 0 and pi/2"));
    }
    Ok((range * g / s).sqrt())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub initial_position: NVec2,
    pub initial_velocity: NVec2,
    pub gravity: NVec2,
    pub time_of_flight: f64,
}

impl Trajectory {
    /// Trajectory from `origin` at `angle` (radians above +x) that covers
    /// `range` horizontally before returning to the launch height
    pub fn for_range(origin: NVec2, range: f64, angle: f64, gravity: NVec2) -> Result<Self, SimError> {
        let speed = launch_speed_for_range(range, gravity.y, angle)?;
        let initial_velocity = NVec2::new(speed * angle.cos(), speed * angle.sin());
        Ok(Self {
            initial_position: origin,
            initial_velocity,
            gravity,
            time_of_flight: range / initial_velocity.x,
        })
    }

    pub fn position_at(&self, t: f64) -> NVec2 {
        self.initial_position + self.initial_velocity * t + self.gravity * (0.5 * t * t)
    }

    pub fn velocity_at(&self, t: f64) -> NVec2 {
        self.initial_velocity + self.gravity * t
    }

    /// `count` points evenly spaced in time from launch to landing
    pub fn sample(&self, count: usize) -> Vec<NVec2> {
        match count {
            0 => Vec::new(),
            1 => vec![self.initial_position],
            _ => {
                let dt = self.time_of_flight / (count - 1) as f64;
                (0..count).map(|i| self.position_at(i as f64 * dt)).collect()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BouncingBall {
    pub position: NVec2,
    pub velocity: NVec2,
    pub radius: f64,
    restitution: f64,
}

impl BouncingBall {
    pub fn new(position: NVec2, velocity: NVec2, radius: f64, restitution: f64) -> Result<Self, SimError> {
        ensure_positive("radius", radius)?;
        ensure_non_negative("restitution", restitution)?;
        if restitution > 1.0 {
            return Err(SimError::invalid("restitution", restitution, "must not exceed 1"));
        }
        Ok(Self {
            position,
            velocity,
            radius,
            restitution,
        })
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Advance by `dt` under `gravity`. When the ball reaches `floor_y` while
    /// falling, its vertical velocity is reflected and damped.
    /// Returns `true` if the ball bounced during this step.
    pub fn step(&mut self, gravity: NVec2, dt: f64, floor_y: f64) -> Result<bool, SimError> {
        let dt = ensure_positive("delta_time", dt)?;

        self.velocity += gravity * dt;
        self.position += self.velocity * dt;

        // only while moving down, otherwise a slow ball stays stuck below
        // the floor flipping its velocity every frame
        if self.position.y - self.radius <= floor_y && self.velocity.y < 0.0 {
            self.velocity.y = -self.velocity.y * self.restitution;
            return Ok(true);
        }
        Ok(false)
    }
}

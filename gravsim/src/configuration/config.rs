//! Configuration types for loading demo scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`DemoKind`]         – which demo to run (gravity or bouncy ball)
//! - [`ParametersConfig`] – tick length, physical constants, registry capacity, seed
//! - [`WorldConfig`]      – world width and screen size used by the viewport
//! - [`SunConfig`] / [`PlanetConfig`] – the gravity demo's central body and spawn template
//! - [`BodyConfig`]       – extra bodies present from the first tick
//! - [`BallConfig`]       – the bouncy ball demo
//!
//! Every field has a default, so an empty document runs the gravity demo
//! with the classic constants.
//!
//! # YAML format
//!
//! ```yaml
//! demo: gravity           # or bouncy_ball
//!
//! parameters:
//!   delta_time: 0.0333333 # tick length in seconds
//!   g: 10.0               # gravitational constant
//!   min_distance: 1.0     # separation clamp for 1/d^2
//!   field: [0.0, 0.0]     # optional uniform acceleration
//!   capacity: 10          # starting registry capacity
//!   seed: 42              # spawn point seed
//!
//! world:
//!   width: 1000.0         # world width, height follows the screen aspect
//!   screen: [640, 480]
//!
//! sun:
//!   mass: 100000.0
//!   radius: 30.0
//!
//! planet:                 # template used by every spawn
//!   mass: 30.0
//!   radius: 5.0
//!
//! bodies:
//!   - x: [ 100.0, 0.0 ]
//!     v: [ 0.0, 100.0 ]
//!     m: 50.0
//!     radius: 5.0
//! ```

use std::io::Read;

use serde::Deserialize;

use crate::error::SimError;
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec2;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DemoKind {
    #[default]
    Gravity,    // N-body attraction around a sun
    BouncyBall, // projectile with a floor bounce
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub delta_time: f64,   // tick length
    pub g: f64,            // gravitational constant
    pub min_distance: f64, // separation clamp
    pub field: [f64; 2],   // uniform acceleration on every body
    pub capacity: usize,   // registry starting capacity
    pub seed: u64,         // deterministic seed so spawns are reproducible
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            delta_time: p.delta_time,
            g: p.g,
            min_distance: p.min_distance,
            field: [p.field.x, p.field.y],
            capacity: p.capacity,
            seed: p.seed,
        }
    }
}

impl ParametersConfig {
    pub fn to_parameters(&self) -> Result<Parameters, SimError> {
        Parameters {
            delta_time: self.delta_time,
            g: self.g,
            min_distance: self.min_distance,
            field: NVec2::new(self.field[0], self.field[1]),
            capacity: self.capacity,
            seed: self.seed,
        }
        .validate()
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,         // world width in meters
    pub screen: [u32; 2],   // screen size in pixels
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            screen: [640, 480],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SunConfig {
    pub mass: f64,
    pub radius: f64,
    pub x: [f64; 2],
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            mass: 100_000.0,
            radius: 30.0,
            x: [0.0, 0.0],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PlanetConfig {
    pub mass: f64,
    pub radius: f64,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            mass: 30.0,
            radius: 5.0,
        }
    }
}

/// Initial state of one extra body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // position
    #[serde(default)]
    pub v: [f64; 2], // velocity
    pub m: f64,      // mass
    pub radius: f64, // collider radius, also used for drawing
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BallConfig {
    pub gravity: f64,           // vertical field, negative is down
    pub angle_deg: f64,         // launch angle above the floor
    pub range: f64,             // horizontal distance of the first arc
    pub origin: [f64; 2],       // launch point
    pub radius: f64,
    pub floor: f64,             // floor height in world units
    pub restitution: f64,
    pub trajectory_points: usize,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            gravity: -9.8,
            angle_deg: 45.0,
            range: 95.0,
            origin: [4.0, 4.0],
            radius: 2.0,
            floor: 2.0,
            restitution: 0.8,
            trajectory_points: 20,
        }
    }
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub demo: DemoKind,
    pub parameters: ParametersConfig,
    pub world: WorldConfig,
    pub sun: SunConfig,
    pub planet: PlanetConfig,
    pub bodies: Vec<BodyConfig>,
    pub ball: BallConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, SimError> {
        serde_yaml::from_str(s).map_err(|e| SimError::Config(e.to_string()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SimError> {
        serde_yaml::from_reader(reader).map_err(|e| SimError::Config(e.to_string()))
    }
}

//! Numerical and physical parameters for a run
//!
//! `Parameters` holds runtime settings:
//! - tick length (`delta_time`),
//! - gravitational constant and separation clamp (`g`, `min_distance`),
//! - an optional uniform field applied on top of mutual attraction
//! - registry starting capacity and spawn seed

use super::forces::DEFAULT_MIN_DISTANCE;
use super::states::NVec2;
use crate::error::{ensure_non_negative, ensure_positive, SimError};

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub delta_time: f64,   // tick length in seconds
    pub g: f64,            // gravitational constant
    pub min_distance: f64, // separation clamp
    pub field: NVec2,      // uniform acceleration, zero for none
    pub capacity: usize,   // starting registry capacity
    pub seed: u64,         // spawn point seed
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            delta_time: 1.0 / 30.0,
            g: 10.0,
            min_distance: DEFAULT_MIN_DISTANCE,
            field: NVec2::zeros(),
            capacity: 10,
            seed: 42,
        }
    }
}

impl Parameters {
    pub fn validate(self) -> Result<Self, SimError> {
        ensure_positive("delta_time", self.delta_time)?;
        ensure_non_negative("g", self.g)?;
        ensure_positive("min_distance", self.min_distance)?;
        Ok(self)
    }
}

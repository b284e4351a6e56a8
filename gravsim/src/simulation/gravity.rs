//! Gravity simulator: the body registry plus the all-pairs force step.
//!
//! The simulator holds handles, not bodies. Each tick runs in two phases:
//! 1. read: snapshot every registered body and sum pairwise attraction
//! 2. write: apply each net force once and take an explicit Euler step
//!
//! Because no body moves before every force is known, the result does not
//! depend on the order bodies were registered in (up to rounding).

use tracing::{debug, warn};

use super::forces::{BodyState, Force, ForceSet, NewtonianGravity, DEFAULT_MIN_DISTANCE};
use super::integrator::euler_step;
use super::objects::{ObjectHandle, ObjectSet};
use super::registry::HandleBuffer;
use super::states::NVec2;
use crate::error::{ensure_positive, SimError};

#[derive(Debug)]
pub struct GravitySimulator {
    bodies: HandleBuffer,
    gravity: NewtonianGravity,
    extra: ForceSet, // fields applied on top of mutual attraction
}

impl GravitySimulator {
    pub fn new(g: f64) -> Self {
        Self::with_capacity(g, super::registry::DEFAULT_CAPACITY)
    }

    /// Starts with the separation clamp at [`DEFAULT_MIN_DISTANCE`]
    pub fn with_capacity(g: f64, capacity: usize) -> Self {
        Self {
            bodies: HandleBuffer::with_capacity(capacity),
            gravity: NewtonianGravity {
                g,
                min_distance: DEFAULT_MIN_DISTANCE,
            },
            extra: ForceSet::new(),
        }
    }

    /// Add a force term evaluated on the same snapshot as gravity
    pub fn with_force<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.extra = std::mem::take(&mut self.extra).with(term);
        self
    }

    /// Separation below which the inverse-square law is clamped, must be > 0
    pub fn with_min_distance(mut self, min_distance: f64) -> Result<Self, SimError> {
        self.gravity.min_distance = ensure_positive("min_distance", min_distance)?;
        Ok(self)
    }

    pub fn gravitational_constant(&self) -> f64 {
        self.gravity.g
    }

    pub fn add(&mut self, handle: ObjectHandle) {
        self.bodies.push(handle);
        debug!(?handle, count = self.bodies.len(), "rigid body registered");
    }

    /// Unregister `handle`. Missing handles are logged and ignored.
    pub fn remove(&mut self, handle: ObjectHandle) -> bool {
        let removed = self.bodies.remove(handle);
        if !removed {
            warn!(?handle, "trying to remove a rigid body which is not registered");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.bodies.capacity()
    }

    pub fn growth_count(&self) -> usize {
        self.bodies.growth_count()
    }

    pub fn handles(&self) -> &[ObjectHandle] {
        self.bodies.as_slice()
    }

    /// Registered handles that still resolve, with their pre-tick state
    fn snapshot(&self, objects: &ObjectSet) -> (Vec<ObjectHandle>, Vec<BodyState>) {
        let mut handles = Vec::with_capacity(self.bodies.len());
        let mut states = Vec::with_capacity(self.bodies.len());
        for handle in self.bodies.iter() {
            match objects.get(handle) {
                Some(object) => {
                    handles.push(handle);
                    states.push(BodyState {
                        position: object.position(),
                        mass: object.mass(),
                    });
                }
                None => warn!(?handle, "registered rigid body has no object, skipped"),
            }
        }
        (handles, states)
    }

    /// Read phase: net gravitational force on every live registered body,
    /// in registration order
    pub fn net_forces(&self, objects: &ObjectSet) -> Vec<NVec2> {
        let (_, states) = self.snapshot(objects);
        self.forces_for(&states)
    }

    fn forces_for(&self, states: &[BodyState]) -> Vec<NVec2> {
        let mut out = vec![NVec2::zeros(); states.len()];
        self.extra.accumulate_forces(states, &mut out);
        self.gravity.accumulate(states, &mut out);
        out
    }

    /// Advance every registered body by one tick of length `dt` (> 0)
    pub fn simulate(&self, objects: &mut ObjectSet, dt: f64) -> Result<(), SimError> {
        let dt = ensure_positive("delta_time", dt)?;

        let (handles, states) = self.snapshot(objects);
        if handles.is_empty() {
            return Ok(());
        }

        let forces = self.forces_for(&states);
        euler_step(objects, &handles, &forces, dt)
    }

    /// Mass-weighted mean position of the registered bodies
    pub fn center_of_mass(&self, objects: &ObjectSet) -> Option<NVec2> {
        let (_, states) = self.snapshot(objects);
        let total: f64 = states.iter().map(|s| s.mass).sum();
        if states.is_empty() || total <= 0.0 {
            return None;
        }
        let weighted = states
            .iter()
            .fold(NVec2::zeros(), |acc, s| acc + s.position * s.mass);
        Some(weighted / total)
    }

    pub fn total_momentum(&self, objects: &ObjectSet) -> NVec2 {
        self.bodies
            .iter()
            .filter_map(|h| objects.get(h))
            .fold(NVec2::zeros(), |acc, o| acc + o.rigid_body.momentum())
    }
}

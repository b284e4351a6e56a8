//! Fixed-step explicit Euler integration
//!
//! The write phase of a tick: every force was computed from the pre-tick
//! snapshot, so bodies can be moved one after another without affecting
//! each other within the same tick.

use tracing::warn;

use super::objects::{ObjectHandle, ObjectSet};
use super::states::NVec2;
use crate::error::SimError;

/// Apply `forces[k]` to the body behind `handles[k]` and advance it by `dt`.
/// Handles that no longer resolve to an object are skipped.
pub fn euler_step(
    objects: &mut ObjectSet,
    handles: &[ObjectHandle],
    forces: &[NVec2],
    dt: f64,
) -> Result<(), SimError> {
    debug_assert_eq!(handles.len(), forces.len());

    for (handle, force) in handles.iter().zip(forces) {
        let Some(object) = objects.get_mut(*handle) else {
            warn!(?handle, "integrating a handle with no object behind it, skipped");
            continue;
        };
        let (body, transform) = object.body_and_transform();
        // a = F / m, v += a dt, x += v dt
        body.apply_force(*force);
        body.integrate(transform, dt)?;
    }
    Ok(())
}

//! Collider registry. Collision response is not implemented, `resolve` is a
//! no-op; the registry exists so renderers can walk every circle.

use tracing::warn;

use super::objects::{ObjectHandle, ObjectSet};
use super::registry::HandleBuffer;
use super::states::CirclePhysicalObject;

#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    colliders: HandleBuffer,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            colliders: HandleBuffer::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, handle: ObjectHandle) {
        self.colliders.push(handle);
    }

    pub fn remove(&mut self, handle: ObjectHandle) -> bool {
        let removed = self.colliders.remove(handle);
        if !removed {
            warn!(?handle, "trying to remove a collider which is not registered");
        }
        removed
    }

    /// Visit every registered collider that still has an object
    pub fn for_each_collider<F>(&self, objects: &ObjectSet, mut f: F)
    where
        F: FnMut(ObjectHandle, &CirclePhysicalObject),
    {
        for handle in self.colliders.iter() {
            if let Some(object) = objects.get(handle) {
                f(handle, object);
            }
        }
    }

    pub fn resolve(&mut self, _objects: &mut ObjectSet) {}

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.colliders.capacity()
    }

    pub fn handles(&self) -> &[ObjectHandle] {
        self.colliders.as_slice()
    }
}

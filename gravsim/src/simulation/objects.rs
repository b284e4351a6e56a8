//! Owning arena for physical objects.
//!
//! Registries never own objects, they store an [`ObjectHandle`] (slot index +
//! generation). Removing an object bumps the slot generation, so any handle
//! still held by a registry resolves to `None` instead of a reused slot.

use super::states::CirclePhysicalObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    index: u32,
    generation: u32,
}

impl ObjectHandle {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    object: Option<CirclePhysicalObject>,
}

#[derive(Debug, Default)]
pub struct ObjectSet {
    slots: Vec<Slot>,
    free: Vec<u32>, // indices of empty slots
    len: usize,
}

impl ObjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: CirclePhysicalObject) -> ObjectHandle {
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(object);
            return ObjectHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            object: Some(object),
        });
        ObjectHandle {
            index,
            generation: 0,
        }
    }

    pub fn remove(&mut self, handle: ObjectHandle) -> Option<CirclePhysicalObject> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation {
            return None;
        }
        let object = slot.object.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(object)
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&CirclePhysicalObject> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.object.as_ref())
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut CirclePhysicalObject> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.object.as_mut())
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &CirclePhysicalObject)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.object.as_ref().map(|object| {
                (
                    ObjectHandle {
                        index: i as u32,
                        generation: slot.generation,
                    },
                    object,
                )
            })
        })
    }
}

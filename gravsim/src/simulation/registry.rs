//! Growable buffer of object handles.
//!
//! Backing store of both the gravity simulator and the collision resolver.
//! The capacity is tracked explicitly and doubles when a push would overflow
//! it (0 grows to 2). Removal keeps the relative order of the remaining
//! handles.

use tracing::debug;

use super::objects::ObjectHandle;

pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
pub struct HandleBuffer {
    handles: Vec<ObjectHandle>,
    capacity: usize,
    growth_count: usize,
}

impl Default for HandleBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl HandleBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            handles: Vec::with_capacity(capacity),
            capacity,
            growth_count: 0,
        }
    }

    /// Append at the tail, doubling the capacity first if the buffer is full
    pub fn push(&mut self, handle: ObjectHandle) {
        if self.handles.len() + 1 > self.capacity {
            let new_capacity = if self.capacity == 0 { 2 } else { self.capacity * 2 };
            self.handles.reserve_exact(new_capacity - self.handles.len());
            debug!(from = self.capacity, to = new_capacity, "growing handle buffer");
            self.capacity = new_capacity;
            self.growth_count += 1;
        }
        self.handles.push(handle);
    }

    /// Remove the first occurrence of `handle`; every later entry moves one
    /// slot to the left. Returns `false` if the handle was not present.
    pub fn remove(&mut self, handle: ObjectHandle) -> bool {
        match self.handles.iter().position(|h| *h == handle) {
            Some(i) => {
                self.handles.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.handles.contains(&handle)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of times the capacity has doubled
    pub fn growth_count(&self) -> usize {
        self.growth_count
    }

    pub fn as_slice(&self) -> &[ObjectHandle] {
        &self.handles
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        self.handles.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::objects::ObjectSet;
    use crate::simulation::states::CirclePhysicalObject;

    fn handles(n: usize) -> Vec<ObjectHandle> {
        let mut set = ObjectSet::new();
        (0..n)
            .map(|_| set.insert(CirclePhysicalObject::new(1.0).unwrap()))
            .collect()
    }

    #[test]
    fn zero_capacity_grows_to_two() {
        let hs = handles(3);
        let mut buf = HandleBuffer::with_capacity(0);
        buf.push(hs[0]);
        assert_eq!(buf.capacity(), 2);
        buf.push(hs[1]);
        buf.push(hs[2]);
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.growth_count(), 2);
    }

    #[test]
    fn remove_from_the_front_shifts_everything_left() {
        let hs = handles(4);
        let mut buf = HandleBuffer::default();
        for h in &hs {
            buf.push(*h);
        }
        assert!(buf.remove(hs[0]));
        assert_eq!(buf.as_slice(), &hs[1..]);
        assert!(!buf.remove(hs[0]));
    }
}

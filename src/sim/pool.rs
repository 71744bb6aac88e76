//! Fixed-capacity entity pool
//!
//! Spawning into a full pool is rejected instead of growing. Iteration order
//! is spawn order, which also serves as draw order (last = topmost).

/// A bounded collection of live entities
#[derive(Debug, Clone)]
pub struct Pool<T> {
    capacity: usize,
    items: Vec<T>,
}

impl<T> Pool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// How many more entities fit
    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }

    /// Add an entity if there is room. Returns `None` when the pool is full.
    pub fn spawn(&mut self, item: T) -> Option<&mut T> {
        if self.is_full() {
            return None;
        }
        self.items.push(item);
        self.items.last_mut()
    }

    /// Remove the entity at `index`, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

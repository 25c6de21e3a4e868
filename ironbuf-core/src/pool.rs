//! Reusable storage pool.
//!
//! Pre-allocates a fixed set of equally-sized storages so hot paths can
//! acquire and return regions without touching the allocator. The queue is
//! lock-free; clones of a pool are views of the same slots.

use crossbeam_queue::ArrayQueue;
use std::sync::Arc;

use crate::error::Result;
use crate::storage::{Storage, StorageKind};

/// Pool of pre-allocated, reusable storages.
pub struct StoragePool {
    storages: Arc<ArrayQueue<Storage>>,
    capacity: usize,
    storage_capacity: usize,
}

impl StoragePool {
    /// Creates a pool of `capacity` storages, each `storage_capacity` bytes
    /// of the given kind.
    ///
    /// # Arguments
    /// * `capacity` - Number of slots in the pool
    /// * `storage_capacity` - Size of each storage in bytes
    /// * `kind` - Placement of the pooled regions
    pub fn new(capacity: usize, storage_capacity: usize, kind: StorageKind) -> Result<Self> {
        let storages = ArrayQueue::new(capacity);
        for _ in 0..capacity {
            let _ = storages.push(Storage::allocate(storage_capacity, kind)?);
        }
        Ok(Self {
            storages: Arc::new(storages),
            capacity,
            storage_capacity,
        })
    }

    /// Acquires a storage from the pool.
    ///
    /// Returns `None` if the pool is empty.
    #[inline]
    #[must_use]
    pub fn acquire(&self) -> Option<Storage> {
        self.storages.pop()
    }

    /// Returns a storage to the pool.
    ///
    /// The region is zeroed before it becomes acquirable again. A storage
    /// whose region is no longer live is discarded instead of pooled.
    #[inline]
    pub fn release(&self, mut storage: Storage) {
        if storage.zero().is_ok() {
            let _ = self.storages.push(storage);
        }
    }

    /// Returns the number of slots in the pool.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the size of each pooled storage in bytes.
    #[must_use]
    pub fn storage_capacity(&self) -> usize {
        self.storage_capacity
    }

    /// Returns the number of storages currently available.
    #[must_use]
    pub fn available(&self) -> usize {
        self.storages.len()
    }
}

impl Clone for StoragePool {
    fn clone(&self) -> Self {
        Self {
            storages: Arc::clone(&self.storages),
            capacity: self.capacity,
            storage_capacity: self.storage_capacity,
        }
    }
}

impl std::fmt::Debug for StoragePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoragePool")
            .field("capacity", &self.capacity)
            .field("storage_capacity", &self.storage_capacity)
            .field("available", &self.storages.len())
            .finish()
    }
}

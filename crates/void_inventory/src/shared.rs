//! Thread-safe inventory handle
//!
//! Grid writes and stack compaction are multi-step, so the whole inventory
//! sits behind one lock. Every call below holds it for the full operation.

use crate::catalog::CatalogEntry;
use crate::config::InventoryConfig;
use crate::error::Result;
use crate::event::InventoryEvent;
use crate::inventory::{AddOutcome, Inventory};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Cloneable, lock-guarded inventory
#[derive(Debug, Clone)]
pub struct SharedInventory {
    inner: Arc<Mutex<Inventory>>,
}

impl SharedInventory {
    /// Wrap an existing inventory
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inventory)),
        }
    }

    /// Build an inventory from configuration and wrap it
    pub fn from_config(config: InventoryConfig) -> Result<Self> {
        Ok(Self::new(Inventory::new(config)?))
    }

    /// Add units of an item
    pub fn add_item(&self, item: &Arc<CatalogEntry>, amount: u32) -> Result<AddOutcome> {
        self.inner.lock().add_item(item, amount)
    }

    /// Remove units of an item
    pub fn remove_item(&self, item: &CatalogEntry, amount: u32) -> Result<u32> {
        self.inner.lock().remove_item(item, amount)
    }

    /// Remove units from the stack at a position
    pub fn remove_at(&self, index: usize, amount: u32) -> Result<u32> {
        self.inner.lock().remove_at(index, amount)
    }

    /// Current total weight
    pub fn total_weight(&self) -> f32 {
        self.inner.lock().total_weight()
    }

    /// Whether the weight has reached the heavy threshold
    pub fn is_over_capacity(&self) -> bool {
        self.inner.lock().is_over_capacity()
    }

    /// Count total units of an item
    pub fn count_item(&self, name: &str) -> u32 {
        self.inner.lock().count_item(name)
    }

    /// Take all queued events
    pub fn drain_events(&self) -> Vec<InventoryEvent> {
        self.inner.lock().drain_events()
    }

    /// Run several operations under a single lock
    pub fn with<R>(&self, f: impl FnOnce(&mut Inventory) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    /// Lock the inventory directly
    pub fn lock(&self) -> MutexGuard<'_, Inventory> {
        self.inner.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_adds() {
        let shared = SharedInventory::from_config(InventoryConfig::default()).unwrap();
        let coin = Arc::new(CatalogEntry::new("coin").with_weight(0.01));

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                let coin = Arc::clone(&coin);
                thread::spawn(move || {
                    for _ in 0..50 {
                        shared.add_item(&coin, 3).unwrap();
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(shared.count_item("coin"), 600);
        shared.with(|inv| {
            assert_eq!(inv.len(), 6);
            assert!(inv.stacks().all(|s| s.amount() == 100));
        });
    }

    #[test]
    fn test_with_is_atomic_unit() {
        let shared = SharedInventory::from_config(InventoryConfig::default()).unwrap();
        let bolt = Arc::new(CatalogEntry::new("bolt"));

        let removed = shared.with(|inv| {
            inv.add_item(&bolt, 10).unwrap();
            inv.remove_item(&bolt, 4).unwrap()
        });

        assert_eq!(removed, 4);
        assert_eq!(shared.lock().count_item("bolt"), 6);
    }
}

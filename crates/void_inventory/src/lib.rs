//! Void Inventory - Weight, Slot and Grid Inventory Container
//!
//! This crate provides a bounded item container that resolves every insertion
//! and removal into a consistent set of item stacks and grid placements.
//!
//! # Features
//!
//! - Catalog entries describing item types (weight, stackability, footprint)
//! - Stacking up to [`MAX_STACK`] units, overflowing into new stacks
//! - Three independently togglable capacity policies: weight, slots, grid
//! - First-fit placement of multi-cell items in a 2D occupancy grid
//! - Stable stack handles so grid cells never point at removed stacks
//! - Inventory events for UI and gameplay collaborators
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use void_inventory::prelude::*;
//!
//! let rifle = Arc::new(
//!     CatalogEntry::new("rifle")
//!         .with_stackable(false)
//!         .with_weight(4.5)
//!         .with_footprint(Footprint::new(2, 1)),
//! );
//!
//! let config = InventoryConfig::default().with_grid(5).with_weight_limit(100.0, 0.75);
//! let mut inventory = Inventory::new(config)?;
//! inventory.add_item(&rifle, 1)?;
//! ```

pub mod arena;
pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod grid;
pub mod inventory;
pub mod policy;
pub mod shared;
pub mod stack;

pub mod prelude {
    pub use crate::arena::{StackArena, StackHandle};
    pub use crate::catalog::{CatalogEntry, Footprint};
    pub use crate::config::{InventoryConfig, MAX_GRID_CELLS};
    pub use crate::error::{InventoryError, Result};
    pub use crate::event::{InventoryEvent, MAX_QUEUED_EVENTS};
    pub use crate::grid::{Cell, OccupancyGrid};
    pub use crate::inventory::{AddOutcome, Inventory};
    pub use crate::policy::{AddRequest, CapacityPolicy, CapacitySnapshot, PolicyVerdict, SlotPolicy, WeightPolicy};
    pub use crate::shared::SharedInventory;
    pub use crate::stack::{Stack, MAX_STACK};
}

pub use prelude::*;

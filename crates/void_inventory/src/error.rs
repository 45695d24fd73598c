//! Error types for the inventory system

use thiserror::Error;

/// Inventory errors.
///
/// An operation that returns an error has not mutated the inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A capacity policy rejected the insertion
    #[error("Capacity exceeded ({policy}): cannot add {amount} x '{item}'")]
    CapacityExceeded {
        policy: &'static str,
        item: String,
        amount: u32,
    },

    /// No stack of the requested item exists
    #[error("Item not found in inventory: {0}")]
    ItemNotFound(String),

    /// Positional removal outside the stack list
    #[error("Invalid stack index {index} (inventory holds {len} stacks)")]
    InvalidIndex { index: usize, len: usize },

    /// The grid had no room for any of the requested units
    #[error("No space available for '{item}' ({requested} requested)")]
    NoSpaceAvailable { item: String, requested: u32 },

    /// Invalid configuration
    #[error("Invalid inventory configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;

//! Inventory events

/// Events an inventory keeps before the oldest ones are discarded
pub const MAX_QUEUED_EVENTS: usize = 256;

/// Signals emitted by an inventory.
///
/// Events are queued on the inventory and drained by collaborators
/// (UI, audio, gameplay) with [`crate::Inventory::drain_events`]. At most
/// [`MAX_QUEUED_EVENTS`] are kept; an undrained queue drops its oldest.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryEvent {
    /// Units were added
    ItemAdded {
        item: String,
        quantity: u32,
        stacks_created: usize,
    },
    /// Units were removed
    ItemRemoved { item: String, quantity: u32 },
    /// An insertion was rejected by a capacity policy
    CapacityExceeded { item: String, policy: &'static str },
    /// An insertion brings the inventory to its heavy threshold
    NearCapacity { projected_weight: f32, threshold: f32 },
    /// By-name removal found no stack
    ItemNotFound { item: String },
    /// Positional removal was out of range
    InvalidIndex { index: usize, len: usize },
    /// Some or all units could not be placed in the grid
    NoSpaceAvailable { item: String, dropped: u32 },
}

impl InventoryEvent {
    /// Whether the event reports a rejected or partially applied operation
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::CapacityExceeded { .. }
                | Self::ItemNotFound { .. }
                | Self::InvalidIndex { .. }
                | Self::NoSpaceAvailable { .. }
        )
    }
}

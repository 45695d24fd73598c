//! Capacity policies
//!
//! Each active policy inspects an insertion request against the pre-insertion
//! state. The inventory evaluates its policies in order and accepts the
//! request only if none of them rejects it.

use crate::catalog::CatalogEntry;
use crate::error::InventoryError;
use crate::event::InventoryEvent;
use std::fmt;

/// An insertion request
#[derive(Debug, Clone, Copy)]
pub struct AddRequest<'a> {
    /// Item being added
    pub item: &'a CatalogEntry,
    /// Requested units
    pub amount: u32,
}

impl AddRequest<'_> {
    /// Weight of every requested unit
    pub fn weight(&self) -> f32 {
        self.item.unit_weight() * self.amount as f32
    }
}

/// Inventory state seen by policies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacitySnapshot {
    /// Current total weight
    pub total_weight: f32,
    /// Current number of stacks
    pub stack_count: usize,
}

/// Result of a policy check
#[derive(Debug)]
pub enum PolicyVerdict {
    /// Request may proceed
    Accept,
    /// Request may proceed, with a warning
    Warn(InventoryEvent),
    /// Request must be rejected without mutation
    Reject(InventoryError),
}

/// A pluggable capacity check
pub trait CapacityPolicy: fmt::Debug + Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &'static str;

    /// Check a request against the current state
    fn check(&self, request: &AddRequest<'_>, state: &CapacitySnapshot) -> PolicyVerdict;
}

fn reject(policy: &'static str, request: &AddRequest<'_>) -> PolicyVerdict {
    PolicyVerdict::Reject(InventoryError::CapacityExceeded {
        policy,
        item: request.item.name.clone(),
        amount: request.amount,
    })
}

/// Total weight limit with a "heavy" cushion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightPolicy {
    /// Absolute limit
    pub max_weight: f32,
    /// Fraction of `max_weight` considered heavy
    pub cushion: f32,
    /// Reject when the projected weight exceeds `max_weight`
    pub strict: bool,
}

impl WeightPolicy {
    /// Create a weight policy
    pub fn new(max_weight: f32, cushion: f32) -> Self {
        Self {
            max_weight,
            cushion,
            strict: false,
        }
    }

    /// Weight at which the inventory counts as heavy
    pub fn threshold(&self) -> f32 {
        self.max_weight * self.cushion
    }
}

impl CapacityPolicy for WeightPolicy {
    fn name(&self) -> &'static str {
        "weight"
    }

    fn check(&self, request: &AddRequest<'_>, state: &CapacitySnapshot) -> PolicyVerdict {
        // Only the pre-insertion weight is a hard limit unless strict
        if state.total_weight >= self.max_weight {
            return reject(self.name(), request);
        }

        let projected_weight = state.total_weight + request.weight();
        if self.strict && projected_weight > self.max_weight {
            return reject(self.name(), request);
        }

        if projected_weight >= self.threshold() {
            PolicyVerdict::Warn(InventoryEvent::NearCapacity {
                projected_weight,
                threshold: self.threshold(),
            })
        } else {
            PolicyVerdict::Accept
        }
    }
}

/// Stack count limit.
///
/// Counts existing stacks only; a request that would merge entirely into
/// existing stacks is still rejected once the limit is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPolicy {
    /// Maximum number of stacks
    pub max_slots: usize,
}

impl SlotPolicy {
    /// Create a slot policy
    pub fn new(max_slots: usize) -> Self {
        Self { max_slots }
    }
}

impl CapacityPolicy for SlotPolicy {
    fn name(&self) -> &'static str {
        "slots"
    }

    fn check(&self, request: &AddRequest<'_>, state: &CapacitySnapshot) -> PolicyVerdict {
        if state.stack_count >= self.max_slots {
            reject(self.name(), request)
        } else {
            PolicyVerdict::Accept
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(total_weight: f32, stack_count: usize) -> CapacitySnapshot {
        CapacitySnapshot {
            total_weight,
            stack_count,
        }
    }

    #[test]
    fn test_weight_policy_thresholds() {
        let rock = CatalogEntry::new("rock").with_weight(1.0);
        let policy = WeightPolicy::new(100.0, 0.75);

        let small = AddRequest { item: &rock, amount: 10 };
        assert!(matches!(policy.check(&small, &state(0.0, 0)), PolicyVerdict::Accept));
        assert!(matches!(
            policy.check(&small, &state(70.0, 1)),
            PolicyVerdict::Warn(InventoryEvent::NearCapacity { .. })
        ));
        assert!(matches!(
            policy.check(&small, &state(100.0, 1)),
            PolicyVerdict::Reject(InventoryError::CapacityExceeded { policy: "weight", .. })
        ));
    }

    #[test]
    fn test_weight_policy_lenient_overshoot() {
        let rock = CatalogEntry::new("rock").with_weight(1.0);
        let request = AddRequest { item: &rock, amount: 20 };

        let lenient = WeightPolicy::new(100.0, 0.75);
        assert!(matches!(lenient.check(&request, &state(90.0, 1)), PolicyVerdict::Warn(_)));

        let strict = WeightPolicy { strict: true, ..lenient };
        assert!(matches!(strict.check(&request, &state(90.0, 1)), PolicyVerdict::Reject(_)));
    }

    #[test]
    fn test_slot_policy() {
        let rock = CatalogEntry::new("rock");
        let request = AddRequest { item: &rock, amount: 1 };
        let policy = SlotPolicy::new(3);

        assert!(matches!(policy.check(&request, &state(0.0, 2)), PolicyVerdict::Accept));
        assert!(matches!(policy.check(&request, &state(0.0, 3)), PolicyVerdict::Reject(_)));
    }
}

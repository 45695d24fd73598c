//! Item stacks held by an inventory

use crate::catalog::CatalogEntry;
use crate::grid::Cell;
use std::sync::Arc;

/// Maximum number of units a single stack can hold
pub const MAX_STACK: u32 = 100;

/// A run-time holding of one item type.
///
/// Stacks are created and destroyed by the inventory only. A stack never
/// holds fewer than one or more than [`MAX_STACK`] units while observable.
#[derive(Debug, Clone)]
pub struct Stack {
    item: Arc<CatalogEntry>,
    amount: u32,
    cells: Vec<Cell>,
}

impl Stack {
    pub(crate) fn new(item: Arc<CatalogEntry>, amount: u32) -> Self {
        Self {
            item,
            amount: amount.clamp(1, MAX_STACK),
            cells: Vec::new(),
        }
    }

    /// Catalog entry this stack holds
    pub fn item(&self) -> &Arc<CatalogEntry> {
        &self.item
    }

    /// Item name (stacking identity)
    pub fn name(&self) -> &str {
        &self.item.name
    }

    /// Number of units
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Grid cells occupied (empty outside grid mode)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Total weight of this stack
    pub fn weight(&self) -> f32 {
        self.item.unit_weight() * self.amount as f32
    }

    /// Units that can still be merged in
    pub fn room(&self) -> u32 {
        MAX_STACK.saturating_sub(self.amount)
    }

    /// Check if the stack has been drained
    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }

    /// Merge up to `amount` units in, returning how many were taken
    pub(crate) fn absorb(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.room());
        self.amount += moved;
        moved
    }

    /// Remove up to `amount` units, returning how many were removed
    pub(crate) fn take(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.amount);
        self.amount -= removed;
        removed
    }

    pub(crate) fn set_cells(&mut self, cells: Vec<Cell>) {
        self.cells = cells;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> Arc<CatalogEntry> {
        Arc::new(CatalogEntry::new("gold").with_weight(0.5))
    }

    #[test]
    fn test_absorb_respects_cap() {
        let mut stack = Stack::new(gold(), 70);

        let moved = stack.absorb(50);
        assert_eq!(moved, 30);
        assert_eq!(stack.amount(), MAX_STACK);
        assert_eq!(stack.room(), 0);
        assert_eq!(stack.absorb(1), 0);
    }

    #[test]
    fn test_take() {
        let mut stack = Stack::new(gold(), 20);

        assert_eq!(stack.take(5), 5);
        assert_eq!(stack.amount(), 15);
        assert_eq!(stack.take(40), 15);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_new_clamps_amount() {
        assert_eq!(Stack::new(gold(), 250).amount(), MAX_STACK);
        assert_eq!(Stack::new(gold(), 0).amount(), 1);
    }

    #[test]
    fn test_weight() {
        let stack = Stack::new(gold(), 10);
        assert_eq!(stack.weight(), 5.0);
    }
}

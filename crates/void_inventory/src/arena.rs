//! Stack arena - generational storage with positional order
//!
//! Stacks are addressed by stable [`StackHandle`]s so the occupancy grid can
//! refer to them without being rewritten when an earlier stack is removed.
//! The arena also records insertion order, which is the positional index
//! space exposed to callers.

use crate::stack::Stack;

/// Stable key of a stack inside an inventory
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StackHandle {
    index: u32,
    generation: u32,
}

impl StackHandle {
    const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Raw slot index
    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot when this handle was issued
    #[inline]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

impl core::fmt::Debug for StackHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "StackHandle({}v{})", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    stack: Option<Stack>,
    generation: u32,
}

/// Ordered stack storage
#[derive(Debug, Clone, Default)]
pub struct StackArena {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    order: Vec<StackHandle>,
}

impl StackArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stack at the end of the order
    pub fn insert(&mut self, stack: Stack) -> StackHandle {
        let handle = if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.stack = Some(stack);
            StackHandle::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                stack: Some(stack),
                generation: 0,
            });
            StackHandle::new(index, 0)
        };

        self.order.push(handle);
        handle
    }

    /// Remove a stack; later stacks shift down one position
    pub fn remove(&mut self, handle: StackHandle) -> Option<Stack> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation || slot.stack.is_none() {
            return None;
        }

        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index);
        if let Some(position) = self.order.iter().position(|h| *h == handle) {
            self.order.remove(position);
        }

        slot.stack.take()
    }

    /// Get a stack by handle
    pub fn get(&self, handle: StackHandle) -> Option<&Stack> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.stack.as_ref()
    }

    /// Get a mutable stack by handle
    pub fn get_mut(&mut self, handle: StackHandle) -> Option<&mut Stack> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.stack.as_mut()
    }

    /// Check if a handle still refers to a live stack
    pub fn contains(&self, handle: StackHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Handle at a position in insertion order
    pub fn handle_at(&self, position: usize) -> Option<StackHandle> {
        self.order.get(position).copied()
    }

    /// Position of a handle in insertion order
    pub fn position(&self, handle: StackHandle) -> Option<usize> {
        self.order.iter().position(|h| *h == handle)
    }

    /// Number of live stacks
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Stacks in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (StackHandle, &Stack)> {
        self.order
            .iter()
            .filter_map(|&handle| self.get(handle).map(|stack| (handle, stack)))
    }

    /// Remove every stack
    pub fn clear(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.stack.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(i as u32);
            }
        }
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use std::sync::Arc;

    fn stack(name: &str, amount: u32) -> Stack {
        Stack::new(Arc::new(CatalogEntry::new(name)), amount)
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut arena = StackArena::new();

        let a = arena.insert(stack("a", 1));
        let b = arena.insert(stack("b", 2));

        assert_eq!(arena.handle_at(0), Some(a));
        assert_eq!(arena.handle_at(1), Some(b));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_remove_compacts_positions() {
        let mut arena = StackArena::new();

        let a = arena.insert(stack("a", 1));
        let b = arena.insert(stack("b", 1));
        let c = arena.insert(stack("c", 1));

        let removed = arena.remove(a).unwrap();
        assert_eq!(removed.name(), "a");
        assert_eq!(arena.position(b), Some(0));
        assert_eq!(arena.position(c), Some(1));
        assert!(!arena.contains(a));
    }

    #[test]
    fn test_stale_handle_rejected() {
        let mut arena = StackArena::new();

        let old = arena.insert(stack("a", 1));
        arena.remove(old);
        let new = arena.insert(stack("b", 1));

        // Slot reused, generation bumped
        assert_eq!(old.index(), new.index());
        assert_ne!(old.generation(), new.generation());
        assert!(arena.get(old).is_none());
        assert!(arena.remove(old).is_none());
        assert_eq!(arena.get(new).unwrap().name(), "b");
    }

    #[test]
    fn test_clear() {
        let mut arena = StackArena::new();
        let a = arena.insert(stack("a", 1));
        arena.insert(stack("b", 1));

        arena.clear();

        assert!(arena.is_empty());
        assert!(!arena.contains(a));
        assert_eq!(arena.iter().count(), 0);
    }
}

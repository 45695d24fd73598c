//! Inventory container

use crate::arena::{StackArena, StackHandle};
use crate::catalog::CatalogEntry;
use crate::config::InventoryConfig;
use crate::error::{InventoryError, Result};
use crate::event::{InventoryEvent, MAX_QUEUED_EVENTS};
use crate::grid::OccupancyGrid;
use crate::policy::{AddRequest, CapacityPolicy, CapacitySnapshot, PolicyVerdict, SlotPolicy, WeightPolicy};
use crate::stack::{Stack, MAX_STACK};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Result of a successful [`Inventory::add_item`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddOutcome {
    /// Units requested
    pub requested: u32,
    /// Units actually stored
    pub added: u32,
    /// Units merged into stacks that already existed
    pub merged: u32,
    /// Units that found no grid space
    pub dropped: u32,
    /// Stacks created, in creation order
    pub created: Vec<StackHandle>,
    /// The insertion reached the heavy threshold
    pub near_capacity: bool,
}

impl AddOutcome {
    fn new(requested: u32) -> Self {
        Self {
            requested,
            ..Default::default()
        }
    }

    /// Whether every requested unit was stored
    pub fn is_complete(&self) -> bool {
        self.added == self.requested
    }
}

/// Inventory container
///
/// Holds an ordered list of stacks. Positions in that list are the index
/// space used by [`Inventory::remove_at`]; removing a stack shifts the later
/// ones down. In grid mode every stack also owns a rectangle of grid cells.
#[derive(Debug)]
pub struct Inventory {
    config: InventoryConfig,
    stacks: StackArena,
    /// item name -> stacks of that item, in container order
    by_name: HashMap<String, Vec<StackHandle>>,
    grid: Option<OccupancyGrid>,
    policies: Vec<Box<dyn CapacityPolicy>>,
    total_weight: f32,
    events: VecDeque<InventoryEvent>,
}

impl Inventory {
    /// Create an inventory from a validated configuration
    pub fn new(config: InventoryConfig) -> Result<Self> {
        config.validate()?;

        let mut policies: Vec<Box<dyn CapacityPolicy>> = Vec::new();
        if config.weight_based {
            policies.push(Box::new(WeightPolicy {
                max_weight: config.max_weight,
                cushion: config.weight_cushion,
                strict: config.strict_weight,
            }));
        }
        if config.slot_based {
            policies.push(Box::new(SlotPolicy::new(config.max_slots)));
        }

        let grid = config
            .grid_based
            .then(|| OccupancyGrid::new(config.columns, config.rows()));

        log::debug!(
            "Created inventory (weight: {}, slots: {}, grid: {:?})",
            config.weight_based,
            config.slot_based,
            grid.as_ref().map(|g| (g.columns(), g.rows()))
        );

        Ok(Self {
            config,
            stacks: StackArena::new(),
            by_name: HashMap::new(),
            grid,
            policies,
            total_weight: 0.0,
            events: VecDeque::new(),
        })
    }

    /// Append an extra capacity policy, evaluated after the configured ones
    pub fn add_policy(&mut self, policy: Box<dyn CapacityPolicy>) {
        self.policies.push(policy);
    }

    /// Configuration this inventory was built with
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Get number of stacks
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Check if inventory is empty
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Stacks in container order
    pub fn stacks(&self) -> impl Iterator<Item = &Stack> {
        self.stacks.iter().map(|(_, stack)| stack)
    }

    /// Stack at a position
    pub fn stack(&self, index: usize) -> Option<&Stack> {
        self.stacks.handle_at(index).and_then(|h| self.stacks.get(h))
    }

    /// Stack by handle, `None` once it has been removed
    pub fn stack_by_handle(&self, handle: StackHandle) -> Option<&Stack> {
        self.stacks.get(handle)
    }

    /// Handle of the stack at a position
    pub fn handle_at(&self, index: usize) -> Option<StackHandle> {
        self.stacks.handle_at(index)
    }

    /// Current position of a stack
    pub fn position_of(&self, handle: StackHandle) -> Option<usize> {
        self.stacks.position(handle)
    }

    /// Count total units of an item
    pub fn count_item(&self, name: &str) -> u32 {
        self.by_name
            .get(name)
            .map(|handles| {
                handles
                    .iter()
                    .filter_map(|&h| self.stacks.get(h))
                    .map(Stack::amount)
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Check if any stack of an item is held
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Occupancy grid (grid mode only)
    pub fn grid(&self) -> Option<&OccupancyGrid> {
        self.grid.as_ref()
    }

    /// Grid columns (0 outside grid mode)
    pub fn columns(&self) -> usize {
        self.grid.as_ref().map(OccupancyGrid::columns).unwrap_or(0)
    }

    /// Grid rows (0 outside grid mode)
    pub fn rows(&self) -> usize {
        self.grid.as_ref().map(OccupancyGrid::rows).unwrap_or(0)
    }

    /// Current total weight
    pub fn total_weight(&self) -> f32 {
        self.total_weight
    }

    /// Whether the weight has reached the heavy threshold
    pub fn is_over_capacity(&self) -> bool {
        self.total_weight >= self.config.heavy_threshold()
    }

    /// Number of events waiting to be drained
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<InventoryEvent> {
        self.events.drain(..).collect()
    }

    fn push_event(&mut self, event: InventoryEvent) {
        if self.events.len() >= MAX_QUEUED_EVENTS {
            if let Some(dropped) = self.events.pop_front() {
                log::trace!("Event queue full, discarding {:?}", dropped);
            }
        }
        self.events.push_back(event);
    }

    fn snapshot(&self) -> CapacitySnapshot {
        CapacitySnapshot {
            total_weight: self.total_weight,
            stack_count: self.stacks.len(),
        }
    }

    /// Add units of an item.
    ///
    /// Units first fill existing stacks of the same name (stackable items
    /// only), then spill into new stacks of at most [`MAX_STACK`] units.
    /// Non-stackable items get one stack per unit. In grid mode each new
    /// stack needs a free rectangle; units that find none are dropped and
    /// reported in [`AddOutcome::dropped`].
    ///
    /// Returns an error, leaving the inventory untouched, if a capacity
    /// policy rejects the request or no unit could be placed at all.
    pub fn add_item(&mut self, item: &Arc<CatalogEntry>, amount: u32) -> Result<AddOutcome> {
        let mut outcome = AddOutcome::new(amount);
        if amount == 0 {
            return Ok(outcome);
        }

        let request = AddRequest { item, amount };
        let state = self.snapshot();
        let mut warnings = Vec::new();
        let mut rejection = None;
        for policy in &self.policies {
            match policy.check(&request, &state) {
                PolicyVerdict::Accept => {}
                PolicyVerdict::Warn(event) => warnings.push(event),
                PolicyVerdict::Reject(err) => {
                    rejection = Some((policy.name(), err));
                    break;
                }
            }
        }
        if let Some((policy, err)) = rejection {
            log::warn!("{}", err);
            self.push_event(InventoryEvent::CapacityExceeded {
                item: item.name.clone(),
                policy,
            });
            return Err(err);
        }

        let mut remaining = amount;
        if item.stackable {
            remaining = self.merge_into_existing(item, remaining, &mut outcome);
        }

        while remaining > 0 {
            let chunk = if item.stackable { remaining.min(MAX_STACK) } else { 1 };
            match self.create_stack(item, chunk) {
                Some(handle) => {
                    outcome.created.push(handle);
                    remaining -= chunk;
                }
                None => break,
            }
        }

        outcome.added = amount - remaining;
        outcome.dropped = remaining;

        if outcome.added == 0 {
            log::warn!("No space for {} x '{}'", amount, item.name);
            self.push_event(InventoryEvent::NoSpaceAvailable {
                item: item.name.clone(),
                dropped: amount,
            });
            return Err(InventoryError::NoSpaceAvailable {
                item: item.name.clone(),
                requested: amount,
            });
        }

        for warning in warnings {
            if let InventoryEvent::NearCapacity { projected_weight, threshold } = &warning {
                log::info!(
                    "Inventory is heavy: {:.2} >= {:.2} after adding '{}'",
                    projected_weight,
                    threshold,
                    item.name
                );
                outcome.near_capacity = true;
            }
            self.push_event(warning);
        }

        if outcome.dropped > 0 {
            log::warn!(
                "Grid full: dropped {} of {} x '{}'",
                outcome.dropped,
                amount,
                item.name
            );
            self.push_event(InventoryEvent::NoSpaceAvailable {
                item: item.name.clone(),
                dropped: outcome.dropped,
            });
        }

        self.recalculate_weight();
        log::debug!(
            "Added {} x '{}' ({} merged, {} new stacks)",
            outcome.added,
            item.name,
            outcome.merged,
            outcome.created.len()
        );
        self.push_event(InventoryEvent::ItemAdded {
            item: item.name.clone(),
            quantity: outcome.added,
            stacks_created: outcome.created.len(),
        });

        Ok(outcome)
    }

    /// Fill partial stacks of the same item in container order
    fn merge_into_existing(&mut self, item: &CatalogEntry, mut remaining: u32, outcome: &mut AddOutcome) -> u32 {
        let Some(handles) = self.by_name.get(&item.name) else {
            return remaining;
        };

        for &handle in handles {
            if remaining == 0 {
                break;
            }
            if let Some(stack) = self.stacks.get_mut(handle) {
                let moved = stack.absorb(remaining);
                remaining -= moved;
                outcome.merged += moved;
            }
        }

        remaining
    }

    /// Create one stack, claiming grid space first in grid mode
    fn create_stack(&mut self, item: &Arc<CatalogEntry>, amount: u32) -> Option<StackHandle> {
        let stack = Stack::new(Arc::clone(item), amount);

        let handle = match self.grid.as_mut() {
            Some(grid) => {
                let cells = grid.find_space(item.footprint)?;
                let handle = self.stacks.insert(stack);
                grid.occupy(&cells, handle);
                if let Some(stack) = self.stacks.get_mut(handle) {
                    stack.set_cells(cells);
                }
                handle
            }
            None => self.stacks.insert(stack),
        };

        self.by_name.entry(item.name.clone()).or_default().push(handle);
        Some(handle)
    }

    /// Remove a stack and free its grid cells
    fn destroy_stack(&mut self, handle: StackHandle) -> Option<Stack> {
        let stack = self.stacks.remove(handle)?;

        if let Some(grid) = self.grid.as_mut() {
            grid.release(handle);
        }

        if let Some(handles) = self.by_name.get_mut(stack.name()) {
            handles.retain(|&h| h != handle);
            if handles.is_empty() {
                self.by_name.remove(stack.name());
            }
        }

        Some(stack)
    }

    /// Remove units of an item, draining its stacks in container order.
    ///
    /// Only the entry's name is consulted, so any entry with the same name
    /// matches, including one borrowed from an `Arc` (`&*arc`, or `&arc`
    /// through deref). Requests larger than the held quantity remove
    /// everything held. Returns the number of units actually removed.
    pub fn remove_item(&mut self, item: &CatalogEntry, amount: u32) -> Result<u32> {
        let handles = match self.by_name.get(&item.name) {
            Some(handles) => handles.clone(),
            None => {
                log::warn!("'{}' cannot be found in inventory", item.name);
                self.push_event(InventoryEvent::ItemNotFound {
                    item: item.name.clone(),
                });
                return Err(InventoryError::ItemNotFound(item.name.clone()));
            }
        };

        let mut remaining = amount;
        let mut emptied = Vec::new();
        for handle in handles {
            if remaining == 0 {
                break;
            }
            if let Some(stack) = self.stacks.get_mut(handle) {
                remaining -= stack.take(remaining);
                if stack.is_empty() {
                    emptied.push(handle);
                }
            }
        }

        for handle in emptied {
            self.destroy_stack(handle);
        }

        let removed = amount - remaining;
        if remaining > 0 {
            log::debug!(
                "Requested {} x '{}' but only {} were held",
                amount,
                item.name,
                removed
            );
        }

        self.finish_removal(&item.name, removed);
        Ok(removed)
    }

    /// Remove units from the stack at a position.
    ///
    /// The stack is removed once it holds no units. Returns the number of
    /// units actually removed.
    pub fn remove_at(&mut self, index: usize, amount: u32) -> Result<u32> {
        let Some(handle) = self.stacks.handle_at(index) else {
            let len = self.stacks.len();
            log::error!("Invalid index, {} (inventory holds {} stacks)", index, len);
            self.push_event(InventoryEvent::InvalidIndex { index, len });
            return Err(InventoryError::InvalidIndex { index, len });
        };

        let Some(stack) = self.stacks.get_mut(handle) else {
            return Ok(0);
        };
        let removed = stack.take(amount);
        let name = stack.name().to_string();
        if stack.is_empty() {
            self.destroy_stack(handle);
        }

        self.finish_removal(&name, removed);
        Ok(removed)
    }

    fn finish_removal(&mut self, name: &str, removed: u32) {
        if removed == 0 {
            return;
        }
        self.recalculate_weight();
        log::debug!("Removed {} x '{}'", removed, name);
        self.push_event(InventoryEvent::ItemRemoved {
            item: name.to_string(),
            quantity: removed,
        });
    }

    /// Remove every stack
    pub fn clear(&mut self) {
        self.stacks.clear();
        self.by_name.clear();
        if let Some(grid) = self.grid.as_mut() {
            grid.clear();
        }
        self.recalculate_weight();
    }

    fn recalculate_weight(&mut self) {
        self.total_weight = self.stacks().map(Stack::weight).sum();
    }
}

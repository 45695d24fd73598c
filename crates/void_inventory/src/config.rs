//! Inventory configuration
//!
//! Configuration is fixed when the inventory is constructed. It can be built
//! in code or loaded from TOML:
//!
//! ```toml
//! weight_based = true
//! grid_based = true
//! max_weight = 60.0
//! weight_cushion = 0.8
//! max_slots = 40
//! columns = 8
//! ```

use crate::error::{InventoryError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest grid (columns x rows) an inventory will allocate
pub const MAX_GRID_CELLS: usize = 1 << 16;

/// Construction-time inventory settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Enforce a weight limit
    pub weight_based: bool,
    /// Enforce a stack count limit
    pub slot_based: bool,
    /// Place stacks in a 2D grid
    pub grid_based: bool,
    /// Absolute weight limit
    pub max_weight: f32,
    /// Fraction of `max_weight` at which the inventory counts as heavy
    pub weight_cushion: f32,
    /// Maximum number of stacks (also sizes the grid)
    pub max_slots: usize,
    /// Grid columns
    pub columns: usize,
    /// Also reject insertions whose projected weight exceeds `max_weight`
    pub strict_weight: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            weight_based: false,
            slot_based: false,
            grid_based: false,
            max_weight: 100.0,
            weight_cushion: 0.75,
            max_slots: 100,
            columns: 5,
            strict_weight: false,
        }
    }
}

impl InventoryConfig {
    /// Enable the weight limit
    pub fn with_weight_limit(mut self, max_weight: f32, cushion: f32) -> Self {
        self.weight_based = true;
        self.max_weight = max_weight;
        self.weight_cushion = cushion;
        self
    }

    /// Reject insertions that would end above the weight limit
    pub fn with_strict_weight(mut self, strict: bool) -> Self {
        self.strict_weight = strict;
        self
    }

    /// Enable the stack count limit
    pub fn with_slot_limit(mut self, max_slots: usize) -> Self {
        self.slot_based = true;
        self.max_slots = max_slots;
        self
    }

    /// Set the slot count without enforcing it (grid sizing only)
    pub fn with_max_slots(mut self, max_slots: usize) -> Self {
        self.max_slots = max_slots;
        self
    }

    /// Enable grid placement with the given column count
    pub fn with_grid(mut self, columns: usize) -> Self {
        self.grid_based = true;
        self.columns = columns;
        self
    }

    /// Grid rows, `max_slots / columns` (remainder slots are unused)
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            return 0;
        }
        self.max_slots / self.columns
    }

    /// Weight at which the inventory counts as heavy
    pub fn heavy_threshold(&self) -> f32 {
        self.max_weight * self.weight_cushion
    }

    /// Check the settings for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.max_weight.is_finite() || self.max_weight < 0.0 {
            return Err(InventoryError::InvalidConfig(format!(
                "max_weight must be a non-negative number, got {}",
                self.max_weight
            )));
        }
        if !(self.weight_cushion > 0.0 && self.weight_cushion <= 1.0) {
            return Err(InventoryError::InvalidConfig(format!(
                "weight_cushion must be in (0, 1], got {}",
                self.weight_cushion
            )));
        }
        if self.grid_based && self.columns == 0 {
            return Err(InventoryError::InvalidConfig(
                "grid inventories need at least one column".to_string(),
            ));
        }
        if self.grid_based {
            match self.columns.checked_mul(self.rows()) {
                Some(cells) if cells <= MAX_GRID_CELLS => {}
                _ => {
                    return Err(InventoryError::InvalidConfig(format!(
                        "grid of {} columns x {} rows exceeds {} cells",
                        self.columns,
                        self.rows(),
                        MAX_GRID_CELLS
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: InventoryConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

//! Catalog entries (item type definitions)

use serde::{Deserialize, Serialize};

/// Grid footprint of an item, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    /// Width in grid columns
    pub columns: usize,
    /// Height in grid rows
    pub rows: usize,
}

impl Footprint {
    /// Single cell footprint
    pub const UNIT: Self = Self { columns: 1, rows: 1 };

    /// Create a footprint, clamping both sides to at least one cell
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    /// Number of cells covered
    pub fn area(&self) -> usize {
        self.columns * self.rows
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Immutable description of an item type.
///
/// Entries are owned by an external catalog and shared with inventories
/// through `Arc`. Two entries with the same `name` are treated as the same
/// item type when stacking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogEntry {
    /// Display name, also the stacking identity
    pub name: String,
    /// Description
    pub description: String,
    /// Icon path
    pub icon_path: String,
    /// Whether units merge into shared stacks
    pub stackable: bool,
    /// Weight of a single unit
    pub weight: f32,
    /// Cells occupied in grid mode
    pub footprint: Footprint,
}

impl CatalogEntry {
    /// Create a stackable, weightless 1x1 entry
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            icon_path: String::new(),
            stackable: true,
            weight: 0.0,
            footprint: Footprint::UNIT,
        }
    }

    /// Set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set icon path
    pub fn with_icon(mut self, path: impl Into<String>) -> Self {
        self.icon_path = path.into();
        self
    }

    /// Set stackability
    pub fn with_stackable(mut self, stackable: bool) -> Self {
        self.stackable = stackable;
        self
    }

    /// Set unit weight (negative values clamp to zero)
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight.max(0.0);
        self
    }

    /// Set grid footprint
    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = Footprint::new(footprint.columns, footprint.rows);
        self
    }

    /// Unit weight, never negative even for hand-built entries
    pub fn unit_weight(&self) -> f32 {
        self.weight.max(0.0)
    }
}

impl Default for CatalogEntry {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entry_builder() {
        let entry = CatalogEntry::new("medkit")
            .with_description("Restores health")
            .with_icon("icons/medkit.png")
            .with_stackable(false)
            .with_weight(1.5)
            .with_footprint(Footprint::new(2, 1));

        assert_eq!(entry.name, "medkit");
        assert!(!entry.stackable);
        assert_eq!(entry.unit_weight(), 1.5);
        assert_eq!(entry.footprint.area(), 2);
    }

    #[test]
    fn test_defaults() {
        let entry = CatalogEntry::default();

        assert!(entry.stackable);
        assert_eq!(entry.weight, 0.0);
        assert_eq!(entry.footprint, Footprint::UNIT);
    }

    #[test]
    fn test_clamping() {
        let entry = CatalogEntry::new("ghost").with_weight(-3.0);
        assert_eq!(entry.unit_weight(), 0.0);

        assert_eq!(Footprint::new(0, 0), Footprint::UNIT);
    }

    #[test]
    fn test_deserialize_partial_entry() {
        let entry: CatalogEntry = serde_json::from_str(
            r#"{ "name": "plank", "weight": 2.0, "footprint": { "columns": 1, "rows": 3 } }"#,
        )
        .unwrap();

        assert_eq!(entry.name, "plank");
        assert!(entry.stackable);
        assert_eq!(entry.footprint, Footprint::new(1, 3));
    }
}

//! Occupancy grid for spatial inventories

use crate::arena::StackHandle;
use crate::catalog::Footprint;

/// A grid cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column (x)
    pub column: usize,
    /// Row (y)
    pub row: usize,
}

impl Cell {
    /// Create a cell coordinate
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

/// `columns x rows` matrix mapping cells to the stack occupying them
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    columns: usize,
    rows: usize,
    cells: Vec<Option<StackHandle>>,
}

impl OccupancyGrid {
    /// Create an empty grid
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![None; columns * rows],
        }
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    fn offset(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.columns && row < self.rows).then(|| row * self.columns + column)
    }

    /// Stack occupying a cell, `None` if empty or out of bounds
    pub fn get(&self, column: usize, row: usize) -> Option<StackHandle> {
        self.offset(column, row).and_then(|i| self.cells[i])
    }

    /// Check if a cell is inside the grid and free
    pub fn is_free(&self, column: usize, row: usize) -> bool {
        self.offset(column, row)
            .map(|i| self.cells[i].is_none())
            .unwrap_or(false)
    }

    /// Number of empty cells
    pub fn free_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// All occupied cells with their owners
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, StackHandle)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, owner)| {
            owner.map(|handle| (Cell::new(i % self.columns, i / self.columns), handle))
        })
    }

    fn region_is_free(&self, column: usize, row: usize, footprint: Footprint) -> bool {
        (0..footprint.columns)
            .all(|dx| (0..footprint.rows).all(|dy| self.is_free(column + dx, row + dy)))
    }

    /// First-fit search for a free rectangle.
    ///
    /// Candidate origins are scanned column by column, top to bottom within a
    /// column. Returns the cells of the first fully free rectangle.
    pub fn find_space(&self, footprint: Footprint) -> Option<Vec<Cell>> {
        let footprint = Footprint::new(footprint.columns, footprint.rows);
        if footprint.columns > self.columns || footprint.rows > self.rows {
            return None;
        }

        for column in 0..=self.columns - footprint.columns {
            for row in 0..=self.rows - footprint.rows {
                if self.region_is_free(column, row, footprint) {
                    let mut cells = Vec::with_capacity(footprint.area());
                    for dx in 0..footprint.columns {
                        for dy in 0..footprint.rows {
                            cells.push(Cell::new(column + dx, row + dy));
                        }
                    }
                    return Some(cells);
                }
            }
        }

        None
    }

    /// Write `handle` into every given cell
    pub fn occupy(&mut self, cells: &[Cell], handle: StackHandle) {
        for cell in cells {
            if let Some(i) = self.offset(cell.column, cell.row) {
                debug_assert!(self.cells[i].is_none(), "cell {:?} already occupied", cell);
                self.cells[i] = Some(handle);
            }
        }
    }

    /// Clear every cell owned by `handle`, returning how many were freed
    pub fn release(&mut self, handle: StackHandle) -> usize {
        let mut freed = 0;
        for owner in &mut self.cells {
            if *owner == Some(handle) {
                *owner = None;
                freed += 1;
            }
        }
        freed
    }

    /// Empty the whole grid
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }
}

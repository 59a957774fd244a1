//! Uniform spatial grid over the viewport
//!
//! The grid owns its entities in an arena (insertion order) and every cell
//! stores arena indices. An entity is referenced from each cell its
//! footprint overlaps, so a near-neighbour query only has to look at a few
//! cells instead of the whole population.
//!
//! Grids are rebuilt from scratch every tick; there is no removal.

use std::collections::BTreeSet;

use super::bounds::{Bounded, Bounds};
use crate::error::{Result, SimError};

/// Stable index of an element inside one grid epoch
pub type Handle = usize;

/// Bucketed 2-D index over a `width x height` area
#[derive(Debug, Clone)]
pub struct SpatialGrid<T> {
    rows: usize,
    columns: usize,
    cell_width: f32,
    cell_height: f32,
    /// Cell buckets, indexed `[column * rows + row]`
    cells: Vec<Vec<Handle>>,
    /// Master list in insertion order
    items: Vec<T>,
}

impl<T: Bounded> SpatialGrid<T> {
    /// Partition `width x height` into `rows x columns` cells
    ///
    /// Cell width is `width / rows` and cell height is `height / columns`.
    pub fn new(width: f32, height: f32, rows: usize, columns: usize) -> Result<Self> {
        if rows < 1 || columns < 1 {
            return Err(SimError::InvalidGrid { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            cell_width: width / rows as f32,
            cell_height: height / columns as f32,
            cells: vec![Vec::new(); rows * columns],
            items: Vec::new(),
        })
    }

    /// Empty grid with the same shape
    pub fn empty_like(&self) -> Self {
        Self {
            rows: self.rows,
            columns: self.columns,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            cells: vec![Vec::new(); self.rows * self.columns],
            items: Vec::new(),
        }
    }

    /// Empty grid with the same rows and columns over a new area
    pub fn resized(&self, width: f32, height: f32) -> Self {
        Self {
            cell_width: width / self.rows as f32,
            cell_height: height / self.columns as f32,
            ..self.empty_like()
        }
    }

    /// Re-partition over a new area, keeping elements and their handles
    pub fn regrid(&mut self, width: f32, height: f32) {
        let items = std::mem::take(&mut self.items);
        *self = self.resized(width, height);
        for element in items {
            self.insert(element);
        }
    }

    /// Add an element to every cell its footprint overlaps
    pub fn insert(&mut self, element: T) -> Handle {
        let handle = self.items.len();
        let (cols, rows) = self.cell_span(&element.bounds());
        for col in cols.0..=cols.1 {
            for row in rows.0..=rows.1 {
                self.cells[col * self.rows + row].push(handle);
            }
        }
        self.items.push(element);
        handle
    }

    /// Handles of every element sharing a cell with `region`
    ///
    /// Deduplicated, ascending. Elements are candidates only: callers still
    /// run the exact intersection test.
    pub fn query(&self, region: &Bounds) -> Vec<Handle> {
        let (cols, rows) = self.cell_span(region);
        let mut found = BTreeSet::new();
        for col in cols.0..=cols.1 {
            for row in rows.0..=rows.1 {
                found.extend(self.cells[col * self.rows + row].iter().copied());
            }
        }
        found.into_iter().collect()
    }

    /// Inclusive (min, max) column and row ranges covered by `region`
    fn cell_span(&self, region: &Bounds) -> ((usize, usize), (usize, usize)) {
        let max = region.max();
        (
            (self.column_of(region.min.x), self.column_of(max.x)),
            (self.row_of(region.min.y), self.row_of(max.y)),
        )
    }

    /// Column for an x coordinate; negatives land in column 0, overflow in the last
    fn column_of(&self, x: f32) -> usize {
        if x < 0.0 {
            return 0;
        }
        ((x / self.cell_width) as usize).min(self.columns - 1)
    }

    /// Row for a y coordinate; negatives land in row 0, overflow in the last
    fn row_of(&self, y: f32) -> usize {
        if y < 0.0 {
            return 0;
        }
        ((y / self.cell_height) as usize).min(self.rows - 1)
    }
}

impl<T> SpatialGrid<T> {
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.items.get(handle)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.items.get_mut(handle)
    }

    /// Elements in insertion order, each exactly once
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Take the elements out, dropping the buckets (start of a rebuild)
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<'a, T> IntoIterator for &'a SpatialGrid<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

use crate::layout::{AddressRange, MemoryLayout};
use std::cmp;
use std::collections::BTreeSet;

/// Distinct block boundaries of all compared layouts.
///
/// Consecutive boundaries delimit the rows of the shared grid.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BoundarySet {
    offsets: BTreeSet<u64>,
}

impl BoundarySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layouts<'a, I>(layouts: I) -> Self
    where
        I: IntoIterator<Item = &'a MemoryLayout>,
    {
        let mut boundaries = Self::new();
        for layout in layouts {
            boundaries.insert_layout(layout);
        }
        boundaries
    }

    /// Adds the bounds of `layout` and of each of its blocks, clipped to the layout range.
    pub fn insert_layout(&mut self, layout: &MemoryLayout) {
        let begin = layout.begin_address();
        let end = layout.end_address();
        self.offsets.insert(begin);
        self.offsets.insert(end);
        for block in layout.blocks() {
            self.offsets.insert(cmp::max(block.begin(), begin));
            self.offsets.insert(cmp::min(block.end(), end));
        }
    }

    pub fn contains(&self, offset: u64) -> bool {
        self.offsets.contains(&offset)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Returns the boundaries in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.offsets.iter().copied()
    }

    pub fn row_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Returns the grid rows, one per pair of consecutive boundaries.
    pub fn rows(&self) -> Vec<AddressRange> {
        self.offsets
            .iter()
            .zip(self.offsets.iter().skip(1))
            .map(|(&begin, &end)| AddressRange::from_bounds(begin, end))
            .collect()
    }

    /// Begin address of the last grid row.
    pub fn last_row_begin(&self) -> Option<u64> {
        self.offsets.iter().rev().nth(1).copied()
    }
}

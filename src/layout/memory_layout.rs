use crate::error::{ErrorKind, Result};
use crate::layout::{AddressRange, MemoryBlock};
use crate::util::Validate;
use std::fmt;

/// Memory blocks inside an outer address range, sorted by begin address.
///
/// Blocks never overlap each other and never leave the outer range. After
/// `fill_gaps` the blocks partition the outer range exactly.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct MemoryLayout {
    range: AddressRange,
    blocks: Vec<MemoryBlock>,
}

impl MemoryLayout {
    pub fn new(begin_address: u64, size: u64) -> Result<Self> {
        Ok(Self::from_range(AddressRange::with_size(begin_address, size)?))
    }

    pub fn from_range(range: AddressRange) -> Self {
        Self {
            range,
            blocks: Vec::new(),
        }
    }

    /// Creates a layout spanning from the lowest begin to the highest end of
    /// the given blocks and appends all of them.
    pub fn from_mem_blocks(blocks: Vec<MemoryBlock>) -> Result<Self> {
        let begin = blocks.iter().map(MemoryBlock::begin).min();
        let end = blocks.iter().map(MemoryBlock::end).max();
        let (begin, end) = match (begin, end) {
            (Some(begin), Some(end)) => (begin, end),
            _ => return Err(ErrorKind::EmptyLayout.into()),
        };

        let mut layout = Self::from_range(AddressRange::new(begin, end)?);
        for block in blocks {
            layout.append_mem_block(block)?;
        }
        Ok(layout)
    }

    pub fn range(&self) -> AddressRange {
        self.range
    }

    pub fn begin_address(&self) -> u64 {
        self.range.begin()
    }

    /// Exclusive end of the layout.
    pub fn end_address(&self) -> u64 {
        self.range.end()
    }

    pub fn size(&self) -> u64 {
        self.range.size()
    }

    /// Returns the blocks in ascending address order.
    pub fn blocks(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&MemoryBlock> {
        self.blocks.get(index)
    }

    /// Inserts `block` at its sorted position.
    pub fn append_mem_block(&mut self, block: MemoryBlock) -> Result<()> {
        if !self.range.contains_range(&block.range()) {
            return Err(ErrorKind::OutOfRange(block.range(), self.range).into());
        }

        let index = self
            .blocks
            .partition_point(|existing| existing.begin() < block.begin());

        let neighbours = index
            .checked_sub(1)
            .and_then(|prev| self.blocks.get(prev))
            .into_iter()
            .chain(self.blocks.get(index));
        for existing in neighbours {
            if existing.range().overlaps(&block.range()) {
                return Err(ErrorKind::Overlap(block.range(), existing.range()).into());
            }
        }

        self.blocks.insert(index, block);
        Ok(())
    }

    /// Replaces every uncovered sub-range by a gap block.
    ///
    /// Call this after all blocks have been appended.
    pub fn fill_gaps(&mut self) {
        self.blocks = gap_filled(self.range, &self.blocks);
    }

    /// Merges all neighbouring gap blocks into a single one.
    pub fn merge_gaps(&mut self) {
        let mut merged: Vec<MemoryBlock> = Vec::with_capacity(self.blocks.len());
        for block in self.blocks.drain(..) {
            match merged.last_mut() {
                Some(last) if last.is_gap() && block.is_gap() && last.end() == block.begin() => {
                    *last = MemoryBlock::gap(AddressRange::from_bounds(last.begin(), block.end()));
                }
                _ => merged.push(block),
            }
        }
        self.blocks = merged;
    }

    /// Returns the maximal sub-ranges not covered by any block.
    pub fn gaps(&self) -> Vec<AddressRange> {
        let mut gaps = Vec::new();
        let mut cursor = self.range.begin();
        for block in &self.blocks {
            if block.begin() > cursor {
                gaps.push(AddressRange::from_bounds(cursor, block.begin()));
            }
            cursor = block.end();
        }
        if cursor < self.range.end() {
            gaps.push(AddressRange::from_bounds(cursor, self.range.end()));
        }
        gaps
    }

    pub fn is_fully_covered(&self) -> bool {
        self.gaps().is_empty()
    }
}

/// Returns `blocks` with a gap block inserted for every uncovered part of `range`.
///
/// `blocks` must be sorted, non-overlapping and inside `range`.
fn gap_filled(range: AddressRange, blocks: &[MemoryBlock]) -> Vec<MemoryBlock> {
    let mut filled = Vec::with_capacity(blocks.len() * 2 + 1);
    let mut cursor = range.begin();
    for block in blocks {
        if block.begin() > cursor {
            filled.push(MemoryBlock::gap(AddressRange::from_bounds(
                cursor,
                block.begin(),
            )));
        }
        filled.push(block.clone());
        cursor = block.end();
    }
    if cursor < range.end() {
        filled.push(MemoryBlock::gap(AddressRange::from_bounds(
            cursor,
            range.end(),
        )));
    }
    filled
}

impl Validate for MemoryLayout {
    /// Checks that the blocks partition the outer range exactly.
    fn validate(&self) -> Result<()> {
        let mut cursor = self.range.begin();
        for block in &self.blocks {
            if block.begin() < cursor {
                return Err(ErrorKind::InvariantViolation(format!(
                    "block {} overlaps its predecessor in layout {}",
                    block, self.range
                ))
                .into());
            }
            if block.begin() > cursor {
                return Err(ErrorKind::InvariantViolation(format!(
                    "range [0x{:X}-0x{:X}) of layout {} is not covered by any block",
                    cursor,
                    block.begin(),
                    self.range
                ))
                .into());
            }
            cursor = block.end();
        }
        if cursor != self.range.end() {
            return Err(ErrorKind::InvariantViolation(format!(
                "range [0x{:X}-0x{:X}) of layout {} is not covered by any block",
                cursor,
                self.range.end(),
                self.range
            ))
            .into());
        }
        Ok(())
    }
}

impl fmt::Display for MemoryLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "layout {}:", self.range)?;
        for block in &self.blocks {
            writeln!(f, "  {}", block)?;
        }
        Ok(())
    }
}

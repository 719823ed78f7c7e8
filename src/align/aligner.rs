use crate::align::BoundarySet;
use crate::error::{ErrorKind, Result};
use crate::layout::{AddressRange, MemoryLayout};
use crate::printer::LabelFormatter;
use crate::util::Validate;

/// One grid row of one layout.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AlignedCell {
    /// The grid row covered by this cell.
    range: AddressRange,
    /// Display text of the owning block, `None` for gaps.
    label: Option<String>,
    /// Is the owning block a synthesized gap?
    gap: bool,
    /// Index of the owning block in `MemoryLayout::blocks`.
    block: usize,
}

impl AlignedCell {
    pub fn range(&self) -> AddressRange {
        self.range
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_gap(&self) -> bool {
        self.gap
    }

    /// Identity of the owning block; equal indices in one column mean the
    /// rows belong to the very same block.
    pub fn block(&self) -> usize {
        self.block
    }
}

/// Cells of one layout, one per grid row; `None` where the row lies outside the layout.
pub type AlignedColumn = Vec<Option<AlignedCell>>;

/// Splits `layout` along `boundaries`.
///
/// The layout must partition its range (see `MemoryLayout::fill_gaps`) and
/// its bounds must be part of `boundaries`.
pub fn align_layout(
    layout: &MemoryLayout,
    boundaries: &BoundarySet,
    labels: &LabelFormatter,
) -> Result<AlignedColumn> {
    layout.validate()?;

    let blocks = layout.blocks();
    let rows = boundaries.rows();
    let mut column = Vec::with_capacity(rows.len());
    let mut cursor = 0;

    for row in rows {
        if !row.overlaps(&layout.range()) {
            column.push(None);
            continue;
        }
        if !layout.range().contains_range(&row) {
            return Err(ErrorKind::InvariantViolation(format!(
                "grid row {} crosses the bounds of layout {}",
                row,
                layout.range()
            ))
            .into());
        }

        while cursor < blocks.len() && blocks[cursor].end() <= row.begin() {
            cursor += 1;
        }
        let block = match blocks.get(cursor) {
            Some(block) if block.range().contains_range(&row) => block,
            _ => {
                return Err(ErrorKind::InvariantViolation(format!(
                    "grid row {} is not covered by a single block of layout {}",
                    row,
                    layout.range()
                ))
                .into())
            }
        };

        trace!("row {} -> block #{} {}", row, cursor, block);
        column.push(Some(AlignedCell {
            range: row,
            label: labels.label(block),
            gap: block.is_gap(),
            block: cursor,
        }));
    }

    debug!(
        "aligned layout {} onto {} rows ({} occupied)",
        layout.range(),
        column.len(),
        column.iter().filter(|cell| cell.is_some()).count()
    );

    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MemoryBlock;

    fn labels() -> LabelFormatter {
        LabelFormatter::new(true, false, 1)
    }

    fn layout(begin: u64, size: u64, blocks: &[(u64, u64, &str)]) -> MemoryLayout {
        let mut layout = MemoryLayout::new(begin, size).unwrap();
        for &(b, s, name) in blocks {
            layout
                .append_mem_block(MemoryBlock::new(b, s, name).unwrap())
                .unwrap();
        }
        layout.fill_gaps();
        layout
    }

    #[test]
    fn test_align_should_split_blocks_along_foreign_boundaries() {
        // GIVEN
        let a = layout(0x0, 0x10, &[(0x0, 0x10, "WIDE")]);
        let b = layout(0x0, 0x10, &[(0x0, 0x4, "LO"), (0x4, 0xC, "HI")]);
        let boundaries = BoundarySet::from_layouts(vec![&a, &b]);

        // WHEN
        let column_a = align_layout(&a, &boundaries, &labels()).unwrap();
        let column_b = align_layout(&b, &boundaries, &labels()).unwrap();

        // THEN
        assert_eq!(column_a.len(), 2);
        let cells_a: Vec<&AlignedCell> = column_a.iter().map(|c| c.as_ref().unwrap()).collect();
        assert_eq!(cells_a[0].label(), Some("WIDE"));
        assert_eq!(cells_a[1].label(), Some("WIDE"));
        assert_eq!(cells_a[0].block(), cells_a[1].block());
        assert_eq!(cells_a[1].range(), AddressRange::new(0x4, 0x10).unwrap());

        let cells_b: Vec<&AlignedCell> = column_b.iter().map(|c| c.as_ref().unwrap()).collect();
        assert_eq!(cells_b[0].label(), Some("LO"));
        assert_eq!(cells_b[1].label(), Some("HI"));
        assert_ne!(cells_b[0].block(), cells_b[1].block());
    }

    #[test]
    fn test_align_should_leave_rows_outside_layout_empty() {
        // GIVEN
        let a = layout(0x0, 0x10, &[(0x0, 0x10, "LOW")]);
        let b = layout(0x20, 0x10, &[(0x20, 0x10, "HIGH")]);
        let boundaries = BoundarySet::from_layouts(vec![&a, &b]);

        // WHEN
        let column_a = align_layout(&a, &boundaries, &labels()).unwrap();
        let column_b = align_layout(&b, &boundaries, &labels()).unwrap();

        // THEN
        assert_eq!(boundaries.row_count(), 3);
        assert!(column_a[0].is_some());
        assert!(column_a[1].is_none());
        assert!(column_a[2].is_none());
        assert!(column_b[0].is_none());
        assert!(column_b[1].is_none());
        assert_eq!(column_b[2].as_ref().unwrap().label(), Some("HIGH"));
    }

    #[test]
    fn test_align_should_flag_gaps() {
        // GIVEN
        let a = layout(0x0, 0x20, &[(0x0, 0x10, "DR1")]);
        let boundaries = BoundarySet::from_layouts(vec![&a]);

        // WHEN
        let column = align_layout(&a, &boundaries, &labels()).unwrap();

        // THEN
        let gap = column[1].as_ref().unwrap();
        assert!(gap.is_gap());
        assert_eq!(gap.label(), None);
        assert!(!column[0].as_ref().unwrap().is_gap());
    }

    #[test]
    fn test_align_should_distinguish_same_named_blocks() {
        // GIVEN
        let a = layout(0x0, 0x10, &[(0x0, 0x8, "RES"), (0x8, 0x8, "RES")]);
        let boundaries = BoundarySet::from_layouts(vec![&a]);

        // WHEN
        let column = align_layout(&a, &boundaries, &labels()).unwrap();

        // THEN
        let first = column[0].as_ref().unwrap();
        let second = column[1].as_ref().unwrap();
        assert_eq!(first.label(), second.label());
        assert_ne!(first.block(), second.block());
    }

    #[test]
    fn test_align_should_reject_layout_with_holes() {
        // GIVEN
        let mut a = MemoryLayout::new(0x0, 0x20).unwrap();
        a.append_mem_block(MemoryBlock::new(0x0, 0x10, "DR1").unwrap())
            .unwrap();
        let boundaries = BoundarySet::from_layouts(vec![&a]);

        // WHEN
        let result = align_layout(&a, &boundaries, &labels());

        // THEN
        match result {
            Err(e) => match e.kind() {
                ErrorKind::InvariantViolation(_) => {}
                other => panic!("unexpected error {}", other),
            },
            Ok(_) => panic!("layout with holes should not align"),
        }
    }

    #[test]
    fn test_align_should_reject_foreign_boundary_set() {
        // GIVEN
        let a = layout(0x0, 0x20, &[(0x0, 0x10, "DR1")]);
        let mut boundaries = BoundarySet::new();
        boundaries.insert_layout(&layout(0x8, 0x20, &[]));

        // WHEN
        let result = align_layout(&a, &boundaries, &labels());

        // THEN
        assert!(result.is_err());
    }
}

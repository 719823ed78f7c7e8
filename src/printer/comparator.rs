use crate::align::{align_layout, AlignedColumn, BoundarySet};
use crate::config::ComparatorConfig;
use crate::error::{ErrorKind, Result};
use crate::layout::MemoryLayout;
use crate::printer::{LabelFormatter, TableColumn, TablePrinter};

/// Presents memory layouts side by side.
///
/// Add the layouts to compare with `add_layout`, each already gap-filled with
/// `MemoryLayout::fill_gaps`, then call `to_text`. Columns appear in the
/// order the layouts were added.
#[derive(Clone, Debug, Default)]
pub struct LayoutComparator {
    config: ComparatorConfig,
    layouts: Vec<(MemoryLayout, String)>,
}

impl LayoutComparator {
    pub fn new(config: ComparatorConfig) -> Self {
        Self {
            config,
            layouts: Vec::new(),
        }
    }

    pub fn config(&self) -> &ComparatorConfig {
        &self.config
    }

    /// Appends `layout` as the rightmost column.
    pub fn add_layout<S: Into<String>>(&mut self, layout: MemoryLayout, title: S) {
        self.layouts.push((layout, title.into()));
    }

    /// Appends `layout` titled by its begin address and size.
    pub fn add_untitled_layout(&mut self, layout: MemoryLayout) {
        let title = default_title(&layout);
        self.add_layout(layout, title);
    }

    /// Inserts `layout` as column `position`, shifting the following columns right.
    pub fn insert_layout<S: Into<String>>(
        &mut self,
        position: usize,
        layout: MemoryLayout,
        title: S,
    ) -> Result<()> {
        if position > self.layouts.len() {
            return Err(ErrorKind::InvalidPosition(position, self.layouts.len()).into());
        }
        self.layouts.insert(position, (layout, title.into()));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Returns the layouts with their titles in column order.
    pub fn layouts(&self) -> impl Iterator<Item = (&MemoryLayout, &str)> {
        self.layouts
            .iter()
            .map(|(layout, title)| (layout, title.as_str()))
    }

    pub fn boundaries(&self) -> BoundarySet {
        BoundarySet::from_layouts(self.layouts.iter().map(|(layout, _)| layout))
    }

    /// Splits every layout along the shared boundaries, one column per layout.
    pub fn align(&self) -> Result<Vec<AlignedColumn>> {
        let boundaries = self.boundaries();
        let labels = LabelFormatter::from_config(&self.config, &boundaries);
        debug!(
            "aligning {} layouts on {} boundaries",
            self.layouts.len(),
            boundaries.len()
        );
        self.layouts
            .iter()
            .map(|(layout, _)| align_layout(layout, &boundaries, &labels))
            .collect()
    }

    /// Renders the comparison table.
    pub fn to_text(&self) -> Result<String> {
        if self.layouts.is_empty() {
            return Ok(String::new());
        }

        let aligned = self.align()?;
        let columns: Vec<TableColumn> = self
            .layouts
            .iter()
            .zip(aligned.iter())
            .map(|((_, title), cells)| TableColumn {
                title: title.as_str(),
                cells: cells.as_slice(),
            })
            .collect();

        Ok(TablePrinter::new(&self.config).render(&columns))
    }
}

fn default_title(layout: &MemoryLayout) -> String {
    format!(
        "0x{:X}, size = 0x{:X}",
        layout.begin_address(),
        layout.size()
    )
}

use crate::align::AlignedCell;
use crate::config::ComparatorConfig;
use crate::util::RunIterator;
use std::cmp;

/// A titled column of aligned cells.
#[derive(Clone, Copy, Debug)]
pub struct TableColumn<'a> {
    pub title: &'a str,
    pub cells: &'a [Option<AlignedCell>],
}

/// Placement of one cell inside the merged region of its block.
#[derive(Clone, Copy, Debug)]
struct Slot<'a> {
    cell: &'a AlignedCell,
    /// First row of the block in this column, a border is drawn above it.
    starts_block: bool,
    /// The label is written on the content line of this row.
    carries_label: bool,
}

/// Draws aligned columns as a bordered ASCII grid.
///
/// Every grid row takes two lines: a separator line and a content line.
/// Rows of the same block are merged by drawing their separator lines as
/// content.
pub struct TablePrinter<'a> {
    config: &'a ComparatorConfig,
}

impl<'a> TablePrinter<'a> {
    pub fn new(config: &'a ComparatorConfig) -> Self {
        Self { config }
    }

    /// Inner width of each column, wide enough for every label and title.
    pub fn column_width(&self, columns: &[TableColumn]) -> usize {
        let titles = columns
            .iter()
            .filter(|_| self.config.show_headers)
            .map(|column| column.title.chars().count());
        let labels = columns
            .iter()
            .flat_map(|column| column.cells.iter())
            .filter_map(|cell| cell.as_ref().and_then(AlignedCell::label))
            .map(|label| label.chars().count());
        let longest = titles.chain(labels).max().unwrap_or(0);
        cmp::max(
            self.config.column_width,
            longest + 2 * self.config.text_offset,
        )
    }

    pub fn render(&self, columns: &[TableColumn]) -> String {
        if columns.is_empty() {
            return String::new();
        }

        let width = self.column_width(columns);
        let slots: Vec<Vec<Option<Slot>>> = columns.iter().map(|c| merged_slots(c.cells)).collect();
        let rows = slots.iter().map(Vec::len).max().unwrap_or(0);

        let mut text = String::new();

        if self.config.show_headers {
            text.push_str(&self.join(columns.iter().map(|_| self.border(width))));
            text.push_str(&self.join(
                columns.iter().map(|column| self.framed(column.title, width)),
            ));
        }

        for row in 0..rows {
            let separator = slots.iter().map(|column| {
                let previous = row.checked_sub(1).and_then(|r| slot_at(column, r));
                match slot_at(column, row) {
                    Some(slot) if slot.starts_block => self.border(width),
                    Some(slot) => self.framed(&self.continuation(slot, width), width),
                    None if previous.is_some() => self.border(width),
                    None if row == 0 && self.config.show_headers => self.border(width),
                    None => self.blank(width),
                }
            });
            text.push_str(&self.join(separator));

            let content = slots.iter().map(|column| match slot_at(column, row) {
                Some(slot) if slot.carries_label && !slot.cell.is_gap() => {
                    self.framed(slot.cell.label().unwrap_or(""), width)
                }
                Some(slot) => self.framed(&self.continuation(slot, width), width),
                None => self.blank(width),
            });
            text.push_str(&self.join(content));
        }

        let closing = slots.iter().map(|column| {
            match rows.checked_sub(1).and_then(|r| slot_at(column, r)) {
                Some(_) => self.border(width),
                None => self.blank(width),
            }
        });
        text.push_str(&self.join(closing));

        text
    }

    /// Text of the lines of a merged cell that carry no label.
    fn continuation(&self, slot: Slot, width: usize) -> String {
        if slot.cell.is_gap() {
            let fill = width.saturating_sub(2 * self.config.text_offset);
            std::iter::repeat(self.config.gap_fill).take(fill).collect()
        } else {
            String::new()
        }
    }

    fn border(&self, width: usize) -> String {
        let borders = &self.config.borders;
        let mut segment = String::with_capacity(width + 2);
        segment.push(borders.cross);
        segment.extend(std::iter::repeat(borders.horizontal).take(width));
        segment.push(borders.cross);
        segment
    }

    fn framed(&self, text: &str, width: usize) -> String {
        let vertical = self.config.borders.vertical;
        let text: String = text.chars().take(width).collect();
        format!("{}{:^width$}{}", vertical, text, vertical, width = width)
    }

    fn blank(&self, width: usize) -> String {
        " ".repeat(width + 2)
    }

    /// Neighbouring segments share their edge character; a cross beats a
    /// vertical stroke, which beats a space.
    fn join<I: IntoIterator<Item = String>>(&self, segments: I) -> String {
        let mut line = String::new();
        for segment in segments {
            let mut chars = segment.chars();
            match (line.pop(), chars.next()) {
                (Some(last), Some(first)) => {
                    if self.junction_rank(first) > self.junction_rank(last) {
                        line.push(first);
                    } else {
                        line.push(last);
                    }
                }
                (Some(c), None) | (None, Some(c)) => line.push(c),
                (None, None) => {}
            }
            line.extend(chars);
        }
        line.push('\n');
        line
    }

    fn junction_rank(&self, c: char) -> u8 {
        if c == self.config.borders.cross {
            2
        } else if c == self.config.borders.vertical {
            1
        } else {
            0
        }
    }
}

fn slot_at<'s, 'a>(column: &'s [Option<Slot<'a>>], row: usize) -> Option<Slot<'a>> {
    column.get(row).copied().flatten()
}

/// Finds the merged regions of a column, one per run of rows owned by the same block.
fn merged_slots(cells: &[Option<AlignedCell>]) -> Vec<Option<Slot>> {
    let mut slots = vec![None; cells.len()];
    let runs = cells.iter().enumerate().runs(|(_, last), (_, next)| {
        match (last, next) {
            (Some(last), Some(next)) => last.block() == next.block(),
            _ => false,
        }
    });
    for run in runs {
        let (first, last) = (run.first.0, run.last.0);
        let label_row = (first + last) / 2;
        for row in first..=last {
            if let Some(cell) = &cells[row] {
                slots[row] = Some(Slot {
                    cell,
                    starts_block: row == first,
                    carries_label: row == label_row,
                });
            }
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{align_layout, BoundarySet};
    use crate::config::BorderChars;
    use crate::layout::{MemoryBlock, MemoryLayout};
    use crate::printer::LabelFormatter;

    fn column(layout: &MemoryLayout) -> Vec<Option<AlignedCell>> {
        let boundaries = BoundarySet::from_layouts(vec![layout]);
        align_layout(layout, &boundaries, &LabelFormatter::new(true, false, 1)).unwrap()
    }

    #[test]
    fn test_join_should_prefer_cross_over_vertical_over_space() {
        // GIVEN
        let config = ComparatorConfig::default();
        let printer = TablePrinter::new(&config);

        // WHEN
        let line = printer.join(vec![
            "+--+".to_string(),
            "|ab|".to_string(),
            "    ".to_string(),
            "|cd|".to_string(),
        ]);

        // THEN
        assert_eq!(line, "+--+ab|   |cd|\n");
    }

    #[test]
    fn test_label_is_centered_in_merged_cell() {
        // GIVEN
        let mut layout = MemoryLayout::new(0x0, 0x30).unwrap();
        layout
            .append_mem_block(MemoryBlock::new(0x0, 0x30, "BIG").unwrap())
            .unwrap();
        let mut cells = column(&layout);
        // split the block into three rows of the same block
        let row = cells[0].clone().unwrap();
        cells = vec![Some(row.clone()), Some(row.clone()), Some(row)];

        let config = ComparatorConfig {
            column_width: 6,
            show_headers: false,
            ..ComparatorConfig::default()
        };

        // WHEN
        let text = TablePrinter::new(&config).render(&[TableColumn {
            title: "",
            cells: &cells,
        }]);

        // THEN
        assert_eq!(
            text,
            concat!(
                "+------+\n",
                "|      |\n",
                "|      |\n",
                "| BIG  |\n",
                "|      |\n",
                "|      |\n",
                "+------+\n",
            )
        );
    }

    #[test]
    fn test_custom_border_and_fill_characters() {
        // GIVEN
        let mut layout = MemoryLayout::new(0x0, 0x10).unwrap();
        layout.fill_gaps();
        let cells = column(&layout);
        let config = ComparatorConfig {
            column_width: 4,
            text_offset: 0,
            gap_fill: '#',
            borders: BorderChars {
                cross: '*',
                horizontal: '=',
                vertical: '!',
            },
            ..ComparatorConfig::default()
        };

        // WHEN
        let text = TablePrinter::new(&config).render(&[TableColumn {
            title: "gap",
            cells: &cells,
        }]);

        // THEN
        assert_eq!(
            text,
            concat!(
                "*====*\n",
                "!gap !\n",
                "*====*\n",
                "!####!\n",
                "*====*\n",
            )
        );
    }

    #[test]
    fn test_column_width_grows_with_titles() {
        // GIVEN
        let config = ComparatorConfig::default();
        let printer = TablePrinter::new(&config);
        let title = "a title that is definitely longer than thirty characters";

        // THEN
        assert_eq!(
            printer.column_width(&[TableColumn { title, cells: &[] }]),
            title.len() + 2
        );
        assert_eq!(
            printer.column_width(&[TableColumn {
                title: "short",
                cells: &[]
            }]),
            30
        );
    }
}

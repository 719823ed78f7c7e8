//! Text rendering of aligned layouts.

mod comparator;
mod label;
mod table;

pub use self::comparator::LayoutComparator;
pub use self::label::LabelFormatter;
pub use self::table::{TableColumn, TablePrinter};

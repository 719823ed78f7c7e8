//! Alignment of several layouts onto one shared grid of rows.

mod aligner;
mod boundary;

pub use self::aligner::{align_layout, AlignedCell, AlignedColumn};
pub use self::boundary::BoundarySet;

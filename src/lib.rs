//! Renders memory layouts (address ranges split into named blocks, e.g.
//! register maps) as aligned ASCII tables placed side by side.
//!
//! ```text
//! MemoryLayout(s) -> BoundarySet -> aligned columns -> TablePrinter -> text
//! ```
//!
//! ```
//! use memlayout_diff::{LayoutComparator, MemoryBlock, MemoryLayout};
//!
//! let mut reference = MemoryLayout::new(0x00, 0x20).unwrap();
//! reference
//!     .append_mem_block(MemoryBlock::new(0x00, 0x10, "DR1").unwrap())
//!     .unwrap();
//! reference.fill_gaps();
//!
//! let mut comp = MemoryLayout::new(0x00, 0x10).unwrap();
//! comp.append_mem_block(MemoryBlock::new(0x00, 0x10, "DR1").unwrap())
//!     .unwrap();
//! comp.fill_gaps();
//!
//! let mut comparator = LayoutComparator::default();
//! comparator.add_layout(reference, "Reference layout (0x0-0x1F)");
//! comparator.add_layout(comp, "Comp layout (0x0-0xF)");
//!
//! let text = comparator.to_text().unwrap();
//! assert!(text.contains("|        DR1(0x00-0x0F)        |        DR1(0x00-0x0F)        |"));
//! ```
#[macro_use]
extern crate derivative;
#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate nom;
extern crate serde;
extern crate serde_yaml;

pub mod align;
pub mod config;
pub mod layout;
pub mod printer;
pub mod util;

pub use align::{AlignedCell, AlignedColumn, BoundarySet};
pub use config::{BorderChars, ComparatorConfig, ComparatorConfigBuilder};
pub use layout::{AddressRange, BitRange, MemoryBlock, MemoryLayout};
pub use printer::LayoutComparator;

pub mod error {
    use crate::layout::AddressRange;

    error_chain! {
        types {
            Error, ErrorKind, ResultExt, Result;
        }

        errors {
            InvalidRange(begin: u64, end: u64) {
                description("Invalid address range")
                display("Invalid address range [0x{:X}-0x{:X}), end must be greater than begin", begin, end)
            }
            InvalidBitRange(high: u32, low: u32) {
                description("Invalid bit range")
                display("Invalid bit range [{}:{}], high bit must not be below low bit", high, low)
            }
            BitRangeSyntax(text: String) {
                description("Malformed bit range")
                display("Malformed bit range '{}'", text)
            }
            Overlap(block: AddressRange, existing: AddressRange) {
                description("Memory block overlaps another block")
                display("Block {} overlaps already appended block {}", block, existing)
            }
            OutOfRange(block: AddressRange, layout: AddressRange) {
                description("Memory block is out of layout range")
                display("Block {} is out of layout range {}", block, layout)
            }
            InvariantViolation(m: String) {
                description("Layout invariant violated")
                display("Layout invariant violated: {}", m)
            }
            InvalidPosition(position: usize, count: usize) {
                description("Invalid layout position")
                display("Cannot insert layout at position {}, only {} layouts present", position, count)
            }
            EmptyLayout {
                description("Empty layout")
                display("Cannot build a layout without memory blocks")
            }
        }
    }
}

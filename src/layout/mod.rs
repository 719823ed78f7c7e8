//! Address ranges, memory blocks and the layouts composed of them.

mod block;
mod memory_layout;
mod range;

pub use self::block::{BitRange, MemoryBlock};
pub use self::memory_layout::MemoryLayout;
pub use self::range::AddressRange;

use crate::error::Result;

mod runs;

pub use self::runs::{Run, RunIterator, Runs};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Returns the minimal number of hex digits needed to print `value`.
pub fn hex_digits(value: u64) -> usize {
    let mut digits = 1;
    let mut rest = value >> 4;
    while rest > 0 {
        digits += 1;
        rest >>= 4;
    }
    digits
}

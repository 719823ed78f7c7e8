use crate::error::{ErrorKind, Result};
use crate::layout::AddressRange;
use nom::{
    branch::alt,
    character::complete::{char, digit1, space0},
    combinator::{all_consuming, map_res, opt},
    sequence::{delimited, preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bit-field metadata of a block, bounded inclusively on both sides (high..=low).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct BitRange {
    high: u32,
    low: u32,
}

impl BitRange {
    pub fn new(high: u32, low: u32) -> Result<Self> {
        if high < low {
            return Err(ErrorKind::InvalidBitRange(high, low).into());
        }
        Ok(Self { high, low })
    }

    /// A single bit.
    pub fn bit(bit: u32) -> Self {
        Self {
            high: bit,
            low: bit,
        }
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    /// Number of bits covered.
    pub fn width(&self) -> u32 {
        self.high - self.low + 1
    }

    pub fn is_single_bit(&self) -> bool {
        self.high == self.low
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_bit() {
            write!(f, "[{}]", self.high)
        } else {
            write!(f, "[{}:{}]", self.high, self.low)
        }
    }
}

fn bit_number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>())(input)
}

fn bit_span(input: &str) -> IResult<&str, (u32, Option<u32>)> {
    tuple((bit_number, opt(preceded(char(':'), bit_number))))(input)
}

fn bit_range(input: &str) -> IResult<&str, (u32, Option<u32>)> {
    delimited(
        space0,
        alt((delimited(char('['), bit_span, char(']')), bit_span)),
        space0,
    )(input)
}

impl FromStr for BitRange {
    type Err = crate::error::Error;

    /// Parses `7:0`, `[7:0]`, `3` or `[3]`.
    fn from_str(text: &str) -> Result<Self> {
        let (_, (high, low)) = all_consuming(bit_range)(text)
            .map_err(|_| ErrorKind::BitRangeSyntax(text.to_string()))?;
        match low {
            Some(low) => BitRange::new(high, low),
            None => Ok(BitRange::bit(high)),
        }
    }
}

/// A named address range of a `MemoryLayout`.
///
/// Gap blocks are placeholders synthesized by `MemoryLayout::fill_gaps` for
/// address space nobody declared. Blocks compare by placement, the name is
/// not part of the equality.
#[derive(Clone, Debug, Derivative)]
#[derivative(Hash, Eq, PartialEq)]
pub struct MemoryBlock {
    range: AddressRange,
    #[derivative(Hash = "ignore")]
    #[derivative(PartialEq = "ignore")]
    name: String,
    bit_range: Option<BitRange>,
    gap: bool,
}

impl MemoryBlock {
    /// Creates the block `[begin, begin + size)`.
    pub fn new<S: Into<String>>(begin: u64, size: u64, name: S) -> Result<Self> {
        Ok(Self::from_range(AddressRange::with_size(begin, size)?, name))
    }

    pub fn from_range<S: Into<String>>(range: AddressRange, name: S) -> Self {
        Self {
            range,
            name: name.into(),
            bit_range: None,
            gap: false,
        }
    }

    /// Creates an unnamed placeholder for undeclared address space.
    pub fn gap(range: AddressRange) -> Self {
        Self {
            range,
            name: String::new(),
            bit_range: None,
            gap: true,
        }
    }

    /// Attaches bit-field metadata, rendered as `Name[high:low]`.
    pub fn with_bit_range(mut self, bit_range: BitRange) -> Self {
        self.bit_range = Some(bit_range);
        self
    }

    pub fn range(&self) -> AddressRange {
        self.range
    }

    pub fn begin(&self) -> u64 {
        self.range.begin()
    }

    pub fn end(&self) -> u64 {
        self.range.end()
    }

    pub fn size(&self) -> u64 {
        self.range.size()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bit_range(&self) -> Option<BitRange> {
        self.bit_range
    }

    pub fn is_gap(&self) -> bool {
        self.gap
    }

    pub fn contains(&self, address: u64) -> bool {
        self.range.contains(address)
    }

    pub fn contains_block(&self, other: &MemoryBlock) -> bool {
        self.range.contains_range(&other.range)
    }
}

impl fmt::Display for MemoryBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.gap {
            write!(f, "<gap>{}", self.range)
        } else {
            write!(f, "{}{}", self.name, self.range)?;
            if let Some(bit_range) = self.bit_range {
                write!(f, "{}", bit_range)?;
            }
            Ok(())
        }
    }
}

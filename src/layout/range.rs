use crate::error::{ErrorKind, Result};
use std::cmp;
use std::fmt;

/// A (half-open) range bounded inclusively below and exclusively above (begin..end).
///
/// A range is never empty: `end > begin` holds for every constructed value.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct AddressRange {
    begin: u64,
    end: u64,
}

impl AddressRange {
    pub fn new(begin: u64, end: u64) -> Result<Self> {
        if end <= begin {
            return Err(ErrorKind::InvalidRange(begin, end).into());
        }
        Ok(Self { begin, end })
    }

    /// Creates the range `[begin, begin + size)`.
    pub fn with_size(begin: u64, size: u64) -> Result<Self> {
        match begin.checked_add(size) {
            Some(end) => Self::new(begin, end),
            None => Err(ErrorKind::InvalidRange(begin, u64::max_value()).into()),
        }
    }

    /// Bounds already known to satisfy `end > begin`.
    pub(crate) fn from_bounds(begin: u64, end: u64) -> Self {
        debug_assert!(end > begin, "empty range [{:#x}, {:#x})", begin, end);
        Self { begin, end }
    }

    pub fn begin(&self) -> u64 {
        self.begin
    }

    /// Exclusive end of the range.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Last address inside the range.
    pub fn last(&self) -> u64 {
        self.end - 1
    }

    pub fn size(&self) -> u64 {
        self.end - self.begin
    }

    pub fn contains(&self, address: u64) -> bool {
        self.begin <= address && address < self.end
    }

    pub fn contains_range(&self, other: &AddressRange) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    pub fn overlaps(&self, other: &AddressRange) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    /// Returns the overlapping part of both ranges, or `None` if they are disjoint.
    pub fn intersection(&self, other: &AddressRange) -> Option<AddressRange> {
        if self.overlaps(other) {
            Some(Self::from_bounds(
                cmp::max(self.begin, other.begin),
                cmp::min(self.end, other.end),
            ))
        } else {
            None
        }
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[0x{:X}-0x{:X})", self.begin, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_should_reject_empty_and_inverted_ranges() {
        assert!(AddressRange::new(0x10, 0x10).is_err());
        assert!(AddressRange::new(0x10, 0x0F).is_err());
        assert!(AddressRange::with_size(u64::max_value(), 1).is_err());
    }

    #[test]
    fn test_size_and_last_address() {
        // GIVEN
        let range = AddressRange::with_size(0x20, 0x10).unwrap();

        // THEN
        assert_eq!(range.begin(), 0x20);
        assert_eq!(range.end(), 0x30);
        assert_eq!(range.last(), 0x2F);
        assert_eq!(range.size(), 0x10);
    }

    #[test]
    fn test_containment_is_half_open() {
        // GIVEN
        let range = AddressRange::new(0x0, 0x10).unwrap();

        // THEN
        assert!(range.contains(0x0));
        assert!(range.contains(0xF));
        assert!(!range.contains(0x10));
        assert!(range.contains_range(&AddressRange::new(0x4, 0x10).unwrap()));
        assert!(!range.contains_range(&AddressRange::new(0x4, 0x11).unwrap()));
    }

    #[test]
    fn test_adjacent_ranges_do_not_overlap() {
        // GIVEN
        let low = AddressRange::new(0x0, 0x10).unwrap();
        let high = AddressRange::new(0x10, 0x20).unwrap();
        let middle = AddressRange::new(0x8, 0x18).unwrap();

        // THEN
        assert!(!low.overlaps(&high));
        assert!(low.overlaps(&middle));
        assert!(high.overlaps(&middle));
        assert_eq!(low.intersection(&high), None);
        assert_eq!(
            low.intersection(&middle),
            Some(AddressRange::new(0x8, 0x10).unwrap())
        );
    }

    #[test]
    fn test_display() {
        let range = AddressRange::new(0x0, 0x1F).unwrap();
        assert_eq!(format!("{}", range), "[0x0-0x1F)");
    }
}

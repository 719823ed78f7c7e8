use crate::align::BoundarySet;
use crate::config::ComparatorConfig;
use crate::layout::MemoryBlock;
use crate::util::hex_digits;

/// Produces the text shown inside a block's cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LabelFormatter {
    show_identifier: bool,
    show_address_range: bool,
    digits: usize,
}

impl LabelFormatter {
    pub fn new(show_identifier: bool, show_address_range: bool, digits: usize) -> Self {
        Self {
            show_identifier,
            show_address_range,
            digits,
        }
    }

    /// Addresses are padded to the configured digit count, or to the digits of
    /// the highest row begin address if none is configured.
    pub fn from_config(config: &ComparatorConfig, boundaries: &BoundarySet) -> Self {
        let digits = if config.address_digits > 0 {
            config.address_digits
        } else {
            hex_digits(boundaries.last_row_begin().unwrap_or(0))
        };
        Self::new(config.show_identifier, config.show_address_range, digits)
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Returns `None` for gap blocks, they are drawn with the fill pattern.
    pub fn label(&self, block: &MemoryBlock) -> Option<String> {
        if block.is_gap() {
            return None;
        }

        let (range, open, close) = match block.bit_range() {
            Some(bits) if bits.is_single_bit() => (format!("{}", bits.low()), '[', ']'),
            Some(bits) => (format!("{}:{}", bits.high(), bits.low()), '[', ']'),
            None if block.size() == 1 => (self.address(block.begin()), '(', ')'),
            None => (
                format!(
                    "{}-{}",
                    self.address(block.begin()),
                    self.address(block.range().last())
                ),
                '(',
                ')',
            ),
        };

        let mut label = String::new();
        if self.show_identifier {
            label.push_str(block.name());
            if self.show_address_range {
                label.push(open);
                label.push_str(&range);
                label.push(close);
            }
        } else if self.show_address_range {
            label.push_str(&range);
        }
        Some(label)
    }

    fn address(&self, address: u64) -> String {
        format!("0x{:0width$X}", address, width = self.digits)
    }
}

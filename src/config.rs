use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_COLUMN_WIDTH: usize = 30;
pub const DEFAULT_TEXT_OFFSET: usize = 1;

/// Characters used to draw cell borders.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BorderChars {
    #[serde(default = "default_cross")]
    pub cross: char,
    #[serde(default = "default_horizontal")]
    pub horizontal: char,
    #[serde(default = "default_vertical")]
    pub vertical: char,
}

impl Default for BorderChars {
    fn default() -> Self {
        Self {
            cross: default_cross(),
            horizontal: default_horizontal(),
            vertical: default_vertical(),
        }
    }
}

/// Rendering options of a `LayoutComparator`.
#[derive(Builder, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[builder(default)]
pub struct ComparatorConfig {
    /// Minimal number of characters between the two border strokes of a column.
    #[serde(default = "default_column_width")]
    pub column_width: usize,
    /// Spaces kept between a label and the border strokes.
    #[serde(default = "default_text_offset")]
    pub text_offset: usize,
    #[serde(default)]
    pub borders: BorderChars,
    /// Hatch pattern character of gap cells.
    #[serde(default = "default_gap_fill")]
    pub gap_fill: char,
    #[serde(default = "enabled")]
    pub show_headers: bool,
    #[serde(default = "enabled")]
    pub show_identifier: bool,
    #[serde(default = "enabled")]
    pub show_address_range: bool,
    /// Hex digits of printed addresses, 0 selects the digits of the highest address.
    #[serde(default)]
    pub address_digits: usize,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            column_width: default_column_width(),
            text_offset: default_text_offset(),
            borders: BorderChars::default(),
            gap_fill: default_gap_fill(),
            show_headers: true,
            show_identifier: true,
            show_address_range: true,
            address_digits: 0,
        }
    }
}

impl fmt::Display for ComparatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yaml = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", yaml)
    }
}

fn enabled() -> bool {
    true
}

fn default_column_width() -> usize {
    DEFAULT_COLUMN_WIDTH
}

fn default_text_offset() -> usize {
    DEFAULT_TEXT_OFFSET
}

fn default_gap_fill() -> char {
    'X'
}

fn default_cross() -> char {
    '+'
}

fn default_horizontal() -> char {
    '-'
}

fn default_vertical() -> char {
    '|'
}

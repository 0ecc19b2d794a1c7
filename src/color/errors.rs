// table-heatmap/src/color/errors.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorParseError {
    #[error("Empty color string")]
    EmptyInput,
    #[error("Invalid hex color length: {0} (expected 3, 4, 6 or 8 digits)")]
    InvalidLength(usize),
    #[error("Invalid hex digit in color")]
    InvalidHexChar,
    #[error("Invalid color function: {0}")]
    InvalidFunction(String),
    #[error("Unknown color name: {0}")]
    UnknownName(String),
}

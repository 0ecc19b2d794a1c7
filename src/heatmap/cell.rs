//! Heat map cells and the styling seam they expose

use super::column::ColumnId;
use crate::color::Color;

/// Numeric value of a displayed cell.
///
/// Whitespace is trimmed and an empty cell counts as `0`. Anything that is
/// not a number becomes `NaN`, which (like `0`) carries no heat.
pub fn coerce_value(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

/// Whether a value should be heat-colored at all.
pub fn has_heat(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// Something whose colors can be set.
pub trait StyleTarget {
    fn set_background(&mut self, color: Color);
    fn set_text_color(&mut self, color: Color);
}

/// A table cell that takes part in the heat map.
pub trait HeatCell: StyleTarget {
    fn column(&self) -> &ColumnId;
    fn value(&self) -> f64;
}

/// In-memory cell holding its display text and the styles applied to it.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledCell {
    pub column: ColumnId,
    /// Row position in the host table
    pub row: usize,
    pub text: String,
    pub value: f64,
    pub background: Option<Color>,
    pub text_color: Option<Color>,
}

impl StyledCell {
    pub fn new(column: impl Into<ColumnId>, row: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            column: column.into(),
            row,
            value: coerce_value(&text),
            text,
            background: None,
            text_color: None,
        }
    }

    /// Drop any styles from a previous pass.
    pub fn clear_style(&mut self) {
        self.background = None;
        self.text_color = None;
    }
}

impl StyleTarget for StyledCell {
    fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = Some(color);
    }
}

impl HeatCell for StyledCell {
    fn column(&self) -> &ColumnId {
        &self.column
    }

    fn value(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_value() {
        assert_eq!(coerce_value("42"), 42.0);
        assert_eq!(coerce_value("  3.5 "), 3.5);
        assert_eq!(coerce_value(""), 0.0);
        assert_eq!(coerce_value("-7"), -7.0);
        assert!(coerce_value("n/a").is_nan());
    }

    #[test]
    fn test_has_heat() {
        assert!(has_heat(1.0));
        assert!(has_heat(-1.0));
        assert!(!has_heat(0.0));
        assert!(!has_heat(f64::NAN));
    }
}

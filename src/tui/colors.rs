//! Terminal colors for heat-mapped cells

use ratatui::style::Color as TermColor;

use crate::color::Color;
use crate::heatmap::StyledCell;

/// Nearest terminal color for a computed heat map color
pub fn to_term_color(color: &Color) -> TermColor {
    let rgba = color.to_rgba();
    TermColor::Rgb(rgba.r, rgba.g, rgba.b)
}

/// Returns (foreground, background) colors for a cell
pub fn get_cell_colors(cell: &StyledCell, is_cursor: bool) -> (TermColor, TermColor) {
    if is_cursor {
        return (TermColor::Black, TermColor::Yellow);
    }

    let fg = cell
        .text_color
        .as_ref()
        .map(to_term_color)
        .unwrap_or(TermColor::Reset);
    let bg = cell
        .background
        .as_ref()
        .map(to_term_color)
        .unwrap_or(TermColor::Reset);

    (fg, bg)
}

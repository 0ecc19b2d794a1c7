// table-heatmap/src/color/mod.rs

mod contrast;
mod errors;
mod hsla;
mod named;
mod parse;
mod rgba;

use std::fmt;

pub use contrast::{readable_color, relative_luminance, DEFAULT_LUMINANCE_THRESHOLD};
pub use errors::ColorParseError;
pub use hsla::Hsla;
pub use named::named_color;
pub use parse::parse_color;
pub use rgba::Rgba;

/// A computed style color, kept in the notation it was produced in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Rgba(Rgba),
    Hsla(Hsla),
}

impl Color {
    pub fn to_rgba(&self) -> Rgba {
        match self {
            Color::Rgba(rgba) => *rgba,
            Color::Hsla(hsla) => hsla.to_rgba(),
        }
    }

    pub fn to_hsla(&self) -> Hsla {
        match self {
            Color::Rgba(rgba) => Hsla::from(*rgba),
            Color::Hsla(hsla) => *hsla,
        }
    }

    pub fn to_hex(&self) -> String {
        self.to_rgba().to_hex()
    }

    /// The value a stylesheet would receive: hex for RGB colors,
    /// `hsla()` for HSL colors.
    pub fn to_css(&self) -> String {
        match self {
            Color::Rgba(rgba) => rgba.to_hex(),
            Color::Hsla(hsla) => hsla.to_css(),
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::Rgba(color)
    }
}

impl From<Hsla> for Color {
    fn from(color: Hsla) -> Self {
        Color::Hsla(color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css())
    }
}

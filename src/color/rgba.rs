//! 8-bit RGB color with a floating point alpha channel

use std::fmt;
use std::str::FromStr;

use super::errors::ColorParseError;
use super::parse::parse_color;

/// An sRGB color. Alpha is in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_u32(value: u32) -> Self {
        Self::rgb(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        )
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.is_empty() {
            return Err(ColorParseError::EmptyInput);
        }
        if !hex.is_ascii() {
            return Err(ColorParseError::InvalidHexChar);
        }

        let expanded: String = match hex.len() {
            3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => hex.to_string(),
            len => return Err(ColorParseError::InvalidLength(len)),
        };

        let component = |s: &str| -> Result<u8, ColorParseError> {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::InvalidHexChar)
        };

        let r = component(&expanded[0..2])?;
        let g = component(&expanded[2..4])?;
        let b = component(&expanded[4..6])?;
        let a = if expanded.len() == 8 {
            component(&expanded[6..8])? as f64 / 255.0
        } else {
            1.0
        };

        Ok(Self::new(r, g, b, a))
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` when the color is translucent.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, a)
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_long_and_short() {
        assert_eq!(Rgba::from_hex("#3366CC").unwrap(), Rgba::rgb(0x33, 0x66, 0xcc));
        assert_eq!(Rgba::from_hex("36c").unwrap(), Rgba::rgb(0x33, 0x66, 0xcc));
        assert_eq!(Rgba::from_hex("#fff").unwrap(), Rgba::WHITE);

        let translucent = Rgba::from_hex("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_hex_errors() {
        assert_eq!(Rgba::from_hex("#"), Err(ColorParseError::EmptyInput));
        assert_eq!(Rgba::from_hex("#12345"), Err(ColorParseError::InvalidLength(5)));
        assert_eq!(Rgba::from_hex("#zzzzzz"), Err(ColorParseError::InvalidHexChar));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Rgba::WHITE.to_hex(), "#ffffff");
        assert_eq!(Rgba::BLACK.to_hex(), "#000000");
        assert_eq!(Rgba::new(255, 0, 0, 0.5).to_hex(), "#ff000080");
    }
}

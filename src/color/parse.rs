//! CSS color string parsing
//!
//! Accepts hex notation, `rgb()`/`rgba()`, `hsl()`/`hsla()` (comma or
//! space separated, with an optional `/ alpha`), `transparent` and the CSS
//! named colors.

use super::errors::ColorParseError;
use super::hsla::Hsla;
use super::named::named_color;
use super::rgba::Rgba;

pub fn parse_color(input: &str) -> Result<Rgba, ColorParseError> {
    let normalized = input.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(ColorParseError::EmptyInput);
    }

    if normalized == "transparent" {
        return Ok(Rgba::TRANSPARENT);
    }

    if normalized.starts_with('#') {
        return Rgba::from_hex(&normalized);
    }

    if let Some((name, args)) = split_function(&normalized) {
        return match name {
            "rgb" | "rgba" => parse_rgb_args(args, input),
            "hsl" | "hsla" => parse_hsl_args(args, input),
            _ => Err(ColorParseError::InvalidFunction(input.trim().to_string())),
        };
    }

    named_color(&normalized).ok_or_else(|| ColorParseError::UnknownName(input.trim().to_string()))
}

/// `name(args)` -> (`name`, `args`)
fn split_function(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    let args = s[open + 1..].strip_suffix(')')?;
    Some((s[..open].trim(), args))
}

/// Splits `a, b, c, d`, `a b c` and `a b c / d` into components.
fn split_args(args: &str) -> Vec<&str> {
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect()
}

fn parse_number(part: &str, original: &str) -> Result<f64, ColorParseError> {
    part.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ColorParseError::InvalidFunction(original.trim().to_string()))
}

/// A channel given either as 0-255 or as a percentage.
fn parse_channel(part: &str, original: &str) -> Result<u8, ColorParseError> {
    let value = match part.strip_suffix('%') {
        Some(pct) => parse_number(pct, original)? / 100.0 * 255.0,
        None => parse_number(part, original)?,
    };
    Ok(value.round().clamp(0.0, 255.0) as u8)
}

/// A fraction given either as 0-1 or as a percentage.
fn parse_alpha(part: Option<&&str>, original: &str) -> Result<f64, ColorParseError> {
    let Some(part) = part else {
        return Ok(1.0);
    };
    let value = match part.strip_suffix('%') {
        Some(pct) => parse_number(pct, original)? / 100.0,
        None => parse_number(part, original)?,
    };
    Ok(value.clamp(0.0, 1.0))
}

fn parse_percentage(part: &str, original: &str) -> Result<f64, ColorParseError> {
    let pct = part.strip_suffix('%').unwrap_or(part);
    Ok((parse_number(pct, original)? / 100.0).clamp(0.0, 1.0))
}

fn parse_hue(part: &str, original: &str) -> Result<f64, ColorParseError> {
    if let Some(turns) = part.strip_suffix("turn") {
        return Ok(parse_number(turns, original)? * 360.0);
    }
    if let Some(rad) = part.strip_suffix("rad") {
        return Ok(parse_number(rad, original)?.to_degrees());
    }
    let degrees = part.strip_suffix("deg").unwrap_or(part);
    parse_number(degrees, original)
}

fn parse_rgb_args(args: &str, original: &str) -> Result<Rgba, ColorParseError> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ColorParseError::InvalidFunction(original.trim().to_string()));
    }
    Ok(Rgba::new(
        parse_channel(parts[0], original)?,
        parse_channel(parts[1], original)?,
        parse_channel(parts[2], original)?,
        parse_alpha(parts.get(3), original)?,
    ))
}

fn parse_hsl_args(args: &str, original: &str) -> Result<Rgba, ColorParseError> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ColorParseError::InvalidFunction(original.trim().to_string()));
    }
    let hsla = Hsla::new(
        parse_hue(parts[0], original)?,
        parse_percentage(parts[1], original)?,
        parse_percentage(parts[2], original)?,
        parse_alpha(parts.get(3), original)?,
    );
    Ok(hsla.to_rgba())
}

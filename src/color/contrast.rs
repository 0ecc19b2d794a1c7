//! Luminance and readable text color selection

use super::rgba::Rgba;

/// Luminance above which dark text reads better than light text.
pub const DEFAULT_LUMINANCE_THRESHOLD: f64 = 0.179;

/// WCAG relative luminance in [0, 1].
pub fn relative_luminance(color: &Rgba) -> f64 {
    fn linearize(channel: u8) -> f64 {
        let c = channel as f64 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Pick `dark` on light backgrounds and `light` on dark ones.
pub fn readable_color(background: &Rgba, threshold: f64, dark: Rgba, light: Rgba) -> Rgba {
    if relative_luminance(background) > threshold {
        dark
    } else {
        light
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(relative_luminance(&Rgba::BLACK), 0.0);
        assert!((relative_luminance(&Rgba::WHITE) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_readable_color() {
        let pick = |bg: Rgba| {
            readable_color(&bg, DEFAULT_LUMINANCE_THRESHOLD, Rgba::BLACK, Rgba::WHITE)
        };
        assert_eq!(pick(Rgba::WHITE), Rgba::BLACK);
        assert_eq!(pick(Rgba::rgb(0x33, 0x66, 0xcc)), Rgba::WHITE);
        assert_eq!(pick(Rgba::rgb(0xff, 0xff, 0x00)), Rgba::BLACK);
        assert_eq!(pick(Rgba::rgb(0x00, 0x00, 0x80)), Rgba::WHITE);
    }
}

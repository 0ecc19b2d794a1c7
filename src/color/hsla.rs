//! Hue/saturation/lightness/alpha representation

use std::fmt;

use super::rgba::Rgba;

/// HSLA color. Hue is in degrees, the other components are in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    /// Same hue, saturation and alpha with a different lightness.
    pub fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }

    pub fn to_rgba(&self) -> Rgba {
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);
        let a = self.a.clamp(0.0, 1.0);

        if s == 0.0 {
            let v = to_channel(l);
            return Rgba::new(v, v, v, a);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = self.h.rem_euclid(360.0) / 360.0;

        Rgba::new(
            to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            to_channel(hue_to_rgb(p, q, h)),
            to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
            a,
        )
    }

    /// CSS `hsla()` notation: whole degrees and percentages, alpha to three
    /// decimals. Saturation, lightness and alpha are clamped to their ranges.
    pub fn to_css(&self) -> String {
        let h = (self.h % 360.0).round();
        let s = (self.s * 100.0).clamp(0.0, 100.0).round();
        let l = (self.l * 100.0).clamp(0.0, 100.0).round();
        let a = (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
        format!("hsla({}, {}%, {}%, {})", h, s, l, a)
    }

    /// The color `to_css` actually writes out: whole degrees and
    /// percentages, alpha to three decimals.
    pub fn rounded(self) -> Self {
        Self {
            h: (self.h % 360.0).round(),
            s: (self.s * 100.0).clamp(0.0, 100.0).round() / 100.0,
            l: (self.l * 100.0).clamp(0.0, 100.0).round() / 100.0,
            a: (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0,
        }
    }
}

impl From<Rgba> for Hsla {
    fn from(color: Rgba) -> Self {
        let r = color.r as f64 / 255.0;
        let g = color.g as f64 / 255.0;
        let b = color.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Self::new(0.0, 0.0, l, color.a);
        }

        let delta = max - min;
        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        let h = 60.0
            * if r == max {
                (g - b) / delta + if g < b { 6.0 } else { 0.0 }
            } else if g == max {
                (b - r) / delta + 2.0
            } else {
                (r - g) / delta + 4.0
            };

        Self::new(h, s, l, color.a)
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css())
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

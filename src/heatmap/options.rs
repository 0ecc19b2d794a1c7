// table-heatmap/src/heatmap/options.rs

use derive_builder::Builder;

use crate::color::{Rgba, DEFAULT_LUMINANCE_THRESHOLD};

/// Most decimal places an `f64` lightness can meaningfully carry.
pub const MAX_PRECISION: u32 = 15;

/// Tunables shared by every column of a heat map.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct HeatMapOptions {
    /// Decimal places the lightness percentage is rounded to, at most
    /// [`MAX_PRECISION`]
    pub precision: u32,
    /// Background luminance above which `dark_text` is used
    pub luminance_threshold: f64,
    pub no_heat_background: Rgba,
    pub no_heat_text: Rgba,
    /// Text color on dark backgrounds
    pub light_text: Rgba,
    /// Text color on light backgrounds
    pub dark_text: Rgba,
}

impl Default for HeatMapOptions {
    fn default() -> Self {
        Self {
            precision: 3,
            luminance_threshold: DEFAULT_LUMINANCE_THRESHOLD,
            no_heat_background: Rgba::WHITE,
            no_heat_text: Rgba::BLACK,
            light_text: Rgba::WHITE,
            dark_text: Rgba::BLACK,
        }
    }
}

impl HeatMapOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.precision {
            Some(precision) if precision > MAX_PRECISION => Err(format!(
                "precision must be between 0 and {}, got {}",
                MAX_PRECISION, precision
            )),
            _ => Ok(()),
        }
    }
}

impl HeatMapOptions {
    /// Round to `precision` decimal places. Precision past
    /// [`MAX_PRECISION`] is treated as `MAX_PRECISION`.
    pub fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.precision.min(MAX_PRECISION) as i32);
        (value * scale).round() / scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let options = HeatMapOptionsBuilder::default().precision(2).build().unwrap();
        assert_eq!(options.precision, 2);
        assert_eq!(options.luminance_threshold, DEFAULT_LUMINANCE_THRESHOLD);
        assert_eq!(options.no_heat_background, Rgba::WHITE);
    }

    #[test]
    fn test_round() {
        let options = HeatMapOptions::default();
        assert_eq!(options.round(0.27449), 0.274);
        assert_eq!(options.round(0.5), 0.5);
    }

    #[test]
    fn test_precision_bound() {
        let options = HeatMapOptionsBuilder::default()
            .precision(MAX_PRECISION)
            .build()
            .unwrap();
        assert_eq!(options.round(0.5), 0.5);

        let err = HeatMapOptionsBuilder::default()
            .precision(400)
            .build()
            .unwrap_err();
        assert!(matches!(err, HeatMapOptionsBuilderError::ValidationError(_)));
        assert!(err.to_string().contains("400"));

        // built by hand, past the builder's check
        let options = HeatMapOptions {
            precision: u32::MAX,
            ..Default::default()
        };
        assert_eq!(options.round(0.25), 0.25);
        assert!(options.round(0.1234).is_finite());
    }
}

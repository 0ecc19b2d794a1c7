//! Per-column heat map coloring
//!
//! Each column's largest value gets the column's base color. Smaller values
//! get the same hue and saturation with a proportionally lighter background,
//! down to white for values near zero. Text color is whichever of the two
//! text candidates stays readable on the computed background.

use humantime::format_duration;
use log::{debug, info, trace, warn};
use std::collections::HashMap;
use std::time::Instant;

use super::cell::{has_heat, HeatCell};
use super::column::{ColumnConfig, ColumnId};
use super::errors::HeatMapError;
use super::options::HeatMapOptions;
use crate::color::{readable_color, Color, Hsla};

/// Largest value seen in each column.
pub type HighestValueTable = HashMap<ColumnId, f64>;

/// Background and text colors for one cell. `None` leaves the style alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorResult {
    pub background: Option<Color>,
    pub text: Option<Color>,
}

impl ColorResult {
    pub const UNSTYLED: ColorResult = ColorResult {
        background: None,
        text: None,
    };

    pub fn is_unstyled(&self) -> bool {
        self.background.is_none() && self.text.is_none()
    }
}

/// Outcome of an apply pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ApplyReport {
    /// Cells that received at least one style
    pub styled: usize,
    /// Cells left untouched
    pub unstyled: usize,
    /// Cells skipped because their color could not be computed
    pub errors: Vec<HeatMapError>,
}

impl ApplyReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Default, Clone)]
pub struct HeatMapColorizer {
    options: HeatMapOptions,
    config: HashMap<ColumnId, ColumnConfig>,
    highest_values: HighestValueTable,
}

impl HeatMapColorizer {
    pub fn new(options: HeatMapOptions) -> Self {
        Self {
            options,
            config: HashMap::new(),
            highest_values: HashMap::new(),
        }
    }

    pub fn options(&self) -> &HeatMapOptions {
        &self.options
    }

    pub fn highest_values(&self) -> &HighestValueTable {
        &self.highest_values
    }

    pub fn column_config(&self, column: &ColumnId) -> Option<&ColumnConfig> {
        self.config.get(column)
    }

    /// Replace the column configuration. Later duplicates win.
    pub fn configure<'a, I>(&mut self, columns: I)
    where
        I: IntoIterator<Item = &'a ColumnConfig>,
    {
        self.config.clear();
        for column in columns {
            if self.config.insert(column.id.clone(), column.clone()).is_some() {
                debug!("Column {} configured more than once, keeping the last", column.id);
            }
        }
        debug!("Configured {} columns", self.config.len());
    }

    /// Recompute the per-column maxima from scratch.
    ///
    /// Every column seen among the cells gets an entry starting at `0`,
    /// configured or not. `NaN` values never raise a maximum.
    pub fn compute_highest_values<C: HeatCell>(&mut self, cells: &[C]) -> &HighestValueTable {
        self.highest_values.clear();
        for cell in cells {
            let highest = self
                .highest_values
                .entry(cell.column().clone())
                .or_insert(0.0);
            let value = cell.value();
            if value > *highest {
                *highest = value;
            }
        }
        if log::log_enabled!(log::Level::Debug) {
            let mut columns: Vec<_> = self.highest_values.iter().collect();
            columns.sort_by(|a, b| a.0.cmp(b.0));
            for (column, highest) in columns {
                debug!("Highest value in column {}: {}", column, highest);
            }
        }
        &self.highest_values
    }

    /// Colors for a single value of `column`.
    pub fn color_for(&self, column: &ColumnId, value: f64) -> Result<ColorResult, HeatMapError> {
        if !has_heat(value) {
            return Ok(ColorResult {
                background: Some(self.options.no_heat_background.into()),
                text: Some(self.options.no_heat_text.into()),
            });
        }

        let config = self
            .config
            .get(column)
            .ok_or_else(|| HeatMapError::MissingColumnConfig(column.clone()))?;

        let Some(base) = config.color else {
            return Ok(ColorResult::UNSTYLED);
        };

        let base = Hsla::from(base);
        let highest = self.highest_values.get(column).copied().unwrap_or(0.0);
        let lightness = self.background_lightness(column, value, highest, base.l);
        // Text is picked against the background as written out, not the
        // unrounded one, so the two always agree.
        let background = base.with_lightness(lightness).rounded();
        let text = readable_color(
            &background.to_rgba(),
            self.options.luminance_threshold,
            self.options.dark_text,
            self.options.light_text,
        );
        trace!(
            "Column {} value {}: background {}, text {}",
            column,
            value,
            background,
            text
        );

        Ok(ColorResult {
            background: Some(background.into()),
            text: Some(text.into()),
        })
    }

    /// `1 - value * (1 - base) / highest`, clamped to [0, 1].
    fn background_lightness(&self, column: &ColumnId, value: f64, highest: f64, base: f64) -> f64 {
        let max_lightness = 1.0 - base;
        let mut percentage = self.options.round(value * max_lightness / highest);
        if percentage.is_nan() {
            percentage = 0.0;
        }
        let lightness = 1.0 - percentage;
        if !(0.0..=1.0).contains(&lightness) {
            warn!(
                "Lightness {} out of range for column {} (value {}, highest {}), clamping",
                lightness, column, value, highest
            );
        }
        lightness.clamp(0.0, 1.0)
    }

    /// Style every cell. Cells whose colors cannot be computed are left
    /// alone and reported.
    pub fn apply<C: HeatCell>(&self, cells: &mut [C]) -> ApplyReport {
        let mut report = ApplyReport::default();
        for cell in cells.iter_mut() {
            match self.color_for(cell.column(), cell.value()) {
                Ok(result) if result.is_unstyled() => report.unstyled += 1,
                Ok(result) => {
                    if let Some(background) = result.background {
                        cell.set_background(background);
                    }
                    if let Some(text) = result.text {
                        cell.set_text_color(text);
                    }
                    report.styled += 1;
                }
                Err(err) => {
                    warn!("Skipping cell: {}", err);
                    report.unstyled += 1;
                    report.errors.push(err);
                }
            }
        }
        report
    }

    /// Configure, measure and apply in one pass.
    pub fn render<C: HeatCell>(&mut self, columns: &[ColumnConfig], cells: &mut [C]) -> ApplyReport {
        info!(
            "Rendering heat map over {} columns and {} cells",
            columns.len(),
            cells.len()
        );
        let now = Instant::now();
        self.configure(columns);
        self.compute_highest_values(cells);
        let report = self.apply(cells);
        debug!(
            "Heat map pass took {} ({} styled, {} unstyled, {} errors)",
            format_duration(now.elapsed()),
            report.styled,
            report.unstyled,
            report.errors.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::heatmap::cell::StyledCell;
    use crate::heatmap::options::HeatMapOptionsBuilder;

    fn base() -> Rgba {
        Rgba::rgb(0x33, 0x66, 0xcc)
    }

    fn score_cells(values: &[&str]) -> Vec<StyledCell> {
        values
            .iter()
            .enumerate()
            .map(|(row, v)| StyledCell::new("score", row, *v))
            .collect()
    }

    fn lightness_of(result: &ColorResult) -> f64 {
        match result.background {
            Some(Color::Hsla(hsla)) => hsla.l,
            other => panic!("expected an hsla background, got {:?}", other),
        }
    }

    fn colorizer_for(cells: &[StyledCell]) -> HeatMapColorizer {
        let mut colorizer = HeatMapColorizer::default();
        colorizer.configure(&[ColumnConfig::with_color("score", base())]);
        colorizer.compute_highest_values(cells);
        colorizer
    }

    #[test]
    fn test_zero_value_gets_default_pair() {
        let colorizer = HeatMapColorizer::default();
        // no configuration at all, zero still yields the default pair
        let result = colorizer.color_for(&"anything".into(), 0.0).unwrap();
        assert_eq!(result.background.unwrap().to_hex(), "#ffffff");
        assert_eq!(result.text.unwrap().to_hex(), "#000000");

        let nan = colorizer.color_for(&"anything".into(), f64::NAN).unwrap();
        assert_eq!(nan, result);
    }

    #[test]
    fn test_highest_values() {
        let mut cells = score_cells(&["10", "50", "100", "abc", ""]);
        cells.push(StyledCell::new("age", 0, "7"));
        cells.push(StyledCell::new("age", 1, "9"));
        cells.push(StyledCell::new("debt", 0, "-5"));

        let mut colorizer = HeatMapColorizer::default();
        let highest = colorizer.compute_highest_values(&cells);
        assert_eq!(highest.len(), 3);
        assert_eq!(highest[&ColumnId::from("score")], 100.0);
        assert_eq!(highest[&ColumnId::from("age")], 9.0);
        assert_eq!(highest[&ColumnId::from("debt")], 0.0);
        assert!(!highest.contains_key(&ColumnId::from("missing")));
    }

    #[test]
    fn test_highest_values_recomputed_from_scratch() {
        let mut colorizer = HeatMapColorizer::default();
        colorizer.compute_highest_values(&score_cells(&["100"]));
        let highest = colorizer.compute_highest_values(&score_cells(&["4", "2"]));
        assert_eq!(highest[&ColumnId::from("score")], 4.0);
    }

    #[test]
    fn test_scaling_example() {
        let cells = score_cells(&["10", "50", "100"]);
        let colorizer = colorizer_for(&cells);
        let column = ColumnId::from("score");

        let max = colorizer.color_for(&column, 100.0).unwrap();
        assert!((lightness_of(&max) - 0.5).abs() < 1e-9);
        assert_eq!(max.background.unwrap().to_hex(), "#3366cc");
        assert_eq!(max.text.unwrap().to_rgba(), Rgba::WHITE);

        let half = colorizer.color_for(&column, 50.0).unwrap();
        assert!((lightness_of(&half) - 0.75).abs() < 1e-9);
        assert_eq!(half.background.unwrap().to_css(), "hsla(220, 60%, 75%, 1)");
        assert_eq!(half.text.unwrap().to_rgba(), Rgba::BLACK);

        let low = colorizer.color_for(&column, 10.0).unwrap();
        assert!((lightness_of(&low) - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_max_cell_matches_base_lightness() {
        for color in ["#ff8800", "teal", "rgb(10, 200, 90)", "hsl(300, 40%, 35%)"] {
            let rgba: Rgba = color.parse().unwrap();
            let mut colorizer = HeatMapColorizer::default();
            colorizer.configure(&[ColumnConfig::with_color("c", rgba)]);
            colorizer.compute_highest_values(&[StyledCell::new("c", 0, "37")]);

            let result = colorizer.color_for(&"c".into(), 37.0).unwrap();
            // written out in whole percent
            let hsla = Hsla::from(rgba);
            let expected = (colorizer.options().round(hsla.l) * 100.0).round() / 100.0;
            assert!(
                (lightness_of(&result) - expected).abs() < 1e-9,
                "{color}: {} != {}",
                lightness_of(&result),
                expected
            );
        }
    }

    #[test]
    fn test_text_follows_written_background() {
        // 71.56 of 100 on #404040 lands at lightness 0.464: unrounded that is
        // #767676 (dark text), but the background is written as 46%, #757575
        let gray = Rgba::rgb(0x40, 0x40, 0x40);
        let mut colorizer = HeatMapColorizer::default();
        colorizer.configure(&[ColumnConfig::with_color("c", gray)]);
        colorizer.compute_highest_values(&[
            StyledCell::new("c", 0, "100"),
            StyledCell::new("c", 1, "71.56"),
        ]);

        let result = colorizer.color_for(&"c".into(), 71.56).unwrap();
        let background = result.background.unwrap();
        assert_eq!(background.to_css(), "hsla(0, 0%, 46%, 1)");
        assert_eq!(background.to_hex(), "#757575");
        assert_eq!(result.text.unwrap().to_rgba(), Rgba::WHITE);

        let options = colorizer.options();
        let expected = readable_color(
            &background.to_rgba(),
            options.luminance_threshold,
            options.dark_text,
            options.light_text,
        );
        assert_eq!(result.text.unwrap().to_rgba(), expected);
    }

    #[test]
    fn test_monotonic_lightness() {
        let values = ["1", "3", "8", "15", "40", "41", "99", "100"];
        let cells = score_cells(&values);
        let colorizer = colorizer_for(&cells);
        let column = ColumnId::from("score");

        let lightness: Vec<f64> = cells
            .iter()
            .map(|c| lightness_of(&colorizer.color_for(&column, c.value).unwrap()))
            .collect();
        assert!(lightness.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_missing_config_is_reported() {
        let cells = vec![StyledCell::new("unknown", 0, "5")];
        let mut colorizer = HeatMapColorizer::default();
        colorizer.compute_highest_values(&cells);
        assert_eq!(
            colorizer.color_for(&"unknown".into(), 5.0),
            Err(HeatMapError::MissingColumnConfig("unknown".into()))
        );
    }

    #[test]
    fn test_plain_column_is_unstyled() {
        let mut colorizer = HeatMapColorizer::default();
        colorizer.configure(&[ColumnConfig::plain("name")]);
        let result = colorizer.color_for(&"name".into(), 12.0).unwrap();
        assert_eq!(result, ColorResult::UNSTYLED);
    }

    #[test]
    fn test_out_of_range_lightness_is_clamped() {
        let mut colorizer = HeatMapColorizer::default();
        colorizer.configure(&[ColumnConfig::with_color("score", base())]);
        colorizer.compute_highest_values(&score_cells(&["10"]));
        let column = ColumnId::from("score");

        // larger than the recorded maximum
        let above = colorizer.color_for(&column, 40.0).unwrap();
        assert_eq!(lightness_of(&above), 0.0);

        // negative values lighten past white
        let below = colorizer.color_for(&column, -10.0).unwrap();
        assert_eq!(lightness_of(&below), 1.0);
    }

    #[test]
    fn test_black_base_and_unknown_maximum() {
        let mut colorizer = HeatMapColorizer::default();
        colorizer.configure(&[ColumnConfig::with_color("c", Rgba::BLACK)]);
        // nothing measured yet, so the maximum is treated as zero
        let result = colorizer.color_for(&"c".into(), 3.0).unwrap();
        assert_eq!(lightness_of(&result), 0.0);

        colorizer.configure(&[ColumnConfig::with_color("c", Rgba::WHITE)]);
        let result = colorizer.color_for(&"c".into(), 3.0).unwrap();
        assert_eq!(lightness_of(&result), 1.0);
    }

    #[test]
    fn test_apply_and_idempotent_render() {
        crate::_setup_pretty_env_logger_default();
        let columns = vec![
            ColumnConfig::with_color("score", base()),
            ColumnConfig::plain("name"),
        ];
        let mut cells = score_cells(&["0", "50", "100"]);
        cells.push(StyledCell::new("name", 0, "17"));
        cells.push(StyledCell::new("orphan", 0, "4"));

        let mut colorizer = HeatMapColorizer::default();
        let report = colorizer.render(&columns, &mut cells);
        assert_eq!(report.styled, 3);
        assert_eq!(report.unstyled, 2);
        assert_eq!(
            report.errors,
            vec![HeatMapError::MissingColumnConfig("orphan".into())]
        );

        assert_eq!(cells[0].background.unwrap().to_hex(), "#ffffff");
        assert!(cells[3].background.is_none());
        assert!(cells[4].background.is_none());

        let first = cells.clone();
        let second_report = colorizer.render(&columns, &mut cells);
        assert_eq!(report, second_report);
        assert_eq!(first, cells);
    }

    #[test]
    fn test_custom_options() {
        let options = HeatMapOptionsBuilder::default()
            .no_heat_background(Rgba::rgb(0xee, 0xee, 0xee))
            .precision(1)
            .build()
            .unwrap();
        let mut colorizer = HeatMapColorizer::new(options);
        colorizer.configure(&[ColumnConfig::with_color("score", base())]);
        colorizer.compute_highest_values(&score_cells(&["36", "100"]));

        let zero = colorizer.color_for(&"score".into(), 0.0).unwrap();
        assert_eq!(zero.background.unwrap().to_hex(), "#eeeeee");

        // 0.18 rounds to 0.2 at one decimal
        let low = colorizer.color_for(&"score".into(), 36.0).unwrap();
        assert!((lightness_of(&low) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_oversized_precision_keeps_colors() {
        let options = HeatMapOptions {
            precision: 400,
            ..Default::default()
        };
        let mut colorizer = HeatMapColorizer::new(options);
        colorizer.configure(&[ColumnConfig::with_color("score", base())]);
        colorizer.compute_highest_values(&score_cells(&["50", "100"]));

        let max = colorizer.color_for(&"score".into(), 100.0).unwrap();
        assert_eq!(max.background.unwrap().to_hex(), "#3366cc");
        let half = colorizer.color_for(&"score".into(), 50.0).unwrap();
        assert!((lightness_of(&half) - 0.75).abs() < 1e-9);
    }
}

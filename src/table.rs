//! CSV-backed heat map table
//!
//! The first CSV record names the columns. Every other field becomes a
//! [`StyledCell`] in the column it sits under.

use humantime::format_duration;
use log::{debug, info, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

use crate::heatmap::{ColumnConfig, ColumnId, HeatMapError, StyledCell, TableContent};

/// How cells refer to their column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColumnIdMode {
    /// By header text
    #[default]
    Name,
    /// By zero-based position
    Index,
}

#[derive(Error, Debug)]
pub enum TableLoadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Table has no header row")]
    MissingHeader,
    #[error("Invalid column key for index mode: {0}")]
    InvalidColumnKey(String),
    #[error(transparent)]
    HeatMapError(#[from] HeatMapError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatTable {
    pub headers: Vec<String>,
    /// Row-major cells, `headers.len()` per row
    pub cells: Vec<StyledCell>,
    pub nrows: usize,
    pub id_mode: ColumnIdMode,
}

impl HeatTable {
    pub fn from_path(path: &Path, id_mode: ColumnIdMode) -> Result<Self, TableLoadError> {
        info!("Loading table from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file, id_mode)
    }

    pub fn from_reader<R: Read>(reader: R, id_mode: ColumnIdMode) -> Result<Self, TableLoadError> {
        let now = Instant::now();
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(TableLoadError::MissingHeader);
        }
        let ids: Vec<ColumnId> = (0..headers.len())
            .map(|idx| Self::id_for(&headers, idx, id_mode))
            .collect();

        let mut cells = Vec::new();
        let mut nrows = 0;
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > headers.len() {
                warn!(
                    "Row {} has {} fields, ignoring the {} past the header",
                    row,
                    record.len(),
                    record.len() - headers.len()
                );
            }
            for (col, id) in ids.iter().enumerate() {
                let text = record.get(col).unwrap_or("");
                cells.push(StyledCell::new(id.clone(), row, text));
            }
            nrows += 1;
        }

        debug!(
            "Loaded {} rows x {} columns in {}",
            nrows,
            headers.len(),
            format_duration(now.elapsed())
        );
        Ok(Self {
            headers,
            cells,
            nrows,
            id_mode,
        })
    }

    fn id_for(headers: &[String], idx: usize, id_mode: ColumnIdMode) -> ColumnId {
        match id_mode {
            ColumnIdMode::Name => ColumnId::from(headers[idx].as_str()),
            ColumnIdMode::Index => ColumnId::from(idx),
        }
    }

    pub fn ncols(&self) -> usize {
        self.headers.len()
    }

    pub fn column_id(&self, col: usize) -> Option<ColumnId> {
        (col < self.ncols()).then(|| Self::id_for(&self.headers, col, self.id_mode))
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&StyledCell> {
        if row >= self.nrows || col >= self.ncols() {
            return None;
        }
        self.cells.get(row * self.ncols() + col)
    }

    /// Resolve a user-facing column key into an id for this table.
    pub fn resolve_key(&self, key: &str) -> Result<ColumnId, TableLoadError> {
        let id = match self.id_mode {
            ColumnIdMode::Name => ColumnId::from(key),
            ColumnIdMode::Index => key
                .trim()
                .parse::<i64>()
                .map(ColumnId::from)
                .map_err(|_| TableLoadError::InvalidColumnKey(key.to_string()))?,
        };
        if !(0..self.ncols()).any(|col| self.column_id(col).as_ref() == Some(&id)) {
            warn!("Column {} is configured but not present in the table", id);
        }
        Ok(id)
    }

    /// Build column configurations from `COLUMN=COLOR` pairs and plain
    /// column keys. Columns named in neither stay unconfigured.
    pub fn column_configs(
        &self,
        colors: &[(String, String)],
        plain: &[String],
    ) -> Result<Vec<ColumnConfig>, TableLoadError> {
        let mut configs = Vec::with_capacity(colors.len() + plain.len());
        for key in plain {
            configs.push(ColumnConfig::plain(self.resolve_key(key)?));
        }
        for (key, color) in colors {
            configs.push(ColumnConfig::parse(self.resolve_key(key)?, Some(color.as_str()))?);
        }
        Ok(configs)
    }

    /// Clear previous styles and hand the cells over for rendering.
    pub fn content(&self, columns: Vec<ColumnConfig>) -> TableContent<StyledCell> {
        let mut cells = self.cells.clone();
        cells.iter_mut().for_each(StyledCell::clear_style);
        TableContent { columns, cells }
    }
}

/// clap value parser for `COLUMN=COLOR`.
pub fn parse_color_arg(arg: &str) -> Result<(String, String), String> {
    let (column, color) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=COLOR, got {:?}", arg))?;
    let (column, color) = (column.trim(), color.trim());
    if column.is_empty() || color.is_empty() {
        return Err(format!("expected COLUMN=COLOR, got {:?}", arg));
    }
    Ok((column.to_string(), color.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    const CSV: &str = "name,score,age\nada,10,36\nbob,50,\ncyd,100,41,extra\n";

    #[test]
    fn test_load_by_name() {
        crate::_setup_pretty_env_logger_default();
        let table = HeatTable::from_reader(CSV.as_bytes(), ColumnIdMode::Name).unwrap();
        assert_eq!(table.headers, vec!["name", "score", "age"]);
        assert_eq!(table.nrows, 3);
        assert_eq!(table.cells.len(), 9);

        let cell = table.cell(1, 1).unwrap();
        assert_eq!(cell.column, ColumnId::from("score"));
        assert_eq!(cell.value, 50.0);
        assert_eq!(table.cell(1, 2).unwrap().value, 0.0);
        assert!(table.cell(0, 0).unwrap().value.is_nan());
        assert!(table.cell(3, 0).is_none());
    }

    #[test]
    fn test_load_by_index() {
        let table = HeatTable::from_reader(CSV.as_bytes(), ColumnIdMode::Index).unwrap();
        assert_eq!(table.cell(2, 1).unwrap().column, ColumnId::Index(1));
        assert_eq!(table.resolve_key("1").unwrap(), ColumnId::Index(1));
        assert!(matches!(
            table.resolve_key("score"),
            Err(TableLoadError::InvalidColumnKey(_))
        ));
    }

    #[test]
    fn test_missing_header() {
        let err = HeatTable::from_reader("".as_bytes(), ColumnIdMode::Name).unwrap_err();
        assert!(matches!(err, TableLoadError::MissingHeader));
    }

    #[test]
    fn test_column_configs() {
        let table = HeatTable::from_reader(CSV.as_bytes(), ColumnIdMode::Name).unwrap();
        let configs = table
            .column_configs(
                &[("score".to_string(), "#3366cc".to_string())],
                &["name".to_string()],
            )
            .unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0], ColumnConfig::plain("name"));
        assert_eq!(configs[1].color, Some(Rgba::rgb(0x33, 0x66, 0xcc)));

        let err = table
            .column_configs(&[("score".to_string(), "bogus".to_string())], &[])
            .unwrap_err();
        assert!(matches!(err, TableLoadError::HeatMapError(HeatMapError::InvalidColor { .. })));
    }

    #[test]
    fn test_parse_color_arg() {
        assert_eq!(
            parse_color_arg("score=#3366CC").unwrap(),
            ("score".to_string(), "#3366CC".to_string())
        );
        assert_eq!(
            parse_color_arg("total = rgb(1, 2, 3)").unwrap(),
            ("total".to_string(), "rgb(1, 2, 3)".to_string())
        );
        assert!(parse_color_arg("score").is_err());
        assert!(parse_color_arg("=red").is_err());
    }
}

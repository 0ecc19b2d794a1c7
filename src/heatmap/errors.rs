// table-heatmap/src/heatmap/errors.rs

use super::column::ColumnId;
use crate::color::ColorParseError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeatMapError {
    #[error("No configuration for column: {0}")]
    MissingColumnConfig(ColumnId),
    #[error("Invalid color for column {column}: {source}")]
    InvalidColor {
        column: ColumnId,
        source: ColorParseError,
    },
    #[error("Table content was dropped before it became ready")]
    ContentAbandoned,
}

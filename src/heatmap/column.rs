//! Column identifiers and per-column heat map configuration

use std::fmt;

use super::errors::HeatMapError;
use crate::color::{parse_color, Rgba};

/// Identifies a table column, either by name or by position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnId {
    Index(i64),
    Name(String),
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnId::Index(idx) => write!(f, "{}", idx),
            ColumnId::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for ColumnId {
    fn from(name: &str) -> Self {
        ColumnId::Name(name.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(name: String) -> Self {
        ColumnId::Name(name)
    }
}

impl From<i64> for ColumnId {
    fn from(idx: i64) -> Self {
        ColumnId::Index(idx)
    }
}

impl From<usize> for ColumnId {
    fn from(idx: usize) -> Self {
        ColumnId::Index(idx as i64)
    }
}

/// Heat map options for one column.
///
/// A column without a base color is still "configured": its cells are
/// simply left unstyled.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnConfig {
    pub id: ColumnId,
    /// Color marking the column's maximum value
    pub color: Option<Rgba>,
}

impl ColumnConfig {
    /// A configured column that receives no styling.
    pub fn plain(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            color: None,
        }
    }

    pub fn with_color(id: impl Into<ColumnId>, color: Rgba) -> Self {
        Self {
            id: id.into(),
            color: Some(color),
        }
    }

    /// Validate and build a configuration from a textual color option.
    pub fn parse(id: impl Into<ColumnId>, color: Option<&str>) -> Result<Self, HeatMapError> {
        let id = id.into();
        let color = match color {
            Some(text) => Some(parse_color(text).map_err(|source| HeatMapError::InvalidColor {
                column: id.clone(),
                source,
            })?),
            None => None,
        };
        Ok(Self { id, color })
    }
}

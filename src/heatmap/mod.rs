// table-heatmap/src/heatmap/mod.rs

mod cell;
mod colorizer;
mod column;
mod errors;
mod options;
mod render;

pub use cell::{coerce_value, has_heat, HeatCell, StyleTarget, StyledCell};
pub use colorizer::{ApplyReport, ColorResult, HeatMapColorizer, HighestValueTable};
pub use column::{ColumnConfig, ColumnId};
pub use errors::HeatMapError;
pub use options::{HeatMapOptions, HeatMapOptionsBuilder, HeatMapOptionsBuilderError, MAX_PRECISION};
pub use render::{
    content_channel, ContentReady, ContentSignal, HeatMapRenderer, RenderedTable, TableContent,
};

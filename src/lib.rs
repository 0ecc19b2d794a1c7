use pretty_env_logger;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn _setup_pretty_env_logger_default() {
    INIT.call_once(|| {
        pretty_env_logger::init();
    });
}

pub mod color;
pub mod heatmap;
pub mod output;
pub mod table;
pub mod tui;

pub use heatmap::{ColumnConfig, ColumnId, HeatMapColorizer, HeatMapError, HeatMapOptions};

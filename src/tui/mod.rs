//! Interactive viewer for heat-mapped CSV tables

mod app;
mod colors;
mod event;
mod table;
pub mod ui;

pub use app::{App, ColumnArgs, StatusLevel, StatusMessage};
pub use colors::{get_cell_colors, to_term_color};
pub use event::{Event, EventHandler};
pub use table::TableView;

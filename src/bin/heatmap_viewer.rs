//! Table Heat Map Viewer - Interactive TUI
//!
//! Loads a CSV table in the background and colors each column as a heat
//! map once the table is ready.
//!
//! ## Usage
//!
//! ```bash
//! # Color the "score" and "attendance" columns
//! heatmap-viewer grades.csv -c score=#3366cc -c attendance=seagreen --plain name
//!
//! # Address columns by position
//! heatmap-viewer grades.csv --index-ids -c 1=#3366cc
//! ```

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::path::PathBuf;

use table_heatmap::heatmap::HeatMapOptions;
use table_heatmap::table::{parse_color_arg, ColumnIdMode};
use table_heatmap::tui::{App, ColumnArgs, EventHandler};

#[derive(Parser, Debug)]
#[command(
    name = "heatmap-viewer",
    author,
    version = env!("TABLE_HEATMAP_VERSION"),
    about = "Interactive heat map viewer for CSV tables"
)]
struct Cli {
    /// CSV file whose first row names the columns
    input: PathBuf,

    /// Base color for a column's maximum value (repeatable)
    #[clap(short, long = "color", value_name = "COLUMN=COLOR", value_parser = parse_color_arg)]
    colors: Vec<(String, String)>,

    /// Configure a column without coloring it (repeatable)
    #[clap(long, value_name = "COLUMN")]
    plain: Vec<String>,

    /// Address columns by zero-based index instead of name
    #[clap(long, action)]
    index_ids: bool,

    /// Tick rate in milliseconds
    #[clap(long, default_value = "100", value_name = "MS")]
    tick_rate: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let columns = ColumnArgs {
        colors: cli.colors,
        plain: cli.plain,
        id_mode: if cli.index_ids {
            ColumnIdMode::Index
        } else {
            ColumnIdMode::Name
        },
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut event_handler = EventHandler::new(cli.tick_rate);
    let mut app = App::new(
        cli.input,
        columns,
        HeatMapOptions::default(),
        event_handler.sender(),
    );
    app.start_loading();

    // Main loop
    let result = loop {
        if let Err(err) = terminal.draw(|frame| table_heatmap::tui::ui::draw(frame, &mut app)) {
            break Err(err.into());
        }

        match event_handler.next().await {
            Ok(event) => app.on_event(event),
            Err(err) => break Err(err),
        }
        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

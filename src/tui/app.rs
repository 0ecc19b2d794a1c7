//! Main application state
//!
//! Owns the table view, the column configuration and the status line, and
//! drives loading and rendering through the event channel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, error, info};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::event::Event;
use super::table::TableView;
use crate::heatmap::{content_channel, HeatMapOptions, HeatMapRenderer};
use crate::table::{ColumnIdMode, HeatTable};

/// Column options given on the command line
#[derive(Clone, Debug, Default)]
pub struct ColumnArgs {
    /// `COLUMN=COLOR` pairs
    pub colors: Vec<(String, String)>,
    /// Columns configured without a color
    pub plain: Vec<String>,
    pub id_mode: ColumnIdMode,
}

/// Main application state
pub struct App {
    /// Source CSV file
    pub input: PathBuf,

    /// Column configuration
    pub columns: ColumnArgs,

    /// Heat map tunables
    pub options: HeatMapOptions,

    /// Loaded table (None while loading)
    pub view: Option<TableView>,

    /// Whether a render pass is in flight
    pub rendering: bool,

    /// Bumped by every load and render; results from older passes are dropped
    pub generation: u64,

    /// Whether to show help overlay
    pub show_help: bool,

    /// Animation frame counter (for spinners)
    pub frame: usize,

    /// Status message (bottom bar)
    pub status_message: Option<StatusMessage>,

    /// Rows visible in the last drawn frame
    pub visible_rows: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    events: mpsc::UnboundedSender<Event>,
}

/// Status message displayed at the bottom
#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub expires: Instant,
}

/// Status message severity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl App {
    pub fn new(
        input: PathBuf,
        columns: ColumnArgs,
        options: HeatMapOptions,
        events: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            input,
            columns,
            options,
            view: None,
            rendering: false,
            generation: 0,
            show_help: false,
            frame: 0,
            status_message: None,
            visible_rows: 0,
            should_quit: false,
            events,
        }
    }

    /// Load the table on a blocking task and report back with `Event::Loaded`
    pub fn start_loading(&mut self) {
        let path = self.input.clone();
        let id_mode = self.columns.id_mode;
        let events = self.events.clone();
        self.generation += 1;
        self.rendering = false;
        self.set_status(format!("Loading {}", path.display()), StatusLevel::Info);

        tokio::spawn(async move {
            let loaded = tokio::task::spawn_blocking(move || HeatTable::from_path(&path, id_mode))
                .await
                .map_err(|e| e.to_string())
                .and_then(|res| res.map_err(|e| e.to_string()));
            let _ = events.send(Event::Loaded(loaded));
        });
    }

    /// Color the current table.
    ///
    /// The renderer waits on a readiness signal which is fired once the
    /// column configuration has been resolved against the loaded table.
    pub fn start_render(&mut self) {
        let Some(view) = &self.view else {
            return;
        };

        let columns = match view
            .table
            .column_configs(&self.columns.colors, &self.columns.plain)
        {
            Ok(columns) => columns,
            Err(err) => {
                error!("Invalid column configuration: {}", err);
                self.set_status(format!("Configuration error: {}", err), StatusLevel::Error);
                return;
            }
        };

        let (ready, signal) = content_channel();
        let mut renderer = HeatMapRenderer::new(self.options.clone());
        let events = self.events.clone();
        self.generation += 1;
        let generation = self.generation;
        tokio::spawn(async move {
            let result = renderer.render_when_ready(signal).await;
            let _ = events.send(Event::Rendered { generation, result });
        });

        self.rendering = true;
        if ready.ready(view.table.content(columns)).is_err() {
            self.rendering = false;
            self.set_status("Renderer stopped before content was ready", StatusLevel::Error);
        }
    }

    pub fn on_event(&mut self, event: Event) {
        match event {
            Event::Tick => self.on_tick(),
            Event::Key(key) => self.on_key(key),
            Event::Resize(_, _) => {}
            Event::Loaded(Ok(table)) => {
                info!("Loaded {} rows from {}", table.nrows, self.input.display());
                self.view = Some(TableView::new(table));
                self.start_render();
            }
            Event::Loaded(Err(err)) => {
                error!("Failed to load {}: {}", self.input.display(), err);
                self.set_status(format!("Load failed: {}", err), StatusLevel::Error);
            }
            Event::Rendered { generation, .. } if generation != self.generation => {
                debug!(
                    "Dropping render from generation {}, current is {}",
                    generation, self.generation
                );
            }
            Event::Rendered {
                result: Ok(rendered),
                ..
            } => {
                self.rendering = false;
                let report = rendered.report.clone();
                if let Some(view) = self.view.as_mut() {
                    view.set_rendered(rendered);
                }
                if report.is_clean() {
                    self.set_status(
                        format!("Colored {} cells", report.styled),
                        StatusLevel::Success,
                    );
                } else {
                    self.set_status(
                        format!(
                            "Colored {} cells, skipped {}: {}",
                            report.styled,
                            report.errors.len(),
                            report.errors[0]
                        ),
                        StatusLevel::Warning,
                    );
                }
            }
            Event::Rendered { result: Err(err), .. } => {
                self.rendering = false;
                self.set_status(err.to_string(), StatusLevel::Error);
            }
        }
    }

    pub fn on_tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        if let Some(msg) = &self.status_message {
            if Instant::now() >= msg.expires {
                self.status_message = None;
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1)) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') | KeyCode::F(1) => self.show_help = true,
            KeyCode::Char('r') => {
                if !self.rendering {
                    self.start_render();
                }
            }
            KeyCode::Char('R') => self.start_loading(),
            _ => self.handle_table_key(key),
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        let visible_rows = self.visible_rows;
        let Some(view) = self.view.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => view.cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => view.cursor_down(),
            KeyCode::Left | KeyCode::Char('h') => view.cursor_left(),
            KeyCode::Right | KeyCode::Char('l') => view.cursor_right(),
            KeyCode::Home | KeyCode::Char('g') => view.cursor.0 = 0,
            KeyCode::End | KeyCode::Char('G') => {
                view.cursor.0 = view.table.nrows.saturating_sub(1)
            }
            _ => return,
        }
        view.ensure_cursor_visible(visible_rows);
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            level,
            expires: Instant::now() + Duration::from_secs(5),
        });
    }

    pub fn spinner(&self) -> char {
        const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
        SPINNER[(self.frame / 2) % SPINNER.len()]
    }
}

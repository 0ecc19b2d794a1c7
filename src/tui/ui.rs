//! Main UI layout and rendering
//!
//! Header, the heat-mapped table, and a status/help footer

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::{App, StatusLevel};
use super::colors::get_cell_colors;
use super::table::TableView;

/// Draw the complete UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Main layout: header, body, footer
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header/title
            Constraint::Min(5),    // Table
            Constraint::Length(3), // Status/help bar
        ])
        .split(area);

    render_header(frame, main_layout[0], app);
    render_table(frame, main_layout[1], app);
    render_footer(frame, main_layout[2], app);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!("Table Heat Map - {}", app.input.display());
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let title = match (&app.view, app.rendering) {
        (None, _) => format!(" Loading {} ", app.spinner()),
        (Some(_), true) => format!(" Coloring {} ", app.spinner()),
        (Some(view), false) => format!(" {} rows x {} columns ", view.table.nrows, view.table.ncols()),
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_height: u16 = 1;
    app.visible_rows = inner.height.saturating_sub(header_height) as usize;

    let Some(view) = app.view.as_mut() else {
        return;
    };
    view.ensure_cursor_visible(app.visible_rows);

    let cell_width: u16 = column_width(view);
    let available_cols = (inner.width / cell_width.max(1)) as usize;

    render_column_headers(frame, inner, view, cell_width, available_cols);

    let table_start_y = inner.y + header_height;
    let last_row = view.table.nrows.min(view.scroll_offset + app.visible_rows);

    for (line, row_idx) in (view.scroll_offset..last_row).enumerate() {
        let row_y = table_start_y + line as u16;

        for col_idx in 0..view.table.ncols().min(available_cols) {
            let cell_x = inner.x + (col_idx as u16 * cell_width);

            if let Some(cell) = view.display_cell(row_idx, col_idx) {
                let is_cursor = view.cursor == (row_idx, col_idx);
                let (fg, bg) = get_cell_colors(cell, is_cursor);

                let text = fit(&cell.text, cell_width as usize - 1);
                let widget = Paragraph::new(format!("{:>width$} ", text, width = cell_width as usize - 1))
                    .style(Style::default().fg(fg).bg(bg));
                frame.render_widget(widget, Rect::new(cell_x, row_y, cell_width, 1));
            }
        }
    }
}

/// Widest header or cell text plus padding, within sane limits
fn column_width(view: &TableView) -> u16 {
    let widest = view
        .table
        .headers
        .iter()
        .map(|h| h.chars().count())
        .chain(view.table.cells.iter().map(|c| c.text.chars().count()))
        .max()
        .unwrap_or(0);
    (widest as u16 + 2).clamp(6, 20)
}

fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

fn render_column_headers(
    frame: &mut Frame,
    area: Rect,
    view: &TableView,
    cell_width: u16,
    available_cols: usize,
) {
    for (col_idx, header) in view.table.headers.iter().take(available_cols).enumerate() {
        let cell_x = area.x + (col_idx as u16 * cell_width);
        let style = if view.cursor.1 == col_idx {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Cyan)
        };
        let text = fit(header, cell_width as usize - 1);
        let widget = Paragraph::new(format!("{:>width$} ", text, width = cell_width as usize - 1))
            .style(style);
        frame.render_widget(widget, Rect::new(cell_x, area.y, cell_width, 1));
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let content = if let Some(ref msg) = app.status_message {
        let style = match msg.level {
            StatusLevel::Info => Style::default().fg(Color::White),
            StatusLevel::Warning => Style::default().fg(Color::Yellow),
            StatusLevel::Error => Style::default().fg(Color::Red),
            StatusLevel::Success => Style::default().fg(Color::Green),
        };
        Paragraph::new(msg.text.as_str())
            .style(style)
            .wrap(Wrap { trim: true })
    } else if let Some(cell) = app.view.as_ref().and_then(|v| v.current_cell()) {
        let colors = match (&cell.background, &cell.text_color) {
            (Some(bg), Some(fg)) => format!("background {} | text {}", bg.to_css(), fg.to_css()),
            (Some(bg), None) => format!("background {}", bg.to_css()),
            _ => "no heat".to_string(),
        };
        Paragraph::new(format!("column {} = {} | {} | ?: help", cell.column, cell.text, colors))
            .style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new("arrows/hjkl: move | r: re-color | R: reload | ?: help | q: quit")
            .style(Style::default().fg(Color::DarkGray))
    };

    let block = Block::default().borders(Borders::TOP);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(content.alignment(Alignment::Center), inner);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_width = 52u16.min(area.width);
    let popup_height = 16u16.min(area.height);
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let help_text = r#"
 Table Heat Map - Keyboard

 NAVIGATION
   arrows / hjkl    Move cursor in table
   g / G            First / last row

 COLORING
   r                Re-color the table
   R                Reload the CSV file

 OTHER
   ? / F1           Toggle this help
   q / Ctrl+C       Quit application
"#;

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .title(" Help ")
                .title_style(Style::default().fg(Color::Cyan).bold())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(help, popup_area);
}

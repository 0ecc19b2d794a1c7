//! Writers for a rendered heat map: CSV, CSS declarations and an ANSI
//! terminal preview.

use clap::ValueEnum;
use crossterm::style::{Color as TermColor, Stylize};
use std::io::{self, Write};
use thiserror::Error;

use crate::color::Color;
use crate::heatmap::StyledCell;
use crate::table::HeatTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// row,column,value,background,text
    #[default]
    Csv,
    /// One CSS declaration block per styled cell
    Css,
    /// The table printed with terminal colors
    Preview,
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

pub const CSV_HEADER: [&str; 5] = ["row", "column", "value", "background", "text"];

pub fn write_output<W: Write>(
    format: OutputFormat,
    table: &HeatTable,
    cells: &[StyledCell],
    out: W,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Csv => write_csv(cells, out),
        OutputFormat::Css => Ok(write_css(cells, out)?),
        OutputFormat::Preview => Ok(write_preview(table, cells, out)?),
    }
}

/// One record per cell. Missing colors are empty fields, translucent ones
/// are `#rrggbbaa`.
pub fn write_csv<W: Write>(cells: &[StyledCell], out: W) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for cell in cells {
        writer.write_record([
            cell.row.to_string(),
            cell.column.to_string(),
            cell.text.clone(),
            cell.background.map(|c| c.to_hex()).unwrap_or_default(),
            cell.text_color.map(|c| c.to_hex()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// One line per styled cell; unstyled cells are skipped.
pub fn write_css<W: Write>(cells: &[StyledCell], mut out: W) -> io::Result<()> {
    for cell in cells {
        let mut declarations = Vec::new();
        if let Some(background) = cell.background {
            declarations.push(format!("background-color: {};", background.to_css()));
        }
        if let Some(text) = cell.text_color {
            declarations.push(format!("color: {};", text.to_css()));
        }
        if !declarations.is_empty() {
            writeln!(
                out,
                "/* row {}, column {} */ {}",
                cell.row,
                cell.column,
                declarations.join(" ")
            )?;
        }
    }
    out.flush()
}

fn term_color(color: Color) -> TermColor {
    let rgba = color.to_rgba();
    TermColor::Rgb {
        r: rgba.r,
        g: rgba.g,
        b: rgba.b,
    }
}

/// Right-aligned columns, each cell painted with its heat colors.
pub fn write_preview<W: Write>(table: &HeatTable, cells: &[StyledCell], mut out: W) -> io::Result<()> {
    let ncols = table.ncols();
    if ncols == 0 {
        return Ok(());
    }
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for (idx, cell) in cells.iter().enumerate() {
        let col = idx % ncols;
        widths[col] = widths[col].max(cell.text.chars().count());
    }

    for (header, width) in table.headers.iter().zip(&widths) {
        write!(out, " {:>width$} ", header, width = width)?;
    }
    writeln!(out)?;

    for row in cells.chunks(ncols) {
        for (cell, width) in row.iter().zip(&widths) {
            let mut styled = format!(" {:>width$} ", cell.text, width = width).stylize();
            if let Some(background) = cell.background {
                styled = styled.on(term_color(background));
            }
            if let Some(text) = cell.text_color {
                styled = styled.with(term_color(text));
            }
            write!(out, "{}", styled)?;
        }
        writeln!(out)?;
    }
    out.flush()
}

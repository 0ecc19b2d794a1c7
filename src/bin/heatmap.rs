use clap::Parser;
use pretty_env_logger;
use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;
use std::{error::Error, path::PathBuf};
use table_heatmap::heatmap::{HeatMapOptionsBuilder, HeatMapRenderer, MAX_PRECISION};
use table_heatmap::output::{write_output, OutputFormat};
use table_heatmap::table::{parse_color_arg, ColumnIdMode, HeatTable};

const VERSION: &'static str = env!("TABLE_HEATMAP_VERSION");

#[derive(Parser, Debug)]
#[command(author, about = "Color CSV table cells by their magnitude within each column", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// CSV file whose first row names the columns
    input: PathBuf,
    #[clap(
        short,
        long = "color",
        value_name = "COLUMN=COLOR",
        value_parser = parse_color_arg,
        help = "Base color for a column's maximum value. COLOR is hex, rgb(), \
                hsl() or a CSS color name. May be repeated."
    )]
    colors: Vec<(String, String)>,
    #[clap(long, value_name = "COLUMN", help = "Configure a column without coloring it")]
    plain: Vec<String>,
    #[clap(long, action, help = "Address columns by zero-based index instead of name")]
    index_ids: bool,
    #[clap(
        long,
        default_value = "3",
        value_parser = clap::value_parser!(u32).range(0..=MAX_PRECISION as i64),
        help = "Decimal places of the lightness percentage"
    )]
    precision: u32,
    #[clap(
        long,
        default_value = "0.179",
        help = "Background luminance above which text turns dark"
    )]
    threshold: f64,
    #[clap(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
    #[clap(short, long)]
    output: Option<PathBuf>,
    #[clap(long, action, help = "Fail when a cell's column has no configuration")]
    strict: bool,
}

fn entrypoint() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let id_mode = if cli.index_ids {
        ColumnIdMode::Index
    } else {
        ColumnIdMode::Name
    };
    let table = HeatTable::from_path(&cli.input, id_mode)?;
    let columns = table.column_configs(&cli.colors, &cli.plain)?;
    let options = HeatMapOptionsBuilder::default()
        .precision(cli.precision)
        .luminance_threshold(cli.threshold)
        .build()?;

    let mut renderer = HeatMapRenderer::new(options);
    let rendered = renderer.render(table.content(columns));
    if cli.strict && !rendered.report.is_clean() {
        return Err(format!(
            "{} cells could not be colored, first: {}",
            rendered.report.errors.len(),
            rendered.report.errors[0]
        )
        .into());
    }

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    write_output(cli.format, &table, &rendered.content.cells, out)?;
    Ok(())
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {:?}: {}", e, e);
            return ExitCode::FAILURE;
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_range() {
        let cli = Cli::try_parse_from(["heatmap", "grades.csv", "--precision", "15"]).unwrap();
        assert_eq!(cli.precision, 15);
        assert!(Cli::try_parse_from(["heatmap", "grades.csv", "--precision", "16"]).is_err());
        assert!(Cli::try_parse_from(["heatmap", "grades.csv", "--precision", "400"]).is_err());
    }
}

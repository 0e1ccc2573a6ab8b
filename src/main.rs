use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use menuscrape_core::{COLUMNS, Config, MenuOutcome, MenuRecord, MenuScraper, ScrapeError};
use menuscrape_fetch::validate_target_url;

const TABLE_CELL_MAX: usize = 40;

#[derive(Debug, Parser)]
#[command(name = "menuscrape", version, about = "Scrape a restaurant menu into flat records")]
struct Cli {
    /// Config file (default: $MENUSCRAPE_CONFIG or config/default.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also write the records to the output directory
    #[arg(long)]
    save: bool,

    /// How to print records on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Output directory for --save, overriding the config
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Restaurant page URL
    url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// An error paired with the process exit code it maps to.
#[derive(Debug)]
struct Failure {
    code: u8,
    error: anyhow::Error,
}

impl Failure {
    fn input(error: impl Into<anyhow::Error>) -> Self {
        Self {
            code: 2,
            error: error.into(),
        }
    }

    fn output(error: io::Error) -> Self {
        Self {
            code: 1,
            error: anyhow::Error::new(error).context("failed to write output"),
        }
    }
}

impl From<ScrapeError> for Failure {
    fn from(e: ScrapeError) -> Self {
        Self {
            code: scrape_exit_code(&e),
            error: e.into(),
        }
    }
}

fn scrape_exit_code(e: &ScrapeError) -> u8 {
    match e {
        ScrapeError::Transport(_) => 3,
        ScrapeError::NotFound(_) => 4,
        ScrapeError::Schema(_) => 5,
        ScrapeError::Save(_) => 6,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_subscriber();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("error: {:#}", failure.error);
            ExitCode::from(failure.code)
        }
    }
}

async fn run(cli: Cli) -> Result<(), Failure> {
    let config_path = resolve_config_path(cli.config.as_deref());
    let mut config = Config::load(&config_path).map_err(Failure::input)?;
    if let Some(dir) = cli.output {
        config.output.dir = dir;
    }
    config.validate().map_err(Failure::input)?;
    tracing::debug!(config = %config_path.display(), target = %config.target_domain, "configuration loaded");

    let url = cli.url.trim();
    validate_target_url(url, &config.target_domain).map_err(Failure::input)?;

    let scraper = MenuScraper::from_config(&config)
        .context("failed to build HTTP client")
        .map_err(Failure::input)?;
    let outcome = scraper.get_menu(url, cli.save).await?;

    if let Some(path) = &outcome.saved_to {
        eprintln!("saved {} records to {}", outcome.records.len(), path.display());
    }
    if outcome.is_empty() {
        eprintln!("no menu items found for {}", outcome.restaurant);
    }
    if outcome.excluded > 0 {
        eprintln!("skipped {} items without a name", outcome.excluded);
    }

    print_outcome(&outcome, cli.format).map_err(Failure::output)
}

fn print_outcome(outcome: &MenuOutcome, format: OutputFormat) -> io::Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    match format {
        OutputFormat::Table => {
            if !outcome.is_empty() {
                write_table(&mut out, &outcome.records)?;
            }
        }
        OutputFormat::Csv => menuscrape_core::csv::write_records(&mut out, &outcome.records)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &outcome.records)?;
            writeln!(out)?;
        }
    }
    out.flush()
}

fn table_cell(value: &str) -> String {
    let flat: String = value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() > TABLE_CELL_MAX {
        let mut cut: String = flat.chars().take(TABLE_CELL_MAX - 1).collect();
        cut.push('…');
        cut
    } else {
        flat
    }
}

fn write_table<W: Write>(out: &mut W, records: &[MenuRecord]) -> io::Result<()> {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| r.cells().iter().map(|c| table_cell(c)).collect())
        .collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = COLUMNS.iter().map(|c| (*c).to_owned()).collect();
    write_table_row(out, &header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_table_row(out, &rule, &widths)?;
    for row in &rows {
        write_table_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_table_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_config_path(flag: Option<&std::path::Path>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("MENUSCRAPE_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}

//! xlmerge - merge spreadsheets on their common columns

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use xlmerge::batch::{run_batch, Report};
use xlmerge::config::{Config, OutputFormat, DEFAULT_SHEET_NAME, DOWNLOAD_FILE_NAME};
use xlmerge::loader::SourceFile;
use xlmerge::output::render_to_stdout;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Merge spreadsheet files on the columns they all share
#[derive(Parser, Debug)]
#[command(name = "xlmerge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Spreadsheet files to merge (xlsx, xlsm, xls, ods)
    files: Vec<PathBuf>,

    /// Where to write the merged workbook
    #[arg(short, long, default_value = DOWNLOAD_FILE_NAME)]
    output: PathBuf,

    /// Which sheet to read from each file (defaults to the first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Name of the sheet in the merged workbook
    #[arg(long, default_value = DEFAULT_SHEET_NAME)]
    sheet_name: String,

    /// Report format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Rows of the merged table to preview
    #[arg(long, default_value_t = 10)]
    preview: usize,

    /// Merge even when only one file is given
    #[arg(long)]
    allow_single: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1), // Nothing merged
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let mut config = Config::new(cli.output)
        .with_output_sheet_name(cli.sheet_name)
        .with_output_format(cli.format.into())
        .with_preview_rows(cli.preview)
        .with_allow_single(cli.allow_single);
    if let Some(sheet) = cli.sheet {
        config = config.with_sheet_name(sheet);
    }

    let files = cli
        .files
        .iter()
        .map(|path| SourceFile::from_path(path))
        .collect::<Result<Vec<_>, _>>()?;

    let report = run_batch(&files, &config).context("Failed to merge files")?;

    if let Report::Merged { ref bytes, .. } = report {
        std::fs::write(&config.output_file, bytes).with_context(|| {
            format!("Failed to write merged file: {}", config.output_file.display())
        })?;
    }

    render_to_stdout(&report, &config)?;

    Ok(report.is_success())
}

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use f1_report_tables::{
    ExtractError, ExtractOptions, HeaderRepair, PageSelection, ReportKind, ReportTable,
    parse_report, write_csv, write_csv_to_string, write_json_to_string,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "f1tables",
    version,
    about = "Extract tables from FIA Formula 1 report PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse one report PDF and write its rows.
    Extract(ExtractArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportArg {
    Driver,
    Constructor,
    PitStops,
}

impl From<ReportArg> for ReportKind {
    fn from(value: ReportArg) -> Self {
        match value {
            ReportArg::Driver => Self::DriverChampionship,
            ReportArg::Constructor => Self::ConstructorChampionship,
            ReportArg::PitStops => Self::PitStops,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Input PDF path.
    #[arg(short, long)]
    input: PathBuf,

    /// Report type the PDF contains.
    #[arg(short, long, value_enum)]
    report: ReportArg,

    /// Output path; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Page selection like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// CSV delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Treat the detector's header row as a real header and drop it.
    #[arg(long)]
    trust_detector_header: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_options(args: &ExtractArgs) -> Result<ExtractOptions> {
    let pages = args
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .map_err(ExtractError::InvalidPageSelection)
        .context("failed to parse --pages")?;

    Ok(ExtractOptions {
        pages,
        header_repair: args
            .trust_detector_header
            .then_some(HeaderRepair::TrustDetector),
        ..ExtractOptions::default()
    })
}

fn delimiter(args: &ExtractArgs) -> Result<u8> {
    u8::try_from(args.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow!("delimiter must be a single ASCII character"))
}

fn write_output(args: &ExtractArgs, table: &ReportTable) -> Result<()> {
    let delimiter = delimiter(args)?;
    match (&args.output, args.format) {
        (Some(path), OutputFormat::Csv) => write_csv(path, table, delimiter)
            .with_context(|| format!("failed to write '{}'", path.display())),
        (Some(path), OutputFormat::Json) => {
            let json = write_json_to_string(table)?;
            std::fs::write(path, json)
                .with_context(|| format!("failed to write '{}'", path.display()))
        }
        (None, format) => {
            let rendered = match format {
                OutputFormat::Csv => write_csv_to_string(table, delimiter)?,
                OutputFormat::Json => write_json_to_string(table)? + "\n",
            };
            std::io::stdout()
                .lock()
                .write_all(rendered.as_bytes())
                .context("failed to write to stdout")
        }
    }
}

fn run_extract(args: &ExtractArgs) -> Result<ReportTable> {
    let options = parse_options(args)?;
    let kind = ReportKind::from(args.report);
    let table = parse_report(&args.input, kind, &options)
        .with_context(|| format!("failed to parse {kind} report"))?;
    write_output(args, &table)?;
    Ok(table)
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "f1_report_tables=debug"
    } else {
        "f1_report_tables=warn"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => {
            init_tracing(args.verbose);
            match run_extract(&args) {
                Ok(table) if table.is_empty() => {
                    eprintln!("warning: no rows parsed from '{}'", args.input.display());
                    ExitCode::from(2)
                }
                Ok(_) => ExitCode::SUCCESS,
                Err(error) => {
                    eprintln!("error: {error:#}");
                    ExitCode::from(1)
                }
            }
        }
    }
}

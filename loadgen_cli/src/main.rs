//! # Loadgen CLI
//!
//! Command-line front end for loadgen_core: converts a joint load workbook
//! into a SACS Datagen deck, writes the sample workbook, and shows how the
//! header row was understood.
//!
//! ```sh
//! loadgen template -o SACS_Load_Sample.xlsx
//! loadgen columns my_loads.xlsx
//! loadgen convert my_loads.xlsx -o sacs_output.txt --report-unparseable
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use loadgen_core::convert::describe_columns;
use loadgen_core::sacs::resolve_columns;
use loadgen_core::workbook::TEMPLATE_FILE_NAME;
use loadgen_core::{
    convert, load_settings, read_workbook, write_artifacts, write_template, Conversion, ConvertSettings, GenError,
    UnparseablePolicy,
};

const DEFAULT_OUTPUT_NAME: &str = "sacs_output.txt";
const DEFAULT_LOG_NAME: &str = "rounding_log.txt";

/// Convert joint load spreadsheets into SACS load cards
#[derive(Parser, Debug)]
#[command(name = "loadgen", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Show debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a workbook to a SACS load deck
    Convert(ConvertArgs),

    /// Write the sample workbook to fill in
    Template {
        /// Where to write the workbook
        #[arg(short, long, value_name = "OUTPUT", default_value = TEMPLATE_FILE_NAME)]
        output: PathBuf,
    },

    /// Show which header each load field was matched to
    Columns(SourceArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Workbook to read (xlsx, xls, xlsb, ods)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Worksheet to read instead of the first one
    #[arg(long)]
    sheet: Option<String>,

    /// JSON settings file
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Load deck to write [default: sacs_output.txt next to INPUT]
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Rounding log to write [default: rounding_log.txt next to INPUT]
    #[arg(long, value_name = "LOG")]
    log: Option<PathBuf>,

    /// Warn about and log cells that are not numbers
    #[arg(long)]
    report_unparseable: bool,

    /// Print the conversion report as JSON
    #[arg(long)]
    json: bool,
}

impl SourceArgs {
    /// Settings file (if any) with command-line overrides applied
    fn settings(&self) -> Result<ConvertSettings> {
        let mut settings = match &self.settings {
            Some(path) => load_settings(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => ConvertSettings::default(),
        };
        if let Some(sheet) = &self.sheet {
            settings = settings.with_sheet(sheet.clone());
        }
        Ok(settings)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(err) = e.downcast_ref::<GenError>() {
                if err.is_input_error() {
                    eprintln!("Hint: run `loadgen template` for a workbook with the expected headers");
                }
                if let Ok(json) = serde_json::to_string_pretty(err) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info,loadgen_core=debug" } else { "warn" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Convert(args) => run_convert(args),
        Command::Template { output } => {
            write_template(&output)?;
            println!("Wrote sample workbook to {}", output.display());
            Ok(())
        }
        Command::Columns(source) => run_columns(source),
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let mut settings = args.source.settings()?;
    if args.report_unparseable {
        settings = settings.with_unparseable(UnparseablePolicy::Report);
    }
    debug!(?settings, "effective settings");

    let input = &args.source.input;
    let table = read_workbook(input, settings.sheet.as_deref())
        .with_context(|| format!("reading {}", input.display()))?;
    let result = convert(&table, &settings)?;

    let output = args.output.unwrap_or_else(|| sibling(input, DEFAULT_OUTPUT_NAME));
    let log = args.log.unwrap_or_else(|| sibling(input, DEFAULT_LOG_NAME));
    let written = write_artifacts(&result, &output, &log)?;

    if args.json {
        let report = serde_json::json!({
            "summary": result.summary,
            "rounding_log": result.rounding_log,
            "unparseable": result.unparseable,
            "written": written,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let summary = &result.summary;
    println!("═══════════════════════════════════════");
    println!("  SACS JOINT LOAD DECK");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:      {}", input.display());
    println!("Rows read:  {}", summary.rows);
    println!("Conditions: {}", summary.conditions);
    println!("Load cards: {}", summary.load_cards);
    println!("Skipped:    {} row(s) without Load ID or Joint Name", summary.skipped_rows);
    if summary.unparseable_values > 0 {
        println!("Non-numeric cells written as 0.0: {}", summary.unparseable_values);
    }
    if summary.truncated_lines > 0 {
        println!("Cards cut to 81 columns: {}", summary.truncated_lines);
    }
    println!();
    println!("Deck: {}", written.output.display());
    match &written.log {
        Some(path) => println!("Log:  {} ({})", path.display(), log_contents(&result)),
        None => println!("Log:  none (no values were rounded)"),
    }
    Ok(())
}

fn run_columns(source: SourceArgs) -> Result<()> {
    let settings = source.settings()?;
    let table = read_workbook(&source.input, settings.sheet.as_deref())
        .with_context(|| format!("reading {}", source.input.display()))?;
    let columns = resolve_columns(&table.headers, &settings.keywords()?)?;

    for (field, header) in describe_columns(&table, &columns) {
        println!("{:<15} <- {}", field.label(), header);
    }
    Ok(())
}

/// What the log file lists, e.g. "2 rounded value(s), 1 non-numeric cell(s)"
fn log_contents(result: &Conversion) -> String {
    let mut parts = vec![format!("{} rounded value(s)", result.rounding_log.len())];
    if !result.unparseable.is_empty() {
        parts.push(format!("{} non-numeric cell(s)", result.unparseable.len()));
    }
    parts.join(", ")
}

/// `name` in the same directory as `path`
fn sibling(path: &Path, name: &str) -> PathBuf {
    path.with_file_name(name)
}

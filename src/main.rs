// src/main.rs
mod utils;
mod workbook;
mod extractors;
mod storage;

use std::path::Path;

use clap::{Parser, Subcommand};
use serde::Serialize;
use utils::AppError;
use workbook::{WorkbookSource, Worksheet};
use extractors::{extract_author_sheets, extract_journal_catalog};
use storage::{AuthorSnapshot, StorageManager};

const DEFAULT_AUTHORS_WORKBOOK: &str = "static/uploads/Array Research Author Positions (2).xlsx";
const DEFAULT_JOURNALS_WORKBOOK: &str = "static/uploads/journals.xlsx";

/// Extracts author-position tables and journal listings from spreadsheets
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output directory for snapshots and debug dumps
    #[arg(short, long, default_value = "./output", global = true)]
    output_dir: String,

    /// Debug mode - dump every worksheet with its row classification
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the author-position tables of every worksheet as JSON
    Authors {
        /// Workbook path or http(s) export URL
        #[arg(short, long, env = "AUTHORS_WORKBOOK", default_value = DEFAULT_AUTHORS_WORKBOOK)]
        source: String,
    },

    /// Print the journal records of every worksheet as JSON
    Journals {
        /// Workbook path or http(s) export URL
        #[arg(short, long, env = "JOURNALS_WORKBOOK", default_value = DEFAULT_JOURNALS_WORKBOOK)]
        source: String,
    },

    /// Replace the stored author snapshot with a fresh extraction
    Migrate {
        /// Workbook path or http(s) export URL
        #[arg(short, long, env = "AUTHORS_WORKBOOK", default_value = DEFAULT_AUTHORS_WORKBOOK)]
        source: String,

        /// Also refresh the journal catalog from this workbook
        #[arg(long)]
        journals: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments (the debug flag decides the default log level)
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.debug);
    tracing::info!("Starting processing for args: {:?}", args);

    match &args.command {
        Command::Authors { source } => {
            let source = parse_source(source)?;
            let worksheets = load_sheets(&args, &source, "authors").await;
            let sheets = extract_author_sheets(&worksheets);

            let table_count: usize = sheets.iter().map(|s| s.tables.len()).sum();
            tracing::info!("Extracted {} table(s) from {} sheet(s)", table_count, sheets.len());
            print_json(&sheets)?;
        }
        Command::Journals { source } => {
            let source = parse_source(source)?;
            let worksheets = load_sheets(&args, &source, "journals").await;
            let catalog = extract_journal_catalog(&worksheets);

            for (sheet, records) in catalog.iter() {
                tracing::info!("Sheet '{}': {} journal(s)", sheet, records.len());
            }
            print_json(&catalog)?;
        }
        Command::Migrate { source, journals } => {
            let storage = StorageManager::new(&args.output_dir)?;

            let source = parse_source(source)?;
            let worksheets = load_sheets(&args, &source, "authors").await;
            if worksheets.is_empty() {
                tracing::warn!("No worksheets loaded from {}; the snapshot will be empty", source);
            }
            let snapshot = AuthorSnapshot::from_sheets(&extract_author_sheets(&worksheets));

            storage.replace_author_snapshot(&snapshot)?;
            storage.save_snapshot_metadata(&snapshot, &source)?;

            if let Some(journals) = journals {
                let journals_source = parse_source(journals)?;
                let worksheets = load_sheets(&args, &journals_source, "journals").await;
                let catalog = extract_journal_catalog(&worksheets);
                if catalog.is_empty() {
                    tracing::warn!("No journal sheets loaded from {}", journals_source);
                }
                storage.save_journal_catalog(&catalog)?;
            }

            tracing::info!("Migration completed into {}", storage.base_dir().display());
        }
    }

    Ok(())
}

fn parse_source(raw: &str) -> Result<WorkbookSource, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::Config("Workbook source must not be empty".to_string()));
    }
    Ok(WorkbookSource::parse(raw))
}

/// Loads a workbook and, in debug mode, dumps its classified rows.
/// A failing dump is logged and does not stop the run.
async fn load_sheets(args: &Args, source: &WorkbookSource, label: &str) -> Vec<Worksheet> {
    let worksheets = workbook::load_worksheets(source).await;

    if args.debug && !worksheets.is_empty() {
        let debug_dir = Path::new(&args.output_dir).join("debug").join(label);
        match utils::grid_debug::save_debug_grids(&worksheets, &debug_dir) {
            Ok(paths) => tracing::info!("Wrote {} debug grid(s) to {}", paths.len(), debug_dir.display()),
            Err(e) => tracing::warn!("Failed to write debug grids: {}", e),
        }
    }

    worksheets
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    std::io::Write::write_all(&mut handle, b"\n")?;
    Ok(())
}

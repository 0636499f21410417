//! `las-inspect`: print a LAS file's metadata and channels, derive SWIRR/PHIE, and write
//! CSV or plot JSON.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use las_data_processing::IngestionResult;
use las_data_processing::export::{DEFAULT_PLOT_TRACKS, ExportOptions, export_csv_to_path};
use las_data_processing::ingestion::{IngestionOptions, TracingObserver};
use las_data_processing::las::ParseOptions;
use las_data_processing::processing::{head, petrophysics, summarize_all};
use las_data_processing::session::Session;

#[derive(Parser, Debug)]
#[command(name = "las-inspect", version, about)]
struct Cli {
    /// LAS file to load.
    file: PathBuf,

    /// Derive SWIRR and PHIE from SW, BVW and PHIF.
    #[arg(long)]
    derive: bool,

    /// Write the curve table as CSV.
    #[arg(long, value_name = "OUT")]
    csv: Option<PathBuf>,

    /// Write `NAME (UNIT)` CSV headers.
    #[arg(long)]
    units: bool,

    /// Write plot series as JSON.
    #[arg(long = "plot-json", value_name = "OUT")]
    plot_json: Option<PathBuf>,

    /// Curves to include in the plot JSON (defaults to KLOGH,PHIF,SAND_FLAG,SW,VSH).
    #[arg(long, value_delimiter = ',')]
    tracks: Vec<String>,

    /// Print the first N rows.
    #[arg(long, value_name = "N")]
    head: Option<usize>,

    /// Override the file's NULL sentinel.
    #[arg(long = "null", value_name = "V", allow_hyphen_values = true)]
    null_value: Option<f64>,

    /// Decode non-UTF-8 input as Latin-1.
    #[arg(long)]
    latin1: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Priority: RUST_LOG env var > --debug > "info".
fn init_logging(debug_flag: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, path = %cli.file.display(), "las-inspect failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> IngestionResult<()> {
    let options = IngestionOptions {
        parse: ParseOptions {
            null_value: cli.null_value,
            latin1_fallback: cli.latin1,
        },
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };

    let mut session = Session::new();
    let log = session.load_path(&cli.file, &options)?;
    let doc = &log.document;

    println!("file:    {}", cli.file.display());
    println!("version: {}", doc.version_string().unwrap_or("-"));
    println!("well:    {}", doc.well_name().unwrap_or("-"));
    println!("null:    {}", doc.null_value);
    println!(
        "rows:    {} ({} skipped)",
        doc.row_count(),
        doc.skipped_row_count()
    );

    if cli.derive {
        for err in session.derive(&petrophysics::standard_specs())? {
            println!("derive:  {err}");
        }
    }

    let Some(store) = session.store() else {
        return Ok(());
    };

    println!();
    println!(
        "{:<12} {:<8} {:>8} {:>8} {:>12} {:>12} {:>12}",
        "CURVE", "UNIT", "SAMPLES", "VALID", "MIN", "MAX", "MEAN"
    );
    for s in summarize_all(store) {
        println!(
            "{:<12} {:<8} {:>8} {:>8} {:>12} {:>12} {:>12}",
            s.name,
            s.unit,
            s.samples,
            s.valid,
            fmt_stat(s.min),
            fmt_stat(s.max),
            fmt_stat(s.mean)
        );
    }

    if let Some(n) = cli.head {
        let top = head(store, n);
        println!();
        println!("{}", top.curve_names().collect::<Vec<_>>().join("\t"));
        for pos in 0..top.len() {
            if let Some(row) = top.row(pos) {
                let cells: Vec<String> = row.iter().map(f64::to_string).collect();
                println!("{}", cells.join("\t"));
            }
        }
    }

    if let Some(out) = &cli.csv {
        let export = ExportOptions {
            include_units: cli.units,
            ..ExportOptions::default()
        };
        let rows = export_csv_to_path(store, out, &export)?;
        println!("wrote {rows} rows to {}", out.display());
    }

    if let Some(out) = &cli.plot_json {
        let names: Vec<&str> = if cli.tracks.is_empty() {
            DEFAULT_PLOT_TRACKS.to_vec()
        } else {
            cli.tracks.iter().map(String::as_str).collect()
        };
        let selection = session.select_for_plot(&names)?;
        for name in &selection.missing {
            tracing::warn!(curve = %name, "plot track not found");
        }
        let file = File::create(out)?;
        selection.write_json(BufWriter::new(file))?;
        println!("wrote {} tracks to {}", selection.tracks.len(), out.display());
    }

    Ok(())
}

fn fmt_stat(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

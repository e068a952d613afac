//! profile-lens command line front end
//!
//! Loads a profile from disk or uploads a dataset to the profiling backend,
//! prints the summary tiles and writes the exports.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use profile_lens::client::{ClientConfig, ProfilerClient};
use profile_lens::export::{CsvExporter, ExportConfig, JsonExporter, MarkdownExporter, RowExporter};
use profile_lens::histogram::HistogramSeries;
use profile_lens::logging::setup::{init_logging, LoggingConfig};
use profile_lens::profile::Profile;
use profile_lens::session::{Completion, ProfileSession};
use profile_lens::view::ProfileView;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["profile", "upload"])))]
struct Args {
    /// Profile document (JSON) produced by the profiling backend
    #[arg(long, value_name = "JSON")]
    profile: Option<PathBuf>,

    /// Dataset (.csv or .parquet) to upload for profiling
    #[arg(long, value_name = "FILE")]
    upload: Option<PathBuf>,

    /// Upload endpoint of the profiling backend (falls back to PROFILE_LENS_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Directory to write profile.json and column_profile.csv into
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Also write the details table as Markdown
    #[arg(long)]
    markdown: bool,

    /// Write CSV fields without quoting
    #[arg(long)]
    verbatim_csv: bool,

    /// Pretty-print the JSON export
    #[arg(long)]
    pretty: bool,

    /// Print the histogram of this column
    #[arg(long, value_name = "COLUMN")]
    histogram: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let crate_level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    init_logging(
        LoggingConfig::default()
            .with_level(Level::WARN)
            .with_crate_level(crate_level)
            .with_json_format(args.json_logs),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let mut session = ProfileSession::new();
    if let Some(path) = &args.profile {
        session.replace(load_profile(path)?);
    } else if let Some(path) = &args.upload {
        let mut config = ClientConfig::from_env();
        if let Some(endpoint) = &args.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        let client = ProfilerClient::new(config)?;

        let ticket = session.begin_upload();
        tracing::info!(
            generation = ticket.generation(),
            endpoint = client.endpoint(),
            file = %path.display(),
            "Uploading dataset"
        );
        let outcome = client.upload_file(path).await;
        let error = outcome.as_ref().err().map(|e| e.to_string());
        if session.complete(ticket, outcome) == Completion::Stale {
            bail!("Upload was superseded");
        }
        if let Some(error) = error {
            bail!("Upload of {} failed: {error}", path.display());
        }
    }

    let view = session.view();
    print_summary(&view);

    if let Some(column) = &args.histogram {
        print_histogram(&view.histogram(column));
    }

    if let Some(dir) = &args.out_dir {
        let mut config = ExportConfig::default().with_pretty_json(args.pretty);
        if args.verbatim_csv {
            config = config.with_csv_quoting(ExportConfig::verbatim().csv_quoting);
        }
        write_exports(&view, &config, dir, args.markdown)?;
    }

    Ok(())
}

fn load_profile(path: &Path) -> Result<Profile> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Profile::from_json(&body).with_context(|| format!("Invalid profile in {}", path.display()))
}

fn print_summary(view: &ProfileView) {
    let summary = &view.summary;
    println!("Rows:     {}", summary.row_count);
    println!("Columns:  {}", summary.column_count);
    println!("Nulls:    {}", summary.total_nulls);
    println!("Null %:   {}", summary.null_percentage_display());

    if !view.type_distribution.is_empty() {
        println!();
        println!("Types:");
        for entry in &view.type_distribution {
            println!("  {:<16} {}", entry.data_type, entry.count);
        }
    }

    let columns: Vec<&str> = view.histogram_columns().collect();
    if !columns.is_empty() {
        println!();
        println!("Histograms: {}", columns.join(", "));
    }
}

fn print_histogram(series: &HistogramSeries) {
    match series {
        HistogramSeries::Available(bins) => {
            println!();
            for bin in bins {
                println!("  {:>16}  {}", bin.bin_label, bin.count);
            }
        }
        HistogramSeries::Unavailable { column } => {
            println!();
            println!("No histogram available for '{column}'");
        }
    }
}

fn write_exports(
    view: &ProfileView,
    config: &ExportConfig,
    dir: &Path,
    markdown: bool,
) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut exporters: Vec<Box<dyn RowExporter>> = vec![
        Box::new(JsonExporter::with_config(config)),
        Box::new(CsvExporter::with_config(config)),
    ];
    if markdown {
        exporters.push(Box::new(MarkdownExporter::new().with_title("Column Details")));
    }

    for exporter in exporters {
        let path = exporter.artifact(&view.rows)?.write_into(dir)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

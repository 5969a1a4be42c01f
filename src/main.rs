use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use jemallocator::Jemalloc;
use pizza_metrics::{
    logging,
    processor::{ParsePolicy, ProcessorError, loader::load_orders, metrics::run_metrics},
};
use tracing::{error, warn};

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

const USAGE: &str = "Usage: pizza-metrics <csvFilePath> <metric1> <metric2> ...";

const METRIC_HELP: &str = "\
Metric codes:
  pms   most ordered pizza
  pls   least ordered pizza
  dms   date with the most revenue
  dls   date with the least revenue
  dmsp  date with the most sold pizzas
  dlsp  date with the least sold pizzas
  apo   average ordered pizzas per order
  apd   average ordered pizzas per day
  ims   most ordered ingredient
  hp    most ordered pizza category";

#[derive(Parser, Debug)]
/// Reports sales metrics from a CSV export of pizza orders.
#[command(version, after_help = METRIC_HELP)]
struct Args {
    /// Fail on the first row that cannot be parsed instead of skipping it
    #[arg(long)]
    strict: bool,
    /// Path to the CSV sales data file
    csv: Option<PathBuf>,
    /// Metric codes, reported in the order given
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    metrics: Vec<String>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::init();

    let csv = match (&args.csv, args.metrics.is_empty()) {
        (Some(csv), false) => csv,
        _ => {
            println!("{USAGE}");
            return Ok(ExitCode::SUCCESS);
        }
    };

    let policy = if args.strict {
        ParsePolicy::Abort
    } else {
        ParsePolicy::Skip
    };

    let summary = match load_orders(csv, policy) {
        Ok(summary) => summary,
        Err(ProcessorError::FileNotFound(path)) => {
            println!("File '{}' not found.", path.display());
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            error!("Error parsing CSV file: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if summary.records.is_empty() {
        warn!(path = %csv.display(), "No order line items loaded, nothing to report");
        return Ok(ExitCode::SUCCESS);
    }

    let mut out = std::io::stdout().lock();
    for outcome in run_metrics(&summary.records, &args.metrics) {
        if outcome.is_printable() {
            writeln!(out, "{outcome}").context("writing report")?;
        } else {
            error!("{outcome}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

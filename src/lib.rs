//! # pizza-metrics
//!
//! `pizza-metrics` loads a CSV export of pizza-order line items and answers a fixed
//! set of business questions about it. It supports:
//!
//! - Memory-mapped CSV loading with columns resolved by header name
//! - Typed line items with a field accessor (no stringly-typed lookups)
//! - Group-by aggregation: largest group, smallest group, mean of group sums
//! - Ingredient popularity over the comma-separated ingredient lists
//! - A catalog of short metric codes rendering one sentence each
//!
//! # Metrics
//!
//! | code | answer |
//! |------|--------|
//! | `pms` / `pls` | most / least ordered pizza |
//! | `dms` / `dls` | date with the most / least revenue |
//! | `dmsp` / `dlsp` | date with the most / least sold pizzas |
//! | `apo` / `apd` | average pizzas per order / per day |
//! | `ims` | most ordered ingredient |
//! | `hp` | most ordered pizza category |
//!
//! # Example
//!
//! ```no_run
//! use pizza_metrics::processor::{ParsePolicy, loader::load_orders, metrics::run_metrics};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = load_orders(Path::new("pizza_sales.csv"), ParsePolicy::Skip)?;
//!
//!     for outcome in run_metrics(&summary.records, ["pms", "dms", "apo"]) {
//!         println!("{}", outcome);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod processor;

pub use processor::{
    AggregateMode, Aggregation, LoadSummary, ParsePolicy, ProcessorError,
    metrics::{Metric, MetricOutcome},
    order::{Field, OrderLineItem},
};

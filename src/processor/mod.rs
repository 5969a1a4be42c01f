use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub mod aggregator;
pub mod loader;
pub mod metrics;
pub mod order;

/// Error type used across the crate
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Schema/parse error: {0}")]
    Parse(String),

    #[error("Invalid row: {0}")]
    InvalidRow(ParseError),

    #[error("Command '{0}' not found.")]
    UnknownMetric(String),

    #[error("no records to aggregate")]
    EmptyInput,

    #[error("cannot average over zero groups")]
    DivisionByZero,
}

/// Outcome of a load: the parsed records plus every row that was rejected
#[derive(Debug)]
pub struct LoadSummary {
    pub records: Vec<order::OrderLineItem>,
    pub rows_processed: usize,
    pub errors: Vec<ParseError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Line number in the file, header is line 1
    pub row: usize,
    pub column: String,
    pub value: String,
    pub error: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, column '{}': cannot parse '{}' ({})",
            self.row, self.column, self.value, self.error
        )
    }
}

/// What the loader does with a row whose numeric columns do not parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Drop the row, log it and keep going
    #[default]
    Skip,
    /// Stop at the first bad row
    Abort,
}

/// Typed view of a single record field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// Integer field
    Int(i64),
    /// Float field
    Float(f64),
    /// Text field
    Text(&'a str),
}

impl Value<'_> {
    /// Numeric value of the field, `None` for text
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
        }
    }
}

/// How grouped sums are reduced to a single answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateMode {
    /// Group with the largest sum
    Most,
    /// Group with the smallest sum
    Least,
    /// Mean of the group sums
    Average,
}

/// Result of an aggregation
///
/// `key` is `None` for [`AggregateMode::Average`], which selects no group.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub key: Option<String>,
    pub value: f64,
}

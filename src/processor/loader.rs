use csv::{ReaderBuilder, StringRecord};
use memchr::memchr_iter;
use memmap2::Mmap;
use std::{fs::File, path::Path};
use tracing::{debug, info, warn};

use crate::processor::{
    LoadSummary, ParseError, ParsePolicy, ProcessorError,
    order::{Field, OrderLineItem},
};

/// Position of every required column in the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    positions: [usize; Field::ALL.len()],
}

impl ColumnIndex {
    /// Resolves columns by name, so header order does not matter.
    /// Columns that are not part of a line item are ignored.
    fn from_headers(headers: &StringRecord) -> Result<Self, ProcessorError> {
        let mut positions = [0; Field::ALL.len()];
        for (slot, field) in positions.iter_mut().zip(Field::ALL) {
            *slot = headers
                .iter()
                .position(|h| h == field.column_name())
                .ok_or_else(|| ProcessorError::MissingColumn(field.column_name().to_string()))?;
        }
        Ok(ColumnIndex { positions })
    }

    fn text<'r>(&self, record: &'r StringRecord, field: Field) -> &'r str {
        record
            .get(self.positions[field as usize])
            .unwrap_or_default()
    }

    fn float(&self, record: &StringRecord, field: Field, row: usize) -> Result<f64, ParseError> {
        let raw = self.text(record, field);
        fast_float::parse::<f64, _>(raw.trim()).map_err(|e| ParseError {
            row,
            column: field.column_name().to_string(),
            value: raw.to_string(),
            error: e.to_string(),
        })
    }

    /// Integer columns may be written as "2" or "2.0"; the fraction is truncated.
    fn int(&self, record: &StringRecord, field: Field, row: usize) -> Result<i64, ParseError> {
        self.float(record, field, row).map(|v| v.trunc() as i64)
    }

    fn parse_row(&self, record: &StringRecord, row: usize) -> Result<OrderLineItem, ParseError> {
        Ok(OrderLineItem {
            pizza_id: self.int(record, Field::PizzaId, row)?,
            order_id: self.text(record, Field::OrderId).to_string(),
            pizza_name_id: self.text(record, Field::PizzaNameId).to_string(),
            quantity: self.int(record, Field::Quantity, row)?,
            order_date: self.text(record, Field::OrderDate).to_string(),
            order_time: self.text(record, Field::OrderTime).to_string(),
            unit_price: self.float(record, Field::UnitPrice, row)?,
            total_price: self.float(record, Field::TotalPrice, row)?,
            pizza_size: self.text(record, Field::PizzaSize).to_string(),
            pizza_category: self.text(record, Field::PizzaCategory).to_string(),
            pizza_ingredients: self.text(record, Field::PizzaIngredients).to_string(),
            pizza_name: self.text(record, Field::PizzaName).to_string(),
        })
    }
}

/// Loads every order line item of a CSV file into memory
///
/// The file is memory mapped and parsed in a single pass. Columns are matched
/// by header name. Rows whose numeric columns cannot be parsed are handled
/// according to `policy`.
///
/// # Errors
/// Returns a [`ProcessorError`] if:
/// - the file does not exist ([`ProcessorError::FileNotFound`])
/// - the file cannot be opened, mapped or tokenized as CSV
/// - a required column is missing from the header
/// - a row fails to parse and `policy` is [`ParsePolicy::Abort`]
///
/// # Example
/// ```no_run
/// # use pizza_metrics::processor::{ParsePolicy, loader::load_orders};
/// let summary = load_orders("pizza_sales.csv".as_ref(), ParsePolicy::Skip).unwrap();
/// println!("{} line items", summary.records.len());
/// ```
pub fn load_orders(path: &Path, policy: ParsePolicy) -> Result<LoadSummary, ProcessorError> {
    if !path.exists() {
        return Err(ProcessorError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Err(ProcessorError::Parse("Missing header line".into()));
    }
    let mmap = unsafe { Mmap::map(&file)? };
    let buf: &[u8] = &mmap[..];

    // One line per record is the common case; quoted newlines only over-reserve
    let estimated_rows = memchr_iter(b'\n', buf).count();

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(buf);
    let columns = ColumnIndex::from_headers(reader.headers()?)?;
    debug!(?columns, estimated_rows, "Resolved header");

    let mut records = Vec::with_capacity(estimated_rows);
    let mut errors = Vec::new();
    let mut rows_processed = 0;

    for result in reader.records() {
        let record = result?;
        rows_processed += 1;
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(rows_processed + 1);

        match columns.parse_row(&record, row) {
            Ok(item) => records.push(item),
            Err(e) => match policy {
                ParsePolicy::Skip => {
                    warn!("Skipping {}", e);
                    errors.push(e);
                }
                ParsePolicy::Abort => return Err(ProcessorError::InvalidRow(e)),
            },
        }
    }

    info!(
        path = %path.display(),
        rows_processed,
        loaded = records.len(),
        skipped = errors.len(),
        "Loaded order line items"
    );

    Ok(LoadSummary {
        records,
        rows_processed,
        errors,
    })
}

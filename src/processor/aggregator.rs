use std::collections::HashMap;
use tracing::debug;

use crate::processor::{
    AggregateMode, Aggregation, ProcessorError,
    order::{Field, OrderLineItem},
};

/// Sums `reduce` per distinct value of `group`
///
/// Group keys are the text form of the grouping field. A non-numeric `reduce`
/// field contributes nothing, so every group totals zero.
pub fn group_totals(
    records: &[OrderLineItem],
    group: Field,
    reduce: Field,
) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for item in records {
        let entry = totals.entry(item.field(group).to_string()).or_insert(0.0);
        if let Some(v) = item.field(reduce).as_number() {
            *entry += v;
        }
    }
    totals
}

/// Group-by aggregation over the loaded line items
///
/// # Arguments
/// * `group` - Field whose values form the groups
/// * `reduce` - Field summed within each group
/// * `mode` - How the group sums are reduced to one answer
///
/// # Returns
/// The winning group and its sum for [`AggregateMode::Most`] and
/// [`AggregateMode::Least`], or the mean of all group sums (no key) for
/// [`AggregateMode::Average`]. Equal sums resolve to the lexicographically
/// smallest key.
///
/// # Errors
/// [`ProcessorError::EmptyInput`] for most/least over no records,
/// [`ProcessorError::DivisionByZero`] for an average over no records.
///
/// # Example
/// ```rust
/// # use pizza_metrics::processor::{AggregateMode, aggregator::aggregate, order::Field};
/// let top = aggregate(&[], Field::PizzaName, Field::Quantity, AggregateMode::Most);
/// assert!(top.is_err());
/// ```
pub fn aggregate(
    records: &[OrderLineItem],
    group: Field,
    reduce: Field,
    mode: AggregateMode,
) -> Result<Aggregation, ProcessorError> {
    let totals = group_totals(records, group, reduce);
    debug!(
        group = group.name(),
        reduce = reduce.name(),
        ?mode,
        groups = totals.len(),
        "Grouped line items"
    );
    select(totals, mode)
}

/// Ingredient with the most pizzas ordered
///
/// Every occurrence of an ingredient in a line item's list counts that line
/// item's quantity once, so an ingredient listed twice counts twice.
pub fn most_ordered_ingredient(
    records: &[OrderLineItem],
) -> Result<Aggregation, ProcessorError> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for item in records {
        let quantity = item.field(Field::Quantity).as_number().unwrap_or(0.0);
        for ingredient in item.ingredients() {
            *totals.entry(ingredient.to_string()).or_insert(0.0) += quantity;
        }
    }
    debug!(ingredients = totals.len(), "Counted ingredients");

    select(totals, AggregateMode::Most)
}

fn select(
    totals: HashMap<String, f64>,
    mode: AggregateMode,
) -> Result<Aggregation, ProcessorError> {
    let winner = match mode {
        AggregateMode::Most => totals
            .into_iter()
            .max_by(|(ka, va), (kb, vb)| va.total_cmp(vb).then_with(|| kb.cmp(ka))),
        AggregateMode::Least => totals
            .into_iter()
            .min_by(|(ka, va), (kb, vb)| va.total_cmp(vb).then_with(|| ka.cmp(kb))),
        AggregateMode::Average => {
            if totals.is_empty() {
                return Err(ProcessorError::DivisionByZero);
            }
            // Map iteration order is random, sorted sums keep the float total stable
            let mut sums: Vec<f64> = totals.into_values().collect();
            sums.sort_by(f64::total_cmp);
            let total: f64 = sums.iter().sum();
            return Ok(Aggregation {
                key: None,
                value: total / sums.len() as f64,
            });
        }
    };

    winner
        .map(|(key, value)| Aggregation {
            key: Some(key),
            value,
        })
        .ok_or(ProcessorError::EmptyInput)
}

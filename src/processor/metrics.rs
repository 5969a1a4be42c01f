use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::processor::{
    AggregateMode, Aggregation, ProcessorError,
    aggregator::{aggregate, most_ordered_ingredient},
    order::{Field, OrderLineItem},
};

/// Business metrics that can be requested by their short code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// `pms`
    MostOrderedPizza,
    /// `pls`
    LeastOrderedPizza,
    /// `dms`
    MostRevenueDay,
    /// `dls`
    LeastRevenueDay,
    /// `dmsp`
    MostPizzasDay,
    /// `dlsp`
    LeastPizzasDay,
    /// `apo`
    AveragePizzasPerOrder,
    /// `apd`
    AveragePizzasPerDay,
    /// `ims`
    MostOrderedIngredient,
    /// `hp`
    MostOrderedCategory,
}

/// How a metric is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricPlan {
    Grouped {
        group: Field,
        reduce: Field,
        mode: AggregateMode,
    },
    /// Quantities summed per ingredient of the ingredient list
    Ingredients,
}

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::MostOrderedPizza,
        Metric::LeastOrderedPizza,
        Metric::MostRevenueDay,
        Metric::LeastRevenueDay,
        Metric::MostPizzasDay,
        Metric::LeastPizzasDay,
        Metric::AveragePizzasPerOrder,
        Metric::AveragePizzasPerDay,
        Metric::MostOrderedIngredient,
        Metric::MostOrderedCategory,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Metric::MostOrderedPizza => "pms",
            Metric::LeastOrderedPizza => "pls",
            Metric::MostRevenueDay => "dms",
            Metric::LeastRevenueDay => "dls",
            Metric::MostPizzasDay => "dmsp",
            Metric::LeastPizzasDay => "dlsp",
            Metric::AveragePizzasPerOrder => "apo",
            Metric::AveragePizzasPerDay => "apd",
            Metric::MostOrderedIngredient => "ims",
            Metric::MostOrderedCategory => "hp",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Metric::MostOrderedPizza => "most ordered pizza",
            Metric::LeastOrderedPizza => "least ordered pizza",
            Metric::MostRevenueDay => "date with the most revenue",
            Metric::LeastRevenueDay => "date with the least revenue",
            Metric::MostPizzasDay => "date with the most sold pizzas",
            Metric::LeastPizzasDay => "date with the least sold pizzas",
            Metric::AveragePizzasPerOrder => "average ordered pizzas per order",
            Metric::AveragePizzasPerDay => "average ordered pizzas per day",
            Metric::MostOrderedIngredient => "most ordered ingredient",
            Metric::MostOrderedCategory => "most ordered pizza category",
        }
    }

    pub fn plan(self) -> MetricPlan {
        use AggregateMode::*;
        use Field::*;

        let (group, reduce, mode) = match self {
            Metric::MostOrderedPizza => (PizzaName, Quantity, Most),
            Metric::LeastOrderedPizza => (PizzaName, Quantity, Least),
            Metric::MostRevenueDay => (OrderDate, TotalPrice, Most),
            Metric::LeastRevenueDay => (OrderDate, TotalPrice, Least),
            Metric::MostPizzasDay => (OrderDate, Quantity, Most),
            Metric::LeastPizzasDay => (OrderDate, Quantity, Least),
            Metric::AveragePizzasPerOrder => (OrderId, Quantity, Average),
            Metric::AveragePizzasPerDay => (OrderDate, Quantity, Average),
            Metric::MostOrderedCategory => (PizzaCategory, Quantity, Most),
            Metric::MostOrderedIngredient => return MetricPlan::Ingredients,
        };
        MetricPlan::Grouped {
            group,
            reduce,
            mode,
        }
    }

    /// Runs the metric over the loaded line items
    pub fn evaluate(self, records: &[OrderLineItem]) -> Result<Aggregation, ProcessorError> {
        match self.plan() {
            MetricPlan::Grouped {
                group,
                reduce,
                mode,
            } => aggregate(records, group, reduce, mode),
            MetricPlan::Ingredients => most_ordered_ingredient(records),
        }
    }

    /// The sentence reported for a computed result
    pub fn render(self, result: &Aggregation) -> String {
        let key = result.key.as_deref().unwrap_or_default();
        // Figures round half away from zero, both whole numbers and cents
        let count = result.value.round();
        let dollars = (result.value * 100.0).round() / 100.0;

        match self {
            Metric::MostOrderedPizza => format!("The most ordered pizza is {key}."),
            Metric::LeastOrderedPizza => format!("The least ordered pizza is {key}."),
            Metric::MostRevenueDay => {
                format!("The date with the most revenue is {key} with a total of ${dollars:.2}.")
            }
            Metric::LeastRevenueDay => {
                format!("The date with the least revenue is {key} with a total of ${dollars:.2}.")
            }
            Metric::MostPizzasDay => {
                format!("The date with the most sold pizzas is {key} with a total of {count:.0}.")
            }
            Metric::LeastPizzasDay => {
                format!("The date with the least sold pizzas is {key} with a total of {count:.0}.")
            }
            Metric::AveragePizzasPerOrder => {
                format!("The average ordered pizzas per order is {count:.0}.")
            }
            Metric::AveragePizzasPerDay => {
                format!("The average ordered pizzas per day is {count:.0}.")
            }
            Metric::MostOrderedIngredient => format!("The most ordered ingredient is {key}."),
            Metric::MostOrderedCategory => format!("The most ordered pizza category is {key}."),
        }
    }
}

impl FromStr for Metric {
    type Err = ProcessorError;

    /// Codes are matched case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ProcessorError::UnknownMetric(s.to_string()))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Result of processing one requested metric code
#[derive(Debug)]
pub enum MetricOutcome {
    Report {
        metric: Metric,
        aggregation: Aggregation,
    },
    /// The code is not in the catalog
    Unknown(String),
    Failed {
        metric: Metric,
        error: ProcessorError,
    },
}

impl MetricOutcome {
    /// Whether this outcome belongs on standard output
    pub fn is_printable(&self) -> bool {
        !matches!(self, MetricOutcome::Failed { .. })
    }
}

impl fmt::Display for MetricOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricOutcome::Report {
                metric,
                aggregation,
            } => f.write_str(&metric.render(aggregation)),
            MetricOutcome::Unknown(code) => write!(f, "Command '{code}' not found."),
            MetricOutcome::Failed { metric, error } => {
                write!(f, "Metric '{metric}' failed: {error}")
            }
        }
    }
}

/// Evaluates each code in order; unknown codes do not stop the rest
pub fn run_metrics<I, S>(records: &[OrderLineItem], codes: I) -> Vec<MetricOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    codes
        .into_iter()
        .map(|code| {
            let code = code.as_ref();
            let metric = match code.parse::<Metric>() {
                Ok(metric) => metric,
                Err(_) => {
                    warn!(code, "Unknown metric code");
                    return MetricOutcome::Unknown(code.to_string());
                }
            };

            debug!(
                %metric,
                description = metric.description(),
                plan = ?metric.plan(),
                "Evaluating metric"
            );
            match metric.evaluate(records) {
                Ok(aggregation) => MetricOutcome::Report {
                    metric,
                    aggregation,
                },
                Err(error) => MetricOutcome::Failed { metric, error },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::order::line_item;

    fn lines(records: &[OrderLineItem], codes: &[&str]) -> Vec<String> {
        run_metrics(records, codes)
            .iter()
            .map(|o| o.to_string())
            .collect()
    }

    #[test]
    fn test_codes_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(metric.code().parse::<Metric>().unwrap(), metric);
        }
        assert_eq!("PMS".parse::<Metric>().unwrap(), Metric::MostOrderedPizza);
        assert!(matches!(
            "xyz".parse::<Metric>(),
            Err(ProcessorError::UnknownMetric(c)) if c == "xyz"
        ));
    }

    #[test]
    fn test_catalog_plans() {
        assert_eq!(
            Metric::MostRevenueDay.plan(),
            MetricPlan::Grouped {
                group: Field::OrderDate,
                reduce: Field::TotalPrice,
                mode: AggregateMode::Most
            }
        );
        assert_eq!(
            Metric::AveragePizzasPerOrder.plan(),
            MetricPlan::Grouped {
                group: Field::OrderId,
                reduce: Field::Quantity,
                mode: AggregateMode::Average
            }
        );
        assert_eq!(Metric::MostOrderedIngredient.plan(), MetricPlan::Ingredients);
    }

    #[test]
    fn test_pizza_sentences() {
        let records = vec![
            line_item("Margherita", "1/1/2015", 3, 30.0),
            line_item("Pepperoni", "1/1/2015", 5, 60.0),
        ];
        assert_eq!(
            lines(&records, &["pms", "pls"]),
            vec![
                "The most ordered pizza is Pepperoni.",
                "The least ordered pizza is Margherita."
            ]
        );
    }

    #[test]
    fn test_day_sentences() {
        let records = vec![
            line_item("A", "1/1/2015", 1, 10.0),
            line_item("B", "1/1/2015", 2, 15.0),
            line_item("C", "1/2/2015", 1, 12.5),
        ];
        assert_eq!(
            lines(&records, &["dms", "dls", "dmsp", "dlsp"]),
            vec![
                "The date with the most revenue is 1/1/2015 with a total of $25.00.",
                "The date with the least revenue is 1/2/2015 with a total of $12.50.",
                "The date with the most sold pizzas is 1/1/2015 with a total of 3.",
                "The date with the least sold pizzas is 1/2/2015 with a total of 1.",
            ]
        );
    }

    #[test]
    fn test_revenue_cents_round_half_up() {
        let records = vec![
            line_item("A", "1/1/2015", 1, 10.0),
            line_item("B", "1/1/2015", 1, 0.125),
        ];
        assert_eq!(
            lines(&records, &["dms", "dls"]),
            vec![
                "The date with the most revenue is 1/1/2015 with a total of $10.13.",
                "The date with the least revenue is 1/1/2015 with a total of $10.13.",
            ]
        );
    }

    #[test]
    fn test_average_sentences_round_half_up() {
        let mut records = vec![
            line_item("A", "1/1/2015", 2, 1.0),
            line_item("B", "1/2/2015", 3, 1.0),
        ];
        records[0].order_id = "1".to_string();
        records[1].order_id = "2".to_string();
        assert_eq!(
            lines(&records, &["apo", "apd"]),
            vec![
                "The average ordered pizzas per order is 3.",
                "The average ordered pizzas per day is 3."
            ]
        );
    }

    #[test]
    fn test_ingredient_and_category_sentences() {
        let mut veggie = line_item("The Spinach Pizza", "1/1/2015", 4, 40.0);
        veggie.pizza_category = "Veggie".to_string();
        veggie.pizza_ingredients = "Spinach, Feta Cheese".to_string();
        let classic = line_item("The Pepperoni Pizza", "1/1/2015", 1, 9.75);

        assert_eq!(
            lines(&[veggie, classic], &["ims", "hp"]),
            vec![
                "The most ordered ingredient is Feta Cheese.",
                "The most ordered pizza category is Veggie."
            ]
        );
    }

    #[test]
    fn test_unknown_code_does_not_stop_processing() {
        let records = vec![line_item("Margherita", "1/1/2015", 3, 30.0)];
        assert_eq!(
            lines(&records, &["xyz", "pms"]),
            vec![
                "Command 'xyz' not found.",
                "The most ordered pizza is Margherita."
            ]
        );
    }

    #[test]
    fn test_empty_records_fail_instead_of_blank_key() {
        let outcomes = run_metrics(&[], ["pms", "apd"]);
        assert!(matches!(
            outcomes[0],
            MetricOutcome::Failed {
                error: ProcessorError::EmptyInput,
                ..
            }
        ));
        assert!(matches!(
            outcomes[1],
            MetricOutcome::Failed {
                error: ProcessorError::DivisionByZero,
                ..
            }
        ));
        assert!(outcomes.iter().all(|o| !o.is_printable()));
    }
}

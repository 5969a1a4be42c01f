use std::str::FromStr;

use crate::processor::{ProcessorError, Value};

/// One line item of a pizza order, as read from a single CSV row
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineItem {
    pub pizza_id: i64,
    pub order_id: String,
    pub pizza_name_id: String,
    pub quantity: i64,
    pub order_date: String,
    pub order_time: String,
    pub unit_price: f64,
    pub total_price: f64,
    pub pizza_size: String,
    pub pizza_category: String,
    /// Ingredient names separated by ", "
    pub pizza_ingredients: String,
    pub pizza_name: String,
}

/// Addressable attributes of an [`OrderLineItem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PizzaId,
    OrderId,
    PizzaNameId,
    Quantity,
    OrderDate,
    OrderTime,
    UnitPrice,
    TotalPrice,
    PizzaSize,
    PizzaCategory,
    PizzaIngredients,
    PizzaName,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::PizzaId,
        Field::OrderId,
        Field::PizzaNameId,
        Field::Quantity,
        Field::OrderDate,
        Field::OrderTime,
        Field::UnitPrice,
        Field::TotalPrice,
        Field::PizzaSize,
        Field::PizzaCategory,
        Field::PizzaIngredients,
        Field::PizzaName,
    ];

    /// Header name of the column backing this field
    pub fn column_name(self) -> &'static str {
        match self {
            Field::PizzaId => "pizza_id",
            Field::OrderId => "order_id",
            Field::PizzaNameId => "pizza_name_id",
            Field::Quantity => "quantity",
            Field::OrderDate => "order_date",
            Field::OrderTime => "order_time",
            Field::UnitPrice => "unit_price",
            Field::TotalPrice => "total_price",
            Field::PizzaSize => "pizza_size",
            Field::PizzaCategory => "pizza_category",
            Field::PizzaIngredients => "pizza_ingredients",
            Field::PizzaName => "pizza_name",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::PizzaId => "pizzaId",
            Field::OrderId => "orderId",
            Field::PizzaNameId => "pizzaNameId",
            Field::Quantity => "quantity",
            Field::OrderDate => "orderDate",
            Field::OrderTime => "orderTime",
            Field::UnitPrice => "unitPrice",
            Field::TotalPrice => "totalPrice",
            Field::PizzaSize => "pizzaSize",
            Field::PizzaCategory => "pizzaCategory",
            Field::PizzaIngredients => "pizzaIngredients",
            Field::PizzaName => "pizzaName",
        }
    }
}

impl FromStr for Field {
    type Err = ProcessorError;

    /// Accepts either the field name (`pizzaName`) or the column name (`pizza_name`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.name() == s || f.column_name() == s)
            .ok_or_else(|| ProcessorError::MissingColumn(s.to_string()))
    }
}

impl OrderLineItem {
    /// Typed accessor used by the aggregator in place of per-field getters
    pub fn field(&self, field: Field) -> Value<'_> {
        match field {
            Field::PizzaId => Value::Int(self.pizza_id),
            Field::OrderId => Value::Text(&self.order_id),
            Field::PizzaNameId => Value::Text(&self.pizza_name_id),
            Field::Quantity => Value::Int(self.quantity),
            Field::OrderDate => Value::Text(&self.order_date),
            Field::OrderTime => Value::Text(&self.order_time),
            Field::UnitPrice => Value::Float(self.unit_price),
            Field::TotalPrice => Value::Float(self.total_price),
            Field::PizzaSize => Value::Text(&self.pizza_size),
            Field::PizzaCategory => Value::Text(&self.pizza_category),
            Field::PizzaIngredients => Value::Text(&self.pizza_ingredients),
            Field::PizzaName => Value::Text(&self.pizza_name),
        }
    }

    /// Individual ingredient names, in listed order
    pub fn ingredients(&self) -> impl Iterator<Item = &str> + '_ {
        self.pizza_ingredients
            .split(", ")
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
pub(crate) fn line_item(name: &str, date: &str, quantity: i64, total_price: f64) -> OrderLineItem {
    OrderLineItem {
        pizza_id: 1,
        order_id: "1".to_string(),
        pizza_name_id: name.to_lowercase().replace(' ', "_"),
        quantity,
        order_date: date.to_string(),
        order_time: "11:38:36".to_string(),
        unit_price: total_price / quantity.max(1) as f64,
        total_price,
        pizza_size: "M".to_string(),
        pizza_category: "Classic".to_string(),
        pizza_ingredients: "Tomatoes, Mozzarella Cheese".to_string(),
        pizza_name: name.to_string(),
    }
}

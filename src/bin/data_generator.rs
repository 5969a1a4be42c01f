use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::IndexedRandom;

// (name id stem, display name, category, ingredients)
const MENU: [(&str, &str, &str, &str); 6] = [
    (
        "hawaiian",
        "The Hawaiian Pizza",
        "Classic",
        "Sliced Ham, Pineapple, Mozzarella Cheese",
    ),
    (
        "classic_dlx",
        "The Classic Deluxe Pizza",
        "Classic",
        "Pepperoni, Mushrooms, Red Onions, Red Peppers, Bacon",
    ),
    (
        "five_cheese",
        "The Five Cheese Pizza",
        "Veggie",
        "Mozzarella Cheese, Provolone Cheese, Smoked Gouda Cheese, Romano Cheese, Blue Cheese, Garlic",
    ),
    (
        "bbq_ckn",
        "The Barbecue Chicken Pizza",
        "Chicken",
        "Barbecued Chicken, Red Peppers, Green Peppers, Tomatoes, Red Onions, Barbecue Sauce",
    ),
    (
        "spicy_ital",
        "The Spicy Italian Pizza",
        "Supreme",
        "Capocollo, Tomatoes, Goat Cheese, Artichokes, Peperoncini verdi, Garlic",
    ),
    (
        "spinach_fet",
        "The Spinach and Feta Pizza",
        "Veggie",
        "Spinach, Mushrooms, Red Onions, Feta Cheese, Garlic",
    ),
];

const SIZES: [(&str, f64); 3] = [("S", 12.0), ("M", 16.0), ("L", 20.5)];

/// Writes a synthetic pizza sales CSV: `data_generator [path] [rows]`
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "data/pizza_sales.csv".to_string());
    let rows: usize = match args.next() {
        Some(n) => n.parse().context("row count must be a positive integer")?,
        None => 1_000_000,
    };

    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("creating {}", path))?;
    writer.write_record([
        "pizza_id",
        "order_id",
        "pizza_name_id",
        "quantity",
        "order_date",
        "order_time",
        "unit_price",
        "total_price",
        "pizza_size",
        "pizza_category",
        "pizza_ingredients",
        "pizza_name",
    ])?;

    let mut rng = rand::rng();
    let mut order_id = 1;
    for i in 0..rows {
        // Roughly two and a half line items per order
        if i > 0 && rng.random_range(0..5) < 2 {
            order_id += 1;
        }
        let (stem, name, category, ingredients) = MENU.choose(&mut rng).copied().unwrap_or(MENU[0]);
        let (size, unit_price) = SIZES.choose(&mut rng).copied().unwrap_or(SIZES[0]);
        let quantity: u32 = if rng.random_range(0..20) == 0 { 2 } else { 1 };
        let day = order_id / 60 % 365;
        let order_date = format!("{}/{}/2015", day / 28 % 12 + 1, day % 28 + 1);
        let order_time = format!(
            "{:02}:{:02}:{:02}",
            rng.random_range(11..23),
            rng.random_range(0..60),
            rng.random_range(0..60)
        );

        writer.write_record([
            (i + 1).to_string(),
            order_id.to_string(),
            format!("{}_{}", stem, size.to_lowercase()),
            quantity.to_string(),
            order_date,
            order_time,
            format!("{:.2}", unit_price),
            format!("{:.2}", unit_price * quantity as f64),
            size.to_string(),
            category.to_string(),
            ingredients.to_string(),
            name.to_string(),
        ])?;
    }
    writer.flush()?;

    println!("Sample CSV generated: {} ({} rows)", path, rows);
    Ok(())
}

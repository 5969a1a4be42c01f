use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use jemallocator::Jemalloc;
use pizza_metrics::processor::{
    AggregateMode,
    aggregator::{aggregate, most_ordered_ingredient},
    metrics::{Metric, run_metrics},
    order::{Field, OrderLineItem},
};
use std::hint::black_box;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

const ROWS: usize = 500_000;

fn synthetic_orders(rows: usize) -> Vec<OrderLineItem> {
    let names = ["Hawaiian", "Classic Deluxe", "Five Cheese", "Greek", "Mexicana"];
    (0..rows)
        .map(|i| OrderLineItem {
            pizza_id: i as i64,
            order_id: (i / 3).to_string(),
            pizza_name_id: format!("pizza_{}", i % names.len()),
            quantity: (i % 3 + 1) as i64,
            order_date: format!("{}/{}/2015", i / 2800 % 12 + 1, i / 100 % 28 + 1),
            order_time: "12:00:00".to_string(),
            unit_price: 12.5,
            total_price: 12.5 * (i % 3 + 1) as f64,
            pizza_size: "M".to_string(),
            pizza_category: if i % 2 == 0 { "Classic" } else { "Veggie" }.to_string(),
            pizza_ingredients: "Tomatoes, Mozzarella Cheese, Garlic".to_string(),
            pizza_name: format!("The {} Pizza", names[i % names.len()]),
        })
        .collect()
}

fn aggregations(c: &mut Criterion) {
    let records = synthetic_orders(ROWS);

    let mut group = c.benchmark_group("Aggregator");
    group.sample_size(10);
    group.throughput(Throughput::Elements(ROWS as u64));

    group.bench_function("most_by_pizza_name", |b| {
        b.iter(|| {
            aggregate(
                black_box(&records),
                Field::PizzaName,
                Field::Quantity,
                AggregateMode::Most,
            )
            .unwrap()
        })
    });

    group.bench_function("average_by_order_id", |b| {
        b.iter(|| {
            aggregate(
                black_box(&records),
                Field::OrderId,
                Field::Quantity,
                AggregateMode::Average,
            )
            .unwrap()
        })
    });

    group.bench_function("most_ordered_ingredient", |b| {
        b.iter(|| most_ordered_ingredient(black_box(&records)).unwrap())
    });

    group.bench_function("all_metrics", |b| {
        b.iter(|| run_metrics(black_box(&records), Metric::ALL.map(Metric::code)))
    });

    group.finish();
}

criterion_group!(benches, aggregations);
criterion_main!(benches);

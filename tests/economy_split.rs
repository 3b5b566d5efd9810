use import_dashboard_wasm::domain::catalog::{
    ECONOMY_THRESHOLD, Product, economy_split, progress_donut,
};
use quickcheck_macros::quickcheck;

fn product(name: &str, price: f64) -> Product {
    Product::new(name, None, price)
}

#[test]
fn threshold_is_inclusive_on_the_affordable_side() {
    let products = vec![
        product("under", 99_999.99),
        product("exact", ECONOMY_THRESHOLD),
        product("over", 100_000.01),
    ];
    let dataset = economy_split(&products, ECONOMY_THRESHOLD);
    assert_eq!(dataset.values(), [2.0, 1.0]);
}

#[test]
fn labels_carry_the_shortened_threshold() {
    let dataset = economy_split(&[], ECONOMY_THRESHOLD);
    assert_eq!(dataset.labels(), ["Affordable (≤ 100K)", "Premium (> 100K)"]);
    assert_eq!(dataset.total(), 0.0);
}

#[test]
fn uneven_thresholds_print_in_full() {
    let dataset = economy_split(&[], 1_500.5);
    assert_eq!(dataset.labels(), ["Affordable (≤ 1500.5)", "Premium (> 1500.5)"]);
}

#[test]
fn split_always_sums_to_the_product_count() {
    let products: Vec<Product> = (0..25)
        .map(|i| product(&format!("p{i}"), f64::from(i) * 20_000.0))
        .collect();
    assert_eq!(economy_split(&products, ECONOMY_THRESHOLD).total(), 25.0);
}

#[quickcheck]
fn buckets_sum_to_the_product_count_for_any_threshold(prices: Vec<f64>, threshold: f64) -> bool {
    let products: Vec<Product> = prices
        .iter()
        .enumerate()
        .map(|(i, &price)| product(&format!("p{i}"), price))
        .collect();
    economy_split(&products, threshold).total() == products.len() as f64
}

#[test]
fn progress_donut_splits_done_and_remaining() {
    let dataset = progress_donut(62.5);
    assert_eq!(dataset.labels(), ["Done", "Remaining"]);
    assert_eq!(dataset.values(), [62.5, 37.5]);
}

#[test]
fn progress_donut_clamps_out_of_range_values() {
    assert_eq!(progress_donut(140.0).values(), [100.0, 0.0]);
    assert_eq!(progress_donut(-5.0).values(), [0.0, 100.0]);
}

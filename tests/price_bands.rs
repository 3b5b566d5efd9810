use import_dashboard_wasm::domain::catalog::{PRICE_BANDS, Product, price_histogram};
use quickcheck_macros::quickcheck;

fn product(name: &str, price: f64) -> Product {
    Product::new(name, None, price)
}

fn band_index(price: f64) -> usize {
    PRICE_BANDS
        .iter()
        .position(|band| band.admits(price))
        .unwrap()
}

#[test]
fn first_match_assigns_each_price_to_exactly_one_band() {
    assert_eq!(band_index(0.0), 0);
    assert_eq!(band_index(50_000.0), 0);
    assert_eq!(band_index(50_000.01), 1);
    assert_eq!(band_index(100_000.0), 1);
    assert_eq!(band_index(200_000.0), 2);
    assert_eq!(band_index(200_000.01), 3);
    assert_eq!(band_index(f64::MAX), 3);
}

#[test]
fn histogram_counts_a_mixed_catalog() {
    let products = vec![
        product("entry", 30_000.0),
        product("mid", 75_000.0),
        product("flagship", 250_000.0),
    ];
    let dataset = price_histogram(&products);
    assert_eq!(
        dataset.labels(),
        ["0 - 50K", "50K - 100K", "100K - 200K", "200K+"]
    );
    assert_eq!(dataset.values(), [1.0, 1.0, 0.0, 1.0]);
}

#[test]
fn empty_catalog_keeps_every_band_at_zero() {
    let dataset = price_histogram(&[]);
    assert_eq!(dataset.len(), PRICE_BANDS.len());
    assert!(dataset.values().iter().all(|&count| count == 0.0));
    assert_eq!(dataset.max_value(), 0.0);
}

#[test]
fn histogram_total_matches_the_product_count() {
    let products: Vec<Product> = (0..37)
        .map(|i| product(&format!("p{i}"), f64::from(i) * 9_000.0))
        .collect();
    assert_eq!(price_histogram(&products).total(), 37.0);
}

#[test]
fn unparseable_prices_normalize_to_zero_and_land_in_the_first_band() {
    let raw = serde_json::json!([
        { "name": "numeric string", "price": "199.99" },
        { "name": "garbage", "price": "not a number" },
        { "name": "missing" }
    ]);
    let products: Vec<Product> = serde_json::from_value(raw).unwrap();
    assert!((products[0].price.value() - 199.99).abs() < f64::EPSILON);
    assert_eq!(products[1].price.value(), 0.0);
    assert_eq!(products[2].price.value(), 0.0);

    let dataset = price_histogram(&products);
    assert_eq!(dataset.values()[0], 3.0);
}

#[test]
fn display_price_always_shows_two_decimals() {
    assert_eq!(product("basic", 1234.5).display_price(), "$ 1234.50");
    assert_eq!(product("free", 0.0).display_price(), "$ 0.00");
}

#[quickcheck]
fn band_assignment_is_an_exhaustive_partition(prices: Vec<f64>) -> bool {
    let products: Vec<Product> = prices
        .iter()
        .enumerate()
        .map(|(i, &price)| product(&format!("p{i}"), price))
        .collect();
    let every_price_has_a_band = prices
        .iter()
        .all(|&price| PRICE_BANDS.iter().any(|band| band.admits(price)));
    every_price_has_a_band && price_histogram(&products).total() == products.len() as f64
}

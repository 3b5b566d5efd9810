use import_dashboard_wasm::application::chart_refresh::product_chart_datasets;
use import_dashboard_wasm::domain::catalog::{Product, progress_donut};

fn fixture() -> Vec<Product> {
    vec![
        Product::new("USB cable", Some("1m braided".to_string()), 1_500.0),
        Product::new("Laptop", None, 45_000.0),
        Product::new("Rack", None, 99_999.99),
        Product::new("Workstation", Some("dual socket".to_string()), 180_000.0),
        Product::new("Mainframe", None, 2_500_000.0),
    ]
}

#[test]
fn product_datasets_snapshot() {
    let (price_bands, economy) = product_chart_datasets(&fixture());
    insta::assert_json_snapshot!("price_bands", price_bands);
    insta::assert_json_snapshot!("economy_split", economy);
}

#[test]
fn progress_donut_snapshot() {
    insta::assert_json_snapshot!("progress_donut", progress_donut(62.5));
}

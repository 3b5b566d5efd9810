use import_dashboard_wasm::domain::import::transport_percent;

#[test]
fn computes_rounded_percentages() {
    assert_eq!(transport_percent(1_048_576, 2_097_152), 50);
    assert_eq!(transport_percent(2_097_152, 2_097_152), 100);
    assert_eq!(transport_percent(1, 3), 33);
    assert_eq!(transport_percent(2, 3), 67);
}

#[test]
fn zero_total_reports_zero_instead_of_dividing() {
    assert_eq!(transport_percent(500, 0), 0);
}

#[test]
fn nothing_sent_yet_is_zero_percent() {
    assert_eq!(transport_percent(0, 2_097_152), 0);
}

#[test]
fn overreported_bytes_cap_at_one_hundred() {
    assert_eq!(transport_percent(150, 100), 100);
}

#![cfg(target_arch = "wasm32")]

use import_dashboard_wasm::domain::catalog::ChartDataset;
use import_dashboard_wasm::infrastructure::rendering::{ChartKind, ChartOptions, ChartSurface};
use import_dashboard_wasm::infrastructure::websocket::ProgressChannel;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_canvas(id: &str) {
    let document = web_sys::window().unwrap().document().unwrap();
    if document.get_element_by_id(id).is_some() {
        return;
    }
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    canvas.set_width(200);
    canvas.set_height(150);
    document.body().unwrap().append_child(&canvas).unwrap();
}

fn dataset() -> ChartDataset {
    ChartDataset::from_pairs([("a", 2.0), ("b", 5.0)])
}

#[wasm_bindgen_test]
fn rendering_into_a_missing_canvas_is_a_clean_skip() {
    let mut surface = ChartSurface::new();
    surface
        .render(
            "no-such-canvas",
            ChartKind::Bar,
            dataset(),
            ChartOptions::titled("t"),
        )
        .unwrap();
    assert!(!surface.has_instance("no-such-canvas"));
    assert_eq!(surface.instance_count(), 0);
}

#[wasm_bindgen_test]
fn render_registers_one_instance_per_target() {
    mount_canvas("surface-a");
    let mut surface = ChartSurface::new();
    surface
        .render(
            "surface-a",
            ChartKind::Bar,
            dataset(),
            ChartOptions::titled("Counts"),
        )
        .unwrap();
    assert!(surface.has_instance("surface-a"));

    // Re-rendering the same target replaces instead of stacking
    surface
        .render(
            "surface-a",
            ChartKind::Doughnut,
            dataset(),
            ChartOptions::titled("Counts"),
        )
        .unwrap();
    assert_eq!(surface.instance_count(), 1);
}

#[wasm_bindgen_test]
fn update_reports_whether_an_instance_existed() {
    mount_canvas("surface-b");
    let mut surface = ChartSurface::new();
    assert!(!surface.update("surface-b", dataset()).unwrap());

    surface
        .render(
            "surface-b",
            ChartKind::Bar,
            dataset(),
            ChartOptions::titled("Counts"),
        )
        .unwrap();
    assert!(surface.update("surface-b", dataset()).unwrap());
}

#[wasm_bindgen_test]
fn update_or_render_creates_then_mutates_in_place() {
    mount_canvas("surface-c");
    let mut surface = ChartSurface::new();
    surface
        .update_or_render(
            "surface-c",
            ChartKind::Doughnut,
            dataset(),
            ChartOptions::progress(25.0),
        )
        .unwrap();
    assert_eq!(surface.instance_count(), 1);

    surface
        .update_or_render(
            "surface-c",
            ChartKind::Doughnut,
            dataset(),
            ChartOptions::progress(80.0),
        )
        .unwrap();
    assert_eq!(surface.instance_count(), 1);

    // A kind change falls back to a full render of the same target
    surface
        .update_or_render(
            "surface-c",
            ChartKind::Bar,
            dataset(),
            ChartOptions::titled("Counts"),
        )
        .unwrap();
    assert_eq!(surface.instance_count(), 1);
}

#[wasm_bindgen_test]
fn destroy_forgets_the_instance_and_tolerates_repeats() {
    mount_canvas("surface-d");
    let mut surface = ChartSurface::new();
    surface
        .render(
            "surface-d",
            ChartKind::Bar,
            dataset(),
            ChartOptions::titled("Counts"),
        )
        .unwrap();
    surface.destroy("surface-d").unwrap();
    assert!(!surface.has_instance("surface-d"));
    surface.destroy("surface-d").unwrap();
}

#[wasm_bindgen_test]
fn destroy_all_sweeps_every_target() {
    mount_canvas("surface-e");
    mount_canvas("surface-f");
    let mut surface = ChartSurface::new();
    for id in ["surface-e", "surface-f"] {
        surface
            .render(id, ChartKind::Bar, dataset(), ChartOptions::titled("Counts"))
            .unwrap();
    }
    assert_eq!(surface.instance_count(), 2);
    surface.destroy_all();
    assert_eq!(surface.instance_count(), 0);
}

#[wasm_bindgen_test]
fn progress_channel_starts_closed_and_close_is_idempotent() {
    let mut channel = ProgressChannel::new();
    assert!(!channel.is_open());
    channel.close();
    channel.close();
    assert!(!channel.is_open());
}

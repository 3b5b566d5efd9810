use js_sys::Promise;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::application::catalog_store::shared_store;
use crate::application::chart_refresh::product_chart_datasets;
use crate::domain::catalog::{Product, ProductDraft};
use crate::domain::logging::{LogComponent, get_logger};

// Thin bridge to the application layer: host pages call these instead of
// reaching into the Leptos components. All payloads cross the boundary as
// JSON strings.

/// Mount the dashboard into the document body
#[wasm_bindgen(js_name = bootDashboard)]
pub fn boot_dashboard() {
    get_logger().info(
        LogComponent::Presentation("WasmApi"),
        "🖥️ Mounting dashboard into document body",
    );
    leptos::mount_to_body(crate::app::App);
}

/// Compute both catalog chart datasets for an arbitrary product list, so a
/// host page can feed its own chart stack. Takes a JSON array of products,
/// returns `{"priceBands": ..., "economySplit": ...}`.
#[wasm_bindgen(js_name = chartDatasets)]
pub fn chart_datasets(products_json: &str) -> Result<String, JsValue> {
    let products: Vec<Product> = serde_json::from_str(products_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid product list: {e}")))?;
    let (price_bands, economy_split) = product_chart_datasets(&products);
    let payload = serde_json::json!({
        "priceBands": price_bands,
        "economySplit": economy_split,
    });
    serde_json::to_string(&payload).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Create a product; resolves with the created product as JSON
#[wasm_bindgen(js_name = createProduct)]
pub fn create_product(name: String, description: Option<String>, price: f64) -> Promise {
    future_to_promise(async move {
        let draft = ProductDraft::new(name, description, price);
        match shared_store().create(&draft).await {
            Ok(created) => to_json(&created),
            Err(e) => Err(JsValue::from_str(&e.detail_or("Create failed"))),
        }
    })
}

/// Update a product; resolves with the updated product as JSON
#[wasm_bindgen(js_name = updateProduct)]
pub fn update_product(
    id: u32,
    name: String,
    description: Option<String>,
    price: f64,
) -> Promise {
    future_to_promise(async move {
        let draft = ProductDraft::new(name, description, price);
        match shared_store().update(u64::from(id), &draft).await {
            Ok(updated) => to_json(&updated),
            Err(e) => Err(JsValue::from_str(&e.detail_or("Update failed"))),
        }
    })
}

/// Delete a product; resolves with the deleted id
#[wasm_bindgen(js_name = deleteProduct)]
pub fn delete_product(id: u32) -> Promise {
    future_to_promise(async move {
        match shared_store().delete(u64::from(id)).await {
            Ok(()) => Ok(JsValue::from_f64(f64::from(id))),
            Err(e) => Err(JsValue::from_str(&e.detail_or("Delete failed"))),
        }
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_json::to_string(value)
        .map(|json| JsValue::from_str(&json))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

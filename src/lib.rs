use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod domain;
pub mod global_state;
pub mod infrastructure;
pub mod presentation;

/// Wire the runtime services on module load: panic reporting, the bridge
/// logger feeding both the browser console and the in-app panel, and the
/// browser clock for log timestamps.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    domain::logging::init_logger(Box::new(app::LeptosLogger::new()));
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider));

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        "🚀 Import dashboard runtime initialized",
    );
}

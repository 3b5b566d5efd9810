//! HTTP clients for the catalog and import endpoints, plus the fixed
//! base-URL derivation shared by both.

pub mod catalog_client;
pub mod dto;
pub mod import_client;

pub use catalog_client::*;
pub use dto::*;
pub use import_client::*;

/// Port the backend API listens on
pub const API_PORT: u16 = 8000;

/// Base URL of the backend, derived from the page location. Falls back to
/// localhost when no usable page location is available.
pub fn api_base() -> String {
    if let Some(window) = web_sys::window() {
        let location = window.location();
        let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
        let hostname = location.hostname().unwrap_or_default();
        if !hostname.is_empty() {
            return format!("{protocol}//{hostname}:{API_PORT}");
        }
    }
    format!("http://127.0.0.1:{API_PORT}")
}

/// WebSocket base: same host as the API with the scheme swapped to ws(s)
pub fn ws_base() -> String {
    let base = api_base();
    if let Some(rest) = base.strip_prefix("https:") {
        format!("wss:{rest}")
    } else if let Some(rest) = base.strip_prefix("http:") {
        format!("ws:{rest}")
    } else {
        base
    }
}

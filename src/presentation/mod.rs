//! JS-facing surface: everything exported through wasm-bindgen.

pub mod wasm_api;

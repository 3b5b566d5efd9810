//! Data transfer objects for the backend API, with conversions into domain
//! types. Shapes are tolerant: list payloads may or may not be enveloped and
//! error bodies may or may not carry a detail field.

use crate::domain::catalog::Product;
use crate::domain::import::{ImportOutcome, PreviewRow};
use serde::Deserialize;

/// Standard response envelope around a payload
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// `POST /api/excel/sheets` response
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsResponse {
    pub sheets: Vec<String>,
}

/// `POST /api/excel/preview/{sheet}` response; rows keep their source
/// column order
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewResponse {
    pub preview: Vec<PreviewRow>,
}

/// Payload of the terminal import envelope
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ImportCount {
    #[serde(default)]
    pub count: u64,
}

impl ApiEnvelope<ImportCount> {
    pub fn to_domain(&self) -> ImportOutcome {
        ImportOutcome {
            message: self
                .message
                .clone()
                .unwrap_or_else(|| "Import completed".to_string()),
            imported: self.data.map(|data| data.count).unwrap_or(0),
        }
    }
}

/// Error body; the backend optionally explains itself in `detail`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Best-effort extraction of the server's `detail` from an error body
pub fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|error| error.detail)
}

/// Product listings arrive either as a bare array or wrapped in an envelope;
/// both shapes must be accepted
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProductsPayload {
    Bare(Vec<Product>),
    Enveloped(ApiEnvelope<Vec<Product>>),
}

impl ProductsPayload {
    pub fn into_products(self) -> Vec<Product> {
        match self {
            ProductsPayload::Bare(products) => products,
            ProductsPayload::Enveloped(envelope) => envelope.data.unwrap_or_default(),
        }
    }
}

use derive_more::{Constructor, Deref, DerefMut, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Value Object - product price in the catalog currency
#[derive(
    Debug, Clone, Copy, PartialEq, Default, From, Into, Deref, DerefMut, Constructor, Serialize,
    Deserialize,
)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Lenient coercion: the API may send a number, a numeric string, or garbage.
    /// Anything that does not parse as a finite number becomes 0.
    pub fn coerce(raw: Option<&serde_json::Value>) -> Self {
        let value = match raw {
            Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        };
        if value.is_finite() { Self(value) } else { Self(0.0) }
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Price, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(Price::coerce(raw.as_ref()))
}

/// Domain entity - Product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Price,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Product {
    pub fn new(name: impl Into<String>, description: Option<String>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            price: Price::from(price),
            created_at: None,
        }
    }

    pub fn display_price(&self) -> String {
        format!("$ {:.2}", self.price.value())
    }
}

/// Mutation payload for create/update calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, description: Option<String>, price: f64) -> Self {
        Self { name: name.into(), description, price }
    }
}

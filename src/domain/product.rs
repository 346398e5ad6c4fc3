//! Order line items.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Amount, DomainError};

/// Product line item as sent by the API.
#[derive(Debug, Deserialize)]
struct RawProduct {
    model_number: Option<String>,
    options: Option<Value>,
    quantity: Option<i64>,
    sku: Option<String>,
    price_unit: Option<Amount>,
    price_total: Option<Amount>,
    product: Option<String>,
}

/// Product represents one line item of an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Model identifier.
    pub model: Option<String>,
    /// Marketplace-defined product options.
    pub options: Option<Value>,
    /// Number of units ordered.
    pub quantity: i64,
    /// Stock keeping unit.
    pub sku: Option<String>,
    /// Price of a single unit.
    pub unit_price: Option<Amount>,
    /// Price of the whole line.
    pub total_price: Option<Amount>,
    /// Display name.
    pub name: String,
    /// Record this product was built from.
    #[serde(skip)]
    pub raw: Value,
}

impl Product {
    /// Builds a product from a single raw line item record.
    pub fn from_record(record: &Value) -> Result<Self, DomainError> {
        let raw: RawProduct = serde_json::from_value(record.clone())
            .map_err(|e| DomainError::InvalidRecord(format!("product: {}", e)))?;

        Ok(Self {
            model: raw.model_number,
            options: raw.options,
            quantity: raw.quantity.unwrap_or_default(),
            sku: raw.sku,
            unit_price: raw.price_unit,
            total_price: raw.price_total,
            name: raw.product.unwrap_or_default(),
            raw: record.clone(),
        })
    }
}

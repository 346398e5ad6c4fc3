//! Customer orders as returned by the seller order endpoint.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{Amount, DomainError, Product};

/// Order record as sent by the API.
#[derive(Debug, Deserialize)]
struct RawOrder {
    date: Option<String>,
    date_shipped: Option<String>,
    items: Option<Vec<Value>>,
    shipped: Option<bool>,
    refunded: Option<bool>,
    #[serde(default, deserialize_with = "string_or_number")]
    number: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    shipping_city: Option<String>,
    shipping_country: Option<String>,
    shipping_country_code: Option<String>,
    shipping_name: Option<String>,
    shipping_instructions: Option<String>,
    shipping_postcode: Option<String>,
    shipping_service: Option<String>,
    shipping_state: Option<String>,
    shipping_street: Option<String>,
    total_seller: Option<Amount>,
    total_shipping: Option<Amount>,
    total_subtotal: Option<Amount>,
    total_tindiefee: Option<Amount>,
    total_ccfee: Option<Amount>,
    tracking_code: Option<String>,
    tracking_url: Option<String>,
}

/// ShippingAddress holds the structured delivery details of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShippingAddress {
    pub city: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub recipient_name: Option<String>,
    pub instructions: Option<String>,
    pub postcode: Option<String>,
    pub service: Option<String>,
    pub state: Option<String>,
    pub street: Option<String>,
}

impl ShippingAddress {
    /// Formats the address as a printable block:
    /// name, street, "city state postcode" and country on separate lines.
    pub fn to_block(&self) -> String {
        let part = |field: &Option<String>| field.clone().unwrap_or_default();
        format!(
            "{}\n{}\n{} {} {}\n{}",
            part(&self.recipient_name),
            part(&self.street),
            part(&self.city),
            part(&self.state),
            part(&self.postcode),
            part(&self.country),
        )
    }
}

/// Order represents one customer order.
///
/// `date_shipped`, `tracking_code` and `tracking_url` are only ever set when
/// `shipped` is true. Monetary fields are kept as received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    /// When the order was placed.
    pub date: DateTime<Utc>,
    /// When the order shipped.
    pub date_shipped: Option<DateTime<Utc>>,
    /// Line items, in the order the API listed them.
    pub products: Vec<Product>,
    pub shipped: bool,
    pub refunded: bool,
    /// Marketplace order number.
    pub number: Option<String>,
    pub recipient_email: Option<String>,
    pub recipient_phone: Option<String>,
    pub address: ShippingAddress,
    /// Printable address, see [`ShippingAddress::to_block`].
    pub address_block: String,
    /// Amount paid out to the seller.
    pub seller_payout: Option<Amount>,
    pub shipping_cost: Option<Amount>,
    pub subtotal: Option<Amount>,
    /// Marketplace fee.
    pub marketplace_fee: Option<Amount>,
    /// Payment-processing fee.
    pub processing_fee: Option<Amount>,
    pub tracking_code: Option<String>,
    pub tracking_url: Option<String>,
    /// Record this order was built from.
    #[serde(skip)]
    pub raw: Value,
}

impl Order {
    /// Builds an order from a single raw order record.
    pub fn from_record(record: &Value) -> Result<Self, DomainError> {
        let raw: RawOrder = serde_json::from_value(record.clone())
            .map_err(|e| DomainError::InvalidRecord(format!("order: {}", e)))?;

        let date = raw
            .date
            .as_deref()
            .ok_or_else(|| DomainError::InvalidRecord("order: missing date".into()))
            .and_then(parse_timestamp)?;

        let products = raw
            .items
            .unwrap_or_default()
            .iter()
            .map(Product::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        let shipped = raw.shipped.unwrap_or(false);

        // Shipping details are ignored unless the order is marked shipped.
        let (date_shipped, tracking_code, tracking_url) = if shipped {
            let date_shipped = raw.date_shipped.as_deref().map(parse_timestamp).transpose()?;
            (date_shipped, raw.tracking_code, raw.tracking_url)
        } else {
            (None, None, None)
        };

        let address = ShippingAddress {
            city: raw.shipping_city,
            country: raw.shipping_country,
            country_code: raw.shipping_country_code,
            recipient_name: raw.shipping_name,
            instructions: raw.shipping_instructions,
            postcode: raw.shipping_postcode,
            service: raw.shipping_service,
            state: raw.shipping_state,
            street: raw.shipping_street,
        };
        let address_block = address.to_block();

        Ok(Self {
            date,
            date_shipped,
            products,
            shipped,
            refunded: raw.refunded.unwrap_or(false),
            number: raw.number,
            recipient_email: raw.email,
            recipient_phone: raw.phone,
            address,
            address_block,
            seller_payout: raw.total_seller,
            shipping_cost: raw.total_shipping,
            subtotal: raw.total_subtotal,
            marketplace_fee: raw.total_tindiefee,
            processing_fee: raw.total_ccfee,
            tracking_code,
            tracking_url,
            raw: record.clone(),
        })
    }

    /// Total number of units across all line items.
    pub fn item_count(&self) -> i64 {
        self.products.iter().map(|p| p.quantity).sum()
    }
}

/// Parses an API timestamp. Accepts RFC 3339 and the naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` form, which is taken as UTC.
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DomainError::InvalidRecord(format!("invalid timestamp: {}", s)))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

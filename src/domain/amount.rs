//! Monetary amounts as delivered by the API.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::DomainError;

/// Amount keeps a monetary value in the textual form the API sent it in.
///
/// The API is loose about whether totals are JSON strings or numbers, so both
/// are accepted and kept verbatim. Conversion to a fixed-point [`Decimal`]
/// happens only when arithmetic is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the amount exactly as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the amount into a fixed-point decimal.
    pub fn to_decimal(&self) -> Result<Decimal, DomainError> {
        let s = self.0.trim();
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map_err(|e| DomainError::InvalidAmount {
                value: self.0.clone(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Amount(s)),
            Value::Number(n) => Ok(Amount(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected a decimal string or number, got {}",
                other
            ))),
        }
    }
}

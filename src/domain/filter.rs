//! Shipped-state filter for order queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// ShippedFilter selects which orders a query returns.
///
/// Each variant is also a distinct cache key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippedFilter {
    /// No filter: shipped and unshipped orders.
    #[default]
    Any,
    /// Only orders that have shipped.
    Shipped,
    /// Only orders still waiting to ship.
    Unshipped,
}

impl ShippedFilter {
    /// Value of the `shipped` query parameter, or None when it must be omitted.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            ShippedFilter::Any => None,
            ShippedFilter::Shipped => Some("true"),
            ShippedFilter::Unshipped => Some("false"),
        }
    }
}

impl From<Option<bool>> for ShippedFilter {
    fn from(shipped: Option<bool>) -> Self {
        match shipped {
            None => ShippedFilter::Any,
            Some(true) => ShippedFilter::Shipped,
            Some(false) => ShippedFilter::Unshipped,
        }
    }
}

impl From<ShippedFilter> for Option<bool> {
    fn from(filter: ShippedFilter) -> Self {
        match filter {
            ShippedFilter::Any => None,
            ShippedFilter::Shipped => Some(true),
            ShippedFilter::Unshipped => Some(false),
        }
    }
}

impl fmt::Display for ShippedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShippedFilter::Any => write!(f, "any"),
            ShippedFilter::Shipped => write!(f, "shipped"),
            ShippedFilter::Unshipped => write!(f, "unshipped"),
        }
    }
}

impl FromStr for ShippedFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "any" | "all" | "none" => Ok(ShippedFilter::Any),
            "true" | "shipped" => Ok(ShippedFilter::Shipped),
            "false" | "unshipped" => Ok(ShippedFilter::Unshipped),
            _ => Err(DomainError::InvalidFilter(s.to_string())),
        }
    }
}

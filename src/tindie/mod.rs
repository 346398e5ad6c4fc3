//! Client for the marketplace seller order API.
//!
//! [`Client`] owns the transport, the clock and the per-filter order cache.
//! There are two read paths:
//!
//! - [`Client::cached_orders`] returns the latest page only (the server's
//!   default page, newest first) and caches it per shipped filter. The rolling
//!   statistics read through this path.
//! - [`Client::fetch_all`] walks every page for the complete order history
//!   and never touches the cache.

mod cache;
mod client;
mod clock;
mod transport;

pub use cache::OrderCache;
pub use client::Client;
pub use clock::{Clock, SystemClock};
pub use transport::{HttpTransport, Transport, TransportError};

use thiserror::Error;

use crate::domain::DomainError;
use crate::stats::StatsError;

/// Marker used in place of the body when the server sent nothing.
pub const EMPTY_BODY: &str = "<empty body>";

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body is empty or not valid JSON, or lacks the expected shape.
    #[error("decode error: {reason} (body: {body})")]
    Decode { reason: String, body: String },

    /// An argument outside of its domain was passed to a public operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A raw order record could not be turned into an order.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// A monetary value could not be parsed for aggregation.
    #[error("invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: String },

    /// An average was requested over too few orders.
    #[error("division by zero: need at least {needed} orders, have {available}")]
    DivideByZero { needed: usize, available: usize },
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidRecord(msg) => ClientError::InvalidRecord(msg),
            DomainError::InvalidAmount { value, reason } => {
                ClientError::InvalidAmount { value, reason }
            }
            DomainError::InvalidFilter(value) => ClientError::InvalidArgument(format!(
                "shipped must be true, false or unset, got {:?}",
                value
            )),
        }
    }
}

impl From<StatsError> for ClientError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::DivideByZero { needed, available } => {
                ClientError::DivideByZero { needed, available }
            }
            StatsError::Amount(e) => e.into(),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

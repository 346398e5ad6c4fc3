//! Domain models for marketplace orders.

mod amount;
mod error;
mod filter;
mod order;
mod product;

pub use amount::Amount;
pub use error::DomainError;
pub use filter::ShippedFilter;
pub use order::{Order, ShippingAddress};
pub use product::Product;

#[cfg(test)]
mod tests;

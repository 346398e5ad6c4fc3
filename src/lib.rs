//! Client for the Tindie seller order API.
//!
//! Fetches orders page by page, caches the latest page per shipped filter
//! and computes rolling averages over the newest orders.

pub mod config;
pub mod domain;
pub mod stats;
pub mod tindie;

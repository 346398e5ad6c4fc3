//! Per-filter order cache with time-based expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::{Order, ShippedFilter};

struct CacheEntry {
    expires_at: DateTime<Utc>,
    orders: Arc<[Order]>,
}

/// OrderCache holds at most one snapshot of orders per [`ShippedFilter`].
///
/// An entry is fresh while its expiry lies strictly after the time it is read
/// at. Nothing is evicted in the background; stale entries are only replaced.
pub struct OrderCache {
    ttl: TimeDelta,
    entries: HashMap<ShippedFilter, CacheEntry>,
}

impl OrderCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            entries: HashMap::new(),
        }
    }

    /// Returns the stored orders for `filter` if they are still fresh at `now`.
    pub fn get(&self, filter: ShippedFilter, now: DateTime<Utc>) -> Option<Arc<[Order]>> {
        self.entries
            .get(&filter)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| Arc::clone(&entry.orders))
    }

    /// Replaces the entry for `filter` with `orders`, valid for one TTL from `now`.
    pub fn insert(
        &mut self,
        filter: ShippedFilter,
        orders: Vec<Order>,
        now: DateTime<Utc>,
    ) -> Arc<[Order]> {
        let entry = CacheEntry {
            expires_at: now
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            orders: orders.into(),
        };
        let orders = Arc::clone(&entry.orders);

        self.entries.insert(filter, entry);
        orders
    }

    /// Expiry of the entry for `filter`, fresh or not.
    pub fn expires_at(&self, filter: ShippedFilter) -> Option<DateTime<Utc>> {
        self.entries.get(&filter).map(|entry| entry.expires_at)
    }

    /// Drops the entry for `filter`. Returns true if there was one.
    pub fn invalidate(&mut self, filter: ShippedFilter) -> bool {
        self.entries.remove(&filter).is_some()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

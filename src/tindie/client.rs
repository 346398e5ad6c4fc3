//! Order API client: page fetching, pagination, caching and statistics.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::TimeDelta;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::{ApiConfig, CacheConfig, Config};
use crate::domain::{Order, ShippedFilter};
use crate::stats::{self, Summary};

use super::{
    ClientError, Clock, EMPTY_BODY, HttpTransport, OrderCache, Result, SystemClock, Transport,
};

/// Client for the seller order endpoint.
///
/// The cache is owned by the client and every cache-touching operation takes
/// `&mut self`, so a check-then-refresh can never interleave with another.
pub struct Client {
    config: ApiConfig,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    cache: OrderCache,
    request_count: AtomicU64,
}

impl Client {
    /// Creates a client with the given transport and clock.
    pub fn new(
        config: ApiConfig,
        cache_config: &CacheConfig,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            transport,
            clock,
            cache: OrderCache::new(cache_config.ttl),
            request_count: AtomicU64::new(0),
        }
    }

    /// Creates a client talking HTTP and reading the system clock.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config.api.request_timeout)?;
        Ok(Self::new(
            config.api.clone(),
            &config.cache,
            Arc::new(transport),
            Arc::new(SystemClock),
        ))
    }

    /// Builds the request URL. Optional parameters are only appended when set.
    fn page_url(&self, filter: ShippedFilter, limit: Option<u32>, offset: Option<u32>) -> String {
        let mut params = vec![
            ("format", "json".to_string()),
            ("api_key", self.config.api_key.clone()),
            ("username", self.config.username.clone()),
        ];
        if let Some(shipped) = filter.query_value() {
            params.push(("shipped", shipped.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = offset {
            params.push(("offset", offset.to_string()));
        }

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.base_url, query)
    }

    /// Fetches one page and returns the decoded body verbatim.
    ///
    /// `None` for `limit` and `offset` leaves paging to the server's defaults.
    pub async fn fetch_page(
        &self,
        filter: ShippedFilter,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Value> {
        let url = self.page_url(filter, limit, offset);

        debug!(
            shipped = %filter,
            limit = ?limit,
            offset = ?offset,
            "requesting orders page"
        );

        self.request_count.fetch_add(1, Ordering::SeqCst);
        let body = self.transport.get(&url).await?;

        decode(&body)
    }

    /// Fetches the first page for `filter` without touching the cache.
    pub async fn fetch_orders(&self, filter: ShippedFilter) -> Result<Vec<Order>> {
        let page = self.fetch_page(filter, None, None).await?;
        orders_from_page(&page)
    }

    /// Walks every page for `filter` and returns all orders in API order.
    ///
    /// Pages are requested one after another with `page_delay` between them.
    /// Any failure aborts the walk and nothing gathered so far is returned.
    pub async fn fetch_all(&self, filter: ShippedFilter) -> Result<Vec<Order>> {
        let page_size = self.config.page_size;
        if page_size == 0 {
            return Err(ClientError::InvalidArgument(
                "page size must be positive".into(),
            ));
        }

        let mut orders = Vec::new();
        let mut offset: u32 = 0;
        let mut pages = 0;

        loop {
            let page = self.fetch_page(filter, Some(page_size), Some(offset)).await?;
            let batch = orders_from_page(&page)?;
            pages += 1;

            debug!(
                shipped = %filter,
                page = pages,
                offset = offset,
                count = batch.len(),
                "orders page fetched"
            );

            orders.extend(batch);

            if !has_next_page(&page) {
                break;
            }

            offset = offset.checked_add(page_size).ok_or_else(|| {
                ClientError::InvalidArgument(format!("offset overflow after {} pages", pages))
            })?;

            tokio::time::sleep(self.config.page_delay).await;
        }

        info!(shipped = %filter, pages = pages, orders = orders.len(), "order history fetched");

        Ok(orders)
    }

    /// Fetches the first page for `filter` and replaces its cache entry.
    pub async fn refresh(&mut self, filter: ShippedFilter) -> Result<Arc<[Order]>> {
        let orders = self.fetch_orders(filter).await?;
        let now = self.clock.now();
        let orders = self.cache.insert(filter, orders, now);

        info!(
            shipped = %filter,
            orders = orders.len(),
            expires_at = ?self.cache.expires_at(filter),
            "order cache refreshed"
        );

        Ok(orders)
    }

    /// Returns the cached orders for `filter`, refreshing them when absent or expired.
    pub async fn cached_orders(&mut self, filter: ShippedFilter) -> Result<Arc<[Order]>> {
        if let Some(orders) = self.cache.get(filter, self.clock.now()) {
            debug!(shipped = %filter, orders = orders.len(), "order cache hit");
            return Ok(orders);
        }

        self.refresh(filter).await
    }

    /// Drops the cache entry for `filter` only.
    pub fn invalidate(&mut self, filter: ShippedFilter) -> bool {
        self.cache.invalidate(filter)
    }

    /// Drops every cache entry.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Newest order, if there is any.
    pub async fn latest_order(&mut self) -> Result<Option<Order>> {
        let orders = self.cached_orders(ShippedFilter::Any).await?;
        Ok(orders.first().cloned())
    }

    /// Average seller payout over up to `limit` of the newest orders.
    pub async fn average_revenue(&mut self, limit: usize) -> Result<Decimal> {
        let orders = self.cached_orders(ShippedFilter::Any).await?;
        Ok(stats::average_revenue(&orders, limit)?)
    }

    /// Average shipping cost over up to `limit` of the newest orders.
    pub async fn average_shipping(&mut self, limit: usize) -> Result<Decimal> {
        let orders = self.cached_orders(ShippedFilter::Any).await?;
        Ok(stats::average_shipping(&orders, limit)?)
    }

    /// Average time between consecutive orders among the `limit + 1` newest.
    pub async fn average_interval(&mut self, limit: usize) -> Result<TimeDelta> {
        let orders = self.cached_orders(ShippedFilter::Any).await?;
        Ok(stats::average_interval(&orders, limit)?)
    }

    /// All rolling statistics from a single cache read.
    pub async fn summary(&mut self, limit: usize) -> Result<Summary> {
        let orders = self.cached_orders(ShippedFilter::Any).await?;
        Ok(stats::summarize(&orders, limit)?)
    }

    /// Number of requests sent so far, failed ones included.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }
}

/// Decodes a response body. An empty body is an error, unlike an empty JSON value.
fn decode(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ClientError::Decode {
            reason: "empty response body".into(),
            body: EMPTY_BODY.into(),
        });
    }

    serde_json::from_slice(body).map_err(|e| ClientError::Decode {
        reason: e.to_string(),
        body: String::from_utf8_lossy(body).to_string(),
    })
}

/// Builds orders from the page's `orders` list.
fn orders_from_page(page: &Value) -> Result<Vec<Order>> {
    let records = page
        .get("orders")
        .and_then(Value::as_array)
        .ok_or_else(|| ClientError::Decode {
            reason: "response has no orders list".into(),
            body: page.to_string(),
        })?;

    records
        .iter()
        .map(|record| Order::from_record(record).map_err(ClientError::from))
        .collect()
}

/// True when the page's `meta.next` is present and not null.
fn has_next_page(page: &Value) -> bool {
    page.get("meta")
        .and_then(|meta| meta.get("next"))
        .is_some_and(|next| !next.is_null())
}

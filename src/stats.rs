//! Rolling statistics over the most recent orders.
//!
//! Every function expects `orders` newest first, as the order API delivers
//! them. The ordering is not enforced; [`average_interval`] logs a warning
//! when it sees an older order ahead of a newer one.

use chrono::TimeDelta;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::domain::{Amount, DomainError, Order};

/// Number of recent orders the averages cover by default.
pub const DEFAULT_STATS_LIMIT: usize = 20;

/// Statistics errors.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Too few orders to divide by.
    #[error("division by zero: need at least {needed} orders, have {available}")]
    DivideByZero { needed: usize, available: usize },

    #[error(transparent)]
    Amount(#[from] DomainError),
}

/// Summary of the rolling statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of the newest order.
    pub latest_order: Option<String>,
    /// Orders the monetary averages were taken over.
    pub sample_size: usize,
    pub average_revenue: Decimal,
    pub average_shipping: Decimal,
    /// `None` until there are at least two orders to measure a gap between.
    pub average_interval: Option<TimeDelta>,
}

/// Average seller payout over up to `limit` of the newest orders.
pub fn average_revenue(orders: &[Order], limit: usize) -> Result<Decimal, StatsError> {
    average_amount(orders, limit, |o| o.seller_payout.as_ref())
}

/// Average shipping cost over up to `limit` of the newest orders.
pub fn average_shipping(orders: &[Order], limit: usize) -> Result<Decimal, StatsError> {
    average_amount(orders, limit, |o| o.shipping_cost.as_ref())
}

/// Averages one monetary field, dividing by the number of orders actually taken.
fn average_amount<F>(orders: &[Order], limit: usize, field: F) -> Result<Decimal, StatsError>
where
    F: Fn(&Order) -> Option<&Amount>,
{
    let taken = &orders[..limit.min(orders.len())];
    if taken.is_empty() {
        return Err(StatsError::DivideByZero {
            needed: 1,
            available: 0,
        });
    }

    let mut sum = Decimal::ZERO;
    for order in taken {
        let amount = field(order).ok_or_else(|| DomainError::InvalidAmount {
            value: "null".to_string(),
            reason: format!(
                "order {} has no amount",
                order.number.as_deref().unwrap_or("?")
            ),
        })?;
        sum += amount.to_decimal()?;
    }

    Ok(sum / Decimal::from(taken.len()))
}

/// Average time between consecutive orders among the `limit + 1` newest.
///
/// Each gap is the newer order's date minus the older one's, so a newest-first
/// sequence yields non-negative gaps.
pub fn average_interval(orders: &[Order], limit: usize) -> Result<TimeDelta, StatsError> {
    let taken = &orders[..limit.saturating_add(1).min(orders.len())];
    let gaps = limit.min(taken.len().saturating_sub(1));
    if gaps == 0 {
        return Err(StatsError::DivideByZero {
            needed: 2,
            available: taken.len(),
        });
    }

    let mut total = TimeDelta::zero();
    for pair in taken.windows(2) {
        let gap = pair[0].date - pair[1].date;
        if gap < TimeDelta::zero() {
            warn!(
                newer = ?pair[0].number,
                older = ?pair[1].number,
                "orders are not newest first"
            );
        }
        total = total + gap;
    }

    Ok(total / i32::try_from(gaps).unwrap_or(i32::MAX))
}

/// Computes all rolling statistics over up to `limit` of the newest orders.
///
/// A single order is enough for a summary; the interval is left out then.
pub fn summarize(orders: &[Order], limit: usize) -> Result<Summary, StatsError> {
    let average_interval = match average_interval(orders, limit) {
        Ok(interval) => Some(interval),
        Err(StatsError::DivideByZero { .. }) if !orders.is_empty() => None,
        Err(e) => return Err(e),
    };

    Ok(Summary {
        latest_order: orders.first().and_then(|o| o.number.clone()),
        sample_size: limit.min(orders.len()),
        average_revenue: average_revenue(orders, limit)?,
        average_shipping: average_shipping(orders, limit)?,
        average_interval,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    /// Builds an order placed `hours_ago` hours before a fixed reference time.
    fn order(number: u32, hours_ago: i64, payout: &str, shipping: &str) -> Order {
        let date = chrono::DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc)
            - TimeDelta::hours(hours_ago);
        Order::from_record(&json!({
            "date": date.to_rfc3339(),
            "number": number,
            "total_seller": payout,
            "total_shipping": shipping,
        }))
        .unwrap()
    }

    /// Newest first, one order every 2 hours.
    fn five_orders() -> Vec<Order> {
        vec![
            order(5, 0, "10", "1.00"),
            order(4, 2, "20", "2.00"),
            order(3, 4, "30", "3.00"),
            order(2, 6, "40", "4.00"),
            order(1, 8, "50", "5.00"),
        ]
    }

    #[test]
    fn test_average_revenue_divides_by_orders_taken() {
        let avg = average_revenue(&five_orders(), 20).unwrap();
        assert_eq!(avg, Decimal::from(30));
    }

    #[test]
    fn test_average_revenue_respects_limit() {
        let avg = average_revenue(&five_orders(), 2).unwrap();
        assert_eq!(avg, Decimal::from(15));
    }

    #[test]
    fn test_average_revenue_is_exact() {
        let orders = vec![
            order(3, 0, "0.10", "0"),
            order(2, 1, "0.20", "0"),
            order(1, 2, "0.30", "0"),
        ];
        let avg = average_revenue(&orders, 20).unwrap();
        assert_eq!(avg, Decimal::from_str("0.2").unwrap());
    }

    #[test]
    fn test_average_revenue_empty_is_divide_by_zero() {
        let err = average_revenue(&[], 20).unwrap_err();
        assert!(matches!(
            err,
            StatsError::DivideByZero {
                needed: 1,
                available: 0
            }
        ));
    }

    #[test]
    fn test_average_revenue_zero_limit_is_divide_by_zero() {
        let err = average_revenue(&five_orders(), 0).unwrap_err();
        assert!(matches!(err, StatsError::DivideByZero { .. }));
    }

    #[test]
    fn test_average_shipping() {
        let avg = average_shipping(&five_orders(), 4).unwrap();
        assert_eq!(avg, Decimal::from_str("2.5").unwrap());
    }

    #[test]
    fn test_average_revenue_bad_amount() {
        let orders = vec![order(1, 0, "n/a", "0")];
        let err = average_revenue(&orders, 20).unwrap_err();
        assert!(matches!(
            err,
            StatsError::Amount(DomainError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_average_revenue_missing_amount() {
        let orders = vec![Order::from_record(&json!({ "date": "2024-06-01T12:00:00" })).unwrap()];
        let err = average_revenue(&orders, 20).unwrap_err();
        assert!(err.to_string().contains("has no amount"));
    }

    #[test]
    fn test_average_interval() {
        let avg = average_interval(&five_orders(), 20).unwrap();
        assert_eq!(avg, TimeDelta::hours(2));
    }

    #[test]
    fn test_average_interval_takes_limit_plus_one() {
        let orders = vec![
            order(4, 0, "0", "0"),
            order(3, 1, "0", "0"),
            order(2, 3, "0", "0"),
            order(1, 10, "0", "0"),
        ];
        // limit 2 covers orders 4, 3, 2: gaps of 1h and 2h.
        let avg = average_interval(&orders, 2).unwrap();
        assert_eq!(avg, TimeDelta::minutes(90));
    }

    #[test]
    fn test_average_interval_single_order_is_divide_by_zero() {
        let orders = vec![order(1, 0, "0", "0")];
        let err = average_interval(&orders, 20).unwrap_err();
        assert!(matches!(
            err,
            StatsError::DivideByZero {
                needed: 2,
                available: 1
            }
        ));
    }

    #[test]
    fn test_average_interval_empty_is_divide_by_zero() {
        assert!(matches!(
            average_interval(&[], 20),
            Err(StatsError::DivideByZero { available: 0, .. })
        ));
    }

    #[test]
    fn test_average_interval_out_of_order_is_negative() {
        let mut orders = five_orders();
        orders.reverse();
        let avg = average_interval(&orders, 20).unwrap();
        assert_eq!(avg, TimeDelta::hours(-2));
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&five_orders(), 20).unwrap();
        assert_eq!(summary.latest_order.as_deref(), Some("5"));
        assert_eq!(summary.sample_size, 5);
        assert_eq!(summary.average_revenue, Decimal::from(30));
        assert_eq!(summary.average_shipping, Decimal::from(3));
        assert_eq!(summary.average_interval, Some(TimeDelta::hours(2)));
    }

    #[test]
    fn test_summarize_single_order_has_no_interval() {
        let orders = &five_orders()[..1];
        let summary = summarize(orders, 20).unwrap();
        assert_eq!(summary.latest_order.as_deref(), Some("5"));
        assert_eq!(summary.sample_size, 1);
        assert_eq!(summary.average_revenue, Decimal::from(10));
        assert_eq!(summary.average_interval, None);
    }

    #[test]
    fn test_summarize_limit_one_has_no_interval() {
        let summary = summarize(&five_orders(), 1).unwrap();
        assert_eq!(summary.sample_size, 1);
        assert_eq!(summary.average_interval, None);
    }

    #[test]
    fn test_summarize_empty_is_divide_by_zero() {
        assert!(matches!(
            summarize(&[], 20),
            Err(StatsError::DivideByZero { needed: 1, available: 0 })
        ));
    }
}

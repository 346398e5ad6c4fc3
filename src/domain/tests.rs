//! Tests for domain models.

use super::*;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

fn shipped_record() -> serde_json::Value {
    json!({
        "date": "2016-05-02T20:31:49.466843",
        "date_shipped": "2016-05-04T09:00:00",
        "items": [
            {
                "model_number": "RF-01",
                "options": "Assembled",
                "quantity": 2,
                "sku": "rf01-a",
                "price_unit": "12.50",
                "price_total": "25.00",
                "product": "Radio Board"
            },
            {
                "model_number": null,
                "options": null,
                "quantity": 1,
                "sku": null,
                "price_unit": 4.0,
                "price_total": 4.0,
                "product": "Antenna"
            }
        ],
        "shipped": true,
        "refunded": false,
        "number": 10423,
        "email": "buyer@example.com",
        "phone": "+1 555 0100",
        "shipping_city": "Springfield",
        "shipping_country": "United States",
        "shipping_country_code": "US",
        "shipping_name": "Jane Doe",
        "shipping_instructions": "Leave at door",
        "shipping_postcode": "12345",
        "shipping_service": "USPS First Class",
        "shipping_state": "IL",
        "shipping_street": "1 Main St",
        "total_seller": "31.20",
        "total_shipping": "5.00",
        "total_subtotal": "29.00",
        "total_tindiefee": "1.45",
        "total_ccfee": "1.35",
        "tracking_code": "9400100000000000000000",
        "tracking_url": "https://tools.usps.com/go/TrackConfirmAction?tLabels=9400100000000000000000"
    })
}

// ==================== Order construction tests ====================

#[test]
fn test_order_from_shipped_record() {
    let order = Order::from_record(&shipped_record()).unwrap();

    assert_eq!(
        order.date,
        Utc.with_ymd_and_hms(2016, 5, 2, 20, 31, 49).unwrap()
            + chrono::Duration::microseconds(466_843)
    );
    assert_eq!(
        order.date_shipped,
        Some(Utc.with_ymd_and_hms(2016, 5, 4, 9, 0, 0).unwrap())
    );
    assert!(order.shipped);
    assert!(!order.refunded);
    assert_eq!(order.number.as_deref(), Some("10423"));
    assert_eq!(order.recipient_email.as_deref(), Some("buyer@example.com"));
    assert_eq!(order.recipient_phone.as_deref(), Some("+1 555 0100"));
    assert_eq!(order.address.country_code.as_deref(), Some("US"));
    assert_eq!(order.address.service.as_deref(), Some("USPS First Class"));
    assert_eq!(order.seller_payout, Some(Amount::new("31.20")));
    assert_eq!(order.shipping_cost, Some(Amount::new("5.00")));
    assert_eq!(order.subtotal, Some(Amount::new("29.00")));
    assert_eq!(order.marketplace_fee, Some(Amount::new("1.45")));
    assert_eq!(order.processing_fee, Some(Amount::new("1.35")));
    assert_eq!(order.tracking_code.as_deref(), Some("9400100000000000000000"));
    assert!(order.tracking_url.is_some());
    assert_eq!(order.raw, shipped_record());
}

#[test]
fn test_order_products_keep_order_and_fields() {
    let order = Order::from_record(&shipped_record()).unwrap();

    assert_eq!(order.products.len(), 2);
    let first = &order.products[0];
    assert_eq!(first.name, "Radio Board");
    assert_eq!(first.model.as_deref(), Some("RF-01"));
    assert_eq!(first.options, Some(json!("Assembled")));
    assert_eq!(first.quantity, 2);
    assert_eq!(first.sku.as_deref(), Some("rf01-a"));
    assert_eq!(first.unit_price, Some(Amount::new("12.50")));
    assert_eq!(first.total_price, Some(Amount::new("25.00")));

    let second = &order.products[1];
    assert_eq!(second.name, "Antenna");
    assert_eq!(second.model, None);
    assert_eq!(second.unit_price, Some(Amount::new("4.0")));
    assert_eq!(order.item_count(), 3);
}

#[test]
fn test_order_address_block() {
    let order = Order::from_record(&shipped_record()).unwrap();
    assert_eq!(
        order.address_block,
        "Jane Doe\n1 Main St\nSpringfield IL 12345\nUnited States"
    );
}

#[test]
fn test_unshipped_order_ignores_shipping_fields() {
    let mut record = shipped_record();
    record["shipped"] = json!(false);

    let order = Order::from_record(&record).unwrap();

    assert!(!order.shipped);
    assert_eq!(order.date_shipped, None);
    assert_eq!(order.tracking_code, None);
    assert_eq!(order.tracking_url, None);
}

#[test]
fn test_unshipped_order_ignores_invalid_shipped_date() {
    let mut record = shipped_record();
    record["shipped"] = json!(false);
    record["date_shipped"] = json!("not a date");

    assert!(Order::from_record(&record).is_ok());
}

#[test]
fn test_shipped_order_with_null_shipped_date() {
    let mut record = shipped_record();
    record["date_shipped"] = json!(null);

    let order = Order::from_record(&record).unwrap();
    assert!(order.shipped);
    assert_eq!(order.date_shipped, None);
}

#[test]
fn test_order_missing_date_is_invalid() {
    let mut record = shipped_record();
    record.as_object_mut().unwrap().remove("date");

    let err = Order::from_record(&record).unwrap_err();
    assert!(matches!(err, DomainError::InvalidRecord(_)));
}

#[test]
fn test_order_bad_date_is_invalid() {
    let mut record = shipped_record();
    record["date"] = json!("yesterday");

    let err = Order::from_record(&record).unwrap_err();
    assert!(err.to_string().contains("invalid timestamp"));
}

#[test]
fn test_order_rfc3339_date() {
    let record = json!({ "date": "2024-01-15T10:00:00+02:00" });
    let order = Order::from_record(&record).unwrap();
    assert_eq!(order.date, Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap());
}

#[test]
fn test_sparse_order_record() {
    let record = json!({ "date": "2024-01-15T10:00:00" });
    let order = Order::from_record(&record).unwrap();

    assert!(order.products.is_empty());
    assert!(!order.shipped);
    assert_eq!(order.number, None);
    assert_eq!(order.seller_payout, None);
    assert_eq!(order.address_block, "\n\n  \n");
}

#[test]
fn test_order_record_not_an_object() {
    let err = Order::from_record(&json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, DomainError::InvalidRecord(_)));
}

#[test]
fn test_order_record_with_bad_amount_type() {
    let mut record = shipped_record();
    record["total_seller"] = json!({ "amount": 1 });

    assert!(Order::from_record(&record).is_err());
}

// ==================== Amount tests ====================

#[test]
fn test_amount_to_decimal() {
    assert_eq!(
        Amount::new("31.20").to_decimal().unwrap(),
        Decimal::from_str("31.2").unwrap()
    );
    assert_eq!(Amount::new(" 7 ").to_decimal().unwrap(), Decimal::from(7));
}

#[test]
fn test_amount_scientific_notation() {
    assert_eq!(Amount::new("1e2").to_decimal().unwrap(), Decimal::from(100));
}

#[test]
fn test_amount_invalid() {
    let err = Amount::new("ten dollars").to_decimal().unwrap_err();
    assert!(matches!(err, DomainError::InvalidAmount { .. }));
}

#[test]
fn test_amount_keeps_text() {
    let amount: Amount = serde_json::from_value(json!("10.50")).unwrap();
    assert_eq!(amount.as_str(), "10.50");
    assert_eq!(amount.to_string(), "10.50");
}

// ==================== ShippedFilter tests ====================

#[test]
fn test_filter_from_option() {
    assert_eq!(ShippedFilter::from(None), ShippedFilter::Any);
    assert_eq!(ShippedFilter::from(Some(true)), ShippedFilter::Shipped);
    assert_eq!(ShippedFilter::from(Some(false)), ShippedFilter::Unshipped);
    assert_eq!(Option::<bool>::from(ShippedFilter::Shipped), Some(true));
}

#[test]
fn test_filter_query_value() {
    assert_eq!(ShippedFilter::Any.query_value(), None);
    assert_eq!(ShippedFilter::Shipped.query_value(), Some("true"));
    assert_eq!(ShippedFilter::Unshipped.query_value(), Some("false"));
}

#[test]
fn test_filter_from_str() {
    assert_eq!("true".parse::<ShippedFilter>().unwrap(), ShippedFilter::Shipped);
    assert_eq!("False".parse::<ShippedFilter>().unwrap(), ShippedFilter::Unshipped);
    assert_eq!("".parse::<ShippedFilter>().unwrap(), ShippedFilter::Any);
    assert_eq!("any".parse::<ShippedFilter>().unwrap(), ShippedFilter::Any);
}

#[test]
fn test_filter_from_str_invalid() {
    let err = "maybe".parse::<ShippedFilter>().unwrap_err();
    assert!(matches!(err, DomainError::InvalidFilter(ref s) if s == "maybe"));
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    closure, date, market_location, one_off, product, thursday_schedule, time, zone,
};
use crate::{
    CartLine, DomainError, FulfillmentMethod, ProductVariant, representative_product,
    validate_cart, validate_closure_unique, validate_customer, validate_delivery_schedule,
    validate_delivery_zone, validate_one_off, validate_one_off_unique, validate_pickup_location,
    validate_product, validate_variant,
};

#[test]
fn test_validate_delivery_schedule() {
    assert!(validate_delivery_schedule(&thursday_schedule(1)).is_ok());

    let mut unnamed = thursday_schedule(1);
    unnamed.name = String::from("   ");
    assert!(matches!(
        validate_delivery_schedule(&unnamed),
        Err(DomainError::InvalidName(_))
    ));

    let mut slow = thursday_schedule(1);
    slow.lead_time_days = 400;
    assert!(matches!(
        validate_delivery_schedule(&slow),
        Err(DomainError::InvalidLeadTime(400))
    ));
}

#[test]
fn test_validate_pickup_location_requires_days() {
    assert!(validate_pickup_location(&market_location(1)).is_ok());

    let mut never = market_location(1);
    never.pickup_days.clear();
    assert_eq!(
        validate_pickup_location(&never),
        Err(DomainError::NoPickupDays)
    );
}

#[test]
fn test_validate_delivery_zone() {
    assert!(validate_delivery_zone(&zone(1, "Downtown", &["83702"], 500, 1)).is_ok());
    assert_eq!(
        validate_delivery_zone(&zone(1, "Empty", &[], 500, 1)),
        Err(DomainError::EmptyZipCodeSet)
    );
    assert!(matches!(
        validate_delivery_zone(&zone(1, "Negative", &["83702"], -1, 1)),
        Err(DomainError::InvalidAmount { .. })
    ));
}

#[test]
fn test_closure_date_must_be_unique() {
    let existing = [closure(1, date(2026, 12, 25), true, true)];

    assert_eq!(
        validate_closure_unique(date(2026, 12, 25), &existing, None),
        Err(DomainError::DuplicateClosureDate(date(2026, 12, 25)))
    );
    assert!(validate_closure_unique(date(2026, 12, 25), &existing, Some(1)).is_ok());
    assert!(validate_closure_unique(date(2026, 12, 26), &existing, None).is_ok());
}

#[test]
fn test_one_off_unique_per_date_and_method() {
    let existing = [one_off(1, date(2026, 12, 24), FulfillmentMethod::Delivery)];

    assert!(
        validate_one_off_unique(
            date(2026, 12, 24),
            FulfillmentMethod::Delivery,
            &existing,
            None
        )
        .is_err()
    );
    assert!(
        validate_one_off_unique(date(2026, 12, 24), FulfillmentMethod::Pickup, &existing, None)
            .is_ok()
    );
}

#[test]
fn test_one_off_time_window_must_be_complete_and_ordered() {
    let mut half = one_off(1, date(2026, 12, 24), FulfillmentMethod::Delivery);
    half.time_window_start = Some(time(9, 0));
    assert!(matches!(
        validate_one_off(&half),
        Err(DomainError::InvalidTimeWindow { .. })
    ));

    let mut backwards = half.clone();
    backwards.time_window_end = Some(time(8, 0));
    assert!(validate_one_off(&backwards).is_err());

    let mut ok = half;
    ok.time_window_end = Some(time(12, 0));
    assert!(validate_one_off(&ok).is_ok());
}

#[test]
fn test_validate_customer() {
    assert!(validate_customer("Ada", "ada@example.com", "208-555-0100").is_ok());
    assert!(validate_customer("", "ada@example.com", "208-555-0100").is_err());
    assert!(validate_customer("Ada", "ada.example.com", "208-555-0100").is_err());
    assert!(validate_customer("Ada", "@example.com", "208-555-0100").is_err());
    assert!(validate_customer("Ada", "ada@example.com", " ").is_err());
}

#[test]
fn test_validate_cart() {
    assert_eq!(validate_cart(&[]), Err(DomainError::EmptyCart));

    let lines = [
        CartLine {
            product_id: 3,
            variant_id: None,
            quantity: 2,
        },
        CartLine {
            product_id: 5,
            variant_id: Some(1),
            quantity: 0,
        },
    ];
    assert_eq!(
        validate_cart(&lines),
        Err(DomainError::InvalidQuantity {
            product_id: 5,
            quantity: 0
        })
    );
}

#[test]
fn test_representative_product_is_first_line() {
    let lines = [
        CartLine {
            product_id: 8,
            variant_id: None,
            quantity: 1,
        },
        CartLine {
            product_id: 2,
            variant_id: None,
            quantity: 1,
        },
    ];
    assert_eq!(representative_product(&lines), Some(8));
    assert_eq!(representative_product(&[]), None);
}

#[test]
fn test_validate_product() {
    assert!(validate_product(&product(1)).is_ok());

    let mut negative = product(1);
    negative.price_cents = -1;
    assert!(matches!(
        validate_product(&negative),
        Err(DomainError::InvalidAmount { cents: -1, .. })
    ));

    let mut slow = product(1);
    slow.lead_time_days = Some(366);
    assert!(matches!(
        validate_product(&slow),
        Err(DomainError::InvalidLeadTime(366))
    ));
}

#[test]
fn test_validate_variant() {
    let variant = ProductVariant {
        id: 1,
        product_id: 1,
        name: String::from("Half Dozen"),
        price_cents: 1500,
        quantity_available: 0,
        is_active: true,
    };
    assert!(validate_variant(&variant).is_ok());

    let unnamed = ProductVariant {
        name: String::new(),
        ..variant
    };
    assert!(matches!(
        validate_variant(&unnamed),
        Err(DomainError::InvalidName(_))
    ));
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bakehouse_domain::{FulfillmentMethod, TaxRate};

use super::helpers::{cart, loaf, settings, shop, tuesday_morning};
use crate::{
    ApiError, CalculateDeliveryFeeRequest, calculate_delivery_fee, get_available_delivery_dates,
    get_available_pickup_dates, list_storefront_pickup_locations, list_storefront_products,
};

#[test]
fn test_delivery_dates_include_this_thursday() {
    let mut shop = shop();

    let response = get_available_delivery_dates(
        &mut shop.store,
        None,
        None,
        tuesday_morning(),
        &settings().resolver,
    )
    .unwrap();

    assert_eq!(response.method, FulfillmentMethod::Delivery);
    assert_eq!(response.dates[0].date, "2026-01-15");
    assert_eq!(response.dates[0].time_window, "2:00 PM - 6:00 PM");
    // Four weeks of Thursdays.
    assert_eq!(response.dates.len(), 4);
}

#[test]
fn test_delivery_dates_respect_max_dates() {
    let mut shop = shop();

    let response = get_available_delivery_dates(
        &mut shop.store,
        Some(shop.loaf_id),
        Some(2),
        tuesday_morning(),
        &settings().resolver,
    )
    .unwrap();

    assert_eq!(response.dates.len(), 2);
}

#[test]
fn test_delivery_dates_for_unknown_product_is_not_found() {
    let mut shop = shop();

    let result = get_available_delivery_dates(
        &mut shop.store,
        Some(999),
        None,
        tuesday_morning(),
        &settings().resolver,
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_product_without_delivery_has_no_delivery_dates() {
    let mut shop = shop();
    let mut pickup_only = loaf();
    pickup_only.available_for_delivery = false;
    let id = shop.store.create_product(&pickup_only).unwrap();

    let response = get_available_delivery_dates(
        &mut shop.store,
        Some(id),
        None,
        tuesday_morning(),
        &settings().resolver,
    )
    .unwrap();

    assert!(response.dates.is_empty());
}

#[test]
fn test_pickup_dates_start_saturday() {
    let mut shop = shop();

    let response = get_available_pickup_dates(
        &mut shop.store,
        shop.location_id,
        None,
        None,
        tuesday_morning(),
        &settings().resolver,
    )
    .unwrap();

    assert_eq!(response.method, FulfillmentMethod::Pickup);
    assert_eq!(response.dates[0].date, "2026-01-17");
}

#[test]
fn test_pickup_dates_for_unknown_location_is_not_found() {
    let mut shop = shop();

    let result = get_available_pickup_dates(
        &mut shop.store,
        42,
        None,
        None,
        tuesday_morning(),
        &settings().resolver,
    );

    match result {
        Err(ApiError::ResourceNotFound { resource_type, .. }) => {
            assert_eq!(resource_type, "Pickup location");
        }
        other => panic!("expected ResourceNotFound, got {other:?}"),
    }
}

#[test]
fn test_fee_quote_prices_cart_and_tax() {
    let mut shop = shop();
    let request = CalculateDeliveryFeeRequest {
        cart_items: cart(shop.loaf_id, 2),
        zip: String::from("83702"),
    };

    let quote = calculate_delivery_fee(&mut shop.store, &request, TaxRate::default()).unwrap();

    assert!(quote.deliverable);
    assert_eq!(quote.fee_cents, 500);
    assert_eq!(quote.zone.unwrap().name, "Downtown");
    assert_eq!(quote.subtotal_cents, 2400);
    // 6% of 2900.
    assert_eq!(quote.tax_cents, 174);
    assert_eq!(quote.total_cents, 3074);
}

#[test]
fn test_fee_quote_outside_every_zone_is_not_deliverable() {
    let mut shop = shop();
    let request = CalculateDeliveryFeeRequest {
        cart_items: cart(shop.loaf_id, 1),
        zip: String::from("90210"),
    };

    let quote = calculate_delivery_fee(&mut shop.store, &request, TaxRate::default()).unwrap();

    assert!(!quote.deliverable);
    assert_eq!(quote.fee_cents, 0);
    assert!(quote.zone.is_none());
    assert_eq!(quote.subtotal_cents, 1200);
}

#[test]
fn test_fee_quote_rejects_malformed_zip() {
    let mut shop = shop();
    let request = CalculateDeliveryFeeRequest {
        cart_items: cart(shop.loaf_id, 1),
        zip: String::from("8370"),
    };

    let result = calculate_delivery_fee(&mut shop.store, &request, TaxRate::default());

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "zip"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_fee_quote_rejects_empty_cart() {
    let mut shop = shop();
    let request = CalculateDeliveryFeeRequest {
        cart_items: Vec::new(),
        zip: String::from("83702"),
    };

    let result = calculate_delivery_fee(&mut shop.store, &request, TaxRate::default());

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "items"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_fee_quote_overflowing_cart_is_rejected() {
    let mut shop = shop();
    let line = cart(shop.loaf_id, u32::MAX).remove(0);
    let request = CalculateDeliveryFeeRequest {
        cart_items: vec![line; 4000],
        zip: String::from("83702"),
    };

    let result = calculate_delivery_fee(&mut shop.store, &request, TaxRate::default());

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "tax"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_fee_quote_rejects_unknown_product() {
    let mut shop = shop();
    let request = CalculateDeliveryFeeRequest {
        cart_items: cart(777, 1),
        zip: String::from("83702"),
    };

    let result = calculate_delivery_fee(&mut shop.store, &request, TaxRate::default());

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_storefront_lists_only_active_records() {
    let mut shop = shop();
    let mut retired = loaf();
    retired.name = String::from("Retired Rye");
    retired.is_active = false;
    shop.store.create_product(&retired).unwrap();

    let products = list_storefront_products(&mut shop.store).unwrap();
    let locations = list_storefront_pickup_locations(&mut shop.store).unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Sourdough Loaf");
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].pickup_days, vec![6]);
}

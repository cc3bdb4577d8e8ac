// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bakehouse_domain::{Address, FulfillmentMethod};

use super::helpers::{admin, shop, shopper};
use crate::{
    ApiError, ClosureRequest, DeliveryScheduleRequest, DeliveryZoneRequest, OneOffDateRequest,
    PickupLocationRequest, ProductRequest, VariantRequest, create_closure,
    create_delivery_schedule, create_delivery_zone, create_one_off_date, create_pickup_location,
    create_product, create_variant, delete_closure, delete_delivery_zone, delete_product,
    list_closures, list_delivery_schedules, list_delivery_zones, list_one_off_dates,
    list_pickup_locations, list_products, update_delivery_schedule, update_one_off_date,
    update_product, update_variant,
};

fn saturday_schedule() -> DeliveryScheduleRequest {
    DeliveryScheduleRequest {
        name: String::from("Saturday Delivery"),
        day_of_week: 6,
        cutoff_day: 4,
        cutoff_time: String::from("17:00"),
        lead_time_days: 0,
        delivery_time_window: String::from("9:00 AM - 12:00 PM"),
        is_active: true,
    }
}

fn closure_on(date: &str) -> ClosureRequest {
    ClosureRequest {
        closure_date: String::from(date),
        reason: String::from("Holiday"),
        affects_delivery: true,
        affects_pickup: true,
    }
}

fn one_off_on(date: &str, schedule_id: Option<i64>) -> OneOffDateRequest {
    OneOffDateRequest {
        date: String::from(date),
        kind: FulfillmentMethod::Delivery,
        reason: String::from("Christmas Eve"),
        schedule_id,
        time_window_start: Some(String::from("08:00")),
        time_window_end: Some(String::from("12:00")),
        cutoff_day: None,
        cutoff_time: None,
        lead_time_days: None,
    }
}

fn pie() -> ProductRequest {
    ProductRequest {
        name: String::from("Apple Pie"),
        description: String::new(),
        price_cents: 2800,
        quantity_available: 3,
        is_active: true,
        available_for_delivery: true,
        available_for_pickup: true,
        lead_time_days: Some(2),
    }
}

#[test]
fn test_schedule_create_and_update_round_through_weekday_indexes() {
    let mut shop = shop();

    let created = create_delivery_schedule(&mut shop.store, &admin(), &saturday_schedule())
        .unwrap();
    let mut changed = saturday_schedule();
    changed.cutoff_time = String::from("12:30");
    update_delivery_schedule(&mut shop.store, &admin(), created.id, &changed).unwrap();

    let schedules = list_delivery_schedules(&mut shop.store, &admin()).unwrap();
    let saturday = schedules.iter().find(|s| s.id == created.id).unwrap();
    assert_eq!(saturday.day_of_week, 6);
    assert_eq!(saturday.cutoff_day, 4);
    assert_eq!(saturday.cutoff_time, "12:30");
}

#[test]
fn test_schedule_rejects_weekday_out_of_range() {
    let mut shop = shop();
    let mut request = saturday_schedule();
    request.day_of_week = 7;

    let result = create_delivery_schedule(&mut shop.store, &admin(), &request);

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "weekday"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_admin_writes_require_admin() {
    let mut shop = shop();

    let result = create_delivery_schedule(&mut shop.store, &shopper(), &saturday_schedule());

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert!(matches!(
        list_delivery_zones(&mut shop.store, &shopper()),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_zone_requires_zip_codes() {
    let mut shop = shop();
    let request = DeliveryZoneRequest {
        name: String::from("Nowhere"),
        zip_codes: Vec::new(),
        fee_cents: 700,
        priority: 0,
        is_active: true,
    };

    let result = create_delivery_zone(&mut shop.store, &admin(), &request);

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "zip_codes"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_zone_delete_and_missing_zone() {
    let mut shop = shop();

    delete_delivery_zone(&mut shop.store, &admin(), shop.zone_id).unwrap();

    assert!(list_delivery_zones(&mut shop.store, &admin()).unwrap().is_empty());
    assert!(matches!(
        delete_delivery_zone(&mut shop.store, &admin(), shop.zone_id),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_pickup_location_requires_days() {
    let mut shop = shop();
    let request = PickupLocationRequest {
        name: String::from("Farm Stand"),
        address: Address::default(),
        pickup_days: Vec::new(),
        pickup_time_windows: String::new(),
        instructions: String::new(),
        lead_time_days: 0,
        is_active: true,
        requires_preorder: false,
    };

    let result = create_pickup_location(&mut shop.store, &admin(), &request);

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "pickup_days"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
    assert_eq!(list_pickup_locations(&mut shop.store, &admin()).unwrap().len(), 1);
}

#[test]
fn test_second_closure_on_same_date_is_rejected() {
    let mut shop = shop();
    create_closure(&mut shop.store, &admin(), &closure_on("2026-12-25")).unwrap();

    let result = create_closure(&mut shop.store, &admin(), &closure_on("2026-12-25"));

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "unique_closure_date");
        }
        other => panic!("expected DomainRuleViolation, got {other:?}"),
    }
}

#[test]
fn test_closure_delete_reopens_date() {
    let mut shop = shop();
    let created = create_closure(&mut shop.store, &admin(), &closure_on("2026-07-04")).unwrap();

    delete_closure(&mut shop.store, &admin(), created.id).unwrap();

    assert!(list_closures(&mut shop.store, &admin()).unwrap().is_empty());
}

#[test]
fn test_one_off_with_missing_schedule_is_not_found() {
    let mut shop = shop();

    let result = create_one_off_date(&mut shop.store, &admin(), &one_off_on("2026-12-24", Some(99)));

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_one_off_update_may_keep_its_own_date() {
    let mut shop = shop();
    let created = create_one_off_date(
        &mut shop.store,
        &admin(),
        &one_off_on("2026-12-24", Some(shop.schedule_id)),
    )
    .unwrap();
    let mut changed = one_off_on("2026-12-24", Some(shop.schedule_id));
    changed.reason = String::from("Christmas Eve rush");

    update_one_off_date(&mut shop.store, &admin(), created.id, &changed).unwrap();

    let one_offs = list_one_off_dates(&mut shop.store, &admin()).unwrap();
    assert_eq!(one_offs.len(), 1);
    assert_eq!(one_offs[0].reason, "Christmas Eve rush");
    assert_eq!(one_offs[0].time_window_start.as_deref(), Some("08:00"));

    let duplicate = create_one_off_date(&mut shop.store, &admin(), &one_off_on("2026-12-24", None));
    assert!(matches!(
        duplicate,
        Err(ApiError::DomainRuleViolation { .. })
    ));
}

#[test]
fn test_one_off_rejects_half_time_window() {
    let mut shop = shop();
    let mut request = one_off_on("2026-12-24", None);
    request.time_window_end = None;

    let result = create_one_off_date(&mut shop.store, &admin(), &request);

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "time_window"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_product_and_variant_lifecycle() {
    let mut shop = shop();
    let created = create_product(&mut shop.store, &admin(), &pie()).unwrap();
    let variant = create_variant(
        &mut shop.store,
        &admin(),
        created.id,
        &VariantRequest {
            name: String::from("Slice"),
            price_cents: 500,
            quantity_available: 8,
            is_active: true,
        },
    )
    .unwrap();

    let mut restock = pie();
    restock.quantity_available = 10;
    update_product(&mut shop.store, &admin(), created.id, &restock).unwrap();
    update_variant(
        &mut shop.store,
        &admin(),
        variant.id,
        &VariantRequest {
            name: String::from("Slice"),
            price_cents: 550,
            quantity_available: 8,
            is_active: true,
        },
    )
    .unwrap();

    let products = list_products(&mut shop.store, &admin()).unwrap();
    let listed = products.iter().find(|p| p.id == created.id).unwrap();
    assert_eq!(listed.quantity_available, 10);
    assert_eq!(listed.variants.len(), 1);
    assert_eq!(listed.variants[0].price_cents, 550);
    assert_eq!(listed.variants[0].product_id, created.id);

    delete_product(&mut shop.store, &admin(), created.id).unwrap();
    assert_eq!(list_products(&mut shop.store, &admin()).unwrap().len(), 1);
}

#[test]
fn test_product_rejects_negative_price() {
    let mut shop = shop();
    let mut request = pie();
    request.price_cents = -1;

    let result = create_product(&mut shop.store, &admin(), &request);

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_variant_for_missing_product_or_variant() {
    let mut shop = shop();
    let slice = VariantRequest {
        name: String::from("Slice"),
        price_cents: 500,
        quantity_available: 1,
        is_active: true,
    };

    assert!(matches!(
        create_variant(&mut shop.store, &admin(), 555, &slice),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        update_variant(&mut shop.store, &admin(), 555, &slice),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

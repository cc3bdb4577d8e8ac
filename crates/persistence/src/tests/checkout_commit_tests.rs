// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bakehouse_domain::{FulfillmentMethod, FulfillmentStatus, OrderStatus, PaymentStatus};

use super::helpers::{
    date, delivery_plan, item, market, paid_commit, persistence, pickup_plan, sourdough, variant,
    zone,
};
use crate::{OrderCommit, OrderFilter, Persistence, PersistenceError};

struct Fixture {
    store: Persistence,
    loaf_id: i64,
    dozen_id: i64,
    zone_id: i64,
    location_id: i64,
}

fn fixture() -> Fixture {
    let mut store = persistence();
    let loaf_id: i64 = store.create_product(&sourdough(5)).unwrap();
    let dozen_id: i64 = store.create_variant(&variant(loaf_id, 2)).unwrap();
    let zone_id: i64 = store
        .create_delivery_zone(&zone("Downtown", &["83702"], 500, 1))
        .unwrap();
    let location_id: i64 = store.create_pickup_location(&market()).unwrap();
    Fixture {
        store,
        loaf_id,
        dozen_id,
        zone_id,
        location_id,
    }
}

#[test]
fn test_commit_writes_order_items_and_decrements_stock() {
    let mut f = fixture();
    let plan = delivery_plan(f.zone_id, vec![item(f.loaf_id, None, 2)]);

    let committed = f.store.commit_checkout(&plan, &paid_commit()).unwrap();

    let order = f.store.get_order(committed.order_id).unwrap().unwrap();
    assert_eq!(order.order_number, committed.order_number);
    assert_eq!(order.fulfillment_method, FulfillmentMethod::Delivery);
    assert_eq!(order.fulfillment_date, date(2026, 1, 15));
    assert_eq!(order.zone_id, Some(f.zone_id));
    assert_eq!(order.zone_name.as_deref(), Some("Downtown"));
    assert_eq!(order.pickup_location_id, None);
    assert_eq!(order.delivery_address.unwrap().zip, "83702");
    assert_eq!(order.status, OrderStatus::Confirmed);
    assert_eq!(order.fulfillment_status, FulfillmentStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Paid);
    assert_eq!(order.payment_reference.as_deref(), Some("sq_pay_123"));
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.total_cents, 2900);

    let loaf = f.store.get_product(f.loaf_id).unwrap().unwrap();
    assert_eq!(loaf.quantity_available, 3);
}

#[test]
fn test_order_number_follows_assigned_row_id_after_removal() {
    use crate::diesel_schema::orders;
    use diesel::prelude::*;

    let mut f = fixture();
    let plan = delivery_plan(f.zone_id, vec![item(f.loaf_id, None, 1)]);
    let first = f.store.commit_checkout(&plan, &paid_commit()).unwrap();
    let second = f.store.commit_checkout(&plan, &paid_commit()).unwrap();
    assert_eq!(first.order_number, "BH-000001");
    assert_eq!(second.order_number, "BH-000002");

    diesel::delete(orders::table.filter(orders::order_id.eq(second.order_id)))
        .execute(&mut f.store.conn)
        .unwrap();

    let third = f.store.commit_checkout(&plan, &paid_commit()).unwrap();
    assert_eq!(third.order_id, 3);
    assert_eq!(third.order_number, "BH-000003");
    let stored = f.store.get_order(third.order_id).unwrap().unwrap();
    assert_eq!(stored.order_number, "BH-000003");
}

#[test]
fn test_commit_records_merchant_fee() {
    let mut f = fixture();
    let plan = delivery_plan(f.zone_id, vec![item(f.loaf_id, None, 1)]);

    let committed = f.store.commit_checkout(&plan, &paid_commit()).unwrap();

    let fees = f.store.list_merchant_fees(committed.order_id).unwrap();
    assert_eq!(fees.len(), 1);
    assert_eq!(fees[0].provider, "square");
    assert_eq!(fees[0].gross_cents, 1700);
    assert_eq!(fees[0].fee_cents, 65);
    assert_eq!(fees[0].net_cents, 1635);
}

#[test]
fn test_commit_without_fee_writes_no_ledger_entry() {
    let mut f = fixture();
    let plan = pickup_plan(f.location_id, vec![item(f.loaf_id, None, 1)]);
    let commit = OrderCommit {
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_provider: String::from("stripe"),
        payment_reference: Some(String::from("cs_test_1")),
        merchant_fee_cents: None,
    };

    let committed = f.store.commit_checkout(&plan, &commit).unwrap();

    assert!(f.store.list_merchant_fees(committed.order_id).unwrap().is_empty());
    let order = f.store.get_order(committed.order_id).unwrap().unwrap();
    assert_eq!(order.pickup_location_id, Some(f.location_id));
    assert_eq!(
        order.pickup_location_name.as_deref(),
        Some("Capital City Market")
    );
    assert_eq!(order.delivery_address, None);
    assert_eq!(order.zone_id, None);
    assert_eq!(order.delivery_fee_cents, 0);
}

#[test]
fn test_variant_line_decrements_variant_stock() {
    let mut f = fixture();
    let plan = delivery_plan(f.zone_id, vec![item(f.loaf_id, Some(f.dozen_id), 2)]);

    f.store.commit_checkout(&plan, &paid_commit()).unwrap();

    let variants = f.store.list_variants(Some(f.loaf_id)).unwrap();
    assert_eq!(variants[0].quantity_available, 0);
    let loaf = f.store.get_product(f.loaf_id).unwrap().unwrap();
    assert_eq!(loaf.quantity_available, 5);
}

#[test]
fn test_insufficient_stock_rolls_back_everything() {
    let mut f = fixture();
    // First line fits, second line overdraws the variant.
    let plan = delivery_plan(
        f.zone_id,
        vec![
            item(f.loaf_id, None, 2),
            item(f.loaf_id, Some(f.dozen_id), 3),
        ],
    );

    let result = f.store.commit_checkout(&plan, &paid_commit());

    assert_eq!(
        result,
        Err(PersistenceError::InsufficientInventory {
            product_id: f.loaf_id,
            variant_id: Some(f.dozen_id),
        })
    );
    assert_eq!(f.store.count_orders().unwrap(), 0);
    assert_eq!(
        f.store.get_product(f.loaf_id).unwrap().unwrap().quantity_available,
        5
    );
    assert_eq!(
        f.store.list_variants(Some(f.loaf_id)).unwrap()[0].quantity_available,
        2
    );
}

#[test]
fn test_repeated_lines_cannot_oversell() {
    let mut f = fixture();
    let plan = delivery_plan(
        f.zone_id,
        vec![item(f.loaf_id, None, 3), item(f.loaf_id, None, 3)],
    );

    let result = f.store.commit_checkout(&plan, &paid_commit());

    assert!(matches!(
        result,
        Err(PersistenceError::InsufficientInventory { .. })
    ));
    assert_eq!(f.store.count_orders().unwrap(), 0);
}

#[test]
fn test_second_checkout_sees_first_decrement() {
    let mut f = fixture();
    let plan = delivery_plan(f.zone_id, vec![item(f.loaf_id, None, 4)]);

    f.store.commit_checkout(&plan, &paid_commit()).unwrap();
    let second = f.store.commit_checkout(&plan, &paid_commit());

    assert!(second.is_err());
    assert_eq!(f.store.count_orders().unwrap(), 1);
}

#[test]
fn test_order_numbers_are_sequential() {
    let mut f = fixture();
    let plan = delivery_plan(f.zone_id, vec![item(f.loaf_id, None, 1)]);

    let first = f.store.commit_checkout(&plan, &paid_commit()).unwrap();
    let second = f.store.commit_checkout(&plan, &paid_commit()).unwrap();

    assert_eq!(first.order_number, "BH-000001");
    assert_eq!(second.order_number, "BH-000002");
    assert_eq!(
        f.store
            .get_order_by_number("BH-000002")
            .unwrap()
            .unwrap()
            .order_id,
        second.order_id
    );
}

#[test]
fn test_list_orders_filters() {
    let mut f = fixture();
    f.store
        .commit_checkout(
            &delivery_plan(f.zone_id, vec![item(f.loaf_id, None, 1)]),
            &paid_commit(),
        )
        .unwrap();
    f.store
        .commit_checkout(
            &pickup_plan(f.location_id, vec![item(f.loaf_id, None, 1)]),
            &paid_commit(),
        )
        .unwrap();

    let all = f.store.list_orders(&OrderFilter::default()).unwrap();
    assert_eq!(all.len(), 2);

    let pickups = f
        .store
        .list_orders(&OrderFilter {
            fulfillment_method: Some(FulfillmentMethod::Pickup),
            ..OrderFilter::default()
        })
        .unwrap();
    assert_eq!(pickups.len(), 1);
    assert_eq!(pickups[0].items.len(), 1);

    let thursday = f
        .store
        .list_orders(&OrderFilter {
            fulfillment_date: Some(date(2026, 1, 15)),
            ..OrderFilter::default()
        })
        .unwrap();
    assert_eq!(thursday.len(), 1);
    assert_eq!(thursday[0].fulfillment_method, FulfillmentMethod::Delivery);

    let at_market = f
        .store
        .list_orders(&OrderFilter {
            pickup_location_id: Some(f.location_id),
            ..OrderFilter::default()
        })
        .unwrap();
    assert_eq!(at_market.len(), 1);
}

#[test]
fn test_status_updates() {
    let mut f = fixture();
    let committed = f
        .store
        .commit_checkout(
            &delivery_plan(f.zone_id, vec![item(f.loaf_id, None, 1)]),
            &paid_commit(),
        )
        .unwrap();

    f.store
        .update_order_status(committed.order_id, OrderStatus::InProduction)
        .unwrap();
    f.store
        .update_fulfillment_status(committed.order_id, FulfillmentStatus::Preparing)
        .unwrap();

    let order = f.store.get_order(committed.order_id).unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::InProduction);
    assert_eq!(order.fulfillment_status, FulfillmentStatus::Preparing);

    let confirmed = f
        .store
        .list_orders(&OrderFilter {
            status: Some(OrderStatus::Confirmed),
            ..OrderFilter::default()
        })
        .unwrap();
    assert!(confirmed.is_empty());

    assert!(matches!(
        f.store.update_order_status(999, OrderStatus::Cancelled),
        Err(PersistenceError::NotFound(_))
    ));
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Checkout commit and order status mutations.

use bakehouse::{CheckoutPlan, PlannedFulfillment, PlannedItem};
use bakehouse_domain::{FulfillmentStatus, OrderStatus, format_date};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info, warn};

use super::{count_column, require_row};
use crate::backend::PersistenceBackend;
use crate::data_models::{CommittedOrder, OrderCommit};
use crate::diesel_schema::{merchant_fees, order_items, orders, product_variants, products};
use crate::error::PersistenceError;

/// Customer-facing order numbers are `BH-` followed by the zero-padded row id.
fn order_number_for(order_id: i64) -> String {
    format!("BH-{order_id:06}")
}

/// Placeholder held by a freshly inserted order until its row id is known.
/// Only ever visible inside the commit transaction.
const PROVISIONAL_ORDER_NUMBER: &str = "BH-PENDING";

/// Decrements stock for one line if, and only if, enough remains.
fn take_stock(conn: &mut SqliteConnection, item: &PlannedItem) -> Result<(), PersistenceError> {
    let quantity: i64 = i64::from(item.quantity);

    let rows: usize = match item.variant_id {
        Some(variant_id) => diesel::update(
            product_variants::table
                .filter(product_variants::variant_id.eq(variant_id))
                .filter(product_variants::quantity_available.ge(quantity)),
        )
        .set(
            product_variants::quantity_available
                .eq(product_variants::quantity_available - quantity),
        )
        .execute(conn)?,
        None => diesel::update(
            products::table
                .filter(products::product_id.eq(item.product_id))
                .filter(products::quantity_available.ge(quantity)),
        )
        .set(products::quantity_available.eq(products::quantity_available - quantity))
        .execute(conn)?,
    };

    if rows == 0 {
        warn!(
            product_id = item.product_id,
            variant_id = ?item.variant_id,
            quantity,
            "Stock ran out during checkout commit"
        );
        return Err(PersistenceError::InsufficientInventory {
            product_id: item.product_id,
            variant_id: item.variant_id,
        });
    }
    Ok(())
}

fn insert_order(
    conn: &mut SqliteConnection,
    order_number: &str,
    plan: &CheckoutPlan,
    commit: &OrderCommit,
) -> Result<i64, PersistenceError> {
    let (address_json, zone_id, zone_name, location_id, location_name) = match &plan.fulfillment
    {
        PlannedFulfillment::Delivery { address, zone } => (
            Some(serde_json::to_string(address)?),
            Some(zone.id),
            Some(zone.name.clone()),
            None,
            None,
        ),
        PlannedFulfillment::Pickup {
            location_id,
            location_name,
        } => (
            None,
            None,
            None,
            Some(*location_id),
            Some(location_name.clone()),
        ),
    };

    diesel::insert_into(orders::table)
        .values((
            orders::order_number.eq(order_number),
            orders::customer_name.eq(&plan.customer.name),
            orders::customer_email.eq(&plan.customer.email),
            orders::customer_phone.eq(&plan.customer.phone),
            orders::fulfillment_method.eq(plan.fulfillment_method.as_str()),
            orders::fulfillment_date.eq(format_date(plan.fulfillment_date)),
            orders::delivery_address_json.eq(address_json),
            orders::zone_id.eq(zone_id),
            orders::zone_name.eq(zone_name),
            orders::pickup_location_id.eq(location_id),
            orders::pickup_location_name.eq(location_name),
            orders::time_window.eq(&plan.time_window),
            orders::subtotal_cents.eq(plan.totals.subtotal_cents),
            orders::delivery_fee_cents.eq(plan.totals.delivery_fee_cents),
            orders::tax_cents.eq(plan.totals.tax_cents),
            orders::total_cents.eq(plan.totals.total_cents),
            orders::status.eq(commit.status.as_str()),
            orders::fulfillment_status.eq(FulfillmentStatus::Pending.as_str()),
            orders::payment_status.eq(commit.payment_status.as_str()),
            orders::payment_provider.eq(&commit.payment_provider),
            orders::payment_reference.eq(commit.payment_reference.as_deref()),
            orders::notes.eq(&plan.notes),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

fn insert_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    item: &PlannedItem,
) -> Result<(), PersistenceError> {
    diesel::insert_into(order_items::table)
        .values((
            order_items::order_id.eq(order_id),
            order_items::product_id.eq(item.product_id),
            order_items::variant_id.eq(item.variant_id),
            order_items::name.eq(&item.name),
            order_items::unit_price_cents.eq(item.unit_price_cents),
            order_items::quantity.eq(count_column("quantity", item.quantity)?),
            order_items::line_total_cents.eq(item.line_total_cents),
        ))
        .execute(conn)?;
    Ok(())
}

fn insert_merchant_fee(
    conn: &mut SqliteConnection,
    order_id: i64,
    provider: &str,
    gross_cents: i64,
    fee_cents: i64,
) -> Result<(), PersistenceError> {
    debug!(order_id, provider, gross_cents, fee_cents, "Recording merchant fee");

    diesel::insert_into(merchant_fees::table)
        .values((
            merchant_fees::order_id.eq(order_id),
            merchant_fees::provider.eq(provider),
            merchant_fees::gross_cents.eq(gross_cents),
            merchant_fees::fee_cents.eq(fee_cents),
            merchant_fees::net_cents.eq(gross_cents - fee_cents),
        ))
        .execute(conn)?;
    Ok(())
}

/// Writes a planned order, its items and its stock decrements atomically.
///
/// Runs in an `IMMEDIATE` transaction. Every line's stock is decremented
/// with a conditional update; if any line finds too little stock the whole
/// transaction rolls back and nothing is written.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `plan` - The validated, priced checkout plan
/// * `commit` - Payment outcome and provider bookkeeping
///
/// # Errors
///
/// Returns `InsufficientInventory` if stock ran out since the plan was
/// made, or any database error. Either way no rows are written.
pub fn commit_checkout(
    conn: &mut SqliteConnection,
    plan: &CheckoutPlan,
    commit: &OrderCommit,
) -> Result<CommittedOrder, PersistenceError> {
    info!(
        method = %plan.fulfillment_method,
        date = %plan.fulfillment_date,
        lines = plan.items.len(),
        total_cents = plan.totals.total_cents,
        provider = %commit.payment_provider,
        "Committing checkout"
    );

    let committed: CommittedOrder =
        conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
            let order_id: i64 = insert_order(conn, PROVISIONAL_ORDER_NUMBER, plan, commit)?;
            let order_number: String = order_number_for(order_id);
            diesel::update(orders::table.filter(orders::order_id.eq(order_id)))
                .set(orders::order_number.eq(&order_number))
                .execute(conn)?;

            for item in &plan.items {
                insert_item(conn, order_id, item)?;
                take_stock(conn, item)?;
            }

            if let Some(fee_cents) = commit.merchant_fee_cents {
                insert_merchant_fee(
                    conn,
                    order_id,
                    &commit.payment_provider,
                    plan.totals.total_cents,
                    fee_cents,
                )?;
            }

            Ok(CommittedOrder {
                order_id,
                order_number,
            })
        })?;

    info!(
        order_id = committed.order_id,
        order_number = %committed.order_number,
        "Checkout committed"
    );
    Ok(committed)
}

/// Sets an order's lifecycle status.
///
/// # Errors
///
/// Returns `NotFound` if no such order exists.
pub fn update_order_status(
    conn: &mut SqliteConnection,
    order_id: i64,
    status: OrderStatus,
) -> Result<(), PersistenceError> {
    info!(order_id, status = %status, "Updating order status");

    let rows: usize = diesel::update(orders::table.filter(orders::order_id.eq(order_id)))
        .set(orders::status.eq(status.as_str()))
        .execute(conn)?;

    require_row(rows, "order", order_id)
}

/// Sets an order's advisory fulfillment status.
///
/// # Errors
///
/// Returns `NotFound` if no such order exists.
pub fn update_fulfillment_status(
    conn: &mut SqliteConnection,
    order_id: i64,
    status: FulfillmentStatus,
) -> Result<(), PersistenceError> {
    info!(order_id, status = %status, "Updating fulfillment status");

    let rows: usize = diesel::update(orders::table.filter(orders::order_id.eq(order_id)))
        .set(orders::fulfillment_status.eq(status.as_str()))
        .execute(conn)?;

    require_row(rows, "order", order_id)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order, order item and merchant-fee queries.

use std::collections::HashMap;
use std::str::FromStr;

use bakehouse_domain::{
    Address, FulfillmentMethod, FulfillmentStatus, OrderStatus, PaymentStatus, format_date,
    parse_date,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use super::{column_error, unsigned};
use crate::data_models::{MerchantFeeRecord, OrderFilter, OrderItemRecord, OrderRecord};
use crate::diesel_schema::{merchant_fees, order_items, orders};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = orders)]
struct OrderRow {
    order_id: i64,
    order_number: String,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    fulfillment_method: String,
    fulfillment_date: String,
    delivery_address_json: Option<String>,
    zone_id: Option<i64>,
    zone_name: Option<String>,
    pickup_location_id: Option<i64>,
    pickup_location_name: Option<String>,
    time_window: String,
    subtotal_cents: i64,
    delivery_fee_cents: i64,
    tax_cents: i64,
    total_cents: i64,
    status: String,
    fulfillment_status: String,
    payment_status: String,
    payment_provider: String,
    payment_reference: Option<String>,
    notes: String,
    created_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = order_items)]
struct OrderItemRow {
    item_id: i64,
    order_id: i64,
    product_id: i64,
    variant_id: Option<i64>,
    name: String,
    unit_price_cents: i64,
    quantity: i32,
    line_total_cents: i64,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = merchant_fees)]
struct MerchantFeeRow {
    fee_id: i64,
    order_id: i64,
    provider: String,
    gross_cents: i64,
    fee_cents: i64,
    net_cents: i64,
    created_at: String,
}

fn item_from_row(row: OrderItemRow) -> Result<OrderItemRecord, PersistenceError> {
    Ok(OrderItemRecord {
        item_id: row.item_id,
        product_id: row.product_id,
        variant_id: row.variant_id,
        name: row.name,
        unit_price_cents: row.unit_price_cents,
        quantity: unsigned("quantity", row.quantity)?,
        line_total_cents: row.line_total_cents,
    })
}

fn order_from_row(
    row: OrderRow,
    items: Vec<OrderItemRecord>,
) -> Result<OrderRecord, PersistenceError> {
    let delivery_address: Option<Address> = row
        .delivery_address_json
        .as_deref()
        .map(serde_json::from_str)
        .transpose()?;

    Ok(OrderRecord {
        order_id: row.order_id,
        order_number: row.order_number,
        customer_name: row.customer_name,
        customer_email: row.customer_email,
        customer_phone: row.customer_phone,
        fulfillment_method: FulfillmentMethod::from_str(&row.fulfillment_method)
            .map_err(column_error("fulfillment_method"))?,
        fulfillment_date: parse_date(&row.fulfillment_date)
            .map_err(column_error("fulfillment_date"))?,
        delivery_address,
        zone_id: row.zone_id,
        zone_name: row.zone_name,
        pickup_location_id: row.pickup_location_id,
        pickup_location_name: row.pickup_location_name,
        time_window: row.time_window,
        subtotal_cents: row.subtotal_cents,
        delivery_fee_cents: row.delivery_fee_cents,
        tax_cents: row.tax_cents,
        total_cents: row.total_cents,
        status: OrderStatus::from_str(&row.status).map_err(column_error("status"))?,
        fulfillment_status: FulfillmentStatus::from_str(&row.fulfillment_status)
            .map_err(column_error("fulfillment_status"))?,
        payment_status: PaymentStatus::from_str(&row.payment_status)
            .map_err(column_error("payment_status"))?,
        payment_provider: row.payment_provider,
        payment_reference: row.payment_reference,
        notes: row.notes,
        created_at: row.created_at,
        items,
    })
}

fn load_items(
    conn: &mut SqliteConnection,
    order_ids: &[i64],
) -> Result<HashMap<i64, Vec<OrderItemRecord>>, PersistenceError> {
    let rows: Vec<OrderItemRow> = order_items::table
        .filter(order_items::order_id.eq_any(order_ids))
        .select(OrderItemRow::as_select())
        .order_by(order_items::item_id.asc())
        .load(conn)?;

    let mut by_order: HashMap<i64, Vec<OrderItemRecord>> = HashMap::new();
    for row in rows {
        let order_id: i64 = row.order_id;
        by_order.entry(order_id).or_default().push(item_from_row(row)?);
    }
    Ok(by_order)
}

fn attach_items(
    conn: &mut SqliteConnection,
    rows: Vec<OrderRow>,
) -> Result<Vec<OrderRecord>, PersistenceError> {
    let order_ids: Vec<i64> = rows.iter().map(|r| r.order_id).collect();
    let mut items: HashMap<i64, Vec<OrderItemRecord>> = load_items(conn, &order_ids)?;

    rows.into_iter()
        .map(|row| {
            let lines: Vec<OrderItemRecord> = items.remove(&row.order_id).unwrap_or_default();
            order_from_row(row, lines)
        })
        .collect()
}

/// Retrieves an order and its items by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the order does not exist.
pub fn get_order(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> Result<Option<OrderRecord>, PersistenceError> {
    debug!(order_id, "Looking up order");

    let row: Option<OrderRow> = orders::table
        .filter(orders::order_id.eq(order_id))
        .select(OrderRow::as_select())
        .first(conn)
        .optional()?;

    match row {
        Some(row) => Ok(attach_items(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

/// Retrieves an order and its items by its customer-facing number.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if no order has that number.
pub fn get_order_by_number(
    conn: &mut SqliteConnection,
    order_number: &str,
) -> Result<Option<OrderRecord>, PersistenceError> {
    debug!(order_number, "Looking up order by number");

    let row: Option<OrderRow> = orders::table
        .filter(orders::order_number.eq(order_number))
        .select(OrderRow::as_select())
        .first(conn)
        .optional()?;

    match row {
        Some(row) => Ok(attach_items(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

/// Lists orders matching `filter`, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to decode.
pub fn list_orders(
    conn: &mut SqliteConnection,
    filter: &OrderFilter,
) -> Result<Vec<OrderRecord>, PersistenceError> {
    debug!(?filter, "Listing orders");

    let mut query = orders::table
        .select(OrderRow::as_select())
        .order_by(orders::order_id.asc())
        .into_boxed();

    if let Some(date) = filter.fulfillment_date {
        query = query.filter(orders::fulfillment_date.eq(format_date(date)));
    }
    if let Some(method) = filter.fulfillment_method {
        query = query.filter(orders::fulfillment_method.eq(method.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(orders::status.eq(status.as_str()));
    }
    if let Some(location_id) = filter.pickup_location_id {
        query = query.filter(orders::pickup_location_id.eq(location_id));
    }

    let rows: Vec<OrderRow> = query.load(conn)?;
    attach_items(conn, rows)
}

/// Counts stored orders.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_orders(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    let total: i64 = orders::table
        .select(count(orders::order_id))
        .first(conn)?;
    Ok(total)
}

/// Lists merchant-fee entries for an order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_merchant_fees(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> Result<Vec<MerchantFeeRecord>, PersistenceError> {
    debug!(order_id, "Listing merchant fees");

    let rows: Vec<MerchantFeeRow> = merchant_fees::table
        .filter(merchant_fees::order_id.eq(order_id))
        .select(MerchantFeeRow::as_select())
        .order_by(merchant_fees::fee_id.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| MerchantFeeRecord {
            fee_id: row.fee_id,
            order_id: row.order_id,
            provider: row.provider,
            gross_cents: row.gross_cents,
            fee_cents: row.fee_cents,
            net_cents: row.net_cents,
            created_at: row.created_at,
        })
        .collect())
}

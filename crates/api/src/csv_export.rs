// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV exports for the delivery driver and the pickup table.
//!
//! Cancelled and payment-failed orders never appear in an export.

use bakehouse_domain::{FulfillmentMethod, OrderStatus};
use bakehouse_persistence::OrderRecord;

use crate::error::ApiError;

const DELIVERY_HEADERS: &[&str] = &[
    "Order Number",
    "Customer Name",
    "Phone",
    "Email",
    "Address",
    "City",
    "ZIP",
    "Zone",
    "Time Window",
    "Items",
    "Notes",
    "Status",
];

const PICKUP_HEADERS: &[&str] = &[
    "Order Number",
    "Customer Name",
    "Phone",
    "Email",
    "Location",
    "Time Window",
    "Items",
    "Notes",
    "Status",
];

/// Returns true if the order belongs on a route or pickup sheet.
#[must_use]
pub const fn is_exportable(order: &OrderRecord) -> bool {
    !matches!(
        order.status,
        OrderStatus::Cancelled | OrderStatus::PaymentFailed
    )
}

/// Summarizes an order's lines as `2x Sourdough Loaf; 1x Rye`.
#[must_use]
pub fn items_summary(order: &OrderRecord) -> String {
    order
        .items
        .iter()
        .map(|item| format!("{}x {}", item.quantity, item.name))
        .collect::<Vec<_>>()
        .join("; ")
}

fn write_csv(headers: &[&str], rows: Vec<Vec<String>>) -> Result<String, ApiError> {
    let internal = |e: &dyn std::fmt::Display| ApiError::Internal {
        message: format!("Failed to write CSV: {e}"),
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers).map_err(|e| internal(&e))?;
    for row in rows {
        writer.write_record(&row).map_err(|e| internal(&e))?;
    }
    let bytes: Vec<u8> = writer.into_inner().map_err(|e| internal(&e))?;
    String::from_utf8(bytes).map_err(|e| internal(&e))
}

/// Builds the delivery route sheet.
///
/// Pickup orders in `orders` are skipped.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the CSV cannot be written.
pub fn delivery_route_csv(orders: &[OrderRecord]) -> Result<String, ApiError> {
    let rows: Vec<Vec<String>> = orders
        .iter()
        .filter(|o| o.fulfillment_method == FulfillmentMethod::Delivery && is_exportable(o))
        .map(|order| {
            let address = order.delivery_address.clone().unwrap_or_default();
            vec![
                order.order_number.clone(),
                order.customer_name.clone(),
                order.customer_phone.clone(),
                order.customer_email.clone(),
                address.street,
                address.city,
                address.zip,
                order.zone_name.clone().unwrap_or_default(),
                order.time_window.clone(),
                items_summary(order),
                order.notes.clone(),
                order.status.as_str().to_string(),
            ]
        })
        .collect();
    write_csv(DELIVERY_HEADERS, rows)
}

/// Builds the pickup sheet.
///
/// Delivery orders in `orders` are skipped.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the CSV cannot be written.
pub fn pickup_list_csv(orders: &[OrderRecord]) -> Result<String, ApiError> {
    let rows: Vec<Vec<String>> = orders
        .iter()
        .filter(|o| o.fulfillment_method == FulfillmentMethod::Pickup && is_exportable(o))
        .map(|order| {
            vec![
                order.order_number.clone(),
                order.customer_name.clone(),
                order.customer_phone.clone(),
                order.customer_email.clone(),
                order.pickup_location_name.clone().unwrap_or_default(),
                order.time_window.clone(),
                items_summary(order),
                order.notes.clone(),
                order.status.as_str().to_string(),
            ]
        })
        .collect();
    write_csv(PICKUP_HEADERS, rows)
}

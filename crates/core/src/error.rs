// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bakehouse_domain::{DomainError, FulfillmentMethod};
use chrono::NaiveDate;

/// Errors that can occur while planning a checkout or applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A cart line names a product that does not exist.
    ProductNotFound(i64),
    /// A cart line names a variant that does not exist for its product.
    VariantNotFound {
        /// The product on the line.
        product_id: i64,
        /// The missing variant.
        variant_id: i64,
    },
    /// A pickup location does not exist.
    PickupLocationNotFound(i64),
    /// A line cannot be filled from current stock.
    InsufficientInventory {
        /// The product on the line.
        product_id: i64,
        /// The variant on the line, if any.
        variant_id: Option<i64>,
        /// Quantity requested.
        requested: u32,
        /// Quantity on hand (zero for inactive items).
        available: i64,
    },
    /// A product in the cart cannot be fulfilled by the chosen method.
    ProductNotOffered {
        /// The product.
        product_id: i64,
        /// The chosen method.
        method: FulfillmentMethod,
    },
    /// The chosen date is not among the offered dates.
    DateNotOffered {
        /// The requested date.
        date: NaiveDate,
        /// The chosen method.
        method: FulfillmentMethod,
    },
    /// No active delivery zone covers the ZIP code.
    NoDeliveryZone(String),
    /// The order is cancelled or failed and takes no further fulfillment updates.
    OrderClosed {
        /// The order number.
        order_number: String,
        /// The order's current status.
        status: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ProductNotFound(id) => write!(f, "Product {id} not found"),
            Self::VariantNotFound {
                product_id,
                variant_id,
            } => write!(f, "Variant {variant_id} not found for product {product_id}"),
            Self::PickupLocationNotFound(id) => write!(f, "Pickup location {id} not found"),
            Self::InsufficientInventory {
                product_id,
                variant_id,
                requested,
                available,
            } => match variant_id {
                Some(variant_id) => write!(
                    f,
                    "Insufficient inventory for product {product_id} variant {variant_id}: requested {requested}, available {available}"
                ),
                None => write!(
                    f,
                    "Insufficient inventory for product {product_id}: requested {requested}, available {available}"
                ),
            },
            Self::ProductNotOffered { product_id, method } => {
                write!(f, "Product {product_id} is not available for {method}")
            }
            Self::DateNotOffered { date, method } => {
                write!(f, "{date} is not an available {method} date")
            }
            Self::NoDeliveryZone(zip) => write!(f, "We do not deliver to ZIP code {zip}"),
            Self::OrderClosed {
                order_number,
                status,
            } => write!(f, "Order {order_number} is {status} and cannot be updated"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

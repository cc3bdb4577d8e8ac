// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bakehouse::{Catalog, FulfillmentRules, OrderState};
use bakehouse_domain::{
    Address, CalendarClosure, DeliverySchedule, DeliveryZone, FulfillmentMethod,
    FulfillmentStatus, OneOffDate, OrderStatus, PaymentStatus, PickupLocation, Product,
    ProductVariant,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored operator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorData {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub is_disabled: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A stored login session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub operator_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// Every rule the date resolver and fee calculator read, loaded at once.
#[derive(Debug, Clone, Default)]
pub struct FulfillmentData {
    pub schedules: Vec<DeliverySchedule>,
    pub pickup_locations: Vec<PickupLocation>,
    pub zones: Vec<DeliveryZone>,
    pub one_offs: Vec<OneOffDate>,
    pub closures: Vec<CalendarClosure>,
}

impl FulfillmentData {
    /// Borrows the loaded rules in the shape checkout planning expects.
    #[must_use]
    pub fn rules(&self) -> FulfillmentRules<'_> {
        FulfillmentRules {
            schedules: &self.schedules,
            pickup_locations: &self.pickup_locations,
            zones: &self.zones,
            one_offs: &self.one_offs,
            closures: &self.closures,
        }
    }

    /// Returns the pickup location with `location_id`, if any.
    #[must_use]
    pub fn pickup_location(&self, location_id: i64) -> Option<&PickupLocation> {
        self.pickup_locations.iter().find(|l| l.id == location_id)
    }
}

/// The product catalog with all variants.
#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    pub products: Vec<Product>,
    pub variants: Vec<ProductVariant>,
}

impl CatalogData {
    #[must_use]
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog {
            products: &self.products,
            variants: &self.variants,
        }
    }

    #[must_use]
    pub fn product(&self, product_id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }
}

/// Payment outcome and bookkeeping written alongside a checkout plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCommit {
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    /// `stripe`, `square` or `manual`.
    pub payment_provider: String,
    /// Checkout session or payment ID from the provider.
    pub payment_reference: Option<String>,
    /// Processing fee the provider reported, if it reports one.
    pub merchant_fee_cents: Option<i64>,
}

/// Identifiers of a freshly committed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedOrder {
    pub order_id: i64,
    pub order_number: String,
}

/// A stored order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub item_id: i64,
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
    pub line_total_cents: i64,
}

/// A stored order with its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: i64,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub fulfillment_method: FulfillmentMethod,
    pub fulfillment_date: NaiveDate,
    pub delivery_address: Option<Address>,
    pub zone_id: Option<i64>,
    pub zone_name: Option<String>,
    pub pickup_location_id: Option<i64>,
    pub pickup_location_name: Option<String>,
    pub time_window: String,
    pub subtotal_cents: i64,
    pub delivery_fee_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub fulfillment_status: FulfillmentStatus,
    pub payment_status: PaymentStatus,
    pub payment_provider: String,
    pub payment_reference: Option<String>,
    pub notes: String,
    pub created_at: String,
    pub items: Vec<OrderItemRecord>,
}

impl OrderRecord {
    /// The status-bearing fields, as order transitions consume them.
    #[must_use]
    pub fn state(&self) -> OrderState {
        OrderState {
            order_id: self.order_id,
            order_number: self.order_number.clone(),
            fulfillment_method: self.fulfillment_method,
            status: self.status,
            fulfillment_status: self.fulfillment_status,
        }
    }
}

/// A merchant-fee ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantFeeRecord {
    pub fee_id: i64,
    pub order_id: i64,
    pub provider: String,
    pub gross_cents: i64,
    pub fee_cents: i64,
    pub net_cents: i64,
    pub created_at: String,
}

/// Narrows an order listing. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub fulfillment_date: Option<NaiveDate>,
    pub fulfillment_method: Option<FulfillmentMethod>,
    pub status: Option<OrderStatus>,
    pub pickup_location_id: Option<i64>,
}

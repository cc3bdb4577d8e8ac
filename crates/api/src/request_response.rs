// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross the boundary as `YYYY-MM-DD`, weekdays as `0 = Sunday`
//! through `6 = Saturday` and times of day as `HH:MM`.

use std::collections::BTreeSet;

use bakehouse::{CheckoutRequest, Customer, FulfillmentChoice};
use bakehouse_domain::{
    Address, AppliedZone, CalendarClosure, CartLine, DateOption, DateSource, DeliverySchedule,
    DeliveryZone, DomainError, FulfillmentMethod, FulfillmentStatus, OneOffDate, OrderStatus,
    PaymentStatus, PickupLocation, Product, ProductVariant, ZipCode, ZoneMatch, format_date,
    format_time_hhmm, parse_date, parse_time_hhmm, weekday_from_index, weekday_index,
};
use bakehouse_persistence::{OrderItemRecord, OrderRecord};
use serde::{Deserialize, Serialize};

use crate::auth::Role;

fn parse_optional_time(
    value: Option<&str>,
) -> Result<Option<chrono::NaiveTime>, DomainError> {
    value.map(parse_time_hhmm).transpose()
}

// ---------------------------------------------------------------------------
// Delivery schedules
// ---------------------------------------------------------------------------

/// Create or update body for a weekly delivery schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryScheduleRequest {
    pub name: String,
    pub day_of_week: i32,
    pub cutoff_day: i32,
    /// `HH:MM` in business time.
    pub cutoff_time: String,
    #[serde(default)]
    pub lead_time_days: u32,
    #[serde(default)]
    pub delivery_time_window: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

impl DeliveryScheduleRequest {
    /// Converts the body into a domain schedule with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if a weekday or the cutoff time is malformed.
    pub fn to_domain(&self, id: i64) -> Result<DeliverySchedule, DomainError> {
        Ok(DeliverySchedule {
            id,
            name: self.name.trim().to_string(),
            day_of_week: weekday_from_index(self.day_of_week)?,
            cutoff_day: weekday_from_index(self.cutoff_day)?,
            cutoff_time: parse_time_hhmm(&self.cutoff_time)?,
            lead_time_days: self.lead_time_days,
            delivery_time_window: self.delivery_time_window.clone(),
            is_active: self.is_active,
        })
    }
}

/// A weekly delivery schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryScheduleInfo {
    pub id: i64,
    pub name: String,
    pub day_of_week: i32,
    pub cutoff_day: i32,
    pub cutoff_time: String,
    pub lead_time_days: u32,
    pub delivery_time_window: String,
    pub is_active: bool,
}

impl From<&DeliverySchedule> for DeliveryScheduleInfo {
    fn from(schedule: &DeliverySchedule) -> Self {
        Self {
            id: schedule.id,
            name: schedule.name.clone(),
            day_of_week: weekday_index(schedule.day_of_week),
            cutoff_day: weekday_index(schedule.cutoff_day),
            cutoff_time: format_time_hhmm(schedule.cutoff_time),
            lead_time_days: schedule.lead_time_days,
            delivery_time_window: schedule.delivery_time_window.clone(),
            is_active: schedule.is_active,
        }
    }
}

// ---------------------------------------------------------------------------
// Pickup locations
// ---------------------------------------------------------------------------

/// Create or update body for a pickup location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupLocationRequest {
    pub name: String,
    pub address: Address,
    pub pickup_days: Vec<i32>,
    #[serde(default)]
    pub pickup_time_windows: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub lead_time_days: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub requires_preorder: bool,
}

impl PickupLocationRequest {
    /// Converts the body into a domain location with `id`.
    ///
    /// Duplicate weekdays are collapsed.
    ///
    /// # Errors
    ///
    /// Returns an error if a weekday is out of range.
    pub fn to_domain(&self, id: i64) -> Result<PickupLocation, DomainError> {
        let mut pickup_days: Vec<chrono::Weekday> = Vec::new();
        for index in &self.pickup_days {
            let day: chrono::Weekday = weekday_from_index(*index)?;
            if !pickup_days.contains(&day) {
                pickup_days.push(day);
            }
        }
        Ok(PickupLocation {
            id,
            name: self.name.trim().to_string(),
            address: self.address.clone(),
            pickup_days,
            pickup_time_windows: self.pickup_time_windows.clone(),
            instructions: self.instructions.clone(),
            lead_time_days: self.lead_time_days,
            is_active: self.is_active,
            requires_preorder: self.requires_preorder,
        })
    }
}

/// A pickup location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupLocationInfo {
    pub id: i64,
    pub name: String,
    pub address: Address,
    pub pickup_days: Vec<i32>,
    pub pickup_time_windows: String,
    pub instructions: String,
    pub lead_time_days: u32,
    pub is_active: bool,
    pub requires_preorder: bool,
}

impl From<&PickupLocation> for PickupLocationInfo {
    fn from(location: &PickupLocation) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            address: location.address.clone(),
            pickup_days: location.pickup_days.iter().map(|d| weekday_index(*d)).collect(),
            pickup_time_windows: location.pickup_time_windows.clone(),
            instructions: location.instructions.clone(),
            lead_time_days: location.lead_time_days,
            is_active: location.is_active,
            requires_preorder: location.requires_preorder,
        }
    }
}

// ---------------------------------------------------------------------------
// Delivery zones
// ---------------------------------------------------------------------------

/// Create or update body for a delivery zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryZoneRequest {
    pub name: String,
    pub zip_codes: Vec<String>,
    pub fee_cents: i64,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl DeliveryZoneRequest {
    /// Converts the body into a domain zone with `id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidZipCode` for a malformed ZIP code.
    pub fn to_domain(&self, id: i64) -> Result<DeliveryZone, DomainError> {
        let zip_codes: BTreeSet<ZipCode> = self
            .zip_codes
            .iter()
            .map(|z| ZipCode::parse(z))
            .collect::<Result<_, _>>()?;
        Ok(DeliveryZone {
            id,
            name: self.name.trim().to_string(),
            zip_codes,
            fee_cents: self.fee_cents,
            priority: self.priority,
            is_active: self.is_active,
        })
    }
}

/// A delivery zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryZoneInfo {
    pub id: i64,
    pub name: String,
    pub zip_codes: Vec<String>,
    pub fee_cents: i64,
    pub priority: i32,
    pub is_active: bool,
}

impl From<&DeliveryZone> for DeliveryZoneInfo {
    fn from(zone: &DeliveryZone) -> Self {
        Self {
            id: zone.id,
            name: zone.name.clone(),
            zip_codes: zone.zip_codes.iter().map(ToString::to_string).collect(),
            fee_cents: zone.fee_cents,
            priority: zone.priority,
            is_active: zone.is_active,
        }
    }
}

// ---------------------------------------------------------------------------
// Calendar overrides
// ---------------------------------------------------------------------------

/// Create or update body for a calendar closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureRequest {
    pub closure_date: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default = "default_true")]
    pub affects_delivery: bool,
    #[serde(default = "default_true")]
    pub affects_pickup: bool,
}

impl ClosureRequest {
    /// Converts the body into a domain closure with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the date is malformed.
    pub fn to_domain(&self, id: i64) -> Result<CalendarClosure, DomainError> {
        Ok(CalendarClosure {
            id,
            closure_date: parse_date(&self.closure_date)?,
            reason: self.reason.clone(),
            affects_delivery: self.affects_delivery,
            affects_pickup: self.affects_pickup,
        })
    }
}

/// A calendar closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureInfo {
    pub id: i64,
    pub closure_date: String,
    pub reason: String,
    pub affects_delivery: bool,
    pub affects_pickup: bool,
}

impl From<&CalendarClosure> for ClosureInfo {
    fn from(closure: &CalendarClosure) -> Self {
        Self {
            id: closure.id,
            closure_date: format_date(closure.closure_date),
            reason: closure.reason.clone(),
            affects_delivery: closure.affects_delivery,
            affects_pickup: closure.affects_pickup,
        }
    }
}

/// Create or update body for a one-off date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneOffDateRequest {
    pub date: String,
    pub kind: FulfillmentMethod,
    #[serde(default)]
    pub reason: String,
    pub schedule_id: Option<i64>,
    pub time_window_start: Option<String>,
    pub time_window_end: Option<String>,
    pub cutoff_day: Option<i32>,
    pub cutoff_time: Option<String>,
    pub lead_time_days: Option<u32>,
}

impl OneOffDateRequest {
    /// Converts the body into a domain one-off date with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if a date, weekday or time is malformed.
    pub fn to_domain(&self, id: i64) -> Result<OneOffDate, DomainError> {
        Ok(OneOffDate {
            id,
            date: parse_date(&self.date)?,
            method: self.kind,
            reason: self.reason.clone(),
            schedule_id: self.schedule_id,
            time_window_start: parse_optional_time(self.time_window_start.as_deref())?,
            time_window_end: parse_optional_time(self.time_window_end.as_deref())?,
            cutoff_day: self.cutoff_day.map(weekday_from_index).transpose()?,
            cutoff_time: parse_optional_time(self.cutoff_time.as_deref())?,
            lead_time_days: self.lead_time_days,
        })
    }
}

/// A one-off date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneOffDateInfo {
    pub id: i64,
    pub date: String,
    pub kind: FulfillmentMethod,
    pub reason: String,
    pub schedule_id: Option<i64>,
    pub time_window_start: Option<String>,
    pub time_window_end: Option<String>,
    pub cutoff_day: Option<i32>,
    pub cutoff_time: Option<String>,
    pub lead_time_days: Option<u32>,
}

impl From<&OneOffDate> for OneOffDateInfo {
    fn from(one_off: &OneOffDate) -> Self {
        Self {
            id: one_off.id,
            date: format_date(one_off.date),
            kind: one_off.method,
            reason: one_off.reason.clone(),
            schedule_id: one_off.schedule_id,
            time_window_start: one_off.time_window_start.map(format_time_hhmm),
            time_window_end: one_off.time_window_end.map(format_time_hhmm),
            cutoff_day: one_off.cutoff_day.map(weekday_index),
            cutoff_time: one_off.cutoff_time.map(format_time_hhmm),
            lead_time_days: one_off.lead_time_days,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Create or update body for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    #[serde(default)]
    pub quantity_available: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub available_for_delivery: bool,
    #[serde(default = "default_true")]
    pub available_for_pickup: bool,
    pub lead_time_days: Option<u32>,
}

impl ProductRequest {
    #[must_use]
    pub fn to_domain(&self, id: i64) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            price_cents: self.price_cents,
            quantity_available: self.quantity_available,
            is_active: self.is_active,
            available_for_delivery: self.available_for_delivery,
            available_for_pickup: self.available_for_pickup,
            lead_time_days: self.lead_time_days,
        }
    }
}

/// Create or update body for a product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRequest {
    pub name: String,
    pub price_cents: i64,
    #[serde(default)]
    pub quantity_available: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl VariantRequest {
    #[must_use]
    pub fn to_domain(&self, id: i64, product_id: i64) -> ProductVariant {
        ProductVariant {
            id,
            product_id,
            name: self.name.trim().to_string(),
            price_cents: self.price_cents,
            quantity_available: self.quantity_available,
            is_active: self.is_active,
        }
    }
}

/// A product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantInfo {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub price_cents: i64,
    pub quantity_available: i64,
    pub is_active: bool,
}

impl From<&ProductVariant> for VariantInfo {
    fn from(variant: &ProductVariant) -> Self {
        Self {
            id: variant.id,
            product_id: variant.product_id,
            name: variant.name.clone(),
            price_cents: variant.price_cents,
            quantity_available: variant.quantity_available,
            is_active: variant.is_active,
        }
    }
}

/// A product with its variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub quantity_available: i64,
    pub is_active: bool,
    pub available_for_delivery: bool,
    pub available_for_pickup: bool,
    pub lead_time_days: Option<u32>,
    pub variants: Vec<VariantInfo>,
}

impl ProductInfo {
    #[must_use]
    pub fn new(product: &Product, variants: &[ProductVariant]) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price_cents: product.price_cents,
            quantity_available: product.quantity_available,
            is_active: product.is_active,
            available_for_delivery: product.available_for_delivery,
            available_for_pickup: product.available_for_pickup,
            lead_time_days: product.lead_time_days,
            variants: variants
                .iter()
                .filter(|v| v.product_id == product.id)
                .map(VariantInfo::from)
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Storefront reads
// ---------------------------------------------------------------------------

/// One offered fulfillment date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOptionInfo {
    pub date: String,
    /// RFC 3339 instant after which the date is no longer offered.
    pub cutoff: String,
    pub time_window: String,
    pub source: DateSource,
}

impl From<&DateOption> for DateOptionInfo {
    fn from(option: &DateOption) -> Self {
        Self {
            date: format_date(option.date),
            cutoff: option.cutoff.to_rfc3339(),
            time_window: option.time_window.clone(),
            source: option.source,
        }
    }
}

/// Offered dates for one fulfillment method.
///
/// An empty list means the method is not available right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableDatesResponse {
    pub method: FulfillmentMethod,
    pub dates: Vec<DateOptionInfo>,
}

/// API request to price delivery of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateDeliveryFeeRequest {
    pub cart_items: Vec<CartLine>,
    pub zip: String,
}

/// API response for a delivery fee quote.
///
/// `deliverable == false` means no zone covers the ZIP code; the fee is
/// then zero but delivery must not be offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryFeeResponse {
    pub deliverable: bool,
    pub zip: String,
    pub fee_cents: i64,
    pub zone: Option<AppliedZone>,
    pub breakdown: Vec<ZoneMatch>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

// ---------------------------------------------------------------------------
// Checkout and orders
// ---------------------------------------------------------------------------

/// Customer contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// The fulfillment chosen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum FulfillmentRequest {
    Delivery { date: String, address: Address },
    Pickup { date: String, location_id: i64 },
}

/// How the customer pays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentRequest {
    /// Redirect to the provider's hosted checkout page.
    HostedCheckout,
    /// Charge a tokenized card directly.
    Card {
        source_token: String,
        idempotency_key: String,
    },
}

/// API request to place an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequestBody {
    pub customer: CustomerInfo,
    pub items: Vec<CartLine>,
    pub fulfillment: FulfillmentRequest,
    #[serde(default)]
    pub notes: String,
    pub payment: PaymentRequest,
}

/// API request for an admin-entered order. No payment is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOrderRequest {
    pub customer: CustomerInfo,
    pub items: Vec<CartLine>,
    pub fulfillment: FulfillmentRequest,
    #[serde(default)]
    pub notes: String,
}

/// Builds a core checkout request from boundary fields.
///
/// # Errors
///
/// Returns an error if the fulfillment date is malformed.
pub fn to_checkout_request(
    customer: &CustomerInfo,
    items: &[CartLine],
    fulfillment: &FulfillmentRequest,
    notes: &str,
) -> Result<CheckoutRequest, DomainError> {
    let fulfillment: FulfillmentChoice = match fulfillment {
        FulfillmentRequest::Delivery { date, address } => FulfillmentChoice::Delivery {
            date: parse_date(date)?,
            address: address.clone(),
        },
        FulfillmentRequest::Pickup { date, location_id } => FulfillmentChoice::Pickup {
            date: parse_date(date)?,
            location_id: *location_id,
        },
    };
    Ok(CheckoutRequest {
        customer: Customer {
            name: customer.name.trim().to_string(),
            email: customer.email.trim().to_string(),
            phone: customer.phone.trim().to_string(),
        },
        lines: items.to_vec(),
        fulfillment,
        notes: notes.to_string(),
    })
}

/// API response for a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub order_id: i64,
    pub order_number: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total_cents: i64,
    /// Set for hosted checkout: where to send the customer.
    pub redirect_url: Option<String>,
}

/// One line of a stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemInfo {
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
    pub line_total_cents: i64,
}

impl From<&OrderItemRecord> for OrderItemInfo {
    fn from(item: &OrderItemRecord) -> Self {
        Self {
            product_id: item.product_id,
            variant_id: item.variant_id,
            name: item.name.clone(),
            unit_price_cents: item.unit_price_cents,
            quantity: item.quantity,
            line_total_cents: item.line_total_cents,
        }
    }
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInfo {
    pub order_id: i64,
    pub order_number: String,
    pub customer: CustomerInfo,
    pub fulfillment_method: FulfillmentMethod,
    pub fulfillment_date: String,
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
    pub items: Vec<OrderItemInfo>,
}

impl From<&OrderRecord> for OrderInfo {
    fn from(order: &OrderRecord) -> Self {
        Self {
            order_id: order.order_id,
            order_number: order.order_number.clone(),
            customer: CustomerInfo {
                name: order.customer_name.clone(),
                email: order.customer_email.clone(),
                phone: order.customer_phone.clone(),
            },
            fulfillment_method: order.fulfillment_method,
            fulfillment_date: format_date(order.fulfillment_date),
            delivery_address: order.delivery_address.clone(),
            zone_id: order.zone_id,
            zone_name: order.zone_name.clone(),
            pickup_location_id: order.pickup_location_id,
            pickup_location_name: order.pickup_location_name.clone(),
            time_window: order.time_window.clone(),
            subtotal_cents: order.subtotal_cents,
            delivery_fee_cents: order.delivery_fee_cents,
            tax_cents: order.tax_cents,
            total_cents: order.total_cents,
            status: order.status,
            fulfillment_status: order.fulfillment_status,
            payment_status: order.payment_status,
            payment_provider: order.payment_provider.clone(),
            payment_reference: order.payment_reference.clone(),
            notes: order.notes.clone(),
            created_at: order.created_at.clone(),
            items: order.items.iter().map(OrderItemInfo::from).collect(),
        }
    }
}

/// Filters for listing orders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListOrdersRequest {
    pub date: Option<String>,
    pub method: Option<FulfillmentMethod>,
    pub status: Option<OrderStatus>,
    pub pickup_location_id: Option<i64>,
}

/// API response listing orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOrdersResponse {
    pub orders: Vec<OrderInfo>,
}

/// API request to move an order along its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// API request to record fulfillment progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFulfillmentStatusRequest {
    pub status: FulfillmentStatus,
    #[serde(default)]
    pub notify_customer: bool,
}

/// API response for a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusResponse {
    pub order_id: i64,
    pub order_number: String,
    pub status: OrderStatus,
    pub fulfillment_status: FulfillmentStatus,
    pub customer_notified: bool,
    pub message: String,
}

/// API request to set the fulfillment status of several orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdateFulfillmentStatusRequest {
    pub order_ids: Vec<i64>,
    pub status: FulfillmentStatus,
    #[serde(default)]
    pub notify_customer: bool,
}

/// Outcome for one order in a bulk update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdateResult {
    pub order_id: i64,
    pub success: bool,
    pub error: Option<String>,
}

/// API response for a bulk update. Every requested order is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdateFulfillmentStatusResponse {
    pub results: Vec<BulkUpdateResult>,
    pub succeeded: usize,
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// Generic responses
// ---------------------------------------------------------------------------

/// API response for a created record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: String,
}

/// API response carrying only a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login_name: String,
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub session_token: String,
    pub login_name: String,
    pub display_name: String,
    pub role: Role,
    pub expires_at: String,
}

/// API response describing the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub login_name: String,
    pub display_name: String,
    pub role: Role,
}

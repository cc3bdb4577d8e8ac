// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Bakehouse storefront.
//!
//! This crate sits between the HTTP server and the core, persistence and
//! payment crates. It owns the request and response types, authentication,
//! authorization and the translation of lower-layer errors into
//! [`ApiError`]. It performs no I/O of its own beyond the persistence calls
//! it makes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod csv_export;
mod error;
mod handlers;
mod notify;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, LoginSession, Role, require_admin};
pub use csv_export::{delivery_route_csv, is_exportable, items_summary, pickup_list_csv};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_payment_error, translate_persistence_error,
};
pub use handlers::{
    MANUAL_PAYMENT_PROVIDER, bootstrap_admin, bulk_update_fulfillment_status,
    calculate_delivery_fee, card_charge_commit, checkout_response, commit_checkout,
    create_closure, create_delivery_schedule, create_delivery_zone, create_manual_order,
    create_one_off_date, create_pickup_location, create_product, create_variant, delete_closure,
    delete_delivery_schedule, delete_delivery_zone, delete_one_off_date, delete_pickup_location,
    delete_product, delete_variant, export_delivery_route, export_pickup_list,
    get_available_delivery_dates, get_available_pickup_dates, get_order, hosted_checkout_commit,
    hosted_checkout_lines, list_closures, list_delivery_schedules, list_delivery_zones,
    list_one_off_dates, list_orders, list_pickup_locations, list_products,
    list_storefront_pickup_locations, list_storefront_products, login, logout,
    notify_order_placed, prepare_checkout, update_closure, update_delivery_schedule,
    update_delivery_status, update_delivery_zone, update_fulfillment_status,
    update_one_off_date, update_order_status, update_pickup_location, update_pickup_status,
    update_product, update_variant, whoami,
};
pub use notify::{LogNotifier, Notification, Notifier, NotifyError, notify_best_effort};
pub use request_response::{
    AvailableDatesResponse, BulkUpdateFulfillmentStatusRequest,
    BulkUpdateFulfillmentStatusResponse, BulkUpdateResult, CalculateDeliveryFeeRequest,
    CheckoutRequestBody, CheckoutResponse, ClosureInfo, ClosureRequest, CreatedResponse,
    CustomerInfo, DateOptionInfo, DeliveryFeeResponse, DeliveryScheduleInfo,
    DeliveryScheduleRequest, DeliveryZoneInfo, DeliveryZoneRequest, FulfillmentRequest,
    ListOrdersRequest, ListOrdersResponse, LoginRequest, LoginResponse, ManualOrderRequest,
    MessageResponse, OneOffDateInfo, OneOffDateRequest, OrderInfo, OrderItemInfo,
    OrderStatusResponse, PaymentRequest, PickupLocationInfo, PickupLocationRequest, ProductInfo,
    ProductRequest, UpdateFulfillmentStatusRequest, UpdateOrderStatusRequest, VariantInfo,
    VariantRequest, WhoAmIResponse, to_checkout_request,
};

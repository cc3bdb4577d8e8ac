// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for storefront reads, checkout and the back office.
//!
//! Handlers are synchronous and take the persistence layer by mutable
//! reference. Payment provider calls are async and happen outside these
//! functions, between [`prepare_checkout`] and [`commit_checkout`].

use bakehouse::{
    CheckoutPlan, CheckoutRequest, CheckoutSettings, Command, DateCheck, OrderState,
    TransitionResult, apply, plan_checkout,
};
use bakehouse_domain::{
    CalendarClosure, CartLine, DateOption, DeliverySchedule, DeliveryZone, FeeQuote,
    FulfillmentMethod, OneOffDate, OrderStatus, OrderTotals, PaymentStatus, PickupLocation,
    PricedLine, Product, ProductVariant, ResolverConfig, TaxRate, ZipCode, compute_totals,
    parse_date, quote_delivery_fee, resolve_delivery_dates, resolve_pickup_dates,
    validate_closure_unique, validate_delivery_schedule, validate_delivery_zone, validate_one_off,
    validate_cart, validate_one_off_unique, validate_pickup_location, validate_product,
    validate_variant,
};
use bakehouse_payments::{
    CheckoutLine, CheckoutSession, PaymentOutcome, PaymentProvider,
};
use bakehouse_persistence::{
    CatalogData, CommittedOrder, FulfillmentData, OrderCommit, OrderFilter, OrderRecord,
    Persistence,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthenticationService, LoginSession, require_admin};
use crate::csv_export::{delivery_route_csv, pickup_list_csv};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::notify::{Notification, Notifier, notify_best_effort};
use crate::request_response::{
    AvailableDatesResponse, BulkUpdateFulfillmentStatusRequest,
    BulkUpdateFulfillmentStatusResponse, BulkUpdateResult, CalculateDeliveryFeeRequest,
    CheckoutRequestBody, CheckoutResponse, ClosureInfo, ClosureRequest, CreatedResponse,
    DateOptionInfo, DeliveryFeeResponse, DeliveryScheduleInfo, DeliveryScheduleRequest,
    DeliveryZoneInfo, DeliveryZoneRequest, ListOrdersRequest, ListOrdersResponse, LoginRequest,
    LoginResponse, ManualOrderRequest, MessageResponse, OneOffDateInfo, OneOffDateRequest,
    OrderInfo, OrderStatusResponse, PickupLocationInfo, PickupLocationRequest, ProductInfo,
    ProductRequest, UpdateFulfillmentStatusRequest, UpdateOrderStatusRequest, VariantRequest,
    WhoAmIResponse, to_checkout_request,
};

/// Provider name stored on admin-entered orders.
pub const MANUAL_PAYMENT_PROVIDER: &str = "manual";

fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message,
    }
}

fn load_rules(persistence: &mut Persistence) -> Result<FulfillmentData, ApiError> {
    persistence
        .load_fulfillment_data()
        .map_err(translate_persistence_error)
}

fn load_catalog(persistence: &mut Persistence) -> Result<CatalogData, ApiError> {
    persistence.load_catalog().map_err(translate_persistence_error)
}

fn load_order(persistence: &mut Persistence, order_id: i64) -> Result<OrderRecord, ApiError> {
    persistence
        .get_order(order_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Order", format!("Order {order_id} does not exist")))
}

fn load_scope(
    persistence: &mut Persistence,
    product_id: Option<i64>,
) -> Result<Option<Product>, ApiError> {
    product_id
        .map(|id| {
            persistence
                .get_product(id)
                .map_err(translate_persistence_error)?
                .ok_or_else(|| not_found("Product", format!("Product {id} does not exist")))
        })
        .transpose()
}

fn date_infos(options: &[DateOption]) -> Vec<DateOptionInfo> {
    options.iter().map(DateOptionInfo::from).collect()
}

// ---------------------------------------------------------------------------
// Storefront reads
// ---------------------------------------------------------------------------

/// Lists the delivery dates a customer may choose right now.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `product_id` - Restrict to dates this product can be delivered on
/// * `max_dates` - Return at most this many dates
/// * `now` - The current instant
/// * `config` - Business timezone and horizon
///
/// # Errors
///
/// Returns an error if the product does not exist or the rules cannot be
/// loaded. No offered dates is an empty list, not an error.
pub fn get_available_delivery_dates(
    persistence: &mut Persistence,
    product_id: Option<i64>,
    max_dates: Option<usize>,
    now: DateTime<Utc>,
    config: &ResolverConfig,
) -> Result<AvailableDatesResponse, ApiError> {
    let scope: Option<Product> = load_scope(persistence, product_id)?;
    let rules: FulfillmentData = load_rules(persistence)?;

    let options: Vec<DateOption> = resolve_delivery_dates(
        &rules.schedules,
        &rules.one_offs,
        &rules.closures,
        scope.as_ref(),
        now,
        &config.with_max_dates(max_dates),
    )
    .map_err(translate_domain_error)?;

    debug!(?product_id, offered = options.len(), "Resolved delivery dates");
    Ok(AvailableDatesResponse {
        method: FulfillmentMethod::Delivery,
        dates: date_infos(&options),
    })
}

/// Lists the pickup dates a customer may choose right now at a location.
///
/// # Errors
///
/// Returns an error if the location or product does not exist or the rules
/// cannot be loaded.
pub fn get_available_pickup_dates(
    persistence: &mut Persistence,
    location_id: i64,
    product_id: Option<i64>,
    max_dates: Option<usize>,
    now: DateTime<Utc>,
    config: &ResolverConfig,
) -> Result<AvailableDatesResponse, ApiError> {
    let scope: Option<Product> = load_scope(persistence, product_id)?;
    let rules: FulfillmentData = load_rules(persistence)?;
    let location: &PickupLocation = rules.pickup_location(location_id).ok_or_else(|| {
        not_found(
            "Pickup location",
            format!("Pickup location {location_id} does not exist"),
        )
    })?;

    let options: Vec<DateOption> = resolve_pickup_dates(
        location,
        &rules.one_offs,
        &rules.closures,
        scope.as_ref(),
        now,
        &config.with_max_dates(max_dates),
    )
    .map_err(translate_domain_error)?;

    debug!(location_id, ?product_id, offered = options.len(), "Resolved pickup dates");
    Ok(AvailableDatesResponse {
        method: FulfillmentMethod::Pickup,
        dates: date_infos(&options),
    })
}

fn unit_price(catalog: &CatalogData, line: &CartLine) -> Result<i64, ApiError> {
    let product: &Product = catalog.product(line.product_id).ok_or_else(|| {
        not_found(
            "Product",
            format!("Product {} does not exist", line.product_id),
        )
    })?;
    match line.variant_id {
        None => Ok(product.price_cents),
        Some(variant_id) => catalog
            .variants
            .iter()
            .find(|v| v.id == variant_id && v.product_id == product.id)
            .map(|v| v.price_cents)
            .ok_or_else(|| {
                not_found(
                    "Product",
                    format!("Variant {variant_id} not found for product {}", product.id),
                )
            }),
    }
}

/// Prices delivery of a cart to a ZIP code.
///
/// When no active zone covers the ZIP code the response is marked not
/// deliverable and its totals carry no fee.
///
/// # Errors
///
/// Returns an error if the cart is empty or has a zero quantity, the ZIP
/// code is malformed, a cart line names an unknown product or variant, or
/// the totals overflow.
pub fn calculate_delivery_fee(
    persistence: &mut Persistence,
    request: &CalculateDeliveryFeeRequest,
    tax_rate: TaxRate,
) -> Result<DeliveryFeeResponse, ApiError> {
    validate_cart(&request.cart_items).map_err(translate_domain_error)?;
    let zip: ZipCode = ZipCode::parse(&request.zip).map_err(translate_domain_error)?;
    let rules: FulfillmentData = load_rules(persistence)?;
    let catalog: CatalogData = load_catalog(persistence)?;

    let lines: Vec<PricedLine> = request
        .cart_items
        .iter()
        .map(|line| {
            Ok(PricedLine {
                unit_price_cents: unit_price(&catalog, line)?,
                quantity: line.quantity,
            })
        })
        .collect::<Result<_, ApiError>>()?;

    let quote: FeeQuote = quote_delivery_fee(&rules.zones, &zip);
    let totals: OrderTotals =
        compute_totals(&lines, quote.fee_cents, tax_rate).map_err(translate_domain_error)?;

    debug!(zip = %zip, deliverable = quote.is_deliverable(), fee_cents = quote.fee_cents, "Quoted delivery fee");
    Ok(DeliveryFeeResponse {
        deliverable: quote.is_deliverable(),
        zip: zip.to_string(),
        fee_cents: quote.fee_cents,
        zone: quote.applied_zone,
        breakdown: quote.breakdown,
        subtotal_cents: totals.subtotal_cents,
        tax_cents: totals.tax_cents,
        total_cents: totals.total_cents,
    })
}

/// Lists active products with their active variants.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn list_storefront_products(
    persistence: &mut Persistence,
) -> Result<Vec<ProductInfo>, ApiError> {
    let catalog: CatalogData = load_catalog(persistence)?;
    let variants: Vec<ProductVariant> = catalog
        .variants
        .iter()
        .filter(|v| v.is_active)
        .cloned()
        .collect();
    Ok(catalog
        .products
        .iter()
        .filter(|p| p.is_active)
        .map(|p| ProductInfo::new(p, &variants))
        .collect())
}

/// Lists active pickup locations.
///
/// # Errors
///
/// Returns an error if the locations cannot be loaded.
pub fn list_storefront_pickup_locations(
    persistence: &mut Persistence,
) -> Result<Vec<PickupLocationInfo>, ApiError> {
    Ok(persistence
        .list_pickup_locations()
        .map_err(translate_persistence_error)?
        .iter()
        .filter(|l| l.is_active)
        .map(PickupLocationInfo::from)
        .collect())
}

// ---------------------------------------------------------------------------
// Checkout
// ---------------------------------------------------------------------------

fn plan(
    persistence: &mut Persistence,
    request: &CheckoutRequest,
    now: DateTime<Utc>,
    settings: &CheckoutSettings,
    date_check: DateCheck,
) -> Result<CheckoutPlan, ApiError> {
    let catalog: CatalogData = load_catalog(persistence)?;
    let rules: FulfillmentData = load_rules(persistence)?;
    plan_checkout(
        request,
        &catalog.catalog(),
        &rules.rules(),
        now,
        settings,
        date_check,
    )
    .map_err(translate_core_error)
}

/// Validates and prices a customer checkout without writing anything.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The customer's cart, contact details and fulfillment choice
/// * `now` - The current instant
/// * `settings` - Business timezone, horizon and tax rate
///
/// # Errors
///
/// Returns an error if validation fails, stock is short, the date is not
/// offered, or no zone delivers to the address.
pub fn prepare_checkout(
    persistence: &mut Persistence,
    request: &CheckoutRequestBody,
    now: DateTime<Utc>,
    settings: &CheckoutSettings,
) -> Result<CheckoutPlan, ApiError> {
    let request: CheckoutRequest = to_checkout_request(
        &request.customer,
        &request.items,
        &request.fulfillment,
        &request.notes,
    )
    .map_err(translate_domain_error)?;
    plan(
        persistence,
        &request,
        now,
        settings,
        DateCheck::MustBeOffered,
    )
}

/// Writes a prepared order in one transaction.
///
/// # Errors
///
/// Returns `ApiError::InsufficientInventory` if stock ran out since the
/// plan was prepared; nothing is written in that case.
pub fn commit_checkout(
    persistence: &mut Persistence,
    plan: &CheckoutPlan,
    commit: &OrderCommit,
) -> Result<CommittedOrder, ApiError> {
    persistence
        .commit_checkout(plan, commit)
        .map_err(translate_persistence_error)
}

/// Lines for a hosted checkout page.
///
/// The delivery fee and tax are separate lines so the page total matches
/// the order total.
#[must_use]
pub fn hosted_checkout_lines(plan: &CheckoutPlan) -> Vec<CheckoutLine> {
    let mut lines: Vec<CheckoutLine> = plan
        .items
        .iter()
        .map(|item| CheckoutLine {
            name: item.name.clone(),
            unit_amount_cents: item.unit_price_cents,
            quantity: item.quantity,
        })
        .collect();
    if plan.totals.delivery_fee_cents > 0 {
        lines.push(CheckoutLine {
            name: String::from("Delivery fee"),
            unit_amount_cents: plan.totals.delivery_fee_cents,
            quantity: 1,
        });
    }
    if plan.totals.tax_cents > 0 {
        lines.push(CheckoutLine {
            name: String::from("Sales tax"),
            unit_amount_cents: plan.totals.tax_cents,
            quantity: 1,
        });
    }
    lines
}

/// Bookkeeping for an order paid through a hosted checkout page.
///
/// The order stays pending until the provider reports payment.
#[must_use]
pub fn hosted_checkout_commit(
    provider: &dyn PaymentProvider,
    session: &CheckoutSession,
) -> OrderCommit {
    OrderCommit {
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_provider: provider.name().to_string(),
        payment_reference: Some(session.session_id.clone()),
        merchant_fee_cents: None,
    }
}

/// Bookkeeping for a direct card charge.
///
/// # Errors
///
/// Returns `ApiError::PaymentFailed` for a declined card. No order may be
/// written in that case.
pub fn card_charge_commit(
    provider: &dyn PaymentProvider,
    plan: &CheckoutPlan,
    outcome: PaymentOutcome,
) -> Result<OrderCommit, ApiError> {
    match outcome {
        PaymentOutcome::Approved { payment_id } => Ok(OrderCommit {
            status: OrderStatus::Confirmed,
            payment_status: PaymentStatus::Paid,
            payment_provider: provider.name().to_string(),
            payment_reference: Some(payment_id),
            merchant_fee_cents: provider.merchant_fee(plan.totals.total_cents),
        }),
        PaymentOutcome::Declined { reason } => {
            warn!(provider = provider.name(), reason = %reason, "Card declined at checkout");
            Err(ApiError::PaymentFailed { reason })
        }
    }
}

/// Sends the customer confirmation and the staff alert for a new order.
///
/// Failures are logged and otherwise ignored.
pub fn notify_order_placed(
    notifier: &dyn Notifier,
    plan: &CheckoutPlan,
    committed: &CommittedOrder,
) {
    notify_best_effort(
        notifier,
        &Notification::OrderConfirmation {
            order_number: committed.order_number.clone(),
            customer_name: plan.customer.name.clone(),
            customer_email: plan.customer.email.clone(),
            fulfillment_method: plan.fulfillment_method,
            fulfillment_date: plan.fulfillment_date,
            total_cents: plan.totals.total_cents,
        },
    );
    notify_best_effort(
        notifier,
        &Notification::NewOrderAlert {
            order_number: committed.order_number.clone(),
            customer_name: plan.customer.name.clone(),
            total_cents: plan.totals.total_cents,
        },
    );
}

/// Builds the checkout response for a committed order.
#[must_use]
pub fn checkout_response(
    plan: &CheckoutPlan,
    committed: &CommittedOrder,
    commit: &OrderCommit,
    redirect_url: Option<String>,
) -> CheckoutResponse {
    CheckoutResponse {
        order_id: committed.order_id,
        order_number: committed.order_number.clone(),
        status: commit.status,
        payment_status: commit.payment_status,
        total_cents: plan.totals.total_cents,
        redirect_url,
    }
}

/// Enters an order on a customer's behalf without taking payment.
///
/// The fulfillment date need not be one the storefront offers, but the
/// cart, stock and delivery zone are checked as for a customer checkout.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, validation fails, or
/// stock is short.
pub fn create_manual_order(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &ManualOrderRequest,
    now: DateTime<Utc>,
    settings: &CheckoutSettings,
    notifier: &dyn Notifier,
) -> Result<CheckoutResponse, ApiError> {
    require_admin(actor, "create_manual_order")?;

    let request: CheckoutRequest = to_checkout_request(
        &request.customer,
        &request.items,
        &request.fulfillment,
        &request.notes,
    )
    .map_err(translate_domain_error)?;
    let plan: CheckoutPlan = plan(
        persistence,
        &request,
        now,
        settings,
        DateCheck::AdminOverride,
    )?;

    let commit: OrderCommit = OrderCommit {
        status: OrderStatus::Confirmed,
        payment_status: PaymentStatus::Manual,
        payment_provider: String::from(MANUAL_PAYMENT_PROVIDER),
        payment_reference: None,
        merchant_fee_cents: None,
    };
    let committed: CommittedOrder = commit_checkout(persistence, &plan, &commit)?;

    info!(
        order_number = %committed.order_number,
        admin = %actor.login_name,
        "Manual order created"
    );
    notify_order_placed(notifier, &plan, &committed);
    Ok(checkout_response(&plan, &committed, &commit, None))
}

// ---------------------------------------------------------------------------
// Order lifecycle
// ---------------------------------------------------------------------------

fn status_response(
    result: &TransitionResult,
    customer_notified: bool,
) -> OrderStatusResponse {
    OrderStatusResponse {
        order_id: result.after.order_id,
        order_number: result.after.order_number.clone(),
        status: result.after.status,
        fulfillment_status: result.after.fulfillment_status,
        customer_notified,
        message: result.description.clone(),
    }
}

/// Moves an order along its lifecycle.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the order does not
/// exist, or the transition is not permitted.
pub fn update_order_status(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    order_id: i64,
    request: &UpdateOrderStatusRequest,
) -> Result<OrderStatusResponse, ApiError> {
    require_admin(actor, "update_order_status")?;

    let order: OrderRecord = load_order(persistence, order_id)?;
    let state: OrderState = order.state();
    let result: TransitionResult = apply(
        &state,
        Command::UpdateOrderStatus {
            status: request.status,
        },
    )
    .map_err(translate_core_error)?;

    persistence
        .update_order_status(order_id, result.after.status)
        .map_err(translate_persistence_error)?;

    info!(
        order_id,
        from = %result.before.status,
        to = %result.after.status,
        admin = %actor.login_name,
        "Order status updated"
    );
    Ok(status_response(&result, false))
}

/// Records fulfillment progress on one order.
///
/// `expected_method` restricts the update to delivery or pickup orders.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the order does not exist
/// or has the wrong method, the order is closed, or the status belongs to
/// the other method's track.
pub fn update_fulfillment_status(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    order_id: i64,
    expected_method: Option<FulfillmentMethod>,
    request: &UpdateFulfillmentStatusRequest,
    notifier: &dyn Notifier,
) -> Result<OrderStatusResponse, ApiError> {
    require_admin(actor, "update_fulfillment_status")?;

    let order: OrderRecord = load_order(persistence, order_id)?;
    if let Some(expected) = expected_method
        && expected != order.fulfillment_method
    {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("fulfillment_method"),
            message: format!(
                "Order {} is a {} order, not {expected}",
                order.order_number, order.fulfillment_method
            ),
        });
    }

    let result: TransitionResult = apply(
        &order.state(),
        Command::UpdateFulfillmentStatus {
            status: request.status,
            notify_customer: request.notify_customer,
        },
    )
    .map_err(translate_core_error)?;

    persistence
        .update_fulfillment_status(order_id, result.after.fulfillment_status)
        .map_err(translate_persistence_error)?;

    info!(
        order_id,
        status = %result.after.fulfillment_status,
        admin = %actor.login_name,
        "Fulfillment status updated"
    );

    let customer_notified: bool = result.notify_customer
        && notify_best_effort(
            notifier,
            &Notification::FulfillmentUpdate {
                order_number: order.order_number.clone(),
                customer_email: order.customer_email.clone(),
                status: result.after.fulfillment_status,
            },
        );
    Ok(status_response(&result, customer_notified))
}

/// Records delivery progress. Pickup orders are rejected.
///
/// # Errors
///
/// See [`update_fulfillment_status`].
pub fn update_delivery_status(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    order_id: i64,
    request: &UpdateFulfillmentStatusRequest,
    notifier: &dyn Notifier,
) -> Result<OrderStatusResponse, ApiError> {
    update_fulfillment_status(
        persistence,
        actor,
        order_id,
        Some(FulfillmentMethod::Delivery),
        request,
        notifier,
    )
}

/// Records pickup progress. Delivery orders are rejected.
///
/// # Errors
///
/// See [`update_fulfillment_status`].
pub fn update_pickup_status(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    order_id: i64,
    request: &UpdateFulfillmentStatusRequest,
    notifier: &dyn Notifier,
) -> Result<OrderStatusResponse, ApiError> {
    update_fulfillment_status(
        persistence,
        actor,
        order_id,
        Some(FulfillmentMethod::Pickup),
        request,
        notifier,
    )
}

/// Sets the fulfillment status of several orders, one at a time.
///
/// Each order succeeds or fails on its own and every order is reported.
///
/// # Errors
///
/// Returns an error only if the actor is not an admin.
pub fn bulk_update_fulfillment_status(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &BulkUpdateFulfillmentStatusRequest,
    notifier: &dyn Notifier,
) -> Result<BulkUpdateFulfillmentStatusResponse, ApiError> {
    require_admin(actor, "bulk_update_fulfillment_status")?;

    let single: UpdateFulfillmentStatusRequest = UpdateFulfillmentStatusRequest {
        status: request.status,
        notify_customer: request.notify_customer,
    };

    let results: Vec<BulkUpdateResult> = request
        .order_ids
        .iter()
        .map(|&order_id| {
            match update_fulfillment_status(persistence, actor, order_id, None, &single, notifier)
            {
                Ok(_) => BulkUpdateResult {
                    order_id,
                    success: true,
                    error: None,
                },
                Err(err) => BulkUpdateResult {
                    order_id,
                    success: false,
                    error: Some(err.to_string()),
                },
            }
        })
        .collect();

    let succeeded: usize = results.iter().filter(|r| r.success).count();
    let failed: usize = results.len() - succeeded;
    info!(succeeded, failed, status = %request.status, "Bulk fulfillment update finished");
    Ok(BulkUpdateFulfillmentStatusResponse {
        results,
        succeeded,
        failed,
    })
}

fn order_filter(request: &ListOrdersRequest) -> Result<OrderFilter, ApiError> {
    Ok(OrderFilter {
        fulfillment_date: request
            .date
            .as_deref()
            .map(parse_date)
            .transpose()
            .map_err(translate_domain_error)?,
        fulfillment_method: request.method,
        status: request.status,
        pickup_location_id: request.pickup_location_id,
    })
}

/// Lists orders matching the filters, oldest first.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the date is malformed.
pub fn list_orders(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &ListOrdersRequest,
) -> Result<ListOrdersResponse, ApiError> {
    require_admin(actor, "list_orders")?;
    let filter: OrderFilter = order_filter(request)?;
    let orders: Vec<OrderRecord> = persistence
        .list_orders(&filter)
        .map_err(translate_persistence_error)?;
    Ok(ListOrdersResponse {
        orders: orders.iter().map(OrderInfo::from).collect(),
    })
}

/// Retrieves one order.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the order does not exist.
pub fn get_order(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    order_id: i64,
) -> Result<OrderInfo, ApiError> {
    require_admin(actor, "get_order")?;
    Ok(OrderInfo::from(&load_order(persistence, order_id)?))
}

/// Exports the delivery route for a date as CSV.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the date is malformed.
pub fn export_delivery_route(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    date: &str,
) -> Result<String, ApiError> {
    require_admin(actor, "export_delivery_route")?;
    let filter: OrderFilter = order_filter(&ListOrdersRequest {
        date: Some(date.to_string()),
        method: Some(FulfillmentMethod::Delivery),
        ..ListOrdersRequest::default()
    })?;
    let orders: Vec<OrderRecord> = persistence
        .list_orders(&filter)
        .map_err(translate_persistence_error)?;
    delivery_route_csv(&orders)
}

/// Exports the pickup list for a date, optionally for one location, as CSV.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the date is malformed.
pub fn export_pickup_list(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    date: &str,
    location_id: Option<i64>,
) -> Result<String, ApiError> {
    require_admin(actor, "export_pickup_list")?;
    let filter: OrderFilter = order_filter(&ListOrdersRequest {
        date: Some(date.to_string()),
        method: Some(FulfillmentMethod::Pickup),
        status: None,
        pickup_location_id: location_id,
    })?;
    let orders: Vec<OrderRecord> = persistence
        .list_orders(&filter)
        .map_err(translate_persistence_error)?;
    pickup_list_csv(&orders)
}

// ---------------------------------------------------------------------------
// Delivery schedules
// ---------------------------------------------------------------------------

/// Lists every delivery schedule, active or not.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn list_delivery_schedules(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<DeliveryScheduleInfo>, ApiError> {
    require_admin(actor, "list_delivery_schedules")?;
    Ok(persistence
        .list_delivery_schedules()
        .map_err(translate_persistence_error)?
        .iter()
        .map(DeliveryScheduleInfo::from)
        .collect())
}

fn validated_schedule(
    request: &DeliveryScheduleRequest,
    id: i64,
) -> Result<DeliverySchedule, ApiError> {
    let schedule: DeliverySchedule = request.to_domain(id).map_err(translate_domain_error)?;
    validate_delivery_schedule(&schedule).map_err(translate_domain_error)?;
    Ok(schedule)
}

/// Creates a weekly delivery schedule.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or validation fails.
pub fn create_delivery_schedule(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &DeliveryScheduleRequest,
) -> Result<CreatedResponse, ApiError> {
    require_admin(actor, "create_delivery_schedule")?;
    let schedule: DeliverySchedule = validated_schedule(request, 0)?;
    let id: i64 = persistence
        .create_delivery_schedule(&schedule)
        .map_err(translate_persistence_error)?;
    Ok(CreatedResponse {
        id,
        message: format!("Created delivery schedule '{}'", schedule.name),
    })
}

/// Replaces a weekly delivery schedule.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, validation fails or the
/// schedule does not exist.
pub fn update_delivery_schedule(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    schedule_id: i64,
    request: &DeliveryScheduleRequest,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "update_delivery_schedule")?;
    let schedule: DeliverySchedule = validated_schedule(request, schedule_id)?;
    persistence
        .update_delivery_schedule(&schedule)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Updated delivery schedule {schedule_id}"),
    })
}

/// Deletes a weekly delivery schedule.
///
/// One-off dates that referenced it fall back to the default schedule.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the schedule does not exist.
pub fn delete_delivery_schedule(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    schedule_id: i64,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "delete_delivery_schedule")?;
    persistence
        .delete_delivery_schedule(schedule_id)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Deleted delivery schedule {schedule_id}"),
    })
}

// ---------------------------------------------------------------------------
// Pickup locations
// ---------------------------------------------------------------------------

/// Lists every pickup location, active or not.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn list_pickup_locations(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<PickupLocationInfo>, ApiError> {
    require_admin(actor, "list_pickup_locations")?;
    Ok(persistence
        .list_pickup_locations()
        .map_err(translate_persistence_error)?
        .iter()
        .map(PickupLocationInfo::from)
        .collect())
}

fn validated_location(
    request: &PickupLocationRequest,
    id: i64,
) -> Result<PickupLocation, ApiError> {
    let location: PickupLocation = request.to_domain(id).map_err(translate_domain_error)?;
    validate_pickup_location(&location).map_err(translate_domain_error)?;
    Ok(location)
}

/// Creates a pickup location.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or validation fails.
pub fn create_pickup_location(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &PickupLocationRequest,
) -> Result<CreatedResponse, ApiError> {
    require_admin(actor, "create_pickup_location")?;
    let location: PickupLocation = validated_location(request, 0)?;
    let id: i64 = persistence
        .create_pickup_location(&location)
        .map_err(translate_persistence_error)?;
    Ok(CreatedResponse {
        id,
        message: format!("Created pickup location '{}'", location.name),
    })
}

/// Replaces a pickup location.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, validation fails or the
/// location does not exist.
pub fn update_pickup_location(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    location_id: i64,
    request: &PickupLocationRequest,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "update_pickup_location")?;
    let location: PickupLocation = validated_location(request, location_id)?;
    persistence
        .update_pickup_location(&location)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Updated pickup location {location_id}"),
    })
}

/// Deletes a pickup location.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the location does not exist.
pub fn delete_pickup_location(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    location_id: i64,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "delete_pickup_location")?;
    persistence
        .delete_pickup_location(location_id)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Deleted pickup location {location_id}"),
    })
}

// ---------------------------------------------------------------------------
// Delivery zones
// ---------------------------------------------------------------------------

/// Lists every delivery zone, active or not.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn list_delivery_zones(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<DeliveryZoneInfo>, ApiError> {
    require_admin(actor, "list_delivery_zones")?;
    Ok(persistence
        .list_delivery_zones()
        .map_err(translate_persistence_error)?
        .iter()
        .map(DeliveryZoneInfo::from)
        .collect())
}

fn validated_zone(request: &DeliveryZoneRequest, id: i64) -> Result<DeliveryZone, ApiError> {
    let zone: DeliveryZone = request.to_domain(id).map_err(translate_domain_error)?;
    validate_delivery_zone(&zone).map_err(translate_domain_error)?;
    Ok(zone)
}

/// Creates a delivery zone.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or validation fails.
pub fn create_delivery_zone(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &DeliveryZoneRequest,
) -> Result<CreatedResponse, ApiError> {
    require_admin(actor, "create_delivery_zone")?;
    let zone: DeliveryZone = validated_zone(request, 0)?;
    let id: i64 = persistence
        .create_delivery_zone(&zone)
        .map_err(translate_persistence_error)?;
    Ok(CreatedResponse {
        id,
        message: format!("Created delivery zone '{}'", zone.name),
    })
}

/// Replaces a delivery zone.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, validation fails or the
/// zone does not exist.
pub fn update_delivery_zone(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    zone_id: i64,
    request: &DeliveryZoneRequest,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "update_delivery_zone")?;
    let zone: DeliveryZone = validated_zone(request, zone_id)?;
    persistence
        .update_delivery_zone(&zone)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Updated delivery zone {zone_id}"),
    })
}

/// Deletes a delivery zone. Orders keep the zone name they were priced with.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the zone does not exist.
pub fn delete_delivery_zone(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    zone_id: i64,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "delete_delivery_zone")?;
    persistence
        .delete_delivery_zone(zone_id)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Deleted delivery zone {zone_id}"),
    })
}

// ---------------------------------------------------------------------------
// Calendar closures
// ---------------------------------------------------------------------------

/// Lists calendar closures by date.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn list_closures(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<ClosureInfo>, ApiError> {
    require_admin(actor, "list_closures")?;
    Ok(persistence
        .list_closures()
        .map_err(translate_persistence_error)?
        .iter()
        .map(ClosureInfo::from)
        .collect())
}

fn validated_closure(
    persistence: &mut Persistence,
    request: &ClosureRequest,
    id: i64,
) -> Result<CalendarClosure, ApiError> {
    let closure: CalendarClosure = request.to_domain(id).map_err(translate_domain_error)?;
    let existing: Vec<CalendarClosure> = persistence
        .list_closures()
        .map_err(translate_persistence_error)?;
    let exclude: Option<i64> = (id != 0).then_some(id);
    validate_closure_unique(closure.closure_date, &existing, exclude)
        .map_err(translate_domain_error)?;
    Ok(closure)
}

/// Closes the bakery on a date.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the date is malformed, or
/// a closure already exists on the date.
pub fn create_closure(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &ClosureRequest,
) -> Result<CreatedResponse, ApiError> {
    require_admin(actor, "create_closure")?;
    let closure: CalendarClosure = validated_closure(persistence, request, 0)?;
    let id: i64 = persistence
        .create_closure(&closure)
        .map_err(translate_persistence_error)?;
    Ok(CreatedResponse {
        id,
        message: format!("Closed on {}", request.closure_date),
    })
}

/// Replaces a calendar closure.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, validation fails, or the
/// closure does not exist.
pub fn update_closure(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    closure_id: i64,
    request: &ClosureRequest,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "update_closure")?;
    let closure: CalendarClosure = validated_closure(persistence, request, closure_id)?;
    persistence
        .update_closure(&closure)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Updated closure {closure_id}"),
    })
}

/// Reopens a date.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the closure does not exist.
pub fn delete_closure(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    closure_id: i64,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "delete_closure")?;
    persistence
        .delete_closure(closure_id)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Deleted closure {closure_id}"),
    })
}

// ---------------------------------------------------------------------------
// One-off dates
// ---------------------------------------------------------------------------

/// Lists one-off dates by date.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn list_one_off_dates(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<OneOffDateInfo>, ApiError> {
    require_admin(actor, "list_one_off_dates")?;
    Ok(persistence
        .list_one_off_dates()
        .map_err(translate_persistence_error)?
        .iter()
        .map(OneOffDateInfo::from)
        .collect())
}

fn validated_one_off(
    persistence: &mut Persistence,
    request: &OneOffDateRequest,
    id: i64,
) -> Result<OneOffDate, ApiError> {
    let one_off: OneOffDate = request.to_domain(id).map_err(translate_domain_error)?;
    validate_one_off(&one_off).map_err(translate_domain_error)?;

    if let Some(schedule_id) = one_off.schedule_id {
        persistence
            .get_delivery_schedule(schedule_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| {
                not_found(
                    "Delivery schedule",
                    format!("Delivery schedule {schedule_id} does not exist"),
                )
            })?;
    }

    let existing: Vec<OneOffDate> = persistence
        .list_one_off_dates()
        .map_err(translate_persistence_error)?;
    let exclude: Option<i64> = (id != 0).then_some(id);
    validate_one_off_unique(one_off.date, one_off.method, &existing, exclude)
        .map_err(translate_domain_error)?;
    Ok(one_off)
}

/// Adds an extra delivery or pickup date.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, validation fails, the
/// referenced schedule does not exist, or a one-off of the same kind
/// already exists on the date.
pub fn create_one_off_date(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &OneOffDateRequest,
) -> Result<CreatedResponse, ApiError> {
    require_admin(actor, "create_one_off_date")?;
    let one_off: OneOffDate = validated_one_off(persistence, request, 0)?;
    let id: i64 = persistence
        .create_one_off_date(&one_off)
        .map_err(translate_persistence_error)?;
    Ok(CreatedResponse {
        id,
        message: format!("Added one-off {} date {}", one_off.method, request.date),
    })
}

/// Replaces a one-off date.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, validation fails, or the
/// one-off date does not exist.
pub fn update_one_off_date(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    one_off_id: i64,
    request: &OneOffDateRequest,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "update_one_off_date")?;
    let one_off: OneOffDate = validated_one_off(persistence, request, one_off_id)?;
    persistence
        .update_one_off_date(&one_off)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Updated one-off date {one_off_id}"),
    })
}

/// Removes a one-off date.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the one-off date does
/// not exist.
pub fn delete_one_off_date(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    one_off_id: i64,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "delete_one_off_date")?;
    persistence
        .delete_one_off_date(one_off_id)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Deleted one-off date {one_off_id}"),
    })
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Lists every product with every variant.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn list_products(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<ProductInfo>, ApiError> {
    require_admin(actor, "list_products")?;
    let catalog: CatalogData = load_catalog(persistence)?;
    Ok(catalog
        .products
        .iter()
        .map(|p| ProductInfo::new(p, &catalog.variants))
        .collect())
}

/// Creates a product.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or validation fails.
pub fn create_product(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &ProductRequest,
) -> Result<CreatedResponse, ApiError> {
    require_admin(actor, "create_product")?;
    let product: Product = request.to_domain(0);
    validate_product(&product).map_err(translate_domain_error)?;
    let id: i64 = persistence
        .create_product(&product)
        .map_err(translate_persistence_error)?;
    Ok(CreatedResponse {
        id,
        message: format!("Created product '{}'", product.name),
    })
}

/// Replaces a product, stock level included.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, validation fails, or the
/// product does not exist.
pub fn update_product(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    product_id: i64,
    request: &ProductRequest,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "update_product")?;
    let product: Product = request.to_domain(product_id);
    validate_product(&product).map_err(translate_domain_error)?;
    persistence
        .update_product(&product)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Updated product {product_id}"),
    })
}

/// Deletes a product and its variants.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the product does not exist.
pub fn delete_product(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    product_id: i64,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "delete_product")?;
    persistence
        .delete_product(product_id)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Deleted product {product_id}"),
    })
}

/// Adds a variant to a product.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, validation fails, or the
/// product does not exist.
pub fn create_variant(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    product_id: i64,
    request: &VariantRequest,
) -> Result<CreatedResponse, ApiError> {
    require_admin(actor, "create_variant")?;
    load_scope(persistence, Some(product_id))?;
    let variant: ProductVariant = request.to_domain(0, product_id);
    validate_variant(&variant).map_err(translate_domain_error)?;
    let id: i64 = persistence
        .create_variant(&variant)
        .map_err(translate_persistence_error)?;
    Ok(CreatedResponse {
        id,
        message: format!("Created variant '{}'", variant.name),
    })
}

/// Replaces a variant. Its product cannot change.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, validation fails, or the
/// variant does not exist.
pub fn update_variant(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    variant_id: i64,
    request: &VariantRequest,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "update_variant")?;
    let product_id: i64 = persistence
        .list_variants(None)
        .map_err(translate_persistence_error)?
        .iter()
        .find(|v| v.id == variant_id)
        .map(|v| v.product_id)
        .ok_or_else(|| {
            not_found(
                "Product variant",
                format!("Variant {variant_id} does not exist"),
            )
        })?;
    let variant: ProductVariant = request.to_domain(variant_id, product_id);
    validate_variant(&variant).map_err(translate_domain_error)?;
    persistence
        .update_variant(&variant)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Updated variant {variant_id}"),
    })
}

/// Deletes a variant.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the variant does not exist.
pub fn delete_variant(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    variant_id: i64,
) -> Result<MessageResponse, ApiError> {
    require_admin(actor, "delete_variant")?;
    persistence
        .delete_variant(variant_id)
        .map_err(translate_persistence_error)?;
    Ok(MessageResponse {
        message: format!("Deleted variant {variant_id}"),
    })
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Logs in and creates a session.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` for bad credentials.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let session: LoginSession =
        AuthenticationService::login(persistence, &request.login_name, &request.password)?;
    Ok(LoginResponse {
        session_token: session.session_token,
        login_name: session.actor.login_name,
        display_name: session.actor.display_name,
        role: session.actor.role,
        expires_at: session.expires_at,
    })
}

/// Ends a session. Unknown tokens are ignored.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub fn logout(
    persistence: &mut Persistence,
    session_token: &str,
) -> Result<MessageResponse, ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(MessageResponse {
        message: String::from("Logged out"),
    })
}

/// Describes the authenticated actor.
#[must_use]
pub fn whoami(actor: &AuthenticatedActor) -> WhoAmIResponse {
    WhoAmIResponse {
        login_name: actor.login_name.clone(),
        display_name: actor.display_name.clone(),
        role: actor.role,
    }
}

/// Creates the first admin account when no accounts exist.
///
/// Returns true if an account was created.
///
/// # Errors
///
/// Returns an error if the accounts cannot be counted or created.
pub fn bootstrap_admin(
    persistence: &mut Persistence,
    login_name: &str,
    password: &str,
) -> Result<bool, ApiError> {
    let existing: i64 = persistence
        .count_operators()
        .map_err(translate_persistence_error)?;
    if existing > 0 {
        return Ok(false);
    }
    if password.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("admin_password"),
            message: String::from("An initial admin password is required"),
        });
    }
    persistence
        .create_operator(login_name, "Administrator", password, "admin")
        .map_err(translate_persistence_error)?;
    info!(login_name, "Bootstrapped admin account");
    Ok(true)
}

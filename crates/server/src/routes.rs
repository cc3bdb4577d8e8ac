// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Axum handlers for the storefront, sessions and the back office.
//!
//! Each handler locks the persistence layer, calls the matching API
//! function and releases the lock before responding.

use axum::{
    Json,
    extract::{Path, Query, State as AxumState},
    http::header,
    response::{IntoResponse, Response},
};
use bakehouse_api::{
    AvailableDatesResponse, BulkUpdateFulfillmentStatusRequest,
    BulkUpdateFulfillmentStatusResponse, CalculateDeliveryFeeRequest, CheckoutResponse,
    ClosureInfo, ClosureRequest, CreatedResponse, DeliveryFeeResponse, DeliveryScheduleInfo,
    DeliveryScheduleRequest, DeliveryZoneInfo, DeliveryZoneRequest, ListOrdersRequest,
    ListOrdersResponse, LoginRequest, LoginResponse, ManualOrderRequest, MessageResponse,
    OneOffDateInfo, OneOffDateRequest, OrderInfo, OrderStatusResponse, PickupLocationInfo,
    PickupLocationRequest, ProductInfo, ProductRequest, UpdateFulfillmentStatusRequest,
    UpdateOrderStatusRequest, VariantRequest, WhoAmIResponse,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::AppState;
use crate::error::HttpError;
use crate::session::SessionActor;

type JsonResult<T> = Result<Json<T>, HttpError>;

/// Query parameters for delivery dates.
#[derive(Debug, Deserialize)]
pub struct DeliveryDatesQuery {
    pub product_id: Option<i64>,
    pub max_dates: Option<usize>,
}

/// Query parameters for pickup dates.
#[derive(Debug, Deserialize)]
pub struct PickupDatesQuery {
    pub location_id: i64,
    pub product_id: Option<i64>,
    pub max_dates: Option<usize>,
}

/// Query parameters for the delivery route export.
#[derive(Debug, Deserialize)]
pub struct RouteExportQuery {
    pub date: String,
}

/// Query parameters for the pickup list export.
#[derive(Debug, Deserialize)]
pub struct PickupExportQuery {
    pub date: String,
    pub location_id: Option<i64>,
}

fn csv_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response()
}

// ---------------------------------------------------------------------------
// Storefront
// ---------------------------------------------------------------------------

/// Handler for GET `/storefront/products`.
pub async fn handle_storefront_products(
    AxumState(state): AxumState<AppState>,
) -> JsonResult<Vec<ProductInfo>> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::list_storefront_products(
        &mut persistence,
    )?))
}

/// Handler for GET `/storefront/pickup_locations`.
pub async fn handle_storefront_pickup_locations(
    AxumState(state): AxumState<AppState>,
) -> JsonResult<Vec<PickupLocationInfo>> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::list_storefront_pickup_locations(
        &mut persistence,
    )?))
}

/// Handler for GET `/storefront/delivery_dates`.
pub async fn handle_delivery_dates(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<DeliveryDatesQuery>,
) -> JsonResult<AvailableDatesResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::get_available_delivery_dates(
        &mut persistence,
        query.product_id,
        query.max_dates,
        Utc::now(),
        &state.settings.resolver,
    )?))
}

/// Handler for GET `/storefront/pickup_dates`.
pub async fn handle_pickup_dates(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<PickupDatesQuery>,
) -> JsonResult<AvailableDatesResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::get_available_pickup_dates(
        &mut persistence,
        query.location_id,
        query.product_id,
        query.max_dates,
        Utc::now(),
        &state.settings.resolver,
    )?))
}

/// Handler for POST `/storefront/delivery_fee`.
pub async fn handle_delivery_fee(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CalculateDeliveryFeeRequest>,
) -> JsonResult<DeliveryFeeResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::calculate_delivery_fee(
        &mut persistence,
        &req,
        state.settings.tax_rate,
    )?))
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Handler for POST `/auth/login`.
pub async fn handle_login(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> JsonResult<LoginResponse> {
    info!(login_name = %req.login_name, "Handling login request");
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::login(&mut persistence, &req)?))
}

/// Handler for POST `/auth/logout`.
pub async fn handle_logout(
    AxumState(state): AxumState<AppState>,
    SessionActor(_actor, token): SessionActor,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::logout(&mut persistence, &token)?))
}

/// Handler for GET `/auth/me`.
pub async fn handle_whoami(SessionActor(actor, _token): SessionActor) -> Json<WhoAmIResponse> {
    Json(bakehouse_api::whoami(&actor))
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Handler for GET `/admin/orders`.
pub async fn handle_list_orders(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Query(query): Query<ListOrdersRequest>,
) -> JsonResult<ListOrdersResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::list_orders(
        &mut persistence,
        &actor,
        &query,
    )?))
}

/// Handler for POST `/admin/orders`: an order entered by staff.
pub async fn handle_create_manual_order(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<ManualOrderRequest>,
) -> JsonResult<CheckoutResponse> {
    info!(admin = %actor.login_name, "Handling manual order request");
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::create_manual_order(
        &mut persistence,
        &actor,
        &req,
        Utc::now(),
        &state.settings,
        state.notifier.as_ref(),
    )?))
}

/// Handler for GET `/admin/orders/{order_id}`.
pub async fn handle_get_order(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(order_id): Path<i64>,
) -> JsonResult<OrderInfo> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::get_order(
        &mut persistence,
        &actor,
        order_id,
    )?))
}

/// Handler for POST `/admin/orders/{order_id}/status`.
pub async fn handle_update_order_status(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(order_id): Path<i64>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> JsonResult<OrderStatusResponse> {
    info!(order_id, status = %req.status, "Handling order status update");
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::update_order_status(
        &mut persistence,
        &actor,
        order_id,
        &req,
    )?))
}

/// Handler for POST `/admin/orders/{order_id}/delivery_status`.
pub async fn handle_update_delivery_status(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(order_id): Path<i64>,
    Json(req): Json<UpdateFulfillmentStatusRequest>,
) -> JsonResult<OrderStatusResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::update_delivery_status(
        &mut persistence,
        &actor,
        order_id,
        &req,
        state.notifier.as_ref(),
    )?))
}

/// Handler for POST `/admin/orders/{order_id}/pickup_status`.
pub async fn handle_update_pickup_status(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(order_id): Path<i64>,
    Json(req): Json<UpdateFulfillmentStatusRequest>,
) -> JsonResult<OrderStatusResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::update_pickup_status(
        &mut persistence,
        &actor,
        order_id,
        &req,
        state.notifier.as_ref(),
    )?))
}

/// Handler for POST `/admin/orders/fulfillment_status`.
pub async fn handle_bulk_fulfillment_status(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<BulkUpdateFulfillmentStatusRequest>,
) -> JsonResult<BulkUpdateFulfillmentStatusResponse> {
    info!(orders = req.order_ids.len(), status = %req.status, "Handling bulk fulfillment update");
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::bulk_update_fulfillment_status(
        &mut persistence,
        &actor,
        &req,
        state.notifier.as_ref(),
    )?))
}

/// Handler for GET `/admin/exports/delivery_route`.
pub async fn handle_export_delivery_route(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Query(query): Query<RouteExportQuery>,
) -> Result<Response, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let body: String =
        bakehouse_api::export_delivery_route(&mut persistence, &actor, &query.date)?;
    Ok(csv_response(body))
}

/// Handler for GET `/admin/exports/pickup_list`.
pub async fn handle_export_pickup_list(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Query(query): Query<PickupExportQuery>,
) -> Result<Response, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let body: String = bakehouse_api::export_pickup_list(
        &mut persistence,
        &actor,
        &query.date,
        query.location_id,
    )?;
    Ok(csv_response(body))
}

// ---------------------------------------------------------------------------
// Fulfillment rules
// ---------------------------------------------------------------------------

/// Handler for GET `/admin/delivery_schedules`.
pub async fn handle_list_delivery_schedules(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
) -> JsonResult<Vec<DeliveryScheduleInfo>> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::list_delivery_schedules(
        &mut persistence,
        &actor,
    )?))
}

/// Handler for POST `/admin/delivery_schedules`.
pub async fn handle_create_delivery_schedule(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<DeliveryScheduleRequest>,
) -> JsonResult<CreatedResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::create_delivery_schedule(
        &mut persistence,
        &actor,
        &req,
    )?))
}

/// Handler for PUT `/admin/delivery_schedules/{id}`.
pub async fn handle_update_delivery_schedule(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
    Json(req): Json<DeliveryScheduleRequest>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::update_delivery_schedule(
        &mut persistence,
        &actor,
        id,
        &req,
    )?))
}

/// Handler for DELETE `/admin/delivery_schedules/{id}`.
pub async fn handle_delete_delivery_schedule(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::delete_delivery_schedule(
        &mut persistence,
        &actor,
        id,
    )?))
}

/// Handler for GET `/admin/pickup_locations`.
pub async fn handle_list_pickup_locations(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
) -> JsonResult<Vec<PickupLocationInfo>> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::list_pickup_locations(
        &mut persistence,
        &actor,
    )?))
}

/// Handler for POST `/admin/pickup_locations`.
pub async fn handle_create_pickup_location(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<PickupLocationRequest>,
) -> JsonResult<CreatedResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::create_pickup_location(
        &mut persistence,
        &actor,
        &req,
    )?))
}

/// Handler for PUT `/admin/pickup_locations/{id}`.
pub async fn handle_update_pickup_location(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
    Json(req): Json<PickupLocationRequest>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::update_pickup_location(
        &mut persistence,
        &actor,
        id,
        &req,
    )?))
}

/// Handler for DELETE `/admin/pickup_locations/{id}`.
pub async fn handle_delete_pickup_location(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::delete_pickup_location(
        &mut persistence,
        &actor,
        id,
    )?))
}

/// Handler for GET `/admin/delivery_zones`.
pub async fn handle_list_delivery_zones(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
) -> JsonResult<Vec<DeliveryZoneInfo>> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::list_delivery_zones(
        &mut persistence,
        &actor,
    )?))
}

/// Handler for POST `/admin/delivery_zones`.
pub async fn handle_create_delivery_zone(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<DeliveryZoneRequest>,
) -> JsonResult<CreatedResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::create_delivery_zone(
        &mut persistence,
        &actor,
        &req,
    )?))
}

/// Handler for PUT `/admin/delivery_zones/{id}`.
pub async fn handle_update_delivery_zone(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
    Json(req): Json<DeliveryZoneRequest>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::update_delivery_zone(
        &mut persistence,
        &actor,
        id,
        &req,
    )?))
}

/// Handler for DELETE `/admin/delivery_zones/{id}`.
pub async fn handle_delete_delivery_zone(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::delete_delivery_zone(
        &mut persistence,
        &actor,
        id,
    )?))
}

/// Handler for GET `/admin/closures`.
pub async fn handle_list_closures(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
) -> JsonResult<Vec<ClosureInfo>> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::list_closures(&mut persistence, &actor)?))
}

/// Handler for POST `/admin/closures`.
pub async fn handle_create_closure(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<ClosureRequest>,
) -> JsonResult<CreatedResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::create_closure(
        &mut persistence,
        &actor,
        &req,
    )?))
}

/// Handler for PUT `/admin/closures/{id}`.
pub async fn handle_update_closure(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
    Json(req): Json<ClosureRequest>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::update_closure(
        &mut persistence,
        &actor,
        id,
        &req,
    )?))
}

/// Handler for DELETE `/admin/closures/{id}`.
pub async fn handle_delete_closure(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::delete_closure(
        &mut persistence,
        &actor,
        id,
    )?))
}

/// Handler for GET `/admin/one_off_dates`.
pub async fn handle_list_one_off_dates(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
) -> JsonResult<Vec<OneOffDateInfo>> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::list_one_off_dates(
        &mut persistence,
        &actor,
    )?))
}

/// Handler for POST `/admin/one_off_dates`.
pub async fn handle_create_one_off_date(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<OneOffDateRequest>,
) -> JsonResult<CreatedResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::create_one_off_date(
        &mut persistence,
        &actor,
        &req,
    )?))
}

/// Handler for PUT `/admin/one_off_dates/{id}`.
pub async fn handle_update_one_off_date(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
    Json(req): Json<OneOffDateRequest>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::update_one_off_date(
        &mut persistence,
        &actor,
        id,
        &req,
    )?))
}

/// Handler for DELETE `/admin/one_off_dates/{id}`.
pub async fn handle_delete_one_off_date(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::delete_one_off_date(
        &mut persistence,
        &actor,
        id,
    )?))
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Handler for GET `/admin/products`.
pub async fn handle_list_products(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
) -> JsonResult<Vec<ProductInfo>> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::list_products(&mut persistence, &actor)?))
}

/// Handler for POST `/admin/products`.
pub async fn handle_create_product(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<ProductRequest>,
) -> JsonResult<CreatedResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::create_product(
        &mut persistence,
        &actor,
        &req,
    )?))
}

/// Handler for PUT `/admin/products/{id}`.
pub async fn handle_update_product(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
    Json(req): Json<ProductRequest>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::update_product(
        &mut persistence,
        &actor,
        id,
        &req,
    )?))
}

/// Handler for DELETE `/admin/products/{id}`.
pub async fn handle_delete_product(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::delete_product(
        &mut persistence,
        &actor,
        id,
    )?))
}

/// Handler for POST `/admin/products/{id}/variants`.
pub async fn handle_create_variant(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(product_id): Path<i64>,
    Json(req): Json<VariantRequest>,
) -> JsonResult<CreatedResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::create_variant(
        &mut persistence,
        &actor,
        product_id,
        &req,
    )?))
}

/// Handler for PUT `/admin/variants/{id}`.
pub async fn handle_update_variant(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
    Json(req): Json<VariantRequest>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::update_variant(
        &mut persistence,
        &actor,
        id,
        &req,
    )?))
}

/// Handler for DELETE `/admin/variants/{id}`.
pub async fn handle_delete_variant(
    AxumState(state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Path(id): Path<i64>,
) -> JsonResult<MessageResponse> {
    let mut persistence = state.persistence.lock().await;
    Ok(Json(bakehouse_api::delete_variant(
        &mut persistence,
        &actor,
        id,
    )?))
}

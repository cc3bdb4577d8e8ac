// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery schedules, pickup locations, zones, closures and one-off dates.

use std::collections::BTreeSet;
use std::str::FromStr;

use bakehouse_domain::{
    Address, CalendarClosure, DeliverySchedule, DeliveryZone, FulfillmentMethod, OneOffDate,
    PickupLocation, ZipCode, parse_date, parse_time_hhmm, weekday_from_index,
};
use chrono::Weekday;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use super::{column_error, flag, unsigned};
use crate::data_models::FulfillmentData;
use crate::diesel_schema::{
    calendar_closures, delivery_schedules, delivery_zones, one_off_dates, pickup_locations,
};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = delivery_schedules)]
struct ScheduleRow {
    schedule_id: i64,
    name: String,
    day_of_week: i32,
    cutoff_day: i32,
    cutoff_time: String,
    lead_time_days: i32,
    delivery_time_window: String,
    is_active: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = pickup_locations)]
struct LocationRow {
    location_id: i64,
    name: String,
    address_json: String,
    pickup_days_json: String,
    pickup_time_windows: String,
    instructions: String,
    lead_time_days: i32,
    is_active: i32,
    requires_preorder: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = delivery_zones)]
struct ZoneRow {
    zone_id: i64,
    name: String,
    zip_codes_json: String,
    fee_cents: i64,
    priority: i32,
    is_active: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = calendar_closures)]
struct ClosureRow {
    closure_id: i64,
    closure_date: String,
    reason: String,
    affects_delivery: i32,
    affects_pickup: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = one_off_dates)]
struct OneOffRow {
    one_off_id: i64,
    date: String,
    kind: String,
    reason: String,
    schedule_id: Option<i64>,
    time_window_start: Option<String>,
    time_window_end: Option<String>,
    cutoff_day: Option<i32>,
    cutoff_time: Option<String>,
    lead_time_days: Option<i32>,
}

fn schedule_from_row(row: ScheduleRow) -> Result<DeliverySchedule, PersistenceError> {
    Ok(DeliverySchedule {
        id: row.schedule_id,
        name: row.name,
        day_of_week: weekday_from_index(row.day_of_week).map_err(column_error("day_of_week"))?,
        cutoff_day: weekday_from_index(row.cutoff_day).map_err(column_error("cutoff_day"))?,
        cutoff_time: parse_time_hhmm(&row.cutoff_time).map_err(column_error("cutoff_time"))?,
        lead_time_days: unsigned("lead_time_days", row.lead_time_days)?,
        delivery_time_window: row.delivery_time_window,
        is_active: flag(row.is_active),
    })
}

fn location_from_row(row: LocationRow) -> Result<PickupLocation, PersistenceError> {
    let address: Address = serde_json::from_str(&row.address_json)?;
    let day_indices: Vec<i32> = serde_json::from_str(&row.pickup_days_json)?;
    let pickup_days: Vec<Weekday> = day_indices
        .into_iter()
        .map(|index| weekday_from_index(index).map_err(column_error("pickup_days_json")))
        .collect::<Result<_, _>>()?;

    Ok(PickupLocation {
        id: row.location_id,
        name: row.name,
        address,
        pickup_days,
        pickup_time_windows: row.pickup_time_windows,
        instructions: row.instructions,
        lead_time_days: unsigned("lead_time_days", row.lead_time_days)?,
        is_active: flag(row.is_active),
        requires_preorder: flag(row.requires_preorder),
    })
}

fn zone_from_row(row: ZoneRow) -> Result<DeliveryZone, PersistenceError> {
    let raw_zips: Vec<String> = serde_json::from_str(&row.zip_codes_json)?;
    let zip_codes: BTreeSet<ZipCode> = raw_zips
        .iter()
        .map(|zip| ZipCode::parse(zip).map_err(column_error("zip_codes_json")))
        .collect::<Result<_, _>>()?;

    Ok(DeliveryZone {
        id: row.zone_id,
        name: row.name,
        zip_codes,
        fee_cents: row.fee_cents,
        priority: row.priority,
        is_active: flag(row.is_active),
    })
}

fn closure_from_row(row: ClosureRow) -> Result<CalendarClosure, PersistenceError> {
    Ok(CalendarClosure {
        id: row.closure_id,
        closure_date: parse_date(&row.closure_date).map_err(column_error("closure_date"))?,
        reason: row.reason,
        affects_delivery: flag(row.affects_delivery),
        affects_pickup: flag(row.affects_pickup),
    })
}

fn one_off_from_row(row: OneOffRow) -> Result<OneOffDate, PersistenceError> {
    let optional_time = |column: &'static str, value: Option<String>| {
        value
            .map(|v| parse_time_hhmm(&v).map_err(column_error(column)))
            .transpose()
    };

    Ok(OneOffDate {
        id: row.one_off_id,
        date: parse_date(&row.date).map_err(column_error("date"))?,
        method: FulfillmentMethod::from_str(&row.kind).map_err(column_error("kind"))?,
        reason: row.reason,
        schedule_id: row.schedule_id,
        time_window_start: optional_time("time_window_start", row.time_window_start)?,
        time_window_end: optional_time("time_window_end", row.time_window_end)?,
        cutoff_day: row
            .cutoff_day
            .map(|d| weekday_from_index(d).map_err(column_error("cutoff_day")))
            .transpose()?,
        cutoff_time: optional_time("cutoff_time", row.cutoff_time)?,
        lead_time_days: row
            .lead_time_days
            .map(|d| unsigned("lead_time_days", d))
            .transpose()?,
    })
}

/// Lists every delivery schedule, active or not, by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to decode.
pub fn list_delivery_schedules(
    conn: &mut SqliteConnection,
) -> Result<Vec<DeliverySchedule>, PersistenceError> {
    debug!("Listing delivery schedules");

    let rows: Vec<ScheduleRow> = delivery_schedules::table
        .select(ScheduleRow::as_select())
        .order_by(delivery_schedules::schedule_id.asc())
        .load(conn)?;

    rows.into_iter().map(schedule_from_row).collect()
}

/// Retrieves a delivery schedule by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the schedule does not exist.
pub fn get_delivery_schedule(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<Option<DeliverySchedule>, PersistenceError> {
    debug!(schedule_id, "Looking up delivery schedule");

    let row: Option<ScheduleRow> = delivery_schedules::table
        .filter(delivery_schedules::schedule_id.eq(schedule_id))
        .select(ScheduleRow::as_select())
        .first(conn)
        .optional()?;

    row.map(schedule_from_row).transpose()
}

/// Lists every pickup location by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to decode.
pub fn list_pickup_locations(
    conn: &mut SqliteConnection,
) -> Result<Vec<PickupLocation>, PersistenceError> {
    debug!("Listing pickup locations");

    let rows: Vec<LocationRow> = pickup_locations::table
        .select(LocationRow::as_select())
        .order_by(pickup_locations::location_id.asc())
        .load(conn)?;

    rows.into_iter().map(location_from_row).collect()
}

/// Retrieves a pickup location by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the location does not exist.
pub fn get_pickup_location(
    conn: &mut SqliteConnection,
    location_id: i64,
) -> Result<Option<PickupLocation>, PersistenceError> {
    debug!(location_id, "Looking up pickup location");

    let row: Option<LocationRow> = pickup_locations::table
        .filter(pickup_locations::location_id.eq(location_id))
        .select(LocationRow::as_select())
        .first(conn)
        .optional()?;

    row.map(location_from_row).transpose()
}

/// Lists every delivery zone by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to decode.
pub fn list_delivery_zones(
    conn: &mut SqliteConnection,
) -> Result<Vec<DeliveryZone>, PersistenceError> {
    debug!("Listing delivery zones");

    let rows: Vec<ZoneRow> = delivery_zones::table
        .select(ZoneRow::as_select())
        .order_by(delivery_zones::zone_id.asc())
        .load(conn)?;

    rows.into_iter().map(zone_from_row).collect()
}

/// Retrieves a delivery zone by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the zone does not exist.
pub fn get_delivery_zone(
    conn: &mut SqliteConnection,
    zone_id: i64,
) -> Result<Option<DeliveryZone>, PersistenceError> {
    debug!(zone_id, "Looking up delivery zone");

    let row: Option<ZoneRow> = delivery_zones::table
        .filter(delivery_zones::zone_id.eq(zone_id))
        .select(ZoneRow::as_select())
        .first(conn)
        .optional()?;

    row.map(zone_from_row).transpose()
}

/// Lists closures in date order.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to decode.
pub fn list_closures(
    conn: &mut SqliteConnection,
) -> Result<Vec<CalendarClosure>, PersistenceError> {
    debug!("Listing calendar closures");

    let rows: Vec<ClosureRow> = calendar_closures::table
        .select(ClosureRow::as_select())
        .order_by(calendar_closures::closure_date.asc())
        .load(conn)?;

    rows.into_iter().map(closure_from_row).collect()
}

/// Lists one-off dates in date order.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to decode.
pub fn list_one_off_dates(
    conn: &mut SqliteConnection,
) -> Result<Vec<OneOffDate>, PersistenceError> {
    debug!("Listing one-off dates");

    let rows: Vec<OneOffRow> = one_off_dates::table
        .select(OneOffRow::as_select())
        .order_by((one_off_dates::date.asc(), one_off_dates::kind.asc()))
        .load(conn)?;

    rows.into_iter().map(one_off_from_row).collect()
}

/// Loads every rule the date resolver and fee calculator read.
///
/// # Errors
///
/// Returns an error if any of the underlying queries fail.
pub fn load_fulfillment_data(
    conn: &mut SqliteConnection,
) -> Result<FulfillmentData, PersistenceError> {
    Ok(FulfillmentData {
        schedules: list_delivery_schedules(conn)?,
        pickup_locations: list_pickup_locations(conn)?,
        zones: list_delivery_zones(conn)?,
        one_offs: list_one_off_dates(conn)?,
        closures: list_closures(conn)?,
    })
}

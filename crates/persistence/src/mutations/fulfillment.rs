// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule, pickup location, zone, closure and one-off date mutations.
//!
//! Callers validate records with the domain validators first. The
//! database `UNIQUE` constraints on closure dates and one-off
//! `(date, kind)` pairs back those checks up.

use bakehouse_domain::{
    CalendarClosure, DeliverySchedule, DeliveryZone, OneOffDate, PickupLocation, ZipCode,
    format_date, format_time_hhmm, weekday_index,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use super::{count_column, require_row};
use crate::backend::PersistenceBackend;
use crate::diesel_schema::{
    calendar_closures, delivery_schedules, delivery_zones, one_off_dates, pickup_locations,
};
use crate::error::PersistenceError;

fn pickup_days_json(location: &PickupLocation) -> Result<String, PersistenceError> {
    let days: Vec<i32> = location
        .pickup_days
        .iter()
        .map(|d| weekday_index(*d))
        .collect();
    Ok(serde_json::to_string(&days)?)
}

fn zip_codes_json(zone: &DeliveryZone) -> Result<String, PersistenceError> {
    let zips: Vec<&str> = zone.zip_codes.iter().map(ZipCode::as_str).collect();
    Ok(serde_json::to_string(&zips)?)
}

/// Inserts a delivery schedule and returns its ID. `schedule.id` is ignored.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_delivery_schedule(
    conn: &mut SqliteConnection,
    schedule: &DeliverySchedule,
) -> Result<i64, PersistenceError> {
    info!(name = %schedule.name, "Creating delivery schedule");

    diesel::insert_into(delivery_schedules::table)
        .values((
            delivery_schedules::name.eq(&schedule.name),
            delivery_schedules::day_of_week.eq(weekday_index(schedule.day_of_week)),
            delivery_schedules::cutoff_day.eq(weekday_index(schedule.cutoff_day)),
            delivery_schedules::cutoff_time.eq(format_time_hhmm(schedule.cutoff_time)),
            delivery_schedules::lead_time_days
                .eq(count_column("lead_time_days", schedule.lead_time_days)?),
            delivery_schedules::delivery_time_window.eq(&schedule.delivery_time_window),
            delivery_schedules::is_active.eq(i32::from(schedule.is_active)),
        ))
        .execute(conn)?;

    let schedule_id: i64 = conn.get_last_insert_rowid()?;
    info!(schedule_id, "Delivery schedule created");
    Ok(schedule_id)
}

/// Overwrites the delivery schedule with `schedule.id`.
///
/// # Errors
///
/// Returns `NotFound` if no such schedule exists.
pub fn update_delivery_schedule(
    conn: &mut SqliteConnection,
    schedule: &DeliverySchedule,
) -> Result<(), PersistenceError> {
    info!(schedule_id = schedule.id, "Updating delivery schedule");

    let rows: usize = diesel::update(
        delivery_schedules::table.filter(delivery_schedules::schedule_id.eq(schedule.id)),
    )
    .set((
        delivery_schedules::name.eq(&schedule.name),
        delivery_schedules::day_of_week.eq(weekday_index(schedule.day_of_week)),
        delivery_schedules::cutoff_day.eq(weekday_index(schedule.cutoff_day)),
        delivery_schedules::cutoff_time.eq(format_time_hhmm(schedule.cutoff_time)),
        delivery_schedules::lead_time_days
            .eq(count_column("lead_time_days", schedule.lead_time_days)?),
        delivery_schedules::delivery_time_window.eq(&schedule.delivery_time_window),
        delivery_schedules::is_active.eq(i32::from(schedule.is_active)),
    ))
    .execute(conn)?;

    require_row(rows, "delivery schedule", schedule.id)
}

/// Deletes a delivery schedule. One-offs referencing it lose the reference.
///
/// # Errors
///
/// Returns `NotFound` if no such schedule exists.
pub fn delete_delivery_schedule(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<(), PersistenceError> {
    info!(schedule_id, "Deleting delivery schedule");

    let rows: usize = diesel::delete(
        delivery_schedules::table.filter(delivery_schedules::schedule_id.eq(schedule_id)),
    )
    .execute(conn)?;

    require_row(rows, "delivery schedule", schedule_id)
}

/// Inserts a pickup location and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_pickup_location(
    conn: &mut SqliteConnection,
    location: &PickupLocation,
) -> Result<i64, PersistenceError> {
    info!(name = %location.name, "Creating pickup location");

    diesel::insert_into(pickup_locations::table)
        .values((
            pickup_locations::name.eq(&location.name),
            pickup_locations::address_json.eq(serde_json::to_string(&location.address)?),
            pickup_locations::pickup_days_json.eq(pickup_days_json(location)?),
            pickup_locations::pickup_time_windows.eq(&location.pickup_time_windows),
            pickup_locations::instructions.eq(&location.instructions),
            pickup_locations::lead_time_days
                .eq(count_column("lead_time_days", location.lead_time_days)?),
            pickup_locations::is_active.eq(i32::from(location.is_active)),
            pickup_locations::requires_preorder.eq(i32::from(location.requires_preorder)),
        ))
        .execute(conn)?;

    let location_id: i64 = conn.get_last_insert_rowid()?;
    info!(location_id, "Pickup location created");
    Ok(location_id)
}

/// Overwrites the pickup location with `location.id`.
///
/// # Errors
///
/// Returns `NotFound` if no such location exists.
pub fn update_pickup_location(
    conn: &mut SqliteConnection,
    location: &PickupLocation,
) -> Result<(), PersistenceError> {
    info!(location_id = location.id, "Updating pickup location");

    let rows: usize = diesel::update(
        pickup_locations::table.filter(pickup_locations::location_id.eq(location.id)),
    )
    .set((
        pickup_locations::name.eq(&location.name),
        pickup_locations::address_json.eq(serde_json::to_string(&location.address)?),
        pickup_locations::pickup_days_json.eq(pickup_days_json(location)?),
        pickup_locations::pickup_time_windows.eq(&location.pickup_time_windows),
        pickup_locations::instructions.eq(&location.instructions),
        pickup_locations::lead_time_days
            .eq(count_column("lead_time_days", location.lead_time_days)?),
        pickup_locations::is_active.eq(i32::from(location.is_active)),
        pickup_locations::requires_preorder.eq(i32::from(location.requires_preorder)),
    ))
    .execute(conn)?;

    require_row(rows, "pickup location", location.id)
}

/// Deletes a pickup location.
///
/// # Errors
///
/// Returns `NotFound` if no such location exists.
pub fn delete_pickup_location(
    conn: &mut SqliteConnection,
    location_id: i64,
) -> Result<(), PersistenceError> {
    info!(location_id, "Deleting pickup location");

    let rows: usize = diesel::delete(
        pickup_locations::table.filter(pickup_locations::location_id.eq(location_id)),
    )
    .execute(conn)?;

    require_row(rows, "pickup location", location_id)
}

/// Inserts a delivery zone and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_delivery_zone(
    conn: &mut SqliteConnection,
    zone: &DeliveryZone,
) -> Result<i64, PersistenceError> {
    info!(name = %zone.name, zips = zone.zip_codes.len(), "Creating delivery zone");

    diesel::insert_into(delivery_zones::table)
        .values((
            delivery_zones::name.eq(&zone.name),
            delivery_zones::zip_codes_json.eq(zip_codes_json(zone)?),
            delivery_zones::fee_cents.eq(zone.fee_cents),
            delivery_zones::priority.eq(zone.priority),
            delivery_zones::is_active.eq(i32::from(zone.is_active)),
        ))
        .execute(conn)?;

    let zone_id: i64 = conn.get_last_insert_rowid()?;
    info!(zone_id, "Delivery zone created");
    Ok(zone_id)
}

/// Overwrites the delivery zone with `zone.id`.
///
/// # Errors
///
/// Returns `NotFound` if no such zone exists.
pub fn update_delivery_zone(
    conn: &mut SqliteConnection,
    zone: &DeliveryZone,
) -> Result<(), PersistenceError> {
    info!(zone_id = zone.id, "Updating delivery zone");

    let rows: usize =
        diesel::update(delivery_zones::table.filter(delivery_zones::zone_id.eq(zone.id)))
            .set((
                delivery_zones::name.eq(&zone.name),
                delivery_zones::zip_codes_json.eq(zip_codes_json(zone)?),
                delivery_zones::fee_cents.eq(zone.fee_cents),
                delivery_zones::priority.eq(zone.priority),
                delivery_zones::is_active.eq(i32::from(zone.is_active)),
            ))
            .execute(conn)?;

    require_row(rows, "delivery zone", zone.id)
}

/// Deletes a delivery zone. Orders keep their zone name snapshot.
///
/// # Errors
///
/// Returns `NotFound` if no such zone exists.
pub fn delete_delivery_zone(
    conn: &mut SqliteConnection,
    zone_id: i64,
) -> Result<(), PersistenceError> {
    info!(zone_id, "Deleting delivery zone");

    let rows: usize =
        diesel::delete(delivery_zones::table.filter(delivery_zones::zone_id.eq(zone_id)))
            .execute(conn)?;

    require_row(rows, "delivery zone", zone_id)
}

/// Inserts a calendar closure and returns its ID.
///
/// # Errors
///
/// Returns `UniqueViolation` if the date is already closed.
pub fn create_closure(
    conn: &mut SqliteConnection,
    closure: &CalendarClosure,
) -> Result<i64, PersistenceError> {
    info!(date = %closure.closure_date, "Creating calendar closure");

    diesel::insert_into(calendar_closures::table)
        .values((
            calendar_closures::closure_date.eq(format_date(closure.closure_date)),
            calendar_closures::reason.eq(&closure.reason),
            calendar_closures::affects_delivery.eq(i32::from(closure.affects_delivery)),
            calendar_closures::affects_pickup.eq(i32::from(closure.affects_pickup)),
        ))
        .execute(conn)?;

    let closure_id: i64 = conn.get_last_insert_rowid()?;
    info!(closure_id, "Calendar closure created");
    Ok(closure_id)
}

/// Overwrites the closure with `closure.id`.
///
/// # Errors
///
/// Returns `NotFound` if no such closure exists, or `UniqueViolation`
/// if another closure already holds the new date.
pub fn update_closure(
    conn: &mut SqliteConnection,
    closure: &CalendarClosure,
) -> Result<(), PersistenceError> {
    info!(closure_id = closure.id, "Updating calendar closure");

    let rows: usize = diesel::update(
        calendar_closures::table.filter(calendar_closures::closure_id.eq(closure.id)),
    )
    .set((
        calendar_closures::closure_date.eq(format_date(closure.closure_date)),
        calendar_closures::reason.eq(&closure.reason),
        calendar_closures::affects_delivery.eq(i32::from(closure.affects_delivery)),
        calendar_closures::affects_pickup.eq(i32::from(closure.affects_pickup)),
    ))
    .execute(conn)?;

    require_row(rows, "calendar closure", closure.id)
}

/// Deletes a calendar closure.
///
/// # Errors
///
/// Returns `NotFound` if no such closure exists.
pub fn delete_closure(conn: &mut SqliteConnection, closure_id: i64) -> Result<(), PersistenceError> {
    info!(closure_id, "Deleting calendar closure");

    let rows: usize = diesel::delete(
        calendar_closures::table.filter(calendar_closures::closure_id.eq(closure_id)),
    )
    .execute(conn)?;

    require_row(rows, "calendar closure", closure_id)
}

/// Inserts a one-off date and returns its ID.
///
/// # Errors
///
/// Returns `UniqueViolation` if a one-off of the same kind exists on the date.
pub fn create_one_off_date(
    conn: &mut SqliteConnection,
    one_off: &OneOffDate,
) -> Result<i64, PersistenceError> {
    info!(date = %one_off.date, kind = %one_off.method, "Creating one-off date");

    diesel::insert_into(one_off_dates::table)
        .values((
            one_off_dates::date.eq(format_date(one_off.date)),
            one_off_dates::kind.eq(one_off.method.as_str()),
            one_off_dates::reason.eq(&one_off.reason),
            one_off_dates::schedule_id.eq(one_off.schedule_id),
            one_off_dates::time_window_start.eq(one_off.time_window_start.map(format_time_hhmm)),
            one_off_dates::time_window_end.eq(one_off.time_window_end.map(format_time_hhmm)),
            one_off_dates::cutoff_day.eq(one_off.cutoff_day.map(weekday_index)),
            one_off_dates::cutoff_time.eq(one_off.cutoff_time.map(format_time_hhmm)),
            one_off_dates::lead_time_days.eq(one_off
                .lead_time_days
                .map(|d| count_column("lead_time_days", d))
                .transpose()?),
        ))
        .execute(conn)?;

    let one_off_id: i64 = conn.get_last_insert_rowid()?;
    info!(one_off_id, "One-off date created");
    Ok(one_off_id)
}

/// Overwrites the one-off date with `one_off.id`.
///
/// # Errors
///
/// Returns `NotFound` if no such one-off exists, or `UniqueViolation` if
/// the new `(date, kind)` pair is taken.
pub fn update_one_off_date(
    conn: &mut SqliteConnection,
    one_off: &OneOffDate,
) -> Result<(), PersistenceError> {
    info!(one_off_id = one_off.id, "Updating one-off date");

    let rows: usize =
        diesel::update(one_off_dates::table.filter(one_off_dates::one_off_id.eq(one_off.id)))
            .set((
                one_off_dates::date.eq(format_date(one_off.date)),
                one_off_dates::kind.eq(one_off.method.as_str()),
                one_off_dates::reason.eq(&one_off.reason),
                one_off_dates::schedule_id.eq(one_off.schedule_id),
                one_off_dates::time_window_start
                    .eq(one_off.time_window_start.map(format_time_hhmm)),
                one_off_dates::time_window_end.eq(one_off.time_window_end.map(format_time_hhmm)),
                one_off_dates::cutoff_day.eq(one_off.cutoff_day.map(weekday_index)),
                one_off_dates::cutoff_time.eq(one_off.cutoff_time.map(format_time_hhmm)),
                one_off_dates::lead_time_days.eq(one_off
                    .lead_time_days
                    .map(|d| count_column("lead_time_days", d))
                    .transpose()?),
            ))
            .execute(conn)?;

    require_row(rows, "one-off date", one_off.id)
}

/// Deletes a one-off date.
///
/// # Errors
///
/// Returns `NotFound` if no such one-off exists.
pub fn delete_one_off_date(
    conn: &mut SqliteConnection,
    one_off_id: i64,
) -> Result<(), PersistenceError> {
    info!(one_off_id, "Deleting one-off date");

    let rows: usize =
        diesel::delete(one_off_dates::table.filter(one_off_dates::one_off_id.eq(one_off_id)))
            .execute(conn)?;

    require_row(rows, "one-off date", one_off_id)
}

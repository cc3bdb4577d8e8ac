// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly schedule rules and calendar overrides.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::order::FulfillmentMethod;

/// A recurring weekly delivery day.
///
/// Multiple active schedules coexist and each generates candidates
/// independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySchedule {
    pub id: i64,
    pub name: String,
    /// The weekday deliveries happen.
    pub day_of_week: Weekday,
    /// The weekday on or before the delivery by which orders must be placed.
    pub cutoff_day: Weekday,
    /// Wall-clock cutoff in business time.
    pub cutoff_time: NaiveTime,
    pub lead_time_days: u32,
    /// Customer-facing window, e.g. "2:00 PM - 6:00 PM".
    pub delivery_time_window: String,
    pub is_active: bool,
}

/// Street address of a pickup location or a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// A physical location where customers collect orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupLocation {
    pub id: i64,
    pub name: String,
    pub address: Address,
    pub pickup_days: Vec<Weekday>,
    pub pickup_time_windows: String,
    pub instructions: String,
    pub lead_time_days: u32,
    pub is_active: bool,
    /// When set, same-day pickup is never offered.
    pub requires_preorder: bool,
}

impl PickupLocation {
    /// Returns true if the location accepts pickups on `weekday`.
    #[must_use]
    pub fn accepts(&self, weekday: Weekday) -> bool {
        self.pickup_days.contains(&weekday)
    }
}

/// A date the bakery is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarClosure {
    pub id: i64,
    pub closure_date: NaiveDate,
    pub reason: String,
    pub affects_delivery: bool,
    pub affects_pickup: bool,
}

impl CalendarClosure {
    /// Returns true if this closure removes `method` on its date.
    #[must_use]
    pub const fn blocks(&self, method: FulfillmentMethod) -> bool {
        match method {
            FulfillmentMethod::Delivery => self.affects_delivery,
            FulfillmentMethod::Pickup => self.affects_pickup,
        }
    }
}

/// An extra fulfillment date outside the weekly rules.
///
/// Every override field is optional. Unset fields fall back to the
/// referenced schedule (delivery) or location (pickup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOffDate {
    pub id: i64,
    pub date: NaiveDate,
    pub method: FulfillmentMethod,
    pub reason: String,
    /// Delivery schedule supplying defaults for unset fields.
    pub schedule_id: Option<i64>,
    pub time_window_start: Option<NaiveTime>,
    pub time_window_end: Option<NaiveTime>,
    pub cutoff_day: Option<Weekday>,
    pub cutoff_time: Option<NaiveTime>,
    pub lead_time_days: Option<u32>,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

use crate::{
    Address, BusinessTimezone, CalendarClosure, DeliverySchedule, DeliveryZone,
    FulfillmentMethod, OneOffDate, PickupLocation, Product, ResolverConfig, ZipCode,
};

pub fn boise() -> BusinessTimezone {
    BusinessTimezone::default()
}

pub fn config() -> ResolverConfig {
    ResolverConfig::new(boise())
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// An unambiguous wall-clock instant in Boise.
pub fn boise_instant(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    boise()
        .tz()
        .with_ymd_and_hms(y, m, d, h, mi, s)
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

/// Thursday delivery, orders close Tuesday 23:59, no lead time.
pub fn thursday_schedule(id: i64) -> DeliverySchedule {
    DeliverySchedule {
        id,
        name: String::from("Thursday Delivery"),
        day_of_week: Weekday::Thu,
        cutoff_day: Weekday::Tue,
        cutoff_time: time(23, 59),
        lead_time_days: 0,
        delivery_time_window: String::from("2:00 PM - 6:00 PM"),
        is_active: true,
    }
}

pub fn one_off(id: i64, on: NaiveDate, method: FulfillmentMethod) -> OneOffDate {
    OneOffDate {
        id,
        date: on,
        method,
        reason: String::from("Holiday special"),
        schedule_id: None,
        time_window_start: None,
        time_window_end: None,
        cutoff_day: None,
        cutoff_time: None,
        lead_time_days: None,
    }
}

pub fn closure(id: i64, on: NaiveDate, delivery: bool, pickup: bool) -> CalendarClosure {
    CalendarClosure {
        id,
        closure_date: on,
        reason: String::from("Closed"),
        affects_delivery: delivery,
        affects_pickup: pickup,
    }
}

pub fn zone(id: i64, name: &str, zips: &[&str], fee_cents: i64, priority: i32) -> DeliveryZone {
    DeliveryZone {
        id,
        name: String::from(name),
        zip_codes: zips
            .iter()
            .map(|z| ZipCode::parse(z).unwrap())
            .collect::<BTreeSet<ZipCode>>(),
        fee_cents,
        priority,
        is_active: true,
    }
}

pub fn product(id: i64) -> Product {
    Product {
        id,
        name: String::from("Sourdough Loaf"),
        description: String::from("Naturally leavened"),
        price_cents: 900,
        quantity_available: 20,
        is_active: true,
        available_for_delivery: true,
        available_for_pickup: true,
        lead_time_days: None,
    }
}

/// Friday and Saturday pickup, one day lead time.
pub fn market_location(id: i64) -> PickupLocation {
    PickupLocation {
        id,
        name: String::from("Saturday Market"),
        address: Address {
            street: String::from("1 Capitol Blvd"),
            city: String::from("Boise"),
            state: String::from("ID"),
            zip: String::from("83702"),
        },
        pickup_days: vec![Weekday::Fri, Weekday::Sat],
        pickup_time_windows: String::from("9:00 AM - 1:00 PM"),
        instructions: String::from("Look for the blue tent"),
        lead_time_days: 1,
        is_active: true,
        requires_preorder: false,
    }
}

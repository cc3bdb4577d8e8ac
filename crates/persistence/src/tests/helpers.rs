// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use bakehouse::{CheckoutPlan, Customer, PlannedFulfillment, PlannedItem};
use bakehouse_domain::{
    Address, AppliedZone, CalendarClosure, DeliverySchedule, DeliveryZone, FulfillmentMethod,
    OneOffDate, OrderStatus, OrderTotals, PaymentStatus, PickupLocation, Product, ProductVariant,
    ZipCode,
};
use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::{OrderCommit, Persistence};

pub fn persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

pub fn thursday_schedule() -> DeliverySchedule {
    DeliverySchedule {
        id: 0,
        name: String::from("Thursday Delivery"),
        day_of_week: Weekday::Thu,
        cutoff_day: Weekday::Tue,
        cutoff_time: time(23, 59),
        lead_time_days: 0,
        delivery_time_window: String::from("2:00 PM - 6:00 PM"),
        is_active: true,
    }
}

pub fn market() -> PickupLocation {
    PickupLocation {
        id: 0,
        name: String::from("Capital City Market"),
        address: Address {
            street: String::from("8th & Bannock"),
            city: String::from("Boise"),
            state: String::from("ID"),
            zip: String::from("83702"),
        },
        pickup_days: vec![Weekday::Sat],
        pickup_time_windows: String::from("9:00 AM - 1:00 PM"),
        instructions: String::from("Look for the green tent"),
        lead_time_days: 1,
        is_active: true,
        requires_preorder: false,
    }
}

pub fn zone(name: &str, zips: &[&str], fee_cents: i64, priority: i32) -> DeliveryZone {
    DeliveryZone {
        id: 0,
        name: String::from(name),
        zip_codes: zips
            .iter()
            .map(|z| ZipCode::parse(z).unwrap())
            .collect::<BTreeSet<_>>(),
        fee_cents,
        priority,
        is_active: true,
    }
}

pub fn closure(on: NaiveDate) -> CalendarClosure {
    CalendarClosure {
        id: 0,
        closure_date: on,
        reason: String::from("Holiday"),
        affects_delivery: true,
        affects_pickup: true,
    }
}

pub fn one_off(on: NaiveDate, method: FulfillmentMethod) -> OneOffDate {
    OneOffDate {
        id: 0,
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

pub fn sourdough(quantity_available: i64) -> Product {
    Product {
        id: 0,
        name: String::from("Sourdough Loaf"),
        description: String::from("Naturally leavened"),
        price_cents: 1200,
        quantity_available,
        is_active: true,
        available_for_delivery: true,
        available_for_pickup: true,
        lead_time_days: None,
    }
}

pub fn variant(product_id: i64, quantity_available: i64) -> ProductVariant {
    ProductVariant {
        id: 0,
        product_id,
        name: String::from("Dozen"),
        price_cents: 2400,
        quantity_available,
        is_active: true,
    }
}

pub fn item(product_id: i64, variant_id: Option<i64>, quantity: u32) -> PlannedItem {
    let unit_price_cents: i64 = if variant_id.is_some() { 2400 } else { 1200 };
    PlannedItem {
        product_id,
        variant_id,
        name: String::from("Sourdough Loaf"),
        unit_price_cents,
        quantity,
        line_total_cents: unit_price_cents * i64::from(quantity),
    }
}

/// A delivery plan for `items` to the downtown zone.
pub fn delivery_plan(zone_id: i64, items: Vec<PlannedItem>) -> CheckoutPlan {
    let subtotal_cents: i64 = items.iter().map(|i| i.line_total_cents).sum();
    CheckoutPlan {
        customer: Customer {
            name: String::from("Ada Baker"),
            email: String::from("ada@example.com"),
            phone: String::from("208-555-0100"),
        },
        fulfillment_method: FulfillmentMethod::Delivery,
        fulfillment_date: date(2026, 1, 15),
        fulfillment: PlannedFulfillment::Delivery {
            address: Address {
                street: String::from("123 Main St"),
                city: String::from("Boise"),
                state: String::from("ID"),
                zip: String::from("83702"),
            },
            zone: AppliedZone {
                id: zone_id,
                name: String::from("Downtown"),
            },
        },
        time_window: String::from("2:00 PM - 6:00 PM"),
        items,
        totals: OrderTotals {
            subtotal_cents,
            delivery_fee_cents: 500,
            tax_cents: 0,
            total_cents: subtotal_cents + 500,
        },
        notes: String::from("Leave on porch"),
    }
}

/// A pickup plan for `items` at the market.
pub fn pickup_plan(location_id: i64, items: Vec<PlannedItem>) -> CheckoutPlan {
    let mut plan: CheckoutPlan = delivery_plan(0, items);
    plan.fulfillment_method = FulfillmentMethod::Pickup;
    plan.fulfillment_date = date(2026, 1, 17);
    plan.fulfillment = PlannedFulfillment::Pickup {
        location_id,
        location_name: String::from("Capital City Market"),
    };
    plan.time_window = String::from("9:00 AM - 1:00 PM");
    plan.totals.delivery_fee_cents = 0;
    plan.totals.total_cents = plan.totals.subtotal_cents;
    plan
}

pub fn paid_commit() -> OrderCommit {
    OrderCommit {
        status: OrderStatus::Confirmed,
        payment_status: PaymentStatus::Paid,
        payment_provider: String::from("square"),
        payment_reference: Some(String::from("sq_pay_123")),
        merchant_fee_cents: Some(65),
    }
}

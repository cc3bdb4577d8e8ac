// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use bakehouse_domain::{
    Address, BusinessTimezone, CartLine, DeliverySchedule, DeliveryZone, FulfillmentMethod,
    FulfillmentStatus, OrderStatus, PickupLocation, Product, ProductVariant, ResolverConfig,
    TaxRate, ZipCode,
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

use crate::{CheckoutRequest, CheckoutSettings, Customer, FulfillmentChoice, OrderState};

pub fn settings() -> CheckoutSettings {
    CheckoutSettings {
        resolver: ResolverConfig::new(BusinessTimezone::default()),
        tax_rate: TaxRate::default(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Tuesday 2026-01-13 10:00 in Boise.
pub fn tuesday_morning() -> DateTime<Utc> {
    BusinessTimezone::default()
        .tz()
        .with_ymd_and_hms(2026, 1, 13, 10, 0, 0)
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

pub fn thursday_schedule() -> DeliverySchedule {
    DeliverySchedule {
        id: 1,
        name: String::from("Thursday Delivery"),
        day_of_week: Weekday::Thu,
        cutoff_day: Weekday::Tue,
        cutoff_time: NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
        lead_time_days: 0,
        delivery_time_window: String::from("2:00 PM - 6:00 PM"),
        is_active: true,
    }
}

pub fn downtown_zone() -> DeliveryZone {
    DeliveryZone {
        id: 1,
        name: String::from("Downtown"),
        zip_codes: BTreeSet::from([ZipCode::parse("83702").unwrap()]),
        fee_cents: 500,
        priority: 1,
        is_active: true,
    }
}

pub fn market() -> PickupLocation {
    PickupLocation {
        id: 4,
        name: String::from("Saturday Market"),
        address: Address::default(),
        pickup_days: vec![Weekday::Sat],
        pickup_time_windows: String::from("9:00 AM - 1:00 PM"),
        instructions: String::new(),
        lead_time_days: 1,
        is_active: true,
        requires_preorder: false,
    }
}

pub fn loaf() -> Product {
    Product {
        id: 10,
        name: String::from("Sourdough Loaf"),
        description: String::new(),
        price_cents: 1200,
        quantity_available: 5,
        is_active: true,
        available_for_delivery: true,
        available_for_pickup: true,
        lead_time_days: None,
    }
}

pub fn cookie_box() -> Product {
    Product {
        id: 20,
        name: String::from("Cookie Box"),
        description: String::new(),
        price_cents: 1800,
        quantity_available: 0,
        is_active: true,
        available_for_delivery: true,
        available_for_pickup: true,
        lead_time_days: None,
    }
}

pub fn dozen_variant() -> ProductVariant {
    ProductVariant {
        id: 3,
        product_id: 20,
        name: String::from("Dozen"),
        price_cents: 2400,
        quantity_available: 4,
        is_active: true,
    }
}

pub fn customer() -> Customer {
    Customer {
        name: String::from("Ada Baker"),
        email: String::from("ada@example.com"),
        phone: String::from("208-555-0100"),
    }
}

pub fn home() -> Address {
    Address {
        street: String::from("100 Main St"),
        city: String::from("Boise"),
        state: String::from("ID"),
        zip: String::from("83702"),
    }
}

pub fn line(product_id: i64, variant_id: Option<i64>, quantity: u32) -> CartLine {
    CartLine {
        product_id,
        variant_id,
        quantity,
    }
}

pub fn delivery_request(lines: Vec<CartLine>, on: NaiveDate) -> CheckoutRequest {
    CheckoutRequest {
        customer: customer(),
        lines,
        fulfillment: FulfillmentChoice::Delivery {
            date: on,
            address: home(),
        },
        notes: String::from("  Ring the bell  "),
    }
}

pub fn order_state(method: FulfillmentMethod, status: OrderStatus) -> OrderState {
    OrderState {
        order_id: 1,
        order_number: String::from("BH-0001"),
        fulfillment_method: method,
        status,
        fulfillment_status: FulfillmentStatus::Pending,
    }
}

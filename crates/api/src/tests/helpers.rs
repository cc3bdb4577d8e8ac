// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::collections::BTreeSet;
use std::sync::Mutex;

use bakehouse::CheckoutSettings;
use bakehouse_domain::{
    Address, BusinessTimezone, CartLine, DeliverySchedule, DeliveryZone, PickupLocation, Product,
    ResolverConfig, TaxRate, ZipCode,
};
use bakehouse_persistence::Persistence;
use chrono::{DateTime, NaiveTime, TimeZone, Utc, Weekday};

use crate::{
    AuthenticatedActor, CustomerInfo, FulfillmentRequest, ManualOrderRequest, Notification,
    Notifier, NotifyError, Role,
};

/// A store seeded with one schedule, zone, pickup location and product.
pub struct Shop {
    pub store: Persistence,
    pub schedule_id: i64,
    pub zone_id: i64,
    pub location_id: i64,
    pub loaf_id: i64,
}

pub fn shop() -> Shop {
    let mut store: Persistence = Persistence::new_in_memory().unwrap();
    let schedule_id: i64 = store.create_delivery_schedule(&thursday_schedule()).unwrap();
    let zone_id: i64 = store.create_delivery_zone(&downtown_zone()).unwrap();
    let location_id: i64 = store.create_pickup_location(&market()).unwrap();
    let loaf_id: i64 = store.create_product(&loaf()).unwrap();
    Shop {
        store,
        schedule_id,
        zone_id,
        location_id,
        loaf_id,
    }
}

pub fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(1, String::from("ADMIN"), String::from("Head Baker"), Role::Admin)
}

pub fn shopper() -> AuthenticatedActor {
    AuthenticatedActor::new(
        2,
        String::from("SHOPPER"),
        String::from("Regular"),
        Role::Customer,
    )
}

pub fn settings() -> CheckoutSettings {
    CheckoutSettings {
        resolver: ResolverConfig::new(BusinessTimezone::default()),
        tax_rate: TaxRate::default(),
    }
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
        id: 0,
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
        id: 0,
        name: String::from("Downtown"),
        zip_codes: BTreeSet::from([ZipCode::parse("83702").unwrap()]),
        fee_cents: 500,
        priority: 1,
        is_active: true,
    }
}

pub fn market() -> PickupLocation {
    PickupLocation {
        id: 0,
        name: String::from("Capital City Market"),
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
        id: 0,
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

pub fn home_address() -> Address {
    Address {
        street: String::from("123 Main St"),
        city: String::from("Boise"),
        state: String::from("ID"),
        zip: String::from("83702"),
    }
}

pub fn customer() -> CustomerInfo {
    CustomerInfo {
        name: String::from("Ada Baker"),
        email: String::from("ada@example.com"),
        phone: String::from("208-555-0100"),
    }
}

pub fn cart(product_id: i64, quantity: u32) -> Vec<CartLine> {
    vec![CartLine {
        product_id,
        variant_id: None,
        quantity,
    }]
}

pub fn thursday_delivery() -> FulfillmentRequest {
    FulfillmentRequest::Delivery {
        date: String::from("2026-01-15"),
        address: home_address(),
    }
}

pub fn manual_order(shop: &Shop, fulfillment: FulfillmentRequest) -> ManualOrderRequest {
    ManualOrderRequest {
        customer: customer(),
        items: cart(shop.loaf_id, 1),
        fulfillment,
        notes: String::new(),
    }
}

/// Records every notification it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn kinds(&self) -> Vec<&'static str> {
        self.sent.lock().unwrap().iter().map(Notification::kind).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Fails every send.
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        Err(NotifyError {
            kind: notification.kind().to_string(),
            reason: String::from("mail server unavailable"),
        })
    }
}

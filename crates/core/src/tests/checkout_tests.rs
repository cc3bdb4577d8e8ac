// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bakehouse_domain::{
    DeliverySchedule, DeliveryZone, DomainError, FulfillmentMethod, PickupLocation, Product,
    ProductVariant,
};

use super::helpers::{
    cookie_box, customer, date, delivery_request, downtown_zone, dozen_variant, line, loaf,
    market, settings, thursday_schedule, tuesday_morning,
};
use crate::{
    Catalog, CheckoutPlan, CheckoutRequest, CoreError, DateCheck, FulfillmentChoice,
    FulfillmentRules, PlannedFulfillment, plan_checkout,
};

struct Fixture {
    products: Vec<Product>,
    variants: Vec<ProductVariant>,
    schedules: Vec<DeliverySchedule>,
    locations: Vec<PickupLocation>,
    zones: Vec<DeliveryZone>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            products: vec![loaf(), cookie_box()],
            variants: vec![dozen_variant()],
            schedules: vec![thursday_schedule()],
            locations: vec![market()],
            zones: vec![downtown_zone()],
        }
    }

    fn plan(&self, request: &CheckoutRequest, check: DateCheck) -> Result<CheckoutPlan, CoreError> {
        let catalog = Catalog {
            products: &self.products,
            variants: &self.variants,
        };
        let rules = FulfillmentRules {
            schedules: &self.schedules,
            pickup_locations: &self.locations,
            zones: &self.zones,
            one_offs: &[],
            closures: &[],
        };
        plan_checkout(request, &catalog, &rules, tuesday_morning(), &settings(), check)
    }
}

#[test]
fn test_delivery_plan_prices_lines_fee_and_tax() {
    let fixture = Fixture::new();
    let request = delivery_request(vec![line(10, None, 2)], date(2026, 1, 15));

    let plan = fixture.plan(&request, DateCheck::MustBeOffered).unwrap();

    assert_eq!(plan.fulfillment_method, FulfillmentMethod::Delivery);
    assert_eq!(plan.totals.subtotal_cents, 2400);
    assert_eq!(plan.totals.delivery_fee_cents, 500);
    assert_eq!(plan.totals.tax_cents, 174);
    assert_eq!(plan.totals.total_cents, 3074);
    assert_eq!(plan.time_window, "2:00 PM - 6:00 PM");
    assert_eq!(plan.notes, "Ring the bell");
    match plan.fulfillment {
        PlannedFulfillment::Delivery { zone, .. } => assert_eq!(zone.name, "Downtown"),
        PlannedFulfillment::Pickup { .. } => panic!("expected delivery"),
    }
}

#[test]
fn test_variant_supplies_price_and_stock() {
    let fixture = Fixture::new();
    let request = delivery_request(vec![line(20, Some(3), 1)], date(2026, 1, 15));

    let plan = fixture.plan(&request, DateCheck::MustBeOffered).unwrap();

    assert_eq!(plan.items[0].name, "Cookie Box (Dozen)");
    assert_eq!(plan.items[0].unit_price_cents, 2400);
    assert_eq!(plan.items[0].line_total_cents, 2400);
}

#[test]
fn test_insufficient_inventory_reported_before_anything_else() {
    let fixture = Fixture::new();
    // Friday is not offered either; stock is checked first
    let request = delivery_request(vec![line(10, None, 6)], date(2026, 1, 16));

    let result = fixture.plan(&request, DateCheck::MustBeOffered);

    assert_eq!(
        result,
        Err(CoreError::InsufficientInventory {
            product_id: 10,
            variant_id: None,
            requested: 6,
            available: 5,
        })
    );
}

#[test]
fn test_repeated_lines_are_summed_for_stock() {
    let fixture = Fixture::new();
    let request = delivery_request(
        vec![line(10, None, 3), line(10, None, 3)],
        date(2026, 1, 15),
    );

    assert!(matches!(
        fixture.plan(&request, DateCheck::MustBeOffered),
        Err(CoreError::InsufficientInventory { requested: 6, .. })
    ));
}

#[test]
fn test_inactive_product_has_no_stock() {
    let mut fixture = Fixture::new();
    fixture.products[0].is_active = false;
    let request = delivery_request(vec![line(10, None, 1)], date(2026, 1, 15));

    assert!(matches!(
        fixture.plan(&request, DateCheck::MustBeOffered),
        Err(CoreError::InsufficientInventory { available: 0, .. })
    ));
}

#[test]
fn test_unknown_product_and_variant() {
    let fixture = Fixture::new();

    let request = delivery_request(vec![line(99, None, 1)], date(2026, 1, 15));
    assert_eq!(
        fixture.plan(&request, DateCheck::MustBeOffered),
        Err(CoreError::ProductNotFound(99))
    );

    let request = delivery_request(vec![line(10, Some(3), 1)], date(2026, 1, 15));
    assert_eq!(
        fixture.plan(&request, DateCheck::MustBeOffered),
        Err(CoreError::VariantNotFound {
            product_id: 10,
            variant_id: 3
        })
    );
}

#[test]
fn test_date_must_be_offered_for_customers() {
    let fixture = Fixture::new();
    let request = delivery_request(vec![line(10, None, 1)], date(2026, 1, 16));

    assert!(matches!(
        fixture.plan(&request, DateCheck::MustBeOffered),
        Err(CoreError::DateNotOffered { .. })
    ));

    let plan = fixture.plan(&request, DateCheck::AdminOverride).unwrap();
    assert_eq!(plan.fulfillment_date, date(2026, 1, 16));
    assert_eq!(plan.time_window, "");
}

#[test]
fn test_unserved_zip_means_no_delivery() {
    let fixture = Fixture::new();
    let mut request = delivery_request(vec![line(10, None, 1)], date(2026, 1, 15));
    if let FulfillmentChoice::Delivery { address, .. } = &mut request.fulfillment {
        address.zip = String::from("90210");
    }

    assert_eq!(
        fixture.plan(&request, DateCheck::AdminOverride),
        Err(CoreError::NoDeliveryZone(String::from("90210")))
    );
}

#[test]
fn test_pickup_plan_is_fee_free() {
    let fixture = Fixture::new();
    let request = CheckoutRequest {
        customer: customer(),
        lines: vec![line(10, None, 1)],
        fulfillment: FulfillmentChoice::Pickup {
            date: date(2026, 1, 17),
            location_id: 4,
        },
        notes: String::new(),
    };

    let plan = fixture.plan(&request, DateCheck::MustBeOffered).unwrap();

    assert_eq!(plan.totals.delivery_fee_cents, 0);
    assert_eq!(plan.totals.tax_cents, 72);
    assert_eq!(plan.totals.total_cents, 1272);
    assert_eq!(plan.time_window, "9:00 AM - 1:00 PM");
}

#[test]
fn test_unknown_pickup_location() {
    let fixture = Fixture::new();
    let request = CheckoutRequest {
        customer: customer(),
        lines: vec![line(10, None, 1)],
        fulfillment: FulfillmentChoice::Pickup {
            date: date(2026, 1, 17),
            location_id: 77,
        },
        notes: String::new(),
    };

    assert_eq!(
        fixture.plan(&request, DateCheck::MustBeOffered),
        Err(CoreError::PickupLocationNotFound(77))
    );
}

#[test]
fn test_product_not_offered_for_method() {
    let mut fixture = Fixture::new();
    fixture.products[0].available_for_delivery = false;
    let request = delivery_request(vec![line(10, None, 1)], date(2026, 1, 15));

    assert_eq!(
        fixture.plan(&request, DateCheck::AdminOverride),
        Err(CoreError::ProductNotOffered {
            product_id: 10,
            method: FulfillmentMethod::Delivery
        })
    );
}

#[test]
fn test_request_shape_validated_first() {
    let fixture = Fixture::new();

    let empty = delivery_request(vec![], date(2026, 1, 15));
    assert_eq!(
        fixture.plan(&empty, DateCheck::MustBeOffered),
        Err(CoreError::DomainViolation(DomainError::EmptyCart))
    );

    let mut anonymous = delivery_request(vec![line(10, None, 1)], date(2026, 1, 15));
    anonymous.customer.email = String::from("nobody");
    assert!(matches!(
        fixture.plan(&anonymous, DateCheck::MustBeOffered),
        Err(CoreError::DomainViolation(
            DomainError::InvalidCustomerField { .. }
        ))
    ));
}

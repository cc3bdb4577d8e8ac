// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Checkout planning.
//!
//! A checkout plan is everything needed to write an order: priced lines,
//! the validated fulfillment choice and the totals. Planning performs no
//! writes; the persistence layer commits a plan in one transaction and
//! re-checks stock atomically while doing so.

use std::collections::BTreeMap;

use bakehouse_domain::{
    Address, AppliedZone, CalendarClosure, CartLine, DateOption, DeliverySchedule, DeliveryZone,
    DomainError, FeeQuote, FulfillmentMethod, OneOffDate, OrderTotals, PickupLocation, PricedLine,
    Product, ProductVariant, ResolverConfig, TaxRate, compute_totals, quote_fulfillment_fee,
    representative_product, resolve_delivery_dates, resolve_pickup_dates, validate_cart,
    validate_customer,
};
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::CoreError;

/// Customer contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// The fulfillment the customer picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FulfillmentChoice {
    Delivery { date: NaiveDate, address: Address },
    Pickup { date: NaiveDate, location_id: i64 },
}

impl FulfillmentChoice {
    #[must_use]
    pub const fn method(&self) -> FulfillmentMethod {
        match self {
            Self::Delivery { .. } => FulfillmentMethod::Delivery,
            Self::Pickup { .. } => FulfillmentMethod::Pickup,
        }
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::Delivery { date, .. } | Self::Pickup { date, .. } => *date,
        }
    }
}

/// A checkout or manual order request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub customer: Customer,
    pub lines: Vec<CartLine>,
    pub fulfillment: FulfillmentChoice,
    pub notes: String,
}

/// Products and variants referenced by a cart.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    pub products: &'a [Product],
    pub variants: &'a [ProductVariant],
}

/// Everything the date resolver and fee calculator read.
#[derive(Debug, Clone, Copy)]
pub struct FulfillmentRules<'a> {
    pub schedules: &'a [DeliverySchedule],
    pub pickup_locations: &'a [PickupLocation],
    pub zones: &'a [DeliveryZone],
    pub one_offs: &'a [OneOffDate],
    pub closures: &'a [CalendarClosure],
}

/// Whether the fulfillment date must be one the storefront offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCheck {
    /// Customer checkout.
    MustBeOffered,
    /// Admin-entered orders may be booked on any date.
    AdminOverride,
}

/// Store-wide checkout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub resolver: ResolverConfig,
    pub tax_rate: TaxRate,
}

/// A priced order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedItem {
    pub product_id: i64,
    pub variant_id: Option<i64>,
    /// Display name at time of purchase.
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
    pub line_total_cents: i64,
}

/// Where the order goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedFulfillment {
    Delivery { address: Address, zone: AppliedZone },
    Pickup { location_id: i64, location_name: String },
}

/// A validated, priced order ready to be paid for and committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPlan {
    pub customer: Customer,
    pub fulfillment_method: FulfillmentMethod,
    pub fulfillment_date: NaiveDate,
    pub fulfillment: PlannedFulfillment,
    pub time_window: String,
    pub items: Vec<PlannedItem>,
    pub totals: OrderTotals,
    pub notes: String,
}

fn price_line(line: &CartLine, catalog: &Catalog<'_>) -> Result<PlannedItem, CoreError> {
    let product: &Product = catalog
        .products
        .iter()
        .find(|p| p.id == line.product_id)
        .ok_or(CoreError::ProductNotFound(line.product_id))?;

    let (name, unit_price_cents) = match line.variant_id {
        Some(variant_id) => {
            let variant: &ProductVariant = catalog
                .variants
                .iter()
                .find(|v| v.id == variant_id && v.product_id == product.id)
                .ok_or(CoreError::VariantNotFound {
                    product_id: product.id,
                    variant_id,
                })?;
            (
                format!("{} ({})", product.name, variant.name),
                variant.price_cents,
            )
        }
        None => (product.name.clone(), product.price_cents),
    };

    let line_total_cents: i64 = PricedLine {
        unit_price_cents,
        quantity: line.quantity,
    }
    .line_total()
    .ok_or_else(|| DomainError::InvalidAmount {
        field: String::from("line_total"),
        cents: unit_price_cents,
    })?;

    Ok(PlannedItem {
        product_id: product.id,
        variant_id: line.variant_id,
        name,
        unit_price_cents,
        quantity: line.quantity,
        line_total_cents,
    })
}

/// Checks every line against current stock.
///
/// Quantities of repeated lines for the same item are summed before the
/// comparison. Inactive products or variants count as zero stock.
///
/// # Errors
///
/// Returns the first `CoreError::InsufficientInventory` found, or a
/// not-found error for an unknown product or variant.
pub fn check_inventory(lines: &[CartLine], catalog: &Catalog<'_>) -> Result<(), CoreError> {
    let mut requested: BTreeMap<(i64, Option<i64>), u32> = BTreeMap::new();
    for line in lines {
        let entry = requested
            .entry((line.product_id, line.variant_id))
            .or_insert(0);
        *entry = entry.saturating_add(line.quantity);
    }

    for ((product_id, variant_id), quantity) in requested {
        let product: &Product = catalog
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or(CoreError::ProductNotFound(product_id))?;

        let available: i64 = match variant_id {
            Some(variant_id) => {
                let variant: &ProductVariant = catalog
                    .variants
                    .iter()
                    .find(|v| v.id == variant_id && v.product_id == product_id)
                    .ok_or(CoreError::VariantNotFound {
                        product_id,
                        variant_id,
                    })?;
                if product.is_active && variant.is_active {
                    variant.quantity_available
                } else {
                    0
                }
            }
            None if product.is_active => product.quantity_available,
            None => 0,
        };

        if available < i64::from(quantity) {
            return Err(CoreError::InsufficientInventory {
                product_id,
                variant_id,
                requested: quantity,
                available,
            });
        }
    }
    Ok(())
}

fn validate_address(address: &Address) -> Result<(), DomainError> {
    if address.street.trim().is_empty() || address.city.trim().is_empty() {
        return Err(DomainError::InvalidCustomerField {
            field: String::from("address"),
            reason: String::from("street and city are required for delivery"),
        });
    }
    Ok(())
}

/// Validates and prices a checkout request.
///
/// # Arguments
///
/// * `request` - The customer's cart and choices
/// * `catalog` - Products and variants referenced by the cart
/// * `rules` - Schedules, locations, zones, one-off dates and closures
/// * `now` - The current instant
/// * `settings` - Business timezone, horizon and tax rate
/// * `date_check` - Whether the date must be one the storefront offers
///
/// # Errors
///
/// Returns an error if:
/// - Customer fields or cart shape are invalid
/// - Any line references an unknown, inactive or under-stocked item
/// - A product cannot be fulfilled by the chosen method
/// - Delivery is requested to a ZIP code no active zone covers
/// - The pickup location does not exist
/// - The date is not offered and `date_check` requires it
pub fn plan_checkout(
    request: &CheckoutRequest,
    catalog: &Catalog<'_>,
    rules: &FulfillmentRules<'_>,
    now: DateTime<Utc>,
    settings: &CheckoutSettings,
    date_check: DateCheck,
) -> Result<CheckoutPlan, CoreError> {
    let customer: &Customer = &request.customer;
    validate_customer(&customer.name, &customer.email, &customer.phone)?;
    validate_cart(&request.lines)?;

    let method: FulfillmentMethod = request.fulfillment.method();
    let date: NaiveDate = request.fulfillment.date();

    check_inventory(&request.lines, catalog)?;

    let items: Vec<PlannedItem> = request
        .lines
        .iter()
        .map(|line| price_line(line, catalog))
        .collect::<Result<_, _>>()?;

    for item in &items {
        let offered: bool = catalog
            .products
            .iter()
            .any(|p| p.id == item.product_id && p.allows(method));
        if !offered {
            return Err(CoreError::ProductNotOffered {
                product_id: item.product_id,
                method,
            });
        }
    }

    let scope: Option<&Product> = representative_product(&request.lines)
        .and_then(|id| catalog.products.iter().find(|p| p.id == id));
    let resolver: ResolverConfig = settings.resolver.with_max_dates(None);

    let (fulfillment, fee_cents, offered, fallback_window) = match &request.fulfillment {
        FulfillmentChoice::Delivery { address, .. } => {
            validate_address(address)?;
            let quote: FeeQuote = quote_fulfillment_fee(method, rules.zones, &address.zip)?;
            let zone: AppliedZone = quote
                .applied_zone
                .ok_or_else(|| CoreError::NoDeliveryZone(address.zip.trim().to_string()))?;
            let offered: Vec<DateOption> = resolve_delivery_dates(
                rules.schedules,
                rules.one_offs,
                rules.closures,
                scope,
                now,
                &resolver,
            )?;
            (
                PlannedFulfillment::Delivery {
                    address: address.clone(),
                    zone,
                },
                quote.fee_cents,
                offered,
                String::new(),
            )
        }
        FulfillmentChoice::Pickup { location_id, .. } => {
            let location: &PickupLocation = rules
                .pickup_locations
                .iter()
                .find(|l| l.id == *location_id)
                .ok_or(CoreError::PickupLocationNotFound(*location_id))?;
            let offered: Vec<DateOption> = resolve_pickup_dates(
                location,
                rules.one_offs,
                rules.closures,
                scope,
                now,
                &resolver,
            )?;
            (
                PlannedFulfillment::Pickup {
                    location_id: location.id,
                    location_name: location.name.clone(),
                },
                0,
                offered,
                location.pickup_time_windows.clone(),
            )
        }
    };

    let option: Option<&DateOption> = offered.iter().find(|o| o.date == date);
    if option.is_none() && date_check == DateCheck::MustBeOffered {
        return Err(CoreError::DateNotOffered { date, method });
    }
    let time_window: String = option.map_or(fallback_window, |o| o.time_window.clone());

    let priced: Vec<PricedLine> = items
        .iter()
        .map(|i| PricedLine {
            unit_price_cents: i.unit_price_cents,
            quantity: i.quantity,
        })
        .collect();
    let totals: OrderTotals = compute_totals(&priced, fee_cents, settings.tax_rate)?;

    Ok(CheckoutPlan {
        customer: customer.clone(),
        fulfillment_method: method,
        fulfillment_date: date,
        fulfillment,
        time_window,
        items,
        totals,
        notes: request.notes.trim().to_string(),
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod cart;
mod date_resolver;
mod delivery_fee;
mod error;
mod order;
mod pricing;
mod product;
mod schedule;
mod validation;
mod zone;

#[cfg(test)]
mod tests;

pub use calendar::{
    BusinessTimezone, add_days, format_date, format_time_hhmm, format_time_window, parse_date,
    parse_time_hhmm, weekday_from_index, weekday_index,
};
pub use cart::{CartLine, representative_product};
pub use date_resolver::{
    DEFAULT_LOOKAHEAD_WEEKS, DateOption, DateSource, ResolverConfig, is_offered,
    resolve_delivery_dates, resolve_pickup_dates,
};
pub use delivery_fee::{
    AppliedZone, FeeQuote, ZoneMatch, quote_delivery_fee, quote_fulfillment_fee,
};
pub use error::DomainError;
pub use order::{FulfillmentMethod, FulfillmentStatus, OrderStatus, PaymentStatus};
pub use pricing::{MerchantFeeRate, OrderTotals, PricedLine, TaxRate, compute_totals};
pub use product::{Product, ProductVariant};
pub use schedule::{Address, CalendarClosure, DeliverySchedule, OneOffDate, PickupLocation};
pub use validation::{
    MAX_LEAD_TIME_DAYS, validate_cart, validate_closure_unique, validate_customer,
    validate_delivery_schedule, validate_delivery_zone, validate_one_off, validate_one_off_unique,
    validate_pickup_location, validate_product, validate_variant,
};
pub use zone::{DeliveryZone, ZipCode};

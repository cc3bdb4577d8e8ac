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

mod apply;
mod checkout;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use checkout::{
    Catalog, CheckoutPlan, CheckoutRequest, CheckoutSettings, Customer, DateCheck,
    FulfillmentChoice, FulfillmentRules, PlannedFulfillment, PlannedItem, check_inventory,
    plan_checkout,
};
pub use command::Command;
pub use error::CoreError;
pub use state::{OrderState, TransitionResult};

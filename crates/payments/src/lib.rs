// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment provider clients.
//!
//! The storefront talks to card processors only through [`PaymentProvider`].
//! Two REST clients are provided: Stripe Checkout Sessions and Payment
//! Intents, and Square Orders, Payments and Payment Links. Neither uses a
//! vendor SDK.

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod provider;
mod square;
mod stripe;

#[cfg(test)]
mod tests;

pub use error::PaymentError;
pub use provider::{
    ChargeRequest, CheckoutLine, CheckoutSession, CheckoutUrls, PaymentOutcome, PaymentProvider,
};
pub use square::SquareProvider;
pub use stripe::StripeProvider;

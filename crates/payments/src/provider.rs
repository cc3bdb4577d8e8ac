// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PaymentError;

/// One line shown on a hosted checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub name: String,
    pub unit_amount_cents: i64,
    pub quantity: u32,
}

/// Where the hosted page sends the customer afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckoutUrls {
    pub success_url: String,
    pub cancel_url: String,
}

/// A hosted checkout the customer is redirected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider identifier, stored as the order's payment reference.
    pub session_id: String,
    pub url: String,
}

/// A direct card charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub amount_cents: i64,
    /// Card nonce or payment method token from the browser.
    pub source_token: String,
    /// Retries with the same key never charge twice.
    pub idempotency_key: String,
    pub customer_email: String,
    /// Free text shown in the provider dashboard.
    pub note: String,
}

/// Result of a direct charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Approved { payment_id: String },
    Declined { reason: String },
}

/// A card processor.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Short lowercase name stored on orders, e.g. `stripe`.
    fn name(&self) -> &'static str;

    /// Creates a hosted checkout page for `lines`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider rejects it.
    async fn create_checkout(
        &self,
        lines: &[CheckoutLine],
        customer_email: &str,
        urls: &CheckoutUrls,
        metadata: &BTreeMap<String, String>,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Charges a card directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider rejects it
    /// for a reason other than a card decline.
    async fn charge(&self, request: &ChargeRequest) -> Result<PaymentOutcome, PaymentError>;

    /// Processing fee withheld on `gross_cents`, when the provider's
    /// pricing is known up front.
    fn merchant_fee(&self, gross_cents: i64) -> Option<i64>;
}

pub fn require_lines(lines: &[CheckoutLine]) -> Result<(), PaymentError> {
    if lines.is_empty() {
        return Err(PaymentError::EmptyCheckout);
    }
    if let Some(bad) = lines.iter().find(|l| l.unit_amount_cents < 0) {
        return Err(PaymentError::InvalidAmount(bad.unit_amount_cents));
    }
    Ok(())
}

pub const fn require_positive(amount_cents: i64) -> Result<(), PaymentError> {
    if amount_cents <= 0 {
        return Err(PaymentError::InvalidAmount(amount_cents));
    }
    Ok(())
}

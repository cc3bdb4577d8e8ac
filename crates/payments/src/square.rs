// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Square over its JSON REST API.
//!
//! Hosted checkout uses Payment Links. Direct charges create an order and
//! then pay for it, so the Square dashboard shows the order reference.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bakehouse_domain::MerchantFeeRate;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::error::PaymentError;
use crate::provider::{
    ChargeRequest, CheckoutLine, CheckoutSession, CheckoutUrls, PaymentOutcome, PaymentProvider,
    require_lines, require_positive,
};

const PROVIDER: &str = "square";
const DEFAULT_BASE_URL: &str = "https://connect.squareup.com";
const SQUARE_VERSION: &str = "2025-01-23";

#[derive(Debug, Deserialize)]
struct SquareErrorItem {
    category: String,
    code: String,
    detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<SquareErrorItem>,
}

#[derive(Debug, Deserialize)]
struct PaymentLink {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct PaymentLinkEnvelope {
    payment_link: PaymentLink,
}

#[derive(Debug, Deserialize)]
struct OrderBody {
    id: String,
}

#[derive(Debug, Deserialize)]
struct OrderEnvelope {
    order: OrderBody,
}

#[derive(Debug, Deserialize)]
struct PaymentBody {
    id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct PaymentEnvelope {
    payment: PaymentBody,
}

/// Square Orders, Payments and Payment Links.
#[derive(Debug, Clone)]
pub struct SquareProvider {
    client: reqwest::Client,
    access_token: String,
    location_id: String,
    base_url: String,
    fee_rate: MerchantFeeRate,
}

impl SquareProvider {
    #[must_use]
    pub fn new(access_token: String, location_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
            location_id,
            base_url: String::from(DEFAULT_BASE_URL),
            fee_rate: MerchantFeeRate::CARD_STANDARD,
        }
    }

    /// Points the client at another host, e.g. the Square sandbox.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn post(&self, path: &str, body: &Value) -> Result<(u16, String), PaymentError> {
        let response: reqwest::Response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(&self.access_token)
            .header("Square-Version", SQUARE_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|e| PaymentError::transport(PROVIDER, e))?;
        let status: u16 = response.status().as_u16();
        let text: String = response
            .text()
            .await
            .map_err(|e| PaymentError::transport(PROVIDER, e))?;
        debug!(path, status, "Square responded");
        Ok((status, text))
    }
}

fn money(amount_cents: i64) -> Value {
    json!({ "amount": amount_cents, "currency": "USD" })
}

/// Builds the body for `POST /v2/online-checkout/payment-links`.
#[must_use]
pub fn payment_link_body(
    location_id: &str,
    idempotency_key: &str,
    lines: &[CheckoutLine],
    customer_email: &str,
    urls: &CheckoutUrls,
    metadata: &BTreeMap<String, String>,
) -> Value {
    let line_items: Vec<Value> = lines
        .iter()
        .map(|line| {
            json!({
                "name": line.name,
                "quantity": line.quantity.to_string(),
                "base_price_money": money(line.unit_amount_cents),
            })
        })
        .collect();

    json!({
        "idempotency_key": idempotency_key,
        "order": {
            "location_id": location_id,
            "line_items": line_items,
            "metadata": metadata,
        },
        "checkout_options": { "redirect_url": urls.success_url },
        "pre_populated_data": { "buyer_email": customer_email },
    })
}

fn parse_errors(body: &str) -> Vec<SquareErrorItem> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.errors)
        .unwrap_or_default()
}

fn rejected(status: u16, body: &str) -> PaymentError {
    let message: String = parse_errors(body)
        .into_iter()
        .map(|e| e.detail.unwrap_or(e.code))
        .collect::<Vec<_>>()
        .join("; ");
    PaymentError::Rejected {
        provider: PROVIDER,
        status,
        message: if message.is_empty() {
            body.to_string()
        } else {
            message
        },
    }
}

fn parse_success<T: for<'de> Deserialize<'de>>(status: u16, body: &str) -> Result<T, PaymentError> {
    if !(200..300).contains(&status) {
        return Err(rejected(status, body));
    }
    serde_json::from_str(body).map_err(|e| PaymentError::invalid_response(PROVIDER, e.to_string()))
}

/// Reads a Payment Link creation response.
///
/// # Errors
///
/// Returns an error for non-2xx statuses or an unreadable body.
pub fn interpret_payment_link(status: u16, body: &str) -> Result<CheckoutSession, PaymentError> {
    let envelope: PaymentLinkEnvelope = parse_success(status, body)?;
    Ok(CheckoutSession {
        session_id: envelope.payment_link.id,
        url: envelope.payment_link.url,
    })
}

/// Reads a Create Payment response.
///
/// Payment method errors are declines. Any other failure is an error.
///
/// # Errors
///
/// Returns an error for non-decline failures or an unreadable body.
pub fn interpret_payment(status: u16, body: &str) -> Result<PaymentOutcome, PaymentError> {
    if !(200..300).contains(&status) {
        let errors: Vec<SquareErrorItem> = parse_errors(body);
        if let Some(decline) = errors
            .into_iter()
            .find(|e| e.category == "PAYMENT_METHOD_ERROR")
        {
            return Ok(PaymentOutcome::Declined {
                reason: decline.detail.unwrap_or(decline.code),
            });
        }
        return Err(rejected(status, body));
    }

    let envelope: PaymentEnvelope = serde_json::from_str(body)
        .map_err(|e| PaymentError::invalid_response(PROVIDER, e.to_string()))?;
    match envelope.payment.status.as_str() {
        "COMPLETED" | "APPROVED" => Ok(PaymentOutcome::Approved {
            payment_id: envelope.payment.id,
        }),
        other => Ok(PaymentOutcome::Declined {
            reason: format!("payment {}", other.to_lowercase()),
        }),
    }
}

#[async_trait]
impl PaymentProvider for SquareProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn create_checkout(
        &self,
        lines: &[CheckoutLine],
        customer_email: &str,
        urls: &CheckoutUrls,
        metadata: &BTreeMap<String, String>,
    ) -> Result<CheckoutSession, PaymentError> {
        require_lines(lines)?;
        let idempotency_key: String = metadata
            .get("checkout_key")
            .cloned()
            .unwrap_or_else(|| format!("link-{customer_email}-{}", lines.len()));
        let body: Value = payment_link_body(
            &self.location_id,
            &idempotency_key,
            lines,
            customer_email,
            urls,
            metadata,
        );
        let (status, text) = self.post("/v2/online-checkout/payment-links", &body).await?;
        let session: CheckoutSession = interpret_payment_link(status, &text)?;
        info!(session_id = %session.session_id, "Square payment link created");
        Ok(session)
    }

    async fn charge(&self, request: &ChargeRequest) -> Result<PaymentOutcome, PaymentError> {
        require_positive(request.amount_cents)?;

        let order_body: Value = json!({
            "idempotency_key": format!("{}-order", request.idempotency_key),
            "order": {
                "location_id": self.location_id,
                "reference_id": request.idempotency_key,
                "line_items": [{
                    "name": request.note,
                    "quantity": "1",
                    "base_price_money": money(request.amount_cents),
                }],
            },
        });
        let (status, text) = self.post("/v2/orders", &order_body).await?;
        let order: OrderEnvelope = parse_success(status, &text)?;

        let payment_body: Value = json!({
            "idempotency_key": request.idempotency_key,
            "source_id": request.source_token,
            "amount_money": money(request.amount_cents),
            "location_id": self.location_id,
            "order_id": order.order.id,
            "buyer_email_address": request.customer_email,
            "note": request.note,
        });
        let (status, text) = self.post("/v2/payments", &payment_body).await?;

        let outcome: PaymentOutcome = interpret_payment(status, &text)?;
        match &outcome {
            PaymentOutcome::Approved { payment_id } => {
                info!(payment_id = %payment_id, amount_cents = request.amount_cents, "Square charge approved");
            }
            PaymentOutcome::Declined { reason } => {
                warn!(reason = %reason, "Square charge declined");
            }
        }
        Ok(outcome)
    }

    fn merchant_fee(&self, gross_cents: i64) -> Option<i64> {
        self.fee_rate.fee_for(gross_cents).ok()
    }
}

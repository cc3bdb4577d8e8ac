// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stripe over its form-encoded REST API.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::PaymentError;
use crate::provider::{
    ChargeRequest, CheckoutLine, CheckoutSession, CheckoutUrls, PaymentOutcome, PaymentProvider,
    require_lines, require_positive,
};

const PROVIDER: &str = "stripe";
const DEFAULT_BASE_URL: &str = "https://api.stripe.com";

#[derive(Debug, Deserialize)]
struct SessionBody {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaymentIntentBody {
    id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: String,
    message: Option<String>,
    decline_code: Option<String>,
}

/// Stripe Checkout Sessions and Payment Intents.
///
/// Stripe does not report processing fees up front, so no merchant fee
/// entry is recorded for its charges.
#[derive(Debug, Clone)]
pub struct StripeProvider {
    client: reqwest::Client,
    secret_key: String,
    base_url: String,
}

impl StripeProvider {
    #[must_use]
    pub fn new(secret_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key,
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }

    /// Points the client at another host, e.g. a local mock.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn post(
        &self,
        path: &str,
        form: &[(String, String)],
        idempotency_key: Option<&str>,
    ) -> Result<(u16, String), PaymentError> {
        let mut request = self
            .client
            .post(format!("{}{path}", self.base_url))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(form);
        if let Some(key) = idempotency_key {
            request = request.header("Idempotency-Key", key);
        }

        let response: reqwest::Response = request
            .send()
            .await
            .map_err(|e| PaymentError::transport(PROVIDER, e))?;
        let status: u16 = response.status().as_u16();
        let body: String = response
            .text()
            .await
            .map_err(|e| PaymentError::transport(PROVIDER, e))?;
        debug!(path, status, "Stripe responded");
        Ok((status, body))
    }
}

/// Builds the form body for `POST /v1/checkout/sessions`.
#[must_use]
pub fn checkout_form(
    lines: &[CheckoutLine],
    customer_email: &str,
    urls: &CheckoutUrls,
    metadata: &BTreeMap<String, String>,
) -> Vec<(String, String)> {
    let mut form: Vec<(String, String)> = vec![
        (String::from("mode"), String::from("payment")),
        (String::from("success_url"), urls.success_url.clone()),
        (String::from("cancel_url"), urls.cancel_url.clone()),
    ];
    if !customer_email.is_empty() {
        form.push((String::from("customer_email"), customer_email.to_string()));
    }

    for (i, line) in lines.iter().enumerate() {
        let prefix: String = format!("line_items[{i}]");
        form.push((
            format!("{prefix}[price_data][currency]"),
            String::from("usd"),
        ));
        form.push((
            format!("{prefix}[price_data][product_data][name]"),
            line.name.clone(),
        ));
        form.push((
            format!("{prefix}[price_data][unit_amount]"),
            line.unit_amount_cents.to_string(),
        ));
        form.push((format!("{prefix}[quantity]"), line.quantity.to_string()));
    }

    for (key, value) in metadata {
        form.push((format!("metadata[{key}]"), value.clone()));
    }
    form
}

fn error_message(status: u16, body: &str) -> PaymentError {
    let message: String = serde_json::from_str::<ErrorEnvelope>(body).map_or_else(
        |_| body.to_string(),
        |e| e.error.message.unwrap_or(e.error.kind),
    );
    PaymentError::Rejected {
        provider: PROVIDER,
        status,
        message,
    }
}

/// Reads a Checkout Session creation response.
///
/// # Errors
///
/// Returns an error for non-2xx statuses or a session without a URL.
pub fn interpret_session(status: u16, body: &str) -> Result<CheckoutSession, PaymentError> {
    if !(200..300).contains(&status) {
        return Err(error_message(status, body));
    }
    let session: SessionBody = serde_json::from_str(body)
        .map_err(|e| PaymentError::invalid_response(PROVIDER, e.to_string()))?;
    let url: String = session
        .url
        .ok_or_else(|| PaymentError::invalid_response(PROVIDER, "session has no url"))?;
    Ok(CheckoutSession {
        session_id: session.id,
        url,
    })
}

/// Reads a confirmed Payment Intent response.
///
/// Card errors are declines. Any other non-2xx status is an error.
///
/// # Errors
///
/// Returns an error for non-card failures or an unreadable body.
pub fn interpret_payment_intent(status: u16, body: &str) -> Result<PaymentOutcome, PaymentError> {
    if !(200..300).contains(&status) {
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body)
            && envelope.error.kind == "card_error"
        {
            let reason: String = envelope
                .error
                .message
                .or(envelope.error.decline_code)
                .unwrap_or_else(|| String::from("card declined"));
            return Ok(PaymentOutcome::Declined { reason });
        }
        return Err(error_message(status, body));
    }

    let intent: PaymentIntentBody = serde_json::from_str(body)
        .map_err(|e| PaymentError::invalid_response(PROVIDER, e.to_string()))?;
    if intent.status == "succeeded" {
        Ok(PaymentOutcome::Approved {
            payment_id: intent.id,
        })
    } else {
        Ok(PaymentOutcome::Declined {
            reason: format!("payment {}", intent.status.replace('_', " ")),
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
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
        let form: Vec<(String, String)> = checkout_form(lines, customer_email, urls, metadata);
        let (status, body) = self.post("/v1/checkout/sessions", &form, None).await?;
        let session: CheckoutSession = interpret_session(status, &body)?;
        info!(session_id = %session.session_id, "Stripe checkout session created");
        Ok(session)
    }

    async fn charge(&self, request: &ChargeRequest) -> Result<PaymentOutcome, PaymentError> {
        require_positive(request.amount_cents)?;
        let form: Vec<(String, String)> = vec![
            (String::from("amount"), request.amount_cents.to_string()),
            (String::from("currency"), String::from("usd")),
            (String::from("payment_method"), request.source_token.clone()),
            (String::from("confirm"), String::from("true")),
            (String::from("receipt_email"), request.customer_email.clone()),
            (String::from("description"), request.note.clone()),
            (
                String::from("automatic_payment_methods[enabled]"),
                String::from("true"),
            ),
            (
                String::from("automatic_payment_methods[allow_redirects]"),
                String::from("never"),
            ),
        ];
        let (status, body) = self
            .post(
                "/v1/payment_intents",
                &form,
                Some(&request.idempotency_key),
            )
            .await?;

        let outcome: PaymentOutcome = interpret_payment_intent(status, &body)?;
        match &outcome {
            PaymentOutcome::Approved { payment_id } => {
                info!(payment_id = %payment_id, amount_cents = request.amount_cents, "Stripe charge approved");
            }
            PaymentOutcome::Declined { reason } => {
                warn!(reason = %reason, "Stripe charge declined");
            }
        }
        Ok(outcome)
    }

    fn merchant_fee(&self, _gross_cents: i64) -> Option<i64> {
        None
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Customer checkout across the database and the payment provider.
//!
//! The plan is built under the persistence lock, the provider is called
//! with the lock released, and the order is committed under the lock again.
//! Stock is re-checked by the commit itself.

use std::collections::BTreeMap;

use axum::{Json, extract::State as AxumState, http::StatusCode};
use bakehouse::CheckoutPlan;
use bakehouse_api::{
    CheckoutRequestBody, CheckoutResponse, PaymentRequest, card_charge_commit, checkout_response,
    commit_checkout, hosted_checkout_commit, hosted_checkout_lines, notify_order_placed,
    prepare_checkout, translate_payment_error,
};
use bakehouse_domain::{PaymentStatus, format_date};
use bakehouse_payments::{
    ChargeRequest, CheckoutLine, CheckoutSession, CheckoutUrls, PaymentOutcome, PaymentProvider,
};
use bakehouse_persistence::{CommittedOrder, OrderCommit};
use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::AppState;
use crate::error::HttpError;

fn checkout_key() -> String {
    format!(
        "{:016x}{:016x}",
        rand::random::<u64>(),
        rand::random::<u64>()
    )
}

fn metadata(plan: &CheckoutPlan, key: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (String::from("checkout_key"), key.to_string()),
        (String::from("customer_email"), plan.customer.email.clone()),
        (
            String::from("fulfillment_method"),
            plan.fulfillment_method.as_str().to_string(),
        ),
        (
            String::from("fulfillment_date"),
            format_date(plan.fulfillment_date),
        ),
    ])
}

/// Takes payment for `plan` and returns the order bookkeeping plus the
/// hosted page to redirect to, if any.
async fn take_payment(
    provider: &dyn PaymentProvider,
    plan: &CheckoutPlan,
    payment: &PaymentRequest,
    urls: &CheckoutUrls,
) -> Result<(OrderCommit, Option<String>), HttpError> {
    match payment {
        PaymentRequest::HostedCheckout => {
            let lines: Vec<CheckoutLine> = hosted_checkout_lines(plan);
            let key: String = checkout_key();
            let session: CheckoutSession = provider
                .create_checkout(&lines, &plan.customer.email, urls, &metadata(plan, &key))
                .await
                .map_err(translate_payment_error)?;
            Ok((hosted_checkout_commit(provider, &session), Some(session.url)))
        }
        PaymentRequest::Card {
            source_token,
            idempotency_key,
        } => {
            let request: ChargeRequest = ChargeRequest {
                amount_cents: plan.totals.total_cents,
                source_token: source_token.clone(),
                idempotency_key: idempotency_key.clone(),
                customer_email: plan.customer.email.clone(),
                note: format!(
                    "{} order for {}",
                    plan.fulfillment_method,
                    format_date(plan.fulfillment_date)
                ),
            };
            let outcome: PaymentOutcome = provider
                .charge(&request)
                .await
                .map_err(translate_payment_error)?;
            Ok((card_charge_commit(provider, plan, outcome)?, None))
        }
    }
}

/// Runs a customer checkout end to end.
///
/// # Errors
///
/// Returns an error if the request is invalid, no payment provider is
/// configured, payment fails, or stock ran out before the commit.
pub async fn run_checkout(
    state: &AppState,
    body: &CheckoutRequestBody,
    now: DateTime<Utc>,
) -> Result<CheckoutResponse, HttpError> {
    let provider: &dyn PaymentProvider = state.payments.as_deref().ok_or_else(|| {
        HttpError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Online payment is not configured",
        )
    })?;

    let mut persistence = state.persistence.lock().await;
    let plan: CheckoutPlan = prepare_checkout(&mut persistence, body, now, &state.settings)?;
    drop(persistence);

    let (commit, redirect_url) =
        take_payment(provider, &plan, &body.payment, &state.checkout_urls).await?;

    let mut persistence = state.persistence.lock().await;
    let committed: CommittedOrder =
        commit_checkout(&mut persistence, &plan, &commit).map_err(|err| {
            if commit.payment_status == PaymentStatus::Paid {
                error!(
                    provider = provider.name(),
                    payment_reference = ?commit.payment_reference,
                    error = %err,
                    "Order not written after payment was taken; refund required"
                );
            }
            err
        })?;
    drop(persistence);

    info!(
        order_number = %committed.order_number,
        provider = provider.name(),
        status = %commit.status,
        total_cents = plan.totals.total_cents,
        "Checkout committed"
    );
    notify_order_placed(state.notifier.as_ref(), &plan, &committed);

    Ok(checkout_response(&plan, &committed, &commit, redirect_url))
}

/// Handler for POST `/checkout`.
pub async fn handle_checkout(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<CheckoutRequestBody>,
) -> Result<Json<CheckoutResponse>, HttpError> {
    info!(items = body.items.len(), "Handling checkout request");
    Ok(Json(run_checkout(&state, &body, Utc::now()).await?))
}

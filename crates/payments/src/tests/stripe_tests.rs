// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use super::loaf_line;
use crate::stripe::{checkout_form, interpret_payment_intent, interpret_session};
use crate::{
    ChargeRequest, CheckoutUrls, PaymentError, PaymentOutcome, PaymentProvider, StripeProvider,
};

fn field<'a>(form: &'a [(String, String)], key: &str) -> Option<&'a str> {
    form.iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[test]
fn test_checkout_form_encodes_lines_and_metadata() {
    let urls = CheckoutUrls {
        success_url: String::from("https://bakehouse.test/thanks"),
        cancel_url: String::from("https://bakehouse.test/cart"),
    };
    let mut metadata: BTreeMap<String, String> = BTreeMap::new();
    metadata.insert(String::from("order_number"), String::from("BH-000001"));

    let form = checkout_form(&[loaf_line()], "ada@example.com", &urls, &metadata);

    assert_eq!(field(&form, "mode"), Some("payment"));
    assert_eq!(field(&form, "customer_email"), Some("ada@example.com"));
    assert_eq!(
        field(&form, "line_items[0][price_data][product_data][name]"),
        Some("Sourdough Loaf")
    );
    assert_eq!(
        field(&form, "line_items[0][price_data][unit_amount]"),
        Some("1200")
    );
    assert_eq!(field(&form, "line_items[0][quantity]"), Some("2"));
    assert_eq!(field(&form, "metadata[order_number]"), Some("BH-000001"));
}

#[test]
fn test_session_response_yields_redirect() {
    let body = r#"{"id":"cs_test_1","url":"https://checkout.stripe.com/c/pay/cs_test_1"}"#;

    let session = interpret_session(200, body).unwrap();

    assert_eq!(session.session_id, "cs_test_1");
    assert!(session.url.starts_with("https://checkout.stripe.com"));
}

#[test]
fn test_session_error_is_rejected() {
    let body = r#"{"error":{"type":"invalid_request_error","message":"No such price"}}"#;

    let result = interpret_session(400, body);

    assert!(matches!(
        result,
        Err(PaymentError::Rejected { status: 400, ref message, .. }) if message == "No such price"
    ));
}

#[test]
fn test_succeeded_intent_is_approved() {
    let body = r#"{"id":"pi_123","status":"succeeded"}"#;

    assert_eq!(
        interpret_payment_intent(200, body).unwrap(),
        PaymentOutcome::Approved {
            payment_id: String::from("pi_123")
        }
    );
}

#[test]
fn test_card_error_is_a_decline() {
    let body = r#"{"error":{"type":"card_error","message":"Your card was declined.","decline_code":"generic_decline"}}"#;

    assert_eq!(
        interpret_payment_intent(402, body).unwrap(),
        PaymentOutcome::Declined {
            reason: String::from("Your card was declined.")
        }
    );
}

#[test]
fn test_intent_needing_action_is_declined() {
    let body = r#"{"id":"pi_123","status":"requires_action"}"#;

    assert!(matches!(
        interpret_payment_intent(200, body).unwrap(),
        PaymentOutcome::Declined { .. }
    ));
}

#[test]
fn test_authentication_error_is_not_a_decline() {
    let body = r#"{"error":{"type":"invalid_request_error","message":"Invalid API Key"}}"#;

    assert!(interpret_payment_intent(401, body).is_err());
}

#[test]
fn test_stripe_reports_no_merchant_fee() {
    let provider = StripeProvider::new(String::from("sk_test"));

    assert_eq!(provider.name(), "stripe");
    assert_eq!(provider.merchant_fee(10_000), None);
}

#[tokio::test]
async fn test_charge_rejects_non_positive_amount_before_network() {
    let provider = StripeProvider::new(String::from("sk_test")).with_base_url("http://127.0.0.1:9");
    let request = ChargeRequest {
        amount_cents: 0,
        source_token: String::from("pm_card_visa"),
        idempotency_key: String::from("key-1"),
        customer_email: String::from("ada@example.com"),
        note: String::from("BH order"),
    };

    let result = provider.charge(&request).await;

    assert!(matches!(result, Err(PaymentError::InvalidAmount(0))));
}

#[tokio::test]
async fn test_checkout_requires_lines() {
    let provider = StripeProvider::new(String::from("sk_test")).with_base_url("http://127.0.0.1:9");

    let result = provider
        .create_checkout(&[], "ada@example.com", &CheckoutUrls::default(), &BTreeMap::new())
        .await;

    assert!(matches!(result, Err(PaymentError::EmptyCheckout)));
}

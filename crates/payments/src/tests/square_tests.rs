// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use serde_json::Value;

use super::loaf_line;
use crate::square::{interpret_payment, interpret_payment_link, payment_link_body};
use crate::{CheckoutUrls, PaymentError, PaymentOutcome, PaymentProvider, SquareProvider};

#[test]
fn test_payment_link_body_prices_lines_in_cents() {
    let urls = CheckoutUrls {
        success_url: String::from("https://bakehouse.test/thanks"),
        cancel_url: String::from("https://bakehouse.test/cart"),
    };

    let body: Value = payment_link_body(
        "LOC1",
        "key-1",
        &[loaf_line()],
        "ada@example.com",
        &urls,
        &BTreeMap::new(),
    );

    assert_eq!(body["idempotency_key"], "key-1");
    assert_eq!(body["order"]["location_id"], "LOC1");
    let line: &Value = &body["order"]["line_items"][0];
    assert_eq!(line["quantity"], "2");
    assert_eq!(line["base_price_money"]["amount"], 1200);
    assert_eq!(line["base_price_money"]["currency"], "USD");
    assert_eq!(
        body["checkout_options"]["redirect_url"],
        "https://bakehouse.test/thanks"
    );
}

#[test]
fn test_payment_link_response() {
    let body = r#"{"payment_link":{"id":"PL1","url":"https://square.link/u/abc","order_id":"O1"}}"#;

    let session = interpret_payment_link(200, body).unwrap();

    assert_eq!(session.session_id, "PL1");
    assert_eq!(session.url, "https://square.link/u/abc");
}

#[test]
fn test_completed_payment_is_approved() {
    let body = r#"{"payment":{"id":"sq_pay_1","status":"COMPLETED"}}"#;

    assert_eq!(
        interpret_payment(200, body).unwrap(),
        PaymentOutcome::Approved {
            payment_id: String::from("sq_pay_1")
        }
    );
}

#[test]
fn test_card_declined_is_a_decline() {
    let body = r#"{"errors":[{"category":"PAYMENT_METHOD_ERROR","code":"CARD_DECLINED","detail":"Card declined."}]}"#;

    assert_eq!(
        interpret_payment(400, body).unwrap(),
        PaymentOutcome::Declined {
            reason: String::from("Card declined.")
        }
    );
}

#[test]
fn test_auth_failure_is_an_error() {
    let body = r#"{"errors":[{"category":"AUTHENTICATION_ERROR","code":"UNAUTHORIZED","detail":"Bad token"}]}"#;

    assert!(matches!(
        interpret_payment(401, body),
        Err(PaymentError::Rejected { status: 401, .. })
    ));
}

#[test]
fn test_square_merchant_fee_is_card_standard() {
    let provider = SquareProvider::new(String::from("token"), String::from("LOC1"));

    assert_eq!(provider.name(), "square");
    // 2.9% of $100.00 plus 30 cents.
    assert_eq!(provider.merchant_fee(10_000), Some(320));
    // 2.9% of $17.00 is 49.3, rounded to 49, plus 30.
    assert_eq!(provider.merchant_fee(1_700), Some(79));
}
